// Intensity score formula.
//
// The intensity is a linear weighted sum over the three counters, rounded
// and saturated at 100. Linearity keeps the hard constraint trivially true:
// more of any counter never decreases the score.
//
// `intensity = min(100, round(views*vw + shares*sw + confirmations*cw))`

use serde::{Deserialize, Serialize};

/// Configurable weights for the intensity formula.
///
/// A confirmation is a stronger signal than a view (someone committed to
/// showing up), and a share is stronger still (it compounds reach).
pub struct IntensityWeights {
    /// Weight per view (default 0.05 — 20 views = 1 point)
    pub view_weight: f64,
    /// Weight per share (default 1.0)
    pub share_weight: f64,
    /// Weight per confirmation (default 0.5)
    pub confirm_weight: f64,
}

impl Default for IntensityWeights {
    fn default() -> Self {
        Self {
            view_weight: 0.05,
            share_weight: 1.0,
            confirm_weight: 0.5,
        }
    }
}

/// Compute the intensity score (0-100) from the raw counters.
pub fn compute_intensity(
    views: u32,
    shares: u32,
    confirmations: u32,
    weights: &IntensityWeights,
) -> u32 {
    let raw = views as f64 * weights.view_weight
        + shares as f64 * weights.share_weight
        + confirmations as f64 * weights.confirm_weight;

    // Saturate at 100 rather than growing unbounded
    (raw.round() as u64).min(100) as u32
}

/// Tier labels for the intensity indicator, lowest to highest.
///
/// Boundaries are inclusive-low/exclusive-high, except Viral which
/// includes 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntensityTier {
    Comecando,
    GanhandoForca,
    Crescendo,
    AltaEnergia,
    Viral,
}

impl IntensityTier {
    /// Determine the tier from an intensity score (0-100).
    pub fn from_intensity(intensity: u32) -> Self {
        match intensity {
            i if i >= 80 => IntensityTier::Viral,
            i if i >= 60 => IntensityTier::AltaEnergia,
            i if i >= 40 => IntensityTier::Crescendo,
            i if i >= 20 => IntensityTier::GanhandoForca,
            _ => IntensityTier::Comecando,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntensityTier::Comecando => "Começando",
            IntensityTier::GanhandoForca => "Ganhando Força",
            IntensityTier::Crescendo => "Crescendo",
            IntensityTier::AltaEnergia => "Alta Energia",
            IntensityTier::Viral => "Viral",
        }
    }
}

impl std::fmt::Display for IntensityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
