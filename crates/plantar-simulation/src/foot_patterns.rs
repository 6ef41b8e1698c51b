//! Pre-defined plantar load patterns for synthetic measurements

use serde::{Deserialize, Serialize};

/// Load distribution over a foot, in native device units
///
/// Patterns are sampled at normalised coordinates: `u` runs medial (0) to
/// lateral (1), `v` runs toes (0) to heel (1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FootPattern {
    /// Same reading over the whole outline
    Uniform { level: f64 },
    /// Quiet standing: forefoot and heel contact areas joined by the lateral midfoot
    Standing {
        forefoot_load: f64,
        heel_load: f64,
        /// Contact area radius, as a fraction of the foot length
        spread: f64,
    },
    /// Load concentrated on the heel
    HeelStrike { load: f64 },
    /// Load concentrated under the metatarsal heads
    ToeOff { load: f64 },
}

impl FootPattern {
    /// Reading at a normalised position inside the foot outline
    pub fn load_at(&self, u: f64, v: f64) -> f64 {
        match self {
            FootPattern::Uniform { level } => *level,

            FootPattern::Standing { forefoot_load, heel_load, spread } => {
                let forefoot = forefoot_load * blob(u, v, 0.45, 0.25, *spread);
                let heel = heel_load * blob(u, v, 0.5, 0.82, *spread * 0.8);
                // Lateral column carries a fraction of the load through the arch
                let midfoot = 0.25 * forefoot_load.min(*heel_load) * blob(u, v, 0.75, 0.55, *spread);
                forefoot + heel + midfoot
            }

            FootPattern::HeelStrike { load } => load * blob(u, v, 0.5, 0.82, 0.18),

            FootPattern::ToeOff { load } => {
                let metatarsals = load * blob(u, v, 0.45, 0.28, 0.15);
                let hallux = 0.6 * load * blob(u, v, 0.3, 0.08, 0.08);
                metatarsals + hallux
            }
        }
    }

    /// Whether a normalised position lies on the sole
    pub fn in_outline(u: f64, v: f64) -> bool {
        // Narrower at the heel and arch, widest across the metatarsals
        let spread = (v - 0.3) / 0.3;
        let half_width = 0.5 * (0.7 + 0.3 * (-spread * spread).exp());
        let du = (u - 0.5) / half_width;
        let dv = (v - 0.5) / 0.5;
        du * du + dv * dv <= 1.0
    }

    /// Get pattern description
    pub fn description(&self) -> &'static str {
        match self {
            FootPattern::Uniform { .. } => "Uniform load",
            FootPattern::Standing { .. } => "Quiet standing",
            FootPattern::HeelStrike { .. } => "Heel strike",
            FootPattern::ToeOff { .. } => "Toe off",
        }
    }

    /// Create common preset patterns
    pub fn presets() -> Vec<(&'static str, FootPattern)> {
        vec![
            ("Flat", FootPattern::Uniform { level: 8.0 }),
            ("Balanced Stance", FootPattern::Standing {
                forefoot_load: 20.0, heel_load: 30.0, spread: 0.2
            }),
            ("Forward Lean", FootPattern::Standing {
                forefoot_load: 35.0, heel_load: 15.0, spread: 0.2
            }),
            ("Heel Strike", FootPattern::HeelStrike { load: 45.0 }),
            ("Toe Off", FootPattern::ToeOff { load: 40.0 }),
        ]
    }
}

/// Gaussian bump centred on (`cu`, `cv`)
fn blob(u: f64, v: f64, cu: f64, cv: f64, radius: f64) -> f64 {
    let du = u - cu;
    let dv = v - cv;
    (-(du * du + dv * dv) / (2.0 * radius * radius)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_loads_heel_and_forefoot() {
        let pattern = FootPattern::Standing { forefoot_load: 20.0, heel_load: 30.0, spread: 0.2 };
        let heel = pattern.load_at(0.5, 0.82);
        let forefoot = pattern.load_at(0.45, 0.25);
        let arch_medial = pattern.load_at(0.15, 0.55);

        assert!(heel > forefoot);
        assert!(forefoot > arch_medial);
    }

    #[test]
    fn test_outline() {
        assert!(FootPattern::in_outline(0.5, 0.5));
        assert!(!FootPattern::in_outline(0.0, 0.0));
        assert!(!FootPattern::in_outline(1.0, 1.0));
    }

    #[test]
    fn test_presets_are_positive_at_centre() {
        for (name, pattern) in FootPattern::presets() {
            assert!(pattern.load_at(0.5, 0.5) > 0.0, "{} has no load at the centre", name);
            assert!(!pattern.description().is_empty());
        }
    }
}
