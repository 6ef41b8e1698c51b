//! Synthetic sensor-mat readings for one foot

use crate::foot_patterns::FootPattern;
use plantar_core::{FootSide, PlantarError, PlantarResult, PressureMatrix, RawFoot, CANVAS_SIZE, RAW_SENTINEL};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Configuration for simulating one foot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootConfig {
    pub side: FootSide,
    /// 0-based top offset on the canvas
    pub row: usize,
    /// 0-based left offset on the canvas
    pub col: usize,
    pub height: usize,
    pub width: usize,
    pub pattern: FootPattern,
    /// Gaussian noise standard deviation (0.0 = no noise)
    pub noise_std: f64,
    /// Readings below this are exported as "not detected"
    pub detection_threshold: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl FootConfig {
    /// Left foot on the left half of the mat
    pub fn left() -> Self {
        Self {
            side: FootSide::Left,
            row: 8,
            col: 6,
            height: 32,
            width: 14,
            pattern: FootPattern::Standing {
                forefoot_load: 20.0,
                heel_load: 30.0,
                spread: 0.2,
            },
            noise_std: 0.5,
            detection_threshold: 0.5,
            seed: None,
        }
    }

    /// Right foot mirrored on the right half of the mat
    pub fn right() -> Self {
        Self {
            side: FootSide::Right,
            col: 27,
            ..Self::left()
        }
    }

    /// Validate dimensions against the canvas
    pub fn validate(&self) -> PlantarResult<()> {
        if self.height == 0 || self.width == 0 {
            return Err(simulation_error("Foot height and width must be positive"));
        }

        if self.row + self.height > CANVAS_SIZE || self.col + self.width + 1 > CANVAS_SIZE {
            return Err(simulation_error(format!(
                "{} foot at ({}, {}) with extent {}x{} does not fit the canvas",
                self.side, self.row, self.col, self.height, self.width
            )));
        }

        if !(self.noise_std.is_finite() && self.noise_std >= 0.0) {
            return Err(simulation_error("Noise standard deviation must be non-negative"));
        }

        Ok(())
    }
}

impl Default for FootConfig {
    fn default() -> Self {
        Self::left()
    }
}

/// Plantar pressure simulator
pub struct FootSimulator {
    config: FootConfig,
    rng: rand::rngs::StdRng,
    normal_dist: Normal<f64>,
}

impl FootSimulator {
    /// Create new simulator with configuration
    pub fn new(config: FootConfig) -> PlantarResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };
        let normal_dist = Normal::new(0.0, config.noise_std)
            .map_err(|e| simulation_error(format!("Failed to create normal distribution: {}", e)))?;

        Ok(Self {
            config,
            rng,
            normal_dist,
        })
    }

    /// Generate one measurement
    ///
    /// The matrix has `width + 1` columns like a device export; cells off the
    /// sole or below the detection threshold hold the raw sentinel.
    pub fn generate(&mut self) -> PlantarResult<RawFoot> {
        let height = self.config.height;
        let cols = self.config.width + 1;
        let mut data = Vec::with_capacity(height * cols);

        for r in 0..height {
            let v = (r as f64 + 0.5) / height as f64;
            for c in 0..cols {
                // Medial edge faces the other foot
                let lateral_index = match self.config.side {
                    FootSide::Left => cols - 1 - c,
                    FootSide::Right => c,
                };
                let u = (lateral_index as f64 + 0.5) / cols as f64;
                data.push(self.sample(u, v));
            }
        }

        let matrix = PressureMatrix::new(height, cols, data)?;
        RawFoot::new(self.config.row, self.config.col, height, self.config.width, matrix)
    }

    fn sample(&mut self, u: f64, v: f64) -> f64 {
        if !FootPattern::in_outline(u, v) {
            return RAW_SENTINEL;
        }

        let reading = self.config.pattern.load_at(u, v) + self.normal_dist.sample(&mut self.rng);
        if reading < self.config.detection_threshold {
            RAW_SENTINEL
        } else {
            // Device exports two decimals
            (reading * 100.0).round() / 100.0
        }
    }
}

/// Generate a left/right pair from the default placements
pub fn simulate_pair(seed: u64) -> PlantarResult<(RawFoot, RawFoot)> {
    let left = FootSimulator::new(FootConfig {
        seed: Some(seed),
        ..FootConfig::left()
    })?
    .generate()?;

    let right = FootSimulator::new(FootConfig {
        seed: Some(seed.wrapping_add(1)),
        ..FootConfig::right()
    })?
    .generate()?;

    Ok((left, right))
}

fn simulation_error(message: impl Into<String>) -> PlantarError {
    PlantarError::Simulation {
        message: message.into(),
    }
}
