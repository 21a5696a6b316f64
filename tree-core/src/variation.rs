use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;

/// Per-run jitter source for branch length, twist, and child angles.
///
/// One instance (and one RNG) serves the whole run. With variation
/// disabled every jittered quantity equals its nominal value and the
/// RNG is never consulted, so disabled runs are fully deterministic.
#[derive(Debug)]
pub struct VariationSource {
    rng: StdRng,
    enabled: bool,
    length_spread: f32,
    twist_spread: f32,
    angle_spread: f32,
}

impl VariationSource {
    pub fn from_config(cfg: &Config) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            enabled: cfg.variation_enabled,
            length_spread: cfg.length_variation,
            twist_spread: cfg.twist_variation,
            angle_spread: cfg.angle_variation,
        }
    }

    /// Uniform draw from `[nominal - spread, nominal + spread]`, or
    /// `nominal` exactly when variation is off or the spread is zero.
    fn jitter(&mut self, nominal: f32, spread: f32) -> f32 {
        if !self.enabled || spread == 0.0 {
            return nominal;
        }
        self.rng.random_range(nominal - spread..=nominal + spread)
    }

    pub fn branch_length(&mut self, nominal: f32) -> f32 {
        let spread = self.length_spread;
        self.jitter(nominal, spread)
    }

    pub fn twist(&mut self, nominal: f32) -> f32 {
        let spread = self.twist_spread;
        self.jitter(nominal, spread)
    }

    pub fn angle(&mut self, nominal: f32) -> f32 {
        let spread = self.angle_spread;
        self.jitter(nominal, spread)
    }
}
