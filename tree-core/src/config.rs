use crate::error::{GrowthError, GrowthResult};

#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Rotation magnitude for the four child branches, in degrees.
    pub angle: f32,
    pub initial_branch_length: f32,
    /// Shrink factor per level; each child's nominal length is its
    /// parent's divided by this. Must be greater than 1.
    pub branch_divisor: f32,
    pub radius: f32,
    pub max_depth: usize,
    /// Whether joint spheres ("soft ends") are tracked and emitted.
    pub soft_ends_enabled: bool,
    pub twist_enabled: bool,
    /// Rotation around the branch axis applied before children, in degrees.
    pub twist_amount: f32,
    pub variation_enabled: bool,
    pub length_variation: f32,
    pub twist_variation: f32,
    pub angle_variation: f32,
    /// Seed for the jitter generator. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            angle: 45.0,
            initial_branch_length: 10.0,
            branch_divisor: 2.0,
            radius: 0.2,
            max_depth: 4,
            soft_ends_enabled: true,
            twist_enabled: false,
            twist_amount: 30.0,
            variation_enabled: false,
            length_variation: 1.0,
            twist_variation: 10.0,
            angle_variation: 10.0,
            seed: None,
        }
    }
}

impl Config {
    /// Checks every numeric field before a generation run starts.
    ///
    /// Called by [`crate::grammar::generate`] up front so that a bad
    /// configuration fails before anything is emitted, rather than
    /// surfacing as a panic deep in the recursion.
    pub fn validate(&self) -> GrowthResult<()> {
        if !self.initial_branch_length.is_finite() || self.initial_branch_length <= 0.0 {
            return Err(GrowthError::invalid_config(format!(
                "initial_branch_length must be positive and finite, got {}",
                self.initial_branch_length
            )));
        }
        if !self.branch_divisor.is_finite() || self.branch_divisor <= 1.0 {
            return Err(GrowthError::invalid_config(format!(
                "branch_divisor must be finite and greater than 1, got {}",
                self.branch_divisor
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GrowthError::invalid_config(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if !self.angle.is_finite() || !self.twist_amount.is_finite() {
            return Err(GrowthError::invalid_config(
                "angle and twist_amount must be finite",
            ));
        }
        for (name, spread) in [
            ("length_variation", self.length_variation),
            ("twist_variation", self.twist_variation),
            ("angle_variation", self.angle_variation),
        ] {
            if !spread.is_finite() || spread < 0.0 {
                return Err(GrowthError::invalid_config(format!(
                    "{name} must be non-negative and finite, got {spread}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_length() {
        let mut cfg = Config::default();
        cfg.initial_branch_length = 0.0;
        assert!(cfg.validate().is_err());

        cfg.initial_branch_length = -3.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_divisor_at_or_below_one() {
        let mut cfg = Config::default();
        cfg.branch_divisor = 1.0;
        assert!(cfg.validate().is_err());

        cfg.branch_divisor = 0.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_angle() {
        let mut cfg = Config::default();
        cfg.angle = f32::NAN;
        assert!(cfg.validate().is_err());

        cfg.angle = 45.0;
        cfg.twist_amount = f32::INFINITY;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_variation_spread() {
        let mut cfg = Config::default();
        cfg.angle_variation = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_radius() {
        let mut cfg = Config::default();
        cfg.radius = 0.0;
        assert!(cfg.validate().is_err());
    }
}
