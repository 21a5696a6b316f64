use std::collections::HashSet;

use glam::Vec3;

/// World-space size of one quantization cell. Two endpoints closer
/// than this along every axis count as the same joint.
///
/// Parent-end and child-start positions of a shared joint are computed
/// through different matrix products and can disagree in the low bits,
/// so exact float equality would occasionally emit duplicate spheres.
const QUANTUM: f32 = 1e-3;

/// Deduplicating set of joint positions already emitted this run.
///
/// Positions are keyed by their coordinates rounded to [`QUANTUM`],
/// which makes dedup independent of the recursion path that reached
/// the joint and of sibling emission order.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    seen: HashSet<[i64; 3]>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(position: Vec3) -> [i64; 3] {
        [
            (position.x / QUANTUM).round() as i64,
            (position.y / QUANTUM).round() as i64,
            (position.z / QUANTUM).round() as i64,
        ]
    }

    /// Records `position` if it has not been seen yet.
    ///
    /// Returns `true` when the caller should emit a joint here, and
    /// `false` when a coincident joint was already emitted.
    pub fn try_emit(&mut self, position: Vec3) -> bool {
        self.seen.insert(Self::key(position))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_emission_succeeds_repeat_fails() {
        let mut reg = EndpointRegistry::new();
        let p = Vec3::new(1.0, 2.0, 3.0);

        assert!(reg.try_emit(p));
        assert!(!reg.try_emit(p));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn nearby_positions_within_a_quantum_collapse() {
        let mut reg = EndpointRegistry::new();
        assert!(reg.try_emit(Vec3::new(1.0, 2.0, 3.0)));

        // Sub-quantum float noise, as produced by divergent matrix
        // composition paths.
        assert!(!reg.try_emit(Vec3::new(1.0 + 2e-4, 2.0 - 2e-4, 3.0)));
    }

    #[test]
    fn distinct_positions_are_kept_apart() {
        let mut reg = EndpointRegistry::new();
        assert!(reg.try_emit(Vec3::ZERO));
        assert!(reg.try_emit(Vec3::new(0.01, 0.0, 0.0)));
        assert!(reg.try_emit(Vec3::new(0.0, 0.0, 10.0)));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn emission_order_does_not_affect_dedup() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0 + 1e-4),
            Vec3::new(3.0, 0.0, 5.0),
        ];

        let mut forward = EndpointRegistry::new();
        let forward_count = points.iter().filter(|&&p| forward.try_emit(p)).count();

        let mut backward = EndpointRegistry::new();
        let backward_count = points
            .iter()
            .rev()
            .filter(|&&p| backward.try_emit(p))
            .count();

        assert_eq!(forward_count, 3);
        assert_eq!(backward_count, 3);
    }
}
