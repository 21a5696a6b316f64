use crate::error::{GrowthError, GrowthResult};
use glam::Mat4;

/// A stack of affine transforms tracking the accumulated placement of
/// the evaluator, turtle-graphics style.
///
/// The chain always holds at least one entry, the identity base. Every
/// production pushes transforms on entry and pops the same number on
/// exit, so the chain length mirrors the recursion depth. The world
/// transform at any point is the base-first product of all entries.
///
/// Entries are rotation + translation only; nothing scales or shears.
#[derive(Debug)]
pub struct TransformChain {
    entries: Vec<Mat4>,
}

impl TransformChain {
    /// Creates a chain holding only the identity base.
    pub fn new() -> Self {
        Self {
            entries: vec![Mat4::IDENTITY],
        }
    }

    /// Appends a transform to the chain.
    pub fn push(&mut self, m: Mat4) {
        self.entries.push(m);
    }

    /// Removes the most recently pushed transform.
    ///
    /// ### Errors
    /// [`GrowthError::UnbalancedChain`] if only the identity base is
    /// left. Callers that pair pushes and pops can never hit this; it
    /// exists as an internal consistency check.
    pub fn pop(&mut self) -> GrowthResult<()> {
        if self.entries.len() <= 1 {
            return Err(GrowthError::UnbalancedChain);
        }
        self.entries.pop();
        Ok(())
    }

    /// Computes the world transform: the product of all entries in
    /// push order, starting from the base.
    ///
    /// Pure read; O(len), which is bounded by the recursion depth.
    pub fn composed(&self) -> Mat4 {
        let mut m = self.entries[0];
        for entry in &self.entries[1..] {
            m *= *entry;
        }
        m
    }

    /// Number of entries, including the identity base.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false // the identity base is always present
    }
}

impl Default for TransformChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4Swizzles};

    #[test]
    fn new_chain_composes_to_identity() {
        let chain = TransformChain::new();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.composed(), Mat4::IDENTITY);
    }

    #[test]
    fn push_pop_restores_length() {
        let mut chain = TransformChain::new();
        chain.push(Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));
        chain.push(Mat4::from_rotation_x(0.5));
        assert_eq!(chain.len(), 3);

        chain.pop().unwrap();
        chain.pop().unwrap();
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn popping_the_base_is_an_error() {
        let mut chain = TransformChain::new();
        assert!(matches!(chain.pop(), Err(GrowthError::UnbalancedChain)));

        // The failed pop must leave the base intact.
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.composed(), Mat4::IDENTITY);
    }

    #[test]
    fn composition_is_base_first_push_order() {
        // Translate along Z, then rotate about X: the rotation happens
        // in the already-translated frame, so the origin maps to the
        // translation itself.
        let mut chain = TransformChain::new();
        chain.push(Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)));
        chain.push(Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2));

        let origin = (chain.composed() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0)).xyz();
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-5));

        // A point one unit along local +Z ends up rotated around the
        // translated origin.
        let tip = (chain.composed() * glam::Vec4::new(0.0, 0.0, 1.0, 1.0)).xyz();
        let expected = Vec3::new(0.0, 0.0, 2.0)
            + Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2)
                .transform_vector3(Vec3::new(0.0, 0.0, 1.0));
        assert!(tip.abs_diff_eq(expected, 1e-5));

        // Reversed order gives a different result: rotate first and
        // the translation itself gets rotated.
        let mut reversed = TransformChain::new();
        reversed.push(Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2));
        reversed.push(Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)));
        let reversed_origin =
            (reversed.composed() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0)).xyz();
        assert!(!reversed_origin.abs_diff_eq(origin, 1e-4));
    }

    #[test]
    fn composed_does_not_mutate() {
        let mut chain = TransformChain::new();
        chain.push(Mat4::from_rotation_y(0.3));
        let first = chain.composed();
        let second = chain.composed();
        assert_eq!(first, second);
        assert_eq!(chain.len(), 2);
    }
}
