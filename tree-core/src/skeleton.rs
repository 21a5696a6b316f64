use glam::{Mat4, Vec3};

/// One oriented cylinder of the skeleton: spans from the local origin
/// to `length` along local +Z under `world`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchSegment {
    pub world: Mat4,
    pub length: f32,
    pub radius: f32,
}

impl BranchSegment {
    /// World-space position of the segment's base.
    pub fn start(&self) -> Vec3 {
        self.world.transform_point3(Vec3::ZERO)
    }

    /// World-space position of the segment's tip.
    pub fn end(&self) -> Vec3 {
        self.world.transform_point3(Vec3::new(0.0, 0.0, self.length))
    }
}

/// One deduplicated joint ("soft end"), rendered downstream as a
/// sphere rounding off the seam between adjacent cylinders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointPoint {
    pub position: Vec3,
    pub radius: f32,
}

/// Sink for emitted descriptors. The downstream mesh builder turns
/// branches into cylinders and joints into spheres; the core only
/// hands descriptors over and never retains them.
pub trait SegmentCollector {
    fn branch(&mut self, segment: BranchSegment);
    fn joint(&mut self, joint: JointPoint);
}

/// Plain in-memory collector; what [`crate::grammar::generate`] returns.
#[derive(Debug, Default)]
pub struct Skeleton {
    pub branches: Vec<BranchSegment>,
    pub joints: Vec<JointPoint>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SegmentCollector for Skeleton {
    fn branch(&mut self, segment: BranchSegment) {
        self.branches.push(segment);
    }

    fn joint(&mut self, joint: JointPoint) {
        self.joints.push(joint);
    }
}
