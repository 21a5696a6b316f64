//! The recursive grammar evaluator.
//!
//! The grammar is `A -> B C D E`: production A places one branch and
//! spawns four children, each child being "rotate, then A again". The
//! four children differ only by rotation axis and sign, so they are
//! collapsed into a single parameterized step driven by
//! [`CHILD_ROTATIONS`] instead of four near-identical functions.

use glam::{Mat4, Vec3};
use tracing::{debug, info};

use crate::chain::TransformChain;
use crate::config::Config;
use crate::error::GrowthResult;
use crate::registry::EndpointRegistry;
use crate::skeleton::{BranchSegment, JointPoint, SegmentCollector, Skeleton};
use crate::variation::VariationSource;

/// Rotation axis for a child production.
#[derive(Clone, Copy, Debug)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn rotation(self, radians: f32) -> Mat4 {
        match self {
            Axis::X => Mat4::from_rotation_x(radians),
            Axis::Y => Mat4::from_rotation_y(radians),
        }
    }
}

/// The four child rotations (productions B, C, D, E) in emission
/// order: +X, +Y, -X, -Y. The symmetric axis/sign pairs splay the
/// children around the parent branch's axis.
const CHILD_ROTATIONS: [(Axis, f32); 4] =
    [(Axis::X, 1.0), (Axis::Y, 1.0), (Axis::X, -1.0), (Axis::Y, -1.0)];

/// Mutable context threaded through the recursion.
///
/// Invariant: after any production returns, `cur_depth`,
/// `branch_length`, and the chain length are exactly what they were
/// at entry. The productions restore everything they touch, on every
/// exit path.
#[derive(Debug)]
pub struct RenderState {
    pub max_depth: usize,
    pub cur_depth: usize,
    pub branch_length: f32,
    pub chain: TransformChain,
}

impl RenderState {
    pub fn new(cfg: &Config) -> Self {
        Self {
            max_depth: cfg.max_depth,
            cur_depth: 0,
            branch_length: cfg.initial_branch_length,
            chain: TransformChain::new(),
        }
    }
}

/// Generates a complete skeleton from `cfg`.
///
/// Validates the configuration first; on error nothing is generated.
///
/// ### Returns
/// A [`Skeleton`] holding every [`BranchSegment`] in emission order
/// and, when soft ends are enabled, the deduplicated [`JointPoint`]s.
pub fn generate(cfg: &Config) -> GrowthResult<Skeleton> {
    let mut skeleton = Skeleton::new();
    generate_into(cfg, &mut skeleton)?;
    Ok(skeleton)
}

/// Like [`generate`], but drives an arbitrary [`SegmentCollector`]
/// instead of buffering into a [`Skeleton`].
///
/// The collector receives descriptors as they are produced; it is
/// never handed anything twice and joints arrive already deduplicated.
pub fn generate_into(
    cfg: &Config,
    collector: &mut impl SegmentCollector,
) -> GrowthResult<()> {
    if let Err(err) = cfg.validate() {
        debug!(%err, "rejected configuration");
        return Err(err);
    }

    let mut state = RenderState::new(cfg);
    let mut evaluator = Evaluator {
        cfg,
        variation: VariationSource::from_config(cfg),
        registry: EndpointRegistry::new(),
        collector,
        branches: 0,
        joints: 0,
    };
    evaluator.branch(&mut state)?;

    info!(
        branches = evaluator.branches,
        joints = evaluator.joints,
        max_depth = cfg.max_depth,
        "generated tree skeleton"
    );
    Ok(())
}

struct Evaluator<'a, C: SegmentCollector> {
    cfg: &'a Config,
    variation: VariationSource,
    registry: EndpointRegistry,
    collector: &'a mut C,
    branches: usize,
    joints: usize,
}

impl<C: SegmentCollector> Evaluator<'_, C> {
    /// Production A: emit one branch, then recurse into the four
    /// children unless the depth budget is spent.
    ///
    /// Emission happens before the terminal check, so `max_depth = 0`
    /// still yields the root segment and the total count is
    /// `(4^(d+1) - 1) / 3`.
    fn branch(&mut self, state: &mut RenderState) -> GrowthResult<()> {
        let length = self.variation.branch_length(state.branch_length);
        self.emit(state.chain.composed(), length);

        if state.cur_depth >= state.max_depth {
            return Ok(());
        }

        state
            .chain
            .push(Mat4::from_translation(Vec3::new(0.0, 0.0, length)));
        let twisted = self.cfg.twist_enabled;
        if twisted {
            let twist = self.variation.twist(self.cfg.twist_amount).to_radians();
            state.chain.push(Mat4::from_rotation_z(twist));
        }

        let parent_length = state.branch_length;
        state.branch_length = length / self.cfg.branch_divisor;
        state.cur_depth += 1;

        for (axis, sign) in CHILD_ROTATIONS {
            self.child(state, axis, sign)?;
        }

        state.cur_depth -= 1;
        state.branch_length = parent_length;

        if twisted {
            state.chain.pop()?;
        }
        state.chain.pop()?;
        Ok(())
    }

    /// Productions B/C/D/E: rotate about `axis` by the (possibly
    /// jittered) configured angle with the given sign, then recurse.
    fn child(&mut self, state: &mut RenderState, axis: Axis, sign: f32) -> GrowthResult<()> {
        let angle = sign * self.variation.angle(self.cfg.angle).to_radians();
        state.chain.push(axis.rotation(angle));
        self.branch(state)?;
        state.chain.pop()?;
        Ok(())
    }

    fn emit(&mut self, world: Mat4, length: f32) {
        let segment = BranchSegment {
            world,
            length,
            radius: self.cfg.radius,
        };

        if self.cfg.soft_ends_enabled {
            for position in [segment.start(), segment.end()] {
                if self.registry.try_emit(position) {
                    self.collector.joint(JointPoint {
                        position,
                        radius: self.cfg.radius,
                    });
                    self.joints += 1;
                }
            }
        }

        self.collector.branch(segment);
        self.branches += 1;
    }
}
