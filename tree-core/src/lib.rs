//! Core library for generating fractal tree skeletons.
//!
//! A small stochastic grammar (`A -> B C D E`) is evaluated
//! recursively, depth-first, while a stack of affine transforms tracks
//! the current placement. Each production emits one oriented branch
//! segment and up to two joint points, with joints deduplicated across
//! the whole run so shared endpoints are reported once.
//!
//! Main components:
//! - [`config`] — run configuration and validation.
//! - [`grammar`] — the recursive evaluator and [`grammar::generate`].
//! - [`chain`] — the transform stack ("turtle" state).
//! - [`registry`] — joint position deduplication.
//! - [`variation`] — optional randomized jitter for lengths and angles.
//! - [`skeleton`] — emitted descriptors and the collector interface.
//! - [`error`] — error types.

pub mod chain;
pub mod config;
pub mod error;
pub mod grammar;
pub mod registry;
pub mod skeleton;
pub mod variation;

pub use config::Config;
pub use error::{GrowthError, GrowthResult};
pub use grammar::{generate, generate_into};
pub use skeleton::{BranchSegment, JointPoint, SegmentCollector, Skeleton};
