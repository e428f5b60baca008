//! Scripted per-frame animations
//!
//! Tasks are registered against node names and run in registration order
//! before each render. See [`AnimationScheduler`].

pub mod scheduler;
pub mod tasks;
pub mod traits;

pub use scheduler::{AnimationScheduler, NodeTarget};
pub use tasks::{Axis, PatrolTask, RollTask, SpinTask};
pub use traits::{AnimationTask, CameraGuard};
