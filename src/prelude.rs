//! # Kitchenette Prelude
//!
//! Commonly used types in one import:
//!
//! ```no_run
//! use kitchenette::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     KitchenApp::with_config(KitchenConfig {
//!         spin_continuous: true,
//!         ..KitchenConfig::default()
//!     })
//!     .run()
//! }
//! ```

// Application and configuration
pub use crate::app::KitchenApp;
pub use crate::config::{KeyBindings, KitchenConfig};
pub use crate::default;

// Per-frame orchestration
pub use crate::frame::{FrameDriver, FrameRenderer};

// Interaction
pub use crate::interaction::{DragController, DragSession, InputEvent, Ndc, PickOutcome, Viewport};

// Animation
pub use crate::animation::{AnimationScheduler, AnimationTask, CameraGuard, NodeTarget};

// Scene and cameras
pub use crate::gfx::camera::{Camera, CameraManager, CameraSlot};
pub use crate::gfx::scene::{NodeId, NodeTags, SceneGraph, SceneNode, Transform};

// Common external dependencies
pub use cgmath::{Point3, Vector3};
