// src/lib.rs
//! Kitchenette
//!
//! An interactive 3D kitchen built on wgpu and winit: click props to pick
//! them up, slide them across the table, switch between an orbit and a
//! close-up camera, and watch a few scripted animations run.

pub mod animation;
pub mod app;
pub mod config;
pub mod content;
pub mod frame;
pub mod gfx;
pub mod interaction;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::KitchenApp;
pub use config::KitchenConfig;

/// Creates a kitchen application with the stock configuration
pub fn default() -> KitchenApp {
    KitchenApp::new()
}
