//! Scene content: the stock kitchen and its deferred models

pub mod kitchen;
pub mod loader;

use std::path::PathBuf;

use thiserror::Error;

use crate::gfx::scene::NodeTree;

pub use kitchen::{build_kitchen, deferred_models, kitchen_cameras, kitchen_schedule};
pub use loader::{load, load_or_placeholder, spawn_loader, DeferredModel, ModelSource};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to load model {}", path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("model {} contains no triangles", .0.display())]
    Empty(PathBuf),

    #[error("failed to start content loader thread")]
    Spawn(#[source] std::io::Error),
}

/// Events delivered from background work into the event loop
#[derive(Debug)]
pub enum ContentEvent {
    Loaded(NodeTree),
}
