//! Pointer mapping, picking-driven dragging and input translation

pub mod drag;
pub mod input;
pub mod pointer;

pub use drag::{DragController, DragSession, PickOutcome};
pub use input::{InputEvent, InputTranslator};
pub use pointer::{Ndc, PointerState, Viewport};

/// Interaction state shared by the input handlers and the frame loop
#[derive(Debug)]
pub struct InteractionContext {
    pub pointer: PointerState,
    pub drag: DragController,
    pub viewport: Viewport,
}

impl InteractionContext {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pointer: PointerState::default(),
            drag: DragController::new(),
            viewport,
        }
    }
}
