use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Host-independent input events consumed by the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved, in window pixels
    PointerMoved { x: f64, y: f64 },
    /// Discrete pick request (primary button press) at window pixels
    Pick { x: f64, y: f64 },
    /// Key went down; `repeat` is set for auto-repeat while held
    KeyPressed { key: KeyCode, repeat: bool },
}

/// Turns winit window events into [`InputEvent`]s
///
/// winit reports button presses without a position, so the last cursor
/// position is remembered and attached to the pick.
#[derive(Debug, Default)]
pub struct InputTranslator {
    cursor: PhysicalPosition<f64>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> PhysicalPosition<f64> {
        self.cursor
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x, position.y))
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*button, *state),
            WindowEvent::KeyboardInput { event, .. } => {
                key_input(event.physical_key, event.state, event.repeat)
            }
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.cursor = PhysicalPosition::new(x, y);
        InputEvent::PointerMoved { x, y }
    }

    pub fn mouse_input(&self, button: MouseButton, state: ElementState) -> Option<InputEvent> {
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => Some(InputEvent::Pick {
                x: self.cursor.x,
                y: self.cursor.y,
            }),
            _ => None,
        }
    }
}

pub fn key_input(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
    match (key, state) {
        (PhysicalKey::Code(key), ElementState::Pressed) => {
            Some(InputEvent::KeyPressed { key, repeat })
        }
        _ => None,
    }
}
