//! Translation of winit window events into [`InputEvent`]s

use winit::event::{ElementState, KeyEvent, WindowEvent};

use crate::client::core::InputEvent;

/// Picks out the window events the application loop cares about.
///
/// Returns [`None`] for everything else (resizes are picked up by querying the window size
/// every frame instead).
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::QuitRequested),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key,
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } => Some(InputEvent::KeyPressed(logical_key.clone())),
        _ => None,
    }
}
