use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// The two logical page inputs plus quit. Mirrors the on-screen navigation:
/// [1] MAIN, [2] ABOUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualAction {
    SelectMain,
    SelectAbout,
    Back,
}

/// Maps a raw key event to a virtual action. Only fresh presses count; OS
/// auto-repeat would otherwise replay the glitch flourish every repeat.
pub fn map_key_event(ev: &KeyEvent) -> Option<VirtualAction> {
    if ev.state != ElementState::Pressed || ev.repeat {
        return None;
    }
    let PhysicalKey::Code(code) = ev.physical_key else {
        return None;
    };
    match code {
        KeyCode::Digit1 | KeyCode::Numpad1 => Some(VirtualAction::SelectMain),
        KeyCode::Digit2 | KeyCode::Numpad2 => Some(VirtualAction::SelectAbout),
        KeyCode::Escape | KeyCode::KeyQ => Some(VirtualAction::Back),
        _ => None,
    }
}
