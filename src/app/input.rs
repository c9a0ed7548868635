use pocket::joypad::Button;
use pocket::memory_bus::MemoryBus;
use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

fn map_key(key: Keycode) -> Option<Button> {
    match key {
        Keycode::Right => Some(Button::Right),
        Keycode::Left => Some(Button::Left),
        Keycode::Up => Some(Button::Up),
        Keycode::Down => Some(Button::Down),
        Keycode::Z => Some(Button::A),
        Keycode::X => Some(Button::B),
        Keycode::Backspace => Some(Button::Select),
        Keycode::Return => Some(Button::Start),
        _ => None,
    }
}

/// Polls SDL events and updates the joypad through the bus.
/// Returns `true` if the quit event was received, `false` otherwise.
pub fn handle_input(event_pump: &mut EventPump, memory_bus: &mut MemoryBus) -> bool {
    for event in event_pump.poll_iter() {
        match event {
            Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => {
                return true;
            }
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => {
                if let Some(button) = map_key(key) {
                    memory_bus.button_down(button);
                }
            }
            Event::KeyUp {
                keycode: Some(key),
                repeat: false,
                ..
            } => {
                if let Some(button) = map_key(key) {
                    memory_bus.button_up(button);
                }
            }
            _ => {}
        }
    }
    false
}
