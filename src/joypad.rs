/// The eight physical buttons of the DMG pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

/// Represents the state of the Game Boy's buttons.
/// True = pressed, False = released (internal representation)
#[derive(Clone, Debug, Default)]
pub struct JoypadState {
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
    pub a: bool,
    pub b: bool,
    pub select: bool,
    pub start: bool,
}

/// Manages button state and its interaction with the P1/JOYP register.
#[derive(Clone, Debug)]
pub struct Joypad {
    state: JoypadState,
    // The matrix select lines written by the game (bits 4 and 5 of P1)
    select_lines: u8,
}

impl Joypad {
    pub fn new() -> Self {
        Joypad {
            state: JoypadState::default(),
            // Both select lines high: no group selected
            select_lines: 0x30,
        }
    }

    /// Composes the P1 (Joypad) register from the select lines and button state.
    /// Selected-group bits read 0 when pressed (active low); bits 6-7 read 1.
    pub fn read_p1(&self) -> u8 {
        let mut value = 0x0F;

        if self.select_lines & 0x10 == 0 {
            // Bit 4 low: direction group
            if self.state.right {
                value &= !0x01;
            }
            if self.state.left {
                value &= !0x02;
            }
            if self.state.up {
                value &= !0x04;
            }
            if self.state.down {
                value &= !0x08;
            }
        }
        if self.select_lines & 0x20 == 0 {
            // Bit 5 low: action group
            if self.state.a {
                value &= !0x01;
            }
            if self.state.b {
                value &= !0x02;
            }
            if self.state.select {
                value &= !0x04;
            }
            if self.state.start {
                value &= !0x08;
            }
        }

        value | self.select_lines | 0xC0
    }

    /// Writes to the P1 register; only the select lines (bits 4, 5) stick.
    pub fn write_p1(&mut self, value: u8) {
        self.select_lines = value & 0x30;
    }

    /// Presses a button. Returns true on a released->pressed edge, which is
    /// when the joypad interrupt must be requested.
    pub fn press(&mut self, button: Button) -> bool {
        let slot = self.slot(button);
        let edge = !*slot;
        *slot = true;
        edge
    }

    /// Releases a button. Releases never raise an interrupt.
    pub fn release(&mut self, button: Button) {
        *self.slot(button) = false;
    }

    fn slot(&mut self, button: Button) -> &mut bool {
        match button {
            Button::Right => &mut self.state.right,
            Button::Left => &mut self.state.left,
            Button::Up => &mut self.state.up,
            Button::Down => &mut self.state.down,
            Button::A => &mut self.state.a,
            Button::B => &mut self.state.b,
            Button::Select => &mut self.state.select,
            Button::Start => &mut self.state.start,
        }
    }

    pub fn get_state(&self) -> &JoypadState {
        &self.state
    }
}

impl Default for Joypad {
    fn default() -> Self {
        Self::new()
    }
}
