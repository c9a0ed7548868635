use crate::memory_map::{
    CLOCK_FREQ_HZ, DIV_ADDR, IF_ADDR, TAC_ADDR, TIMA_ADDR, TIMER_INTERRUPT_BIT, TMA_ADDR,
};

/// DIV ticks at a fixed 16384 Hz regardless of TAC.
pub const DIV_INC_FREQ_HZ: u32 = 16_384;
pub const DIV_PERIOD: u32 = CLOCK_FREQ_HZ / DIV_INC_FREQ_HZ; // 256 T-cycles

/// The divider/interval timer: two independent cycle accumulators, one for
/// the DIV register, one for TIMA at the TAC-selected rate.
///
/// Owned by the memory bus so a CPU write to DIV can zero both accumulators
/// in the same step it clears the register.
#[derive(Clone, Debug, Default)]
pub struct Timer {
    div_cycle_counter: u32,
    tima_cycle_counter: u32,
}

impl Timer {
    pub fn new() -> Self {
        Timer::default()
    }

    /// Resets both sub-counters. Triggered by any CPU write to DIV.
    pub fn reset_counters(&mut self) {
        self.div_cycle_counter = 0;
        self.tima_cycle_counter = 0;
    }

    /// Advances the timer by the given number of T-cycles, updating DIV and
    /// TIMA in the backing register file and raising the timer interrupt on
    /// TIMA overflow.
    pub fn step(&mut self, cycles: u32, mem: &mut [u8; 0x10000]) {
        self.div_cycle_counter += cycles;
        self.tima_cycle_counter += cycles;

        if self.div_cycle_counter >= DIV_PERIOD {
            let increments = (self.div_cycle_counter / DIV_PERIOD) as u8;
            mem[DIV_ADDR as usize] = mem[DIV_ADDR as usize].wrapping_add(increments);
            self.div_cycle_counter %= DIV_PERIOD;
        }

        let tac = mem[TAC_ADDR as usize];
        if tac & 0x04 != 0 {
            let tima_inc_rate: u32 = match tac & 0x03 {
                0b00 => 4_096,
                0b01 => 262_144,
                0b10 => 65_536,
                _ => 16_384,
            };
            let period = CLOCK_FREQ_HZ / tima_inc_rate;

            // Loop so a large cycle delta still yields every increment
            while self.tima_cycle_counter >= period {
                self.tima_cycle_counter -= period;

                let tima = mem[TIMA_ADDR as usize].wrapping_add(1);
                if tima == 0 {
                    // Overflow: reload from TMA and request the interrupt
                    mem[TIMA_ADDR as usize] = mem[TMA_ADDR as usize];
                    mem[IF_ADDR as usize] |= 1 << TIMER_INTERRUPT_BIT;
                } else {
                    mem[TIMA_ADDR as usize] = tima;
                }
            }
        }
    }
}
