use crate::joypad::{Button, Joypad};
use crate::memory_map::*;
use crate::timer::Timer;
use std::fmt;

/// DMA stall window after the OAM burst copy, in T-cycles.
pub const DMA_DURATION_CYCLES: u32 = 640;

/// The OAM burst-copy engine. The 160-byte copy itself is atomic in
/// emulated time; only the stall window is tracked.
#[derive(Clone, Debug, Default)]
struct DmaEngine {
    active: bool,
    cycles: u32,
}

/// The 64 KiB address space with its access discipline: region decoding,
/// boot-ROM overlay, VRAM/OAM mode gates, DMA stall, DIV reset and the
/// joypad matrix. The PPU bypasses the gated path via `raw_read`/`raw_write`.
#[derive(Clone)]
pub struct MemoryBus {
    mem: Box<[u8; 0x10000]>,
    boot_rom: Box<[u8; BOOT_ROM_SIZE]>,
    boot_rom_enabled: bool,
    dma: DmaEngine,
    pub timer: Timer,
    pub joypad: Joypad,
}

impl MemoryBus {
    pub fn new() -> Self {
        MemoryBus {
            mem: Box::new([0; 0x10000]),
            boot_rom: Box::new([0; BOOT_ROM_SIZE]),
            boot_rom_enabled: false,
            dma: DmaEngine::default(),
            timer: Timer::new(),
            joypad: Joypad::new(),
        }
    }

    /// Copies a flat cartridge image into 0x0000-0x7FFF. No MBC paging:
    /// bytes beyond the window are ignored.
    pub fn load_rom(&mut self, rom_data: &[u8]) {
        let len = rom_data.len().min((ROM_END as usize) + 1);
        self.mem[..len].copy_from_slice(&rom_data[..len]);
    }

    /// Installs the 256-byte boot ROM and activates the overlay. The overlay
    /// stays mapped until the program writes 0xFF50.
    pub fn load_boot_rom(&mut self, data: &[u8]) {
        let len = data.len().min(BOOT_ROM_SIZE);
        self.boot_rom[..len].copy_from_slice(&data[..len]);
        self.boot_rom_enabled = true;
    }

    pub fn boot_rom_enabled(&self) -> bool {
        self.boot_rom_enabled
    }

    #[inline(always)]
    fn lcd_enabled(&self) -> bool {
        self.mem[LCDC_ADDR as usize] & 0x80 != 0
    }

    /// The PPU mirrors its mode into the low two bits of STAT; the bus reads
    /// it back from there to apply the VRAM/OAM gates.
    #[inline(always)]
    fn ppu_mode(&self) -> u8 {
        self.mem[STAT_ADDR as usize] & 0x03
    }

    // --- Interrupt Request Helper ---

    /// Sets the corresponding interrupt flag bit (0-4) in the IF register.
    pub fn request_interrupt(&mut self, bit: u8) {
        if bit < 5 {
            self.mem[IF_ADDR as usize] |= 1 << bit;
        }
    }

    // --- CPU-facing gated access ---

    pub fn read_byte(&self, addr: u16) -> u8 {
        // During the DMA stall the CPU only sees HRAM
        if self.dma.active && !(HRAM_START..=HRAM_END).contains(&addr) {
            return 0xFF;
        }

        if self.boot_rom_enabled && addr < BOOT_ROM_SIZE as u16 {
            return self.boot_rom[addr as usize];
        }

        if self.lcd_enabled() {
            let mode = self.ppu_mode();
            if (VRAM_START..=VRAM_END).contains(&addr) && mode == 3 {
                return 0xFF;
            }
            if (OAM_START..=OAM_END).contains(&addr) && (mode == 2 || mode == 3) {
                return 0xFF;
            }
        }

        match addr {
            P1_JOYP_ADDR => self.joypad.read_p1(),
            ECHO_RAM_START..=ECHO_RAM_END => self.mem[(addr - 0x2000) as usize],
            NOT_USABLE_START..=NOT_USABLE_END => 0xFF,
            _ => self.mem[addr as usize],
        }
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        if self.lcd_enabled() {
            let mode = self.ppu_mode();
            if (VRAM_START..=VRAM_END).contains(&addr) && mode == 3 {
                return;
            }
            if (OAM_START..=OAM_END).contains(&addr) && (mode == 2 || mode == 3) {
                return;
            }
        }

        match addr {
            // Flat ROM mapping, no MBC: the window is read-only
            ROM_START..=ROM_END => {}
            ECHO_RAM_START..=ECHO_RAM_END => self.mem[(addr - 0x2000) as usize] = value,
            NOT_USABLE_START..=NOT_USABLE_END => {}
            P1_JOYP_ADDR => self.joypad.write_p1(value),
            DIV_ADDR => {
                // Any write clears DIV and both timer sub-counters
                self.mem[DIV_ADDR as usize] = 0;
                self.timer.reset_counters();
            }
            DMA_ADDR => {
                self.mem[DMA_ADDR as usize] = value;
                self.start_dma_transfer(value);
            }
            BOOT_ROM_DISABLE_ADDR => {
                // One-shot latch: the overlay never comes back
                self.boot_rom_enabled = false;
                self.mem[BOOT_ROM_DISABLE_ADDR as usize] = value;
            }
            _ => self.mem[addr as usize] = value,
        }
    }

    /// Reads a 16-bit word (little endian).
    pub fn read_word(&self, addr: u16) -> u16 {
        let low = self.read_byte(addr) as u16;
        let high = self.read_byte(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    /// Writes a 16-bit word (little endian).
    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.write_byte(addr, (value & 0xFF) as u8);
        self.write_byte(addr.wrapping_add(1), (value >> 8) as u8);
    }

    // --- PPU-facing ungated access ---
    // The PPU's own bus path is never blocked by the CPU-facing gates; it
    // also drives LY/STAT/IF directly.

    #[inline(always)]
    pub fn raw_read(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    #[inline(always)]
    pub fn raw_write(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }

    // --- OAM DMA ---

    fn start_dma_transfer(&mut self, source_high_byte: u8) {
        let source = (source_high_byte as usize) << 8;
        // Atomic 160-byte burst into OAM; the stall window starts now
        self.mem.copy_within(source..source + OAM_SIZE, OAM_START as usize);
        self.dma.active = true;
        self.dma.cycles = 0;
    }

    /// Advances the DMA stall window.
    pub fn step_dma(&mut self, cycles: u32) {
        if self.dma.active {
            self.dma.cycles += cycles;
            if self.dma.cycles >= DMA_DURATION_CYCLES {
                self.dma.active = false;
            }
        }
    }

    pub fn dma_active(&self) -> bool {
        self.dma.active
    }

    // --- Timer ---

    /// Advances DIV/TIMA by the elapsed T-cycles.
    pub fn step_timer(&mut self, cycles: u32) {
        self.timer.step(cycles, &mut self.mem);
    }

    // --- Serial debug tap ---

    /// Drains the single-byte serial port: a write of 0x81 to SC with an
    /// ASCII byte in SB publishes that byte and clears SC. This is how the
    /// canonical test ROMs self-report.
    pub fn take_serial_byte(&mut self) -> Option<u8> {
        let sb = self.mem[SB_ADDR as usize];
        if self.mem[SC_ADDR as usize] == 0x81 && sb <= 127 {
            self.mem[SC_ADDR as usize] = 0;
            Some(sb)
        } else {
            None
        }
    }

    // --- Input (delegated to Joypad) ---

    /// Called by the frontend when a key mapped to a button is pressed down.
    pub fn button_down(&mut self, button: Button) {
        if self.joypad.press(button) {
            self.request_interrupt(JOYPAD_INTERRUPT_BIT);
        }
    }

    /// Called by the frontend when a key mapped to a button is released.
    pub fn button_up(&mut self, button: Button) {
        self.joypad.release(button);
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBus")
            .field("boot_rom_enabled", &self.boot_rom_enabled)
            .field("dma_active", &self.dma.active)
            .field("IE", &format_args!("{:#04X}", self.mem[INTERRUPT_ENABLE_REGISTER as usize]))
            .field("IF", &format_args!("{:#04X}", self.mem[IF_ADDR as usize]))
            .field("joypad", &self.joypad)
            .finish_non_exhaustive()
    }
}
