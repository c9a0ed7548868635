use crate::cpu::Cpu;
use crate::memory_bus::MemoryBus;
use crate::memory_map::CYCLES_PER_FRAME;
use crate::ppu::{PixelSink, Ppu};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// The whole machine: CPU, PPU and the bus (which owns timer, DMA and
/// joypad). Drives them in lockstep, one instruction at a time.
pub struct Emulator {
    pub cpu: Cpu,
    pub ppu: Ppu,
    pub memory_bus: MemoryBus,
}

impl Emulator {
    /// Builds a machine around a flat cartridge image. With a boot ROM the
    /// CPU starts zeroed at 0x0000 under the overlay; without one it starts
    /// post-boot at 0x0100 with the documented power-on I/O values.
    pub fn new(rom: &[u8], boot_rom: Option<&[u8]>, pixel_sink: PixelSink) -> Self {
        let mut memory_bus = MemoryBus::new();
        memory_bus.load_rom(rom);

        let skip_boot_rom = match boot_rom {
            Some(data) => {
                memory_bus.load_boot_rom(data);
                false
            }
            None => true,
        };

        let cpu = Cpu::new(skip_boot_rom);
        if skip_boot_rom {
            Cpu::initialize_post_boot_io(&mut memory_bus);
        }

        Emulator {
            cpu,
            ppu: Ppu::new(pixel_sink),
            memory_bus,
        }
    }

    /// File-loading front door for the CLI.
    pub fn from_files(
        rom_path: &Path,
        boot_rom_path: Option<&Path>,
        pixel_sink: PixelSink,
    ) -> Result<Self, String> {
        let rom = fs::read(rom_path)
            .map_err(|e| format!("Failed to read ROM '{}': {}", rom_path.display(), e))?;
        let boot = match boot_rom_path {
            Some(path) => Some(
                fs::read(path)
                    .map_err(|e| format!("Failed to read boot ROM '{}': {}", path.display(), e))?,
            ),
            None => None,
        };
        Ok(Emulator::new(&rom, boot.as_deref(), pixel_sink))
    }

    pub fn running(&self) -> bool {
        self.cpu.running
    }

    /// Host-side cancellation; the current frame is allowed to be truncated.
    pub fn stop(&mut self) {
        self.cpu.running = false;
    }

    /// Retires one CPU step (interrupt dispatch, instruction or halt idle),
    /// then advances the PPU, timer and DMA engine by the same cycle count
    /// and drains the serial debug tap. Returns the T-cycles consumed.
    pub fn step_instruction(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.memory_bus) as u32;

        self.ppu.step(cycles, &mut self.memory_bus);
        self.memory_bus.step_timer(cycles);
        self.memory_bus.step_dma(cycles);

        // Test ROMs self-report through the serial port one byte at a time
        if let Some(byte) = self.memory_bus.take_serial_byte() {
            print!("{}", byte as char);
            let _ = io::stdout().flush();
        }

        cycles
    }

    /// Runs instructions until one frame's worth of cycles has elapsed.
    /// Wall-clock pacing belongs to the caller.
    pub fn run_frame(&mut self) {
        let mut cycles_this_frame: u32 = 0;
        while cycles_this_frame < CYCLES_PER_FRAME && self.cpu.running {
            cycles_this_frame += self.step_instruction();
        }
    }
}
