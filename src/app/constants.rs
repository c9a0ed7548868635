use pocket::memory_map::FRAME_RATE_HZ;
use pocket::ppu::{GB_HEIGHT, GB_WIDTH};
use sdl2::pixels::Color;
use std::time::Duration;

// --- Timing ---
pub const TARGET_FRAME_DURATION: Duration =
    Duration::from_nanos((1_000_000_000.0 / FRAME_RATE_HZ) as u64);

// --- Screen & Scaling ---
pub const SCALE_FACTOR: u32 = 3;
pub const WINDOW_WIDTH: u32 = GB_WIDTH as u32 * SCALE_FACTOR;
pub const WINDOW_HEIGHT: u32 = GB_HEIGHT as u32 * SCALE_FACTOR;

// --- Palette ---
// Faithful DMG grayscale for the four shades
pub const PALETTE: [Color; 4] = [
    Color::RGB(0xFF, 0xFF, 0xFF),
    Color::RGB(0xC0, 0xC0, 0xC0),
    Color::RGB(0x2C, 0x2C, 0x2C),
    Color::RGB(0x00, 0x00, 0x00),
];

// --- Files ---
// Optional boot ROM picked up from the working directory; without it the
// emulator starts from the post-boot state.
pub const BOOT_ROM_PATH: &str = "dmg_boot.bin";
