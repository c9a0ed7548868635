use crate::constants;
use pocket::ppu::{GB_HEIGHT, GB_WIDTH};
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Blits the 160x144 shade buffer to the canvas at the configured scale.
pub fn draw_gb_screen(canvas: &mut Canvas<Window>, frame_buffer: &[u8]) -> Result<(), String> {
    for y in 0..GB_HEIGHT {
        for x in 0..GB_WIDTH {
            let shade = frame_buffer[y * GB_WIDTH + x] & 0x03;
            canvas.set_draw_color(constants::PALETTE[shade as usize]);
            canvas.fill_rect(Rect::new(
                (x as u32 * constants::SCALE_FACTOR) as i32,
                (y as u32 * constants::SCALE_FACTOR) as i32,
                constants::SCALE_FACTOR,
                constants::SCALE_FACTOR,
            ))?;
        }
    }
    Ok(())
}
