use std::cell::RefCell;
use std::rc::Rc;
use std::{env, path::Path, process, thread, time::Instant};

use pocket::emulator::Emulator;
use pocket::ppu::{GB_HEIGHT, GB_WIDTH};

mod constants;
mod drawing;
mod input;
mod sdl_setup;

fn main() -> Result<(), String> {
    // --- Argument Parsing ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <rom_path>", args[0]);
        process::exit(1);
    }
    let rom_path = Path::new(&args[1]);
    let rom_filename = rom_path.file_name().unwrap_or_default().to_string_lossy();
    let window_title = format!("pocket - {}", rom_filename);

    // --- Setup SDL Context ---
    let mut sdl_context = sdl_setup::init_sdl(&window_title)?;

    // --- Setup Emulator ---
    // The PPU emits shades into a buffer shared with the drawing pass.
    let frame_buffer = Rc::new(RefCell::new(vec![0u8; GB_WIDTH * GB_HEIGHT]));
    let sink_buffer = Rc::clone(&frame_buffer);
    let pixel_sink = Box::new(move |x: u8, y: u8, shade: u8| {
        sink_buffer.borrow_mut()[y as usize * GB_WIDTH + x as usize] = shade;
    });

    let boot_rom_path = Path::new(constants::BOOT_ROM_PATH);
    let boot_rom = boot_rom_path.exists().then_some(boot_rom_path);
    if boot_rom.is_some() {
        println!("Using boot ROM: {}", constants::BOOT_ROM_PATH);
    }

    let mut emulator = match Emulator::from_files(rom_path, boot_rom, pixel_sink) {
        Ok(emulator) => emulator,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    };

    println!("Loaded ROM: {}", rom_path.display());

    // --- Main Loop ---
    while emulator.running() {
        let frame_start_time = Instant::now();

        if input::handle_input(&mut sdl_context.event_pump, &mut emulator.memory_bus) {
            emulator.stop();
            break;
        }

        emulator.run_frame();

        drawing::draw_gb_screen(&mut sdl_context.canvas, &frame_buffer.borrow())?;
        sdl_context.canvas.present();

        // Sleep off the rest of the frame budget, then spin to the deadline
        let elapsed = frame_start_time.elapsed();
        if elapsed < constants::TARGET_FRAME_DURATION {
            let remaining = constants::TARGET_FRAME_DURATION - elapsed;
            if remaining > std::time::Duration::from_millis(1) {
                thread::sleep(remaining - std::time::Duration::from_millis(1));
            }
            while Instant::now() < frame_start_time + constants::TARGET_FRAME_DURATION {
                thread::yield_now();
            }
        }
    }

    println!("Emulator stopped.");
    Ok(())
}
