use std::fs;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::{error, info};

use chip8_core::{Chip8, Config, StackPolicy};

use crate::keymap::parse_keys;
use crate::Args;

fn config(args: &Args) -> Config {
    let stack_policy = if args.wrap_stack {
        StackPolicy::Wrapping
    } else {
        StackPolicy::Checked
    };
    Config::new()
        .with_stack_policy(stack_policy)
        .with_debug_console(args.debug_console)
        .with_trace(args.trace)
}

pub fn run(args: &Args) -> Result<()> {
    let config = config(args);
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(config, seed),
        None => Chip8::with_config(config),
    };

    // Load ROM
    let program = fs::read(&args.rom)
        .with_context(|| format!("unable to read {}", args.rom.display()))?;
    chip8
        .load_program(&program)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    info!("loaded {} byte program", chip8.program_size());

    let keys = parse_keys(&args.keys).map_err(|c| anyhow!("no keypad key is mapped to {:?}", c))?;
    for key in keys {
        chip8.key_press(key)?;
    }

    // Set initial timing
    if args.clock_hz == 0 {
        return Err(anyhow!("--clock-hz must be greater than 0"));
    }
    let cycle_time = Duration::from_secs(1) / args.clock_hz;
    let mut last_cycle = Instant::now();
    let mut beeping = false;

    for cycle in 0..args.cycles {
        if let Err(e) = chip8.cycle() {
            error!("cycle {} failed: {}", cycle, e);
            break;
        }

        if chip8.sound_active() != beeping {
            beeping = chip8.sound_active();
            info!("tone {}", if beeping { "on" } else { "off" });
        }

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if !args.fast && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    print!("{:?}", chip8.frame_buffer());
    Ok(())
}
