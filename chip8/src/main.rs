use std::path::PathBuf;

use clap::{ArgAction, Parser};

mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(name = "chip8")]
#[command(about = "Headless Chip-8 interpreter", long_about = None)]
pub struct Args {
    /// Path to the program image
    rom: PathBuf,

    /// Number of cycles to execute
    #[arg(long, default_value_t = 1_000)]
    cycles: u64,

    /// Cycles per second
    #[arg(long, default_value_t = 500)]
    clock_hz: u32,

    /// Ignore the clock and run as fast as possible
    #[arg(long, action = ArgAction::SetTrue)]
    fast: bool,

    /// Keys held down for the whole run, using the QWERTY layout (e.g. "qwe")
    #[arg(long, default_value = "")]
    keys: String,

    /// Seed for the random instruction; seeded from the OS when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Let call/ret wrap around the stack instead of failing
    #[arg(long, action = ArgAction::SetTrue)]
    wrap_stack: bool,

    /// Execute the extended debug console opcodes
    #[arg(long, action = ArgAction::SetTrue)]
    debug_console: bool,

    /// Log every executed instruction
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.trace { "trace" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    run::run(&args)
}
