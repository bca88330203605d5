use std::error::Error;
use std::fs;
use std::process;

use chip8_vm::display::{Display, DummyDisplay, MonoTermDisplay};
use chip8_vm::instruction::disassemble;
use chip8_vm::memory::CHIP8_PROGRAM_ADDR;
use chip8_vm::{Chip8Interpreter, Config, SpriteEdge};
use log::error;

fn fetch_config<'a>() -> clap::ArgMatches<'a> {
    clap::App::new("chip8-vm")
        .version("0.1")
        .about("Runs CHIP-8 programs in the terminal")
        .arg(
            clap::Arg::with_name("rom")
                .index(1)
                .required(true)
                .help("ROM image to load at 0x200"),
        )
        .arg(
            clap::Arg::with_name("cycles")
                .long("cycles")
                .takes_value(true)
                .help("Stop after this many instructions (default: run forever)"),
        )
        .arg(
            clap::Arg::with_name("sprite-edge")
                .long("sprite-edge")
                .takes_value(true)
                .possible_values(&["spill", "clip", "wrap"])
                .default_value("spill")
                .help("What happens to sprite pixels past the screen edge"),
        )
        .arg(
            clap::Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("Fixed seed for the random number instruction"),
        )
        .arg(
            clap::Arg::with_name("disassemble")
                .long("disassemble")
                .help("Print the ROM's instructions and exit"),
        )
        .arg(
            clap::Arg::with_name("headless")
                .long("headless")
                .help("Run without drawing to the terminal"),
        )
        .get_matches()
}

fn parse_arg<T: std::str::FromStr>(
    matches: &clap::ArgMatches,
    name: &str,
) -> Result<Option<T>, Box<dyn Error>>
where
    T::Err: std::fmt::Display,
{
    match matches.value_of(name) {
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e| format!("invalid --{} '{}': {}", name, v, e).into()),
        None => Ok(None),
    }
}

fn run(matches: &clap::ArgMatches) -> Result<(), Box<dyn Error>> {
    // clap checks this is present
    let rom = matches.value_of("rom").unwrap_or_default();

    if matches.is_present("disassemble") {
        for line in disassemble(&fs::read(rom)?, CHIP8_PROGRAM_ADDR) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = Config {
        sprite_edge: parse_arg::<SpriteEdge>(matches, "sprite-edge")?.unwrap_or_default(),
        seed: parse_arg::<u64>(matches, "seed")?,
    };
    let cycles = parse_arg::<u64>(matches, "cycles")?;

    let mut display: Box<dyn Display> = if matches.is_present("headless") {
        Box::new(DummyDisplay::new())
    } else {
        Box::new(MonoTermDisplay::chip8()?)
    };
    let mut interpreter = Chip8Interpreter::with_config(display.as_mut(), config);

    // a ROM that can't be read leaves memory empty; run anyway
    if let Err(e) = interpreter.load_file(rom) {
        error!("{}", e);
    }

    interpreter.main_loop(cycles)?;
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = fetch_config();
    if let Err(e) = run(&matches) {
        error!("{}", e);
        eprintln!("chip8-vm: {}", e);
        process::exit(1);
    }
}
