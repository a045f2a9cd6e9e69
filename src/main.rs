mod cli;
mod dump;

use bfvm_interp::MachineBuilder;
use clap::Parser;
use env_logger::Env;
use std::error::Error;
use std::io;
use std::time::Instant;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Entry point: load a program from a file (or standard input when no
/// file is given), run it against stdin/stdout, and optionally print
/// timing and a hexdump of the final tape.
fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = cli::Cli::parse();

    let builder = MachineBuilder::new()
        .set_tape_size(Some(args.tape_size))
        .set_origin(args.origin)
        .set_max_instructions(Some(args.max_instructions))
        .set_step_budget(args.step_budget);

    let builder = match args.program {
        Some(path) => builder.set_program_file(path),
        // Program and run-time input share stdin: the loader consumes
        // everything, so a later Input instruction sees end-of-input.
        None => builder.set_program_reader(io::stdin().lock()),
    };

    let mut machine = builder.build()?;
    log::debug!("loaded {} instructions", machine.program().len());

    let started = Instant::now();
    let final_state = machine.run()?;
    let elapsed = started.elapsed();

    if args.time {
        println!("\nElapsed time: {:.6} seconds", elapsed.as_secs_f64());
    }

    if args.dump_memory {
        print!("{}", dump::hexdump(final_state.tape()));
    }

    Ok(())
}
