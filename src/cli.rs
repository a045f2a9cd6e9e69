use std::{num::NonZeroUsize, path::PathBuf};

use bfvm_interp::DEFAULT_TAPE_SIZE;
use bfvm_types::DEFAULT_MAX_INSTRUCTIONS;
use clap::Parser;

/// Run a program written in the eight-instruction tape language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Program file to execute; reads the program from standard input
    /// when omitted
    #[arg(value_name = "PROGRAM")]
    pub program: Option<PathBuf>,

    /// Number of cells on the tape
    ///
    /// The historical interpreters shipped 256- and 1024-cell tapes.
    #[arg(short = 'c', long, default_value_t = NonZeroUsize::new(DEFAULT_TAPE_SIZE).unwrap())]
    pub tape_size: NonZeroUsize,

    /// Initial data-pointer position within the tape
    #[arg(short = 'o', long, default_value_t = 0)]
    pub origin: usize,

    /// Cap on loaded instructions; longer programs run truncated
    #[arg(long, default_value_t = DEFAULT_MAX_INSTRUCTIONS)]
    pub max_instructions: usize,

    /// Abort after this many executed instructions
    #[arg(short = 'b', long)]
    pub step_budget: Option<usize>,

    /// Print a hexdump of the tape left behind by the program
    #[arg(short = 'm', long)]
    pub dump_memory: bool,

    /// Print elapsed execution time
    #[arg(short = 't', long)]
    pub time: bool,
}
