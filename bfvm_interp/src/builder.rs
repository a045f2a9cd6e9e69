use crate::machine::{Machine, DEFAULT_TAPE_SIZE};
use crate::tape::Tape;
use bfvm_types::{LoadError, Program, DEFAULT_MAX_INSTRUCTIONS};
use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    num::NonZeroUsize,
    path::PathBuf,
    sync::Arc,
};
use thiserror::Error;

/// Failures while assembling a [`Machine`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("a program must be supplied via set_program, set_program_reader, or set_program_file")]
    MissingProgram,
    #[error("failed to open program file {path:?}")]
    OpenProgram {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Configures and builds a [`Machine`].
///
/// # Examples
///
/// Program from a string:
///
/// ```rust
/// use bfvm_interp::MachineBuilder;
/// use std::io::Cursor;
///
/// let mut machine = MachineBuilder::new()
///     .set_program_reader(Cursor::new("++[>+<-]"))
///     .build()
///     .expect("program is well formed");
/// let state = machine.run().expect("program completes");
/// assert_eq!(state.tape()[1], 2);
/// ```
///
/// Everything configurable at once:
///
/// ```rust
/// use bfvm_interp::MachineBuilder;
/// use std::io::Cursor;
/// use std::num::NonZeroUsize;
///
/// let machine = MachineBuilder::new()
///     .set_program_reader(Cursor::new("+."))
///     .set_tape_size(NonZeroUsize::new(1024))
///     .set_origin(512)
///     .set_max_instructions(Some(1000))
///     .set_step_budget(Some(1_000_000))
///     .set_input(Cursor::new(vec![7u8]))
///     .set_output(Vec::new())
///     .build()
///     .expect("program is well formed");
/// ```
#[derive(Default)]
pub struct MachineBuilder<'a> {
    tape_size: Option<NonZeroUsize>,
    origin: Option<usize>,
    max_instructions: Option<usize>,
    step_budget: Option<usize>,
    input: Option<Box<dyn Read>>,
    output: Option<Box<dyn Write>>,
    program: Option<Arc<Program>>,
    program_file: Option<PathBuf>,
    program_reader: Option<Box<dyn Read + 'a>>,
}

impl<'a> MachineBuilder<'a> {
    pub fn new() -> Self {
        MachineBuilder::default()
    }

    /// Uses an already-loaded program.
    pub fn set_program(mut self, program: Program) -> Self {
        self.program = Some(Arc::new(program));
        self
    }

    /// Uses an already-loaded program behind an [`Arc`], so one load
    /// can drive any number of concurrent machines.
    pub fn set_shared_program(mut self, program: Arc<Program>) -> Self {
        self.program = Some(program);
        self
    }

    /// Loads the program from a reader at build time.
    pub fn set_program_reader<T>(mut self, reader: T) -> Self
    where
        T: Read + 'a,
    {
        self.program_reader = Some(Box::new(reader));
        self
    }

    /// Loads the program from a file at build time.
    pub fn set_program_file(mut self, filepath: PathBuf) -> Self {
        self.program_file = Some(filepath);
        self
    }

    /// Configures the machine to read input bytes from `input`.
    pub fn set_input<R: Read + 'static>(mut self, input: R) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Configures the machine to write output bytes to `output`.
    pub fn set_output<W: Write + 'static>(mut self, output: W) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Number of cells on the tape. `None` keeps the default.
    pub fn set_tape_size(mut self, tape_size: Option<NonZeroUsize>) -> Self {
        self.tape_size = tape_size;
        self
    }

    /// Initial data-pointer position within the tape.
    pub fn set_origin(mut self, origin: usize) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Cap on loaded instructions; longer programs are truncated.
    /// `None` keeps the default.
    pub fn set_max_instructions(mut self, max_instructions: Option<usize>) -> Self {
        self.max_instructions = max_instructions;
        self
    }

    /// Aborts the run after this many executed instructions. `None`
    /// (the default) runs unbounded.
    pub fn set_step_budget(mut self, step_budget: Option<usize>) -> Self {
        self.step_budget = step_budget;
        self
    }

    /// Builds the machine, loading the program if one was supplied as
    /// a reader or file path.
    pub fn build(self) -> Result<Machine, BuildError> {
        let max_instructions = self.max_instructions.unwrap_or_else(|| {
            log::info!(
                "using default instruction cap of {}",
                DEFAULT_MAX_INSTRUCTIONS
            );
            DEFAULT_MAX_INSTRUCTIONS
        });

        let program = match (self.program, self.program_reader, self.program_file) {
            (Some(program), _, _) => program,
            (None, Some(reader), _) => Arc::new(Program::load(reader, max_instructions)?),
            (None, None, Some(path)) => {
                let file = File::open(&path)
                    .map_err(|source| BuildError::OpenProgram { path, source })?;
                Arc::new(Program::load(BufReader::new(file), max_instructions)?)
            }
            (None, None, None) => return Err(BuildError::MissingProgram),
        };

        let input: Box<dyn Read> = match self.input {
            Some(input) => input,
            None => {
                log::info!("using default stdin input");
                Box::new(io::stdin().lock())
            }
        };

        let output: Box<dyn Write> = match self.output {
            Some(output) => output,
            None => {
                log::info!("using default stdout output");
                Box::new(io::stdout().lock())
            }
        };

        let tape_size = self.tape_size.unwrap_or_else(|| {
            log::info!("using default tape size of {} cells", DEFAULT_TAPE_SIZE);
            NonZeroUsize::new(DEFAULT_TAPE_SIZE).unwrap()
        });

        let origin = self.origin.unwrap_or(0);
        let tape = Tape::new(tape_size, origin);

        Ok(Machine::new(program, tape, input, output, self.step_budget))
    }
}
