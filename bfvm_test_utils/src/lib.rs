use std::io::{self, Read, Seek, SeekFrom, Write};
use tempfile::NamedTempFile;

// Doubles two cells via nested loops; the leading line is pure
// comment and must be stripped by the loader.
const TEST_PROGRAM_SOURCE: &str = "nested copy demo\n++[>++[>+<-]<-]";

/// Instruction count of [`TestFile`]'s program after comment stripping.
pub const TEST_PROGRAM_INSTRUCTIONS: usize = 15;

/// A temporary file on disk holding a small well-formed program.
pub struct TestFile {
    file: NamedTempFile,
}

impl TestFile {
    pub fn new() -> io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", TEST_PROGRAM_SOURCE)?;

        // Rewind so the file can be read back immediately
        file.seek(SeekFrom::Start(0))?;
        Ok(TestFile { file })
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl Read for TestFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.as_file_mut().read(buf)
    }
}

/// Discards everything written to it.
pub struct NullWriter;

impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A byte source that is already at end-of-input.
pub struct NoInput;

impl Read for NoInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}
