//! Report output, optionally teed to a file

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes to stdout/stderr and, when configured, to an output file as well.
pub struct Tee {
    file: Option<(PathBuf, File)>,
}

impl Tee {
    /// Create the output file up front so a bad path fails before any work
    pub fn open(path: Option<&Path>) -> io::Result<Self> {
        let file = match path {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    io::Error::new(e.kind(), format!("cannot create {}: {}", path.display(), e))
                })?;
                Some((path.to_path_buf(), file))
            }
            None => None,
        };
        Ok(Self { file })
    }

    /// Write report text to stdout and the output file
    pub fn report(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        self.write_file(text)
    }

    /// Write an error line to stderr and the output file
    ///
    /// Failures to write are ignored; the process is about to exit anyway.
    pub fn error(&mut self, line: &str) {
        eprintln!("{}", line);
        let _ = self.write_file(&format!("{}\n", line));
    }

    fn write_file(&mut self, text: &str) -> io::Result<()> {
        if let Some((path, file)) = self.file.as_mut() {
            file.write_all(text.as_bytes())
                .and_then(|()| file.flush())
                .map_err(|e| {
                    io::Error::new(e.kind(), format!("cannot write {}: {}", path.display(), e))
                })?;
        }
        Ok(())
    }
}
