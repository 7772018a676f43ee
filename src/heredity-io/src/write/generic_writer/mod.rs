use std::{fs::File, io::{Write, BufWriter}, path::Path};

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;

use located_error::LocatedError;

mod error;
pub use error::WriterError;

/// THE field separator used for this generic writer.
pub const WRITER_SEPARATOR: &str = "\t";

/// A generic, buffered file writer.
/// - `source`: Boxed `BufWriter` (can either handle file-writing, or stdout).
pub struct GenericWriter<'a> {
    source: BufWriter<Box<dyn Write + 'a>>
}

impl<'a> GenericWriter<'a> {
    /// Instantiate a new `GenericWriter`. Writes to stdout when `path` is `None`.
    ///
    /// # Errors
    /// if `path` is either an invalid file, or the user does not have the proper
    /// UNIX permissions to write at this location.
    pub fn new(path: Option<impl AsRef<Path>>) -> Result<GenericWriter<'a>> {
        use WriterError::IOError;
        let source: Box<dyn Write> = match path {
            Some(path) => Box::new(File::create(path).map_err(IOError).loc("While creating file")?),
            None       => Box::new(std::io::stdout()),
        };
        Ok(GenericWriter{ source: BufWriter::new(source) })
    }

    /// Write the contents of a generic iterator within a file/stdout.
    /// One iteration step = one line.
    ///
    /// # Behavior
    /// Items are rendered through their `Display` implementation. Pretty-print
    /// column separators (`' - '`, with any surrounding space run) are
    /// collapsed into `WRITER_SEPARATOR` before hitting the disk.
    ///
    /// # Errors
    /// - If any of the Items within `iter` fails to get written.
    pub fn write_iter<T, I>(&mut self, iter: T) -> Result<()>
    where   T: IntoIterator<Item = I>,
            I: std::fmt::Display,
    {
        lazy_static! {
            static ref PRETTY_PRINT_PADDING: Regex =
                Regex::new(r"[ ]+-[ ]+").expect("Failed to parse regex.");
        }

        for item in iter {
            let formatted = format!("{item}\n");
            let line = PRETTY_PRINT_PADDING.replace_all(&formatted, WRITER_SEPARATOR);
            self.source.write_all(line.as_bytes())
                .map_err(WriterError::IOError)
                .loc("While writing contents into file")?;
        }

        self.source.flush().loc("While flushing buffer contents of Writer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_file() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("posteriors.result");
        let mut writer = GenericWriter::new(Some(&path))?;

        writer.write_iter(vec!["Harry    - 0.5351", "James    - 0.2918"])?;

        let got = std::fs::read_to_string(&path)?;
        assert_eq!(got, "Harry\t0.5351\nJames\t0.2918\n");
        Ok(())
    }

    #[test]
    fn stdout_writer() -> Result<()> {
        let mut writer = GenericWriter::new(None::<&Path>)?;
        writer.write_iter(std::iter::once("no columns to collapse"))?;
        Ok(())
    }
}
