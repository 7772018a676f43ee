use std::{fs, path::{Path, PathBuf}};

use located_error::prelude::*;
use log::trace;

mod error;
pub use error::ParseError;

/// Attempt to create the parent directories of a path (if needed) and return an error if it failed.
pub fn create_parent_directory(path: &Path) -> Result<()> {
    use ParseError::CreateParentDirectory;
    let parent_dir = path.parent().unwrap_or(path);
    let loc_msg = || format!("While attempting to create output directory '{}'", path.display());
    fs::create_dir_all(parent_dir).map_err(CreateParentDirectory).with_loc(loc_msg)?;
    Ok(())
}

/// Extract a file's stem as a plain string. Output file names are derived
/// from the input dataset's stem.
pub fn file_stem(path: &Path) -> Result<String> {
    use ParseError::InvalidFilename;
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or(InvalidFilename{path: path.to_path_buf()})
        .loc("While deriving an output file prefix")
}

/// Format the path of an output file as '{output_dir}/{file_stem}.{ext}'.
#[must_use]
pub fn format_output_path(output_dir: &Path, file_stem: &str, ext: &str) -> PathBuf {
    let path = output_dir.join(format!("{file_stem}.{ext}"));
    trace!("Output file: {}", path.display());
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_of_dataset() -> Result<()> {
        assert_eq!(file_stem(Path::new("/data/family0.csv"))?, "family0");
        assert_eq!(file_stem(Path::new("relative.csv"))?, "relative");
        Ok(())
    }

    #[test]
    fn output_path_formatting() {
        let got = format_output_path(Path::new("out"), "family0", "result");
        assert_eq!(got, PathBuf::from("out/family0.result"));
    }

    #[test]
    fn parent_directory_creation() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let target = tmpdir.path().join("nested/dir/file.result");
        create_parent_directory(&target)?;
        assert!(target.parent().expect("parent").is_dir());
        Ok(())
    }
}
