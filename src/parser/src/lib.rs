use std::{
    ffi::OsStr,
    fs::File,
    path::{Path, PathBuf},
    fmt::{self, Display, Formatter},
};

use located_error::prelude::*;

use clap::{Parser, Subcommand, Args};
use serde::{Serialize, Deserialize};
use log::debug;

mod error;
pub use error::ParserError;

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(name="heredity-rs", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// heredity-rs: exact gene and trait posterior probabilities across a family tree
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences), global=true)]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emmited and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long, global=true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Serialize command line arguments within a `.yaml` file.
    ///
    /// # Behavior
    /// - File naming follows the convention '{current time}-{module name}.yaml'. current time follows the format
    ///   `YYYY`-`MM`-`DD`T`hhmmss`
    /// - File is written at the root of the user-provided `--output-dir` folder.
    ///
    /// # Errors
    /// Sends an unrecoverable error if `serde_yaml` fails to parse `Self` to a string, or if the
    /// target file cannot be written.
    pub fn serialize(&self) -> Result<()> {

        // Parse arguments to yaml and print to console.
        let serialized = serde_yaml::to_string(&self)
            .loc("Failed to serialize command line arguments")?;

        debug!("\n---- Command line args ----\n{}\n---", serialized);

        // Fetch the appropriate output-directory and parse the name of the output file.
        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S").to_string();

        let output_file = match &self.commands {
            Commands::Infer {common, infer: _} => {
                let dir_string = common.output_dir.to_str().loc("Invalid characters in directory")?;
                format!("{dir_string}/{current_time}-infer.yaml")
            },

            Commands::FromYaml {yaml: _} => return Ok(()),
        };

        // Write arguments
        std::fs::write(&output_file, serialized)
            .with_loc(|| format!("Unable to serialize arguments into {output_file}"))
    }

    /// Deserialize a `.yaml` file into Command line arguments.
    ///
    /// # Errors
    ///
    /// - Returns `FileNotFound` or `PermissionDenied` if the provided `.yaml` is invalid,
    ///   or does not carry read permissions
    /// - Sends an unrecoverable error if `serde_yaml` fails to parse the provided file to `Self`.
    pub fn deserialize(yaml: &Path) -> Result<Self> {
        let reader = File::open(yaml).with_loc(|| format!("While opening {}", yaml.display()))?;
        serde_yaml::from_reader(reader)
            .with_loc(|| format!("Unable to deserialize arguments from {}", yaml.display()))
    }
}

#[derive(Subcommand, Debug, Serialize, Deserialize)]
pub enum Commands {
    /// Run exact posterior inference over a family dataset.
    Infer {
        #[clap(flatten)]
        common: Common,
        #[clap(flatten)]
        infer: Infer,
    },

    /// Load a previously serialized '.yaml' argument file and run from it.
    FromYaml {
        /// Path leading to the '.yaml' argument file.
        #[clap(parse(try_from_os_str=valid_input_file))]
        yaml: PathBuf,
    },
}

#[derive(Args, Debug, Serialize, Deserialize)]
pub struct Common {
    /// Output directory where results will be written.
    ///
    /// The directory is created if it does not exist yet.
    #[clap(short, long, default_value("heredity-output"), parse(try_from_os_str=valid_output_dir))]
    pub output_dir: PathBuf,

    /// Overwrite existing output files.
    #[clap(short='w', long)]
    pub overwrite: bool,
}

impl Common {
    /// Check whether a target output file may be written.
    ///
    /// # Errors
    /// - `CannotOverwrite` if the file already exists and `--overwrite` was not requested.
    pub fn can_write_file(&self, pathbuf: &Path) -> Result<bool> {
        if ! self.overwrite && pathbuf.exists() {   // Check if this file already exists and/or if overwrite is allowed.
            return Err(ParserError::CannotOverwrite(pathbuf.display().to_string()))
                .loc("While parsing command line arguments")
        }
        Ok(true)
    }
}

#[derive(Args, Debug, Serialize, Deserialize)]
pub struct Infer {
    /// Input family dataset.
    ///
    /// Comma-separated file carrying the columns 'name,mother,father,trait'.{n}
    /// - 'mother' and 'father' must either both name another row of the file, or both be blank.{n}
    /// - 'trait' is '1' (trait observed), '0' (absence observed), or blank (unobserved).
    #[clap(short, long, parse(try_from_os_str=valid_input_file))]
    pub data: PathBuf,

    /// Optional probability table definitions.
    ///
    /// A '.yaml' file overriding the built-in gene prior, trait likelihoods and mutation rate.
    /// When unset, the canonical tables are used.
    #[clap(short, long, parse(try_from_os_str=valid_input_file))]
    pub probabilities: Option<PathBuf>,

    /// Number of worker threads for the enumeration.
    ///
    /// When greater than 1, trait assignments are partitioned across a thread pool and
    /// partial posterior accumulators are merged once every worker runs dry.
    #[clap(short='@', long, default_value("1"), parse(try_from_str=valid_thread_count))]
    pub threads: usize,
}

#[derive(Debug, Clone, Copy)]
pub enum FileEntity {File, Directory}

impl Display for FileEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::File      => write!(f, "File"),
            Self::Directory => write!(f, "Directory"),
        }
    }
}

impl FileEntity {
    fn validate(&self, path: &Path) -> Result<(), ParserError> {
        use ParserError::InvalidFileEntity;
        let valid = match self {
            Self::File      => path.is_file(),
            Self::Directory => path.is_dir()
        };

        if valid {
            Ok(())
        } else {
            Err(InvalidFileEntity(*self, path.display().to_string()))
        }
    }
}

fn assert_filesystem_entity_is_valid(s: &OsStr, entity: &FileEntity) -> Result<()> {
    use ParserError::MissingFileEntity;
    let path = Path::new(s);
    if ! path.exists() {
        return Err(MissingFileEntity(*entity, path.display().to_string()))
            .loc("While parsing arguments.")
    }

    entity.validate(path).loc("While parsing arguments.")
}

fn valid_input_file(s: &OsStr) -> Result<PathBuf> {
    assert_filesystem_entity_is_valid(s, &FileEntity::File)
        .loc("While checking for file validity")?;
    Ok(PathBuf::from(s))
}

fn valid_output_dir(s: &OsStr) -> Result<PathBuf> {
    if ! Path::new(s).exists() {
        std::fs::create_dir_all(s)?;
    }
    assert_filesystem_entity_is_valid(s, &FileEntity::Directory)
        .loc("While checking for directory validity")?;
    Ok(PathBuf::from(s))
}

fn valid_thread_count(s: &str) -> Result<usize> {
    let threads = s.parse::<usize>()
        .with_loc(|| format!("While parsing --threads {s}"))?;
    match threads {
        0 => Err(anyhow!(ParserError::InvalidThreadCount)).loc("While parsing arguments."),
        n => Ok(n),
    }
}
