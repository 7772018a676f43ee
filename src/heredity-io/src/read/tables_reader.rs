use std::{fs::File, path::Path};

use located_error::prelude::*;
use log::debug;

use inference::ProbabilityTables;

/// Load user-defined probability tables from a '.yaml' definition file.
/// Tables are validated before being handed to the inference engine.
///
/// # Errors
/// - if the file cannot be opened or deserialized.
/// - `InvalidTables` if any carried value is out of range or non-normalized.
pub fn read_tables(path: &Path) -> Result<ProbabilityTables> {
    let loc_msg = || format!("While loading probability tables from '{}'", path.display());

    let file = File::open(path).with_loc(loc_msg)?;
    let tables: ProbabilityTables = serde_yaml::from_reader(file).with_loc(loc_msg)?;
    tables.validate().with_loc(loc_msg)?;

    debug!("Loaded probability tables: {tables:?}");
    Ok(tables)
}
