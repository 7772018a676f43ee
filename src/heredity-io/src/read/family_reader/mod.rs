use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use located_error::prelude::*;
use log::info;

use pedigree::{Pedigree, Phenotype};

mod error;
pub use error::FamilyReaderError;

/// Expected header of a family dataset.
const EXPECTED_HEADER: [&str; 4] = ["name", "mother", "father", "trait"];

/// One parsed dataset line, prior to arena insertion.
/// Parent columns must either both name another row, or both be blank.
#[derive(Debug)]
struct FamilyRow {
    name     : String,
    parents  : Option<(String, String)>,
    phenotype: Option<Phenotype>,
}

impl FamilyRow {
    /// Parse a raw dataset line. `line_number` is 1-based and only used for
    /// error reporting.
    fn parse(line: &str, line_number: usize) -> Result<Self, FamilyReaderError> {
        use FamilyReaderError::{InvalidFieldCount, InvalidTraitValue, MissingName, SingleParent};

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != EXPECTED_HEADER.len() {
            return Err(InvalidFieldCount{line: line_number, got: fields.len()})
        }

        let (name, mother, father, observation) = (fields[0], fields[1], fields[2], fields[3]);
        if name.is_empty() {
            return Err(MissingName{line: line_number})
        }

        let parents = match (mother.is_empty(), father.is_empty()) {
            (true,  true ) => None,
            (false, false) => Some((mother.to_string(), father.to_string())),
            _              => return Err(SingleParent{line: line_number}),
        };

        let phenotype = match observation {
            "" => None,
            value => Some(Phenotype::from_str(value)
                .map_err(|_| InvalidTraitValue{line: line_number, got: value.to_string()})?),
        };

        Ok(Self { name: name.to_string(), parents, phenotype })
    }
}

/// Load a family dataset into a `Pedigree`.
///
/// The expected format is a comma-separated file carrying the columns
/// 'name,mother,father,trait'. Rows may reference parents defined further
/// down the file: individuals are inserted first, and parent links are wired
/// in a second pass.
///
/// # Errors
/// - any `FamilyReaderError` on malformed content.
/// - `PedigreeError::DuplicateIndividual` when two rows share a name, which
///   also covers contradictory trait observations for a single individual.
/// - `PedigreeError::UnknownIndividual` on dangling parent references.
pub fn read_family(path: &Path) -> Result<Pedigree> {
    use FamilyReaderError::{EmptyFile, InvalidHeader};
    let loc_msg = || format!("While loading family dataset '{}'", path.display());

    let file = File::open(path).with_loc(loc_msg)?;
    let mut lines = BufReader::new(file).lines();

    // ---- Validate the header before doing any real work.
    let header = lines.next()
        .ok_or(EmptyFile)
        .with_loc(loc_msg)?
        .with_loc(loc_msg)?;
    if header.split(',').map(str::trim).ne(EXPECTED_HEADER) {
        return Err(InvalidHeader{got: header}).with_loc(loc_msg)
    }

    let mut rows = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line.with_loc(loc_msg)?;
        if line.trim().is_empty() {
            continue
        }
        rows.push(FamilyRow::parse(&line, index + 2).with_loc(loc_msg)?);
    }

    // ---- First pass: insert every individual into the arena.
    let mut pedigree = Pedigree::new();
    for row in &rows {
        pedigree.add_individual(&row.name, row.phenotype).with_loc(loc_msg)?;
    }

    // ---- Second pass: wire parent relationships.
    for row in &rows {
        if let Some((mother, father)) = &row.parents {
            pedigree.set_parents(&row.name, (mother, father))
                .with_loc(|| format!("While wiring the parents of '{}'", row.name))?;
        }
    }

    info!("Loaded {} individual(s) ({} founder(s)) from '{}'",
        pedigree.len(), pedigree.founders().count(), path.display()
    );
    Ok(pedigree)
}
