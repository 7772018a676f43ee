use std::path::Path;

use anyhow::Result;
use located_error::LocatedError;

use inference::InferenceResults;

use super::GenericWriter;

/// Space padding length of the 'name' column.
const LABEL_DISPLAY_LEN: usize = 12;

fn header() -> String {
    format!("{: <LABEL_DISPLAY_LEN$} - gene_0 - gene_1 - gene_2 - trait_present - trait_absent", "name")
}

/// Write every individual's posterior distributions, one line per person.
/// Writes to stdout when `path` is `None`.
///
/// Columns: name, gene-count posteriors for zero, one and two copies, then
/// trait posteriors for the present and absent states.
///
/// # Errors
/// - if any line fails to get written at the requested location.
pub fn write_results(path: Option<&Path>, results: &InferenceResults) -> Result<()> {
    let lines = std::iter::once(header())
        .chain(results.iter().map(|(label, posterior)| {
            format!("{label: <LABEL_DISPLAY_LEN$} - {posterior}")
        }));

    GenericWriter::new(path)?
        .write_iter(lines)
        .loc("While writing posterior distributions")
}
