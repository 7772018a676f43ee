extern crate parser;
extern crate logger;

use parser::{Cli, Commands::*};
use inference::ProbabilityTables;

#[macro_use]
extern crate log;

use anyhow::Result;

/// Unpack the parsed command line arguments and run the appropriate modules.
pub fn run(cli: Cli) -> Result<()> {
    match cli.commands {
        Infer {common, infer} => {
            // ----------------------------- Load the family dataset.
            info!("Loading family dataset '{}'...", infer.data.display());
            let pedigree = heredity_io::read::read_family(&infer.data)?;

            // ----------------------------- Resolve probability tables.
            let tables = match &infer.probabilities {
                Some(path) => heredity_io::read::read_tables(path)?,
                None       => ProbabilityTables::default(),
            };

            // ----------------------------- Run exact inference.
            let results = inference::infer(&pedigree, &tables, infer.threads)?;

            // ----------------------------- Print posteriors, then persist them.
            let file_stem   = heredity_io::parse::file_stem(&infer.data)?;
            let output_file = heredity_io::parse::format_output_path(&common.output_dir, &file_stem, "result");
            common.can_write_file(&output_file)?;

            heredity_io::write::write_results(None, &results)?;
            heredity_io::write::write_results(Some(&output_file), &results)?;
            info!("Posterior distributions written to '{}'", output_file.display());
        },

        FromYaml {yaml} => {
            info!("Deserializing arguments from '{}'...", yaml.display());
            let cli = Cli::deserialize(&yaml)?;
            self::run(cli)?;
        },
    };
    Ok(())
}
