use std::path::PathBuf;

use clap::Parser;

/// Stage a family dataset within a temporary directory and drive the full
/// pipeline on it, the same way `main()` would.
pub struct InferRunner {
    tempdir: tempfile::TempDir,
    data   : PathBuf,
}

impl InferRunner {
    pub fn stage(dataset: &str) -> Self {
        let tempdir = tempfile::tempdir().expect("Failed to create a temporary directory");
        let data = tempdir.path().join("family.csv");
        std::fs::write(&data, dataset).expect("Failed to stage the family dataset");
        Self { tempdir, data }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.tempdir.path().join("heredity-test-output")
    }

    pub fn output_result(&self) -> PathBuf {
        self.output_dir().join("family.result")
    }

    pub fn run(&self, extra_args: &str) -> anyhow::Result<()> {
        let args = format!("heredity-rs infer
            --data {data}
            --output-dir {output_dir}
            {extra_args}
        ", data = self.data.display(), output_dir = self.output_dir().display());

        let cli = parser::Cli::parse_from(args.split_whitespace());
        heredity_rs::run(cli)
    }

    /// Read the written results back, as (name, five posterior columns) rows.
    pub fn result_rows(&self) -> Vec<(String, Vec<f64>)> {
        let content = std::fs::read_to_string(self.output_result())
            .expect("Failed to open the written results");

        content.lines()
            .skip(1) // header
            .map(|line| {
                let mut fields = line.split('\t');
                let name = fields.next().expect("Missing name column").trim().to_string();
                let values = fields
                    .map(|field| field.parse::<f64>().expect("Non-numeric posterior column"))
                    .collect();
                (name, values)
            })
            .collect()
    }
}
