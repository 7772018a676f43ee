use pedigree::{GeneCount, Phenotype};

use serde::{Serialize, Deserialize};

use crate::InferenceError;

/// Tolerance applied when checking that a distribution sums to one.
const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// The three conditional probability tables driving the inference, bundled
/// with the gene transmission mutation rate.
/// # Fields:
/// - `gene_prior`   : Unconditional gene-count distribution, used for every
///                    parentless individual. Indexed by `GeneCount::index()`.
/// - `phenotype`    : Trait likelihood given the gene count.
///                    `phenotype[gene][state]`, indexed by `GeneCount::index()`
///                    then `Phenotype::index()`.
/// - `mutation_rate`: Probability that a transmitted allele flips between
///                    parent and child.
///
/// Tables are immutable once built. Custom values may be provided through a
/// user-defined '.yaml' file (see the `--probabilities` argument); these are
/// rejected by `validate()` when out of range or non-normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProbabilityTables {
    pub gene_prior   : [f64; 3],
    pub phenotype    : [[f64; 2]; 3],
    pub mutation_rate: f64,
}

impl Default for ProbabilityTables {
    fn default() -> Self {
        Self {
            gene_prior: [0.96, 0.03, 0.01],
            phenotype : [
                [0.01, 0.99], // zero copies
                [0.56, 0.44], // one copy
                [0.65, 0.35], // two copies
            ],
            mutation_rate: 0.01,
        }
    }
}

impl ProbabilityTables {
    /// Unconditional probability that a parentless individual carries `gene` copies.
    #[must_use]
    #[inline(always)]
    pub fn prior(&self, gene: GeneCount) -> f64 {
        self.gene_prior[gene.index()]
    }

    /// Probability of the given trait state, conditioned on the carried gene count.
    #[must_use]
    #[inline(always)]
    pub fn phenotype_likelihood(&self, gene: GeneCount, phenotype: Phenotype) -> f64 {
        self.phenotype[gene.index()][phenotype.index()]
    }

    /// Probability that a parent carrying `parent` copies passes the variant
    /// down to a child.
    /// A single-copy parent transmits through one of two paths: a mutation-free
    /// coin flip, or a flipped transmission of the other allele. Both terms are
    /// kept separate so the decomposition matches `child_gene_probability`.
    #[must_use]
    pub fn transmit_probability(&self, parent: GeneCount) -> f64 {
        match parent {
            GeneCount::Zero => self.mutation_rate,
            GeneCount::One  => 0.5 * (1.0 - self.mutation_rate) + 0.5 * self.mutation_rate,
            GeneCount::Two  => 1.0 - self.mutation_rate,
        }
    }

    /// Probability that a child carries exactly `child` copies, given both
    /// parents' gene counts.
    /// The single-copy branch sums two mutually exclusive transmission paths
    /// (mother-only and father-only); all three branches share the same
    /// per-parent transmission values and tile the full probability mass.
    #[must_use]
    pub fn child_gene_probability(&self, child: GeneCount, mother: GeneCount, father: GeneCount) -> f64 {
        let from_mother = self.transmit_probability(mother);
        let from_father = self.transmit_probability(father);
        match child {
            GeneCount::Zero => (1.0 - from_mother) * (1.0 - from_father),
            GeneCount::One  => from_mother * (1.0 - from_father) + (1.0 - from_mother) * from_father,
            GeneCount::Two  => from_mother * from_father,
        }
    }

    /// Ensure every carried value is a probability and every distribution is
    /// normalized. Called once, before any enumeration work.
    ///
    /// # Errors
    /// - `InvalidTables` describing the first offending entry.
    pub fn validate(&self) -> Result<(), InferenceError> {
        use InferenceError::InvalidTables;

        let all_values = self.gene_prior.iter()
            .chain(self.phenotype.iter().flatten())
            .chain(std::iter::once(&self.mutation_rate));
        for value in all_values {
            if !value.is_finite() || !(0.0..=1.0).contains(value) {
                return Err(InvalidTables(format!("'{value}' is not a probability")))
            }
        }

        let prior_sum: f64 = self.gene_prior.iter().sum();
        if (prior_sum - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(InvalidTables(format!("gene prior sums to {prior_sum}, expected 1")))
        }

        for gene in GeneCount::ALL {
            let row_sum: f64 = self.phenotype[gene.index()].iter().sum();
            if (row_sum - 1.0).abs() > NORMALIZATION_TOLERANCE {
                return Err(InvalidTables(
                    format!("trait likelihoods for {gene} gene copies sum to {row_sum}, expected 1")
                ))
            }
        }
        Ok(())
    }
}
