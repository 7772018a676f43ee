use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use itertools::izip;
use pedigree::{GeneCount, Pedigree, Phenotype};

use crate::InferenceError;

/// Accumulated (then normalized) posterior mass for one individual.
/// # Fields:
/// - `genes`     : mass per gene count, indexed by `GeneCount::index()`.
/// - `phenotypes`: mass per trait state, indexed by `Phenotype::index()`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersonPosterior {
    pub genes     : [f64; 3],
    pub phenotypes: [f64; 2],
}

impl PersonPosterior {
    #[must_use]
    pub fn gene(&self, count: GeneCount) -> f64 {
        self.genes[count.index()]
    }

    #[must_use]
    pub fn phenotype(&self, phenotype: Phenotype) -> f64 {
        self.phenotypes[phenotype.index()]
    }
}

impl Display for PersonPosterior {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} - {:.6} - {:.6} - {:.6} - {:.6}",
            self.genes[0], self.genes[1], self.genes[2],
            self.phenotypes[0], self.phenotypes[1],
        )
    }
}

/// Posterior accumulator buckets for the whole population, one
/// `PersonPosterior` per arena index.
///
/// Buckets start zeroed, receive joint-probability mass during enumeration,
/// and are rescaled exactly once by `normalize`. Partial accumulators built
/// by parallel workers combine through `merge`; summation commutes, so merge
/// order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Posteriors {
    buckets: Vec<PersonPosterior>,
}

impl Posteriors {
    #[must_use]
    pub fn new(n_individuals: usize) -> Self {
        Self { buckets: vec![PersonPosterior::default(); n_individuals] }
    }

    /// Add one enumerated assignment's joint probability into every
    /// individual's matching gene and trait buckets.
    pub fn record(&mut self, genes: &[GeneCount], phenotypes: &[Phenotype], joint: f64) {
        for (bucket, gene, phenotype) in izip!(&mut self.buckets, genes, phenotypes) {
            bucket.genes[gene.index()]           += joint;
            bucket.phenotypes[phenotype.index()] += joint;
        }
    }

    /// Combine two partial accumulators by bucket-wise summation.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (bucket, other_bucket) in self.buckets.iter_mut().zip(other.buckets) {
            for (mass, other_mass) in bucket.genes.iter_mut().zip(other_bucket.genes) {
                *mass += other_mass;
            }
            for (mass, other_mass) in bucket.phenotypes.iter_mut().zip(other_bucket.phenotypes) {
                *mass += other_mass;
            }
        }
        self
    }

    /// Rescale every individual's gene and trait distributions to sum to one.
    ///
    /// # Errors
    /// - `UnsatisfiableEvidence` if any distribution accumulated zero mass,
    ///   i.e. no enumerated assignment was consistent with the observations.
    pub fn normalize(&mut self, pedigree: &Pedigree) -> Result<(), InferenceError> {
        for (bucket, individual) in self.buckets.iter_mut().zip(pedigree.iter()) {
            let gene_mass     : f64 = bucket.genes.iter().sum();
            let phenotype_mass: f64 = bucket.phenotypes.iter().sum();
            if gene_mass == 0.0 || phenotype_mass == 0.0 {
                return Err(InferenceError::UnsatisfiableEvidence{label: individual.label.clone()})
            }

            for mass in &mut bucket.genes      { *mass /= gene_mass      }
            for mass in &mut bucket.phenotypes { *mass /= phenotype_mass }
        }
        Ok(())
    }

    /// Tear the accumulator down into a label-keyed results map.
    #[must_use]
    pub fn into_results(self, pedigree: &Pedigree) -> BTreeMap<String, PersonPosterior> {
        pedigree.iter()
            .zip(self.buckets)
            .map(|(individual, bucket)| (individual.label.clone(), bucket))
            .collect()
    }

    #[must_use]
    pub fn buckets(&self) -> &[PersonPosterior] {
        &self.buckets
    }
}
