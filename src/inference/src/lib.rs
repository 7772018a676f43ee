use std::collections::BTreeMap;

use located_error::prelude::*;
use log::{debug, info};
use pedigree::{Pedigree, Phenotype};
use rayon::prelude::*;

pub mod tables;
pub use tables::ProbabilityTables;

pub mod enumerate;
pub use enumerate::Evidence;

mod joint;
pub use joint::joint_probability;

mod posteriors;
pub use posteriors::{PersonPosterior, Posteriors};

mod error;
pub use error::InferenceError;

/// Final per-person posterior distributions, keyed by individual label.
pub type InferenceResults = BTreeMap<String, PersonPosterior>;

/// Compute every individual's posterior gene-count and trait distributions,
/// conditioned on the trait observations carried by the pedigree.
///
/// Exact inference: the full joint space of gene partitions and
/// evidence-consistent trait assignments is enumerated, each assignment's
/// joint probability accumulated, and the per-person distributions rescaled
/// once the space is exhausted. Two successive calls over the same pedigree
/// return identical results; no state outlives the call.
///
/// # Arguments
/// - `pedigree`: the studied population. Never mutated.
/// - `tables`  : probability tables driving the joint evaluation.
/// - `threads` : number of enumeration workers. Anything above 1 partitions
///               the trait-assignment outer loop across a dedicated thread
///               pool; partial accumulators merge once every worker runs dry.
///
/// # Errors
/// - any `PedigreeError` surfaced by the upfront structural validation.
/// - `InvalidTables` if the probability tables are malformed.
/// - `PopulationTooLarge` if the population exceeds the bitmask width.
/// - `UnsatisfiableEvidence` if the observations zero out some individual's
///   accumulated mass.
pub fn infer(pedigree: &Pedigree, tables: &ProbabilityTables, threads: usize) -> Result<InferenceResults> {
    // ---- Eager validation: population structure first, tables second.
    pedigree.validate().loc("While validating the input population")?;
    tables.validate().loc("While validating the probability tables")?;
    if pedigree.len() > enumerate::MAX_POPULATION {
        return Err(InferenceError::PopulationTooLarge{got: pedigree.len()})
            .loc("While preparing the assignment enumeration")
    }

    let evidence = Evidence::from_pedigree(pedigree);
    info!("Enumerating joint gene and trait assignments for {} individual(s)...", pedigree.len());

    let mut posteriors = match threads {
        0 | 1 => accumulate(pedigree, tables, evidence),
        n     => accumulate_parallel(pedigree, tables, evidence, n)?,
    };

    posteriors.normalize(pedigree).loc("While normalizing the accumulated posteriors")?;
    Ok(posteriors.into_results(pedigree))
}

/// Single-threaded accumulation over the whole assignment space.
fn accumulate(pedigree: &Pedigree, tables: &ProbabilityTables, evidence: Evidence) -> Posteriors {
    let mut posteriors = Posteriors::new(pedigree.len());
    let mut phenotypes = vec![Phenotype::Absent; pedigree.len()];

    for trait_mask in enumerate::consistent_trait_masks(pedigree.len(), evidence) {
        enumerate::fill_phenotypes(&mut phenotypes, trait_mask);
        enumerate::for_each_gene_partition(pedigree.len(), |genes| {
            let joint = joint_probability(pedigree, tables, genes, &phenotypes);
            posteriors.record(genes, &phenotypes, joint);
        });
    }
    posteriors
}

/// Multi-threaded accumulation. The evidence-consistent trait masks are
/// partitioned across a dedicated pool; each worker folds its share into a
/// thread-local accumulator, and partials merge at the end.
fn accumulate_parallel(
    pedigree: &Pedigree,
    tables  : &ProbabilityTables,
    evidence: Evidence,
    threads : usize,
) -> Result<Posteriors> {
    use InferenceError::BuildThreadPool;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(BuildThreadPool)
        .loc("While building the inference thread pool")?;

    // Collected upfront so rayon can split the outer loop evenly.
    let trait_masks: Vec<u64> = enumerate::consistent_trait_masks(pedigree.len(), evidence).collect();
    debug!("Partitioning {} trait assignment(s) across {} worker(s)", trait_masks.len(), threads);

    let posteriors = pool.install(|| {
        trait_masks.par_iter()
            .fold(
                || Posteriors::new(pedigree.len()),
                |mut partial, &trait_mask| {
                    let mut phenotypes = vec![Phenotype::Absent; pedigree.len()];
                    enumerate::fill_phenotypes(&mut phenotypes, trait_mask);
                    enumerate::for_each_gene_partition(pedigree.len(), |genes| {
                        let joint = joint_probability(pedigree, tables, genes, &phenotypes);
                        partial.record(genes, &phenotypes, joint);
                    });
                    partial
                },
            )
            .reduce(|| Posteriors::new(pedigree.len()), Posteriors::merge)
    });
    Ok(posteriors)
}
