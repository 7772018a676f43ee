pub mod gene_count;
pub use gene_count::GeneCount;

pub mod phenotype;
pub use phenotype::Phenotype;

pub mod individual;
pub use individual::{Individual, Parents};

mod pedigree;
pub use pedigree::Pedigree;

mod error;
pub use error::PedigreeError;
