use thiserror::Error;

/// Structural defects of an input population. All of these are detected
/// eagerly, before any enumeration work is spent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PedigreeError {
    #[error("Duplicate individual '{0}' within the pedigree")]
    DuplicateIndividual(String),

    #[error("Individual '{0}' cannot be found within the pedigree")]
    UnknownIndividual(String),

    #[error("The parent relationship of individual '{0}' loops back onto itself")]
    ParentCycle(String),
}
