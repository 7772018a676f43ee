use thiserror::Error;

use crate::enumerate::MAX_POPULATION;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Evidence is unsatisfiable: every enumerated assignment for individual '{label}' carries zero probability mass")]
    UnsatisfiableEvidence{label: String},

    #[error("Population holds {got} individuals, while the assignment bitmasks support at most {}", MAX_POPULATION)]
    PopulationTooLarge{got: usize},

    #[error("Invalid probability tables: {0}")]
    InvalidTables(String),

    #[error("Failed to build the requested inference thread pool")]
    BuildThreadPool(#[source] rayon::ThreadPoolBuildError),
}
