use std::fmt::{self, Display, Formatter};

use crate::Phenotype;

mod parents;
pub use parents::Parents;

/// Space padding lengths used for `std::fmt::Display` of Individual
const LABEL_DISPLAY_LEN  : usize = 10; // Space padding of `self.label`
const PARENTS_DISPLAY_LEN: usize = 12; // Space padding of `self.parents`

/// A member of the pedigree.
/// # Fields:
/// - `label`    : Unique name of the individual (e.g. 'Harry')
/// - `parents`  : Optional pair of arena indices for the individual's parents.
///                  - `None`          if the individual is a founder.
///                  - `Some(parents)` if both parents belong to the pedigree.
/// - `phenotype`: Optional observed trait value.
///                  - `None`            when the trait was never observed.
///                  - `Some(phenotype)` when the observation is known and binds
///                    the enumeration as evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub label    : String,
    parents      : Option<Parents>,
    pub phenotype: Option<Phenotype>,
}

impl Individual {
    /// Instantiate a new individual, initially parentless.
    #[must_use]
    pub fn new(label: &str, phenotype: Option<Phenotype>) -> Self {
        Self { label: label.to_string(), parents: None, phenotype }
    }

    /// Register both parents of this individual at once.
    pub fn set_parents(&mut self, parents: Parents) {
        self.parents = Some(parents);
    }

    /// Return the arena indices of this individual's parents, if any.
    #[must_use]
    pub fn parents(&self) -> Option<Parents> {
        self.parents
    }

    /// Check whether or not this individual is a founder. Returns `true` if `self.parents == None`
    #[inline(always)]
    #[must_use]
    pub fn is_founder(&self) -> bool {
        self.parents.is_none()
    }

    /// Check whether this individual's trait was observed.
    #[must_use]
    pub fn is_observed(&self) -> bool {
        self.phenotype.is_some()
    }
}

impl Display for Individual {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parents = match &self.parents {
            None          => "None".to_string(),
            Some(parents) => format!("{parents}"),
        };
        let phenotype = match &self.phenotype {
            None            => "unobserved".to_string(),
            Some(phenotype) => format!("{phenotype}"),
        };
        write!(f, "label: {: <LABEL_DISPLAY_LEN$} - parents: {: <PARENTS_DISPLAY_LEN$} - trait: {phenotype}",
            self.label, parents
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn founder_is_founder() {
        let ind = Individual::new("mother", None);
        assert!(ind.is_founder());
    }

    #[test]
    fn offspring_is_not_founder() {
        let mut ind = Individual::new("child", None);
        ind.set_parents(Parents::new(0, 1));
        assert!(!ind.is_founder());
        assert_eq!(ind.parents(), Some(Parents::new(0, 1)));
    }

    #[test]
    fn observation_tristate() {
        assert!(!Individual::new("a", None).is_observed());
        assert!(Individual::new("b", Some(Phenotype::Present)).is_observed());
        assert!(Individual::new("c", Some(Phenotype::Absent)).is_observed());
    }

    #[test]
    fn display() {
        let mut ind = Individual::new("child", Some(Phenotype::Absent));
        ind.set_parents(Parents::new(0, 1));
        let display = format!("{ind}");
        assert!(display.contains("child"));
        assert!(display.contains("0 <-> 1"));
        assert!(display.contains("absent"));
    }
}
