use std::collections::VecDeque;

use ahash::AHashMap;
use log::debug;

use crate::{Individual, Parents, PedigreeError, Phenotype};

/// The studied population, as an immutable family tree.
/// # Fields:
/// - `individuals`: arena of all members, addressed by insertion index.
///                  Assignment slices handed to the inference engine follow
///                  this exact indexing.
/// - `labels`     : name -> arena index lookup table.
///
/// The arena is filled in two stages (insert everyone, then wire parents) so
/// that input rows may reference individuals defined further down the file.
#[derive(Debug, Clone, Default)]
pub struct Pedigree {
    individuals: Vec<Individual>,
    labels     : AHashMap<String, usize>,
}

impl Pedigree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate and include a new individual within this pedigree.
    /// Returns the arena index it was assigned to.
    ///
    /// # Errors
    /// - `DuplicateIndividual` if the label was already inserted. This also
    ///   covers mutually contradictory trait observations for one name, since
    ///   a single arena slot can only ever carry one observation.
    pub fn add_individual(&mut self, label: &str, phenotype: Option<Phenotype>) -> Result<usize, PedigreeError> {
        if self.labels.contains_key(label) {
            return Err(PedigreeError::DuplicateIndividual(label.to_string()))
        }
        let index = self.individuals.len();
        self.individuals.push(Individual::new(label, phenotype));
        self.labels.insert(label.to_string(), index);
        Ok(index)
    }

    /// Define the parents of a given individual.
    /// # Arguments:
    /// - `child`  : name of the target individual.
    /// - `parents`: names of the target individual's mother and father.
    ///
    /// # Errors
    /// - `UnknownIndividual` if the child or any parent is not a member of
    ///   this pedigree (i.e. a dangling parent reference).
    pub fn set_parents(&mut self, child: &str, parents: (&str, &str)) -> Result<(), PedigreeError> {
        let mother = self.index_of(parents.0)?;
        let father = self.index_of(parents.1)?;
        let child  = self.index_of(child)?;
        self.individuals[child].set_parents(Parents::new(mother, father));
        Ok(())
    }

    /// Retrieve the arena index matching a label.
    /// # Errors
    /// - `UnknownIndividual` if the label was never inserted.
    pub fn index_of(&self, label: &str) -> Result<usize, PedigreeError> {
        self.labels.get(label)
            .copied()
            .ok_or_else(|| PedigreeError::UnknownIndividual(label.to_string()))
    }

    /// Retrieve an individual by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Individual> {
        self.labels.get(label).map(|&index| &self.individuals[index])
    }

    /// Borrow the full arena, in insertion order.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Iterate over every parentless individual.
    pub fn founders(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter().filter(|ind| ind.is_founder())
    }

    /// Iterate over every individual with in-pedigree parents.
    pub fn offsprings(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter().filter(|ind| !ind.is_founder())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Ensure the parent relation is acyclic, through a topological traversal
    /// starting from the founders. Dangling parent references cannot exist at
    /// this point, as `set_parents` resolves labels against the arena.
    ///
    /// # Errors
    /// - `ParentCycle` naming one individual of the offending loop, whenever
    ///   some member is their own ancestor.
    pub fn validate(&self) -> Result<(), PedigreeError> {
        let mut children = vec![Vec::new(); self.individuals.len()];
        let mut blocked  = vec![0u8; self.individuals.len()];

        let mut queue: VecDeque<usize> = VecDeque::new();
        for (index, individual) in self.individuals.iter().enumerate() {
            match individual.parents() {
                None => queue.push_back(index),
                Some(parents) => {
                    blocked[index] = 2;
                    children[parents.mother].push(index);
                    children[parents.father].push(index);
                }
            }
        }

        // ---- Peel the tree generation by generation. Anyone left blocked
        //      after exhaustion sits on a parent loop.
        let mut resolved = 0;
        while let Some(index) = queue.pop_front() {
            resolved += 1;
            for &child in &children[index] {
                blocked[child] -= 1;
                if blocked[child] == 0 {
                    queue.push_back(child);
                }
            }
        }

        if resolved != self.individuals.len() {
            let looped = self.individuals.iter()
                .enumerate()
                .find(|(index, _)| blocked[*index] > 0)
                .map(|(_, individual)| individual.label.clone())
                .unwrap_or_default();
            return Err(PedigreeError::ParentCycle(looped))
        }

        debug!("Validated pedigree: {} individual(s), of which {} founder(s)",
            self.len(), self.founders().count()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pedigree() -> Result<Pedigree, PedigreeError> {
        let mut pedigree = Pedigree::new();
        pedigree.add_individual("mother", Some(Phenotype::Absent))?;
        pedigree.add_individual("father", None)?;
        pedigree.add_individual("child",  None)?;
        pedigree.set_parents("child", ("mother", "father"))?;
        Ok(pedigree)
    }

    #[test]
    fn arena_indexes_follow_insertion_order() -> Result<(), PedigreeError> {
        let pedigree = test_pedigree()?;
        assert_eq!(pedigree.index_of("mother")?, 0);
        assert_eq!(pedigree.index_of("father")?, 1);
        assert_eq!(pedigree.index_of("child")?,  2);
        Ok(())
    }

    #[test]
    fn getters() -> Result<(), PedigreeError> {
        let pedigree = test_pedigree()?;
        assert_eq!(pedigree.len(), 3);
        assert!(!pedigree.is_empty());
        assert_eq!(pedigree.get("mother").and_then(|ind| ind.phenotype), Some(Phenotype::Absent));
        assert!(pedigree.get("nobody").is_none());
        Ok(())
    }

    #[test]
    fn founders_and_offsprings() -> Result<(), PedigreeError> {
        let pedigree = test_pedigree()?;
        assert_eq!(pedigree.founders().count(), 2);
        assert_eq!(pedigree.offsprings().count(), 1);
        Ok(())
    }

    #[test]
    fn duplicate_individual() {
        let mut pedigree = test_pedigree().expect("Cannot generate test pedigree");
        let result = pedigree.add_individual("mother", Some(Phenotype::Present));
        assert_eq!(result, Err(PedigreeError::DuplicateIndividual("mother".to_string())));
    }

    #[test]
    fn dangling_parent_reference() {
        let mut pedigree = test_pedigree().expect("Cannot generate test pedigree");
        let result = pedigree.set_parents("father", ("grandma", "grandpa"));
        assert_eq!(result, Err(PedigreeError::UnknownIndividual("grandma".to_string())));
    }

    #[test]
    fn validate_acyclic() -> Result<(), PedigreeError> {
        test_pedigree()?.validate()
    }

    #[test]
    fn validate_self_parent() -> Result<(), PedigreeError> {
        let mut pedigree = test_pedigree()?;
        pedigree.set_parents("father", ("father", "mother"))?;
        assert_eq!(pedigree.validate(), Err(PedigreeError::ParentCycle("father".to_string())));
        Ok(())
    }

    #[test]
    fn validate_ancestry_loop() -> Result<(), PedigreeError> {
        let mut pedigree = test_pedigree()?;
        // child is already mother's and father's offspring. Looping the
        // mother back onto the child makes everyone their own ancestor.
        pedigree.set_parents("mother", ("child", "father"))?;
        assert!(matches!(pedigree.validate(), Err(PedigreeError::ParentCycle(_))));
        Ok(())
    }
}
