use itertools::izip;
use pedigree::{GeneCount, Pedigree, Phenotype};

use crate::ProbabilityTables;

/// Probability that one fully specified assignment of gene counts and trait
/// values materializes over the entire population.
///
/// Each individual contributes two factors:
/// - the probability of their assigned gene count — the unconditional prior
///   for founders, the two-parent transmission probability otherwise, looked
///   up against the same assignment slice;
/// - the likelihood of their assigned trait value given that gene count.
///
/// Both slices are indexed by arena position and must span the population.
/// A structurally zero factor simply zeroes the product; no term divides.
#[must_use]
pub fn joint_probability(
    pedigree  : &Pedigree,
    tables    : &ProbabilityTables,
    genes     : &[GeneCount],
    phenotypes: &[Phenotype],
) -> f64 {
    let mut joint = 1.0;
    for (individual, gene, phenotype) in izip!(pedigree.iter(), genes, phenotypes) {
        let gene_term = match individual.parents() {
            None => tables.prior(*gene),
            Some(parents) => {
                tables.child_gene_probability(*gene, genes[parents.mother], genes[parents.father])
            }
        };
        joint *= gene_term * tables.phenotype_likelihood(*gene, *phenotype);
    }
    joint
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn family() -> Pedigree {
        let mut pedigree = Pedigree::new();
        pedigree.add_individual("Harry", None).expect("insert");
        pedigree.add_individual("James", Some(Phenotype::Present)).expect("insert");
        pedigree.add_individual("Lily",  None).expect("insert");
        pedigree.set_parents("Harry", ("Lily", "James")).expect("wire parents");
        pedigree
    }

    #[test]
    fn founder_joint_is_prior_times_likelihood() {
        let mut pedigree = Pedigree::new();
        pedigree.add_individual("solo", None).expect("insert");
        let tables = ProbabilityTables::default();

        let got = joint_probability(&pedigree, &tables, &[GeneCount::One], &[Phenotype::Present]);
        assert_approx_eq!(f64, got, 0.03 * 0.56, epsilon = 1e-12);
    }

    #[test]
    fn known_three_person_assignment() {
        // Harry carries one copy, James two, Lily none; only James shows the
        // trait. Expected value derived by hand from the canonical tables:
        //   Lily : 0.96 * 0.99
        //   James: 0.01 * 0.65
        //   Harry: (0.01*0.01 + 0.99*0.99) * 0.44
        let pedigree = family();
        let tables = ProbabilityTables::default();

        let genes      = [GeneCount::One, GeneCount::Two, GeneCount::Zero];
        let phenotypes = [Phenotype::Absent, Phenotype::Present, Phenotype::Absent];

        let got = joint_probability(&pedigree, &tables, &genes, &phenotypes);
        assert_approx_eq!(f64, got, 0.0026643247488, epsilon = 1e-12);
    }

    #[test]
    fn child_term_follows_assigned_parent_counts() {
        let pedigree = family();
        let tables = ProbabilityTables::default();

        // Same child count, different parent assignments: the child term must
        // track the parents' assigned counts, not their posteriors.
        let one = joint_probability(
            &pedigree, &tables,
            &[GeneCount::Zero, GeneCount::Zero, GeneCount::Zero],
            &[Phenotype::Absent, Phenotype::Present, Phenotype::Absent],
        );
        let other = joint_probability(
            &pedigree, &tables,
            &[GeneCount::Zero, GeneCount::Two, GeneCount::Two],
            &[Phenotype::Absent, Phenotype::Present, Phenotype::Absent],
        );
        assert!(one > other, "An all-zero household passes no variant far more often");
    }

    #[test]
    fn tolerates_structural_zeros() {
        let mut tables = ProbabilityTables::default();
        tables.gene_prior = [1.0, 0.0, 0.0];

        let mut pedigree = Pedigree::new();
        pedigree.add_individual("solo", None).expect("insert");

        let got = joint_probability(&pedigree, &tables, &[GeneCount::Two], &[Phenotype::Absent]);
        assert_eq!(got, 0.0);
    }
}
