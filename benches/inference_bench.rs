use criterion::{black_box, criterion_group, criterion_main, Criterion};

use inference::ProbabilityTables;
use pedigree::{Pedigree, Phenotype};

/// Two founding couples, one observed child each, plus one unobserved
/// grandchild: a five-member, three-generation enumeration space.
fn five_member_pedigree() -> Pedigree {
    let mut pedigree = Pedigree::new();
    pedigree.add_individual("grandma", Some(Phenotype::Absent)).expect("insert");
    pedigree.add_individual("grandpa", None).expect("insert");
    pedigree.add_individual("mother",  Some(Phenotype::Present)).expect("insert");
    pedigree.add_individual("father",  None).expect("insert");
    pedigree.add_individual("child",   None).expect("insert");
    pedigree.set_parents("mother", ("grandma", "grandpa")).expect("wire parents");
    pedigree.set_parents("child",  ("mother", "father")).expect("wire parents");
    pedigree
}

fn bench_exact_inference(c: &mut Criterion) {
    let pedigree = five_member_pedigree();
    let tables = ProbabilityTables::default();

    c.bench_function("infer: five-member pedigree, serial", |b| {
        b.iter(|| inference::infer(black_box(&pedigree), &tables, 1).expect("inference"))
    });

    c.bench_function("infer: five-member pedigree, two workers", |b| {
        b.iter(|| inference::infer(black_box(&pedigree), &tables, 2).expect("inference"))
    });
}

criterion_group!(benches, bench_exact_inference);
criterion_main!(benches);
