//! Lineage metrics over the toy asexual lineage.

mod common;

use common::*;
use pretty_assertions::assert_eq;

use alife_phylo_core::query::*;
use alife_phylo_core::PhyloError;

const GARBAGE: &str = "garbage_attribute_that_nothing_should_have";

#[test]
fn lineage_length() {
    let lineage = load_fixture(TOY_LINEAGE);
    assert_eq!(get_asexual_lineage_length(&lineage).unwrap(), 8);
}

#[test]
fn discrete_state_changes() {
    let lineage = load_fixture(TOY_LINEAGE);
    let changes =
        |attrs: &[&str]| get_asexual_lineage_num_discrete_state_changes(&lineage, attrs).unwrap();
    assert_eq!(changes(&["genotype"]), 4);
    assert_eq!(changes(&["genotype", "trait_a"]), 4);
    assert_eq!(changes(&["trait_a"]), 3);
    assert_eq!(changes(&["trait_b"]), 2);

    assert!(matches!(
        get_asexual_lineage_num_discrete_state_changes(&lineage, &[GARBAGE]),
        Err(PhyloError::MissingAttribute { .. })
    ));
}

#[test]
fn discrete_unique_states() {
    let lineage = load_fixture(TOY_LINEAGE);
    assert_eq!(
        get_asexual_lineage_num_discrete_unique_states(&lineage, &["genotype"]).unwrap(),
        4
    );
    assert_eq!(
        get_asexual_lineage_num_discrete_unique_states(&lineage, &["trait_b"]).unwrap(),
        2
    );
    assert!(matches!(
        get_asexual_lineage_num_discrete_unique_states(&lineage, &[GARBAGE]),
        Err(PhyloError::MissingAttribute { .. })
    ));
}

#[test]
fn mutation_accumulation() {
    let lineage = load_fixture(TOY_LINEAGE);
    let totals = get_asexual_lineage_mutation_accumulation(
        &lineage,
        &["sub_mut_cnt", "reverse_mut_cnt"],
        false,
    )
    .unwrap();
    assert_eq!(totals["sub_mut_cnt"], 2);
    assert_eq!(totals["reverse_mut_cnt"], 1);

    assert!(matches!(
        get_asexual_lineage_mutation_accumulation(&lineage, &[GARBAGE], false),
        Err(PhyloError::MissingAttribute { .. })
    ));
}

#[test]
fn metrics_on_extracted_lineage() {
    let p = load_fixture(TOY_PHYLOGENY_CSV);
    let lineage =
        extract_asexual_lineage(&p, &alife_phylo_core::config::TaxonId::Int(4)).unwrap();
    assert_eq!(get_asexual_lineage_length(&lineage).unwrap(), 3);
    // trait_c along 0 -> 1 -> 4: a, a, c
    assert_eq!(
        get_asexual_lineage_num_discrete_state_changes(&lineage, &["trait_c"]).unwrap(),
        2
    );
}

#[test]
fn metrics_reject_whole_phylogenies_with_many_roots() {
    let forest = load_fixture(TOY_FOREST);
    assert!(matches!(
        get_asexual_lineage_length(&forest),
        Err(PhyloError::NotAsexual { .. })
    ));
}
