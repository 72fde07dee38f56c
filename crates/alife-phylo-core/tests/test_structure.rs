//! Structural queries over the fixture phylogenies.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

use alife_phylo_core::config::{ExtantPolicy, QueryTime, TaxonId};
use alife_phylo_core::query::*;
use alife_phylo_core::PhyloError;

// ===========================================================================
// Verification
// ===========================================================================

#[test]
fn all_taxa_have_traits() {
    let p = load_fixture(TOY_PHYLOGENY_CSV);
    assert!(all_taxa_have_attribute(&p, "trait_a"));
    assert!(all_taxa_have_attribute(&p, "trait_b"));
    assert!(all_taxa_have_attribute(&p, "trait_c"));
    assert!(!all_taxa_have_attribute(
        &p,
        "nothing_should_have_this_garbage_test_trait"
    ));
    assert!(all_taxa_have_attributes(&p, &["trait_a", "trait_b", "trait_c"]));
}

#[test]
fn asexual_vs_sexual() {
    assert!(is_asexual(&load_fixture(TOY_PHYLOGENY_CSV)));
    assert!(is_asexual(&load_fixture(TOY_FOREST)));
    assert!(!is_asexual(&load_fixture(TOY_SEXUAL)));
}

// ===========================================================================
// Roots and components
// ===========================================================================

#[test]
fn single_rooted_phylogenies() {
    let p = load_fixture(TOY_PHYLOGENY_CSV);
    assert!(has_single_root(&p));
    assert_eq!(get_root_ids(&p), ids(&[0]));
    // Two founders joined by a hybrid still form one component.
    assert!(has_single_root(&load_fixture(TOY_SEXUAL)));
    assert_eq!(get_root_ids(&load_fixture(TOY_SEXUAL)), ids(&[0, 1]));
}

#[test]
fn forest_roots() {
    let p = load_fixture(TOY_FOREST);
    assert!(!has_single_root(&p));
    assert_eq!(get_num_roots(&p), 2);
    assert_eq!(get_root_ids(&p).len(), get_num_roots(&p));
    let roots = get_roots(&p);
    assert_eq!(roots[1].id, TaxonId::Int(6));
    assert!(roots[1].attributes.contains_key("origin"));
}

#[test]
fn independent_phylogenies_partition_the_taxa() {
    let p = load_fixture(TOY_FOREST);
    let parts = get_independent_phylogenies(&p);
    assert_eq!(parts.len(), get_num_independent_phylogenies(&p));
    assert_eq!(
        parts.iter().map(|c| c.node_count()).collect::<Vec<_>>(),
        vec![4, 3]
    );

    let mut seen: HashSet<TaxonId> = HashSet::new();
    for part in &parts {
        assert!(has_single_root(part));
        for id in part.taxon_ids() {
            assert!(seen.insert(id), "taxon appears in two components");
        }
    }
    assert_eq!(seen.len(), p.node_count());
    assert_eq!(parts.iter().map(|c| c.edge_count()).sum::<usize>(), p.edge_count());
}

// ===========================================================================
// Leaves and extant taxa
// ===========================================================================

#[test]
fn leaves_are_pruned_extant_taxa() {
    let p = load_fixture(TOY_PHYLOGENY_CSV);
    assert_eq!(sorted(get_leaf_taxa_ids(&p)), ids(&[3, 4, 5]));
    assert_eq!(get_extant_taxa_ids_from_pruned(&p), get_leaf_taxa_ids(&p));
    assert_eq!(get_extant_taxa_from_pruned(&p).len(), 3);
}

#[test]
fn extant_by_destruction_marker() {
    let p = load_fixture(TOY_PHYLOGENY_CSV);
    let policy = ExtantPolicy::default();
    assert_eq!(
        sorted(get_extant_taxa_ids_by_destruction_time(&p, &policy).unwrap()),
        ids(&[3, 4, 5])
    );
    let records = get_extant_taxa_by_destruction_time(&p, &policy).unwrap();
    assert!(records.iter().all(|r| r.attributes.contains_key("trait_a")));
}

#[test]
fn extant_at_time() {
    let p = load_fixture(TOY_PHYLOGENY_CSV);
    let policy = ExtantPolicy::default();
    let at = |t: f64| sorted(get_extant_taxa_ids_at_time(&p, QueryTime::At(t), &policy).unwrap());
    assert_eq!(at(1.0), ids(&[0]));
    assert_eq!(at(12.0), ids(&[2, 3]));
    assert_eq!(at(14.0), ids(&[2, 3, 4]));
    assert_eq!(at(100.0), ids(&[3, 4, 5]));
    assert_eq!(
        sorted(get_extant_taxa_ids_at_time(&p, QueryTime::Present, &policy).unwrap()),
        ids(&[3, 4, 5])
    );
    assert_eq!(get_extant_taxa_at_time(&p, QueryTime::At(12.0), &policy).unwrap().len(), 2);
}

#[test]
fn extant_needs_destruction_attribute() {
    let p = load_fixture(TOY_PHYLOGENY_CSV);
    let policy = ExtantPolicy {
        destruction_attribute: "garbage".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        get_extant_taxa_ids_by_destruction_time(&p, &policy),
        Err(PhyloError::MissingAttribute { .. })
    ));
}
