//! Structural queries: attribute validation, roots, leaves and independent phylogenies.

use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

use crate::config::{TaxonId, TaxonRecord};
use crate::error::{PhyloError, Result};
use crate::graph::phylogeny::Phylogeny;

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Do all taxa carry `attribute`?
pub fn all_taxa_have_attribute(phylogeny: &Phylogeny, attribute: &str) -> bool {
    phylogeny.taxa().all(|t| t.has_attribute(attribute))
}

/// Do all taxa carry every attribute in `attributes`?
pub fn all_taxa_have_attributes<S: AsRef<str>>(phylogeny: &Phylogeny, attributes: &[S]) -> bool {
    attributes
        .iter()
        .all(|a| all_taxa_have_attribute(phylogeny, a.as_ref()))
}

/// Fail with the first attribute that some taxon lacks.
pub(crate) fn require_attributes<S: AsRef<str>>(
    phylogeny: &Phylogeny,
    attributes: &[S],
) -> Result<()> {
    match attributes
        .iter()
        .find(|a| !all_taxa_have_attribute(phylogeny, a.as_ref()))
    {
        Some(missing) => Err(PhyloError::MissingAttribute {
            attribute: missing.as_ref().to_string(),
        }),
        None => Ok(()),
    }
}

/// Does every taxon have at most one direct ancestor?
pub fn is_asexual(phylogeny: &Phylogeny) -> bool {
    phylogeny.indices().all(|idx| phylogeny.in_degree(idx) <= 1)
}

pub(crate) fn require_asexual(phylogeny: &Phylogeny) -> Result<()> {
    if is_asexual(phylogeny) {
        Ok(())
    } else {
        Err(PhyloError::NotAsexual {
            subject: "phylogeny",
        })
    }
}

// ---------------------------------------------------------------------------
// Rootedness
// ---------------------------------------------------------------------------

/// Is the phylogeny one weakly-connected component? An empty phylogeny is not.
pub fn has_single_root(phylogeny: &Phylogeny) -> bool {
    !phylogeny.is_empty() && get_num_roots(phylogeny) == 1
}

/// Ids of taxa without ancestors, in load order.
pub fn get_root_ids(phylogeny: &Phylogeny) -> Vec<TaxonId> {
    root_indices(phylogeny)
        .into_iter()
        .map(|idx| phylogeny.taxon(idx).id.clone())
        .collect()
}

/// Records of taxa without ancestors, in load order.
pub fn get_roots(phylogeny: &Phylogeny) -> Vec<TaxonRecord> {
    root_indices(phylogeny)
        .into_iter()
        .map(|idx| phylogeny.taxon(idx).to_record())
        .collect()
}

pub(crate) fn root_indices(phylogeny: &Phylogeny) -> Vec<NodeIndex> {
    phylogeny
        .indices()
        .filter(|&idx| phylogeny.in_degree(idx) == 0)
        .collect()
}

/// Number of weakly-connected components.
pub fn get_num_roots(phylogeny: &Phylogeny) -> usize {
    petgraph::algo::connected_components(phylogeny.inner_graph())
}

/// Same count as [`get_num_roots`], named for what the components are.
pub fn get_num_independent_phylogenies(phylogeny: &Phylogeny) -> usize {
    get_num_roots(phylogeny)
}

/// One deep copy per weakly-connected component, largest first.
///
/// Components of equal size keep discovery order: the order in which each
/// component's first taxon was loaded.
pub fn get_independent_phylogenies(phylogeny: &Phylogeny) -> Vec<Phylogeny> {
    let mut components = component_members(phylogeny);
    components.sort_by(|a, b| b.len().cmp(&a.len()));
    components
        .into_iter()
        .map(|members| {
            let members: HashSet<NodeIndex> = members.into_iter().collect();
            phylogeny.induced_subgraph(&members)
        })
        .collect()
}

/// Weakly-connected components as node lists, in discovery order.
pub(crate) fn component_members(phylogeny: &Phylogeny) -> Vec<Vec<NodeIndex>> {
    let graph = phylogeny.inner_graph();
    let mut sets = UnionFind::<usize>::new(graph.node_count());
    for edge in graph.edge_references() {
        sets.union(edge.source().index(), edge.target().index());
    }

    let mut slot_of: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<NodeIndex>> = Vec::new();
    for idx in graph.node_indices() {
        let rep = sets.find(idx.index());
        let slot = *slot_of.entry(rep).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(idx);
    }
    components
}

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

/// Ids of taxa without descendants, in load order.
pub fn get_leaf_taxa_ids(phylogeny: &Phylogeny) -> Vec<TaxonId> {
    leaf_indices(phylogeny)
        .into_iter()
        .map(|idx| phylogeny.taxon(idx).id.clone())
        .collect()
}

/// Records of taxa without descendants, in load order.
pub fn get_leaf_taxa(phylogeny: &Phylogeny) -> Vec<TaxonRecord> {
    leaf_indices(phylogeny)
        .into_iter()
        .map(|idx| phylogeny.taxon(idx).to_record())
        .collect()
}

/// In a pruned phylogeny only surviving taxa remain as leaves.
pub fn get_extant_taxa_ids_from_pruned(phylogeny: &Phylogeny) -> Vec<TaxonId> {
    get_leaf_taxa_ids(phylogeny)
}

pub fn get_extant_taxa_from_pruned(phylogeny: &Phylogeny) -> Vec<TaxonRecord> {
    get_leaf_taxa(phylogeny)
}

pub(crate) fn leaf_indices(phylogeny: &Phylogeny) -> Vec<NodeIndex> {
    phylogeny
        .indices()
        .filter(|&idx| phylogeny.out_degree(idx) == 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::phylogeny_from_csv_str;

    const TOY_TREE: &str = "id,ancestor_list,trait_a\n\
        0,['none'],1\n1,[0],1\n2,[0],2\n3,[1],2\n4,[1],3\n5,[2],3\n";

    const FOREST: &str = "id,ancestor_list\n\
        0,['none']\n1,[0]\n2,[1]\n3,[0]\n6,['seed']\n7,[6]\n8,[6]\n9,['none']\n";

    #[test]
    fn attribute_checks() {
        let p = phylogeny_from_csv_str(TOY_TREE).unwrap();
        assert!(all_taxa_have_attribute(&p, "trait_a"));
        assert!(!all_taxa_have_attribute(&p, "garbage"));
        assert!(all_taxa_have_attributes(&p, &["trait_a"]));
        assert!(!all_taxa_have_attributes(&p, &["trait_a", "garbage"]));
        // Only the root carries the origin marker.
        assert!(!all_taxa_have_attribute(&p, "origin"));
    }

    #[test]
    fn require_attributes_names_missing() {
        let p = phylogeny_from_csv_str(TOY_TREE).unwrap();
        let err = require_attributes(&p, &["trait_a", "garbage"]).unwrap_err();
        assert!(matches!(err, PhyloError::MissingAttribute { attribute } if attribute == "garbage"));
    }

    #[test]
    fn asexual_detection() {
        let asex = phylogeny_from_csv_str(TOY_TREE).unwrap();
        let sex = phylogeny_from_csv_str(
            "id,ancestor_list\n0,['none']\n1,[0]\n2,[0]\n3,\"[1, 2]\"\n",
        )
        .unwrap();
        assert!(is_asexual(&asex));
        assert!(!is_asexual(&sex));
    }

    #[test]
    fn roots_of_tree() {
        let p = phylogeny_from_csv_str(TOY_TREE).unwrap();
        assert!(has_single_root(&p));
        assert_eq!(get_root_ids(&p), vec![TaxonId::Int(0)]);
        let roots = get_roots(&p);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, TaxonId::Int(0));
        // Records are copies; the graph itself is untouched.
        assert!(!p.get_taxon(&TaxonId::Int(0)).unwrap().has_attribute("id"));
    }

    #[test]
    fn roots_of_forest() {
        let p = phylogeny_from_csv_str(FOREST).unwrap();
        assert!(!has_single_root(&p));
        assert_eq!(get_num_roots(&p), 3);
        assert_eq!(get_root_ids(&p).len(), get_num_roots(&p));
        assert_eq!(get_num_independent_phylogenies(&p), 3);
    }

    #[test]
    fn empty_phylogeny_has_no_single_root() {
        assert!(!has_single_root(&Phylogeny::new()));
        assert_eq!(get_num_roots(&Phylogeny::new()), 0);
    }

    #[test]
    fn independent_phylogenies_largest_first() {
        let p = phylogeny_from_csv_str(FOREST).unwrap();
        let parts = get_independent_phylogenies(&p);
        let sizes: Vec<usize> = parts.iter().map(|c| c.node_count()).collect();
        assert_eq!(sizes, vec![4, 3, 1]);
        assert_eq!(get_root_ids(&parts[1]), vec![TaxonId::Int(6)]);
        assert!(parts.iter().all(has_single_root));
    }

    #[test]
    fn equal_components_keep_discovery_order() {
        let p = phylogeny_from_csv_str("id,ancestor_list\n5,['none']\n1,['none']\n3,['none']\n")
            .unwrap();
        let parts = get_independent_phylogenies(&p);
        let firsts: Vec<TaxonId> = parts.iter().map(|c| c.taxon_ids()[0].clone()).collect();
        assert_eq!(firsts, vec![TaxonId::Int(5), TaxonId::Int(1), TaxonId::Int(3)]);
    }

    #[test]
    fn leaves() {
        let p = phylogeny_from_csv_str(TOY_TREE).unwrap();
        assert_eq!(
            get_leaf_taxa_ids(&p),
            vec![TaxonId::Int(3), TaxonId::Int(4), TaxonId::Int(5)]
        );
        assert_eq!(get_extant_taxa_ids_from_pruned(&p), get_leaf_taxa_ids(&p));
        let leaves = get_leaf_taxa(&p);
        assert_eq!(leaves[2].attributes["trait_a"], crate::config::AttrValue::Int(3));
        assert_eq!(get_extant_taxa_from_pruned(&p), leaves);
    }
}
