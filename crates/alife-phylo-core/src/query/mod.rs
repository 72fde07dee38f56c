//! Read-only queries over a loaded [`Phylogeny`](crate::graph::phylogeny::Phylogeny).

pub mod extant;
pub mod lineage;
pub mod metrics;
pub mod mrca;
pub mod structure;

pub use extant::{
    get_extant_taxa_at_time, get_extant_taxa_by_destruction_time, get_extant_taxa_ids_at_time,
    get_extant_taxa_ids_by_destruction_time,
};
pub use lineage::{
    abstract_asexual_lineage, extract_asexual_lineage, extract_asexual_lod, is_asexual_lineage,
    lineage_ids,
};
pub use metrics::{
    get_asexual_lineage_length, get_asexual_lineage_mutation_accumulation,
    get_asexual_lineage_num_discrete_state_changes, get_asexual_lineage_num_discrete_unique_states,
};
pub use mrca::{
    get_mrca_id_asexual, get_mrca_tree_depth_asexual, get_pairwise_distances,
    has_common_ancestor_asexual,
};
pub use structure::{
    all_taxa_have_attribute, all_taxa_have_attributes, get_extant_taxa_from_pruned,
    get_extant_taxa_ids_from_pruned, get_independent_phylogenies, get_leaf_taxa,
    get_leaf_taxa_ids, get_num_independent_phylogenies, get_num_roots, get_root_ids, get_roots,
    has_single_root, is_asexual,
};
