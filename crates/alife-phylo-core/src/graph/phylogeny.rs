//! In-memory phylogeny backed by petgraph::DiGraph.
//!
//! Edges run from ancestor to descendant. Node indices follow load order, which
//! every query uses as its iteration order.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::{AttrValue, TaxonId, TaxonRecord};
use crate::error::{PhyloError, Result};

/// Attribute key holding the non-numeric ancestor marker of an origination point.
pub const ORIGIN_ATTRIBUTE: &str = "origin";

/// Node data stored in the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxon {
    pub id: TaxonId,
    pub attributes: BTreeMap<String, AttrValue>,
}

impl Taxon {
    pub fn get(&self, attribute: &str) -> Option<&AttrValue> {
        self.attributes.get(attribute)
    }

    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    /// The provenance marker recorded in place of an ancestor edge, if any.
    pub fn origin(&self) -> Option<&str> {
        self.get(ORIGIN_ATTRIBUTE).and_then(AttrValue::as_str)
    }

    pub fn to_record(&self) -> TaxonRecord {
        TaxonRecord {
            id: self.id.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

/// Directed ancestry graph over taxa.
#[derive(Debug, Clone)]
pub struct Phylogeny {
    graph: DiGraph<Taxon, ()>,
    /// O(1) taxon ID → NodeIndex lookup.
    id_index: HashMap<TaxonId, NodeIndex>,
}

impl Phylogeny {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_index: HashMap::new(),
        }
    }

    // --- Construction ---

    /// Add a taxon. Ids must be unique.
    pub fn add_taxon(
        &mut self,
        id: TaxonId,
        attributes: BTreeMap<String, AttrValue>,
    ) -> Result<NodeIndex> {
        if self.id_index.contains_key(&id) {
            return Err(PhyloError::DuplicateTaxon(id));
        }
        let idx = self.graph.add_node(Taxon {
            id: id.clone(),
            attributes,
        });
        self.id_index.insert(id, idx);
        Ok(idx)
    }

    /// Record that `child`'s immediate ancestor is `ancestor`.
    pub fn add_descent(&mut self, ancestor: &TaxonId, child: &TaxonId) -> Result<()> {
        let from = self.require_index(ancestor)?;
        let to = self.require_index(child)?;
        self.graph.update_edge(from, to, ());
        Ok(())
    }

    pub(crate) fn set_attribute(&mut self, idx: NodeIndex, key: &str, value: AttrValue) {
        if let Some(taxon) = self.graph.node_weight_mut(idx) {
            taxon.attributes.insert(key.to_string(), value);
        }
    }

    // --- Lookup ---

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn has_taxon(&self, id: &TaxonId) -> bool {
        self.id_index.contains_key(id)
    }

    pub fn get_taxon(&self, id: &TaxonId) -> Option<&Taxon> {
        self.id_index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub fn node_index(&self, id: &TaxonId) -> Option<NodeIndex> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn require_index(&self, id: &TaxonId) -> Result<NodeIndex> {
        self.node_index(id)
            .ok_or_else(|| PhyloError::UnknownTaxon(id.clone()))
    }

    /// All taxa in load order.
    pub fn taxa(&self) -> impl Iterator<Item = &Taxon> {
        self.graph.node_weights()
    }

    pub fn taxon_ids(&self) -> Vec<TaxonId> {
        self.taxa().map(|t| t.id.clone()).collect()
    }

    /// All (ancestor, descendant) pairs.
    pub fn edges(&self) -> Vec<(TaxonId, TaxonId)> {
        self.graph
            .edge_references()
            .map(|e| (self.taxon(e.source()).id.clone(), self.taxon(e.target()).id.clone()))
            .collect()
    }

    /// Direct ancestors of a taxon.
    pub fn parent_ids(&self, id: &TaxonId) -> Result<Vec<TaxonId>> {
        let idx = self.require_index(id)?;
        Ok(self
            .parents(idx)
            .into_iter()
            .map(|p| self.taxon(p).id.clone())
            .collect())
    }

    /// Direct descendants of a taxon.
    pub fn child_ids(&self, id: &TaxonId) -> Result<Vec<TaxonId>> {
        let idx = self.require_index(id)?;
        Ok(self
            .children(idx)
            .into_iter()
            .map(|c| self.taxon(c).id.clone())
            .collect())
    }

    // --- Index-level access for the query engines ---

    pub(crate) fn taxon(&self, idx: NodeIndex) -> &Taxon {
        &self.graph[idx]
    }

    pub(crate) fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Parents in load order (petgraph yields neighbours newest first).
    pub(crate) fn parents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut parents: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .collect();
        parents.sort();
        parents
    }

    /// Children in load order.
    pub(crate) fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    pub(crate) fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .count()
    }

    pub(crate) fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .count()
    }

    /// Deep copy of the sub-graph induced by `members`, keeping load order.
    pub(crate) fn induced_subgraph(&self, members: &HashSet<NodeIndex>) -> Phylogeny {
        let mut sub = Phylogeny::new();
        let mut remap: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        for idx in self.graph.node_indices() {
            if !members.contains(&idx) {
                continue;
            }
            let taxon = self.taxon(idx).clone();
            let id = taxon.id.clone();
            let new_idx = sub.graph.add_node(taxon);
            sub.id_index.insert(id, new_idx);
            remap.insert(idx, new_idx);
        }
        for edge in self.graph.edge_references() {
            if let (Some(&from), Some(&to)) = (remap.get(&edge.source()), remap.get(&edge.target()))
            {
                sub.graph.add_edge(from, to, ());
            }
        }
        sub
    }

    /// Deep copy of the sub-graph induced by the given taxa.
    pub fn subgraph(&self, ids: &[TaxonId]) -> Result<Phylogeny> {
        let members = ids
            .iter()
            .map(|id| self.require_index(id))
            .collect::<Result<HashSet<_>>>()?;
        Ok(self.induced_subgraph(&members))
    }

    /// Access the underlying petgraph for algorithms that need it.
    pub fn inner_graph(&self) -> &DiGraph<Taxon, ()> {
        &self.graph
    }
}

impl Default for Phylogeny {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: i64) -> Phylogeny {
        let mut p = Phylogeny::new();
        for i in 0..n {
            p.add_taxon(TaxonId::Int(i), BTreeMap::new()).unwrap();
        }
        for i in 1..n {
            p.add_descent(&TaxonId::Int(i - 1), &TaxonId::Int(i)).unwrap();
        }
        p
    }

    #[test]
    fn add_taxon_and_query() {
        let mut p = Phylogeny::new();
        let mut attrs = BTreeMap::new();
        attrs.insert("genotype".to_string(), AttrValue::from("AAAA"));
        p.add_taxon(TaxonId::Int(0), attrs).unwrap();
        assert_eq!(p.node_count(), 1);
        assert!(p.has_taxon(&TaxonId::Int(0)));
        let taxon = p.get_taxon(&TaxonId::Int(0)).unwrap();
        assert_eq!(taxon.get("genotype"), Some(&AttrValue::from("AAAA")));
        assert_eq!(taxon.origin(), None);
    }

    #[test]
    fn duplicate_taxon_rejected() {
        let mut p = chain(1);
        let err = p.add_taxon(TaxonId::Int(0), BTreeMap::new()).unwrap_err();
        assert!(matches!(err, PhyloError::DuplicateTaxon(TaxonId::Int(0))));
    }

    #[test]
    fn repeated_descent_is_one_edge() {
        let mut p = chain(2);
        p.add_descent(&TaxonId::Int(0), &TaxonId::Int(1)).unwrap();
        assert_eq!(p.edge_count(), 1);
    }

    #[test]
    fn descent_to_unknown_taxon_fails() {
        let mut p = chain(1);
        let err = p.add_descent(&TaxonId::Int(0), &TaxonId::Int(5)).unwrap_err();
        assert!(matches!(err, PhyloError::UnknownTaxon(TaxonId::Int(5))));
    }

    #[test]
    fn parents_and_children_in_load_order() {
        let mut p = chain(1);
        for i in 1..4 {
            p.add_taxon(TaxonId::Int(i), BTreeMap::new()).unwrap();
            p.add_descent(&TaxonId::Int(0), &TaxonId::Int(i)).unwrap();
        }
        assert_eq!(
            p.child_ids(&TaxonId::Int(0)).unwrap(),
            vec![TaxonId::Int(1), TaxonId::Int(2), TaxonId::Int(3)]
        );
        assert_eq!(p.parent_ids(&TaxonId::Int(2)).unwrap(), vec![TaxonId::Int(0)]);
    }

    #[test]
    fn subgraph_is_independent_copy() {
        let p = chain(4);
        let mut sub = p.subgraph(&[TaxonId::Int(1), TaxonId::Int(2)]).unwrap();
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edges(), vec![(TaxonId::Int(1), TaxonId::Int(2))]);

        let idx = sub.node_index(&TaxonId::Int(1)).unwrap();
        sub.set_attribute(idx, "tag", AttrValue::Int(1));
        assert!(!p.get_taxon(&TaxonId::Int(1)).unwrap().has_attribute("tag"));
    }
}
