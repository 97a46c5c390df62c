//! Kern datastructuren voor het modelleren van dendriet-morfologieën.

use std::collections::HashMap;

pub mod branch;
pub mod builder;
pub mod filter;
pub mod metrics;
pub mod node;
pub mod spines;

use node::{Dendrite, NodeId, NodeIndex};

/// Arena van samples met een index voor snelle id-lookups.
///
/// De arena is eigenaar van alle samples; parent/children-relaties zijn
/// arena-posities in dezelfde arena, bij de opbouw bevroren. Samples
/// worden nooit verwijderd — filtering beperkt alleen de verwijzingen
/// van de overgebleven samples.
#[derive(Debug, Clone, Default)]
pub struct Morphology {
    nodes: Vec<Dendrite>,
    node_index: HashMap<NodeId, NodeIndex>,
}

impl Morphology {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Voeg een sample toe aan de arena en geef zijn positie terug.
    ///
    /// Dubbele ids worden niet geweigerd: de index wordt overschreven,
    /// zodat bij een id-botsing het laatst toegevoegde sample wint bij
    /// id-lookups. Dat is het gedrag van het bronformaat, waar latere
    /// rijen eerdere rijen met hetzelfde id overschaduwen. Eerder
    /// bevroren parent/children-posities blijven naar het oude sample
    /// wijzen; alleen nieuwe lookups zien het nieuwe sample.
    pub fn insert(&mut self, node: Dendrite) -> NodeIndex {
        let index = NodeIndex::new(self.nodes.len());
        self.node_index.insert(node.id, index);
        self.nodes.push(node);
        index
    }

    /// Geeft terug of een sample met dit id bestaat.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    /// Positie van het laatst toegevoegde sample met dit id.
    #[must_use]
    pub fn position_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_index.get(&id).copied()
    }

    /// Sample op een arena-positie.
    #[must_use]
    pub fn at(&self, index: NodeIndex) -> Option<&Dendrite> {
        self.nodes.get(index.0)
    }

    pub fn at_mut(&mut self, index: NodeIndex) -> Option<&mut Dendrite> {
        self.nodes.get_mut(index.0)
    }

    /// Sample via id-lookup; bij dubbele ids wint het laatste.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Dendrite> {
        self.position_of(id).and_then(|index| self.at(index))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Dendrite> {
        self.position_of(id)
            .and_then(move |index| self.at_mut(index))
    }

    /// Alle samples, in invoegvolgorde.
    #[must_use]
    pub fn nodes(&self) -> &[Dendrite] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Dendrite> {
        self.nodes.iter_mut()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
