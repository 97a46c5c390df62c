//! Definitie van samples binnen de dendriet-morfologie.

use serde::Serialize;

use crate::geom::Point3;

/// Typetag waarmee een SWC-rij het soma (cellichaam) markeert.
pub const SOMA_TYPE: i32 = 1;

/// Identifier voor een sample binnen de morfologie.
///
/// Ids komen uit het invoerbestand en worden door de pipeline nooit
/// hernummerd.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

/// Positie van een sample binnen de arena van een [`Morphology`].
///
/// Structurele verwijzingen worden bij de opbouw als posities
/// vastgelegd, niet als ids: een positie is stabiel en uniek, ook
/// wanneer het invoerbestand een id hergebruikt. Een parent-positie
/// wijst altijd naar een eerder opgebouwd sample, dus een parent-keten
/// kan geen cyclus vormen.
///
/// [`Morphology`]: crate::morph::Morphology
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }
}

/// Eén sample van de morfologie: positie, straal, typetag en de
/// structurele verwijzingen naar parent en kinderen.
///
/// `parent` en `children` zijn arena-posities binnen dezelfde
/// [`Morphology`]; de arena is eigenaar van alle samples, de posities
/// drukken alleen de relatie uit.
///
/// [`Morphology`]: crate::morph::Morphology
#[derive(Debug, Clone)]
pub struct Dendrite {
    /// Identifier uit het invoerbestand.
    pub id: NodeId,
    /// Classificatietag uit het SWC-bestand; `1` is het soma.
    pub node_type: i32,
    /// Positie van het sample, in micrometers.
    pub position: Point3,
    /// Straal van de doorsnede op dit sample. Wordt niet gebruikt in de
    /// berekening maar blijft behouden voor het bronformaat.
    pub radius: f64,
    /// Parent-sample; een wortel heeft er geen.
    pub parent: Option<NodeIndex>,
    /// Kinderen in de volgorde waarin ze aan de morfologie zijn toegevoegd.
    pub children: Vec<NodeIndex>,
    spine_count: u32,
}

impl Dendrite {
    /// Maak een nieuw sample zonder structurele verwijzingen.
    #[must_use]
    pub fn new(id: NodeId, node_type: i32, position: Point3, radius: f64) -> Self {
        Self {
            id,
            node_type,
            position,
            radius,
            parent: None,
            children: Vec::new(),
            spine_count: 0,
        }
    }

    /// Geeft terug of dit sample het soma is.
    #[must_use]
    pub fn is_soma(&self) -> bool {
        self.node_type == SOMA_TYPE
    }

    /// Geeft terug of dit sample geen kinderen heeft.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Aantal spine-observaties dat aan dit sample is gekoppeld.
    #[must_use]
    pub fn spine_count(&self) -> u32 {
        self.spine_count
    }

    /// Registreer één spine-observatie op dit sample.
    pub fn record_spine(&mut self) {
        self.spine_count += 1;
    }

    /// Euclidische afstand tot een ander sample.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.position.distance_to(other.position)
    }
}
