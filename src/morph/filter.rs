//! Filtering van samples op afstand tot het soma.

use std::collections::HashSet;
use std::fmt;

use crate::morph::Morphology;
use crate::morph::node::NodeIndex;

/// Fouttype voor de soma-afstandsfilter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// De morfologie bevat niet precies één soma (type 1).
    SomaCount { found: usize },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SomaCount { found } => {
                write!(f, "precies één soma (type 1) verwacht, {found} gevonden")
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// De verzameling arena-posities die de filter overleefde.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidSet {
    indices: HashSet<NodeIndex>,
}

impl ValidSet {
    #[must_use]
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.indices.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Verwijdert samples binnen `threshold_microns` van het soma uit de
/// actieve verzameling en herstelt de verwijzingen van de rest.
///
/// Een sample blijft geldig als de afstand tot het soma groter dan of
/// gelijk aan de drempel is; het soma zelf (afstand 0) valt dus altijd
/// af. Na afloop verwijst geen geldig sample nog naar een ongeldig
/// sample: een ongeldige parent wordt gewist (het sample wordt een
/// wortel) en ongeldige kinderen verdwijnen uit de kinderlijst. De
/// bewerking is idempotent op haar eigen resultaat.
pub fn apply(
    morphology: &mut Morphology,
    threshold_microns: f64,
) -> Result<ValidSet, FilterError> {
    let mut soma_position = None;
    let mut soma_count = 0;
    for node in morphology.nodes() {
        if node.is_soma() {
            soma_count += 1;
            soma_position = Some(node.position);
        }
    }
    let Some(soma_position) = soma_position else {
        return Err(FilterError::SomaCount { found: 0 });
    };
    if soma_count != 1 {
        return Err(FilterError::SomaCount { found: soma_count });
    }

    let indices: HashSet<NodeIndex> = morphology
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.position.distance_to(soma_position) >= threshold_microns)
        .map(|(position, _)| NodeIndex::new(position))
        .collect();

    for (position, node) in morphology.nodes_mut().enumerate() {
        if !indices.contains(&NodeIndex::new(position)) {
            continue;
        }
        if let Some(parent) = node.parent {
            if !indices.contains(&parent) {
                node.parent = None;
            }
        }
        node.children.retain(|child| indices.contains(child));
    }

    log::debug!(
        "soma-afstandsfilter: {} van {} samples geldig bij drempel {} µm",
        indices.len(),
        morphology.node_count(),
        threshold_microns
    );
    Ok(ValidSet { indices })
}
