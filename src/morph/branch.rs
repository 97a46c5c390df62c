//! Opsplitsing van de gefilterde morfologie in lineaire takken.

use crate::morph::Morphology;
use crate::morph::filter::ValidSet;
use crate::morph::node::NodeIndex;

/// Eén tak: een geordende reeks arena-posities van blad naar wortel,
/// geheel binnen de geldige verzameling.
///
/// Een tak is een leesweergave over de arena; hij bezit de samples niet.
/// Takken zijn per constructie niet leeg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    nodes: Vec<NodeIndex>,
}

impl Branch {
    /// De arena-posities, van blad naar wortel.
    #[must_use]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Het blad-uiteinde van de tak.
    #[must_use]
    pub fn leaf(&self) -> NodeIndex {
        self.nodes[0]
    }

    /// Het wortel-uiteinde van de tak.
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        self.nodes[self.nodes.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Extraheert één tak per blad: vanaf elk sample zonder kinderen wordt
/// via de parent-posities omhooggelopen zolang het volgende sample in
/// de geldige verzameling ligt.
///
/// De wandeling is iteratief; takdiepte is databepaald en onbegrensd.
/// Omdat elke parent-positie naar een eerder opgebouwd sample wijst,
/// daalt de positie bij elke stap en eindigt de wandeling altijd. Een
/// sample met meerdere kinderen wordt door elke stroomafwaartse tak
/// opnieuw doorlopen en telt dus in meerdere takken mee; de opsplitsing
/// factoriseert gedeelde segmenten bewust niet uit.
#[must_use]
pub fn extract(morphology: &Morphology, valid: &ValidSet) -> Vec<Branch> {
    let mut branches = Vec::new();

    for (position, node) in morphology.nodes().iter().enumerate() {
        if !node.is_leaf() {
            continue;
        }

        let mut sequence = Vec::new();
        let mut cursor = Some(NodeIndex::new(position));
        while let Some(index) = cursor {
            if !valid.contains(index) {
                break;
            }
            sequence.push(index);
            cursor = morphology.at(index).and_then(|n| n.parent);
        }

        if !sequence.is_empty() {
            branches.push(Branch { nodes: sequence });
        }
    }

    log::debug!("{} takken geëxtraheerd", branches.len());
    branches
}
