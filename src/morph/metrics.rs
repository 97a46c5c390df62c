//! Metrieken per tak: lengte, spine-aantal en spine-dichtheid.

use serde::Serialize;

use crate::morph::Morphology;
use crate::morph::branch::Branch;
use crate::morph::node::NodeId;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Spine-dichtheid van een tak.
///
/// Een tak met lengte 0 heeft geen gedefinieerde dichtheid; dat wordt
/// als aparte variant gedragen in plaats van als NaN of oneindig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum SpineDensity {
    /// Aantal spines per micrometer taklengte.
    PerMicron(f64),
    /// Dichtheid niet gedefinieerd (taklengte 0).
    Undefined,
}

impl SpineDensity {
    /// Numerieke waarde, of `None` wanneer de dichtheid niet
    /// gedefinieerd is.
    #[must_use]
    pub const fn as_f64(self) -> Option<f64> {
        match self {
            Self::PerMicron(value) => Some(value),
            Self::Undefined => None,
        }
    }

    #[must_use]
    pub const fn is_defined(self) -> bool {
        matches!(self, Self::PerMicron(_))
    }
}

/// Metriekrecord voor één tak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BranchMetrics {
    /// Sample aan het wortel-uiteinde (geen parent binnen de tak).
    pub start: NodeId,
    /// Sample aan het blad-uiteinde (geen kinderen).
    pub end: NodeId,
    /// Taklengte in micrometers: som van de afstanden langs de
    /// parent-verbindingen.
    pub length: f64,
    /// Som van de spine-tellers over alle samples van de tak.
    pub spine_count: u32,
    /// Spines per micrometer.
    pub density: SpineDensity,
}

/// Berekent het metriekrecord voor één tak.
///
/// Een sample zonder parent draagt 0 bij aan de lengte. De berekening
/// leest alleen; gedeelde toestand wordt niet aangeraakt, dus takken
/// kunnen onafhankelijk van elkaar verwerkt worden.
#[must_use]
pub fn compute(morphology: &Morphology, branch: &Branch) -> BranchMetrics {
    let mut spine_count: u32 = 0;
    let mut length = 0.0_f64;

    for &index in branch.nodes() {
        let Some(node) = morphology.at(index) else {
            continue;
        };
        spine_count += node.spine_count();
        if let Some(parent_index) = node.parent {
            if let Some(parent) = morphology.at(parent_index) {
                length += node.distance_to(parent);
            }
        }
    }

    let density = if length > 0.0 {
        SpineDensity::PerMicron(f64::from(spine_count) / length)
    } else {
        SpineDensity::Undefined
    };

    // Takken zijn niet leeg en hun posities liggen in de arena; de
    // terugval doet hier dus nooit mee.
    let start = morphology.at(branch.root()).map_or(NodeId::new(0), |n| n.id);
    let end = morphology.at(branch.leaf()).map_or(NodeId::new(0), |n| n.id);

    BranchMetrics {
        start,
        end,
        length,
        spine_count,
        density,
    }
}

/// Berekent de records voor alle takken, in takvolgorde.
#[cfg(feature = "parallel")]
#[must_use]
pub fn compute_all(morphology: &Morphology, branches: &[Branch]) -> Vec<BranchMetrics> {
    branches
        .par_iter()
        .map(|branch| compute(morphology, branch))
        .collect()
}

/// Berekent de records voor alle takken, in takvolgorde.
#[cfg(not(feature = "parallel"))]
#[must_use]
pub fn compute_all(morphology: &Morphology, branches: &[Branch]) -> Vec<BranchMetrics> {
    branches
        .iter()
        .map(|branch| compute(morphology, branch))
        .collect()
}
