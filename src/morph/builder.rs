//! Opbouw van de morfologie uit geordende SWC-rijen.

use crate::geom::Point3;
use crate::morph::Morphology;
use crate::morph::node::{Dendrite, NodeId};
use crate::parse::swc::SwcRow;

/// Bouwt een [`Morphology`] op uit rijen in bestandsvolgorde.
///
/// Elke rij levert precies één sample op; ids worden ongewijzigd
/// overgenomen. Een parent-id wordt opgezocht tussen de al opgebouwde
/// samples en meteen als arena-positie bevroren. Een parent-positie
/// wijst daardoor altijd naar een eerder sample, dus een parent-keten
/// kan geen cyclus vormen — ook niet wanneer een later hergebruikt id
/// terugverwijst naar een eerder sample.
///
/// Een rij die naar een nog onbekend parent-id verwijst wordt als
/// wortel aangemaakt; dat gedrag komt uit het bronformaat en wordt hier
/// alleen gelogd, niet geweigerd.
#[must_use]
pub fn build(rows: &[SwcRow]) -> Morphology {
    let mut morphology = Morphology::new();

    for row in rows {
        let id = NodeId::new(row.id);
        let mut node = Dendrite::new(
            id,
            row.node_type,
            Point3::new(row.x, row.y, row.z),
            row.radius,
        );

        if let Some(parent_id) = row.parent() {
            match morphology.position_of(parent_id) {
                Some(position) => node.parent = Some(position),
                None => log::warn!(
                    "sample {} verwijst naar onbekende parent {}; sample wordt een wortel",
                    row.id,
                    parent_id.0
                ),
            }
        }

        let parent = node.parent;
        let inserted = morphology.insert(node);
        if let Some(parent_position) = parent {
            if let Some(parent_node) = morphology.at_mut(parent_position) {
                parent_node.children.push(inserted);
            }
        }
    }

    log::debug!("morfologie opgebouwd: {} samples", morphology.node_count());
    morphology
}
