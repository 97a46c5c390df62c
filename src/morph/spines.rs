//! Koppeling van spine-observaties aan samples van de morfologie.

use serde::Serialize;

use crate::morph::Morphology;
use crate::morph::node::NodeId;
use crate::parse::spine::SpineObservation;

/// Samenvatting van een koppelronde.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpineReport {
    /// Aantal observaties dat aan een sample is gekoppeld.
    pub attached: usize,
    /// Eigenaar-ids die niet in de morfologie voorkomen, in
    /// bestandsvolgorde.
    pub unresolved: Vec<i64>,
}

impl SpineReport {
    /// Geeft terug of elke observatie gekoppeld kon worden.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Koppelt observaties aan de morfologie door per observatie elk sample
/// met het eigenaar-id één spine te laten registreren.
///
/// Bij een hergebruikt id telt één observatie dus op elk sample met dat
/// id mee; de koppeling gaat op id, niet op arena-positie. Een
/// observatie met een onbekend id wordt overgeslagen en gelogd; tellers
/// van andere samples blijven onaangeroerd. Deze stap moet volledig
/// afgerond zijn voordat tak- of metriekberekening de spine-tellers
/// leest.
pub fn attach(morphology: &mut Morphology, observations: &[SpineObservation]) -> SpineReport {
    let mut report = SpineReport::default();

    for observation in observations {
        let owner = usize::try_from(observation.owner_id).ok().map(NodeId::new);

        let mut matched = false;
        if let Some(owner) = owner {
            for node in morphology.nodes_mut() {
                if node.id == owner {
                    node.record_spine();
                    matched = true;
                }
            }
        }

        if matched {
            report.attached += 1;
        } else {
            log::warn!(
                "regel {}: spine-observatie verwijst naar onbekend sample {}",
                observation.line,
                observation.owner_id
            );
            report.unresolved.push(observation.owner_id);
        }
    }

    log::debug!(
        "{} spine-observaties gekoppeld, {} onopgelost",
        report.attached,
        report.unresolved.len()
    );
    report
}
