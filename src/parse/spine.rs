//! Inlezen van spine-observatiebestanden.
//!
//! Het bestand is whitespace-gescheiden met vaste kolommen; de eerste
//! regel is een kop en wordt overgeslagen. Alleen kolomindex 13
//! (0-gebaseerd) wordt gebruikt: het id van het sample waar de spine
//! aan hangt.

use super::{ParseError, ParseResult, parse_integer};

/// Kolomindex (0-gebaseerd) van het eigenaar-id.
const OWNER_FIELD: usize = 13;

/// Eén spine-observatie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpineObservation {
    /// Id van het sample waarop de spine is waargenomen.
    pub owner_id: i64,
    /// Regelnummer in het bronbestand, voor foutrapportage.
    pub line: usize,
}

/// Leest een volledig observatiebestand.
pub fn parse_str(input: &str) -> ParseResult<Vec<SpineObservation>> {
    let mut observations = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        // Eerste regel is de kop.
        if index == 0 {
            continue;
        }
        let line = index + 1;

        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        let Some(field) = fields.get(OWNER_FIELD) else {
            return Err(ParseError::MissingFields {
                line,
                expected: OWNER_FIELD + 1,
                found: fields.len(),
            });
        };

        observations.push(SpineObservation {
            owner_id: parse_integer(field, line)?,
            line,
        });
    }

    log::debug!("{} spine-observaties ingelezen", observations.len());
    Ok(observations)
}
