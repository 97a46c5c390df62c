//! Tokenizer voor SWC-morfologiebestanden.
//!
//! Eén rij per sample, whitespace-gescheiden:
//! `id type x y z radius parent_id`. Commentaarregels beginnen met `#`;
//! regels met minder dan twee velden worden genegeerd. Rijen horen in
//! bestandsvolgorde te staan zodat een parent altijd vóór zijn kinderen
//! verschijnt.

use super::{ParseError, ParseResult, parse_float, parse_integer};
use crate::morph::node::NodeId;

/// Aantal velden dat een betekenisvolle SWC-rij minimaal draagt.
const FIELD_COUNT: usize = 7;

/// Eén opgeschoonde rij uit een SWC-bestand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwcRow {
    pub id: usize,
    pub node_type: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
    /// Parent-id zoals in het bestand; een negatieve waarde betekent
    /// "geen parent".
    pub parent_id: i64,
}

impl SwcRow {
    /// Parent-id als [`NodeId`], of `None` bij de negatieve sentinel.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        usize::try_from(self.parent_id).ok().map(NodeId::new)
    }
}

/// Leest een volledig SWC-bestand en geeft de rijen in bestandsvolgorde
/// terug.
pub fn parse_str(input: &str) -> ParseResult<Vec<SwcRow>> {
    let mut rows = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        if raw.trim_start().starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }
        if fields.len() < FIELD_COUNT {
            return Err(ParseError::MissingFields {
                line,
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        rows.push(SwcRow {
            id: parse_integer(fields[0], line)?,
            node_type: parse_integer(fields[1], line)?,
            x: parse_float(fields[2], line)?,
            y: parse_float(fields[3], line)?,
            z: parse_float(fields[4], line)?,
            radius: parse_float(fields[5], line)?,
            parent_id: parse_integer(fields[6], line)?,
        });
    }

    log::debug!("{} SWC-rijen ingelezen", rows.len());
    Ok(rows)
}
