//! Inlezen van de tekstformaten rond de kernpipeline.
//!
//! De tokenizers leveren opgeschoonde rijen af; de betekenis van die
//! rijen (boomopbouw, koppeling, filtering) ligt in [`crate::morph`].

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

pub mod spine;
pub mod swc;

/// Result type voor het inlezen van invoerbestanden.
pub type ParseResult<T> = Result<T, ParseError>;

/// Beschrijft fouten tijdens het inlezen. Elke fout breekt de verwerking
/// van het betreffende bestand af; er wordt nooit een halve rijenlijst
/// teruggegeven.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Een rij bevat te weinig velden voor het verwachte formaat.
    #[error("regel {line}: verwacht minstens {expected} velden, {found} gevonden")]
    MissingFields {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Fout tijdens het converteren van een kommagetal.
    #[error("regel {line}: ongeldige numerieke waarde: {source}")]
    Number {
        line: usize,
        #[source]
        source: ParseFloatError,
    },
    /// Fout tijdens het converteren van een geheel getal.
    #[error("regel {line}: ongeldige gehele waarde: {source}")]
    Integer {
        line: usize,
        #[source]
        source: ParseIntError,
    },
}

fn parse_float(field: &str, line: usize) -> ParseResult<f64> {
    field
        .parse()
        .map_err(|source| ParseError::Number { line, source })
}

fn parse_integer<T>(field: &str, line: usize) -> ParseResult<T>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    field
        .parse()
        .map_err(|source| ParseError::Integer { line, source })
}
