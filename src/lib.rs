#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # swc-engine
//!
//! Reconstructie van een dendriet-morfologie uit een SWC-bestand,
//! koppeling van spine-observaties, filtering op soma-afstand en
//! opsplitsing in takken met lengte- en dichtheidsmetrieken.
//!
//! De pipeline is één lineaire doorloop: rijen → boom → spines →
//! soma-filter → takken → metriekrecords. Elke fase consumeert de
//! uitvoer van haar voorganger volledig; na de filterfase is de
//! morfologie bevroren en zijn takken onafhankelijke leesweergaven.

pub mod geom;
pub mod morph;
pub mod parse;
pub mod report;

use serde::Serialize;
use thiserror::Error;

use morph::Morphology;
use morph::branch;
use morph::filter::{self, FilterError};
use morph::metrics::{self, BranchMetrics};
use morph::spines::{self, SpineReport};
use parse::ParseError;

/// Standaard uitsluitingsstraal rond het soma, in micrometers.
pub const DEFAULT_SOMA_EXCLUSION_MICRONS: f64 = 60.0;

/// Fouten op het niveau van de volledige pipeline.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Een invoerbestand kon niet gelezen worden.
    #[error("invoer kon niet gelezen worden: {0}")]
    Parse(#[from] ParseError),
    /// De filterfase kon niet uitgevoerd worden.
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// Er is nog geen morfologie geladen.
    #[error("geen morfologie geladen")]
    NotLoaded,
    /// Er zijn nog geen metrieken berekend.
    #[error("metrieken zijn nog niet berekend")]
    NotComputed,
}

/// Uitvoer van [`run_pipeline`].
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Eén record per tak, in extractievolgorde.
    pub metrics: Vec<BranchMetrics>,
    /// Samenvatting van de spine-koppeling.
    pub spine_report: SpineReport,
}

/// Voert de volledige pipeline in één keer uit.
///
/// `threshold_microns` is de uitsluitingsstraal rond het soma; samples
/// op precies die afstand blijven behouden.
pub fn run_pipeline(
    swc: &str,
    spine: &str,
    threshold_microns: f64,
) -> Result<PipelineOutput, EngineError> {
    let rows = parse::swc::parse_str(swc)?;
    let observations = parse::spine::parse_str(spine)?;

    let mut morphology = morph::builder::build(&rows);
    let spine_report = spines::attach(&mut morphology, &observations);
    let valid = filter::apply(&mut morphology, threshold_microns)?;
    let branches = branch::extract(&morphology, &valid);
    let metrics = metrics::compute_all(&morphology, &branches);

    Ok(PipelineOutput {
        metrics,
        spine_report,
    })
}

/// Public entry point for consumers.
///
/// Houdt de toestand tussen de fasen vast zodat een aanroeper de
/// morfologie kan laden, observaties kan koppelen en daarna (eventueel
/// met verschillende drempels) metrieken kan berekenen.
#[derive(Debug)]
pub struct Engine {
    initialized: bool,
    morphology: Option<Morphology>,
    last_metrics: Option<Vec<BranchMetrics>>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            initialized: true,
            morphology: None,
            last_metrics: None,
        }
    }

    /// Geeft terug of de engine de minimale initialisatie heeft
    /// doorlopen.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Laad een SWC-bestand en bouw de morfologie op. Eerder berekende
    /// metrieken vervallen.
    pub fn load_swc(&mut self, text: &str) -> Result<(), EngineError> {
        let rows = parse::swc::parse_str(text)?;
        self.morphology = Some(morph::builder::build(&rows));
        self.last_metrics = None;
        Ok(())
    }

    /// Koppel spine-observaties aan de geladen morfologie.
    pub fn attach_spines(&mut self, text: &str) -> Result<SpineReport, EngineError> {
        let morphology = self.morphology.as_mut().ok_or(EngineError::NotLoaded)?;
        let observations = parse::spine::parse_str(text)?;
        Ok(spines::attach(morphology, &observations))
    }

    /// Filter op soma-afstand, splits in takken en bereken de
    /// metriekrecords.
    ///
    /// De filterfase herstelt de verwijzingen van de morfologie in
    /// place; opnieuw aanroepen met dezelfde drempel is idempotent.
    pub fn compute_metrics(
        &mut self,
        threshold_microns: f64,
    ) -> Result<&[BranchMetrics], EngineError> {
        let morphology = self.morphology.as_mut().ok_or(EngineError::NotLoaded)?;
        let valid = filter::apply(morphology, threshold_microns)?;
        let branches = branch::extract(morphology, &valid);
        self.last_metrics = Some(metrics::compute_all(morphology, &branches));
        Ok(self.last_metrics.as_deref().unwrap_or(&[]))
    }

    /// Haal de laatst berekende metrieken op.
    pub fn metrics(&self) -> Result<&[BranchMetrics], EngineError> {
        self.last_metrics.as_deref().ok_or(EngineError::NotComputed)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
