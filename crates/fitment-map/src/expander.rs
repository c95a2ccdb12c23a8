//! Expansion of a parsed application into atomic fitments.

use tracing::debug;

use fitment_model::{FitmentError, PartApplication, PartFitment, PositionGroup, Result, Vehicle};

use crate::parser::{expand_year_range, parse_application};
use crate::positions::extract_positions;
use crate::resolver::ModelMappingTable;

/// Expands part applications using a configured model mapping table.
#[derive(Debug, Clone, Default)]
pub struct FitmentExpander {
    mappings: ModelMappingTable,
}

impl FitmentExpander {
    pub fn new(mappings: ModelMappingTable) -> Self {
        Self { mappings }
    }

    pub fn mappings(&self) -> &ModelMappingTable {
        &self.mappings
    }

    /// Parses raw text and expands it in one step.
    ///
    /// # Errors
    ///
    /// Returns [`FitmentError::Parsing`] when the text cannot be parsed or
    /// expanded.
    pub fn expand_text(&self, raw: &str) -> Result<Vec<PartFitment>> {
        let application = parse_application(raw)?;
        self.process_application(&application)
    }

    /// Expands an application into `years × model mappings × position groups`
    /// fitments, iterating years outermost and position groups innermost.
    ///
    /// # Errors
    ///
    /// Returns [`FitmentError::Parsing`] when the year range or vehicle text is
    /// missing, or when the vehicle text cannot be mapped.
    pub fn process_application(&self, application: &PartApplication) -> Result<Vec<PartFitment>> {
        let Some((start, end)) = application.year_range else {
            return Err(FitmentError::parsing(format!(
                "Application has no year range: '{}'",
                application.raw_text
            )));
        };
        let Some(vehicle_text) = application.vehicle_text.as_deref() else {
            return Err(FitmentError::parsing(format!(
                "Application has no vehicle text: '{}'",
                application.raw_text
            )));
        };

        let years = expand_year_range(start, end);
        let models = self.mappings.find_model_mapping(vehicle_text)?;
        let position_groups = match application.position_text.as_deref() {
            Some(text) => extract_positions(text),
            None => vec![PositionGroup::default()],
        };

        let mut fitments = Vec::with_capacity(years.len() * models.len() * position_groups.len());
        for year in &years {
            for model in &models {
                for group in &position_groups {
                    let vehicle = Vehicle::new(*year, model.make.clone(), model.model.clone());
                    fitments.push(
                        PartFitment::new(vehicle, *group)
                            .with_notes(application.additional_notes.clone()),
                    );
                }
            }
        }

        debug!(
            text = %application.raw_text,
            years = years.len(),
            models = models.len(),
            positions = position_groups.len(),
            fitments = fitments.len(),
            "expanded application"
        );
        Ok(fitments)
    }
}
