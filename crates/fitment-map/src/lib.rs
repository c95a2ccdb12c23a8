#![deny(unsafe_code)]

//! Parsing and expansion of free-form part application strings.
//!
//! The pipeline runs raw text through [`parse_application`], resolves the
//! vehicle text with a [`ModelMappingTable`], expands the position phrase with
//! [`extract_positions`], and combines the pieces in [`FitmentExpander`].

pub mod expander;
pub mod parser;
pub mod positions;
pub mod resolver;

pub use expander::FitmentExpander;
pub use parser::{expand_year_range, extract_year_range, parse_application};
pub use positions::extract_positions;
pub use resolver::{MappingDocument, ModelMappingTable, PatternEntry};
