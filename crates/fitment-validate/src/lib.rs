#![deny(unsafe_code)]

mod index;
mod validator;

pub use index::PositionIndex;
pub use validator::{FITMENT_VALID, FitmentValidator, NO_VALID_POSITIONS, NO_VEHICLE_MATCH};
