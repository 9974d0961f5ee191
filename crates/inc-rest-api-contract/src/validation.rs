//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::*;
use validator::Validate;

/// Validate a model before it is submitted for configuration or optimization
pub fn validate_new_model(model: &NewModel) -> Result<(), ApiContractError> {
    model.validate()?;
    Ok(())
}
