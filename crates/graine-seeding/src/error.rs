//! Error types for the seeding engine.
//!
//! This module defines the error types used throughout the graine-seeding crate.

use thiserror::Error;

/// Errors that can occur during seeding operations.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// No writer was configured before seeding or cleaning up.
	#[error("Writer is not set, call set_writer() before seeding or cleaning up")]
	WriterNotSet,

	/// Factory was not found in the registry.
	#[error("Factory \"{0}\" was not found")]
	FactoryNotFound(String),

	/// A factory with the same name is already registered.
	#[error("Factory \"{0}\" is already registered")]
	DuplicateFactory(String),

	/// Validation failed for a specific field.
	#[error("Validation error: {field}: {message}")]
	ValidationError {
		/// Field that failed validation.
		field: String,
		/// Validation error message.
		message: String,
	},

	/// Factory provider or hook failed.
	#[error("Factory error: {0}")]
	FactoryError(String),

	/// Writer operation failed.
	#[error("Database error: {0}")]
	DatabaseError(String),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),
}

impl SeedingError {
	/// Builds a [`SeedingError::ValidationError`] for `field`.
	pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::ValidationError {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Result type alias for seeding operations.
pub type SeedingResult<T> = Result<T, SeedingError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_factory_not_found_error() {
		let error = SeedingError::FactoryNotFound("unknown".to_string());
		assert_eq!(error.to_string(), "Factory \"unknown\" was not found");
	}

	#[rstest]
	fn test_validation_error() {
		let error = SeedingError::validation("channelID", "must be a number or an object");
		assert_eq!(
			error.to_string(),
			"Validation error: channelID: must be a number or an object"
		);
	}

	#[rstest]
	fn test_writer_not_set_error() {
		assert!(
			SeedingError::WriterNotSet
				.to_string()
				.starts_with("Writer is not set")
		);
	}

	#[rstest]
	fn test_json_error_from() {
		let json_error: serde_json::Error =
			serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
		let seeding_error: SeedingError = json_error.into();
		assert!(matches!(seeding_error, SeedingError::JsonError(_)));
	}
}
