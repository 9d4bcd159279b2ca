//! Error types for vendor operations

use thiserror::Error;

/// Validation errors for vendor records
#[derive(Error, Debug)]
pub enum VendorValidationError {
	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid email address: {value}")]
	InvalidEmail { value: String },
}

/// General vendor-related errors
#[derive(Error, Debug)]
pub enum VendorError {
	#[error("Vendor validation failed: {0}")]
	Validation(#[from] VendorValidationError),

	#[error("Vendor not found: {vendor_id}")]
	NotFound { vendor_id: String },

	#[error("Storage error: {0}")]
	Storage(String),
}
