//! Error types for catalog product operations

use thiserror::Error;

/// Validation errors for catalog rows
#[derive(Error, Debug)]
pub enum ProductValidationError {
	#[error("Invalid volume window: minVolume {min_volume} exceeds maxVolume {max_volume}")]
	InvalidVolumeWindow { min_volume: u32, max_volume: u32 },

	#[error("CPC rates must be non-negative, got {rate}")]
	NegativeCpcRate { rate: f64 },

	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },
}

/// General product-related errors
#[derive(Error, Debug)]
pub enum ProductError {
	#[error("Product validation failed: {0}")]
	Validation(#[from] ProductValidationError),

	#[error("Product not found: {product_id}")]
	NotFound { product_id: String },

	#[error("Storage error: {0}")]
	Storage(String),
}
