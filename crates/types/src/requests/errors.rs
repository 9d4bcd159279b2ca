//! Error types for quote request operations

use thiserror::Error;

/// General request-related errors
#[derive(Error, Debug)]
pub enum RequestError {
	#[error("Quote request not found: {request_id}")]
	NotFound { request_id: String },

	#[error("Storage error: {0}")]
	Storage(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
