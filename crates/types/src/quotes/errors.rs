//! Error types for quote operations

use thiserror::Error;

/// General quote-related errors
#[derive(Error, Debug)]
pub enum QuoteError {
	#[error("Quote not found: {quote_id}")]
	NotFound { quote_id: String },

	#[error("Quote has expired")]
	Expired,

	#[error("Quote already accepted")]
	AlreadyAccepted,

	#[error("Quote is not open for a decision in status {status}")]
	NotAcceptable { status: String },

	#[error("Storage error: {0}")]
	Storage(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
