//! Error types for order operations

use thiserror::Error;

/// General order-related errors
#[derive(Error, Debug)]
pub enum OrderError {
	#[error("Order not found: {order_id}")]
	NotFound { order_id: String },

	#[error("Storage error: {0}")]
	Storage(String),
}
