//! Core Order domain model
//!
//! An order is created when a buyer accepts a quote. The engine itself never
//! creates orders; the acceptance service does, and fulfilment is owned by
//! the surrounding system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod errors;

pub use errors::OrderError;

use crate::quotes::Quote;

/// Result type for order operations
pub type OrderResult<T> = Result<T, OrderError>;

/// Core Order domain model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Unique identifier for the order
	pub order_id: String,

	/// The accepted quote this order was created from
	pub quote_reference: String,

	/// The originating quote request
	pub request_id: String,

	/// Supplying vendor
	pub vendor_id: String,

	/// Buyer who accepted the quote
	pub buyer_id: String,

	pub order_type: OrderType,

	/// Agreed monthly cost at acceptance time
	pub monthly_cost: f64,

	/// Agreed lease term in months
	pub lease_term_months: u32,

	pub status: OrderStatus,

	pub created_at: DateTime<Utc>,
}

/// How the order came to exist
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
	QuoteAcceptance,
}

/// Order fulfilment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Created on acceptance, awaiting vendor confirmation
	Created,
	/// Vendor has confirmed supply
	Confirmed,
	/// Cancelled before fulfilment
	Cancelled,
}

impl Order {
	/// Create an order from an accepted quote
	pub fn from_accepted_quote(quote: &Quote, buyer_id: String, now: DateTime<Utc>) -> Self {
		let recommended_term = quote
			.lease_options
			.iter()
			.find(|o| o.is_recommended)
			.map(|o| o.term_months)
			.unwrap_or(quote.user_requirements.preferred_term_months);

		Self {
			order_id: Uuid::new_v4().to_string(),
			quote_reference: quote.quote_id.clone(),
			request_id: quote.request_id.clone(),
			vendor_id: quote.vendor_id.clone(),
			buyer_id,
			order_type: OrderType::QuoteAcceptance,
			monthly_cost: quote.costs.total_monthly_cost,
			lease_term_months: recommended_term,
			status: OrderStatus::Created,
			created_at: now,
		}
	}
}
