//! Order service
//!
//! Buyer decisions on generated quotes: acceptance creates an Order and
//! completes the owning request, rejection records the decision. The engine
//! itself never updates quotes; all lifecycle transitions happen here.

use std::sync::Arc;

use tendor_storage::{OrderStorage, QuoteStorage, RequestStorage, Storage};
use tendor_types::{
	CustomerAction, CustomerActionKind, DecisionDetails, Order, Quote, QuoteStatus, RequestStatus,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::integrity::IntegrityTrait;

#[derive(Debug, Error)]
pub enum OrderServiceError {
	#[error("Quote not found: {0}")]
	QuoteNotFound(String),

	#[error("Quote expired: {0}")]
	QuoteExpired(String),

	/// Idempotent failure code for a second acceptance attempt
	#[error("ALREADY_ACCEPTED: quote {0} has already been accepted")]
	AlreadyAccepted(String),

	#[error("Quote {quote_id} cannot be decided in status {status}")]
	NotAcceptable { quote_id: String, status: String },

	#[error("Quote {0} failed integrity verification")]
	IntegrityFailed(String),

	#[error("Storage error: {0}")]
	Storage(String),
}

#[derive(Clone)]
pub struct OrderService {
	storage: Arc<dyn Storage>,
	clock: Arc<dyn Clock>,
	integrity: Arc<dyn IntegrityTrait>,
}

impl OrderService {
	pub fn new(
		storage: Arc<dyn Storage>,
		clock: Arc<dyn Clock>,
		integrity: Arc<dyn IntegrityTrait>,
	) -> Self {
		Self {
			storage,
			clock,
			integrity,
		}
	}

	/// Accept a quote on behalf of a buyer: transitions the quote, creates
	/// the order and completes the owning request.
	pub async fn accept_quote(
		&self,
		quote_id: &str,
		buyer_id: &str,
		note: Option<String>,
	) -> Result<Order, OrderServiceError> {
		let now = self.clock.now();
		let mut quote = self.load_open_quote(quote_id, QuoteStatus::Accepted).await?;

		if quote.is_expired(now) {
			// No mutation: the expiry sweeper owns the status transition
			return Err(OrderServiceError::QuoteExpired(quote_id.to_string()));
		}

		// 1. Transition the quote
		quote.status = QuoteStatus::Accepted;
		let details = quote.decision_details.get_or_insert_with(DecisionDetails::default);
		if details.accepted_at.is_none() {
			details.accepted_at = Some(now);
		}
		details.reason = note.clone();
		quote.customer_actions.push(CustomerAction {
			action: CustomerActionKind::Accepted,
			at: now,
			note,
		});
		quote.metrics.time_to_decision_minutes = Some((now - quote.created_at).num_minutes());

		// 2. Create the order
		let order = Order::from_accepted_quote(&quote, buyer_id.to_string(), now);
		self.storage
			.create_order(order.clone())
			.await
			.map_err(|e| OrderServiceError::Storage(e.to_string()))?;
		quote.created_order = Some(order.order_id.clone());

		self.storage
			.update_quote(quote.clone())
			.await
			.map_err(|e| OrderServiceError::Storage(e.to_string()))?;

		// 3. Complete the owning request
		match self
			.storage
			.get_request(&quote.request_id)
			.await
			.map_err(|e| OrderServiceError::Storage(e.to_string()))?
		{
			Some(mut request) => {
				request.status = RequestStatus::Completed;
				self.storage
					.update_request(request)
					.await
					.map_err(|e| OrderServiceError::Storage(e.to_string()))?;
			},
			None => warn!(
				quote_id,
				request_id = %quote.request_id,
				"Accepted quote references a missing request"
			),
		}

		info!(
			quote_id,
			order_id = %order.order_id,
			buyer_id,
			"Quote accepted and order created"
		);

		Ok(order)
	}

	/// Record a buyer rejection with an optional reason
	pub async fn reject_quote(
		&self,
		quote_id: &str,
		reason: Option<String>,
	) -> Result<Quote, OrderServiceError> {
		let now = self.clock.now();
		let mut quote = self.load_open_quote(quote_id, QuoteStatus::Rejected).await?;

		quote.status = QuoteStatus::Rejected;
		let details = quote.decision_details.get_or_insert_with(DecisionDetails::default);
		details.rejected_at = Some(now);
		details.reason = reason.clone();
		quote.customer_actions.push(CustomerAction {
			action: CustomerActionKind::Rejected,
			at: now,
			note: reason,
		});
		quote.metrics.time_to_decision_minutes = Some((now - quote.created_at).num_minutes());

		self.storage
			.update_quote(quote.clone())
			.await
			.map_err(|e| OrderServiceError::Storage(e.to_string()))?;

		Ok(quote)
	}

	/// Record a buyer viewing a quote
	pub async fn record_view(&self, quote_id: &str) -> Result<Quote, OrderServiceError> {
		let mut quote = self
			.storage
			.get_quote(quote_id)
			.await
			.map_err(|e| OrderServiceError::Storage(e.to_string()))?
			.ok_or_else(|| OrderServiceError::QuoteNotFound(quote_id.to_string()))?;

		quote.record_view(self.clock.now());
		self.storage
			.update_quote(quote.clone())
			.await
			.map_err(|e| OrderServiceError::Storage(e.to_string()))?;

		Ok(quote)
	}

	/// Retrieve an existing order by id
	pub async fn get_order(&self, order_id: &str) -> Result<Option<Order>, OrderServiceError> {
		self.storage
			.get_order(order_id)
			.await
			.map_err(|e| OrderServiceError::Storage(e.to_string()))
	}

	async fn load_open_quote(
		&self,
		quote_id: &str,
		target: QuoteStatus,
	) -> Result<Quote, OrderServiceError> {
		let quote = self
			.storage
			.get_quote(quote_id)
			.await
			.map_err(|e| OrderServiceError::Storage(e.to_string()))?
			.ok_or_else(|| OrderServiceError::QuoteNotFound(quote_id.to_string()))?;

		if quote.status == QuoteStatus::Accepted && target == QuoteStatus::Accepted {
			return Err(OrderServiceError::AlreadyAccepted(quote_id.to_string()));
		}
		if !quote.is_awaiting_decision() {
			return Err(OrderServiceError::NotAcceptable {
				quote_id: quote_id.to_string(),
				status: format!("{:?}", quote.status).to_lowercase(),
			});
		}

		// A present checksum must verify; quotes issued before integrity
		// rollout have none and are accepted as-is
		if let Some(expected) = &quote.integrity_checksum {
			let payload = quote.to_integrity_payload();
			match self.integrity.verify_checksum(&payload, expected) {
				Ok(true) => {},
				Ok(false) => {
					return Err(OrderServiceError::IntegrityFailed(quote_id.to_string()));
				},
				Err(e) => {
					warn!(quote_id, "Integrity verification errored: {e}");
				},
			}
		}

		Ok(quote)
	}
}
