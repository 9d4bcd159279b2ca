//! Core Quote domain model — a durable, shareable vendor offer
//!
//! A quote is an immutable snapshot of an offer at generation time: the
//! buyer's requirements and the product capabilities are denormalized into
//! the document so it renders correctly even after the underlying catalog
//! row is edited or delisted. Mutation after generation is limited to the
//! lifecycle fields (`status`, `customer_actions`, `metrics`,
//! `decision_details`, `created_order`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod errors;

pub use errors::QuoteError;

use crate::products::{PaperSize, PaperSizes, VolumeRange};
use crate::requests::{MonthlyVolume, Priority};

/// Result type for quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Per-factor suitability sub-scores.
///
/// All values lie in [0, 1] except `cost_efficiency`, which keeps its sign
/// in [-1, 1] for display; the aggregate clamps negatives to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
	pub volume_match: f64,
	pub cost_efficiency: f64,
	pub speed_match: f64,
	pub feature_match: f64,
	pub reliability_match: f64,
	pub paper_size_match: f64,
	pub urgency_match: f64,
}

/// Confidence band attached to a match score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Confidence {
	High,
	Medium,
	Low,
}

/// Aggregate suitability assessment for a quoted product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
	/// Weighted aggregate in [0, 1]
	pub total: f64,
	pub confidence: Confidence,
	pub breakdown: ScoreBreakdown,
	/// 1-3 short sentences explaining the strongest and weakest factors
	#[serde(default)]
	pub reasoning: Vec<String>,
	/// Set when a critical requirement is unmet but the candidate is still
	/// surfaced as a fallback
	#[serde(default)]
	pub warnings: Vec<String>,
}

/// Per-page and monthly cost synthesis for a quote. All monetary values in
/// pounds, rounded to 2 decimals at persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCosts {
	/// Mono rate in pounds per page
	pub mono_rate: f64,
	/// Colour rate in pounds per page
	pub colour_rate: f64,
	pub mono_cpc_cost: f64,
	pub colour_cpc_cost: f64,
	pub total_cpc_cost: f64,
	/// Monthly share of the recommended lease option
	pub monthly_lease_cost: f64,
	pub monthly_service_cost: f64,
	pub total_monthly_cost: f64,
	pub savings: Savings,
}

/// Savings against the buyer's current setup; signed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
	pub monthly_amount: f64,
	pub annual_amount: f64,
	/// Percentage of the current monthly cost saved; 0 when the buyer has
	/// no current cost to compare against
	pub percentage: f64,
	pub current_monthly_cost: f64,
}

/// One lease term offered with the quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaseOption {
	pub term_months: u32,
	pub quarterly_payment: f64,
	/// Always `quarterly_payment / 3`
	pub monthly_payment: f64,
	/// Quarterly payment across all quarters of the term
	pub total_cost: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub margin: Option<f64>,
	pub is_recommended: bool,
}

/// Contractual terms attached to the offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTerms {
	/// The offer lapses after this instant
	pub valid_until: DateTime<Utc>,
	pub delivery_time: String,
	pub installation_time: String,
	pub payment_terms: String,
	pub cancellation_policy: String,
}

/// Denormalized product capability snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
	pub manufacturer: String,
	pub model: String,
	pub speed: u32,
	pub features: Vec<String>,
	pub paper_sizes: PaperSizes,
	pub volume_range: VolumeRange,
}

/// Snapshot of the buyer requirements the quote answered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRequirements {
	pub monthly_volume: MonthlyVolume,
	pub primary_size: Option<PaperSize>,
	pub priority: Priority,
	pub max_lease_price: Option<f64>,
	pub preferred_term_months: u32,
}

/// Quote lifecycle status. Transitions are forward-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
	Draft,
	Generated,
	Sent,
	Viewed,
	Contacted,
	Accepted,
	Rejected,
	Expired,
	Withdrawn,
	Converted,
}

/// One entry in the buyer-interaction audit log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAction {
	pub action: CustomerActionKind,
	pub at: DateTime<Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CustomerActionKind {
	Viewed,
	Contacted,
	Accepted,
	Rejected,
}

/// Set on accept/reject only; `accepted_at` is written once and never
/// cleared
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDetails {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub accepted_at: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rejected_at: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
}

/// Engagement metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteMetrics {
	pub view_count: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub time_to_view_minutes: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub time_to_decision_minutes: Option<i64>,
}

/// Generation metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteMetadata {
	/// Sub-scores that exceeded their declared range and were clamped
	/// before persistence
	#[serde(default)]
	pub clamped_scores: Vec<String>,
	#[serde(default)]
	pub notes: Vec<String>,
}

/// Core Quote domain model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	/// Unique identifier for the quote
	pub quote_id: String,

	/// The request this quote answers
	pub request_id: String,

	/// Offering vendor
	pub vendor_id: String,

	/// Quoted catalog row
	pub product_id: String,

	/// Position in the short-list, 1-based; unique per request
	pub ranking: u32,

	pub match_score: MatchScore,

	pub costs: QuoteCosts,

	pub user_requirements: UserRequirements,

	/// Up to four terms; exactly one carries `is_recommended`
	pub lease_options: Vec<LeaseOption>,

	pub terms: QuoteTerms,

	pub product_summary: ProductSummary,

	pub status: QuoteStatus,

	#[serde(default)]
	pub customer_actions: Vec<CustomerAction>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub decision_details: Option<DecisionDetails>,

	#[serde(default)]
	pub metrics: QuoteMetrics,

	/// Order created on acceptance
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_order: Option<String>,

	/// HMAC-SHA256 checksum proving the quote was issued by this engine
	#[serde(skip_serializing_if = "Option::is_none")]
	pub integrity_checksum: Option<String>,

	#[serde(default)]
	pub metadata: QuoteMetadata,

	pub created_at: DateTime<Utc>,
}

impl Quote {
	/// Generate a fresh quote id
	pub fn new_id() -> String {
		Uuid::new_v4().to_string()
	}

	/// Whether the offer has lapsed at `now`
	pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
		self.terms.valid_until < now
	}

	/// Whether the quote is still awaiting a buyer decision
	pub fn is_awaiting_decision(&self) -> bool {
		matches!(
			self.status,
			QuoteStatus::Generated | QuoteStatus::Sent | QuoteStatus::Viewed | QuoteStatus::Contacted
		)
	}

	/// Record a buyer view, bumping metrics and the audit log
	pub fn record_view(&mut self, now: DateTime<Utc>) {
		self.metrics.view_count += 1;
		if self.metrics.time_to_view_minutes.is_none() {
			self.metrics.time_to_view_minutes = Some((now - self.created_at).num_minutes());
		}
		self.customer_actions.push(CustomerAction {
			action: CustomerActionKind::Viewed,
			at: now,
			note: None,
		});
		if self.status == QuoteStatus::Generated || self.status == QuoteStatus::Sent {
			self.status = QuoteStatus::Viewed;
		}
	}

	/// Canonical payload string for integrity checksum generation
	pub fn to_integrity_payload(&self) -> String {
		format!(
			"quote_id={}|request_id={}|vendor_id={}|product_id={}|ranking={}|total_monthly={:.2}|created_at={}",
			self.quote_id,
			self.request_id,
			self.vendor_id,
			self.product_id,
			self.ranking,
			self.costs.total_monthly_cost,
			self.created_at.timestamp_millis()
		)
	}
}
