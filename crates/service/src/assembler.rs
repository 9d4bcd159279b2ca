//! Quote assembler and persister
//!
//! Converts the top-K deduplicated candidates into persisted Quote
//! documents. Scores are renormalized to their declared ranges before
//! persistence (with every clamp recorded in metadata) and monetary values
//! are rounded to 2 decimals here and nowhere earlier. Persistence is per
//! quote: one failure is logged and skipped, not fatal to the batch.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tendor_storage::{QuoteStorage, Storage};
use tendor_types::{
	LeaseOption, MatchScore, NormalizedRequest, ProductSummary, Quote, QuoteCosts, QuoteMetadata,
	QuoteMetrics, QuoteStatus, QuoteTerms, UserRequirements,
};
use tokio::time::Instant;
use tracing::warn;

use crate::costs::round_currency;
use crate::integrity::IntegrityTrait;
use crate::scoring::ScoredCandidate;

/// Outcome of a persistence batch
#[derive(Debug, Default)]
pub struct PersistOutcome {
	/// Ids of quotes written, in ranking order
	pub created: Vec<String>,
	/// Ids that failed to write
	pub failed: Vec<String>,
	/// True when the deadline cut the batch short
	pub deadline_hit: bool,
}

/// Builds and persists quote documents
pub struct QuoteAssembler {
	storage: Arc<dyn Storage>,
	integrity: Arc<dyn IntegrityTrait>,
	validity_days: i64,
}

impl QuoteAssembler {
	pub fn new(
		storage: Arc<dyn Storage>,
		integrity: Arc<dyn IntegrityTrait>,
		validity_days: i64,
	) -> Self {
		Self {
			storage,
			integrity,
			validity_days,
		}
	}

	/// Build one quote document from a scored candidate
	pub fn build_quote(
		&self,
		ranking: u32,
		scored: &ScoredCandidate,
		request: &NormalizedRequest,
		now: DateTime<Utc>,
	) -> Quote {
		let product = &scored.candidate.product;
		let costs = &scored.costs;

		let (match_score, clamped) = renormalize_score(scored.score.clone());

		let lease_options: Vec<LeaseOption> = costs
			.lease_options
			.iter()
			.map(|option| LeaseOption {
				term_months: option.term_months,
				quarterly_payment: round_currency(option.quarterly_payment),
				monthly_payment: round_currency(option.monthly_payment),
				total_cost: round_currency(option.total_cost),
				margin: option.margin,
				is_recommended: option.is_recommended,
			})
			.collect();

		let delivery_time = format!("{} days", product.availability.lead_time_days);
		let installation_time = product
			.availability
			.installation_window_days
			.map(|days| format!("{days} days"))
			.unwrap_or_else(|| "1-2 days".to_string());

		let mut quote = Quote {
			quote_id: Quote::new_id(),
			request_id: request.request_id.clone(),
			vendor_id: scored.candidate.vendor.vendor_id.clone(),
			product_id: product.product_id.clone(),
			ranking,
			match_score,
			costs: QuoteCosts {
				mono_rate: costs.mono_rate,
				colour_rate: costs.colour_rate,
				mono_cpc_cost: round_currency(costs.mono_cpc_cost),
				colour_cpc_cost: round_currency(costs.colour_cpc_cost),
				total_cpc_cost: round_currency(costs.total_cpc_cost),
				monthly_lease_cost: round_currency(costs.monthly_lease_cost),
				monthly_service_cost: round_currency(costs.monthly_service_cost),
				total_monthly_cost: round_currency(costs.total_monthly_cost),
				savings: tendor_types::Savings {
					monthly_amount: round_currency(costs.savings.monthly_amount),
					annual_amount: round_currency(costs.savings.annual_amount),
					percentage: round_currency(costs.savings.percentage),
					current_monthly_cost: round_currency(costs.savings.current_monthly_cost),
				},
			},
			user_requirements: UserRequirements {
				monthly_volume: request.monthly_volume,
				primary_size: request.primary_size,
				priority: request.priority,
				max_lease_price: request.max_lease_price,
				preferred_term_months: request.preferred_term_months,
			},
			lease_options,
			terms: QuoteTerms {
				valid_until: now + Duration::days(self.validity_days),
				delivery_time,
				installation_time,
				payment_terms: "Quarterly in advance".to_string(),
				cancellation_policy: "30 days written notice".to_string(),
			},
			product_summary: ProductSummary {
				manufacturer: product.manufacturer.clone(),
				model: product.model.clone(),
				speed: product.speed,
				features: product.features.clone(),
				paper_sizes: product.paper_sizes.clone(),
				volume_range: product.volume_range,
			},
			status: QuoteStatus::Generated,
			customer_actions: Vec::new(),
			decision_details: None,
			metrics: QuoteMetrics::default(),
			created_order: None,
			integrity_checksum: None,
			metadata: QuoteMetadata {
				clamped_scores: clamped,
				notes: Vec::new(),
			},
			created_at: now,
		};

		// A quote without a checksum is still a valid offer; verification is
		// simply unavailable for it
		match self.integrity.generate_checksum(&quote.to_integrity_payload()) {
			Ok(checksum) => quote.integrity_checksum = Some(checksum),
			Err(e) => warn!(
				quote_id = %quote.quote_id,
				"Failed to generate integrity checksum: {e}"
			),
		}

		quote
	}

	/// Persist quotes in ranking order, collecting partial successes.
	///
	/// The deadline is checked between writes only: an in-flight write
	/// always completes, matching the cancellation contract.
	pub async fn persist_quotes(
		&self,
		quotes: Vec<Quote>,
		deadline: Option<Instant>,
	) -> PersistOutcome {
		let mut outcome = PersistOutcome::default();

		for quote in quotes {
			if let Some(deadline) = deadline {
				if Instant::now() >= deadline {
					outcome.deadline_hit = true;
					break;
				}
			}

			let quote_id = quote.quote_id.clone();
			match self.storage.create_quote(quote).await {
				Ok(()) => outcome.created.push(quote_id),
				Err(e) => {
					warn!(quote_id = %quote_id, "Failed to persist quote: {e}");
					outcome.failed.push(quote_id);
				},
			}
		}

		outcome
	}
}

/// Clamp every score to its declared range, recording what was corrected.
/// Upstream producers are fixed at source; this guards persisted documents
/// against regressions.
fn renormalize_score(mut score: MatchScore) -> (MatchScore, Vec<String>) {
	let mut clamped = Vec::new();

	let mut clamp = |name: &str, value: &mut f64, lo: f64, hi: f64| {
		if *value < lo || *value > hi {
			clamped.push(format!("{name}={value:.4}"));
			*value = value.clamp(lo, hi);
		}
	};

	clamp("total", &mut score.total, 0.0, 1.0);
	clamp("volumeMatch", &mut score.breakdown.volume_match, 0.0, 1.0);
	clamp("costEfficiency", &mut score.breakdown.cost_efficiency, -1.0, 1.0);
	clamp("speedMatch", &mut score.breakdown.speed_match, 0.0, 1.0);
	clamp("featureMatch", &mut score.breakdown.feature_match, 0.0, 1.0);
	clamp("reliabilityMatch", &mut score.breakdown.reliability_match, 0.0, 1.0);
	clamp("paperSizeMatch", &mut score.breakdown.paper_size_match, 0.0, 1.0);
	clamp("urgencyMatch", &mut score.breakdown.urgency_match, 0.0, 1.0);

	(score, clamped)
}
