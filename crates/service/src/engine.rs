//! Matching engine orchestrator
//!
//! The public entry point of the quote engine. Sequences normalization,
//! candidate selection, costing, scoring, vendor dedup and quote assembly,
//! handles partial failures, and owns every mutation of the QuoteRequest
//! document. One invocation is the single writer for its request id; the
//! caller serializes concurrent invocations per request.

use std::sync::Arc;
use std::time::Duration;

use tendor_config::Settings;
use tendor_storage::{QuoteStorage, RequestStorage, Storage};
use tendor_types::{
	Candidate, CpcRates, LeaseRates, NormalizedRequest, Quote, QuoteRequest, RequestStatus,
	ServiceLevel, ServiceTerms, Vendor, VendorProduct, VendorStatus,
};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::assembler::QuoteAssembler;
use crate::clock::Clock;
use crate::costs::CostSynthesizer;
use crate::dedup::dedupe_by_vendor;
use crate::integrity::IntegrityTrait;
use crate::normalizer::{NormalizationError, RequirementNormalizer};
use crate::scoring::{ScoredCandidate, SuitabilityScorer};
use crate::selector::{CandidateSelector, SelectorError};

/// Risk factor recorded when no candidate survives selection or persistence
pub const NO_MATCHES_RISK: &str = "No immediate matches found - will retry";

/// Risk factor recorded when the deadline cuts generation short
pub const DEADLINE_RISK: &str = "deadline exceeded";

/// Per-invocation options for quote generation
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
	/// Overall deadline in milliseconds; the configured default applies
	/// when unset
	pub deadline_ms: Option<u64>,
	/// Re-run a matched request, filling only the missing ranking slots
	pub retry: bool,
	/// Produce one synthetic quote without touching the catalog
	pub sample_only: bool,
}

/// Errors surfaced to the caller. Everything else is communicated through
/// the return value and the request's `aiAnalysis.riskFactors`.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("Quote request not found: {request_id}")]
	RequestNotFound { request_id: String },

	#[error("Invalid quote request: {0}")]
	InvalidRequest(#[from] NormalizationError),

	#[error("Catalog unavailable: {0}")]
	CatalogUnavailable(String),

	#[error("Storage error: {0}")]
	Storage(String),
}

impl From<SelectorError> for EngineError {
	fn from(e: SelectorError) -> Self {
		match e {
			SelectorError::CatalogUnavailable(inner) => Self::CatalogUnavailable(inner.to_string()),
		}
	}
}

/// The quote matching and pricing engine
pub struct MatchingEngine {
	storage: Arc<dyn Storage>,
	clock: Arc<dyn Clock>,
	normalizer: RequirementNormalizer,
	selector: CandidateSelector,
	synthesizer: CostSynthesizer,
	scorer: SuitabilityScorer,
	assembler: QuoteAssembler,
	max_quotes: usize,
	default_deadline_ms: u64,
}

impl MatchingEngine {
	pub fn new(
		storage: Arc<dyn Storage>,
		settings: &Settings,
		clock: Arc<dyn Clock>,
		integrity: Arc<dyn IntegrityTrait>,
	) -> Self {
		Self {
			normalizer: RequirementNormalizer::new(settings.cost.clone()),
			selector: CandidateSelector::new(
				Arc::clone(&storage),
				settings.engine.candidate_window.clone(),
			),
			synthesizer: CostSynthesizer::new(settings.cost.clone()),
			scorer: SuitabilityScorer::new(settings.scoring.clone()),
			assembler: QuoteAssembler::new(
				Arc::clone(&storage),
				integrity,
				settings.quote.validity_days,
			),
			max_quotes: settings.engine.max_quotes_per_request,
			default_deadline_ms: settings.engine.deadline_ms,
			storage,
			clock,
		}
	}

	/// Generate up to `engine.max_quotes_per_request` vendor-diverse quotes
	/// for a stored request and return the created quote ids.
	///
	/// Idempotent per request: re-running a `matched` request is a no-op
	/// unless `retry` is set, in which case only missing ranking slots are
	/// filled and existing quotes are preserved.
	pub async fn generate_quotes(
		&self,
		request_id: &str,
		submitted_by: &str,
		opts: GenerateOptions,
	) -> Result<Vec<String>, EngineError> {
		let started = Instant::now();
		let deadline = started + Duration::from_millis(opts.deadline_ms.unwrap_or(self.default_deadline_ms));

		// Stage 1: load
		let mut request = self
			.storage
			.get_request(request_id)
			.await
			.map_err(|e| EngineError::Storage(e.to_string()))?
			.ok_or_else(|| EngineError::RequestNotFound {
				request_id: request_id.to_string(),
			})?;

		if request.submitted_by.is_none() {
			request.submitted_by = Some(submitted_by.to_string());
		}

		// Idempotence: a matched request re-runs only on explicit retry
		if request.status == RequestStatus::Matched && !opts.retry {
			debug!(request_id, "Request already matched; returning existing quotes");
			return Ok(request.quotes.clone());
		}

		// Stage 2: normalize; an unusable submission cancels the request
		let normalized = match self.normalizer.normalize(&request) {
			Ok(normalized) => normalized,
			Err(e) => {
				request.status = RequestStatus::Cancelled;
				request.ai_analysis.risk_factors.push(e.to_string());
				self.update_request(request).await?;
				return Err(EngineError::InvalidRequest(e));
			},
		};

		if opts.sample_only {
			return self.generate_sample(&mut request, &normalized).await;
		}

		request.status = RequestStatus::Processing;
		self.update_request(request.clone()).await?;

		// Stage 3: candidate selection
		let select_started = Instant::now();
		let candidates = self.selector.select(&normalized).await?;
		info!(
			request_id,
			stage = "select",
			duration_ms = select_started.elapsed().as_millis() as u64,
			candidates = candidates.len(),
			"Stage complete"
		);

		if candidates.is_empty() {
			return self.finish_without_matches(request).await;
		}

		// Stages 4-5: cost, score, dedup; pure CPU on a bounded set
		let score_started = Instant::now();
		let scored: Vec<ScoredCandidate> = candidates
			.into_iter()
			.map(|candidate| self.cost_and_score(candidate, &normalized))
			.collect();
		let unique = dedupe_by_vendor(scored);
		info!(
			request_id,
			stage = "score",
			duration_ms = score_started.elapsed().as_millis() as u64,
			unique_vendors = unique.len(),
			"Stage complete"
		);

		if Instant::now() >= deadline {
			warn!(request_id, "Deadline exceeded before assembly");
			request.ai_analysis.risk_factors.push(DEADLINE_RISK.to_string());
			return self.finish_without_matches(request).await;
		}

		// On retry, existing quotes keep their slots and their vendors stay
		// excluded from the new ones
		let existing = if opts.retry {
			let mut existing = self
				.storage
				.get_quotes_by_request(request_id)
				.await
				.map_err(|e| EngineError::Storage(e.to_string()))?;
			existing.sort_by_key(|quote| quote.ranking);
			existing
		} else {
			Vec::new()
		};

		let open_slots = self.max_quotes.saturating_sub(existing.len());
		let eligible: Vec<ScoredCandidate> = unique
			.into_iter()
			.filter(|entry| {
				!existing
					.iter()
					.any(|quote| quote.vendor_id == entry.candidate.vendor.vendor_id)
			})
			.take(open_slots)
			.collect();

		// Stage 6: assemble and persist in ranking order
		let persist_started = Instant::now();
		let now = self.clock.now();
		let taken_ranks: Vec<u32> = existing.iter().map(|quote| quote.ranking).collect();
		let mut next_rank = 1u32;
		let quotes: Vec<Quote> = eligible
			.iter()
			.map(|entry| {
				while taken_ranks.contains(&next_rank) {
					next_rank += 1;
				}
				let quote = self.assembler.build_quote(next_rank, entry, &normalized, now);
				next_rank += 1;
				quote
			})
			.collect();

		let outcome = self.assembler.persist_quotes(quotes, Some(deadline)).await;
		info!(
			request_id,
			stage = "persist",
			duration_ms = persist_started.elapsed().as_millis() as u64,
			created = outcome.created.len(),
			failed = outcome.failed.len(),
			deadline_hit = outcome.deadline_hit,
			"Stage complete"
		);

		// Stage 7: request write-back
		if outcome.deadline_hit {
			request.ai_analysis.risk_factors.push(DEADLINE_RISK.to_string());
		}
		if !outcome.failed.is_empty() {
			warn!(
				request_id,
				failed = outcome.failed.len(),
				"Some quotes failed to persist"
			);
		}

		if outcome.created.is_empty() && existing.is_empty() {
			return self.finish_without_matches(request).await;
		}

		request.quotes.extend(outcome.created.iter().cloned());
		request.status = RequestStatus::Matched;
		request.ai_analysis.processed = true;
		request.ai_analysis.processed_at = Some(now);
		self.update_request(request).await?;

		info!(
			request_id,
			total_duration_ms = started.elapsed().as_millis() as u64,
			created = outcome.created.len(),
			"Quote generation complete"
		);

		Ok(outcome.created)
	}

	fn cost_and_score(&self, candidate: Candidate, request: &NormalizedRequest) -> ScoredCandidate {
		let costs = self.synthesizer.synthesize(&candidate.product, request);
		let score = self.scorer.score(&candidate, request, &costs);
		ScoredCandidate {
			candidate,
			costs,
			score,
		}
	}

	/// Terminal path for runs that produced nothing new: the request stays
	/// `pending` so a later run can retry it. A retry that already holds
	/// quotes from an earlier run stays `matched`.
	async fn finish_without_matches(
		&self,
		mut request: QuoteRequest,
	) -> Result<Vec<String>, EngineError> {
		if !request.ai_analysis.risk_factors.iter().any(|r| r == NO_MATCHES_RISK) {
			request.ai_analysis.risk_factors.push(NO_MATCHES_RISK.to_string());
		}
		request.status = if request.quotes.is_empty() {
			RequestStatus::Pending
		} else {
			RequestStatus::Matched
		};
		request.ai_analysis.processed = true;
		request.ai_analysis.processed_at = Some(self.clock.now());
		self.update_request(request).await?;
		Ok(Vec::new())
	}

	/// Integration-test path: one synthetic quote, no catalog reads
	async fn generate_sample(
		&self,
		request: &mut QuoteRequest,
		normalized: &NormalizedRequest,
	) -> Result<Vec<String>, EngineError> {
		let candidate = sample_candidate();
		let scored = self.cost_and_score(candidate, normalized);
		let quote = self
			.assembler
			.build_quote(1, &scored, normalized, self.clock.now());

		let outcome = self.assembler.persist_quotes(vec![quote], None).await;
		if outcome.created.is_empty() {
			return self.finish_without_matches(request.clone()).await;
		}

		request.quotes.extend(outcome.created.iter().cloned());
		request.status = RequestStatus::Matched;
		request.ai_analysis.processed = true;
		request.ai_analysis.processed_at = Some(self.clock.now());
		self.update_request(request.clone()).await?;

		Ok(outcome.created)
	}

	async fn update_request(&self, request: QuoteRequest) -> Result<(), EngineError> {
		self.storage.update_request(request).await.map_err(|e| {
			error!("Failed to update quote request: {e}");
			EngineError::Storage(e.to_string())
		})
	}
}

/// Synthetic candidate used by `sample_only` runs
fn sample_candidate() -> Candidate {
	let vendor = Vendor::new(
		"sample-vendor".to_string(),
		"Sample Vendor".to_string(),
		"sample@tendor.example".to_string(),
	)
	.with_status(VendorStatus::Active);

	let product = VendorProduct::new(
		"sample-product".to_string(),
		"sample-vendor".to_string(),
		"Tendor".to_string(),
		"Sample MFP 30".to_string(),
		30,
		tendor_types::VolumeRange::UpTo6k,
	)
	.with_volume_window(0, 6_000)
	.with_features(vec!["Colour Printing".to_string(), "Duplex".to_string()])
	.with_cpc_rates(CpcRates {
		a4_mono: Some(0.8),
		a4_colour: Some(3.5),
		a3_mono: Some(1.1),
		a3_colour: Some(4.2),
	})
	.with_lease_rates(LeaseRates {
		term36: Some(340.0),
		term48: Some(300.0),
		term60: Some(270.0),
		term72: Some(250.0),
	})
	.with_service(ServiceTerms {
		level: ServiceLevel::Standard,
		response_time: Some("8 hours".to_string()),
		quarterly_service_cost: Some(75.0),
	});

	Candidate { product, vendor }
}
