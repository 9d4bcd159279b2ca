//! Suitability scorer
//!
//! Computes the seven-factor score breakdown for a costed candidate and
//! aggregates it under the weight table selected by the buyer's priority.
//! Candidates missing a critical feature are retained with a warning and a
//! halved total so they can still surface when nothing better exists.

use tendor_config::ScoringSettings;
use tendor_types::{
	Candidate, Confidence, MatchScore, NormalizedRequest, PaperSupport, ScoreBreakdown,
	ServiceLevel, VendorProduct, VendorTier,
};

use crate::costs::CostQuote;

/// Features that disqualify a candidate outright when absent
const COLOUR_FEATURE: &str = "Colour Printing";

/// Penalty applied to the aggregate when a critical feature is missing
const CRITICAL_MISS_FACTOR: f64 = 0.5;

/// A candidate with its synthesized costs and suitability score
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
	pub candidate: Candidate,
	pub costs: CostQuote,
	pub score: MatchScore,
}

/// Computes suitability scores for costed candidates
pub struct SuitabilityScorer {
	weights: ScoringSettings,
}

impl SuitabilityScorer {
	pub fn new(weights: ScoringSettings) -> Self {
		Self { weights }
	}

	/// Score one candidate. `costs` must have been synthesized for the same
	/// product and request.
	pub fn score(
		&self,
		candidate: &Candidate,
		request: &NormalizedRequest,
		costs: &CostQuote,
	) -> MatchScore {
		let product = &candidate.product;

		let (feature_match, missing_critical) = feature_match(product, request);
		let breakdown = ScoreBreakdown {
			volume_match: volume_match(product, request.monthly_volume.total),
			cost_efficiency: cost_efficiency(costs),
			speed_match: speed_match(product.speed, request.min_speed),
			feature_match,
			reliability_match: reliability_match(product.service.level, candidate.vendor.tier),
			paper_size_match: paper_size_match(product, request),
			urgency_match: urgency_match(
				product.availability.lead_time_days,
				request.timeframe.max_lead_time_days(),
			),
		};

		let weights = self.weights.weights_for(request.priority);
		// Negative savings contribute nothing to the aggregate; the signed
		// value stays in the breakdown for display
		let mut total = weights.volume_match * breakdown.volume_match
			+ weights.cost_efficiency * breakdown.cost_efficiency.max(0.0)
			+ weights.speed_match * breakdown.speed_match
			+ weights.feature_match * breakdown.feature_match
			+ weights.reliability_match * breakdown.reliability_match
			+ weights.paper_size_match * breakdown.paper_size_match
			+ weights.urgency_match * breakdown.urgency_match;

		let mut warnings = Vec::new();
		for feature in &missing_critical {
			warnings.push(format!("Missing required feature: {feature}"));
			total *= CRITICAL_MISS_FACTOR;
		}
		let total = total.clamp(0.0, 1.0);

		let confidence = confidence(total, &breakdown, !missing_critical.is_empty());
		let mut reasoning = build_reasoning(&breakdown, costs);
		reasoning.extend(costs.notes.iter().cloned());

		MatchScore {
			total,
			confidence,
			breakdown,
			reasoning,
			warnings,
		}
	}
}

/// Triangular volume fit: flat 1.0 inside the rated window, linear decay to
/// zero at 0.6x the minimum and 2.5x the maximum
fn volume_match(product: &VendorProduct, total: u32) -> f64 {
	let total = total as f64;
	let min = product.min_volume as f64;
	let max = product.max_volume as f64;

	if total >= min && total <= max {
		return 1.0;
	}
	if total < min {
		let floor = 0.6 * min;
		if min - floor <= f64::EPSILON {
			return 0.0;
		}
		return ((total - floor) / (min - floor)).clamp(0.0, 1.0);
	}
	let ceiling = 2.5 * max;
	if ceiling - max <= f64::EPSILON {
		return 0.0;
	}
	((ceiling - total) / (ceiling - max)).clamp(0.0, 1.0)
}

/// Full marks at or above the required speed, zero at half of it
fn speed_match(speed: u32, min_speed: u32) -> f64 {
	if min_speed == 0 || speed >= min_speed {
		return 1.0;
	}
	let floor = 0.5 * min_speed as f64;
	((speed as f64 - floor) / floor).clamp(0.0, 1.0)
}

/// Fraction of essential features present. Colour capability is critical:
/// its absence zeroes the sub-score and is reported separately so the
/// aggregate can be penalized.
fn feature_match(product: &VendorProduct, request: &NormalizedRequest) -> (f64, Vec<String>) {
	let required = &request.essential_features;
	if required.is_empty() {
		return (1.0, Vec::new());
	}

	let mut matched = 0usize;
	let mut missing_critical = Vec::new();
	for feature in required {
		let present = if feature.eq_ignore_ascii_case(COLOUR_FEATURE) {
			has_colour_capability(product, request)
		} else {
			product.has_feature(feature)
		};

		if present {
			matched += 1;
		} else if is_critical(feature, request) {
			missing_critical.push(feature.clone());
		}
	}

	if !missing_critical.is_empty() {
		return (0.0, missing_critical);
	}
	(matched as f64 / required.len() as f64, Vec::new())
}

fn is_critical(feature: &str, request: &NormalizedRequest) -> bool {
	feature.eq_ignore_ascii_case(COLOUR_FEATURE) && request.requires_colour()
}

/// Catalog rows are messy: treat a colour rate card as colour capability
/// even when the feature tag is missing
fn has_colour_capability(product: &VendorProduct, request: &NormalizedRequest) -> bool {
	if product.has_feature(COLOUR_FEATURE) {
		return true;
	}
	let size = request.primary_size.unwrap_or(tendor_types::PaperSize::A4);
	product.costs.cpc_rates.colour(size).is_some()
}

/// 1.0 when the primary size is listed, 0.5 via the legacy primary-only
/// fallback, 0 otherwise; no stated size is no constraint
fn paper_size_match(product: &VendorProduct, request: &NormalizedRequest) -> f64 {
	match request.primary_size {
		None => 1.0,
		Some(size) => match product.paper_sizes.support_for(size) {
			PaperSupport::Listed => 1.0,
			PaperSupport::PrimaryFallback => 0.5,
			PaperSupport::Unsupported => 0.0,
		},
	}
}

/// Monthly savings as a fraction of the current monthly cost, clipped to
/// [-1, 1]; zero when there is no current cost to compare against
fn cost_efficiency(costs: &CostQuote) -> f64 {
	let current = costs.savings.current_monthly_cost;
	if current <= 0.0 {
		return 0.0;
	}
	(costs.savings.monthly_amount / current).clamp(-1.0, 1.0)
}

/// Static reliability proxy from the service level, nudged by vendor tier
fn reliability_match(level: ServiceLevel, tier: VendorTier) -> f64 {
	let base: f64 = match level {
		ServiceLevel::Premium => 0.9,
		ServiceLevel::Standard => 0.7,
		ServiceLevel::Basic => 0.5,
	};
	let tier_bonus = match tier {
		VendorTier::Enterprise => 0.1,
		VendorTier::Pro => 0.05,
		VendorTier::Starter => 0.0,
		VendorTier::Free => -0.05,
	};
	(base + tier_bonus).clamp(0.0, 1.0)
}

/// Full marks when the lead time fits the requested window, linear penalty
/// down to zero at twice the window
fn urgency_match(lead_time_days: u32, window_days: u32) -> f64 {
	if lead_time_days <= window_days {
		return 1.0;
	}
	let window = window_days as f64;
	(1.0 - (lead_time_days as f64 - window) / window).clamp(0.0, 1.0)
}

fn confidence(total: f64, breakdown: &ScoreBreakdown, critical_missing: bool) -> Confidence {
	if critical_missing || total < 0.5 {
		return Confidence::Low;
	}
	let strong_factors = [
		breakdown.volume_match,
		breakdown.cost_efficiency.max(0.0),
		breakdown.speed_match,
		breakdown.feature_match,
		breakdown.reliability_match,
		breakdown.paper_size_match,
		breakdown.urgency_match,
	]
	.iter()
	.filter(|v| **v >= 0.7)
	.count();

	if total >= 0.75 && strong_factors >= 5 {
		Confidence::High
	} else {
		Confidence::Medium
	}
}

/// 1-3 short sentences from the strongest and weakest factors plus the
/// savings figure
fn build_reasoning(breakdown: &ScoreBreakdown, costs: &CostQuote) -> Vec<String> {
	let factors = [
		("volume", breakdown.volume_match),
		("cost", breakdown.cost_efficiency.max(0.0)),
		("speed", breakdown.speed_match),
		("features", breakdown.feature_match),
		("reliability", breakdown.reliability_match),
		("paper handling", breakdown.paper_size_match),
		("availability", breakdown.urgency_match),
	];

	let strongest = factors
		.iter()
		.cloned()
		.fold(factors[0], |best, f| if f.1 > best.1 { f } else { best });
	let weakest = factors
		.iter()
		.cloned()
		.fold(factors[0], |worst, f| if f.1 < worst.1 { f } else { worst });

	let mut reasoning = vec![strength_sentence(strongest.0)];
	if weakest.1 < 0.5 && weakest.0 != strongest.0 {
		reasoning.push(weakness_sentence(weakest.0));
	}

	let monthly = costs.savings.monthly_amount;
	if monthly > 0.0 {
		reasoning.push(format!(
			"Projected savings of £{:.2} per month against the current setup.",
			monthly
		));
	} else if monthly < 0.0 {
		reasoning.push(format!(
			"Costs £{:.2} more per month than the current setup.",
			-monthly
		));
	}

	reasoning.truncate(3);
	reasoning
}

fn strength_sentence(factor: &str) -> String {
	match factor {
		"volume" => "The rated volume window closely fits the buyer's monthly usage.".to_string(),
		"cost" => "Strong running-cost advantage over the current setup.".to_string(),
		"speed" => "Print speed comfortably meets the stated requirement.".to_string(),
		"features" => "Covers all of the requested features.".to_string(),
		"reliability" => "High service level with a proven vendor.".to_string(),
		"paper handling" => "Full support for the requested paper sizes.".to_string(),
		_ => "Available well within the requested timeframe.".to_string(),
	}
}

fn weakness_sentence(factor: &str) -> String {
	match factor {
		"volume" => "The buyer's volume sits outside the product's rated window.".to_string(),
		"cost" => "Limited or no running-cost saving over the current setup.".to_string(),
		"speed" => "Print speed falls short of the stated requirement.".to_string(),
		"features" => "Some requested features are not available.".to_string(),
		"reliability" => "Basic service level only.".to_string(),
		"paper handling" => "Requested paper size is not fully supported.".to_string(),
		_ => "Lead time exceeds the requested timeframe.".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tendor_config::CostSettings;
	use tendor_types::{
		CpcRates, LeaseRates, Location, MonthlyVolume, NormalizedCurrentCosts, PaperSize, Priority,
		Timeframe, Vendor, VendorProduct, VendorStatus, VolumeRange,
	};

	use crate::costs::CostSynthesizer;

	fn scorer() -> SuitabilityScorer {
		SuitabilityScorer::new(ScoringSettings::default())
	}

	fn test_request(priority: Priority) -> NormalizedRequest {
		NormalizedRequest {
			request_id: "req-1".to_string(),
			company_name: "Acme Ltd".to_string(),
			submitted_by: "buyer-1".to_string(),
			monthly_volume: MonthlyVolume {
				mono: 2_000,
				colour: 500,
				total: 2_500,
			},
			volume_range: VolumeRange::UpTo6k,
			primary_size: Some(PaperSize::A4),
			additional_sizes: vec![],
			special_paper: None,
			priority,
			essential_features: vec!["Colour Printing".to_string()],
			min_speed: 20,
			max_lease_price: Some(300.0),
			preferred_term_months: 60,
			timeframe: Timeframe::OneToThreeMonths,
			current_costs: NormalizedCurrentCosts {
				mono_rate: 0.012,
				colour_rate: 0.05,
				quarterly_lease: 450.0,
				quarterly_service: 60.0,
			},
			multi_floor: false,
			num_locations: 1,
			location: Location::default(),
		}
	}

	fn test_candidate() -> Candidate {
		let vendor = Vendor::new(
			"vendor-1".to_string(),
			"Apex Copiers".to_string(),
			"sales@apex.example".to_string(),
		)
		.with_status(VendorStatus::Active)
		.with_tier(VendorTier::Pro);

		let product = VendorProduct::new(
			"prod-1".to_string(),
			"vendor-1".to_string(),
			"Canon".to_string(),
			"iR-ADV C3930".to_string(),
			30,
			VolumeRange::UpTo6k,
		)
		.with_volume_window(1_000, 6_000)
		.with_features(vec!["Colour Printing".to_string(), "Duplex".to_string()])
		.with_cpc_rates(CpcRates {
			a4_mono: Some(0.8),
			a4_colour: Some(3.5),
			..Default::default()
		})
		.with_lease_rates(LeaseRates {
			term60: Some(270.0),
			..Default::default()
		});

		Candidate { product, vendor }
	}

	fn score_candidate(candidate: &Candidate, request: &NormalizedRequest) -> MatchScore {
		let costs = CostSynthesizer::new(CostSettings::default()).synthesize(&candidate.product, request);
		scorer().score(candidate, request, &costs)
	}

	#[test]
	fn test_volume_match_triangular() {
		let mut product = test_candidate().product;
		product.min_volume = 2_000;
		product.max_volume = 6_000;

		assert_eq!(volume_match(&product, 3_000), 1.0);
		assert_eq!(volume_match(&product, 2_000), 1.0);
		assert_eq!(volume_match(&product, 6_000), 1.0);

		// Below the window: zero at 0.6 * min
		assert_eq!(volume_match(&product, 1_200), 0.0);
		let halfway = volume_match(&product, 1_600);
		assert!(halfway > 0.0 && halfway < 1.0);

		// Above the window: zero at 2.5 * max
		assert_eq!(volume_match(&product, 15_000), 0.0);
		assert!(volume_match(&product, 8_000) > 0.5);
	}

	#[test]
	fn test_speed_match_penalty() {
		assert_eq!(speed_match(30, 20), 1.0);
		assert_eq!(speed_match(20, 20), 1.0);
		assert_eq!(speed_match(10, 20), 0.0);
		assert!((speed_match(15, 20) - 0.5).abs() < 1e-9);
	}

	#[test]
	fn test_urgency_match_penalty() {
		assert_eq!(urgency_match(14, 30), 1.0);
		assert_eq!(urgency_match(30, 30), 1.0);
		assert!((urgency_match(45, 30) - 0.5).abs() < 1e-9);
		assert_eq!(urgency_match(60, 30), 0.0);
	}

	#[test]
	fn test_reliability_tiers() {
		assert!((reliability_match(ServiceLevel::Premium, VendorTier::Enterprise) - 1.0).abs() < 1e-9);
		assert!((reliability_match(ServiceLevel::Standard, VendorTier::Starter) - 0.7).abs() < 1e-9);
		assert!((reliability_match(ServiceLevel::Basic, VendorTier::Free) - 0.45).abs() < 1e-9);
	}

	#[test]
	fn test_score_bounds_and_confidence() {
		let request = test_request(Priority::Cost);
		let score = score_candidate(&test_candidate(), &request);

		assert!(score.total >= 0.0 && score.total <= 1.0);
		assert!(score.total >= 0.7);
		assert!(matches!(score.confidence, Confidence::High | Confidence::Medium));
		assert!(!score.reasoning.is_empty());
		assert!(score.warnings.is_empty());
	}

	#[test]
	fn test_missing_critical_feature_halves_total() {
		let request = test_request(Priority::Balanced);

		let mut candidate = test_candidate();
		candidate.product.features = vec!["Duplex".to_string()];
		candidate.product.costs.cpc_rates.a4_colour = None;

		let crippled = score_candidate(&candidate, &request);
		let healthy = score_candidate(&test_candidate(), &request);

		assert_eq!(crippled.breakdown.feature_match, 0.0);
		assert!(!crippled.warnings.is_empty());
		assert_eq!(crippled.confidence, Confidence::Low);
		assert!(crippled.total < healthy.total * 0.75);
	}

	#[test]
	fn test_colour_rate_card_counts_as_capability() {
		let request = test_request(Priority::Balanced);

		// No feature tag, but a colour rate card exists
		let mut candidate = test_candidate();
		candidate.product.features = vec!["Duplex".to_string()];

		let score = score_candidate(&candidate, &request);
		assert_eq!(score.breakdown.feature_match, 1.0);
		assert!(score.warnings.is_empty());
	}

	#[test]
	fn test_negative_savings_clamped_in_aggregate_signed_in_breakdown() {
		let mut request = test_request(Priority::Cost);
		// Buyer's current setup is dirt cheap, so any proposal loses money
		request.current_costs = NormalizedCurrentCosts {
			mono_rate: 0.001,
			colour_rate: 0.001,
			quarterly_lease: 0.0,
			quarterly_service: 0.0,
		};

		let score = score_candidate(&test_candidate(), &request);
		assert!(score.breakdown.cost_efficiency < 0.0);

		// The negative factor must not drag the weighted total below the
		// sum of the other contributions
		let weights = ScoringSettings::default();
		let w = weights.weights_for(Priority::Cost);
		let floor = w.volume_match * score.breakdown.volume_match
			+ w.speed_match * score.breakdown.speed_match
			+ w.feature_match * score.breakdown.feature_match
			+ w.reliability_match * score.breakdown.reliability_match
			+ w.paper_size_match * score.breakdown.paper_size_match
			+ w.urgency_match * score.breakdown.urgency_match;
		assert!((score.total - floor).abs() < 1e-9);
	}

	#[test]
	fn test_priority_shifts_ranking() {
		let request_cost = test_request(Priority::Cost);
		let request_speed = test_request(Priority::Speed);

		// Slow but cheap product
		let cheap = test_candidate();

		// Fast but expensive product
		let mut fast = test_candidate();
		fast.product.speed = 75;
		fast.product.lease_rates = Some(LeaseRates {
			term60: Some(700.0),
			..Default::default()
		});

		let cheap_under_cost = score_candidate(&cheap, &request_cost).total;
		let fast_under_cost = score_candidate(&fast, &request_cost).total;
		let cheap_under_speed = score_candidate(&cheap, &request_speed).total;
		let fast_under_speed = score_candidate(&fast, &request_speed).total;

		assert!(cheap_under_cost > fast_under_cost);
		// Under speed priority the gap narrows or inverts
		assert!(fast_under_speed - cheap_under_speed > fast_under_cost - cheap_under_cost);
	}

	#[test]
	fn test_reasoning_mentions_savings() {
		let request = test_request(Priority::Cost);
		let score = score_candidate(&test_candidate(), &request);

		assert!(score.reasoning.len() <= 3);
		assert!(score
			.reasoning
			.iter()
			.any(|sentence| sentence.contains("savings") || sentence.contains("Savings")));
	}
}
