//! Requirement normalizer
//!
//! The single adapter between the loose stored submission and the canonical
//! [`NormalizedRequest`]. Field-name synonyms and unit conversions are
//! resolved here and never propagate into the matching stages. Legacy
//! aliases (`multiFloor`/`multipleFloors`, `userId`, Yes/No booleans) are
//! documented on the request model and deprecated at this boundary.

use tendor_config::CostSettings;
use tendor_types::{
	FlexibleBool, Location, MonthlyVolume, NormalizedCurrentCosts, NormalizedRequest, Priority,
	QuoteRequest, Timeframe, VolumeRange,
};
use thiserror::Error;
use tracing::debug;

/// Default lease term in months when the buyer states none
const DEFAULT_PREFERRED_TERM: u32 = 60;

/// Lease terms the marketplace actually writes
const KNOWN_TERMS: [u32; 6] = [12, 24, 36, 48, 60, 72];

/// A submission that cannot be normalized into a matchable requirement
#[derive(Debug, Error)]
pub enum NormalizationError {
	#[error("Missing required field: {field}")]
	MissingField { field: String },

	#[error("Monthly volume is negative: {total}")]
	NegativeVolume { total: i64 },
}

/// Converts stored buyer submissions into canonical requirements
pub struct RequirementNormalizer {
	defaults: CostSettings,
}

impl RequirementNormalizer {
	pub fn new(defaults: CostSettings) -> Self {
		Self { defaults }
	}

	/// Normalize a stored request, filling every optional field with its
	/// documented default
	pub fn normalize(&self, request: &QuoteRequest) -> Result<NormalizedRequest, NormalizationError> {
		let company_name = request
			.company_name
			.as_deref()
			.map(str::trim)
			.filter(|name| !name.is_empty())
			.ok_or_else(|| NormalizationError::MissingField {
				field: "companyName".to_string(),
			})?
			.to_string();

		let volume = request
			.monthly_volume
			.as_ref()
			.filter(|v| v.mono.is_some() || v.colour.is_some() || v.total.is_some())
			.ok_or_else(|| NormalizationError::MissingField {
				field: "monthlyVolume".to_string(),
			})?;

		let mut mono = volume.mono.unwrap_or(0);
		let colour = volume.colour.unwrap_or(0);
		if mono == 0 && colour == 0 {
			// Some forms only capture the total
			mono = volume.total.unwrap_or(0);
		}

		let total = mono + colour;
		if mono < 0 || colour < 0 || total < 0 {
			return Err(NormalizationError::NegativeVolume { total });
		}

		let monthly_volume = MonthlyVolume {
			mono: mono as u32,
			colour: colour as u32,
			total: total as u32,
		};
		let volume_range = VolumeRange::from_total(monthly_volume.total);

		let mut requirements = request.requirements.clone().unwrap_or_default();
		// Older forms submit a Yes/No colour flag instead of a colour page
		// count; coerce it into the feature requirement it expresses
		let legacy_colour = request.colour.as_ref().map(FlexibleBool::as_bool).unwrap_or(false);
		if (legacy_colour || monthly_volume.colour > 0)
			&& !requirements
				.essential_features
				.iter()
				.any(|f| f.eq_ignore_ascii_case("Colour Printing"))
		{
			requirements.essential_features.push("Colour Printing".to_string());
		}
		let min_speed = requirements
			.min_speed
			.unwrap_or_else(|| volume_range.default_min_speed());

		let budget = request.budget.clone().unwrap_or_default();
		let preferred_term_months = budget
			.preferred_term
			.as_ref()
			.and_then(|term| term.months())
			.filter(|months| KNOWN_TERMS.contains(months))
			.unwrap_or(DEFAULT_PREFERRED_TERM);

		let paper = request.paper_requirements.clone().unwrap_or_default();

		let current_costs = request
			.current_setup
			.as_ref()
			.and_then(|setup| setup.current_costs.clone())
			.unwrap_or_default();
		let normalized_costs = NormalizedCurrentCosts {
			// Submitted rates are pence per page; everything downstream
			// works in pounds
			mono_rate: current_costs
				.mono_rate
				.map(|pence| pence / 100.0)
				.unwrap_or_else(|| self.defaults.default_mono_rate()),
			colour_rate: current_costs
				.colour_rate
				.map(|pence| pence / 100.0)
				.unwrap_or_else(|| self.defaults.default_colour_rate()),
			quarterly_lease: current_costs.quarterly_lease_cost.unwrap_or(0.0),
			quarterly_service: current_costs.quarterly_service.unwrap_or(0.0),
		};

		let timeframe = request
			.urgency
			.as_ref()
			.and_then(|u| u.timeframe)
			.unwrap_or(Timeframe::OneToThreeMonths);

		let normalized = NormalizedRequest {
			request_id: request.request_id.clone(),
			company_name,
			submitted_by: request.submitted_by.clone().unwrap_or_default(),
			monthly_volume,
			volume_range,
			primary_size: paper.primary_size,
			additional_sizes: paper.additional_sizes,
			special_paper: paper.special_paper,
			priority: requirements.priority.unwrap_or(Priority::Balanced),
			essential_features: requirements.essential_features,
			min_speed,
			max_lease_price: budget.max_lease_price,
			preferred_term_months,
			timeframe,
			current_costs: normalized_costs,
			multi_floor: request.multi_floor.unwrap_or(false),
			num_locations: request.num_locations.unwrap_or(1).max(1),
			location: request.location.clone().unwrap_or_else(Location::default),
		};

		debug!(
			request_id = %normalized.request_id,
			total = normalized.monthly_volume.total,
			bucket = ?normalized.volume_range,
			min_speed = normalized.min_speed,
			"Normalized quote request"
		);

		Ok(normalized)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tendor_types::{Budget, FlexibleTerm, PaperSize, Requirements, SubmittedVolume};

	fn normalizer() -> RequirementNormalizer {
		RequirementNormalizer::new(CostSettings::default())
	}

	fn base_request() -> QuoteRequest {
		QuoteRequest::new("req-1".to_string(), "buyer-1".to_string())
			.with_company_name("Acme Ltd")
			.with_volume(2_000, 500)
	}

	#[test]
	fn test_missing_company_name_fails() {
		let request = QuoteRequest::new("req-1".to_string(), "buyer-1".to_string())
			.with_volume(2_000, 500);

		let err = normalizer().normalize(&request).unwrap_err();
		assert!(matches!(err, NormalizationError::MissingField { ref field } if field == "companyName"));
	}

	#[test]
	fn test_missing_volume_fails() {
		let request = QuoteRequest::new("req-1".to_string(), "buyer-1".to_string())
			.with_company_name("Acme Ltd");

		let err = normalizer().normalize(&request).unwrap_err();
		assert!(matches!(err, NormalizationError::MissingField { ref field } if field == "monthlyVolume"));
	}

	#[test]
	fn test_negative_volume_fails() {
		let request = base_request().with_volume(-100, 50);
		assert!(matches!(
			normalizer().normalize(&request),
			Err(NormalizationError::NegativeVolume { .. })
		));
	}

	#[test]
	fn test_volume_and_bucket_derivation() {
		let normalized = normalizer().normalize(&base_request()).unwrap();
		assert_eq!(normalized.monthly_volume.total, 2_500);
		assert_eq!(normalized.volume_range, VolumeRange::UpTo6k);
	}

	#[test]
	fn test_total_only_submission() {
		let mut request = base_request();
		request.monthly_volume = Some(SubmittedVolume {
			mono: None,
			colour: None,
			total: Some(8_000),
		});

		let normalized = normalizer().normalize(&request).unwrap();
		assert_eq!(normalized.monthly_volume.mono, 8_000);
		assert_eq!(normalized.monthly_volume.total, 8_000);
		assert_eq!(normalized.volume_range, VolumeRange::To13k);
	}

	#[test]
	fn test_min_speed_defaults_from_bucket() {
		let normalized = normalizer().normalize(&base_request()).unwrap();
		assert_eq!(normalized.min_speed, 20);

		let high_volume = base_request().with_volume(30_000, 5_000);
		let normalized = normalizer().normalize(&high_volume).unwrap();
		assert_eq!(normalized.min_speed, 45);
	}

	#[test]
	fn test_stated_min_speed_wins() {
		let mut request = base_request();
		request.requirements = Some(Requirements {
			min_speed: Some(55),
			..Default::default()
		});

		let normalized = normalizer().normalize(&request).unwrap();
		assert_eq!(normalized.min_speed, 55);
	}

	#[test]
	fn test_preferred_term_parsing_and_default() {
		let mut request = base_request();
		request.budget = Some(Budget {
			preferred_term: Some(FlexibleTerm::Text("48 months".to_string())),
			..Default::default()
		});
		assert_eq!(normalizer().normalize(&request).unwrap().preferred_term_months, 48);

		let normalized = normalizer().normalize(&base_request()).unwrap();
		assert_eq!(normalized.preferred_term_months, 60);

		// Unknown terms fall back rather than propagate
		let mut odd = base_request();
		odd.budget = Some(Budget {
			preferred_term: Some(FlexibleTerm::Months(42)),
			..Default::default()
		});
		assert_eq!(normalizer().normalize(&odd).unwrap().preferred_term_months, 60);
	}

	#[test]
	fn test_rate_conversion_and_defaults() {
		let mut request = base_request();
		request.current_setup = Some(tendor_types::CurrentSetup {
			current_costs: Some(tendor_types::CurrentCosts {
				mono_rate: Some(1.2),
				colour_rate: Some(5.0),
				quarterly_lease_cost: Some(450.0),
				quarterly_service: Some(60.0),
			}),
			contract_end_date: None,
		});

		let normalized = normalizer().normalize(&request).unwrap();
		assert!((normalized.current_costs.mono_rate - 0.012).abs() < 1e-12);
		assert!((normalized.current_costs.colour_rate - 0.05).abs() < 1e-12);

		// Absent rates pick up the configured defaults (1p / 8p per page)
		let defaulted = normalizer().normalize(&base_request()).unwrap();
		assert!((defaulted.current_costs.mono_rate - 0.01).abs() < 1e-12);
		assert!((defaulted.current_costs.colour_rate - 0.08).abs() < 1e-12);
		assert_eq!(defaulted.current_costs.quarterly_lease, 0.0);
	}

	#[test]
	fn test_legacy_colour_flag_becomes_feature_requirement() {
		let mut request = base_request().with_volume(2_000, 0);
		request.colour = Some(tendor_types::FlexibleBool::Text("Yes".to_string()));

		let normalized = normalizer().normalize(&request).unwrap();
		assert!(normalized
			.essential_features
			.iter()
			.any(|f| f == "Colour Printing"));

		let mut mono_only = base_request().with_volume(2_000, 0);
		mono_only.colour = Some(tendor_types::FlexibleBool::Text("No".to_string()));
		let normalized = normalizer().normalize(&mono_only).unwrap();
		assert!(normalized.essential_features.is_empty());
	}

	#[test]
	fn test_paper_and_priority_defaults() {
		let normalized = normalizer().normalize(&base_request()).unwrap();
		assert_eq!(normalized.priority, Priority::Balanced);
		assert_eq!(normalized.primary_size, None);
		assert_eq!(normalized.num_locations, 1);

		let with_paper = base_request().with_paper(PaperSize::A3);
		let normalized = normalizer().normalize(&with_paper).unwrap();
		assert_eq!(normalized.primary_size, Some(PaperSize::A3));
	}
}
