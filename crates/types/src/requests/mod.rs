//! Core QuoteRequest domain model — the stored buyer requirement
//!
//! The submission portion is deliberately loose: buyers reach the store
//! through several front-end versions, so fields are optional and legacy
//! aliases are accepted here and nowhere else. The requirement normalizer
//! converts this document into a [`NormalizedRequest`] before any matching
//! logic runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod normalized;

pub use errors::RequestError;
pub use normalized::{MonthlyVolume, NormalizedCurrentCosts, NormalizedRequest, Priority};

use crate::products::PaperSize;

/// Result type for request operations
pub type RequestResult<T> = Result<T, RequestError>;

/// Stored buyer quote request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
	/// Unique identifier for the request
	pub request_id: String,

	/// Buyer's company name; required for matching to proceed
	#[serde(skip_serializing_if = "Option::is_none")]
	pub company_name: Option<String>,

	/// Buyer account id
	#[serde(alias = "userId", skip_serializing_if = "Option::is_none")]
	pub submitted_by: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub monthly_volume: Option<SubmittedVolume>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub paper_requirements: Option<PaperRequirements>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub current_setup: Option<CurrentSetup>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub requirements: Option<Requirements>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub budget: Option<Budget>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub urgency: Option<Urgency>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<Location>,

	/// Whether the buyer's office spans multiple floors
	#[serde(alias = "multipleFloors", skip_serializing_if = "Option::is_none")]
	pub multi_floor: Option<bool>,

	/// Number of office locations being equipped
	#[serde(alias = "numOfficeLocations", skip_serializing_if = "Option::is_none")]
	pub num_locations: Option<u32>,

	/// Legacy colour flag; superseded by `monthlyVolume.colour` but still
	/// submitted by older forms as "Yes"/"No"
	#[serde(skip_serializing_if = "Option::is_none")]
	pub colour: Option<FlexibleBool>,

	/// Lifecycle status, owned by the orchestrator up to `matched`
	#[serde(default)]
	pub status: RequestStatus,

	/// Engine processing diagnostics
	#[serde(default)]
	pub ai_analysis: AiAnalysis,

	/// Back-references to generated quotes
	#[serde(default)]
	pub quotes: Vec<String>,

	pub created_at: DateTime<Utc>,
}

/// Submitted monthly volume figures. Signed so that malformed input can be
/// detected by the normalizer instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedVolume {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mono: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub colour: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total: Option<i64>,
}

/// Paper requirements as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaperRequirements {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub primary_size: Option<PaperSize>,
	#[serde(default)]
	pub additional_sizes: Vec<PaperSize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub special_paper: Option<String>,
}

/// The buyer's current contract, used for savings comparison
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSetup {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub current_costs: Option<CurrentCosts>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contract_end_date: Option<DateTime<Utc>>,
}

/// Current per-page and contract costs. Rates are in pence per page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCosts {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mono_rate: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub colour_rate: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub quarterly_lease_cost: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub quarterly_service: Option<f64>,
}

/// Stated product requirements
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub priority: Option<Priority>,
	#[serde(alias = "required_functions", default)]
	pub essential_features: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_speed: Option<u32>,
}

/// Budget constraints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
	/// Maximum quarterly lease payment in pounds
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_lease_price: Option<f64>,
	/// Preferred lease term, either months ("60") or a label ("60 months")
	#[serde(skip_serializing_if = "Option::is_none")]
	pub preferred_term: Option<FlexibleTerm>,
}

/// Urgency block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Urgency {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeframe: Option<Timeframe>,
}

/// Buyer location
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub postcode: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
}

/// How soon the buyer needs the equipment installed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Timeframe {
	#[serde(rename = "Immediately")]
	Immediately,
	#[serde(rename = "Within 1 month")]
	WithinOneMonth,
	#[serde(rename = "1-3 months")]
	OneToThreeMonths,
	#[serde(rename = "3-6 months")]
	ThreeToSixMonths,
	#[serde(rename = "3+ months")]
	ThreePlusMonths,
}

impl Timeframe {
	/// The widest acceptable lead time, in days
	pub fn max_lead_time_days(&self) -> u32 {
		match self {
			Self::Immediately => 7,
			Self::WithinOneMonth => 30,
			Self::OneToThreeMonths => 90,
			Self::ThreeToSixMonths => 180,
			Self::ThreePlusMonths => 365,
		}
	}
}

/// Boolean submitted either natively or as "Yes"/"No" text by legacy forms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlexibleBool {
	Bool(bool),
	Text(String),
}

impl FlexibleBool {
	pub fn as_bool(&self) -> bool {
		match self {
			Self::Bool(b) => *b,
			Self::Text(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "yes" | "y" | "true"),
		}
	}
}

/// Lease term submitted either as months or as a "<n> months" label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlexibleTerm {
	Months(u32),
	Text(String),
}

impl FlexibleTerm {
	/// Parse to months, when the value is intelligible
	pub fn months(&self) -> Option<u32> {
		match self {
			Self::Months(m) => Some(*m),
			Self::Text(s) => s.trim().split_whitespace().next().and_then(|n| n.parse().ok()),
		}
	}
}

/// Request lifecycle status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
	#[default]
	Pending,
	Processing,
	Matched,
	QuotesSent,
	Completed,
	Cancelled,
}

/// Engine processing diagnostics attached to the request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
	#[serde(default)]
	pub processed: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub processed_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub risk_factors: Vec<String>,
	#[serde(default)]
	pub recommendations: Vec<String>,
}

impl QuoteRequest {
	/// Create an empty request shell for a buyer submission
	pub fn new(request_id: String, submitted_by: String) -> Self {
		Self {
			request_id,
			company_name: None,
			submitted_by: Some(submitted_by),
			monthly_volume: None,
			paper_requirements: None,
			current_setup: None,
			requirements: None,
			budget: None,
			urgency: None,
			location: None,
			multi_floor: None,
			num_locations: None,
			colour: None,
			status: RequestStatus::Pending,
			ai_analysis: AiAnalysis::default(),
			quotes: Vec::new(),
			created_at: Utc::now(),
		}
	}

	pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
		self.company_name = Some(name.into());
		self
	}

	pub fn with_volume(mut self, mono: i64, colour: i64) -> Self {
		self.monthly_volume = Some(SubmittedVolume {
			mono: Some(mono),
			colour: Some(colour),
			total: Some(mono + colour),
		});
		self
	}

	pub fn with_paper(mut self, primary_size: PaperSize) -> Self {
		self.paper_requirements = Some(PaperRequirements {
			primary_size: Some(primary_size),
			..Default::default()
		});
		self
	}

	pub fn with_priority(mut self, priority: Priority) -> Self {
		let requirements = self.requirements.get_or_insert_with(Requirements::default);
		requirements.priority = Some(priority);
		self
	}
}
