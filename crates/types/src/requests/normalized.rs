//! Canonical, fully-defaulted requirement consumed by the matching stages
//!
//! Field-name synonyms, missing values and unit quirks all stop at the
//! requirement normalizer; everything downstream sees only this shape.

use serde::{Deserialize, Serialize};

use super::{Location, Timeframe};
use crate::products::{PaperSize, VolumeRange};

/// Matching priority stated by the buyer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
	Cost,
	Speed,
	Quality,
	Reliability,
	#[default]
	Balanced,
}

/// Canonical monthly volume with the derived total
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyVolume {
	pub mono: u32,
	pub colour: u32,
	pub total: u32,
}

/// Buyer's current costs converted to internal units: per-page rates in
/// pounds, contract charges quarterly in pounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCurrentCosts {
	pub mono_rate: f64,
	pub colour_rate: f64,
	pub quarterly_lease: f64,
	pub quarterly_service: f64,
}

/// The canonical buyer requirement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRequest {
	pub request_id: String,
	pub company_name: String,
	pub submitted_by: String,

	pub monthly_volume: MonthlyVolume,

	/// Bucket derived deterministically from the total
	pub volume_range: VolumeRange,

	pub primary_size: Option<PaperSize>,
	pub additional_sizes: Vec<PaperSize>,
	pub special_paper: Option<String>,

	pub priority: Priority,
	pub essential_features: Vec<String>,

	/// Required speed; defaulted from the volume bucket when not stated
	pub min_speed: u32,

	/// Maximum quarterly lease payment, when stated
	pub max_lease_price: Option<f64>,

	/// Preferred lease term in months
	pub preferred_term_months: u32,

	pub timeframe: Timeframe,

	pub current_costs: NormalizedCurrentCosts,

	pub multi_floor: bool,
	pub num_locations: u32,

	pub location: Location,
}

impl NormalizedRequest {
	/// Whether the buyer prints in colour at all
	pub fn requires_colour(&self) -> bool {
		self.monthly_volume.colour > 0
	}

	/// The buyer's current monthly outlay at their actual volumes
	pub fn current_monthly_cost(&self) -> f64 {
		let cpc = self.monthly_volume.mono as f64 * self.current_costs.mono_rate
			+ self.monthly_volume.colour as f64 * self.current_costs.colour_rate;
		cpc + self.current_costs.quarterly_lease / 3.0 + self.current_costs.quarterly_service / 3.0
	}
}
