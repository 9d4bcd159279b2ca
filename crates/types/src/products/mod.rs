//! Core VendorProduct domain model — the catalog row and unit of matching

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod query;

pub use errors::{ProductError, ProductValidationError};
pub use query::{Candidate, CandidateQuery};

/// Result type for product operations
pub type ProductResult<T> = Result<T, ProductError>;

/// Paper sizes handled by the marketplace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaperSize {
	A4,
	A3,
	SRA3,
}

/// Discrete monthly page-volume buckets used for coarse catalog indexing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum VolumeRange {
	#[serde(rename = "0-6k")]
	UpTo6k,
	#[serde(rename = "6k-13k")]
	To13k,
	#[serde(rename = "13k-20k")]
	To20k,
	#[serde(rename = "20k-30k")]
	To30k,
	#[serde(rename = "30k-40k")]
	To40k,
	#[serde(rename = "40k-50k")]
	To50k,
	#[serde(rename = "50k+")]
	Over50k,
}

impl VolumeRange {
	/// Derive the bucket containing a total monthly page volume
	pub fn from_total(total: u32) -> Self {
		match total {
			0..=5_999 => Self::UpTo6k,
			6_000..=12_999 => Self::To13k,
			13_000..=19_999 => Self::To20k,
			20_000..=29_999 => Self::To30k,
			30_000..=39_999 => Self::To40k,
			40_000..=49_999 => Self::To50k,
			_ => Self::Over50k,
		}
	}

	/// Default minimum print speed (pages/min) expected for this bucket,
	/// applied when the buyer does not state a requirement
	pub fn default_min_speed(&self) -> u32 {
		match self {
			Self::UpTo6k => 20,
			Self::To13k => 25,
			Self::To20k => 30,
			Self::To30k => 35,
			Self::To40k => 45,
			Self::To50k => 55,
			Self::Over50k => 65,
		}
	}
}

/// Paper-size capability of a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaperSizes {
	/// The size the device is primarily rated for
	pub primary: PaperSize,

	/// All sizes the device can feed. Legacy catalog rows may leave this
	/// empty, in which case `primary` is the only known capability.
	#[serde(default)]
	pub supported: Vec<PaperSize>,
}

impl PaperSizes {
	/// Whether `size` is supported, distinguishing an explicit listing from
	/// the legacy primary-only fallback
	pub fn support_for(&self, size: PaperSize) -> PaperSupport {
		if self.supported.contains(&size) {
			PaperSupport::Listed
		} else if self.supported.is_empty() && self.primary == size {
			PaperSupport::PrimaryFallback
		} else {
			PaperSupport::Unsupported
		}
	}
}

/// How a paper size is supported by a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSupport {
	/// Explicitly present in `supported`
	Listed,
	/// Only implied by `primary` on a legacy record with no `supported` list
	PrimaryFallback,
	Unsupported,
}

/// Cost-per-copy rates in pence per page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CpcRates {
	#[serde(rename = "A4Mono", skip_serializing_if = "Option::is_none")]
	pub a4_mono: Option<f64>,
	#[serde(rename = "A4Colour", skip_serializing_if = "Option::is_none")]
	pub a4_colour: Option<f64>,
	#[serde(rename = "A3Mono", skip_serializing_if = "Option::is_none")]
	pub a3_mono: Option<f64>,
	#[serde(rename = "A3Colour", skip_serializing_if = "Option::is_none")]
	pub a3_colour: Option<f64>,
}

impl CpcRates {
	/// Mono rate for a paper size, in pence per page
	pub fn mono(&self, size: PaperSize) -> Option<f64> {
		match size {
			PaperSize::A3 => self.a3_mono,
			_ => self.a4_mono,
		}
	}

	/// Colour rate for a paper size, in pence per page
	pub fn colour(&self, size: PaperSize) -> Option<f64> {
		match size {
			PaperSize::A3 => self.a3_colour,
			_ => self.a4_colour,
		}
	}

	fn all(&self) -> [Option<f64>; 4] {
		[self.a4_mono, self.a4_colour, self.a3_mono, self.a3_colour]
	}
}

/// Commercial cost breakdown for a product
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductCosts {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub machine_cost: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub installation: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub profit_margin: Option<f64>,
	/// Machine + installation + margin; the basis for lease synthesis
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total_machine_cost: Option<f64>,
	pub cpc_rates: CpcRates,
}

/// Quarterly lease rates per term, in pounds
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaseRates {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub term36: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub term48: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub term60: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub term72: Option<f64>,
}

impl LeaseRates {
	/// Quarterly rate for a term in months, if defined
	pub fn for_term(&self, term_months: u32) -> Option<f64> {
		match term_months {
			36 => self.term36,
			48 => self.term48,
			60 => self.term60,
			72 => self.term72,
			_ => None,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.term36.is_none()
			&& self.term48.is_none()
			&& self.term60.is_none()
			&& self.term72.is_none()
	}
}

/// Service contract level offered with a product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLevel {
	Premium,
	Standard,
	Basic,
}

/// Service terms attached to a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTerms {
	pub level: ServiceLevel,

	/// Engineer response time, e.g. "4 hours" or "next business day"
	#[serde(skip_serializing_if = "Option::is_none")]
	pub response_time: Option<String>,

	/// Quarterly service charge in pounds, when contracted separately
	#[serde(skip_serializing_if = "Option::is_none")]
	pub quarterly_service_cost: Option<f64>,
}

impl Default for ServiceTerms {
	fn default() -> Self {
		Self {
			level: ServiceLevel::Standard,
			response_time: None,
			quarterly_service_cost: None,
		}
	}
}

/// Stock and delivery availability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
	pub in_stock: bool,

	/// Days until the unit can be delivered
	pub lead_time_days: u32,

	/// Days needed on site for installation once delivered
	#[serde(skip_serializing_if = "Option::is_none")]
	pub installation_window_days: Option<u32>,
}

impl Default for Availability {
	fn default() -> Self {
		Self {
			in_stock: true,
			lead_time_days: 14,
			installation_window_days: None,
		}
	}
}

/// Core VendorProduct domain model
///
/// One catalog row per sellable configuration. Read-only from the engine's
/// perspective; ingestion and the vendor CRM own writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VendorProduct {
	/// Unique identifier for the catalog row
	pub product_id: String,

	/// Owning vendor
	pub vendor_id: String,

	pub manufacturer: String,
	pub model: String,

	/// Rated print speed in pages per minute
	pub speed: u32,

	/// Feature tags, e.g. "Colour Printing", "Duplex", "Stapling"
	#[serde(default)]
	pub features: Vec<String>,

	pub paper_sizes: PaperSizes,

	/// Coarse volume bucket this product is indexed under
	pub volume_range: VolumeRange,

	/// Rated monthly page volume window
	pub min_volume: u32,
	pub max_volume: u32,

	/// Outright sale price in pounds, when offered
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sale_price: Option<f64>,

	pub costs: ProductCosts,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub lease_rates: Option<LeaseRates>,

	#[serde(default)]
	pub service: ServiceTerms,

	#[serde(default)]
	pub availability: Availability,

	pub created_at: DateTime<Utc>,
}

impl VendorProduct {
	/// Create a catalog row with defaults suitable for tests and seeding
	pub fn new(
		product_id: String,
		vendor_id: String,
		manufacturer: String,
		model: String,
		speed: u32,
		volume_range: VolumeRange,
	) -> Self {
		Self {
			product_id,
			vendor_id,
			manufacturer,
			model,
			speed,
			features: Vec::new(),
			paper_sizes: PaperSizes {
				primary: PaperSize::A4,
				supported: vec![PaperSize::A4],
			},
			volume_range,
			min_volume: 0,
			max_volume: 6_000,
			sale_price: None,
			costs: ProductCosts::default(),
			lease_rates: None,
			service: ServiceTerms::default(),
			availability: Availability::default(),
			created_at: Utc::now(),
		}
	}

	/// Validate the catalog row invariants
	pub fn validate(&self) -> Result<(), ProductValidationError> {
		if self.min_volume > self.max_volume {
			return Err(ProductValidationError::InvalidVolumeWindow {
				min_volume: self.min_volume,
				max_volume: self.max_volume,
			});
		}
		for rate in self.costs.cpc_rates.all().into_iter().flatten() {
			if rate < 0.0 {
				return Err(ProductValidationError::NegativeCpcRate { rate });
			}
		}
		Ok(())
	}

	pub fn with_volume_window(mut self, min_volume: u32, max_volume: u32) -> Self {
		self.min_volume = min_volume;
		self.max_volume = max_volume;
		self
	}

	pub fn with_features(mut self, features: Vec<String>) -> Self {
		self.features = features;
		self
	}

	pub fn with_paper_sizes(mut self, primary: PaperSize, supported: Vec<PaperSize>) -> Self {
		self.paper_sizes = PaperSizes { primary, supported };
		self
	}

	pub fn with_cpc_rates(mut self, cpc_rates: CpcRates) -> Self {
		self.costs.cpc_rates = cpc_rates;
		self
	}

	pub fn with_lease_rates(mut self, lease_rates: LeaseRates) -> Self {
		self.lease_rates = Some(lease_rates);
		self
	}

	pub fn with_service(mut self, service: ServiceTerms) -> Self {
		self.service = service;
		self
	}

	pub fn with_availability(mut self, availability: Availability) -> Self {
		self.availability = availability;
		self
	}

	/// Case-insensitive feature lookup
	pub fn has_feature(&self, feature: &str) -> bool {
		self.features.iter().any(|f| f.eq_ignore_ascii_case(feature))
	}
}
