//! Core Vendor domain model and business logic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::{VendorError, VendorValidationError};

/// Result type for vendor operations
pub type VendorResult<T> = Result<T, VendorError>;

/// Core Vendor domain model
///
/// A vendor is a supplier registered on the marketplace. Only active vendors
/// may appear in candidate results; the engine never writes vendor records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
	/// Unique identifier for the vendor
	pub vendor_id: String,

	/// Registered company name
	pub company_name: String,

	/// Primary contact email
	pub email: String,

	/// URL-safe slug derived from the company name
	pub slug: String,

	/// Subscription tier
	pub tier: VendorTier,

	/// Current billing state
	pub subscription_status: SubscriptionStatus,

	/// Stripe customer reference, when billing is set up
	#[serde(skip_serializing_if = "Option::is_none")]
	pub stripe_customer_id: Option<String>,

	/// Stripe subscription reference
	#[serde(skip_serializing_if = "Option::is_none")]
	pub stripe_subscription_id: Option<String>,

	/// Operational status
	pub status: VendorStatus,

	/// Locations this vendor covers (postcodes, cities or regions)
	#[serde(default)]
	pub coverage_locations: Vec<String>,

	/// Services offered beyond hardware supply
	#[serde(default)]
	pub services_offered: Vec<String>,

	/// When the vendor was registered
	pub created_at: DateTime<Utc>,
}

/// Vendor subscription tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VendorTier {
	/// Free listing, no managed features
	Free,
	/// Entry-level paid plan
	Starter,
	/// Managed plan with priority support
	Pro,
	/// Custom enterprise agreement
	Enterprise,
}

/// Vendor billing state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
	Active,
	PastDue,
	Cancelled,
	#[serde(rename = "none")]
	NotSubscribed,
}

/// Vendor operational status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
	/// Vendor is live and eligible for matching
	Active,
	/// Awaiting onboarding review
	Pending,
	/// Temporarily removed from matching
	Suspended,
	/// Account closed
	Disabled,
}

impl Vendor {
	/// Create a new vendor with sensible defaults for a fresh registration
	pub fn new(vendor_id: String, company_name: String, email: String) -> Self {
		let slug = slugify(&company_name);
		Self {
			vendor_id,
			company_name,
			email,
			slug,
			tier: VendorTier::Free,
			subscription_status: SubscriptionStatus::NotSubscribed,
			stripe_customer_id: None,
			stripe_subscription_id: None,
			status: VendorStatus::Pending,
			coverage_locations: Vec::new(),
			services_offered: Vec::new(),
			created_at: Utc::now(),
		}
	}

	/// Whether this vendor may appear in candidate results
	pub fn is_active(&self) -> bool {
		self.status == VendorStatus::Active
	}

	pub fn with_status(mut self, status: VendorStatus) -> Self {
		self.status = status;
		self
	}

	pub fn with_tier(mut self, tier: VendorTier) -> Self {
		self.tier = tier;
		self
	}

	pub fn with_coverage(mut self, locations: Vec<String>) -> Self {
		self.coverage_locations = locations;
		self
	}
}

fn slugify(name: &str) -> String {
	let mut slug = String::with_capacity(name.len());
	let mut last_dash = true;
	for c in name.chars() {
		if c.is_ascii_alphanumeric() {
			slug.push(c.to_ascii_lowercase());
			last_dash = false;
		} else if !last_dash {
			slug.push('-');
			last_dash = true;
		}
	}
	while slug.ends_with('-') {
		slug.pop();
	}
	slug
}
