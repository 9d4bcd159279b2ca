//! Catalog candidate query — the filter contract evaluated against VendorProduct

use serde::{Deserialize, Serialize};

use super::{PaperSize, PaperSupport, VendorProduct, VolumeRange};
use crate::vendors::Vendor;

/// Filter contract for candidate selection, evaluated by the data store.
///
/// A product qualifies when it is in stock, its owning vendor is active, its
/// volume bucket matches the buyer's exactly or its rated window overlaps the
/// tolerance window around the buyer's total, and it supports the requested
/// primary paper size (legacy rows with no `supported` list fall back to
/// `primary`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateQuery {
	/// Buyer's total monthly page volume
	pub total_volume: u32,

	/// Bucket derived from the total
	pub volume_range: VolumeRange,

	/// Requested primary paper size, when stated
	pub primary_size: Option<PaperSize>,

	/// Window tolerance: the product must cover at least
	/// `lower_multiplier * total` and reach down to at most
	/// `upper_multiplier * total`
	pub lower_multiplier: f64,
	pub upper_multiplier: f64,
}

impl CandidateQuery {
	/// Whether a catalog row satisfies the product-side filter
	pub fn matches_product(&self, product: &VendorProduct) -> bool {
		if !product.availability.in_stock {
			return false;
		}

		let total = self.total_volume as f64;
		let bucket_match = product.volume_range == self.volume_range;
		let window_match = (product.min_volume as f64) <= self.upper_multiplier * total
			&& (product.max_volume as f64) >= self.lower_multiplier * total;
		if !bucket_match && !window_match {
			return false;
		}

		if let Some(size) = self.primary_size {
			if product.paper_sizes.support_for(size) == PaperSupport::Unsupported {
				return false;
			}
		}

		true
	}

	/// Full candidate filter, including the owning-vendor status invariant
	pub fn matches(&self, product: &VendorProduct, vendor: &Vendor) -> bool {
		vendor.is_active() && self.matches_product(product)
	}
}

/// A selected catalog row paired with its owning vendor.
///
/// Carrying the vendor here keeps the scoring and dedup stages CPU-pure: no
/// further store reads happen between selection and assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
	pub product: VendorProduct,
	pub vendor: Vendor,
}
