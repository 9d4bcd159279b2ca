//! Candidate selector
//!
//! Translates a normalized requirement into the catalog filter and runs it
//! against the store. Ordering is irrelevant at this stage; the scorer and
//! deduplicator decide the short-list.

use std::sync::Arc;

use tendor_config::WindowSettings;
use tendor_storage::{ProductStorage, Storage};
use tendor_types::{Candidate, CandidateQuery, NormalizedRequest, StorageError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SelectorError {
	#[error("Catalog unavailable: {0}")]
	CatalogUnavailable(#[from] StorageError),
}

/// Queries the catalog for products worth scoring
pub struct CandidateSelector {
	storage: Arc<dyn Storage>,
	window: WindowSettings,
}

impl CandidateSelector {
	pub fn new(storage: Arc<dyn Storage>, window: WindowSettings) -> Self {
		Self { storage, window }
	}

	/// Build the filter for a requirement
	pub fn query_for(&self, request: &NormalizedRequest) -> CandidateQuery {
		CandidateQuery {
			total_volume: request.monthly_volume.total,
			volume_range: request.volume_range,
			primary_size: request.primary_size,
			lower_multiplier: self.window.lower_multiplier,
			upper_multiplier: self.window.upper_multiplier,
		}
	}

	/// Fetch the candidate set for a requirement
	pub async fn select(&self, request: &NormalizedRequest) -> Result<Vec<Candidate>, SelectorError> {
		let query = self.query_for(request);
		let candidates = self.storage.find_candidates(&query).await?;

		info!(
			request_id = %request.request_id,
			total_volume = request.monthly_volume.total,
			candidates = candidates.len(),
			"Candidate selection complete"
		);

		Ok(candidates)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tendor_storage::{MemoryStore, ProductStorage, VendorStorage};
	use tendor_types::{
		Location, MonthlyVolume, NormalizedCurrentCosts, PaperSize, Priority, Timeframe, Vendor,
		VendorProduct, VendorStatus, VolumeRange,
	};

	fn test_request(total: u32, size: Option<PaperSize>) -> NormalizedRequest {
		NormalizedRequest {
			request_id: "req-1".to_string(),
			company_name: "Acme Ltd".to_string(),
			submitted_by: "buyer-1".to_string(),
			monthly_volume: MonthlyVolume {
				mono: total,
				colour: 0,
				total,
			},
			volume_range: VolumeRange::from_total(total),
			primary_size: size,
			additional_sizes: vec![],
			special_paper: None,
			priority: Priority::Balanced,
			essential_features: vec![],
			min_speed: 20,
			max_lease_price: None,
			preferred_term_months: 60,
			timeframe: Timeframe::OneToThreeMonths,
			current_costs: NormalizedCurrentCosts {
				mono_rate: 0.01,
				colour_rate: 0.08,
				quarterly_lease: 0.0,
				quarterly_service: 0.0,
			},
			multi_floor: false,
			num_locations: 1,
			location: Location::default(),
		}
	}

	async fn seeded_store() -> Arc<MemoryStore> {
		let store = Arc::new(MemoryStore::new());
		store
			.create_vendor(
				Vendor::new(
					"v1".to_string(),
					"Vendor One".to_string(),
					"one@example.com".to_string(),
				)
				.with_status(VendorStatus::Active),
			)
			.await
			.unwrap();
		store
			.create_product(
				VendorProduct::new(
					"p1".to_string(),
					"v1".to_string(),
					"Ricoh".to_string(),
					"IM C3000".to_string(),
					30,
					VolumeRange::UpTo6k,
				)
				.with_volume_window(0, 6_000),
			)
			.await
			.unwrap();
		store
	}

	#[tokio::test]
	async fn test_select_uses_configured_window() {
		let store = seeded_store().await;
		let selector = CandidateSelector::new(store, WindowSettings::default());

		let query = selector.query_for(&test_request(2_500, None));
		assert!((query.lower_multiplier - 0.6).abs() < 1e-9);
		assert!((query.upper_multiplier - 2.5).abs() < 1e-9);

		let candidates = selector.select(&test_request(2_500, None)).await.unwrap();
		assert_eq!(candidates.len(), 1);
		assert_eq!(candidates[0].product.product_id, "p1");
	}

	#[tokio::test]
	async fn test_select_empty_for_unsupported_size() {
		let store = seeded_store().await;
		let selector = CandidateSelector::new(store, WindowSettings::default());

		let candidates = selector
			.select(&test_request(2_500, Some(PaperSize::SRA3)))
			.await
			.unwrap();
		assert!(candidates.is_empty());
	}
}
