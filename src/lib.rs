//! Tendor Engine Library
//!
//! The AI-assisted quote matching and pricing engine behind the TendorAI
//! procurement marketplace: it converts a normalized buyer requirement into
//! a ranked, vendor-diverse short-list of fully costed quotes.
//!
//! The engine is a library-level component. Its only boundaries are the
//! pluggable storage traits and an injected clock; HTTP routing, auth,
//! billing and email live in the surrounding system.

use std::sync::Arc;

use tracing::{info, warn};

// Core domain types - the most commonly used types
pub use tendor_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	Candidate,
	CandidateQuery,
	MatchScore,
	NormalizedRequest,
	Order,
	OrderStatus,
	OrderType,
	PaperSize,
	Priority,
	// Primary domain entities
	Quote,
	QuoteRequest,
	QuoteStatus,
	RequestStatus,
	Timeframe,
	Vendor,
	VendorProduct,
	VendorStatus,
	VendorTier,
	VolumeRange,
};

// Service layer
pub use tendor_service::{
	Clock, EngineError, FixedClock, GenerateOptions, IntegrityService, IntegrityTrait,
	MatchingEngine, NormalizationError, OrderService, OrderServiceError, SystemClock,
	DEADLINE_RISK, NO_MATCHES_RISK,
};

// Storage layer
pub use tendor_storage::{
	MemoryStore, OrderStorage, ProductStorage, QuoteStorage, RequestStorage, Storage, StorageError,
	StorageResult, StorageStats, VendorStorage,
};

// Config
pub use tendor_config::{load_config, ConfigValidationError, LogFormat, Settings};

// Module aliases for advanced usage
pub mod types {
	pub use tendor_types::*;
}

pub mod storage {
	pub use tendor_storage::*;
}

pub mod config {
	pub use tendor_config::*;
}

pub mod service {
	pub use tendor_service::*;
}

pub mod mocks;

/// Development fallback for the integrity secret; production deployments
/// must configure their own
const DEV_INTEGRITY_SECRET: &str = "tendor-dev-integrity-secret";

/// The wired engine and its companion services
#[derive(Clone)]
pub struct EngineState {
	pub engine: Arc<MatchingEngine>,
	pub orders: OrderService,
	pub storage: Arc<dyn Storage>,
	pub settings: Settings,
}

/// Builder pattern for configuring the engine
pub struct EngineBuilder<S = MemoryStore>
where
	S: Storage + Clone + 'static,
{
	settings: Option<Settings>,
	storage: S,
	clock: Arc<dyn Clock>,
	integrity_secret: Option<String>,
	vendors: Vec<Vendor>,
	products: Vec<VendorProduct>,
	requests: Vec<QuoteRequest>,
}

impl Default for EngineBuilder<MemoryStore> {
	fn default() -> Self {
		Self::new()
	}
}

impl EngineBuilder<MemoryStore> {
	/// Create a new engine builder with default memory storage
	pub fn new() -> Self {
		Self::with_storage(MemoryStore::new())
	}
}

impl<S> EngineBuilder<S>
where
	S: Storage + Clone + 'static,
{
	/// Create a new engine builder with the provided storage
	pub fn with_storage(storage: S) -> Self {
		Self {
			settings: None,
			storage,
			clock: Arc::new(SystemClock),
			integrity_secret: None,
			vendors: Vec::new(),
			products: Vec::new(),
			requests: Vec::new(),
		}
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Inject a clock (tests pin time through this)
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}

	/// Set the integrity checksum secret
	pub fn with_integrity_secret(mut self, secret: impl Into<String>) -> Self {
		self.integrity_secret = Some(secret.into());
		self
	}

	/// Seed a vendor into storage at build time
	pub fn with_vendor(mut self, vendor: Vendor) -> Self {
		self.vendors.push(vendor);
		self
	}

	/// Seed a catalog row into storage at build time
	pub fn with_product(mut self, product: VendorProduct) -> Self {
		self.products.push(product);
		self
	}

	/// Seed a quote request into storage at build time
	pub fn with_request(mut self, request: QuoteRequest) -> Self {
		self.requests.push(request);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Validate configuration, seed storage and wire the services.
	///
	/// Configuration errors are fatal here: the engine never starts with an
	/// inconsistent weight table or pricing default.
	pub async fn build(mut self) -> Result<EngineState, Box<dyn std::error::Error>> {
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config().unwrap_or_default(),
		};
		settings.validate()?;

		self.upsert_seeds().await?;

		let integrity_secret = self.integrity_secret.take().unwrap_or_else(|| {
			warn!("No integrity secret configured; using the development fallback");
			DEV_INTEGRITY_SECRET.to_string()
		});
		let integrity: Arc<dyn IntegrityTrait> = Arc::new(IntegrityService::new(integrity_secret));

		let storage: Arc<dyn Storage> = Arc::new(self.storage.clone());
		let engine = Arc::new(MatchingEngine::new(
			Arc::clone(&storage),
			&settings,
			Arc::clone(&self.clock),
			Arc::clone(&integrity),
		));
		let orders = OrderService::new(
			Arc::clone(&storage),
			Arc::clone(&self.clock),
			Arc::clone(&integrity),
		);

		let stats = storage.stats().await?;
		info!(
			vendors = stats.total_vendors,
			products = stats.total_products,
			"Engine initialized"
		);

		Ok(EngineState {
			engine,
			orders,
			storage,
			settings,
		})
	}

	/// Upsert collected seed entities into storage, failing on any
	/// validation error
	async fn upsert_seeds(&self) -> Result<(), String> {
		let mut errors = Vec::new();

		for vendor in &self.vendors {
			if let Err(e) = self.storage.create_vendor(vendor.clone()).await {
				errors.push(format!("Failed to create vendor '{}': {}", vendor.vendor_id, e));
			}
		}

		for product in &self.products {
			if let Err(e) = product.validate() {
				errors.push(format!(
					"Product '{}' validation failed: {}",
					product.product_id, e
				));
				continue;
			}
			if let Err(e) = self.storage.create_product(product.clone()).await {
				errors.push(format!(
					"Failed to create product '{}': {}",
					product.product_id, e
				));
			}
		}

		for request in &self.requests {
			if let Err(e) = self.storage.create_request(request.clone()).await {
				errors.push(format!(
					"Failed to create request '{}': {}",
					request.request_id, e
				));
			}
		}

		if !errors.is_empty() {
			return Err(format!("Seed errors found:\n{}", errors.join("\n")));
		}
		Ok(())
	}
}

/// Initialize tracing from logging settings. Call once at process start;
/// library consumers that own their subscriber skip this.
pub fn init_tracing(settings: &Settings) {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));

	match settings.logging.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt().pretty().with_env_filter(env_filter);
			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt().compact().with_env_filter(env_filter);
			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
	}

	info!(
		"Logging configuration applied: level={}, format={:?}, structured={}",
		settings.logging.level, settings.logging.format, settings.logging.structured
	);
}
