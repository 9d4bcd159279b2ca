//! Storage traits for pluggable storage implementations
//!
//! The engine reads `Vendor` and `VendorProduct`, reads and updates
//! `QuoteRequest`, and inserts `Quote`. Everything else on these traits
//! exists for the surrounding system (seeding, acceptance, sweepers) and
//! for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::orders::Order;
use crate::products::{Candidate, CandidateQuery, VendorProduct};
use crate::quotes::Quote;
use crate::requests::QuoteRequest;
use crate::storage::errors::StorageError;
use crate::vendors::Vendor;

pub type StorageResult<T> = Result<T, StorageError>;

/// Statistics about storage usage
#[derive(Debug, Clone)]
pub struct StorageStats {
	pub total_vendors: usize,
	pub total_products: usize,
	pub total_requests: usize,
	pub total_quotes: usize,
	/// Quotes still awaiting a buyer decision
	pub open_quotes: usize,
	pub total_orders: usize,
}

/// Trait for vendor storage operations
#[async_trait]
pub trait VendorStorageTrait: Send + Sync {
	/// Add a new vendor to storage
	async fn create_vendor(&self, vendor: Vendor) -> StorageResult<()>;

	/// Get a vendor by ID
	async fn get_vendor(&self, vendor_id: &str) -> StorageResult<Option<Vendor>>;

	/// Get vendors with status `active` only
	async fn get_active_vendors(&self) -> StorageResult<Vec<Vendor>>;

	/// Get vendor count
	async fn vendor_count(&self) -> StorageResult<usize>;
}

/// Trait for catalog product storage operations
#[async_trait]
pub trait ProductStorageTrait: Send + Sync {
	/// Add a new catalog row to storage
	async fn create_product(&self, product: VendorProduct) -> StorageResult<()>;

	/// Get a product by ID
	async fn get_product(&self, product_id: &str) -> StorageResult<Option<VendorProduct>>;

	/// Evaluate the candidate filter against the catalog.
	///
	/// Implementations must only return products whose owning vendor is
	/// active, pairing each row with that vendor.
	async fn find_candidates(&self, query: &CandidateQuery) -> StorageResult<Vec<Candidate>>;

	/// Get product count
	async fn product_count(&self) -> StorageResult<usize>;
}

/// Trait for quote request storage operations
#[async_trait]
pub trait RequestStorageTrait: Send + Sync {
	/// Add a new quote request to storage
	async fn create_request(&self, request: QuoteRequest) -> StorageResult<()>;

	/// Get a quote request by ID
	async fn get_request(&self, request_id: &str) -> StorageResult<Option<QuoteRequest>>;

	/// Replace an existing quote request document
	async fn update_request(&self, request: QuoteRequest) -> StorageResult<()>;

	/// Get request count
	async fn request_count(&self) -> StorageResult<usize>;
}

/// Trait for quote storage operations
#[async_trait]
pub trait QuoteStorageTrait: Send + Sync {
	/// Insert a new quote. The engine only ever inserts; lifecycle updates
	/// go through `update_quote`.
	async fn create_quote(&self, quote: Quote) -> StorageResult<()>;

	/// Get a quote by ID
	async fn get_quote(&self, quote_id: &str) -> StorageResult<Option<Quote>>;

	/// Replace an existing quote document (lifecycle fields only by
	/// convention; quotes are immutable offers otherwise)
	async fn update_quote(&self, quote: Quote) -> StorageResult<()>;

	/// Get all quotes generated for a request
	async fn get_quotes_by_request(&self, request_id: &str) -> StorageResult<Vec<Quote>>;

	/// Get all quotes offered by a vendor
	async fn get_quotes_by_vendor(&self, vendor_id: &str) -> StorageResult<Vec<Quote>>;

	/// Transition open quotes past their validity to `expired`; returns the
	/// number of quotes swept. Documents are durable offers: marked, never
	/// deleted.
	async fn mark_expired_quotes(&self, now: DateTime<Utc>) -> StorageResult<usize>;

	/// Get quote statistics as (total, open)
	async fn quote_stats(&self) -> StorageResult<(usize, usize)>;
}

/// Trait for order storage operations
#[async_trait]
pub trait OrderStorageTrait: Send + Sync {
	/// Add a new order to storage
	async fn create_order(&self, order: Order) -> StorageResult<()>;

	/// Get an order by ID
	async fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>>;

	/// Get all orders placed by a buyer
	async fn get_orders_by_buyer(&self, buyer_id: &str) -> StorageResult<Vec<Order>>;

	/// Get order count
	async fn order_count(&self) -> StorageResult<usize>;
}

/// Main storage trait that combines all storage operations
#[async_trait]
pub trait StorageTrait:
	VendorStorageTrait + ProductStorageTrait + RequestStorageTrait + QuoteStorageTrait + OrderStorageTrait
{
	/// Health check for the storage system
	async fn health_check(&self) -> StorageResult<bool>;

	/// Get overall storage statistics
	async fn stats(&self) -> StorageResult<StorageStats>;

	/// Close the storage connection
	async fn close(&self) -> StorageResult<()>;
}
