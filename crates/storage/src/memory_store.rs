//! In-memory document store implementation using DashMap

use crate::traits::{
	OrderStorage, ProductStorage, QuoteStorage, RequestStorage, Storage, StorageResult,
	StorageStats, VendorStorage,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tendor_types::{
	Candidate, CandidateQuery, Order, Quote, QuoteRequest, QuoteStatus, Vendor, VendorProduct,
};
use tracing::{debug, info};

/// In-memory store for vendors, products, requests, quotes and orders
#[derive(Clone, Default)]
pub struct MemoryStore {
	pub vendors: Arc<DashMap<String, Vendor>>,
	pub products: Arc<DashMap<String, VendorProduct>>,
	pub requests: Arc<DashMap<String, QuoteRequest>>,
	pub quotes: Arc<DashMap<String, Quote>>,
	pub orders: Arc<DashMap<String, Order>>,
}

impl MemoryStore {
	/// Create a new memory store instance
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of open quotes (awaiting a buyer decision)
	fn open_quote_count(&self) -> usize {
		self.quotes
			.iter()
			.filter(|entry| entry.value().is_awaiting_decision())
			.count()
	}
}

#[async_trait]
impl VendorStorage for MemoryStore {
	async fn create_vendor(&self, vendor: Vendor) -> StorageResult<()> {
		self.vendors.insert(vendor.vendor_id.clone(), vendor);
		Ok(())
	}

	async fn get_vendor(&self, vendor_id: &str) -> StorageResult<Option<Vendor>> {
		Ok(self.vendors.get(vendor_id).map(|v| v.clone()))
	}

	async fn get_active_vendors(&self) -> StorageResult<Vec<Vendor>> {
		let vendors: Vec<Vendor> = self
			.vendors
			.iter()
			.filter_map(|entry| {
				let vendor = entry.value();
				if vendor.is_active() {
					Some(vendor.clone())
				} else {
					None
				}
			})
			.collect();
		Ok(vendors)
	}

	async fn vendor_count(&self) -> StorageResult<usize> {
		Ok(self.vendors.len())
	}
}

#[async_trait]
impl ProductStorage for MemoryStore {
	async fn create_product(&self, product: VendorProduct) -> StorageResult<()> {
		self.products.insert(product.product_id.clone(), product);
		Ok(())
	}

	async fn get_product(&self, product_id: &str) -> StorageResult<Option<VendorProduct>> {
		Ok(self.products.get(product_id).map(|p| p.clone()))
	}

	async fn find_candidates(&self, query: &CandidateQuery) -> StorageResult<Vec<Candidate>> {
		let candidates: Vec<Candidate> = self
			.products
			.iter()
			.filter_map(|entry| {
				let product = entry.value();
				let vendor = self.vendors.get(&product.vendor_id)?;
				if query.matches(product, vendor.value()) {
					Some(Candidate {
						product: product.clone(),
						vendor: vendor.clone(),
					})
				} else {
					None
				}
			})
			.collect();

		debug!(
			"Candidate query matched {} of {} catalog rows",
			candidates.len(),
			self.products.len()
		);
		Ok(candidates)
	}

	async fn product_count(&self) -> StorageResult<usize> {
		Ok(self.products.len())
	}
}

#[async_trait]
impl RequestStorage for MemoryStore {
	async fn create_request(&self, request: QuoteRequest) -> StorageResult<()> {
		self.requests.insert(request.request_id.clone(), request);
		Ok(())
	}

	async fn get_request(&self, request_id: &str) -> StorageResult<Option<QuoteRequest>> {
		Ok(self.requests.get(request_id).map(|r| r.clone()))
	}

	async fn update_request(&self, request: QuoteRequest) -> StorageResult<()> {
		self.requests.insert(request.request_id.clone(), request);
		Ok(())
	}

	async fn request_count(&self) -> StorageResult<usize> {
		Ok(self.requests.len())
	}
}

#[async_trait]
impl QuoteStorage for MemoryStore {
	async fn create_quote(&self, quote: Quote) -> StorageResult<()> {
		self.quotes.insert(quote.quote_id.clone(), quote);
		Ok(())
	}

	async fn get_quote(&self, quote_id: &str) -> StorageResult<Option<Quote>> {
		Ok(self.quotes.get(quote_id).map(|q| q.clone()))
	}

	async fn update_quote(&self, quote: Quote) -> StorageResult<()> {
		self.quotes.insert(quote.quote_id.clone(), quote);
		Ok(())
	}

	async fn get_quotes_by_request(&self, request_id: &str) -> StorageResult<Vec<Quote>> {
		let quotes: Vec<Quote> = self
			.quotes
			.iter()
			.filter_map(|entry| {
				let quote = entry.value();
				if quote.request_id == request_id {
					Some(quote.clone())
				} else {
					None
				}
			})
			.collect();
		Ok(quotes)
	}

	async fn get_quotes_by_vendor(&self, vendor_id: &str) -> StorageResult<Vec<Quote>> {
		let quotes: Vec<Quote> = self
			.quotes
			.iter()
			.filter_map(|entry| {
				let quote = entry.value();
				if quote.vendor_id == vendor_id {
					Some(quote.clone())
				} else {
					None
				}
			})
			.collect();
		Ok(quotes)
	}

	async fn mark_expired_quotes(&self, now: DateTime<Utc>) -> StorageResult<usize> {
		let mut swept = 0;

		// Quotes are durable offers: expired ones are marked, never removed
		for mut entry in self.quotes.iter_mut() {
			let quote = entry.value_mut();
			if quote.is_awaiting_decision() && quote.is_expired(now) {
				quote.status = QuoteStatus::Expired;
				swept += 1;
				debug!("Marked quote {} expired", quote.quote_id);
			}
		}

		if swept > 0 {
			info!("Expiry sweep marked {} quotes expired", swept);
		}

		Ok(swept)
	}

	async fn quote_stats(&self) -> StorageResult<(usize, usize)> {
		Ok((self.quotes.len(), self.open_quote_count()))
	}
}

#[async_trait]
impl OrderStorage for MemoryStore {
	async fn create_order(&self, order: Order) -> StorageResult<()> {
		self.orders.insert(order.order_id.clone(), order);
		Ok(())
	}

	async fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>> {
		Ok(self.orders.get(order_id).map(|o| o.clone()))
	}

	async fn get_orders_by_buyer(&self, buyer_id: &str) -> StorageResult<Vec<Order>> {
		let orders: Vec<Order> = self
			.orders
			.iter()
			.filter_map(|entry| {
				let order = entry.value();
				if order.buyer_id == buyer_id {
					Some(order.clone())
				} else {
					None
				}
			})
			.collect();
		Ok(orders)
	}

	async fn order_count(&self) -> StorageResult<usize> {
		Ok(self.orders.len())
	}
}

#[async_trait]
impl Storage for MemoryStore {
	async fn health_check(&self) -> StorageResult<bool> {
		// For in-memory storage, just check that the maps are accessible
		Ok(true)
	}

	async fn stats(&self) -> StorageResult<StorageStats> {
		let (total_quotes, open_quotes) = self.quote_stats().await?;
		Ok(StorageStats {
			total_vendors: self.vendors.len(),
			total_products: self.products.len(),
			total_requests: self.requests.len(),
			total_quotes,
			open_quotes,
			total_orders: self.orders.len(),
		})
	}

	async fn close(&self) -> StorageResult<()> {
		// Nothing to close for the memory store
		Ok(())
	}
}
