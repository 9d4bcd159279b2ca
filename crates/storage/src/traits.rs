//! Storage traits for pluggable storage implementations

// Re-export the storage traits from the types crate
pub use tendor_types::storage::{
	OrderStorageTrait as OrderStorage, ProductStorageTrait as ProductStorage,
	QuoteStorageTrait as QuoteStorage, RequestStorageTrait as RequestStorage, StorageError,
	StorageResult, StorageStats, StorageTrait as Storage, VendorStorageTrait as VendorStorage,
};
