//! Tendor Types
//!
//! Shared models and traits for the TendorAI quote matching engine.
//! This crate contains all domain models organized by business entity.

pub mod orders;
pub mod products;
pub mod quotes;
pub mod requests;
pub mod storage;
pub mod vendors;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use vendors::{
	SubscriptionStatus, Vendor, VendorError, VendorResult, VendorStatus, VendorTier,
	VendorValidationError,
};

pub use products::{
	Availability, Candidate, CandidateQuery, CpcRates, LeaseRates, PaperSize, PaperSizes,
	PaperSupport, ProductCosts, ProductError, ProductResult, ProductValidationError, ServiceLevel,
	ServiceTerms, VendorProduct, VolumeRange,
};

pub use requests::{
	AiAnalysis, Budget, CurrentCosts, CurrentSetup, FlexibleBool, FlexibleTerm, Location,
	MonthlyVolume, NormalizedCurrentCosts, NormalizedRequest, PaperRequirements, Priority,
	QuoteRequest, RequestError, RequestResult, RequestStatus, Requirements, SubmittedVolume,
	Timeframe, Urgency,
};

pub use quotes::{
	Confidence, CustomerAction, CustomerActionKind, DecisionDetails, LeaseOption, MatchScore,
	ProductSummary, Quote, QuoteCosts, QuoteError, QuoteMetadata, QuoteMetrics, QuoteResult,
	QuoteStatus, QuoteTerms, Savings, ScoreBreakdown, UserRequirements,
};

pub use orders::{Order, OrderError, OrderResult, OrderStatus, OrderType};

pub use storage::{
	OrderStorageTrait, ProductStorageTrait, QuoteStorageTrait, RequestStorageTrait, StorageError,
	StorageResult, StorageStats, StorageTrait, VendorStorageTrait,
};
