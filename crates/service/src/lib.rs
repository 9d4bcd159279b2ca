//! Tendor Service
//!
//! Core logic for the TendorAI quote matching and pricing engine: the
//! requirement normalizer, candidate selector, suitability scorer, cost
//! synthesizer, vendor deduplicator, quote assembler and the orchestrator,
//! plus the quote-acceptance order service.

pub mod assembler;
pub mod clock;
pub mod costs;
pub mod dedup;
pub mod engine;
pub mod integrity;
pub mod normalizer;
pub mod order;
pub mod scoring;
pub mod selector;

pub use assembler::{PersistOutcome, QuoteAssembler};
pub use clock::{Clock, FixedClock, SystemClock};
pub use costs::{round_currency, CostQuote, CostSynthesizer};
pub use dedup::dedupe_by_vendor;
pub use engine::{EngineError, GenerateOptions, MatchingEngine, DEADLINE_RISK, NO_MATCHES_RISK};
pub use integrity::{IntegrityError, IntegrityService, IntegrityTrait};
pub use normalizer::{NormalizationError, RequirementNormalizer};
pub use order::{OrderService, OrderServiceError};
pub use scoring::{ScoredCandidate, SuitabilityScorer};
pub use selector::{CandidateSelector, SelectorError};
