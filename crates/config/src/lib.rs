//! Tendor Configuration
//!
//! Configuration management for the TendorAI matching engine.

pub mod loader;
pub mod settings;

pub use loader::load_config;
pub use settings::{
	ConfigValidationError, CostSettings, EngineSettings, LogFormat, LoggingSettings, QuoteSettings,
	ScoringSettings, Settings, WeightSet, WeightTables, WindowSettings,
};
