//! Configuration settings structures

use serde::{Deserialize, Serialize};
use tendor_types::Priority;
use thiserror::Error;

/// Weight-sum tolerance accepted by validation
const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// Validation errors raised at boot. Any of these is fatal: the engine must
/// not start with an inconsistent scoring or pricing configuration.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
	#[error("Scoring weights for '{priority}' must sum to 1.0, got {sum:.4}")]
	WeightSumMismatch { priority: String, sum: f64 },

	#[error("Scoring weight '{priority}.{weight}' out of range [0, 1]: {value}")]
	WeightOutOfRange {
		priority: String,
		weight: String,
		value: f64,
	},

	#[error("Default CPC rate '{rate}' must be positive, got {value}")]
	InvalidDefaultRate { rate: String, value: f64 },

	#[error("quote.validity_days must be at least 1")]
	InvalidValidityDays,

	#[error("engine.max_quotes_per_request must be at least 1")]
	InvalidMaxQuotes,

	#[error(
		"Candidate window is inverted: lower_multiplier {lower} must be below upper_multiplier {upper}"
	)]
	InvalidCandidateWindow { lower: f64, upper: f64 },
}

/// Main engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub scoring: ScoringSettings,
	pub cost: CostSettings,
	pub quote: QuoteSettings,
	pub engine: EngineSettings,
	pub logging: LoggingSettings,
}

impl Settings {
	/// Validate the whole configuration; fatal at boot on any error
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		self.scoring.validate()?;
		self.cost.validate()?;
		self.quote.validate()?;
		self.engine.validate()?;
		Ok(())
	}
}

/// Suitability scoring configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
	pub weights: WeightTables,
}

impl ScoringSettings {
	/// The weight table applied for a buyer priority
	pub fn weights_for(&self, priority: Priority) -> &WeightSet {
		self.weights.for_priority(priority)
	}

	fn validate(&self) -> Result<(), ConfigValidationError> {
		self.weights.validate()
	}
}

/// Per-priority weight tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTables {
	pub cost: WeightSet,
	pub speed: WeightSet,
	pub quality: WeightSet,
	pub reliability: WeightSet,
	pub balanced: WeightSet,
}

impl WeightTables {
	fn for_priority(&self, priority: Priority) -> &WeightSet {
		match priority {
			Priority::Cost => &self.cost,
			Priority::Speed => &self.speed,
			Priority::Quality => &self.quality,
			Priority::Reliability => &self.reliability,
			Priority::Balanced => &self.balanced,
		}
	}

	fn validate(&self) -> Result<(), ConfigValidationError> {
		for (name, set) in [
			("cost", &self.cost),
			("speed", &self.speed),
			("quality", &self.quality),
			("reliability", &self.reliability),
			("balanced", &self.balanced),
		] {
			set.validate(name)?;
		}
		Ok(())
	}
}

impl Default for WeightTables {
	fn default() -> Self {
		Self {
			cost: WeightSet {
				cost_efficiency: 0.35,
				volume_match: 0.15,
				feature_match: 0.15,
				speed_match: 0.10,
				paper_size_match: 0.10,
				reliability_match: 0.10,
				urgency_match: 0.05,
			},
			speed: WeightSet {
				speed_match: 0.30,
				volume_match: 0.20,
				feature_match: 0.15,
				cost_efficiency: 0.15,
				paper_size_match: 0.10,
				reliability_match: 0.05,
				urgency_match: 0.05,
			},
			quality: WeightSet::quality_first(),
			reliability: WeightSet::quality_first(),
			balanced: WeightSet::uniform(),
		}
	}
}

/// One table of sub-score weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightSet {
	pub volume_match: f64,
	pub cost_efficiency: f64,
	pub speed_match: f64,
	pub feature_match: f64,
	pub reliability_match: f64,
	pub paper_size_match: f64,
	pub urgency_match: f64,
}

impl WeightSet {
	/// Equal weight on all seven factors
	pub fn uniform() -> Self {
		let w = 1.0 / 7.0;
		Self {
			volume_match: w,
			cost_efficiency: w,
			speed_match: w,
			feature_match: w,
			reliability_match: w,
			paper_size_match: w,
			urgency_match: w,
		}
	}

	/// Table shared by the quality and reliability priorities
	fn quality_first() -> Self {
		Self {
			reliability_match: 0.30,
			feature_match: 0.20,
			volume_match: 0.15,
			speed_match: 0.10,
			cost_efficiency: 0.10,
			paper_size_match: 0.10,
			urgency_match: 0.05,
		}
	}

	pub fn sum(&self) -> f64 {
		self.volume_match
			+ self.cost_efficiency
			+ self.speed_match
			+ self.feature_match
			+ self.reliability_match
			+ self.paper_size_match
			+ self.urgency_match
	}

	fn validate(&self, priority: &str) -> Result<(), ConfigValidationError> {
		for (name, value) in [
			("volume_match", self.volume_match),
			("cost_efficiency", self.cost_efficiency),
			("speed_match", self.speed_match),
			("feature_match", self.feature_match),
			("reliability_match", self.reliability_match),
			("paper_size_match", self.paper_size_match),
			("urgency_match", self.urgency_match),
		] {
			if !(0.0..=1.0).contains(&value) {
				return Err(ConfigValidationError::WeightOutOfRange {
					priority: priority.to_string(),
					weight: name.to_string(),
					value,
				});
			}
		}

		let sum = self.sum();
		if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
			return Err(ConfigValidationError::WeightSumMismatch {
				priority: priority.to_string(),
				sum,
			});
		}
		Ok(())
	}
}

impl Default for WeightSet {
	fn default() -> Self {
		Self::uniform()
	}
}

/// Fallback pricing applied when a catalog row or a buyer submission is
/// missing rates. Configuration, not constants: marketplace operations tune
/// these per region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSettings {
	/// Default mono CPC rate in pence per page
	pub default_mono_rate_pence: f64,
	/// Default colour CPC rate in pence per page
	pub default_colour_rate_pence: f64,
}

impl CostSettings {
	/// Default mono rate converted to pounds per page
	pub fn default_mono_rate(&self) -> f64 {
		self.default_mono_rate_pence / 100.0
	}

	/// Default colour rate converted to pounds per page
	pub fn default_colour_rate(&self) -> f64 {
		self.default_colour_rate_pence / 100.0
	}

	fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.default_mono_rate_pence <= 0.0 {
			return Err(ConfigValidationError::InvalidDefaultRate {
				rate: "default_mono_rate_pence".to_string(),
				value: self.default_mono_rate_pence,
			});
		}
		if self.default_colour_rate_pence <= 0.0 {
			return Err(ConfigValidationError::InvalidDefaultRate {
				rate: "default_colour_rate_pence".to_string(),
				value: self.default_colour_rate_pence,
			});
		}
		Ok(())
	}
}

impl Default for CostSettings {
	fn default() -> Self {
		Self {
			default_mono_rate_pence: 1.0,
			default_colour_rate_pence: 8.0,
		}
	}
}

/// Quote document defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
	/// Days a generated quote stays acceptable
	pub validity_days: i64,
}

impl QuoteSettings {
	fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.validity_days < 1 {
			return Err(ConfigValidationError::InvalidValidityDays);
		}
		Ok(())
	}
}

impl Default for QuoteSettings {
	fn default() -> Self {
		Self { validity_days: 30 }
	}
}

/// Orchestrator limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
	/// Size of the short-list returned to the buyer
	pub max_quotes_per_request: usize,
	/// Default generation deadline in milliseconds
	pub deadline_ms: u64,
	pub candidate_window: WindowSettings,
}

impl EngineSettings {
	fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.max_quotes_per_request == 0 {
			return Err(ConfigValidationError::InvalidMaxQuotes);
		}
		self.candidate_window.validate()
	}
}

impl Default for EngineSettings {
	fn default() -> Self {
		Self {
			max_quotes_per_request: 3,
			deadline_ms: 10_000,
			candidate_window: WindowSettings::default(),
		}
	}
}

/// Volume tolerance window for candidate selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
	pub lower_multiplier: f64,
	pub upper_multiplier: f64,
}

impl WindowSettings {
	fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.lower_multiplier <= 0.0 || self.lower_multiplier >= self.upper_multiplier {
			return Err(ConfigValidationError::InvalidCandidateWindow {
				lower: self.lower_multiplier,
				upper: self.upper_multiplier,
			});
		}
		Ok(())
	}
}

impl Default for WindowSettings {
	fn default() -> Self {
		Self {
			lower_multiplier: 0.6,
			upper_multiplier: 2.5,
		}
	}
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_valid() {
		let settings = Settings::default();
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_default_weight_tables_sum_to_one() {
		let tables = WeightTables::default();
		for set in [
			&tables.cost,
			&tables.speed,
			&tables.quality,
			&tables.reliability,
			&tables.balanced,
		] {
			assert!((set.sum() - 1.0).abs() < 1e-9);
		}
	}

	#[test]
	fn test_weights_for_priority() {
		let scoring = ScoringSettings::default();
		assert!((scoring.weights_for(Priority::Cost).cost_efficiency - 0.35).abs() < 1e-9);
		assert!((scoring.weights_for(Priority::Speed).speed_match - 0.30).abs() < 1e-9);
		assert!(
			(scoring.weights_for(Priority::Quality).reliability_match
				- scoring.weights_for(Priority::Reliability).reliability_match)
				.abs() < 1e-9
		);
	}

	#[test]
	fn test_weight_sum_mismatch_rejected() {
		let mut settings = Settings::default();
		settings.scoring.weights.cost.volume_match = 0.5;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::WeightSumMismatch { .. })
		));
	}

	#[test]
	fn test_weight_out_of_range_rejected() {
		let mut settings = Settings::default();
		settings.scoring.weights.balanced.urgency_match = -0.1;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::WeightOutOfRange { .. })
		));
	}

	#[test]
	fn test_default_rate_conversion() {
		let cost = CostSettings::default();
		assert!((cost.default_mono_rate() - 0.01).abs() < 1e-12);
		assert!((cost.default_colour_rate() - 0.08).abs() < 1e-12);
	}

	#[test]
	fn test_inverted_window_rejected() {
		let mut settings = Settings::default();
		settings.engine.candidate_window.lower_multiplier = 3.0;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::InvalidCandidateWindow { .. })
		));
	}

	#[test]
	fn test_zero_max_quotes_rejected() {
		let mut settings = Settings::default();
		settings.engine.max_quotes_per_request = 0;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::InvalidMaxQuotes)
		));
	}
}
