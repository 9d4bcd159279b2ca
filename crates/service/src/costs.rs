//! Cost synthesizer
//!
//! Computes per-page CPC costs, lease options and savings against the
//! buyer's current setup for one candidate product. This stage never fails:
//! missing catalog rates are substituted with the configured defaults and
//! the substitution is noted for the quote's reasoning.

use tendor_config::CostSettings;
use tendor_types::{LeaseOption, NormalizedRequest, PaperSize, Savings, VendorProduct};

/// Lease terms the synthesizer can emit, in months
const LEASE_TERMS: [u32; 4] = [36, 48, 60, 72];

/// Fallback lease term used for the recommendation when the buyer's
/// preferred term is not available
const FALLBACK_TERM: u32 = 60;

/// Service charge fraction applied when a product has no contracted
/// quarterly service cost
const SERVICE_FALLBACK_FRACTION: f64 = 0.10;

/// Round a monetary value to 2 decimals. Applied at the persistence
/// boundary only; intermediate aggregation keeps full precision.
pub fn round_currency(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}

/// Fully-costed view of one candidate, produced before scoring so the
/// cost-efficiency sub-score can use real savings figures
#[derive(Debug, Clone, PartialEq)]
pub struct CostQuote {
	/// Mono rate in pounds per page
	pub mono_rate: f64,
	/// Colour rate in pounds per page
	pub colour_rate: f64,
	pub mono_cpc_cost: f64,
	pub colour_cpc_cost: f64,
	pub total_cpc_cost: f64,
	/// All lease terms offered; exactly one is recommended
	pub lease_options: Vec<LeaseOption>,
	/// Monthly share of the recommended lease option
	pub monthly_lease_cost: f64,
	pub monthly_service_cost: f64,
	pub total_monthly_cost: f64,
	pub savings: Savings,
	/// Default substitutions and synthesis fallbacks applied
	pub notes: Vec<String>,
}

/// Synthesizes quote costs from catalog pricing and the buyer's volumes
pub struct CostSynthesizer {
	defaults: CostSettings,
}

impl CostSynthesizer {
	pub fn new(defaults: CostSettings) -> Self {
		Self { defaults }
	}

	/// Cost one candidate at the buyer's volumes
	pub fn synthesize(&self, product: &VendorProduct, request: &NormalizedRequest) -> CostQuote {
		let mut notes = Vec::new();

		// A3 requirements price at A3 rates; everything else (including
		// SRA3, which has no dedicated rate card) prices at A4
		let size = match request.primary_size {
			Some(PaperSize::A3) => PaperSize::A3,
			_ => PaperSize::A4,
		};

		let mono_rate = match product.costs.cpc_rates.mono(size) {
			Some(pence) => pence / 100.0,
			None => {
				notes.push(format!(
					"Mono CPC rate unavailable for {} {}; using marketplace default",
					product.manufacturer, product.model
				));
				self.defaults.default_mono_rate()
			},
		};
		let colour_rate = match product.costs.cpc_rates.colour(size) {
			Some(pence) => pence / 100.0,
			None => {
				if request.requires_colour() {
					notes.push(format!(
						"Colour CPC rate unavailable for {} {}; using marketplace default",
						product.manufacturer, product.model
					));
				}
				self.defaults.default_colour_rate()
			},
		};

		let mono_cpc_cost = request.monthly_volume.mono as f64 * mono_rate;
		let colour_cpc_cost = request.monthly_volume.colour as f64 * colour_rate;
		let total_cpc_cost = mono_cpc_cost + colour_cpc_cost;

		let lease_options = self.lease_options(product, request, &mut notes);
		let monthly_lease_cost = lease_options
			.iter()
			.find(|option| option.is_recommended)
			.map(|option| option.monthly_payment)
			.unwrap_or(0.0);

		// Contracted quarterly service wins; otherwise service is estimated
		// as a fixed fraction of the pre-service monthly total
		let pre_service_total = total_cpc_cost + monthly_lease_cost;
		let monthly_service_cost = match product.service.quarterly_service_cost {
			Some(quarterly) => quarterly / 3.0,
			None => SERVICE_FALLBACK_FRACTION * pre_service_total,
		};

		let total_monthly_cost = pre_service_total + monthly_service_cost;

		let current_monthly_cost = request.current_monthly_cost();
		let monthly_amount = current_monthly_cost - total_monthly_cost;
		let savings = Savings {
			monthly_amount,
			annual_amount: 12.0 * monthly_amount,
			percentage: if current_monthly_cost > 0.0 {
				(monthly_amount / current_monthly_cost) * 100.0
			} else {
				0.0
			},
			current_monthly_cost,
		};

		CostQuote {
			mono_rate,
			colour_rate,
			mono_cpc_cost,
			colour_cpc_cost,
			total_cpc_cost,
			lease_options,
			monthly_lease_cost,
			monthly_service_cost,
			total_monthly_cost,
			savings,
			notes,
		}
	}

	fn lease_options(
		&self,
		product: &VendorProduct,
		request: &NormalizedRequest,
		notes: &mut Vec<String>,
	) -> Vec<LeaseOption> {
		let mut options: Vec<LeaseOption> = Vec::new();

		match product.lease_rates.as_ref().filter(|rates| !rates.is_empty()) {
			Some(rates) => {
				for term in LEASE_TERMS {
					if let Some(quarterly) = rates.for_term(term) {
						options.push(build_option(term, quarterly, product.costs.profit_margin));
					}
				}
			},
			None => {
				// No rate card: synthesize from the machine cost spread over
				// the term, shaped by per-term pricing factors
				let base = product
					.costs
					.total_machine_cost
					.or(product.costs.machine_cost)
					.or(product.sale_price);
				match base {
					Some(base_cost) if base_cost > 0.0 => {
						notes.push(format!(
							"Lease rates unavailable for {} {}; synthesized from machine cost",
							product.manufacturer, product.model
						));
						for term in LEASE_TERMS {
							let quarters = term as f64 / 3.0;
							let quarterly = base_cost / quarters * term_factor(term);
							options.push(build_option(term, quarterly, product.costs.profit_margin));
						}
					},
					_ => {
						notes.push(format!(
							"No lease pricing available for {} {}",
							product.manufacturer, product.model
						));
					},
				}
			},
		}

		// Exactly one recommendation: the buyer's preferred term when
		// offered, else the fallback term, else the first option
		if !options.is_empty() {
			let recommended_index = options
				.iter()
				.position(|o| o.term_months == request.preferred_term_months)
				.or_else(|| options.iter().position(|o| o.term_months == FALLBACK_TERM))
				.unwrap_or(0);
			options[recommended_index].is_recommended = true;
		}

		options
	}
}

fn build_option(term_months: u32, quarterly_payment: f64, margin: Option<f64>) -> LeaseOption {
	LeaseOption {
		term_months,
		quarterly_payment,
		monthly_payment: quarterly_payment / 3.0,
		total_cost: quarterly_payment * (term_months as f64 / 3.0),
		margin,
		is_recommended: false,
	}
}

/// Per-term pricing factor for synthesized leases: short terms price at a
/// premium, long terms at a discount
fn term_factor(term_months: u32) -> f64 {
	match term_months {
		36 => 1.15,
		48 => 1.00,
		60 => 0.88,
		_ => 0.90,
	}
}
