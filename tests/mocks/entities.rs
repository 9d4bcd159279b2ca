//! Scenario catalogs and requests for end-to-end tests

use tendor_engine::mocks::MockEntities;
use tendor_engine::types::{
	Budget, CpcRates, CurrentCosts, CurrentSetup, FlexibleTerm, LeaseRates, PaperSize, Priority,
	QuoteRequest, Requirements, Urgency, Vendor, VendorProduct, VolumeRange,
};

/// Three distinct vendors, three A4 products in the 0-6k bucket with a
/// clear cheapest option
pub fn small_office_catalog() -> (Vec<Vendor>, Vec<VendorProduct>) {
	let vendors = vec![
		MockEntities::vendor("v-apex", "Apex Copiers"),
		MockEntities::vendor("v-brite", "Brite Print Solutions"),
		MockEntities::vendor("v-core", "Core Office Systems"),
	];

	let cheapest = MockEntities::small_office_product("p-apex-1", "v-apex", "iR-ADV C3930");

	let mid = MockEntities::small_office_product("p-brite-1", "v-brite", "bizhub C3350")
		.with_cpc_rates(CpcRates {
			a4_mono: Some(1.0),
			a4_colour: Some(4.0),
			..Default::default()
		})
		.with_lease_rates(LeaseRates {
			term60: Some(300.0),
			..Default::default()
		});

	let dearest = MockEntities::small_office_product("p-core-1", "v-core", "MX-C358F")
		.with_cpc_rates(CpcRates {
			a4_mono: Some(1.1),
			a4_colour: Some(4.5),
			..Default::default()
		})
		.with_lease_rates(LeaseRates {
			term60: Some(330.0),
			..Default::default()
		});

	(vendors, vec![cheapest, mid, dearest])
}

/// High-volume A3 catalog: two fast production devices, one slow device,
/// and a small-office product that must not match 40k pages/month
pub fn production_catalog() -> (Vec<Vendor>, Vec<VendorProduct>) {
	let vendors = vec![
		MockEntities::vendor("v-apex", "Apex Copiers"),
		MockEntities::vendor("v-brite", "Brite Print Solutions"),
		MockEntities::vendor("v-core", "Core Office Systems"),
		MockEntities::vendor("v-dyno", "Dyno Digital"),
	];

	let products = vec![
		MockEntities::production_product("p-apex-pro", "v-apex", 75),
		MockEntities::production_product("p-brite-pro", "v-brite", 60),
		MockEntities::production_product("p-core-pro", "v-core", 45),
		MockEntities::small_office_product("p-dyno-small", "v-dyno", "C3256i"),
	];

	(vendors, products)
}

/// Five products across only two vendors (three from the first, two from
/// the second), with the first vendor's best product unambiguous
pub fn duplicate_vendor_catalog() -> (Vec<Vendor>, Vec<VendorProduct>) {
	let vendors = vec![
		MockEntities::vendor("v-apex", "Apex Copiers"),
		MockEntities::vendor("v-brite", "Brite Print Solutions"),
	];

	let best_apex = MockEntities::small_office_product("p-apex-best", "v-apex", "iR-ADV C3930");
	let worse_apex = MockEntities::small_office_product("p-apex-mid", "v-apex", "iR-ADV C3826")
		.with_cpc_rates(CpcRates {
			a4_mono: Some(1.2),
			a4_colour: Some(4.8),
			..Default::default()
		})
		.with_lease_rates(LeaseRates {
			term60: Some(360.0),
			..Default::default()
		});
	let worst_apex = MockEntities::small_office_product("p-apex-old", "v-apex", "iR C1533")
		.with_cpc_rates(CpcRates {
			a4_mono: Some(1.5),
			a4_colour: Some(5.5),
			..Default::default()
		})
		.with_lease_rates(LeaseRates {
			term60: Some(400.0),
			..Default::default()
		});

	let brite_a = MockEntities::small_office_product("p-brite-a", "v-brite", "bizhub C3350");
	let brite_b = MockEntities::small_office_product("p-brite-b", "v-brite", "bizhub C4050")
		.with_cpc_rates(CpcRates {
			a4_mono: Some(1.3),
			a4_colour: Some(5.0),
			..Default::default()
		})
		.with_lease_rates(LeaseRates {
			term60: Some(380.0),
			..Default::default()
		});

	(
		vendors,
		vec![best_apex, worse_apex, worst_apex, brite_a, brite_b],
	)
}

/// Scenario A request: small office, cost priority, savings expected
pub fn small_office_request(request_id: &str) -> QuoteRequest {
	MockEntities::small_office_request(request_id)
}

/// Scenario B request: high-volume A3, speed priority, 55 ppm floor
pub fn production_request(request_id: &str) -> QuoteRequest {
	let mut request = QuoteRequest::new(request_id.to_string(), "buyer-2".to_string())
		.with_company_name("Northgate Print Room")
		.with_volume(25_000, 15_000)
		.with_paper(PaperSize::A3)
		.with_priority(Priority::Speed);

	request.requirements = Some(Requirements {
		priority: Some(Priority::Speed),
		essential_features: vec!["Colour Printing".to_string()],
		min_speed: Some(55),
	});
	request.budget = Some(Budget {
		max_lease_price: Some(1_500.0),
		preferred_term: Some(FlexibleTerm::Text("60 months".to_string())),
	});
	request.current_setup = Some(CurrentSetup {
		current_costs: Some(CurrentCosts {
			mono_rate: Some(1.0),
			colour_rate: Some(6.0),
			quarterly_lease_cost: Some(3_600.0),
			quarterly_service: Some(450.0),
		}),
		contract_end_date: None,
	});
	request.urgency = Some(Urgency { timeframe: None });
	request
}

/// Scenario C request: SRA3 primary size that no catalog row supports
pub fn sra3_request(request_id: &str) -> QuoteRequest {
	QuoteRequest::new(request_id.to_string(), "buyer-3".to_string())
		.with_company_name("Folio Press")
		.with_volume(4_000, 1_000)
		.with_paper(PaperSize::SRA3)
}

/// A catalog row indexed one bucket up, for volume-window overlap checks
pub fn mid_volume_probe(product_id: &str, vendor_id: &str) -> VendorProduct {
	let mut product = MockEntities::small_office_product(product_id, vendor_id, "Versant 4100")
		.with_volume_window(8_000, 13_000);
	product.volume_range = VolumeRange::To13k;
	product
}
