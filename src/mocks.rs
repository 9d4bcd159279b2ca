//! Canned catalog data for examples and tests
//!
//! Builders for vendors, products and requests that exercise the engine
//! without a real catalog behind it.

use tendor_types::{
	Availability, CpcRates, LeaseRates, PaperSize, Priority, QuoteRequest, ServiceLevel,
	ServiceTerms, Vendor, VendorProduct, VendorStatus, VendorTier, VolumeRange,
};

/// Entity builders for examples and tests
pub struct MockEntities;

impl MockEntities {
	/// An active vendor ready to appear in candidate results
	pub fn vendor(vendor_id: &str, company_name: &str) -> Vendor {
		Vendor::new(
			vendor_id.to_string(),
			company_name.to_string(),
			format!("sales@{vendor_id}.example"),
		)
		.with_status(VendorStatus::Active)
		.with_tier(VendorTier::Starter)
	}

	/// A small-office A4 colour MFP in the 0-6k bucket
	pub fn small_office_product(product_id: &str, vendor_id: &str, model: &str) -> VendorProduct {
		VendorProduct::new(
			product_id.to_string(),
			vendor_id.to_string(),
			"Canon".to_string(),
			model.to_string(),
			30,
			VolumeRange::UpTo6k,
		)
		.with_volume_window(500, 6_000)
		.with_features(vec![
			"Colour Printing".to_string(),
			"Duplex".to_string(),
			"Scan to Email".to_string(),
		])
		.with_paper_sizes(PaperSize::A4, vec![PaperSize::A4])
		.with_cpc_rates(CpcRates {
			a4_mono: Some(0.8),
			a4_colour: Some(3.5),
			..Default::default()
		})
		.with_lease_rates(LeaseRates {
			term36: Some(340.0),
			term48: Some(300.0),
			term60: Some(270.0),
			term72: Some(250.0),
		})
		.with_service(ServiceTerms {
			level: ServiceLevel::Standard,
			response_time: Some("8 hours".to_string()),
			quarterly_service_cost: Some(60.0),
		})
	}

	/// A high-volume A3 production device
	pub fn production_product(product_id: &str, vendor_id: &str, speed: u32) -> VendorProduct {
		VendorProduct::new(
			product_id.to_string(),
			vendor_id.to_string(),
			"Ricoh".to_string(),
			format!("Pro C{speed}00"),
			speed,
			VolumeRange::To40k,
		)
		.with_volume_window(25_000, 45_000)
		.with_features(vec![
			"Colour Printing".to_string(),
			"Duplex".to_string(),
			"Booklet Finisher".to_string(),
			"Stapling".to_string(),
		])
		.with_paper_sizes(PaperSize::A3, vec![PaperSize::A4, PaperSize::A3])
		.with_cpc_rates(CpcRates {
			a4_mono: Some(0.6),
			a4_colour: Some(3.0),
			a3_mono: Some(0.9),
			a3_colour: Some(4.0),
		})
		.with_lease_rates(LeaseRates {
			term36: Some(1_450.0),
			term48: Some(1_250.0),
			term60: Some(1_100.0),
			term72: Some(980.0),
		})
		.with_service(ServiceTerms {
			level: ServiceLevel::Premium,
			response_time: Some("4 hours".to_string()),
			quarterly_service_cost: Some(350.0),
		})
		.with_availability(Availability {
			in_stock: true,
			lead_time_days: 21,
			installation_window_days: Some(2),
		})
	}

	/// A small-office buyer request with a cost priority and an expensive
	/// current contract (Scenario A shape)
	pub fn small_office_request(request_id: &str) -> QuoteRequest {
		let mut request = QuoteRequest::new(request_id.to_string(), "buyer-1".to_string())
			.with_company_name("Acme Trading Ltd")
			.with_volume(2_000, 500)
			.with_paper(PaperSize::A4)
			.with_priority(Priority::Cost);

		request.budget = Some(tendor_types::Budget {
			max_lease_price: Some(300.0),
			preferred_term: Some(tendor_types::FlexibleTerm::Months(60)),
		});
		request.current_setup = Some(tendor_types::CurrentSetup {
			current_costs: Some(tendor_types::CurrentCosts {
				mono_rate: Some(1.2),
				colour_rate: Some(5.0),
				quarterly_lease_cost: Some(450.0),
				quarterly_service: Some(60.0),
			}),
			contract_end_date: None,
		});
		request
	}
}
