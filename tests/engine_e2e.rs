//! End-to-end tests for the quote generation pipeline

mod mocks;

use std::collections::HashSet;
use std::sync::Arc;

use tendor_engine::chrono::{Duration, Utc};
use tendor_engine::{
	EngineBuilder, EngineState, FixedClock, GenerateOptions, ProductStorage, Quote, QuoteStatus,
	QuoteStorage, RequestStatus, RequestStorage, Storage, Vendor, VendorProduct, VendorStorage,
	DEADLINE_RISK, NO_MATCHES_RISK,
};

use mocks::entities;

async fn build_state(
	vendors: Vec<Vendor>,
	products: Vec<VendorProduct>,
	request: tendor_engine::QuoteRequest,
) -> EngineState {
	let mut builder = EngineBuilder::new().with_request(request);
	for vendor in vendors {
		builder = builder.with_vendor(vendor);
	}
	for product in products {
		builder = builder.with_product(product);
	}
	builder.build().await.expect("engine should build")
}

async fn quotes_by_ranking(state: &EngineState, ids: &[String]) -> Vec<Quote> {
	let mut quotes = Vec::new();
	for id in ids {
		quotes.push(state.storage.get_quote(id).await.unwrap().unwrap());
	}
	quotes.sort_by_key(|quote| quote.ranking);
	quotes
}

#[tokio::test]
async fn scenario_a_small_office_cost_priority() {
	let (vendors, products) = entities::small_office_catalog();
	let state = build_state(vendors, products, entities::small_office_request("req-a")).await;

	let created = state
		.engine
		.generate_quotes("req-a", "buyer-1", GenerateOptions::default())
		.await
		.unwrap();
	assert_eq!(created.len(), 3);

	let quotes = quotes_by_ranking(&state, &created).await;

	// Ranking 1..3, pairwise-distinct vendors
	assert_eq!(
		quotes.iter().map(|q| q.ranking).collect::<Vec<_>>(),
		vec![1, 2, 3]
	);
	let vendor_ids: HashSet<&str> = quotes.iter().map(|q| q.vendor_id.as_str()).collect();
	assert_eq!(vendor_ids.len(), 3);

	// Descending by total, and the cheapest product wins
	assert!(quotes[0].match_score.total >= quotes[1].match_score.total);
	assert!(quotes[1].match_score.total >= quotes[2].match_score.total);
	assert_eq!(quotes[0].product_id, "p-apex-1");
	assert!(quotes[0].match_score.total >= 0.7);

	// Positive savings for the winner
	assert!(quotes[0].costs.savings.monthly_amount > 0.0);

	// CPC arithmetic: 2000 pages at £0.008, 500 at £0.035
	assert!((quotes[0].costs.mono_cpc_cost - 16.0).abs() < 0.01);
	assert!((quotes[0].costs.colour_cpc_cost - 17.5).abs() < 0.01);
	assert!(
		(quotes[0].costs.total_cpc_cost
			- (quotes[0].costs.mono_cpc_cost + quotes[0].costs.colour_cpc_cost))
			.abs() < 0.01
	);

	// Request advanced to matched with back-references
	let request = state.storage.get_request("req-a").await.unwrap().unwrap();
	assert_eq!(request.status, RequestStatus::Matched);
	assert_eq!(request.quotes, created);
	assert!(request.ai_analysis.processed);
	assert!(request.ai_analysis.processed_at.is_some());
}

#[tokio::test]
async fn scenario_a_lease_and_savings_laws() {
	let (vendors, products) = entities::small_office_catalog();
	let state = build_state(vendors, products, entities::small_office_request("req-a")).await;

	let created = state
		.engine
		.generate_quotes("req-a", "buyer-1", GenerateOptions::default())
		.await
		.unwrap();

	for quote in quotes_by_ranking(&state, &created).await {
		// Score bounds
		assert!(quote.match_score.total >= 0.0 && quote.match_score.total <= 1.0);
		let b = &quote.match_score.breakdown;
		for value in [
			b.volume_match,
			b.speed_match,
			b.feature_match,
			b.reliability_match,
			b.paper_size_match,
			b.urgency_match,
		] {
			assert!((0.0..=1.0).contains(&value));
		}
		assert!((-1.0..=1.0).contains(&b.cost_efficiency));

		// Lease normalization law, one recommended option
		assert_eq!(
			quote.lease_options.iter().filter(|o| o.is_recommended).count(),
			1
		);
		for option in &quote.lease_options {
			assert!((option.monthly_payment - option.quarterly_payment / 3.0).abs() <= 0.01);
			assert!(
				(option.total_cost - option.quarterly_payment * (option.term_months as f64 / 3.0))
					.abs() <= 0.01
			);
		}

		// The recommendation honors the buyer's preferred term
		let recommended = quote.lease_options.iter().find(|o| o.is_recommended).unwrap();
		assert_eq!(recommended.term_months, 60);

		// Savings sign law
		let savings = &quote.costs.savings;
		assert_eq!(
			savings.monthly_amount > 0.0,
			savings.current_monthly_cost > quote.costs.total_monthly_cost
		);
	}
}

#[tokio::test]
async fn scenario_a_validity_window_is_30_days() {
	let now = Utc::now();
	let (vendors, products) = entities::small_office_catalog();

	let mut builder = EngineBuilder::new()
		.with_clock(Arc::new(FixedClock(now)))
		.with_request(entities::small_office_request("req-a"));
	for vendor in vendors {
		builder = builder.with_vendor(vendor);
	}
	for product in products {
		builder = builder.with_product(product);
	}
	let state = builder.build().await.unwrap();

	let created = state
		.engine
		.generate_quotes("req-a", "buyer-1", GenerateOptions::default())
		.await
		.unwrap();

	for quote in quotes_by_ranking(&state, &created).await {
		assert_eq!(quote.created_at, now);
		assert_eq!(quote.terms.valid_until - quote.created_at, Duration::days(30));
	}
}

#[tokio::test]
async fn scenario_b_high_volume_a3_speed_priority() {
	let (vendors, products) = entities::production_catalog();
	let state = build_state(vendors, products, entities::production_request("req-b")).await;

	let created = state
		.engine
		.generate_quotes("req-b", "buyer-2", GenerateOptions::default())
		.await
		.unwrap();
	let quotes = quotes_by_ranking(&state, &created).await;
	assert!(!quotes.is_empty());

	// The small-office device does not reach 40k pages/month
	assert!(quotes.iter().all(|q| q.vendor_id != "v-dyno"));

	// Only devices meeting the 55 ppm floor score full marks on speed
	for quote in &quotes {
		let full_speed = quote.match_score.breakdown.speed_match >= 0.7;
		assert_eq!(full_speed, quote.product_summary.speed >= 55);
	}

	// The winner meets the floor
	assert!(quotes[0].product_summary.speed >= 55);
}

#[tokio::test]
async fn scenario_c_no_candidates() {
	let (vendors, products) = entities::small_office_catalog();
	let state = build_state(vendors, products, entities::sra3_request("req-c")).await;

	let created = state
		.engine
		.generate_quotes("req-c", "buyer-3", GenerateOptions::default())
		.await
		.unwrap();
	assert!(created.is_empty());

	let request = state.storage.get_request("req-c").await.unwrap().unwrap();
	assert_eq!(request.status, RequestStatus::Pending);
	assert!(request
		.ai_analysis
		.risk_factors
		.iter()
		.any(|r| r == NO_MATCHES_RISK));

	let stats = state.storage.stats().await.unwrap();
	assert_eq!(stats.total_quotes, 0);
}

#[tokio::test]
async fn scenario_d_duplicate_vendor_products() {
	let (vendors, products) = entities::duplicate_vendor_catalog();
	let state = build_state(vendors, products, entities::small_office_request("req-d")).await;

	let created = state
		.engine
		.generate_quotes("req-d", "buyer-1", GenerateOptions::default())
		.await
		.unwrap();
	assert_eq!(created.len(), 2);

	let quotes = quotes_by_ranking(&state, &created).await;
	let vendor_ids: HashSet<&str> = quotes.iter().map(|q| q.vendor_id.as_str()).collect();
	assert_eq!(
		vendor_ids,
		HashSet::from(["v-apex", "v-brite"])
	);

	// The retained apex quote is its highest-scoring product
	let apex_quote = quotes.iter().find(|q| q.vendor_id == "v-apex").unwrap();
	assert_eq!(apex_quote.product_id, "p-apex-best");
}

#[tokio::test]
async fn rerun_without_retry_is_a_noop() {
	let (vendors, products) = entities::small_office_catalog();
	let state = build_state(vendors, products, entities::small_office_request("req-i")).await;

	let first = state
		.engine
		.generate_quotes("req-i", "buyer-1", GenerateOptions::default())
		.await
		.unwrap();
	let stats_before = state.storage.stats().await.unwrap();

	let second = state
		.engine
		.generate_quotes("req-i", "buyer-1", GenerateOptions::default())
		.await
		.unwrap();

	assert_eq!(first, second);
	let stats_after = state.storage.stats().await.unwrap();
	assert_eq!(stats_before.total_quotes, stats_after.total_quotes);
}

#[tokio::test]
async fn retry_fills_only_missing_slots() {
	// Start with a single vendor so only rank 1 fills
	let (mut vendors, mut products) = entities::small_office_catalog();
	let extra_vendors = vendors.split_off(1);
	let extra_products = products.split_off(1);

	let state = build_state(vendors, products, entities::small_office_request("req-r")).await;

	let first = state
		.engine
		.generate_quotes("req-r", "buyer-1", GenerateOptions::default())
		.await
		.unwrap();
	assert_eq!(first.len(), 1);

	// New vendors arrive in the catalog
	for vendor in extra_vendors {
		state.storage.create_vendor(vendor).await.unwrap();
	}
	for product in extra_products {
		state.storage.create_product(product).await.unwrap();
	}

	let filled = state
		.engine
		.generate_quotes(
			"req-r",
			"buyer-1",
			GenerateOptions {
				retry: true,
				..Default::default()
			},
		)
		.await
		.unwrap();
	assert_eq!(filled.len(), 2);

	// The original quote is preserved and rankings stay unique 1..3
	let original = state.storage.get_quote(&first[0]).await.unwrap().unwrap();
	assert_eq!(original.ranking, 1);
	assert_eq!(original.status, QuoteStatus::Generated);

	let request = state.storage.get_request("req-r").await.unwrap().unwrap();
	assert_eq!(request.quotes.len(), 3);

	let all = state.storage.get_quotes_by_request("req-r").await.unwrap();
	let mut rankings: Vec<u32> = all.iter().map(|q| q.ranking).collect();
	rankings.sort_unstable();
	assert_eq!(rankings, vec![1, 2, 3]);

	let vendor_ids: HashSet<String> = all.iter().map(|q| q.vendor_id.clone()).collect();
	assert_eq!(vendor_ids.len(), 3);
}

#[tokio::test]
async fn expired_deadline_records_risk_factor() {
	let (vendors, products) = entities::small_office_catalog();
	let state = build_state(vendors, products, entities::small_office_request("req-t")).await;

	let created = state
		.engine
		.generate_quotes(
			"req-t",
			"buyer-1",
			GenerateOptions {
				deadline_ms: Some(0),
				..Default::default()
			},
		)
		.await
		.unwrap();
	assert!(created.is_empty());

	let request = state.storage.get_request("req-t").await.unwrap().unwrap();
	assert!(request
		.ai_analysis
		.risk_factors
		.iter()
		.any(|r| r == DEADLINE_RISK));
}

#[tokio::test]
async fn sample_only_generates_synthetic_quote() {
	// No catalog at all
	let state = EngineBuilder::new()
		.with_request(entities::small_office_request("req-s"))
		.build()
		.await
		.unwrap();

	let created = state
		.engine
		.generate_quotes(
			"req-s",
			"buyer-1",
			GenerateOptions {
				sample_only: true,
				..Default::default()
			},
		)
		.await
		.unwrap();
	assert_eq!(created.len(), 1);

	let quote = state.storage.get_quote(&created[0]).await.unwrap().unwrap();
	assert_eq!(quote.vendor_id, "sample-vendor");
	assert_eq!(quote.ranking, 1);
	assert!(quote.integrity_checksum.is_some());
}

#[tokio::test]
async fn volume_window_overlap_admits_adjacent_bucket() {
	// 5,500 pages/month sits in the 0-6k bucket; a product indexed 6k-13k
	// with a window reaching down must still qualify
	let vendors = vec![tendor_engine::mocks::MockEntities::vendor("v-apex", "Apex Copiers")];
	let probe = entities::mid_volume_probe("p-probe", "v-apex").with_volume_window(6_000, 13_000);

	let mut request = entities::small_office_request("req-w");
	request.monthly_volume = Some(tendor_engine::types::SubmittedVolume {
		mono: Some(5_000),
		colour: Some(500),
		total: Some(5_500),
	});

	let state = build_state(vendors, vec![probe], request).await;
	let created = state
		.engine
		.generate_quotes("req-w", "buyer-1", GenerateOptions::default())
		.await
		.unwrap();
	assert_eq!(created.len(), 1);
}
