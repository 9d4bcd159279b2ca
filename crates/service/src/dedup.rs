//! Vendor deduplicator
//!
//! The short-list must surface vendor diversity: each vendor appears at
//! most once, represented by its best product. The ordering is fully
//! deterministic so concurrent re-runs rank identically.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::scoring::ScoredCandidate;

/// Reduce scored candidates to at most one per vendor, best first.
///
/// Ties break by higher cost efficiency, then lower total monthly cost,
/// then lexicographic (manufacturer, model).
pub fn dedupe_by_vendor(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
	scored.sort_by(compare);

	let mut seen: HashSet<String> = HashSet::new();
	scored
		.into_iter()
		.filter(|entry| seen.insert(entry.candidate.vendor.vendor_id.clone()))
		.collect()
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
	b.score
		.total
		.partial_cmp(&a.score.total)
		.unwrap_or(Ordering::Equal)
		.then_with(|| {
			b.score
				.breakdown
				.cost_efficiency
				.partial_cmp(&a.score.breakdown.cost_efficiency)
				.unwrap_or(Ordering::Equal)
		})
		.then_with(|| {
			a.costs
				.total_monthly_cost
				.partial_cmp(&b.costs.total_monthly_cost)
				.unwrap_or(Ordering::Equal)
		})
		.then_with(|| {
			(
				a.candidate.product.manufacturer.as_str(),
				a.candidate.product.model.as_str(),
			)
				.cmp(&(
					b.candidate.product.manufacturer.as_str(),
					b.candidate.product.model.as_str(),
				))
		})
}
