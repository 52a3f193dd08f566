use std::hash::Hash;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use super::{CandidateMap, RecordWeights, TokenWeights};

/// The winning listing for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchHit<L> {
    pub listing: L,
    pub score: f64,
}

/// Dot product restricted to the pre-computed shared tokens.
/// Shared tokens are present in both vectors by construction.
#[inline]
fn dot(a: &TokenWeights, b: &TokenWeights, shared: &[String]) -> f64 {
    shared
        .iter()
        .map(|token| {
            let x = a.get(token).copied().unwrap_or(0.0);
            let y = b.get(token).copied().unwrap_or(0.0);
            x * y
        })
        .sum()
}

/// Euclidean norm of the full vector.
#[inline]
fn norm(a: &TokenWeights) -> f64 {
    a.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Cosine similarity with the numerator restricted to the shared tokens
/// and the denominator over the *full* vectors. Full norms are
/// intentional: a record with many unrelated terms is penalized even
/// when the shared terms agree.
pub fn cosine(a: &TokenWeights, b: &TokenWeights, shared: &[String]) -> f64 {
    dot(a, b, shared) / (norm(a) * norm(b))
}

/// Full-vector norm of every record, computed in parallel, returned in
/// the input map's order.
fn record_norms<K>(weights: &RecordWeights<K>) -> IndexMap<K, f64>
where
    K: Clone + Eq + Hash + Send + Sync,
{
    weights
        .iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(key, vector)| (key.clone(), norm(vector)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

/// Score every candidate pair and keep, per product, the single
/// highest-scoring listing strictly above `threshold`.
///
/// Selection iterates the candidate map in order and replaces the stored
/// best only on strict improvement, so exact score ties keep the first
/// candidate seen. Products with no qualifying candidate are absent from
/// the result.
pub fn best_matches<P, L>(
    product_weights: &RecordWeights<P>,
    listing_weights: &RecordWeights<L>,
    candidates: &CandidateMap<P, L>,
    threshold: f64,
) -> IndexMap<P, MatchHit<L>>
where
    P: Clone + Eq + Hash + Send + Sync,
    L: Clone + Eq + Hash + Send + Sync,
{
    let product_norms = record_norms(product_weights);
    let listing_norms = record_norms(listing_weights);

    let mut results: IndexMap<P, MatchHit<L>> = IndexMap::new();
    for ((product, listing), shared) in candidates {
        let (Some(product_vector), Some(listing_vector)) =
            (product_weights.get(product), listing_weights.get(listing))
        else {
            continue;
        };
        let (Some(&product_norm), Some(&listing_norm)) =
            (product_norms.get(product), listing_norms.get(listing))
        else {
            continue;
        };
        let score = dot(product_vector, listing_vector, shared) / (product_norm * listing_norm);
        if score <= threshold {
            continue;
        }
        match results.get_mut(product) {
            Some(best) if score > best.score => {
                *best = MatchHit {
                    listing: listing.clone(),
                    score,
                };
            }
            None => {
                results.insert(
                    product.clone(),
                    MatchHit {
                        listing: listing.clone(),
                        score,
                    },
                );
            }
            _ => {}
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(&str, f64)]) -> TokenWeights {
        entries
            .iter()
            .map(|(token, weight)| (token.to_string(), *weight))
            .collect()
    }

    fn shared(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let a = vector(&[("x", 3.0), ("y", 2.0)]);
        let score = cosine(&a, &a, &shared(&["x", "y"]));
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_uses_full_norms_with_restricted_dot() {
        let a = vector(&[("A", 3.0), ("B", 2.0), ("C", 1.0)]);
        let b = vector(&[("A", 2.0), ("D", 3.0), ("E", 4.0)]);
        let score = cosine(&a, &b, &shared(&["A"]));
        assert!((score - 0.2977750).abs() < 1e-6);
    }

    fn single_candidate() -> (
        RecordWeights<&'static str>,
        RecordWeights<usize>,
        CandidateMap<&'static str, usize>,
    ) {
        let mut products: RecordWeights<&str> = IndexMap::new();
        products.insert("p", vector(&[("A", 3.0), ("B", 2.0), ("C", 1.0)]));
        let mut listings: RecordWeights<usize> = IndexMap::new();
        listings.insert(0, vector(&[("A", 2.0), ("D", 3.0), ("E", 4.0)]));
        let mut candidates: CandidateMap<&str, usize> = IndexMap::new();
        candidates.insert(("p", 0), shared(&["A"]));
        (products, listings, candidates)
    }

    #[test]
    fn threshold_is_exclusive() {
        let (products, listings, candidates) = single_candidate();
        let score = cosine(&products["p"], &listings[&0], &candidates[&("p", 0)]);

        // a candidate scoring exactly the threshold does not match
        let at_threshold = best_matches(&products, &listings, &candidates, score);
        assert!(at_threshold.is_empty());

        let below_threshold = best_matches(&products, &listings, &candidates, score - 1e-9);
        assert_eq!(below_threshold["p"].listing, 0);
        assert!((below_threshold["p"].score - score).abs() < 1e-15);
    }

    #[test]
    fn best_of_two_candidates_wins() {
        let mut products: RecordWeights<&str> = IndexMap::new();
        products.insert("p", vector(&[("A", 1.0), ("B", 1.0)]));
        let mut listings: RecordWeights<usize> = IndexMap::new();
        // listing 0 shares one of two tokens, listing 1 shares both
        listings.insert(0, vector(&[("A", 1.0), ("X", 1.0)]));
        listings.insert(1, vector(&[("A", 1.0), ("B", 1.0)]));
        let mut candidates: CandidateMap<&str, usize> = IndexMap::new();
        candidates.insert(("p", 0), shared(&["A"]));
        candidates.insert(("p", 1), shared(&["A", "B"]));

        let results = best_matches(&products, &listings, &candidates, 0.25);
        assert_eq!(results.len(), 1);
        assert_eq!(results["p"].listing, 1);
        assert!((results["p"].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn exact_ties_keep_the_first_candidate_seen() {
        let mut products: RecordWeights<&str> = IndexMap::new();
        products.insert("p", vector(&[("A", 1.0)]));
        let mut listings: RecordWeights<usize> = IndexMap::new();
        listings.insert(0, vector(&[("A", 2.0)]));
        listings.insert(1, vector(&[("A", 2.0)]));
        let mut candidates: CandidateMap<&str, usize> = IndexMap::new();
        candidates.insert(("p", 0), shared(&["A"]));
        candidates.insert(("p", 1), shared(&["A"]));

        let results = best_matches(&products, &listings, &candidates, 0.25);
        assert_eq!(results["p"].listing, 0);
    }

    #[test]
    fn matcher_is_idempotent() {
        let (products, listings, candidates) = single_candidate();
        let first = best_matches(&products, &listings, &candidates, 0.1);
        let second = best_matches(&products, &listings, &candidates, 0.1);
        let first_pairs: Vec<_> = first.iter().collect();
        let second_pairs: Vec<_> = second.iter().collect();
        assert_eq!(first_pairs, second_pairs);
    }
}
