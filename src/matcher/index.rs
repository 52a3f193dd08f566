use std::hash::Hash;

use indexmap::IndexMap;

use super::{CandidateMap, InvertedIndex, RecordWeights};

/// Invert a weighted collection into token -> record ids.
///
/// Record ids appear in the iteration order of the input map, so the
/// index is deterministic for a given input. The order carries no
/// meaning, but reproducible fixtures depend on it.
pub fn invert<K>(weights: &RecordWeights<K>) -> InvertedIndex<K>
where
    K: Clone + Eq + Hash,
{
    let mut index: InvertedIndex<K> = IndexMap::new();
    for (key, vector) in weights {
        for token in vector.keys() {
            index.entry(token.clone()).or_default().push(key.clone());
        }
    }
    index
}

/// Intersect the two inverted indices into the sparse candidate map.
///
/// For every token present in both indices the cross product of the two
/// id lists is taken, and the token is appended to each pair's
/// shared-token list, creating the entry on first occurrence. Cost is
/// the sum over shared tokens of |products| x |listings| per token,
/// acceptable only while the vocabulary stays sparse.
pub fn common_tokens<P, L>(
    products: &InvertedIndex<P>,
    listings: &InvertedIndex<L>,
) -> CandidateMap<P, L>
where
    P: Clone + Eq + Hash,
    L: Clone + Eq + Hash,
{
    let mut candidates: CandidateMap<P, L> = IndexMap::new();
    for (token, product_ids) in products {
        let Some(listing_ids) = listings.get(token) else {
            continue;
        };
        for product in product_ids {
            for listing in listing_ids {
                candidates
                    .entry((product.clone(), listing.clone()))
                    .or_default()
                    .push(token.clone());
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::TokenWeights;

    fn vector(tokens: &[&str]) -> TokenWeights {
        tokens
            .iter()
            .map(|token| (token.to_string(), 1.0))
            .collect()
    }

    #[test]
    fn invert_preserves_input_iteration_order() {
        let mut weights: RecordWeights<&str> = IndexMap::new();
        weights.insert("p1", vector(&["alpha", "beta"]));
        weights.insert("p2", vector(&["beta", "gamma"]));
        let index = invert(&weights);
        assert_eq!(index["alpha"], vec!["p1"]);
        assert_eq!(index["beta"], vec!["p1", "p2"]);
        assert_eq!(index["gamma"], vec!["p2"]);
        let tokens: Vec<&String> = index.keys().collect();
        assert_eq!(tokens, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn common_tokens_builds_only_sharing_pairs() {
        let mut product_weights: RecordWeights<&str> = IndexMap::new();
        product_weights.insert("p1", vector(&["alpha", "beta"]));
        product_weights.insert("p2", vector(&["delta"]));
        let mut listing_weights: RecordWeights<usize> = IndexMap::new();
        listing_weights.insert(0, vector(&["alpha", "beta", "gamma"]));
        listing_weights.insert(1, vector(&["gamma"]));

        let candidates = common_tokens(&invert(&product_weights), &invert(&listing_weights));

        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[&("p1", 0)],
            vec!["alpha".to_string(), "beta".to_string()]
        );
        // p2 shares nothing, listing 1 shares nothing: no keys for them
        assert!(candidates.keys().all(|(p, l)| *p == "p1" && *l == 0));
    }

    #[test]
    fn common_tokens_takes_the_cross_product_per_token() {
        let mut product_weights: RecordWeights<&str> = IndexMap::new();
        product_weights.insert("p1", vector(&["alpha"]));
        product_weights.insert("p2", vector(&["alpha"]));
        let mut listing_weights: RecordWeights<usize> = IndexMap::new();
        listing_weights.insert(0, vector(&["alpha"]));
        listing_weights.insert(1, vector(&["alpha"]));

        let candidates = common_tokens(&invert(&product_weights), &invert(&listing_weights));

        assert_eq!(candidates.len(), 4);
        for ids in candidates.values() {
            assert_eq!(ids, &vec!["alpha".to_string()]);
        }
    }
}
