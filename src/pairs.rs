//! Pair generation.
//!
//! Every unordered 2-combination of catalog items becomes one comparison.
//! Pairs come out in standard combinatorial order over the catalog sequence
//! (`(0,1), (0,2), ..., (1,2), ...`) and the earlier catalog item is always
//! presented first as "A". Price and score never reorder a pair.

/// An unordered pair presented as `a` vs `b`.
#[derive(Debug, Clone, Copy)]
pub struct Pair<T> {
    pub a: T,
    pub b: T,
}

/// Number of pairs for `n` items: `n·(n−1)/2`.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// All unordered pairs of `items`, in catalog order.
///
/// Items are expected to be distinct (see
/// [`validate_items`](crate::catalog::validate_items)); an item is never
/// paired with itself.
pub fn generate_pairs<T: Copy>(items: &[T]) -> Vec<Pair<T>> {
    let mut pairs = Vec::with_capacity(pair_count(items.len()));
    for (i, &a) in items.iter().enumerate() {
        for &b in &items[i + 1..] {
            pairs.push(Pair { a, b });
        }
    }
    pairs
}

/// Order-independent identity of a pair of names.
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
