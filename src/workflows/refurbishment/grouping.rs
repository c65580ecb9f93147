use std::collections::HashMap;
use std::hash::Hash;

/// Buckets `items` by the key `key_fn` returns, preserving input order
/// within each bucket.
pub fn group_by<T, K, I, F>(items: I, mut key_fn: F) -> HashMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}
