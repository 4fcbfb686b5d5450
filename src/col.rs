pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

pub fn map_with_capacity<K, V>(capacity: usize) -> HashMap<K, V> {
    rustc_hash::FxHashMap::with_capacity_and_hasher(capacity, Default::default())
}

#[cfg(test)]
pub type HashSet<K> = rustc_hash::FxHashSet<K>;

#[cfg(test)]
pub fn map_new<K, V>() -> HashMap<K, V> {
    rustc_hash::FxHashMap::default()
}

#[cfg(test)]
pub fn set_new<K>() -> HashSet<K> {
    rustc_hash::FxHashSet::default()
}
