//! In-process TTL caches owned by the service.

use std::{
	collections::HashMap,
	sync::{Mutex, MutexGuard},
	time::Duration,
};

use serde::Serialize;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
	/// Stored entries, including expired ones not yet overwritten.
	pub entries: usize,
	pub keys: Vec<String>,
}

struct CacheEntry<V> {
	value: V,
	stored_at: Instant,
}

/// Fixed-TTL key/value store. Expired entries read as misses and stay until overwritten or
/// cleared. There is no size bound.
pub struct TtlCache<V> {
	ttl: Duration,
	enabled: bool,
	entries: Mutex<HashMap<String, CacheEntry<V>>>,
}
impl<V> TtlCache<V>
where
	V: Clone,
{
	pub fn new(ttl: Duration, enabled: bool) -> Self {
		Self { ttl, enabled, entries: Mutex::new(HashMap::new()) }
	}

	pub fn get(&self, key: &str) -> Option<V> {
		if !self.enabled {
			return None;
		}

		let entries = self.lock();
		let entry = entries.get(key)?;

		(entry.stored_at.elapsed() < self.ttl).then(|| entry.value.clone())
	}

	pub fn set(&self, key: impl Into<String>, value: V) {
		if !self.enabled {
			return;
		}

		self.lock().insert(key.into(), CacheEntry { value, stored_at: Instant::now() });
	}

	/// Removes one key, or everything when `key` is `None`. Returns the number removed.
	pub fn clear(&self, key: Option<&str>) -> usize {
		let mut entries = self.lock();

		match key {
			Some(key) => usize::from(entries.remove(key).is_some()),
			None => {
				let removed = entries.len();

				entries.clear();

				removed
			},
		}
	}

	pub fn stats(&self) -> CacheStats {
		let entries = self.lock();
		let mut keys: Vec<String> = entries.keys().cloned().collect();

		keys.sort();

		CacheStats { entries: entries.len(), keys }
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
		self.entries.lock().unwrap_or_else(|err| err.into_inner())
	}
}
