//! Single-slot scroll position cache.
//!
//! Remembers where the user was on the last anchor page they left, so that
//! navigating straight back to it restores the offset. Only one return point
//! is kept; capturing a new one replaces the old.

/// A cached `{pathname, scrollY}` record.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollEntry {
	/// Exact pathname the offset was captured on.
	pub pathname: String,
	/// Vertical scroll offset in CSS pixels.
	pub scroll_y: f64,
}

/// Holds at most one [`ScrollEntry`].
#[derive(Debug, Clone, Default)]
pub struct ScrollCache {
	slot: Option<ScrollEntry>,
}

impl ScrollCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overwrites the slot.
	pub fn capture(&mut self, pathname: impl Into<String>, scroll_y: f64) {
		self.slot = Some(ScrollEntry {
			pathname: pathname.into(),
			scroll_y,
		});
	}

	/// Returns the cached offset if `pathname` matches the cached one exactly.
	///
	/// The slot is left in place, so later visits reuse the same value until
	/// the next [`capture`](Self::capture).
	pub fn try_consume(&self, pathname: &str) -> Option<f64> {
		self.slot
			.as_ref()
			.filter(|entry| entry.pathname == pathname)
			.map(|entry| entry.scroll_y)
	}

	/// Returns the current entry, if any.
	pub fn entry(&self) -> Option<&ScrollEntry> {
		self.slot.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_empty_cache_yields_nothing() {
		let cache = ScrollCache::new();
		assert_eq!(cache.try_consume("/"), None);
	}

	#[rstest]
	fn test_consume_requires_exact_pathname() {
		let mut cache = ScrollCache::new();
		cache.capture("/notifications", 420.0);

		assert_eq!(cache.try_consume("/notifications"), Some(420.0));
		assert_eq!(cache.try_consume("/notifications/"), None);
		assert_eq!(cache.try_consume("/Notifications"), None);
	}

	#[rstest]
	fn test_consume_does_not_clear() {
		let mut cache = ScrollCache::new();
		cache.capture("/", 10.0);

		assert_eq!(cache.try_consume("/"), Some(10.0));
		assert_eq!(cache.try_consume("/"), Some(10.0));
	}

	#[rstest]
	fn test_capture_overwrites_slot() {
		let mut cache = ScrollCache::new();
		cache.capture("/", 10.0);
		cache.capture("/notifications", 55.5);

		assert_eq!(cache.try_consume("/"), None);
		assert_eq!(
			cache.entry(),
			Some(&ScrollEntry {
				pathname: "/notifications".to_string(),
				scroll_y: 55.5,
			})
		);
	}
}
