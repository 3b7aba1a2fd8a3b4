//! Navigator configuration.
//!
//! ```ignore
//! use ctzn_router::NavigatorConfig;
//!
//! let config = NavigatorConfig::from_json(r#"{ "origin": "https://ctzn.one" }"#)?;
//! ```

use crate::error::RouterError;
use crate::route::{PageKind, Route};
use serde::{Deserialize, Serialize};
use url::Url;

/// Settings for a [`Navigator`](crate::Navigator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
	/// Document origin used for same-origin checks.
	pub origin: String,
	/// Pages whose scroll offset is cached when they are left.
	pub anchor_pages: Vec<PageKind>,
	/// Switch `history.scrollRestoration` to `manual` on first navigation.
	pub manual_scroll_restoration: bool,
}

impl Default for NavigatorConfig {
	fn default() -> Self {
		Self {
			origin: "http://localhost".to_string(),
			anchor_pages: vec![PageKind::Home, PageKind::Notifications],
			manual_scroll_restoration: true,
		}
	}
}

impl NavigatorConfig {
	/// Parses a JSON configuration blob; missing keys take their defaults.
	pub fn from_json(json: &str) -> Result<Self, RouterError> {
		let config: Self =
			serde_json::from_str(json).map_err(|e| RouterError::Config(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Sets the origin.
	pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
		self.origin = origin.into();
		self
	}

	/// Replaces the anchor page set.
	pub fn with_anchor_pages(mut self, pages: impl IntoIterator<Item = PageKind>) -> Self {
		self.anchor_pages = pages.into_iter().collect();
		self
	}

	/// Checks that the origin parses as an absolute URL.
	pub fn validate(&self) -> Result<(), RouterError> {
		self.origin_url().map(|_| ())
	}

	/// Parsed origin.
	pub fn origin_url(&self) -> Result<Url, RouterError> {
		let url = Url::parse(&self.origin)
			.map_err(|e| RouterError::Config(format!("origin `{}`: {}", self.origin, e)))?;
		if !url.origin().is_tuple() {
			return Err(RouterError::Config(format!(
				"origin `{}` is opaque",
				self.origin
			)));
		}
		Ok(url)
	}

	/// Returns `true` if leaving `path` should cache its scroll offset.
	pub fn is_anchor(&self, path: &str) -> bool {
		Route::resolve(path)
			.page()
			.is_some_and(|kind| self.anchor_pages.contains(&kind))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_anchor_pages() {
		let config = NavigatorConfig::default();

		assert!(config.is_anchor("/"));
		assert!(config.is_anchor("/index.html"));
		assert!(config.is_anchor("/notifications"));
		assert!(!config.is_anchor("/search"));
		assert!(!config.is_anchor("/alice@example.com"));
	}

	#[rstest]
	fn test_from_json_fills_defaults() {
		let config = NavigatorConfig::from_json(r#"{ "origin": "https://ctzn.one" }"#).unwrap();

		assert_eq!(config.origin, "https://ctzn.one");
		assert_eq!(
			config.anchor_pages,
			vec![PageKind::Home, PageKind::Notifications]
		);
		assert!(config.manual_scroll_restoration);
	}

	#[rstest]
	fn test_from_json_anchor_pages() {
		let config =
			NavigatorConfig::from_json(r#"{ "anchor_pages": ["search", "communities"] }"#).unwrap();

		assert!(config.is_anchor("/search"));
		assert!(!config.is_anchor("/"));
	}

	#[rstest]
	#[case(r#"{ "origin": "not a url" }"#)]
	#[case(r#"{ "origin": "data:text/plain,hi" }"#)]
	#[case(r#"{ "anchor_pages": ["profile"] }"#)]
	fn test_from_json_rejects_bad_input(#[case] json: &str) {
		assert!(matches!(
			NavigatorConfig::from_json(json),
			Err(RouterError::Config(_))
		));
	}
}
