//! Inbound navigation requests.
//!
//! Views ask for navigation with two custom DOM events: `navigate-to`
//! (`{ "url": ... }`) and `view-thread`
//! (`{ "subject": { "authorId": ..., "dbUrl": ... } }`). Both are decoded
//! into a [`NavigationRequest`] and reduced to a path before reaching the
//! navigator.

use crate::error::RouterError;
use crate::navigator::Navigator;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use url::Url;

/// DOM event name for explicit URL navigation.
pub const NAVIGATE_TO_EVENT: &str = "navigate-to";

/// DOM event name for opening a post or comment thread.
pub const VIEW_THREAD_EVENT: &str = "view-thread";

/// `scheme://key` prefix of a record URL.
static KEY_PREFIX: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*://[^/]+").expect("key prefix pattern is a valid regex")
});

/// A navigation request raised by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
	/// Go to an explicit URL or path.
	NavigateTo {
		/// Absolute URL or path.
		url: String,
	},
	/// Open the thread for a record.
	ViewThread {
		/// Author identity, e.g. `alice@example.com`.
		author_id: String,
		/// Record URL, e.g. `hyper://<key>/ctzn.network/post/123`.
		db_url: String,
	},
}

#[derive(Deserialize)]
struct NavigateToDetail {
	url: String,
}

#[derive(Deserialize)]
struct ViewThreadDetail {
	subject: ThreadSubject,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSubject {
	author_id: String,
	db_url: String,
}

impl NavigationRequest {
	/// Decodes a custom event by name and JSON `detail`.
	///
	/// Unknown names or malformed details yield `None`.
	pub fn from_event(name: &str, detail: &str) -> Option<Self> {
		match name {
			NAVIGATE_TO_EVENT => serde_json::from_str::<NavigateToDetail>(detail)
				.ok()
				.map(|d| Self::NavigateTo { url: d.url }),
			VIEW_THREAD_EVENT => serde_json::from_str::<ViewThreadDetail>(detail)
				.ok()
				.map(|d| Self::ViewThread {
					author_id: d.subject.author_id,
					db_url: d.subject.db_url,
				}),
			_ => None,
		}
	}

	/// Path the request leads to, resolved against `origin`.
	pub fn target_path(&self, origin: &Url) -> Result<String, RouterError> {
		match self {
			Self::NavigateTo { url } => {
				let resolved = origin
					.join(url)
					.map_err(|e| RouterError::InvalidUrl(format!("{}: {}", url, e)))?;
				if resolved.origin() != origin.origin() {
					return Err(RouterError::CrossOrigin(url.clone()));
				}
				Ok(resolved.path().to_string())
			}
			Self::ViewThread { author_id, db_url } => Ok(thread_path(author_id, db_url)),
		}
	}
}

/// Builds `/{author_id}{remainder}` from a record URL.
pub fn thread_path(author_id: &str, db_url: &str) -> String {
	let remainder = KEY_PREFIX.replace(db_url, "");
	format!("/{}{}", author_id, remainder)
}

impl Navigator {
	/// Resolves and follows a [`NavigationRequest`].
	pub fn dispatch(&self, request: &NavigationRequest) -> Result<(), RouterError> {
		let path = request.target_path(self.origin())?;
		self.navigate_to(&path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	const KEY: &str = "4f3a0b5c0e1f2d3c4b5a69788796a5b4c3d2e1f00112233445566778899aabbcc";

	fn origin() -> Url {
		Url::parse("https://ctzn.one").unwrap()
	}

	#[rstest]
	fn test_thread_path_strips_key_prefix() {
		let db_url = format!("hyper://{}/ctzn.network/post/ff08", KEY);
		assert_eq!(
			thread_path("alice@example.com", &db_url),
			"/alice@example.com/ctzn.network/post/ff08"
		);
	}

	#[rstest]
	fn test_thread_path_without_prefix_keeps_locator() {
		assert_eq!(
			thread_path("bob@x.y", "/ctzn.network/comment/1"),
			"/bob@x.y/ctzn.network/comment/1"
		);
	}

	#[rstest]
	#[case("/search", "/search")]
	#[case("https://ctzn.one/account?tab=profile", "/account")]
	#[case("notifications", "/notifications")]
	fn test_navigate_to_target_path(#[case] url: &str, #[case] expected: &str) {
		let request = NavigationRequest::NavigateTo {
			url: url.to_string(),
		};
		assert_eq!(request.target_path(&origin()).unwrap(), expected);
	}

	#[rstest]
	fn test_navigate_to_rejects_other_origin() {
		let request = NavigationRequest::NavigateTo {
			url: "https://example.com/".to_string(),
		};
		assert!(matches!(
			request.target_path(&origin()),
			Err(RouterError::CrossOrigin(_))
		));
	}

	#[rstest]
	fn test_from_event_decodes_details() {
		assert_eq!(
			NavigationRequest::from_event(NAVIGATE_TO_EVENT, r#"{"url":"/signup"}"#),
			Some(NavigationRequest::NavigateTo {
				url: "/signup".to_string()
			})
		);
		assert_eq!(
			NavigationRequest::from_event(
				VIEW_THREAD_EVENT,
				r#"{"subject":{"authorId":"a@b","dbUrl":"hyper://k/ctzn.network/post/1"}}"#
			),
			Some(NavigationRequest::ViewThread {
				author_id: "a@b".to_string(),
				db_url: "hyper://k/ctzn.network/post/1".to_string(),
			})
		);
	}

	#[rstest]
	#[case(NAVIGATE_TO_EVENT, r#"{"href":"/signup"}"#)]
	#[case(VIEW_THREAD_EVENT, r#"{"subject":{"authorId":"a@b"}}"#)]
	#[case("open-modal", r#"{}"#)]
	fn test_from_event_rejects_unknown(#[case] name: &str, #[case] detail: &str) {
		assert_eq!(NavigationRequest::from_event(name, detail), None);
	}
}
