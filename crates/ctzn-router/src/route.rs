//! Route resolution.
//!
//! Maps a path string to the [`Route`] that selects which view renders.
//! Resolution is total: every input yields exactly one route, with
//! [`Route::NotFound`] as the fallback.
//!
//! Matching order:
//!
//! 1. Exact match against [`PageKind::from_path`] (root aliases included)
//! 2. Thread pattern: `/{user@host}/ctzn.network/{post|comment}/{id}`, with
//!    the namespace and record kind matched case-sensitively
//! 3. Profile pattern: first segment is `user@host`, non-empty on both sides
//! 4. Not found

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace segment that prefixes post and comment locators.
pub const CONTENT_NAMESPACE: &str = "ctzn.network";

static THREAD_PATTERN: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^/([^/]+@[^/]+)/ctzn\.network/(post|comment)/([^/]+)$")
		.expect("thread pattern is a valid regex")
});

static PROFILE_PATTERN: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^/([^/]+@[^/]+)").expect("profile pattern is a valid regex"));

/// The closed set of top-level pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
	/// Main feed.
	Home,
	/// Password reset form.
	ForgotPassword,
	/// Notification list.
	Notifications,
	/// Community directory.
	Communities,
	/// Account settings.
	Account,
	/// Search results.
	Search,
	/// Registration form.
	Signup,
}

/// Every recognized top-level path, in lookup order.
const PAGE_PATHS: &[(&str, PageKind)] = &[
	("/", PageKind::Home),
	("/index", PageKind::Home),
	("/index.html", PageKind::Home),
	("/forgot-password", PageKind::ForgotPassword),
	("/notifications", PageKind::Notifications),
	("/communities", PageKind::Communities),
	("/account", PageKind::Account),
	("/search", PageKind::Search),
	("/signup", PageKind::Signup),
];

impl PageKind {
	/// Looks up a page by exact path.
	pub fn from_path(path: &str) -> Option<Self> {
		PAGE_PATHS
			.iter()
			.find(|(candidate, _)| *candidate == path)
			.map(|(_, kind)| *kind)
	}

	/// Canonical path of the page.
	pub fn path(self) -> &'static str {
		match self {
			Self::Home => "/",
			Self::ForgotPassword => "/forgot-password",
			Self::Notifications => "/notifications",
			Self::Communities => "/communities",
			Self::Account => "/account",
			Self::Search => "/search",
			Self::Signup => "/signup",
		}
	}

	/// Stable identifier, used for logging and view lookup.
	pub fn name(self) -> &'static str {
		match self {
			Self::Home => "home",
			Self::ForgotPassword => "forgot-password",
			Self::Notifications => "notifications",
			Self::Communities => "communities",
			Self::Account => "account",
			Self::Search => "search",
			Self::Signup => "signup",
		}
	}
}

/// The view selected for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
	/// One of the fixed top-level pages.
	Page(PageKind),
	/// A post or comment thread; carries the full path.
	Thread(String),
	/// A user profile; carries the full path.
	User(String),
	/// Nothing matched; carries the full path.
	NotFound(String),
}

impl Route {
	/// Resolves a path to a route. See the module docs for the order.
	pub fn resolve(path: &str) -> Self {
		if let Some(kind) = PageKind::from_path(path) {
			return Self::Page(kind);
		}
		if THREAD_PATTERN.is_match(path) {
			return Self::Thread(path.to_string());
		}
		if PROFILE_PATTERN.is_match(path) {
			return Self::User(path.to_string());
		}
		Self::NotFound(path.to_string())
	}

	/// Stable identifier of the route kind.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Page(kind) => kind.name(),
			Self::Thread(_) => "thread",
			Self::User(_) => "user",
			Self::NotFound(_) => "not-found",
		}
	}

	/// Returns the page kind for top-level pages.
	pub fn page(&self) -> Option<PageKind> {
		match self {
			Self::Page(kind) => Some(*kind),
			_ => None,
		}
	}

	/// Returns the raw path carried by parametrized routes.
	pub fn path(&self) -> Option<&str> {
		match self {
			Self::Page(_) => None,
			Self::Thread(path) | Self::User(path) | Self::NotFound(path) => Some(path),
		}
	}

	/// Returns `true` if this route renders the 404 view.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_))
	}
}

impl fmt::Display for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.path() {
			Some(path) => write!(f, "{}({})", self.name(), path),
			None => f.write_str(self.name()),
		}
	}
}

/// Resolves a path to a route.
pub fn resolve(path: &str) -> Route {
	Route::resolve(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/", PageKind::Home)]
	#[case("/index", PageKind::Home)]
	#[case("/index.html", PageKind::Home)]
	#[case("/forgot-password", PageKind::ForgotPassword)]
	#[case("/notifications", PageKind::Notifications)]
	#[case("/communities", PageKind::Communities)]
	#[case("/account", PageKind::Account)]
	#[case("/search", PageKind::Search)]
	#[case("/signup", PageKind::Signup)]
	fn test_resolve_top_level_pages(#[case] path: &str, #[case] expected: PageKind) {
		assert_eq!(resolve(path), Route::Page(expected));
	}

	#[rstest]
	#[case("/alice@example.com/ctzn.network/post/123")]
	#[case("/alice@example.com/ctzn.network/comment/abc")]
	#[case("/Alice@Example.com/ctzn.network/post/9")]
	fn test_resolve_thread(#[case] path: &str) {
		assert_eq!(resolve(path), Route::Thread(path.to_string()));
	}

	#[rstest]
	#[case("/alice@example.com")]
	#[case("/alice@example.com/")]
	#[case("/alice@example.com/followers")]
	#[case("/alice@example.com/ctzn.network/post/1/extra")]
	#[case("/alice@example.com/other.network/post/1")]
	#[case("/alice@example.com/CTZN.NETWORK/post/1")]
	#[case("/alice@example.com/ctzn.network/Post/1")]
	fn test_resolve_user(#[case] path: &str) {
		assert_eq!(resolve(path), Route::User(path.to_string()));
	}

	#[rstest]
	#[case("")]
	#[case("/notifications/")]
	#[case("/index.htm")]
	#[case("/@")]
	#[case("/bob@")]
	#[case("/@example.com")]
	#[case("/alice/ctzn.network/post/1")]
	#[case("alice@example.com")]
	fn test_resolve_not_found(#[case] path: &str) {
		assert_eq!(resolve(path), Route::NotFound(path.to_string()));
	}

	#[rstest]
	fn test_thread_wins_over_profile() {
		let path = "/a@b/ctzn.network/post/123";
		assert!(PROFILE_PATTERN.is_match(path));
		assert_eq!(resolve(path).name(), "thread");
	}

	#[rstest]
	fn test_route_display() {
		assert_eq!(Route::Page(PageKind::Search).to_string(), "search");
		assert_eq!(
			Route::User("/bob@x.y".to_string()).to_string(),
			"user(/bob@x.y)"
		);
	}

	#[rstest]
	fn test_page_kind_canonical_path_round_trips() {
		for (_, kind) in PAGE_PATHS {
			assert_eq!(PageKind::from_path(kind.path()), Some(*kind));
		}
	}
}
