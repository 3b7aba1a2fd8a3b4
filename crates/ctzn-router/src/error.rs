//! Error types for client-side navigation.

use thiserror::Error;

/// Error raised by a session-history backend.
#[derive(Debug, Error)]
pub enum HistoryError {
	/// No history object is reachable (no `window`, detached document).
	#[error("session history is unavailable")]
	Unavailable,
	/// The browser rejected the call.
	#[error("history call failed: {0}")]
	Js(String),
	/// The per-entry state payload could not be encoded.
	#[error("failed to encode history state: {0}")]
	State(#[from] serde_json::Error),
}

/// Error raised while restoring a scroll offset.
///
/// These never leave the scheduler; see [`crate::navigator::restore_scroll`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrollError {
	/// No view is mounted in the outlet yet.
	#[error("no view is mounted")]
	NotMounted,
	/// The mounted view does not implement the scroll hook.
	#[error("view `{0}` has no scroll hook")]
	HookMissing(String),
	/// The offset is NaN, infinite or negative.
	#[error("invalid scroll offset: {0}")]
	InvalidOffset(f64),
}

/// Error type for router operations.
#[derive(Debug, Error)]
pub enum RouterError {
	/// Writing to the session history failed.
	#[error("Navigation failed: {0}")]
	History(#[from] HistoryError),
	/// A navigation target could not be parsed as a URL.
	#[error("Invalid URL: {0}")]
	InvalidUrl(String),
	/// A navigation target points outside the document's origin.
	#[error("Cross-origin navigation refused: {0}")]
	CrossOrigin(String),
	/// The navigator configuration is unusable.
	#[error("Invalid configuration: {0}")]
	Config(String),
}
