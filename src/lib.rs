//! # CTZN Web
//!
//! Client-side navigation for the CTZN web client.
//!
//! The application shell is a single page. This crate maps the browser URL
//! to one of its views, turns in-app link clicks into history pushes and
//! restores scroll positions on back/forward and when returning to the home
//! or notifications feed.
//!
//! ## Feature Flags
//!
//! - `debug-hooks` - Verbose navigation tracing in debug builds
//! - `console_error_panic_hook` - Route WASM panics to the browser console
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use ctzn::prelude::*;
//! use std::rc::Rc;
//!
//! // In the browser
//! let navigator = ctzn::router::browser::launch(host, NavigatorConfig::default())?;
//! wasm_bindgen_futures::spawn_local(async move {
//!     let _ = navigator.bootstrap(session::setup()).await;
//! });
//!
//! // Anywhere else
//! let navigator = Navigator::builder(Rc::new(MemoryHistory::new("/")), host, spawner)
//!     .build()?;
//! navigator.navigate_to("/notifications")?;
//! assert_eq!(navigator.current_route(), Route::Page(PageKind::Notifications));
//! ```

pub use ctzn_router as router;

pub use ctzn_router::{
	NavigationHandle, NavigationRequest, Navigator, NavigatorConfig, PageKind, Route, RouterError,
};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::router::{
		Broadcast, Broadcaster, ClickEvent, HistoryBackend, HistoryState, Interception,
		MemoryHistory, MountedView, NavigationHandle, NavigationRequest, Navigator,
		NavigatorConfig, Outlet, PageKind, Phase, Route, RouterError, ScrollError, Spawner,
		ViewHost,
	};
}
