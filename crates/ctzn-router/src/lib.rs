//! CTZN Router - client-side navigation for the CTZN web client
//!
//! Maps the browser URL to one of a fixed set of views, turns in-app link
//! clicks into history pushes, and restores scroll positions on
//! back/forward and when returning to an anchor page.
//!
//! ## Architecture
//!
//! - [`route`]: path → [`Route`] resolution (total, deterministic)
//! - [`scroll`]: single-slot scroll cache for anchor pages
//! - [`history`]: session history seam, [`HistoryAdapter`] and [`MemoryHistory`]
//! - [`navigator`]: the [`Navigator`] controller and its lifecycle
//! - [`intercept`]: root click interception
//! - [`request`]: `navigate-to` / `view-thread` requests from views
//! - [`host`]: the seam to the view layer
//! - [`config`]: [`NavigatorConfig`]
//! - `browser`: `web-sys` bindings (WASM only)
//!
//! Browser-facing pieces sit behind traits, so the whole controller runs
//! natively against [`MemoryHistory`] in tests.
//!
//! ## Example
//!
//! ```ignore
//! use ctzn_router::{MemoryHistory, Navigator, Route, PageKind};
//! use std::rc::Rc;
//!
//! let navigator = Navigator::builder(Rc::new(MemoryHistory::new("/")), host, spawner)
//!     .build()?;
//! navigator.navigate_to("/notifications")?;
//! assert_eq!(navigator.current_route(), Route::Page(PageKind::Notifications));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod history;
pub mod host;
pub mod intercept;
pub mod logging;
pub mod navigator;
pub mod request;
pub mod route;
pub mod scroll;
pub mod spawn;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use config::NavigatorConfig;
pub use error::{HistoryError, RouterError, ScrollError};
pub use history::{HistoryAdapter, HistoryBackend, HistoryState, MemoryHistory, ScrollRestoration};
pub use host::{Broadcast, Broadcaster, MountedView, Outlet, ViewHost};
pub use intercept::{ClickEvent, Interception, Modifiers, PassReason, PathNode, intercept};
pub use navigator::{NavigationHandle, Navigator, NavigatorBuilder, Phase, restore_scroll};
pub use request::{NavigationRequest, thread_path};
pub use route::{PageKind, Route, resolve};
pub use scroll::{ScrollCache, ScrollEntry};
pub use spawn::Spawner;

#[doc(hidden)]
pub use tracing as __tracing;

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub use web_sys as __web_sys;
