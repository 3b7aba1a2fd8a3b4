//! Navigation controller.
//!
//! [`Navigator`] owns the current path and drives every transition: it talks
//! to the session history through [`HistoryAdapter`], keeps the single-slot
//! [`ScrollCache`] for anchor pages, tells the [`ViewHost`] what to render
//! and schedules best-effort scroll restoration once a render settles.
//!
//! The navigator is an explicit context object. Collaborators receive an
//! `Rc<Navigator>` or a [`NavigationHandle`] instead of reaching for a global.
//!
//! ## Lifecycle
//!
//! ```text
//! Loading ──bootstrap()──▶ Ready
//! ```
//!
//! While `Loading` the outlet shows a placeholder; navigation still updates
//! the current path and history, and the first render after `Ready` picks it
//! up. `Ready` is never left.
//!
//! ## Example
//!
//! ```ignore
//! use ctzn_router::{Navigator, MemoryHistory};
//! use std::rc::Rc;
//!
//! let navigator = Navigator::builder(Rc::new(MemoryHistory::new("/")), host, spawner)
//!     .build()?;
//! navigator.navigate_to("/notifications")?;
//! ```

use crate::config::NavigatorConfig;
use crate::error::{RouterError, ScrollError};
use crate::history::{HistoryAdapter, HistoryBackend, HistoryState};
use crate::host::{Broadcast, Broadcaster, Outlet, ViewHost};
use crate::route::Route;
use crate::scroll::ScrollCache;
use crate::spawn::Spawner;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::{Rc, Weak};
use url::Url;

/// Navigator lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// Session bootstrap has not finished.
	Loading,
	/// Normal operation.
	Ready,
}

/// Builder for [`Navigator`].
pub struct NavigatorBuilder {
	backend: Rc<dyn HistoryBackend>,
	host: Rc<dyn ViewHost>,
	spawner: Rc<dyn Spawner>,
	broadcaster: Option<Rc<dyn Broadcaster>>,
	config: NavigatorConfig,
}

impl NavigatorBuilder {
	/// Sets the configuration.
	pub fn config(mut self, config: NavigatorConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the receiver of view-tree broadcasts.
	pub fn broadcaster(mut self, broadcaster: Rc<dyn Broadcaster>) -> Self {
		self.broadcaster = Some(broadcaster);
		self
	}

	/// Builds the navigator and renders the loading placeholder.
	pub fn build(self) -> Result<Rc<Navigator>, RouterError> {
		let origin = self.config.origin_url()?;
		let mut history = HistoryAdapter::new(self.backend);
		if !self.config.manual_scroll_restoration {
			history = history.keep_browser_scroll_restoration();
		}
		let broadcaster = self
			.broadcaster
			.unwrap_or_else(|| Rc::new(|_: Broadcast| {}) as Rc<dyn Broadcaster>);
		let initial_path = history.location_path();

		let navigator = Rc::new_cyclic(|this: &Weak<Navigator>| {
			let listener = this.clone();
			history.on_entry_activated(move |state| {
				if let Some(navigator) = listener.upgrade() {
					navigator.on_history_entry_activated(state);
				}
			});

			Navigator {
				config: self.config,
				origin,
				history,
				host: self.host,
				spawner: self.spawner,
				broadcaster,
				current_path: RefCell::new(initial_path),
				scroll_cache: RefCell::new(ScrollCache::new()),
				phase: Cell::new(Phase::Loading),
				this: this.clone(),
			}
		});

		navigator.host.render(&Outlet::Loading);
		Ok(navigator)
	}
}

/// The client-side navigation controller.
pub struct Navigator {
	config: NavigatorConfig,
	origin: Url,
	history: HistoryAdapter,
	host: Rc<dyn ViewHost>,
	spawner: Rc<dyn Spawner>,
	broadcaster: Rc<dyn Broadcaster>,
	current_path: RefCell<String>,
	scroll_cache: RefCell<ScrollCache>,
	phase: Cell<Phase>,
	this: Weak<Navigator>,
}

impl std::fmt::Debug for Navigator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Navigator")
			.field("current_path", &*self.current_path.borrow())
			.field("phase", &self.phase.get())
			.field("scroll_cache", &*self.scroll_cache.borrow())
			.finish()
	}
}

impl Navigator {
	/// Starts building a navigator.
	pub fn builder(
		backend: Rc<dyn HistoryBackend>,
		host: Rc<dyn ViewHost>,
		spawner: Rc<dyn Spawner>,
	) -> NavigatorBuilder {
		NavigatorBuilder {
			backend,
			host,
			spawner,
			broadcaster: None,
			config: NavigatorConfig::default(),
		}
	}

	/// The active configuration.
	pub fn config(&self) -> &NavigatorConfig {
		&self.config
	}

	/// Parsed document origin.
	pub fn origin(&self) -> &Url {
		&self.origin
	}

	/// The history adapter; platform glue feeds `popstate` into it.
	pub fn history(&self) -> &HistoryAdapter {
		&self.history
	}

	/// The current path.
	pub fn current_path(&self) -> String {
		self.current_path.borrow().clone()
	}

	/// The route for the current path.
	pub fn current_route(&self) -> Route {
		Route::resolve(&self.current_path.borrow())
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> Phase {
		self.phase.get()
	}

	/// Returns `true` until bootstrap has finished.
	pub fn is_loading(&self) -> bool {
		self.phase.get() == Phase::Loading
	}

	/// The remembered anchor-page offset, if any.
	pub fn cached_scroll(&self) -> Option<(String, f64)> {
		self.scroll_cache
			.borrow()
			.entry()
			.map(|entry| (entry.pathname.clone(), entry.scroll_y))
	}

	/// A cloneable navigation capability for views.
	pub fn handle(&self) -> NavigationHandle {
		NavigationHandle {
			navigator: self.this.clone(),
		}
	}

	/// Runs session bootstrap, then enters [`Phase::Ready`].
	///
	/// The transition happens even if `session` fails or panics; its error is
	/// returned unchanged.
	pub async fn bootstrap<F, T, E>(&self, session: F) -> Result<T, E>
	where
		F: Future<Output = Result<T, E>>,
	{
		let _ready = scopeguard::guard((), |()| self.mark_ready());
		session.await
	}

	fn mark_ready(&self) {
		if self.phase.replace(Phase::Ready) == Phase::Ready {
			return;
		}
		crate::info_log!("navigator ready at {}", self.current_path.borrow());
		self.host.render(&Outlet::Route(self.current_route()));
	}

	/// Navigates to `path`, pushing a new history entry.
	///
	/// If the page being left is an anchor page its offset is cached, and if
	/// `path` is the cached page the offset is restored after render.
	///
	/// On error the current path and the scroll cache are left as they were.
	/// The outgoing entry may already carry its own offset.
	pub fn navigate_to(&self, path: &str) -> Result<(), RouterError> {
		self.history.ensure_manual_scroll_restoration()?;

		let scroll_y = self.history.scroll_y();
		let leaving = self.current_path();

		self.history
			.update_current_entry_state(&HistoryState::new(scroll_y))?;
		self.history.push_entry(path)?;

		if self.config.is_anchor(&leaving) {
			self.scroll_cache
				.borrow_mut()
				.capture(leaving.as_str(), scroll_y);
		}

		crate::debug_log!("navigate {} -> {}", leaving, path);
		self.set_current_path(path);

		let cached = self.scroll_cache.borrow().try_consume(path);
		if let Some(scroll_y) = cached {
			self.schedule_scroll_restore(scroll_y);
		}
		Ok(())
	}

	/// Handles a back/forward activation of a history entry.
	pub fn on_history_entry_activated(&self, state: Option<HistoryState>) {
		self.broadcaster.broadcast(Broadcast::DismissOverlays);

		let path = self.history.location_path();
		crate::debug_log!("history entry activated: {}", path);
		self.set_current_path(&path);

		if let Some(scroll_y) = state.and_then(|s| s.restorable_offset()) {
			self.schedule_scroll_restore(scroll_y);
		}
	}

	fn set_current_path(&self, path: &str) {
		*self.current_path.borrow_mut() = path.to_string();
		if self.phase.get() == Phase::Ready {
			self.host.render(&Outlet::Route(Route::resolve(path)));
		}
	}

	/// Restores `scroll_y` on the active view after the pending render.
	///
	/// Failures are dropped; see [`restore_scroll`].
	pub fn schedule_scroll_restore(&self, scroll_y: f64) {
		let host = Rc::clone(&self.host);
		self.spawner.spawn_local(Box::pin(async move {
			let _ = restore_scroll(host, scroll_y).await;
		}));
	}
}

/// Waits for the pending render, then hands `scroll_y` to the mounted view.
///
/// Best-effort: the result says whether the offset was applied, and callers
/// are free to ignore it.
pub async fn restore_scroll(host: Rc<dyn ViewHost>, scroll_y: f64) -> Result<(), ScrollError> {
	if !scroll_y.is_finite() || scroll_y < 0.0 {
		return Err(ScrollError::InvalidOffset(scroll_y));
	}
	host.update_complete().await;
	let view = host.active_view().ok_or(ScrollError::NotMounted)?;
	view.scroll_to_cached_position(scroll_y)
}

/// Navigation capability handed down the view tree.
///
/// Holds a weak reference; requests made after the navigator is dropped
/// are ignored.
#[derive(Debug, Clone)]
pub struct NavigationHandle {
	navigator: Weak<Navigator>,
}

impl NavigationHandle {
	/// Asks the navigator to go to `path`.
	pub fn request_navigation(&self, path: &str) -> Result<(), RouterError> {
		match self.navigator.upgrade() {
			Some(navigator) => navigator.navigate_to(path),
			None => Ok(()),
		}
	}

	/// The navigator's current path, if it is still alive.
	pub fn current_path(&self) -> Option<String> {
		self.navigator.upgrade().map(|n| n.current_path())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::MemoryHistory;
	use crate::host::MountedView;
	use crate::route::PageKind;
	use futures::executor::LocalPool;
	use futures::future::{self, LocalBoxFuture};
	use rstest::rstest;

	struct Feed;

	impl MountedView for Feed {
		fn name(&self) -> &str {
			"feed"
		}

		fn scroll_to_cached_position(&self, _scroll_y: f64) -> Result<(), ScrollError> {
			Ok(())
		}
	}

	struct Plain;

	impl MountedView for Plain {
		fn name(&self) -> &str {
			"plain"
		}
	}

	#[derive(Default)]
	struct StubHost {
		rendered: RefCell<Vec<Outlet>>,
		view: RefCell<Option<Rc<dyn MountedView>>>,
	}

	impl ViewHost for StubHost {
		fn render(&self, outlet: &Outlet) {
			self.rendered.borrow_mut().push(outlet.clone());
		}

		fn update_complete(&self) -> LocalBoxFuture<'static, ()> {
			Box::pin(future::ready(()))
		}

		fn active_view(&self) -> Option<Rc<dyn MountedView>> {
			self.view.borrow().clone()
		}
	}

	fn navigator(pool: &LocalPool) -> (Rc<Navigator>, Rc<MemoryHistory>, Rc<StubHost>) {
		let memory = Rc::new(MemoryHistory::new("/"));
		let host = Rc::new(StubHost::default());
		let navigator = Navigator::builder(memory.clone(), host.clone(), Rc::new(pool.spawner()))
			.build()
			.unwrap();
		(navigator, memory, host)
	}

	#[rstest]
	fn test_build_renders_placeholder() {
		let pool = LocalPool::new();
		let (navigator, _, host) = navigator(&pool);

		assert!(navigator.is_loading());
		assert_eq!(*host.rendered.borrow(), vec![Outlet::Loading]);
	}

	#[rstest]
	fn test_navigation_while_loading_updates_path_only() {
		let pool = LocalPool::new();
		let (navigator, memory, host) = navigator(&pool);

		navigator.navigate_to("/search").unwrap();

		assert_eq!(navigator.current_path(), "/search");
		assert_eq!(memory.location_path(), "/search");
		assert_eq!(host.rendered.borrow().len(), 1);
	}

	#[rstest]
	fn test_bootstrap_renders_current_route() {
		let mut pool = LocalPool::new();
		let (navigator, _, host) = navigator(&pool);
		navigator.navigate_to("/communities").unwrap();

		let out: Result<u8, ()> = pool.run_until(navigator.bootstrap(async { Ok(7) }));

		assert_eq!(out, Ok(7));
		assert_eq!(navigator.phase(), Phase::Ready);
		assert_eq!(
			host.rendered.borrow().last(),
			Some(&Outlet::Route(Route::Page(PageKind::Communities)))
		);
	}

	#[rstest]
	fn test_restore_scroll_outcomes() {
		let mut pool = LocalPool::new();
		let host = Rc::new(StubHost::default());
		let as_host = || -> Rc<dyn ViewHost> { host.clone() };

		assert_eq!(
			pool.run_until(restore_scroll(as_host(), 10.0)),
			Err(ScrollError::NotMounted)
		);

		*host.view.borrow_mut() = Some(Rc::new(Plain));
		assert_eq!(
			pool.run_until(restore_scroll(as_host(), 10.0)),
			Err(ScrollError::HookMissing("plain".to_string()))
		);

		*host.view.borrow_mut() = Some(Rc::new(Feed));
		assert_eq!(pool.run_until(restore_scroll(as_host(), 10.0)), Ok(()));
		assert!(matches!(
			pool.run_until(restore_scroll(as_host(), f64::INFINITY)),
			Err(ScrollError::InvalidOffset(_))
		));
	}

	#[rstest]
	fn test_handle_after_drop_is_noop() {
		let pool = LocalPool::new();
		let (navigator, memory, _) = navigator(&pool);
		let handle = navigator.handle();
		drop(navigator);

		assert!(handle.request_navigation("/account").is_ok());
		assert!(handle.current_path().is_none());
		assert_eq!(memory.len(), 1);
	}
}
