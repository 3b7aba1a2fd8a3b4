//! The seam between the navigator and the view layer.
//!
//! The navigator never renders anything itself. It tells a [`ViewHost`] what
//! to show, asks it when the render has committed, and reaches the mounted
//! view's scroll hook through it.

use crate::error::ScrollError;
use crate::route::Route;
use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// What the outlet should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outlet {
	/// Session bootstrap is still running.
	Loading,
	/// The view for a resolved route.
	Route(Route),
}

/// Notifications broadcast to the whole view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Broadcast {
	/// Close menus, popups and other transient overlays.
	DismissOverlays,
}

impl Broadcast {
	/// DOM event name used when the broadcast is dispatched on `document`.
	pub fn event_name(self) -> &'static str {
		match self {
			Self::DismissOverlays => "close-all-popups",
		}
	}
}

/// A view currently mounted in the outlet.
pub trait MountedView {
	/// Identifier of the view, for diagnostics.
	fn name(&self) -> &str;

	/// Scrolls the view to a previously recorded offset.
	///
	/// Views without their own scroll handling keep the default.
	fn scroll_to_cached_position(&self, scroll_y: f64) -> Result<(), ScrollError> {
		let _ = scroll_y;
		Err(ScrollError::HookMissing(self.name().to_string()))
	}
}

/// Renders navigator output and exposes the mounted view.
pub trait ViewHost {
	/// Schedules a render of `outlet`.
	fn render(&self, outlet: &Outlet);

	/// Resolves once the most recently scheduled render has committed.
	fn update_complete(&self) -> LocalBoxFuture<'static, ()>;

	/// The view currently mounted, if any.
	fn active_view(&self) -> Option<Rc<dyn MountedView>>;
}

/// Delivers [`Broadcast`]s to whoever owns overlays.
pub trait Broadcaster {
	/// Sends `notice` to every listener.
	fn broadcast(&self, notice: Broadcast);
}

impl<F> Broadcaster for F
where
	F: Fn(Broadcast),
{
	fn broadcast(&self, notice: Broadcast) {
		self(notice)
	}
}
