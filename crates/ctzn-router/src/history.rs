//! Session history integration.
//!
//! [`HistoryBackend`] is the seam to the browser's History API. The WASM
//! build provides [`crate::browser::BrowserHistory`]; native builds and tests
//! use [`MemoryHistory`]. [`HistoryAdapter`] sits on top and owns the
//! one-time switch to manual scroll restoration and the "entry activated"
//! subscribers.

use crate::error::HistoryError;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// State payload attached to a history entry.
///
/// Serialized as `{ "scrollY": number }`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryState {
	/// Scroll offset recorded when the entry was left.
	#[serde(rename = "scrollY", default)]
	pub scroll_y: f64,
}

impl HistoryState {
	/// Creates a state carrying a scroll offset.
	pub fn new(scroll_y: f64) -> Self {
		Self { scroll_y }
	}

	/// Encodes the payload as JSON.
	pub fn to_json(&self) -> Result<String, HistoryError> {
		Ok(serde_json::to_string(self)?)
	}

	/// Decodes a payload; anything unreadable counts as no state.
	pub fn from_json(json: &str) -> Option<Self> {
		serde_json::from_str(json).ok()
	}

	/// Offset worth restoring, if any. Zero and non-finite values are not.
	pub fn restorable_offset(&self) -> Option<f64> {
		(self.scroll_y.is_finite() && self.scroll_y != 0.0).then_some(self.scroll_y)
	}
}

/// Browser scroll restoration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollRestoration {
	/// The browser restores scroll on back/forward.
	#[default]
	Auto,
	/// Scroll positioning is left to the page.
	Manual,
}

/// Access to the session history and the window's scroll offset.
pub trait HistoryBackend {
	/// Sets the browser's scroll restoration mode.
	fn set_scroll_restoration(&self, mode: ScrollRestoration) -> Result<(), HistoryError>;

	/// Pushes a new entry for `path` with empty state.
	fn push_entry(&self, path: &str) -> Result<(), HistoryError>;

	/// Overwrites the current entry's state in place.
	fn replace_state(&self, state: &HistoryState) -> Result<(), HistoryError>;

	/// Pathname of the current location.
	fn location_path(&self) -> String;

	/// Current vertical scroll offset of the window.
	fn scroll_y(&self) -> f64;
}

type EntryListener = Rc<dyn Fn(Option<HistoryState>)>;

/// Wraps a [`HistoryBackend`] with the navigation-specific protocol.
pub struct HistoryAdapter {
	backend: Rc<dyn HistoryBackend>,
	manual_restoration: bool,
	restoration_disabled: Cell<bool>,
	listeners: RefCell<Vec<EntryListener>>,
}

impl std::fmt::Debug for HistoryAdapter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HistoryAdapter")
			.field("restoration_disabled", &self.restoration_disabled.get())
			.field("listeners", &self.listeners.borrow().len())
			.finish()
	}
}

impl HistoryAdapter {
	/// Creates an adapter that switches to manual scroll restoration on first use.
	pub fn new(backend: Rc<dyn HistoryBackend>) -> Self {
		Self {
			backend,
			manual_restoration: true,
			restoration_disabled: Cell::new(false),
			listeners: RefCell::new(Vec::new()),
		}
	}

	/// Leaves the browser's own scroll restoration alone.
	pub fn keep_browser_scroll_restoration(mut self) -> Self {
		self.manual_restoration = false;
		self
	}

	/// Switches scroll restoration to manual; repeated calls are no-ops.
	pub fn ensure_manual_scroll_restoration(&self) -> Result<(), HistoryError> {
		if !self.manual_restoration || self.restoration_disabled.get() {
			return Ok(());
		}
		self.backend
			.set_scroll_restoration(ScrollRestoration::Manual)?;
		self.restoration_disabled.set(true);
		Ok(())
	}

	/// Stamps the current entry with `state`.
	///
	/// Call right before [`push_entry`](Self::push_entry) so that the entry
	/// being left remembers its scroll offset.
	pub fn update_current_entry_state(&self, state: &HistoryState) -> Result<(), HistoryError> {
		self.backend.replace_state(state)
	}

	/// Pushes a new entry for `path` with empty state.
	pub fn push_entry(&self, path: &str) -> Result<(), HistoryError> {
		self.backend.push_entry(path)
	}

	/// Pathname of the current location.
	pub fn location_path(&self) -> String {
		self.backend.location_path()
	}

	/// Current window scroll offset.
	pub fn scroll_y(&self) -> f64 {
		self.backend.scroll_y()
	}

	/// Registers a listener for back/forward activations.
	pub fn on_entry_activated<F>(&self, listener: F)
	where
		F: Fn(Option<HistoryState>) + 'static,
	{
		self.listeners.borrow_mut().push(Rc::new(listener));
	}

	/// Notifies listeners that the browser reactivated an entry.
	///
	/// Called by the platform glue when `popstate` fires.
	pub fn entry_activated(&self, state: Option<HistoryState>) {
		let listeners: Vec<EntryListener> = self.listeners.borrow().clone();
		for listener in listeners {
			listener(state);
		}
	}
}

#[derive(Debug, Clone)]
struct MemoryEntry {
	path: String,
	state: Option<HistoryState>,
}

/// In-memory session history for native builds and tests.
///
/// Behaves like the browser's stack: pushing truncates forward entries,
/// [`back`](Self::back) and [`forward`](Self::forward) move the cursor and
/// return the reactivated entry's state.
#[derive(Debug)]
pub struct MemoryHistory {
	entries: RefCell<Vec<MemoryEntry>>,
	cursor: Cell<usize>,
	scroll_restoration: Cell<ScrollRestoration>,
	scroll_y: Cell<f64>,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a history holding a single entry for `initial_path`.
	pub fn new(initial_path: impl Into<String>) -> Self {
		Self {
			entries: RefCell::new(vec![MemoryEntry {
				path: initial_path.into(),
				state: None,
			}]),
			cursor: Cell::new(0),
			scroll_restoration: Cell::new(ScrollRestoration::Auto),
			scroll_y: Cell::new(0.0),
		}
	}

	/// Simulates the user scrolling the window.
	pub fn set_scroll_y(&self, scroll_y: f64) {
		self.scroll_y.set(scroll_y);
	}

	/// Current scroll restoration mode.
	pub fn scroll_restoration(&self) -> ScrollRestoration {
		self.scroll_restoration.get()
	}

	/// Number of entries in the stack.
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Returns `true` if the stack is empty (never, after construction).
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	/// State stored on the entry at `index`.
	pub fn state_at(&self, index: usize) -> Option<HistoryState> {
		self.entries.borrow().get(index).and_then(|e| e.state)
	}

	/// Index of the current entry.
	pub fn cursor(&self) -> usize {
		self.cursor.get()
	}

	/// Moves one entry back; returns `None` at the start of the stack.
	pub fn back(&self) -> Option<Option<HistoryState>> {
		let cursor = self.cursor.get();
		if cursor == 0 {
			return None;
		}
		self.cursor.set(cursor - 1);
		Some(self.state_at(cursor - 1))
	}

	/// Moves one entry forward; returns `None` at the end of the stack.
	pub fn forward(&self) -> Option<Option<HistoryState>> {
		let cursor = self.cursor.get();
		if cursor + 1 >= self.len() {
			return None;
		}
		self.cursor.set(cursor + 1);
		Some(self.state_at(cursor + 1))
	}
}

impl HistoryBackend for MemoryHistory {
	fn set_scroll_restoration(&self, mode: ScrollRestoration) -> Result<(), HistoryError> {
		self.scroll_restoration.set(mode);
		Ok(())
	}

	fn push_entry(&self, path: &str) -> Result<(), HistoryError> {
		let mut entries = self.entries.borrow_mut();
		entries.truncate(self.cursor.get() + 1);
		entries.push(MemoryEntry {
			path: path.to_string(),
			state: None,
		});
		self.cursor.set(entries.len() - 1);
		Ok(())
	}

	fn replace_state(&self, state: &HistoryState) -> Result<(), HistoryError> {
		let mut entries = self.entries.borrow_mut();
		let entry = entries
			.get_mut(self.cursor.get())
			.ok_or(HistoryError::Unavailable)?;
		entry.state = Some(*state);
		Ok(())
	}

	fn location_path(&self) -> String {
		self.entries
			.borrow()
			.get(self.cursor.get())
			.map(|e| e.path.clone())
			.unwrap_or_else(|| "/".to_string())
	}

	fn scroll_y(&self) -> f64 {
		self.scroll_y.get()
	}
}
