//! Browser bindings (WASM only).
//!
//! Wires a [`Navigator`] to the real page: the History API, `window.scrollY`,
//! a delegated click listener on `<body>`, the `popstate` listener and the
//! `navigate-to` / `view-thread` custom events.
//!
//! ```ignore
//! use ctzn_router::browser;
//!
//! let navigator = browser::launch(host, NavigatorConfig::default())?;
//! wasm_bindgen_futures::spawn_local(async move {
//!     let _ = navigator.bootstrap(session::setup()).await;
//! });
//! ```

use crate::config::NavigatorConfig;
use crate::error::HistoryError;
use crate::history::{HistoryBackend, HistoryState, ScrollRestoration};
use crate::host::{Broadcast, Broadcaster, ViewHost};
use crate::intercept::{ClickEvent, Modifiers, PathNode};
use crate::navigator::Navigator;
use crate::request::{NAVIGATE_TO_EVENT, NavigationRequest, VIEW_THREAD_EVENT};
use crate::spawn::WasmSpawner;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, Element, Event, EventInit, MouseEvent, PopStateEvent, Window};

fn js_error(value: JsValue) -> HistoryError {
	HistoryError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// [`HistoryBackend`] over `window.history`.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
	window: Window,
}

impl BrowserHistory {
	/// Binds to the global `window`.
	pub fn new() -> Result<Self, HistoryError> {
		let window = web_sys::window().ok_or(HistoryError::Unavailable)?;
		Ok(Self { window })
	}

	/// `location.origin` of the document.
	pub fn origin(&self) -> Result<String, HistoryError> {
		self.window.location().origin().map_err(js_error)
	}

	fn history(&self) -> Result<web_sys::History, HistoryError> {
		self.window.history().map_err(js_error)
	}
}

impl HistoryBackend for BrowserHistory {
	fn set_scroll_restoration(&self, mode: ScrollRestoration) -> Result<(), HistoryError> {
		let mode = match mode {
			ScrollRestoration::Auto => web_sys::ScrollRestoration::Auto,
			ScrollRestoration::Manual => web_sys::ScrollRestoration::Manual,
		};
		self.history()?.set_scroll_restoration(mode).map_err(js_error)
	}

	fn push_entry(&self, path: &str) -> Result<(), HistoryError> {
		self.history()?
			.push_state_with_url(&js_sys::Object::new(), "", Some(path))
			.map_err(js_error)
	}

	fn replace_state(&self, state: &HistoryState) -> Result<(), HistoryError> {
		let payload = js_sys::JSON::parse(&state.to_json()?).map_err(js_error)?;
		self.history()?.replace_state(&payload, "").map_err(js_error)
	}

	fn location_path(&self) -> String {
		self.window
			.location()
			.pathname()
			.unwrap_or_else(|_| "/".to_string())
	}

	fn scroll_y(&self) -> f64 {
		self.window.scroll_y().unwrap_or(0.0)
	}
}

/// Dispatches broadcasts as bubbling, composed DOM events on `document`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentBroadcaster;

impl Broadcaster for DocumentBroadcaster {
	fn broadcast(&self, notice: Broadcast) {
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return;
		};
		let init = EventInit::new();
		init.set_bubbles(true);
		init.set_composed(true);
		match Event::new_with_event_init_dict(notice.event_name(), &init) {
			Ok(event) => {
				let _ = document.dispatch_event(&event);
			}
			Err(_err) => crate::warn_log!("failed to create {}: {:?}", notice.event_name(), _err),
		}
	}
}

fn state_from_js(value: &JsValue) -> Option<HistoryState> {
	if value.is_null() || value.is_undefined() {
		return None;
	}
	let json = js_sys::JSON::stringify(value).ok()?.as_string()?;
	HistoryState::from_json(&json)
}

fn click_from_js(event: &MouseEvent) -> ClickEvent {
	let composed_path = event
		.composed_path()
		.iter()
		.filter_map(|target| target.dyn_into::<Element>().ok())
		.map(|el| PathNode {
			tag_name: el.tag_name(),
			href: el.get_attribute("href"),
			target: el.get_attribute("target"),
			download: el.has_attribute("download"),
		})
		.collect();

	ClickEvent {
		composed_path,
		default_prevented: event.default_prevented(),
		button: event.button(),
		modifiers: Modifiers {
			ctrl: event.ctrl_key(),
			meta: event.meta_key(),
			shift: event.shift_key(),
			alt: event.alt_key(),
		},
	}
}

fn request_from_js(name: &str, event: &Event) -> Option<NavigationRequest> {
	let detail = event.dyn_ref::<CustomEvent>()?.detail();
	let json = js_sys::JSON::stringify(&detail).ok()?.as_string()?;
	NavigationRequest::from_event(name, &json)
}

/// Attaches the click, `popstate` and request listeners for `navigator`.
///
/// The closures are leaked with `forget()`; they live as long as the page.
pub fn install(navigator: &Rc<Navigator>) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("No document object"))?;
	let body = document
		.body()
		.ok_or_else(|| JsValue::from_str("No body element"))?;

	// 1. Delegated link clicks
	let weak: Weak<Navigator> = Rc::downgrade(navigator);
	let click_handler = Closure::wrap(Box::new(move |event: Event| {
		let Some(navigator) = weak.upgrade() else {
			return;
		};
		let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
			return;
		};
		if navigator.handle_click(&click_from_js(mouse)).is_intercepted() {
			event.prevent_default();
		}
	}) as Box<dyn FnMut(_)>);
	body.add_event_listener_with_callback("click", click_handler.as_ref().unchecked_ref())?;
	click_handler.forget();

	// 2. Back/forward
	let weak: Weak<Navigator> = Rc::downgrade(navigator);
	let popstate_handler = Closure::wrap(Box::new(move |event: Event| {
		let Some(navigator) = weak.upgrade() else {
			return;
		};
		let state = event
			.dyn_ref::<PopStateEvent>()
			.and_then(|e| state_from_js(&e.state()));
		navigator.history().entry_activated(state);
	}) as Box<dyn FnMut(_)>);
	window
		.add_event_listener_with_callback("popstate", popstate_handler.as_ref().unchecked_ref())?;
	popstate_handler.forget();

	// 3. Requests raised by views
	for name in [NAVIGATE_TO_EVENT, VIEW_THREAD_EVENT] {
		let weak: Weak<Navigator> = Rc::downgrade(navigator);
		let request_handler = Closure::wrap(Box::new(move |event: Event| {
			let Some(navigator) = weak.upgrade() else {
				return;
			};
			match request_from_js(name, &event) {
				Some(request) => {
					if let Err(_err) = navigator.dispatch(&request) {
						crate::warn_log!("{} rejected: {}", name, _err);
					}
				}
				None => crate::warn_log!("malformed {} event", name),
			}
		}) as Box<dyn FnMut(_)>);
		body.add_event_listener_with_callback(name, request_handler.as_ref().unchecked_ref())?;
		request_handler.forget();
	}

	Ok(())
}

/// Builds a navigator bound to the browser and installs its listeners.
///
/// `config.origin` is replaced with the document's own origin.
pub fn launch(host: Rc<dyn ViewHost>, config: NavigatorConfig) -> Result<Rc<Navigator>, JsValue> {
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();

	let history = BrowserHistory::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
	let origin = history
		.origin()
		.map_err(|e| JsValue::from_str(&e.to_string()))?;

	let navigator = Navigator::builder(Rc::new(history), host, Rc::new(WasmSpawner))
		.config(config.with_origin(origin))
		.broadcaster(Rc::new(DocumentBroadcaster))
		.build()
		.map_err(|e| JsValue::from_str(&e.to_string()))?;

	install(&navigator)?;
	Ok(navigator)
}
