//! Click interception for in-app links.
//!
//! A single listener at the root of the view tree sees every click. The
//! event's composed path is searched for the nearest `<a>`, so links inside
//! nested components are found even across shadow boundaries. Same-origin
//! links become [`Navigator::navigate_to`] calls with the path only;
//! everything else is left to the browser.

use crate::navigator::Navigator;
use url::Url;

/// One element on a click's composed dispatch path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathNode {
	/// Element tag name, any case.
	pub tag_name: String,
	/// Raw `href` attribute.
	pub href: Option<String>,
	/// Raw `target` attribute.
	pub target: Option<String>,
	/// Whether a `download` attribute is present.
	pub download: bool,
}

impl PathNode {
	/// A non-anchor element.
	pub fn element(tag_name: impl Into<String>) -> Self {
		Self {
			tag_name: tag_name.into(),
			..Self::default()
		}
	}

	/// An `<a>` element with the given `href`.
	pub fn anchor(href: impl Into<String>) -> Self {
		Self {
			tag_name: "A".to_string(),
			href: Some(href.into()),
			..Self::default()
		}
	}

	/// Sets the `target` attribute.
	pub fn with_target(mut self, target: impl Into<String>) -> Self {
		self.target = Some(target.into());
		self
	}

	/// Marks the element as a download link.
	pub fn with_download(mut self) -> Self {
		self.download = true;
		self
	}

	fn is_anchor(&self) -> bool {
		self.tag_name.eq_ignore_ascii_case("a")
	}
}

/// Keyboard modifiers held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
	/// Ctrl key.
	pub ctrl: bool,
	/// Meta (Cmd / Windows) key.
	pub meta: bool,
	/// Shift key.
	pub shift: bool,
	/// Alt / Option key.
	pub alt: bool,
}

impl Modifiers {
	fn any(self) -> bool {
		self.ctrl || self.meta || self.shift || self.alt
	}
}

/// The parts of a DOM click event the interceptor looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
	/// Composed dispatch path, innermost target first.
	pub composed_path: Vec<PathNode>,
	/// `event.defaultPrevented` when the root listener ran.
	pub default_prevented: bool,
	/// `event.button`; 0 is the primary button.
	pub button: i16,
	/// Modifier keys.
	pub modifiers: Modifiers,
}

impl ClickEvent {
	/// A primary-button click travelling along `composed_path`.
	pub fn new(composed_path: Vec<PathNode>) -> Self {
		Self {
			composed_path,
			..Self::default()
		}
	}

	/// Marks the event as already handled upstream.
	pub fn prevented(mut self) -> Self {
		self.default_prevented = true;
		self
	}

	/// Sets the mouse button.
	pub fn with_button(mut self, button: i16) -> Self {
		self.button = button;
		self
	}

	/// Sets the modifier keys.
	pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
		self.modifiers = modifiers;
		self
	}
}

/// Why a click was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
	/// Something upstream already called `preventDefault`.
	AlreadyHandled,
	/// A modifier key or non-primary button was used.
	ModifiedClick,
	/// No anchor on the composed path.
	NoAnchor,
	/// The anchor has no `href`.
	NoHref,
	/// The anchor targets another browsing context.
	OtherTarget,
	/// The anchor is a download link.
	Download,
	/// The `href` cannot be resolved.
	InvalidHref,
	/// The `href` resolves to another origin.
	CrossOrigin,
	/// The history write failed, so the browser navigates instead.
	HistoryUnavailable,
}

/// Outcome of inspecting a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception {
	/// Prevent the default action and navigate to this path.
	Navigate(String),
	/// Let the browser handle the click.
	PassThrough(PassReason),
}

impl Interception {
	/// Returns `true` if the caller must call `preventDefault`.
	pub fn is_intercepted(&self) -> bool {
		matches!(self, Self::Navigate(_))
	}
}

/// Decides whether a click becomes client-side navigation.
pub fn intercept(click: &ClickEvent, origin: &Url) -> Interception {
	use PassReason::*;

	if click.default_prevented {
		return Interception::PassThrough(AlreadyHandled);
	}
	if click.button != 0 || click.modifiers.any() {
		return Interception::PassThrough(ModifiedClick);
	}

	let Some(anchor) = click.composed_path.iter().find(|node| node.is_anchor()) else {
		return Interception::PassThrough(NoAnchor);
	};
	let Some(href) = anchor.href.as_deref() else {
		return Interception::PassThrough(NoHref);
	};
	if let Some(target) = anchor.target.as_deref()
		&& !target.is_empty()
		&& !target.eq_ignore_ascii_case("_self")
	{
		return Interception::PassThrough(OtherTarget);
	}
	if anchor.download {
		return Interception::PassThrough(Download);
	}

	let Ok(resolved) = origin.join(href) else {
		return Interception::PassThrough(InvalidHref);
	};
	if resolved.origin() != origin.origin() {
		return Interception::PassThrough(CrossOrigin);
	}
	Interception::Navigate(resolved.path().to_string())
}

impl Navigator {
	/// Handles a click that bubbled to the root listener.
	///
	/// Returns the decision so the caller can call `preventDefault`. If the
	/// history write fails the click is handed back to the browser.
	pub fn handle_click(&self, click: &ClickEvent) -> Interception {
		let decision = intercept(click, self.origin());
		if let Interception::Navigate(path) = &decision
			&& let Err(_err) = self.navigate_to(path)
		{
			crate::warn_log!("client-side navigation to {} failed: {}", path, _err);
			return Interception::PassThrough(PassReason::HistoryUnavailable);
		}
		decision
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn origin() -> Url {
		Url::parse("https://ctzn.one").unwrap()
	}

	fn click_on(href: &str) -> ClickEvent {
		ClickEvent::new(vec![
			PathNode::element("SPAN"),
			PathNode::anchor(href),
			PathNode::element("APP-ROOT"),
		])
	}

	#[rstest]
	#[case("/notifications", "/notifications")]
	#[case("https://ctzn.one/search?q=rust", "/search")]
	#[case("/notifications#latest", "/notifications")]
	#[case("#top", "/")]
	#[case("alice@example.com", "/alice@example.com")]
	fn test_same_origin_is_intercepted(#[case] href: &str, #[case] expected: &str) {
		assert_eq!(
			intercept(&click_on(href), &origin()),
			Interception::Navigate(expected.to_string())
		);
	}

	#[rstest]
	#[case("https://example.com/")]
	#[case("//example.com/path")]
	#[case("http://ctzn.one/")]
	#[case("https://ctzn.one:8443/")]
	#[case("mailto:alice@example.com")]
	fn test_cross_origin_passes_through(#[case] href: &str) {
		assert_eq!(
			intercept(&click_on(href), &origin()),
			Interception::PassThrough(PassReason::CrossOrigin)
		);
	}

	#[rstest]
	fn test_nearest_anchor_wins() {
		let click = ClickEvent::new(vec![
			PathNode::element("IMG"),
			PathNode::anchor("/inner"),
			PathNode::anchor("/outer"),
		]);
		assert_eq!(
			intercept(&click, &origin()),
			Interception::Navigate("/inner".to_string())
		);
	}

	#[rstest]
	fn test_lowercase_tag_is_anchor() {
		let mut node = PathNode::anchor("/account");
		node.tag_name = "a".to_string();
		assert!(intercept(&ClickEvent::new(vec![node]), &origin()).is_intercepted());
	}

	#[rstest]
	#[case(click_on("/x").prevented(), PassReason::AlreadyHandled)]
	#[case(click_on("/x").with_button(1), PassReason::ModifiedClick)]
	#[case(
		click_on("/x").with_modifiers(Modifiers { meta: true, ..Modifiers::default() }),
		PassReason::ModifiedClick
	)]
	#[case(ClickEvent::new(vec![PathNode::element("BUTTON")]), PassReason::NoAnchor)]
	#[case(ClickEvent::new(vec![PathNode::element("A")]), PassReason::NoHref)]
	#[case(
		ClickEvent::new(vec![PathNode::anchor("/x").with_target("_blank")]),
		PassReason::OtherTarget
	)]
	#[case(
		ClickEvent::new(vec![PathNode::anchor("/x").with_download()]),
		PassReason::Download
	)]
	#[case(click_on("http://[::1"), PassReason::InvalidHref)]
	fn test_pass_through_reasons(#[case] click: ClickEvent, #[case] reason: PassReason) {
		assert_eq!(
			intercept(&click, &origin()),
			Interception::PassThrough(reason)
		);
	}

	#[rstest]
	fn test_target_self_is_intercepted() {
		let click = ClickEvent::new(vec![PathNode::anchor("/x").with_target("_self")]);
		assert!(intercept(&click, &origin()).is_intercepted());
	}
}
