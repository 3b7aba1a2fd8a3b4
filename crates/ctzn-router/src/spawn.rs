//! Local task spawning.
//!
//! Scroll restoration is the only deferred work in the navigator. It is
//! handed to a [`Spawner`]: `wasm_bindgen_futures::spawn_local` in the
//! browser, a `futures` local pool natively.

use futures::future::LocalBoxFuture;
use futures::executor::LocalSpawner;
use futures::task::LocalSpawnExt;

/// Runs `'static` futures on the current thread.
pub trait Spawner {
	/// Schedules `task`; it must not run before this call returns.
	fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

impl Spawner for LocalSpawner {
	fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
		if let Err(_err) = LocalSpawnExt::spawn_local(self, task) {
			crate::warn_log!("local pool shut down, dropping task: {}", _err);
		}
	}
}

/// Spawner backed by the browser's microtask queue.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

#[cfg(target_arch = "wasm32")]
impl Spawner for WasmSpawner {
	fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
		wasm_bindgen_futures::spawn_local(task);
	}
}
