//! Fixed-period tick source backed by `window.setInterval`.
//!
//! At most one interval is registered per driver. Starting again replaces the
//! previous interval, and stopping (or dropping the driver) clears it, so no
//! tick can fire for a torn-down board. The tick closure itself can end the
//! run by returning [`ControlFlow::Break`].

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::error::DriverError;

struct ActiveInterval {
	/// Cleared as soon as the interval is, including from inside a tick.
	handle: Rc<Cell<Option<i32>>>,
	period_ms: u32,
	// Must outlive the registered interval.
	_callback: Closure<dyn FnMut()>,
}

/// Calls a closure once per period until stopped.
#[derive(Default)]
pub struct TickDriver {
	active: Option<ActiveInterval>,
}

impl TickDriver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `on_tick` to run every `period_ms` milliseconds, replacing
	/// any running interval. The interval is cleared the first time
	/// `on_tick` breaks.
	pub fn start(
		&mut self,
		period_ms: u32,
		on_tick: impl FnMut() -> ControlFlow<()> + 'static,
	) -> Result<(), DriverError> {
		self.stop();

		let window = web_sys::window().ok_or(DriverError::NoWindow)?;
		let handle = Rc::new(Cell::new(None));
		let callback = Closure::<dyn FnMut()>::new(self_stopping(on_tick, handle.clone(), clear_interval));
		let period_ms = period_ms.max(1);
		let id = window
			.set_interval_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				period_ms.min(i32::MAX as u32) as i32,
			)
			.map_err(|e| DriverError::Interval(format!("{e:?}")))?;
		handle.set(Some(id));

		debug!("workflow-board: tick driver started ({period_ms} ms)");
		self.active = Some(ActiveInterval {
			handle,
			period_ms,
			_callback: callback,
		});
		Ok(())
	}

	/// Clears the interval. A no-op when not running.
	pub fn stop(&mut self) {
		let Some(active) = self.active.take() else {
			return;
		};
		if let Some(id) = active.handle.take() {
			clear_interval(id);
			debug!("workflow-board: tick driver stopped");
		}
	}

	/// Whether the interval is still registered.
	pub fn is_running(&self) -> bool {
		self.active.as_ref().is_some_and(|a| a.handle.get().is_some())
	}

	/// Period of the running interval.
	pub fn period_ms(&self) -> Option<u32> {
		self.active
			.as_ref()
			.filter(|a| a.handle.get().is_some())
			.map(|a| a.period_ms)
	}
}

impl Drop for TickDriver {
	fn drop(&mut self) {
		self.stop();
	}
}

fn clear_interval(id: i32) {
	if let Some(window) = web_sys::window() {
		window.clear_interval_with_handle(id);
	}
}

/// Wraps `on_tick` so that a break clears the interval in `handle` and later
/// fires are ignored. The closure stays alive; only the interval goes away.
fn self_stopping(
	mut on_tick: impl FnMut() -> ControlFlow<()>,
	handle: Rc<Cell<Option<i32>>>,
	mut clear: impl FnMut(i32),
) -> impl FnMut() {
	move || {
		if handle.get().is_none() {
			return;
		}
		if on_tick().is_break() {
			if let Some(id) = handle.take() {
				clear(id);
				debug!("workflow-board: tick driver finished");
			}
		}
	}
}
