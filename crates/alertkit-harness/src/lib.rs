#![forbid(unsafe_code)]

//! Test harness for alertkit.
//!
//! Provides [`ScriptedHost`], a deterministic [`alertkit_core::DialogHost`]
//! with a virtual clock, plus a couple of helpers for recording callback
//! invocations.
//!
//! # Example
//!
//! ```ignore
//! let host = Rc::new(ScriptedHost::new());
//! let controller = DialogController::for_surface(host.clone(), SurfaceId::new(1));
//! controller.acknowledge("Saved", "All changes written.")?;
//! host.advance(PRESENT_DELAY);
//! assert_eq!(host.attached().len(), 1);
//! ```

pub mod scripted;

use std::cell::RefCell;
use std::rc::Rc;

pub use scripted::ScriptedHost;

/// Shared log of `(index, text)` selections.
pub type SelectionLog = Rc<RefCell<Vec<(usize, Option<String>)>>>;

/// A selection callback that appends to a fresh log.
pub fn recording_selection() -> (SelectionLog, impl FnOnce(usize, Option<String>) + 'static) {
    let log: SelectionLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |index, text| sink.borrow_mut().push((index, text)))
}

/// A no-argument callback that counts its invocations.
pub fn counting_callback() -> (Rc<RefCell<usize>>, impl FnOnce() + 'static) {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    (count, move || *sink.borrow_mut() += 1)
}
