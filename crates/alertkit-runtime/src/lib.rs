#![forbid(unsafe_code)]

//! Dialog controller runtime for alertkit.
//!
//! # Role in alertkit
//! `alertkit-runtime` owns the presentation state machine: one dialog slot
//! per host surface, supersession of older dialogs by newer ones, paced
//! attach after a dismiss, timed dismissal, and prompt button enablement.
//!
//! # Primary responsibilities
//! - **DialogController**: the `present` / `dismiss` pair and the preset
//!   shortcuts built on it.
//! - **ControllerConfig**: pacing policy and timed message defaults.
//!
//! # How it fits in the system
//! The controller drives a host through `alertkit_core::DialogHost`. All
//! deferred work is scheduled on the host's UI loop; nothing here spawns
//! threads or blocks.

pub mod config;
pub mod controller;

pub use config::{ControllerConfig, PRESENT_DELAY, PresentPacing};
pub use controller::{DialogController, DialogId, DialogPhase, WeakDialogController};
