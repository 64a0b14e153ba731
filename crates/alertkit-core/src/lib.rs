#![forbid(unsafe_code)]

//! Core types for alertkit.
//!
//! # Role in alertkit
//! `alertkit-core` holds everything that does not depend on controller state:
//! the dialog descriptor and its presets, the host runtime traits the
//! controller drives, the text-field enablement rule, and the shared error
//! type.
//!
//! # How it fits in the system
//! `alertkit-runtime` builds its `DialogController` on these types, and
//! `alertkit-harness` implements [`host::DialogHost`] for tests. Host
//! applications implement the same trait over their real toolkit.

pub mod descriptor;
pub mod error;
pub mod host;
pub mod watcher;

pub use descriptor::{
    Capitalization, DEFAULT_MESSAGE_DURATION, DialogBuilder, DialogButton, DialogDescriptor,
    DialogKind, Emphasis, KeyboardHint, TextFieldSpec,
};
pub use error::DialogError;
pub use host::{AnchorProvider, DialogHandle, DialogHost, Region, SurfaceId};
pub use watcher::watched_enablement;
