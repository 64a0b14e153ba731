#![forbid(unsafe_code)]

//! Host runtime collaborator traits.
//!
//! The controller never touches a concrete toolkit. Everything it needs from
//! the platform (creating the dialog object, wiring buttons and the text
//! field, putting the dialog on screen, running deferred work on the UI loop)
//! goes through [`DialogHost`].
//!
//! # Invariants
//!
//! - All methods are called on the UI thread; implementations may assume
//!   single-threaded access.
//! - Handlers passed to the host may be invoked any number of times and at
//!   any point after registration. The controller treats late invocations as
//!   no-ops, so hosts do not need to unregister them.
//! - Completions passed to [`DialogHost::attach`] and [`DialogHost::detach`]
//!   must eventually be called exactly once. Hosts that cannot observe the
//!   end of an animation call them immediately.

use std::time::Duration;

use crate::descriptor::{DialogButton, DialogKind, TextFieldSpec};

/// Opaque identity of a platform dialog object, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogHandle(u64);

impl DialogHandle {
    /// Wrap a host-issued raw handle.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Identity of the host surface (view, screen, window) dialogs attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Wrap a host-issued raw surface id.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw surface id.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Screen region a popover-style dialog is anchored to, in surface points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// Create a region.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Called when a button is tapped.
pub type TapHandler = Box<dyn Fn()>;

/// Called with the full field contents after every edit.
pub type TextChangeHandler = Box<dyn Fn(&str)>;

/// One-shot continuation (presentation finished, dismissal finished).
pub type Completion = Box<dyn FnOnce()>;

/// Deferred unit of work run on the UI loop.
pub type Task = Box<dyn FnOnce()>;

/// The platform side of dialog presentation.
pub trait DialogHost {
    /// Create an unattached dialog object.
    fn create_dialog(
        &self,
        kind: DialogKind,
        title: Option<&str>,
        message: Option<&str>,
    ) -> DialogHandle;

    /// Append a button. `index` is its position in the descriptor.
    fn add_button(
        &self,
        dialog: DialogHandle,
        index: usize,
        button: &DialogButton,
        on_tap: TapHandler,
    );

    /// Add the single input field of a prompt dialog.
    fn add_text_field(
        &self,
        dialog: DialogHandle,
        spec: &TextFieldSpec,
        on_changed: TextChangeHandler,
    );

    /// Enable or disable a button.
    fn set_button_enabled(&self, dialog: DialogHandle, index: usize, enabled: bool);

    /// Show a busy indicator below the message text.
    ///
    /// Returns `false` when the host has no such widget.
    fn attach_busy_indicator(&self, dialog: DialogHandle) -> bool;

    /// Remove the busy indicator added by [`attach_busy_indicator`](Self::attach_busy_indicator).
    fn detach_busy_indicator(&self, dialog: DialogHandle);

    /// Put the dialog on screen. `on_presented` runs once it is visible.
    fn attach(
        &self,
        surface: SurfaceId,
        dialog: DialogHandle,
        anchor: Option<Region>,
        on_presented: Completion,
    );

    /// Take the dialog off screen. `on_detached` runs once it is gone.
    fn detach(&self, dialog: DialogHandle, on_detached: Completion);

    /// Release a dialog that was created but never attached.
    fn discard(&self, _dialog: DialogHandle) {}

    /// Run `task` on the UI loop once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task);

    /// Whether `detach` completions fire only after the closing transition
    /// has really finished.
    ///
    /// Hosts returning `true` let the controller sequence the next present on
    /// that signal instead of a fixed delay.
    fn signals_dismiss_completion(&self) -> bool {
        false
    }
}

/// Supplies popover anchors for action-sheet dialogs on wide surfaces.
pub trait AnchorProvider {
    /// Region the given dialog should point at.
    fn provide_anchor(&self, dialog: DialogHandle) -> Region;
}

impl<F> AnchorProvider for F
where
    F: Fn(DialogHandle) -> Region,
{
    fn provide_anchor(&self, dialog: DialogHandle) -> Region {
        self(dialog)
    }
}
