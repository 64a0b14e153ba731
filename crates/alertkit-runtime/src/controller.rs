#![forbid(unsafe_code)]

//! Single-slot dialog controller.
//!
//! A [`DialogController`] owns at most one dialog for one host surface. Every
//! request goes through [`present`](DialogController::present) and
//! [`dismiss`](DialogController::dismiss); a new present supersedes whatever
//! is showing.
//!
//! # State machine
//!
//! ```text
//! Idle ──present──▶ Presenting ──host presented──▶ Active
//!  ▲                    │                            │
//!  └──── detach done ── Dismissing ◀──── dismiss ────┘
//! ```
//!
//! `Dismissing` is only observed with [`PresentPacing::AwaitDismissal`];
//! with a fixed delay, `dismiss` returns to `Idle` at once.
//!
//! # Invariants
//!
//! - At most one dialog is in the slot, and at most one is attached to the
//!   host surface at any time.
//! - Every closure handed to the host captures the [`DialogId`] it was made
//!   for. When it fires after that dialog left the slot it does nothing.
//! - `on_selected` runs at most once, and never for a superseded dialog.
//! - User callbacks run with no internal borrow held, so they may call back
//!   into the controller.
//!
//! # Failure Modes
//!
//! - `present` without a surface returns [`DialogError::MissingHostSurface`]
//!   and leaves the current dialog alone.
//! - `dismiss` on `Idle` is a no-op.
//! - Taps on disabled buttons are ignored.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alertkit_core::descriptor::{DismissCallback, SelectionCallback};
use alertkit_core::{
    AnchorProvider, DialogBuilder, DialogButton, DialogDescriptor, DialogError, DialogHandle,
    DialogHost, DialogKind, Emphasis, SurfaceId, watched_enablement,
};

use crate::config::{ControllerConfig, PresentPacing};

/// Global counter for unique dialog IDs.
static DIALOG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of one presented dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogId(u64);

impl DialogId {
    fn next() -> Self {
        Self(DIALOG_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Presentation phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    /// Nothing showing.
    Idle,
    /// Dialog created, waiting to be attached or for the host to finish
    /// presenting it.
    Presenting,
    /// Dialog on screen.
    Active,
    /// Waiting for the host to confirm a detach.
    Dismissing,
}

/// Busy indicator attached to the dialog in the slot.
#[derive(Debug)]
struct BusyIndicator {
    dialog: DialogHandle,
}

/// The dialog in the slot.
struct ActiveDialog {
    id: DialogId,
    handle: DialogHandle,
    kind: DialogKind,
    /// Whether `DialogHost::attach` has been called.
    attached: bool,
    enabled: Vec<bool>,
    watched: BTreeSet<usize>,
    /// Current text field value (prompts only).
    text: Option<String>,
    busy: Option<BusyIndicator>,
    auto_dismiss_after: Option<Duration>,
    on_selected: Option<SelectionCallback>,
    on_auto_dismiss: Option<DismissCallback>,
}

struct Inner {
    host: Rc<dyn DialogHost>,
    surface: Option<SurfaceId>,
    anchor: Option<Rc<dyn AnchorProvider>>,
    config: ControllerConfig,
    /// `config.pacing` resolved against the host; never `Auto`.
    pacing: PresentPacing,
    phase: DialogPhase,
    slot: Option<ActiveDialog>,
    /// Detaches issued but not yet confirmed (await pacing only).
    detaching: usize,
    /// Dialog whose attach waits for `detaching` to reach zero.
    waiting_attach: Option<DialogId>,
}

/// Owner of the single dialog slot for one host surface.
///
/// Cloning yields another handle to the same controller. Callbacks stored in
/// a descriptor should capture a [`WeakDialogController`] instead, so the
/// controller is not kept alive by its own dialog.
#[derive(Clone)]
pub struct DialogController {
    inner: Rc<RefCell<Inner>>,
}

/// Non-owning handle to a [`DialogController`].
#[derive(Clone)]
pub struct WeakDialogController {
    inner: Weak<RefCell<Inner>>,
}

impl WeakDialogController {
    /// Get the controller if it is still alive.
    pub fn upgrade(&self) -> Option<DialogController> {
        self.inner.upgrade().map(|inner| DialogController { inner })
    }
}

impl fmt::Debug for WeakDialogController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakDialogController")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl fmt::Debug for DialogController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("DialogController")
            .field("surface", &inner.surface)
            .field("phase", &inner.phase)
            .field("active", &inner.slot.as_ref().map(|s| s.id))
            .field("pacing", &inner.pacing)
            .finish_non_exhaustive()
    }
}

impl DialogController {
    /// Create a controller with default configuration and no surface.
    pub fn new(host: Rc<dyn DialogHost>) -> Self {
        Self::with_config(host, ControllerConfig::default())
    }

    /// Create a controller with the given configuration and no surface.
    pub fn with_config(host: Rc<dyn DialogHost>, config: ControllerConfig) -> Self {
        let pacing = config.pacing.resolve(host.signals_dismiss_completion());
        tracing::debug!(?pacing, "dialog controller created");
        Self {
            inner: Rc::new(RefCell::new(Inner {
                host,
                surface: None,
                anchor: None,
                config,
                pacing,
                phase: DialogPhase::Idle,
                slot: None,
                detaching: 0,
                waiting_attach: None,
            })),
        }
    }

    /// Create a controller bound to `surface`.
    pub fn for_surface(host: Rc<dyn DialogHost>, surface: SurfaceId) -> Self {
        let controller = Self::new(host);
        controller.attach_surface(surface);
        controller
    }

    /// Get a non-owning handle.
    pub fn downgrade(&self) -> WeakDialogController {
        WeakDialogController {
            inner: Rc::downgrade(&self.inner),
        }
    }

    // --- Surface and anchor ---

    /// Bind to a host surface, replacing any previous binding.
    ///
    /// A dialog already showing on the old surface is dismissed.
    pub fn attach_surface(&self, surface: SurfaceId) {
        let previous = self.inner.borrow().surface;
        if previous.is_some_and(|prev| prev != surface) {
            self.dismiss();
        }
        self.inner.borrow_mut().surface = Some(surface);
    }

    /// Dismiss anything showing and unbind from the surface.
    pub fn detach_surface(&self) {
        self.dismiss();
        self.inner.borrow_mut().surface = None;
    }

    /// The bound surface, if any.
    pub fn surface(&self) -> Option<SurfaceId> {
        self.inner.borrow().surface
    }

    /// Register the popover anchor provider used for action sheets.
    pub fn set_anchor_provider(&self, provider: impl AnchorProvider + 'static) {
        self.inner.borrow_mut().anchor = Some(Rc::new(provider));
    }

    /// Remove the anchor provider; action sheets present unanchored.
    pub fn clear_anchor_provider(&self) {
        self.inner.borrow_mut().anchor = None;
    }

    // --- State Queries ---

    /// Current presentation phase.
    pub fn phase(&self) -> DialogPhase {
        self.inner.borrow().phase
    }

    /// ID of the dialog in the slot, if any.
    pub fn active_dialog(&self) -> Option<DialogId> {
        self.inner.borrow().slot.as_ref().map(|s| s.id)
    }

    /// Host handle of the dialog in the slot, if any.
    pub fn active_handle(&self) -> Option<DialogHandle> {
        self.inner.borrow().slot.as_ref().map(|s| s.handle)
    }

    /// Whether the dialog in the slot carries a busy indicator.
    pub fn has_busy_indicator(&self) -> bool {
        self.inner
            .borrow()
            .slot
            .as_ref()
            .is_some_and(|s| s.busy.is_some())
    }

    /// Current configuration.
    pub fn config(&self) -> ControllerConfig {
        self.inner.borrow().config
    }

    // --- Present / Dismiss ---

    /// Show `descriptor`, superseding any dialog in the slot.
    ///
    /// The dialog is created on the host right away and attached once the
    /// pacing policy allows it.
    ///
    /// # Errors
    ///
    /// [`DialogError::MissingHostSurface`] if no surface is bound. Nothing is
    /// created and the current dialog stays up.
    pub fn present(&self, mut descriptor: DialogDescriptor) -> Result<DialogId, DialogError> {
        let kind = descriptor.kind();
        let _span = tracing::debug_span!("dialog_present", ?kind).entered();

        if self.inner.borrow().surface.is_none() {
            return Err(DialogError::MissingHostSurface);
        }

        if let Some(previous) = self.active_dialog() {
            tracing::debug!(superseded = previous.id(), "superseding dialog");
            self.dismiss();
        }

        let id = DialogId::next();
        let host = self.host();
        let (on_selected, on_auto_dismiss) = descriptor.take_callbacks();

        let handle = host.create_dialog(kind, descriptor.title(), descriptor.message());
        for (index, button) in descriptor.buttons().iter().enumerate() {
            let weak = Rc::downgrade(&self.inner);
            host.add_button(
                handle,
                index,
                button,
                Box::new(move || on_tap(&weak, id, index)),
            );
            if button.disabled_initially {
                host.set_button_enabled(handle, index, false);
            }
        }

        let text = descriptor.text_field().map(|spec| {
            let weak = Rc::downgrade(&self.inner);
            host.add_text_field(
                handle,
                spec,
                Box::new(move |text| on_text_changed(&weak, id, text)),
            );
            spec.initial_value.clone()
        });

        let busy = if kind == DialogKind::PendingIndicator {
            if host.attach_busy_indicator(handle) {
                Some(BusyIndicator { dialog: handle })
            } else {
                tracing::warn!(dialog = id.id(), "host has no busy indicator");
                None
            }
        } else {
            None
        };

        let pacing = {
            let mut inner = self.inner.borrow_mut();
            inner.slot = Some(ActiveDialog {
                id,
                handle,
                kind,
                attached: false,
                enabled: descriptor
                    .buttons()
                    .iter()
                    .map(|b| !b.disabled_initially)
                    .collect(),
                watched: descriptor.watched_buttons().clone(),
                text,
                busy,
                auto_dismiss_after: descriptor.auto_dismiss_after(),
                on_selected,
                on_auto_dismiss,
            });
            inner.phase = DialogPhase::Presenting;
            match inner.pacing {
                PresentPacing::AwaitDismissal if inner.detaching > 0 => {
                    inner.waiting_attach = Some(id);
                    None
                }
                PresentPacing::FixedDelay(delay) => Some(delay),
                _ => Some(Duration::ZERO),
            }
        };

        tracing::debug!(dialog = id.id(), handle = handle.raw(), "dialog created");
        match pacing {
            Some(delay) => {
                let weak = Rc::downgrade(&self.inner);
                host.schedule(delay, Box::new(move || attach(&weak, id)));
            }
            None => tracing::debug!(dialog = id.id(), "attach waits for pending dismissal"),
        }
        Ok(id)
    }

    /// Remove the dialog in the slot. No-op when nothing is showing.
    pub fn dismiss(&self) {
        dismiss_slot(&self.inner, None);
    }

    /// Dismiss the dialog showing now once `delay` elapses.
    ///
    /// Does nothing if that dialog is gone by then, so a newer dialog is
    /// never dismissed by an older timer.
    pub fn dismiss_after(&self, delay: Duration) {
        self.schedule_expiry(delay, None);
    }

    /// Like [`dismiss_after`](Self::dismiss_after), running `on_complete`
    /// right before the dialog is cleared.
    ///
    /// `on_complete` is dropped unrun when the timer turns out stale.
    pub fn dismiss_after_then(&self, delay: Duration, on_complete: impl FnOnce() + 'static) {
        self.schedule_expiry(delay, Some(Box::new(on_complete)));
    }

    fn schedule_expiry(&self, delay: Duration, on_complete: Option<DismissCallback>) {
        let Some(id) = self.active_dialog() else {
            return;
        };
        let weak = Rc::downgrade(&self.inner);
        self.host()
            .schedule(delay, Box::new(move || expire(&weak, id, on_complete)));
    }

    fn host(&self) -> Rc<dyn DialogHost> {
        Rc::clone(&self.inner.borrow().host)
    }

    // --- Presets ---

    /// Message with an OK button.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn acknowledge(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::acknowledge(title, message))
    }

    /// Message with an OK button that calls back.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn acknowledge_then(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_ok: impl FnOnce() + 'static,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::acknowledge_then(title, message, on_ok))
    }

    /// Message with a Cancel button that calls back.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn cancel_only(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_cancel: impl FnOnce() + 'static,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::cancel_only(title, message, on_cancel))
    }

    /// OK / Cancel sheet; the callback gets index 0 or 1.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn confirm(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::confirm(title, message, on_selected))
    }

    /// Yes / No sheet with caller-chosen emphasis.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn yes_no(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        emphasis: [Emphasis; 2],
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::yes_no(title, message, emphasis, on_selected))
    }

    /// Build and show a text prompt started with [`DialogDescriptor::prompt`].
    ///
    /// # Errors
    ///
    /// Build errors from [`DialogBuilder::build`], then see
    /// [`present`](Self::present).
    pub fn text_prompt(&self, prompt: DialogBuilder) -> Result<DialogId, DialogError> {
        self.present(prompt.build()?)
    }

    /// Busy indicator without buttons; stays until dismissed.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn busy(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::busy(title, message))
    }

    /// Busy indicator with a CANCEL button.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn busy_with_cancel(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::busy_with_cancel(title, message, on_selected))
    }

    /// Busy indicator with caller-labelled buttons.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn busy_with_buttons(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        labels: &[&str],
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::busy_with_buttons(
            title,
            message,
            labels,
            on_selected,
        ))
    }

    /// Self-dismissing sheet. `after` defaults to the configured duration.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn timed_message(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        after: Option<Duration>,
    ) -> Result<DialogId, DialogError> {
        let after = after.unwrap_or(self.config().timed_message_duration);
        self.present(DialogDescriptor::timed_message(title, message, after))
    }

    /// Self-dismissing sheet that calls back right before it goes away.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn timed_message_then(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        after: Option<Duration>,
        on_complete: impl FnOnce() + 'static,
    ) -> Result<DialogId, DialogError> {
        let after = after.unwrap_or(self.config().timed_message_duration);
        self.present(DialogDescriptor::timed_message_then(
            title,
            message,
            after,
            on_complete,
        ))
    }

    /// Single caller-styled button of the given kind.
    ///
    /// # Errors
    ///
    /// See [`present`](Self::present).
    pub fn custom_button(
        &self,
        kind: DialogKind,
        title: impl Into<String>,
        message: impl Into<String>,
        button: DialogButton,
        on_pressed: impl FnOnce() + 'static,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::custom_button(
            kind, title, message, button, on_pressed,
        )?)
    }

    /// Buttons from parallel label and emphasis lists.
    ///
    /// # Errors
    ///
    /// [`DialogError::EmphasisMismatch`] when the lists differ in length,
    /// then see [`present`](Self::present).
    pub fn custom_buttons(
        &self,
        kind: DialogKind,
        title: impl Into<String>,
        message: impl Into<String>,
        labels: &[&str],
        emphases: &[Emphasis],
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Result<DialogId, DialogError> {
        self.present(DialogDescriptor::custom_buttons(
            kind,
            title,
            message,
            labels,
            emphases,
            on_selected,
        )?)
    }
}

// --- Deferred entry points (called from host closures) ---

/// Clear the slot if it holds `only` (or anything, when `only` is `None`).
fn dismiss_slot(shared: &Rc<RefCell<Inner>>, only: Option<DialogId>) {
    let (host, slot, awaiting) = {
        let mut inner = shared.borrow_mut();
        if only.is_some() && inner.slot.as_ref().map(|s| s.id) != only {
            return;
        }
        let Some(slot) = inner.slot.take() else {
            return;
        };
        inner.waiting_attach = None;
        let awaiting = slot.attached && inner.pacing == PresentPacing::AwaitDismissal;
        if awaiting {
            inner.detaching += 1;
        }
        inner.phase = if inner.detaching > 0 {
            DialogPhase::Dismissing
        } else {
            DialogPhase::Idle
        };
        (Rc::clone(&inner.host), slot, awaiting)
    };

    tracing::debug!(dialog = slot.id.id(), attached = slot.attached, "dismissing dialog");
    if let Some(busy) = &slot.busy {
        host.detach_busy_indicator(busy.dialog);
    }
    if slot.attached {
        let completion: Box<dyn FnOnce()> = if awaiting {
            let weak = Rc::downgrade(shared);
            Box::new(move || detach_finished(&weak))
        } else {
            Box::new(|| {})
        };
        host.detach(slot.handle, completion);
    } else {
        host.discard(slot.handle);
    }
}

fn attach(weak: &Weak<RefCell<Inner>>, id: DialogId) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let (host, surface, handle, anchor) = {
        let mut guard = shared.borrow_mut();
        let inner = &mut *guard;
        let Some(slot) = inner.slot.as_mut().filter(|s| s.id == id && !s.attached) else {
            tracing::trace!(dialog = id.id(), "stale attach ignored");
            return;
        };
        let Some(surface) = inner.surface else {
            tracing::trace!(dialog = id.id(), "surface gone before attach");
            return;
        };
        slot.attached = true;
        let anchor = match slot.kind {
            DialogKind::ActionSheet => inner.anchor.clone(),
            _ => None,
        };
        (Rc::clone(&inner.host), surface, slot.handle, anchor)
    };

    let anchor = anchor.map(|provider| provider.provide_anchor(handle));
    tracing::debug!(dialog = id.id(), anchored = anchor.is_some(), "attaching dialog");
    let weak = weak.clone();
    host.attach(
        surface,
        handle,
        anchor,
        Box::new(move || presented(&weak, id)),
    );
}

fn presented(weak: &Weak<RefCell<Inner>>, id: DialogId) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let (host, auto_dismiss) = {
        let mut inner = shared.borrow_mut();
        let is_current = inner.slot.as_ref().is_some_and(|s| s.id == id);
        if !is_current || inner.phase != DialogPhase::Presenting {
            tracing::trace!(dialog = id.id(), "stale presentation signal ignored");
            return;
        }
        inner.phase = DialogPhase::Active;
        let auto_dismiss = inner.slot.as_ref().and_then(|s| s.auto_dismiss_after);
        (Rc::clone(&inner.host), auto_dismiss)
    };

    tracing::debug!(dialog = id.id(), "dialog active");
    if let Some(delay) = auto_dismiss {
        let weak = weak.clone();
        host.schedule(
            delay,
            Box::new(move || {
                let on_complete = take_auto_dismiss_callback(&weak, id);
                expire(&weak, id, on_complete);
            }),
        );
    }
}

fn take_auto_dismiss_callback(weak: &Weak<RefCell<Inner>>, id: DialogId) -> Option<DismissCallback> {
    let shared = weak.upgrade()?;
    let mut inner = shared.borrow_mut();
    inner
        .slot
        .as_mut()
        .filter(|s| s.id == id)
        .and_then(|s| s.on_auto_dismiss.take())
}

fn expire(weak: &Weak<RefCell<Inner>>, id: DialogId, on_complete: Option<DismissCallback>) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let is_current = shared.borrow().slot.as_ref().is_some_and(|s| s.id == id);
    if !is_current {
        tracing::trace!(dialog = id.id(), "stale dismiss timer ignored");
        return;
    }
    if let Some(on_complete) = on_complete {
        on_complete();
    }
    // `on_complete` may have presented a replacement.
    dismiss_slot(&shared, Some(id));
}

fn detach_finished(weak: &Weak<RefCell<Inner>>) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let waiting = {
        let mut inner = shared.borrow_mut();
        inner.detaching = inner.detaching.saturating_sub(1);
        if inner.detaching > 0 {
            return;
        }
        if inner.phase == DialogPhase::Dismissing {
            inner.phase = DialogPhase::Idle;
        }
        inner.waiting_attach.take()
    };
    tracing::debug!("pending dismissal finished");
    if let Some(id) = waiting {
        attach(weak, id);
    }
}

fn on_tap(weak: &Weak<RefCell<Inner>>, id: DialogId, index: usize) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let (callback, text) = {
        let mut guard = shared.borrow_mut();
        let inner = &mut *guard;
        let active = inner.phase == DialogPhase::Active;
        let Some(slot) = inner.slot.as_mut().filter(|s| s.id == id && active) else {
            tracing::trace!(dialog = id.id(), index, "stale tap ignored");
            return;
        };
        if !slot.enabled.get(index).copied().unwrap_or(false) {
            tracing::trace!(dialog = id.id(), index, "tap on disabled button ignored");
            return;
        }
        (slot.on_selected.take(), slot.text.clone())
    };

    tracing::debug!(dialog = id.id(), index, "button selected");
    dismiss_slot(&shared, Some(id));
    if let Some(callback) = callback {
        callback(index, text);
    }
}

fn on_text_changed(weak: &Weak<RefCell<Inner>>, id: DialogId, text: &str) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let (host, handle, changes) = {
        let mut guard = shared.borrow_mut();
        let inner = &mut *guard;
        let Some(slot) = inner.slot.as_mut().filter(|s| s.id == id) else {
            tracing::trace!(dialog = id.id(), "stale text change ignored");
            return;
        };
        slot.text = Some(text.to_owned());
        let changes: Vec<(usize, bool)> = watched_enablement(text, &slot.watched).collect();
        for &(index, enabled) in &changes {
            slot.enabled[index] = enabled;
        }
        (Rc::clone(&inner.host), slot.handle, changes)
    };

    for (index, enabled) in changes {
        host.set_button_enabled(handle, index, enabled);
    }
}
