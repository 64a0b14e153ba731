#![forbid(unsafe_code)]

//! In-memory [`DialogHost`] driven by a virtual clock.
//!
//! [`ScriptedHost`] records every call the controller makes and lets a test
//! play the user's part: tap buttons, type into the prompt field, and move
//! time forward. Nothing runs until the test asks for it, so every ordering
//! is reproducible.
//!
//! # Behaviour
//!
//! - `schedule` queues tasks on the virtual clock; [`ScriptedHost::advance`]
//!   runs them in due order (FIFO among equal deadlines), including tasks
//!   queued by tasks that fall inside the advanced window.
//! - `attach` reports presentation complete immediately.
//! - `detach` completes immediately, or, after
//!   [`with_dismiss_signals`](ScriptedHost::with_dismiss_signals), only when
//!   [`finish_dismissals`](ScriptedHost::finish_dismissals) is called.
//! - No host borrow is held while controller closures run, so re-entrant
//!   calls are safe.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use ahash::AHashMap;
use alertkit_core::host::{Completion, Task, TapHandler, TextChangeHandler};
use alertkit_core::{
    DialogButton, DialogHandle, DialogHost, DialogKind, Region, SurfaceId, TextFieldSpec,
};

type SharedTap = Rc<dyn Fn()>;
type SharedTextChange = Rc<dyn Fn(&str)>;

struct ScriptedButton {
    button: DialogButton,
    enabled: bool,
    on_tap: SharedTap,
}

struct ScriptedTextField {
    spec: TextFieldSpec,
    value: String,
    on_changed: SharedTextChange,
}

struct ScriptedDialog {
    kind: DialogKind,
    title: Option<String>,
    message: Option<String>,
    buttons: Vec<ScriptedButton>,
    text_field: Option<ScriptedTextField>,
    busy: bool,
    surface: Option<SurfaceId>,
    anchor: Option<Region>,
}

#[derive(Default)]
struct HostState {
    next_handle: u64,
    now: Duration,
    next_seq: u64,
    timers: BTreeMap<(Duration, u64), Task>,
    dialogs: AHashMap<DialogHandle, ScriptedDialog>,
    attached: Vec<DialogHandle>,
    max_attached: usize,
    discarded: Vec<DialogHandle>,
    detach_count: usize,
    pending_dismissals: Vec<Completion>,
}

/// Deterministic host for tests.
pub struct ScriptedHost {
    state: RefCell<HostState>,
    busy_supported: bool,
    dismiss_signals: bool,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScriptedHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ScriptedHost")
            .field("now", &state.now)
            .field("dialogs", &state.dialogs.len())
            .field("attached", &state.attached)
            .field("timers", &state.timers.len())
            .finish()
    }
}

impl ScriptedHost {
    /// Host with a busy indicator and immediate detach completion.
    pub fn new() -> Self {
        Self {
            state: RefCell::new(HostState::default()),
            busy_supported: true,
            dismiss_signals: false,
        }
    }

    /// Report busy indicators as unsupported.
    #[must_use]
    pub fn without_busy_indicator(mut self) -> Self {
        self.busy_supported = false;
        self
    }

    /// Hold detach completions until [`finish_dismissals`](Self::finish_dismissals).
    #[must_use]
    pub fn with_dismiss_signals(mut self) -> Self {
        self.dismiss_signals = true;
        self
    }

    // --- Driving ---

    /// Move the virtual clock forward, running every task that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                let due = state.timers.first_key_value().map(|(key, _)| *key);
                match due {
                    Some(key) if key.0 <= target => {
                        state.now = key.0;
                        state.timers.remove(&key)
                    }
                    _ => None,
                }
            };
            match task {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }

    /// Tap a button the way a user would: only on an attached dialog and
    /// only when enabled. Returns whether the tap was delivered.
    pub fn tap(&self, dialog: DialogHandle, index: usize) -> bool {
        let handler = {
            let state = self.state.borrow();
            if !state.attached.contains(&dialog) {
                return false;
            }
            state
                .dialogs
                .get(&dialog)
                .and_then(|d| d.buttons.get(index))
                .filter(|b| b.enabled)
                .map(|b| Rc::clone(&b.on_tap))
        };
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Invoke a button's handler regardless of attachment or enablement,
    /// as a retained platform object might.
    pub fn force_tap(&self, dialog: DialogHandle, index: usize) {
        let handler = self
            .state
            .borrow()
            .dialogs
            .get(&dialog)
            .and_then(|d| d.buttons.get(index))
            .map(|b| Rc::clone(&b.on_tap));
        if let Some(handler) = handler {
            handler();
        }
    }

    /// Replace the prompt field's contents and notify the observer.
    pub fn type_text(&self, dialog: DialogHandle, text: &str) {
        let observer = {
            let mut state = self.state.borrow_mut();
            let Some(field) = state
                .dialogs
                .get_mut(&dialog)
                .and_then(|d| d.text_field.as_mut())
            else {
                return;
            };
            field.value = text.to_owned();
            Rc::clone(&field.on_changed)
        };
        observer(text);
    }

    /// Deliver every held detach completion.
    pub fn finish_dismissals(&self) {
        let pending = std::mem::take(&mut self.state.borrow_mut().pending_dismissals);
        for completion in pending {
            completion();
        }
    }

    // --- Inspection ---

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Tasks still queued.
    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Held detach completions.
    pub fn pending_dismissals(&self) -> usize {
        self.state.borrow().pending_dismissals.len()
    }

    /// Dialogs on the surface, oldest first.
    pub fn attached(&self) -> Vec<DialogHandle> {
        self.state.borrow().attached.clone()
    }

    /// Most dialogs ever attached at the same time.
    pub fn max_attached(&self) -> usize {
        self.state.borrow().max_attached
    }

    /// Number of dialogs created.
    pub fn created_count(&self) -> usize {
        self.state.borrow().dialogs.len()
    }

    /// Number of detach calls.
    pub fn detach_count(&self) -> usize {
        self.state.borrow().detach_count
    }

    /// Dialogs released without ever being attached.
    pub fn discarded(&self) -> Vec<DialogHandle> {
        self.state.borrow().discarded.clone()
    }

    /// Kind a dialog was created with.
    pub fn kind(&self, dialog: DialogHandle) -> Option<DialogKind> {
        self.state.borrow().dialogs.get(&dialog).map(|d| d.kind)
    }

    /// Title a dialog was created with.
    pub fn title(&self, dialog: DialogHandle) -> Option<String> {
        self.state
            .borrow()
            .dialogs
            .get(&dialog)
            .and_then(|d| d.title.clone())
    }

    /// Message a dialog was created with.
    pub fn message(&self, dialog: DialogHandle) -> Option<String> {
        self.state
            .borrow()
            .dialogs
            .get(&dialog)
            .and_then(|d| d.message.clone())
    }

    /// Buttons in the order they were added.
    pub fn buttons(&self, dialog: DialogHandle) -> Vec<DialogButton> {
        self.state
            .borrow()
            .dialogs
            .get(&dialog)
            .map(|d| d.buttons.iter().map(|b| b.button.clone()).collect())
            .unwrap_or_default()
    }

    /// Whether a button is currently enabled.
    pub fn is_enabled(&self, dialog: DialogHandle, index: usize) -> Option<bool> {
        self.state
            .borrow()
            .dialogs
            .get(&dialog)
            .and_then(|d| d.buttons.get(index))
            .map(|b| b.enabled)
    }

    /// Text field settings and current contents.
    pub fn text_field(&self, dialog: DialogHandle) -> Option<(TextFieldSpec, String)> {
        self.state
            .borrow()
            .dialogs
            .get(&dialog)
            .and_then(|d| d.text_field.as_ref())
            .map(|f| (f.spec.clone(), f.value.clone()))
    }

    /// Whether a busy indicator is showing on the dialog.
    pub fn has_busy_indicator(&self, dialog: DialogHandle) -> bool {
        self.state
            .borrow()
            .dialogs
            .get(&dialog)
            .is_some_and(|d| d.busy)
    }

    /// Anchor region passed with the last attach.
    pub fn anchor(&self, dialog: DialogHandle) -> Option<Region> {
        self.state
            .borrow()
            .dialogs
            .get(&dialog)
            .and_then(|d| d.anchor)
    }

    /// Surface passed with the last attach.
    pub fn surface(&self, dialog: DialogHandle) -> Option<SurfaceId> {
        self.state
            .borrow()
            .dialogs
            .get(&dialog)
            .and_then(|d| d.surface)
    }
}

impl DialogHost for ScriptedHost {
    fn create_dialog(
        &self,
        kind: DialogKind,
        title: Option<&str>,
        message: Option<&str>,
    ) -> DialogHandle {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        let handle = DialogHandle::new(state.next_handle);
        state.dialogs.insert(
            handle,
            ScriptedDialog {
                kind,
                title: title.map(str::to_owned),
                message: message.map(str::to_owned),
                buttons: Vec::new(),
                text_field: None,
                busy: false,
                surface: None,
                anchor: None,
            },
        );
        tracing::trace!(handle = handle.raw(), ?kind, "scripted dialog created");
        handle
    }

    fn add_button(
        &self,
        dialog: DialogHandle,
        index: usize,
        button: &DialogButton,
        on_tap: TapHandler,
    ) {
        let mut state = self.state.borrow_mut();
        if let Some(d) = state.dialogs.get_mut(&dialog) {
            debug_assert_eq!(d.buttons.len(), index, "buttons added out of order");
            d.buttons.push(ScriptedButton {
                button: button.clone(),
                enabled: true,
                on_tap: Rc::from(on_tap),
            });
        }
    }

    fn add_text_field(
        &self,
        dialog: DialogHandle,
        spec: &TextFieldSpec,
        on_changed: TextChangeHandler,
    ) {
        let mut state = self.state.borrow_mut();
        if let Some(d) = state.dialogs.get_mut(&dialog) {
            d.text_field = Some(ScriptedTextField {
                spec: spec.clone(),
                value: spec.initial_value.clone(),
                on_changed: Rc::from(on_changed),
            });
        }
    }

    fn set_button_enabled(&self, dialog: DialogHandle, index: usize, enabled: bool) {
        let mut state = self.state.borrow_mut();
        if let Some(b) = state
            .dialogs
            .get_mut(&dialog)
            .and_then(|d| d.buttons.get_mut(index))
        {
            b.enabled = enabled;
        }
    }

    fn attach_busy_indicator(&self, dialog: DialogHandle) -> bool {
        if !self.busy_supported {
            return false;
        }
        let mut state = self.state.borrow_mut();
        match state.dialogs.get_mut(&dialog) {
            Some(d) => {
                d.busy = true;
                true
            }
            None => false,
        }
    }

    fn detach_busy_indicator(&self, dialog: DialogHandle) {
        if let Some(d) = self.state.borrow_mut().dialogs.get_mut(&dialog) {
            d.busy = false;
        }
    }

    fn attach(
        &self,
        surface: SurfaceId,
        dialog: DialogHandle,
        anchor: Option<Region>,
        on_presented: Completion,
    ) {
        {
            let mut state = self.state.borrow_mut();
            if let Some(d) = state.dialogs.get_mut(&dialog) {
                d.surface = Some(surface);
                d.anchor = anchor;
            }
            state.attached.push(dialog);
            state.max_attached = state.max_attached.max(state.attached.len());
        }
        tracing::trace!(handle = dialog.raw(), "scripted dialog attached");
        on_presented();
    }

    fn detach(&self, dialog: DialogHandle, on_detached: Completion) {
        let immediate = {
            let mut state = self.state.borrow_mut();
            state.attached.retain(|h| *h != dialog);
            state.detach_count += 1;
            if self.dismiss_signals {
                state.pending_dismissals.push(on_detached);
                None
            } else {
                Some(on_detached)
            }
        };
        tracing::trace!(handle = dialog.raw(), "scripted dialog detached");
        if let Some(completion) = immediate {
            completion();
        }
    }

    fn discard(&self, dialog: DialogHandle) {
        self.state.borrow_mut().discarded.push(dialog);
    }

    fn schedule(&self, delay: Duration, task: Task) {
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.timers.insert((due, seq), task);
    }

    fn signals_dismiss_completion(&self) -> bool {
        self.dismiss_signals
    }
}
