#![forbid(unsafe_code)]

//! Dialog descriptors and preset constructors.
//!
//! A [`DialogDescriptor`] is a complete request to show one dialog: what it
//! looks like, which buttons it has, and what to call when one is pressed.
//! Presets cover the common patterns:
//! - Acknowledge: message with OK
//! - Cancel-only: message with a single Cancel
//! - Confirm / YesNo: two-button action sheets
//! - Prompt: text field plus caller-chosen buttons
//! - Busy: pending indicator with zero or more buttons
//! - Timed message: action sheet that dismisses itself
//!
//! Anything else goes through [`DialogDescriptor::builder`].
//!
//! # Example
//!
//! ```
//! use alertkit_core::descriptor::{DialogDescriptor, DialogKind, Emphasis};
//!
//! let ack = DialogDescriptor::acknowledge("Saved", "Your changes were saved.");
//! assert_eq!(ack.buttons().len(), 1);
//!
//! let rename = DialogDescriptor::prompt("Rename", "New name:")
//!     .standard_button("Save")
//!     .cancel_button("Cancel")
//!     .watch_button(0)
//!     .build()
//!     .unwrap();
//! assert_eq!(rename.kind(), DialogKind::TextPrompt);
//! assert!(rename.buttons()[0].disabled_initially);
//! assert_eq!(rename.buttons()[1].emphasis, Emphasis::Cancel);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use crate::error::DialogError;

/// How long a timed message stays up when the caller gives no duration.
pub const DEFAULT_MESSAGE_DURATION: Duration = Duration::from_secs(2);

/// Invoked with the pressed button index and, for prompts, the field text.
pub type SelectionCallback = Box<dyn FnOnce(usize, Option<String>)>;

/// Invoked right before an auto-dismiss clears the dialog.
pub type DismissCallback = Box<dyn FnOnce()>;

/// Dialog presentation variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    /// Centered alert with a message.
    PlainMessage,
    /// Sheet of actions; popover-anchored on wide surfaces.
    ActionSheet,
    /// Alert with a single text input field.
    TextPrompt,
    /// Alert with a busy indicator under the message.
    PendingIndicator,
}

/// Visual role of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    #[default]
    Standard,
    Cancel,
    Destructive,
}

/// A button in a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    /// Display label.
    pub label: String,
    /// Visual role.
    pub emphasis: Emphasis,
    /// Whether the button starts out disabled.
    pub disabled_initially: bool,
}

impl DialogButton {
    /// Create an enabled standard button.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            emphasis: Emphasis::Standard,
            disabled_initially: false,
        }
    }

    /// Set the visual role.
    #[must_use]
    pub fn emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Start the button disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled_initially = true;
        self
    }
}

/// Keyboard layout requested for a prompt's text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyboardHint {
    #[default]
    Default,
    Numeric,
    Decimal,
    Email,
    Url,
    Phone,
}

/// Automatic capitalization requested for a prompt's text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Capitalization {
    None,
    #[default]
    Words,
    Sentences,
    AllCharacters,
}

/// Text input configuration for [`DialogKind::TextPrompt`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextFieldSpec {
    pub placeholder: String,
    pub initial_value: String,
    pub keyboard: KeyboardHint,
    pub capitalization: Capitalization,
}

impl TextFieldSpec {
    /// Empty field, default keyboard, word capitalization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the text the field starts with.
    #[must_use]
    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    /// Set the keyboard layout.
    #[must_use]
    pub fn keyboard(mut self, keyboard: KeyboardHint) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Set the capitalization behaviour.
    #[must_use]
    pub fn capitalization(mut self, capitalization: Capitalization) -> Self {
        self.capitalization = capitalization;
        self
    }
}

/// A validated request to show one dialog.
///
/// Invariants:
/// - Every index in `watched_buttons` is a valid button index.
/// - `text_field` is `Some` iff `kind` is [`DialogKind::TextPrompt`].
/// - Watched buttons start disabled exactly when the field starts empty.
pub struct DialogDescriptor {
    kind: DialogKind,
    title: Option<String>,
    message: Option<String>,
    buttons: Vec<DialogButton>,
    text_field: Option<TextFieldSpec>,
    watched_buttons: BTreeSet<usize>,
    auto_dismiss_after: Option<Duration>,
    on_selected: Option<SelectionCallback>,
    on_auto_dismiss: Option<DismissCallback>,
}

impl fmt::Debug for DialogDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogDescriptor")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("buttons", &self.buttons)
            .field("text_field", &self.text_field)
            .field("watched_buttons", &self.watched_buttons)
            .field("auto_dismiss_after", &self.auto_dismiss_after)
            .field("on_selected", &self.on_selected.is_some())
            .field("on_auto_dismiss", &self.on_auto_dismiss.is_some())
            .finish()
    }
}

impl DialogDescriptor {
    /// Start building a dialog of the given kind.
    pub fn builder(kind: DialogKind) -> DialogBuilder {
        DialogBuilder::new(kind)
    }

    /// Message with a single OK button.
    pub fn acknowledge(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::preset(DialogKind::PlainMessage, title, message)
            .with_buttons(vec![DialogButton::new("OK")])
    }

    /// Message with a single OK button that calls back when pressed.
    pub fn acknowledge_then(
        title: impl Into<String>,
        message: impl Into<String>,
        on_ok: impl FnOnce() + 'static,
    ) -> Self {
        Self::acknowledge(title, message).with_selection(move |_, _| on_ok())
    }

    /// Message with a single Cancel button that calls back when pressed.
    pub fn cancel_only(
        title: impl Into<String>,
        message: impl Into<String>,
        on_cancel: impl FnOnce() + 'static,
    ) -> Self {
        Self::preset(DialogKind::PlainMessage, title, message)
            .with_buttons(vec![DialogButton::new("Cancel")])
            .with_selection(move |_, _| on_cancel())
    }

    /// OK (index 0) / Cancel (index 1) action sheet.
    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Self {
        Self::preset(DialogKind::ActionSheet, title, message)
            .with_buttons(vec![
                DialogButton::new("OK"),
                DialogButton::new("Cancel").emphasis(Emphasis::Destructive),
            ])
            .with_selection(on_selected)
    }

    /// Yes (index 0) / No (index 1) action sheet with caller-chosen emphasis.
    pub fn yes_no(
        title: impl Into<String>,
        message: impl Into<String>,
        emphasis: [Emphasis; 2],
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Self {
        let [yes, no] = emphasis;
        Self::preset(DialogKind::ActionSheet, title, message)
            .with_buttons(vec![
                DialogButton::new("Yes").emphasis(yes),
                DialogButton::new("No").emphasis(no),
            ])
            .with_selection(on_selected)
    }

    /// Emphasis used by [`yes_no`](Self::yes_no) when the caller has no preference.
    pub const YES_NO_EMPHASIS: [Emphasis; 2] = [Emphasis::Standard, Emphasis::Destructive];

    /// Start a text prompt; add buttons and field settings on the builder.
    pub fn prompt(title: impl Into<String>, message: impl Into<String>) -> DialogBuilder {
        DialogBuilder::new(DialogKind::TextPrompt)
            .title(title)
            .message(message)
    }

    /// Busy indicator with no buttons. Stays until dismissed.
    pub fn busy(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::preset(DialogKind::PendingIndicator, title, message)
    }

    /// Busy indicator with a single CANCEL button.
    pub fn busy_with_cancel(
        title: impl Into<String>,
        message: impl Into<String>,
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Self {
        Self::busy_with_buttons(title, message, &["CANCEL"], on_selected)
    }

    /// Busy indicator with standard buttons.
    pub fn busy_with_buttons(
        title: impl Into<String>,
        message: impl Into<String>,
        labels: &[&str],
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Self {
        Self::preset(DialogKind::PendingIndicator, title, message)
            .with_buttons(labels.iter().copied().map(DialogButton::new).collect())
            .with_selection(on_selected)
    }

    /// Action sheet that dismisses itself `after` it has been presented.
    pub fn timed_message(
        title: impl Into<String>,
        message: impl Into<String>,
        after: Duration,
    ) -> Self {
        let mut descriptor = Self::preset(DialogKind::ActionSheet, title, message);
        descriptor.auto_dismiss_after = Some(after);
        descriptor
    }

    /// [`timed_message`](Self::timed_message) that calls back right before it goes away.
    pub fn timed_message_then(
        title: impl Into<String>,
        message: impl Into<String>,
        after: Duration,
        on_complete: impl FnOnce() + 'static,
    ) -> Self {
        let mut descriptor = Self::timed_message(title, message, after);
        descriptor.on_auto_dismiss = Some(Box::new(on_complete));
        descriptor
    }

    /// Single button with caller-chosen label, emphasis and kind.
    pub fn custom_button(
        kind: DialogKind,
        title: impl Into<String>,
        message: impl Into<String>,
        button: DialogButton,
        on_pressed: impl FnOnce() + 'static,
    ) -> Result<Self, DialogError> {
        Self::builder(kind)
            .title(title)
            .message(message)
            .button(button)
            .on_selected(move |_, _| on_pressed())
            .build()
    }

    /// Buttons from parallel label and emphasis lists.
    pub fn custom_buttons(
        kind: DialogKind,
        title: impl Into<String>,
        message: impl Into<String>,
        labels: &[&str],
        emphases: &[Emphasis],
        on_selected: impl FnOnce(usize, Option<String>) + 'static,
    ) -> Result<Self, DialogError> {
        if labels.len() != emphases.len() {
            return Err(DialogError::EmphasisMismatch {
                labels: labels.len(),
                emphases: emphases.len(),
            });
        }
        labels
            .iter()
            .zip(emphases)
            .fold(
                Self::builder(kind).title(title).message(message),
                |builder, (label, emphasis)| {
                    builder.button(DialogButton::new(*label).emphasis(*emphasis))
                },
            )
            .on_selected(on_selected)
            .build()
    }

    fn preset(kind: DialogKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: non_empty(title.into()),
            message: non_empty(message.into()),
            buttons: Vec::new(),
            text_field: None,
            watched_buttons: BTreeSet::new(),
            auto_dismiss_after: None,
            on_selected: None,
            on_auto_dismiss: None,
        }
    }

    fn with_buttons(mut self, buttons: Vec<DialogButton>) -> Self {
        self.buttons = buttons;
        self
    }

    fn with_selection(mut self, on_selected: impl FnOnce(usize, Option<String>) + 'static) -> Self {
        self.on_selected = Some(Box::new(on_selected));
        self
    }

    /// Dialog kind.
    #[inline]
    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    /// Title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Buttons in display order.
    pub fn buttons(&self) -> &[DialogButton] {
        &self.buttons
    }

    /// Text field settings (prompts only).
    pub fn text_field(&self) -> Option<&TextFieldSpec> {
        self.text_field.as_ref()
    }

    /// Buttons that stay disabled while the text field is empty.
    pub fn watched_buttons(&self) -> &BTreeSet<usize> {
        &self.watched_buttons
    }

    /// Self-dismiss delay, measured from presentation.
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        self.auto_dismiss_after
    }

    /// Fill in the auto-dismiss delay if none was set.
    pub fn or_auto_dismiss_after(mut self, after: Duration) -> Self {
        self.auto_dismiss_after.get_or_insert(after);
        self
    }

    /// Split off the callbacks, leaving a plain description behind.
    pub fn take_callbacks(&mut self) -> (Option<SelectionCallback>, Option<DismissCallback>) {
        (self.on_selected.take(), self.on_auto_dismiss.take())
    }
}

/// Builder for dialogs that don't fit a preset.
pub struct DialogBuilder {
    kind: DialogKind,
    title: Option<String>,
    message: Option<String>,
    buttons: Vec<DialogButton>,
    emphasis_overrides: Vec<(usize, Emphasis)>,
    text_field: Option<TextFieldSpec>,
    watched_buttons: BTreeSet<usize>,
    auto_dismiss_after: Option<Duration>,
    on_selected: Option<SelectionCallback>,
    on_auto_dismiss: Option<DismissCallback>,
}

impl fmt::Debug for DialogBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogBuilder")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("buttons", &self.buttons)
            .field("watched_buttons", &self.watched_buttons)
            .finish_non_exhaustive()
    }
}

impl DialogBuilder {
    fn new(kind: DialogKind) -> Self {
        Self {
            kind,
            title: None,
            message: None,
            buttons: Vec::new(),
            emphasis_overrides: Vec::new(),
            text_field: None,
            watched_buttons: BTreeSet::new(),
            auto_dismiss_after: None,
            on_selected: None,
            on_auto_dismiss: None,
        }
    }

    /// Set the title. An empty string means no title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    /// Set the message. An empty string means no message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = non_empty(message.into());
        self
    }

    /// Add a button.
    #[must_use]
    pub fn button(mut self, button: DialogButton) -> Self {
        self.buttons.push(button);
        self
    }

    /// Add a standard button.
    #[must_use]
    pub fn standard_button(self, label: impl Into<String>) -> Self {
        self.button(DialogButton::new(label))
    }

    /// Add a cancel-styled button.
    #[must_use]
    pub fn cancel_button(self, label: impl Into<String>) -> Self {
        self.button(DialogButton::new(label).emphasis(Emphasis::Cancel))
    }

    /// Add a destructive-styled button.
    #[must_use]
    pub fn destructive_button(self, label: impl Into<String>) -> Self {
        self.button(DialogButton::new(label).emphasis(Emphasis::Destructive))
    }

    /// Restyle the button at `index`. Checked by [`build`](Self::build).
    #[must_use]
    pub fn emphasis(mut self, index: usize, emphasis: Emphasis) -> Self {
        self.emphasis_overrides.push((index, emphasis));
        self
    }

    /// Configure the text field (prompts only).
    #[must_use]
    pub fn text_field(mut self, spec: TextFieldSpec) -> Self {
        self.text_field = Some(spec);
        self
    }

    /// Keep the button at `index` disabled while the text field is empty.
    #[must_use]
    pub fn watch_button(mut self, index: usize) -> Self {
        self.watched_buttons.insert(index);
        self
    }

    /// Dismiss automatically `after` presentation.
    #[must_use]
    pub fn auto_dismiss_after(mut self, after: Duration) -> Self {
        self.auto_dismiss_after = Some(after);
        self
    }

    /// Callback for button presses.
    #[must_use]
    pub fn on_selected(mut self, f: impl FnOnce(usize, Option<String>) + 'static) -> Self {
        self.on_selected = Some(Box::new(f));
        self
    }

    /// Callback run right before an auto-dismiss.
    #[must_use]
    pub fn on_auto_dismiss(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_auto_dismiss = Some(Box::new(f));
        self
    }

    /// Validate and build the descriptor.
    ///
    /// # Errors
    ///
    /// - [`DialogError::InvalidButtonIndex`] if a watched or emphasis index
    ///   is out of range.
    /// - [`DialogError::TextFieldMismatch`] if a non-prompt dialog was given
    ///   a text field or watched buttons.
    pub fn build(self) -> Result<DialogDescriptor, DialogError> {
        let Self {
            kind,
            title,
            message,
            mut buttons,
            emphasis_overrides,
            text_field,
            watched_buttons,
            auto_dismiss_after,
            on_selected,
            on_auto_dismiss,
        } = self;

        let button_count = buttons.len();
        let out_of_range = emphasis_overrides
            .iter()
            .map(|(index, _)| *index)
            .chain(watched_buttons.iter().copied())
            .find(|index| *index >= button_count);
        if let Some(index) = out_of_range {
            return Err(DialogError::InvalidButtonIndex {
                index,
                button_count,
            });
        }

        let text_field = match kind {
            DialogKind::TextPrompt => Some(text_field.unwrap_or_default()),
            _ if text_field.is_some() || !watched_buttons.is_empty() => {
                return Err(DialogError::TextFieldMismatch { kind });
            }
            _ => None,
        };

        for (index, emphasis) in emphasis_overrides {
            buttons[index].emphasis = emphasis;
        }
        let starts_empty = text_field
            .as_ref()
            .is_none_or(|spec| spec.initial_value.is_empty());
        for index in &watched_buttons {
            buttons[*index].disabled_initially = starts_empty;
        }

        Ok(DialogDescriptor {
            kind,
            title,
            message,
            buttons,
            text_field,
            watched_buttons,
            auto_dismiss_after,
            on_selected,
            on_auto_dismiss,
        })
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
