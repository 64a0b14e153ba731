#![forbid(unsafe_code)]

//! Error type shared by descriptor construction and the controller.
//!
//! Only caller misuse is represented here. Callbacks that fire for a dialog
//! that has already been superseded are expected under the supersession
//! policy and are swallowed by the controller instead of being reported.

use crate::descriptor::DialogKind;

/// Errors produced while building or presenting a dialog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    /// The controller was asked to present before a host surface was attached.
    #[error("no host surface attached to the dialog controller")]
    MissingHostSurface,

    /// A disabled or emphasis index points past the end of the button list.
    #[error("button index {index} is out of range for {button_count} button(s)")]
    InvalidButtonIndex {
        /// The offending index.
        index: usize,
        /// Number of buttons on the dialog.
        button_count: usize,
    },

    /// A text field or watched button set was given to a non-prompt dialog.
    #[error("{kind:?} dialogs cannot carry a text field or watched buttons")]
    TextFieldMismatch {
        /// Kind of the dialog being built.
        kind: DialogKind,
    },

    /// Parallel label and emphasis lists have different lengths.
    #[error("{labels} button label(s) but {emphases} emphasis value(s)")]
    EmphasisMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of emphasis values supplied.
        emphases: usize,
    },
}
