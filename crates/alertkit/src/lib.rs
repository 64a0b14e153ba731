#![forbid(unsafe_code)]

//! alertkit public facade.
//!
//! Re-exports the dialog model from `alertkit-core` and, with the default
//! `runtime` feature, the [`DialogController`] that presents it.
//!
//! ```ignore
//! use alertkit::prelude::*;
//!
//! let controller = DialogController::for_surface(host, surface);
//! controller.confirm("Delete", "Remove this file?", |index, _| {
//!     if index == 0 {
//!         remove_file();
//!     }
//! })?;
//! ```

pub use alertkit_core as core;
pub use alertkit_core::{
    AnchorProvider, Capitalization, DEFAULT_MESSAGE_DURATION, DialogBuilder, DialogButton,
    DialogDescriptor, DialogError, DialogHandle, DialogHost, DialogKind, Emphasis, KeyboardHint,
    Region, SurfaceId, TextFieldSpec,
};

#[cfg(feature = "runtime")]
pub use alertkit_runtime as runtime;
#[cfg(feature = "runtime")]
pub use alertkit_runtime::{
    ControllerConfig, DialogController, DialogId, DialogPhase, PRESENT_DELAY, PresentPacing,
    WeakDialogController,
};

/// Standard result type for dialog operations.
pub type Result<T> = std::result::Result<T, DialogError>;

pub mod prelude {
    //! Common imports for hosts and callers.

    pub use crate::core::{
        AnchorProvider, DialogBuilder, DialogButton, DialogDescriptor, DialogError, DialogHandle,
        DialogHost, DialogKind, Emphasis, Region, SurfaceId, TextFieldSpec,
    };

    #[cfg(feature = "runtime")]
    pub use crate::runtime::{ControllerConfig, DialogController, DialogPhase, PresentPacing};
}
