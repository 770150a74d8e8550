//! Error types for wiring the page to a browser document

use thiserror::Error;

/// Failures while attaching behaviour to the document
///
/// The core logic never fails; these only come from the browser adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("no global window")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("DOM error while {context}: {message}")]
    Dom { context: String, message: String },
}

impl PageError {
    pub fn dom(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dom {
            context: context.into(),
            message: message.into(),
        }
    }
}

pub type PageResult<T> = Result<T, PageError>;
