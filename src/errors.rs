use thiserror::Error;

/// Failures that abort a life-table correction.
///
/// These travel boxed inside [`crate::LTResult`]; recover the kind with
/// `err.downcast_ref::<CorrectionError>()`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorrectionError {
    /// The input is not a life table (or a collection of life tables).
    #[error("expected a life table or a collection of life tables, found {found}")]
    TypeMismatch { found: String },

    /// A regression formula would be evaluated outside its domain, or its estimates cannot be
    /// turned into non-negative death counts. The message names the cause.
    #[error("{message}")]
    Domain { message: String },

    /// The first age class(es) fit neither supported correction layout.
    #[error(
        "unsupported age-class layout for correction: first class widths {widths:?}; \
         expected a single 5-year first class or a 1-year class followed by a 4-year class"
    )]
    UnsupportedLayout { widths: Vec<u32> },
}

impl CorrectionError {
    pub(crate) fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }
}
