use std::io;

use quick_xml::DeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input does not have the tag/attribute shape of the document being decoded.
    #[error("<{root}> document does not match the expected structure: {reason}")]
    StructuralMismatch { root: &'static str, reason: String },
    #[error("Could not encode <{root}> document: {reason}")]
    Encode { root: &'static str, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn mismatch(root: &'static str, reason: impl Into<String>) -> Self {
        Error::StructuralMismatch {
            root,
            reason: reason.into(),
        }
    }

    pub(crate) fn from_de(root: &'static str, err: DeError) -> Self {
        Error::mismatch(root, err.to_string())
    }

    pub(crate) fn from_se(root: &'static str, err: DeError) -> Self {
        Error::Encode {
            root,
            reason: err.to_string(),
        }
    }

    pub fn is_structural_mismatch(&self) -> bool {
        matches!(self, Error::StructuralMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
