//! Error types for OWL-NETS decoding.

use std::io;

/// An error raised by the OWL-NETS decoder.
///
/// Almost nothing in the decoding pipeline is an error: unrecognized or
/// unsupported OWL constructs are structural skips recorded in the
/// [`DecodingLedger`](crate::DecodingLedger). Errors are limited to input
/// validation and output writing.
#[derive(Debug, thiserror::Error)]
pub enum OwlNetsError {
    /// The input graph contains no triple.
    #[error("the input graph does not contain any triple")]
    EmptyGraph,

    /// An unrecognized construction approach name.
    #[error("unknown construction approach '{0}', expected 'none', 'subclass' or 'instance'")]
    UnknownApproach(String),

    /// An I/O error while writing output.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A serialization error while writing the ledger.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
