//! Error types for ENML transforms.

use std::str::Utf8Error;
use std::string::FromUtf8Error;

/// Error raised while reading or writing ENML.
///
/// Every transform aborts on the first error and returns no partial output.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EnmlError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),

    /// Writer produced bytes that are not UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Output(#[from] FromUtf8Error),

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended while an element was still open.
    #[error("unclosed element <{0}> at end of document")]
    UnclosedElement(String),

    /// Input contains no root element.
    #[error("document has no root element")]
    MissingRoot,

    /// Non-blank text appears before the root element.
    #[error("unexpected text before root element")]
    ContentBeforeRoot,

    /// An element, text or prologue item appears after the root element was
    /// closed.
    #[error("unexpected content after root element")]
    TrailingContent,

    /// An XML declaration or DOCTYPE appears inside the root element.
    #[error("{0} inside root element")]
    MisplacedPrologue(&'static str),

    /// A close was requested with no open element.
    #[error("close without an open element")]
    UnbalancedClose,
}
