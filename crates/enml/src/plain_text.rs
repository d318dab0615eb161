//! Conversions between plain text and ENML.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::EnmlError;
use crate::tags::{DEFAULT_NOTE_STYLE, NOTE};
use crate::writer::{MarkupWriter, OutputMode};

/// DOCTYPE written at the top of generated notes.
pub const ENML_DOCTYPE: &str =
    r#"<!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd">"#;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\n|\r").expect("invalid line break regex"));

static BLOCK_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(div|ui|li)>").expect("invalid block end regex"));

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li>").expect("invalid list item regex"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("invalid tag regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Wrap plain text in a note, one `div` per line.
///
/// # Errors
///
/// Returns an error only if the writer fails, which does not happen for
/// in-memory output.
pub fn enml_of_plain_text(text: &str) -> Result<String, EnmlError> {
    let mut writer = MarkupWriter::new(OutputMode::Xml);
    writer.start_document("1.0", "UTF-8", false)?;
    writer.raw("\n")?;
    writer.raw(ENML_DOCTYPE)?;
    writer.raw("\n")?;

    writer.open_element(NOTE)?;
    writer.attribute("style", DEFAULT_NOTE_STYLE);
    for line in LINE_BREAK.split(text) {
        writer.element("div", line)?;
        writer.text("\n")?;
    }
    writer.close_element()?;
    writer.finish()
}

/// Strip a note down to its text.
///
/// Block ends become line breaks, list items get a ` - ` bullet, remaining
/// tags are dropped and all whitespace collapses to single spaces.
pub fn plain_text_of_enml(enml: &str) -> String {
    let text = BLOCK_END.replace_all(enml, "\n");
    let text = LIST_ITEM.replace_all(&text, " - ");
    let text = TAG.replace_all(&text, "");
    let text = LINE_BREAK.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").into_owned()
}
