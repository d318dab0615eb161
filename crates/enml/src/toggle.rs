//! Checking and unchecking a single checklist item.

use crate::error::EnmlError;
use crate::events::{Declaration, Element, MarkupHandler, parse};
use crate::tags::ElementKind;
use crate::writer::{MarkupWriter, OutputMode};

/// Rewrite `enml` with the `index`-th `en-todo` (zero-based, document order)
/// checked or unchecked.
///
/// The addressed item loses any existing `checked` attribute and gets
/// `checked="true"` appended when `checked` is set. Everything else is copied
/// through unchanged. An `index` past the last item leaves the document as it
/// is.
///
/// # Errors
///
/// Returns an error if `enml` is not well formed.
pub fn toggle_todo(enml: &str, index: usize, checked: bool) -> Result<String, EnmlError> {
    let mut toggler = TodoToggler {
        writer: MarkupWriter::new(OutputMode::Xml),
        index,
        checked,
        ordinal: 0,
    };
    parse(enml, &mut toggler)?;

    if index >= toggler.ordinal {
        tracing::warn!(index, count = toggler.ordinal, "Todo index out of range");
    } else {
        tracing::debug!(index, checked, "Toggled todo");
    }
    toggler.writer.finish()
}

struct TodoToggler {
    writer: MarkupWriter,
    index: usize,
    checked: bool,
    /// Number of `en-todo` starts seen so far.
    ordinal: usize,
}

impl MarkupHandler for TodoToggler {
    fn start(&mut self, element: &Element) -> Result<(), EnmlError> {
        self.writer.open_element(&element.name)?;

        if ElementKind::of(&element.name) != ElementKind::Todo {
            self.writer.attributes(&element.attributes);
            return Ok(());
        }

        let hit = self.ordinal == self.index;
        self.ordinal += 1;
        if !hit {
            self.writer.attributes(&element.attributes);
            return Ok(());
        }

        self.writer
            .attributes(element.attributes.iter().filter(|(key, _)| key != "checked"));
        if self.checked {
            self.writer.attribute("checked", "true");
        }
        Ok(())
    }

    fn end(&mut self, _name: &str) -> Result<(), EnmlError> {
        self.writer.close_element()
    }

    fn text(&mut self, text: &str) -> Result<(), EnmlError> {
        self.writer.text(text)
    }

    fn declaration(&mut self, declaration: &Declaration) -> Result<(), EnmlError> {
        self.writer.declaration(declaration)?;
        self.writer.raw("\n")
    }

    fn doctype(&mut self, doctype: &str) -> Result<(), EnmlError> {
        self.writer.raw(&format!("<!DOCTYPE {doctype}>\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NOTE: &str = concat!(
        "<en-note>",
        "<div><en-todo/>one</div>",
        r#"<div><en-todo checked="true"/>two</div>"#,
        r#"<div><en-todo id="x" checked="false"/>three</div>"#,
        "</en-note>"
    );

    #[test]
    fn test_check_first() {
        let out = toggle_todo(NOTE, 0, true).unwrap();
        assert_eq!(
            out,
            concat!(
                "<en-note>",
                r#"<div><en-todo checked="true"/>one</div>"#,
                r#"<div><en-todo checked="true"/>two</div>"#,
                r#"<div><en-todo id="x" checked="false"/>three</div>"#,
                "</en-note>"
            )
        );
    }

    #[test]
    fn test_uncheck_drops_attribute() {
        let out = toggle_todo(NOTE, 1, false).unwrap();
        assert!(out.contains("<div><en-todo/>two</div>"));
        assert!(out.contains("<div><en-todo/>one</div>"));
    }

    #[test]
    fn test_replaced_checked_goes_last() {
        let out = toggle_todo(NOTE, 2, true).unwrap();
        assert!(out.contains(r#"<en-todo id="x" checked="true"/>three"#));
    }

    #[test]
    fn test_out_of_range_is_unchanged() {
        assert_eq!(toggle_todo(NOTE, 999, true).unwrap(), NOTE);
    }

    #[test]
    fn test_nested_todos_use_document_order() {
        let enml = "<en-note><ul><li><en-todo/>a<ul><li><en-todo/>b</li></ul></li></ul><en-todo/></en-note>";
        let out = toggle_todo(enml, 1, true).unwrap();
        assert_eq!(
            out,
            r#"<en-note><ul><li><en-todo/>a<ul><li><en-todo checked="true"/>b</li></ul></li></ul><en-todo/></en-note>"#
        );
    }

    #[test]
    fn test_prologue_preserved() {
        let enml = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n",
            "<!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">\n",
            "<en-note><en-todo/>x</en-note>"
        );
        let out = toggle_todo(enml, 0, true).unwrap();
        assert_eq!(
            out,
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n",
                "<!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">\n",
                r#"<en-note><en-todo checked="true"/>x</en-note>"#
            )
        );
    }

    #[test]
    fn test_text_escaping_round_trips() {
        let enml = "<en-note><div>a &amp; b &lt; c</div></en-note>";
        assert_eq!(toggle_todo(enml, 0, true).unwrap(), enml);
    }

    #[test]
    fn test_malformed_fails() {
        assert!(toggle_todo("<en-note><en-todo></en-note>", 0, true).is_err());
    }

    #[test]
    fn test_prologue_after_root_fails() {
        let err = toggle_todo("<en-note/><!DOCTYPE en-note>", 0, true).unwrap_err();
        assert!(matches!(err, EnmlError::TrailingContent));

        let err = toggle_todo(r#"<en-note/><?xml version="1.0"?>"#, 0, true).unwrap_err();
        assert!(matches!(err, EnmlError::TrailingContent));
    }

    #[test]
    fn test_text_before_root_fails() {
        let err = toggle_todo("junk<en-note><en-todo/></en-note>", 0, true).unwrap_err();
        assert!(matches!(err, EnmlError::ContentBeforeRoot));
    }
}
