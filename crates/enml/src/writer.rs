//! Stack-based markup writer.
//!
//! [`MarkupWriter`] accumulates a document through `open_element`,
//! `attribute`, `text` and `close_element` calls. The start tag of the most
//! recently opened element is held back until content or a close arrives, so
//! attributes can be added after `open_element` and childless elements can be
//! written in their short form. Escaping is done by `quick-xml`.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::EnmlError;
use crate::events::Declaration;

/// How childless elements are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `<div/>` for every childless element.
    Xml,
    /// `<br/>` for void elements, `<div></div>` for everything else.
    Html,
}

/// HTML elements that never have content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Markup sink with its own open-element stack.
pub struct MarkupWriter {
    writer: Writer<Vec<u8>>,
    mode: OutputMode,
    pending: Option<BytesStart<'static>>,
    stack: Vec<String>,
}

impl MarkupWriter {
    /// Create a writer with the given output mode.
    #[must_use]
    pub fn new(mode: OutputMode) -> Self {
        Self {
            writer: Writer::new(Vec::with_capacity(4096)),
            mode,
            pending: None,
            stack: Vec::new(),
        }
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Write an XML declaration.
    pub fn start_document(
        &mut self,
        version: &str,
        encoding: &str,
        standalone: bool,
    ) -> Result<(), EnmlError> {
        let standalone = if standalone { "yes" } else { "no" };
        self.writer.write_event(Event::Decl(BytesDecl::new(
            version,
            Some(encoding),
            Some(standalone),
        )))?;
        Ok(())
    }

    /// Reproduce a declaration read from another document.
    pub fn declaration(&mut self, declaration: &Declaration) -> Result<(), EnmlError> {
        self.writer.write_event(Event::Decl(BytesDecl::new(
            &declaration.version,
            declaration.encoding.as_deref(),
            declaration.standalone.as_deref(),
        )))?;
        Ok(())
    }

    /// Write a literal string without escaping.
    pub fn raw(&mut self, literal: &str) -> Result<(), EnmlError> {
        self.flush_pending()?;
        self.writer.get_mut().extend_from_slice(literal.as_bytes());
        Ok(())
    }

    /// Open an element. Attributes may follow until content is written.
    pub fn open_element(&mut self, name: &str) -> Result<(), EnmlError> {
        self.flush_pending()?;
        self.pending = Some(BytesStart::new(name.to_owned()));
        self.stack.push(name.to_owned());
        Ok(())
    }

    /// Add an attribute to the element opened last.
    ///
    /// Ignored once that element has received content.
    pub fn attribute(&mut self, key: &str, value: &str) {
        match self.pending.as_mut() {
            Some(start) => start.push_attribute((key, value)),
            None => tracing::trace!(key, "attribute after content ignored"),
        }
    }

    /// Copy attributes verbatim, in order.
    pub fn attributes<'a, I>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        for (key, value) in attributes {
            self.attribute(key, value);
        }
    }

    /// Write character data. An empty string still ends the start tag.
    pub fn text(&mut self, text: &str) -> Result<(), EnmlError> {
        self.flush_pending()?;
        if !text.is_empty() {
            self.writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        Ok(())
    }

    /// Open, fill and close an element in one go.
    pub fn element(&mut self, name: &str, text: &str) -> Result<(), EnmlError> {
        self.open_element(name)?;
        if !text.is_empty() {
            self.text(text)?;
        }
        self.close_element()
    }

    /// Close the element opened last.
    ///
    /// # Errors
    ///
    /// Returns [`EnmlError::UnbalancedClose`] if no element is open.
    pub fn close_element(&mut self) -> Result<(), EnmlError> {
        let name = self.stack.pop().ok_or(EnmlError::UnbalancedClose)?;

        let Some(start) = self.pending.take() else {
            self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            return Ok(());
        };

        match self.mode {
            OutputMode::Html if !VOID_ELEMENTS.contains(&name.as_str()) => {
                self.writer.write_event(Event::Start(start))?;
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            OutputMode::Xml | OutputMode::Html => {
                self.writer.write_event(Event::Empty(start))?;
            }
        }
        Ok(())
    }

    /// Close every element that is still open.
    pub fn end_document(&mut self) -> Result<(), EnmlError> {
        while !self.stack.is_empty() {
            self.close_element()?;
        }
        Ok(())
    }

    /// Return the built document.
    ///
    /// # Errors
    ///
    /// Returns [`EnmlError::UnclosedElement`] if an element is still open.
    pub fn finish(mut self) -> Result<String, EnmlError> {
        if let Some(name) = self.stack.pop() {
            return Err(EnmlError::UnclosedElement(name));
        }
        self.flush_pending()?;
        Ok(String::from_utf8(self.writer.into_inner())?)
    }

    fn flush_pending(&mut self) -> Result<(), EnmlError> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_elements_with_attributes() {
        let mut w = MarkupWriter::new(OutputMode::Xml);
        w.open_element("div").unwrap();
        w.attribute("class", "a");
        w.open_element("b").unwrap();
        w.text("bold").unwrap();
        w.close_element().unwrap();
        w.close_element().unwrap();
        assert_eq!(w.finish().unwrap(), r#"<div class="a"><b>bold</b></div>"#);
    }

    #[test]
    fn test_xml_mode_self_closes_childless() {
        let mut w = MarkupWriter::new(OutputMode::Xml);
        w.open_element("en-todo").unwrap();
        w.attribute("checked", "true");
        w.close_element().unwrap();
        assert_eq!(w.finish().unwrap(), r#"<en-todo checked="true"/>"#);
    }

    #[test]
    fn test_html_mode_keeps_end_tag_for_non_void() {
        let mut w = MarkupWriter::new(OutputMode::Html);
        w.open_element("div").unwrap();
        w.open_element("br").unwrap();
        w.close_element().unwrap();
        w.close_element().unwrap();
        assert_eq!(w.finish().unwrap(), "<div><br/></div>");

        let mut w = MarkupWriter::new(OutputMode::Html);
        w.open_element("a").unwrap();
        w.close_element().unwrap();
        assert_eq!(w.finish().unwrap(), "<a></a>");
    }

    #[test]
    fn test_empty_text_ends_start_tag() {
        let mut w = MarkupWriter::new(OutputMode::Xml);
        w.open_element("a").unwrap();
        w.text("").unwrap();
        w.close_element().unwrap();
        assert_eq!(w.finish().unwrap(), "<a></a>");
    }

    #[test]
    fn test_text_is_escaped() {
        let mut w = MarkupWriter::new(OutputMode::Xml);
        w.open_element("p").unwrap();
        w.attribute("title", "a<b");
        w.text("x < y & z").unwrap();
        w.close_element().unwrap();
        assert_eq!(
            w.finish().unwrap(),
            r#"<p title="a&lt;b">x &lt; y &amp; z</p>"#
        );
    }

    #[test]
    fn test_attribute_after_content_is_ignored() {
        let mut w = MarkupWriter::new(OutputMode::Xml);
        w.open_element("p").unwrap();
        w.text("x").unwrap();
        w.attribute("late", "1");
        w.close_element().unwrap();
        assert_eq!(w.finish().unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_close_without_open_fails() {
        let mut w = MarkupWriter::new(OutputMode::Xml);
        assert!(matches!(
            w.close_element(),
            Err(EnmlError::UnbalancedClose)
        ));
    }

    #[test]
    fn test_finish_with_open_element_fails() {
        let mut w = MarkupWriter::new(OutputMode::Xml);
        w.open_element("div").unwrap();
        assert!(matches!(w.finish(), Err(EnmlError::UnclosedElement(name)) if name == "div"));
    }

    #[test]
    fn test_end_document_closes_everything() {
        let mut w = MarkupWriter::new(OutputMode::Xml);
        w.open_element("a").unwrap();
        w.open_element("b").unwrap();
        w.text("t").unwrap();
        w.end_document().unwrap();
        assert_eq!(w.depth(), 0);
        assert_eq!(w.finish().unwrap(), "<a><b>t</b></a>");
    }

    #[test]
    fn test_prologue() {
        let mut w = MarkupWriter::new(OutputMode::Xml);
        w.start_document("1.0", "UTF-8", false).unwrap();
        w.raw("\n<!DOCTYPE en-note>").unwrap();
        w.element("en-note", "").unwrap();
        assert_eq!(
            w.finish().unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n<!DOCTYPE en-note><en-note/>"
        );
    }
}
