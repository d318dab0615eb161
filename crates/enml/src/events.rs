//! Single-pass ENML event source.
//!
//! [`parse`] walks a document once with `quick-xml`'s pull reader and reports
//! element starts, element ends and character data to a [`MarkupHandler`].
//! Empty elements (`<en-todo/>`) are reported as a start followed by an end,
//! so every start has exactly one matching end.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::{resolve_or_literal, unescape_lenient};
use crate::error::EnmlError;

/// Element start as seen by the transforms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified element name as written in the source (`en-note`, `x:div`).
    pub name: String,
    /// Namespace prefix of the name, if any.
    pub prefix: Option<String>,
    /// Attributes in source order.
    pub attributes: Vec<(String, String)>,
}

impl Element {
    /// Create an element without attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let prefix = name.split_once(':').map(|(prefix, _)| prefix.to_owned());
        Self {
            name,
            prefix,
            attributes: Vec::new(),
        }
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Value of the first attribute named `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the element carries `checked="true"`.
    pub fn is_checked(&self) -> bool {
        self.attribute("checked") == Some("true")
    }
}

/// XML declaration of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// Receiver of parse events.
///
/// Any error returned from a callback aborts the parse and is returned from
/// [`parse`] unchanged.
pub trait MarkupHandler {
    /// An element was opened.
    fn start(&mut self, element: &Element) -> Result<(), EnmlError>;

    /// The most recently opened element was closed.
    fn end(&mut self, name: &str) -> Result<(), EnmlError>;

    /// Character data inside the root element.
    ///
    /// A single run of text may arrive split over several calls (around
    /// entity references and CDATA sections).
    fn text(&mut self, text: &str) -> Result<(), EnmlError>;

    /// The document starts with an XML declaration.
    fn declaration(&mut self, _declaration: &Declaration) -> Result<(), EnmlError> {
        Ok(())
    }

    /// The document carries a DOCTYPE. `doctype` is the text between
    /// `<!DOCTYPE` and `>`, trimmed.
    fn doctype(&mut self, _doctype: &str) -> Result<(), EnmlError> {
        Ok(())
    }
}

/// Feed every event of `document` to `handler`.
///
/// Whitespace outside the root element, comments and processing instructions
/// are not reported. CDATA sections are reported as text and entity references
/// are resolved before reaching the handler.
///
/// # Errors
///
/// Returns an error if the document is not well formed, has no root element,
/// has text before or content after its root element, has a declaration or
/// DOCTYPE anywhere but ahead of the root, or if the handler fails.
pub fn parse<H>(document: &str, handler: &mut H) -> Result<(), EnmlError>
where
    H: MarkupHandler + ?Sized,
{
    let mut reader = Reader::from_str(document);
    let config = reader.config_mut();
    config.trim_text(false);
    config.expand_empty_elements = true;

    let mut open: Vec<String> = Vec::new();
    let mut root_closed = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if root_closed {
                    return Err(EnmlError::TrailingContent);
                }
                let element = decode_element(&reader, &e)?;
                handler.start(&element)?;
                open.push(element.name);
            }
            Event::Empty(e) => {
                if root_closed {
                    return Err(EnmlError::TrailingContent);
                }
                let element = decode_element(&reader, &e)?;
                handler.start(&element)?;
                handler.end(&element.name)?;
                root_closed = open.is_empty();
            }
            Event::End(_) => {
                let name = open.pop().ok_or(EnmlError::UnbalancedClose)?;
                handler.end(&name)?;
                root_closed = open.is_empty();
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                emit_text(handler, &open, root_closed, &text)?;
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                emit_text(handler, &open, root_closed, &resolve_or_literal(&entity))?;
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e);
                emit_text(handler, &open, root_closed, &text)?;
            }
            Event::Decl(e) => {
                check_prologue(&open, root_closed, "XML declaration")?;
                let version = reader.decoder().decode(&e.version()?)?.into_owned();
                let encoding = e
                    .encoding()
                    .transpose()?
                    .map(|v| reader.decoder().decode(&v).map(Cow::into_owned))
                    .transpose()?;
                let standalone = e
                    .standalone()
                    .transpose()?
                    .map(|v| reader.decoder().decode(&v).map(Cow::into_owned))
                    .transpose()?;
                handler.declaration(&Declaration {
                    version,
                    encoding,
                    standalone,
                })?;
            }
            Event::DocType(e) => {
                check_prologue(&open, root_closed, "DOCTYPE")?;
                let doctype = reader.decoder().decode(&e)?;
                handler.doctype(doctype.trim())?;
            }
            Event::Eof => break,
            Event::Comment(_) | Event::PI(_) => {}
        }
    }

    if let Some(name) = open.pop() {
        return Err(EnmlError::UnclosedElement(name));
    }
    if !root_closed {
        return Err(EnmlError::MissingRoot);
    }
    Ok(())
}

/// Forward text that sits inside the root element. Outside it only
/// whitespace is allowed.
fn emit_text<H>(
    handler: &mut H,
    open: &[String],
    root_closed: bool,
    text: &str,
) -> Result<(), EnmlError>
where
    H: MarkupHandler + ?Sized,
{
    if !open.is_empty() {
        return handler.text(text);
    }
    if text.trim().is_empty() {
        return Ok(());
    }
    if root_closed {
        Err(EnmlError::TrailingContent)
    } else {
        Err(EnmlError::ContentBeforeRoot)
    }
}

/// The declaration and DOCTYPE may only precede the root element.
fn check_prologue(
    open: &[String],
    root_closed: bool,
    what: &'static str,
) -> Result<(), EnmlError> {
    if root_closed {
        return Err(EnmlError::TrailingContent);
    }
    if !open.is_empty() {
        return Err(EnmlError::MisplacedPrologue(what));
    }
    Ok(())
}

fn decode_element<R>(reader: &Reader<R>, e: &BytesStart) -> Result<Element, EnmlError> {
    let name = reader.decoder().decode(e.name().as_ref())?.into_owned();
    let mut element = Element::new(name);

    for attr in e.attributes() {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value().map_or_else(
            |_| unescape_lenient(&String::from_utf8_lossy(&attr.value)),
            Cow::into_owned,
        );
        element.attributes.push((key, value));
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records events as strings for easy comparison.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl MarkupHandler for Recorder {
        fn start(&mut self, element: &Element) -> Result<(), EnmlError> {
            let attrs: Vec<String> = element
                .attributes
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            self.events
                .push(format!("start {} [{}]", element.name, attrs.join(",")));
            Ok(())
        }

        fn end(&mut self, name: &str) -> Result<(), EnmlError> {
            self.events.push(format!("end {name}"));
            Ok(())
        }

        fn text(&mut self, text: &str) -> Result<(), EnmlError> {
            self.events.push(format!("text {text}"));
            Ok(())
        }

        fn declaration(&mut self, declaration: &Declaration) -> Result<(), EnmlError> {
            self.events.push(format!("decl {}", declaration.version));
            Ok(())
        }

        fn doctype(&mut self, doctype: &str) -> Result<(), EnmlError> {
            self.events.push(format!("doctype {doctype}"));
            Ok(())
        }
    }

    fn record(document: &str) -> Vec<String> {
        let mut recorder = Recorder::default();
        parse(document, &mut recorder).unwrap();
        recorder.events
    }

    #[test]
    fn test_parse_elements_and_text() {
        let events = record(r#"<en-note><div class="a" id="b">Hi</div></en-note>"#);
        assert_eq!(
            events,
            vec![
                "start en-note []",
                "start div [class=a,id=b]",
                "text Hi",
                "end div",
                "end en-note",
            ]
        );
    }

    #[test]
    fn test_empty_element_reports_start_and_end() {
        let events = record(r#"<en-note><en-todo checked="true"/>x</en-note>"#);
        assert_eq!(
            events,
            vec![
                "start en-note []",
                "start en-todo [checked=true]",
                "end en-todo",
                "text x",
                "end en-note",
            ]
        );
    }

    #[test]
    fn test_prologue_reported_and_outer_whitespace_dropped() {
        let doc = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                   <!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">\n\
                   <en-note>a</en-note>\n";
        let events = record(doc);
        assert_eq!(
            events,
            vec![
                "decl 1.0",
                r#"doctype en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd""#,
                "start en-note []",
                "text a",
                "end en-note",
            ]
        );
    }

    #[test]
    fn test_entities_resolved() {
        let events = record("<en-note>a&amp;b&nbsp;c&#65;</en-note>");
        let text: String = events
            .iter()
            .filter_map(|e| e.strip_prefix("text "))
            .collect();
        assert_eq!(text, "a&b\u{00a0}cA");
    }

    #[test]
    fn test_attribute_entities_resolved() {
        let events = record(r#"<en-note title="a &amp; b"/>"#);
        assert_eq!(events[0], "start en-note [title=a & b]");
    }

    #[test]
    fn test_cdata_reported_as_text() {
        let events = record("<en-note><![CDATA[<b>]]></en-note>");
        assert_eq!(events[1], "text <b>");
    }

    #[test]
    fn test_namespace_prefix() {
        let element = Element::new("x:div");
        assert_eq!(element.prefix.as_deref(), Some("x"));
        assert_eq!(Element::new("div").prefix, None);
    }

    #[test]
    fn test_checked_requires_true() {
        let todo = Element::new("en-todo").with_attribute("checked", "true");
        assert!(todo.is_checked());
        assert_eq!(todo.attribute("checked"), Some("true"));

        let todo = Element::new("en-todo").with_attribute("checked", "false");
        assert!(!todo.is_checked());
        assert!(!Element::new("en-todo").is_checked());
    }

    #[test]
    fn test_text_before_root_fails() {
        let mut recorder = Recorder::default();
        let err = parse("junk<en-note/>", &mut recorder).unwrap_err();
        assert!(matches!(err, EnmlError::ContentBeforeRoot));

        let err = parse("&amp;<en-note/>", &mut Recorder::default()).unwrap_err();
        assert!(matches!(err, EnmlError::ContentBeforeRoot));
    }

    #[test]
    fn test_text_after_root_fails() {
        let err = parse("<en-note/>junk", &mut Recorder::default()).unwrap_err();
        assert!(matches!(err, EnmlError::TrailingContent));
    }

    #[test]
    fn test_doctype_after_root_fails() {
        let mut recorder = Recorder::default();
        let err = parse("<en-note/><!DOCTYPE en-note>", &mut recorder).unwrap_err();
        assert!(matches!(err, EnmlError::TrailingContent));
        assert!(!recorder.events.iter().any(|e| e.starts_with("doctype")));
    }

    #[test]
    fn test_doctype_inside_root_fails() {
        let err = parse("<en-note><!DOCTYPE en-note></en-note>", &mut Recorder::default())
            .unwrap_err();
        assert!(matches!(err, EnmlError::MisplacedPrologue("DOCTYPE")));
    }

    #[test]
    fn test_mismatched_end_tag_fails() {
        let mut recorder = Recorder::default();
        assert!(parse("<en-note><div></span></en-note>", &mut recorder).is_err());
    }

    #[test]
    fn test_unclosed_element_fails() {
        let mut recorder = Recorder::default();
        assert!(parse("<en-note><div>", &mut recorder).is_err());
    }

    #[test]
    fn test_empty_document_fails() {
        let mut recorder = Recorder::default();
        let err = parse("   ", &mut recorder).unwrap_err();
        assert!(matches!(err, EnmlError::MissingRoot));
    }

    #[test]
    fn test_second_root_fails() {
        let mut recorder = Recorder::default();
        let err = parse("<a/><b/>", &mut recorder).unwrap_err();
        assert!(matches!(err, EnmlError::TrailingContent));
    }

    #[test]
    fn test_handler_error_aborts() {
        struct Failing;
        impl MarkupHandler for Failing {
            fn start(&mut self, _element: &Element) -> Result<(), EnmlError> {
                Err(EnmlError::UnbalancedClose)
            }
            fn end(&mut self, _name: &str) -> Result<(), EnmlError> {
                Ok(())
            }
            fn text(&mut self, _text: &str) -> Result<(), EnmlError> {
                Ok(())
            }
        }
        let err = parse("<en-note/>", &mut Failing).unwrap_err();
        assert!(matches!(err, EnmlError::UnbalancedClose));
    }
}
