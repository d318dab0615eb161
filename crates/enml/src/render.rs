//! ENML to HTML rendering.
//!
//! The note root becomes an `html` document with a `head` and a `body`,
//! checklist items become checkboxes and `en-media` elements are resolved
//! against a [`Resources`] table into images, audio/video players or download
//! links. Everything else is copied as is.
//!
//! Each start event decides how its element will be closed and pushes that
//! decision on a stack, so the matching end event can undo exactly what the
//! start wrote, including nothing at all for unresolved media.

use crate::error::EnmlError;
use crate::events::{Element, MarkupHandler, parse};
use crate::resource::Resources;
use crate::tags::{DEFAULT_NOTE_STYLE, ElementKind};
use crate::writer::{MarkupWriter, OutputMode};

/// CSS class of links to attached resources.
const RESOURCE_LINK_CLASS: &str = "en-res-link";

/// Render ENML to HTML with the default note style.
///
/// # Errors
///
/// Returns an error if `enml` is not well formed.
pub fn render_to_html(enml: &str, resources: &Resources) -> Result<String, EnmlError> {
    HtmlRenderer::new(resources).render(enml)
}

/// Configurable ENML to HTML renderer.
///
/// # Example
///
/// ```
/// use enml::{HtmlRenderer, Resources};
///
/// let resources = Resources::new();
/// let html = HtmlRenderer::new(&resources)
///     .with_note_style("font-family: serif;")
///     .render("<en-note><div>Hi</div></en-note>")
///     .unwrap();
/// assert!(html.contains(r#"<body style="font-family: serif;">"#));
/// ```
pub struct HtmlRenderer<'r> {
    resources: &'r Resources,
    note_style: String,
}

impl<'r> HtmlRenderer<'r> {
    /// Create a renderer resolving media against `resources`.
    #[must_use]
    pub fn new(resources: &'r Resources) -> Self {
        Self {
            resources,
            note_style: DEFAULT_NOTE_STYLE.to_owned(),
        }
    }

    /// Style for the `body` when the note root carries none.
    #[must_use]
    pub fn with_note_style(mut self, style: impl Into<String>) -> Self {
        self.note_style = style.into();
        self
    }

    /// Render a note.
    ///
    /// # Errors
    ///
    /// Returns an error if `enml` is not well formed.
    pub fn render(&self, enml: &str) -> Result<String, EnmlError> {
        let mut handler = HtmlHandler {
            writer: MarkupWriter::new(OutputMode::Html),
            resources: self.resources,
            note_style: &self.note_style,
            pending: Vec::new(),
            suppressed: 0,
        };
        parse(enml, &mut handler)?;
        handler.writer.finish()
    }
}

/// What an `en-media` element turns into, decided by its `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaKind {
    Image,
    Audio,
    Video,
    Attachment,
}

impl MediaKind {
    fn from_type(mime: Option<&str>) -> Self {
        match mime {
            Some(t) if t.contains("image") => Self::Image,
            Some(t) if t.contains("audio") => Self::Audio,
            Some(t) if t.contains("video") => Self::Video,
            _ => Self::Attachment,
        }
    }
}

/// How the end event of an element has to be written.
#[derive(Debug)]
enum PendingClose {
    /// Close `body` and `html`.
    Note,
    /// Nothing; the checkbox was complete at start.
    Todo,
    /// Plain end tag.
    Element,
    /// Nothing was written for this element or anything inside it.
    Suppressed,
    /// Close the `img`.
    Image,
    /// Close `source` and the player, then a line break.
    Player,
    /// Write the deferred label, then close the link.
    Link { label: String },
}

struct HtmlHandler<'a> {
    writer: MarkupWriter,
    resources: &'a Resources,
    note_style: &'a str,
    pending: Vec<PendingClose>,
    /// Depth inside an unresolved `en-media`.
    suppressed: usize,
}

impl HtmlHandler<'_> {
    fn open_note(&mut self, element: &Element) -> Result<PendingClose, EnmlError> {
        self.writer.open_element("html")?;
        self.writer.open_element("head")?;
        self.writer.open_element("meta")?;
        self.writer.attribute("http-equiv", "Content-Type");
        self.writer.attribute("content", "text/html; charset=UTF-8");
        self.writer.close_element()?;
        self.writer.close_element()?;

        self.writer.open_element("body")?;
        if element.attribute("style").is_none() {
            self.writer.attribute("style", self.note_style);
        }
        self.writer.attributes(&element.attributes);
        Ok(PendingClose::Note)
    }

    fn write_checkbox(&mut self, element: &Element) -> Result<PendingClose, EnmlError> {
        self.writer.open_element("input")?;
        self.writer.attribute("type", "checkbox");
        if element.is_checked() {
            self.writer.attribute("checked", "checked");
        }
        self.writer.close_element()?;
        Ok(PendingClose::Todo)
    }

    fn open_media(&mut self, element: &Element) -> Result<PendingClose, EnmlError> {
        let hash = element.attribute("hash");
        let Some(resource) = hash.and_then(|hash| self.resources.get(hash)) else {
            tracing::debug!(hash = hash.unwrap_or_default(), "Skipping unresolved media");
            self.suppressed += 1;
            return Ok(PendingClose::Suppressed);
        };

        let url = resource.url();
        let title = resource.title();
        let width = dimension(element.attribute("width"));
        let height = dimension(element.attribute("height"));

        let close = match MediaKind::from_type(element.attribute("type")) {
            MediaKind::Image => {
                self.writer.open_element("img")?;
                self.writer.attribute("title", title);
                self.writer.attribute("src", url);
                PendingClose::Image
            }
            kind @ (MediaKind::Audio | MediaKind::Video) => {
                let container = if kind == MediaKind::Audio {
                    "audio"
                } else {
                    "video"
                };

                self.writer.open_element("a")?;
                self.writer.attribute("href", url);
                self.writer.attribute("class", RESOURCE_LINK_CLASS);
                self.writer.text(title)?;
                self.writer.close_element()?;
                self.writer.element("br", "")?;

                self.writer.open_element(container)?;
                self.writer.attribute("controls", "");
                self.writer.text(&format!(
                    "Your browser does not support the {container} tag."
                ))?;
                self.writer.open_element("source")?;
                self.writer.attribute("src", url);
                PendingClose::Player
            }
            MediaKind::Attachment => {
                self.writer.open_element("a")?;
                self.writer.attribute("href", url);
                self.writer.attribute("class", RESOURCE_LINK_CLASS);
                PendingClose::Link {
                    label: title.to_owned(),
                }
            }
        };

        if let Some(width) = width {
            self.writer.attribute("width", width);
        }
        if let Some(height) = height {
            self.writer.attribute("height", height);
        }
        Ok(close)
    }

    fn open_element(&mut self, element: &Element) -> Result<PendingClose, EnmlError> {
        self.writer.open_element(&element.name)?;
        self.writer.attributes(&element.attributes);
        Ok(PendingClose::Element)
    }
}

impl MarkupHandler for HtmlHandler<'_> {
    fn start(&mut self, element: &Element) -> Result<(), EnmlError> {
        if self.suppressed > 0 {
            self.suppressed += 1;
            self.pending.push(PendingClose::Suppressed);
            return Ok(());
        }

        let close = match ElementKind::of(&element.name) {
            ElementKind::Note => self.open_note(element)?,
            ElementKind::Todo => self.write_checkbox(element)?,
            ElementKind::Media => self.open_media(element)?,
            ElementKind::Other => self.open_element(element)?,
        };
        self.pending.push(close);
        Ok(())
    }

    fn end(&mut self, _name: &str) -> Result<(), EnmlError> {
        match self.pending.pop().ok_or(EnmlError::UnbalancedClose)? {
            PendingClose::Note => {
                self.writer.close_element()?; // body
                self.writer.close_element()?; // html
            }
            PendingClose::Todo => {}
            PendingClose::Element => self.writer.close_element()?,
            PendingClose::Suppressed => self.suppressed -= 1,
            PendingClose::Image => {
                self.writer.close_element()?;
                self.writer.text("\n")?;
            }
            PendingClose::Player => {
                self.writer.close_element()?; // source
                self.writer.close_element()?; // audio or video
                self.writer.element("br", "")?;
                self.writer.text("\n")?;
            }
            PendingClose::Link { label } => {
                self.writer.text(&label)?;
                self.writer.close_element()?;
                self.writer.text("\n")?;
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), EnmlError> {
        if self.suppressed > 0 {
            return Ok(());
        }
        self.writer.text(text)
    }
}

/// A `width`/`height` value worth writing: present and not zero.
fn dimension(value: Option<&str>) -> Option<&str> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !v.chars().all(|c| c == '0' || c == '.')
    })
}
