//! Streaming transforms for ENML, the XHTML-based note markup.
//!
//! Every transform is a single forward pass over the events of one document:
//!
//! - [`render_to_html`] / [`HtmlRenderer`]: ENML to displayable HTML, with
//!   `en-media` references resolved through a [`Resources`] table
//! - [`extract_todos`]: every checklist item with its text and state
//! - [`toggle_todo`]: the same ENML with one checklist item checked or
//!   unchecked, addressed by its position in document order
//!
//! The event source ([`events::parse`]) and the stack-based sink
//! ([`writer::MarkupWriter`]) are public so other transforms can be built on
//! them. Plain-text conversions and resource URLs are provided as helpers.
//!
//! # Example
//!
//! ```
//! let note = r#"<en-note><div><en-todo/>Milk</div><div/></en-note>"#;
//!
//! let checked = enml::toggle_todo(note, 0, true).unwrap();
//! let todos = enml::extract_todos(&checked).unwrap();
//! assert_eq!(todos, vec![enml::Todo::new("Milk", true)]);
//! ```

mod entities;
mod error;
pub mod events;
mod plain_text;
mod render;
mod resource;
mod tags;
mod todos;
mod toggle;
pub mod writer;

pub use error::EnmlError;
pub use plain_text::{ENML_DOCTYPE, enml_of_plain_text, plain_text_of_enml};
pub use render::{HtmlRenderer, render_to_html};
pub use resource::{
    DEFAULT_RESOURCE_HOST, Resource, Resources, url_of_resource, url_of_resource_on,
};
pub use tags::{DEFAULT_NOTE_STYLE, MEDIA, NOTE, TODO};
pub use todos::{Todo, extract_todos};
pub use toggle::toggle_todo;
