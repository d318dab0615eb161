//! Checklist extraction.

use std::mem;

use crate::error::EnmlError;
use crate::events::{Element, MarkupHandler, parse};
use crate::tags::{ElementKind, is_inline_formatting};

/// A checklist item and its state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Todo {
    /// Text following the checkbox.
    pub text: String,
    pub checked: bool,
}

impl Todo {
    #[must_use]
    pub fn new(text: impl Into<String>, checked: bool) -> Self {
        Self {
            text: text.into(),
            checked,
        }
    }
}

/// List every checklist item in document order.
///
/// An item's text is all character data after its `en-todo`, up to the next
/// element start that is neither another `en-todo` nor inline formatting
/// (`b`, `u`, `i`, `font`, `strong`). End tags do not end an item.
///
/// An item is only reported once such a start follows it. A trailing item
/// with no element after it, such as the last line of a note, is not
/// reported. Callers rely on this, so it is kept as is.
///
/// # Errors
///
/// Returns an error if `enml` is not well formed.
pub fn extract_todos(enml: &str) -> Result<Vec<Todo>, EnmlError> {
    let mut collector = TodoCollector::default();
    parse(enml, &mut collector)?;
    if collector.in_todo {
        tracing::debug!("Trailing todo without a following element is not reported");
    }
    tracing::debug!(count = collector.todos.len(), "Extracted todos");
    Ok(collector.todos)
}

#[derive(Default)]
struct TodoCollector {
    todos: Vec<Todo>,
    in_todo: bool,
    buffer: String,
    checked: bool,
}

impl TodoCollector {
    fn flush(&mut self) {
        if self.in_todo {
            self.todos.push(Todo {
                text: mem::take(&mut self.buffer),
                checked: self.checked,
            });
            self.in_todo = false;
        }
    }
}

impl MarkupHandler for TodoCollector {
    fn start(&mut self, element: &Element) -> Result<(), EnmlError> {
        if ElementKind::of(&element.name) == ElementKind::Todo {
            self.flush();
            self.buffer.clear();
            self.checked = element.is_checked();
            self.in_todo = true;
        } else if !is_inline_formatting(&element.name) {
            self.flush();
        }
        Ok(())
    }

    fn end(&mut self, _name: &str) -> Result<(), EnmlError> {
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), EnmlError> {
        if self.in_todo {
            self.buffer.push_str(text);
        }
        Ok(())
    }
}
