//! ENML element names and how the transforms classify them.

/// Root element of every note.
pub const NOTE: &str = "en-note";

/// Checklist item.
pub const TODO: &str = "en-todo";

/// Reference to an attached resource.
pub const MEDIA: &str = "en-media";

/// Style given to a note body when the note does not set one.
pub const DEFAULT_NOTE_STYLE: &str =
    "word-wrap: break-word; -webkit-nbsp-mode: space; -webkit-line-break: after-white-space;";

/// Inline formatting elements that do not end a checklist item's text.
const INLINE_FORMATTING: &[&str] = &["b", "u", "i", "font", "strong"];

/// Element classes with transform-specific behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ElementKind {
    Note,
    Todo,
    Media,
    Other,
}

impl ElementKind {
    pub(crate) fn of(name: &str) -> Self {
        match name {
            NOTE => Self::Note,
            TODO => Self::Todo,
            MEDIA => Self::Media,
            _ => Self::Other,
        }
    }
}

pub(crate) fn is_inline_formatting(name: &str) -> bool {
    INLINE_FORMATTING.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_kind() {
        assert_eq!(ElementKind::of("en-note"), ElementKind::Note);
        assert_eq!(ElementKind::of("en-todo"), ElementKind::Todo);
        assert_eq!(ElementKind::of("en-media"), ElementKind::Media);
        assert_eq!(ElementKind::of("div"), ElementKind::Other);
    }

    #[test]
    fn test_inline_formatting_is_exact() {
        assert!(is_inline_formatting("b"));
        assert!(is_inline_formatting("strong"));
        assert!(is_inline_formatting("font"));
        assert!(!is_inline_formatting("ul"));
        assert!(!is_inline_formatting("br"));
        assert!(!is_inline_formatting("span"));
    }
}
