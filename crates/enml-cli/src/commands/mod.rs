//! CLI command implementations.

pub(crate) mod html;
pub(crate) mod text;
pub(crate) mod todos;
pub(crate) mod toggle;
pub(crate) mod url;

pub(crate) use html::HtmlArgs;
pub(crate) use text::{FromTextArgs, TextArgs};
pub(crate) use todos::TodosArgs;
pub(crate) use toggle::ToggleArgs;
pub(crate) use url::UrlArgs;
