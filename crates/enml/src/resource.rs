//! Resources referenced by `en-media` elements.

use std::collections::HashMap;

/// Host used by [`url_of_resource`].
pub const DEFAULT_RESOURCE_HOST: &str = "https://www.evernote.com";

/// A resolved attachment: either a bare URL or a URL with a display title.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Resource {
    Url(String),
    Record {
        url: String,
        #[cfg_attr(feature = "serde", serde(default))]
        title: Option<String>,
    },
}

impl Resource {
    /// Resource with a display title.
    #[must_use]
    pub fn titled(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Record {
            url: url.into(),
            title: Some(title.into()),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Record { url, .. } => url.as_str(),
        }
    }

    /// Display title, falling back to the URL when no title is set.
    pub fn title(&self) -> &str {
        match self {
            Self::Record {
                title: Some(title), ..
            } if !title.is_empty() => title.as_str(),
            _ => self.url(),
        }
    }
}

impl From<&str> for Resource {
    fn from(url: &str) -> Self {
        Self::Url(url.to_owned())
    }
}

impl From<String> for Resource {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

/// Resource table keyed by content hash.
pub type Resources = HashMap<String, Resource>;

/// URL of a resource on the default host.
///
/// ```
/// assert_eq!(
///     enml::url_of_resource("abc", "s1"),
///     "https://www.evernote.com/shard/s1/res/abc"
/// );
/// ```
pub fn url_of_resource(guid: &str, shard: &str) -> String {
    url_of_resource_on(DEFAULT_RESOURCE_HOST, guid, shard)
}

/// URL of a resource on `host`.
pub fn url_of_resource_on(host: &str, guid: &str, shard: &str) -> String {
    format!("{}/shard/{shard}/res/{guid}", host.trim_end_matches('/'))
}
