//! Localization of static page markup.
//!
//! Every element tagged with a localization key gets its string from the
//! selected table. Form inputs take it as placeholder, elements decorated with
//! an icon keep the icon and get a space-prefixed text node, everything else
//! has its text replaced. Elements whose key is unknown are left untouched.

use sealpost_core::{Msg, Strings};

/// Kind of markup element, as far as localization cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Single-line input.
    Input,
    /// Multi-line input.
    TextArea,
    /// Any other element.
    Other,
}

/// A markup element that may carry a localization key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Localization key. `None` for untagged elements.
    pub key: Option<String>,
    /// Element kind.
    pub kind: ElementKind,
    /// Text content.
    pub text: String,
    /// Placeholder (inputs only).
    pub placeholder: String,
    /// Element contains a leading icon child.
    pub has_icon: bool,
}

impl Element {
    /// Tagged element with empty content.
    pub fn tagged(key: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            key: Some(key.into()),
            kind,
            text: String::new(),
            placeholder: String::new(),
            has_icon: false,
        }
    }

    /// Mark the element as carrying an icon.
    #[must_use]
    pub fn with_icon(mut self) -> Self {
        self.has_icon = true;
        self
    }
}

/// Localize `elements` in place and return the page title.
pub fn localize(elements: &mut [Element], strings: &Strings) -> &'static str {
    for element in elements.iter_mut() {
        let Some(value) = element.key.as_deref().and_then(|key| strings.lookup(key)) else {
            continue;
        };

        match element.kind {
            ElementKind::Input | ElementKind::TextArea => element.placeholder = value.to_string(),
            ElementKind::Other if element.has_icon => element.text = format!(" {value}"),
            ElementKind::Other => element.text = value.to_string(),
        }
    }

    strings.get(Msg::PageTitle)
}
