//! Per-field property name descriptors
//!
//! A tag is written as a comma separated list of property names, e.g.
//! `og:image,og:image:url`. The first name has priority. `-` excludes the
//! field from binding and an absent tag falls back to a name derived from the
//! field identifier.

use crate::naming::default_property_name;

/// Tag text that excludes a field.
pub const EXCLUDE: &str = "-";

/// The property names a field accepts, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    names: Vec<String>,
}

impl Tag {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// A tag that binds nothing.
    pub fn excluded() -> Self {
        Self::default()
    }

    /// A tag for embedded composition: the field's own fields are merged into
    /// the enclosing record with no prefix.
    pub fn transparent() -> Self {
        Self {
            names: vec![String::new()],
        }
    }

    /// Parse explicit tag text. Returns `None` when the text is blank, meaning
    /// no tag was given.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text == EXCLUDE {
            return Some(Self::excluded());
        }

        let tag = Self::new(text.split(',').map(str::trim).filter(|name| !name.is_empty()));
        // Only separators: treated like a blank tag.
        (!tag.names.is_empty()).then_some(tag)
    }

    /// Resolve the descriptor for a declared field.
    pub fn declared(ident: &str, text: Option<&str>, flatten: bool) -> Self {
        if let Some(tag) = text.and_then(Self::parse) {
            return tag;
        }
        if flatten {
            Self::transparent()
        } else {
            Self::new([default_property_name(ident)])
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns true when `name` is one of this tag's names.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_excluded(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self.names.as_slice(), [only] if only.is_empty())
    }
}
