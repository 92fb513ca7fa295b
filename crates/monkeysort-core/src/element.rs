use std::{borrow::Cow, fmt::Debug, hash::Hash, path::PathBuf};

///
/// Element
///
/// One opaque item to be placed into the final order.
/// Identity is equality + hashing; persistence goes through a text projection.
///

pub trait Element: Clone + Debug + Eq + Hash {
    /// Text written to the session file, or `None` if the element has no
    /// faithful text form.
    fn to_text(&self) -> Option<Cow<'_, str>>;

    /// Rebuild an element from its persisted text.
    fn from_text(text: String) -> Self;

    /// An element without a non-empty text form is an absent reference.
    fn is_present(&self) -> bool {
        self.to_text().is_some_and(|text| !text.is_empty())
    }
}

impl Element for String {
    fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }

    fn from_text(text: String) -> Self {
        text
    }
}

impl Element for PathBuf {
    // Non UTF-8 paths cannot be persisted without loss.
    fn to_text(&self) -> Option<Cow<'_, str>> {
        self.to_str().map(Cow::Borrowed)
    }

    fn from_text(text: String) -> Self {
        Self::from(text)
    }
}

///
/// TESTS
///
