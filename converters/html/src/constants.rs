//! Fixed markup for the XHTML output.

pub(crate) const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

pub(crate) const DOCTYPE: &str = "<!DOCTYPE html>";

/// Title written when the tree has no source file to name it after.
pub(crate) const DEFAULT_TITLE: &str = "Untitled";

/// Elements that never have content and are written self-closed, e.g. `<br/>`.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements followed by a newline in the output so the markup stays readable.
pub(crate) const BLOCK_ELEMENTS: &[&str] = &["div", "p"];

#[must_use]
pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

#[must_use]
pub(crate) fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag)
}
