//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the extractor: parsing,
//! attribute juggling for temporary markers, text access and fallible
//! selector queries.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Re-parse a document into an independent copy.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html())
}

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Put a temporary `id` on an element, returning the previous one.
///
/// Pair with [`restore_id`] once the scoped queries are done.
pub fn mark(sel: &Selection, marker: &str) -> Option<String> {
    let previous = id(sel);
    sel.set_attr("id", marker);
    previous
}

/// Restore the `id` saved by [`mark`].
pub fn restore_id(sel: &Selection, previous: Option<&str>) {
    match previous {
        Some(value) => sel.set_attr("id", value),
        None => sel.remove_attr("id"),
    }
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text of the element's first child node.
///
/// Region labels are the leading text node of the region container, so this
/// deliberately looks at child *nodes*, not child elements.
#[must_use]
pub fn first_child_text(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::first_child)
        .map(|child| child.text().to_string())
}

// === Query Operations ===

/// Run a selector against the whole document.
///
/// Returns `None` for an invalid selector or when nothing matches.
#[must_use]
pub fn query_all<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.try_select(selector).filter(Selection::exists)
}

/// First element matching a selector in the whole document.
#[must_use]
pub fn query_first<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    query_all(doc, selector).map(|sel| sel.first())
}

/// Split a selection into one selection per matched element, in document order.
#[must_use]
pub fn elements<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes().iter().map(|node| Selection::from(*node)).collect()
}

/// Prefix a relative selector with an id scope.
///
/// `scoped("wrapper", "> div")` becomes `#wrapper > div`.
#[must_use]
pub fn scoped(id: &str, relative: &str) -> String {
    format!("#{id} {relative}")
}
