//! A host backed by one saved HTML document.

use std::path::Path;

use dom_query::Document;

use super::HostPage;
use crate::dom;
use crate::encoding;
use crate::error::Result;

/// A saved copy of a comparison page.
///
/// Ids assigned by the extractor persist in the stored document. Navigation
/// is inert: clicks are acknowledged but never change the page, so only
/// single-page regions can be extracted.
pub struct StaticPage {
    doc: Document,
}

impl StaticPage {
    /// Wrap an HTML string.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        Self {
            doc: dom::parse(html),
        }
    }

    /// Wrap raw HTML bytes, detecting the declared charset.
    #[must_use]
    pub fn from_bytes(html: &[u8]) -> Self {
        Self::from_html(&encoding::transcode_to_utf8(html))
    }

    /// Read a saved page from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }
}

impl std::fmt::Debug for StaticPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticPage").finish_non_exhaustive()
    }
}

impl HostPage for StaticPage {
    fn snapshot(&self) -> Result<Document> {
        Ok(dom::clone_document(&self.doc))
    }

    fn assign_id(&self, selector: &str, id: &str) -> Result<bool> {
        Ok(match dom::query_first(&self.doc, selector) {
            Some(element) => {
                element.set_attr("id", id);
                true
            }
            None => false,
        })
    }

    fn click(&self, selector: &str, index: usize) -> Result<bool> {
        let exists = dom::query_all(&self.doc, selector).is_some_and(|sel| sel.length() > index);
        if exists {
            log::warn!("Static page cannot navigate; ignoring click on {selector}[{index}]");
        }
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_id_shows_up_in_later_snapshots() {
        let page = StaticPage::from_html(r#"<div class="a"><p>x</p></div>"#);
        assert!(page.assign_id("div.a", "wrapper").unwrap_or(false));

        let snap = page.snapshot().expect("snapshot");
        assert!(dom::query_first(&snap, "#wrapper p").is_some());
    }

    #[test]
    fn assign_id_reports_missing_target() {
        let page = StaticPage::from_html("<p>x</p>");
        assert!(!page.assign_id("div.missing", "w").unwrap_or(true));
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let page = StaticPage::from_html(r#"<p id="a">x</p>"#);
        let snap = page.snapshot().expect("snapshot");
        snap.select("p").set_attr("id", "changed");
        let again = page.snapshot().expect("snapshot");
        assert!(dom::query_first(&again, "#a").is_some());
    }

    #[test]
    fn clicks_do_not_change_the_page() {
        let page = StaticPage::from_html("<button>Next</button><p>1 / 3</p>");
        assert!(page.click("button", 0).unwrap_or(false));
        assert!(!page.click("button", 1).unwrap_or(true));
        let snap = page.snapshot().expect("snapshot");
        assert_eq!(dom::text_content(&snap.select("p")).trim(), "1 / 3");
    }
}
