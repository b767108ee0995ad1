//! Navigation links for paginated listings.

use serde::Serialize;
use url::Url;

use crate::PageMeta;

/// Query parameter carrying the one-based page number.
pub const PAGE_PARAM: &str = "page";

/// Self/next/previous URLs for a served page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    /// URL of the page that was served.
    #[serde(rename = "self")]
    pub self_link: String,
    /// URL of the following page, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// URL of the preceding page, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

impl PageLinks {
    /// Build links by rewriting the `page` parameter of `base`.
    ///
    /// Other query parameters are preserved in their original order.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroU32;
    ///
    /// use pagination::{Page, PageLinks, PageRequest};
    /// use url::Url;
    ///
    /// let size = NonZeroU32::new(10).expect("non-zero");
    /// let page = Page::new(vec![(); 10], PageRequest::first(size), 11);
    /// let base = Url::parse("http://localhost/api/v1/posts").expect("url");
    /// let links = PageLinks::for_page(&base, &page.meta());
    /// assert_eq!(links.next.as_deref(), Some("http://localhost/api/v1/posts?page=2"));
    /// assert!(links.prev.is_none());
    /// ```
    #[must_use]
    pub fn for_page(base: &Url, meta: &PageMeta) -> Self {
        let next = meta
            .has_next
            .then(|| with_page(base, meta.number.saturating_add(1)).into());
        let prev = meta
            .has_previous
            .then(|| with_page(base, previous_number(meta)).into());
        Self {
            self_link: with_page(base, meta.number).into(),
            next,
            prev,
        }
    }
}

/// Previous page number, clamped to the last real page when the served page
/// lies beyond the end of the result set.
fn previous_number(meta: &PageMeta) -> u32 {
    let last = u32::try_from(meta.total_pages).unwrap_or(u32::MAX);
    meta.number.saturating_sub(1).clamp(1, last.max(1))
}

fn with_page(base: &Url, number: u32) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_PARAM, &number.to_string());
    url
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::{Page, PageRequest};
    use rstest::rstest;

    fn meta(number: u32, total_items: u64) -> PageMeta {
        let size = NonZeroU32::new(10).expect("non-zero");
        let request = PageRequest::new(number, size).expect("valid page");
        Page::new(Vec::<u8>::new(), request, total_items).meta()
    }

    #[rstest]
    fn middle_page_links_both_ways() {
        let base = Url::parse("http://blog.test/api/v1/posts?page=9").expect("url");
        let links = PageLinks::for_page(&base, &meta(2, 25));
        assert_eq!(links.self_link, "http://blog.test/api/v1/posts?page=2");
        assert_eq!(
            links.next.as_deref(),
            Some("http://blog.test/api/v1/posts?page=3")
        );
        assert_eq!(
            links.prev.as_deref(),
            Some("http://blog.test/api/v1/posts?page=1")
        );
    }

    #[rstest]
    fn unrelated_query_parameters_survive() {
        let base = Url::parse("http://blog.test/c?lang=en&page=1").expect("url");
        let links = PageLinks::for_page(&base, &meta(1, 11));
        assert_eq!(
            links.next.as_deref(),
            Some("http://blog.test/c?lang=en&page=2")
        );
    }

    #[rstest]
    fn out_of_range_page_points_back_to_last_page() {
        let base = Url::parse("http://blog.test/api/v1/posts").expect("url");
        let links = PageLinks::for_page(&base, &meta(7, 25));
        assert!(links.next.is_none());
        assert_eq!(
            links.prev.as_deref(),
            Some("http://blog.test/api/v1/posts?page=3")
        );
    }
}
