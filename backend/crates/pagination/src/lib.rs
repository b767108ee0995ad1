//! Page-number pagination primitives shared by listing endpoints.
//!
//! The crate is deliberately transport-light: a [`PageRequest`] describes the
//! window a caller wants, a [`Page`] carries one window of items together with
//! the total row count, and [`PageLinks`] renders navigation URLs by
//! rewriting the `page` query parameter of a base URL.
//!
//! # Examples
//! ```
//! use std::num::NonZeroU32;
//!
//! use pagination::{Page, PageRequest};
//!
//! let size = NonZeroU32::new(10).expect("non-zero page size");
//! let request = PageRequest::parse_lenient(Some("2"), size);
//! let page = Page::new(vec!["k"; 10], request, 25);
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.has_next());
//! assert!(page.has_previous());
//! ```

mod links;
mod page;
mod request;

pub use links::{PAGE_PARAM, PageLinks};
pub use page::{Page, PageMeta};
pub use request::{PageRequest, PageRequestError};
