//! Page request parsing and window arithmetic.

use std::num::NonZeroU32;

use thiserror::Error;

/// Errors raised when constructing a [`PageRequest`] strictly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page number must be at least 1")]
    ZeroNumber,
    /// The raw page value was not a decimal integer.
    #[error("page number must be a positive integer, got `{value}`")]
    NotANumber {
        /// Raw value supplied by the caller.
        value: String,
    },
}

/// One-based page number combined with a fixed page size.
///
/// ## Invariants
/// - `number >= 1`.
/// - `size >= 1` (enforced by [`NonZeroU32`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    number: NonZeroU32,
    size: NonZeroU32,
}

impl PageRequest {
    /// Request the first page.
    #[must_use]
    pub const fn first(size: NonZeroU32) -> Self {
        Self {
            number: NonZeroU32::MIN,
            size,
        }
    }

    /// Construct a request, rejecting page zero.
    ///
    /// # Errors
    /// Returns [`PageRequestError::ZeroNumber`] when `number` is zero.
    pub fn new(number: u32, size: NonZeroU32) -> Result<Self, PageRequestError> {
        let number = NonZeroU32::new(number).ok_or(PageRequestError::ZeroNumber)?;
        Ok(Self { number, size })
    }

    /// Parse a raw `page` query value strictly.
    ///
    /// # Errors
    /// Returns [`PageRequestError::NotANumber`] for non-numeric input and
    /// [`PageRequestError::ZeroNumber`] for `0`.
    pub fn parse(raw: &str, size: NonZeroU32) -> Result<Self, PageRequestError> {
        let trimmed = raw.trim();
        let number = trimmed
            .parse::<u32>()
            .map_err(|_| PageRequestError::NotANumber {
                value: trimmed.to_owned(),
            })?;
        Self::new(number, size)
    }

    /// Parse a raw `page` query value, falling back to the first page when the
    /// value is missing, malformed, or zero.
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>, size: NonZeroU32) -> Self {
        raw.and_then(|value| Self::parse(value, size).ok())
            .unwrap_or_else(|| Self::first(size))
    }

    /// One-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number.get()
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size.get()
    }

    /// Number of rows to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number.get() - 1).saturating_mul(u64::from(self.size.get()))
    }
}
