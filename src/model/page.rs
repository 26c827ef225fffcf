//! Offset/limit pagination: requests and the pages they return

use crate::error::{ApiError, Result};

pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 50;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_OFFSET: u32 = 100_000;

/// A validated page request: `limit` in 1..=50 and `offset` in 0..=100 000.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

impl PageRequest {
    pub fn new(limit: u32, offset: u32) -> Result<Self> {
        Ok(Self {
            limit: validate_limit(limit)?,
            offset: validate_offset(offset)?,
        })
    }

    pub fn first(limit: u32) -> Result<Self> {
        Self::new(limit, 0)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The page starting at `offset + limit`.
    pub fn next(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }

    pub(crate) fn query(&self) -> [(&'static str, String); 2] {
        [
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One page of a list endpoint after mapping.
///
/// `received` counts every entry the server sent, including `null`s and
/// entries the mapper skipped, so offsets and exhaustion follow the server's
/// paging rather than `items.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub received: u32,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Work out `has_next` from the paging object. `next` wins; without it a
    /// known `total` decides, and failing that a full page is assumed to
    /// have a successor.
    pub fn new(
        items: Vec<T>,
        received: u32,
        request: PageRequest,
        next: Option<&str>,
        total: Option<u32>,
    ) -> Self {
        let has_next = received > 0
            && (next.is_some()
                || match total {
                    Some(total) => request.offset().saturating_add(received) < total,
                    None => received >= request.limit(),
                });
        Self {
            items,
            received,
            has_next,
        }
    }

    /// The final page.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            received: items.len() as u32,
            items,
            has_next: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Cap the page at `limit` entries. Entries cut off here are still to be
    /// fetched, so a cut page always has a successor.
    pub fn truncate(mut self, limit: u32) -> Self {
        if self.received > limit {
            self.items.truncate(limit as usize);
            self.received = limit;
            self.has_next = true;
        }
        self
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

pub fn validate_limit(limit: u32) -> Result<u32> {
    if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(ApiError::InvalidArgument(format!(
            "limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {limit}"
        )))
    }
}

fn validate_offset(offset: u32) -> Result<u32> {
    if offset <= MAX_OFFSET {
        Ok(offset)
    } else {
        Err(ApiError::InvalidArgument(format!(
            "offset must not exceed {MAX_OFFSET}, got {offset}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(PageRequest::new(0, 0).is_err());
        assert!(PageRequest::new(51, 0).is_err());
        assert!(PageRequest::new(1, 0).is_ok());
        assert!(PageRequest::new(50, MAX_OFFSET).is_ok());
        assert!(PageRequest::new(20, MAX_OFFSET + 1).is_err());
    }

    #[test]
    fn test_default_and_next() {
        let page = PageRequest::default();
        assert_eq!((page.limit(), page.offset()), (20, 0));

        let next = page.next();
        assert_eq!((next.limit(), next.offset()), (20, 20));
        assert_eq!(next.next().offset(), 40);
    }

    #[test]
    fn test_page_follows_server_paging() {
        let request = PageRequest::new(3, 0).unwrap();

        // a null was dropped, but the server still sent a full page
        let page = Page::new(vec!["a", "c"], 3, request, None, Some(6));
        assert!(page.has_next);
        assert_eq!(page.len(), 2);

        let page = Page::new(vec!["a"], 3, request, Some("https://next"), None);
        assert!(page.has_next);

        assert!(!Page::new(vec!["d", "e"], 2, request.next(), None, Some(5)).has_next);
        assert!(Page::new(vec!["a", "b", "c"], 3, request, None, None).has_next);
        assert!(!Page::new(Vec::<&str>::new(), 0, request, Some("https://next"), Some(9)).has_next);
    }

    #[test]
    fn test_page_truncate_caps_received() {
        let page = Page::new(vec![1, 2, 3, 4], 5, PageRequest::first(3).unwrap(), None, None);
        let page = page.truncate(3);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.received, 3);
        assert!(page.has_next);
    }
}
