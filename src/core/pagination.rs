//! Pagination and sorting types

use crate::core::error::ValidationError;
use serde::Serialize;

/// Sort direction of one sort criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Parse `asc` / `desc` (case-insensitive)
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(ValidationError::InvalidSortDirection {
                direction: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, Direction::Asc)
    }
}

/// One sort criterion: a field name and a direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }

    /// Parse a `sort` query value
    ///
    /// # Format
    /// - `field` or `field,asc` (ascending)
    /// - `field,desc` (descending)
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let (property, direction) = match value.split_once(',') {
            Some((property, direction)) => (property, Direction::parse(direction)?),
            None => (value, Direction::Asc),
        };
        let property = property.trim();
        if property.is_empty() {
            return Err(ValidationError::InvalidParameter {
                parameter: "sort".to_string(),
                value: value.to_string(),
            });
        }
        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }

    /// The `sort` query value this criterion was parsed from
    pub fn to_param(&self) -> String {
        format!("{},{}", self.property, self.direction.as_str())
    }
}

/// A caller-supplied page request: zero-based page number, page size and
/// sort order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    pub page: usize,
    pub page_size: usize,
    pub sort: Vec<SortOrder>,
}

impl Pageable {
    /// Create an unsorted page request. A zero page size is raised to 1.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
            sort: Vec::new(),
        }
    }

    /// Add sort criteria
    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Index of the first element of this page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}

/// A materialized page of items plus pagination metadata
///
/// Without active paging the result holds the entire input, with
/// `page == 0` and `page_size == total_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub paging_active: bool,
    pub sort: Vec<SortOrder>,
}

impl<T> PaginationResult<T> {
    /// Wrap a complete, unpaged list
    pub fn unpaged(items: Vec<T>) -> Self {
        let total_count = items.len();
        Self {
            items,
            total_count,
            page: 0,
            page_size: total_count,
            paging_active: false,
            sort: Vec::new(),
        }
    }

    /// Wrap one page of a larger list of `total_count` elements
    pub fn paged(items: Vec<T>, total_count: usize, pageable: &Pageable) -> Self {
        Self {
            total_count: total_count.max(items.len()),
            items,
            page: pageable.page,
            page_size: pageable.page_size,
            paging_active: true,
            sort: pageable.sort.clone(),
        }
    }

    /// Number of pages needed for `total_count` elements
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// Zero-based index of the last page (0 when there are no elements)
    pub fn last_page(&self) -> usize {
        self.total_pages().saturating_sub(1)
    }

    /// Page metadata for the response body, present only while paging
    pub fn metadata(&self) -> Option<PageMetadata> {
        self.paging_active.then(|| PageMetadata {
            size: self.page_size,
            total_elements: self.total_count,
            total_pages: self.total_pages(),
            number: self.page,
        })
    }

    /// Transform every item, keeping the metadata
    pub fn map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<PaginationResult<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(PaginationResult {
            items,
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            paging_active: self.paging_active,
            sort: self.sort,
        })
    }
}

/// Page metadata rendered under `page`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub number: usize,
}
