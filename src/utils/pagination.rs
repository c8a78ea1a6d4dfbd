use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Page number '{0}' is not an integer")]
    InvalidPage(String),

    #[error("Page {page} is out of range (1..={num_pages})")]
    OutOfRange { page: i64, num_pages: u64 },
}

/// Parse the raw `page` query value. Absent or blank means the first page.
///
/// Integers too large for `i64` saturate, so they are reported as out of range
/// rather than as not-a-number.
pub fn parse_page(raw: Option<&str>) -> Result<i64, PaginationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(value) => value
            .parse::<i64>()
            .ok()
            .or_else(|| saturated_integer(value))
            .ok_or_else(|| PaginationError::InvalidPage(value.to_string())),
    }
}

fn saturated_integer(value: &str) -> Option<i64> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMeta {
    pub number: u64,
    pub num_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<u64>,
    pub previous_page_number: Option<u64>,
}

/// Offset/limit of one page over a collection of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
    pub meta: PageMeta,
}

impl PageWindow {
    /// An empty collection still has one (empty) first page.
    pub fn resolve(page: i64, page_size: u64, total_items: u64) -> Result<Self, PaginationError> {
        let page_size = page_size.max(1);
        let num_pages = total_items.div_ceil(page_size).max(1);

        if page < 1 || page as u64 > num_pages {
            return Err(PaginationError::OutOfRange { page, num_pages });
        }

        let number = page as u64;
        let offset = (number - 1) * page_size;
        let limit = page_size.min(total_items.saturating_sub(offset));
        let has_next = number < num_pages;
        let has_previous = number > 1;

        Ok(Self {
            offset,
            limit,
            meta: PageMeta {
                number,
                num_pages,
                total_items,
                page_size,
                has_next,
                has_previous,
                next_page_number: has_next.then_some(number + 1),
                previous_page_number: has_previous.then_some(number - 1),
            },
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Slice an already filtered and ordered collection into the requested page.
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: u64) -> Result<Page<T>, PaginationError> {
    let window = PageWindow::resolve(page, page_size, items.len() as u64)?;
    let items = items
        .into_iter()
        .skip(window.offset as usize)
        .take(window.limit as usize)
        .collect();

    Ok(Page {
        items,
        meta: window.meta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_defaults_to_first() {
        assert_eq!(parse_page(None), Ok(1));
        assert_eq!(parse_page(Some("")), Ok(1));
        assert_eq!(parse_page(Some(" 3 ")), Ok(3));
    }

    #[test]
    fn test_parse_page_rejects_non_numeric() {
        assert_eq!(
            parse_page(Some("abc")),
            Err(PaginationError::InvalidPage("abc".to_string()))
        );
        assert!(parse_page(Some("1.5")).is_err());
        assert!(parse_page(Some("-")).is_err());
    }

    #[test]
    fn test_parse_page_saturates_huge_integers() {
        assert_eq!(parse_page(Some("99999999999999999999")), Ok(i64::MAX));
        assert_eq!(parse_page(Some("-99999999999999999999")), Ok(i64::MIN));
        assert_eq!(
            PageWindow::resolve(i64::MAX, 10, 25).unwrap_err(),
            PaginationError::OutOfRange {
                page: i64::MAX,
                num_pages: 3
            }
        );
    }

    #[test]
    fn test_twenty_five_items_in_pages_of_ten() {
        let items: Vec<u32> = (1..=25).collect();

        let first = paginate(items.clone(), 1, 10).unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.meta.num_pages, 3);
        assert!(first.meta.has_next);
        assert!(!first.meta.has_previous);
        assert_eq!(first.meta.next_page_number, Some(2));

        let last = paginate(items.clone(), 3, 10).unwrap();
        assert_eq!(last.items, vec![21, 22, 23, 24, 25]);
        assert!(!last.meta.has_next);
        assert_eq!(last.meta.previous_page_number, Some(2));

        assert_eq!(
            paginate(items, 4, 10).unwrap_err(),
            PaginationError::OutOfRange {
                page: 4,
                num_pages: 3
            }
        );
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let page = paginate(Vec::<u32>::new(), 1, 10).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.meta.num_pages, 1);
        assert!(paginate(Vec::<u32>::new(), 2, 10).is_err());
    }

    #[test]
    fn test_page_below_one_is_out_of_range() {
        assert!(PageWindow::resolve(0, 10, 5).is_err());
        assert!(PageWindow::resolve(-2, 10, 5).is_err());
    }

    #[test]
    fn test_window_offsets() {
        let window = PageWindow::resolve(2, 10, 15).unwrap();
        assert_eq!(window.offset, 10);
        assert_eq!(window.limit, 5);
    }
}
