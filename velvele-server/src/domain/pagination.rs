use serde::Serialize;

use super::error::DomainError;

pub(crate) const DEFAULT_PAGE: u32 = 1;
pub(crate) const DEFAULT_LIMIT: u32 = 12;
pub(crate) const MAX_LIMIT: u32 = 100;
pub(crate) const DEFAULT_VISIBLE_PAGES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) page: u32,
    pub(crate) limit: u32,
}

impl PageRequest {
    pub(crate) fn with_default_limit(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
    ) -> Result<Self, DomainError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(default_limit);

        if page == 0 {
            return Err(DomainError::Validation {
                field: "page",
                message: "must be >= 1",
            });
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(DomainError::Validation {
                field: "limit",
                message: "must be 1..100",
            });
        }
        Ok(Self { page, limit })
    }

    pub(crate) fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct PaginationState {
    pub(crate) current_page: u32,
    pub(crate) total_pages: u32,
    pub(crate) total_count: u64,
    pub(crate) has_next_page: bool,
    pub(crate) has_prev_page: bool,
    pub(crate) next_page: Option<u32>,
    pub(crate) prev_page: Option<u32>,
}

impl PaginationState {
    pub(crate) fn new(request: PageRequest, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(u64::from(request.limit.max(1)));
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        let current_page = request.page;

        let has_next_page = current_page < total_pages;
        let has_prev_page = current_page > 1;

        Self {
            current_page,
            total_pages,
            total_count,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| current_page + 1),
            prev_page: has_prev_page.then(|| current_page - 1),
        }
    }

    /// Numbered links around the current page, with the first and last page
    /// always reachable. Empty when there is nothing to paginate.
    pub(crate) fn page_window(&self, max_visible: u32) -> Vec<PageLink> {
        if self.total_pages <= 1 {
            return Vec::new();
        }

        let max_visible = max_visible.max(1);
        let half = max_visible / 2;
        let current = self.current_page.clamp(1, self.total_pages);

        let mut start = current.saturating_sub(half).max(1);
        let mut end = current.saturating_add(half).min(self.total_pages);

        if end - start + 1 < max_visible {
            if start == 1 {
                end = (start + max_visible - 1).min(self.total_pages);
            } else {
                start = (end + 1).saturating_sub(max_visible).max(1);
            }
        }

        let mut links = Vec::new();
        if start > 1 {
            links.push(PageLink::Page(1));
            if start > 2 {
                links.push(PageLink::Ellipsis);
            }
        }

        links.extend((start..=end).map(PageLink::Page));

        if end < self.total_pages {
            if end < self.total_pages - 1 {
                links.push(PageLink::Ellipsis);
            }
            links.push(PageLink::Page(self.total_pages));
        }
        links
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "number", rename_all = "snake_case")]
pub(crate) enum PageLink {
    Page(u32),
    Ellipsis,
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_LIMIT, DomainError, PageLink, PageRequest, PaginationState};

    fn request(page: u32, limit: u32) -> PageRequest {
        PageRequest::with_default_limit(Some(page), Some(limit), DEFAULT_LIMIT).expect("request must be valid")
    }

    #[test]
    fn page_request_applies_defaults() {
        let req = PageRequest::with_default_limit(None, None, DEFAULT_LIMIT).expect("defaults must be valid");
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 12);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn page_request_rejects_zero_page_and_bad_limit() {
        let err = PageRequest::with_default_limit(Some(0), None, DEFAULT_LIMIT).expect_err("page 0 must fail");
        assert!(matches!(err, DomainError::Validation { field: "page", .. }));

        let err = PageRequest::with_default_limit(None, Some(0), DEFAULT_LIMIT).expect_err("limit 0 must fail");
        assert!(matches!(err, DomainError::Validation { field: "limit", .. }));

        assert!(PageRequest::with_default_limit(None, Some(101), DEFAULT_LIMIT).is_err());
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(request(3, 12).offset(), 24);
        assert_eq!(request(1, 5).offset(), 0);
    }

    #[test]
    fn first_of_two_pages() {
        let state = PaginationState::new(request(1, 12), 13);
        assert_eq!(
            state,
            PaginationState {
                current_page: 1,
                total_pages: 2,
                total_count: 13,
                has_next_page: true,
                has_prev_page: false,
                next_page: Some(2),
                prev_page: None,
            }
        );
    }

    #[test]
    fn last_page_has_only_prev() {
        let state = PaginationState::new(request(2, 12), 13);
        assert!(!state.has_next_page);
        assert!(state.has_prev_page);
        assert_eq!(state.next_page, None);
        assert_eq!(state.prev_page, Some(1));
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let state = PaginationState::new(request(1, 12), 0);
        assert_eq!(state.total_pages, 0);
        assert!(!state.has_next_page);
        assert!(!state.has_prev_page);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        let state = PaginationState::new(request(2, 10), 20);
        assert_eq!(state.total_pages, 2);
        assert!(!state.has_next_page);
    }

    #[test]
    fn navigation_flags_hold_for_every_page() {
        for total in 0..40u64 {
            for page in 1..6u32 {
                let state = PaginationState::new(request(page, 7), total);
                assert_eq!(u64::from(state.total_pages), total.div_ceil(7));
                assert_eq!(state.has_next_page, page < state.total_pages);
                assert_eq!(state.has_prev_page, page > 1);
                assert_eq!(state.next_page.is_some(), state.has_next_page);
                assert_eq!(state.prev_page.is_some(), state.has_prev_page);
            }
        }
    }

    #[test]
    fn window_is_empty_for_single_page() {
        let state = PaginationState::new(request(1, 12), 5);
        assert!(state.page_window(5).is_empty());
    }

    #[test]
    fn window_centres_on_current_page() {
        let state = PaginationState::new(request(5, 1), 10);
        assert_eq!(
            state.page_window(5),
            vec![
                PageLink::Page(1),
                PageLink::Ellipsis,
                PageLink::Page(3),
                PageLink::Page(4),
                PageLink::Page(5),
                PageLink::Page(6),
                PageLink::Page(7),
                PageLink::Ellipsis,
                PageLink::Page(10),
            ]
        );
    }

    #[test]
    fn window_shifts_at_the_edges() {
        let first = PaginationState::new(request(1, 1), 10);
        assert_eq!(
            first.page_window(5),
            vec![
                PageLink::Page(1),
                PageLink::Page(2),
                PageLink::Page(3),
                PageLink::Page(4),
                PageLink::Page(5),
                PageLink::Ellipsis,
                PageLink::Page(10),
            ]
        );

        let last = PaginationState::new(request(10, 1), 10);
        assert_eq!(
            last.page_window(5),
            vec![
                PageLink::Page(1),
                PageLink::Ellipsis,
                PageLink::Page(6),
                PageLink::Page(7),
                PageLink::Page(8),
                PageLink::Page(9),
                PageLink::Page(10),
            ]
        );
    }

    #[test]
    fn window_skips_ellipsis_for_adjacent_edges() {
        let state = PaginationState::new(request(4, 1), 6);
        assert_eq!(
            state.page_window(5),
            vec![
                PageLink::Page(1),
                PageLink::Page(2),
                PageLink::Page(3),
                PageLink::Page(4),
                PageLink::Page(5),
                PageLink::Page(6),
            ]
        );
    }
}
