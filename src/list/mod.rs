//! Version list controller
//!
//! Owns the paginated, searchable collection of version summaries. The
//! controller never performs I/O itself: `begin_*` methods update the
//! loading state and hand back a [`PageTicket`] describing the request to
//! issue, and [`ListController::apply_page`] folds the response back in.
//!
//! Every ticket carries a sequence number. Only the response to the most
//! recently issued ticket is applied; anything older is dropped, so a slow
//! page for a previous search can never overwrite the current one.

use crate::api::{ApiResult, VersionId, VersionPage, VersionSummary};
use tracing::{debug, trace};

/// Page size assumed until the server reports one
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// How close to the end of the list a cursor must be to load more
pub const LOAD_MORE_THRESHOLD: usize = 3;

/// A list request to issue against the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTicket {
    pub seq: u64,
    pub page: u32,
    pub search: String,
}

/// What the orchestrator should do after a page was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSignal {
    /// First page arrived with items; the first one should be selected
    SelectFirst(VersionSummary),
    /// First page arrived empty; the draft should reset to a new version
    NoVersions,
    /// Nothing for the orchestrator to do
    Idle,
}

/// Paginated version list state
#[derive(Debug, Clone)]
pub struct ListController {
    page: u32,
    items: Vec<VersionSummary>,
    total: u64,
    page_size: u64,
    search: String,
    is_loading_first_page: bool,
    is_loading_more: bool,
    has_more: bool,
    latest_seq: u64,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new()
    }
}

impl ListController {
    /// Create an empty list that has not loaded anything yet
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 0,
            items: Vec::new(),
            total: 0,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            is_loading_first_page: false,
            is_loading_more: false,
            has_more: false,
            latest_seq: 0,
        }
    }

    /// Start over from page 1 with a new search term
    ///
    /// Accumulated items are cleared immediately, before the new page arrives.
    pub fn begin_reset(&mut self, search: &str) -> PageTicket {
        search.clone_into(&mut self.search);
        self.page = 1;
        self.items.clear();
        self.total = 0;
        self.has_more = false;
        self.is_loading_first_page = true;
        self.is_loading_more = false;
        debug!(search = %self.search, "resetting version list");
        self.issue(1)
    }

    /// Reload from page 1 keeping the current search term
    pub fn refresh(&mut self) -> PageTicket {
        let search = self.search.clone();
        self.begin_reset(&search)
    }

    /// Request the next page, unless there is none or a load is already running
    pub fn begin_load_more(&mut self) -> Option<PageTicket> {
        if !self.has_more || self.is_loading_more || self.is_loading_first_page {
            return None;
        }
        self.is_loading_more = true;
        let next = self.page + 1;
        debug!(page = next, "loading more versions");
        Some(self.issue(next))
    }

    fn issue(&mut self, page: u32) -> PageTicket {
        self.latest_seq += 1;
        PageTicket {
            seq: self.latest_seq,
            page,
            search: self.search.clone(),
        }
    }

    /// Whether a response for `ticket` would still be applied
    #[must_use]
    pub const fn is_current(&self, ticket: &PageTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Fold a list response back into the state
    ///
    /// A failed request leaves the items untouched and only clears the
    /// loading flags; reporting the failure is the repository's job.
    pub fn apply_page(&mut self, ticket: &PageTicket, result: ApiResult<VersionPage>) -> ListSignal {
        if !self.is_current(ticket) {
            trace!(seq = ticket.seq, latest = self.latest_seq, "dropping stale page");
            return ListSignal::Idle;
        }
        self.is_loading_first_page = false;
        self.is_loading_more = false;

        let Ok(page) = result else {
            return ListSignal::Idle;
        };

        if ticket.page <= 1 {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.page = ticket.page;
        self.total = page.total;
        if page.page_size > 0 {
            self.page_size = page.page_size;
        }
        self.has_more = self.total > u64::from(self.page) * self.page_size;

        if ticket.page > 1 {
            return ListSignal::Idle;
        }
        self.items
            .first()
            .cloned()
            .map_or(ListSignal::NoVersions, ListSignal::SelectFirst)
    }

    /// Whether a cursor at `position` in [`Self::visible_items`] is close
    /// enough to the end to load more
    #[must_use]
    pub fn should_load_more(&self, position: usize) -> bool {
        self.has_more
            && !self.is_loading_more
            && !self.is_loading_first_page
            && position + LOAD_MORE_THRESHOLD >= self.visible_len()
    }

    fn visible_len(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.matches(&self.search))
            .count()
    }

    /// Items after the client-side re-filter by the current search term
    ///
    /// The server already filtered; this only hides items that no longer
    /// match while a new search is typed.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&VersionSummary> {
        self.items
            .iter()
            .filter(|item| item.matches(&self.search))
            .collect()
    }

    /// Find a loaded item by id
    #[must_use]
    pub fn find(&self, id: VersionId) -> Option<&VersionSummary> {
        self.items.iter().find(|item| item.id == Some(id))
    }

    #[must_use]
    pub fn items(&self) -> &[VersionSummary] {
        &self.items
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Last page applied, 0 before the first load
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub const fn is_loading_first_page(&self) -> bool {
        self.is_loading_first_page
    }

    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    /// Whether any page request is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading_first_page || self.is_loading_more
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn summaries(range: std::ops::Range<i64>) -> Vec<VersionSummary> {
        range
            .map(|i| VersionSummary::new(i, format!("v{i}"), ""))
            .collect()
    }

    fn page(items: Vec<VersionSummary>, total: u64) -> ApiResult<VersionPage> {
        Ok(VersionPage {
            items,
            total,
            page_size: 2,
        })
    }

    #[test]
    fn test_reset_clears_items_before_response() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("");
        list.apply_page(&ticket, page(summaries(1..3), 2));
        assert_eq!(list.items().len(), 2);

        let ticket = list.begin_reset("pizza");
        assert!(list.items().is_empty());
        assert!(list.is_loading_first_page());
        assert_eq!(ticket.page, 1);
        assert_eq!(ticket.search, "pizza");
    }

    #[test]
    fn test_first_page_selects_first_item() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("");
        let signal = list.apply_page(&ticket, page(summaries(5..7), 2));
        assert_eq!(signal, ListSignal::SelectFirst(VersionSummary::new(5, "v5", "")));
        assert!(!list.has_more());
    }

    #[test]
    fn test_empty_first_page_signals_no_versions() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("nothing");
        assert_eq!(list.apply_page(&ticket, page(vec![], 0)), ListSignal::NoVersions);
    }

    #[test]
    fn test_has_more_follows_total() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("");
        list.apply_page(&ticket, page(summaries(1..3), 5));
        assert!(list.has_more());

        let ticket = list.begin_load_more().unwrap();
        assert_eq!(ticket.page, 2);
        assert_eq!(list.apply_page(&ticket, page(summaries(3..5), 5)), ListSignal::Idle);
        assert_eq!(list.items().len(), 4);
        assert!(list.has_more(), "5 > 2 * 2");

        let ticket = list.begin_load_more().unwrap();
        list.apply_page(&ticket, page(summaries(5..6), 5));
        assert_eq!(list.page(), 3);
        assert!(!list.has_more(), "5 > 3 * 2 is false");
        assert!(list.begin_load_more().is_none());
    }

    #[test]
    fn test_load_more_is_serialized() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("");
        list.apply_page(&ticket, page(summaries(1..3), 10));

        assert!(list.begin_load_more().is_some());
        assert!(list.is_loading_more());
        assert!(list.begin_load_more().is_none());
    }

    #[test]
    fn test_stale_page_is_dropped() {
        let mut list = ListController::new();
        let old = list.begin_reset("old");
        let new = list.begin_reset("new");

        assert_eq!(list.apply_page(&old, page(summaries(1..3), 2)), ListSignal::Idle);
        assert!(list.items().is_empty());
        assert!(list.is_loading_first_page());

        list.apply_page(&new, page(summaries(9..10), 1));
        assert_eq!(list.items()[0].id, Some(9));
    }

    #[test]
    fn test_load_more_superseded_by_reset() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("");
        list.apply_page(&ticket, page(summaries(1..3), 10));
        let more = list.begin_load_more().unwrap();
        let fresh = list.refresh();

        list.apply_page(&more, page(summaries(3..5), 10));
        assert!(list.items().is_empty());
        list.apply_page(&fresh, page(summaries(1..3), 10));
        assert_eq!(list.items().len(), 2);
    }

    #[test]
    fn test_failure_keeps_items_and_clears_flags() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("");
        list.apply_page(&ticket, page(summaries(1..3), 10));

        let more = list.begin_load_more().unwrap();
        let signal = list.apply_page(&more, Err(ApiError::Transport("down".into())));
        assert_eq!(signal, ListSignal::Idle);
        assert_eq!(list.items().len(), 2);
        assert!(!list.is_loading());
        assert!(list.has_more());
    }

    #[test]
    fn test_refresh_uses_current_search() {
        let mut list = ListController::new();
        list.begin_reset("wine");
        assert_eq!(list.refresh().search, "wine");
    }

    #[test]
    fn test_should_load_more_near_end() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("");
        list.apply_page(
            &ticket,
            Ok(VersionPage {
                items: summaries(0..10),
                total: 30,
                page_size: 10,
            }),
        );
        assert!(!list.should_load_more(2));
        assert!(list.should_load_more(7));
        assert!(list.should_load_more(9));
    }

    #[test]
    fn test_should_load_more_counts_visible_items() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("piz");
        let mut items = summaries(0..10);
        for item in &mut items[..4] {
            item.name = format!("pizza {}", item.name);
        }
        list.apply_page(
            &ticket,
            Ok(VersionPage {
                items,
                total: 30,
                page_size: 10,
            }),
        );
        assert_eq!(list.visible_items().len(), 4);
        assert!(list.should_load_more(1), "second of four shown items");
        assert!(!list.should_load_more(0));
    }

    #[test]
    fn test_visible_items_refilters() {
        let mut list = ListController::new();
        let ticket = list.begin_reset("");
        list.apply_page(
            &ticket,
            page(
                vec![
                    VersionSummary::new(1, "Pizza", "food"),
                    VersionSummary::new(2, "Wine", "drinks"),
                ],
                2,
            ),
        );
        assert_eq!(list.visible_items().len(), 2);
        list.begin_reset("piz");
        assert!(list.visible_items().is_empty());
        assert!(list.find(1).is_none());
    }
}
