use crate::api::words::{WordItem, GROUP_COUNT, PAGE_COUNT};

/// Word-browser state: one fetched page of a group plus the cursor over
/// group/page. Fetching is the app's job; the pager only navigates.
#[derive(Debug, Default)]
pub struct BrowsePager {
    pub group: u8,
    pub page: u8,
    pub words: Vec<WordItem>,
}

impl BrowsePager {
    pub fn new(group: u8, page: u8) -> Self {
        Self {
            group: group.min(GROUP_COUNT - 1),
            page: page.min(PAGE_COUNT - 1),
            words: Vec::new(),
        }
    }

    /// True when the cursor moved and a refetch is needed.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 < PAGE_COUNT {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Switching group rewinds to its first page.
    pub fn set_group(&mut self, group: u8) -> bool {
        if group >= GROUP_COUNT || group == self.group {
            return false;
        }
        self.group = group;
        self.page = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_clamps_to_service_range() {
        let mut pager = BrowsePager::new(0, 0);
        assert!(!pager.prev_page());
        assert_eq!(pager.page, 0);

        for expected in 1..PAGE_COUNT {
            assert!(pager.next_page());
            assert_eq!(pager.page, expected);
        }
        assert!(!pager.next_page());
        assert_eq!(pager.page, PAGE_COUNT - 1);
    }

    #[test]
    fn group_switch_rewinds_page() {
        let mut pager = BrowsePager::new(0, 12);
        assert!(pager.set_group(4));
        assert_eq!(pager.group, 4);
        assert_eq!(pager.page, 0);
    }

    #[test]
    fn same_or_invalid_group_is_a_noop() {
        let mut pager = BrowsePager::new(2, 7);
        assert!(!pager.set_group(2));
        assert!(!pager.set_group(GROUP_COUNT));
        assert_eq!(pager.page, 7);
    }

    #[test]
    fn out_of_range_start_is_clamped() {
        let pager = BrowsePager::new(99, 99);
        assert_eq!(pager.group, GROUP_COUNT - 1);
        assert_eq!(pager.page, PAGE_COUNT - 1);
    }
}
