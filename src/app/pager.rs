//! Windowing over the filtered Pokédex list
//!
//! Two mutually exclusive presentations of the same filtered sequence:
//! fixed pages with navigation, or an incremental window that grows as the
//! user scrolls. Both share a tiny Idle → Loading → Idle machine so views
//! get one frame of loading feedback; requests that land while a request is
//! already in flight are dropped, not queued.

use crate::constants::{BATCH_SIZE, INITIAL_BATCH, PAGE_SIZE};
use std::ops::Range;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WindowMode {
    Paged,
    Incremental,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoadPhase {
    Idle,
    Loading,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Request {
    GoTo(usize),
    LoadMore,
}

pub struct Pager {
    mode: WindowMode,
    /// 1-indexed current page (paged mode)
    page: usize,
    /// Number of visible entries (incremental mode)
    displayed: usize,
    phase: LoadPhase,
    pending: Option<Request>,
    scroll_to_top: bool,
}

impl Pager {
    pub fn new(mode: WindowMode) -> Self {
        Self {
            mode,
            page: 1,
            displayed: INITIAL_BATCH,
            phase: LoadPhase::Idle,
            pending: None,
            scroll_to_top: false,
        }
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    /// Any filter change or mode switch lands here: back to the first
    /// window, idle, nothing pending.
    pub fn reset(&mut self) {
        self.page = 1;
        self.displayed = INITIAL_BATCH;
        self.phase = LoadPhase::Idle;
        self.pending = None;
        self.scroll_to_top = false;
    }

    pub fn set_mode(&mut self, mode: WindowMode) {
        if self.mode != mode {
            self.mode = mode;
            self.reset();
        }
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(PAGE_SIZE)
    }

    /// Slice of the filtered list currently visible
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        match self.mode {
            WindowMode::Paged => {
                let start = (self.page - 1).saturating_mul(PAGE_SIZE).min(len);
                let end = (start + PAGE_SIZE).min(len);
                start..end
            }
            WindowMode::Incremental => 0..self.displayed.min(len),
        }
    }

    /// Whether the incremental window has anything left to reveal
    pub fn has_more(&self, len: usize) -> bool {
        self.mode == WindowMode::Incremental && self.displayed < len
    }

    fn request(&mut self, request: Request) -> bool {
        if self.phase == LoadPhase::Loading {
            return false;
        }
        self.pending = Some(request);
        self.phase = LoadPhase::Loading;
        true
    }

    /// Navigate to an absolute page. Out-of-range targets are no-ops.
    pub fn go_to(&mut self, target: usize, len: usize) -> bool {
        let total = self.total_pages(len);
        if self.mode != WindowMode::Paged
            || target < 1
            || target > total
            || target == self.page
        {
            return false;
        }
        self.request(Request::GoTo(target))
    }

    pub fn first_page(&mut self, len: usize) -> bool {
        self.go_to(1, len)
    }

    pub fn previous_page(&mut self, len: usize) -> bool {
        self.go_to(self.page.saturating_sub(1), len)
    }

    pub fn next_page(&mut self, len: usize) -> bool {
        self.go_to(self.page + 1, len)
    }

    pub fn last_page(&mut self, len: usize) -> bool {
        self.go_to(self.total_pages(len), len)
    }

    /// Grow the incremental window by one batch. No-op once everything is
    /// visible or while a request is in flight (guards the scroll trigger
    /// firing on every frame near the bottom).
    pub fn load_more(&mut self, len: usize) -> bool {
        if self.mode != WindowMode::Incremental || self.displayed >= len {
            return false;
        }
        self.request(Request::LoadMore)
    }

    /// Advance the phase machine. Called once per frame; a request accepted
    /// on frame N becomes visible on frame N+1, which is the whole loading
    /// transition.
    pub fn tick(&mut self, len: usize) {
        if self.phase != LoadPhase::Loading {
            return;
        }
        match self.pending.take() {
            Some(Request::GoTo(page)) => {
                self.page = page;
                self.scroll_to_top = true;
            }
            Some(Request::LoadMore) => {
                self.displayed = (self.displayed + BATCH_SIZE).min(len);
            }
            None => {}
        }
        self.phase = LoadPhase::Idle;
    }

    /// One-shot flag consumed by the view after a page change
    pub fn take_scroll_to_top(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(pager: &mut Pager, len: usize) {
        pager.tick(len);
    }

    #[test]
    fn pages_tile_the_filtered_list_exactly() {
        for len in [0, 1, PAGE_SIZE - 1, PAGE_SIZE, PAGE_SIZE + 1, 45, 3 * PAGE_SIZE] {
            let mut pager = Pager::new(WindowMode::Paged);
            let mut seen: Vec<usize> = Vec::new();
            let total = pager.total_pages(len);

            seen.extend(pager.visible_range(len));
            for _ in 1..total {
                assert!(pager.next_page(len));
                settle(&mut pager, len);
                seen.extend(pager.visible_range(len));
            }

            let expected: Vec<usize> = (0..len).collect();
            assert_eq!(seen, expected, "len {}", len);
        }
    }

    #[test]
    fn page_boundary_scenario() {
        // 45 entries, page size 20: three pages, the last holding five
        let len = 45;
        let mut pager = Pager::new(WindowMode::Paged);
        assert_eq!(pager.total_pages(len), 3);

        assert!(pager.last_page(len));
        settle(&mut pager, len);
        assert_eq!(pager.page(), 3);
        assert_eq!(pager.visible_range(len), 40..45);

        // Navigating past the end is a no-op, state stays on page 3
        assert!(!pager.go_to(4, len));
        settle(&mut pager, len);
        assert_eq!(pager.page(), 3);
        assert!(!pager.go_to(0, len));
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn navigation_sets_loading_then_scrolls_to_top() {
        let len = 100;
        let mut pager = Pager::new(WindowMode::Paged);

        assert!(pager.next_page(len));
        assert_eq!(pager.phase(), LoadPhase::Loading);
        // Still on the old page until the next frame
        assert_eq!(pager.page(), 1);

        // Requests while loading are ignored, not queued
        assert!(!pager.next_page(len));

        settle(&mut pager, len);
        assert_eq!(pager.phase(), LoadPhase::Idle);
        assert_eq!(pager.page(), 2);
        assert!(pager.take_scroll_to_top());
        assert!(!pager.take_scroll_to_top());
    }

    #[test]
    fn incremental_window_is_monotonic_and_clamped() {
        let len = 90;
        let mut pager = Pager::new(WindowMode::Incremental);
        assert_eq!(pager.visible_range(len), 0..INITIAL_BATCH);

        let mut previous = pager.displayed();
        while pager.has_more(len) {
            assert!(pager.load_more(len));
            settle(&mut pager, len);
            assert!(pager.displayed() >= previous);
            assert!(pager.displayed() <= len);
            previous = pager.displayed();
        }

        assert_eq!(pager.displayed(), len);
        // Fully revealed: further requests are no-ops
        assert!(!pager.load_more(len));
    }

    #[test]
    fn load_more_overlap_is_dropped() {
        let len = 200;
        let mut pager = Pager::new(WindowMode::Incremental);
        assert!(pager.load_more(len));
        assert!(!pager.load_more(len));
        settle(&mut pager, len);
        assert_eq!(pager.displayed(), INITIAL_BATCH + BATCH_SIZE);
    }

    #[test]
    fn short_lists_are_fully_visible_without_loading() {
        let len = 12;
        let pager = Pager::new(WindowMode::Incremental);
        assert_eq!(pager.visible_range(len), 0..len);
        assert!(!pager.has_more(len));
    }

    #[test]
    fn mode_switch_and_reset_restore_initial_state() {
        let len = 100;
        let mut pager = Pager::new(WindowMode::Paged);
        pager.next_page(len);
        settle(&mut pager, len);
        assert_eq!(pager.page(), 2);

        pager.set_mode(WindowMode::Incremental);
        assert_eq!(pager.displayed(), INITIAL_BATCH);
        assert_eq!(pager.phase(), LoadPhase::Idle);

        pager.load_more(len);
        settle(&mut pager, len);
        pager.set_mode(WindowMode::Paged);
        assert_eq!(pager.page(), 1);

        // Same-mode set is not a reset
        pager.next_page(len);
        settle(&mut pager, len);
        pager.set_mode(WindowMode::Paged);
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let mut pager = Pager::new(WindowMode::Paged);
        assert_eq!(pager.total_pages(0), 0);
        assert_eq!(pager.visible_range(0), 0..0);
        assert!(!pager.next_page(0));
        assert!(!pager.last_page(0));
    }
}
