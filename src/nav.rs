//! Navigation state
//!
//! The nav bar lists every section on the page. The active entry follows the
//! scroll position; selecting an entry glides the viewport to the section.
//! On narrow terminals the bar collapses into a toggleable menu, the way the
//! page's nav folds into a hamburger on small screens.

use crate::page::{PageLayout, SectionId};
use crate::viewport::Viewport;

/// Terminal width below which the nav collapses into a menu
pub const COLLAPSE_WIDTH: u16 = 72;

/// Rows inside a section that count toward activation; keeps the highlight
/// from flickering to the next section while its heading is still offscreen
const ACTIVATION_OFFSET: usize = 3;

#[derive(Debug)]
pub struct Navigation {
    sections: Vec<SectionId>,
    active: SectionId,
    menu_open: bool,
}

impl Navigation {
    pub fn new(layout: &PageLayout) -> Self {
        let sections: Vec<SectionId> = layout.spans().iter().map(|s| s.id).collect();
        let active = sections.first().copied().unwrap_or(SectionId::Hero);
        Self {
            sections,
            active,
            menu_open: false,
        }
    }

    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    /// True when the bar should render as a collapsed menu
    pub fn is_collapsed(&self, width: u16) -> bool {
        width < COLLAPSE_WIDTH
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Re-derive the active entry from the scroll position: the section
    /// containing the row just below the viewport top. At the page bottom
    /// the last section wins even if it never reaches the probe row.
    pub fn sync_active(&mut self, layout: &PageLayout, viewport: &Viewport) {
        if viewport.bottom() >= layout.total_height() {
            if let Some(&last) = self.sections.last() {
                self.active = last;
                return;
            }
        }
        let probe = viewport.top + ACTIVATION_OFFSET;
        if let Some(id) = layout.section_at(probe.min(layout.total_height().saturating_sub(1))) {
            self.active = id;
        }
    }

    /// Section following the active one, wrapping at the end
    pub fn next_section(&self) -> SectionId {
        self.step(1)
    }

    pub fn prev_section(&self) -> SectionId {
        self.step(-1)
    }

    fn step(&self, delta: isize) -> SectionId {
        let len = self.sections.len() as isize;
        if len == 0 {
            return self.active;
        }
        let current = self
            .sections
            .iter()
            .position(|&s| s == self.active)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len);
        self.sections[next as usize]
    }

    /// Section at a 1-based menu index (the `1`..`9` shortcuts)
    pub fn section_at_index(&self, index: usize) -> Option<SectionId> {
        index
            .checked_sub(1)
            .and_then(|i| self.sections.get(i))
            .copied()
    }
}
