//! Page structure and layout
//!
//! The page is a fixed vertical sequence of sections. Layout assigns each
//! section a row span for the current content; the renderer produces exactly
//! that many lines, so layout is the single source of truth for visibility
//! math, navigation targets and scrolling bounds.

use crate::config::Config;

/// The sections of the page, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Skills,
    Projects,
    Stats,
    Achievements,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Stats,
        SectionId::Achievements,
        SectionId::Contact,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Stats => "Stats",
            SectionId::Achievements => "Achievements",
            SectionId::Contact => "Contact",
        }
    }
}

/// Rows occupied by one section
#[derive(Debug, Clone)]
pub struct SectionSpan {
    pub id: SectionId,
    /// First page row of the section
    pub start: usize,
    /// Number of rows
    pub height: usize,
}

impl SectionSpan {
    pub fn end(&self) -> usize {
        self.start + self.height
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && row < self.end()
    }
}

/// Row spans for every non-empty section
#[derive(Debug, Clone)]
pub struct PageLayout {
    spans: Vec<SectionSpan>,
    total_height: usize,
}

/// Rows of the hero banner (name, tagline, typed line, rain backdrop)
pub const HERO_HEIGHT: usize = 12;

/// Rows per form field in the contact section (input + inline error)
pub const FORM_FIELD_ROWS: usize = 2;

impl PageLayout {
    /// Compute spans for the given content. Sections with no content get no
    /// rows at all (no heading either) - they simply vanish from the page.
    pub fn compute(config: &Config) -> Self {
        let mut spans = Vec::new();
        let mut row = 0;

        for id in SectionId::ALL {
            let height = Self::section_height(config, id);
            if height == 0 {
                continue;
            }
            spans.push(SectionSpan { id, start: row, height });
            row += height;
        }

        Self { spans, total_height: row }
    }

    /// Height of one section in rows. The renderer emits exactly this many
    /// lines per section; keep the arithmetic here and nowhere else.
    fn section_height(config: &Config, id: SectionId) -> usize {
        match id {
            SectionId::Hero => HERO_HEIGHT,
            // heading + blank + body + trailing blank
            SectionId::About => body_height(config.about.len()),
            SectionId::Skills => body_height(config.skills.len()),
            // each project: name, description, spacer
            SectionId::Projects => body_height(config.projects.len() * 3),
            // value row + label row
            SectionId::Stats => body_height((!config.stats.is_empty() as usize) * 2),
            SectionId::Achievements => body_height(config.achievements.len()),
            // heading + blank + 3 fields (input + error rows) + blank + submit + blank
            SectionId::Contact => 2 + 3 * FORM_FIELD_ROWS + 3,
        }
    }

    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    pub fn total_height(&self) -> usize {
        self.total_height
    }

    pub fn span(&self, id: SectionId) -> Option<&SectionSpan> {
        self.spans.iter().find(|s| s.id == id)
    }

    /// The section containing a page row, if any
    pub fn section_at(&self, row: usize) -> Option<SectionId> {
        self.spans.iter().find(|s| s.contains(row)).map(|s| s.id)
    }
}

/// heading + blank + body + trailing blank, or nothing when the body is empty
fn body_height(body: usize) -> usize {
    if body == 0 {
        0
    } else {
        body + 3
    }
}
