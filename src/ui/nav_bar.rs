//! Navigation bar rendering
//!
//! Wide terminals get every section inline with the active one highlighted.
//! Narrow terminals collapse to a single menu button; when the menu is open
//! its entries render as an overlay under the bar. Returns the hit rects so
//! clicks can be routed back to sections.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::nav::Navigation;
use crate::page::SectionId;
use crate::theme::Theme;

pub struct NavBarRenderer;

impl NavBarRenderer {
    /// Render the bar (and the menu overlay when open). Returns clickable
    /// (section, rect) pairs for hit testing.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        nav: &Navigation,
        theme: &Theme,
    ) -> Vec<(SectionId, Rect)> {
        if nav.is_collapsed(area.width) {
            Self::render_collapsed(frame, area, nav, theme)
        } else {
            Self::render_inline(frame, area, nav, theme)
        }
    }

    fn render_inline(
        frame: &mut Frame,
        area: Rect,
        nav: &Navigation,
        theme: &Theme,
    ) -> Vec<(SectionId, Rect)> {
        let mut spans = vec![Span::styled(
            " ~ ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )];
        let mut rects = Vec::new();
        let mut x = area.x + 3;

        for &id in nav.sections() {
            let text = format!(" {} ", id.title());
            let width = text.chars().count() as u16;
            let style = if id == nav.active() {
                Style::default()
                    .fg(theme.nav_active_fg)
                    .bg(theme.nav_active_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground)
            };
            spans.push(Span::styled(text, style));
            rects.push((id, Rect::new(x, area.y, width, 1)));
            x += width;
        }

        let bar = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.background));
        frame.render_widget(bar, area);
        rects
    }

    fn render_collapsed(
        frame: &mut Frame,
        area: Rect,
        nav: &Navigation,
        theme: &Theme,
    ) -> Vec<(SectionId, Rect)> {
        let marker = if nav.menu_open() { "▾" } else { "≡" };
        let bar = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} Menu ", marker),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", nav.active().title()),
                Style::default().fg(theme.muted),
            ),
        ]))
        .style(Style::default().bg(theme.background));
        frame.render_widget(bar, area);

        let mut rects = Vec::new();
        if !nav.menu_open() {
            return rects;
        }

        // Open menu: one entry per row below the bar
        let frame_bottom = frame.area().bottom();
        for (i, &id) in nav.sections().iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= frame_bottom {
                break;
            }
            let entry_area = Rect::new(area.x, y, area.width.min(24), 1);
            let style = if id == nav.active() {
                Style::default()
                    .fg(theme.nav_active_fg)
                    .bg(theme.nav_active_bg)
            } else {
                Style::default().fg(theme.foreground).bg(theme.gauge_empty)
            };
            let entry = Paragraph::new(format!(" {}. {:<20}", i + 1, id.title())).style(style);
            frame.render_widget(entry, entry_area);
            rects.push((id, entry_area));
        }
        rects
    }
}
