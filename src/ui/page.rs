//! Page rendering
//!
//! Renders the visible slice of the page. Section line counts must agree
//! with the heights in `page::PageLayout`; every builder here emits exactly
//! the rows layout assigned to it. The rain backdrop and the scroll
//! progress column are painted straight into the buffer.

use std::collections::HashSet;

use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Config;
use crate::effects::matrix::{MatrixRain, COLUMN_WIDTH};
use crate::form::{ContactForm, FieldId};
use crate::page::{PageLayout, SectionId, HERO_HEIGHT};
use crate::theme::Theme;
use crate::viewport::Viewport;

/// Width of a skill gauge in cells
const GAUGE_WIDTH: usize = 20;

/// Everything the page renderer reads. Assembled fresh each frame; the
/// renderer never mutates any of it.
pub struct PageContext<'a> {
    pub config: &'a Config,
    pub layout: &'a PageLayout,
    pub viewport: &'a Viewport,
    pub theme: &'a Theme,
    /// Current hero typing text
    pub typed: &'a str,
    pub rain: &'a MatrixRain,
    /// Sections currently revealed by the scroll reveal effect
    pub revealed: &'a HashSet<SectionId>,
    /// Current gauge fill per skill, 0-100
    pub skill_fill: &'a [f64],
    /// Current display text per stat
    pub stat_values: &'a [String],
    pub form: &'a ContactForm,
    pub form_focus: Option<FieldId>,
}

pub struct PageRenderer;

impl PageRenderer {
    /// Render the visible page rows into `area`
    pub fn render(frame: &mut Frame, area: Rect, ctx: &PageContext) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        Self::paint_rain(frame, area, ctx);

        let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
        for screen_row in 0..area.height {
            let page_row = ctx.viewport.top + screen_row as usize;
            lines.push(Self::line_at(ctx, page_row));
        }
        frame.render_widget(Paragraph::new(lines), area);

        Self::paint_scroll_progress(frame, area, ctx);
    }

    /// The line for one page row: locate the owning section and index into
    /// its builder. Rows past the page end render empty.
    fn line_at(ctx: &PageContext, page_row: usize) -> Line<'static> {
        let Some(span) = ctx.layout.spans().iter().find(|s| s.contains(page_row)) else {
            return Line::default();
        };
        let id = span.id;
        let offset = page_row - span.start;

        // Unrevealed sections render dimmed until the reveal effect fires;
        // the hero is always shown.
        let revealed = id == SectionId::Hero || ctx.revealed.contains(&id);

        let line = match id {
            SectionId::Hero => Self::hero_line(ctx, offset),
            SectionId::About => Self::about_line(ctx, offset),
            SectionId::Skills => Self::skills_line(ctx, offset),
            SectionId::Projects => Self::projects_line(ctx, offset),
            SectionId::Stats => Self::stats_line(ctx, offset),
            SectionId::Achievements => Self::achievements_line(ctx, offset),
            SectionId::Contact => Self::contact_line(ctx, offset),
        };

        if revealed {
            line
        } else {
            line.style(Style::default().fg(ctx.theme.muted).add_modifier(Modifier::DIM))
        }
    }

    fn heading(ctx: &PageContext, id: SectionId) -> Line<'static> {
        Line::from(Span::styled(
            format!("── {} ", id.title()),
            Style::default()
                .fg(ctx.theme.heading)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn about_line(ctx: &PageContext, offset: usize) -> Line<'static> {
        match offset {
            0 => Self::heading(ctx, SectionId::About),
            n if n >= 2 && n - 2 < ctx.config.about.len() => Line::from(Span::styled(
                format!("  {}", ctx.config.about[n - 2]),
                Style::default().fg(ctx.theme.foreground),
            )),
            _ => Line::default(),
        }
    }

    fn achievements_line(ctx: &PageContext, offset: usize) -> Line<'static> {
        match offset {
            0 => Self::heading(ctx, SectionId::Achievements),
            n if n >= 2 && n - 2 < ctx.config.achievements.len() => Line::from(vec![
                Span::styled("  • ", Style::default().fg(ctx.theme.accent)),
                Span::styled(
                    ctx.config.achievements[n - 2].clone(),
                    Style::default().fg(ctx.theme.foreground),
                ),
            ]),
            _ => Line::default(),
        }
    }

    fn hero_line(ctx: &PageContext, offset: usize) -> Line<'static> {
        let theme = ctx.theme;
        match offset {
            2 => Line::from(Span::styled(
                ctx.config.name.clone(),
                Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            3 => Line::from(Span::styled(
                ctx.config.tagline.clone(),
                Style::default().fg(theme.muted),
            ))
            .alignment(Alignment::Center),
            5 => Line::from(vec![
                Span::styled(ctx.typed.to_string(), Style::default().fg(theme.accent)),
                Span::styled("█", Style::default().fg(theme.accent).add_modifier(Modifier::SLOW_BLINK)),
            ])
            .alignment(Alignment::Center),
            _ => Line::default(),
        }
    }

    fn skills_line(ctx: &PageContext, offset: usize) -> Line<'static> {
        let theme = ctx.theme;
        match offset {
            0 => Self::heading(ctx, SectionId::Skills),
            1 => Line::default(),
            n if n >= 2 && n - 2 < ctx.config.skills.len() => {
                let index = n - 2;
                let skill = &ctx.config.skills[index];
                let fill = ctx.skill_fill.get(index).copied().unwrap_or(0.0);
                let filled = ((fill / 100.0) * GAUGE_WIDTH as f64).round() as usize;
                let filled = filled.min(GAUGE_WIDTH);

                Line::from(vec![
                    Span::styled(
                        format!("  {:<18}", skill.name),
                        Style::default().fg(theme.foreground),
                    ),
                    Span::styled("█".repeat(filled), Style::default().fg(theme.gauge_filled)),
                    Span::styled(
                        "░".repeat(GAUGE_WIDTH - filled),
                        Style::default().fg(theme.gauge_empty),
                    ),
                    Span::styled(
                        format!(" {:>3.0}%", fill),
                        Style::default().fg(theme.muted),
                    ),
                ])
            }
            _ => Line::default(),
        }
    }

    fn projects_line(ctx: &PageContext, offset: usize) -> Line<'static> {
        let theme = ctx.theme;
        match offset {
            0 => Self::heading(ctx, SectionId::Projects),
            1 => Line::default(),
            n => {
                let body = n - 2;
                let (index, row) = (body / 3, body % 3);
                let Some(project) = ctx.config.projects.get(index) else {
                    return Line::default();
                };
                match row {
                    0 => Line::from(Span::styled(
                        format!("  {}", project.name),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    )),
                    1 => {
                        let mut spans = vec![Span::styled(
                            format!("    {}", project.description),
                            Style::default().fg(theme.foreground),
                        )];
                        if !project.tags.is_empty() {
                            spans.push(Span::styled(
                                format!("  [{}]", project.tags.join(", ")),
                                Style::default().fg(theme.muted),
                            ));
                        }
                        Line::from(spans)
                    }
                    _ => Line::default(),
                }
            }
        }
    }

    fn stats_line(ctx: &PageContext, offset: usize) -> Line<'static> {
        let theme = ctx.theme;
        let stats = &ctx.config.stats;
        if stats.is_empty() {
            return Line::default();
        }
        let column = (ctx.viewport.width as usize / stats.len()).max(8);

        match offset {
            0 => Self::heading(ctx, SectionId::Stats),
            1 => Line::default(),
            2 => Line::from(
                stats
                    .iter()
                    .enumerate()
                    .map(|(i, stat)| {
                        let text = ctx
                            .stat_values
                            .get(i)
                            .cloned()
                            .unwrap_or_else(|| stat.value.clone());
                        Span::styled(
                            format!("{:^column$}", text),
                            Style::default()
                                .fg(theme.accent)
                                .add_modifier(Modifier::BOLD),
                        )
                    })
                    .collect::<Vec<_>>(),
            ),
            3 => Line::from(
                stats
                    .iter()
                    .map(|stat| {
                        Span::styled(
                            format!("{:^column$}", stat.label),
                            Style::default().fg(theme.muted),
                        )
                    })
                    .collect::<Vec<_>>(),
            ),
            _ => Line::default(),
        }
    }

    fn contact_line(ctx: &PageContext, offset: usize) -> Line<'static> {
        let theme = ctx.theme;
        match offset {
            0 => Self::heading(ctx, SectionId::Contact),
            1 => Line::default(),
            n @ 2..=7 => {
                let field_index = (n - 2) / 2;
                let id = FieldId::ALL[field_index];
                if n % 2 == 0 {
                    Self::field_line(ctx, id)
                } else {
                    Self::field_error_line(ctx, id)
                }
            }
            9 => {
                let (label, style) = if ctx.form.is_sending() {
                    (
                        "[ Sending... ]",
                        Style::default().fg(theme.muted).add_modifier(Modifier::DIM),
                    )
                } else {
                    (
                        "[ Send message ]",
                        Style::default()
                            .fg(theme.nav_active_fg)
                            .bg(theme.nav_active_bg)
                            .add_modifier(Modifier::BOLD),
                    )
                };
                Line::from(vec![Span::raw("  "), Span::styled(label, style)])
            }
            _ => Line::default(),
        }
    }

    fn field_line(ctx: &PageContext, id: FieldId) -> Line<'static> {
        let theme = ctx.theme;
        let field = ctx.form.field(id);
        let focused = ctx.form_focus == Some(id);

        let label_style = if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };

        let mut spans = vec![
            Span::styled(format!("  {:<8}: ", id.label()), label_style),
            Span::styled(field.value.clone(), Style::default().fg(theme.foreground)),
        ];
        if focused && !ctx.form.is_sending() {
            spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    }

    fn field_error_line(ctx: &PageContext, id: FieldId) -> Line<'static> {
        match &ctx.form.field(id).error {
            Some(error) => Line::from(Span::styled(
                format!("            {}", error),
                Style::default().fg(ctx.theme.field_error),
            )),
            None => Line::default(),
        }
    }

    /// Paint the rain backdrop behind the hero rows that are on screen
    fn paint_rain(frame: &mut Frame, area: Rect, ctx: &PageContext) {
        let Some(hero) = ctx.layout.span(SectionId::Hero) else {
            return;
        };
        let theme = ctx.theme;
        let buf = frame.buffer_mut();

        for (i, column) in ctx.rain.columns().iter().enumerate() {
            let x = area.x + i as u16 * COLUMN_WIDTH;
            if x >= area.right() {
                continue;
            }
            for (age, glyph) in column.trail.iter().enumerate() {
                let Some(row) = (column.row as usize).checked_sub(age) else {
                    break;
                };
                if row >= HERO_HEIGHT {
                    continue;
                }
                let page_row = hero.start + row;
                if !ctx.viewport.is_row_visible(page_row) {
                    continue;
                }
                let y = area.y + (page_row - ctx.viewport.top) as u16;
                if y >= area.bottom() {
                    continue;
                }

                let color = match age {
                    0 => theme.rain_head,
                    1..=3 => theme.rain_body,
                    _ => theme.rain_tail,
                };
                if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                    cell.set_char(*glyph);
                    cell.set_fg(color);
                }
            }
        }
    }

    /// Right-edge scroll progress column
    fn paint_scroll_progress(frame: &mut Frame, area: Rect, ctx: &PageContext) {
        if area.height < 2 {
            return;
        }
        let fraction = ctx.viewport.scroll_fraction(ctx.layout.total_height());
        let thumb = (fraction * f64::from(area.height - 1)).round() as u16;
        let x = area.right() - 1;
        let buf = frame.buffer_mut();

        for row in 0..area.height {
            if let Some(cell) = buf.cell_mut(Position::new(x, area.y + row)) {
                if row == thumb {
                    cell.set_char('█');
                    cell.set_fg(ctx.theme.accent);
                } else {
                    cell.set_char('│');
                    cell.set_fg(ctx.theme.gauge_empty);
                }
            }
        }
    }
}
