//! Toast rendering
//!
//! Toasts stack down the top-right corner, newest under oldest. A hiding
//! toast renders dimmed for its fade-out phase. Returns the hit rects so a
//! click can dismiss the toast it landed on.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::notify::{Notifications, ToastId, ToastKind, ToastPhase};
use crate::theme::Theme;

pub struct ToastsRenderer;

impl ToastsRenderer {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        notifications: &Notifications,
        theme: &Theme,
    ) -> Vec<(ToastId, Rect)> {
        let mut rects = Vec::new();
        let mut y = area.y + 1;

        for toast in notifications.visible() {
            if y >= area.bottom() {
                break;
            }

            let text = format!(" {} {} ", Self::icon(toast.kind), toast.message);
            let width = (text.width() as u16).min(area.width);
            let x = area.right().saturating_sub(width + 1);
            let toast_area = Rect::new(x, y, width, 1);

            let accent = Self::accent(toast.kind, theme);
            let style = match toast.phase {
                ToastPhase::Visible => Style::default()
                    .fg(theme.background)
                    .bg(accent)
                    .add_modifier(Modifier::BOLD),
                ToastPhase::Hiding => Style::default()
                    .fg(accent)
                    .add_modifier(Modifier::DIM),
            };

            let widget = Paragraph::new(Line::from(Span::styled(text, style)));
            frame.render_widget(widget, toast_area);
            rects.push((toast.id, toast_area));
            y += 2;
        }

        rects
    }

    fn icon(kind: ToastKind) -> &'static str {
        match kind {
            ToastKind::Info => "ℹ",
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
            ToastKind::Warning => "⚠",
        }
    }

    fn accent(kind: ToastKind, theme: &Theme) -> ratatui::style::Color {
        match kind {
            ToastKind::Info => theme.toast_info,
            ToastKind::Success => theme.toast_success,
            ToastKind::Error => theme.toast_error,
            ToastKind::Warning => theme.toast_warning,
        }
    }
}

/// Find the toast under a click, if any
pub fn toast_at(rects: &[(ToastId, Rect)], x: u16, y: u16) -> Option<ToastId> {
    rects
        .iter()
        .find(|(_, rect)| rect.contains(ratatui::layout::Position::new(x, y)))
        .map(|(id, _)| *id)
}
