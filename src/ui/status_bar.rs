//! Status bar rendering

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::nav::Navigation;
use crate::theme::{Theme, ThemeMode};

/// Renders the bottom status bar: active section, theme, and key hints
pub struct StatusBarRenderer;

impl StatusBarRenderer {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        nav: &Navigation,
        mode: ThemeMode,
        theme: &Theme,
        form_focused: bool,
    ) {
        let hints = if form_focused {
            "Tab next field | Enter send | Esc back"
        } else {
            "t theme | m menu | Tab section | q quit"
        };

        let status = format!(
            " {} | {} theme | {}",
            nav.active().title(),
            mode.as_str(),
            hints
        );
        let bar = Paragraph::new(status)
            .style(Style::default().fg(theme.status_fg).bg(theme.status_bg));
        frame.render_widget(bar, area);
    }
}
