//! Shared UI components (status bar, state banners, layout helpers).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::view::Region;
use crate::app::{AppState, InputMode};
use crate::source::Record;

/// Render the bottom status bar with mode, counts and the visible region.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState, region: &Region<'_>, selection: Option<&Record>) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Select => "SELECT",
    };
    let selected = selection.map(|r| r.id.to_string()).unwrap_or_else(|| "-".to_string());
    let msg = format!(
        "mode: {mode}  records:{}  selected:{selected}  view:{}",
        app.view.state().records.len(),
        region.name(),
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Bordered container with nothing in it; the empty state.
pub fn render_container(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(container(app), area);
}

pub fn render_loading(f: &mut Frame, area: Rect, app: &AppState) {
    let p = Paragraph::new("Loading...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.loading))
        .block(container(app));
    f.render_widget(p, area);
}

pub fn render_error(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let line = Line::from(vec![
        Span::styled("Error: ", Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD)),
        Span::styled(message.to_string(), Style::default().fg(app.theme.error)),
    ]);
    let p = Paragraph::new(line)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(container(app));
    f.render_widget(p, area);
}

fn container(app: &AppState) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
