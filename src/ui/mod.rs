pub mod components;
pub mod records;

use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::keymap::KeyAction;
use crate::app::view::Region;
use crate::app::{AppState, InputMode};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    let view = Rc::clone(&app.view);
    let state = view.state();
    let region = state.region();

    let keys = |action| app.keymap.keys_for(action).join("/");
    let p = Paragraph::new(format!(
        "source: {}  records:{}  {}: choose user; {}: reload; {}: quit",
        view.source_label(),
        state.records.len(),
        keys(KeyAction::OpenSelector),
        keys(KeyAction::Reload),
        keys(KeyAction::Quit),
    ))
    .block(
        Block::default()
            .title("user-directory")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    match region {
        Region::Loading => components::render_loading(f, root[1], app),
        Region::Error(msg) => components::render_error(f, root[1], app, msg),
        Region::Empty => components::render_container(f, root[1], app),
        Region::Table { records } => {
            let body = data_layout(root[1]);
            records::render_selector_line(f, body[0], app, state.selection.as_ref());
            records::render_records_table(f, body[1], app, records);
        }
        Region::Detail { selected, .. } => {
            let body = data_layout(root[1]);
            records::render_selector_line(f, body[0], app, Some(selected));
            records::render_record_details(f, body[1], app, selected);
        }
    }

    components::render_status_bar(f, root[2], app, &region, state.selection.as_ref());

    if app.input_mode == InputMode::Select {
        if let Some(records) = region.selector_records() {
            let area = f.area();
            records::render_selector_popup(f, area, app, records);
        }
    }
}

fn data_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)].as_ref())
        .split(area)
}
