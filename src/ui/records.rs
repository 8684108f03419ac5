use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::app::AppState;
use crate::source::Record;
use crate::ui::components::centered_rect;

/// Label of the neutral selector entry.
pub const NEUTRAL_OPTION: &str = "Select a user";

/// Column headers, shared by the table and the detail labels.
pub const FIELD_LABELS: [&str; 8] = [
    "ID", "Name", "Username", "Email", "City", "Phone", "Website", "Company Name",
];

/// Field values in [`FIELD_LABELS`] order.
pub fn field_values(r: &Record) -> [String; 8] {
    [
        r.id.to_string(),
        r.name.clone(),
        r.username.clone(),
        r.email.clone(),
        r.address.city.clone(),
        r.phone.clone(),
        r.website.clone(),
        r.company.name.clone(),
    ]
}

/// Selector entry text for a record.
pub fn option_label(r: &Record) -> String {
    format!("{} → {}", r.id, r.name)
}

/// One-line selector control; shows the current choice or the neutral label.
pub fn render_selector_line(f: &mut Frame, area: Rect, app: &AppState, selection: Option<&Record>) {
    let (current, fg) = match selection {
        Some(r) => (option_label(r), app.theme.text),
        None => (NEUTRAL_OPTION.to_string(), app.theme.muted),
    };
    let p = Paragraph::new(format!("{current}  ▾"))
        .style(Style::default().fg(fg))
        .block(
            Block::default()
                .title("User")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}

pub fn render_records_table(f: &mut Frame, area: Rect, app: &mut AppState, records: &[Record]) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 { app.rows_per_page = body_height; }
    if app.table_cursor >= records.len() {
        app.table_cursor = records.len().saturating_sub(1);
    }

    let start = (app.table_cursor / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(records.len());
    let slice = &records[start..end];

    let rows = slice.iter().enumerate().map(|(i, r)| {
        let style = if start + i == app.table_cursor {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else { Style::default().fg(app.theme.text) };
        Row::new(field_values(r).into_iter().map(Cell::from).collect::<Vec<_>>()).style(style)
    });

    let widths = [
        Constraint::Length(5),
        Constraint::Percentage(16),
        Constraint::Percentage(10),
        Constraint::Percentage(18),
        Constraint::Percentage(10),
        Constraint::Percentage(16),
        Constraint::Percentage(10),
        Constraint::Percentage(16),
    ];

    let header = Row::new(FIELD_LABELS.to_vec()).style(
        Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!("Users ({})", records.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_record_details(f: &mut Frame, area: Rect, app: &AppState, record: &Record) {
    let text = FIELD_LABELS
        .iter()
        .zip(field_values(record))
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");
    let p = Paragraph::new(text).style(Style::default().fg(app.theme.text)).block(
        Block::default().title("User Details").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

/// Modal list: the neutral entry, then every record as `id → name`.
pub fn render_selector_popup(f: &mut Frame, area: Rect, app: &mut AppState, records: &[Record]) {
    let entries: Vec<String> = std::iter::once(NEUTRAL_OPTION.to_string())
        .chain(records.iter().map(option_label))
        .collect();
    if app.selector_cursor >= entries.len() {
        app.selector_cursor = entries.len() - 1;
    }

    let longest = entries.iter().map(|e| e.chars().count()).max().unwrap_or(0);
    let width = u16::try_from(longest).unwrap_or(u16::MAX).saturating_add(6);
    let height = u16::try_from(entries.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height.saturating_sub(2))
        .max(3);
    let rect = centered_rect(width.max(30), height, area);

    let visible = rect.height.saturating_sub(2).max(1) as usize;
    let offset = (app.selector_cursor / visible) * visible;
    let mut text = String::new();
    for (idx, label) in entries.iter().enumerate().skip(offset).take(visible) {
        if idx == app.selector_cursor { text.push_str(&format!("▶ {}\n", label)); } else { text.push_str(&format!("  {}\n", label)); }
    }

    let p = Paragraph::new(text).style(Style::default().fg(app.theme.text)).block(
        Block::default()
            .title("Choose user (Enter: select, Esc: close)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.highlight_fg)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view::tests::mk_record;

    #[test]
    fn field_values_follow_label_order() {
        let r = mk_record(3, "Clementine");
        let values = field_values(&r);
        assert_eq!(values[0], "3");
        assert_eq!(values[4], "Gwenborough");
        assert_eq!(values[7], "Acme");
        assert_eq!(option_label(&r), "3 → Clementine");
    }
}
