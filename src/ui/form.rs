//! The create/edit form drawn as a modal overlay.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::AppState;
use crate::form::{AddressField, FieldKey, FormMode, GeoField, UserForm};
use crate::ui::components::centered_rect;

pub fn render_form_modal(f: &mut Frame, area: Rect, app: &AppState, form: &UserForm) {
    let title = match form.mode() {
        FormMode::Create => " Add New User ",
        FormMode::Edit { .. } => " Edit User ",
    };
    let label_w = FieldKey::ALL
        .iter()
        .map(|k| k.label().len())
        .max()
        .unwrap_or(0);
    let section = Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = Vec::new();

    for (row, key) in FieldKey::ALL.iter().enumerate() {
        match key {
            FieldKey::Address(AddressField::Street) => {
                lines.push(Line::raw(""));
                lines.push(Line::styled("Address", section));
            }
            FieldKey::Address(AddressField::Geo(GeoField::Lat)) => {
                lines.push(Line::raw(""));
                lines.push(Line::styled("Geo Location", section));
            }
            _ => {}
        }
        let focused = form.focus() == row;
        let marker = if focused { "▶ " } else { "  " };
        let value = key.get(form.draft());
        let (shown, value_style) = if value.is_empty() && !focused {
            (key.placeholder().to_string(), Style::default().fg(app.theme.muted))
        } else {
            let cursor = if focused { "▏" } else { "" };
            (format!("{value}{cursor}"), Style::default().fg(app.theme.text))
        };
        let label_style = if focused {
            Style::default().fg(app.theme.selected_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:>label_w$}: ", key.label()), label_style),
            Span::styled(shown, value_style),
        ]));
        if let Some(err) = form.error_for(*key) {
            lines.push(Line::styled(
                format!("  {:>label_w$}  {err}", ""),
                Style::default().fg(app.theme.error),
            ));
        }
    }

    lines.push(Line::raw(""));
    let button = if form.submitting() { "[ Submitting... ]" } else { "[ Submit ]" };
    let button_style = if form.on_submit_row() {
        Style::default()
            .fg(app.theme.selected_fg)
            .bg(app.theme.selected_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text)
    };
    lines.push(Line::from(Span::styled(format!("  {button}"), button_style)));
    lines.push(Line::styled(
        "  Tab/Up/Down: move  Enter: next/submit  Ctrl+S: submit  Esc: close",
        Style::default().fg(app.theme.muted),
    ));

    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
