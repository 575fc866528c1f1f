//! Detail screen for one user, one layout per load phase.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{AppState, DetailPhase};
use crate::model::User;

/// Render the detail screen for `app.detail`.
///
/// # Arguments
///
/// * `f` - The frame being drawn.
/// * `area` - Body area between header and status bar.
/// * `app` - Application state; only the detail view and theme are read.
pub fn render_detail_screen(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Details")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let muted = Style::default().fg(app.theme.muted);

    let lines = match app.detail.as_ref() {
        None => vec![Line::styled("User not found.", muted)],
        Some(d) => match d.phase() {
            DetailPhase::Idle | DetailPhase::Loading => vec![Line::styled("Loading...", muted)],
            DetailPhase::NotFound => vec![
                Line::styled("User not found.", muted),
                Line::raw(""),
                Line::styled("Esc: back to the list", muted),
            ],
            DetailPhase::Error(message) => vec![
                Line::styled("User not found.", muted),
                Line::styled(message.clone(), Style::default().fg(app.theme.error)),
                Line::raw(""),
                Line::styled("r: retry   Esc: back to the list", muted),
            ],
            DetailPhase::Loaded(user) => {
                let mut lines = user_lines(user, app);
                if d.busy {
                    lines.push(Line::raw(""));
                    lines.push(Line::styled("Working...", muted));
                }
                lines
            }
        },
    };

    let p = Paragraph::new(lines)
        .style(Style::default().fg(app.theme.text))
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(p, area);
}

fn user_lines(user: &User, app: &AppState) -> Vec<Line<'static>> {
    let label = |s: &'static str| Span::styled(s, Style::default().add_modifier(Modifier::BOLD));
    let heading = |s: &'static str| {
        Line::from(Span::styled(
            s,
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        ))
    };
    let d = &user.data;
    vec![
        Line::from(Span::styled(
            d.name.clone(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![label("Email:   "), Span::raw(d.email.clone())]),
        Line::from(vec![label("Phone:   "), Span::raw(d.phone.clone())]),
        Line::from(vec![label("Company: "), Span::raw(d.company.clone())]),
        Line::raw(""),
        heading("Address"),
        Line::raw(format!(
            "{}, {}, {}",
            d.address.street, d.address.city, d.address.zipcode
        )),
        Line::raw(""),
        heading("Geo Location"),
        Line::raw(format!("Lat: {}", d.address.geo.lat)),
        Line::raw(format!("Lng: {}", d.address.geo.lng)),
    ]
}
