//! List screen: search bar above the filtered user cards.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::{AppState, InputMode};
use crate::model::User;

/// Lines per card, used to size a page for PageUp/PageDown.
const CARD_HEIGHT: u16 = 3;

/// Render the search bar and cards, and record how many cards fit per page.
pub fn render_list_screen(f: &mut Frame, area: Rect, app: &mut AppState) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);
    render_search_bar(f, parts[0], app);
    render_user_cards(f, parts[1], app);
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let searching = app.input_mode == InputMode::Search;
    let (text, style) = if app.list.search.is_empty() && !searching {
        (
            "Search by name or email...".to_string(),
            Style::default().fg(app.theme.muted),
        )
    } else {
        let cursor = if searching { "▏" } else { "" };
        (
            format!("{}{cursor}", app.list.search),
            Style::default().fg(app.theme.text),
        )
    };
    let border = if searching { app.theme.title } else { app.theme.border };
    let p = Paragraph::new(text).style(style).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}

fn card<'a>(u: &'a User, app: &AppState) -> ListItem<'a> {
    let label = Style::default().fg(app.theme.muted);
    ListItem::new(Text::from(vec![
        Line::from(Span::styled(
            u.data.name.as_str(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  email ", label),
            Span::raw(u.data.email.as_str()),
            Span::styled("  phone ", label),
            Span::raw(u.data.phone.as_str()),
        ]),
        Line::from(vec![
            Span::styled("  company ", label),
            Span::styled(u.data.company.as_str(), Style::default().fg(app.theme.success)),
        ]),
    ]))
}

fn render_user_cards(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(2);
    app.rows_per_page = usize::from((body_height / CARD_HEIGHT).max(1));

    let block = Block::default()
        .title(format!("Users ({})", app.store.users().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if app.list_loading() {
        let p = Paragraph::new("Loading...")
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let users = app.visible_users();
    if users.is_empty() {
        let p = Paragraph::new("No users found.")
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = users.iter().map(|u| card(u, app)).collect();
    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(app.theme.text))
        .highlight_style(
            Style::default()
                .fg(app.theme.selected_fg)
                .bg(app.theme.selected_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.list.selected));
    f.render_stateful_widget(list, area, &mut state);
}
