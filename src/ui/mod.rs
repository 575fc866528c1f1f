//! Rendering for every screen.
//!
//! [`render`] lays out the header, the body for the current route and the
//! status bar, then draws the open modal and the toasts on top.

pub mod components;
pub mod detail;
pub mod form;
pub mod list;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState, Route};

/// Draw one frame.
///
/// # Arguments
///
/// * `f` - The frame being drawn.
/// * `app` - Application state; mutable because the list records its page size.
pub fn render(f: &mut Frame, app: &mut AppState) {
    let full = f.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(full);

    render_header(f, root[0], app);

    match app.route.clone() {
        Route::List => list::render_list_screen(f, root[1], app),
        Route::Detail { .. } => detail::render_detail_screen(f, root[1], app),
        Route::NotFound { path } => components::render_not_found(f, root[1], app, &path),
    }

    components::render_status_bar(f, root[2], app);
    if app.modal.is_some() {
        render_modal(f, full, app);
    }
    components::render_toasts(f, full, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let hint = match (&app.route, app.input_mode) {
        (_, InputMode::Modal) => "",
        (_, InputMode::Search) => "type to filter; Enter: keep; Esc: clear",
        (Route::List, _) => {
            "Manage your users: Enter: details; n: add; d: delete; /: search; ?: help; q: quit"
        }
        (Route::Detail { .. }, _) => "e: edit; d: delete; r: reload; Esc: back; q: quit",
        (Route::NotFound { .. }, _) => "Esc: back to list",
    };
    let p = Paragraph::new(hint)
        .block(
            Block::default()
                .title(" User Management ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(ModalState::Form(user_form)) => form::render_form_modal(f, area, app, user_form),
        Some(ModalState::ConfirmDelete { name, selected, .. }) => {
            components::render_confirm_delete(f, area, app, name, *selected)
        }
        Some(ModalState::Help { scroll }) => components::render_help_modal(f, area, app, *scroll),
        None => {}
    }
}
