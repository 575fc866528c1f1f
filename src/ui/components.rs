//! Shared UI components: status bar, toasts, and the small modals.
//!
//! The form modal lives in [`crate::ui::form`]; everything here is reused
//! by both the list and the detail screens.
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode, KeyAction};
use crate::notify::Level;

/// Widest a toast may grow before its text wraps.
const TOAST_WIDTH: u16 = 44;

/// Render the bottom status bar with mode, counts and activity.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let shown = app.visible_users().len();
    let total = app.store.users().len();
    let activity = if app.store.loading() {
        "  refreshing..."
    } else if app.list.action_loading || app.detail.as_ref().is_some_and(|d| d.busy) {
        "  working..."
    } else {
        ""
    };
    let msg = format!(
        "mode: {mode}  route: {}  users:{shown}/{total}{activity}",
        app.route.path()
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Stack live toasts in the top-right corner, newest on top.
pub fn render_toasts(f: &mut Frame, area: Rect, app: &AppState) {
    let width = TOAST_WIDTH.min(area.width);
    let inner = width.saturating_sub(2).max(1) as usize;
    let mut y = area.y + 1;
    for toast in app.notifier.visible() {
        let rows = toast.message.chars().count().div_ceil(inner).max(1) as u16;
        let height = rows + 2;
        if y + height > area.y + area.height {
            break;
        }
        let color = match toast.level {
            Level::Success => app.theme.success,
            Level::Error => app.theme.error,
            Level::Info => app.theme.title,
        };
        let rect = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y,
            width,
            height,
        };
        let p = Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
        y += height;
    }
}

/// A rectangle of the given size centered in `area`, clamped to fit.
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

/// Yes/No confirmation shown before a delete is sent.
pub fn render_confirm_delete(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    name: &str,
    selected: usize,
) {
    let rect = centered_rect(50, 7, area);
    let button = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                label,
                Style::default()
                    .fg(app.theme.selected_fg)
                    .bg(app.theme.selected_bg)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw(label)
        }
    };
    let lines = vec![
        Line::raw("Are you sure you want to delete this user?"),
        Line::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::from(vec![
            button("[ Yes ]", selected == 0),
            Span::raw("   "),
            button("[ No ]", selected != 0),
        ]),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Delete User")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.error)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the help modal, listing the bindings currently in effect.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 70u16.min(area.width.saturating_sub(4)).max(40);
    let height = 22u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let keys = |a: KeyAction| {
        let ks = app.keymap.keys_for(a);
        if ks.is_empty() { "unbound".to_string() } else { ks.join(" / ") }
    };
    let row = |what: &'static str, a: KeyAction| {
        Line::from(vec![
            Span::raw(format!("{what:<22}")),
            Span::styled(keys(a), Style::default().add_modifier(Modifier::ITALIC)),
        ])
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled("Users", bold)),
        row("Open details", KeyAction::EnterAction),
        row("Add user", KeyAction::NewUser),
        row("Edit user", KeyAction::EditSelection),
        row("Delete user", KeyAction::DeleteSelection),
        row("Search", KeyAction::StartSearch),
        row("Reload", KeyAction::Refresh),
        row("Back", KeyAction::Back),
        row("Move", KeyAction::MoveDown),
        row("Page down", KeyAction::PageDown),
        row("Quit", KeyAction::Quit),
        Line::raw(""),
        Line::from(Span::styled("Form", bold)),
        Line::raw("Tab / Down: next field, Shift+Tab / Up: previous field"),
        Line::raw("Enter on Submit or Ctrl+S: save, Esc: cancel"),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Bindings are read from "),
            Span::styled("keybinds.conf", Style::default().add_modifier(Modifier::ITALIC)),
            Span::raw(" in the config directory."),
        ]),
        Line::from(vec![
            Span::raw("Close help: "),
            Span::styled("Esc / Enter", Style::default().add_modifier(Modifier::ITALIC)),
        ]),
    ];
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Screen for a path that matches no route.
pub fn render_not_found(f: &mut Frame, area: Rect, app: &AppState, path: &str) {
    let lines = vec![
        Line::styled("404", Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD)),
        Line::raw(format!("Page not found: {path}")),
        Line::raw(""),
        Line::styled("Esc: back to the list", Style::default().fg(app.theme.muted)),
    ];
    let p = Paragraph::new(lines).block(
        Block::default()
            .title("Not Found")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}
