use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc;
use tracing::info;

use crate::app::detail::LoadResult;
use crate::app::effects::{self, AppEvent, Effect};
use crate::app::{AppState, DetailView, InputMode, KeyAction, ModalState, Route};
use crate::form::{FormMode, SubmitOutcome, UserForm};
use crate::ui;

/// Drive the UI until the user quits: draw, apply finished requests, handle one key.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: AppState,
    start: Route,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let api = app.store.api();
    let dispatch = |batch: Vec<Effect>| {
        for effect in batch {
            effects::spawn(api.clone(), effect, tx.clone());
        }
    };

    dispatch(app.start(start));

    while !app.should_quit {
        app.notifier.prune(Instant::now());
        terminal.draw(|f| ui::render(f, &mut app))?;

        while let Ok(ev) = rx.try_recv() {
            dispatch(app.apply_event(ev));
        }

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            dispatch(app.handle_key(key));
        }
    }
    info!("quit");
    Ok(())
}

impl AppState {
    /// Switch screens. Entering a detail screen always starts a fresh load.
    pub fn navigate(&mut self, route: Route) -> Vec<Effect> {
        info!(path = %route.path(), "navigate");
        self.route = route.clone();
        match route {
            Route::Detail { id } => {
                let mut view = DetailView::new(id.clone());
                let ticket = view.begin_load();
                self.detail = Some(view);
                vec![Effect::FetchUser { id, ticket }]
            }
            Route::List | Route::NotFound { .. } => {
                self.detail = None;
                Vec::new()
            }
        }
    }

    fn refresh(&mut self) -> Vec<Effect> {
        vec![Effect::FetchUsers(self.store.begin_refresh())]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match self.input_mode {
            InputMode::Modal => self.handle_modal_key(key),
            InputMode::Search => {
                self.handle_search_key(key);
                Vec::new()
            }
            InputMode::Normal => match self.keymap.resolve(&key) {
                Some(action) => self.handle_action(action),
                None => Vec::new(),
            },
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Esc => {
                self.list.search.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.list.search.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.list.search.push(c);
            }
            _ => return,
        }
        self.list.selected = 0;
    }

    fn handle_action(&mut self, action: KeyAction) -> Vec<Effect> {
        match action {
            KeyAction::Quit => {
                self.should_quit = true;
                return Vec::new();
            }
            KeyAction::OpenHelp => {
                self.open_modal(ModalState::Help { scroll: 0 });
                return Vec::new();
            }
            _ => {}
        }
        match self.route.clone() {
            Route::List => self.handle_list_action(action),
            Route::Detail { .. } => self.handle_detail_action(action),
            Route::NotFound { .. } => match action {
                KeyAction::Back | KeyAction::EnterAction => self.navigate(Route::List),
                _ => Vec::new(),
            },
        }
    }

    fn handle_list_action(&mut self, action: KeyAction) -> Vec<Effect> {
        let len = self.visible_users().len();
        let rpp = self.rows_per_page.max(1);
        match action {
            KeyAction::StartSearch => self.input_mode = InputMode::Search,
            KeyAction::NewUser => self.open_modal(ModalState::Form(UserForm::create())),
            KeyAction::Refresh => {
                self.notifier.info("Reloading users...");
                return self.refresh();
            }
            KeyAction::Back => {
                self.list.search.clear();
                self.list.selected = 0;
            }
            KeyAction::EnterAction | KeyAction::EditSelection => {
                if let Some(id) = self.selected_user().map(|u| u.id.clone()) {
                    return self.navigate(Route::Detail { id });
                }
            }
            KeyAction::DeleteSelection => {
                if let Some(u) = self.selected_user() {
                    let modal = ModalState::ConfirmDelete {
                        id: u.id.clone(),
                        name: u.data.name.clone(),
                        selected: 1,
                    };
                    self.open_modal(modal);
                }
            }
            KeyAction::MoveUp => self.list.selected = self.list.selected.saturating_sub(1),
            KeyAction::MoveDown => {
                if self.list.selected + 1 < len {
                    self.list.selected += 1;
                }
            }
            KeyAction::PageUp => self.list.selected = self.list.selected.saturating_sub(rpp),
            KeyAction::PageDown => {
                self.list.selected = (self.list.selected + rpp).min(len.saturating_sub(1));
            }
            KeyAction::Quit | KeyAction::OpenHelp | KeyAction::Ignore => {}
        }
        Vec::new()
    }

    fn handle_detail_action(&mut self, action: KeyAction) -> Vec<Effect> {
        let Some(detail) = self.detail.as_mut() else {
            return Vec::new();
        };
        if detail.busy {
            return match action {
                KeyAction::Back => self.navigate(Route::List),
                _ => Vec::new(),
            };
        }
        match action {
            KeyAction::Back => self.navigate(Route::List),
            KeyAction::Refresh => {
                let ticket = detail.begin_load();
                vec![Effect::FetchUser {
                    id: detail.id().to_string(),
                    ticket,
                }]
            }
            KeyAction::EditSelection | KeyAction::EnterAction => {
                if let Some(user) = detail.user() {
                    let form = UserForm::edit(user);
                    self.open_modal(ModalState::Form(form));
                }
                Vec::new()
            }
            KeyAction::DeleteSelection => {
                if let Some(user) = detail.user() {
                    let modal = ModalState::ConfirmDelete {
                        id: user.id.clone(),
                        name: user.data.name.clone(),
                        selected: 1,
                    };
                    self.open_modal(modal);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let Some(modal) = self.modal.as_mut() else {
            self.input_mode = InputMode::Normal;
            return Vec::new();
        };
        match modal {
            ModalState::Help { scroll } => {
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
                    KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                        self.close_modal()
                    }
                    _ => {}
                }
                Vec::new()
            }
            ModalState::ConfirmDelete { id, selected, .. } => match key.code {
                KeyCode::Left
                | KeyCode::Right
                | KeyCode::Tab
                | KeyCode::Char('h')
                | KeyCode::Char('l') => {
                    *selected = 1 - *selected;
                    Vec::new()
                }
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let id = id.clone();
                    self.confirm_delete(id)
                }
                KeyCode::Enter if *selected == 0 => {
                    let id = id.clone();
                    self.confirm_delete(id)
                }
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.close_modal();
                    Vec::new()
                }
                _ => Vec::new(),
            },
            ModalState::Form(form) => {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Esc => self.close_modal(),
                    KeyCode::Char('s') if ctrl => return self.submit_form(),
                    KeyCode::Enter if form.on_submit_row() => return self.submit_form(),
                    KeyCode::Enter | KeyCode::Tab | KeyCode::Down => form.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Char(c) if !ctrl => form.insert_char(c),
                    _ => {}
                }
                Vec::new()
            }
        }
    }

    fn confirm_delete(&mut self, id: String) -> Vec<Effect> {
        self.close_modal();
        let from_detail = matches!(&self.route, Route::Detail { .. });
        match self.detail.as_mut() {
            Some(detail) if from_detail => detail.busy = true,
            _ => self.list.action_loading = true,
        }
        vec![Effect::Delete { id, from_detail }]
    }

    fn submit_form(&mut self) -> Vec<Effect> {
        let Some(form) = self.form_mut() else {
            return Vec::new();
        };
        let mode = form.mode().clone();
        match form.begin_submit() {
            SubmitOutcome::Busy => Vec::new(),
            SubmitOutcome::Invalid(errors) => {
                for message in errors.messages() {
                    self.notifier.error(message);
                }
                Vec::new()
            }
            SubmitOutcome::Ready(data) => match mode {
                FormMode::Create => {
                    self.list.action_loading = true;
                    vec![Effect::Create(data)]
                }
                FormMode::Edit { id } => {
                    if let Some(detail) = self.detail.as_mut() {
                        detail.busy = true;
                    }
                    vec![Effect::Update { id, data }]
                }
            },
        }
    }

    /// Settle the open form if it is the one for `mode`; close it on success.
    fn finish_form(&mut self, mode: &FormMode, ok: bool) {
        let Some(form) = self.form_mut() else {
            return;
        };
        if form.mode() != mode {
            return;
        }
        form.settle();
        if ok {
            self.close_modal();
        }
    }

    /// Apply a finished request. Answers for screens the user already left are ignored.
    pub fn apply_event(&mut self, ev: AppEvent) -> Vec<Effect> {
        match ev {
            AppEvent::UsersLoaded { ticket, res } => {
                let failure = res.error.clone();
                if self.store.finish_refresh(ticket, res) {
                    if let Some(message) = failure {
                        self.notifier.error(message);
                    }
                    let len = self.visible_users().len();
                    self.list.selected = self.list.selected.min(len.saturating_sub(1));
                }
                Vec::new()
            }
            AppEvent::UserLoaded { ticket, res } => {
                if let Some(detail) = self.detail.as_mut()
                    && let LoadResult::Failed(message) = detail.finish_load(ticket, res)
                {
                    self.notifier.error(message);
                }
                Vec::new()
            }
            AppEvent::Created { res } => {
                self.list.action_loading = false;
                let ok = res.is_ok();
                self.finish_form(&FormMode::Create, ok);
                match res.error {
                    Some(message) => {
                        self.notifier.error(message);
                        Vec::new()
                    }
                    None => {
                        self.notifier.success("User created successfully");
                        self.refresh()
                    }
                }
            }
            AppEvent::Updated { id, data, res } => {
                let ok = res.is_ok();
                self.finish_form(&FormMode::Edit { id: id.clone() }, ok);
                let detail = self.detail.as_mut().filter(|d| d.id() == id);
                match (res.error, detail) {
                    (Some(message), detail) => {
                        if let Some(d) = detail {
                            d.busy = false;
                        }
                        self.notifier.error(message);
                    }
                    (None, Some(d)) => {
                        d.busy = false;
                        d.apply_update(data);
                        self.notifier.success("User updated successfully");
                    }
                    (None, None) => self.notifier.success("User updated successfully"),
                }
                Vec::new()
            }
            AppEvent::Deleted {
                id,
                from_detail,
                res,
            } => {
                let on_that_detail =
                    matches!(&self.route, Route::Detail { id: current } if *current == id);
                if from_detail {
                    if let Some(d) = self.detail.as_mut().filter(|d| d.id() == id) {
                        d.busy = false;
                    }
                } else {
                    self.list.action_loading = false;
                }
                if let Some(message) = res.error {
                    self.notifier.error(message);
                    return Vec::new();
                }
                self.notifier.success("User deleted successfully");
                let mut effects = self.refresh();
                if from_detail && on_that_detail {
                    effects.extend(self.navigate(Route::List));
                }
                effects
            }
        }
    }
}
