//! Application state types and entry glue.
//!
//! [`AppState`] owns everything the screens read: the injected [`UserStore`],
//! the current route and per-screen state, the open modal and the toasts.
//! Behaviour lives in `update` (keys and async completions); `run` drives it.

pub mod config;
pub mod detail;
pub mod effects;
pub mod keymap;
pub mod route;
pub mod theme;
pub mod update;

use crate::form::UserForm;
use crate::notify::Notifier;
use crate::model::User;
use crate::search::filter_users;
use crate::store::UserStore;

pub use detail::{DetailPhase, DetailView};
pub use effects::{AppEvent, Effect};
pub use keymap::{KeyAction, Keymap};
pub use route::Route;
pub use theme::Theme;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Overlays drawn on top of the current screen.
#[derive(Clone, Debug)]
pub enum ModalState {
    Form(UserForm),
    ConfirmDelete {
        id: String,
        name: String,
        /// 0 = Yes, 1 = No
        selected: usize,
    },
    Help {
        scroll: u16,
    },
}

/// State of the list screen.
#[derive(Clone, Debug, Default)]
pub struct ListView {
    pub search: String,
    pub selected: usize,
    /// A create or delete started from this screen is in flight.
    pub action_loading: bool,
}

pub struct AppState {
    pub store: UserStore,
    pub route: Route,
    pub list: ListView,
    pub detail: Option<DetailView>,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub notifier: Notifier,
    pub theme: Theme,
    pub keymap: Keymap,
    pub rows_per_page: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(store: UserStore, theme: Theme, keymap: Keymap) -> Self {
        Self {
            store,
            route: Route::List,
            list: ListView::default(),
            detail: None,
            input_mode: InputMode::Normal,
            modal: None,
            notifier: Notifier::new(),
            theme,
            keymap,
            rows_per_page: 10,
            should_quit: false,
        }
    }

    /// Initial fetch of the list plus whatever `route` needs.
    pub fn start(&mut self, route: Route) -> Vec<Effect> {
        let mut effects = vec![Effect::FetchUsers(self.store.begin_refresh())];
        effects.extend(self.navigate(route));
        effects
    }

    /// Users matching the search bar, in store order.
    pub fn visible_users(&self) -> Vec<&User> {
        filter_users(self.store.users(), &self.list.search)
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.visible_users().get(self.list.selected).copied()
    }

    /// The form currently open, if any.
    pub fn form_mut(&mut self) -> Option<&mut UserForm> {
        match self.modal.as_mut() {
            Some(ModalState::Form(form)) => Some(form),
            _ => None,
        }
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn list_loading(&self) -> bool {
        self.store.loading() || self.list.action_loading
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
