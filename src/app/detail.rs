//! Load state of the detail screen.
//!
//! Every load gets a process-wide unique ticket. An answer is applied only if
//! its ticket is the one the view is currently waiting for, so answers for a
//! screen the user already left (or for a superseded retry) fall on the floor.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::api::ApiResponse;
use crate::model::{User, UserData};

static NEXT_LOAD: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailPhase {
    Idle,
    Loading,
    Loaded(User),
    NotFound,
    Error(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoadResult {
    /// The answer belonged to an older load and was ignored.
    Stale,
    Loaded,
    /// Applied as `NotFound` or `Error`; carries the message to show.
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct DetailView {
    id: String,
    phase: DetailPhase,
    pending: Option<LoadTicket>,
    /// A delete or update for this record is in flight.
    pub busy: bool,
}

impl DetailView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phase: DetailPhase::Idle,
            pending: None,
            busy: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    pub fn user(&self) -> Option<&User> {
        match &self.phase {
            DetailPhase::Loaded(u) => Some(u),
            _ => None,
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = LoadTicket(NEXT_LOAD.fetch_add(1, Ordering::Relaxed));
        self.pending = Some(ticket);
        self.phase = DetailPhase::Loading;
        ticket
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, res: ApiResponse<User>) -> LoadResult {
        if self.pending != Some(ticket) {
            debug!(id = %self.id, "ignoring stale detail load");
            return LoadResult::Stale;
        }
        self.pending = None;
        let status = res.status;
        match res.into_result() {
            Ok(Some(user)) => {
                self.phase = DetailPhase::Loaded(user);
                LoadResult::Loaded
            }
            Ok(None) => {
                self.phase = DetailPhase::NotFound;
                LoadResult::Failed("User not found".to_string())
            }
            Err(message) => {
                self.phase = if status == Some(404) {
                    DetailPhase::NotFound
                } else {
                    DetailPhase::Error(message.clone())
                };
                LoadResult::Failed(message)
            }
        }
    }

    /// Replace the held record with what was just saved, keeping its id.
    pub fn apply_update(&mut self, data: UserData) {
        self.phase = DetailPhase::Loaded(User::new(self.id.clone(), data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn user(id: &str, name: &str) -> User {
        User::new(
            id,
            UserData {
                name: name.into(),
                ..UserData::default()
            },
        )
    }

    #[test]
    fn idle_loading_loaded() {
        let mut v = DetailView::new("u1");
        assert_eq!(v.phase(), &DetailPhase::Idle);
        let t = v.begin_load();
        assert_eq!(v.phase(), &DetailPhase::Loading);
        assert_eq!(v.finish_load(t, ApiResponse::ok(user("u1", "Ann"))), LoadResult::Loaded);
        assert_eq!(v.user().map(|u| u.data.name.as_str()), Some("Ann"));
    }

    #[test]
    fn missing_record_is_not_found_other_errors_are_errors() {
        let mut v = DetailView::new("u1");
        let t = v.begin_load();
        let gone = ApiResponse::failed(&ApiError::from_status(404, Some("User not found".into())));
        assert_eq!(v.finish_load(t, gone), LoadResult::Failed("User not found".into()));
        assert_eq!(v.phase(), &DetailPhase::NotFound);

        let t = v.begin_load();
        let down = ApiResponse::failed(&ApiError::transport("connection refused"));
        v.finish_load(t, down);
        assert_eq!(v.phase(), &DetailPhase::Error("connection refused".into()));
    }

    #[test]
    fn superseded_load_is_ignored() {
        let mut v = DetailView::new("u1");
        let old = v.begin_load();
        let new = v.begin_load();
        assert_eq!(v.finish_load(old, ApiResponse::ok(user("u1", "Old"))), LoadResult::Stale);
        assert_eq!(v.phase(), &DetailPhase::Loading);
        v.finish_load(new, ApiResponse::ok(user("u1", "New")));
        assert_eq!(v.user().map(|u| u.data.name.as_str()), Some("New"));
    }

    #[test]
    fn answer_for_another_view_instance_is_ignored() {
        let mut first = DetailView::new("u1");
        let t = first.begin_load();
        let mut second = DetailView::new("u1");
        let _ = second.begin_load();
        assert_eq!(second.finish_load(t, ApiResponse::ok(user("u1", "x"))), LoadResult::Stale);
    }

    #[test]
    fn update_replaces_record_locally() {
        let mut v = DetailView::new("u1");
        let t = v.begin_load();
        v.finish_load(t, ApiResponse::ok(user("u1", "Ann")));
        v.apply_update(UserData {
            name: "Anna".into(),
            ..UserData::default()
        });
        let u = v.user().expect("loaded");
        assert_eq!((u.id.as_str(), u.data.name.as_str()), ("u1", "Anna"));
    }
}
