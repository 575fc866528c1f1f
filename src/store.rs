//! Shared list of users backing the list view.
//!
//! The store is the only writer of the list: [`UserStore::begin_refresh`]
//! hands out a ticket, the caller performs `list()` wherever it likes (the TUI
//! does it on a spawned task) and [`UserStore::finish_refresh`] applies the
//! answer. Tickets are ordered, so an answer that arrives after a newer one
//! has already been applied is dropped instead of overwriting fresher data.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{ApiResponse, UsersApi};
use crate::model::User;

/// Identifies one refresh round-trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

pub struct UserStore {
    api: Arc<dyn UsersApi>,
    users: Vec<User>,
    loading: bool,
    issued: u64,
    applied: u64,
}

impl UserStore {
    pub fn new(api: Arc<dyn UsersApi>) -> Self {
        Self {
            api,
            users: Vec::new(),
            loading: false,
            issued: 0,
            applied: 0,
        }
    }

    /// Handle on the client, for views issuing their own mutations.
    pub fn api(&self) -> Arc<dyn UsersApi> {
        Arc::clone(&self.api)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        self.loading = true;
        debug!(ticket = self.issued, "refresh started");
        RefreshTicket(self.issued)
    }

    /// Apply a `list()` answer. Returns false when the answer was stale and ignored.
    pub fn finish_refresh(&mut self, ticket: RefreshTicket, res: ApiResponse<Vec<User>>) -> bool {
        if ticket.0 <= self.applied {
            debug!(ticket = ticket.0, applied = self.applied, "dropping stale refresh");
            return false;
        }
        self.applied = ticket.0;
        if ticket.0 == self.issued {
            self.loading = false;
        }
        match res.into_result() {
            Ok(users) => {
                self.users = users.unwrap_or_default();
                info!(count = self.users.len(), "users loaded");
            }
            Err(e) => {
                warn!(error = %e, "refresh failed; clearing list");
                self.users = Vec::new();
            }
        }
        true
    }

    /// Fetch and apply in one step.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_refresh();
        let res = self.api.list().await;
        self.finish_refresh(ticket, res);
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("users", &self.users.len())
            .field("loading", &self.loading)
            .field("issued", &self.issued)
            .field("applied", &self.applied)
            .finish()
    }
}
