//! Network work requested by the update logic, and the events it reports back.
//!
//! Key handling never awaits: it returns [`Effect`]s. The event loop hands
//! them to [`spawn`], which runs each call on the tokio runtime and sends the
//! resulting [`AppEvent`] back over a channel. Tests call [`perform`] inline.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use super::detail::LoadTicket;
use crate::api::{ApiResponse, UsersApi};
use crate::model::{User, UserData};
use crate::store::RefreshTicket;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    FetchUsers(RefreshTicket),
    FetchUser { id: String, ticket: LoadTicket },
    Create(UserData),
    Update { id: String, data: UserData },
    Delete { id: String, from_detail: bool },
}

#[derive(Debug)]
pub enum AppEvent {
    UsersLoaded {
        ticket: RefreshTicket,
        res: ApiResponse<Vec<User>>,
    },
    UserLoaded {
        ticket: LoadTicket,
        res: ApiResponse<User>,
    },
    Created {
        res: ApiResponse<User>,
    },
    Updated {
        id: String,
        data: UserData,
        res: ApiResponse<User>,
    },
    Deleted {
        id: String,
        from_detail: bool,
        res: ApiResponse<()>,
    },
}

/// Run one effect to completion.
pub async fn perform(api: &dyn UsersApi, effect: Effect) -> AppEvent {
    debug!(?effect, "performing");
    match effect {
        Effect::FetchUsers(ticket) => AppEvent::UsersLoaded {
            ticket,
            res: api.list().await,
        },
        Effect::FetchUser { id, ticket } => AppEvent::UserLoaded {
            ticket,
            res: api.get_by_id(&id).await,
        },
        Effect::Create(data) => AppEvent::Created {
            res: api.create(&data).await,
        },
        Effect::Update { id, data } => {
            let res = api.update(&id, &data).await;
            AppEvent::Updated { id, data, res }
        }
        Effect::Delete { id, from_detail } => {
            let res = api.delete(&id).await;
            AppEvent::Deleted {
                id,
                from_detail,
                res,
            }
        }
    }
}

/// Run `effect` on a background task; the event is dropped if the loop is gone.
pub fn spawn(api: Arc<dyn UsersApi>, effect: Effect, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let event = perform(api.as_ref(), effect).await;
        let _ = tx.send(event);
    });
}
