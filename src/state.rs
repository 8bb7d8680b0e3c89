use std::sync::Arc;

use crate::db::{DbPool, OrmConn};
use crate::notify::NotificationDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub dispatcher: Arc<dyn NotificationDispatcher>,
}
