use axum::extract::FromRef;
use chrono::{Local, NaiveDateTime};
use storage::Store;

use crate::rate::RateGuard;

/// Wall-clock source injected into handlers so the submission-window
/// logic stays pure and per-test clocks are possible.
pub type Clock = fn() -> NaiveDateTime;

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub rate: RateGuard,
    pub clock: Clock,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            rate: RateGuard::new(),
            clock: local_now,
        }
    }
}

impl FromRef<AppState> for Store {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
