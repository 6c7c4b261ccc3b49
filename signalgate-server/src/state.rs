//! Shared application state handed to every route handler.

use signalgate_core::DecisionEngine;
use std::sync::Arc;

use crate::dedup::DedupGate;
use crate::notifier::Notifier;

pub struct AppState {
    pub engine: DecisionEngine,
    pub dedup: DedupGate,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(engine: DecisionEngine, dedup: DedupGate, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            engine,
            dedup,
            notifier,
        }
    }
}
