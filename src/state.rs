//! Shared application state for all routes. The store is constructed by the caller and passed in.

use crate::service::CounterService;
use crate::store::CounterStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub counter: CounterService,
}

impl AppState {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            counter: CounterService::new(store),
        }
    }

    pub fn store(&self) -> &Arc<dyn CounterStore> {
        self.counter.store()
    }
}
