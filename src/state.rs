// src/state.rs
use std::sync::Arc;

use crate::repository::ProductRepository;
use crate::service::InventoryService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub inventory: InventoryService,
}

impl AppState {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            inventory: InventoryService::new(repository),
        }
    }
}
