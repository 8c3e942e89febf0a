pub mod resource;
pub mod service;
pub mod transform;
pub mod use_case;

use std::sync::Arc;

use crate::domain::{repository::Store, service::PasswordHashService};

/// Collaborators shared by every request, wired once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn Store>,
    pub hasher: Arc<dyn PasswordHashService>,
}

impl AppContext {
    pub fn new(store: Arc<dyn Store>, hasher: Arc<dyn PasswordHashService>) -> Self {
        Self { store, hasher }
    }
}
