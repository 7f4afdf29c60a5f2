use crate::domain::controller::Controller;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

static CONTROLLER_REGISTRY: LazyLock<RwLock<HashMap<String, Arc<dyn Controller>>>> = LazyLock::new(|| RwLock::new(HashMap::new()));

pub fn register(controller: Arc<dyn Controller>) {
    let mut registry = CONTROLLER_REGISTRY.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(controller.id().to_owned(), controller);
}

pub fn get(controller_id: &str) -> Option<Arc<dyn Controller>> {
    let registry = CONTROLLER_REGISTRY.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.get(controller_id).cloned()
}

pub fn unregister(controller_id: &str) -> Option<Arc<dyn Controller>> {
    let mut registry = CONTROLLER_REGISTRY.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.remove(controller_id)
}
