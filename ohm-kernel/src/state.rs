use parking_lot::Mutex;
use std::sync::Arc;

use crate::health::HealthTracker;

pub type Shared<T> = Arc<Mutex<T>>;

pub fn new_state<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

/// État unique pour Axum.
///
/// Ne contient que des compteurs : aucune grandeur électrique n'est partagée
/// entre requêtes, chaque calcul décode son propre record.
#[derive(Clone, Default)]
pub struct AppState {
    pub health: HealthTracker,
}
