// src/services/navigation.rs
//
// Navigation sink
//
// The routing mechanism lives in the presentation layer; the core only asks
// for a route change.

use std::sync::Arc;

use log::info;

use crate::domain::MovieId;
use crate::events::{EventBus, NavigationRequested};

pub trait Navigator: Send + Sync {
    /// Open the detail route for `movie_id`. Must not block.
    fn navigate_to_movie(&self, movie_id: &MovieId);
}

/// Publishes `NavigationRequested` for whoever owns the router
pub struct EventBusNavigator {
    event_bus: Arc<EventBus>,
}

impl EventBusNavigator {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self { event_bus }
    }
}

impl Navigator for EventBusNavigator {
    fn navigate_to_movie(&self, movie_id: &MovieId) {
        info!("navigating to movie {}", movie_id);
        self.event_bus
            .emit(NavigationRequested::new(movie_id.to_string()));
    }
}
