// events/types.rs
//
// All events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::EntityCategory;

/// Trait that all events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// STORE EVENTS
// ============================================================================

/// Emitted after any slot of the application store changed
/// (data, loading flag or error)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub category: EntityCategory,
}

impl StoreChanged {
    pub fn new(category: EntityCategory) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            category,
        }
    }
}

impl DomainEvent for StoreChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "StoreChanged" }
}

// ============================================================================
// NETWORK EVENTS
// ============================================================================

/// Emitted when the busy indicator should appear or disappear.
/// Overlapping requests keep it visible until the last one finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkActivityChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub busy: bool,
    pub in_flight: usize,
}

impl NetworkActivityChanged {
    pub fn new(busy: bool, in_flight: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            busy,
            in_flight,
        }
    }
}

impl DomainEvent for NetworkActivityChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "NetworkActivityChanged" }
}

/// Emitted when a completed list or detail fetch was discarded because the
/// UI had already moved on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSuperseded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_key: String,
}

impl RequestSuperseded {
    pub fn new(request_key: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_key,
        }
    }
}

impl DomainEvent for RequestSuperseded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RequestSuperseded" }
}

// ============================================================================
// USER-FACING EVENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Error,
}

/// A notification the presentation layer should show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastRaised {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub level: ToastLevel,
    pub title: String,
    pub message: Option<String>,
}

impl ToastRaised {
    pub fn error(title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            level: ToastLevel::Error,
            title,
            message: None,
        }
    }
}

impl DomainEvent for ToastRaised {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ToastRaised" }
}

/// Emitted when a movie card was activated and the detail route should open
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: String,
}

impl NavigationRequested {
    pub fn new(movie_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
        }
    }

    /// Route the detail page lives under
    pub fn route(&self) -> String {
        format!("/{}", self.movie_id)
    }
}

impl DomainEvent for NavigationRequested {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "NavigationRequested" }
}
