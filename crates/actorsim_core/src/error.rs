//! Actor layer error types

use actorsim_physics::PhysicsError;
use thiserror::Error;

use crate::event::ListenerToken;

/// Error a listener may return to signal failure
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result every listener returns
pub type ListenerResult = Result<(), ListenerError>;

/// Errors raised by actor operations
#[derive(Error, Debug)]
pub enum ActorError {
    /// The physics engine refused to bind the shape's geometry
    #[error("physics engine rejected collision shape: {0}")]
    ShapeRejected(#[source] PhysicsError),
}

/// One listener that failed during an emission
#[derive(Error, Debug)]
#[error("listener {token:?} failed: {source}")]
pub struct ListenerFailure {
    pub token: ListenerToken,
    #[source]
    pub source: ListenerError,
}

/// Every listener failure collected during one emission
///
/// All listeners run even when an earlier one fails; failures keep
/// registration order.
#[derive(Error, Debug)]
#[error("{} listener(s) failed while emitting {event}", .failures.len())]
pub struct EmitError {
    pub event: &'static str,
    pub failures: Vec<ListenerFailure>,
}
