//! Physics error types

use thiserror::Error;

use crate::body::BodyKey;

/// Errors reported by the physics world and its handles
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("Body {0:?} no longer exists in the physics world")]
    StaleBody(BodyKey),
    #[error("The physics world has been released")]
    WorldReleased,
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },
    #[error("Shape local pose must be finite with a unit rotation")]
    InvalidLocalPose,
    #[error("Plane geometry can only be attached to static bodies")]
    PlaneOnMovingBody,
    #[error("Body {0:?} is not a dynamic body")]
    NotDynamic(BodyKey),
    #[error("Body {0:?} is not a kinematic body")]
    NotKinematic(BodyKey),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
