//! Visual and collision-debug bodies for actorsim
//!
//! - [`RenderBody`] - what an actor may tell a renderable body
//! - [`SceneBody`] - a body that records visibility and pose
//! - [`RenderScene`] - registry owning every body, addressed by [`RenderBodyKey`]

pub mod body;
pub mod registry;

pub use body::{BodyRole, RenderBody, SceneBody};
pub use registry::{RenderBodyKey, RenderScene, SharedRenderScene};
