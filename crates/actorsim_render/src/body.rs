//! Render body capability and a recording implementation

use std::any::Any;

use actorsim_physics::Pose;

/// What an actor may tell a renderable body
///
/// Visibility intensity and the visible flag are independent: a body is shown
/// only while visible, at its current intensity.
pub trait RenderBody: Any {
    /// Set the display intensity (last write wins)
    fn set_visibility(&mut self, intensity: f32);

    /// Binary show/hide override
    fn set_visible(&mut self, visible: bool);

    /// Set the world pose used for the next presentation
    fn update(&mut self, pose: &Pose);

    fn as_any(&self) -> &dyn Any;
}

/// Whether a body shows normal visuals or raw collision geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyRole {
    Visual,
    Collision,
}

/// A body that records the state it was last given
///
/// Stands in for a renderer's scene node: headless runs and tests read back
/// what a real renderer would draw.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneBody {
    pub name: String,
    pub role: BodyRole,
    visibility: f32,
    visible: bool,
    pose: Pose,
    updates: u64,
}

impl SceneBody {
    pub fn new(name: impl Into<String>, role: BodyRole) -> Self {
        Self {
            name: name.into(),
            role,
            visibility: 1.0,
            visible: true,
            pose: Pose::IDENTITY,
            updates: 0,
        }
    }

    pub fn visual(name: impl Into<String>) -> Self {
        Self::new(name, BodyRole::Visual)
    }

    pub fn collision(name: impl Into<String>) -> Self {
        Self::new(name, BodyRole::Collision)
    }

    pub fn visibility(&self) -> f32 {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Intensity actually drawn: zero while hidden
    pub fn effective_visibility(&self) -> f32 {
        if self.visible {
            self.visibility
        } else {
            0.0
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Number of pose updates received
    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

impl RenderBody for SceneBody {
    fn set_visibility(&mut self, intensity: f32) {
        self.visibility = intensity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn update(&mut self, pose: &Pose) {
        self.pose = *pose;
        self.updates += 1;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
