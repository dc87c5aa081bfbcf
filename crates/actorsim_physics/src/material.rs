//! Surface material of a collision shape

/// How two material coefficients are merged for a contact pair
///
/// When the two shapes disagree, the mode declared later in this enum wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum CombineMode {
    #[default]
    Average,
    Min,
    Multiply,
    Max,
}

impl CombineMode {
    fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            CombineMode::Average => (a + b) * 0.5,
            CombineMode::Min => a.min(b),
            CombineMode::Multiply => a * b,
            CombineMode::Max => a.max(b),
        }
    }
}

/// Friction and restitution of a collision shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsMaterial {
    /// Friction coefficient resisting the start of sliding
    pub static_friction: f32,
    /// Friction coefficient while sliding
    pub dynamic_friction: f32,
    /// Bounciness (0.0 = none, 1.0 = perfectly elastic)
    pub restitution: f32,
    pub friction_combine: CombineMode,
    pub restitution_combine: CombineMode,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.1)
    }
}

impl PhysicsMaterial {
    /// Create a material; friction is clamped to be non-negative and
    /// restitution to [0.0, 1.0]
    pub fn new(static_friction: f32, dynamic_friction: f32, restitution: f32) -> Self {
        Self {
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
            restitution: restitution.clamp(0.0, 1.0),
            friction_combine: CombineMode::Average,
            restitution_combine: CombineMode::Average,
        }
    }

    pub fn with_friction_combine(mut self, mode: CombineMode) -> Self {
        self.friction_combine = mode;
        self
    }

    pub fn with_restitution_combine(mut self, mode: CombineMode) -> Self {
        self.restitution_combine = mode;
        self
    }

    /// Combine two materials for one contact pair
    pub fn combine(&self, other: &Self) -> Self {
        let friction_mode = self.friction_combine.max(other.friction_combine);
        let restitution_mode = self.restitution_combine.max(other.restitution_combine);
        Self {
            static_friction: friction_mode.apply(self.static_friction, other.static_friction),
            dynamic_friction: friction_mode.apply(self.dynamic_friction, other.dynamic_friction),
            restitution: restitution_mode.apply(self.restitution, other.restitution),
            friction_combine: friction_mode,
            restitution_combine: restitution_mode,
        }
    }
}
