//! Registry owning every render body
//!
//! Actors never own render bodies. They keep [`RenderBodyKey`]s into a
//! registry owned by the renderer, so a body removed by its owner simply stops
//! resolving instead of dangling.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::body::RenderBody;

new_key_type! {
    /// Generational key to a body in a [`RenderScene`]
    pub struct RenderBodyKey;
}

/// A render scene shared between its owner and the actors referencing it
pub type SharedRenderScene = Rc<RefCell<RenderScene>>;

/// Owner of all visual and collision-debug bodies
#[derive(Default)]
pub struct RenderScene {
    bodies: SlotMap<RenderBodyKey, Box<dyn RenderBody>>,
}

impl RenderScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a render scene ready to be shared with actors
    pub fn shared() -> SharedRenderScene {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn add_body(&mut self, body: impl RenderBody) -> RenderBodyKey {
        self.bodies.insert(Box::new(body))
    }

    pub fn remove_body(&mut self, key: RenderBodyKey) -> Option<Box<dyn RenderBody>> {
        self.bodies.remove(key)
    }

    pub fn contains(&self, key: RenderBodyKey) -> bool {
        self.bodies.contains_key(key)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn get(&self, key: RenderBodyKey) -> Option<&dyn RenderBody> {
        self.bodies.get(key).map(|b| b.as_ref())
    }

    pub fn get_mut(&mut self, key: RenderBodyKey) -> Option<&mut dyn RenderBody> {
        match self.bodies.get_mut(key) {
            Some(body) => Some(body.as_mut()),
            None => None,
        }
    }

    /// Get a body as its concrete type
    pub fn get_as<B: RenderBody>(&self, key: RenderBodyKey) -> Option<&B> {
        self.get(key).and_then(|b| b.as_any().downcast_ref::<B>())
    }

    /// Run `f` on every listed body, in order
    ///
    /// Keys whose body was already removed are skipped with a warning.
    /// Returns the number of bodies visited.
    pub fn for_each_mut(
        &mut self,
        keys: &[RenderBodyKey],
        mut f: impl FnMut(&mut dyn RenderBody),
    ) -> usize {
        let mut visited = 0;
        for &key in keys {
            match self.bodies.get_mut(key) {
                Some(body) => {
                    f(body.as_mut());
                    visited += 1;
                }
                None => log::warn!("render body {:?} no longer exists; skipping", key),
            }
        }
        visited
    }
}
