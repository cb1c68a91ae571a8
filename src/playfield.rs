use std::collections::BTreeMap;
use std::fmt;

/// Handle to a falling body owned by the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// The physics/render collaborator the engine drives.
///
/// The engine only ever reads positions, only ever *sets* velocities, and
/// destroys each body exactly once.
pub trait Playfield {
    fn spawn_body(&mut self, x: f32, y: f32, velocity: f32) -> BodyId;
    /// Vertical position, growing toward the escape boundary. `None` for unknown bodies.
    fn position(&self, body: BodyId) -> Option<f32>;
    fn set_velocity(&mut self, body: BodyId, velocity: f32);
    fn destroy(&mut self, body: BodyId);
    /// Move bodies forward by `dt_ms`
    fn advance(&mut self, dt_ms: u64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
}

/// Constant-velocity playfield used by the soak harness and tests
#[derive(Debug, Default)]
pub struct KinematicPlayfield {
    bodies: BTreeMap<BodyId, Body>,
    next_id: u64,
}

impl KinematicPlayfield {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Teleport a body; lets tests stage positions directly
    pub fn set_position(&mut self, id: BodyId, y: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.y = y;
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Playfield for KinematicPlayfield {
    fn spawn_body(&mut self, x: f32, y: f32, velocity: f32) -> BodyId {
        self.next_id += 1;
        let id = BodyId(self.next_id);
        self.bodies.insert(id, Body { x, y, velocity });
        id
    }

    fn position(&self, body: BodyId) -> Option<f32> {
        self.bodies.get(&body).map(|b| b.y)
    }

    fn set_velocity(&mut self, body: BodyId, velocity: f32) {
        match self.bodies.get_mut(&body) {
            Some(b) => b.velocity = velocity,
            None => log::warn!("set_velocity on unknown {body}"),
        }
    }

    fn destroy(&mut self, body: BodyId) {
        if self.bodies.remove(&body).is_none() {
            log::warn!("destroy on unknown {body}");
        }
    }

    fn advance(&mut self, dt_ms: u64) {
        let dt = dt_ms as f32 / 1000.0;
        for body in self.bodies.values_mut() {
            body.y += body.velocity * dt;
        }
    }
}
