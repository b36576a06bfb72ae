//! World state and core simulation types
//!
//! The body store is the only mutable state; it is owned by a [`World`] and
//! passed explicitly through [`initialize`] and [`super::tick`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A circular body
///
/// Radius doubles as mass: every transfer is expressed as a radius delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Driven by pointer input (and inherited by its fragments)
    pub player: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, player: bool) -> Self {
        Self {
            pos,
            vel,
            radius,
            player,
        }
    }

    /// The pointer-driven body a run starts with
    pub fn player_at(pos: Vec2) -> Self {
        Self::new(pos, Vec2::ZERO, PLAYER_START_RADIUS, true)
    }

    /// A body with radius at or below zero is destroyed
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.radius <= 0.0
    }
}

/// The fixed rectangle bodies bounce around in
///
/// Origin at the top-left corner, extents along +x and +y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

/// Index-addressed collection of every live body
///
/// Order carries no meaning beyond deciding pair order and tie-breaks in the
/// collision scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyStore {
    bodies: Vec<Body>,
}

impl BodyStore {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    pub fn push(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn extend<I: IntoIterator<Item = Body>>(&mut self, bodies: I) {
        self.bodies.extend(bodies);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Read-only view for renderers
    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Body> {
        self.bodies.iter_mut()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Remove a single body, shifting later ones down
    pub fn remove(&mut self, index: usize) -> Option<Body> {
        if index < self.bodies.len() {
            Some(self.bodies.remove(index))
        } else {
            None
        }
    }

    /// Remove every listed index in one go
    ///
    /// Indices refer to the store as it was before this call. Duplicates and
    /// out-of-range entries are ignored; survivors keep their relative order.
    pub fn remove_indices(&mut self, indices: &[usize]) -> usize {
        let mut keep = vec![true; self.bodies.len()];
        for &index in indices {
            if let Some(slot) = keep.get_mut(index) {
                *slot = false;
            }
        }

        let before = self.bodies.len();
        let mut keep = keep.into_iter();
        self.bodies.retain(|_| keep.next().unwrap_or(true));
        before - self.bodies.len()
    }

    pub fn player_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.player).count()
    }

    /// Sum of radii, i.e. total "mass" in the arena
    pub fn total_radius(&self) -> f32 {
        self.bodies.iter().map(|b| b.radius).sum()
    }
}

impl<'a> IntoIterator for &'a BodyStore {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}

impl FromIterator<Body> for BodyStore {
    fn from_iter<I: IntoIterator<Item = Body>>(iter: I) -> Self {
        Self {
            bodies: iter.into_iter().collect(),
        }
    }
}

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    pub bodies: BodyStore,
    /// Thrust pushes away from the pointer when set
    pub invert_controls: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl World {
    /// An empty world with no bodies at all
    pub fn empty(arena: Arena, seed: u64) -> Self {
        Self {
            seed,
            arena,
            bodies: BodyStore::new(),
            invert_controls: true,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform sample in [0, 1)
    pub fn random(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// A randomly placed, sized and moving autonomous body
    ///
    /// Radius `(u - u) * 10 + 10` piles up around 10 and stays strictly positive.
    pub fn random_body(&mut self) -> Body {
        let pos = Vec2::new(
            self.random() * self.arena.width,
            self.random() * self.arena.height,
        );
        let radius = (self.random() - self.random()) * 10.0 + 10.0;
        let vel = Vec2::new(self.random(), self.random());
        Body::new(pos, vel, radius, false)
    }
}

/// Build the starting world: one player body in the middle of the arena plus
/// `random_bodies` autonomous ones.
pub fn initialize(width: f32, height: f32, random_bodies: usize, seed: u64) -> World {
    let mut world = World::empty(Arena::new(width, height), seed);
    world.bodies.push(Body::player_at(world.arena.center()));

    for _ in 0..random_bodies {
        let body = world.random_body();
        world.bodies.push(body);
    }

    log::info!(
        "World {}x{} initialized with {} bodies (seed {})",
        width,
        height,
        world.bodies.len(),
        seed
    );
    world
}
