//! Fixed tick simulation step
//!
//! One tick runs input effects, then motion and walls for every body, then
//! the pairwise collision scan.

use glam::Vec2;

use super::collision::integrate;
use super::pop::{apply_scan, resolve_collisions};
use super::state::{Body, World};
use crate::consts::*;

/// Pointer state for a single tick, read once at the start of it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in arena coordinates
    pub pointer: Vec2,
    /// Button held
    pub pointer_down: bool,
}

impl TickInput {
    pub fn held_at(pointer: Vec2) -> Self {
        Self {
            pointer,
            pointer_down: true,
        }
    }
}

/// What happened during a tick (for logging and tests)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub ejections: usize,
    pub wall_bounces: usize,
    pub contacts: usize,
    pub removed: usize,
    pub pop_fragments: usize,
}

/// Unit thrust direction for a body at `body_pos`
///
/// With `invert` the body is pushed away from the pointer. `None` when the
/// pointer sits exactly on the body's centre.
pub fn thrust_direction(body_pos: Vec2, pointer: Vec2, invert: bool) -> Option<Vec2> {
    let toward = pointer - body_pos;
    let dir = if invert { -toward } else { toward };
    dir.try_normalize()
}

/// Accelerate `body` along `dir`, shrink it and return the recoil fragment
///
/// The fragment starts one (pre-shrink) radius behind the body and flies
/// opposite to the body's new velocity.
pub fn eject(body: &mut Body, dir: Vec2) -> Body {
    let offset = dir * body.radius;
    body.vel += dir * THRUST;
    body.radius -= EJECT_SHRINK;
    Body::new(body.pos - offset, -body.vel, EJECT_RADIUS, true)
}

/// Thrust and eject from every qualifying player body while the pointer is held
///
/// Fragments are appended after the pass, so they move and collide this tick
/// but never eject themselves.
pub fn apply_input(world: &mut World, input: &TickInput) -> usize {
    if !input.pointer_down {
        return 0;
    }

    let invert = world.invert_controls;
    let mut fragments = Vec::new();
    for body in world.bodies.iter_mut() {
        if !body.player || body.radius <= MIN_EJECT_RADIUS {
            continue;
        }
        // Pointer dead on the centre: no direction, skip this body this tick
        let Some(dir) = thrust_direction(body.pos, input.pointer, invert) else {
            continue;
        };
        fragments.push(eject(body, dir));
    }

    let count = fragments.len();
    if count > 0 {
        log::trace!("Ejected {} fragments toward {:?}", count, input.pointer);
    }
    world.bodies.extend(fragments);
    count
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> TickStats {
    world.time_ticks += 1;

    let ejections = apply_input(world, input);

    let arena = world.arena;
    let wall_bounces = world
        .bodies
        .iter_mut()
        .map(|body| integrate(body, &arena))
        .filter(|hit| hit.any())
        .count();

    let mut scan = resolve_collisions(world);
    let stats = TickStats {
        ejections,
        wall_bounces,
        contacts: scan.contacts,
        removed: scan.removals.len(),
        pop_fragments: scan.spawns.len(),
    };
    apply_scan(world, &mut scan);

    stats
}

/// Owned flavour of [`tick`]: consume a world, return the next one
pub fn step(mut world: World, input: &TickInput) -> World {
    tick(&mut world, input);
    world
}
