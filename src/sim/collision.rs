//! Motion integration, wall reflection and circle overlap
//!
//! Walls are the four sides of the [`Arena`]. A body bounces as soon as its
//! leading edge reaches a side; the bounce is perfectly elastic.

use super::state::{Arena, Body};

/// Which axes a body bounced on this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub x: bool,
    pub y: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Advance a body by its velocity, then reflect it off any wall it reached
pub fn integrate(body: &mut Body, arena: &Arena) -> WallHit {
    body.pos += body.vel;
    bounce_off_walls(body, arena)
}

/// Reflect velocity and pull the body back inside, independently per axis
pub fn bounce_off_walls(body: &mut Body, arena: &Arena) -> WallHit {
    WallHit {
        x: bounce_axis(&mut body.pos.x, &mut body.vel.x, body.radius, arena.width),
        y: bounce_axis(&mut body.pos.y, &mut body.vel.y, body.radius, arena.height),
    }
}

fn bounce_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32) -> bool {
    if *pos - radius < 0.0 || *pos + radius >= extent {
        *vel = -*vel;
        // max/min instead of clamp: a body wider than the arena must not panic
        *pos = pos.max(radius).min(extent - radius);
        true
    } else {
        false
    }
}

/// Strict overlap: touching circles do not collide
#[inline]
pub fn bodies_overlap(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}
