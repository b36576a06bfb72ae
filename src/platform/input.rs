//! Pointer input
//!
//! Events arrive between ticks and overwrite single fields; the tick loop
//! takes one snapshot per tick.

use glam::Vec2;

use crate::sim::{Body, TickInput, World};

/// A raw pointer event in client (window) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    Down,
    Up,
}

/// Latest pointer state, in arena coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Client position of the arena's top-left corner
    origin: Vec2,
    pos: Vec2,
    down: bool,
}

impl PointerState {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move { x, y } => self.pos = Vec2::new(x, y) - self.origin,
            PointerEvent::Down => self.down = true,
            PointerEvent::Up => self.down = false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Input for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            pointer: self.pos,
            pointer_down: self.down,
        }
    }
}

/// Demo driver that steers the player toward the nearest autonomous body
///
/// Emits events in arena coordinates (use a `PointerState` with a zero origin).
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks between bursts
    period: u64,
    /// Ticks the button stays held per burst
    burst: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(90, 6)
    }
}

impl Autopilot {
    pub fn new(period: u64, burst: u64) -> Self {
        Self {
            period: period.max(1),
            burst,
        }
    }

    /// Events to feed before the next tick of `world`
    pub fn events(&self, world: &World) -> Vec<PointerEvent> {
        let phase = world.time_ticks % self.period;
        if phase >= self.burst {
            return if phase == self.burst {
                vec![PointerEvent::Up]
            } else {
                Vec::new()
            };
        }

        let Some(player) = world.bodies.iter().find(|b| b.player) else {
            return vec![PointerEvent::Up];
        };
        let Some(target) = nearest_autonomous(world, player) else {
            return vec![PointerEvent::Up];
        };

        // Thrust is reversed when inverted, so aim at the mirror image of the target
        let offset = target.pos - player.pos;
        let aim = if world.invert_controls {
            player.pos - offset
        } else {
            player.pos + offset
        };
        vec![
            PointerEvent::Move {
                x: aim.x,
                y: aim.y,
            },
            PointerEvent::Down,
        ]
    }
}

fn nearest_autonomous<'a>(world: &'a World, from: &Body) -> Option<&'a Body> {
    world
        .bodies
        .iter()
        .filter(|b| !b.player)
        .min_by(|a, b| {
            a.pos
                .distance_squared(from.pos)
                .partial_cmp(&b.pos.distance_squared(from.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
