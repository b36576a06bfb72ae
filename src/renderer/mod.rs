//! Frame building
//!
//! Turns the body store into GPU-ready line-list vertices. Reads the world
//! between ticks only and never mutates it.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::{Arena, Body, World};
pub use vertex::{Vertex, colors};

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Line list in clip space
    pub vertices: Vec<Vertex>,
}

impl Frame {
    /// Raw vertex data, ready for a buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Stroke color for a body
#[inline]
pub fn body_color(body: &Body) -> [f32; 4] {
    if body.player {
        colors::PLAYER
    } else {
        colors::AUTONOMOUS
    }
}

/// Arena coordinates (origin top-left, y down) to clip space
#[inline]
pub fn to_clip(pos: Vec2, arena: &Arena) -> Vec2 {
    Vec2::new(
        pos.x / arena.width * 2.0 - 1.0,
        1.0 - pos.y / arena.height * 2.0,
    )
}

/// Outline every body in the world
pub fn build_frame(world: &World) -> Frame {
    let mut vertices = Vec::new();
    for body in &world.bodies {
        let segments = shapes::segments_for(body.radius);
        let outline = shapes::circle_outline(body.pos, body.radius, body_color(body), segments);
        vertices.extend(outline.into_iter().map(|v| {
            let clip = to_clip(Vec2::from(v.position), &world.arena);
            Vertex::new(clip.x, clip.y, v.color)
        }));
    }

    Frame { vertices }
}
