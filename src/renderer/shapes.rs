//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segments for a circle of `radius` on screen, between 8 and 64
pub fn segments_for(radius: f32) -> u32 {
    (radius * 1.5).ceil().clamp(8.0, 64.0) as u32
}

/// Generate line-list vertices for a circle outline
///
/// Two vertices per segment: `segments * 2` in total.
pub fn circle_outline(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 2) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_vertex_count() {
        let vertices = circle_outline(Vec2::ZERO, 1.0, [1.0; 4], 16);
        assert_eq!(vertices.len(), 32);
    }

    #[test]
    fn test_outline_points_on_circle() {
        let center = Vec2::new(3.0, -2.0);
        for v in circle_outline(center, 5.0, [1.0; 4], 12) {
            let p = Vec2::from(v.position);
            assert!((p.distance(center) - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_outline_is_closed() {
        let vertices = circle_outline(Vec2::ZERO, 2.0, [1.0; 4], 10);
        let first = Vec2::from(vertices[0].position);
        let last = Vec2::from(vertices[vertices.len() - 1].position);
        assert!(first.distance(last) < 1e-4);
    }

    #[test]
    fn test_segments_bounds() {
        assert_eq!(segments_for(0.5), 8);
        assert_eq!(segments_for(20.0), 30);
        assert_eq!(segments_for(500.0), 64);
    }
}
