//! Shape generation for 2D primitives

use super::scene::{FilledRect, Scene};
use super::vertex::{Vertex, to_linear};

/// Two triangles covering `fill`, in playfield pixel coordinates
pub fn rect(fill: &FilledRect) -> [Vertex; 6] {
    let color = to_linear(fill.color);
    let left = fill.rect.left() as f32;
    let right = fill.rect.right() as f32;
    let top = fill.rect.top() as f32;
    let bottom = fill.rect.bottom() as f32;

    [
        Vertex::new(left, top, color),
        Vertex::new(left, bottom, color),
        Vertex::new(right, top, color),
        Vertex::new(right, top, color),
        Vertex::new(left, bottom, color),
        Vertex::new(right, bottom, color),
    ]
}

/// All filled rectangles of a scene, back to front. Empty rects are skipped.
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(scene.rects.len() * 6);
    for fill in scene.rects.iter().filter(|f| !f.rect.is_empty()) {
        vertices.extend_from_slice(&rect(fill));
    }
    vertices
}
