//! Built-in demo geometry: the cube, the pyramid, and the marker line.
//!
//! The cube and pyramid reuse their positions as normals, which gives the
//! classic faceted-by-corner demo shading rather than per-face normals.

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex layout shared by every pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

const fn v(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        texcoord,
    }
}

/// Unit-ish cube: 8 corners, normals equal to positions.
pub fn cube() -> (Vec<Vertex>, Vec<u16>) {
    let vertices = vec![
        v([-1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [0.0, 0.0]),
        v([1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 0.0]),
        v([-1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [0.0, 1.0]),
        v([1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, 1.0]),
        v([-1.0, 1.0, 1.0], [-1.0, 1.0, 1.0], [1.0, 0.0]),
        v([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 0.0]),
        v([-1.0, -1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, 1.0]),
        v([1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [0.0, 1.0]),
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0, 1, 2,  2, 1, 3, // front
        6, 5, 4,  7, 5, 6, // back
        4, 1, 0,  5, 1, 4, // top
        2, 7, 6,  3, 7, 2, // bottom
        4, 2, 6,  4, 0, 2, // left
        1, 7, 3,  5, 7, 1, // right
    ];
    (vertices, indices)
}

/// Four-sided pyramid: an apex over a square base.
pub fn pyramid() -> (Vec<Vertex>, Vec<u16>) {
    let vertices = vec![
        v([0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.5, 0.0]),
        v([1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [0.0, 1.0]),
        v([-1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [1.0, 1.0]),
        v([1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [0.0, 1.0]),
        v([-1.0, -1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, 1.0]),
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0, 1, 2,
        0, 2, 4,
        0, 4, 3,
        0, 3, 1,
        1, 3, 2, // base
        4, 3, 2,
    ];
    (vertices, indices)
}

/// The vertical marker line above the origin, drawn as a line list.
pub fn line() -> Vec<Vertex> {
    vec![
        v([0.0, 2.0, 0.0], [1.0, 1.0, 1.0], [0.0, 0.0]),
        v([0.0, 6.0, 0.0], [1.0, 1.0, 1.0], [0.0, 0.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_a_full_index_list() {
        let (vertices, indices) = cube();
        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn pyramid_has_six_triangles() {
        let (vertices, indices) = pyramid();
        assert_eq!(vertices.len(), 5);
        assert_eq!(indices.len(), 18);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn line_is_two_vertices() {
        assert_eq!(line().len(), 2);
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }
}
