//! Affine frame construction.
//!
//! Each tetrahedron gets a 4x4 homogeneous matrix whose rows are its four
//! corners extended with a constant 1:
//!
//! ```text
//! | p0.x  p0.y  p0.z  1 |
//! | p1.x  p1.y  p1.z  1 |
//! | p2.x  p2.y  p2.z  1 |
//! | c.x   c.y   c.z   1 |
//! ```
//!
//! The apex `c` is never read from a position buffer. It is recomputed as a
//! unit offset along a mode-specific normal:
//!
//! - `Face`/`VertexFace`: `p0 + unit((p1 - p0) x (p2 - p0))`
//! - `Edge`: edge midpoint plus the unit sum of both adjacent unit face normals
//! - `Vertex`: the vertex plus the unit sum of all its unit wedge normals
//!
//! A zero normal leaves the apex on the surface; the resulting singular frame
//! is left for [`crate::remove_degenerate`] to prune.

use nalgebra::{Matrix4, Point3, Vector3};

use crate::mode::TetMode;
use crate::tetrahedralize::{Tetrahedron, edge_ordered_corners};
use crate::topology::{Edge, VertexFan};

/// Compose a frame matrix from three surface corners and an apex.
#[must_use]
pub fn frame_matrix(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    apex: &Point3<f64>,
) -> Matrix4<f64> {
    Matrix4::new(
        p0.x, p0.y, p0.z, 1.0, //
        p1.x, p1.y, p1.z, 1.0, //
        p2.x, p2.y, p2.z, 1.0, //
        apex.x, apex.y, apex.z, 1.0,
    )
}

/// Build one frame per tetrahedron.
///
/// `positions` holds the real points only; apexes are derived.
///
/// # Example
///
/// ```
/// use mesh_cage::{TetMode, tet_frames, tetrahedralize};
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let faces = [[0, 1, 2]];
/// let tet = tetrahedralize(TetMode::Face, 3, &faces, &[], &[]);
/// let frames = tet_frames(TetMode::Face, &points, &tet.tets, &faces, &[], &[]);
///
/// // Apex sits one unit above p0.
/// assert!((frames[0][(3, 2)] - 1.0).abs() < 1e-12);
/// assert!((frames[0].determinant().abs() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn tet_frames(
    mode: TetMode,
    positions: &[Point3<f64>],
    tets: &[Tetrahedron],
    faces: &[[u32; 3]],
    edges: &[Edge],
    fans: &[VertexFan],
) -> Vec<Matrix4<f64>> {
    match mode {
        TetMode::Face | TetMode::VertexFace => tets
            .iter()
            .map(|tet| {
                let [p0, p1, p2] = tet.base().map(|i| positions[i]);
                frame_matrix(&p0, &p1, &p2, &face_apex(&p0, &p1, &p2))
            })
            .collect(),
        TetMode::Edge => {
            let mut frames = Vec::with_capacity(edges.len() * 2);
            for edge in edges {
                let apex = edge_apex(positions, faces, edge);
                for &f in &edge.faces {
                    let [p0, p1, p2] = edge_ordered_corners(faces[f], edge).map(|i| positions[i]);
                    frames.push(frame_matrix(&p0, &p1, &p2, &apex));
                }
            }
            frames
        }
        TetMode::Vertex => {
            let mut frames = Vec::with_capacity(tets.len());
            for fan in fans {
                let p0 = positions[fan.index as usize];
                let apex = vertex_apex(positions, fan);
                for [n0, n1] in fan.wedges() {
                    let p1 = positions[n0 as usize];
                    let p2 = positions[n1 as usize];
                    frames.push(frame_matrix(&p0, &p1, &p2, &apex));
                }
            }
            frames
        }
    }
}

/// Build one frame per tetrahedron with the surface edges `p1 - p0` and
/// `p2 - p0` rescaled to unit length.
///
/// The apex offset is unchanged, since rescaling the edges does not change
/// the normal direction. [`TetMode::Edge`] frames are built as in
/// [`tet_frames`].
#[must_use]
pub fn tet_frames_normalized(
    mode: TetMode,
    positions: &[Point3<f64>],
    tets: &[Tetrahedron],
    faces: &[[u32; 3]],
    edges: &[Edge],
    fans: &[VertexFan],
) -> Vec<Matrix4<f64>> {
    match mode {
        TetMode::Edge => tet_frames(mode, positions, tets, faces, edges, fans),
        TetMode::Face | TetMode::VertexFace => tets
            .iter()
            .map(|tet| {
                let [p0, p1, p2] = tet.base().map(|i| positions[i]);
                let q1 = p0 + unit_or_zero(p1 - p0);
                let q2 = p0 + unit_or_zero(p2 - p0);
                frame_matrix(&p0, &q1, &q2, &face_apex(&p0, &q1, &q2))
            })
            .collect(),
        TetMode::Vertex => {
            let mut frames = Vec::with_capacity(tets.len());
            for fan in fans {
                let p0 = positions[fan.index as usize];
                let apex = vertex_apex(positions, fan);
                for [n0, n1] in fan.wedges() {
                    let q1 = p0 + unit_or_zero(positions[n0 as usize] - p0);
                    let q2 = p0 + unit_or_zero(positions[n1 as usize] - p0);
                    frames.push(frame_matrix(&p0, &q1, &q2, &apex));
                }
            }
            frames
        }
    }
}

/// Materialize the ghost point positions, in ghost index order.
///
/// The returned buffer has one entry per ghost point, so entry `k` belongs to
/// point index `R + k`. Callers that only need frames never have to build it.
///
/// # Example
///
/// ```
/// use mesh_cage::{TetMode, build_edge_list, ghost_positions};
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let faces = [[0, 1, 2], [0, 2, 3]];
/// let edges = build_edge_list(&faces);
///
/// let ghosts = ghost_positions(TetMode::Edge, &points, &faces, &edges, &[]);
/// assert_eq!(ghosts.len(), 1);
/// // Diagonal midpoint lifted one unit along +Z.
/// assert!((ghosts[0] - Point3::new(0.5, 0.5, 1.0)).norm() < 1e-12);
/// ```
#[must_use]
pub fn ghost_positions(
    mode: TetMode,
    positions: &[Point3<f64>],
    faces: &[[u32; 3]],
    edges: &[Edge],
    fans: &[VertexFan],
) -> Vec<Point3<f64>> {
    match mode {
        TetMode::Face => faces
            .iter()
            .map(|face| {
                let [p0, p1, p2] = face.map(|i| positions[i as usize]);
                face_apex(&p0, &p1, &p2)
            })
            .collect(),
        TetMode::Edge => edges
            .iter()
            .map(|edge| edge_apex(positions, faces, edge))
            .collect(),
        TetMode::Vertex => fans.iter().map(|fan| vertex_apex(positions, fan)).collect(),
        TetMode::VertexFace => fans
            .iter()
            .flat_map(|fan| {
                let p0 = positions[fan.index as usize];
                fan.wedges().map(move |[n0, n1]| {
                    face_apex(&p0, &positions[n0 as usize], &positions[n1 as usize])
                })
            })
            .collect(),
    }
}

/// Unit normal of the triangle `(p0, p1, p2)`, or zero if degenerate.
#[must_use]
pub fn triangle_unit_normal(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    unit_or_zero((p1 - p0).cross(&(p2 - p0)))
}

fn face_apex(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Point3<f64> {
    p0 + triangle_unit_normal(p0, p1, p2)
}

fn edge_apex(positions: &[Point3<f64>], faces: &[[u32; 3]], edge: &Edge) -> Point3<f64> {
    let normal: Vector3<f64> = edge
        .faces
        .iter()
        .map(|&f| {
            let [p0, p1, p2] = faces[f].map(|i| positions[i as usize]);
            triangle_unit_normal(&p0, &p1, &p2)
        })
        .sum();

    let a = positions[edge.vertices[0] as usize];
    let b = positions[edge.vertices[1] as usize];
    nalgebra::center(&a, &b) + unit_or_zero(normal)
}

fn vertex_apex(positions: &[Point3<f64>], fan: &VertexFan) -> Point3<f64> {
    let p0 = positions[fan.index as usize];
    let normal: Vector3<f64> = fan
        .wedges()
        .map(|[n0, n1]| triangle_unit_normal(&p0, &positions[n0 as usize], &positions[n1 as usize]))
        .sum();
    p0 + unit_or_zero(normal)
}

#[inline]
fn unit_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}
