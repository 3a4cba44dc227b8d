//! Scalar transfer between the point and tetrahedron domains.
//!
//! Gathering (points to tetrahedra) averages; scattering (tetrahedra to
//! points) sums. The two are not inverses: scatter a gathered field and
//! each point comes back multiplied by its incidence count. Divide by the
//! incidence yourself if you need a normalized result.

use nalgebra::Point3;

use crate::mode::TetMode;
use crate::tetrahedralize::Tetrahedron;
use crate::topology::Edge;

/// Average point weights onto tetrahedra.
///
/// - `Face`: mean of the three face corners
/// - `Edge`: mean of the two edge endpoints, same value for both
///   tetrahedra of the edge
/// - `Vertex`/`VertexFace`: the fan vertex's weight
///
/// # Example
///
/// ```
/// use mesh_cage::{TetMode, point_weights_to_tets, tetrahedralize};
///
/// let faces = [[0, 1, 2]];
/// let tet = tetrahedralize(TetMode::Face, 3, &faces, &[], &[]);
/// let w = point_weights_to_tets(TetMode::Face, &tet.tets, &[], &[0.0, 3.0, 6.0]);
/// assert!((w[0] - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn point_weights_to_tets(
    mode: TetMode,
    tets: &[Tetrahedron],
    edges: &[Edge],
    point_weights: &[f64],
) -> Vec<f64> {
    match mode {
        TetMode::Face => tets
            .iter()
            .map(|t| {
                let [a, b, c] = t.base();
                (point_weights[a] + point_weights[b] + point_weights[c]) / 3.0
            })
            .collect(),
        TetMode::Edge => edges
            .iter()
            .flat_map(|e| {
                let w = f64::midpoint(
                    point_weights[e.vertices[0] as usize],
                    point_weights[e.vertices[1] as usize],
                );
                [w, w]
            })
            .collect(),
        TetMode::Vertex | TetMode::VertexFace => {
            tets.iter().map(|t| point_weights[t.base()[0]]).collect()
        }
    }
}

/// Scatter tetrahedron weights back onto the real points by summation.
///
/// - `Face`: each tetrahedron's weight is added to its three corners
/// - `Edge`: the sum of an edge's two tetrahedron weights is added to both
///   endpoints
/// - `Vertex`/`VertexFace`: each weight is added to the fan vertex
///
/// Points not touched by any tetrahedron stay at zero.
#[must_use]
pub fn tet_weights_to_points(
    mode: TetMode,
    num_points: usize,
    tets: &[Tetrahedron],
    edges: &[Edge],
    tet_weights: &[f64],
) -> Vec<f64> {
    let mut point_weights = vec![0.0; num_points];

    match mode {
        TetMode::Face => {
            for (t, &w) in tets.iter().zip(tet_weights) {
                for p in t.base() {
                    point_weights[p] += w;
                }
            }
        }
        TetMode::Edge => {
            for (i, e) in edges.iter().enumerate() {
                let w = tet_weights[2 * i] + tet_weights[2 * i + 1];
                point_weights[e.vertices[0] as usize] += w;
                point_weights[e.vertices[1] as usize] += w;
            }
        }
        TetMode::Vertex | TetMode::VertexFace => {
            for (t, &w) in tets.iter().zip(tet_weights) {
                point_weights[t.base()[0]] += w;
            }
        }
    }

    point_weights
}

/// Anchor position of each tetrahedron on the surface.
///
/// Face centroid for `Face`, edge midpoint for `Edge`, the fan vertex for
/// `Vertex`/`VertexFace`. Distance-based weighting schemes measure from
/// these points.
#[must_use]
pub fn tet_centers(mode: TetMode, positions: &[Point3<f64>], tets: &[Tetrahedron]) -> Vec<Point3<f64>> {
    tets.iter()
        .map(|t| {
            let [a, b, c] = t.base().map(|i| positions[i]);
            match mode {
                TetMode::Face => Point3::from((a.coords + b.coords + c.coords) / 3.0),
                TetMode::Edge => nalgebra::center(&a, &b),
                TetMode::Vertex | TetMode::VertexFace => a,
            }
        })
        .collect()
}
