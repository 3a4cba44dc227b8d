//! Tetrahedron construction.
//!
//! Every tetrahedron has three surface corners and an apex in slot 3. The
//! apex is a ghost point whose index lives after all real points:
//!
//! ```text
//! | real points [0, R) | ghost points [R, R + G) |
//! ```
//!
//! Ghost indices are assigned densely from list positions, so the numbering
//! depends only on the base lists and the mode:
//!
//! | Mode         | Ghost index            | G                |
//! |--------------|------------------------|------------------|
//! | `Face`       | `R + face index`       | face count       |
//! | `Edge`       | `R + edge index`       | edge count       |
//! | `Vertex`     | `R + fan index`        | fan count        |
//! | `VertexFace` | `R + running wedge id` | total wedges     |

use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mode::TetMode;
use crate::topology::{Edge, SurfaceTopology, VertexFan};

/// A tetrahedron as four point indices; slot 3 is the apex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tetrahedron(pub [usize; 4]);

impl Tetrahedron {
    /// Create a tetrahedron from three surface corners and an apex.
    #[inline]
    #[must_use]
    pub const fn new(p0: usize, p1: usize, p2: usize, apex: usize) -> Self {
        Self([p0, p1, p2, apex])
    }

    /// The three surface corners.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> [usize; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// The apex index.
    #[inline]
    #[must_use]
    pub const fn apex(&self) -> usize {
        self.0[3]
    }

    /// All four indices.
    #[inline]
    #[must_use]
    pub const fn indices(&self) -> [usize; 4] {
        self.0
    }
}

/// Partition of the point index space into real and ghost points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointSpace {
    /// Number of real surface points.
    pub real: usize,
    /// Number of ghost apex points.
    pub ghost: usize,
}

impl PointSpace {
    /// Create a point space.
    #[inline]
    #[must_use]
    pub const fn new(real: usize, ghost: usize) -> Self {
        Self { real, ghost }
    }

    /// Real plus ghost points; the size of a full position buffer.
    #[inline]
    #[must_use]
    pub const fn total(&self) -> usize {
        self.real + self.ghost
    }

    /// Whether `index` refers to a ghost point.
    #[inline]
    #[must_use]
    pub const fn is_ghost(&self, index: usize) -> bool {
        index >= self.real && index < self.total()
    }

    /// The ghost index range `[R, R + G)`.
    #[inline]
    #[must_use]
    pub const fn ghost_range(&self) -> Range<usize> {
        self.real..self.total()
    }

    /// Offset of a ghost point inside a ghost-only buffer, or `None` for a
    /// real or out-of-range index.
    #[inline]
    #[must_use]
    pub const fn ghost_slot(&self, index: usize) -> Option<usize> {
        if self.is_ghost(index) {
            Some(index - self.real)
        } else {
            None
        }
    }
}

/// Output of [`tetrahedralize`].
#[derive(Debug, Clone, Default)]
pub struct Tetrahedralization {
    /// The tetrahedra, in mode-specific order.
    pub tets: Vec<Tetrahedron>,
    /// Real and ghost point counts.
    pub space: PointSpace,
}

impl Tetrahedralization {
    /// Real plus ghost points.
    #[inline]
    #[must_use]
    pub const fn total_points(&self) -> usize {
        self.space.total()
    }

    /// Number of tetrahedra.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tets.len()
    }

    /// Whether no tetrahedra were produced.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tets.is_empty()
    }
}

/// Build the tetrahedra for `mode`.
///
/// # Arguments
///
/// * `mode` - Construction mode
/// * `num_points` - Number of real points `R`
/// * `faces` - Triangle list
/// * `edges` - Interior edges of `faces`
/// * `fans` - Vertex fans (only read by the fan modes)
///
/// # Example
///
/// ```
/// use mesh_cage::{TetMode, build_edge_list, tetrahedralize};
///
/// let faces = [[0, 1, 2], [0, 2, 3]];
/// let edges = build_edge_list(&faces);
///
/// let tet = tetrahedralize(TetMode::Edge, 4, &faces, &edges, &[]);
/// assert_eq!(tet.len(), 2);
/// assert_eq!(tet.total_points(), 5);
/// assert!(tet.tets.iter().all(|t| t.apex() == 4));
/// ```
#[must_use]
pub fn tetrahedralize(
    mode: TetMode,
    num_points: usize,
    faces: &[[u32; 3]],
    edges: &[Edge],
    fans: &[VertexFan],
) -> Tetrahedralization {
    match mode {
        TetMode::Face => face_tets(num_points, faces),
        TetMode::Edge => edge_tets(num_points, faces, edges),
        TetMode::Vertex => vertex_tets(num_points, fans, false),
        TetMode::VertexFace => vertex_tets(num_points, fans, true),
    }
}

/// [`tetrahedralize`] over a bundled [`SurfaceTopology`].
#[must_use]
pub fn tetrahedralize_topology(
    mode: TetMode,
    num_points: usize,
    topology: &SurfaceTopology,
) -> Tetrahedralization {
    tetrahedralize(
        mode,
        num_points,
        &topology.faces,
        &topology.edges,
        &topology.fans,
    )
}

fn face_tets(num_points: usize, faces: &[[u32; 3]]) -> Tetrahedralization {
    let tets = faces
        .iter()
        .enumerate()
        .map(|(i, &[a, b, c])| Tetrahedron::new(a as usize, b as usize, c as usize, num_points + i))
        .collect();

    Tetrahedralization {
        tets,
        space: PointSpace::new(num_points, faces.len()),
    }
}

fn edge_tets(num_points: usize, faces: &[[u32; 3]], edges: &[Edge]) -> Tetrahedralization {
    let mut tets = Vec::with_capacity(edges.len() * 2);

    for (i, edge) in edges.iter().enumerate() {
        let apex = num_points + i;
        for &f in &edge.faces {
            let face = faces[f];
            let [p0, p1, p2] = edge_ordered_corners(face, edge);
            tets.push(Tetrahedron::new(p0, p1, p2, apex));
        }
    }

    Tetrahedralization {
        tets,
        space: PointSpace::new(num_points, edges.len()),
    }
}

/// Order a face's corners as `(next after opposite, next again, opposite)`,
/// so the first two corners are the edge endpoints in face winding order.
pub(crate) fn edge_ordered_corners(face: [u32; 3], edge: &Edge) -> [usize; 3] {
    // A face without a corner off the edge is degenerate input; fall back to
    // corner 0 rather than panicking.
    let k = (0..3).find(|&k| !edge.contains(face[k])).unwrap_or(0);
    [
        face[(k + 1) % 3] as usize,
        face[(k + 2) % 3] as usize,
        face[k] as usize,
    ]
}

fn vertex_tets(num_points: usize, fans: &[VertexFan], apex_per_wedge: bool) -> Tetrahedralization {
    let mut tets = Vec::with_capacity(fans.iter().map(VertexFan::wedge_count).sum());
    let mut wedge_id = 0;

    for (i, fan) in fans.iter().enumerate() {
        for [n0, n1] in fan.wedges() {
            let apex = if apex_per_wedge { num_points + wedge_id } else { num_points + i };
            tets.push(Tetrahedron::new(
                fan.index as usize,
                n0 as usize,
                n1 as usize,
                apex,
            ));
            wedge_id += 1;
        }
    }

    let ghost = if apex_per_wedge { wedge_id } else { fans.len() };
    Tetrahedralization {
        tets,
        space: PointSpace::new(num_points, ghost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{build_edge_list, build_vertex_fans};

    fn square() -> Vec<[u32; 3]> {
        vec![[0, 1, 2], [0, 2, 3]]
    }

    #[test]
    fn test_face_mode_square() {
        let faces = square();
        let tet = tetrahedralize(TetMode::Face, 4, &faces, &[], &[]);
        assert_eq!(tet.tets, vec![Tetrahedron::new(0, 1, 2, 4), Tetrahedron::new(0, 2, 3, 5)]);
        assert_eq!(tet.space, PointSpace::new(4, 2));
        assert_eq!(tet.total_points(), 6);
    }

    #[test]
    fn test_edge_mode_orders_edge_first() {
        let faces = square();
        let edges = build_edge_list(&faces);
        let tet = tetrahedralize(TetMode::Edge, 4, &faces, &edges, &[]);

        // Face 0 = (0,1,2): opposite corner 1 -> (2, 0, 1).
        // Face 1 = (0,2,3): opposite corner 3 -> (0, 2, 3).
        assert_eq!(tet.tets, vec![Tetrahedron::new(2, 0, 1, 4), Tetrahedron::new(0, 2, 3, 4)]);
        assert_eq!(tet.space.ghost, 1);
    }

    #[test]
    fn test_vertex_modes_share_or_split_apex() {
        let faces = square();
        let fans = build_vertex_fans(&faces);
        let wedges: usize = fans.iter().map(VertexFan::wedge_count).sum();
        assert_eq!(wedges, 6);

        let shared = tetrahedralize(TetMode::Vertex, 4, &faces, &[], &fans);
        assert_eq!(shared.len(), 6);
        assert_eq!(shared.space.ghost, 4);
        // Vertex 0 owns two wedges, both pointing at ghost 4.
        assert_eq!(shared.tets[0].apex(), 4);
        assert_eq!(shared.tets[1].apex(), 4);
        assert_eq!(shared.tets[2].apex(), 5);

        let split = tetrahedralize(TetMode::VertexFace, 4, &faces, &[], &fans);
        assert_eq!(split.len(), 6);
        assert_eq!(split.space.ghost, 6);
        let apexes: Vec<_> = split.tets.iter().map(Tetrahedron::apex).collect();
        assert_eq!(apexes, vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_empty_fans_contribute_nothing() {
        let fans = vec![VertexFan::new(0, vec![]), VertexFan::new(1, vec![2]), VertexFan::new(2, vec![0, 1])];
        let shared = tetrahedralize(TetMode::Vertex, 3, &[], &[], &fans);
        assert_eq!(shared.len(), 1);
        // Ghost slots still exist for every fan.
        assert_eq!(shared.space.ghost, 3);
        assert_eq!(shared.tets[0], Tetrahedron::new(2, 0, 1, 5));

        let split = tetrahedralize(TetMode::VertexFace, 3, &[], &[], &fans);
        assert_eq!(split.space.ghost, 1);
        assert_eq!(split.tets[0].apex(), 3);
    }

    #[test]
    fn test_point_space() {
        let space = PointSpace::new(10, 3);
        assert_eq!(space.total(), 13);
        assert_eq!(space.ghost_range(), 10..13);
        assert!(!space.is_ghost(9));
        assert!(space.is_ghost(10));
        assert!(!space.is_ghost(13));
        assert_eq!(space.ghost_slot(12), Some(2));
        assert_eq!(space.ghost_slot(3), None);
    }
}
