//! Surface topology: interior edges and vertex fans.
//!
//! These are the base lists every tetrahedralization is derived from. The
//! degeneracy filter edits them in place, so they are bundled together in
//! [`SurfaceTopology`].

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interior edge shared by exactly two faces.
///
/// Endpoints are stored smallest index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Endpoint point indices, `vertices[0] < vertices[1]`.
    pub vertices: [u32; 2],
    /// The two adjacent face indices: first sighting, then second.
    pub faces: [usize; 2],
}

impl Edge {
    /// Create an edge, canonicalizing the endpoint order.
    #[must_use]
    pub const fn new(v0: u32, v1: u32, f0: usize, f1: usize) -> Self {
        Self {
            vertices: canonical_pair(v0, v1),
            faces: [f0, f1],
        }
    }

    /// Whether `point` is one of the endpoints.
    #[inline]
    #[must_use]
    pub const fn contains(&self, point: u32) -> bool {
        self.vertices[0] == point || self.vertices[1] == point
    }
}

/// The oriented triangle fan around one surface point.
///
/// `neighbors` is read in consecutive pairs: each pair `(n0, n1)` is a
/// wedge, the triangle `(index, n0, n1)` with the surface winding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexFan {
    /// The point this fan is centered on.
    pub index: u32,
    /// Neighbor pairs, flattened.
    pub neighbors: Vec<u32>,
}

impl VertexFan {
    /// Create a fan from a center point and flattened neighbor pairs.
    #[must_use]
    pub const fn new(index: u32, neighbors: Vec<u32>) -> Self {
        Self { index, neighbors }
    }

    /// Number of complete wedges. A trailing unpaired neighbor is ignored.
    #[inline]
    #[must_use]
    pub fn wedge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Iterate over wedges as neighbor pairs.
    pub fn wedges(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        self.neighbors.chunks_exact(2).map(|c| [c[0], c[1]])
    }
}

/// Faces, interior edges and vertex fans of one surface.
#[derive(Debug, Clone, Default)]
pub struct SurfaceTopology {
    /// Triangles as point index triples, consistently wound.
    pub faces: Vec<[u32; 3]>,
    /// Interior edges derived from `faces`.
    pub edges: Vec<Edge>,
    /// Vertex fans, either derived from `faces` or supplied by the caller.
    pub fans: Vec<VertexFan>,
}

impl SurfaceTopology {
    /// Derive edges and fans from a face list.
    #[must_use]
    pub fn from_faces(faces: Vec<[u32; 3]>) -> Self {
        let edges = build_edge_list(&faces);
        let fans = build_vertex_fans(&faces);
        Self { faces, edges, fans }
    }

    /// Derive edges from a face list and take the fans as given.
    #[must_use]
    pub fn with_fans(faces: Vec<[u32; 3]>, fans: Vec<VertexFan>) -> Self {
        let edges = build_edge_list(&faces);
        Self { faces, edges, fans }
    }

    /// Total wedge count over all fans.
    #[must_use]
    pub fn wedge_count(&self) -> usize {
        self.fans.iter().map(VertexFan::wedge_count).sum()
    }
}

/// Build the interior edge list of a triangle list.
///
/// Every directed face edge is canonicalized to `(min, max)` and looked up
/// in a map from pair to the first face it was seen on. The second sighting
/// emits an [`Edge`]; pairs seen only once are boundary edges and are
/// dropped. Edges come out in the order their second face is visited.
///
/// An edge shared by more than two faces is a precondition violation: each
/// further sighting emits another edge against the first face.
///
/// # Example
///
/// ```
/// use mesh_cage::build_edge_list;
///
/// // Unit square split along the diagonal 0-2.
/// let faces = [[0, 1, 2], [0, 2, 3]];
/// let edges = build_edge_list(&faces);
///
/// assert_eq!(edges.len(), 1);
/// assert_eq!(edges[0].vertices, [0, 2]);
/// assert_eq!(edges[0].faces, [0, 1]);
/// ```
#[must_use]
pub fn build_edge_list(faces: &[[u32; 3]]) -> Vec<Edge> {
    let mut first_face: HashMap<(u32, u32), usize> = HashMap::with_capacity(faces.len() * 3 / 2);
    let mut edges = Vec::with_capacity(faces.len() * 3 / 2);

    for (face_idx, face) in faces.iter().enumerate() {
        for j in 0..3 {
            let [s, t] = canonical_pair(face[j], face[(j + 1) % 3]);
            match first_face.get(&(s, t)) {
                Some(&other) => edges.push(Edge {
                    vertices: [s, t],
                    faces: [other, face_idx],
                }),
                None => {
                    first_face.insert((s, t), face_idx);
                }
            }
        }
    }

    edges
}

/// Derive vertex fans from a consistently wound triangle list.
///
/// Face `(a, b, c)` contributes wedge `(b, c)` to `a`, `(c, a)` to `b` and
/// `(a, b)` to `c`, so every wedge keeps the face winding. Fans are
/// returned in ascending point order, one per referenced point, with wedges
/// in face order.
///
/// # Example
///
/// ```
/// use mesh_cage::build_vertex_fans;
///
/// let fans = build_vertex_fans(&[[0, 1, 2]]);
/// assert_eq!(fans.len(), 3);
/// assert_eq!(fans[0].neighbors, vec![1, 2]);
/// assert_eq!(fans[1].neighbors, vec![2, 0]);
/// assert_eq!(fans[2].neighbors, vec![0, 1]);
/// ```
#[must_use]
pub fn build_vertex_fans(faces: &[[u32; 3]]) -> Vec<VertexFan> {
    let mut by_point: HashMap<u32, Vec<u32>> = HashMap::new();

    for &[a, b, c] in faces {
        by_point.entry(a).or_default().extend([b, c]);
        by_point.entry(b).or_default().extend([c, a]);
        by_point.entry(c).or_default().extend([a, b]);
    }

    let mut fans: Vec<VertexFan> = by_point
        .into_iter()
        .map(|(index, neighbors)| VertexFan { index, neighbors })
        .collect();
    fans.sort_unstable_by_key(|fan| fan.index);
    fans
}

#[inline]
pub(crate) const fn canonical_pair(a: u32, b: u32) -> [u32; 2] {
    if a < b { [a, b] } else { [b, a] }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron_faces() -> Vec<[u32; 3]> {
        // Closed, outward wound.
        vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]]
    }

    #[test]
    fn test_square_has_one_interior_edge() {
        let edges = build_edge_list(&[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0], Edge::new(2, 0, 0, 1));
    }

    #[test]
    fn test_single_triangle_has_no_edges() {
        assert!(build_edge_list(&[[0, 1, 2]]).is_empty());
    }

    #[test]
    fn test_closed_tetrahedron_edges() {
        let edges = build_edge_list(&tetrahedron_faces());
        assert_eq!(edges.len(), 6);
        for edge in &edges {
            assert!(edge.vertices[0] < edge.vertices[1]);
            assert_ne!(edge.faces[0], edge.faces[1]);
        }
    }

    #[test]
    fn test_non_manifold_edge_does_not_panic() {
        let edges = build_edge_list(&[[0, 1, 2], [1, 0, 3], [0, 1, 4]]);
        // Second and third sightings both pair with the first face.
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.vertices == [0, 1] && e.faces[0] == 0));
    }

    #[test]
    fn test_fans_of_closed_tetrahedron() {
        let fans = build_vertex_fans(&tetrahedron_faces());
        assert_eq!(fans.len(), 4);
        for (i, fan) in fans.iter().enumerate() {
            assert_eq!(fan.index as usize, i);
            assert_eq!(fan.wedge_count(), 3);
        }
        // Each face contributes one wedge per corner.
        let total: usize = fans.iter().map(VertexFan::wedge_count).sum();
        assert_eq!(total, 12);
    }

    #[test]
    fn test_fan_wedges_keep_winding() {
        let fans = build_vertex_fans(&[[4, 7, 9]]);
        let wedges: Vec<_> = fans.iter().flat_map(|f| f.wedges().map(move |w| (f.index, w))).collect();
        assert_eq!(wedges, vec![(4, [7, 9]), (7, [9, 4]), (9, [4, 7])]);
    }

    #[test]
    fn test_odd_fan_ignores_trailing_neighbor() {
        let fan = VertexFan::new(0, vec![1, 2, 3]);
        assert_eq!(fan.wedge_count(), 1);
        assert_eq!(fan.wedges().collect::<Vec<_>>(), vec![[1, 2]]);
    }

    #[test]
    fn test_topology_from_faces() {
        let topo = SurfaceTopology::from_faces(tetrahedron_faces());
        assert_eq!(topo.faces.len(), 4);
        assert_eq!(topo.edges.len(), 6);
        assert_eq!(topo.fans.len(), 4);
        assert_eq!(topo.wedge_count(), 12);
    }
}
