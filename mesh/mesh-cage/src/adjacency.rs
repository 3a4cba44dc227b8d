//! Dual graph over tetrahedra.
//!
//! Every link is pushed onto both endpoints' lists, so the graph is
//! symmetric. Lists are not deduplicated: a pair related in several ways
//! appears several times. Use [`dedup_adjacency`] for a simple graph.

use hashbrown::HashMap;

use crate::mode::TetMode;
use crate::tetrahedralize::Tetrahedron;
use crate::topology::{Edge, VertexFan};

/// Build the tetrahedron adjacency lists for `mode`.
///
/// - `Face`: tetrahedra of two faces sharing an interior edge.
/// - `Edge`: the two tetrahedra of an edge, plus tetrahedra sitting on the
///   same face through different edges.
/// - `Vertex`/`VertexFace`: all wedges of one vertex, plus wedges of
///   different vertices sharing a directed surface edge (the corners of
///   one triangle).
///
/// # Example
///
/// ```
/// use mesh_cage::{TetMode, build_adjacency, build_edge_list, tetrahedralize};
///
/// let faces = [[0, 1, 2], [0, 2, 3]];
/// let edges = build_edge_list(&faces);
/// let tet = tetrahedralize(TetMode::Face, 4, &faces, &edges, &[]);
///
/// let adj = build_adjacency(TetMode::Face, &tet.tets, &edges, &[]);
/// assert_eq!(adj, vec![vec![1], vec![0]]);
/// ```
#[must_use]
pub fn build_adjacency(
    mode: TetMode,
    tets: &[Tetrahedron],
    edges: &[Edge],
    fans: &[VertexFan],
) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); tets.len()];

    match mode {
        TetMode::Face => {
            for edge in edges {
                link(&mut adjacency, edge.faces[0], edge.faces[1]);
            }
        }
        TetMode::Edge => edge_adjacency(&mut adjacency, edges),
        TetMode::Vertex | TetMode::VertexFace => fan_adjacency(&mut adjacency, fans),
    }

    adjacency
}

/// Sort each list and drop repeated neighbors and self links.
#[must_use]
pub fn dedup_adjacency(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    adjacency
        .iter()
        .enumerate()
        .map(|(i, list)| {
            let mut list: Vec<usize> = list.iter().copied().filter(|&j| j != i).collect();
            list.sort_unstable();
            list.dedup();
            list
        })
        .collect()
}

fn edge_adjacency(adjacency: &mut [Vec<usize>], edges: &[Edge]) {
    // Face index -> edge tetrahedra already seen on that face.
    let mut face_share: HashMap<usize, Vec<usize>> = HashMap::new();

    for (i, edge) in edges.iter().enumerate() {
        let pair = [2 * i, 2 * i + 1];
        link(adjacency, pair[0], pair[1]);

        for (side, &face) in edge.faces.iter().enumerate() {
            let tet = pair[side];
            let seen = face_share.entry(face).or_default();
            for &other in seen.iter() {
                link(adjacency, tet, other);
            }
            seen.push(tet);
        }
    }
}

fn fan_adjacency(adjacency: &mut [Vec<usize>], fans: &[VertexFan]) {
    // Directed surface edge -> first wedge that carried it.
    let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
    let mut start = 0;

    for fan in fans {
        let wedges = fan.wedge_count();
        let local = start..start + wedges;

        for (cur, [s, t]) in local.clone().zip(fan.wedges()) {
            adjacency[cur].extend(local.clone().filter(|&other| other != cur));

            for key in [(fan.index, s), (t, fan.index)] {
                match directed.get(&key) {
                    Some(&other) => link(adjacency, cur, other),
                    None => {
                        directed.insert(key, cur);
                    }
                }
            }
        }

        start += wedges;
    }
}

#[inline]
fn link(adjacency: &mut [Vec<usize>], a: usize, b: usize) {
    adjacency[a].push(b);
    adjacency[b].push(a);
}
