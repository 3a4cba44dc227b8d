//! Degenerate tetrahedron removal.
//!
//! Ghost indices are derived from base list positions, so tetrahedra are
//! never deleted directly. The filter drops entries from the base lists and
//! then rebuilds the whole tetrahedralization.

use nalgebra::Matrix4;
use tracing::debug;

use crate::mode::TetMode;
use crate::tetrahedralize::{Tetrahedralization, tetrahedralize_topology};
use crate::topology::{SurfaceTopology, build_edge_list};

/// Whether a frame is singular: `|det| <= threshold`.
#[inline]
#[must_use]
pub fn is_degenerate_frame(frame: &Matrix4<f64>, threshold: f64) -> bool {
    frame.determinant().abs() <= threshold
}

/// Drop base elements whose tetrahedra are degenerate and rebuild.
///
/// `frames` must be the frames of the current tetrahedralization of
/// `topology` under `mode`. Policy per mode:
///
/// - `Face`: drop every face whose tetrahedron is degenerate, then rebuild
///   the edge list (edges that became boundary edges disappear). Fans are
///   left untouched.
/// - `Edge`: drop an edge only if both of its tetrahedra are degenerate.
/// - `Vertex`/`VertexFace`: drop a fan only if every wedge is degenerate.
///
/// Returns the rebuilt tetrahedralization; its
/// [`total_points`](Tetrahedralization::total_points) is the new size of
/// the full position buffer.
///
/// # Example
///
/// ```
/// use mesh_cage::{SurfaceTopology, TetMode, remove_degenerate, tet_frames, tetrahedralize_topology};
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ];
/// // The second face is a sliver along the X axis.
/// let mut topo = SurfaceTopology::from_faces(vec![[0, 1, 2], [0, 3, 1]]);
/// let tet = tetrahedralize_topology(TetMode::Face, 4, &topo);
/// let frames = tet_frames(TetMode::Face, &points, &tet.tets, &topo.faces, &topo.edges, &topo.fans);
///
/// let rebuilt = remove_degenerate(TetMode::Face, 4, &mut topo, &frames, 1e-5);
/// assert_eq!(topo.faces, vec![[0, 1, 2]]);
/// assert!(topo.edges.is_empty());
/// assert_eq!(rebuilt.total_points(), 5);
/// ```
pub fn remove_degenerate(
    mode: TetMode,
    num_points: usize,
    topology: &mut SurfaceTopology,
    frames: &[Matrix4<f64>],
    threshold: f64,
) -> Tetrahedralization {
    let degenerate = |i: usize| frames.get(i).is_some_and(|m| is_degenerate_frame(m, threshold));

    match mode {
        TetMode::Face => {
            let before = topology.faces.len();
            let mut i = 0;
            topology.faces.retain(|_| {
                let keep = !degenerate(i);
                i += 1;
                keep
            });
            topology.edges = build_edge_list(&topology.faces);
            debug!(
                removed = before - topology.faces.len(),
                edges = topology.edges.len(),
                "Dropped degenerate faces"
            );
        }
        TetMode::Edge => {
            let before = topology.edges.len();
            let mut i = 0;
            topology.edges.retain(|_| {
                let keep = !(degenerate(2 * i) && degenerate(2 * i + 1));
                i += 1;
                keep
            });
            debug!(
                removed = before - topology.edges.len(),
                "Dropped fully degenerate edges"
            );
        }
        TetMode::Vertex | TetMode::VertexFace => {
            let before = topology.fans.len();
            let mut start = 0;
            topology.fans.retain(|fan| {
                let wedges = fan.wedge_count();
                let all_degenerate = (start..start + wedges).all(degenerate);
                start += wedges;
                // A fan without wedges has nothing degenerate to drop.
                wedges == 0 || !all_degenerate
            });
            debug!(
                removed = before - topology.fans.len(),
                "Dropped fully degenerate vertex fans"
            );
        }
    }

    tetrahedralize_topology(mode, num_points, topology)
}
