//! Validated cage construction pipeline.

use nalgebra::{Matrix4, Point3};
use tracing::{debug, info, warn};

use crate::adjacency::build_adjacency;
use crate::degenerate::remove_degenerate;
use crate::error::{CageError, CageResult};
use crate::frame::{ghost_positions, tet_frames, tet_frames_normalized};
use crate::mode::TetMode;
use crate::params::CageParams;
use crate::result::CageStats;
use crate::tetrahedralize::{PointSpace, Tetrahedralization, Tetrahedron, tetrahedralize_topology};
use crate::topology::{Edge, SurfaceTopology, VertexFan};
use crate::weights::{point_weights_to_tets, tet_centers, tet_weights_to_points};

/// A tetrahedral cage built over a triangle surface.
///
/// Owns every list derived for one mode: the (possibly filtered) surface
/// topology, the tetrahedra, their frames at the rest positions and the
/// adjacency lists. Build one with [`build_cage`] or
/// [`build_cage_with_fans`].
#[derive(Debug, Clone)]
pub struct TetCage {
    params: CageParams,
    topology: SurfaceTopology,
    tetrahedralization: Tetrahedralization,
    frames: Vec<Matrix4<f64>>,
    adjacency: Vec<Vec<usize>>,
    removed: usize,
}

impl TetCage {
    /// Construction mode.
    #[must_use]
    pub const fn mode(&self) -> TetMode {
        self.params.mode
    }

    /// Parameters the cage was built with.
    #[must_use]
    pub const fn params(&self) -> &CageParams {
        &self.params
    }

    /// Surface topology after filtering.
    #[must_use]
    pub const fn topology(&self) -> &SurfaceTopology {
        &self.topology
    }

    /// Faces after filtering.
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.topology.faces
    }

    /// Interior edges after filtering.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.topology.edges
    }

    /// Vertex fans after filtering. Empty unless the mode uses fans.
    #[must_use]
    pub fn fans(&self) -> &[VertexFan] {
        &self.topology.fans
    }

    /// The tetrahedra.
    #[must_use]
    pub fn tets(&self) -> &[Tetrahedron] {
        &self.tetrahedralization.tets
    }

    /// Real/ghost partition of the point index space.
    #[must_use]
    pub const fn space(&self) -> PointSpace {
        self.tetrahedralization.space
    }

    /// Real plus ghost points.
    #[must_use]
    pub const fn total_points(&self) -> usize {
        self.tetrahedralization.total_points()
    }

    /// Frames at the positions the cage was built from.
    #[must_use]
    pub fn frames(&self) -> &[Matrix4<f64>] {
        &self.frames
    }

    /// Adjacency lists, one per tetrahedron, with multiplicity.
    #[must_use]
    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Summary counts.
    #[must_use]
    pub fn stats(&self) -> CageStats {
        CageStats {
            mode: self.mode(),
            real_points: self.space().real,
            ghost_points: self.space().ghost,
            tetrahedra: self.tets().len(),
            edges: self.edges().len(),
            removed_tetrahedra: self.removed,
        }
    }

    /// Recompute the frames at new real point positions, for example a
    /// deformed pose of the same surface.
    ///
    /// # Errors
    ///
    /// Returns [`CageError::LengthMismatch`] if `points` does not hold
    /// exactly one position per real point.
    pub fn frames_at(&self, points: &[Point3<f64>]) -> CageResult<Vec<Matrix4<f64>>> {
        check_len(self.space().real, points.len())?;
        Ok(build_frames(&self.params, points, &self.tetrahedralization, &self.topology))
    }

    /// Average per-point weights onto the tetrahedra.
    ///
    /// # Errors
    ///
    /// Returns [`CageError::LengthMismatch`] if `weights` does not hold one
    /// value per real point.
    pub fn point_weights_to_tets(&self, weights: &[f64]) -> CageResult<Vec<f64>> {
        check_len(self.space().real, weights.len())?;
        Ok(point_weights_to_tets(
            self.mode(),
            self.tets(),
            self.edges(),
            weights,
        ))
    }

    /// Scatter per-tetrahedron weights back onto the real points by summation.
    ///
    /// # Errors
    ///
    /// Returns [`CageError::LengthMismatch`] if `weights` does not hold one
    /// value per tetrahedron.
    pub fn tet_weights_to_points(&self, weights: &[f64]) -> CageResult<Vec<f64>> {
        check_len(self.tets().len(), weights.len())?;
        Ok(tet_weights_to_points(
            self.mode(),
            self.space().real,
            self.tets(),
            self.edges(),
            weights,
        ))
    }

    /// Ghost point positions for the given real positions, in ghost index order.
    ///
    /// # Errors
    ///
    /// Returns [`CageError::LengthMismatch`] if `points` does not hold
    /// exactly one position per real point.
    pub fn ghost_positions(&self, points: &[Point3<f64>]) -> CageResult<Vec<Point3<f64>>> {
        check_len(self.space().real, points.len())?;
        Ok(ghost_positions(
            self.mode(),
            points,
            self.faces(),
            self.edges(),
            self.fans(),
        ))
    }

    /// Full position buffer: the real points followed by the ghost points.
    ///
    /// # Errors
    ///
    /// Returns [`CageError::LengthMismatch`] if `points` does not hold
    /// exactly one position per real point.
    pub fn all_positions(&self, points: &[Point3<f64>]) -> CageResult<Vec<Point3<f64>>> {
        let ghosts = self.ghost_positions(points)?;
        let mut all = Vec::with_capacity(self.total_points());
        all.extend_from_slice(points);
        all.extend(ghosts);
        Ok(all)
    }

    /// Anchor position of each tetrahedron on the surface.
    ///
    /// # Errors
    ///
    /// Returns [`CageError::LengthMismatch`] if `points` does not hold
    /// exactly one position per real point.
    pub fn tet_centers(&self, points: &[Point3<f64>]) -> CageResult<Vec<Point3<f64>>> {
        check_len(self.space().real, points.len())?;
        Ok(tet_centers(self.mode(), points, self.tets()))
    }
}

fn check_len(expected: usize, actual: usize) -> CageResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CageError::length_mismatch(expected, actual))
    }
}

/// Build a tetrahedral cage over a triangle surface.
///
/// Vertex fans are derived from the face winding when the mode needs them.
///
/// # Arguments
///
/// * `points` - Real surface point positions
/// * `faces` - Consistently wound triangles indexing into `points`
/// * `params` - Mode and filtering settings
///
/// # Errors
///
/// Returns an error if the parameters are invalid or a face references a
/// point outside `points`.
///
/// # Example
///
/// ```
/// use mesh_cage::{CageParams, build_cage};
/// use nalgebra::Point3;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2], [0, 2, 3]];
///
/// let cage = build_cage(&points, &faces, &CageParams::edge()).unwrap();
/// assert_eq!(cage.tets().len(), 2);
/// assert_eq!(cage.total_points(), 5);
/// println!("{}", cage.stats());
/// ```
pub fn build_cage(
    points: &[Point3<f64>],
    faces: &[[u32; 3]],
    params: &CageParams,
) -> CageResult<TetCage> {
    params.validate()?;
    validate_faces(faces, points.len())?;

    let topology = if params.mode.uses_fans() {
        SurfaceTopology::from_faces(faces.to_vec())
    } else {
        SurfaceTopology::with_fans(faces.to_vec(), Vec::new())
    };
    assemble(points, topology, params)
}

/// Build a tetrahedral cage with caller-supplied vertex fans.
///
/// The fans are only read by [`TetMode::Vertex`] and
/// [`TetMode::VertexFace`], but are validated in every mode.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, a face or fan references
/// a point outside `points`, or a fan holds an odd number of neighbors.
pub fn build_cage_with_fans(
    points: &[Point3<f64>],
    faces: &[[u32; 3]],
    fans: Vec<VertexFan>,
    params: &CageParams,
) -> CageResult<TetCage> {
    params.validate()?;
    validate_faces(faces, points.len())?;
    validate_fans(&fans, points.len())?;

    assemble(points, SurfaceTopology::with_fans(faces.to_vec(), fans), params)
}

fn assemble(
    points: &[Point3<f64>],
    mut topology: SurfaceTopology,
    params: &CageParams,
) -> CageResult<TetCage> {
    let mode = params.mode;
    let num_points = points.len();

    info!(
        mode = %mode,
        points = num_points,
        faces = topology.faces.len(),
        "Building tetrahedral cage"
    );

    let mut tetrahedralization = tetrahedralize_topology(mode, num_points, &topology);
    let mut frames = build_frames(params, points, &tetrahedralization, &topology);
    let initial = tetrahedralization.len();

    debug!(
        tets = initial,
        ghosts = tetrahedralization.space.ghost,
        edges = topology.edges.len(),
        "Tetrahedralized surface"
    );

    if params.remove_degenerate {
        tetrahedralization = remove_degenerate(
            mode,
            num_points,
            &mut topology,
            &frames,
            params.degeneracy_threshold,
        );
        if tetrahedralization.len() != initial {
            frames = build_frames(params, points, &tetrahedralization, &topology);
        }
        if tetrahedralization.is_empty() && initial > 0 {
            warn!(mode = %mode, "Every tetrahedron was degenerate; cage is empty");
        }
    }

    let adjacency = build_adjacency(
        mode,
        &tetrahedralization.tets,
        &topology.edges,
        &topology.fans,
    );

    let cage = TetCage {
        params: params.clone(),
        topology,
        removed: initial - tetrahedralization.len(),
        tetrahedralization,
        frames,
        adjacency,
    };

    info!(
        tets = cage.tets().len(),
        total_points = cage.total_points(),
        removed = cage.removed,
        "Cage complete"
    );

    Ok(cage)
}

fn build_frames(
    params: &CageParams,
    points: &[Point3<f64>],
    tetrahedralization: &Tetrahedralization,
    topology: &SurfaceTopology,
) -> Vec<Matrix4<f64>> {
    let build = if params.normalized_frames {
        tet_frames_normalized
    } else {
        tet_frames
    };
    build(
        params.mode,
        points,
        &tetrahedralization.tets,
        &topology.faces,
        &topology.edges,
        &topology.fans,
    )
}

fn validate_faces(faces: &[[u32; 3]], point_count: usize) -> CageResult<()> {
    for (face, indices) in faces.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= point_count) {
            return Err(CageError::FaceIndexOutOfRange {
                face,
                index,
                point_count,
            });
        }
    }
    Ok(())
}

fn validate_fans(fans: &[VertexFan], point_count: usize) -> CageResult<()> {
    for (vertex, fan) in fans.iter().enumerate() {
        if fan.neighbors.len() % 2 != 0 {
            return Err(CageError::OddFanLength {
                vertex,
                len: fan.neighbors.len(),
            });
        }
        let out_of_range = std::iter::once(&fan.index)
            .chain(&fan.neighbors)
            .find(|&&i| i as usize >= point_count);
        if let Some(&index) = out_of_range {
            return Err(CageError::FanIndexOutOfRange {
                vertex,
                index,
                point_count,
            });
        }
    }
    Ok(())
}
