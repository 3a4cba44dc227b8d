//! Tetrahedral cages over triangle surfaces.
//!
//! This crate anchors a set of tetrahedra to a triangulated surface. Each
//! tetrahedron has three surface corners and a synthetic apex (a "ghost"
//! point) lifted off the surface along a normal, and carries a 4x4 affine
//! frame that downstream deformation and shape-matching code can use.
//!
//! # Features
//!
//! - **Topology extraction**: interior edges and oriented vertex fans
//! - **Four construction modes**: per face, per edge, per vertex, per vertex wedge
//! - **Frames**: homogeneous corner matrices, plain or with unit surface edges
//! - **Weight transfer**: average point weights onto tetrahedra, scatter back by sum
//! - **Adjacency**: mode-specific dual graph over tetrahedra
//! - **Degeneracy filter**: prune singular tetrahedra and renumber ghosts
//! - **Distance primitives**: point-to-segment and one-sided point-to-triangle
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Example
//!
//! ```
//! use mesh_cage::{CageParams, TetMode, build_cage};
//! use nalgebra::Point3;
//!
//! // Unit square split along its diagonal
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2], [0, 2, 3]];
//!
//! let cage = build_cage(&points, &faces, &CageParams::face()).unwrap();
//! assert_eq!(cage.mode(), TetMode::Face);
//! assert_eq!(cage.tets().len(), 2);
//! assert_eq!(cage.edges().len(), 1);
//!
//! // Ghost points live after the real points
//! let all = cage.all_positions(&points).unwrap();
//! assert_eq!(all.len(), cage.total_points());
//! println!("{}", cage.stats());
//! ```
//!
//! # Point Index Space
//!
//! Real points occupy `[0, R)` and ghost points `[R, R + G)`. Ghost indices
//! are computed from base list positions, never stored, so the component
//! functions only need the real positions. Use [`ghost_positions`] when a
//! full position buffer is needed.
//!
//! # Component Functions
//!
//! The pipeline in [`build_cage`] validates its input. The component
//! functions it is built from ([`build_edge_list`], [`tetrahedralize`],
//! [`tet_frames`], [`build_adjacency`], [`remove_degenerate`], ...) are
//! public too; they trust their input and panic on out-of-range indices.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod adjacency;
mod cage;
mod degenerate;
mod distance;
mod error;
mod frame;
mod mode;
mod params;
mod result;
mod tetrahedralize;
mod topology;
mod weights;

// Re-export main types and functions
pub use adjacency::{build_adjacency, dedup_adjacency};
pub use cage::{TetCage, build_cage, build_cage_with_fans};
pub use degenerate::{is_degenerate_frame, remove_degenerate};
pub use distance::{point_segment_distance_squared, point_triangle_distance_squared};
pub use error::{CageError, CageResult};
pub use frame::{frame_matrix, ghost_positions, tet_frames, tet_frames_normalized, triangle_unit_normal};
pub use mode::TetMode;
pub use params::{CageParams, DEFAULT_DEGENERACY_THRESHOLD};
pub use result::CageStats;
pub use tetrahedralize::{
    PointSpace, Tetrahedralization, Tetrahedron, tetrahedralize, tetrahedralize_topology,
};
pub use topology::{Edge, SurfaceTopology, VertexFan, build_edge_list, build_vertex_fans};
pub use weights::{point_weights_to_tets, tet_centers, tet_weights_to_points};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
