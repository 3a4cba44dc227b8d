//! Tetrahedron construction modes.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CageError;

/// How tetrahedra are anchored to the surface.
///
/// The mode fixes the ghost point numbering, the frame construction, the
/// weight transfer rule, the adjacency relation and the degeneracy policy.
/// All lists derived under one mode must be rebuilt together when the mode
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TetMode {
    /// One tetrahedron per triangle, one ghost apex per face.
    #[default]
    Face,
    /// Two tetrahedra per interior edge sharing one ghost apex.
    Edge,
    /// One tetrahedron per fan wedge, one ghost apex per vertex.
    Vertex,
    /// One tetrahedron per fan wedge, one ghost apex per wedge.
    VertexFace,
}

impl TetMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 4] = [Self::Face, Self::Edge, Self::Vertex, Self::VertexFace];

    /// Whether this mode builds its tetrahedra from vertex fans.
    #[must_use]
    pub const fn uses_fans(self) -> bool {
        matches!(self, Self::Vertex | Self::VertexFace)
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::Edge => "edge",
            Self::Vertex => "vertex",
            Self::VertexFace => "vface",
        }
    }
}

impl fmt::Display for TetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TetMode {
    type Err = CageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "face" => Ok(Self::Face),
            "edge" => Ok(Self::Edge),
            "vertex" => Ok(Self::Vertex),
            "vface" | "vertex_face" | "vertex-face" => Ok(Self::VertexFace),
            other => Err(CageError::invalid_params(format!(
                "unknown tetrahedron mode '{other}'"
            ))),
        }
    }
}
