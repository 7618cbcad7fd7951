//! Error type shared by the store, the splitter and the exporter.

/// Errors reported by mesh operations.
///
/// Every variant is a caller contract violation. Operations detect them
/// before touching the store, so a failed call leaves the mesh unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// Malformed construction input (too few vertices, unknown vertex handle,
    /// self-loop edge) or a broken invariant found by
    /// [`HalfEdgeMesh::check_topology`](crate::HalfEdgeMesh::check_topology).
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// Geometry that cannot be processed: zero-area polygon, non-unit plane
    /// normal, or a split that would produce a fragment with fewer than
    /// three vertices.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A handle past the end of its storage, usually one issued by another
    /// store.
    #[error("{kind} handle {index} is out of range (store holds {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: u32,
        len: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = MeshError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_handle() {
        let err = MeshError::IndexOutOfRange {
            kind: "polygon",
            index: 7,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "polygon handle 7 is out of range (store holds 3)"
        );
    }

    #[test]
    fn topology_message_is_prefixed() {
        let err = MeshError::InvalidTopology("polygon needs at least 3 vertices".into());
        assert!(err.to_string().starts_with("invalid topology:"));
    }
}
