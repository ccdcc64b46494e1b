use thiserror::Error;

/// Top-level error type for the floor-plan engine.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate: {0}")]
    NonFinite(&'static str),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("invalid viewport: zoom must be finite and > 0, got {zoom}")]
    InvalidViewport { zoom: f64 },
}

/// Errors related to the corner/wall graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("degenerate wall: {0}")]
    DegenerateWall(String),
}

/// Errors related to editing and placement operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no wall to attach to")]
    NoWallFound,

    #[error("nearest wall is {distance:.1} cm away, threshold is {threshold:.1} cm")]
    TooFar { distance: f64, threshold: f64 },
}

impl FloorplanError {
    /// Whether this error is an expected placement outcome rather than a fault.
    #[must_use]
    pub fn is_placement_miss(&self) -> bool {
        matches!(
            self,
            Self::Operation(OperationError::NoWallFound | OperationError::TooFar { .. })
        )
    }
}

/// Convenience type alias for results using [`FloorplanError`].
pub type Result<T> = std::result::Result<T, FloorplanError>;
