//! Error type shared by every inspection stage.

/// Fatal input or configuration problems.
///
/// "No contour found" is not an error: an empty difference is a valid
/// outcome (`Normal` diameter, zero defect counts), never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
    /// Two images handed to a two-image operation differ in size.
    DimensionMismatch {
        /// Dimensions of the first operand `[width, height]`.
        expected: [u32; 2],
        /// Dimensions of the second operand `[width, height]`.
        actual: [u32; 2],
    },
    /// Wrong channel layout or out-of-range stage parameter.
    InvalidInput(String),
    /// Inconsistent configuration record.
    InvalidConfig(String),
}

impl std::fmt::Display for InspectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected[0], expected[1], actual[0], actual[1]
            ),
            Self::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for InspectError {}

/// Fail with [`InspectError::DimensionMismatch`] unless both images share a size.
pub(crate) fn ensure_same_dimensions(
    a: &image::GrayImage,
    b: &image::GrayImage,
) -> Result<(), InspectError> {
    let (aw, ah) = a.dimensions();
    let (bw, bh) = b.dimensions();
    if (aw, ah) != (bw, bh) {
        return Err(InspectError::DimensionMismatch {
            expected: [aw, ah],
            actual: [bw, bh],
        });
    }
    Ok(())
}
