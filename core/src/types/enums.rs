use std::fmt;

/// Ordering strategy for slices along the stacking axis
///
/// Both strategies sort ascending and are stable, so records sharing a key
/// keep their discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum SliceOrder {
    /// Ascending InstanceNumber (0020,0013)
    #[default]
    InstanceNumber,

    /// Ascending z component of ImagePositionPatient (0020,0032)
    PatientPosition,

    /// PatientPosition when the first discovered slice carries
    /// ImagePositionPatient, InstanceNumber otherwise
    Auto,
}

impl SliceOrder {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            SliceOrder::InstanceNumber => "instance-number",
            SliceOrder::PatientPosition => "position",
            SliceOrder::Auto => "auto",
        }
    }

    /// Resolves `Auto` against whether the first slice has a position
    ///
    /// Concrete strategies are returned unchanged.
    pub fn resolve(self, first_has_position: bool) -> SliceOrder {
        match self {
            SliceOrder::Auto if first_has_position => SliceOrder::PatientPosition,
            SliceOrder::Auto => SliceOrder::InstanceNumber,
            concrete => concrete,
        }
    }

    /// Parses a slice order from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "instance-number" | "instance_number" | "instance" => Some(SliceOrder::InstanceNumber),
            "position" | "patient-position" | "z" => Some(SliceOrder::PatientPosition),
            "auto" => Some(SliceOrder::Auto),
            _ => None,
        }
    }
}

impl fmt::Display for SliceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Handling of `.dcm` files that cannot be turned into a slice record
///
/// Covers unparsable files, files lacking a Modality tag, and files whose
/// pixel data cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum InvalidFilePolicy {
    /// The first invalid file aborts the whole load
    #[default]
    Abort,

    /// Invalid files are logged and left out
    Skip,
}

impl InvalidFilePolicy {
    /// Returns whether invalid files are skipped
    pub fn is_skip(&self) -> bool {
        matches!(self, InvalidFilePolicy::Skip)
    }
}

impl fmt::Display for InvalidFilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidFilePolicy::Abort => write!(f, "abort"),
            InvalidFilePolicy::Skip => write!(f, "skip"),
        }
    }
}
