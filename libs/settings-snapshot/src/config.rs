//! Configuration for the settings snapshot registry

use serde::Deserialize;

/// Snapshot registry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotConfig {
    /// How floating point members are compared for change detection
    #[serde(default)]
    pub float_comparison: FloatComparison,

    /// How the declaring type is rendered in a setting's display form
    #[serde(default)]
    pub type_names: TypeNames,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            float_comparison: FloatComparison::default(),
            type_names: TypeNames::default(),
        }
    }
}

/// Tolerance rule for floating point change detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatComparison {
    /// Narrow both sides to `f32` and compare against `f32::EPSILON`,
    /// for `f64` members too
    ///
    /// Differences below `f32::EPSILON` (e.g. 0.0 to 1e-8) are not changes.
    /// `f64` values beyond the `f32` range narrow to infinity and are never
    /// reported as changed against each other.
    #[default]
    SinglePrecision,
    /// Compare `f64` members as `f64` against `f64::EPSILON`
    DoublePrecision,
}

/// Rendering of declaring type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNames {
    /// Full module path, e.g. `app::config::Network`
    #[default]
    Qualified,
    /// Last path segment only, e.g. `Network`
    Short,
}

impl TypeNames {
    pub fn render(self, type_name: &str) -> &str {
        match self {
            TypeNames::Qualified => type_name,
            TypeNames::Short => type_name.rsplit("::").next().unwrap_or(type_name),
        }
    }
}
