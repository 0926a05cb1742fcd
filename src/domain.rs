//! Domain types for the under-bed packing problem.
//!
//! These are internal types used by the engine and the API layer. They are
//! not directly exposed to the network layer — the API layer has its own
//! request/response DTOs that convert into and out of these.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation error for a packing request.
///
/// Carries enough structure for the API layer to build the
/// `{error, message, details}` response shape without re-deriving it.
#[derive(Debug, Clone)]
pub enum DomainError {
    InvalidDimension { field: String, message: String },
    InvalidMargin { field: String, message: String },
    DuplicateBoxId(String),
    InvalidOrientationFlags { box_id: String, message: String },
    InvalidLoadCapacity { field: String, message: String },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidDimension { field, message } => {
                write!(f, "invalid dimension for {}: {}", field, message)
            }
            DomainError::InvalidMargin { field, message } => {
                write!(f, "invalid margin for {}: {}", field, message)
            }
            DomainError::DuplicateBoxId(id) => write!(f, "duplicate box id: {}", id),
            DomainError::InvalidOrientationFlags { box_id, message } => {
                write!(f, "invalid rotation flags for box {}: {}", box_id, message)
            }
            DomainError::InvalidLoadCapacity { field, message } => {
                write!(f, "invalid load capacity for {}: {}", field, message)
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    /// Field name to surface in the API error detail list.
    pub fn field(&self) -> String {
        match self {
            DomainError::InvalidDimension { field, .. } => field.clone(),
            DomainError::InvalidMargin { field, .. } => field.clone(),
            DomainError::DuplicateBoxId(_) => "boxes".to_string(),
            DomainError::InvalidOrientationFlags { box_id, .. } => format!("boxes[{}]", box_id),
            DomainError::InvalidLoadCapacity { field, .. } => field.clone(),
        }
    }
}

/// Fragility level of a box. Determines default max supported load and the
/// load/fragility constraints applied when something rests on top of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Fragility {
    Robust,
    Normal,
    Fragile,
}

impl Fragility {
    /// Default `max_supported_load` (kg) applied when a box doesn't declare one.
    pub fn default_max_supported_load(self) -> f64 {
        match self {
            Fragility::Robust => 50.0,
            Fragility::Normal => 20.0,
            Fragility::Fragile => 5.0,
        }
    }

    /// Box-ordering contribution (spec §4.5).
    pub fn order_score(self) -> f64 {
        match self {
            Fragility::Robust => 0.0,
            Fragility::Normal => 50.0,
            Fragility::Fragile => 100.0,
        }
    }
}

/// How often a box needs to be accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessFrequency {
    Rare,
    Sometimes,
    Often,
}

impl AccessFrequency {
    /// Box-ordering contribution before weighting by accessibility_preference.
    pub fn order_score(self) -> f64 {
        match self {
            AccessFrequency::Rare => 0.0,
            AccessFrequency::Sometimes => 100.0,
            AccessFrequency::Often => 200.0,
        }
    }
}

/// Priority level for box placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    MustFit,
    Optional,
}

impl Priority {
    pub fn order_score(self) -> f64 {
        match self {
            Priority::MustFit => 0.0,
            Priority::Optional => 1000.0,
        }
    }
}

/// Packing strategy options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    MaximizeVolume,
    MinimizeHoles,
}

/// One of the three box axes (length, width, height), used as an orientation
/// label. Distinct from a bed/container axis — an `Orientation` maps each
/// container axis to the box axis that ends up aligned with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Length,
    Width,
    Height,
}

/// Describes how a box is oriented in space: which intrinsic dimension of
/// the box is aligned with each container axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Orientation {
    pub length_axis: Axis,
    pub width_axis: Axis,
    pub height_axis: Axis,
}

impl Orientation {
    /// The identity orientation: no rotation.
    pub fn identity() -> Self {
        Self {
            length_axis: Axis::Length,
            width_axis: Axis::Width,
            height_axis: Axis::Height,
        }
    }
}

/// The space under the bed where boxes will be packed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub struct Bed {
    /// cm, along the length of the bed (head to foot).
    pub length: f64,
    /// cm, across the bed.
    pub width: f64,
    /// cm, vertical clearance.
    pub height: f64,
    /// cm, margin from all edges.
    pub margin: f64,
    /// cm, radius of the interior rounded corners (0 = square corners).
    #[serde(default)]
    pub corner_radius: f64,
}

impl Bed {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_positive("bed.length", self.length)?;
        validate_positive("bed.width", self.width)?;
        validate_positive("bed.height", self.height)?;
        if self.margin < 0.0 || self.margin.is_nan() {
            return Err(DomainError::InvalidMargin {
                field: "bed.margin".to_string(),
                message: format!("must be >= 0, got {}", self.margin),
            });
        }
        if self.corner_radius < 0.0 || self.corner_radius.is_nan() {
            return Err(DomainError::InvalidMargin {
                field: "bed.corner_radius".to_string(),
                message: format!("must be >= 0, got {}", self.corner_radius),
            });
        }
        let max_radius = self.length.min(self.width) / 2.0;
        if self.corner_radius > max_radius + crate::geometry::EPSILON_GENERAL {
            return Err(DomainError::InvalidMargin {
                field: "bed.corner_radius".to_string(),
                message: format!("must be <= min(length, width) / 2 = {}", max_radius),
            });
        }
        Ok(())
    }
}

/// A box to be packed.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BoxSpec {
    pub id: String,
    pub name: String,
    /// cm
    pub length: f64,
    /// cm
    pub width: f64,
    /// cm
    pub height: f64,
    /// kg
    pub weight: f64,
    pub fragility: Fragility,
    pub access_frequency: AccessFrequency,
    pub priority: Priority,
    #[serde(default = "default_true")]
    pub can_rotate_x: bool,
    #[serde(default = "default_true")]
    pub can_rotate_y: bool,
    #[serde(default = "default_true")]
    pub can_rotate_z: bool,
    /// kg, max weight that can be placed on top. Defaults by fragility when absent.
    #[serde(default)]
    pub max_supported_load: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl BoxSpec {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_positive(&format!("boxes[{}].length", self.id), self.length)?;
        validate_positive(&format!("boxes[{}].width", self.id), self.width)?;
        validate_positive(&format!("boxes[{}].height", self.id), self.height)?;
        if self.weight < 0.0 || self.weight.is_nan() {
            return Err(DomainError::InvalidDimension {
                field: format!("boxes[{}].weight", self.id),
                message: format!("must be >= 0, got {}", self.weight),
            });
        }
        if let Some(load) = self.max_supported_load {
            if load < 0.0 || load.is_nan() {
                return Err(DomainError::InvalidLoadCapacity {
                    field: format!("boxes[{}].max_supported_load", self.id),
                    message: format!("must be >= 0, got {}", load),
                });
            }
        }
        Ok(())
    }

    /// Effective load limit for things resting on this box: the declared
    /// value, or the fragility-based default.
    pub fn effective_max_supported_load(&self) -> f64 {
        self.max_supported_load
            .unwrap_or_else(|| self.fragility.default_max_supported_load())
    }

    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }
}

fn validate_positive(field: &str, value: f64) -> Result<(), DomainError> {
    if value <= 0.0 || value.is_nan() || value.is_infinite() {
        return Err(DomainError::InvalidDimension {
            field: field.to_string(),
            message: format!("must be positive, got {}", value),
        });
    }
    Ok(())
}

/// Packing settings and preferences.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub struct Settings {
    pub strategy: Strategy,
    /// 0.0 = compact, 1.0 = accessible.
    #[serde(default = "default_accessibility")]
    pub accessibility_preference: f64,
    /// cm, space between boxes.
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// cm, additional margin on top of the bed's own margin.
    #[serde(default)]
    pub margin: f64,
}

fn default_accessibility() -> f64 {
    0.5
}

fn default_padding() -> f64 {
    1.0
}

impl Settings {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.accessibility_preference) {
            return Err(DomainError::InvalidMargin {
                field: "settings.accessibility_preference".to_string(),
                message: format!("must be within [0, 1], got {}", self.accessibility_preference),
            });
        }
        if self.padding < 0.0 || self.padding.is_nan() {
            return Err(DomainError::InvalidMargin {
                field: "settings.padding".to_string(),
                message: format!("must be >= 0, got {}", self.padding),
            });
        }
        if self.margin < 0.0 || self.margin.is_nan() {
            return Err(DomainError::InvalidMargin {
                field: "settings.margin".to_string(),
                message: format!("must be >= 0, got {}", self.margin),
            });
        }
        Ok(())
    }
}

/// Where and how a box is placed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub orientation: Orientation,
}

/// A committed placement together with the box it places — what the engine
/// returns to callers. Carries `box_id` alongside the placement since the
/// box itself stays in the caller's input list.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BoxPlacement {
    pub box_id: String,
    #[serde(flatten)]
    pub placement: Placement,
}

/// A box together with its placement and placed dimensions, tracked
/// internally by the engine while packing.
#[derive(Clone, Debug)]
pub struct PlacedBox<'a> {
    pub spec: &'a BoxSpec,
    pub placement: Placement,
    pub placed_length: f64,
    pub placed_width: f64,
    pub placed_height: f64,
}

impl<'a> PlacedBox<'a> {
    pub fn x_end(&self) -> f64 {
        self.placement.x + self.placed_length
    }

    pub fn y_end(&self) -> f64 {
        self.placement.y + self.placed_width
    }

    pub fn z_end(&self) -> f64 {
        self.placement.z + self.placed_height
    }

    pub fn volume(&self) -> f64 {
        self.placed_length * self.placed_width * self.placed_height
    }

    pub fn footprint_and_height(&self) -> crate::geometry::Cuboid {
        crate::geometry::Cuboid::new(
            self.placement.x,
            self.placement.y,
            self.placement.z,
            self.placed_length,
            self.placed_width,
            self.placed_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragility_defaults() {
        assert_eq!(Fragility::Robust.default_max_supported_load(), 50.0);
        assert_eq!(Fragility::Normal.default_max_supported_load(), 20.0);
        assert_eq!(Fragility::Fragile.default_max_supported_load(), 5.0);
    }

    fn sample_box(id: &str) -> BoxSpec {
        BoxSpec {
            id: id.to_string(),
            name: "box".to_string(),
            length: 10.0,
            width: 10.0,
            height: 10.0,
            weight: 5.0,
            fragility: Fragility::Normal,
            access_frequency: AccessFrequency::Rare,
            priority: Priority::MustFit,
            can_rotate_x: true,
            can_rotate_y: true,
            can_rotate_z: true,
            max_supported_load: None,
        }
    }

    #[test]
    fn box_effective_load_defaults_by_fragility() {
        let b = sample_box("a");
        assert_eq!(b.effective_max_supported_load(), 20.0);
    }

    #[test]
    fn box_effective_load_uses_declared_value() {
        let mut b = sample_box("a");
        b.max_supported_load = Some(99.0);
        assert_eq!(b.effective_max_supported_load(), 99.0);
    }

    #[test]
    fn box_rejects_negative_max_supported_load() {
        let mut b = sample_box("a");
        b.max_supported_load = Some(-1.0);
        let err = b.validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidLoadCapacity { .. }));
        assert_eq!(err.field(), "boxes[a].max_supported_load");
    }

    #[test]
    fn bed_rejects_negative_dimension() {
        let bed = Bed {
            length: -1.0,
            width: 50.0,
            height: 30.0,
            margin: 0.0,
            corner_radius: 0.0,
        };
        assert!(bed.validate().is_err());
    }

    #[test]
    fn bed_rejects_oversized_corner_radius() {
        let bed = Bed {
            length: 100.0,
            width: 80.0,
            height: 30.0,
            margin: 0.0,
            corner_radius: 45.0,
        };
        assert!(bed.validate().is_err());
    }

    #[test]
    fn bed_accepts_valid_corner_radius() {
        let bed = Bed {
            length: 100.0,
            width: 80.0,
            height: 30.0,
            margin: 0.0,
            corner_radius: 40.0,
        };
        assert!(bed.validate().is_ok());
    }

    #[test]
    fn settings_rejects_accessibility_out_of_range() {
        let settings = Settings {
            strategy: Strategy::MaximizeVolume,
            accessibility_preference: 1.5,
            padding: 1.0,
            margin: 0.0,
        };
        assert!(settings.validate().is_err());
    }
}
