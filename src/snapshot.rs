use crate::error::FormatError;
use serde::{Deserialize, Deserializer, Serialize};

/// One self-contained map state as reported by the robot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSnapshot {
    pub size: MapSize,
    pub pixel_size: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub layers: Vec<Layer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<Entity>,
}

/// Robots emit `null` for absent arrays and metadata; treat it like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Nominal map extent in millimeters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MapSize {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Floor,
    Segment,
    Wall,
    #[serde(other)]
    Unknown,
}

impl LayerKind {
    /// Paint order; higher values land on top.
    pub fn z_order(self) -> u8 {
        match self {
            LayerKind::Floor => 0,
            LayerKind::Segment => 1,
            LayerKind::Wall => 2,
            LayerKind::Unknown => u8::MAX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayerKind::Floor => "floor",
            LayerKind::Segment => "segment",
            LayerKind::Wall => "wall",
            LayerKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    #[serde(rename = "type")]
    pub kind: LayerKind,
    #[serde(default, rename = "metaData", deserialize_with = "null_as_default")]
    pub metadata: LayerMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dimensions: LayerDimensions,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pixels: Vec<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compressed_pixels: Vec<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerMetadata {
    pub segment_id: Option<String>,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub area: Option<i64>,
}

/// Layer extent in grid cells.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LayerDimensions {
    pub x: DimensionRange,
    pub y: DimensionRange,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DimensionRange {
    pub min: i32,
    pub max: i32,
    #[serde(default)]
    pub mid: i32,
    #[serde(default)]
    pub avg: i32,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            metadata: LayerMetadata::default(),
            dimensions: LayerDimensions::default(),
            pixels: Vec::new(),
            compressed_pixels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Path,
    PredictedPath,
    ChargerLocation,
    RobotPosition,
    #[serde(other)]
    Unknown,
}

impl EntityKind {
    /// Paint order; the robot always ends up on top.
    pub fn z_order(self) -> u8 {
        match self {
            EntityKind::Path => 0,
            EntityKind::PredictedPath => 1,
            EntityKind::ChargerLocation => 2,
            EntityKind::RobotPosition => 3,
            EntityKind::Unknown => u8::MAX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Path => "path",
            EntityKind::PredictedPath => "predicted_path",
            EntityKind::ChargerLocation => "charger_location",
            EntityKind::RobotPosition => "robot_position",
            EntityKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(default, rename = "metaData", deserialize_with = "null_as_default")]
    pub metadata: EntityMetadata,
    #[serde(default)]
    pub points: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub angle: Option<f32>,
}

impl Entity {
    pub fn new(kind: EntityKind, points: Vec<i32>) -> Self {
        Self {
            kind,
            metadata: EntityMetadata::default(),
            points: Some(points),
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.metadata.angle = Some(angle);
        self
    }

    /// Millimeter `(x, y)` pairs; a missing array reads as empty.
    pub fn point_pairs(&self) -> Result<impl Iterator<Item = (i32, i32)> + '_, FormatError> {
        let points = self.points.as_deref().unwrap_or(&[]);
        if points.len() % 2 != 0 {
            return Err(FormatError::OddPointCount(points.len()));
        }
        Ok(points.chunks_exact(2).map(|pair| (pair[0], pair[1])))
    }

    /// First point pair, used by robot and charger entities.
    pub fn anchor(&self) -> Result<(i32, i32), FormatError> {
        self.point_pairs()?.next().ok_or(FormatError::MissingPoints)
    }
}
