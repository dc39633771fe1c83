//! Wire models for the floor-plan API
//!
//! Field names follow the API's camelCase JSON; numeric coordinates are kept
//! as `f64` because floor geometry is measured in drawing units, not pixels.

use serde::{Deserialize, Serialize};

/// A point in floor coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// A closed outline, ordered vertex list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub points: Vec<Coordinate>,
}

/// Width and height of the floor drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Outline geometry for one selectable space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceGraphics {
    pub id: String,
    pub boundaries: Vec<Boundary>,
}

/// A rendered drawing layer, wire-encoded as an integer
///
/// The API both lists the layers available for a floor (in
/// [`FloorGraphics::graphics_layers`]) and takes the layer number as a tile
/// request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GraphicsLayer {
    Architect,
    Furniture,
}

impl From<GraphicsLayer> for u8 {
    fn from(layer: GraphicsLayer) -> Self {
        match layer {
            GraphicsLayer::Architect => 0,
            GraphicsLayer::Furniture => 1,
        }
    }
}

impl TryFrom<u8> for GraphicsLayer {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(GraphicsLayer::Architect),
            1 => Ok(GraphicsLayer::Furniture),
            other => Err(format!("Unknown graphics layer: {}", other)),
        }
    }
}

/// Complete renderable geometry for one floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorGraphics {
    pub dimensions: Dimensions,
    pub graphics_layers: Vec<GraphicsLayer>,
    pub space_graphics: Vec<SpaceGraphics>,
    /// Drawing units per meter
    pub scale: f64,
}

/// A bookable seat position on a floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

/// The API's list envelope: `{ "items": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

/// Tile address within a layer's quad tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoordinates {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}
