//! # Floor-Plan Data Layer
//!
//! Authenticated access to the floor-plan API.
//!
//! ## Overview
//!
//! [`FloorPlanClient`] is the one consumer of the authentication core: every
//! request obtains a token from the
//! [`TokenLifecycleManager`](core_auth::TokenLifecycleManager), attaches it
//! as a bearer credential, and hands a rejected credential straight to the
//! [`SessionGuard`](core_auth::SessionGuard) so the session is reset instead
//! of limping on with a revoked token.
//!
//! ## Features
//!
//! - Floor geometry, seat positions, and map tiles as typed models
//! - Bounded in-memory LRU cache for tile documents
//! - Data lifecycle events on the shared
//!   [`core_runtime::events::EventBus`]

pub mod client;
pub mod error;
pub mod types;

pub use client::FloorPlanClient;
pub use error::{FloorPlanError, Result};
pub use types::{
    Boundary, Coordinate, Dimensions, FloorGraphics, GraphicsLayer, ItemList, Seat,
    SpaceGraphics, TileCoordinates,
};
