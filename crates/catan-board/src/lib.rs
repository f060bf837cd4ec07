//! Kopiatan board topology - the hex/vertex/edge graph behind the game board
//!
//! This crate turns a hex layout plus per-hex resource and token assignments
//! into a fully connected planar graph:
//! - Hexes with pixel centers and their six corner vertices
//! - Vertices (settlement spots) deduplicated across neighboring hexes
//! - Edges (road spots) with canonical endpoint order and a pair lookup
//! - A bounding box for renderers
//!
//! # Architecture
//!
//! Generation is a pure function of its input. Every call builds fresh lookup
//! tables, so boards for a live game and an idle-screen preview can be built
//! side by side. The result serializes to plain JSON for the TV and phone
//! clients, and can be compiled to WebAssembly for use in the browser.
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates and pixel geometry
//! - [`board`]: Graph types and `generate_board`
//! - [`ports`]: Harbor placement on the coast
//! - [`presets`]: Resource/token assignments for standard boards

pub mod board;
pub mod hex;
pub mod ports;
pub mod presets;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{
    generate_board, pair_key, BoardGraph, Bounds, Edge, Hex, LayoutParams, Resource, Terrain,
    Vertex, DEFAULT_HEX_SIZE, STANDARD_RADIUS,
};
pub use hex::{corner_offsets, hexes_in_radius, HexCoord, Point};
pub use ports::{place_standard_ports, Port, PortKind};
pub use presets::{
    preset_catalog, preset_definition, PresetDefinition, PresetError, PresetId, PresetMeta,
};
