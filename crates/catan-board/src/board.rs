//! Board topology: hexes, vertices and edges with stable IDs.
//!
//! This module contains:
//! - Resource and terrain kinds
//! - The layout parameters a board is generated from
//! - The `BoardGraph` handed to renderers and the rules layer
//! - `generate_board`, which turns a layout into a fully connected graph
//!
//! Every corner shared between neighboring hexes becomes a single vertex, and
//! every side shared between two hexes becomes a single edge. IDs (`H0`, `V0`,
//! `E0`, ...) are handed out in discovery order, so the same layout always
//! produces the same graph.

use crate::hex::{corner_offsets, hexes_in_radius, HexCoord, Point};
use crate::ports::Port;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Hex size (center to corner, in pixels) used by the standard board
pub const DEFAULT_HEX_SIZE: f64 = 100.0;

/// Radius of the standard 19-hex board
pub const STANDARD_RADIUS: i32 = 2;

/// Corner positions are snapped to 1/1000th of a pixel before deduplication.
const VERTEX_KEY_SCALE: f64 = 1000.0;

/// Smallest hex size whose corners stay distinct after snapping
const MIN_HEX_SIZE: f64 = 0.01;

/// Resources produced by the land hexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Wood,
    Brick,
    Sheep,
    Wheat,
    Ore,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Brick,
        Resource::Sheep,
        Resource::Wheat,
        Resource::Ore,
    ];
}

/// What a hex is made of. Desert produces nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Wood,
    Brick,
    Sheep,
    Wheat,
    Ore,
    /// Also the fallback for hexes with no assignment
    #[default]
    Desert,
}

impl Terrain {
    /// Get the resource this terrain produces, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Terrain::Wood => Some(Resource::Wood),
            Terrain::Brick => Some(Resource::Brick),
            Terrain::Sheep => Some(Resource::Sheep),
            Terrain::Wheat => Some(Resource::Wheat),
            Terrain::Ore => Some(Resource::Ore),
            Terrain::Desert => None,
        }
    }
}

impl From<Resource> for Terrain {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Wood => Terrain::Wood,
            Resource::Brick => Terrain::Brick,
            Resource::Sheep => Terrain::Sheep,
            Resource::Wheat => Terrain::Wheat,
            Resource::Ore => Terrain::Ore,
        }
    }
}

/// Input to [`generate_board`].
///
/// `resources` and `tokens` are addressed positionally in hex enumeration
/// order (see [`hexes_in_radius`]). Short lists and `null` entries are fine:
/// those hexes become desert with no token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutParams {
    /// Board size class; 2 gives the standard 19-hex board
    pub radius: i32,
    /// Center-to-corner distance in pixels
    pub hex_size: f64,
    /// Terrains; `None` means desert
    pub resources: Vec<Option<Terrain>>,
    /// Dice totals; `None` means no token
    pub tokens: Vec<Option<u8>>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            radius: STANDARD_RADIUS,
            hex_size: DEFAULT_HEX_SIZE,
            resources: Vec::new(),
            tokens: Vec::new(),
        }
    }
}

impl LayoutParams {
    /// Standard radius-2 layout with the given assignments
    pub fn standard(resources: Vec<Terrain>, tokens: Vec<Option<u8>>) -> Self {
        Self {
            resources: resources.into_iter().map(Some).collect(),
            tokens,
            ..Self::default()
        }
    }

    /// Terrain for the hex at `index`, desert when missing
    pub fn resource_at(&self, index: usize) -> Terrain {
        self.resources.get(index).copied().flatten().unwrap_or_default()
    }

    /// `hex_size`, or the default when it is zero, negative, NaN or too small
    /// to keep corners apart
    pub fn effective_hex_size(&self) -> f64 {
        if self.hex_size.is_finite() && self.hex_size >= MIN_HEX_SIZE {
            self.hex_size
        } else {
            DEFAULT_HEX_SIZE
        }
    }

    /// Token for the hex at `index`, 0 when missing
    pub fn token_at(&self, index: usize) -> u8 {
        self.tokens.get(index).copied().flatten().unwrap_or(0)
    }
}

/// A single hex tile on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hex {
    pub id: String,
    pub q: i32,
    pub r: i32,
    /// Pixel position of the hex center
    pub center: Point,
    pub resource: Terrain,
    /// Dice total that triggers production (0 for none)
    pub token: u8,
    /// Corner vertices, starting north and going clockwise
    pub corner_vertex_ids: [String; 6],
}

impl Hex {
    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }

    /// The six sides of this hex as (vertex, next vertex) pairs
    pub fn sides(&self) -> impl Iterator<Item = (&str, &str)> {
        let ids = &self.corner_vertex_ids;
        (0..ids.len()).map(move |i| (ids[i].as_str(), ids[(i + 1) % ids.len()].as_str()))
    }
}

/// A corner point shared by up to 3 hexes (settlement/city spot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub adjacent_hex_ids: Vec<String>,
    pub neighbor_vertex_ids: Vec<String>,
    pub edge_ids: Vec<String>,
}

impl Vertex {
    fn new(id: String, at: Point) -> Self {
        Self {
            id,
            x: at.x,
            y: at.y,
            adjacent_hex_ids: Vec::new(),
            neighbor_vertex_ids: Vec::new(),
            edge_ids: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A side between two vertices (road spot).
///
/// `v_a` is always the lexicographically smaller vertex ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub v_a: String,
    pub v_b: String,
}

impl Edge {
    /// Key of this edge in `BoardGraph::edge_by_vertex_pair`
    pub fn pair_key(&self) -> String {
        pair_key(&self.v_a, &self.v_b)
    }

    /// The endpoint opposite `vertex_id`, if `vertex_id` is an endpoint
    pub fn other_end(&self, vertex_id: &str) -> Option<&str> {
        if self.v_a == vertex_id {
            Some(&self.v_b)
        } else if self.v_b == vertex_id {
            Some(&self.v_a)
        } else {
            None
        }
    }
}

/// Axis-aligned bounding box over all vertex positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Tight bounds over `points`; all zeros when there are none
    pub fn around(points: impl IntoIterator<Item = Point>) -> Self {
        let folded = points.into_iter().fold(
            Bounds {
                min_x: f64::INFINITY,
                min_y: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                max_y: f64::NEG_INFINITY,
            },
            |b, p| Bounds {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        );

        if folded.min_x.is_finite() {
            folded
        } else {
            Bounds::default()
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// The complete board graph.
///
/// Built once by [`generate_board`] and read-only afterwards. Serializes to the
/// JSON shape renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardGraph {
    /// Layout tag, e.g. `standard-radius-2`
    pub layout: String,
    pub hex_size: f64,
    pub hexes: Vec<Hex>,
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    /// Harbors; left empty by `generate_board`
    pub ports: Vec<Port>,
    /// `"<smaller id>|<larger id>"` -> edge ID
    pub edge_by_vertex_pair: BTreeMap<String, String>,
    pub bounds: Bounds,
}

impl BoardGraph {
    /// Check if the board has no hexes at all
    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn hex(&self, id: &str) -> Option<&Hex> {
        self.hexes.iter().find(|h| h.id == id)
    }

    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Hex at an axial coordinate, if it is on the board
    pub fn hex_at_coord(&self, coord: HexCoord) -> Option<&Hex> {
        self.hexes.iter().find(|h| h.coord() == coord)
    }

    /// Hex containing a pixel position (for pointer picking)
    pub fn hex_at(&self, x: f64, y: f64) -> Option<&Hex> {
        if !(self.hex_size.is_finite() && self.hex_size > 0.0) {
            return None;
        }
        self.hex_at_coord(HexCoord::from_pixel(x, y, self.hex_size))
    }

    /// Edge connecting two vertices, in either argument order
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
        let id = self.edge_by_vertex_pair.get(&pair_key(a, b))?;
        self.edge(id)
    }

    /// For every edge, the hexes that have it as a side (1 on the coast, 2 inland)
    pub fn edge_adjacent_hexes(&self) -> HashMap<&str, Vec<&str>> {
        let mut adjacent: HashMap<&str, Vec<&str>> = HashMap::new();
        for hex in &self.hexes {
            for (a, b) in hex.sides() {
                if let Some(edge_id) = self.edge_by_vertex_pair.get(&pair_key(a, b)) {
                    adjacent.entry(edge_id.as_str()).or_default().push(&hex.id);
                }
            }
        }
        adjacent
    }

    /// Hexes that have `edge_id` as a side
    pub fn edge_hex_ids(&self, edge_id: &str) -> Vec<&str> {
        self.edge_adjacent_hexes()
            .remove(edge_id)
            .unwrap_or_default()
    }

    /// Edges on the outer rim of the board, in edge ID order
    pub fn coastal_edges(&self) -> Vec<&Edge> {
        let adjacent = self.edge_adjacent_hexes();
        self.edges
            .iter()
            .filter(|e| adjacent.get(e.id.as_str()).is_some_and(|hexes| hexes.len() == 1))
            .collect()
    }

    /// Pixel position of an edge's midpoint
    pub fn edge_midpoint(&self, edge: &Edge) -> Option<Point> {
        let a = self.vertex(&edge.v_a)?.position();
        let b = self.vertex(&edge.v_b)?.position();
        Some(a.midpoint(&b))
    }
}

/// Canonical lookup key for the pair of vertices `a` and `b`.
///
/// The smaller ID (string order) comes first, so the key does not depend on
/// argument order.
pub fn pair_key(a: &str, b: &str) -> String {
    if a < b {
        format!("{a}|{b}")
    } else {
        format!("{b}|{a}")
    }
}

/// Dedup key for a corner position
fn point_key(p: Point) -> (i64, i64) {
    (
        (p.x * VERTEX_KEY_SCALE).round() as i64,
        (p.y * VERTEX_KEY_SCALE).round() as i64,
    )
}

/// Scratch state for one `generate_board` call
#[derive(Default)]
struct GraphBuilder {
    vertices: Vec<Vertex>,
    vertex_by_key: HashMap<(i64, i64), usize>,
    edges: Vec<Edge>,
    /// Endpoint indices into `vertices`, parallel to `edges`
    edge_ends: Vec<(usize, usize)>,
    edge_by_key: BTreeMap<String, usize>,
}

impl GraphBuilder {
    /// Vertex at `at`, created on first discovery
    fn vertex_at(&mut self, at: Point) -> usize {
        let key = point_key(at);
        if let Some(&idx) = self.vertex_by_key.get(&key) {
            return idx;
        }

        let idx = self.vertices.len();
        self.vertices.push(Vertex::new(format!("V{idx}"), at));
        self.vertex_by_key.insert(key, idx);
        idx
    }

    /// Edge between two vertex indices, created on first discovery
    fn edge_between(&mut self, a: usize, b: usize) -> usize {
        let (a, b) = if self.vertices[a].id < self.vertices[b].id {
            (a, b)
        } else {
            (b, a)
        };
        let key = pair_key(&self.vertices[a].id, &self.vertices[b].id);
        if let Some(&idx) = self.edge_by_key.get(&key) {
            return idx;
        }

        let idx = self.edges.len();
        self.edges.push(Edge {
            id: format!("E{idx}"),
            v_a: self.vertices[a].id.clone(),
            v_b: self.vertices[b].id.clone(),
        });
        self.edge_ends.push((a, b));
        self.edge_by_key.insert(key, idx);
        idx
    }

    fn add_hex(&mut self, index: usize, coord: HexCoord, params: &LayoutParams) -> Hex {
        let id = format!("H{index}");
        let hex_size = params.effective_hex_size();
        let center = coord.to_pixel(hex_size);
        let corners = corner_offsets(hex_size).map(|off| self.vertex_at(center + off));

        for &v in &corners {
            let adjacent = &mut self.vertices[v].adjacent_hex_ids;
            if !adjacent.contains(&id) {
                adjacent.push(id.clone());
            }
        }

        for i in 0..corners.len() {
            self.edge_between(corners[i], corners[(i + 1) % corners.len()]);
        }

        Hex {
            id,
            q: coord.q,
            r: coord.r,
            center,
            resource: params.resource_at(index),
            token: params.token_at(index),
            corner_vertex_ids: corners.map(|v| self.vertices[v].id.clone()),
        }
    }

    /// Fill in neighbor and edge lists on both endpoints of every edge
    fn link_vertices(&mut self) {
        for (edge, &(a, b)) in self.edges.iter().zip(&self.edge_ends) {
            let a_id = self.vertices[a].id.clone();
            let b_id = self.vertices[b].id.clone();
            for (v, other) in [(a, b_id), (b, a_id)] {
                let vertex = &mut self.vertices[v];
                if !vertex.neighbor_vertex_ids.contains(&other) {
                    vertex.neighbor_vertex_ids.push(other);
                }
                if !vertex.edge_ids.contains(&edge.id) {
                    vertex.edge_ids.push(edge.id.clone());
                }
            }
        }
    }
}

/// Build the hex/vertex/edge graph for a layout.
///
/// Never fails: a negative radius gives an empty board, and missing resource
/// or token entries fall back to desert / no token, and an unusable hex size
/// falls back to [`DEFAULT_HEX_SIZE`]. Ports are left empty; see
/// [`crate::ports`].
pub fn generate_board(params: &LayoutParams) -> BoardGraph {
    let mut builder = GraphBuilder::default();

    let hexes: Vec<Hex> = hexes_in_radius(params.radius)
        .into_iter()
        .enumerate()
        .map(|(index, coord)| builder.add_hex(index, coord, params))
        .collect();

    builder.link_vertices();

    let bounds = Bounds::around(builder.vertices.iter().map(Vertex::position));
    let edge_by_vertex_pair = builder
        .edge_by_key
        .into_iter()
        .map(|(key, idx)| (key, builder.edges[idx].id.clone()))
        .collect();

    let graph = BoardGraph {
        layout: format!("standard-radius-{}", params.radius),
        hex_size: params.effective_hex_size(),
        hexes,
        vertices: builder.vertices,
        edges: builder.edges,
        ports: Vec::new(),
        edge_by_vertex_pair,
        bounds,
    };

    debug!(
        layout = %graph.layout,
        hexes = graph.hexes.len(),
        vertices = graph.vertices.len(),
        edges = graph.edges.len(),
        "Generated board graph"
    );

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn board(radius: i32) -> BoardGraph {
        generate_board(&LayoutParams {
            radius,
            ..LayoutParams::default()
        })
    }

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(pair_key("V3", "V1"), "V1|V3");
        assert_eq!(pair_key("V1", "V3"), "V1|V3");
        // String order, not numeric order
        assert_eq!(pair_key("V9", "V10"), "V10|V9");
    }

    #[test]
    fn test_point_key_absorbs_float_drift() {
        let a = Point::new(86.602_540_378_443_86, -50.0);
        let b = Point::new(86.602_540_378_443_87 + 1e-9, -50.000_000_000_1);
        assert_eq!(point_key(a), point_key(b));

        let c = Point::new(86.604, -50.0);
        assert_ne!(point_key(a), point_key(c));
    }

    #[test]
    fn test_single_hex_board() {
        let graph = board(0);

        assert_eq!(graph.hexes.len(), 1);
        assert_eq!(graph.vertices.len(), 6);
        assert_eq!(graph.edges.len(), 6);

        let hex = &graph.hexes[0];
        assert_eq!(hex.id, "H0");
        assert_eq!((hex.q, hex.r), (0, 0));
        assert_eq!(hex.center, Point::new(0.0, 0.0));
        assert_eq!(
            hex.corner_vertex_ids,
            ["V0", "V1", "V2", "V3", "V4", "V5"].map(String::from)
        );

        // Corner 0 is north of the center
        assert_eq!(graph.vertices[0].position(), Point::new(0.0, -100.0));

        for v in &graph.vertices {
            assert_eq!(v.adjacent_hex_ids, vec!["H0".to_string()]);
            assert_eq!(v.neighbor_vertex_ids.len(), 2);
            assert_eq!(v.edge_ids.len(), 2);
        }
    }

    #[test]
    fn test_negative_radius_is_empty() {
        let graph = board(-1);

        assert!(graph.is_empty());
        assert!(graph.vertices.is_empty());
        assert!(graph.edges.is_empty());
        assert!(graph.edge_by_vertex_pair.is_empty());
        assert_eq!(graph.bounds, Bounds::default());
    }

    #[test]
    fn test_edges_are_canonically_ordered() {
        let graph = board(2);
        for edge in &graph.edges {
            assert!(edge.v_a < edge.v_b, "{} is not canonical", edge.id);
            assert_eq!(graph.edge_by_vertex_pair[&edge.pair_key()], edge.id);
        }
    }

    #[test]
    fn test_vertex_adjacent_hexes_have_no_duplicates() {
        let graph = board(2);
        for v in &graph.vertices {
            let unique: HashSet<_> = v.adjacent_hex_ids.iter().collect();
            assert_eq!(unique.len(), v.adjacent_hex_ids.len());
            assert!((1..=3).contains(&v.adjacent_hex_ids.len()));
        }
    }

    #[test]
    fn test_short_assignment_lists_default() {
        let params = LayoutParams::standard(vec![Terrain::Ore, Terrain::Wood], vec![Some(8), None]);
        let graph = generate_board(&params);

        assert_eq!(graph.hexes[0].resource, Terrain::Ore);
        assert_eq!(graph.hexes[0].token, 8);
        assert_eq!(graph.hexes[1].resource, Terrain::Wood);
        assert_eq!(graph.hexes[1].token, 0);
        assert_eq!(graph.hexes[2].resource, Terrain::Desert);
        assert_eq!(graph.hexes[2].token, 0);
    }

    #[test]
    fn test_null_resources_default_to_desert() {
        let params: LayoutParams =
            serde_json::from_str(r#"{ "resources": ["ore", null, "wood"] }"#).unwrap();
        assert_eq!(params.resources, vec![Some(Terrain::Ore), None, Some(Terrain::Wood)]);

        let graph = generate_board(&params);
        assert_eq!(graph.hexes[0].resource, Terrain::Ore);
        assert_eq!(graph.hexes[1].resource, Terrain::Desert);
        assert_eq!(graph.hexes[2].resource, Terrain::Wood);
    }

    #[test]
    fn test_unusable_hex_size_falls_back_to_default() {
        for hex_size in [0.0, -0.0, -25.0, 0.0001, f64::NAN, f64::INFINITY] {
            let graph = generate_board(&LayoutParams {
                radius: 0,
                hex_size,
                ..LayoutParams::default()
            });

            assert_eq!(graph.hex_size, DEFAULT_HEX_SIZE, "hex size {hex_size}");
            assert_eq!(graph.vertices.len(), 6, "hex size {hex_size}");
            assert_eq!(graph.edges.len(), 6, "hex size {hex_size}");

            let corners: HashSet<_> = graph.hexes[0].corner_vertex_ids.iter().collect();
            assert_eq!(corners.len(), 6);
            for edge in &graph.edges {
                assert_ne!(edge.v_a, edge.v_b);
            }
        }

        let tiny = generate_board(&LayoutParams {
            radius: 1,
            hex_size: MIN_HEX_SIZE,
            ..LayoutParams::default()
        });
        assert_eq!(tiny.hex_size, MIN_HEX_SIZE);
        assert_eq!(tiny.vertices.len(), 24);
        assert_eq!(tiny.edges.len(), 30);
    }

    #[test]
    fn test_hex_coord_lookup() {
        let graph = board(1);
        for hex in &graph.hexes {
            assert_eq!(graph.hex_at_coord(hex.coord()).map(|h| h.id.as_str()), Some(hex.id.as_str()));
        }
        assert!(graph.hex_at_coord(HexCoord::new(2, 0)).is_none());
    }

    #[test]
    fn test_edge_between_lookup() {
        let graph = board(0);
        let edge = graph.edge_between("V1", "V0").unwrap();
        assert_eq!(edge.id, "E0");
        assert_eq!(edge.other_end("V0"), Some("V1"));
        assert_eq!(edge.other_end("V4"), None);
        assert!(graph.edge_between("V0", "V3").is_none());
    }

    #[test]
    fn test_coastal_edges() {
        let graph = board(2);
        // 19 hexes * 6 sides = 2 * 42 inland + 30 coastal
        assert_eq!(graph.coastal_edges().len(), 30);

        let single = board(0);
        assert_eq!(single.coastal_edges().len(), 6);
    }

    #[test]
    fn test_hex_at_pixel() {
        let graph = board(2);
        let hex = graph.hex_at(0.0, 0.0).unwrap();
        assert_eq!((hex.q, hex.r), (0, 0));

        let target = &graph.hexes[4];
        let found = graph.hex_at(target.center.x + 10.0, target.center.y - 10.0).unwrap();
        assert_eq!(found.id, target.id);

        assert!(graph.hex_at(5000.0, 5000.0).is_none());
    }

    #[test]
    fn test_terrain_resource() {
        assert_eq!(Terrain::Desert.resource(), None);
        for resource in Resource::ALL {
            assert_eq!(Terrain::from(resource).resource(), Some(resource));
        }
    }

    #[test]
    fn test_bounds_around() {
        let b = Bounds::around([Point::new(1.0, -2.0), Point::new(-3.0, 4.0)]);
        assert_eq!(b.min_x, -3.0);
        assert_eq!(b.max_x, 1.0);
        assert_eq!(b.min_y, -2.0);
        assert_eq!(b.max_y, 4.0);
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 6.0);
        assert_eq!(b.center(), Point::new(-1.0, 1.0));
    }
}
