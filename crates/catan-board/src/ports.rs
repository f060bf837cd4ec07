//! Harbor placement on the coast of a generated board.
//!
//! `generate_board` leaves `ports` empty. The rules layer decides whether a
//! game uses harbors and fills them in with [`place_standard_ports`] (or its own
//! placement) afterwards.

use crate::board::{BoardGraph, Resource};
use serde::{Deserialize, Serialize};

/// Harbor types for maritime trading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    /// 3:1 trade any resource
    Generic,
    Wood,
    Brick,
    Sheep,
    Wheat,
    Ore,
}

impl PortKind {
    /// Port kinds of the base game, in clockwise placement order
    pub const STANDARD: [PortKind; 9] = [
        PortKind::Generic,
        PortKind::Wood,
        PortKind::Generic,
        PortKind::Brick,
        PortKind::Generic,
        PortKind::Sheep,
        PortKind::Generic,
        PortKind::Wheat,
        PortKind::Ore,
    ];

    /// The exchange rate for this harbor
    pub fn ratio(&self) -> u32 {
        match self {
            PortKind::Generic => 3,
            _ => 2,
        }
    }

    /// The resource a 2:1 harbor trades, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            PortKind::Generic => None,
            PortKind::Wood => Some(Resource::Wood),
            PortKind::Brick => Some(Resource::Brick),
            PortKind::Sheep => Some(Resource::Sheep),
            PortKind::Wheat => Some(Resource::Wheat),
            PortKind::Ore => Some(Resource::Ore),
        }
    }
}

/// A harbor docked on one coastal edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub id: String,
    pub kind: PortKind,
    pub ratio: u32,
    pub edge_id: String,
    /// Settlements on either vertex get the trade rate
    pub vertex_ids: [String; 2],
    pub adjacent_hex_id: String,
}

struct CoastalEdge<'a> {
    edge_id: &'a str,
    v_a: &'a str,
    v_b: &'a str,
    hex_id: &'a str,
    angle: f64,
}

/// Spread the nine standard harbors evenly around the coast.
///
/// Coastal edges are walked clockwise by the angle of their midpoint around the
/// board center; port `i` lands on the edge at `(i + 0.5) * step`.
pub fn place_standard_ports(graph: &BoardGraph) -> Vec<Port> {
    let adjacent = graph.edge_adjacent_hexes();
    let center = graph.bounds.center();

    let mut coastal: Vec<CoastalEdge> = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let hexes = adjacent.get(edge.id.as_str())?;
            if hexes.len() != 1 {
                return None;
            }
            let mid = graph.edge_midpoint(edge)?;
            Some(CoastalEdge {
                edge_id: &edge.id,
                v_a: &edge.v_a,
                v_b: &edge.v_b,
                hex_id: hexes[0],
                angle: (mid.y - center.y).atan2(mid.x - center.x),
            })
        })
        .collect();

    coastal.sort_by(|a, b| {
        a.angle
            .total_cmp(&b.angle)
            .then_with(|| a.edge_id.cmp(b.edge_id))
    });

    let port_count = PortKind::STANDARD.len().min(coastal.len());
    if port_count == 0 {
        return Vec::new();
    }
    let step = coastal.len() as f64 / port_count as f64;

    PortKind::STANDARD
        .iter()
        .take(port_count)
        .enumerate()
        .map(|(i, &kind)| {
            let chosen = &coastal[((i as f64 + 0.5) * step).floor() as usize];
            Port {
                id: format!("P{i}"),
                kind,
                ratio: kind.ratio(),
                edge_id: chosen.edge_id.to_string(),
                vertex_ids: [chosen.v_a.to_string(), chosen.v_b.to_string()],
                adjacent_hex_id: chosen.hex_id.to_string(),
            }
        })
        .collect()
}

impl BoardGraph {
    /// This graph with the standard harbors placed
    pub fn with_standard_ports(mut self) -> Self {
        self.ports = place_standard_ports(&self);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{generate_board, LayoutParams};
    use std::collections::HashSet;

    fn standard_graph() -> BoardGraph {
        generate_board(&LayoutParams::default())
    }

    #[test]
    fn test_standard_board_has_9_ports() {
        let ports = place_standard_ports(&standard_graph());
        assert_eq!(ports.len(), 9);

        let generic = ports.iter().filter(|p| p.kind == PortKind::Generic).count();
        assert_eq!(generic, 4, "Should have 4 generic (3:1) ports");

        for resource in Resource::ALL {
            assert!(
                ports.iter().any(|p| p.kind.resource() == Some(resource)),
                "Should have a 2:1 port for {:?}",
                resource
            );
        }
    }

    #[test]
    fn test_ports_are_on_distinct_coastal_edges() {
        let graph = standard_graph();
        let ports = place_standard_ports(&graph);

        let coastal: HashSet<&str> = graph.coastal_edges().into_iter().map(|e| e.id.as_str()).collect();
        let used: HashSet<&str> = ports.iter().map(|p| p.edge_id.as_str()).collect();
        assert_eq!(used.len(), ports.len());

        for port in &ports {
            assert!(coastal.contains(port.edge_id.as_str()));

            let edge = graph.edge(&port.edge_id).unwrap();
            assert_eq!(port.vertex_ids, [edge.v_a.clone(), edge.v_b.clone()]);
            assert_eq!(graph.edge_hex_ids(&port.edge_id), vec![port.adjacent_hex_id.as_str()]);
        }
    }

    #[test]
    fn test_port_ids_and_ratios() {
        let ports = place_standard_ports(&standard_graph());
        for (i, port) in ports.iter().enumerate() {
            assert_eq!(port.id, format!("P{i}"));
            assert_eq!(port.kind, PortKind::STANDARD[i]);
            assert_eq!(port.ratio, port.kind.ratio());
        }
        assert_eq!(PortKind::Generic.ratio(), 3);
        assert_eq!(PortKind::Ore.ratio(), 2);
    }

    #[test]
    fn test_placement_is_deterministic() {
        let a = place_standard_ports(&standard_graph());
        let b = place_standard_ports(&standard_graph());
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_hex_board_gets_six_ports() {
        let graph = generate_board(&LayoutParams {
            radius: 0,
            ..LayoutParams::default()
        })
        .with_standard_ports();
        assert_eq!(graph.ports.len(), 6);
    }

    #[test]
    fn test_empty_board_has_no_ports() {
        let graph = generate_board(&LayoutParams {
            radius: -3,
            ..LayoutParams::default()
        })
        .with_standard_ports();
        assert!(graph.ports.is_empty());
    }
}
