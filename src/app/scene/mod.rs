use eframe::egui::Color32;
use glam::{Quat, Vec3, vec3};

use crate::social::Mood;

use super::spatial::Aabb;

mod build;

pub(in crate::app) use build::build_scene;
#[cfg(test)]
pub(in crate::app) use build::fixtures;

pub(in crate::app) const NODE_RADIUS: f32 = 0.35;
pub(in crate::app) const EDGE_RADIUS: f32 = 0.035;
pub(in crate::app) const NODE_COLOR: Color32 = Color32::from_rgb(0x00, 0x88, 0xde);

/// Resting edge ramp: pale blue-white fading into blue at the strong end.
pub(in crate::app) const RESTING_GRADIENT: EdgeGradient = EdgeGradient {
    color1: Color32::from_rgb(0xf4, 0xf8, 0xff),
    color2: Color32::from_rgb(0x00, 0x00, 0xff),
};

/// Active edge ramp shown while a hovered node owns the edge.
pub(in crate::app) const ACTIVE_GRADIENT: EdgeGradient = EdgeGradient {
    color1: Color32::from_rgb(0xf4, 0xff, 0xf5),
    color2: Color32::from_rgb(0x00, 0x80, 0x00),
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) struct NodeMaterial {
    pub(in crate::app) color: Color32,
    pub(in crate::app) emissive: Color32,
}

impl NodeMaterial {
    pub(in crate::app) fn resting() -> Self {
        Self {
            color: NODE_COLOR,
            emissive: Color32::BLACK,
        }
    }

    /// Rendered color with the emissive term added on top.
    pub(in crate::app) fn lit(self) -> Color32 {
        Color32::from_rgb(
            self.color.r().saturating_add(self.emissive.r()),
            self.color.g().saturating_add(self.emissive.g()),
            self.color.b().saturating_add(self.emissive.b()),
        )
    }
}

/// Two-color ramp shared by edge markers; `color2` shades the end the marker
/// was aimed at when it was built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) struct EdgeGradient {
    pub(in crate::app) color1: Color32,
    pub(in crate::app) color2: Color32,
}

pub(in crate::app) struct NodeMarker {
    pub(in crate::app) marker_id: i64,
    pub(in crate::app) person: usize,
    pub(in crate::app) position: Vec3,
    pub(in crate::app) material: NodeMaterial,
}

pub(in crate::app) struct EdgeMarker {
    pub(in crate::app) marker_id: i64,
    pub(in crate::app) start: Vec3,
    pub(in crate::app) end: Vec3,
    pub(in crate::app) midpoint: Vec3,
    pub(in crate::app) length: f32,
    pub(in crate::app) rotation: Quat,
    pub(in crate::app) second_level: bool,
    pub(in crate::app) gradient: EdgeGradient,
}

pub(in crate::app) struct LabelMarker {
    pub(in crate::app) person: usize,
    pub(in crate::app) position: Vec3,
    pub(in crate::app) text: String,
}

pub(in crate::app) struct EmojiMarker {
    pub(in crate::app) person: usize,
    pub(in crate::app) position: Vec3,
    pub(in crate::app) mood: Mood,
}

/// Explicit marker collections produced by the graph builder; nothing here
/// is reached through positional indices into a shared tree.
pub(in crate::app) struct SceneGraph {
    pub(in crate::app) nodes: Vec<NodeMarker>,
    pub(in crate::app) edges: Vec<EdgeMarker>,
    pub(in crate::app) labels: Vec<LabelMarker>,
    pub(in crate::app) emojis: Vec<EmojiMarker>,
}

impl SceneGraph {
    pub(in crate::app) fn edge_indices_by_marker_ids(
        &self,
        wanted: &[i64],
    ) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| wanted.contains(&edge.marker_id))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Positions and boxes the per-frame controllers test against; derived once
/// after the scene is built.
pub(in crate::app) struct SpatialIndex {
    pub(in crate::app) node_positions: Vec<Vec3>,
    pub(in crate::app) edge_boxes: Vec<Aabb>,
}

impl SpatialIndex {
    pub(in crate::app) fn build(scene: &SceneGraph) -> Self {
        Self {
            node_positions: scene.nodes.iter().map(|node| node.position).collect(),
            edge_boxes: scene.edges.iter().map(edge_world_aabb).collect(),
        }
    }
}

fn edge_world_aabb(edge: &EdgeMarker) -> Aabb {
    let half = vec3(EDGE_RADIUS, edge.length * 0.5, EDGE_RADIUS);
    Aabb::from_points((0..8).map(|corner| {
        let local = vec3(
            if corner & 1 == 0 { -half.x } else { half.x },
            if corner & 2 == 0 { -half.y } else { half.y },
            if corner & 4 == 0 { -half.z } else { half.z },
        );
        edge.midpoint + (edge.rotation * local)
    }))
}
