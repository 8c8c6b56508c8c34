use crate::social::ids;

use super::scene::{ACTIVE_GRADIENT, NODE_RADIUS, NodeMaterial, RESTING_GRADIENT, SceneGraph};
use super::spatial::Ray;

/// Hover state machine: at most one highlighted node marker plus the edge
/// markers it owns. The marker's original material is kept aside while the
/// emissive clone is installed, so leaving restores it exactly.
#[derive(Default)]
pub(in crate::app) struct Picker {
    hovered: Option<usize>,
    saved_material: Option<NodeMaterial>,
    active_edges: Vec<usize>,
}

impl Picker {
    pub(in crate::app) fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Runs one picking pass. `None` means the pointer is off the viewport
    /// or picking is disabled for the active camera.
    pub(in crate::app) fn update(&mut self, ray: Option<&Ray>, scene: &mut SceneGraph) {
        match ray.and_then(|ray| nearest_node(ray, scene)) {
            // Hovering the same marker again changes nothing.
            Some(index) if self.hovered == Some(index) => {}
            Some(index) => {
                // Previous node and edges go back to resting before anything
                // new lights up, so an active ramp never leaks across edges.
                self.clear(scene);

                let marker_id = scene.nodes[index].marker_id;
                let node = &mut scene.nodes[index];
                self.saved_material = Some(node.material);
                let mut highlighted = node.material;
                highlighted.emissive = highlighted.color;
                node.material = highlighted;
                self.hovered = Some(index);

                let (primary, closest) = ids::owned_edge_ids(marker_id);
                let mut wanted = vec![primary];
                if let Some(closest) = closest {
                    wanted.push(closest);
                }
                self.active_edges = scene.edge_indices_by_marker_ids(&wanted);
                for &edge in &self.active_edges {
                    scene.edges[edge].gradient = ACTIVE_GRADIENT;
                }
            }
            None => self.clear(scene),
        }
    }

    fn clear(&mut self, scene: &mut SceneGraph) {
        if let (Some(index), Some(material)) = (self.hovered.take(), self.saved_material.take()) {
            scene.nodes[index].material = material;
        }
        for edge in self.active_edges.drain(..) {
            scene.edges[edge].gradient = RESTING_GRADIENT;
        }
    }
}

fn nearest_node(ray: &Ray, scene: &SceneGraph) -> Option<usize> {
    scene
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            ray.intersect_sphere(node.position, NODE_RADIUS)
                .map(|distance| (index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, vec3};

    use super::super::scene::{NODE_COLOR, build_scene, fixtures::sample_graph};
    use super::*;

    fn ray_at(target: Vec3) -> Ray {
        Ray::new(target + vec3(0.0, 0.0, 10.0), vec3(0.0, 0.0, -1.0))
    }

    fn scene_with_index() -> (SceneGraph, usize, usize) {
        let graph = sample_graph();
        let scene = build_scene(&graph);
        let ana = scene.nodes.iter().position(|node| node.marker_id == 2).unwrap();
        let sergio = scene
            .nodes
            .iter()
            .position(|node| node.marker_id == 215)
            .unwrap();
        (scene, ana, sergio)
    }

    #[test]
    fn hover_installs_emissive_clone() {
        let (mut scene, ana, _) = scene_with_index();
        let mut picker = Picker::default();

        picker.update(Some(&ray_at(scene.nodes[ana].position)), &mut scene);

        assert_eq!(picker.hovered(), Some(ana));
        assert_eq!(scene.nodes[ana].material.emissive, NODE_COLOR);
        assert_eq!(scene.nodes[ana].material.color, NODE_COLOR);
    }

    #[test]
    fn hover_lights_owned_edge() {
        let (mut scene, ana, _) = scene_with_index();
        let mut picker = Picker::default();

        picker.update(Some(&ray_at(scene.nodes[ana].position)), &mut scene);

        for edge in &scene.edges {
            let expected = if edge.marker_id == 2 {
                ACTIVE_GRADIENT
            } else {
                RESTING_GRADIENT
            };
            assert_eq!(edge.gradient, expected, "marker {}", edge.marker_id);
        }
    }

    #[test]
    fn composite_hover_lights_shortest_path_pair() {
        let (mut scene, _, sergio) = scene_with_index();
        let mut picker = Picker::default();

        picker.update(Some(&ray_at(scene.nodes[sergio].position)), &mut scene);

        for edge in &scene.edges {
            let expected = if edge.marker_id == 51 || edge.marker_id == 5 {
                ACTIVE_GRADIENT
            } else {
                RESTING_GRADIENT
            };
            assert_eq!(edge.gradient, expected, "marker {}", edge.marker_id);
        }
        // The tree edge into the composite node stays resting.
        let tree = scene.edges.iter().find(|edge| edge.marker_id == 21).unwrap();
        assert_eq!(tree.gradient, RESTING_GRADIENT);
    }

    #[test]
    fn leaving_restores_material_exactly() {
        let (mut scene, ana, _) = scene_with_index();
        let original = scene.nodes[ana].material;
        let mut picker = Picker::default();

        picker.update(Some(&ray_at(scene.nodes[ana].position)), &mut scene);
        assert_ne!(scene.nodes[ana].material, original);

        picker.update(None, &mut scene);
        assert_eq!(picker.hovered(), None);
        assert_eq!(scene.nodes[ana].material, original);
        assert!(scene.edges.iter().all(|edge| edge.gradient == RESTING_GRADIENT));
    }

    #[test]
    fn repeated_hover_is_idempotent() {
        let (mut scene, ana, _) = scene_with_index();
        let original = scene.nodes[ana].material;
        let mut picker = Picker::default();
        let ray = ray_at(scene.nodes[ana].position);

        picker.update(Some(&ray), &mut scene);
        let highlighted = scene.nodes[ana].material;
        picker.update(Some(&ray), &mut scene);

        // No second clone happened: the installed material is unchanged and
        // the saved original still round-trips.
        assert_eq!(scene.nodes[ana].material, highlighted);
        picker.update(None, &mut scene);
        assert_eq!(scene.nodes[ana].material, original);
    }

    #[test]
    fn switching_hover_restores_previous_target_first() {
        let (mut scene, ana, sergio) = scene_with_index();
        let original = scene.nodes[ana].material;
        let mut picker = Picker::default();

        picker.update(Some(&ray_at(scene.nodes[ana].position)), &mut scene);
        picker.update(Some(&ray_at(scene.nodes[sergio].position)), &mut scene);

        assert_eq!(picker.hovered(), Some(sergio));
        assert_eq!(scene.nodes[ana].material, original);
        let ana_edge = scene.edges.iter().find(|edge| edge.marker_id == 2).unwrap();
        assert_eq!(ana_edge.gradient, RESTING_GRADIENT);
        let shortcut = scene.edges.iter().find(|edge| edge.marker_id == 51).unwrap();
        assert_eq!(shortcut.gradient, ACTIVE_GRADIENT);
    }

    #[test]
    fn nearest_of_stacked_nodes_wins() {
        let (mut scene, ana, _) = scene_with_index();
        // Two markers along the same ray; the closer one is picked.
        let behind = scene.nodes[ana].position + vec3(0.0, 0.0, -4.0);
        scene.nodes[0].position = behind;
        let mut picker = Picker::default();

        picker.update(Some(&ray_at(scene.nodes[ana].position)), &mut scene);
        assert_eq!(picker.hovered(), Some(ana));
    }
}
