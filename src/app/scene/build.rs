use glam::{Quat, Vec3, vec3};

use crate::social::SocialGraph;

use super::{
    EdgeMarker, EmojiMarker, LabelMarker, NodeMarker, NodeMaterial, RESTING_GRADIENT, SceneGraph,
};

const LABEL_OFFSET: Vec3 = vec3(-0.1, 0.55, 0.0);
const EMOJI_OFFSET: Vec3 = vec3(0.5, 0.5, 0.0);

/// Produces one node marker per person, one edge marker per relation, and a
/// label per person (shown only while hovered). Positions come verbatim from
/// the flattened graph.
pub(in crate::app) fn build_scene(graph: &SocialGraph) -> SceneGraph {
    let mut nodes = Vec::with_capacity(graph.persons.len());
    let mut labels = Vec::with_capacity(graph.persons.len());
    let mut emojis = Vec::new();

    for (index, person) in graph.persons.iter().enumerate() {
        nodes.push(NodeMarker {
            marker_id: person.connection_id,
            person: index,
            position: person.position,
            material: NodeMaterial::resting(),
        });
        labels.push(LabelMarker {
            person: index,
            position: person.position + LABEL_OFFSET,
            text: person.label(),
        });
        if let Some(mood) = person.mood {
            emojis.push(EmojiMarker {
                person: index,
                position: person.position + EMOJI_OFFSET,
                mood,
            });
        }
    }

    let edges = graph
        .relations
        .iter()
        .map(|relation| {
            // Tree edges aim at the parent end; shortcuts aim back at the
            // second-level person they branch from.
            let (start, end) = if relation.second_level {
                (
                    graph.persons[relation.child].position,
                    graph.persons[relation.parent].position,
                )
            } else {
                (
                    graph.persons[relation.parent].position,
                    graph.persons[relation.child].position,
                )
            };
            edge_marker(relation.marker_id, start, end, relation.second_level)
        })
        .collect();

    SceneGraph {
        nodes,
        edges,
        labels,
        emojis,
    }
}

fn edge_marker(marker_id: i64, start: Vec3, end: Vec3, second_level: bool) -> EdgeMarker {
    let midpoint = start.lerp(end, 0.5);
    let length = start.distance(end);
    // Cylinder length axis aligned with the span; the gradient's strong end
    // faces `start`.
    let rotation = Quat::from_rotation_arc(Vec3::Y, (start - end).normalize_or_zero());

    EdgeMarker {
        marker_id,
        start,
        end,
        midpoint,
        length,
        rotation,
        second_level,
        gradient: RESTING_GRADIENT,
    }
}

#[cfg(test)]
pub(in crate::app) mod fixtures {
    use glam::vec3;

    use crate::social::{Mood, Person, Relation, SocialGraph};

    /// Four-person slice of the bundled network: the viewer, Ana, her
    /// second-level contact Sergio (with a shortcut to Pedro), and Pedro.
    pub(in crate::app) fn sample_graph() -> SocialGraph {
        let persons = vec![
            Person {
                id: "1".to_owned(),
                connection_id: 1,
                name: "Filipe".to_owned(),
                tags: vec!["porto".to_owned()],
                position: vec3(0.0, 0.0, 0.0),
                mood: Some(Mood::Happy),
                depth: 0,
                parent: None,
            },
            Person {
                id: "3".to_owned(),
                connection_id: 2,
                name: "Ana".to_owned(),
                tags: vec!["Porto".to_owned()],
                position: vec3(1.9, 1.5, 1.2),
                mood: Some(Mood::BigEyes),
                depth: 1,
                parent: Some(0),
            },
            Person {
                id: "31".to_owned(),
                connection_id: 215,
                name: "Sergio".to_owned(),
                tags: vec!["linguas".to_owned()],
                position: vec3(3.5, 0.0, -2.5),
                mood: None,
                depth: 2,
                parent: Some(1),
            },
            Person {
                id: "6".to_owned(),
                connection_id: 5,
                name: "Pedro".to_owned(),
                tags: vec!["jogador".to_owned()],
                position: vec3(1.5, -1.0, -2.0),
                mood: Some(Mood::Sad),
                depth: 1,
                parent: Some(0),
            },
        ];
        let relations = vec![
            Relation {
                parent: 0,
                child: 1,
                marker_id: 2,
                second_level: false,
            },
            Relation {
                parent: 1,
                child: 2,
                marker_id: 21,
                second_level: false,
            },
            Relation {
                parent: 0,
                child: 3,
                marker_id: 5,
                second_level: false,
            },
            Relation {
                parent: 3,
                child: 2,
                marker_id: 51,
                second_level: true,
            },
        ];

        SocialGraph {
            persons,
            relations,
            total_players: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, vec3};

    use crate::app::spatial::Aabb;

    use super::super::SpatialIndex;
    use super::fixtures::sample_graph;
    use super::*;

    #[test]
    fn one_marker_per_person_and_relation() {
        let graph = sample_graph();
        let scene = build_scene(&graph);

        assert_eq!(scene.nodes.len(), graph.person_count());
        assert_eq!(scene.edges.len(), graph.relation_count());
        assert_eq!(scene.labels.len(), graph.person_count());

        let shortcut_count = graph
            .relations
            .iter()
            .filter(|relation| relation.second_level)
            .count();
        assert_eq!(
            scene.edges.len(),
            (graph.person_count() - 1) + shortcut_count
        );
    }

    #[test]
    fn tree_edge_spans_parent_and_child() {
        let scene = build_scene(&sample_graph());
        let ana_edge = scene
            .edges
            .iter()
            .find(|edge| edge.marker_id == 2)
            .unwrap();

        let expected_mid = vec3(0.95, 0.75, 0.6);
        assert!((ana_edge.midpoint - expected_mid).length() < 1e-5);
        assert!((ana_edge.length - vec3(1.9, 1.5, 1.2).length()).abs() < 1e-5);
        assert_eq!(ana_edge.start, Vec3::ZERO);
    }

    #[test]
    fn edge_rotation_aligns_length_axis_with_span() {
        let scene = build_scene(&sample_graph());
        for edge in &scene.edges {
            let axis = edge.rotation * Vec3::Y;
            let span = (edge.start - edge.end).normalize();
            assert!((axis - span).length() < 1e-4, "marker {}", edge.marker_id);
        }
    }

    #[test]
    fn shortcut_edge_aims_at_its_second_level_end() {
        let graph = sample_graph();
        let scene = build_scene(&graph);
        let shortcut = scene
            .edges
            .iter()
            .find(|edge| edge.second_level)
            .unwrap();

        assert_eq!(shortcut.marker_id, 51);
        assert_eq!(shortcut.start, graph.persons[2].position);
        assert_eq!(shortcut.end, graph.persons[3].position);
    }

    #[test]
    fn edge_boxes_cover_both_endpoints() {
        let scene = build_scene(&sample_graph());
        let index = SpatialIndex::build(&scene);

        assert_eq!(index.edge_boxes.len(), scene.edges.len());
        for (edge, aabb) in scene.edges.iter().zip(&index.edge_boxes) {
            assert!(aabb.contains_point(edge.midpoint));
            // Endpoints sit on the box surface up to float noise.
            let grown = Aabb {
                min: aabb.min - Vec3::splat(1e-4),
                max: aabb.max + Vec3::splat(1e-4),
            };
            assert!(grown.contains_point(edge.start));
            assert!(grown.contains_point(edge.end));
        }
    }

    #[test]
    fn emojis_follow_declared_moods() {
        let graph = sample_graph();
        let scene = build_scene(&graph);

        assert_eq!(scene.emojis.len(), 3);
        assert!(scene.emojis.iter().all(|emoji| {
            graph.persons[emoji.person].mood == Some(emoji.mood)
        }));
        let viewer = &scene.emojis[0];
        assert!((viewer.position - vec3(0.5, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn labels_carry_name_and_tags() {
        let scene = build_scene(&sample_graph());
        assert_eq!(scene.labels[1].text, "Ana\n[Porto]");
    }
}
