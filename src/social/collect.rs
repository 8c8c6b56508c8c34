use std::fs;

use anyhow::{Context, Result, anyhow};
use glam::Vec3;

use super::graph::{Person, Relation, SocialGraph};
use super::ids;
use super::parse::{RawNetwork, parse_network_json};

/// Reads, parses, and flattens a network file into a [`SocialGraph`].
pub fn collect_social_graph(network_path: &str) -> Result<SocialGraph> {
    let raw_text = fs::read_to_string(network_path)
        .with_context(|| format!("failed to read network file {network_path}"))?;
    let raw = parse_network_json(&raw_text)
        .with_context(|| format!("failed to parse network file {network_path}"))?;
    build_graph(raw)
}

/// Flattens the nested record into person and relation lists. The viewer
/// root always sits at the local origin; every other position is taken
/// verbatim from the data.
pub(super) fn build_graph(raw: RawNetwork) -> Result<SocialGraph> {
    let mut persons = Vec::new();
    let mut relations = Vec::new();
    let mut pending_shortcuts = Vec::new();

    persons.push(Person {
        id: raw.id,
        connection_id: raw.connection_id,
        name: raw.name,
        tags: raw.tags.into_vec(),
        position: Vec3::ZERO,
        mood: raw.mood,
        depth: 0,
        parent: None,
    });

    for connection in raw.connections {
        let parent_index = persons.len();
        persons.push(Person {
            id: connection.id,
            connection_id: connection.connection_id,
            name: connection.name,
            tags: connection.tags.into_vec(),
            position: Vec3::from_array(connection.position),
            mood: connection.mood,
            depth: 1,
            parent: Some(0),
        });
        relations.push(Relation {
            parent: 0,
            child: parent_index,
            marker_id: connection.connection_id,
            second_level: false,
        });

        for first in connection.first_connections {
            let child_index = persons.len();
            let marker_id = if ids::is_composite(first.connection_id) {
                ids::decode(first.connection_id).0
            } else {
                first.connection_id
            };

            if let Some(target) = first.second_connections.target() {
                pending_shortcuts.push((child_index, target, first.name.clone()));
            }

            persons.push(Person {
                id: first.id,
                connection_id: first.connection_id,
                name: first.name,
                tags: first.tags.into_vec(),
                position: Vec3::from_array(first.position),
                mood: first.mood,
                depth: 2,
                parent: Some(parent_index),
            });
            relations.push(Relation {
                parent: parent_index,
                child: child_index,
                marker_id,
                second_level: false,
            });
        }
    }

    for (child, target, child_name) in pending_shortcuts {
        let parent = persons
            .iter()
            .position(|person| person.depth == 1 && person.connection_id == target)
            .ok_or_else(|| {
                anyhow!(
                    "second connection {target} of {child_name} does not resolve to any first-level person"
                )
            })?;
        relations.push(Relation {
            parent,
            child,
            marker_id: ids::shortcut_edge_id(target),
            second_level: true,
        });
    }

    let total_players = raw.total_players.unwrap_or(persons.len());

    Ok(SocialGraph {
        persons,
        relations,
        total_players,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> RawNetwork {
        parse_network_json(
            r#"{
                "id": "1", "connectionId": 1, "name": "Filipe",
                "tags": ["porto"], "position": [0.5, 0.5, 0.5],
                "totalPlayers": 4,
                "connections": [
                    {
                        "id": "3", "connectionId": 2, "name": "Ana",
                        "tags": "Porto", "position": [1.9, 1.5, 1.2],
                        "firstConnections": [{
                            "id": "31", "connectionId": 215, "name": "Sergio",
                            "tags": ["linguas"], "position": [3.5, 0.0, -2.5],
                            "secondConnections": 5
                        }]
                    },
                    {
                        "id": "6", "connectionId": 5, "name": "Pedro",
                        "tags": ["jogador"], "position": [1.5, -1.0, -2.0],
                        "firstConnections": []
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn flattens_tree_and_shortcut() {
        let graph = build_graph(fixture()).unwrap();

        assert_eq!(graph.person_count(), 4);
        // One tree edge per non-root person plus the shortcut.
        assert_eq!(graph.relation_count(), 4);
        assert_eq!(graph.total_players, 4);

        let shortcut = graph
            .relations
            .iter()
            .find(|relation| relation.second_level)
            .unwrap();
        assert_eq!(shortcut.marker_id, 51);
        assert_eq!(graph.persons[shortcut.parent].name, "Pedro");
        assert_eq!(graph.persons[shortcut.child].name, "Sergio");
    }

    #[test]
    fn root_sits_at_origin() {
        // The data's root position is ignored; the viewer anchors the scene.
        let graph = build_graph(fixture()).unwrap();
        assert_eq!(graph.root().position, Vec3::ZERO);
    }

    #[test]
    fn composite_child_takes_tree_edge_name() {
        let graph = build_graph(fixture()).unwrap();
        let sergio = graph
            .persons
            .iter()
            .position(|person| person.name == "Sergio")
            .unwrap();
        let tree_edge = graph
            .relations
            .iter()
            .find(|relation| relation.child == sergio && !relation.second_level)
            .unwrap();
        assert_eq!(tree_edge.marker_id, 21);
    }

    #[test]
    fn unresolved_shortcut_is_an_error() {
        let mut raw = fixture();
        raw.connections.retain(|connection| connection.name != "Pedro");
        let error = build_graph(raw).unwrap_err();
        assert!(error.to_string().contains("second connection 5 of Sergio"));
    }

    #[test]
    fn bundled_network_flattens_completely() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/networks/loquitas.json");
        let graph = collect_social_graph(path).unwrap();

        assert_eq!(graph.root().name, "Filipe");
        assert_eq!(graph.person_count(), 14);
        assert_eq!(graph.total_players, 14);
        // Thirteen tree edges plus the two shortcut back-references.
        assert_eq!(graph.relation_count(), 15);

        let shortcut_ids = graph
            .relations
            .iter()
            .filter(|relation| relation.second_level)
            .map(|relation| relation.marker_id)
            .collect::<Vec<_>>();
        assert_eq!(shortcut_ids, vec![51, 61]);
    }

    #[test]
    fn missing_network_file_is_reported() {
        let error = collect_social_graph("networks/no-such.json").unwrap_err();
        assert!(error.to_string().contains("failed to read network file"));
    }

    #[test]
    fn parents_form_a_tree() {
        let graph = build_graph(fixture()).unwrap();
        for (index, person) in graph.persons.iter().enumerate() {
            match person.depth {
                0 => assert!(person.parent.is_none()),
                _ => {
                    let parent = person.parent.unwrap();
                    assert!(parent < index);
                    assert_eq!(graph.persons[parent].depth, person.depth - 1);
                }
            }
        }
    }
}
