use glam::Vec3;
use serde::Deserialize;

/// Emotional state attached to a person, rendered as a decorative emoji
/// beside their node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
    Love,
    BigEyes,
}

impl Mood {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Happy => "\u{1F601}",
            Self::Sad => "\u{1F622}",
            Self::Love => "\u{1F60D}",
            Self::BigEyes => "\u{1F603}",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Person {
    pub id: String,
    pub connection_id: i64,
    pub name: String,
    pub tags: Vec<String>,
    pub position: Vec3,
    pub mood: Option<Mood>,
    pub depth: u8,
    pub parent: Option<usize>,
}

impl Person {
    /// Label text shown while the node is hovered.
    pub fn label(&self) -> String {
        format!("{}\n[{}]", self.name, self.tags.join(", "))
    }
}

/// One edge of the flattened network: a tree edge from a person to its
/// parent, or a second-level shortcut back to a first-level person.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relation {
    /// Endpoint closer to the viewer root.
    pub parent: usize,
    pub child: usize,
    pub marker_id: i64,
    pub second_level: bool,
}

#[derive(Clone, Debug)]
pub struct SocialGraph {
    /// Flattened person records; index 0 is the viewer root.
    pub persons: Vec<Person>,
    pub relations: Vec<Relation>,
    pub total_players: usize,
}

impl SocialGraph {
    pub fn root(&self) -> &Person {
        &self.persons[0]
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}
