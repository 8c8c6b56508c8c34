use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use super::graph::Mood;

/// Nested person record as it appears in the network file. The format is
/// tolerant in two places the data actually exercises: `tags` may be a single
/// string or a list, and `secondConnections` may be an integer target or an
/// empty list.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawNetwork {
    pub(super) id: String,
    pub(super) connection_id: i64,
    pub(super) name: String,
    #[serde(default)]
    pub(super) tags: RawTags,
    pub(super) position: [f32; 3],
    #[serde(default)]
    pub(super) mood: Option<Mood>,
    #[serde(default)]
    pub(super) total_players: Option<usize>,
    #[serde(default)]
    pub(super) connections: Vec<RawConnection>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawConnection {
    pub(super) id: String,
    pub(super) connection_id: i64,
    pub(super) name: String,
    #[serde(default)]
    pub(super) tags: RawTags,
    pub(super) position: [f32; 3],
    #[serde(default)]
    pub(super) mood: Option<Mood>,
    #[serde(default)]
    pub(super) first_connections: Vec<RawFirstConnection>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawFirstConnection {
    pub(super) id: String,
    pub(super) connection_id: i64,
    pub(super) name: String,
    #[serde(default)]
    pub(super) tags: RawTags,
    pub(super) position: [f32; 3],
    #[serde(default)]
    pub(super) mood: Option<Mood>,
    #[serde(default)]
    pub(super) second_connections: RawSecondConnections,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(untagged)]
pub(super) enum RawTags {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl RawTags {
    pub(super) fn into_vec(self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::One(tag) => vec![tag],
            Self::Many(tags) => tags,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(untagged)]
pub(super) enum RawSecondConnections {
    #[default]
    None,
    Target(i64),
    Empty(Vec<Value>),
}

impl RawSecondConnections {
    pub(super) fn target(&self) -> Option<i64> {
        match self {
            Self::Target(target) => Some(*target),
            Self::None | Self::Empty(_) => None,
        }
    }
}

pub(super) fn parse_network_json(raw: &str) -> Result<RawNetwork> {
    serde_json::from_str(raw).context("invalid network JSON")
}
