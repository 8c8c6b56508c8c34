mod collect;
mod graph;
pub mod ids;
mod parse;

pub use collect::collect_social_graph;
pub use graph::{Mood, Person, Relation, SocialGraph};
