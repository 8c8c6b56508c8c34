//! Composite connection-id codec.
//!
//! Historical marker-naming scheme carried by the network data: plain ids
//! below 100 name first-level edges directly, while a composite id packs a
//! tree-edge id and a shortcut target into two decimal digits each. Adjacency
//! itself lives in the explicit relation list; this codec only decides what a
//! marker is called and which edges light up when its node is hovered.

/// Ids above this value carry a packed `(first, second)` pair.
pub const COMPOSITE_MIN: i64 = 100;

pub fn is_composite(id: i64) -> bool {
    id > COMPOSITE_MIN
}

/// Packs a first-level id and a second-level index into one marker id.
pub fn encode(first: i64, second: i64) -> i64 {
    first * 10 + second
}

/// Splits a composite marker id back into its `(first, second)` pair.
pub fn decode(id: i64) -> (i64, i64) {
    (id / 10, id % 10)
}

/// Marker id of the shortcut edge leading to the first-level person `target`.
pub fn shortcut_edge_id(target: i64) -> i64 {
    encode(target, 1)
}

/// Edge marker ids owned by a hovered node marker: the edge terminating at
/// the node and, where the id encodes a longer path, the edge continuing
/// toward the viewer root.
///
/// A composite node id resolves to its shortcut pair (the rightmost digit is
/// the closest first-level connection); a two-digit id resolves to its own
/// edge plus the first-level edge it hangs off.
pub fn owned_edge_ids(id: i64) -> (i64, Option<i64>) {
    if is_composite(id) {
        let (_, closest) = decode(id);
        (shortcut_edge_id(closest), Some(closest))
    } else if id > 10 {
        (id, Some(id / 10))
    } else {
        (id, None)
    }
}
