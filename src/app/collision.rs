use glam::Vec3;

use super::scene::{NODE_RADIUS, SpatialIndex};
use super::spatial::Sphere;

pub(in crate::app) const CAMERA_SPHERE_RADIUS: f32 = 1.03;
/// Gate before the full sphere pair test; a surface-distance threshold, not
/// the node radius.
pub(in crate::app) const NODE_NEAR_THRESHOLD: f32 = 0.36;

/// Per-frame overlap result between the viewer and the graph geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::app) struct CollisionReport {
    pub(in crate::app) node: bool,
    pub(in crate::app) edge: bool,
}

impl CollisionReport {
    pub(in crate::app) fn any(self) -> bool {
        self.node || self.edge
    }
}

/// Surrounding-volumes test: the viewer's bounding sphere against the
/// nearest node position and every edge box. Runs after the frame's camera
/// translation, so a hit means this frame's step gets undone — one frame of
/// visual interpenetration is expected.
pub(in crate::app) fn check_collision(camera_position: Vec3, index: &SpatialIndex) -> CollisionReport {
    let camera_sphere = Sphere {
        center: camera_position,
        radius: CAMERA_SPHERE_RADIUS,
    };

    let node = index
        .node_positions
        .iter()
        .find(|position| camera_sphere.distance_to_point(**position) < NODE_NEAR_THRESHOLD)
        .is_some_and(|position| {
            camera_sphere.intersects_sphere(&Sphere {
                center: *position,
                radius: NODE_RADIUS,
            })
        });

    let edge = index
        .edge_boxes
        .iter()
        .any(|aabb| aabb.intersects_sphere(&camera_sphere));

    CollisionReport { node, edge }
}
