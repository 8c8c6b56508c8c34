use glam::Vec3;

/// Half-line used for pointer picking.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct Ray {
    pub(in crate::app) origin: Vec3,
    pub(in crate::app) direction: Vec3,
}

impl Ray {
    pub(in crate::app) fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Distance along the ray to the nearest sphere intersection in front of
    /// the origin.
    pub(in crate::app) fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_center = center - self.origin;
        let along = to_center.dot(self.direction);
        let offset_sq = to_center.length_squared() - (along * along);
        let radius_sq = radius * radius;
        if offset_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - offset_sq).sqrt();
        let near = along - half_chord;
        let far = along + half_chord;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Origin inside the sphere; the exit point is still a hit.
            Some(far)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct Sphere {
    pub(in crate::app) center: Vec3,
    pub(in crate::app) radius: f32,
}

impl Sphere {
    /// Signed distance from the sphere surface to a point; negative inside.
    pub(in crate::app) fn distance_to_point(&self, point: Vec3) -> f32 {
        point.distance(self.center) - self.radius
    }

    pub(in crate::app) fn intersects_sphere(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Aabb {
    pub(in crate::app) min: Vec3,
    pub(in crate::app) max: Vec3,
}

impl Aabb {
    pub(in crate::app) fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for point in points {
            min = min.min(point);
            max = max.max(point);
        }
        Self { min, max }
    }

    pub(in crate::app) fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub(in crate::app) fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        let closest = sphere.center.clamp(self.min, self.max);
        closest.distance_squared(sphere.center) <= sphere.radius * sphere.radius
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn ray_hits_sphere_ahead() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = ray.intersect_sphere(vec3(0.0, 0.0, 5.0), 1.0).unwrap();
        assert!((hit - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_offset_sphere() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(ray.intersect_sphere(vec3(3.0, 0.0, 5.0), 1.0).is_none());
    }

    #[test]
    fn ray_ignores_sphere_behind_origin() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(ray.intersect_sphere(vec3(0.0, 0.0, -5.0), 1.0).is_none());
    }

    #[test]
    fn ray_from_inside_sphere_still_hits() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((hit - 2.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_distance_is_signed() {
        let sphere = Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        assert!((sphere.distance_to_point(vec3(3.0, 0.0, 0.0)) - 2.0).abs() < 1e-5);
        assert!(sphere.distance_to_point(vec3(0.5, 0.0, 0.0)) < 0.0);
    }

    #[test]
    fn aabb_sphere_overlap() {
        let aabb = Aabb {
            min: vec3(-1.0, -1.0, -1.0),
            max: vec3(1.0, 1.0, 1.0),
        };
        let touching = Sphere {
            center: vec3(1.5, 0.0, 0.0),
            radius: 0.6,
        };
        let clear = Sphere {
            center: vec3(3.0, 3.0, 3.0),
            radius: 0.5,
        };
        assert!(aabb.intersects_sphere(&touching));
        assert!(!aabb.intersects_sphere(&clear));
    }

    #[test]
    fn aabb_from_points_covers_inputs() {
        let aabb = Aabb::from_points([vec3(-2.0, 1.0, 0.0), vec3(3.0, -1.0, 4.0)]);
        assert!(aabb.contains_point(vec3(0.0, 0.0, 2.0)));
        assert!(!aabb.contains_point(vec3(0.0, 2.0, 0.0)));
    }
}
