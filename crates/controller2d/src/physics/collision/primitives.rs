//! Primitive collision shapes and intersection algorithms
//!
//! Provides 2D rays, segments and convex polygons with ray intersection
//! tests matching the conventions of a typical 2D physics raycast: a ray that
//! starts inside a solid shape reports a hit at distance zero.

use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::{constants::GEOMETRY_EPSILON, Aabb2, Vec2};
use super::shape::SurfaceKind;

/// A ray in the XY plane
#[derive(Debug, Clone, Copy)]
pub struct Ray2D {
    /// The origin point of the ray in world space
    pub origin: Vec2,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec2,
}

impl Ray2D {
    /// Creates a new ray with the given origin and direction
    ///
    /// A zero direction is kept as-is; such a ray never hits anything.
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        let length = direction.norm();
        let direction = if length > GEOMETRY_EPSILON { direction / length } else { Vec2::zeros() };
        Self { origin, direction }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }

    fn is_degenerate(&self) -> bool {
        self.direction.norm_squared() < GEOMETRY_EPSILON
    }
}

/// Geometric result of a ray/shape intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec2,
    /// The surface normal at the intersection point
    pub normal: Vec2,
}

/// Result of a ray query against the collision world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec2,
    /// The surface normal at the intersection point
    pub normal: Vec2,
    /// Surface behaviour of the collider that was hit
    pub surface: SurfaceKind,
}

impl RayHit {
    /// Attach collider identity to a geometric hit
    pub fn from_shape_hit(collider: ColliderHandle, surface: SurfaceKind, hit: ShapeHit) -> Self {
        Self {
            collider,
            distance: hit.distance,
            point: hit.point,
            normal: hit.normal,
            surface,
        }
    }
}

/// A two-sided line segment (edge collider)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point
    pub a: Vec2,
    /// End point
    pub b: Vec2,
}

impl Segment {
    /// Creates a new segment, or `None` if both ends coincide
    pub fn new(a: Vec2, b: Vec2) -> Option<Self> {
        ((b - a).norm() > GEOMETRY_EPSILON).then_some(Self { a, b })
    }

    /// Bounding box of the segment
    pub fn aabb(&self) -> Aabb2 {
        Aabb2::new(self.a, self.b)
    }

    /// Ray/segment intersection
    ///
    /// The reported normal always faces back toward the ray origin.
    pub fn intersect_ray(&self, ray: &Ray2D, max_distance: f32) -> Option<ShapeHit> {
        if ray.is_degenerate() {
            return None;
        }

        let edge = self.b - self.a;
        let denom = cross(ray.direction, edge);

        // Parallel (or collinear) rays never report a hit
        if denom.abs() < GEOMETRY_EPSILON {
            return None;
        }

        let to_start = self.a - ray.origin;
        let t = cross(to_start, edge) / denom;
        let s = cross(to_start, ray.direction) / denom;

        if t < 0.0 || t > max_distance || !(0.0..=1.0).contains(&s) {
            return None;
        }

        let mut normal = Vec2::new(-edge.y, edge.x).normalize();
        if normal.dot(&ray.direction) > 0.0 {
            normal = -normal;
        }

        Some(ShapeHit {
            distance: t,
            point: ray.point_at(t),
            normal,
        })
    }
}

/// A convex polygon with counter-clockwise winding
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
}

impl ConvexPolygon {
    /// Creates a convex polygon from its vertices
    ///
    /// Clockwise input is reversed. Returns `None` for fewer than three
    /// vertices, zero area, or a non-convex outline.
    pub fn new(vertices: Vec<Vec2>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }

        let area = signed_area(&vertices);
        if area.abs() < GEOMETRY_EPSILON {
            return None;
        }

        let mut vertices = vertices;
        if area < 0.0 {
            vertices.reverse();
        }

        // Every turn must be a left turn (or straight) for a CCW convex outline
        let n = vertices.len();
        let convex = (0..n).all(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];
            cross(b - a, c - b) >= -GEOMETRY_EPSILON
        });

        convex.then_some(Self { vertices })
    }

    /// Creates the polygon covering an axis-aligned box
    pub fn from_aabb(aabb: &Aabb2) -> Self {
        Self {
            vertices: vec![
                aabb.min,
                Vec2::new(aabb.max.x, aabb.min.y),
                aabb.max,
                Vec2::new(aabb.min.x, aabb.max.y),
            ],
        }
    }

    /// Vertices in counter-clockwise order
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Bounding box of the polygon
    pub fn aabb(&self) -> Aabb2 {
        let first = self.vertices[0];
        self.vertices.iter().skip(1).fold(Aabb2::new(first, first), |acc, v| {
            Aabb2::new(
                Vec2::new(acc.min.x.min(v.x), acc.min.y.min(v.y)),
                Vec2::new(acc.max.x.max(v.x), acc.max.y.max(v.y)),
            )
        })
    }

    /// Check whether a point lies inside or on the boundary
    pub fn contains(&self, point: Vec2) -> bool {
        self.edges().all(|(a, b)| cross(b - a, point - a) >= -GEOMETRY_EPSILON)
    }

    /// Cyrus-Beck ray clipping against the polygon's edges
    ///
    /// Returns the entry point and the normal of the entered edge. A ray that
    /// starts inside (or on the boundary) hits at distance zero with the
    /// normal pointing against the ray.
    pub fn intersect_ray(&self, ray: &Ray2D, max_distance: f32) -> Option<ShapeHit> {
        if ray.is_degenerate() {
            return None;
        }

        let mut t_enter = 0.0_f32;
        let mut t_exit = max_distance;
        let mut enter_normal: Option<Vec2> = None;

        for (a, b) in self.edges() {
            let edge = b - a;
            // Outward normal for CCW winding
            let normal = Vec2::new(edge.y, -edge.x).normalize();
            let denom = normal.dot(&ray.direction);
            let num = normal.dot(&(a - ray.origin));

            if denom.abs() < GEOMETRY_EPSILON {
                // Parallel to this edge: outside means a miss
                if num < 0.0 {
                    return None;
                }
                continue;
            }

            let t = num / denom;
            if denom < 0.0 {
                if t > t_enter {
                    t_enter = t;
                    enter_normal = Some(normal);
                }
            } else if t < t_exit {
                t_exit = t;
            }

            if t_enter > t_exit {
                return None;
            }
        }

        match enter_normal {
            Some(normal) => Some(ShapeHit {
                distance: t_enter,
                point: ray.point_at(t_enter),
                normal,
            }),
            // No edge was entered after the origin: the origin is inside
            None => Some(ShapeHit {
                distance: 0.0,
                point: ray.origin,
                normal: -ray.direction,
            }),
        }
    }

    fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// 2D cross product (z component of the 3D cross product)
fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

fn signed_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    (0..n)
        .map(|i| cross(vertices[i], vertices[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}
