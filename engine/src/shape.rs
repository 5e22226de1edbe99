// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::Vec3;

use crate::error::GjkError;

/// A convex point set that can answer "which of your points lies furthest along `direction`".
///
/// This is the only thing the GJK core needs to know about a shape. Implementations must be
/// pure: the same direction always yields the same point, and queries never mutate the shape.
pub trait SupportMap {
    /// Returns the point of the shape (in the frame the query runs in) with the greatest
    /// dot product against `direction`. `direction` is never zero when called from GJK.
    fn furthest_point(&self, direction: Vec3) -> Vec3;
}

/// Mesh-backed convex hull: a non-empty vertex list plus a position offset that is applied to
/// every vertex at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    vertices: Vec<Vec3>,
    position: Vec3,
}

impl ConvexHull {
    /// Vertices need not be unique or wound in any order, but they are assumed to span a
    /// convex set; interior points are harmless.
    pub fn new(vertices: Vec<Vec3>, position: Vec3) -> Result<Self, GjkError> {
        if vertices.is_empty() {
            return Err(GjkError::InvalidShape(
                "convex hull needs at least one vertex".to_string(),
            ));
        }
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(GjkError::InvalidShape(format!(
                "vertex {index} is not finite: {}",
                vertices[index]
            )));
        }
        if !position.is_finite() {
            return Err(GjkError::InvalidShape(format!(
                "position is not finite: {position}"
            )));
        }

        Ok(Self { vertices, position })
    }

    /// Builds a hull from a flat `x, y, z, x, y, z, ...` buffer, e.g. a mesh position attribute.
    pub fn from_positions(positions: &[f32], position: Vec3) -> Result<Self, GjkError> {
        if positions.len() % 3 != 0 {
            return Err(GjkError::InvalidShape(format!(
                "position buffer length {} is not a multiple of 3",
                positions.len()
            )));
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        Self::new(vertices, position)
    }

    /// Axis-aligned box with the given half extents, centered on `position`.
    pub fn cuboid(half_extents: Vec3, position: Vec3) -> Result<Self, GjkError> {
        let h = half_extents.abs();
        let vertices = (0..8)
            .map(|i| {
                Vec3::new(
                    if i & 1 == 0 { -h.x } else { h.x },
                    if i & 2 == 0 { -h.y } else { h.y },
                    if i & 4 == 0 { -h.z } else { h.z },
                )
            })
            .collect();
        Self::new(vertices, position)
    }

    pub fn cube(size: f32, position: Vec3) -> Result<Self, GjkError> {
        Self::cuboid(Vec3::splat(size * 0.5), position)
    }

    pub fn point(point: Vec3) -> Result<Self, GjkError> {
        Self::new(vec![Vec3::ZERO], point)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            vertices: self.vertices.clone(),
            position: self.position + offset,
        }
    }
}

impl SupportMap for ConvexHull {
    fn furthest_point(&self, direction: Vec3) -> Vec3 {
        // The offset shifts every projection by the same amount, so the maximizing vertex
        // can be picked in local space.
        let mut furthest = self.vertices[0];
        let mut max_distance = furthest.dot(direction);
        for &vertex in &self.vertices[1..] {
            let distance = vertex.dot(direction);
            if distance > max_distance {
                max_distance = distance;
                furthest = vertex;
            }
        }
        furthest + self.position
    }
}

/// Analytic sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub center: Vec3,
    pub radius: f32,
}

impl Ball {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }
}

impl SupportMap for Ball {
    fn furthest_point(&self, direction: Vec3) -> Vec3 {
        self.center + direction.normalize_or_zero() * self.radius
    }
}
