// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use std::ops::Index;

use glam::Vec3;

pub const MAX_SIMPLEX_POINTS: usize = 4;

/// Up to four Minkowski-difference points, newest first.
///
/// Backed by a fixed array so the GJK loop never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Simplex {
    points: [Vec3; MAX_SIMPLEX_POINTS],
    len: usize,
}

impl Simplex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `point` at index 0. When already full, the oldest point falls off the end.
    pub fn push_front(&mut self, point: Vec3) {
        self.points.copy_within(0..MAX_SIMPLEX_POINTS - 1, 1);
        self.points[0] = point;
        self.len = (self.len + 1).min(MAX_SIMPLEX_POINTS);
    }

    /// Replaces the active points wholesale, keeping the given order.
    ///
    /// Panics if `points` is empty or holds more than four points.
    pub fn set_points(&mut self, points: &[Vec3]) {
        assert!(
            (1..=MAX_SIMPLEX_POINTS).contains(&points.len()),
            "a simplex holds 1 to {MAX_SIMPLEX_POINTS} points, got {}",
            points.len()
        );
        self.points[..points.len()].copy_from_slice(points);
        self.len = points.len();
    }

    pub fn get(&self, index: usize) -> Vec3 {
        self[index]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points[..self.len]
    }
}

impl Index<usize> for Simplex {
    type Output = Vec3;

    fn index(&self, index: usize) -> &Vec3 {
        &self.points()[index]
    }
}
