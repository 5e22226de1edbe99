// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    closest::closest_feature,
    error::GjkError,
    evolution::{DIRECTION_EPSILON, evolve},
    shape::SupportMap,
    simplex::Simplex,
    support::support,
};

pub const DEFAULT_MAX_ITERATIONS: usize = 64;

/// How many accepted support points the driver remembers to spot a cycle.
const RECENT_POINTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GjkConfig {
    /// Iterations allowed before a query is reported as [`GjkError::NonTermination`].
    pub max_iterations: usize,
    /// First search direction. A zero vector is replaced by +X.
    pub initial_direction: Vec3,
}

impl Default for GjkConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_direction: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GjkOutcome {
    pub intersecting: bool,
    /// Support points accepted into the simplex after the seed point.
    pub iterations: usize,
    /// Simplex at termination. Encloses (or touches) the origin when `intersecting`.
    pub simplex: Simplex,
}

impl GjkOutcome {
    fn finished(intersecting: bool, iterations: usize, simplex: Simplex) -> Self {
        Self {
            intersecting,
            iterations,
            simplex,
        }
    }
}

/// Ring buffer of the last few support points accepted by one query.
#[derive(Debug, Default)]
struct RecentPoints {
    points: [Vec3; RECENT_POINTS],
    len: usize,
    next: usize,
}

impl RecentPoints {
    fn contains(&self, point: Vec3) -> bool {
        self.points[..self.len].contains(&point)
    }

    fn push(&mut self, point: Vec3) {
        self.points[self.next] = point;
        self.next = (self.next + 1) % RECENT_POINTS;
        self.len = (self.len + 1).min(RECENT_POINTS);
    }
}

/// Returns whether the convex shapes `a` and `b` overlap. Touching counts as overlapping.
pub fn intersects<A, B>(a: &A, b: &B) -> Result<bool, GjkError>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    gjk_query(a, b, &GjkConfig::default()).map(|outcome| outcome.intersecting)
}

/// Runs one query. The simplex is evolved with the region tests of [`evolve`] until a
/// support point repeats; from then on each step keeps only the feature nearest the origin
/// (see [`closest_feature`]), which cannot cycle.
pub fn gjk_query<A, B>(a: &A, b: &B, config: &GjkConfig) -> Result<GjkOutcome, GjkError>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let initial_direction = if config.initial_direction == Vec3::ZERO {
        Vec3::X
    } else {
        config.initial_direction
    };

    let mut simplex = Simplex::new();
    let seed = support(a, b, initial_direction);
    if !seed.is_finite() {
        return Err(GjkError::InvalidShape(format!(
            "support point is not finite: {seed}"
        )));
    }
    simplex.push_front(seed);
    if seed == Vec3::ZERO {
        log::trace!("gjk: seed support point is the origin");
        return Ok(GjkOutcome::finished(true, 0, simplex));
    }

    let mut direction = (-seed).normalize();
    let mut recent = RecentPoints::default();
    recent.push(seed);
    let mut nearest_feature_mode = false;

    for iteration in 0..config.max_iterations {
        let point = support(a, b, direction);

        if point == Vec3::ZERO {
            // The origin is itself a point of the Minkowski difference.
            log::trace!("gjk: origin reached as a support point after {iteration} iterations");
            simplex.push_front(point);
            return Ok(GjkOutcome::finished(true, iteration + 1, simplex));
        }

        if point.dot(direction) <= 0.0 {
            log::trace!("gjk: separating direction {direction} after {iteration} iterations");
            return Ok(GjkOutcome::finished(false, iteration, simplex));
        }

        let repeated = simplex.points().contains(&point);
        if nearest_feature_mode && repeated {
            // The nearest feature is already final and the origin is not on it.
            log::trace!("gjk: no progress past nearest feature after {iteration} iterations");
            return Ok(GjkOutcome::finished(false, iteration, simplex));
        }
        if !nearest_feature_mode && (repeated || recent.contains(point)) {
            log::debug!(
                "gjk: support point {point} repeated after {iteration} iterations, \
                 switching to nearest-feature reduction"
            );
            nearest_feature_mode = true;
        }
        recent.push(point);
        if !repeated {
            simplex.push_front(point);
        }

        if !nearest_feature_mode {
            if evolve(&mut simplex, &mut direction) {
                log::trace!("gjk: origin enclosed after {} iterations", iteration + 1);
                return Ok(GjkOutcome::finished(true, iteration + 1, simplex));
            }
            continue;
        }

        match closest_feature(&mut simplex) {
            None => {
                log::trace!("gjk: origin enclosed after {} iterations", iteration + 1);
                return Ok(GjkOutcome::finished(true, iteration + 1, simplex));
            }
            Some(closest) => {
                let scale = simplex
                    .points()
                    .iter()
                    .map(|p| p.length())
                    .fold(0.0, f32::max);
                if closest.length() <= DIRECTION_EPSILON * scale {
                    log::trace!("gjk: origin on simplex after {} iterations", iteration + 1);
                    return Ok(GjkOutcome::finished(true, iteration + 1, simplex));
                }
                direction = (-closest).normalize();
            }
        }
    }

    Err(GjkError::NonTermination {
        iterations: config.max_iterations,
    })
}
