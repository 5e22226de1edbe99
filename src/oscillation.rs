// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use std::f64::consts::PI;

use glam::Vec3;
use hullcheck_engine::{ConvexHull, GjkError};

use crate::settings::SceneSettings;

/// Two cubes swinging along x in antiphase, so they meet at the origin twice per period.
#[derive(Debug, Clone)]
pub struct OscillatingPair {
    amplitude: f32,
    frequency: f64,
    first: ConvexHull,
    second: ConvexHull,
}

impl OscillatingPair {
    pub fn new(settings: &SceneSettings) -> Result<Self, GjkError> {
        let mut pair = Self {
            amplitude: settings.amplitude,
            frequency: settings.frequency,
            first: ConvexHull::cube(settings.cube_size, Vec3::ZERO)?,
            second: ConvexHull::cube(settings.cube_size, Vec3::ZERO)?,
        };
        pair.advance_to(0.0);
        Ok(pair)
    }

    /// x offsets of both cubes at `time_ms`.
    pub fn displacements(&self, time_ms: f64) -> (f32, f32) {
        let phase = time_ms * self.frequency;
        let amplitude = self.amplitude as f64;
        (
            (phase.sin() * amplitude) as f32,
            ((phase + PI).sin() * amplitude) as f32,
        )
    }

    pub fn advance_to(&mut self, time_ms: f64) {
        let (x1, x2) = self.displacements(time_ms);
        self.first.set_position(Vec3::new(x1, 0.0, 0.0));
        self.second.set_position(Vec3::new(x2, 0.0, 0.0));
    }

    pub fn shapes(&self) -> (&ConvexHull, &ConvexHull) {
        (&self.first, &self.second)
    }
}
