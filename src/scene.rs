// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use hullcheck_engine::{GjkError, gjk_query};
use thiserror::Error;

use crate::{
    contact_monitor::{ContactEventType, ContactMonitor},
    oscillation::OscillatingPair,
    settings::{Settings, SettingsError},
};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Settings Error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Shape Error: {0}")]
    Shape(#[from] GjkError),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SceneSummary {
    pub frames: u32,
    pub frames_touching: u32,
    pub contacts_entered: u32,
    pub contacts_exited: u32,
    pub indeterminate_frames: u32,
}

/// Steps the oscillating pair frame by frame, querying GJK on each snapshot.
pub fn run_scene(settings: &Settings) -> Result<SceneSummary, SceneError> {
    let scene = &settings.scene;
    let mut pair = OscillatingPair::new(scene)?;
    let mut monitor = ContactMonitor::default();
    let mut summary = SceneSummary::default();

    for frame in 0..scene.frame_count {
        let time_ms = frame as f64 * scene.frame_interval_ms as f64;
        pair.advance_to(time_ms);

        let (first, second) = pair.shapes();
        let result = gjk_query(first, second, &settings.gjk).map(|outcome| {
            log::debug!(
                "frame {frame}: x = ({:.3}, {:.3}), intersecting = {}, iterations = {}",
                first.position().x,
                second.position().x,
                outcome.intersecting,
                outcome.iterations
            );
            outcome.intersecting
        });
        if result.is_err() {
            summary.indeterminate_frames += 1;
        }

        match monitor.observe(&result) {
            Some(ContactEventType::Enter) => {
                summary.contacts_entered += 1;
                log::info!(
                    "beep! contact at {:.0} ms, highlight #{:06x}",
                    time_ms,
                    monitor.highlight_color()
                );
            }
            Some(ContactEventType::Exit) => {
                summary.contacts_exited += 1;
                log::info!(
                    "contact ended at {:.0} ms, highlight #{:06x}",
                    time_ms,
                    monitor.highlight_color()
                );
            }
            Some(ContactEventType::Stay) | None => {}
        }

        if monitor.touching() {
            summary.frames_touching += 1;
        }
        summary.frames += 1;
    }

    Ok(summary)
}
