// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

mod contact_monitor;
mod oscillation;
mod scene;
mod settings;

use std::{path::Path, process::ExitCode};

use scene::{SceneError, run_scene};
use settings::Settings;

fn run() -> Result<(), SceneError> {
    // An explicit settings file wins over the per-user one.
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from_file(Path::new(&path))?,
        None => Settings::load_user_settings(),
    };
    log::debug!("Running with {:?}", settings);

    let summary = run_scene(&settings)?;
    log::info!(
        "{} frames, {} touching, {} contacts entered, {} exited, {} indeterminate",
        summary.frames,
        summary.frames_touching,
        summary.contacts_entered,
        summary.contacts_exited,
        summary.indeterminate_frames
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
