// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use hullcheck_engine::GjkError;

pub const IDLE_COLOR: u32 = 0xffffff;
pub const CONTACT_COLOR: u32 = 0xff0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEventType {
    Enter,
    Stay,
    Exit,
}

/// Turns the per-frame boolean answers into contact transitions.
#[derive(Debug, Default)]
pub struct ContactMonitor {
    touching: bool,
}

impl ContactMonitor {
    /// Indeterminate answers keep the previous state and produce no event.
    pub fn observe(&mut self, result: &Result<bool, GjkError>) -> Option<ContactEventType> {
        let touching = match result {
            Ok(touching) => *touching,
            Err(e) => {
                log::warn!("Contact state unknown this frame: {}", e);
                return None;
            }
        };

        let event = match (self.touching, touching) {
            (false, true) => Some(ContactEventType::Enter),
            (true, true) => Some(ContactEventType::Stay),
            (true, false) => Some(ContactEventType::Exit),
            (false, false) => None,
        };
        self.touching = touching;
        event
    }

    pub fn touching(&self) -> bool {
        self.touching
    }

    pub fn highlight_color(&self) -> u32 {
        if self.touching {
            CONTACT_COLOR
        } else {
            IDLE_COLOR
        }
    }
}
