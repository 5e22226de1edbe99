// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use thiserror::Error;

/// Failures a GJK query can report instead of a boolean answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GjkError {
    /// The shape cannot provide a furthest point (no vertices, NaN input, ...).
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// The driver loop hit its iteration cap. The answer is indeterminate,
    /// not "no intersection".
    #[error("GJK did not converge within {iterations} iterations")]
    NonTermination { iterations: usize },
}
