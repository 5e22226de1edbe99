// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

//! Boolean intersection queries between convex shapes using the
//! Gilbert-Johnson-Keerthi algorithm.

pub mod batch;
pub mod closest;
pub mod error;
pub mod evolution;
pub mod gjk;
pub mod shape;
pub mod simplex;
pub mod support;

pub use batch::intersect_pairs;
pub use error::GjkError;
pub use gjk::{GjkConfig, GjkOutcome, gjk_query, intersects};
pub use shape::{Ball, ConvexHull, SupportMap};
pub use simplex::Simplex;
pub use support::support;
