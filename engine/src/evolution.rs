// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

//! Simplex evolution: given the simplex after a new support point was pushed to its front,
//! pick the sub-simplex closest to the origin and the next search direction.
//!
//! Every direction written back is unit length, so the driver's decisions do not depend on
//! how large the shapes are.

use glam::Vec3;

use crate::simplex::Simplex;

/// Relative tolerance for "numerically zero" cross products and projections.
pub const DIRECTION_EPSILON: f32 = 1e-6;

#[inline]
pub fn same_direction(u: Vec3, v: Vec3) -> bool {
    u.dot(v) > 0.0
}

/// Whether the triangle spanned by `ab` and `ac` has (relative to its edge lengths) no area.
#[inline]
pub(crate) fn is_flat_triangle(ab: Vec3, ac: Vec3) -> bool {
    ab.cross(ac).length_squared()
        <= DIRECTION_EPSILON * DIRECTION_EPSILON * ab.length_squared() * ac.length_squared()
}

/// Unit direction perpendicular to `edge`, pointing from the edge's line toward the origin.
/// `ao` runs from the edge's newest point to the origin.
///
/// When the origin lies on that line the perpendicular vanishes, and a fixed normal of
/// `edge` is used instead.
pub(crate) fn edge_direction(edge: Vec3, ao: Vec3) -> Vec3 {
    let axis = edge.normalize();
    let towards_origin = ao.reject_from_normalized(axis);
    if towards_origin.length_squared()
        <= DIRECTION_EPSILON * DIRECTION_EPSILON * ao.length_squared()
    {
        log::trace!("gjk: origin collinear with edge, using fixed orthogonal direction");
        axis.any_orthonormal_vector()
    } else {
        towards_origin.normalize()
    }
}

/// Updates `simplex` and `direction` in place. Returns `true` once the simplex encloses the
/// origin.
pub fn evolve(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    match simplex.len() {
        2 => line(simplex, direction),
        3 => triangle(simplex, direction),
        4 => tetrahedron(simplex, direction),
        // A lone point is never a decision point, the driver grows it first.
        _ => false,
    }
}

fn line(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let a = simplex[0];
    let b = simplex[1];
    let ab = b - a;
    let ao = -a;

    if same_direction(ab, ao) {
        simplex.set_points(&[a, b]);
        *direction = edge_direction(ab, ao);
    } else {
        // The driver stops before `a` can be the origin itself.
        simplex.set_points(&[a]);
        *direction = ao.normalize();
    }

    false
}

fn triangle(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let a = simplex[0];
    let b = simplex[1];
    let c = simplex[2];
    let ab = b - a;
    let ac = c - a;
    let ao = -a;

    if is_flat_triangle(ab, ac) {
        log::trace!("gjk: collinear triangle, dropping oldest point");
        simplex.set_points(&[a, b]);
        return line(simplex, direction);
    }

    let abc = ab.cross(ac);
    if same_direction(abc.cross(ac), ao) {
        if same_direction(ac, ao) {
            simplex.set_points(&[a, c]);
            *direction = edge_direction(ac, ao);
            false
        } else {
            simplex.set_points(&[a, b]);
            line(simplex, direction)
        }
    } else if same_direction(ab.cross(abc), ao) {
        simplex.set_points(&[a, b]);
        line(simplex, direction)
    } else if same_direction(abc, ao) {
        *direction = abc.normalize();
        false
    } else {
        simplex.set_points(&[a, c, b]);
        *direction = -abc.normalize();
        false
    }
}

fn tetrahedron(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let a = simplex[0];
    let b = simplex[1];
    let c = simplex[2];
    let d = simplex[3];

    let ab = b - a;
    let ac = c - a;
    let ad = d - a;
    let ao = -a;

    let abc = ab.cross(ac);
    let acd = ac.cross(ad);
    let adb = ad.cross(ab);

    if same_direction(abc, ao) {
        simplex.set_points(&[a, b, c]);
        return triangle(simplex, direction);
    }

    if same_direction(acd, ao) {
        simplex.set_points(&[a, c, d]);
        return triangle(simplex, direction);
    }

    if same_direction(adb, ao) {
        simplex.set_points(&[a, d, b]);
        return triangle(simplex, direction);
    }

    true
}
