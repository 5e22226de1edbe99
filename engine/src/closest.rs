// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

//! Exact closest-feature reduction of a simplex.
//!
//! The region tests in [`crate::evolution`] are cheap but can revisit the same support points
//! forever on some separated inputs. This is the slower replacement the driver switches to
//! when that happens: each step keeps exactly the feature nearest the origin, so the distance
//! to the origin can only shrink.

use glam::Vec3;

use crate::{evolution::is_flat_triangle, simplex::Simplex};

/// Reduces `simplex` to the feature (vertex, edge, face, or the whole tetrahedron) nearest
/// the origin and returns the nearest point on it. Returns `None` when a tetrahedron
/// encloses the origin.
pub fn closest_feature(simplex: &mut Simplex) -> Option<Vec3> {
    let points = *simplex;
    match points.len() {
        1 => Some(points[0]),
        2 => Some(segment(simplex, points[0], points[1])),
        3 => Some(triangle(simplex, points[0], points[1], points[2])),
        _ => tetrahedron(simplex, points[0], points[1], points[2], points[3]),
    }
}

fn segment(simplex: &mut Simplex, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let t = -a.dot(ab);
    if t <= 0.0 {
        simplex.set_points(&[a]);
        return a;
    }

    let length_squared = ab.length_squared();
    if t >= length_squared {
        simplex.set_points(&[b]);
        return b;
    }

    simplex.set_points(&[a, b]);
    a + ab * (t / length_squared)
}

// Voronoi regions of the triangle, vertex regions first, then edges, then the face.
fn triangle(simplex: &mut Simplex, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    if is_flat_triangle(ab, ac) {
        return flat_triangle(simplex, a, b, c);
    }

    let d1 = ab.dot(-a);
    let d2 = ac.dot(-a);
    if d1 <= 0.0 && d2 <= 0.0 {
        simplex.set_points(&[a]);
        return a;
    }

    let d3 = ab.dot(-b);
    let d4 = ac.dot(-b);
    if d3 >= 0.0 && d4 <= d3 {
        simplex.set_points(&[b]);
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        simplex.set_points(&[a, b]);
        return a + ab * (d1 / (d1 - d3));
    }

    let d5 = ab.dot(-c);
    let d6 = ac.dot(-c);
    if d6 >= 0.0 && d5 <= d6 {
        simplex.set_points(&[c]);
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        simplex.set_points(&[a, c]);
        return a + ac * (d2 / (d2 - d6));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && d4 - d3 >= 0.0 && d5 - d6 >= 0.0 {
        simplex.set_points(&[b, c]);
        return b + (c - b) * ((d4 - d3) / ((d4 - d3) + (d5 - d6)));
    }

    simplex.set_points(&[a, b, c]);
    let denominator = 1.0 / (va + vb + vc);
    a + ab * (vb * denominator) + ac * (vc * denominator)
}

/// A triangle without area is handled as its three edges.
fn flat_triangle(simplex: &mut Simplex, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let mut best = (f32::INFINITY, a, *simplex);
    for (p, q) in [(a, b), (a, c), (b, c)] {
        let mut candidate = Simplex::new();
        let closest = segment(&mut candidate, p, q);
        if closest.length_squared() < best.0 {
            best = (closest.length_squared(), closest, candidate);
        }
    }

    *simplex = best.2;
    best.1
}

fn tetrahedron(simplex: &mut Simplex, a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Option<Vec3> {
    let mut best: Option<(f32, Vec3, Simplex)> = None;
    for [p, q, r, opposite] in [[a, b, c, d], [a, c, d, b], [a, d, b, c], [b, d, c, a]] {
        let normal = (q - p).cross(r - p);
        let origin_side = normal.dot(-p);
        let opposite_side = normal.dot(opposite - p);
        // A flat tetrahedron has no inside, so all of its faces are candidates.
        let outside = opposite_side == 0.0 || origin_side * opposite_side.signum() < 0.0;
        if !outside {
            continue;
        }

        let mut candidate = Simplex::new();
        let closest = triangle(&mut candidate, p, q, r);
        let distance = closest.length_squared();
        if best.is_none_or(|(best_distance, ..)| distance < best_distance) {
            best = Some((distance, closest, candidate));
        }
    }

    best.map(|(_, closest, candidate)| {
        *simplex = candidate;
        closest
    })
}
