// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::Vec3;

use crate::shape::SupportMap;

/// Point of the Minkowski difference `a - b` that is extremal along `direction`.
#[inline]
pub fn support<A, B>(a: &A, b: &B, direction: Vec3) -> Vec3
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    a.furthest_point(direction) - b.furthest_point(-direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ConvexHull;

    #[test]
    fn support_of_separated_cubes() {
        let a = ConvexHull::cube(1.0, Vec3::new(-2.0, 0.0, 0.0)).unwrap();
        let b = ConvexHull::cube(1.0, Vec3::new(2.0, 0.0, 0.0)).unwrap();

        // Furthest of a along +x is x = -1.5, furthest of b along -x is x = 1.5.
        let s = support(&a, &b, Vec3::X);
        assert_eq!(s.x, -3.0);

        let s = support(&a, &b, Vec3::NEG_X);
        assert_eq!(s.x, -5.0);
    }

    #[test]
    fn support_is_negated_when_operands_swap() {
        let a = ConvexHull::cube(1.0, Vec3::new(0.3, -1.0, 2.0)).unwrap();
        let b = ConvexHull::cube(2.0, Vec3::new(1.0, 0.5, 0.0)).unwrap();
        let direction = Vec3::new(0.2, -0.7, 0.4);

        assert_eq!(support(&a, &b, direction), -support(&b, &a, -direction));
    }
}
