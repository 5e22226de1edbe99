// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use rayon::prelude::*;

use crate::{
    error::GjkError,
    gjk::{GjkConfig, gjk_query},
    shape::SupportMap,
};

/// Runs one query per pair on the rayon pool. Results keep the input order.
///
/// Queries share nothing but read-only shapes, so no synchronization is involved.
pub fn intersect_pairs<A, B>(pairs: &[(&A, &B)], config: &GjkConfig) -> Vec<Result<bool, GjkError>>
where
    A: SupportMap + Sync + ?Sized,
    B: SupportMap + Sync + ?Sized,
{
    pairs
        .par_iter()
        .map(|(a, b)| gjk_query(*a, *b, config).map(|outcome| outcome.intersecting))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gjk::intersects, shape::ConvexHull};
    use glam::Vec3;

    #[test]
    fn batch_matches_sequential_queries() {
        let hulls: Vec<ConvexHull> = (0..32)
            .map(|i| ConvexHull::cube(1.0, Vec3::new(i as f32 * 0.75, 0.0, 0.0)).unwrap())
            .collect();
        let pairs: Vec<(&ConvexHull, &ConvexHull)> = hulls
            .iter()
            .flat_map(|a| hulls.iter().map(move |b| (a, b)))
            .collect();

        let results = intersect_pairs(&pairs, &GjkConfig::default());

        assert_eq!(results.len(), pairs.len());
        for ((a, b), result) in pairs.iter().zip(&results) {
            assert_eq!(*result, intersects(*a, *b));
        }
        // Neighbours 0.75 apart overlap, cubes two steps apart do not.
        assert_eq!(results[1], Ok(true));
        assert_eq!(results[2], Ok(false));
    }

    #[test]
    fn batch_accepts_trait_objects() {
        let cube = ConvexHull::cube(1.0, Vec3::ZERO).unwrap();
        let ball = crate::shape::Ball::new(Vec3::new(0.0, 0.0, 0.9), 0.5);
        let shapes: [&(dyn SupportMap + Sync); 2] = [&cube, &ball];

        let pairs = [(shapes[0], shapes[1]), (shapes[1], shapes[0])];
        assert_eq!(intersect_pairs(&pairs, &GjkConfig::default()), vec![Ok(true), Ok(true)]);
    }
}
