use knnlab_helpers::{ClassId, LabeledPoint, Rect};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::f64::consts::TAU;

/// Generated points never land closer than this to the bounds edge.
const EDGE_MARGIN: f64 = 20.0;

/// A mixed point is pulled toward the bounds center by a random fraction of
/// the remaining distance, at most this much.
const MIX_PULL_MAX: f64 = 0.5;

/// Full width of the uniform jitter applied to mixed points, per axis.
const MIX_JITTER: f64 = 120.0;

/// Cluster centers sit this fraction of the shorter bounds dimension away
/// from their corner.
const CORNER_INSET: f64 = 0.25;

/// Shape of the synthetic training set.
///
/// The default reproduces the classic demo layout: four corner clusters of
/// 15 points each with spread 80 on a 760x560 plot.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub cluster_count: usize,
    pub points_per_cluster: usize,
    /// Maximum polar-sampling radius around each cluster center.
    pub spread: f64,
    pub bounds: Rect<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            cluster_count: 4,
            points_per_cluster: 15,
            spread: 80.0,
            bounds: Rect::new(0.0, 0.0, 760.0, 560.0),
        }
    }
}

/// Corner-anchored cluster centers, cycling top-left, top-right,
/// bottom-left, bottom-right.
pub fn corner_centers(bounds: &Rect<f64>, count: usize) -> Vec<(f64, f64)> {
    let inset = CORNER_INSET * bounds.width().min(bounds.height());
    let corners = [
        (bounds.min_x + inset, bounds.min_y + inset),
        (bounds.max_x - inset, bounds.min_y + inset),
        (bounds.min_x + inset, bounds.max_y - inset),
        (bounds.max_x - inset, bounds.max_y - inset),
    ];
    (0..count).map(|i| corners[i % corners.len()]).collect()
}

/// Samples a labeled training set of `cluster_count * points_per_cluster`
/// points.
///
/// Each point is drawn around its cluster center by polar sampling: angle
/// uniform in `[0, 2π)`, radius uniform in `[0, spread]`. Independently, with
/// probability `mixing_level`, the point is pulled toward the bounds center
/// and jittered so that the clusters overlap; a mixed point keeps the label
/// of the cluster it was sampled from. Every coordinate is clamped into the
/// bounds shrunk by a fixed margin.
///
/// Pure over its inputs: the caller replaces any previous dataset wholesale.
/// `mixing_level` is expected to be in `[0, 1]` (caller-validated).
pub fn generate<R: Rng>(
    config: &GeneratorConfig,
    mixing_level: f64,
    rng: &mut R,
) -> Vec<LabeledPoint<ClassId, f64>> {
    let inner = config.bounds.shrink(EDGE_MARGIN);
    let (center_x, center_y) = config.bounds.center();
    let centers = corner_centers(&config.bounds, config.cluster_count);

    let mut dataset = Vec::with_capacity(config.cluster_count * config.points_per_cluster);
    for (class_index, &(cluster_x, cluster_y)) in centers.iter().enumerate() {
        for _ in 0..config.points_per_cluster {
            let angle = rng.random_range(0.0..TAU);
            let radius = rng.random_range(0.0..=config.spread);
            let mut x = cluster_x + radius * angle.cos();
            let mut y = cluster_y + radius * angle.sin();

            if rng.random::<f64>() < mixing_level {
                // Pull toward the plot center, then scatter, so the clusters
                // bleed into each other without relabeling anything.
                x += (center_x - x) * MIX_PULL_MAX * rng.random::<f64>();
                y += (center_y - y) * MIX_PULL_MAX * rng.random::<f64>();
                x += (rng.random::<f64>() - 0.5) * MIX_JITTER;
                y += (rng.random::<f64>() - 0.5) * MIX_JITTER;
            }

            let (x, y) = inner.clamp(x, y);
            dataset.push(LabeledPoint::from_xy(x, y, ClassId(class_index)));
        }
    }

    dataset
}

/// Generates a dataset from a seed, for reproducible results.
pub fn generate_seeded(
    config: &GeneratorConfig,
    mixing_level: f64,
    seed: u64,
) -> Vec<LabeledPoint<ClassId, f64>> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    generate(config, mixing_level, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center_of(config: &GeneratorConfig, class: ClassId) -> (f64, f64) {
        corner_centers(&config.bounds, config.cluster_count)[class.0]
    }

    #[test]
    fn generates_points_per_cluster_for_each_class() {
        let config = GeneratorConfig::default();
        let dataset = generate_seeded(&config, 0.0, 1);
        assert_eq!(dataset.len(), 60);
        for class in 0..config.cluster_count {
            let count = dataset
                .iter()
                .filter(|p| p.label == ClassId(class))
                .count();
            assert_eq!(count, config.points_per_cluster);
        }
    }

    #[test]
    fn unmixed_points_stay_within_cluster_spread() {
        let config = GeneratorConfig::default();
        for seed in 0..20 {
            let dataset = generate_seeded(&config, 0.0, seed);
            for point in &dataset {
                let (cx, cy) = center_of(&config, point.label);
                let dist = ((point.x() - cx).powi(2) + (point.y() - cy).powi(2)).sqrt();
                assert!(
                    dist <= config.spread + 1e-9,
                    "point {:?} is {} from its center, spread is {}",
                    point,
                    dist,
                    config.spread
                );
            }
        }
    }

    #[test]
    fn all_points_respect_the_edge_margin() {
        let config = GeneratorConfig::default();
        let inner = config.bounds.shrink(EDGE_MARGIN);
        for seed in 0..20 {
            // Maximum mixing gives the jitter every chance to escape.
            let dataset = generate_seeded(&config, 1.0, seed);
            for point in &dataset {
                assert!(
                    inner.contains(point.x(), point.y()),
                    "point {:?} escaped the margin",
                    point
                );
            }
        }
    }

    #[test]
    fn mixing_never_relabels_points() {
        let config = GeneratorConfig::default();
        let mixed = generate_seeded(&config, 1.0, 3);
        // Labels still arrive in cluster order, points_per_cluster at a time.
        for (i, point) in mixed.iter().enumerate() {
            assert_eq!(point.label, ClassId(i / config.points_per_cluster));
        }
    }

    #[test]
    fn same_seed_reproduces_the_dataset() {
        let config = GeneratorConfig::default();
        let a = generate_seeded(&config, 0.4, 42);
        let b = generate_seeded(&config, 0.4, 42);
        assert_eq!(a, b);

        let c = generate_seeded(&config, 0.4, 43);
        assert_ne!(a, c);
    }

    #[test]
    fn corner_centers_cycle_and_stay_inside_bounds() {
        let bounds = Rect::new(0.0, 0.0, 760.0, 560.0);
        let centers = corner_centers(&bounds, 4);
        assert_eq!(centers.len(), 4);
        assert_eq!(centers[0], (140.0, 140.0));
        assert_eq!(centers[1], (620.0, 140.0));
        assert_eq!(centers[2], (140.0, 420.0));
        assert_eq!(centers[3], (620.0, 420.0));
        for &(x, y) in &centers {
            assert!(bounds.contains(x, y));
        }

        // More clusters than corners reuse them in order.
        let six = corner_centers(&bounds, 6);
        assert_eq!(six[4], centers[0]);
        assert_eq!(six[5], centers[1]);
    }
}
