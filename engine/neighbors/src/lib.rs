use std::cmp::Ordering;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

// These are the core components from our shared library.
use knnlab_helpers::{Distance, Float, LabeledPoint};

// ndarray is used in the public function signatures.
use ndarray::ArrayView1;

/// Errors that can occur when ranking neighbors or taking a majority vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnnError {
    /// k cannot be zero for a k-NN ranking
    InvalidK,
    /// Cannot classify with an empty neighbor set
    EmptyNeighborSet,
}

impl Display for KnnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KnnError::InvalidK => write!(f, "k cannot be zero for a k-NN ranking"),
            KnnError::EmptyNeighborSet => {
                write!(f, "Cannot classify with an empty neighbor set")
            }
        }
    }
}

impl Error for KnnError {}

/// One entry of a neighbor ranking.
///
/// `index` points into the dataset the ranking was computed against, so the
/// owner of the dataset can hold both without self-references. `distance` is
/// the true metric distance, not the surrogate used for sorting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Neighbor<F> {
    pub index: usize,
    pub distance: F,
}

/// The result of a majority vote over a neighbor ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct ClassificationOutcome<L> {
    /// The winning label.
    pub label: L,
    /// How many of the neighbors voted for the winning label.
    pub votes: usize,
    /// How many neighbors voted in total.
    pub total: usize,
}

impl<L> ClassificationOutcome<L> {
    /// Fraction of neighbors that voted for the winner.
    pub fn confidence(&self) -> f64 {
        self.votes as f64 / self.total as f64
    }
}

/// Ranks the `k` training points closest to `query`.
///
/// Performs a full scan over `data` (the datasets this demo works with are a
/// few dozen points, so no spatial index is warranted), sorts ascending by
/// distance and truncates to `k` entries. If `k` exceeds the dataset size the
/// whole sorted dataset is returned.
///
/// The sort is stable: points at equal distance keep their dataset insertion
/// order, which makes rankings reproducible for a fixed dataset.
///
/// # Errors
///
/// Returns `KnnError::InvalidK` if `k` is 0, as this is not a valid ranking.
pub fn find_k_nearest<L, F, D>(
    query: ArrayView1<F>,
    data: &[LabeledPoint<L, F>],
    k: usize,
    distance: &D,
) -> Result<Vec<Neighbor<F>>, KnnError>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    if k == 0 {
        return Err(KnnError::InvalidK);
    }

    // 1. Calculate the "relative distance" (e.g., squared Euclidean) from the
    //    query to every point in the dataset. This is faster than the true
    //    distance and preserves its ordering.
    let mut ranked: Vec<Neighbor<F>> = data
        .iter()
        .enumerate()
        .map(|(index, point)| Neighbor {
            index,
            distance: distance.rdistance(point.features.view(), query),
        })
        .collect();

    // 2. Sort ascending. A stable sort keeps equidistant points in insertion
    //    order. `.partial_cmp` is used because floats don't have a total
    //    ordering (due to NaN).
    ranked.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));

    // 3. Keep the top `k` and convert only those back to true distances.
    ranked.truncate(k);
    for neighbor in &mut ranked {
        neighbor.distance = distance.rdist_to_dist(neighbor.distance);
    }

    Ok(ranked)
}

/// Classifies by plurality vote over a neighbor ranking.
///
/// Labels are tallied in the order the neighbors appear, i.e. ascending by
/// distance. The winner is the first label to reach the maximum count, so
/// when raw counts tie, the label whose voters sit closer to the query wins:
/// neighbors `[B, A, B, A]` classify as B, which reached 2 votes before A
/// tied it.
///
/// `neighbors` must have been produced by [`find_k_nearest`] over the same
/// `data` slice.
///
/// # Errors
///
/// Returns `KnnError::EmptyNeighborSet` if `neighbors` is empty.
pub fn majority_vote<L, F>(
    data: &[LabeledPoint<L, F>],
    neighbors: &[Neighbor<F>],
) -> Result<ClassificationOutcome<L>, KnnError>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    let mut tally: HashMap<L, usize> = HashMap::new();
    let mut winner: Option<L> = None;
    let mut winning_votes = 0;

    for neighbor in neighbors {
        let label = data[neighbor.index].label.clone();
        let votes = tally.entry(label.clone()).or_insert(0);
        *votes += 1;
        if *votes > winning_votes {
            winning_votes = *votes;
            winner = Some(label);
        }
    }

    let label = winner.ok_or(KnnError::EmptyNeighborSet)?;
    Ok(ClassificationOutcome {
        label,
        votes: winning_votes,
        total: neighbors.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use knnlab_helpers::{ClassId, L2Dist};
    use ndarray::array;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn two_cluster_data() -> Vec<LabeledPoint<&'static str, f64>> {
        vec![
            LabeledPoint::from_xy(1.0, 1.0, "A"),
            LabeledPoint::from_xy(2.0, 2.0, "A"),
            LabeledPoint::from_xy(1.0, 2.0, "A"),
            LabeledPoint::from_xy(8.0, 8.0, "B"),
            LabeledPoint::from_xy(9.0, 8.0, "B"),
            LabeledPoint::from_xy(8.0, 9.0, "B"),
        ]
    }

    #[test]
    fn ranking_and_vote_pick_the_nearby_cluster() {
        let data = two_cluster_data();

        let query = array![2.5, 2.5];
        let neighbors = find_k_nearest(query.view(), &data, 3, &L2Dist).unwrap();
        let outcome = majority_vote(&data, &neighbors).unwrap();
        assert_eq!(outcome.label, "A");
        assert_eq!((outcome.votes, outcome.total), (3, 3));

        let query = array![7.5, 8.5];
        let neighbors = find_k_nearest(query.view(), &data, 3, &L2Dist).unwrap();
        assert_eq!(majority_vote(&data, &neighbors).unwrap().label, "B");
    }

    #[test]
    fn returns_min_of_k_and_dataset_size_sorted() {
        let data = two_cluster_data();
        let query = array![5.0, 5.0];

        let neighbors = find_k_nearest(query.view(), &data, 4, &L2Dist).unwrap();
        assert_eq!(neighbors.len(), 4);
        for pair in neighbors.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }

        // k larger than the dataset clamps to the full sorted dataset.
        let neighbors = find_k_nearest(query.view(), &data, 50, &L2Dist).unwrap();
        assert_eq!(neighbors.len(), data.len());
    }

    #[test]
    fn error_on_k_zero() {
        let data = two_cluster_data();
        let result = find_k_nearest(array![0.0, 0.0].view(), &data, 0, &L2Dist);
        assert_eq!(result, Err(KnnError::InvalidK));
    }

    #[test]
    fn error_on_empty_neighbor_set() {
        let data: Vec<LabeledPoint<&str, f64>> = Vec::new();
        let neighbors: Vec<Neighbor<f64>> = Vec::new();
        let result = majority_vote(&data, &neighbors);
        assert_eq!(result, Err(KnnError::EmptyNeighborSet));
    }

    #[test]
    fn equidistant_points_keep_insertion_order() {
        // Four corners of a square, all at the same distance from its center.
        let data = vec![
            LabeledPoint::from_xy(0.0, 0.0, "B"),
            LabeledPoint::from_xy(2.0, 0.0, "A"),
            LabeledPoint::from_xy(0.0, 2.0, "B"),
            LabeledPoint::from_xy(2.0, 2.0, "A"),
        ];
        let query = array![1.0, 1.0];
        let neighbors = find_k_nearest(query.view(), &data, 4, &L2Dist).unwrap();
        let order: Vec<usize> = neighbors.iter().map(|n| n.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn ranking_is_deterministic_for_fixed_inputs() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let data: Vec<LabeledPoint<ClassId, f64>> = (0..50)
            .map(|i| {
                LabeledPoint::from_xy(
                    rng.random_range(0.0..100.0),
                    rng.random_range(0.0..100.0),
                    ClassId(i % 4),
                )
            })
            .collect();
        let query = array![50.0, 50.0];

        let first = find_k_nearest(query.view(), &data, 7, &L2Dist).unwrap();
        let second = find_k_nearest(query.view(), &data, 7, &L2Dist).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn plurality_wins_with_clear_majority() {
        // Tally {A: 3, B: 2} in distance order.
        let data = vec![
            LabeledPoint::from_xy(1.0, 0.0, "A"),
            LabeledPoint::from_xy(2.0, 0.0, "B"),
            LabeledPoint::from_xy(3.0, 0.0, "A"),
            LabeledPoint::from_xy(4.0, 0.0, "B"),
            LabeledPoint::from_xy(5.0, 0.0, "A"),
        ];
        let neighbors = find_k_nearest(array![0.0, 0.0].view(), &data, 5, &L2Dist).unwrap();
        let outcome = majority_vote(&data, &neighbors).unwrap();
        assert_eq!(outcome.label, "A");
        assert_eq!((outcome.votes, outcome.total), (3, 5));
        assert_relative_eq!(outcome.confidence(), 0.6);
    }

    #[test]
    fn tied_vote_goes_to_first_label_reaching_the_maximum() {
        // Neighbors in distance order [B, A, B, A]: B reaches 2 votes before
        // A ties it, so B must win.
        let data = vec![
            LabeledPoint::from_xy(1.0, 0.0, "B"),
            LabeledPoint::from_xy(2.0, 0.0, "A"),
            LabeledPoint::from_xy(3.0, 0.0, "B"),
            LabeledPoint::from_xy(4.0, 0.0, "A"),
        ];
        let neighbors = find_k_nearest(array![0.0, 0.0].view(), &data, 4, &L2Dist).unwrap();
        let outcome = majority_vote(&data, &neighbors).unwrap();
        assert_eq!(outcome.label, "B");
        assert_eq!((outcome.votes, outcome.total), (2, 4));
    }

    #[test]
    fn single_point_scenario_reports_exact_distance() {
        let data = vec![LabeledPoint::from_xy(0.0, 0.0, ClassId(0))];
        let neighbors = find_k_nearest(array![3.0, 4.0].view(), &data, 1, &L2Dist).unwrap();
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].index, 0);
        assert_eq!(neighbors[0].distance, 5.0);

        let outcome = majority_vote(&data, &neighbors).unwrap();
        assert_eq!(outcome.label, ClassId(0));
        assert_eq!((outcome.votes, outcome.total), (1, 1));
    }
}
