use datagen::{GeneratorConfig, generate};
use knnlab_helpers::{ClassId, L2Dist, LabeledPoint, QueryPoint, Rect};
use neighbors::{ClassificationOutcome, KnnError, Neighbor, find_k_nearest, majority_vote};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lifecycle of a single query point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No query point placed.
    Empty,
    /// A query point exists but has not been ranked against the dataset.
    Placed,
    /// The k nearest neighbors of the query point are known.
    Ranked,
    /// The query point carries a predicted class.
    Classified,
}

/// Errors a session operation can return.
///
/// All of them are recoverable: the caller surfaces them as user feedback and
/// the session stays usable.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// A numeric input is outside its valid range.
    InvalidParameter { name: &'static str, value: f64 },
    /// The requested action is not allowed in the current state.
    Guard {
        action: &'static str,
        state: SessionState,
    },
    /// Classification was requested over zero neighbors.
    EmptyNeighborSet,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidParameter { name, value } => {
                write!(f, "parameter `{}` is out of range (got {})", name, value)
            }
            SessionError::Guard { action, state } => {
                write!(f, "`{}` is not allowed in the {:?} state", action, state)
            }
            SessionError::EmptyNeighborSet => {
                write!(f, "cannot classify with an empty neighbor set")
            }
        }
    }
}

impl Error for SessionError {}

/// One interactive classification session.
///
/// Owns the training dataset, at most one query point, the current neighbor
/// ranking and its classification outcome, and gates every operation on the
/// state machine: `Empty -> Placed -> Ranked -> Classified`, with `reset`,
/// `regenerate` and `change_k` transitioning back. Nothing else is allowed to
/// mutate the dataset or the query point.
///
/// The session never produces user-facing strings; callers map
/// [`SessionError`] values and accessors to whatever presentation they need.
#[derive(Debug, Clone)]
pub struct Session {
    config: GeneratorConfig,
    mixing_level: f64,
    dataset: Vec<LabeledPoint<ClassId, f64>>,
    query: Option<QueryPoint<ClassId, f64>>,
    neighbors: Vec<Neighbor<f64>>,
    outcome: Option<ClassificationOutcome<ClassId>>,
    state: SessionState,
    rng: SmallRng,
}

impl Session {
    /// Creates a session with an OS-seeded RNG and generates the initial
    /// dataset.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `mixing_level` is outside `[0, 1]`.
    pub fn new(config: GeneratorConfig, mixing_level: f64) -> Result<Self, SessionError> {
        Self::with_rng(config, mixing_level, SmallRng::from_os_rng())
    }

    /// Creates a session whose dataset generation is reproducible from `seed`.
    pub fn seeded(
        config: GeneratorConfig,
        mixing_level: f64,
        seed: u64,
    ) -> Result<Self, SessionError> {
        Self::with_rng(config, mixing_level, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: GeneratorConfig,
        mixing_level: f64,
        mut rng: SmallRng,
    ) -> Result<Self, SessionError> {
        validate_mixing(mixing_level)?;
        let dataset = generate(&config, mixing_level, &mut rng);
        Ok(Session {
            config,
            mixing_level,
            dataset,
            query: None,
            neighbors: Vec::new(),
            outcome: None,
            state: SessionState::Empty,
            rng,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn dataset(&self) -> &[LabeledPoint<ClassId, f64>] {
        &self.dataset
    }

    pub fn query_point(&self) -> Option<&QueryPoint<ClassId, f64>> {
        self.query.as_ref()
    }

    pub fn neighbors(&self) -> &[Neighbor<f64>] {
        &self.neighbors
    }

    /// The current ranking resolved to dataset points, closest first.
    pub fn neighbor_points(&self) -> impl Iterator<Item = (&LabeledPoint<ClassId, f64>, f64)> {
        self.neighbors
            .iter()
            .map(|n| (&self.dataset[n.index], n.distance))
    }

    pub fn outcome(&self) -> Option<&ClassificationOutcome<ClassId>> {
        self.outcome.as_ref()
    }

    pub fn bounds(&self) -> Rect<f64> {
        self.config.bounds
    }

    pub fn mixing_level(&self) -> f64 {
        self.mixing_level
    }

    /// Places the query point, entering the `Placed` state.
    ///
    /// # Errors
    ///
    /// `Guard` unless the session is `Empty`; `InvalidParameter` if the
    /// coordinates fall outside the plot bounds.
    pub fn place_query_point(
        &mut self,
        x: f64,
        y: f64,
    ) -> Result<&QueryPoint<ClassId, f64>, SessionError> {
        if self.state != SessionState::Empty {
            return Err(SessionError::Guard {
                action: "place_query_point",
                state: self.state,
            });
        }
        if !self.config.bounds.contains(x, y) {
            return Err(SessionError::InvalidParameter {
                name: "query_point",
                value: x,
            });
        }
        self.state = SessionState::Placed;
        Ok(self.query.insert(QueryPoint::from_xy(x, y)))
    }

    /// Ranks the `k` nearest training points against the query point,
    /// entering the `Ranked` state.
    ///
    /// The previous ranking, if any, was already discarded when the session
    /// left the `Ranked` state; each call computes a fresh result.
    ///
    /// # Errors
    ///
    /// `Guard` unless the session is `Placed`; `InvalidParameter` if `k` is 0.
    pub fn find_k_nearest(&mut self, k: usize) -> Result<&[Neighbor<f64>], SessionError> {
        if self.state != SessionState::Placed {
            return Err(SessionError::Guard {
                action: "find_k_nearest",
                state: self.state,
            });
        }
        let query = self.query.as_ref().ok_or(SessionError::Guard {
            action: "find_k_nearest",
            state: self.state,
        })?;
        self.neighbors = find_k_nearest(query.features.view(), &self.dataset, k, &L2Dist)
            .map_err(|e| map_knn_error(e, k))?;
        self.state = SessionState::Ranked;
        Ok(&self.neighbors)
    }

    /// Classifies the query point by majority vote over the current ranking,
    /// entering the `Classified` state.
    ///
    /// # Errors
    ///
    /// `Guard` unless the session is `Ranked`; `EmptyNeighborSet` if the
    /// ranking is empty (possible only with an empty dataset).
    pub fn classify(&mut self) -> Result<ClassificationOutcome<ClassId>, SessionError> {
        if self.state != SessionState::Ranked {
            return Err(SessionError::Guard {
                action: "classify",
                state: self.state,
            });
        }
        let outcome = majority_vote(&self.dataset, &self.neighbors)
            .map_err(|e| map_knn_error(e, self.neighbors.len()))?;
        if let Some(query) = self.query.as_mut() {
            query.predicted = Some(outcome.label);
        }
        self.outcome = Some(outcome.clone());
        self.state = SessionState::Classified;
        Ok(outcome)
    }

    /// Discards the query point, ranking and outcome, returning to `Empty`.
    ///
    /// Allowed in every state; the dataset and mixing level survive.
    pub fn reset(&mut self) {
        self.query = None;
        self.neighbors.clear();
        self.outcome = None;
        self.state = SessionState::Empty;
    }

    /// Replaces the dataset wholesale with a fresh sample at `mixing_level`
    /// and resets the session to `Empty`.
    ///
    /// Allowed in every state.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `mixing_level` is outside `[0, 1]`; the old
    /// dataset is kept in that case.
    pub fn regenerate(
        &mut self,
        mixing_level: f64,
    ) -> Result<&[LabeledPoint<ClassId, f64>], SessionError> {
        validate_mixing(mixing_level)?;
        self.mixing_level = mixing_level;
        self.dataset = generate(&self.config, mixing_level, &mut self.rng);
        self.reset();
        Ok(&self.dataset)
    }

    /// Stores a new mixing level for the next regeneration without touching
    /// the current dataset.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `mixing_level` is outside `[0, 1]`.
    pub fn set_mixing_level(&mut self, mixing_level: f64) -> Result<(), SessionError> {
        validate_mixing(mixing_level)?;
        self.mixing_level = mixing_level;
        Ok(())
    }

    /// Signals that `k` changed. A `Ranked` or `Classified` session drops its
    /// ranking and prediction and reverts to `Placed`; otherwise nothing to
    /// invalidate.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `new_k` is 0.
    pub fn change_k(&mut self, new_k: usize) -> Result<(), SessionError> {
        if new_k == 0 {
            return Err(SessionError::InvalidParameter {
                name: "k",
                value: new_k as f64,
            });
        }
        if matches!(self.state, SessionState::Ranked | SessionState::Classified) {
            self.neighbors.clear();
            self.outcome = None;
            if let Some(query) = self.query.as_mut() {
                query.predicted = None;
            }
            self.state = SessionState::Placed;
        }
        Ok(())
    }
}

fn validate_mixing(level: f64) -> Result<(), SessionError> {
    if !(0.0..=1.0).contains(&level) {
        return Err(SessionError::InvalidParameter {
            name: "mixing_level",
            value: level,
        });
    }
    Ok(())
}

fn map_knn_error(error: KnnError, k: usize) -> SessionError {
    match error {
        KnnError::InvalidK => SessionError::InvalidParameter {
            name: "k",
            value: k as f64,
        },
        KnnError::EmptyNeighborSet => SessionError::EmptyNeighborSet,
    }
}
