//! Facade over the KNN demo workspace: the shared point/geometry vocabulary,
//! the synthetic data generator, the ranking and majority-vote engine, and
//! the session state machine that ties them together.

pub use knnlab_helpers::{ClassId, Distance, Float, L2Dist, LabeledPoint, QueryPoint, Rect};

pub use datagen::{GeneratorConfig, corner_centers, generate, generate_seeded};

pub use neighbors::{ClassificationOutcome, KnnError, Neighbor, find_k_nearest, majority_vote};

pub use session::{Session, SessionError, SessionState};
