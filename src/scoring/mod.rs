pub mod confusion;
pub mod dataset;
pub mod error;
pub mod jaccard;
pub mod metrics;
pub mod vocabulary;

pub use confusion::{ConfusionCounts, ConfusionTriple, CountMode, count};
pub use dataset::{Record, ScoredDataset, validate};
pub use error::{ScoreError, ScoreResult};
pub use jaccard::jaccard_index;
pub use metrics::{ClassScores, MetricResult, precision_recall, safe_div};
pub use vocabulary::{BinaryVector, LabelInput, LabelVocabulary};
