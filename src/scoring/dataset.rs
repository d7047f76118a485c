use std::collections::BTreeSet;

use crate::scoring::error::{ScoreError, ScoreResult};
use crate::scoring::vocabulary::{LabelInput, LabelVocabulary};

/// One parsed input row: a record identifier and its declared labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub labels: LabelInput,
}

/// An ordered sequence of (identifier, label set) pairs read from one
/// input source. Order is significant: two datasets are comparable only
/// when their identifier sequences are element-wise equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoredDataset {
    pub records: Vec<Record>,
}

impl ScoredDataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.id.as_str())
    }

    pub fn label_inputs(&self) -> Vec<LabelInput> {
        self.records
            .iter()
            .map(|record| record.labels.clone())
            .collect()
    }
}

/// All-or-nothing gate in front of the scoring pipeline.
///
/// Checks that every label in either dataset belongs to the vocabulary
/// and that the two identifier sequences are element-wise equal (same
/// values, same order, same length). Any violation fails the whole run;
/// no partial scoring happens even when most records align.
pub fn validate(
    solution: &ScoredDataset,
    prediction: &ScoredDataset,
    vocabulary: &LabelVocabulary,
) -> ScoreResult<()> {
    check_labels(solution, vocabulary)?;
    check_labels(prediction, vocabulary)?;
    check_identifiers(solution, prediction)
}

fn check_labels(dataset: &ScoredDataset, vocabulary: &LabelVocabulary) -> ScoreResult<()> {
    for record in &dataset.records {
        for label in record.labels.labels() {
            if !vocabulary.contains(label) {
                return Err(ScoreError::UnknownClass {
                    label: label.clone(),
                    record_id: Some(record.id.clone()),
                });
            }
        }
    }
    Ok(())
}

fn check_identifiers(solution: &ScoredDataset, prediction: &ScoredDataset) -> ScoreResult<()> {
    if solution.len() == prediction.len() && solution.ids().eq(prediction.ids()) {
        return Ok(());
    }

    let solution_ids: BTreeSet<&str> = solution.ids().collect();
    let prediction_ids: BTreeSet<&str> = prediction.ids().collect();

    Err(ScoreError::IdentifierMismatch {
        only_in_solution: solution_ids
            .difference(&prediction_ids)
            .map(ToString::to_string)
            .collect(),
        only_in_prediction: prediction_ids
            .difference(&solution_ids)
            .map(ToString::to_string)
            .collect(),
    })
}
