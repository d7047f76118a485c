use crate::scoring::error::{ScoreError, ScoreResult};
use crate::scoring::vocabulary::BinaryVector;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CountMode {
    /// One pooled triple over every element of both matrices.
    Aggregate,
    /// One triple per column, ordered by vocabulary index.
    PerClass,
}

/// True-positive / false-positive / false-negative counts. True negatives
/// are never counted; nothing downstream needs them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionTriple {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionTriple {
    fn absorb(&mut self, other: &ConfusionTriple) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfusionCounts {
    Aggregate(ConfusionTriple),
    PerClass(Vec<ConfusionTriple>),
}

/// Reduces two binarized matrices to confusion counts.
///
/// Element-wise: TP where prediction and solution are both 1, FP where
/// only the prediction is 1, FN where only the solution is 1. The two
/// matrices must have identical row and column counts; reaching this
/// point with unequal shapes indicates a defect upstream of validation.
pub fn count(
    prediction: &[BinaryVector],
    solution: &[BinaryVector],
    mode: CountMode,
) -> ScoreResult<ConfusionCounts> {
    let columns = check_dimensions(prediction, solution)?;

    let mut per_class = vec![ConfusionTriple::default(); columns];
    for (predicted_row, actual_row) in prediction.iter().zip(solution) {
        for (class, (predicted, actual)) in predicted_row.iter().zip(actual_row).enumerate() {
            let cell = &mut per_class[class];
            match (*predicted != 0, *actual != 0) {
                (true, true) => cell.true_positives += 1,
                (true, false) => cell.false_positives += 1,
                (false, true) => cell.false_negatives += 1,
                (false, false) => {}
            }
        }
    }

    match mode {
        CountMode::PerClass => Ok(ConfusionCounts::PerClass(per_class)),
        CountMode::Aggregate => {
            let mut total = ConfusionTriple::default();
            for triple in &per_class {
                total.absorb(triple);
            }
            Ok(ConfusionCounts::Aggregate(total))
        }
    }
}

fn check_dimensions(prediction: &[BinaryVector], solution: &[BinaryVector]) -> ScoreResult<usize> {
    let prediction_columns = prediction.first().map_or(0, Vec::len);
    let solution_columns = solution.first().map_or(0, Vec::len);

    let ragged = prediction
        .iter()
        .any(|row| row.len() != prediction_columns)
        || solution.iter().any(|row| row.len() != solution_columns);

    if prediction.len() != solution.len() || prediction_columns != solution_columns || ragged {
        return Err(ScoreError::DimensionMismatch {
            prediction_rows: prediction.len(),
            prediction_columns,
            solution_rows: solution.len(),
            solution_columns,
        });
    }

    Ok(prediction_columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(
        true_positives: usize,
        false_positives: usize,
        false_negatives: usize,
    ) -> ConfusionTriple {
        ConfusionTriple {
            true_positives,
            false_positives,
            false_negatives,
        }
    }

    // Vocabulary {A, B, C}; solution [{A}, {A,B}, {C}]; prediction
    // [{A}, {A}, {B,C}].
    fn scenario() -> (Vec<BinaryVector>, Vec<BinaryVector>) {
        let solution = vec![vec![1, 0, 0], vec![1, 1, 0], vec![0, 0, 1]];
        let prediction = vec![vec![1, 0, 0], vec![1, 0, 0], vec![0, 1, 1]];
        (prediction, solution)
    }

    #[test]
    fn per_class_counts_match_the_reference_scenario() {
        let (prediction, solution) = scenario();
        let counts = count(&prediction, &solution, CountMode::PerClass)
            .expect("well-formed matrices should count");

        assert_eq!(
            counts,
            ConfusionCounts::PerClass(vec![triple(2, 0, 0), triple(0, 1, 1), triple(1, 0, 0)])
        );
    }

    #[test]
    fn aggregate_counts_pool_every_class() {
        let (prediction, solution) = scenario();
        let counts = count(&prediction, &solution, CountMode::Aggregate)
            .expect("well-formed matrices should count");

        assert_eq!(counts, ConfusionCounts::Aggregate(triple(3, 1, 1)));
    }

    #[test]
    fn row_count_mismatch_is_rejected() {
        let prediction = vec![vec![1, 0]];
        let solution = vec![vec![1, 0], vec![0, 1]];

        let error = count(&prediction, &solution, CountMode::Aggregate)
            .expect_err("unequal row counts should be rejected");
        assert_eq!(
            error,
            ScoreError::DimensionMismatch {
                prediction_rows: 1,
                prediction_columns: 2,
                solution_rows: 2,
                solution_columns: 2,
            }
        );
    }

    #[test]
    fn column_count_mismatch_is_rejected() {
        let prediction = vec![vec![1, 0, 0]];
        let solution = vec![vec![1, 0]];

        let error = count(&prediction, &solution, CountMode::PerClass)
            .expect_err("unequal column counts should be rejected");
        assert!(matches!(error, ScoreError::DimensionMismatch { .. }));
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let prediction = vec![vec![1, 0], vec![1]];
        let solution = vec![vec![1, 0], vec![0, 1]];

        let error = count(&prediction, &solution, CountMode::Aggregate)
            .expect_err("ragged rows should be rejected");
        assert!(matches!(error, ScoreError::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_matrices_count_to_zero() {
        let counts = count(&[], &[], CountMode::Aggregate).expect("empty input should count");
        assert_eq!(counts, ConfusionCounts::Aggregate(triple(0, 0, 0)));
    }
}
