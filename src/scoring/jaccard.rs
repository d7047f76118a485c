use crate::scoring::error::{ScoreError, ScoreResult};
use crate::scoring::vocabulary::BinaryVector;

/// Micro-averaged Jaccard index (multi-label accuracy) over two parallel
/// sequences of binarized label vectors.
///
/// Intersection and union sizes are summed across all records first and
/// divided once at the end. This is deliberately not the mean of the
/// per-record ratios; the two estimators differ numerically and must not
/// be swapped.
///
/// When the accumulated union is zero (every record has an empty solution
/// and an empty prediction set) the index is defined as 1.0: the two
/// datasets agree exactly on every record.
pub fn jaccard_index(solution: &[BinaryVector], prediction: &[BinaryVector]) -> ScoreResult<f64> {
    if solution.len() != prediction.len() {
        return Err(ScoreError::ArrayLengthMismatch {
            left: solution.len(),
            right: prediction.len(),
        });
    }

    let mut intersection_total = 0_usize;
    let mut union_total = 0_usize;

    for (actual_row, predicted_row) in solution.iter().zip(prediction) {
        if actual_row.len() != predicted_row.len() {
            return Err(ScoreError::ArrayLengthMismatch {
                left: actual_row.len(),
                right: predicted_row.len(),
            });
        }

        for (actual, predicted) in actual_row.iter().zip(predicted_row) {
            let actual = *actual != 0;
            let predicted = *predicted != 0;
            if actual && predicted {
                intersection_total += 1;
            }
            if actual || predicted {
                union_total += 1;
            }
        }
    }

    if union_total == 0 {
        return Ok(1.0);
    }

    Ok(intersection_total as f64 / union_total as f64)
}
