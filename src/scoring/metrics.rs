use crate::scoring::confusion::{ConfusionCounts, ConfusionTriple};

/// The zero-denominator rule for every metric in this crate: a ratio with
/// denominator 0 is defined as exactly 0, never NaN or infinity. Output
/// consumers rely on every metric field being a finite number.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: Option<f64>,
}

/// Scores in the same shape as the confusion counts they derive from:
/// one scalar set in aggregate mode, one per class (vocabulary order) in
/// per-class mode.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricResult {
    Aggregate(ClassScores),
    PerClass(Vec<ClassScores>),
}

pub fn precision_recall(confusion: &ConfusionCounts, include_f1: bool) -> MetricResult {
    match confusion {
        ConfusionCounts::Aggregate(triple) => {
            MetricResult::Aggregate(scores_for(triple, include_f1))
        }
        ConfusionCounts::PerClass(triples) => MetricResult::PerClass(
            triples
                .iter()
                .map(|triple| scores_for(triple, include_f1))
                .collect(),
        ),
    }
}

fn scores_for(triple: &ConfusionTriple, include_f1: bool) -> ClassScores {
    let true_positives = triple.true_positives as f64;
    let precision = safe_div(
        true_positives,
        true_positives + triple.false_positives as f64,
    );
    let recall = safe_div(
        true_positives,
        true_positives + triple.false_negatives as f64,
    );

    ClassScores {
        precision,
        recall,
        f1: include_f1.then(|| safe_div(2.0 * precision * recall, precision + recall)),
    }
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

    #[test]
    fn safe_div_returns_zero_on_zero_denominator() {
        assert_eq!(safe_div(0.0, 0.0), 0.0);
        assert_eq!(safe_div(3.0, 0.0), 0.0);
        assert_eq!(safe_div(3.0, 4.0), 0.75);
    }

    #[test]
    fn perfect_agreement_scores_one_everywhere() {
        let result = precision_recall(&ConfusionCounts::Aggregate(triple(5, 0, 0)), true);
        assert_eq!(
            result,
            MetricResult::Aggregate(ClassScores {
                precision: 1.0,
                recall: 1.0,
                f1: Some(1.0),
            })
        );
    }

    #[test]
    fn class_absent_from_both_datasets_scores_zero_not_nan() {
        let result = precision_recall(&ConfusionCounts::PerClass(vec![triple(0, 0, 0)]), true);
        let MetricResult::PerClass(scores) = result else {
            panic!("per-class counts should produce per-class scores");
        };

        assert_eq!(scores[0].precision, 0.0);
        assert_eq!(scores[0].recall, 0.0);
        assert_eq!(scores[0].f1, Some(0.0));
    }

    #[test]
    fn f1_is_omitted_unless_requested() {
        let result = precision_recall(&ConfusionCounts::Aggregate(triple(1, 1, 1)), false);
        let MetricResult::Aggregate(scores) = result else {
            panic!("aggregate counts should produce aggregate scores");
        };
        assert_eq!(scores.f1, None);
    }

    #[test]
    fn per_class_scores_match_the_reference_scenario() {
        // Vocabulary {A, B, C}; solution [{A}, {A,B}, {C}]; prediction
        // [{A}, {A}, {B,C}].
        let counts =
            ConfusionCounts::PerClass(vec![triple(2, 0, 0), triple(0, 1, 1), triple(1, 0, 0)]);
        let MetricResult::PerClass(scores) = precision_recall(&counts, true) else {
            panic!("per-class counts should produce per-class scores");
        };

        assert_eq!(scores[0].precision, 1.0);
        assert_eq!(scores[0].recall, 1.0);
        assert_eq!(scores[0].f1, Some(1.0));

        assert_eq!(scores[1].precision, 0.0);
        assert_eq!(scores[1].recall, 0.0);
        assert_eq!(scores[1].f1, Some(0.0));

        assert_eq!(scores[2].precision, 1.0);
        assert_eq!(scores[2].recall, 1.0);
        assert_eq!(scores[2].f1, Some(1.0));
    }

    #[test]
    fn partial_overlap_produces_fractional_scores() {
        let result = precision_recall(&ConfusionCounts::Aggregate(triple(3, 1, 1)), true);
        let MetricResult::Aggregate(scores) = result else {
            panic!("aggregate counts should produce aggregate scores");
        };

        assert_eq!(scores.precision, 0.75);
        assert_eq!(scores.recall, 0.75);
        assert_eq!(scores.f1, Some(0.75));
    }
}
