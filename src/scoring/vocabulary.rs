use std::collections::{BTreeSet, HashMap};

use crate::scoring::error::{ScoreError, ScoreResult};

/// A fixed-width 0/1 vector indexed by vocabulary position. Length always
/// equals the vocabulary size of the run that produced it.
pub type BinaryVector = Vec<u8>;

/// A record's labels as declared by the caller: either one class name or
/// an explicit set of class names. The shape is part of the API contract;
/// the encoder never inspects a value to guess whether it is a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelInput {
    Single(String),
    Multi(Vec<String>),
}

impl LabelInput {
    pub fn labels(&self) -> &[String] {
        match self {
            Self::Single(label) => std::slice::from_ref(label),
            Self::Multi(labels) => labels,
        }
    }
}

/// The canonical, ordered catalog of class names for one scoring run.
///
/// Construction deduplicates and sorts ascending, so index assignment is
/// a pure function of the class set: two vocabularies built from the same
/// classes, in any input order, are index-identical. Immutable once built.
#[derive(Debug, Clone)]
pub struct LabelVocabulary {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelVocabulary {
    pub fn build<I, S>(classes: I) -> ScoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = classes.into_iter().map(Into::into).collect();
        if unique.is_empty() {
            return Err(ScoreError::EmptyVocabulary);
        }

        let classes: Vec<String> = unique.into_iter().collect();
        let index = classes
            .iter()
            .enumerate()
            .map(|(position, class)| (class.clone(), position))
            .collect();

        Ok(Self { classes, index })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classes in index order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Binarizes one label input into a fresh vector of vocabulary width.
    pub fn encode(&self, input: &LabelInput) -> ScoreResult<BinaryVector> {
        let mut vector = vec![0_u8; self.classes.len()];
        for label in input.labels() {
            let position = self
                .index_of(label)
                .ok_or_else(|| ScoreError::UnknownClass {
                    label: label.clone(),
                    record_id: None,
                })?;
            vector[position] = 1;
        }
        Ok(vector)
    }

    /// Row-wise `encode`; output row order matches input order.
    pub fn encode_batch(&self, inputs: &[LabelInput]) -> ScoreResult<Vec<BinaryVector>> {
        inputs.iter().map(|input| self.encode(input)).collect()
    }

    /// Inverse of `encode` for any label subset of the vocabulary.
    #[allow(dead_code)]
    pub fn decode(&self, vector: &BinaryVector) -> ScoreResult<BTreeSet<String>> {
        if vector.len() != self.classes.len() {
            return Err(ScoreError::ArrayLengthMismatch {
                left: vector.len(),
                right: self.classes.len(),
            });
        }

        Ok(vector
            .iter()
            .zip(&self.classes)
            .filter(|(bit, _)| **bit != 0)
            .map(|(_, class)| class.clone())
            .collect())
    }

    #[allow(dead_code)]
    pub fn decode_batch(&self, vectors: &[BinaryVector]) -> ScoreResult<Vec<BTreeSet<String>>> {
        vectors.iter().map(|vector| self.decode(vector)).collect()
    }
}
