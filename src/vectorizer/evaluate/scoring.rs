use std::fmt::{self, Debug, Display};

use num::{Float, FromPrimitive};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    corpus::Corpus,
    error::{Error, Result},
    utils::math::vector::ZeroSpVec,
    vectorizer::{tfidf::TFIDFEngine, token::Analyzer, VectorModel},
};

/// One ranked card
#[derive(Debug, Clone, PartialEq)]
pub struct HitEntry {
    pub name: String,
    /// cosine similarity in [0, 1]
    pub score: f64,
}

/// Structure to store search results
#[derive(Clone, Default, PartialEq)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score
    ///
    /// NaN scores are removed. The sort is stable, so equal scores keep
    /// their corpus order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// Keep the first `n` entries
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.list.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HitEntry> {
        self.list.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry> {
        self.list.iter()
    }

    /// Ranked names without scores
    pub fn names(&self) -> Vec<&str> {
        self.list.iter().map(|hit| hit.name.as_str()).collect()
    }

    /// Score of a card if it is among the hits
    pub fn score_of(&self, name: &str) -> Option<f64> {
        self.list.iter().find(|hit| hit.name == name).map(|hit| hit.score)
    }
}

impl IntoIterator for Hits {
    type Item = HitEntry;
    type IntoIter = std::vec::IntoIter<HitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a> IntoIterator for &'a Hits {
    type Item = &'a HitEntry;
    type IntoIter = std::slice::Iter<'a, HitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // one hit per line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.name, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (&hit.name, hit.score)))
                .finish()
        }
    }
}

/// `score\tname` per line
impl Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hit in &self.list {
            writeln!(f, "{:.6}\t{}", hit.score, hit.name)?;
        }
        Ok(())
    }
}

impl<N, A, E> VectorModel<N, A, E>
where
    N: Float + FromPrimitive + Send + Sync,
    A: Analyzer,
    E: TFIDFEngine<N> + Send + Sync,
{
    /// Cosine similarity of `query` against every document, corpus order
    ///
    /// Vectors are unit length, so the dot product is the cosine. Scores
    /// are clamped to [0, 1] to absorb rounding.
    pub fn similarity(&self, query: &ZeroSpVec<N>) -> Vec<f64> {
        self.documents()
            .par_iter()
            .map(|doc| doc.dot(query).to_f64().unwrap_or(0.0).clamp(0.0, 1.0))
            .collect()
    }

    /// Top `n` corpus cards by similarity to `query`
    ///
    /// # Arguments
    /// * `corpus` - the corpus this model was fitted on
    /// * `query` - vector from [`VectorModel::transform`]
    /// * `n` - result count; all cards when `n` exceeds the corpus size
    ///
    /// # Returns
    /// * `Result<Hits>` - `InvalidArgument` when `n == 0` or the corpus does not
    ///   match the model (size or text fingerprint)
    pub fn rank(&self, corpus: &Corpus, query: &ZeroSpVec<N>, n: usize) -> Result<Hits> {
        if n == 0 {
            return Err(Error::invalid_argument("result count must be positive"));
        }
        if corpus.len() != self.doc_num() {
            return Err(Error::invalid_argument(format!(
                "corpus has {} documents but the model was fitted on {}",
                corpus.len(),
                self.doc_num()
            )));
        }
        if corpus.fingerprint() != self.fingerprint() {
            return Err(Error::invalid_argument("corpus texts differ from the fitted ones"));
        }

        let scores = self.similarity(query);
        let mut hits = Hits::new(
            corpus
                .names()
                .zip(scores)
                .map(|(name, score)| HitEntry { name: name.to_string(), score })
                .collect(),
        );
        hits.sort_by_score().truncate(n);
        debug!(requested = n, returned = hits.len(), zero_query = query.is_zero(), "ranked corpus");
        Ok(hits)
    }
}
