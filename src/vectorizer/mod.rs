pub mod evaluate;
pub mod stop_words;
pub mod tfidf;
pub mod token;

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashSet},
    marker::PhantomData,
};

use indexmap::IndexSet;
use num::{Float, FromPrimitive};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    corpus::TextFingerprint,
    error::{Error, Result},
    utils::math::vector::ZeroSpVec,
    vectorizer::{
        stop_words::StopWords,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::{Analyzer, PorterAnalyzer, TokenFrequency},
    },
};

/// Fitted TF-IDF model over a corpus
///
/// Holds the vocabulary, one IDF weight per vocabulary column and one
/// L2-normalized sparse vector per corpus document. Nothing changes after
/// [`VectorModel::fit`]; the model can be shared read-only across threads.
#[derive(Debug, Clone)]
pub struct VectorModel<N = f64, A = PorterAnalyzer, E = DefaultTFIDFEngine>
where
    N: Float + FromPrimitive + Send + Sync,
    A: Analyzer,
    E: TFIDFEngine<N> + Send + Sync,
{
    /// column index -> term, in sorted term order
    vocabulary: IndexSet<Box<str>>,
    /// IDF weight per column
    idf: Vec<N>,
    /// document vectors, corpus order
    documents: Vec<ZeroSpVec<N>>,
    /// stop words and their analyzed forms
    stop_terms: HashSet<String>,
    /// fingerprint of the fitted texts
    fingerprint: u64,
    analyzer: A,
    _marker: PhantomData<E>,
}

impl<N> VectorModel<N>
where
    N: Float + FromPrimitive + Send + Sync,
{
    /// Fit with the Porter analyzer and the default engine
    pub fn fit_default<T>(texts: &[T], stop_words: &StopWords) -> Result<Self>
    where
        T: AsRef<str> + Sync,
    {
        Self::fit(texts, stop_words, PorterAnalyzer)
    }
}

impl<N, A, E> VectorModel<N, A, E>
where
    N: Float + FromPrimitive + Send + Sync,
    A: Analyzer,
    E: TFIDFEngine<N> + Send + Sync,
{
    /// Fit vocabulary, IDF and document vectors
    ///
    /// # Arguments
    /// * `texts` - normalized corpus texts, in corpus order
    /// * `stop_words` - terms left out of the vocabulary
    /// * `analyzer` - tokenizer/stemmer used for documents and later queries
    ///
    /// # Returns
    /// * `Result<Self>` - `EmptyCorpus` when `texts` is empty
    pub fn fit<T>(texts: &[T], stop_words: &StopWords, analyzer: A) -> Result<Self>
    where
        T: AsRef<str> + Sync,
    {
        if texts.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let stop_terms = stop_words.terms_for(&analyzer);
        let freqs: Vec<TokenFrequency> = texts
            .par_iter()
            .map(|text| term_frequency(&analyzer, &stop_terms, text.as_ref()))
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for freq in &freqs {
            for token in freq.token_set() {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let doc_num = texts.len();
        let mut vocabulary = IndexSet::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (token, df) in doc_freq {
            vocabulary.insert(Box::from(token));
            idf.push(E::idf(doc_num, df));
        }
        debug!(documents = doc_num, vocabulary = vocabulary.len(), "fitted idf");

        let mut model = Self {
            vocabulary,
            idf,
            documents: Vec::new(),
            stop_terms,
            fingerprint: TextFingerprint::of(texts),
            analyzer,
            _marker: PhantomData,
        };
        model.documents = freqs.par_iter().map(|freq| model.vectorize(freq)).collect();

        let empty = model.documents.iter().filter(|d| d.is_zero()).count();
        info!(
            documents = doc_num,
            vocabulary = model.vocabulary.len(),
            empty_documents = empty,
            "fitted vector model"
        );
        Ok(model)
    }

    /// Vectorize arbitrary text against the fitted vocabulary
    ///
    /// Out-of-vocabulary terms are dropped; text with no known term gives
    /// the zero vector.
    pub fn transform(&self, text: &str) -> ZeroSpVec<N> {
        let freq = self.analyze(text);
        self.vectorize(&freq)
    }

    /// Term counts of `text` after analysis and stop-word removal
    pub fn analyze(&self, text: &str) -> TokenFrequency {
        term_frequency(&self.analyzer, &self.stop_terms, text)
    }

    fn vectorize(&self, freq: &TokenFrequency) -> ZeroSpVec<N> {
        let token_sum = freq.token_sum();
        let mut inds = Vec::with_capacity(freq.token_num());
        let mut vals = Vec::with_capacity(freq.token_num());
        for (token, count) in freq.iter() {
            if let Some(col) = self.vocabulary.get_index_of(token) {
                inds.push(col as u32);
                vals.push(E::tf(count, token_sum) * self.idf[col]);
            }
        }
        let mut vec = ZeroSpVec::from_entries(inds, vals);
        vec.l2_normalize();
        vec
    }

    /// Number of vocabulary columns
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of fitted documents
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    /// IDF weight of an analyzed term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<N> {
        self.vocabulary.get_index_of(term).map(|col| self.idf[col])
    }

    /// Term at a vocabulary column
    pub fn term(&self, column: u32) -> Option<&str> {
        self.vocabulary.get_index(column as usize).map(|t| &**t)
    }

    /// Terms in column order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(|t| &**t)
    }

    /// Fingerprint of the texts the model was fitted on
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn document_vector(&self, index: usize) -> Option<&ZeroSpVec<N>> {
        self.documents.get(index)
    }

    pub fn documents(&self) -> &[ZeroSpVec<N>] {
        &self.documents
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Highest-weighted terms of a vector
    ///
    /// # Arguments
    /// * `vector` - a vector produced by this model
    /// * `k` - maximum number of terms
    ///
    /// # Returns
    /// * `Vec<(&str, N)>` - (term, weight), heaviest first
    pub fn top_terms(&self, vector: &ZeroSpVec<N>, k: usize) -> Vec<(&str, N)> {
        self.ranked_terms(vector.raw_iter().collect(), k)
    }

    /// Per-term contributions to the cosine score of two vectors
    ///
    /// The contributions sum to `a.dot(b)`.
    pub fn shared_terms(&self, a: &ZeroSpVec<N>, b: &ZeroSpVec<N>, k: usize) -> Vec<(&str, N)> {
        self.ranked_terms(a.hadamard_entries(b), k)
    }

    fn ranked_terms(&self, mut entries: Vec<(u32, N)>, k: usize) -> Vec<(&str, N)> {
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        entries
            .into_iter()
            .take(k)
            .filter_map(|(col, weight)| self.term(col).map(|term| (term, weight)))
            .collect()
    }
}

fn term_frequency<A>(analyzer: &A, stop_terms: &HashSet<String>, text: &str) -> TokenFrequency
where
    A: Analyzer + ?Sized,
{
    let mut freq = TokenFrequency::new();
    for term in analyzer.analyze(text) {
        if !stop_terms.contains(&term) {
            freq.add_token(&term);
        }
    }
    freq
}
