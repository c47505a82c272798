use num::{Float, FromPrimitive};

/// Weighting scheme used by the vector model
///
/// Implementors are stateless; the model calls them per vocabulary token
/// and per document term.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// Inverse document frequency of one token
    /// # Arguments
    /// * `doc_num` - number of documents in the corpus
    /// * `doc_freq` - number of documents containing the token
    /// # Returns
    /// * `N` - IDF weight
    fn idf(doc_num: usize, doc_freq: usize) -> N;

    /// Term frequency of one token within a document
    /// # Arguments
    /// * `count` - occurrences of the token in the document
    /// * `token_sum` - total tokens in the document
    /// # Returns
    /// * `N` - TF weight
    fn tf(count: u32, token_sum: u64) -> N;
}

/// Default TF-IDF engine
///
/// Raw counts for TF and the smoothed IDF `ln((1 + N) / (1 + df)) + 1`.
/// Vectors are L2-normalized afterwards, so scaling TF by document length
/// would not change any cosine score.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }
}

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float + FromPrimitive,
{
    #[inline]
    fn idf(doc_num: usize, doc_freq: usize) -> N {
        let ratio = (1.0 + doc_num as f64) / (1.0 + doc_freq as f64);
        N::from_f64(ratio.ln() + 1.0).unwrap_or_else(N::one)
    }

    #[inline]
    fn tf(count: u32, _token_sum: u64) -> N {
        N::from_u32(count).unwrap_or_else(N::zero)
    }
}
