use num::{Float, FromPrimitive};
use tracing::{debug, info};

use crate::{
    config::SimilarityConfig,
    corpus::{extract::extract_text, normalize::normalize, Corpus},
    error::{Error, Result},
    repository::CardRepository,
    vectorizer::{
        evaluate::scoring::Hits, stop_words::StopWords, tfidf::TFIDFEngine, token::Analyzer,
        VectorModel,
    },
};

pub use crate::corpus::build_corpus;

/// Fit the default model (Porter analyzer, smoothed TF-IDF) on a corpus
///
/// # Errors
/// `Error::EmptyCorpus` when the corpus has no documents
pub fn fit_model(corpus: &Corpus, stop_words: &StopWords) -> Result<VectorModel> {
    VectorModel::fit_default(corpus.texts(), stop_words)
}

/// Rank corpus cards by similarity to free text
///
/// The text is normalized without a card name, then vectorized with the
/// model. Text sharing no term with the vocabulary scores 0.0 everywhere.
pub fn find_similar_by_text<N, A, E>(
    model: &VectorModel<N, A, E>,
    corpus: &Corpus,
    query_text: &str,
    n: usize,
) -> Result<Hits>
where
    N: Float + FromPrimitive + Send + Sync,
    A: Analyzer,
    E: TFIDFEngine<N> + Send + Sync,
{
    let query = model.transform(&normalize(query_text, ""));
    model.rank(corpus, &query, n)
}

/// Rank corpus cards by similarity to an existing card's text
///
/// The card need not be in the corpus; it only has to exist in the
/// repository.
///
/// # Errors
/// * `Error::InvalidArgument` when `n == 0`
/// * `Error::NotFound` when the repository has no such card
pub fn find_similar_by_card_name<N, A, E, R>(
    model: &VectorModel<N, A, E>,
    corpus: &Corpus,
    repository: &R,
    card_name: &str,
    n: usize,
) -> Result<Hits>
where
    N: Float + FromPrimitive + Send + Sync,
    A: Analyzer,
    E: TFIDFEngine<N> + Send + Sync,
    R: CardRepository + ?Sized,
{
    if n == 0 {
        return Err(Error::invalid_argument("result count must be positive"));
    }
    let text = card_query_text(repository, card_name)?;
    debug!(card = card_name, query = %text, "card query");
    find_similar_by_text(model, corpus, &text, n)
}

/// Normalized rules text of a card, as used for card-name queries
///
/// Normalizing it again is a no-op, so passing it to
/// [`find_similar_by_text`] ranks the same as a card-name query.
pub fn card_query_text<R>(repository: &R, card_name: &str) -> Result<String>
where
    R: CardRepository + ?Sized,
{
    Ok(normalize(&extract_text(repository, card_name)?, card_name))
}

/// Corpus and fitted model built together from one repository snapshot
#[derive(Debug, Clone)]
pub struct CardSimilarityIndex {
    corpus: Corpus,
    model: VectorModel,
    top_n: usize,
}

impl CardSimilarityIndex {
    /// Build the corpus with the configured exclusions and fit the model
    pub fn build<R>(repository: &R, config: &SimilarityConfig) -> Result<Self>
    where
        R: CardRepository + ?Sized,
    {
        let corpus = build_corpus(repository, &config.exclusion);
        let model = fit_model(&corpus, &config.stop_words)?;
        info!(
            cards = corpus.len(),
            vocabulary = model.vocabulary_len(),
            "similarity index ready"
        );
        Ok(Self { corpus, model, top_n: config.top_n })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn model(&self) -> &VectorModel {
        &self.model
    }

    /// Configured default result count
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn by_text(&self, query_text: &str, n: usize) -> Result<Hits> {
        find_similar_by_text(&self.model, &self.corpus, query_text, n)
    }

    pub fn by_card_name<R>(&self, repository: &R, card_name: &str, n: usize) -> Result<Hits>
    where
        R: CardRepository + ?Sized,
    {
        find_similar_by_card_name(&self.model, &self.corpus, repository, card_name, n)
    }

    /// Terms shared by a query text and a corpus card, largest contribution first
    ///
    /// Empty when the card is not in the corpus or nothing is shared.
    pub fn explain(&self, query_text: &str, card_name: &str, k: usize) -> Vec<(&str, f64)> {
        let query = self.model.transform(&normalize(query_text, ""));
        self.corpus
            .position(card_name)
            .and_then(|i| self.model.document_vector(i))
            .map(|doc| self.model.shared_terms(&query, doc, k))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::{CardFace, CardRecord, InMemoryRepository};

    use super::*;

    fn repo() -> InMemoryRepository {
        let mut repo = InMemoryRepository::new();
        repo.insert_text("Shock", "Shock deals 2 damage to any target.").unwrap();
        repo.insert_text("Lightning Bolt", "Lightning Bolt deals 3 damage to any target.")
            .unwrap();
        repo.insert_text("Divination", "Draw two cards.").unwrap();
        repo.insert(
            CardRecord::new(
                "Blast from the Past",
                vec![CardFace::new()
                    .with_text("Blast from the Past deals 2 damage to any target.")
                    .with_printings(["UNH"])],
            )
            .unwrap(),
        );
        repo
    }

    #[test]
    fn card_query_finds_itself_first() {
        let repo = repo();
        let index = CardSimilarityIndex::build(&repo, &SimilarityConfig::default()).unwrap();
        assert_eq!(index.corpus().len(), 3);

        let hits = index.by_card_name(&repo, "Shock", 2).unwrap();
        assert_eq!(hits.names(), vec!["Shock", "Lightning Bolt"]);
        assert!((hits.list[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn excluded_card_can_still_be_queried() {
        let repo = repo();
        let index = CardSimilarityIndex::build(&repo, &SimilarityConfig::default()).unwrap();
        let hits = index.by_card_name(&repo, "Blast from the Past", 1).unwrap();
        assert_eq!(hits.names(), vec!["Shock"]);
        assert!((hits.list[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn card_query_text_ranks_like_card_name() {
        let repo = repo();
        let index = CardSimilarityIndex::build(&repo, &SimilarityConfig::default()).unwrap();
        let text = card_query_text(&repo, "Lightning Bolt").unwrap();
        assert_eq!(text, " deals 3 damage to any target");
        assert_eq!(
            index.by_text(&text, 3).unwrap(),
            index.by_card_name(&repo, "Lightning Bolt", 3).unwrap()
        );
    }

    #[test]
    fn argument_errors_come_before_lookup() {
        let repo = repo();
        let index = CardSimilarityIndex::build(&repo, &SimilarityConfig::default()).unwrap();
        assert!(matches!(
            index.by_card_name(&repo, "Missing Card", 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(index.by_card_name(&repo, "Missing Card", 3), Err(Error::NotFound(_))));
        assert!(matches!(index.by_text("draw", 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn text_query_is_normalized() {
        let repo = repo();
        let index = CardSimilarityIndex::build(&repo, &SimilarityConfig::default()).unwrap();
        let hits = index.by_text("DRAW two cards!", 1).unwrap();
        assert_eq!(hits.names(), vec!["Divination"]);

        let shared = index.explain("deals 3 damage", "Lightning Bolt", 5);
        let terms: Vec<&str> = shared.iter().map(|(t, _)| *t).collect();
        assert!(terms.contains(&"3"));
        assert!(terms.contains(&"damag"));
        assert!(index.explain("deals 3 damage", "Nope", 5).is_empty());
    }
}
