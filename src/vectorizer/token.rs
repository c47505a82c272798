use std::{fmt::Debug, sync::OnceLock};

use indexmap::IndexMap;
use rust_stemmers::{Algorithm, Stemmer};

/// Turns normalized text into the terms the vector model counts
///
/// Implementations must be deterministic: fitting and querying run the same
/// analyzer and expect the same terms for the same text.
pub trait Analyzer: Send + Sync + Debug {
    /// Ordered terms, duplicates kept
    fn analyze(&self, text: &str) -> Vec<String>;
}

static STEMMER: OnceLock<Stemmer> = OnceLock::new();

fn english_stemmer() -> &'static Stemmer {
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::English))
}

/// Word tokenizer followed by the English (Porter2) Snowball stemmer
///
/// Only purely alphabetic tokens are stemmed; cost symbols such as `{t}`
/// and stat modifiers such as `+3/+3` pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterAnalyzer;

impl PorterAnalyzer {
    /// Stem one token
    pub fn stem(&self, token: &str) -> String {
        if token.chars().all(char::is_alphabetic) {
            english_stemmer().stem(token).into_owned()
        } else {
            token.to_string()
        }
    }
}

impl Analyzer for PorterAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        tokenize(text).iter().map(|token| self.stem(token)).collect()
    }
}

/// Tokenizer only, no stemming
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAnalyzer;

impl Analyzer for PlainAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }
}

/// Characters a token may start or end with besides alphanumerics
#[inline]
fn is_token_edge(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '-' | '/')
}

/// Chunk separators: whitespace and the dashes rules text uses between clauses
#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{2014}' | '\u{2013}')
}

fn push_trimmed(tokens: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim_matches(|c: char| !is_token_edge(c));
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
}

/// Split text into word tokens
///
/// Whitespace and em/en dashes separate chunks. Inside a chunk every closed `{...}` group
/// is its own token (`{2}{g}` gives `{2}` and `{g}`). Remaining pieces lose
/// leading/trailing characters that are neither alphanumeric nor `+ - /`,
/// so `+3/+3` and `-1/-1` survive whole.
///
/// # Arguments
/// * `text` - normalized text
///
/// # Returns
/// * `Vec<String>` - tokens in text order
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split(is_separator).filter(|c| !c.is_empty()) {
        let mut rest = chunk;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            push_trimmed(&mut tokens, &rest[..open]);
            tokens.push(rest[open..=close].to_string());
            rest = &rest[close + 1..];
        }
        push_trimmed(&mut tokens, rest);
    }
    tokens
}

///  TokenFrequency
/// Counts how often each token occurs in one document
///
/// # Examples
/// ```
/// use card_text_similarity::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_token("draw");
/// token_freq.add_token("card");
/// token_freq.add_token("draw");
///
/// assert_eq!(token_freq.token_count("draw"), 2);
/// assert_eq!(token_freq.token_sum(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Add one occurrence of a token
    ///
    /// # Arguments
    /// * `token` - token to add
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    /// Occurrences of `token`, zero when absent
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens added
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    /// Distinct tokens in first-seen order
    #[inline]
    pub fn token_set(&self) -> impl Iterator<Item = &str> {
        self.token_count.keys().map(String::as_str)
    }

    /// (token, count) pairs in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(token, &count)| (token.as_str(), count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_trims_edges() {
        assert_eq!(
            tokenize("target creature gets +3/+3 until end of turn"),
            vec!["target", "creature", "gets", "+3/+3", "until", "end", "of", "turn"]
        );
        assert_eq!(tokenize("  *flying*  "), vec!["flying"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn cost_symbols_are_atomic() {
        assert_eq!(tokenize("{t} add {w}"), vec!["{t}", "add", "{w}"]);
        assert_eq!(tokenize("{2}{g}{g} draw"), vec!["{2}", "{g}", "{g}", "draw"]);
        assert_eq!(tokenize("pay {w/u}"), vec!["pay", "{w/u}"]);
        assert_eq!(tokenize("x{r}y"), vec!["x", "{r}", "y"]);
    }

    #[test]
    fn unclosed_brace_is_trimmed() {
        assert_eq!(tokenize("{broken"), vec!["broken"]);
    }

    #[test]
    fn stat_modifiers_survive() {
        assert_eq!(tokenize("-1/-1 counter"), vec!["-1/-1", "counter"]);
        assert_eq!(tokenize("x/x"), vec!["x/x"]);
    }

    #[test]
    fn porter_analyzer_stems_words_only() {
        assert_eq!(
            PorterAnalyzer.analyze("creatures get +1/+1 and {t}"),
            vec!["creatur", "get", "+1/+1", "and", "{t}"]
        );
        assert_eq!(
            PlainAnalyzer.analyze("creatures get +1/+1"),
            vec!["creatures", "get", "+1/+1"]
        );
    }

    #[test]
    fn dashes_separate_tokens() {
        assert_eq!(tokenize("trample\u{2014}haste"), vec!["trample", "haste"]);
        assert_eq!(tokenize("flying \u{2014} vigilance"), vec!["flying", "vigilance"]);
        assert_eq!(tokenize("1\u{2013}3 damage"), vec!["1", "3", "damage"]);
    }

    fn check_stems(pairs: &[(&str, &str)]) {
        for (word, expected) in pairs {
            assert_eq!(PorterAnalyzer.stem(word), *expected, "stem({word})");
        }
    }

    #[test]
    fn stems_plurals_and_participles() {
        check_stems(&[
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("cats", "cat"),
            ("plastered", "plaster"),
            ("bled", "bled"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("hopping", "hop"),
            ("tanned", "tan"),
            ("falling", "fall"),
            ("hissing", "hiss"),
            ("fizzed", "fizz"),
            ("failing", "fail"),
            ("controlled", "control"),
            ("happy", "happi"),
        ]);
    }

    #[test]
    fn stems_derivational_suffixes() {
        check_stems(&[
            ("relational", "relat"),
            ("conditional", "condit"),
            ("rational", "ration"),
            ("hopefulness", "hope"),
            ("goodness", "good"),
            ("adjustment", "adjust"),
            ("adoption", "adopt"),
            ("abilities", "abil"),
        ]);
    }

    #[test]
    fn stems_card_vocabulary() {
        check_stems(&[
            ("creatures", "creatur"),
            ("creature", "creatur"),
            ("gets", "get"),
            ("deals", "deal"),
            ("damage", "damag"),
            ("destroy", "destroy"),
        ]);
    }

    #[test]
    fn leaves_non_alphabetic_tokens_alone() {
        check_stems(&[("is", "is"), ("{t}", "{t}"), ("+3/+3", "+3/+3"), ("x/x", "x/x"), ("2", "2")]);
    }

    #[test]
    fn token_frequency_counts() {
        let mut freq = TokenFrequency::new();
        for token in ["draw", "a", "card", "draw"] {
            freq.add_token(token);
        }
        assert_eq!(freq.token_count("draw"), 2);
        assert_eq!(freq.token_count("discard"), 0);
        assert_eq!(freq.token_sum(), 4);
        assert_eq!(freq.token_num(), 3);
        assert_eq!(freq.token_set().collect::<Vec<_>>(), vec!["draw", "a", "card"]);
        assert_eq!(freq.iter().next(), Some(("draw", 2)));
        assert!(TokenFrequency::new().is_empty());
    }
}
