//! Word-level tokenization
//!
//! Splits raw text into word, number, clitic, and punctuation tokens with
//! byte offsets into the original text. The rules follow the Treebank
//! conventions: punctuation is split from words, clitics (`'s`, `n't`,
//! `'re`, ...) become their own tokens, and numbers with interior `.` or
//! `,` stay whole.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single token with byte offsets into the source text
///
/// The invariant `text == &source[start..end]` holds for every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text
    pub text: String,
    /// Starting byte offset in the source text
    pub start: usize,
    /// Ending byte offset (exclusive) in the source text
    pub end: usize,
}

impl Token {
    /// Create a new token
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Whether the token consists only of punctuation characters
    pub fn is_punctuation(&self) -> bool {
        !self.text.is_empty()
            && self
                .text
                .chars()
                .all(|c| !c.is_alphanumeric() && !c.is_whitespace())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Token pattern, tried in order: ellipsis, Treebank dash, numbers,
/// words, clitics, then any single symbol.
const TOKEN_PATTERN: &str = r"(?x)
    \.\.\.
  | --
  | \p{N}+(?:[.,]\p{N}+)*
  | \p{L}+
  | '\p{L}+
  | [^\s\p{L}\p{N}]
";

/// Rule-based word tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer with the built-in token rules
    pub fn new() -> Self {
        Self {
            // The pattern is a compile-time constant; a failure here is a bug.
            pattern: Regex::new(TOKEN_PATTERN).expect("built-in token pattern is valid"),
        }
    }

    /// Tokenize text into words, numbers, clitics, and punctuation
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .map(|m| Token::new(m.as_str(), m.start(), m.end()))
            .collect();

        self.split_nt_contractions(text, &mut tokens);
        tokens
    }

    /// Rewrite `don` + `'t` into `do` + `n't`, keeping offsets exact
    fn split_nt_contractions(&self, text: &str, tokens: &mut [Token]) {
        for i in 0..tokens.len().saturating_sub(1) {
            let ends_in_n = tokens[i].text.len() > 1
                && tokens[i].text.ends_with(['n', 'N'])
                && tokens[i].end == tokens[i + 1].start;
            if ends_in_n && tokens[i + 1].text.eq_ignore_ascii_case("'t") {
                let split = tokens[i].end - 1;
                tokens[i].end = split;
                tokens[i].text = text[tokens[i].start..split].to_string();
                tokens[i + 1].start = split;
                tokens[i + 1].text = text[split..tokens[i + 1].end].to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_splits_sentence_final_punctuation() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("The library opened in Jerusalem.");
        assert_eq!(
            texts(&tokens),
            vec!["The", "library", "opened", "in", "Jerusalem", "."]
        );
    }

    #[test]
    fn test_splits_possessive_clitic() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("Israel's archives");
        assert_eq!(texts(&tokens), vec!["Israel", "'s", "archives"]);
    }

    #[test]
    fn test_splits_negation_contraction() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("They don't know");
        assert_eq!(texts(&tokens), vec!["They", "do", "n't", "know"]);
    }

    #[test]
    fn test_keeps_decimal_numbers_whole() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("about 5.1 million items");
        assert_eq!(texts(&tokens), vec!["about", "5.1", "million", "items"]);
    }

    #[test]
    fn test_comma_between_words_is_separate() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("Jerusalem, Israel");
        assert_eq!(texts(&tokens), vec!["Jerusalem", ",", "Israel"]);
    }

    #[test]
    fn test_offsets_slice_back_to_source() {
        let tokenizer = Tokenizer::new();
        let text = "The National Library of Israel doesn't close on Sundays.";
        for token in tokenizer.tokenize(text) {
            assert_eq!(token.text, &text[token.start..token.end]);
        }
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_ellipsis_and_dash_stay_whole() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("Wait... go -- now");
        assert_eq!(texts(&tokens), vec!["Wait", "...", "go", "--", "now"]);
    }
}
