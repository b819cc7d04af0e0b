//! Part-of-speech tagging
//!
//! A deterministic rule tagger over a Penn-style tag set. Closed-class
//! words come from a built-in lexicon; everything else falls through
//! capitalization and suffix heuristics. The same input always produces
//! the same tags.

use super::token::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Penn-style part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PosTag {
    /// Singular or mass noun (NN)
    Noun,
    /// Plural noun (NNS)
    PluralNoun,
    /// Singular proper noun (NNP)
    ProperNoun,
    /// Plural proper noun (NNPS)
    PluralProperNoun,
    /// Verb, base form (VB)
    VerbBase,
    /// Verb, past tense (VBD)
    VerbPast,
    /// Verb, gerund or present participle (VBG)
    VerbGerund,
    /// Verb, past participle (VBN)
    VerbPastParticiple,
    /// Verb, non-third-person present (VBP)
    VerbPresent,
    /// Verb, third-person singular present (VBZ)
    VerbThirdPerson,
    /// Modal (MD)
    Modal,
    /// Determiner (DT)
    Determiner,
    /// Preposition or subordinating conjunction (IN)
    Preposition,
    /// The word "to" (TO)
    To,
    /// Coordinating conjunction (CC)
    Conjunction,
    /// Personal pronoun (PRP)
    Pronoun,
    /// Possessive pronoun (PRP$)
    PossessivePronoun,
    /// Adverb (RB)
    Adverb,
    /// Adjective (JJ)
    Adjective,
    /// Cardinal number (CD)
    Cardinal,
    /// Possessive clitic 's (POS)
    Possessive,
    /// Sentence-final punctuation (.)
    Period,
    /// Comma (,)
    Comma,
    /// Mid-sentence punctuation: colon, semicolon, dash, ellipsis (:)
    Colon,
    /// Any other symbol (SYM)
    Symbol,
}

impl PosTag {
    /// The Penn Treebank code for this tag
    pub fn code(&self) -> &'static str {
        match self {
            PosTag::Noun => "NN",
            PosTag::PluralNoun => "NNS",
            PosTag::ProperNoun => "NNP",
            PosTag::PluralProperNoun => "NNPS",
            PosTag::VerbBase => "VB",
            PosTag::VerbPast => "VBD",
            PosTag::VerbGerund => "VBG",
            PosTag::VerbPastParticiple => "VBN",
            PosTag::VerbPresent => "VBP",
            PosTag::VerbThirdPerson => "VBZ",
            PosTag::Modal => "MD",
            PosTag::Determiner => "DT",
            PosTag::Preposition => "IN",
            PosTag::To => "TO",
            PosTag::Conjunction => "CC",
            PosTag::Pronoun => "PRP",
            PosTag::PossessivePronoun => "PRP$",
            PosTag::Adverb => "RB",
            PosTag::Adjective => "JJ",
            PosTag::Cardinal => "CD",
            PosTag::Possessive => "POS",
            PosTag::Period => ".",
            PosTag::Comma => ",",
            PosTag::Colon => ":",
            PosTag::Symbol => "SYM",
        }
    }

    /// Whether the tag is any noun tag
    pub fn is_noun(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::PluralNoun | PosTag::ProperNoun | PosTag::PluralProperNoun
        )
    }

    /// Whether the tag is a proper noun tag
    pub fn is_proper_noun(&self) -> bool {
        matches!(self, PosTag::ProperNoun | PosTag::PluralProperNoun)
    }

    /// Whether the tag is any verb tag
    pub fn is_verb(&self) -> bool {
        matches!(
            self,
            PosTag::VerbBase
                | PosTag::VerbPast
                | PosTag::VerbGerund
                | PosTag::VerbPastParticiple
                | PosTag::VerbPresent
                | PosTag::VerbThirdPerson
        )
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A token paired with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// The underlying token
    pub token: Token,
    /// The assigned tag
    pub tag: PosTag,
}

impl TaggedToken {
    /// Create a new tagged token
    pub fn new(token: Token, tag: PosTag) -> Self {
        Self { token, tag }
    }

    /// The token text
    pub fn text(&self) -> &str {
        &self.token.text
    }
}

impl std::fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.token.text, self.tag.code())
    }
}

/// Closed-class word list, consulted case-insensitively before any
/// other rule.
const CLOSED_CLASS: &[(&str, PosTag)] = &[
    // Determiners
    ("the", PosTag::Determiner),
    ("a", PosTag::Determiner),
    ("an", PosTag::Determiner),
    ("this", PosTag::Determiner),
    ("that", PosTag::Determiner),
    ("these", PosTag::Determiner),
    ("those", PosTag::Determiner),
    ("some", PosTag::Determiner),
    ("any", PosTag::Determiner),
    ("each", PosTag::Determiner),
    ("every", PosTag::Determiner),
    ("no", PosTag::Determiner),
    ("all", PosTag::Determiner),
    ("both", PosTag::Determiner),
    // Prepositions and subordinating conjunctions
    ("of", PosTag::Preposition),
    ("in", PosTag::Preposition),
    ("on", PosTag::Preposition),
    ("at", PosTag::Preposition),
    ("by", PosTag::Preposition),
    ("for", PosTag::Preposition),
    ("with", PosTag::Preposition),
    ("from", PosTag::Preposition),
    ("as", PosTag::Preposition),
    ("into", PosTag::Preposition),
    ("onto", PosTag::Preposition),
    ("over", PosTag::Preposition),
    ("under", PosTag::Preposition),
    ("about", PosTag::Preposition),
    ("after", PosTag::Preposition),
    ("before", PosTag::Preposition),
    ("between", PosTag::Preposition),
    ("during", PosTag::Preposition),
    ("through", PosTag::Preposition),
    ("against", PosTag::Preposition),
    ("without", PosTag::Preposition),
    ("within", PosTag::Preposition),
    ("upon", PosTag::Preposition),
    ("near", PosTag::Preposition),
    ("since", PosTag::Preposition),
    ("until", PosTag::Preposition),
    ("while", PosTag::Preposition),
    ("because", PosTag::Preposition),
    ("if", PosTag::Preposition),
    ("than", PosTag::Preposition),
    ("although", PosTag::Preposition),
    ("to", PosTag::To),
    // Coordinating conjunctions
    ("and", PosTag::Conjunction),
    ("or", PosTag::Conjunction),
    ("but", PosTag::Conjunction),
    ("nor", PosTag::Conjunction),
    ("so", PosTag::Conjunction),
    ("yet", PosTag::Conjunction),
    // Pronouns
    ("i", PosTag::Pronoun),
    ("you", PosTag::Pronoun),
    ("he", PosTag::Pronoun),
    ("she", PosTag::Pronoun),
    ("it", PosTag::Pronoun),
    ("we", PosTag::Pronoun),
    ("they", PosTag::Pronoun),
    ("me", PosTag::Pronoun),
    ("him", PosTag::Pronoun),
    ("her", PosTag::Pronoun),
    ("us", PosTag::Pronoun),
    ("them", PosTag::Pronoun),
    ("my", PosTag::PossessivePronoun),
    ("your", PosTag::PossessivePronoun),
    ("his", PosTag::PossessivePronoun),
    ("its", PosTag::PossessivePronoun),
    ("our", PosTag::PossessivePronoun),
    ("their", PosTag::PossessivePronoun),
    // Modals
    ("can", PosTag::Modal),
    ("could", PosTag::Modal),
    ("will", PosTag::Modal),
    ("would", PosTag::Modal),
    ("shall", PosTag::Modal),
    ("should", PosTag::Modal),
    ("may", PosTag::Modal),
    ("might", PosTag::Modal),
    ("must", PosTag::Modal),
    // Forms of be, have, do
    ("is", PosTag::VerbThirdPerson),
    ("are", PosTag::VerbPresent),
    ("am", PosTag::VerbPresent),
    ("was", PosTag::VerbPast),
    ("were", PosTag::VerbPast),
    ("be", PosTag::VerbBase),
    ("been", PosTag::VerbPastParticiple),
    ("being", PosTag::VerbGerund),
    ("has", PosTag::VerbThirdPerson),
    ("have", PosTag::VerbPresent),
    ("had", PosTag::VerbPast),
    ("do", PosTag::VerbPresent),
    ("does", PosTag::VerbThirdPerson),
    ("did", PosTag::VerbPast),
    ("done", PosTag::VerbPastParticiple),
    // Irregular verbs the suffix rules cannot reach
    ("said", PosTag::VerbPast),
    ("says", PosTag::VerbThirdPerson),
    ("wrote", PosTag::VerbPast),
    ("went", PosTag::VerbPast),
    ("came", PosTag::VerbPast),
    ("took", PosTag::VerbPast),
    ("gave", PosTag::VerbPast),
    ("saw", PosTag::VerbPast),
    ("told", PosTag::VerbPast),
    ("made", PosTag::VerbPast),
    ("built", PosTag::VerbPast),
    ("became", PosTag::VerbPast),
    ("began", PosTag::VerbPast),
    ("held", PosTag::VerbPast),
    // Common adverbs
    ("not", PosTag::Adverb),
    ("never", PosTag::Adverb),
    ("also", PosTag::Adverb),
    ("very", PosTag::Adverb),
    ("too", PosTag::Adverb),
    ("now", PosTag::Adverb),
    ("then", PosTag::Adverb),
    ("here", PosTag::Adverb),
    ("there", PosTag::Adverb),
    ("always", PosTag::Adverb),
    ("often", PosTag::Adverb),
    ("just", PosTag::Adverb),
];

/// Deterministic rule/lexicon tagger
#[derive(Debug, Clone)]
pub struct Tagger {
    lexicon: HashMap<&'static str, PosTag>,
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger {
    /// Create a tagger with the built-in lexicon
    pub fn new() -> Self {
        Self {
            lexicon: CLOSED_CLASS.iter().copied().collect(),
        }
    }

    /// Tag a token sequence
    pub fn tag(&self, tokens: &[Token]) -> Vec<TaggedToken> {
        let mut tagged = Vec::with_capacity(tokens.len());
        for token in tokens {
            let prev: Option<&TaggedToken> = tagged.last();
            let tag = self.tag_one(token, prev);
            tagged.push(TaggedToken::new(token.clone(), tag));
        }
        tagged
    }

    fn tag_one(&self, token: &Token, prev: Option<&TaggedToken>) -> PosTag {
        let text = token.text.as_str();

        if let Some(tag) = self.clitic_tag(text, prev) {
            return tag;
        }
        if let Some(&tag) = self.lexicon.get(text.to_lowercase().as_str()) {
            return tag;
        }
        if let Some(tag) = punctuation_tag(text) {
            return tag;
        }
        if text.chars().next().is_some_and(|c| c.is_numeric()) {
            return PosTag::Cardinal;
        }
        if text.chars().next().is_some_and(|c| c.is_uppercase()) {
            return PosTag::ProperNoun;
        }
        suffix_tag(text)
    }

    /// Clitics produced by the tokenizer: 's, 're, n't, ...
    fn clitic_tag(&self, text: &str, prev: Option<&TaggedToken>) -> Option<PosTag> {
        match text.to_lowercase().as_str() {
            // Possessive after a proper noun, "is" otherwise
            "'s" => {
                if prev.is_some_and(|p| p.tag.is_proper_noun()) {
                    Some(PosTag::Possessive)
                } else {
                    Some(PosTag::VerbThirdPerson)
                }
            }
            "'re" | "'ve" | "'m" => Some(PosTag::VerbPresent),
            "'ll" | "'d" => Some(PosTag::Modal),
            "n't" => Some(PosTag::Adverb),
            _ => None,
        }
    }
}

/// Tags for punctuation tokens
fn punctuation_tag(text: &str) -> Option<PosTag> {
    match text {
        "." | "!" | "?" => Some(PosTag::Period),
        "," => Some(PosTag::Comma),
        ":" | ";" | "--" | "..." | "-" => Some(PosTag::Colon),
        _ if text.chars().all(|c| !c.is_alphanumeric()) && !text.is_empty() => {
            Some(PosTag::Symbol)
        }
        _ => None,
    }
}

/// Suffix heuristics for open-class words
fn suffix_tag(text: &str) -> PosTag {
    let len = text.len();
    if len > 3 && text.ends_with("ly") {
        return PosTag::Adverb;
    }
    if len > 4 && text.ends_with("ing") {
        return PosTag::VerbGerund;
    }
    if len > 3 && text.ends_with("ed") {
        return PosTag::VerbPast;
    }
    if ["tion", "ment", "ness", "ship", "ism"]
        .iter()
        .any(|s| len > s.len() + 1 && text.ends_with(s))
    {
        return PosTag::Noun;
    }
    if ["ous", "ful", "ive", "able", "ible", "ical"]
        .iter()
        .any(|s| len > s.len() + 1 && text.ends_with(s))
    {
        return PosTag::Adjective;
    }
    if len > 3 && text.ends_with('s') && !text.ends_with("ss") && !text.ends_with("us") {
        return PosTag::PluralNoun;
    }
    PosTag::Noun
}
