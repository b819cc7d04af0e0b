//! Named entity chunking
//!
//! Groups maximal proper-noun runs (allowing an interior `of` between two
//! proper-noun segments) into candidate spans, then classifies each span
//! as ORGANIZATION / GPE / PERSON / LOCATION / FACILITY using keyword
//! cues, a small gazetteer, honorific titles, and a following-verb
//! heuristic. Tokens outside any span pass through as plain leaves.

use super::tag::TaggedToken;
use super::tree::{Entity, EntityLabel, EntityTree, Node};
use std::collections::HashSet;

/// Words that, anywhere in a span, mark it as an organization
const ORG_KEYWORDS: &[&str] = &[
    "library",
    "museum",
    "university",
    "institute",
    "college",
    "academy",
    "company",
    "corporation",
    "bank",
    "ministry",
    "church",
    "society",
    "press",
    "archives",
    "council",
    "association",
    "foundation",
    "committee",
    "agency",
    "bureau",
];

/// Words that mark a span as a man-made facility
const FACILITY_KEYWORDS: &[&str] = &[
    "bridge", "tower", "airport", "station", "hall", "stadium", "gate", "palace", "castle",
];

/// Words that mark a span as a natural location
const LOCATION_KEYWORDS: &[&str] = &[
    "mount", "mountain", "lake", "river", "sea", "valley", "desert", "forest", "bay", "gulf",
];

/// Honorific titles that precede a person's name
const TITLES: &[&str] = &["mr", "mrs", "ms", "dr", "prof", "president", "rabbi", "sir"];

/// Verbs of speech or action that suggest a preceding person
const PERSON_VERBS: &[&str] = &[
    "said", "says", "wrote", "writes", "announced", "argued", "added", "visited", "founded",
];

/// Known geo-political entities, lowercase; multi-word entries joined
/// with single spaces.
const GPE_GAZETTEER: &[&str] = &[
    "jerusalem",
    "israel",
    "tel aviv",
    "haifa",
    "london",
    "paris",
    "berlin",
    "vienna",
    "rome",
    "moscow",
    "cairo",
    "athens",
    "amsterdam",
    "madrid",
    "lisbon",
    "warsaw",
    "budapest",
    "prague",
    "new york",
    "washington",
    "boston",
    "chicago",
    "england",
    "france",
    "germany",
    "italy",
    "spain",
    "greece",
    "egypt",
    "austria",
    "poland",
    "hungary",
    "russia",
    "turkey",
    "india",
    "china",
    "japan",
    "united states",
    "united kingdom",
];

/// Configuration for entity chunking
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Maximum number of tokens in a span
    pub max_span: usize,
    /// Additional gazetteer entries treated as GPEs (lowercase)
    pub extra_gpe: Vec<String>,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_span: 6,
            extra_gpe: Vec::new(),
        }
    }
}

/// Named entity chunker
#[derive(Debug, Clone)]
pub struct EntityChunker {
    config: ChunkerConfig,
    gazetteer: HashSet<String>,
}

impl Default for EntityChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityChunker {
    /// Create a chunker with the built-in gazetteer
    pub fn new() -> Self {
        Self::with_config(ChunkerConfig::default())
    }

    /// Create a chunker with custom configuration
    pub fn with_config(config: ChunkerConfig) -> Self {
        let mut gazetteer: HashSet<String> =
            GPE_GAZETTEER.iter().map(|s| s.to_string()).collect();
        gazetteer.extend(config.extra_gpe.iter().map(|s| s.to_lowercase()));
        Self { config, gazetteer }
    }

    /// Set the maximum span length
    pub fn with_max_span(mut self, max_span: usize) -> Self {
        self.config.max_span = max_span;
        self
    }

    /// Chunk a tagged token sequence into an entity tree
    pub fn chunk(&self, tokens: &[TaggedToken]) -> EntityTree {
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            // An honorific title (optionally followed by a period) cues a
            // person span; the title itself stays outside the span.
            let mut person_cue = false;
            if is_title(&tokens[i]) && followed_by_name(tokens, i) {
                person_cue = true;
                nodes.push(Node::Leaf(tokens[i].clone()));
                i += 1;
                if i < tokens.len() && tokens[i].text() == "." {
                    nodes.push(Node::Leaf(tokens[i].clone()));
                    i += 1;
                }
            }

            let end = self.span_end(tokens, i);
            if end > i {
                let span = &tokens[i..end];
                let label = self.classify(span, tokens.get(end), person_cue);
                nodes.push(Node::Entity(Entity {
                    label,
                    tokens: span.to_vec(),
                }));
                i = end;
            } else {
                nodes.push(Node::Leaf(tokens[i].clone()));
                i += 1;
            }
        }

        EntityTree::new(nodes)
    }

    /// Find the end of a proper-noun run starting at `start`
    ///
    /// Pattern: NNP+ (of NNP+)*, capped at `max_span` tokens.
    fn span_end(&self, tokens: &[TaggedToken], start: usize) -> usize {
        let mut end = start;
        while end < tokens.len()
            && end - start < self.config.max_span
            && tokens[end].tag.is_proper_noun()
        {
            end += 1;
        }
        if end == start {
            return start;
        }
        // Interior "of" connective: "National Library of Israel"
        while end + 1 < tokens.len()
            && end - start + 2 <= self.config.max_span
            && tokens[end].text().eq_ignore_ascii_case("of")
            && tokens[end + 1].tag.is_proper_noun()
        {
            end += 1;
            while end < tokens.len()
                && end - start < self.config.max_span
                && tokens[end].tag.is_proper_noun()
            {
                end += 1;
            }
        }
        end
    }

    /// Classify a candidate span
    fn classify(
        &self,
        span: &[TaggedToken],
        following: Option<&TaggedToken>,
        person_cue: bool,
    ) -> EntityLabel {
        if person_cue {
            return EntityLabel::Person;
        }

        let words: Vec<String> = span.iter().map(|t| t.text().to_lowercase()).collect();
        if words.iter().any(|w| ORG_KEYWORDS.contains(&w.as_str())) {
            return EntityLabel::Organization;
        }
        if words
            .iter()
            .any(|w| FACILITY_KEYWORDS.contains(&w.as_str()))
        {
            return EntityLabel::Facility;
        }
        if words
            .iter()
            .any(|w| LOCATION_KEYWORDS.contains(&w.as_str()))
        {
            return EntityLabel::Location;
        }
        if self.gazetteer.contains(&words.join(" ")) {
            return EntityLabel::Gpe;
        }
        if following.is_some_and(|t| {
            t.tag.is_verb() && PERSON_VERBS.contains(&t.text().to_lowercase().as_str())
        }) {
            return EntityLabel::Person;
        }

        // No cue matched: short spans read as names, long ones as bodies.
        if span.len() <= 3 {
            EntityLabel::Person
        } else {
            EntityLabel::Organization
        }
    }
}

fn is_title(token: &TaggedToken) -> bool {
    TITLES.contains(&token.text().to_lowercase().as_str())
}

/// Whether a title at `i` is actually followed by a name token
fn followed_by_name(tokens: &[TaggedToken], i: usize) -> bool {
    let mut j = i + 1;
    if j < tokens.len() && tokens[j].text() == "." {
        j += 1;
    }
    j < tokens.len() && tokens[j].tag.is_proper_noun()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::tag::Tagger;
    use crate::ner::token::Tokenizer;
    use crate::ner::tree::EntityLabel;

    fn chunk_text(text: &str) -> EntityTree {
        let tokens = Tokenizer::new().tokenize(text);
        let tagged = Tagger::new().tag(&tokens);
        EntityChunker::new().chunk(&tagged)
    }

    fn labeled(tree: &EntityTree) -> Vec<(String, EntityLabel)> {
        tree.entities()
            .map(|e| (e.text(), e.label))
            .collect()
    }

    #[test]
    fn test_fixed_sentence_yields_three_spans() {
        let tree = chunk_text("The National Library of Israel is located in Jerusalem, Israel.");
        assert_eq!(
            labeled(&tree),
            vec![
                (
                    "National Library of Israel".to_string(),
                    EntityLabel::Organization
                ),
                ("Jerusalem".to_string(), EntityLabel::Gpe),
                ("Israel".to_string(), EntityLabel::Gpe),
            ]
        );
    }

    #[test]
    fn test_comma_breaks_spans() {
        let tree = chunk_text("Jerusalem, Israel");
        assert_eq!(tree.entity_count(), 2);
    }

    #[test]
    fn test_title_cues_person() {
        let tree = chunk_text("Dr. Theodor Herzl lived in Vienna.");
        assert_eq!(
            labeled(&tree),
            vec![
                ("Theodor Herzl".to_string(), EntityLabel::Person),
                ("Vienna".to_string(), EntityLabel::Gpe),
            ]
        );
    }

    #[test]
    fn test_following_verb_cues_person() {
        let tree = chunk_text("Shmuel Agnon wrote many novels.");
        assert_eq!(
            labeled(&tree),
            vec![("Shmuel Agnon".to_string(), EntityLabel::Person)]
        );
    }

    #[test]
    fn test_multiword_gazetteer_entry() {
        let tree = chunk_text("She flew from Tel Aviv to London.");
        assert_eq!(
            labeled(&tree),
            vec![
                ("Tel Aviv".to_string(), EntityLabel::Gpe),
                ("London".to_string(), EntityLabel::Gpe),
            ]
        );
    }

    #[test]
    fn test_facility_and_location_keywords() {
        let tree = chunk_text("Tower Bridge spans the River Thames.");
        assert_eq!(
            labeled(&tree),
            vec![
                ("Tower Bridge".to_string(), EntityLabel::Facility),
                ("River Thames".to_string(), EntityLabel::Location),
            ]
        );
    }

    #[test]
    fn test_extra_gazetteer_entries() {
        let config = ChunkerConfig {
            extra_gpe: vec!["Safed".to_string()],
            ..ChunkerConfig::default()
        };
        let tokens = Tokenizer::new().tokenize("They drove to Safed.");
        let tagged = Tagger::new().tag(&tokens);
        let tree = EntityChunker::with_config(config).chunk(&tagged);
        assert_eq!(
            labeled(&tree),
            vec![("Safed".to_string(), EntityLabel::Gpe)]
        );
    }

    #[test]
    fn test_no_proper_nouns_yields_no_entities() {
        let tree = chunk_text("the reading room was quiet");
        assert_eq!(tree.entity_count(), 0);
        assert_eq!(tree.token_count(), 5);
    }
}
