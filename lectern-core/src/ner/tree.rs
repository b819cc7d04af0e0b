//! Entity tree structure and rendering
//!
//! The chunker output is a flat tree: a root `S` node whose children are
//! either labeled entity nodes (holding the tagged tokens of the span) or
//! plain tagged leaves. The tree renders as a bracketed string in the
//! `(S (GPE Jerusalem/NNP) ...)` style or as a multi-line ASCII drawing.

use super::tag::TaggedToken;
use serde::{Deserialize, Serialize};

/// Entity categories assigned by the chunker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// A person
    Person,
    /// An organization or institution
    Organization,
    /// A geo-political entity: city, region, country
    Gpe,
    /// A natural location: mountain, river, sea
    Location,
    /// A man-made facility: bridge, airport, tower
    Facility,
}

impl EntityLabel {
    /// The conventional all-caps label code
    pub fn code(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Organization => "ORGANIZATION",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Location => "LOCATION",
            EntityLabel::Facility => "FACILITY",
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A recognized entity span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// The entity category
    pub label: EntityLabel,
    /// The tagged tokens covered by the span, in order
    pub tokens: Vec<TaggedToken>,
}

impl Entity {
    /// The surface text of the span, tokens joined with single spaces
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Byte offset of the first token in the source text
    pub fn start(&self) -> usize {
        self.tokens.first().map(|t| t.token.start).unwrap_or(0)
    }

    /// Byte offset just past the last token in the source text
    pub fn end(&self) -> usize {
        self.tokens.last().map(|t| t.token.end).unwrap_or(0)
    }
}

/// A child of the root node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// A labeled entity span
    Entity(Entity),
    /// A plain tagged token outside any entity
    Leaf(TaggedToken),
}

/// The chunker output: a one-level tree rooted at `S`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EntityTree {
    /// Children of the root, in sentence order
    pub nodes: Vec<Node>,
}

impl EntityTree {
    /// Create a tree from its children
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Iterate over the entity spans in sentence order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Entity(entity) => Some(entity),
            Node::Leaf(_) => None,
        })
    }

    /// Number of entity spans in the tree
    pub fn entity_count(&self) -> usize {
        self.entities().count()
    }

    /// Number of tokens covered by the tree, inside and outside entities
    pub fn token_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                Node::Entity(entity) => entity.tokens.len(),
                Node::Leaf(_) => 1,
            })
            .sum()
    }

    /// Bracketed rendering: `(S (ORGANIZATION National/NNP ...) is/VBZ ...)`
    pub fn bracketed(&self) -> String {
        let mut out = String::from("(S");
        for node in &self.nodes {
            out.push(' ');
            match node {
                Node::Entity(entity) => {
                    out.push('(');
                    out.push_str(entity.label.code());
                    for token in &entity.tokens {
                        out.push(' ');
                        out.push_str(&token.to_string());
                    }
                    out.push(')');
                }
                Node::Leaf(token) => out.push_str(&token.to_string()),
            }
        }
        out.push(')');
        out
    }

    /// Multi-line ASCII rendering of the tree
    pub fn render_ascii(&self) -> String {
        let mut out = String::from("S\n");
        for (i, node) in self.nodes.iter().enumerate() {
            let last = i + 1 == self.nodes.len();
            let branch = if last { "└─" } else { "├─" };
            match node {
                Node::Leaf(token) => {
                    out.push_str(&format!("{branch} {token}\n"));
                }
                Node::Entity(entity) => {
                    out.push_str(&format!("{branch} {}\n", entity.label));
                    let indent = if last { "   " } else { "│  " };
                    for (j, token) in entity.tokens.iter().enumerate() {
                        let inner = if j + 1 == entity.tokens.len() {
                            "└─"
                        } else {
                            "├─"
                        };
                        out.push_str(&format!("{indent}{inner} {token}\n"));
                    }
                }
            }
        }
        out
    }
}

impl std::fmt::Display for EntityTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bracketed())
    }
}
