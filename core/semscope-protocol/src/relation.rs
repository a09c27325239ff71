use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::{SentenceId, TokenId};
use crate::model::Sentence;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Payload shared by every relation variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Edge {
    pub sentence: SentenceId,
    pub predicate: TokenId,
    pub term: TokenId,
    /// Dependency label that triggered the relation.
    pub label: String,
}

impl Edge {
    pub fn new(sentence: SentenceId, predicate: TokenId, term: TokenId, label: impl Into<String>) -> Self {
        Self {
            sentence,
            predicate,
            term,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
#[archive(check_bytes)]
pub enum Relation {
    /// Term is the subject of the predicate.
    PredicateSubject(Edge),
    /// Term is an object of the predicate.
    PredicateObject(Edge),
    /// Term is a subordinate predicate (clausal complement, adverbial clause).
    PredicatePredicate(Edge),
    /// Term is modified by the predicate (relative clause). The term is the governor here.
    TermPredicate(Edge),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum RelationKind {
    PS,
    PO,
    PP,
    TP,
}

impl RelationKind {
    /// Role of the term as printed in text renderings.
    pub fn role(self) -> &'static str {
        match self {
            RelationKind::PS => "subject",
            RelationKind::PO => "object",
            RelationKind::PP => "predicate",
            RelationKind::TP => "term",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RelationKind::PS => "PS",
            RelationKind::PO => "PO",
            RelationKind::PP => "PP",
            RelationKind::TP => "TP",
        };
        f.write_str(tag)
    }
}

impl Relation {
    pub fn kind(&self) -> RelationKind {
        match self {
            Relation::PredicateSubject(_) => RelationKind::PS,
            Relation::PredicateObject(_) => RelationKind::PO,
            Relation::PredicatePredicate(_) => RelationKind::PP,
            Relation::TermPredicate(_) => RelationKind::TP,
        }
    }

    pub fn edge(&self) -> &Edge {
        match self {
            Relation::PredicateSubject(e)
            | Relation::PredicateObject(e)
            | Relation::PredicatePredicate(e)
            | Relation::TermPredicate(e) => e,
        }
    }

    pub fn sentence(&self) -> SentenceId {
        self.edge().sentence
    }

    pub fn predicate(&self) -> TokenId {
        self.edge().predicate
    }

    pub fn term(&self) -> TokenId {
        self.edge().term
    }

    pub fn label(&self) -> &str {
        &self.edge().label
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.edge();
        write!(f, "{}({} -{}-> {})", self.kind(), e.predicate, e.label, e.term)
    }
}

/// Relations found in one sentence, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Analysis {
    pub sentence: SentenceId,
    pub text: String,
    pub relations: Vec<Relation>,
}

impl Analysis {
    pub fn new(sentence: SentenceId, text: impl Into<String>) -> Self {
        Self {
            sentence,
            text: text.into(),
            relations: Vec::new(),
        }
    }

    pub fn push(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Relation> {
        self.relations.iter()
    }
}

impl<'a> IntoIterator for &'a Analysis {
    type Item = &'a Relation;
    type IntoIter = core::slice::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}

/// Parsed sentences together with their analyses (the archived unit).
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Corpus {
    pub version: u32,
    pub sentences: Vec<Sentence>,
    pub analyses: Vec<Analysis>,
}
