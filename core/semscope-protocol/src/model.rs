use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::{SentenceId, TokenId};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Extra governor edge from the enhanced-dependency column.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct EnhancedDependency {
    pub head: Option<TokenId>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Token {
    pub index: TokenId,
    pub word: String,
    /// Dependency relation to the head (e.g. "nsubj").
    pub label: String,
    /// Governing token, `None` for the root (and for fragments the parser left unattached).
    pub head: Option<TokenId>,
    /// Character offsets into the sentence text, end excluded.
    pub start: u32,
    pub end: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enhanced: Vec<EnhancedDependency>,
}

impl Token {
    pub fn new(index: u32, word: impl Into<String>, head: Option<u32>, label: impl Into<String>) -> Self {
        Self {
            index: TokenId(index),
            word: word.into(),
            label: label.into(),
            head: head.map(TokenId),
            start: 0,
            end: 0,
            category: String::new(),
            tag: String::new(),
            enhanced: Vec::new(),
        }
    }

    pub fn with_span(mut self, start: u32, end: u32) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_enhanced(mut self, head: Option<u32>, label: impl Into<String>) -> Self {
        self.enhanced.push(EnhancedDependency {
            head: head.map(TokenId),
            label: label.into(),
        });
        self
    }

    /// Roots are unattached tokens labelled "root". Other unattached tokens are not roots.
    pub fn is_root(&self) -> bool {
        self.head.is_none() && self.label == "root"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Sentence {
    pub id: SentenceId,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub docid: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Token indices are renumbered to their positions, which is what heads refer to.
    pub fn new(id: u32, text: impl Into<String>, mut tokens: Vec<Token>) -> Self {
        for (position, token) in tokens.iter_mut().enumerate() {
            token.index = TokenId(position as u32);
        }
        Self {
            id: SentenceId(id),
            text: text.into(),
            docid: String::new(),
            tokens,
        }
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    /// Head of `token`. An out-of-range head resolves to `None`.
    pub fn governor(&self, token: &Token) -> Option<&Token> {
        token.head.and_then(|head| self.token(head))
    }

    pub fn roots(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|t| t.is_root())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
