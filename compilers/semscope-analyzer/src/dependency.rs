use semscope_protocol::{Sentence, SentenceId, Token};
use std::collections::BTreeSet;
use std::fmt;

/// Where governor edges are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencySource {
    /// HEAD and DEPREL only: a tree, one governor per token.
    #[default]
    Basic,
    /// Basic edges plus the enhanced graph, so a token may have several governors.
    Enhanced,
}

/// A governor -> dependent edge, derived once per sentence.
#[derive(Debug, Clone, Copy)]
pub struct Dependency<'a> {
    /// `None` for the root (or a head outside the sentence)
    pub governor: Option<&'a Token>,
    pub dependent: &'a Token,
    pub label: &'a str,
    pub idx: usize,
    pub sentence: SentenceId,
}

impl<'a> Dependency<'a> {
    /// Governor identity is the token position within the sentence.
    pub fn is_governed_by(&self, token: &Token) -> bool {
        self.governor.is_some_and(|g| g.index == token.index)
    }
}

impl fmt::Display for Dependency<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let governor = self.governor.map_or("null", |g| g.word.as_str());
        write!(f, "{}--{}-->{}", governor, self.label, self.dependent.word)
    }
}

/// Build the dependency array of `sentence`, in token order.
pub fn dependencies(sentence: &Sentence, source: DependencySource) -> Vec<Dependency<'_>> {
    let mut deps = Vec::with_capacity(sentence.len());
    for token in &sentence.tokens {
        deps.push(Dependency {
            governor: sentence.governor(token),
            dependent: token,
            label: &token.label,
            idx: deps.len(),
            sentence: sentence.id,
        });

        if source == DependencySource::Enhanced {
            // Enhanced edges follow the basic one; duplicates of it are skipped
            for edge in &token.enhanced {
                if edge.head == token.head && edge.label == token.label {
                    continue;
                }
                deps.push(Dependency {
                    governor: edge.head.and_then(|h| sentence.token(h)),
                    dependent: token,
                    label: &edge.label,
                    idx: deps.len(),
                    sentence: sentence.id,
                });
            }
        }
    }
    deps
}

/// First dependency (in array order) with an acceptable label and the given governor.
pub fn find_one_of<'d, 'a>(
    dependencies: &'d [Dependency<'a>],
    acceptable_labels: &BTreeSet<String>,
    governor: &Token,
) -> Option<&'d Dependency<'a>> {
    dependencies
        .iter()
        .find(|d| acceptable_labels.contains(d.label) && d.is_governed_by(governor))
}

/// All dependencies with an acceptable label and the given governor, in array order.
pub fn find_all_of<'d, 'a>(
    dependencies: &'d [Dependency<'a>],
    acceptable_labels: &BTreeSet<String>,
    governor: &Token,
) -> Vec<&'d Dependency<'a>> {
    dependencies
        .iter()
        .filter(|d| acceptable_labels.contains(d.label) && d.is_governed_by(governor))
        .collect()
}
