use petgraph::dot::{Config, Dot};
use petgraph::graph::{EdgeReference, Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use semscope_protocol::{Analysis, Relation, Sentence, SentenceId, Token, TokenId};
use std::collections::HashMap;
use std::fmt;

/// Graph vertex: a token of a given sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenNode {
    pub sentence: SentenceId,
    pub index: TokenId,
    pub word: String,
}

impl fmt::Display for TokenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)
    }
}

/// Edge weights that carry a printable label.
pub trait EdgeLabel {
    fn edge_label(&self) -> &str;
}

impl EdgeLabel for Relation {
    fn edge_label(&self) -> &str {
        self.label()
    }
}

impl EdgeLabel for String {
    fn edge_label(&self) -> &str {
        self
    }
}

/// Tokens of one or more sentences linked by labelled edges.
pub struct SentenceGraph<E> {
    graph: Graph<TokenNode, E, Directed>,
    index_map: HashMap<(SentenceId, TokenId), NodeIndex>,
}

impl<E> Default for SentenceGraph<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SentenceGraph<E> {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            index_map: HashMap::new(),
        }
    }

    pub fn inner(&self) -> &Graph<TokenNode, E, Directed> {
        &self.graph
    }

    /// Node for `token`, added on first sight.
    pub fn add_token(&mut self, sentence: SentenceId, token: &Token) -> NodeIndex {
        let graph = &mut self.graph;
        *self.index_map.entry((sentence, token.index)).or_insert_with(|| {
            graph.add_node(TokenNode {
                sentence,
                index: token.index,
                word: token.word.clone(),
            })
        })
    }

    pub fn node(&self, sentence: SentenceId, token: TokenId) -> Option<NodeIndex> {
        self.index_map.get(&(sentence, token)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl SentenceGraph<Relation> {
    /// One edge per relation, term -> predicate (predicate -> term when `reverse`).
    pub fn semantic(sentences: &[Sentence], analyses: &[Analysis], reverse: bool) -> Self {
        let mut graph = Self::new();
        for (sentence, analysis) in sentences.iter().zip(analyses) {
            for relation in analysis {
                let (Some(predicate), Some(term)) =
                    (sentence.token(relation.predicate()), sentence.token(relation.term()))
                else {
                    continue;
                };
                let p = graph.add_token(analysis.sentence, predicate);
                let t = graph.add_token(analysis.sentence, term);
                if reverse {
                    graph.graph.add_edge(p, t, relation.clone());
                } else {
                    graph.graph.add_edge(t, p, relation.clone());
                }
            }
        }
        graph
    }
}

impl SentenceGraph<String> {
    /// One edge per attached token, dependent -> governor (governor -> dependent when `reverse`).
    pub fn syntactic(sentences: &[Sentence], reverse: bool) -> Self {
        let mut graph = Self::new();
        for (position, sentence) in sentences.iter().enumerate() {
            let id = SentenceId(position as u32);
            for token in &sentence.tokens {
                let dependent = graph.add_token(id, token);
                // Heads outside the sentence are left dangling
                let Some(governor) = sentence.governor(token) else {
                    continue;
                };
                let governor = graph.add_token(id, governor);
                if reverse {
                    graph.graph.add_edge(governor, dependent, token.label.clone());
                } else {
                    graph.graph.add_edge(dependent, governor, token.label.clone());
                }
            }
        }
        graph
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn edge_attr<E: EdgeLabel>(_: &Graph<TokenNode, E, Directed>, edge: EdgeReference<'_, E>) -> String {
    format!("label = \"{}\"", escape(edge.weight().edge_label()))
}

fn node_attr<E>(_: &Graph<TokenNode, E, Directed>, (_, node): (NodeIndex, &TokenNode)) -> String {
    format!("label = \"{}\"", escape(&node.word))
}

impl<E: EdgeLabel + fmt::Display> SentenceGraph<E> {
    /// Graphviz rendering, labelled with words and dependency labels.
    pub fn to_dot(&self) -> String {
        // Dot borrows the getters while it lives
        let edges = edge_attr::<E>;
        let nodes = node_attr::<E>;
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[Config::EdgeNoLabel, Config::NodeNoLabel],
            &edges,
            &nodes,
        );
        format!("{}", dot)
    }
}

impl<E: EdgeLabel> fmt::Display for SentenceGraph<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes: Vec<&TokenNode> = self.graph.node_weights().collect();
        nodes.sort_by_key(|n| (n.sentence, n.index));
        for node in nodes {
            writeln!(f, "{} {}", node.word, node.index)?;
        }
        for edge in self.graph.edge_references() {
            let source = &self.graph[edge.source()];
            let target = &self.graph[edge.target()];
            writeln!(f, "{}-{}->{}", source.word, edge.weight().edge_label(), target.word)?;
        }
        Ok(())
    }
}
