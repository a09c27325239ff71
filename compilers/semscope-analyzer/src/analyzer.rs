use crate::dependency::{dependencies, find_all_of, Dependency, DependencySource};
use semscope_protocol::{Analysis, Edge, Relation, RelationLabels, Sentence, SentenceId, Token, TokenId};
use std::collections::HashSet;
use tracing::debug;

/// Semantic predicate-subject-object analyzer.
///
/// Walks each sentence's dependency tree from its roots and emits PS, PO, PP and TP
/// relations, steered by the label sets it was built with.
#[derive(Debug, Clone, Default)]
pub struct SemanticAnalyzer {
    labels: RelationLabels,
    source: DependencySource,
}

impl SemanticAnalyzer {
    pub fn new(labels: RelationLabels) -> Self {
        Self {
            labels,
            source: DependencySource::Basic,
        }
    }

    pub fn with_source(mut self, source: DependencySource) -> Self {
        self.source = source;
        self
    }

    pub fn labels(&self) -> &RelationLabels {
        &self.labels
    }

    /// One analysis per sentence, in input order.
    ///
    /// Relations and analyses are numbered by position in `sentences`, whatever ids the
    /// sentences carry.
    pub fn analyze(&self, sentences: &[Sentence]) -> Vec<Analysis> {
        sentences
            .iter()
            .enumerate()
            .map(|(position, s)| self.traverse(s, SentenceId(position as u32)).analysis)
            .collect()
    }

    /// Analysis of a single sentence, numbered with its own id.
    pub fn analyze_sentence(&self, sentence: &Sentence) -> Analysis {
        self.traverse(sentence, sentence.id).analysis
    }

    pub(crate) fn traverse(&self, sentence: &Sentence, id: SentenceId) -> Walk {
        debug!(sentence = %id, tokens = sentence.len(), "analyzing sentence");

        // 1. Dependencies, minus the ones no label set cares about
        let mut deps = dependencies(sentence, self.source);
        deps.retain(|d| self.labels.is_relevant(d.label));

        let mut traversal = Traversal {
            sentence: id,
            labels: &self.labels,
            dependencies: &deps,
            visited: HashSet::new(),
            expanded: Vec::new(),
            analysis: Analysis::new(id, sentence.text.clone()),
            steps: Vec::new(),
        };

        // 2. Explore from each root
        if sentence.roots().next().is_none() {
            debug!(sentence = %id, "no roots");
        }
        let roots: Vec<&Token> = sentence.roots().collect();
        traversal.steps.extend(roots.into_iter().rev().map(Step::Expand));
        traversal.run();

        Walk {
            analysis: traversal.analysis,
            expanded: traversal.expanded,
        }
    }
}

/// Result of one sentence's walk.
pub(crate) struct Walk {
    pub analysis: Analysis,
    /// Anchors in the order they were expanded
    pub expanded: Vec<TokenId>,
}

/// Pending work. Steps are pushed in reverse so they pop in discovery order.
enum Step<'d, 'a> {
    /// Expand as a predicate unless already visited.
    Expand(&'a Token),
    /// Emit PS, then expand the subject as a term unless already visited.
    Subject(&'a Token, &'d Dependency<'a>),
    /// Emit PO, then expand the object as a term unless already visited.
    Object(&'a Token, &'d Dependency<'a>),
    /// PP relations of the anchor, then their predicates.
    PredicateModifiers(&'a Token),
    /// TP relations of the anchor, then their predicates.
    TermModifiers(&'a Token),
}

/// State of one sentence's walk. The visited set is local to it.
///
/// Clausal chains are followed on an explicit stack, so nesting depth is bounded by
/// memory rather than by the thread's stack.
struct Traversal<'d, 'a> {
    sentence: SentenceId,
    labels: &'d RelationLabels,
    dependencies: &'d [Dependency<'a>],
    visited: HashSet<TokenId>,
    expanded: Vec<TokenId>,
    analysis: Analysis,
    steps: Vec<Step<'d, 'a>>,
}

impl<'d, 'a> Traversal<'d, 'a> {
    /// Mark `token` visited; false if it already was.
    fn visit(&mut self, token: &Token) -> bool {
        self.visited.insert(token.index)
    }

    fn edge(&self, predicate: &Token, term: &Token, label: &str) -> Edge {
        Edge::new(self.sentence, predicate.index, term.index, label)
    }

    fn emit(&mut self, relation: Relation) {
        debug!(%relation, "found relation");
        self.analysis.push(relation);
    }

    fn run(&mut self) {
        while let Some(step) = self.steps.pop() {
            match step {
                Step::Expand(predicate) => {
                    if self.visit(predicate) {
                        self.analyze_predicate(predicate);
                    }
                }
                Step::Subject(predicate, subject) => {
                    self.emit(Relation::PredicateSubject(self.edge(predicate, subject.dependent, subject.label)));
                    if self.visit(subject.dependent) {
                        self.analyze_term(subject.dependent);
                    }
                }
                Step::Object(predicate, object) => {
                    self.emit(Relation::PredicateObject(self.edge(predicate, object.dependent, object.label)));
                    if self.visit(object.dependent) {
                        self.analyze_term(object.dependent);
                    }
                }
                Step::PredicateModifiers(anchor) => self.predicate_modifiers(anchor),
                Step::TermModifiers(anchor) => self.term_modifiers(anchor),
            }
        }
    }

    /// Subjects, then objects, then modifiers. Each subject or object is fully explored
    /// before the next one is emitted.
    fn analyze_predicate(&mut self, predicate: &'a Token) {
        self.expanded.push(predicate.index);
        let deps = self.dependencies;
        let labels = self.labels;

        self.steps.push(Step::PredicateModifiers(predicate));
        for object in find_all_of(deps, &labels.object, predicate).into_iter().rev() {
            self.steps.push(Step::Object(predicate, object));
        }
        for subject in find_all_of(deps, &labels.subject, predicate).into_iter().rev() {
            self.steps.push(Step::Subject(predicate, subject));
        }
    }

    /// Terms are never predicates of subjects or objects, only anchors for PP/TP expansion.
    fn analyze_term(&mut self, term: &'a Token) {
        self.expanded.push(term.index);
        self.steps.push(Step::PredicateModifiers(term));
    }

    /// predicate-predicate: all relations first, then recurse, then the term modifiers
    fn predicate_modifiers(&mut self, anchor: &'a Token) {
        let deps = self.dependencies;
        let labels = self.labels;

        let predicates = find_all_of(deps, &labels.predicate_modifier, anchor);
        for pp in &predicates {
            self.emit(Relation::PredicatePredicate(self.edge(anchor, pp.dependent, pp.label)));
        }
        self.steps.push(Step::TermModifiers(anchor));
        self.steps.extend(predicates.iter().rev().map(|pp| Step::Expand(pp.dependent)));
    }

    /// term-predicate: the anchor is the modified term, the dependent the predicate
    fn term_modifiers(&mut self, anchor: &'a Token) {
        let deps = self.dependencies;
        let labels = self.labels;

        let modifiers = find_all_of(deps, &labels.term_modifier, anchor);
        for tp in &modifiers {
            self.emit(Relation::TermPredicate(self.edge(tp.dependent, anchor, tp.label)));
        }
        self.steps.extend(modifiers.iter().rev().map(|tp| Step::Expand(tp.dependent)));
    }
}
