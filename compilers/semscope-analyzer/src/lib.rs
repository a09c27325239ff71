pub mod analyzer;
pub mod dependency;
pub mod graph;
pub mod render;

pub use analyzer::SemanticAnalyzer;
pub use dependency::{find_all_of, find_one_of, Dependency, DependencySource};
pub use graph::{EdgeLabel, SentenceGraph, TokenNode};
pub use render::{render_text, short_form, AnalysisText, RelationText};
