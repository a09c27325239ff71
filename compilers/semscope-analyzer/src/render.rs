use semscope_protocol::{Analysis, Relation, RelationKind, Sentence, Token, TokenId};
use std::fmt;

fn word(sentence: &Sentence, id: TokenId) -> &str {
    sentence.token(id).map_or("?", |t| t.word.as_str())
}

fn write_span(f: &mut fmt::Formatter<'_>, token: Option<&Token>) -> fmt::Result {
    match token {
        Some(t) => write!(f, " ({}-{}) ", t.start, t.end),
        None => f.write_str(" (?) "),
    }
}

/// One relation as `predicate ( role:label: term )`.
pub struct RelationText<'a> {
    pub sentence: &'a Sentence,
    pub relation: &'a Relation,
    /// Adds the `P ` marker and character spans
    pub full: bool,
}

impl fmt::Display for RelationText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = self.relation.edge();
        if self.full {
            f.write_str("P ")?;
        }
        f.write_str(word(self.sentence, edge.predicate))?;
        if self.full {
            write_span(f, self.sentence.token(edge.predicate))?;
        }

        write!(
            f,
            " ( {}:{}: {}",
            self.relation.kind().role(),
            edge.label,
            word(self.sentence, edge.term)
        )?;
        if self.full {
            write_span(f, self.sentence.token(edge.term))?;
        }
        f.write_str(" )")
    }
}

/// Sentence text, a blank line, then one numbered line per relation.
pub struct AnalysisText<'a> {
    pub sentence: &'a Sentence,
    pub analysis: &'a Analysis,
    pub full: bool,
}

impl fmt::Display for AnalysisText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n", self.analysis.text)?;
        for (index, relation) in self.analysis.iter().enumerate() {
            let line = RelationText {
                sentence: self.sentence,
                relation,
                full: self.full,
            };
            writeln!(f, "[{}] {}", index, line)?;
        }
        Ok(())
    }
}

/// Render every analysis against the sentence at the same position, separated by blank lines.
pub fn render_text(sentences: &[Sentence], analyses: &[Analysis], full: bool) -> String {
    let mut out = String::new();
    for (sentence, analysis) in sentences.iter().zip(analyses) {
        out.push_str(&AnalysisText { sentence, analysis, full }.to_string());
        out.push('\n');
    }
    out
}

/// Compact form: `swims(s=Jack)`, `gave(o=books)`, `(said~left)`, `swims(man)`.
pub fn short_form(sentence: &Sentence, relation: &Relation) -> String {
    let predicate = word(sentence, relation.predicate());
    let term = word(sentence, relation.term());
    match relation.kind() {
        RelationKind::PS => format!("{}(s={})", predicate, term),
        RelationKind::PO => format!("{}(o={})", predicate, term),
        RelationKind::PP => format!("({}~{})", predicate, term),
        RelationKind::TP => format!("{}({})", predicate, term),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SemanticAnalyzer;

    fn sentences() -> Vec<Sentence> {
        vec![
            Sentence::new(
                0,
                "Jack swims",
                vec![
                    Token::new(0, "Jack", Some(1), "nsubj").with_span(0, 4),
                    Token::new(1, "swims", None, "root").with_span(5, 10),
                ],
            ),
            Sentence::new(
                1,
                "the man who swims sings",
                vec![
                    Token::new(0, "the", Some(1), "det"),
                    Token::new(1, "man", Some(4), "nsubj"),
                    Token::new(2, "who", Some(3), "nsubj"),
                    Token::new(3, "swims", Some(1), "acl:relcl"),
                    Token::new(4, "sings", None, "root"),
                ],
            ),
        ]
    }

    #[test]
    fn test_render_text() {
        let sentences = sentences();
        let analyses = SemanticAnalyzer::default().analyze(&sentences);
        let text = render_text(&sentences, &analyses, false);

        let expected = "Jack swims\n\n\
                        [0] swims ( subject:nsubj: Jack )\n\
                        \n\
                        the man who swims sings\n\n\
                        [0] sings ( subject:nsubj: man )\n\
                        [1] swims ( term:acl:relcl: man )\n\
                        [2] swims ( subject:nsubj: who )\n\
                        \n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_shared_ids() {
        let distinct = sentences();
        let expected = render_text(&distinct, &SemanticAnalyzer::default().analyze(&distinct), false);

        let mut sentences = sentences();
        sentences[1].id = sentences[0].id;
        let analyses = SemanticAnalyzer::default().analyze(&sentences);
        let text = render_text(&sentences, &analyses, false);

        assert!(text.contains("[0] sings ( subject:nsubj: man )\n"));
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_full() {
        let sentences = sentences();
        let analysis = SemanticAnalyzer::default().analyze_sentence(&sentences[0]);
        let line = RelationText {
            sentence: &sentences[0],
            relation: &analysis.relations[0],
            full: true,
        };
        assert_eq!(line.to_string(), "P swims (5-10)  ( subject:nsubj: Jack (0-4)  )");
    }

    #[test]
    fn test_short_forms() {
        let sentences = sentences();
        let analysis = SemanticAnalyzer::default().analyze_sentence(&sentences[1]);
        let forms: Vec<_> = analysis.iter().map(|r| short_form(&sentences[1], r)).collect();
        assert_eq!(forms, ["sings(s=man)", "swims(man)", "swims(s=who)"]);
    }
}
