use semscope_analyzer::{render_text, DependencySource, SemanticAnalyzer};
use semscope_conllu::Reader;
use semscope_protocol::{Analysis, Corpus, RelationLabels, Sentence};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// The structured response sent back to JavaScript
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub sentences: Vec<SentenceDebug>,
    pub rendered: String,
}

#[derive(Debug, Serialize)]
pub struct SentenceDebug {
    pub text: String,
    pub relations: Vec<RelationDebug>,
}

#[derive(Debug, Serialize)]
pub struct RelationDebug {
    pub kind: String,
    pub predicate: String,
    pub term: String,
    pub label: String,
}

fn word(sentence: &Sentence, id: semscope_protocol::TokenId) -> String {
    sentence.token(id).map_or_else(|| "?".to_string(), |t| t.word.clone())
}

fn report(sentences: &[Sentence], analyses: &[Analysis]) -> AnalysisReport {
    let debug = sentences
        .iter()
        .zip(analyses)
        .map(|(sentence, analysis)| SentenceDebug {
            text: analysis.text.clone(),
            relations: analysis
                .iter()
                .map(|r| RelationDebug {
                    kind: r.kind().to_string(),
                    predicate: word(sentence, r.predicate()),
                    term: word(sentence, r.term()),
                    label: r.label().to_string(),
                })
                .collect(),
        })
        .collect();

    AnalysisReport {
        sentences: debug,
        rendered: render_text(sentences, analyses, false),
    }
}

/// The analyzer instance running in the browser
#[wasm_bindgen]
pub struct SemscopeEngine {
    analyzer: SemanticAnalyzer,
}

#[wasm_bindgen]
impl SemscopeEngine {
    /// `labels` is an optional object with the five label lists; missing lists keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(labels: JsValue, enhanced: bool) -> Result<SemscopeEngine, JsValue> {
        let labels: RelationLabels = if labels.is_undefined() || labels.is_null() {
            RelationLabels::default()
        } else {
            serde_wasm_bindgen::from_value(labels)?
        };
        let source = if enhanced { DependencySource::Enhanced } else { DependencySource::Basic };

        Ok(Self {
            analyzer: SemanticAnalyzer::new(labels).with_source(source),
        })
    }

    /// CoNLL-U text -> sentences -> relations -> JSON
    pub fn analyze(&self, conllu: &str) -> Result<JsValue, JsValue> {
        let sentences = Reader::new()
            .read(conllu)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let analyses = self.analyzer.analyze(&sentences);

        Ok(serde_wasm_bindgen::to_value(&report(&sentences, &analyses))?)
    }

    /// Report the relations stored in a corpus archive (fetched as raw bytes in JS).
    pub fn inspect(&self, data: Vec<u8>) -> Result<JsValue, JsValue> {
        let mut aligned = rkyv::AlignedVec::with_capacity(data.len());
        aligned.extend_from_slice(&data);

        let corpus: Corpus = rkyv::from_bytes(&aligned)
            .map_err(|e| JsValue::from_str(&format!("invalid archive: {:?}", e)))?;

        Ok(serde_wasm_bindgen::to_value(&report(&corpus.sentences, &corpus.analyses))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semscope_conllu::read_sentences;

    #[test]
    fn test_report() {
        let input = "# text = Jack swims\n\
                     1\tJack\tJack\tPROPN\t_\t_\t2\tnsubj\t_\t_\n\
                     2\tswims\tswim\tVERB\t_\t_\t0\troot\t_\t_\n";
        let sentences = read_sentences(input).unwrap();
        let analyses = SemanticAnalyzer::default().analyze(&sentences);

        let report = report(&sentences, &analyses);
        assert_eq!(report.sentences.len(), 1);

        let relation = &report.sentences[0].relations[0];
        assert_eq!(relation.kind, "PS");
        assert_eq!(relation.predicate, "swims");
        assert_eq!(relation.term, "Jack");
        assert_eq!(relation.label, "nsubj");
        assert!(report.rendered.starts_with("Jack swims\n\n[0] swims ( subject:nsubj: Jack )"));
    }
}
