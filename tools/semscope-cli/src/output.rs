use crate::config::OutputFormat;
use anyhow::Result;
use semscope_analyzer::{render_text, short_form};
use semscope_protocol::{Analysis, Sentence};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RelationReport<'a> {
    pub kind: String,
    pub label: &'a str,
    pub predicate: &'a str,
    pub predicate_index: u32,
    pub term: &'a str,
    pub term_index: u32,
}

#[derive(Debug, Serialize)]
pub struct SentenceReport<'a> {
    pub sentence: u32,
    pub text: &'a str,
    pub relations: Vec<RelationReport<'a>>,
}

/// Relations with their words resolved, for JSON output.
pub fn reports<'a>(sentences: &'a [Sentence], analyses: &'a [Analysis]) -> Vec<SentenceReport<'a>> {
    let mut reports = Vec::with_capacity(analyses.len());
    for (sentence, analysis) in sentences.iter().zip(analyses) {
        let word = |id| sentence.token(id).map_or("?", |t| t.word.as_str());
        let relations = analysis
            .iter()
            .map(|r| RelationReport {
                kind: r.kind().to_string(),
                label: r.label(),
                predicate: word(r.predicate()),
                predicate_index: r.predicate().0,
                term: word(r.term()),
                term_index: r.term().0,
            })
            .collect();
        reports.push(SentenceReport {
            sentence: analysis.sentence.0,
            text: &analysis.text,
            relations,
        });
    }
    reports
}

pub fn render(sentences: &[Sentence], analyses: &[Analysis], format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Text => render_text(sentences, analyses, false),
        OutputFormat::Full => render_text(sentences, analyses, true),
        OutputFormat::Short => {
            let mut out = String::new();
            for (sentence, analysis) in sentences.iter().zip(analyses) {
                let forms: Vec<String> = analysis.iter().map(|r| short_form(sentence, r)).collect();
                out.push_str(&analysis.text);
                out.push('\t');
                out.push_str(&forms.join(" "));
                out.push('\n');
            }
            out
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&reports(sentences, analyses))?;
            json.push('\n');
            json
        }
    };
    Ok(out)
}
