pub mod error;
pub mod parser;
pub mod row;

pub use error::ConlluError;

use crate::parser::{comment, Comment, RowId};
use crate::row::Row;
use semscope_protocol::{EnhancedDependency, Sentence, SentenceId, Token, TokenId};
use tracing::debug;

/// Reads CoNLL-U documents into sentences with 0-based heads.
#[derive(Debug, Clone, Copy)]
pub struct Reader {
    check_heads: bool,
}

impl Default for Reader {
    fn default() -> Self {
        Self { check_heads: true }
    }
}

#[derive(Default)]
struct Block<'a> {
    text: Option<&'a str>,
    rows: Vec<Row<'a>>,
}

impl Reader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep out-of-range heads instead of failing. The analyzer treats them as unattached.
    pub fn lenient() -> Self {
        Self { check_heads: false }
    }

    /// Primary entry point: CoNLL-U text -> Sentences
    pub fn read(&self, input: &str) -> Result<Vec<Sentence>, ConlluError> {
        let mut sentences = Vec::new();
        let mut block = Block::default();
        let mut docid = String::new();

        for (n, line) in input.lines().enumerate() {
            let line_no = n + 1;
            let line = line.trim_end_matches('\r');

            // 1. Blank line closes the sentence
            if line.trim().is_empty() {
                if !block.rows.is_empty() {
                    let id = SentenceId(sentences.len() as u32);
                    sentences.push(self.finish(std::mem::take(&mut block), id, &docid)?);
                }
                block = Block::default();
                continue;
            }

            // 2. Comments carry the text and document id
            if line.starts_with('#') {
                match comment(line) {
                    Ok((_, Comment::Text(text))) => block.text = Some(text),
                    Ok((_, Comment::NewDoc(id))) => docid = id.unwrap_or_default().to_string(),
                    _ => {}
                }
                continue;
            }

            // 3. Token rows
            let row = Row::parse(line, line_no)?;
            match row.id {
                RowId::Word(found) => {
                    let expected = block.rows.len() as u32 + 1;
                    if found != expected {
                        return Err(ConlluError::OutOfSequence {
                            line: line_no,
                            expected,
                            found,
                        });
                    }
                    block.rows.push(row);
                }
                other => debug!(line = line_no, id = ?other, "skipping non-word row"),
            }
        }

        if !block.rows.is_empty() {
            let id = SentenceId(sentences.len() as u32);
            sentences.push(self.finish(block, id, &docid)?);
        }

        debug!(sentences = sentences.len(), "read CoNLL-U document");
        Ok(sentences)
    }

    fn finish(&self, block: Block<'_>, id: SentenceId, docid: &str) -> Result<Sentence, ConlluError> {
        let len = block.rows.len();
        let text = match block.text {
            Some(text) => text.to_string(),
            None => rebuild_text(&block.rows),
        };
        let spans = locate(&text, block.rows.iter().map(|r| r.form));

        let mut tokens = Vec::with_capacity(len);
        for (i, (row, (start, end))) in block.rows.iter().zip(spans).enumerate() {
            let head = self.resolve_head(row.head, row.line, len)?;

            let mut enhanced = Vec::new();
            for edge in row.deps.iter().filter(|e| !e.to_empty_node) {
                enhanced.push(EnhancedDependency {
                    head: self.resolve_head(Some(edge.head), row.line, len)?,
                    label: edge.label.to_string(),
                });
            }

            let category = if row.upos.is_empty() { row.xpos } else { row.upos };
            tokens.push(Token {
                index: TokenId(i as u32),
                word: row.form.to_string(),
                label: row.deprel.to_string(),
                head,
                start,
                end,
                category: category.to_string(),
                tag: row.feats.to_string(),
                enhanced,
            });
        }

        Ok(Sentence {
            id,
            text,
            docid: docid.to_string(),
            tokens,
        })
    }

    /// 1-based CoNLL-U head to 0-based token id; 0 (root) and "_" become None.
    fn resolve_head(&self, head: Option<u32>, line: usize, len: usize) -> Result<Option<TokenId>, ConlluError> {
        match head {
            None | Some(0) => Ok(None),
            Some(h) if self.check_heads && h as usize > len => Err(ConlluError::HeadOutOfRange { line, head: h, len }),
            Some(h) => Ok(Some(TokenId(h - 1))),
        }
    }
}

/// Convenience wrapper around `Reader::new().read(..)`.
pub fn read_sentences(input: &str) -> Result<Vec<Sentence>, ConlluError> {
    Reader::new().read(input)
}

fn rebuild_text(rows: &[Row<'_>]) -> String {
    let mut text = String::new();
    for (i, row) in rows.iter().enumerate() {
        text.push_str(row.form);
        if row.space_after && i + 1 < rows.len() {
            text.push(' ');
        }
    }
    text
}

/// Character spans of `words` found left to right in `text`. A word missing from the
/// text gets an empty span at the current position.
fn locate<'a>(text: &str, words: impl Iterator<Item = &'a str>) -> Vec<(u32, u32)> {
    let mut byte_cursor = 0;
    let mut char_cursor = 0;
    let mut spans = Vec::new();

    for word in words {
        match text[byte_cursor..].find(word) {
            Some(offset) => {
                let found = byte_cursor + offset;
                let start = char_cursor + text[byte_cursor..found].chars().count();
                let end = start + word.chars().count();
                spans.push((start as u32, end as u32));
                byte_cursor = found + word.len();
                char_cursor = end;
            }
            None => spans.push((char_cursor as u32, char_cursor as u32)),
        }
    }
    spans
}
