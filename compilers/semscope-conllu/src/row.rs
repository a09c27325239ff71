use crate::error::ConlluError;
use crate::parser::{self, RawEdge, RowId};

/// A CoNLL-U token line with its columns borrowed from the input.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub line: usize,
    pub id: RowId,
    pub form: &'a str,
    pub upos: &'a str,
    pub xpos: &'a str,
    pub feats: &'a str,
    /// 1-based, 0 for the root
    pub head: Option<u32>,
    pub deprel: &'a str,
    pub deps: Vec<RawEdge<'a>>,
    pub space_after: bool,
}

fn column(value: &str) -> &str {
    if value == "_" {
        ""
    } else {
        value
    }
}

impl<'a> Row<'a> {
    pub fn parse(text: &'a str, line: usize) -> Result<Self, ConlluError> {
        let columns: Vec<&'a str> = text.split('\t').collect();
        if columns.len() != 10 {
            return Err(ConlluError::ColumnCount {
                line,
                found: columns.len(),
            });
        }

        let invalid = |column: &'static str, value: &str| ConlluError::InvalidField {
            line,
            column,
            value: value.to_string(),
        };

        let (_, id) = parser::row_id(columns[0]).map_err(|_| invalid("ID", columns[0]))?;
        let (_, head) = parser::head(columns[6]).map_err(|_| invalid("HEAD", columns[6]))?;
        let (_, deps) = parser::deps(columns[8]).map_err(|_| invalid("DEPS", columns[8]))?;

        Ok(Self {
            line,
            id,
            form: columns[1],
            upos: column(columns[3]),
            xpos: column(columns[4]),
            feats: column(columns[5]),
            head,
            deprel: column(columns[7]),
            deps,
            space_after: parser::space_after(columns[9]),
        })
    }
}
