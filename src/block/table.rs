//! Pipe tables.
//!
//! A table starts when a divider row (`---|:-:`) follows a one-line
//! paragraph with the same number of cells. Later rows are added while
//! they contain a `|`.

use super::{open_paragraph, Block, BlockKind, Body};
use crate::element::{Children, Element, Node};
use crate::limits::MAX_TABLE_COLUMNS;
use crate::line::{trim_blank, Line};

/// Column alignment from the divider row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_divider(cell: &str) -> Option<Self> {
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Some(Alignment::Center),
            (true, false) => Some(Alignment::Left),
            (false, true) => Some(Alignment::Right),
            (false, false) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Table {
    alignments: Vec<Option<Alignment>>,
    head: Vec<Element>,
    rows: Vec<Element>,
}

pub(super) fn start(line: &Line<'_>, current: Option<&Block>) -> Option<Block> {
    let header = open_paragraph(current)?.text();
    if header.contains('\n') || !header.contains('|') {
        return None;
    }
    let text = line.text();
    if !text.bytes().all(|b| matches!(b, b' ' | b'-' | b':' | b'|')) {
        return None;
    }

    let divider = trim_blank(text).trim_matches('|');
    let alignments = divider
        .split('|')
        .map(|cell| {
            let cell = trim_blank(cell);
            (!cell.is_empty()).then(|| Alignment::from_divider(cell))
        })
        .collect::<Option<Vec<_>>>()?;
    if alignments.len() > MAX_TABLE_COLUMNS {
        log::debug!("table with {} columns exceeds {MAX_TABLE_COLUMNS}", alignments.len());
        return None;
    }

    let header_cells = split_unescaped_pipes(trim_blank(header).trim_matches('|'));
    if header_cells.len() != alignments.len() {
        return None;
    }
    let head = header_cells
        .iter()
        .zip(&alignments)
        .map(|(cell, &alignment)| cell_element("th", cell, alignment))
        .collect();

    let table = Table {
        alignments,
        head,
        rows: Vec::new(),
    };
    Some(Block::new(BlockKind::Table, Body::Table(table)).identified())
}

impl Table {
    pub(super) fn continue_with(&mut self, line: &Line<'_>, interrupted: usize) -> bool {
        if interrupted > 0 {
            return false;
        }
        let text = line.text();
        if self.alignments.len() != 1 && !text.contains('|') {
            return false;
        }

        let row = trim_blank(text).trim_matches('|');
        let cells = row_cells(row)
            .into_iter()
            .zip(&self.alignments)
            .map(|(cell, &alignment)| cell_element("td", cell, alignment))
            .collect();
        self.rows.push(Node::named("tr", Children::Many(cells)).into());
        true
    }

    pub(super) fn into_element(self) -> Element {
        let header_row = Node::named("tr", Children::Many(self.head));
        let thead = Node::named("thead", Children::Many(vec![header_row.into()]));
        let tbody = Node::named("tbody", Children::Many(self.rows));
        Node::named("table", Children::Many(vec![thead.into(), tbody.into()])).into()
    }
}

fn cell_element(name: &'static str, text: &str, alignment: Option<Alignment>) -> Element {
    let mut cell = Node::inline(name, trim_blank(text));
    if let Some(alignment) = alignment {
        cell.attributes
            .set("style", Some(format!("text-align: {};", alignment.as_str())));
    }
    cell.into()
}

/// Split at `|` bytes that are not preceded by a backslash.
fn split_unescaped_pipes(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut cells = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'|' => {
                cells.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    cells.push(&text[start..]);
    cells
}

/// Cells of a body row. A `|` inside a code span or escaped with a
/// backslash does not separate cells, and empty cells are dropped.
fn row_cells(row: &str) -> Vec<&str> {
    let bytes = row.as_bytes();
    let mut cells = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let start = pos;
        while let Some(&b) = bytes.get(pos) {
            match b {
                b'|' => break,
                b'\\' if bytes.get(pos + 1) == Some(&b'|') => pos += 2,
                b'`' => {
                    let span = bytes[pos + 1..].iter().take_while(|&&b| b != b'`').count();
                    if span > 0 && bytes.get(pos + 1 + span) == Some(&b'`') {
                        pos += span + 2;
                    } else {
                        pos += 1;
                    }
                }
                _ => pos += 1,
            }
        }
        if pos > start {
            cells.push(&row[start..pos]);
        } else {
            pos += 1;
        }
    }
    cells
}
