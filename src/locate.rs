// src/locate.rs
use crate::core::markup::{Document, ElementRef};

/// The `ordinal`-th `<table>` in document order, counting from 1.
/// Nested tables count in the order their start tags appear.
pub fn nth_table(doc: &Document, ordinal: usize) -> Option<ElementRef> {
    let index = ordinal.checked_sub(1)?;
    doc.elements_named("table").nth(index)
}

pub fn count_tables(doc: &Document) -> usize {
    doc.elements_named("table").count()
}
