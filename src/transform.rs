// src/transform.rs
//
// Header and row edits applied to the located table before augmentation.
// The edit rules belong to the caller; the run only guarantees each step is
// called once per descriptor, header first, on the same table element.

use crate::core::markup::{Document, ElementRef};
use crate::descriptor::TableAlterDescriptor;
use crate::error::TransformError;

pub trait TableEdit {
    fn edit_header(
        &self,
        _descriptor: &TableAlterDescriptor,
        _doc: &mut Document,
        _table: ElementRef,
    ) -> Result<(), TransformError> {
        Ok(())
    }

    fn edit_rows(
        &self,
        _descriptor: &TableAlterDescriptor,
        _doc: &mut Document,
        _table: ElementRef,
    ) -> Result<(), TransformError> {
        Ok(())
    }
}

/// Leaves header and rows as they are.
pub struct Unchanged;
impl TableEdit for Unchanged {}
