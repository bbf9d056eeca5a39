// src/runner.rs
//
// The batch loop. Each descriptor goes through
//   advance → locate → transform → augment + persist
// and a failure in any step only drops that descriptor.

use std::path::PathBuf;

use crate::core::markup::{Document, ElementRef};
use crate::descriptor::{DescriptorStore, TableAlterDescriptor};
use crate::error::AlterError;
use crate::file;
use crate::locate;
use crate::progress::Progress;
use crate::search_sort::SearchSort;
use crate::transform::{TableEdit, Unchanged};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    /// 1-based descriptor number and what went wrong.
    pub failures: Vec<(usize, AlterError)>,
    /// Entries dropped while reading the control file.
    pub skipped: usize,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.skipped == 0
    }
}

/// The located work item for the current descriptor.
struct Located {
    doc: Document,
    table: ElementRef,
    table_pos: usize,
}

pub struct Controller {
    store: DescriptorStore,
    edit: Box<dyn TableEdit>,
    dry_run: bool,
    /// Descriptors pulled so far.
    n: usize,
    /// Tables located so far across the whole run.
    tables_seen: usize,
    located: Option<Located>,
}

impl Controller {
    pub fn new(store: DescriptorStore) -> Self {
        Self {
            store,
            edit: Box::new(Unchanged),
            dry_run: false,
            n: 0,
            tables_seen: 0,
            located: None,
        }
    }

    /// Read and parse a control file.
    pub fn from_control_file(path: &std::path::Path) -> Result<Self, AlterError> {
        if !path.is_file() {
            return Err(AlterError::ControlFileMissing(path.to_path_buf()));
        }
        let xml = file::read_text(path)?;
        Ok(Self::new(DescriptorStore::parse(&xml)))
    }

    pub fn with_table_edit(mut self, edit: Box<dyn TableEdit>) -> Self {
        self.edit = edit;
        self
    }

    pub fn dry_run(mut self, on: bool) -> Self {
        self.dry_run = on;
        self
    }

    /// Move to the next descriptor. False when the store is exhausted.
    pub fn advance(&mut self) -> bool {
        self.located = None;
        let more = self.store.advance();
        if more {
            self.n += 1;
        }
        more
    }

    pub fn current(&self) -> Option<&TableAlterDescriptor> {
        self.store.current()
    }

    /// Load the source document and find the requested table.
    pub fn locate(&mut self) -> Result<(), AlterError> {
        let Some(d) = self.store.current() else { return Ok(()) };
        let doc = file::load_document(&d.source_file)?;
        let table = locate::nth_table(&doc, d.table_index).ok_or_else(|| AlterError::TableNotFound {
            path: d.source_file.clone(),
            index: d.table_index,
            found: locate::count_tables(&doc),
        })?;
        self.tables_seen += 1;
        self.located = Some(Located { doc, table, table_pos: self.tables_seen });
        Ok(())
    }

    /// Header then row edits, in place.
    pub fn transform(&mut self) -> Result<(), AlterError> {
        let (Some(d), Some(loc)) = (self.store.current(), self.located.as_mut()) else { return Ok(()) };
        let wrap = |source| AlterError::Transform { path: d.source_file.clone(), source };
        self.edit.edit_header(d, &mut loc.doc, loc.table).map_err(wrap)?;
        self.edit.edit_rows(d, &mut loc.doc, loc.table).map_err(wrap)?;
        Ok(())
    }

    /// Apply search/sort/paging (a no-op without an active behavior) and
    /// write the document to the output path.
    pub fn augment_and_persist(&mut self) -> Result<Option<PathBuf>, AlterError> {
        let (Some(d), Some(loc)) = (self.store.current(), self.located.as_mut()) else { return Ok(None) };

        let ss = SearchSort::configure(d.behavior.as_ref(), loc.table_pos);
        let report = ss
            .process(&mut loc.doc, loc.table)
            .map_err(|source| AlterError::Augment { path: d.source_file.clone(), source })?;
        if let Some(r) = &report {
            log::info!(
                "{}: table {} augmented as #{} (stylesheet: {}, scripts: {}, init: {})",
                d.source_file.display(),
                d.table_index,
                r.table_id,
                r.stylesheet_added,
                r.scripts_added,
                r.init_added,
            );
        }

        if self.dry_run {
            log::info!("Dry run, not writing {}", d.output_file.display());
            return Ok(Some(d.output_file.clone()));
        }
        file::save_document(&loc.doc, &d.output_file).map(Some)
    }

    fn process_current(&mut self) -> Result<Option<PathBuf>, AlterError> {
        self.locate()?;
        self.transform()?;
        self.augment_and_persist()
    }

    /// Drive every descriptor to completion.
    pub fn run(&mut self, mut progress: Option<&mut dyn Progress>) -> RunSummary {
        let mut summary = RunSummary { skipped: self.store.skipped, ..RunSummary::default() };
        if let Some(p) = progress.as_deref_mut() {
            p.begin(self.store.remaining());
        }

        while self.advance() {
            let n = self.n;
            match self.process_current() {
                Ok(Some(path)) => {
                    log::info!("Descriptor {n}: done ({})", path.display());
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(n, &path);
                    }
                    if !self.dry_run {
                        summary.files_written.push(path);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Descriptor {n}: {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(n, &e);
                    }
                    summary.failures.push((n, e));
                }
            }
        }
        self.located = None;

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        log::info!(
            "Done: {} written, {} failed, {} skipped",
            summary.files_written.len(),
            summary.failures.len(),
            summary.skipped,
        );
        summary
    }
}
