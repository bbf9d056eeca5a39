// src/descriptor.rs
//
// Control file → ordered list of table-alteration descriptors.
//
// <TableAlterDescriptors>
//   <TableAlterDescriptor sourceFile="docs/a.html" outputFile="out/a.html" tableIndex="2">
//     <behavior paging="true" sorting="true" searching="true" pageSize="5" pageSizeChange="false" />
//   </TableAlterDescriptor>
// </TableAlterDescriptors>
//
// `sourceFile`, `outputFile` and `tableIndex` may also be written as child
// elements of the same name.

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::config::consts::{BEHAVIOR_TAG, DEFAULT_PAGE_SIZE, DEFAULT_TABLE_INDEX, DESCRIPTOR_TAG};
use crate::core::html::is_true;
use crate::core::markup::{Document, Element, ElementRef};
use crate::core::sanitize::clean_value;
use crate::error::ConfigWarning;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableBehaviorConfig {
    pub paging: bool,
    pub sorting: bool,
    pub searching: bool,
    pub page_size: i32,
    pub page_size_change: bool,
    pub use_online_assets: bool,
}

impl Default for TableBehaviorConfig {
    fn default() -> Self {
        Self {
            paging: false,
            sorting: false,
            searching: false,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_change: false,
            use_online_assets: false,
        }
    }
}

impl TableBehaviorConfig {
    pub fn is_active(&self) -> bool {
        self.paging || self.sorting || self.searching
    }

    /// Read a `<behavior>` element. Page size and page size change are only
    /// looked at when paging is on.
    pub fn from_element(behavior: &Element<'_>) -> (Self, Option<ConfigWarning>) {
        let mut cfg = Self {
            paging: parse_bool_attr(behavior, "paging"),
            sorting: parse_bool_attr(behavior, "sorting"),
            searching: parse_bool_attr(behavior, "searching"),
            use_online_assets: parse_bool_attr(behavior, "useOnlineDataTables"),
            ..Self::default()
        };
        let mut warning = None;
        if cfg.paging {
            cfg.page_size_change = parse_bool_attr(behavior, "pageSizeChange");
            let (size, w) = parse_page_size(behavior.attr("pageSize"));
            cfg.page_size = size;
            warning = w;
        }
        (cfg, warning)
    }
}

pub fn parse_bool_attr(el: &Element<'_>, name: &str) -> bool {
    is_true(el.attr(name))
}

/// Integer page size, or the default plus a warning.
pub fn parse_page_size(raw: Option<&str>) -> (i32, Option<ConfigWarning>) {
    match raw.map(str::parse::<i32>) {
        Some(Ok(n)) => (n, None),
        _ => (
            DEFAULT_PAGE_SIZE,
            Some(ConfigWarning::PageSize { value: raw.map(String::from), fallback: DEFAULT_PAGE_SIZE }),
        ),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableAlterDescriptor {
    pub source_file: PathBuf,
    pub output_file: PathBuf,
    /// 1-based ordinal among the document's tables.
    pub table_index: usize,
    pub behavior: Option<TableBehaviorConfig>,
}

/// Descriptors in declaration order, consumed front to back.
#[derive(Debug, Default)]
pub struct DescriptorStore {
    pending: VecDeque<TableAlterDescriptor>,
    current: Option<TableAlterDescriptor>,
    /// Entries dropped while parsing (no source file).
    pub skipped: usize,
    pub warnings: Vec<ConfigWarning>,
}

impl DescriptorStore {
    pub fn new(descriptors: Vec<TableAlterDescriptor>) -> Self {
        Self { pending: descriptors.into(), ..Self::default() }
    }

    /// Parse control-file markup. Never fails: unusable entries are skipped
    /// and bad numbers fall back to defaults, both recorded on the store.
    pub fn parse(xml: &str) -> Self {
        let doc = Document::parse(xml);
        let mut store = Self::default();

        let entries: Vec<ElementRef> = doc
            .elements()
            .filter(|(_, e)| e.is(DESCRIPTOR_TAG))
            .map(|(r, _)| r)
            .collect();

        for (i, entry) in entries.into_iter().enumerate() {
            let n = i + 1;
            let Some(source) = field(&doc, entry, "sourceFile") else {
                log::error!("Descriptor {n} has no sourceFile; skipped.");
                store.skipped += 1;
                continue;
            };
            let output = field(&doc, entry, "outputFile").unwrap_or_else(|| source.clone());

            let raw_index = field(&doc, entry, "tableIndex");
            let table_index = match raw_index.as_deref().map(str::parse::<usize>) {
                Some(Ok(v)) if v > 0 => v,
                _ => {
                    store.warnings.push(ConfigWarning::TableIndex {
                        entry: n,
                        value: raw_index,
                        fallback: DEFAULT_TABLE_INDEX,
                    });
                    DEFAULT_TABLE_INDEX
                }
            };

            let behavior = doc
                .descendants(entry)
                .find(|(_, e)| e.is(BEHAVIOR_TAG))
                .map(|(_, e)| {
                    let (cfg, warning) = TableBehaviorConfig::from_element(&e);
                    store.warnings.extend(warning);
                    cfg
                });

            store.pending.push_back(TableAlterDescriptor {
                source_file: PathBuf::from(source),
                output_file: PathBuf::from(output),
                table_index,
                behavior,
            });
        }

        for w in &store.warnings {
            log::warn!("{w}");
        }
        store
    }

    /// Make the next descriptor current. False once exhausted.
    pub fn advance(&mut self) -> bool {
        self.current = self.pending.pop_front();
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&TableAlterDescriptor> {
        self.current.as_ref()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

/// Attribute on the entry element, else text of a same-named child element.
fn field(doc: &Document, entry: ElementRef, name: &str) -> Option<String> {
    if let Some(v) = doc.attr(entry, name) {
        return clean_value(v);
    }
    let child = doc.descendants(entry).find(|(_, e)| e.is(name)).map(|(r, _)| r)?;
    clean_value(&doc.text(child))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn behavior(attrs: &str) -> (TableBehaviorConfig, Option<ConfigWarning>) {
        let doc = Document::parse(&format!("<behavior {attrs} />"));
        let el = doc.find_first(|e| e.is("behavior")).unwrap();
        TableBehaviorConfig::from_element(&doc.element(el).unwrap())
    }

    #[test]
    fn page_size_parses_or_falls_back() {
        assert_eq!(parse_page_size(Some("5")), (5, None));

        let (v, w) = parse_page_size(Some("abc"));
        assert_eq!(v, 10);
        assert_eq!(w, Some(ConfigWarning::PageSize { value: Some(s!("abc")), fallback: 10 }));

        let (v, w) = parse_page_size(None);
        assert_eq!(v, 10);
        assert!(w.unwrap().to_string().contains("missing"));
    }

    #[test]
    fn flags_are_case_insensitive_true_only() {
        let (cfg, w) = behavior(r#"paging="TRUE" sorting="yes" searching="True" pageSize="25""#);
        assert!(cfg.paging && cfg.searching && !cfg.sorting);
        assert_eq!(cfg.page_size, 25);
        assert!(w.is_none());
        assert!(cfg.is_active());
    }

    #[test]
    fn page_size_ignored_without_paging() {
        let (cfg, w) = behavior(r#"sorting="true" pageSize="oops" pageSizeChange="true""#);
        assert_eq!(cfg.page_size, 10);
        assert!(!cfg.page_size_change);
        assert!(w.is_none());
    }

    #[test]
    fn bad_page_size_warns_when_paging() {
        let (cfg, w) = behavior(r#"paging="true" pageSize="abc""#);
        assert_eq!(cfg.page_size, 10);
        assert!(matches!(w, Some(ConfigWarning::PageSize { .. })));
    }

    #[test]
    fn all_false_is_inactive() {
        let (cfg, _) = behavior(r#"paging="false" useOnlineDataTables="true""#);
        assert!(!cfg.is_active());
        assert!(cfg.use_online_assets);
    }

    #[test]
    fn parses_entries_in_order_with_defaults() {
        let xml = r#"<?xml version="1.0"?>
<TableAlterDescriptors>
  <TableAlterDescriptor sourceFile="a.html" outputFile="out/a.html" tableIndex="2">
    <behavior paging="true" pageSize="5" />
  </TableAlterDescriptor>
  <TableAlterDescriptor>
    <sourceFile> b.html </sourceFile>
    <tableIndex>zero</tableIndex>
  </TableAlterDescriptor>
  <TableAlterDescriptor outputFile="nowhere.html" />
</TableAlterDescriptors>"#;
        let mut store = DescriptorStore::parse(xml);
        assert_eq!(store.skipped, 1);
        assert_eq!(store.remaining(), 2);
        assert_eq!(store.warnings.len(), 1);

        assert!(store.advance());
        let first = store.current().unwrap().clone();
        assert_eq!(first.source_file, PathBuf::from("a.html"));
        assert_eq!(first.output_file, PathBuf::from("out/a.html"));
        assert_eq!(first.table_index, 2);
        assert_eq!(first.behavior.unwrap().page_size, 5);

        assert!(store.advance());
        let second = store.current().unwrap();
        assert_eq!(second.output_file, PathBuf::from("b.html"));
        assert_eq!(second.table_index, 1);
        assert!(second.behavior.is_none());

        assert!(!store.advance());
        assert!(store.current().is_none());
    }
}
