// src/search_sort.rs
//
// Adds DataTables search, sort and paging to one table of a page.
//
// Every insertion checks the page first, so running over an already
// augmented page (or a second table in the same page) does not duplicate
// the stylesheet link or the library scripts.

use crate::config::consts::{
    DATATABLES_CSS, DATATABLES_CSS_CDN, DATATABLES_JS, DATATABLES_JS_CDN, JQUERY_JS, PAGE_SIZE_MENU,
    TABLE_CLASS, TABLE_ID_PREFIX,
};
use crate::core::markup::{Document, ElementRef};
use crate::core::sanitize::decode_entities;
use crate::descriptor::TableBehaviorConfig;
use crate::error::AugmentError;

/// Resolved augmentation settings for one table. Built once by
/// [`SearchSort::configure`], never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSort {
    table_id: String,
    paging: bool,
    sorting: bool,
    searching: bool,
    page_size_change: bool,
    page_size: i32,
    use_online_assets: bool,
}

/// What a [`SearchSort::process`] call added to the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AugmentReport {
    /// Id the initialization script binds to (entities decoded).
    pub table_id: String,
    pub id_assigned: bool,
    pub class_added: bool,
    pub stylesheet_added: bool,
    /// Library scripts added (0, 1 or 2).
    pub scripts_added: usize,
    pub init_added: bool,
}

impl SearchSort {
    /// `table_pos` is the run-wide position of the table, used for the
    /// fallback id `Table-<pos>`.
    pub fn configure(behavior: Option<&TableBehaviorConfig>, table_pos: usize) -> Self {
        let cfg = behavior.cloned().unwrap_or_default();
        Self {
            table_id: format!("{TABLE_ID_PREFIX}{table_pos}"),
            paging: cfg.paging,
            sorting: cfg.sorting,
            searching: cfg.searching,
            page_size_change: cfg.page_size_change,
            page_size: cfg.page_size,
            use_online_assets: cfg.use_online_assets,
        }
    }

    pub fn is_active(&self) -> bool {
        self.paging || self.sorting || self.searching
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn stylesheet_ref(&self) -> &'static str {
        if self.use_online_assets { DATATABLES_CSS_CDN } else { DATATABLES_CSS }
    }

    pub fn script_ref(&self) -> &'static str {
        if self.use_online_assets { DATATABLES_JS_CDN } else { DATATABLES_JS }
    }

    /// Augment `table` inside `doc`. Inactive settings return `Ok(None)`
    /// without touching the document. On error the document is unchanged.
    pub fn process(&self, doc: &mut Document, table: ElementRef) -> Result<Option<AugmentReport>, AugmentError> {
        if !self.is_active() {
            return Ok(None);
        }
        if !doc.element(table).is_some_and(|e| e.is("table")) {
            return Err(AugmentError::NotATable);
        }
        let css_anchor = doc
            .find_last(|e| e.attr_is("rel", "stylesheet"))
            .ok_or(AugmentError::NoStylesheetAnchor)?;

        let mut report = AugmentReport::default();
        self.add_table_attributes(doc, table, &mut report);

        // Stylesheet
        let css = self.stylesheet_ref();
        if doc.find_first(|e| e.is("link") && e.attr("href") == Some(css)).is_none() {
            doc.insert_after(css_anchor, &css_include(css));
            report.stylesheet_added = true;
        }

        // Library scripts
        let js = self.script_ref();
        if last_script(doc, js).is_none() {
            match last_script(doc, JQUERY_JS) {
                Some(jquery) => {
                    doc.insert_after(jquery, &script_include(js));
                    report.scripts_added = 1;
                }
                None => {
                    doc.append_to_body(&join!(&script_include(JQUERY_JS), &script_include(js)));
                    report.scripts_added = 2;
                }
            }
        }

        // Initialization
        let marker = init_marker(&report.table_id);
        let already = doc
            .elements_named("script")
            .any(|s| doc.text(s).contains(&marker));
        if !already {
            if let Some(lib) = last_script(doc, js) {
                doc.insert_after(lib, &self.init_script(&report.table_id));
                report.init_added = true;
            }
        }

        log::debug!("{report:?}");
        Ok(Some(report))
    }

    /// Id if missing or blank, plus the class token (appended to whatever was there).
    fn add_table_attributes(&self, doc: &mut Document, table: ElementRef, report: &mut AugmentReport) {
        let existing = doc.attr(table, "id").map(decode_entities).filter(|id| !id.trim().is_empty());
        match existing {
            Some(id) => report.table_id = id,
            None => {
                doc.set_attr(table, "id", &self.table_id);
                report.table_id = self.table_id.clone();
                report.id_assigned = true;
            }
        }

        // Skipped when the token is already there so a re-run over an
        // augmented page leaves the class alone.
        let class = s!(doc.attr(table, "class").unwrap_or(""));
        if !class.split_whitespace().any(|c| c == TABLE_CLASS) {
            doc.set_attr(table, "class", &join!(&class, " ", TABLE_CLASS));
            report.class_added = true;
        }
    }

    /// The document-ready DataTables call for `table_id`.
    pub fn init_script(&self, table_id: &str) -> String {
        let menu: Vec<String> = std::iter::once(self.page_size)
            .chain(PAGE_SIZE_MENU)
            .map(|n| n.to_string())
            .collect();
        format!(
            "<script>$( document ).ready(function() {{ {}.DataTable({{\
             paging: {}, ordering: {}, searching: {}, pageLength: {}, lengthChange: {}, \
             bSort: true, lengthMenu: [ {} ]}}); }}); </script>",
            init_marker(table_id),
            self.paging,
            self.sorting,
            self.searching,
            self.page_size,
            self.page_size_change,
            menu.join(", "),
        )
    }
}

fn last_script(doc: &Document, src: &str) -> Option<ElementRef> {
    doc.find_last(|e| e.is("script") && e.attr("src") == Some(src))
}

/// jQuery handle for the table. Ids that are not plain CSS identifiers go
/// through `getElementById` with a JS string literal instead of a selector.
fn init_marker(table_id: &str) -> String {
    if is_plain_id(table_id) {
        format!("$('#{table_id}')")
    } else {
        format!("$(document.getElementById({}))", js_string(table_id))
    }
}

fn is_plain_id(id: &str) -> bool {
    let mut chars = id.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Quoted JS string that is also safe inside a `<script>` element.
fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| s!("\"\""))
        .replace('<', "\\u003c")
        .replace('\'', "\\u0027")
}

fn script_include(src: &str) -> String {
    format!("<script src=\"{src}\" type=\"text/javascript\"></script>")
}

fn css_include(href: &str) -> String {
    format!("<link rel=\"stylesheet\" href=\"{href}\" />")
}
