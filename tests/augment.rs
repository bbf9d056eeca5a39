// tests/augment.rs
//
// Search/sort/paging injection on synthetic pages.

use table_alter::core::markup::Document;
use table_alter::locate::nth_table;
use table_alter::{SearchSort, TableBehaviorConfig};

const PAGE_WITH_JQUERY: &str = "<html><head>\
<link rel=\"stylesheet\" href=\"assets/css/site.css\">\
<script src=\"assets/js/jquery.js\"></script>\
</head><body>\
<table class=\"foo\"><tr><th>A</th></tr><tr><td>1</td></tr></table>\
</body></html>";

const PAGE_BARE: &str = "<html><head>\
<link rel=\"stylesheet\" href=\"assets/css/site.css\">\
</head><body>\
<table><tr><td>1</td></tr></table>\
<table id=\"keep-me\"><tr><td>2</td></tr></table>\
</body></html>";

fn full() -> TableBehaviorConfig {
    TableBehaviorConfig { paging: true, sorting: true, searching: true, page_size: 5, ..Default::default() }
}

fn count(doc: &Document, tag: &str, attr: &str, value: &str) -> usize {
    doc.elements().filter(|(_, e)| e.is(tag) && e.attr(attr) == Some(value)).count()
}

fn init_scripts(doc: &Document) -> usize {
    doc.elements_named("script").filter(|s| doc.text(*s).contains(".DataTable(")).count()
}

#[test]
fn inactive_configs_are_byte_identical_no_ops() {
    let configs = [
        None,
        Some(TableBehaviorConfig::default()),
        Some(TableBehaviorConfig { page_size: 3, page_size_change: true, use_online_assets: true, ..Default::default() }),
    ];
    for cfg in configs {
        let mut doc = Document::parse(PAGE_WITH_JQUERY);
        let t = nth_table(&doc, 1).unwrap();
        let out = SearchSort::configure(cfg.as_ref(), 1).process(&mut doc, t).unwrap();
        assert!(out.is_none());
        assert_eq!(doc.html(), PAGE_WITH_JQUERY);
    }
}

#[test]
fn existing_jquery_gets_only_the_extension_script() {
    let mut doc = Document::parse(PAGE_WITH_JQUERY);
    let t = nth_table(&doc, 1).unwrap();
    let report = SearchSort::configure(Some(&full()), 3).process(&mut doc, t).unwrap().unwrap();

    assert!(report.id_assigned && report.class_added && report.stylesheet_added && report.init_added);
    assert_eq!(report.scripts_added, 1);
    assert_eq!(report.table_id, "Table-3");

    let html = doc.html();
    assert!(html.contains("<table class=\"foo display\" id=\"Table-3\">"));
    assert_eq!(count(&doc, "script", "src", "assets/js/jquery.js"), 1);
    assert_eq!(count(&doc, "script", "src", "assets/js/jquery.dataTables.min.js"), 1);
    assert_eq!(count(&doc, "link", "href", "assets/css/jquery.dataTables.min.css"), 1);

    // link right after the site stylesheet, extension right after jquery, init right after extension
    assert!(html.contains(
        "<link rel=\"stylesheet\" href=\"assets/css/site.css\">\
         <link rel=\"stylesheet\" href=\"assets/css/jquery.dataTables.min.css\" />"
    ));
    assert!(html.contains(
        "<script src=\"assets/js/jquery.js\"></script>\
         <script src=\"assets/js/jquery.dataTables.min.js\" type=\"text/javascript\"></script>\
         <script>$( document ).ready(function() { $('#Table-3').DataTable("
    ));
    assert!(html.contains("pageLength: 5"));
    assert!(html.contains("lengthMenu: [ 5, 10, 25, 50, 75, 100 ]"));
}

#[test]
fn missing_jquery_appends_both_scripts_to_body() {
    let mut doc = Document::parse(PAGE_BARE);
    let t = nth_table(&doc, 1).unwrap();
    let report = SearchSort::configure(Some(&full()), 1).process(&mut doc, t).unwrap().unwrap();
    assert_eq!(report.scripts_added, 2);

    let html = doc.html();
    assert!(html.contains("<table id=\"Table-1\" class=\" display\">"));
    assert!(html.ends_with(
        "<script src=\"assets/js/jquery.js\" type=\"text/javascript\"></script>\
         <script src=\"assets/js/jquery.dataTables.min.js\" type=\"text/javascript\"></script>\
         <script>$( document ).ready(function() { $('#Table-1').DataTable({paging: true, ordering: true, \
         searching: true, pageLength: 5, lengthChange: false, bSort: true, \
         lengthMenu: [ 5, 10, 25, 50, 75, 100 ]}); }); </script></body></html>"
    ));
}

#[test]
fn processing_twice_adds_nothing_more() {
    let mut doc = Document::parse(PAGE_WITH_JQUERY);
    let ss = SearchSort::configure(Some(&full()), 1);

    let t = nth_table(&doc, 1).unwrap();
    ss.process(&mut doc, t).unwrap();
    let once = doc.html();

    let t = nth_table(&doc, 1).unwrap();
    let again = ss.process(&mut doc, t).unwrap().unwrap();
    assert!(!again.stylesheet_added && !again.init_added && !again.class_added && !again.id_assigned);
    assert_eq!(again.scripts_added, 0);
    assert_eq!(doc.html(), once);
}

#[test]
fn second_table_in_same_page_shares_includes() {
    let mut doc = Document::parse(PAGE_BARE);
    let t1 = nth_table(&doc, 1).unwrap();
    SearchSort::configure(Some(&full()), 1).process(&mut doc, t1).unwrap();
    let t2 = nth_table(&doc, 2).unwrap();
    let report = SearchSort::configure(Some(&full()), 2).process(&mut doc, t2).unwrap().unwrap();

    // pre-existing id wins over Table-2
    assert_eq!(report.table_id, "keep-me");
    assert!(!report.id_assigned);
    assert_eq!(count(&doc, "table", "id", "keep-me"), 1);

    assert_eq!(count(&doc, "script", "src", "assets/js/jquery.js"), 1);
    assert_eq!(count(&doc, "script", "src", "assets/js/jquery.dataTables.min.js"), 1);
    assert_eq!(count(&doc, "link", "href", "assets/css/jquery.dataTables.min.css"), 1);
    assert_eq!(init_scripts(&doc), 2);
    assert!(doc.html().contains("$('#keep-me').DataTable("));
}

#[test]
fn online_assets_reference_the_cdn() {
    let mut doc = Document::parse(PAGE_WITH_JQUERY);
    let t = nth_table(&doc, 1).unwrap();
    let cfg = TableBehaviorConfig { sorting: true, use_online_assets: true, ..Default::default() };
    SearchSort::configure(Some(&cfg), 1).process(&mut doc, t).unwrap();

    let html = doc.html();
    assert!(html.contains("href=\"https://cdn.datatables.net/1.12.1/css/jquery.dataTables.min.css\""));
    assert!(html.contains("src=\"https://cdn.datatables.net/1.12.1/js/jquery.dataTables.min.js\""));
    assert!(!html.contains("assets/js/jquery.dataTables.min.js"));
    // jquery itself stays local
    assert_eq!(count(&doc, "script", "src", "assets/js/jquery.js"), 1);
    assert!(html.contains("paging: false, ordering: true, searching: false, pageLength: 10"));
}

#[test]
fn blank_ids_are_replaced_and_odd_ids_still_bind() {
    let cases = [
        ("<table id=\"\">", "Table-4", "<table id=\"Table-4\" class=\" display\">", "$('#Table-4').DataTable("),
        ("<table id>", "Table-4", "<table id=\"Table-4\" class=\" display\">", "$('#Table-4').DataTable("),
        ("<table id=\"  \">", "Table-4", "<table id=\"Table-4\" class=\" display\">", "$('#Table-4').DataTable("),
        (
            "<table id=\"it's\">",
            "it's",
            "<table id=\"it's\" class=\" display\">",
            "$(document.getElementById(\"it\\u0027s\")).DataTable(",
        ),
        (
            "<table id=\"a&amp;b\">",
            "a&b",
            "<table id=\"a&amp;b\" class=\" display\">",
            "$(document.getElementById(\"a&b\")).DataTable(",
        ),
    ];
    let cfg = TableBehaviorConfig { sorting: true, ..Default::default() };

    for (open, id, tag, init) in cases {
        let src = format!(
            "<html><head><link rel=\"stylesheet\" href=\"s.css\"></head>\
             <body>{open}<tr><td>1</td></tr></table></body></html>"
        );
        let mut doc = Document::parse(&src);
        let t = nth_table(&doc, 1).unwrap();
        let ss = SearchSort::configure(Some(&cfg), 4);
        let report = ss.process(&mut doc, t).unwrap().unwrap();
        assert_eq!(report.table_id, id, "{open}");
        assert!(report.init_added);

        let html = doc.html();
        assert!(html.contains(tag), "{open}: {html}");
        assert!(html.contains(init), "{open}: {html}");
        assert!(!html.contains("$('#')"));

        // re-running finds the same init script
        let t = nth_table(&doc, 1).unwrap();
        let again = ss.process(&mut doc, t).unwrap().unwrap();
        assert!(!again.init_added && !again.id_assigned, "{open}");
        assert_eq!(doc.html(), html);
    }
}

#[test]
fn class_token_is_not_doubled() {
    let src = "<html><head><link rel=\"stylesheet\" href=\"s.css\"></head>\
               <body><table class=\"display compact\"><tr><td>1</td></tr></table></body></html>";
    let mut doc = Document::parse(src);
    let t = nth_table(&doc, 1).unwrap();
    let cfg = TableBehaviorConfig { searching: true, ..Default::default() };
    let report = SearchSort::configure(Some(&cfg), 1).process(&mut doc, t).unwrap().unwrap();
    assert!(!report.class_added);
    assert!(doc.html().contains("<table class=\"display compact\" id=\"Table-1\">"));
}
