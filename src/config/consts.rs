// src/config/consts.rs

// Control file
pub const DEFAULT_CONTROL_FILE: &str = "TableAlterDescriptors.xml";
pub const DESCRIPTOR_TAG: &str = "TableAlterDescriptor";
pub const BEHAVIOR_TAG: &str = "behavior";

// Behavior defaults
pub const DEFAULT_PAGE_SIZE: i32 = 10;
pub const DEFAULT_TABLE_INDEX: usize = 1;
pub const PAGE_SIZE_MENU: [i32; 5] = [10, 25, 50, 75, 100];

// Table markup
pub const TABLE_ID_PREFIX: &str = "Table-";
pub const TABLE_CLASS: &str = "display";

// Local assets, relative to the output document
pub const JQUERY_JS: &str = "assets/js/jquery.js";
pub const DATATABLES_JS: &str = "assets/js/jquery.dataTables.min.js";
pub const DATATABLES_CSS: &str = "assets/css/jquery.dataTables.min.css";

// CDN assets
pub const DATATABLES_JS_CDN: &str = "https://cdn.datatables.net/1.12.1/js/jquery.dataTables.min.js";
pub const DATATABLES_CSS_CDN: &str = "https://cdn.datatables.net/1.12.1/css/jquery.dataTables.min.css";
