//! Dependency map fixtures for integration tests.
#![allow(dead_code)]

use depchain::domain::dependency_map::DependencyMap;
use std::io::Write;
use tempfile::NamedTempFile;

pub fn map_from(entries: Vec<(&str, Vec<&str>)>) -> DependencyMap {
    entries.into_iter().collect()
}

/// A small page: an API feeding a table, a text widget and a chart.
pub fn page_inverse_map() -> DependencyMap {
    map_from(vec![
        ("Api1.data", vec!["Table1.tableData", "Api1.responseMeta", "Text1.text"]),
        ("Api1.responseMeta", vec!["Text2.text"]),
        ("Table1.tableData", vec!["Table1.selectedRow", "Chart1.chartData"]),
        ("Table1.selectedRow", vec!["Text1.text"]),
        ("Text1.text", vec!["Text1"]),
        ("appsmith.store.user", vec!["Api1.data"]),
    ])
}

/// Two widgets that reference each other.
pub fn cyclic_inverse_map() -> DependencyMap {
    map_from(vec![
        ("Input1.text", vec!["Input2.defaultText"]),
        ("Input2.defaultText", vec!["Input2.text"]),
        ("Input2.text", vec!["Input1.defaultText"]),
        ("Input1.defaultText", vec!["Input1.text"]),
    ])
}

/// Write `map` as JSON to a temp file that lives as long as the handle.
pub fn write_map_file(map: &DependencyMap) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp map file");
    let json = serde_json::to_string_pretty(map).expect("serialize map");
    file.write_all(json.as_bytes()).expect("write map file");
    file
}
