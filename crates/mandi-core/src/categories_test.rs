use super::*;

#[test]
fn defaults_cover_three_produce_categories() {
    let catalog = default_categories();
    let ids: Vec<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["vegetables", "fruits", "grains"]);
}

#[test]
fn marker_color_falls_back_for_unknown_category() {
    let catalog = default_categories();
    assert_eq!(catalog.marker_color_for("fruits"), "red");
    assert_eq!(catalog.marker_color_for("university"), FALLBACK_MARKER_COLOR);
}

#[test]
fn label_falls_back_to_id() {
    let catalog = default_categories();
    assert_eq!(catalog.label_for("grains"), "Grains");
    assert_eq!(catalog.label_for("dairy"), "dairy");
}

#[test]
fn parses_yaml_catalog_with_default_color() {
    let yaml = "categories:\n  - id: dairy\n    label: Dairy\n  - id: spices\n    label: Spices\n    marker_color: orange\n";
    let catalog = parse_categories(yaml).unwrap();
    assert_eq!(catalog.categories.len(), 2);
    assert_eq!(catalog.marker_color_for("dairy"), FALLBACK_MARKER_COLOR);
    assert_eq!(catalog.marker_color_for("spices"), "orange");
}

#[test]
fn rejects_duplicate_ids() {
    let yaml = "categories:\n  - id: dairy\n    label: Dairy\n  - id: dairy\n    label: Milk\n";
    let err = parse_categories(yaml).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
        "expected duplicate validation error, got: {err:?}"
    );
}

#[test]
fn rejects_blank_id() {
    let yaml = "categories:\n  - id: \"  \"\n    label: Blank\n";
    let err = parse_categories(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
}

#[test]
fn rejects_empty_catalog() {
    let err = parse_categories("categories: []\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
}

#[test]
fn rejects_malformed_yaml() {
    let err = parse_categories("categories: {not: [a list").unwrap_err();
    assert!(matches!(err, ConfigError::CategoriesFileParse(_)), "got: {err:?}");
}

#[test]
fn load_reports_missing_file() {
    let err = load_categories(Path::new("/nonexistent/mandi/categories.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::CategoriesFileIo { ref path, .. } if path.contains("categories.yaml")),
        "got: {err:?}"
    );
}
