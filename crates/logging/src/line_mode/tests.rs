use super::LineMode;

#[test]
fn line_mode_converts_to_and_from_bool() {
    assert_eq!(LineMode::from(true), LineMode::WithNewline);
    assert_eq!(LineMode::from(false), LineMode::WithoutNewline);

    let append: bool = LineMode::WithNewline.into();
    assert!(append);
}

#[test]
fn default_appends_newline() {
    assert_eq!(LineMode::default(), LineMode::WithNewline);
}
