use clap::Parser;
use skycast::{
    app::settings::{Preferences, load_preferences, save_preferences, session_orientation},
    cli::Cli,
    domain::chart::ChartOrientation,
};

#[test]
fn saved_orientation_is_restored_next_session() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("settings.json");

    save_preferences(
        &path,
        &Preferences {
            chart_orientation: ChartOrientation::Vertical,
        },
    )
    .expect("save");

    let content = std::fs::read_to_string(&path).expect("read back");
    assert!(content.contains("\"chart_orientation\": \"Vertical\""), "{content}");

    let cli = Cli::parse_from(["skycast"]);
    let preferences = load_preferences(Some(&path));
    assert_eq!(
        session_orientation(&cli, &preferences),
        ChartOrientation::Vertical
    );
}

#[test]
fn command_line_orientation_overrides_the_saved_one() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.json");
    save_preferences(
        &path,
        &Preferences {
            chart_orientation: ChartOrientation::Vertical,
        },
    )
    .expect("save");

    let cli = Cli::parse_from(["skycast", "--orientation", "horizontal"]);
    let preferences = load_preferences(Some(&path));
    assert_eq!(
        session_orientation(&cli, &preferences),
        ChartOrientation::Horizontal
    );
    assert_eq!(
        load_preferences(Some(&path)).chart_orientation,
        ChartOrientation::Vertical,
        "the override must not rewrite the file"
    );
}

#[test]
fn unknown_keys_and_garbage_fall_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.json");

    std::fs::write(&path, r#"{"chart_orientation":"Vertical","theme":"dark"}"#).expect("write");
    assert_eq!(
        load_preferences(Some(&path)).chart_orientation,
        ChartOrientation::Vertical
    );

    std::fs::write(&path, "{ not json").expect("write");
    assert_eq!(load_preferences(Some(&path)), Preferences::default());
    assert_eq!(
        Preferences::default().chart_orientation,
        ChartOrientation::Horizontal
    );
}
