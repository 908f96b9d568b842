//! E2E tests for `assetgen tree` and `assetgen versions`

mod common;

use common::*;

#[test]
fn tree_prints_media_types() {
    let env = app_project();
    env.write("assets/intro.json", LOTTIE_JSON);
    env.write("assets/data.json", "{\"a\": 1}");

    let result = env.run(&["tree"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("  assets/\n"));
    assert!(result.stdout.contains("    logo.png  image\n"));
    assert!(result.stdout.contains("    icon.svg  vector\n"));
    assert!(result.stdout.contains("    intro.json  animation\n"));
    assert!(result.stdout.contains("    data.json  unknown\n"));
}

#[test]
fn tree_json_reports_missing_roots() {
    let env = TestEnv::new();
    env.write(
        "pubspec.yaml",
        "name: app\nflutter:\n  assets:\n    - assets/\n    - gone/\n",
    );
    env.write("assets/logo.png", "png");

    let result = env.run(&["tree", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let value = result.json();
    assert_eq!(value["missing_roots"], serde_json::json!(["gone/"]));
}

#[test]
fn versions_reads_sdk_marker_file() {
    let env = TestEnv::new();
    env.write("pubspec.yaml", "name: app\n");
    env.write("sdk/version", "3.22.0\n");

    let result = env.run(&["versions", "--flutter-sdk", "sdk", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let value = result.json();
    assert_eq!(value["flutter"]["version"], "3.22.0");
    assert_eq!(value["packages"]["flutter_svg"]["constraint"], "^2.0.10");
    assert_eq!(value["packages"]["lottie"]["constraint"], "^3.1.0");
    assert_eq!(value["packages"]["lottie"]["declared"], false);
}

#[test]
fn versions_prefers_declared_constraint() {
    let env = app_project();

    let result = env.run(&["versions"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("flutter unknown"));
    assert!(result.stdout.contains("flutter_svg ^2.0.10  declared"));
    assert!(result.stdout.contains("lottie ^2.7.0  selected"));
}
