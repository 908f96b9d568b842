//! End-to-end generation scenarios across configuration styles

mod common;

use common::*;

#[test]
fn package_mode_uses_package_prefixed_paths() {
    let env = TestEnv::new();
    env.write(
        "pubspec.yaml",
        "name: my_pkg
dependencies:
  flutter_svg: ^2.0.10
flutter:
  assets:
    - assets/
flutter_assets_generator:
  package_parameter_enabled: true
",
    );
    env.write("assets/logo.png", "png");

    let result = env.run(&["generate"]);

    assert!(result.success, "{}", result.combined_output());
    let out = env.read(OUTPUT);
    assert!(out.contains("static const String package = 'my_pkg';"));
    assert!(out.contains("String get path => 'packages/my_pkg/$_assetName';"));
}

#[test]
fn legacy_style_renders_flat_constants() {
    let env = TestEnv::new();
    env.write(
        "pubspec.yaml",
        "name: app
flutter:
  assets:
    - assets/images/
flutter_assets_generator:
  style: legacy
  class_name: R
  output_dir: gen
  output_filename: r
",
    );
    env.write("assets/images/logo.png", "png");

    let result = env.run(&["generate"]);

    assert!(result.success, "{}", result.combined_output());
    let out = env.read("lib/gen/r.dart");
    assert!(out.contains("class R {"));
    assert!(out.contains("  static const String imagesLogo = 'assets/images/logo.png';\n"));
    assert!(!out.contains("AssetGenImage"));
}

#[test]
fn ignored_paths_and_hidden_files_are_skipped() {
    let env = TestEnv::new();
    env.write(
        "pubspec.yaml",
        "name: app
flutter:
  assets:
    - assets/
    - assets/drafts/
flutter_assets_generator:
  path_ignore:
    - drafts
",
    );
    env.write("assets/logo.png", "png");
    env.write("assets/.DS_Store", "");
    env.write("assets/drafts/old.png", "png");

    let result = env.run(&["generate"]);

    assert!(result.success, "{}", result.combined_output());
    let out = env.read(OUTPUT);
    assert!(out.contains("logoPng"));
    assert!(!out.contains("DS_Store"));
    assert!(!out.contains("oldPng"));
}

#[test]
fn generated_output_is_stable_across_runs() {
    let env = app_project();
    env.write("assets/intro.json", LOTTIE_JSON);
    env.run(&["generate"]);
    let first = env.read(OUTPUT);

    std::fs::remove_file(env.path(OUTPUT)).unwrap();
    env.run(&["generate"]);

    assert_eq!(env.read(OUTPUT), first);
}
