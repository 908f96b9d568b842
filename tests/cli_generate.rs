//! E2E tests for `assetgen generate`

mod common;

use common::*;

#[test]
fn generate_writes_accessors() {
    let env = app_project();

    let result = env.run(&["generate"]);

    assert!(result.success, "{}", result.combined_output());
    let out = env.read(OUTPUT);
    assert!(out.starts_with("// GENERATED CODE - DO NOT MODIFY BY HAND"));
    assert!(out.contains("class Assets {"));
    assert!(out.contains("  AssetGenImage get logoPng => const AssetGenImage('assets/logo.png');\n"));
    assert!(out.contains("  SvgGenImage get iconSvg => const SvgGenImage('assets/icon.svg');\n"));
    assert!(result.stdout.contains("1 written, 0 unchanged"));
}

#[test]
fn second_run_is_unchanged() {
    let env = app_project();
    env.run(&["generate"]);
    let first = env.read(OUTPUT);

    let result = env.run(&["generate"]);

    assert!(result.success);
    assert!(result.stdout.contains("0 written, 1 unchanged"));
    assert_eq!(env.read(OUTPUT), first);
}

#[test]
fn dry_run_leaves_tree_untouched() {
    let env = app_project();

    let result = env.run(&["generate", "--dry-run"]);

    assert!(result.success);
    assert!(!env.path(OUTPUT).exists());
    assert!(result.stdout.contains("1 would change"));
}

#[test]
fn missing_dependency_is_reported_with_command() {
    let env = TestEnv::new();
    env.write(
        "pubspec.yaml",
        "name: app\nenvironment:\n  flutter: \">=3.10.0\"\nflutter:\n  assets:\n    - assets/\n",
    );
    env.write("assets/intro.json", LOTTIE_JSON);

    let result = env.run(&["generate"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("flutter pub add 'lottie:^3.1.0'"));
    assert!(env.read(OUTPUT).contains("LottieBuilder lottie("));
    assert!(!env.read("pubspec.yaml").contains("lottie"));
}

#[test]
fn json_report_lists_modules() {
    let env = app_project();
    env.write("packages/ui/pubspec.yaml", APP_MANIFEST);
    env.write("packages/ui/assets/banner.png", "png");

    let result = env.run(&["generate", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let report = result.json();
    let modules = report["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 2);
    assert!(modules.iter().all(|m| m["status"] == "written"));
    assert!(report["failures"].as_array().unwrap().is_empty());
    assert!(env.path("packages/ui").join(OUTPUT).exists());
}

#[test]
fn broken_module_fails_run_but_siblings_generate() {
    let env = app_project();
    env.write("packages/broken/pubspec.yaml", "flutter: [unclosed");

    let result = env.run(&["generate"]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(env.path(OUTPUT).exists());
    assert!(result.stdout.contains("1 failed"));
}

#[test]
fn module_flag_generates_only_that_module() {
    let env = app_project();
    env.write("packages/ui/pubspec.yaml", APP_MANIFEST);
    env.write("packages/ui/assets/banner.png", "png");

    let result = env.run(&["generate", "--module", "packages/ui"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.path("packages/ui").join(OUTPUT).exists());
    assert!(!env.path(OUTPUT).exists());
}

#[test]
fn no_manifest_is_an_error() {
    let env = TestEnv::new();

    let result = env.run(&["generate"]);

    assert!(!result.success);
    assert!(result.stderr.contains("no pubspec.yaml"));
}

#[test]
fn unknown_global_setting_is_warned_about() {
    let env = app_project();
    env.write("settings.toml", "class_name = \"R\"\ncolour = \"blue\"\n");

    let result = env.run(&["--config", "settings.toml", "generate"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stderr.contains("colour"));
    assert!(env.read(OUTPUT).contains("class R {"));
}
