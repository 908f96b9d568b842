//! Reusable manifests and asset content

use super::TestEnv;

/// App manifest that already depends on `flutter_svg`
pub const APP_MANIFEST: &str = "name: app
dependencies:
  flutter_svg: ^2.0.10
flutter:
  assets:
    - assets/
";

/// Minimal Lottie document (detected by content, not extension)
pub const LOTTIE_JSON: &str =
    r#"{"v":"5.7.4","fr":30,"ip":0,"op":60,"w":100,"h":100,"layers":[]}"#;

pub const OUTPUT: &str = "lib/generated/assets.dart";

/// Single-module project: a PNG and an SVG under `assets/`
pub fn app_project() -> TestEnv {
    let env = TestEnv::new();
    env.write("pubspec.yaml", APP_MANIFEST);
    env.write("assets/logo.png", "png");
    env.write("assets/icon.svg", "<svg/>");
    env
}
