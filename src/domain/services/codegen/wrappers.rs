//! Typed wrapper classes, one per leaf media type
//!
//! `image()`/`provider()` only need Flutter itself. `svg()` and `lottie()` need
//! their packages and are emitted only when the capability is available.

use crate::domain::value_objects::{Capability, CapabilityAvailability, MediaType};

use super::{dart_string_literal, GenerationSettings};

/// Dart type of the member holding a leaf
pub(crate) fn wrapper_type(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Image => "AssetGenImage",
        MediaType::Vector => "SvgGenImage",
        MediaType::Animation => "LottieGenImage",
        MediaType::Unknown | MediaType::Directory => "String",
    }
}

/// Whether leaves of this type are wrapped (as opposed to plain strings)
pub(crate) fn is_wrapped(media_type: MediaType) -> bool {
    matches!(
        media_type,
        MediaType::Image | MediaType::Vector | MediaType::Animation
    )
}

pub(crate) fn render_wrapper(
    media_type: MediaType,
    settings: &GenerationSettings,
    availability: CapabilityAvailability,
) -> String {
    let name = wrapper_type(media_type);
    let mut out = String::new();
    out.push_str(&format!("class {} {{\n", name));
    out.push_str(&format!("  const {}(this._assetName);\n\n", name));
    out.push_str("  final String _assetName;\n\n");
    if let Some(package) = &settings.package {
        out.push_str(&format!(
            "  static const String package = {};\n\n",
            dart_string_literal(package)
        ));
    }

    match media_type {
        MediaType::Image => out.push_str(&image_helpers(settings)),
        MediaType::Vector if availability.is_available(Capability::Vector) => {
            out.push_str(&svg_helper(settings))
        }
        MediaType::Animation if availability.is_available(Capability::Animation) => {
            out.push_str(&lottie_helper(settings))
        }
        _ => {}
    }

    out.push_str(&path_getter(settings));
    out.push_str("}\n");
    out
}

fn package_arg(settings: &GenerationSettings, indent: &str) -> String {
    if settings.package.is_some() {
        format!("{}package: package,\n", indent)
    } else {
        String::new()
    }
}

fn path_getter(settings: &GenerationSettings) -> String {
    match &settings.package {
        Some(package) => {
            let literal = dart_string_literal(&format!("packages/{}/", package));
            let open = &literal[..literal.len() - 1];
            format!("  String get path => {}$_assetName';\n", open)
        }
        None => "  String get path => _assetName;\n".to_string(),
    }
}

fn image_helpers(settings: &GenerationSettings) -> String {
    let mut out = String::new();
    out.push_str(
        "  Image image({
    Key? key,
    double? width,
    double? height,
    BoxFit? fit,
    Color? color,
    AlignmentGeometry alignment = Alignment.center,
    String? semanticLabel,
    bool excludeFromSemantics = false,
  }) {
    return Image.asset(
      _assetName,
      key: key,
      width: width,
      height: height,
      fit: fit,
      color: color,
      alignment: alignment,
      semanticLabel: semanticLabel,
      excludeFromSemantics: excludeFromSemantics,
",
    );
    out.push_str(&package_arg(settings, "      "));
    out.push_str("    );\n  }\n\n");

    out.push_str("  ImageProvider provider({AssetBundle? bundle}) {\n");
    if settings.package.is_some() {
        out.push_str("    return AssetImage(_assetName, bundle: bundle, package: package);\n");
    } else {
        out.push_str("    return AssetImage(_assetName, bundle: bundle);\n");
    }
    out.push_str("  }\n\n");
    out
}

fn svg_helper(settings: &GenerationSettings) -> String {
    let legacy_color = settings.flutter_svg_major.is_some_and(|major| major < 2);
    let mut out = String::new();
    out.push_str(
        "  SvgPicture svg({
    Key? key,
    double? width,
    double? height,
    BoxFit fit = BoxFit.contain,
    AlignmentGeometry alignment = Alignment.center,
    Color? color,
    String? semanticsLabel,
  }) {
    return SvgPicture.asset(
      _assetName,
      key: key,
      width: width,
      height: height,
      fit: fit,
      alignment: alignment,
",
    );
    if legacy_color {
        out.push_str("      color: color,\n");
    } else {
        out.push_str(
            "      colorFilter: color == null ? null : ColorFilter.mode(color, BlendMode.srcIn),\n",
        );
    }
    out.push_str("      semanticsLabel: semanticsLabel,\n");
    out.push_str(&package_arg(settings, "      "));
    out.push_str("    );\n  }\n\n");
    out
}

fn lottie_helper(settings: &GenerationSettings) -> String {
    let mut out = String::new();
    out.push_str(
        "  LottieBuilder lottie({
    Key? key,
    bool? animate,
    bool? repeat,
    bool? reverse,
    double? width,
    double? height,
    BoxFit? fit,
    AlignmentGeometry? alignment,
  }) {
    return Lottie.asset(
      _assetName,
      key: key,
      animate: animate,
      repeat: repeat,
      reverse: reverse,
      width: width,
      height: height,
      fit: fit,
      alignment: alignment,
",
    );
    out.push_str(&package_arg(settings, "      "));
    out.push_str("    );\n  }\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_helper_follows_flutter_svg_major() {
        let mut settings = GenerationSettings::default();
        let all = CapabilityAvailability::all();

        let modern = render_wrapper(MediaType::Vector, &settings, all);
        assert!(modern.contains("colorFilter: color == null"));

        settings.flutter_svg_major = Some(1);
        let legacy = render_wrapper(MediaType::Vector, &settings, all);
        assert!(legacy.contains("      color: color,\n"));
        assert!(!legacy.contains("colorFilter"));
    }

    #[test]
    fn helpers_gated_on_capability() {
        let settings = GenerationSettings::default();
        let none = CapabilityAvailability::none();
        let svg = render_wrapper(MediaType::Vector, &settings, none);
        assert!(!svg.contains("svg("));
        assert!(svg.contains("String get path => _assetName;"));

        let lottie = render_wrapper(MediaType::Animation, &settings, none);
        assert!(!lottie.contains("lottie("));

        let image = render_wrapper(MediaType::Image, &settings, none);
        assert!(image.contains("Image image({"));
        assert!(image.contains("ImageProvider provider({AssetBundle? bundle})"));
    }

    #[test]
    fn package_mode_wrapper() {
        let settings = GenerationSettings {
            package: Some("my_awesome_package".to_string()),
            ..GenerationSettings::default()
        };
        let image = render_wrapper(MediaType::Image, &settings, CapabilityAvailability::none());
        assert!(image.contains("static const String package = 'my_awesome_package';"));
        assert!(image.contains("      package: package,\n"));
        assert!(image.contains("String get path => 'packages/my_awesome_package/$_assetName';"));
    }
}
