//! Tests for the generate use case

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::config::GlobalSettings;
use crate::domain::ports::{
    CommandOutput, CommandRunner, DependencyRequestStatus, DirEntry, FileSystem, FsResult,
};
use crate::error::AssetGenError;
use crate::infrastructure::fs::MemoryFs;
use crate::infrastructure::manifest::ReportingManifestWriter;

/// Runner for machines without Flutter
struct NoFlutter;

impl CommandRunner for NoFlutter {
    fn run(&self, _: &Path, _: &[&str], _: Option<&Path>) -> std::io::Result<CommandOutput> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "flutter"))
    }
}

const LOTTIE: &str = r#"{"v":"5.7.4","fr":30,"ip":0,"op":60,"w":100,"h":100,"layers":[]}"#;

fn app(fs: &MemoryFs, manifest: &str) {
    fs.add_file("/p/app/pubspec.yaml", manifest);
    fs.add_file("/p/app/assets/logo.png", "png");
    fs.add_file("/p/app/assets/icon.svg", "<svg/>");
}

fn use_case<'a>(
    fs: &MemoryFs,
    writer: &'a ReportingManifestWriter,
) -> GenerateUseCase<MemoryFs, NoFlutter, &'a ReportingManifestWriter> {
    GenerateUseCase::new(fs.clone(), NoFlutter, writer, GlobalSettings::default())
}

const WITH_SVG: &str = "name: app
dependencies:
  flutter_svg: ^2.0.10
flutter:
  assets:
    - assets/
";

#[test]
fn generates_nested_accessors() {
    let fs = MemoryFs::new();
    app(&fs, WITH_SVG);
    let writer = ReportingManifestWriter::new();

    let report = use_case(&fs, &writer)
        .generate_module(Path::new("/p/app"))
        .unwrap();

    assert_eq!(report.status, WriteStatus::Written);
    assert_eq!(report.output, PathBuf::from("/p/app/lib/generated/assets.dart"));
    assert_eq!(report.leaf_count, 2);
    let out = fs.contents("/p/app/lib/generated/assets.dart").unwrap();
    assert!(out.contains("const AssetGenImage('assets/logo.png')"));
    assert!(out.contains("const SvgGenImage('assets/icon.svg')"));
    assert!(out.contains("SvgPicture svg("));
    assert!(report.dependencies.is_empty());
    assert!(writer.requests().is_empty());
}

#[test]
fn second_cycle_leaves_output_alone() {
    let fs = MemoryFs::new();
    app(&fs, WITH_SVG);
    let writer = ReportingManifestWriter::new();
    let uc = use_case(&fs, &writer);

    uc.generate_module(Path::new("/p/app")).unwrap();
    let first = fs.contents("/p/app/lib/generated/assets.dart").unwrap();
    let report = uc.generate_module(Path::new("/p/app")).unwrap();

    assert_eq!(report.status, WriteStatus::Unchanged);
    assert_eq!(fs.writes(), 1);
    assert_eq!(fs.contents("/p/app/lib/generated/assets.dart").unwrap(), first);
}

#[test]
fn auto_detection_queues_missing_dependency() {
    let fs = MemoryFs::new();
    app(
        &fs,
        "name: app
environment:
  flutter: \">=3.10.0\"
flutter:
  assets:
    - assets/
",
    );
    let writer = ReportingManifestWriter::new();

    let report = use_case(&fs, &writer)
        .generate_module(Path::new("/p/app"))
        .unwrap();

    assert_eq!(
        report.dependencies.get("flutter_svg").map(String::as_str),
        Some("^2.0.10")
    );
    assert!(!report.dependencies.contains_key("lottie"));
    assert_eq!(report.dependency_status, Some(DependencyRequestStatus::Reported));
    assert_eq!(writer.requests().len(), 1);
    let out = fs.contents("/p/app/lib/generated/assets.dart").unwrap();
    assert!(out.contains("SvgPicture svg("));
    assert!(out.contains("colorFilter:"));
}

#[test]
fn unknown_runtime_uses_conservative_constraint() {
    let fs = MemoryFs::new();
    fs.add_file(
        "/p/app/pubspec.yaml",
        "name: app\nflutter:\n  assets:\n    - assets/\n",
    );
    fs.add_file("/p/app/assets/intro.json", LOTTIE);
    let writer = ReportingManifestWriter::new();

    let report = use_case(&fs, &writer)
        .generate_module(Path::new("/p/app"))
        .unwrap();

    assert!(report.runtime.is_none());
    assert_eq!(
        report.dependencies.get("lottie").map(String::as_str),
        Some("^2.7.0")
    );
    let out = fs.contents("/p/app/lib/generated/assets.dart").unwrap();
    assert!(out.contains("LottieBuilder lottie("));
}

#[test]
fn disabled_auto_detection_omits_helpers() {
    let fs = MemoryFs::new();
    app(
        &fs,
        "name: app
flutter:
  assets:
    - assets/
flutter_assets_generator:
  auto_detection: false
",
    );
    let writer = ReportingManifestWriter::new();

    let report = use_case(&fs, &writer)
        .generate_module(Path::new("/p/app"))
        .unwrap();

    assert!(report.dependencies.is_empty());
    assert!(report.dependency_status.is_none());
    let out = fs.contents("/p/app/lib/generated/assets.dart").unwrap();
    assert!(out.contains("class SvgGenImage"));
    assert!(!out.contains("SvgPicture svg("));
    assert!(!out.contains("package:flutter_svg"));
}

#[test]
fn missing_root_still_generates() {
    let fs = MemoryFs::new();
    app(
        &fs,
        "name: app
dependencies:
  flutter_svg: ^2.0.10
flutter:
  assets:
    - assets/
    - assets/gone/
",
    );
    let writer = ReportingManifestWriter::new();

    let report = use_case(&fs, &writer)
        .generate_module(Path::new("/p/app"))
        .unwrap();

    assert_eq!(report.missing_roots, vec!["assets/gone/".to_string()]);
    assert_eq!(report.status, WriteStatus::Written);
}

#[test]
fn dry_run_writes_nothing() {
    let fs = MemoryFs::new();
    app(&fs, "name: app\nflutter:\n  assets:\n    - assets/\n");
    let writer = ReportingManifestWriter::new();
    let uc = use_case(&fs, &writer).with_options(GenerateOptions::new().with_dry_run(true));

    let report = uc.generate_module(Path::new("/p/app")).unwrap();

    assert_eq!(report.status, WriteStatus::WouldWrite);
    assert_eq!(fs.writes(), 0);
    assert!(!report.dependencies.is_empty());
    assert!(report.dependency_status.is_none());
    assert!(writer.requests().is_empty());
}

#[test]
fn package_mode_prefixes_effective_path() {
    let fs = MemoryFs::new();
    app(
        &fs,
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
    let writer = ReportingManifestWriter::new();

    use_case(&fs, &writer)
        .generate_module(Path::new("/p/app"))
        .unwrap();

    let out = fs.contents("/p/app/lib/generated/assets.dart").unwrap();
    assert!(out.contains("const AssetGenImage('assets/logo.png')"));
    assert!(out.contains("static const String package = 'my_pkg';"));
    assert!(out.contains("String get path => 'packages/my_pkg/$_assetName';"));
}

#[test]
fn failures_do_not_stop_sibling_modules() {
    let fs = MemoryFs::new();
    app(&fs, WITH_SVG);
    fs.add_file("/p/broken/pubspec.yaml", "flutter: [unclosed");
    fs.add_dir("/p/empty");
    let writer = ReportingManifestWriter::new();

    let report = use_case(&fs, &writer).generate_all(&[
        PathBuf::from("/p/app"),
        PathBuf::from("/p/broken"),
        PathBuf::from("/p/empty"),
    ]);

    assert!(!report.is_success());
    assert_eq!(report.written(), 1);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].module, PathBuf::from("/p/broken"));
    assert!(report.failures[1].error.contains("no pubspec.yaml"));
}

#[test]
fn malformed_manifest_is_config_parse_error() {
    let fs = MemoryFs::new();
    fs.add_file("/p/app/pubspec.yaml", "flutter: [unclosed");
    let writer = ReportingManifestWriter::new();

    let err = use_case(&fs, &writer)
        .generate_module(Path::new("/p/app"))
        .unwrap_err();
    assert!(matches!(err, AssetGenError::ConfigParse { .. }));
}

/// File system whose output hash moves on every read until `settle_after`
#[derive(Clone)]
struct RacingFs {
    inner: MemoryFs,
    reads: std::sync::Arc<AtomicUsize>,
    settle_after: usize,
}

impl RacingFs {
    fn new(inner: MemoryFs, settle_after: usize) -> Self {
        Self {
            inner,
            reads: std::sync::Arc::new(AtomicUsize::new(0)),
            settle_after,
        }
    }
}

impl FileSystem for RacingFs {
    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        self.inner.read_to_string(path)
    }

    fn read_prefix(&self, path: &Path, limit: usize) -> FsResult<Vec<u8>> {
        self.inner.read_prefix(path, limit)
    }

    fn file_size(&self, path: &Path) -> FsResult<u64> {
        self.inner.file_size(path)
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        self.inner.list_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()> {
        self.inner.write_atomic(path, content)
    }

    fn content_hash(&self, _path: &Path) -> FsResult<Option<String>> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        let n = n.min(self.settle_after);
        Ok(Some(format!("sha256:other-writer-{}", n)))
    }
}

fn racing_use_case(
    fs: RacingFs,
    writer: &ReportingManifestWriter,
) -> GenerateUseCase<RacingFs, NoFlutter, &ReportingManifestWriter> {
    GenerateUseCase::new(fs, NoFlutter, writer, GlobalSettings::default())
}

#[test]
fn persistent_concurrent_writer_is_a_conflict() {
    let memory = MemoryFs::new();
    let fs = RacingFs::new(memory.clone(), usize::MAX);
    let writer = ReportingManifestWriter::new();
    let uc = racing_use_case(fs, &writer);

    let err = uc
        .write_if_changed(Path::new("/p/app/lib/generated/assets.dart"), "class A {}\n")
        .unwrap_err();

    assert!(matches!(err, AssetGenError::WriteConflict { .. }));
    assert_eq!(memory.writes(), 0);
}

#[test]
fn single_interference_is_retried() {
    let memory = MemoryFs::new();
    let fs = RacingFs::new(memory.clone(), 1);
    let writer = ReportingManifestWriter::new();
    let uc = racing_use_case(fs, &writer);

    let status = uc
        .write_if_changed(Path::new("/p/app/lib/generated/assets.dart"), "class A {}\n")
        .unwrap();

    assert_eq!(status, WriteStatus::Written);
    assert_eq!(
        memory.contents("/p/app/lib/generated/assets.dart").as_deref(),
        Some("class A {}\n")
    );
}
