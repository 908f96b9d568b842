//! Generate Use Case
//!
//! Orchestrates one generation cycle:
//! 1. Load and resolve the module configuration
//! 2. Scan the asset roots into a tree
//! 3. Detect the capabilities the tree needs and queue missing dependencies
//! 4. Render the accessor source
//! 5. Write it when it changed and hand missing dependencies to the manifest writer
//!
//! Failures are scoped to one module; `generate_all` keeps going after them.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::config::{GlobalSettings, ModuleConfig};
use crate::domain::ports::{CommandRunner, FileSystem, ManifestWriter};
use crate::domain::services::{
    select_version, CodeGenerator, FlutterVersionResolver, ResolvedVersion, TreeBuilder,
    VersionCache,
};
use crate::domain::value_objects::{Capability, CapabilityAvailability, ContentHash};
use crate::error::{AssetGenError, AssetGenResult};

use super::options::GenerateOptions;
use super::result::{ModuleFailure, ModulePlan, ModuleReport, ProjectReport, WriteStatus};

/// How often a write is retried after the output changed underneath it
pub const WRITE_RETRIES: usize = 1;

/// Generate use case, parameterized by its ports
pub struct GenerateUseCase<F, R, W>
where
    F: FileSystem + Clone,
    R: CommandRunner,
    W: ManifestWriter,
{
    fs: F,
    resolver: FlutterVersionResolver<F, R>,
    writer: W,
    global: GlobalSettings,
    options: GenerateOptions,
    write_locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl<F, R, W> GenerateUseCase<F, R, W>
where
    F: FileSystem + Clone,
    R: CommandRunner,
    W: ManifestWriter,
{
    pub fn new(fs: F, runner: R, writer: W, global: GlobalSettings) -> Self {
        Self::with_version_cache(fs, runner, writer, global, Arc::new(VersionCache::new()))
    }

    pub fn with_version_cache(
        fs: F,
        runner: R,
        writer: W,
        global: GlobalSettings,
        cache: Arc<VersionCache>,
    ) -> Self {
        Self {
            resolver: FlutterVersionResolver::new(fs.clone(), runner, cache),
            fs,
            writer,
            global,
            options: GenerateOptions::default(),
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Read and resolve the configuration of the module at `root`
    pub fn load_module(&self, root: &Path) -> AssetGenResult<ModuleConfig> {
        let config = ModuleConfig::load(&self.fs, root, &self.global)?;
        for warning in &config.warnings {
            warn!(module = %config.display_name(), "{}", warning);
        }
        Ok(config)
    }

    /// SDK path in effect: the command line beats the configured one
    pub fn flutter_sdk<'a>(&'a self, config: &'a ModuleConfig) -> Option<&'a Path> {
        self.options
            .flutter_sdk
            .as_deref()
            .or(config.flutter_sdk.as_deref())
    }

    /// Runtime version for a module, `None` when nothing resolves
    pub fn resolve_runtime(&self, config: &ModuleConfig) -> Option<ResolvedVersion> {
        let resolved = self.resolver.resolve(
            self.flutter_sdk(config),
            config.manifest.environment.flutter.as_deref(),
        );
        match &resolved {
            Some(r) => debug!(module = %config.display_name(), version = %r.version, source = %r.source, "runtime version"),
            None => debug!(module = %config.display_name(), "runtime version unknown, using conservative constraints"),
        }
        resolved
    }

    /// Render a module without touching the output or the manifest
    pub fn plan_module(&self, root: &Path) -> AssetGenResult<ModulePlan> {
        let config = self.load_module(root)?;
        self.plan(config)
    }

    /// Render an already loaded module
    pub fn plan(&self, config: ModuleConfig) -> AssetGenResult<ModulePlan> {
        let scan = TreeBuilder::new(self.fs.clone()).build(
            &config.asset_roots,
            &config.root,
            &config.path_ignore,
        );
        if !scan.missing_roots.is_empty() {
            let missing = AssetGenError::ScanRootMissing {
                module: config.root.clone(),
                roots: scan.missing_roots.clone(),
            };
            warn!(module = %config.display_name(), "{}", missing);
        }

        let needed: Vec<Capability> = Capability::ALL
            .into_iter()
            .filter(|cap| scan.root.contains_media(cap.media_type()))
            .collect();
        let queued: Vec<Capability> = if config.auto_detection {
            needed
                .iter()
                .copied()
                .filter(|cap| !config.has_dependency(*cap))
                .collect()
        } else {
            Vec::new()
        };

        let runtime = if queued.is_empty() {
            None
        } else {
            self.resolve_runtime(&config)
        };

        let mut availability = CapabilityAvailability::none();
        for cap in Capability::ALL {
            availability = availability.with(cap, config.has_dependency(cap));
        }
        let mut dependencies = BTreeMap::new();
        for cap in queued {
            let constraint = select_version(cap, runtime.map(|r| r.version));
            info!(module = %config.display_name(), package = cap.package(), constraint, "queueing dependency");
            dependencies.insert(cap.package().to_string(), constraint.to_string());
            availability = availability.with(cap, true);
        }

        let svg_constraint = config
            .declared_constraint(Capability::Vector)
            .or_else(|| dependencies.get(Capability::Vector.package()).cloned());
        let settings = config.generation_settings(svg_constraint.as_deref());
        let content = CodeGenerator::new(&settings).generate(&scan.root, availability);

        Ok(ModulePlan {
            config,
            tree: scan.root,
            missing_roots: scan.missing_roots,
            availability,
            dependencies,
            runtime,
            content,
        })
    }

    /// One full generation cycle for the module at `root`
    pub fn generate_module(&self, root: &Path) -> AssetGenResult<ModuleReport> {
        let plan = self.plan_module(root)?;
        self.apply(plan)
    }

    /// Write a plan and request its dependencies
    pub fn apply(&self, plan: ModulePlan) -> AssetGenResult<ModuleReport> {
        let output = plan.output_path();
        let name = plan.config.display_name();

        let status = if self.options.dry_run {
            let current = self.fs.content_hash(&output)?;
            if current.as_deref() == Some(ContentHash::from_content(&plan.content).as_str()) {
                WriteStatus::Unchanged
            } else {
                WriteStatus::WouldWrite
            }
        } else {
            self.write_if_changed(&output, &plan.content)?
        };

        match status {
            WriteStatus::Written => info!(module = %name, output = %output.display(), "generated"),
            WriteStatus::Unchanged => debug!(module = %name, "output unchanged"),
            WriteStatus::WouldWrite => info!(module = %name, output = %output.display(), "would generate"),
        }

        let dependency_status = if self.options.dry_run || plan.dependencies.is_empty() {
            None
        } else {
            Some(self.writer.request_dependencies(
                &plan.config.root,
                &plan.config.manifest_path,
                &plan.dependencies,
            )?)
        };

        Ok(ModuleReport {
            module: plan.config.root.clone(),
            name,
            output,
            status,
            leaf_count: plan.tree.leaf_count(),
            missing_roots: plan.missing_roots,
            dependencies: plan.dependencies,
            dependency_status,
            runtime: plan.runtime,
            warnings: plan
                .config
                .warnings
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }

    /// Generate every module, collecting failures instead of stopping
    pub fn generate_all(&self, modules: &[PathBuf]) -> ProjectReport {
        let mut report = ProjectReport::default();
        for module in modules {
            match self.generate_module(module) {
                Ok(module_report) => report.modules.push(module_report),
                Err(err) => {
                    warn!(module = %module.display(), error = %err, "generation failed");
                    report.failures.push(ModuleFailure {
                        module: module.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
        report
    }

    /// Replace `path` with `content` unless it already holds it
    ///
    /// Writers of one path are serialized. If the file changes between the
    /// comparison and the write, the comparison is repeated once before the
    /// write is abandoned with `WriteConflict`.
    pub fn write_if_changed(&self, path: &Path, content: &str) -> AssetGenResult<WriteStatus> {
        let lock = self.write_lock(path);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let expected = ContentHash::from_content(content);
        let mut observed = self.fs.content_hash(path)?;
        for attempt in 0..=WRITE_RETRIES {
            if observed.as_deref() == Some(expected.as_str()) {
                return Ok(WriteStatus::Unchanged);
            }
            let current = self.fs.content_hash(path)?;
            if current != observed {
                debug!(path = %path.display(), attempt, "output changed while comparing");
                observed = current;
                continue;
            }
            self.fs.write_atomic(path, content)?;
            return Ok(WriteStatus::Written);
        }

        Err(AssetGenError::WriteConflict {
            path: path.to_path_buf(),
        })
    }

    fn write_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self
            .write_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }
}
