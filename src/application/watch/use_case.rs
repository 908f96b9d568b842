//! Watch Use Case implementation

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info};

use crate::application::change_cache::ConfigChangeCache;
use crate::application::generate::GenerateUseCase;
use crate::config::ModuleConfig;
use crate::domain::ports::{CommandRunner, FileSystem, ManifestWriter};
use crate::domain::value_objects::{ModuleKey, ProjectId};
use crate::error::{AssetGenError, AssetGenResult};

use super::event::WatchEvent;
use super::index::ModuleIndex;
use super::scheduler::{DebounceScheduler, DueJob};

/// How long the loop blocks waiting for file events
const POLL_MS: u64 = 50;

/// Watch Use Case
///
/// Runs an initial generation for every module, then regenerates modules as
/// their assets or manifests change. This is the entry point for
/// `assetgen watch`.
pub struct WatchUseCase<F, R, W>
where
    F: FileSystem + Clone,
    R: CommandRunner,
    W: ManifestWriter,
{
    generate: GenerateUseCase<F, R, W>,
    project_root: PathBuf,
    project: ProjectId,
    cache: Arc<ConfigChangeCache>,
    index: ModuleIndex,
    scheduler: DebounceScheduler,
}

impl<F, R, W> WatchUseCase<F, R, W>
where
    F: FileSystem + Clone,
    R: CommandRunner,
    W: ManifestWriter,
{
    pub fn new(
        generate: GenerateUseCase<F, R, W>,
        project_root: impl Into<PathBuf>,
        project: ProjectId,
        cache: Arc<ConfigChangeCache>,
    ) -> Self {
        Self {
            generate,
            project_root: project_root.into(),
            project,
            cache,
            index: ModuleIndex::new(),
            scheduler: DebounceScheduler::new(),
        }
    }

    pub fn index(&self) -> &ModuleIndex {
        &self.index
    }

    pub fn cache(&self) -> &ConfigChangeCache {
        &self.cache
    }

    /// Generate every module once and index it
    pub fn initial_cycle(&mut self, modules: &[PathBuf], on_event: &impl Fn(WatchEvent)) {
        for module in modules {
            match self.generate.load_module(module) {
                Ok(config) => {
                    self.index.update(&config);
                    self.cache.put(&self.key(module), config.snapshot());
                    self.generate_loaded(config, on_event);
                }
                Err(err) => {
                    self.index.update_unloaded(module);
                    on_event(WatchEvent::error(Some(module), err.to_string()));
                }
            }
        }
    }

    /// Feed one changed path into the debouncer
    pub fn handle_path(&mut self, path: &Path, now: Instant) -> bool {
        let hits = self.index.classify(path);
        for (module, signal) in &hits {
            debug!(path = %path.display(), module = %module.display(), ?signal, "change");
            self.scheduler.schedule(module, *signal, now);
        }
        !hits.is_empty()
    }

    /// Run every job due at `now`
    pub fn run_due(&mut self, now: Instant, on_event: &impl Fn(WatchEvent)) -> usize {
        let jobs = self.scheduler.take_due(now);
        for job in &jobs {
            self.run_job(job, on_event);
        }
        jobs.len()
    }

    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }

    fn key(&self, module: &Path) -> ModuleKey {
        ModuleKey::for_module(&self.project, module)
    }

    fn run_job(&mut self, job: &DueJob, on_event: &impl Fn(WatchEvent)) {
        on_event(WatchEvent::ModuleChanged {
            module: job.module.display().to_string(),
            assets: job.assets_touched,
            config: job.config_saved,
        });

        let config = match self.generate.load_module(&job.module) {
            Ok(config) => config,
            Err(err) => {
                self.index.update_unloaded(&job.module);
                on_event(WatchEvent::error(Some(&job.module), err.to_string()));
                return;
            }
        };

        if job.config_saved {
            let changed = self.cache.observe(&self.key(&job.module), config.snapshot());
            self.index.update(&config);
            if !changed && !job.assets_touched {
                info!(module = %config.display_name(), "configuration unchanged, skipping");
                on_event(WatchEvent::Skipped {
                    module: job.module.display().to_string(),
                    reason: "configuration unchanged".to_string(),
                });
                return;
            }
        }

        self.generate_loaded(config, on_event);
    }

    fn generate_loaded(&self, config: ModuleConfig, on_event: &impl Fn(WatchEvent)) {
        let module = config.root.clone();
        let result = self
            .generate
            .plan(config)
            .and_then(|plan| self.generate.apply(plan));
        match result {
            Ok(report) => on_event(WatchEvent::Generated {
                module: report.module.display().to_string(),
                output: report.output.display().to_string(),
                status: report.status,
            }),
            Err(err) => on_event(WatchEvent::error(Some(&module), err.to_string())),
        }
    }

    /// Start watching (blocking)
    ///
    /// Blocks until `running` is cleared, then drops the project's cached
    /// snapshots.
    pub fn start<E>(
        &mut self,
        modules: &[PathBuf],
        running: Arc<AtomicBool>,
        on_event: E,
    ) -> AssetGenResult<()>
    where
        E: Fn(WatchEvent),
    {
        on_event(WatchEvent::WatchStarted {
            project: self.project_root.display().to_string(),
            modules: modules.iter().map(|m| m.display().to_string()).collect(),
        });

        self.initial_cycle(modules, &on_event);

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(event.kind, EventKind::Access(_)) {
                        return;
                    }
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| AssetGenError::Watch(e.to_string()))?;

        watcher
            .watch(&self.project_root, RecursiveMode::Recursive)
            .map_err(|e| AssetGenError::Watch(e.to_string()))?;

        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(POLL_MS)) {
                self.handle_path(&path, Instant::now());
                while let Ok(path) = rx.try_recv() {
                    self.handle_path(&path, Instant::now());
                }
            }
            self.run_due(Instant::now(), &on_event);
        }

        self.shutdown(&on_event);
        Ok(())
    }

    /// Drop the project's cached snapshots and report the shutdown
    pub fn shutdown(&mut self, on_event: &impl Fn(WatchEvent)) {
        let cleared = self.cache.clear_project(&self.project);
        debug!(project = %self.project, cleared, "cleared change cache");
        self.scheduler = DebounceScheduler::new();
        on_event(WatchEvent::Shutdown);
    }
}
