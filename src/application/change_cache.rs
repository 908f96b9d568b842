//! Config change cache
//!
//! Remembers the last accepted [`PubspecSnapshot`] per module so configuration
//! saves that do not touch any functional field skip regeneration. The outer
//! map is only locked to find or create a key's slot; each slot has its own
//! mutex, so callers on different keys never wait on each other while
//! `observe` stays atomic for one key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::info;

use crate::domain::value_objects::{ModuleKey, ProjectId, PubspecSnapshot};

type Slot = Arc<Mutex<Option<PubspecSnapshot>>>;

#[derive(Debug, Default)]
pub struct ConfigChangeCache {
    slots: RwLock<HashMap<ModuleKey, Slot>>,
}

impl ConfigChangeCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &ModuleKey) -> Slot {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Whether `snapshot` differs functionally from the stored one
    ///
    /// Always true for a key seen for the first time. A true result logs one
    /// line per changed field. Never creates a slot for `key`.
    pub fn has_changed(&self, key: &ModuleKey, snapshot: &PubspecSnapshot) -> bool {
        let slot = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(Arc::clone);
        let Some(slot) = slot else {
            return changed(key, None, snapshot);
        };
        let stored = slot.lock().unwrap_or_else(PoisonError::into_inner);
        changed(key, stored.as_ref(), snapshot)
    }

    pub fn put(&self, key: &ModuleKey, snapshot: PubspecSnapshot) {
        let slot = self.slot(key);
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    pub fn get(&self, key: &ModuleKey) -> Option<PubspecSnapshot> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.get(key)?;
        let stored = slot.lock().unwrap_or_else(PoisonError::into_inner);
        stored.clone()
    }

    /// `has_changed` and `put` under one lock
    ///
    /// Of two racing callers with the same new snapshot, exactly one sees a
    /// change.
    pub fn observe(&self, key: &ModuleKey, snapshot: PubspecSnapshot) -> bool {
        let slot = self.slot(key);
        let mut stored = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let is_changed = changed(key, stored.as_ref(), &snapshot);
        if is_changed {
            *stored = Some(snapshot);
        }
        is_changed
    }

    pub fn remove(&self, key: &ModuleKey) -> Option<PubspecSnapshot> {
        let slot = self
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)?;
        let stored = slot.lock().unwrap_or_else(PoisonError::into_inner);
        stored.clone()
    }

    /// Drop every key of `project`, returning how many were removed
    pub fn clear_project(&self, project: &ProjectId) -> usize {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let before = slots.len();
        slots.retain(|key, _| !key.belongs_to(project));
        before - slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn changed(key: &ModuleKey, stored: Option<&PubspecSnapshot>, snapshot: &PubspecSnapshot) -> bool {
    let Some(previous) = stored else {
        info!(module = %key, "no previous configuration snapshot");
        return true;
    };
    if snapshot.functionally_equal(previous) {
        return false;
    }
    for change in snapshot.diff(previous) {
        info!(
            module = %key,
            field = change.field,
            old = %change.old,
            new = %change.new,
            functional = change.functional,
            "configuration changed"
        );
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::snapshot_fixtures::baseline;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn key(project: &str, module: &str) -> ModuleKey {
        ModuleKey::for_module(&ProjectId::from_root(Path::new(project)), Path::new(module))
    }

    #[test]
    fn first_observation_is_a_change() {
        let cache = ConfigChangeCache::new();
        assert!(cache.has_changed(&key("/p", "/p/app"), &baseline()));
    }

    #[test]
    fn has_changed_does_not_record_unknown_keys() {
        let cache = ConfigChangeCache::new();
        let k = key("/p", "/p/app");
        assert!(cache.has_changed(&k, &baseline()));
        assert!(cache.has_changed(&k, &baseline()));
        assert!(cache.is_empty());
        assert_eq!(cache.get(&k), None);
    }

    #[test]
    fn package_rename_is_a_change_in_package_mode() {
        let cache = ConfigChangeCache::new();
        let k = key("/p", "/p/app");
        let mut old = baseline();
        old.package_parameter_enabled = true;
        old.package_name = Some("old_pkg".to_string());
        cache.put(&k, old.clone());

        let mut renamed = old.clone();
        renamed.package_name = Some("new_pkg".to_string());
        assert!(cache.has_changed(&k, &renamed));
        assert!(cache.observe(&k, renamed.clone()));
        assert_eq!(cache.get(&k), Some(renamed));
    }

    #[test]
    fn package_rename_is_ignored_without_package_mode() {
        let cache = ConfigChangeCache::new();
        let k = key("/p", "/p/app");
        cache.put(&k, baseline());

        let mut renamed = baseline();
        renamed.package_name = Some("new_pkg".to_string());
        assert!(!cache.has_changed(&k, &renamed));
    }

    #[test]
    fn identical_snapshot_is_unchanged() {
        let cache = ConfigChangeCache::new();
        let k = key("/p", "/p/app");
        cache.put(&k, baseline());
        assert!(!cache.has_changed(&k, &baseline()));
    }

    #[test]
    fn dependency_drift_is_unchanged() {
        let cache = ConfigChangeCache::new();
        let k = key("/p", "/p/app");
        cache.put(&k, baseline());

        let mut next = baseline();
        next.flutter_svg_version = Some("^9.9.9".to_string());
        next.lottie_version = None;
        next.flutter_constraint = Some(">=3.35.0".to_string());
        next.dart_constraint = Some(">=3.0.0 <4.0.0".to_string());
        assert!(!cache.has_changed(&k, &next));
    }

    #[test]
    fn functional_fields_each_trigger_a_change() {
        let cache = ConfigChangeCache::new();
        let k = key("/p", "/p/app");
        cache.put(&k, baseline());

        let mut paths = baseline();
        paths.asset_paths.push("assets/extra/".to_string());
        assert!(cache.has_changed(&k, &paths));

        let mut class = baseline();
        class.class_name = "Res".to_string();
        assert!(cache.has_changed(&k, &class));

        let mut detection = baseline();
        detection.auto_detection = !detection.auto_detection;
        assert!(cache.has_changed(&k, &detection));
    }

    #[test]
    fn observe_stores_on_change() {
        let cache = ConfigChangeCache::new();
        let k = key("/p", "/p/app");
        assert!(cache.observe(&k, baseline()));
        assert!(!cache.observe(&k, baseline()));
        assert_eq!(cache.get(&k), Some(baseline()));
    }

    #[test]
    fn observe_keeps_old_snapshot_when_only_dependencies_moved() {
        let cache = ConfigChangeCache::new();
        let k = key("/p", "/p/app");
        cache.observe(&k, baseline());

        let mut next = baseline();
        next.flutter_svg_version = Some("^2.2.3".to_string());
        assert!(!cache.observe(&k, next));
        assert_eq!(cache.get(&k), Some(baseline()));
    }

    #[test]
    fn keys_of_different_projects_do_not_collide() {
        let cache = ConfigChangeCache::new();
        cache.put(&key("/p1", "app"), baseline());
        assert!(cache.has_changed(&key("/p2", "app"), &baseline()));
    }

    #[test]
    fn clear_project_removes_only_that_project() {
        let cache = ConfigChangeCache::new();
        let p1 = ProjectId::from_root(Path::new("/p1"));
        cache.put(&key("/p1", "/p1/a"), baseline());
        cache.put(&key("/p1", "/p1/b"), baseline());
        cache.put(&key("/p2", "/p2/a"), baseline());

        assert_eq!(cache.clear_project(&p1), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.has_changed(&key("/p1", "/p1/a"), &baseline()));
    }

    #[test]
    fn remove_returns_stored_snapshot() {
        let cache = ConfigChangeCache::new();
        let k = key("/p", "/p/app");
        cache.put(&k, baseline());
        assert_eq!(cache.remove(&k), Some(baseline()));
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_observers_see_exactly_one_change() {
        let cache = Arc::new(ConfigChangeCache::new());
        let k = key("/p", "/p/app");
        let changes = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let changes = Arc::clone(&changes);
                let k = k.clone();
                thread::spawn(move || {
                    if cache.observe(&k, baseline()) {
                        changes.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }
}
