use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use regex::Regex;
use thiserror::Error;
use xrinput_types::PathHandle;

#[derive(Debug, Error)]
#[error("Path Format Error `{0}`")]
pub struct PathFormatError(pub String);

/// Interns OpenXR path strings. Handles are never reused and `PathHandle::NULL` is never handed out.
#[derive(Debug)]
pub struct PathManager {
    paths: DashMap<String, PathHandle>,
    strings: DashMap<PathHandle, String>,
    next: AtomicU64,
    well_formed: Regex,
}

impl PathManager {
    pub fn new() -> Self {
        //Every component needs at least one character that is not a '.'
        let well_formed = Regex::new(r"^(/[a-z0-9_.-]*[a-z0-9_-][a-z0-9_.-]*)+$").unwrap();
        Self {
            paths: DashMap::new(),
            strings: DashMap::new(),
            next: AtomicU64::new(1),
            well_formed,
        }
    }

    pub fn get_path(&self, path_string: &str) -> Result<PathHandle, PathFormatError> {
        if let Some(path) = self.paths.get(path_string) {
            return Ok(*path);
        }

        if !self.well_formed.is_match(path_string) {
            return Err(PathFormatError(path_string.to_owned()));
        }

        let path = *self
            .paths
            .entry(path_string.to_owned())
            .or_insert_with(|| PathHandle::from_raw(self.next.fetch_add(1, Ordering::Relaxed)));
        self.strings.insert(path, path_string.to_owned());
        Ok(path)
    }

    pub fn get_path_string(&self, path: PathHandle) -> Option<String> {
        self.strings.get(&path).map(|inner| inner.clone())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for PathManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_deterministic() {
        let paths = PathManager::new();
        let left = paths.get_path("/user/hand/left").unwrap();
        let right = paths.get_path("/user/hand/right").unwrap();

        assert_eq!(paths.get_path("/user/hand/left").unwrap(), left);
        assert_ne!(left, right);
        assert!(!left.is_null());
        assert_eq!(paths.len(), 2);
        assert_eq!(paths.get_path_string(right).as_deref(), Some("/user/hand/right"));
    }

    #[test]
    fn rejects_malformed_paths() {
        let paths = PathManager::new();
        for bad in [
            "",
            "/",
            "user/hand/left",
            "/user/hand/left/",
            "/user//hand",
            "/user/Hand/left",
            "/user/hand/../left",
            "/user/hand left",
        ] {
            assert!(paths.get_path(bad).is_err(), "{bad:?} should be rejected");
        }
        assert!(paths.is_empty());

        assert!(paths.get_path("/interaction_profiles/khr/simple_controller").is_ok());
        assert!(paths.get_path("/user/hand/left/input/thumbstick.x").is_ok());
    }

    #[test]
    fn unknown_handle_has_no_string() {
        let paths = PathManager::new();
        assert_eq!(paths.get_path_string(PathHandle::NULL), None);
        assert_eq!(paths.get_path_string(PathHandle::from_raw(99)), None);
    }
}
