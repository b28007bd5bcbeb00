//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use crate::runtime::resources::{
    ResourceSet,
    normalize_name,
    resource_name_matches,
};

/// In-memory resource set that records every read request.
#[derive(Debug, Default)]
pub(crate) struct CountingResources {
    files: Vec<(String, String)>,
    reads: Mutex<Vec<String>>,
}

impl CountingResources {
    /// Creates a resource set from `(name, contents)` pairs.
    pub(crate) fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files.iter().map(|(n, c)| ((*n).to_string(), (*c).to_string())).collect(),
            reads: Mutex::new(Vec::new()),
        }
    }

    /// How many times `name` was requested.
    pub(crate) fn reads_of(&self, name: &str) -> usize {
        self.reads.lock().unwrap().iter().filter(|read| *read == name).count()
    }
}

impl ResourceSet for CountingResources {
    fn read(&self, name: &str) -> Option<String> {
        self.reads.lock().unwrap().push(name.to_string());
        self.files
            .iter()
            .find(|(candidate, _)| resource_name_matches(candidate, name))
            .map(|(_, contents)| contents.clone())
    }

    fn names(&self) -> Vec<String> {
        self.files.iter().map(|(name, _)| normalize_name(name)).collect()
    }
}

/// Leaks a value so it can stand in for a `static` in tests.
pub(crate) fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}
