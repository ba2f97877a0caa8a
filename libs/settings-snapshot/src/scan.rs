//! Member discovery over a target object

use crate::config::SnapshotConfig;
use crate::error::SnapshotError;
use crate::member::{MemberDescriptor, Settings};
use crate::setting::Setting;
use crate::sink::{TracingSink, WriteFailureSink};
use crate::snapshot::SettingsSnapshot;
use std::cell::RefCell;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Scan `target` with the default configuration, reporting failed writes
/// through `tracing`
pub fn scan<T: Settings>(target: &RefCell<T>) -> Scan<'_, T> {
    Scanner::default().scan(target)
}

/// Like [`scan`], for hosts whose target may be absent
pub fn try_scan<T: Settings>(target: Option<&RefCell<T>>) -> Result<Scan<'_, T>, SnapshotError> {
    Scanner::default().try_scan(target)
}

/// Configured entry point for scanning target objects
#[derive(Clone)]
pub struct Scanner {
    config: SnapshotConfig,
    sink: Arc<dyn WriteFailureSink>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(SnapshotConfig::default())
    }
}

impl Scanner {
    pub fn new(config: SnapshotConfig) -> Self {
        Self {
            config,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the sink receiving failed-write reports
    pub fn with_sink(mut self, sink: Arc<dyn WriteFailureSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Lazily produce one handle per eligible member of `target`
    ///
    /// Handles come in declaration order. Each handle captures its default
    /// when the iterator yields it, not when `scan` is called.
    pub fn scan<'a, T: Settings>(&self, target: &'a RefCell<T>) -> Scan<'a, T> {
        tracing::debug!(settings_type = T::TYPE_NAME, "scanning settings");
        Scan {
            target,
            members: T::members().iter(),
            config: self.config,
            sink: Arc::clone(&self.sink),
        }
    }

    /// Scan a target that may be absent
    ///
    /// Fails with [`SnapshotError::InvalidArgument`] before any member is
    /// visited when `target` is `None`.
    pub fn try_scan<'a, T: Settings>(
        &self,
        target: Option<&'a RefCell<T>>,
    ) -> Result<Scan<'a, T>, SnapshotError> {
        let target = target.ok_or(SnapshotError::InvalidArgument { name: "target" })?;
        Ok(self.scan(target))
    }

    /// Scan `target` to completion
    pub fn snapshot<'a, T: Settings>(&self, target: &'a RefCell<T>) -> SettingsSnapshot<'a, T> {
        self.scan(target).collect()
    }
}

/// Lazy, single-pass sequence of settings handles
///
/// Produced by [`scan`]. Consuming the iterator constructs the handles; members
/// that are never reached are never read.
pub struct Scan<'a, T: Settings> {
    target: &'a RefCell<T>,
    members: std::slice::Iter<'static, MemberDescriptor<T>>,
    config: SnapshotConfig,
    sink: Arc<dyn WriteFailureSink>,
}

impl<'a, T: Settings> Iterator for Scan<'a, T> {
    type Item = Setting<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let member = self.members.find(|m| m.is_eligible())?;
        Some(Setting::new(
            self.target,
            member,
            self.config,
            Arc::clone(&self.sink),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.members.len()))
    }
}

impl<T: Settings> FusedIterator for Scan<'_, T> {}
