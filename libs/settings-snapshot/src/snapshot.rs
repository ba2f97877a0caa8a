//! Fully scanned settings of one target object
//!
//! Batch sweeps (`reload_all`, `reset_all`) visit every handle; a write that
//! fails on one member is reported by that handle and the sweep moves on.

use crate::member::Settings;
use crate::setting::Setting;
use std::fmt;

/// All eligible settings of a target, in scan order
pub struct SettingsSnapshot<'a, T: Settings> {
    settings: Vec<Setting<'a, T>>,
}

impl<'a, T: Settings> SettingsSnapshot<'a, T> {
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Setting<'a, T>> {
        self.settings.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Setting<'a, T>> {
        self.settings.iter_mut()
    }

    /// Find a setting by member name
    pub fn get(&self, name: &str) -> Option<&Setting<'a, T>> {
        self.settings.iter().find(|s| s.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Setting<'a, T>> {
        self.settings.iter_mut().find(|s| s.name() == name)
    }

    /// Settings whose current value differs from their default
    pub fn changed(&self) -> impl Iterator<Item = &Setting<'a, T>> + '_ {
        self.settings.iter().filter(|s| s.changed())
    }

    /// Whether any setting has changed
    pub fn is_dirty(&self) -> bool {
        self.settings.iter().any(Setting::changed)
    }

    /// Make every current value the new default
    pub fn reload_all(&mut self) {
        for setting in &mut self.settings {
            setting.reload();
        }
        tracing::debug!(settings_type = T::TYPE_NAME, count = self.settings.len(), "settings reloaded");
    }

    /// Write every default back into the target
    pub fn reset_all(&self) {
        for setting in &self.settings {
            setting.reset();
        }
        tracing::debug!(settings_type = T::TYPE_NAME, count = self.settings.len(), "settings reset");
    }

    pub fn into_inner(self) -> Vec<Setting<'a, T>> {
        self.settings
    }
}

impl<'a, T: Settings> FromIterator<Setting<'a, T>> for SettingsSnapshot<'a, T> {
    fn from_iter<I: IntoIterator<Item = Setting<'a, T>>>(iter: I) -> Self {
        Self {
            settings: iter.into_iter().collect(),
        }
    }
}

impl<'a, T: Settings> IntoIterator for SettingsSnapshot<'a, T> {
    type Item = Setting<'a, T>;
    type IntoIter = std::vec::IntoIter<Setting<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.settings.into_iter()
    }
}

impl<'s, 'a, T: Settings> IntoIterator for &'s SettingsSnapshot<'a, T> {
    type Item = &'s Setting<'a, T>;
    type IntoIter = std::slice::Iter<'s, Setting<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.settings.iter()
    }
}

impl<T: Settings> fmt::Display for SettingsSnapshot<'_, T> {
    /// One setting per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for setting in &self.settings {
            writeln!(f, "{setting}")?;
        }
        Ok(())
    }
}

impl<T: Settings> fmt::Debug for SettingsSnapshot<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.settings).finish()
    }
}
