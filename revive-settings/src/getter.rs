//! Two-tier key lookup
//!
//! A key is read from the application section first and from the global
//! section second; if neither has it the caller's default is returned.
//! The fallback is decided per key, so an application section may
//! override only some settings and inherit the rest.

use crate::backend::{ConfigBackend, SettingValue};
use crate::options::SettingsOptions;
use crate::section::Section;

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Application,
    Global,
    Default,
}

/// A looked-up value together with its origin
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub origin: Origin,
}

/// Layered reader over a settings store
#[derive(Debug)]
pub struct LayeredGetter<B> {
    backend: B,
    section: Section,
    global: Section,
    max_string_len: usize,
}

impl<B: ConfigBackend> LayeredGetter<B> {
    pub fn new(backend: B, section: Section, options: &SettingsOptions) -> Self {
        Self {
            backend,
            section,
            global: Section::global(options),
            max_string_len: options.max_string_len,
        }
    }

    /// The application (home) section probed first
    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn global_section(&self) -> &Section {
        &self.global
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read `key`, falling back to the global section and then `default`
    pub fn get<T: SettingValue>(&self, key: &str, default: T) -> T {
        self.lookup(key, default).value
    }

    /// Like [`get`](Self::get), also reporting which tier answered
    pub fn lookup<T: SettingValue>(&self, key: &str, default: T) -> Resolved<T> {
        let home_is_global = self.section == self.global;

        match T::fetch(&self.backend, self.section.as_str(), key, self.max_string_len) {
            Ok(value) => {
                let origin = if home_is_global {
                    Origin::Global
                } else {
                    Origin::Application
                };
                return Resolved { value, origin };
            }
            Err(e) => tracing::trace!(section = %self.section, key, "miss: {}", e),
        }

        if !home_is_global {
            match T::fetch(&self.backend, self.global.as_str(), key, self.max_string_len) {
                Ok(value) => {
                    return Resolved {
                        value,
                        origin: Origin::Global,
                    }
                }
                Err(e) => tracing::trace!(section = %self.global, key, "miss: {}", e),
            }
        }

        Resolved {
            value: default,
            origin: Origin::Default,
        }
    }
}
