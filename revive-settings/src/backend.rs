//! Settings store interface
//!
//! The persistent key-value store is owned by the host runtime. This
//! module only describes how it is queried: typed reads by section and
//! key, with an explicit error on miss.

use std::fmt;
use std::sync::Arc;

/// Why a typed read did not produce a value
///
/// Every variant is treated as a miss by the layered getter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("setting is not set")]
    UnsetSetting,

    #[error("setting holds a value of another type")]
    WrongType,

    #[error("settings store read failed: {0}")]
    ReadFailed(String),
}

/// Typed access to a sectioned key-value settings store
pub trait ConfigBackend {
    fn get_float(&self, section: &str, key: &str) -> Result<f32, LookupError>;

    fn get_int(&self, section: &str, key: &str) -> Result<i32, LookupError>;

    fn get_bool(&self, section: &str, key: &str) -> Result<bool, LookupError>;

    /// Read a string of at most `max_len` bytes
    ///
    /// Stores with fixed buffers truncate longer values themselves.
    fn get_string(&self, section: &str, key: &str, max_len: usize)
        -> Result<String, LookupError>;
}

impl<B: ConfigBackend + ?Sized> ConfigBackend for &B {
    fn get_float(&self, section: &str, key: &str) -> Result<f32, LookupError> {
        (**self).get_float(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<i32, LookupError> {
        (**self).get_int(section, key)
    }

    fn get_bool(&self, section: &str, key: &str) -> Result<bool, LookupError> {
        (**self).get_bool(section, key)
    }

    fn get_string(&self, section: &str, key: &str, max_len: usize) -> Result<String, LookupError> {
        (**self).get_string(section, key, max_len)
    }
}

impl<B: ConfigBackend + ?Sized> ConfigBackend for Arc<B> {
    fn get_float(&self, section: &str, key: &str) -> Result<f32, LookupError> {
        (**self).get_float(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<i32, LookupError> {
        (**self).get_int(section, key)
    }

    fn get_bool(&self, section: &str, key: &str) -> Result<bool, LookupError> {
        (**self).get_bool(section, key)
    }

    fn get_string(&self, section: &str, key: &str, max_len: usize) -> Result<String, LookupError> {
        (**self).get_string(section, key, max_len)
    }
}

/// A value type the store can be queried for
pub trait SettingValue: Sized + Clone + fmt::Debug {
    fn fetch<B: ConfigBackend + ?Sized>(
        backend: &B,
        section: &str,
        key: &str,
        max_len: usize,
    ) -> Result<Self, LookupError>;
}

impl SettingValue for f32 {
    fn fetch<B: ConfigBackend + ?Sized>(
        backend: &B,
        section: &str,
        key: &str,
        _max_len: usize,
    ) -> Result<Self, LookupError> {
        backend.get_float(section, key)
    }
}

impl SettingValue for i32 {
    fn fetch<B: ConfigBackend + ?Sized>(
        backend: &B,
        section: &str,
        key: &str,
        _max_len: usize,
    ) -> Result<Self, LookupError> {
        backend.get_int(section, key)
    }
}

impl SettingValue for bool {
    fn fetch<B: ConfigBackend + ?Sized>(
        backend: &B,
        section: &str,
        key: &str,
        _max_len: usize,
    ) -> Result<Self, LookupError> {
        backend.get_bool(section, key)
    }
}

impl SettingValue for String {
    fn fetch<B: ConfigBackend + ?Sized>(
        backend: &B,
        section: &str,
        key: &str,
        max_len: usize,
    ) -> Result<Self, LookupError> {
        let mut value = backend.get_string(section, key, max_len)?;
        truncate_to_boundary(&mut value, max_len);
        Ok(value)
    }
}

/// Truncate to at most `max_len` bytes without splitting a character
pub(crate) fn truncate_to_boundary(value: &mut String, max_len: usize) {
    if value.len() <= max_len {
        return;
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value.truncate(end);
}

/// A dynamically typed setting value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f32),
    Int(i32),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{:?}", v),
        }
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory store for tests

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::RwLock;

    use super::*;

    #[derive(Debug, Default)]
    pub struct MemoryBackend {
        values: RwLock<HashMap<(String, String), Value>>,
        reads: AtomicUsize,
        failing: RwLock<Option<String>>,
    }

    impl MemoryBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set(&self, section: &str, key: &str, value: Value) {
            self.values
                .write()
                .insert((section.to_string(), key.to_string()), value);
        }

        /// Make every read fail with `ReadFailed` (or stop doing so)
        pub fn set_failing(&self, reason: Option<&str>) {
            *self.failing.write() = reason.map(str::to_string);
        }

        /// Number of typed reads served so far
        pub fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        fn read(&self, section: &str, key: &str) -> Result<Value, LookupError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if let Some(reason) = self.failing.read().as_ref() {
                return Err(LookupError::ReadFailed(reason.clone()));
            }
            self.values
                .read()
                .get(&(section.to_string(), key.to_string()))
                .cloned()
                .ok_or(LookupError::UnsetSetting)
        }
    }

    impl ConfigBackend for MemoryBackend {
        fn get_float(&self, section: &str, key: &str) -> Result<f32, LookupError> {
            match self.read(section, key)? {
                Value::Float(v) => Ok(v),
                _ => Err(LookupError::WrongType),
            }
        }

        fn get_int(&self, section: &str, key: &str) -> Result<i32, LookupError> {
            match self.read(section, key)? {
                Value::Int(v) => Ok(v),
                _ => Err(LookupError::WrongType),
            }
        }

        fn get_bool(&self, section: &str, key: &str) -> Result<bool, LookupError> {
            match self.read(section, key)? {
                Value::Bool(v) => Ok(v),
                _ => Err(LookupError::WrongType),
            }
        }

        // Ignores `max_len`; the getter enforces the bound.
        fn get_string(
            &self,
            section: &str,
            key: &str,
            _max_len: usize,
        ) -> Result<String, LookupError> {
            match self.read(section, key)? {
                Value::Str(v) => Ok(v),
                _ => Err(LookupError::WrongType),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryBackend;
    use super::*;

    #[test]
    fn test_fetch_dispatches_by_type() {
        let backend = MemoryBackend::new();
        backend.set("revive", "ThumbDeadzone", Value::Float(0.25));
        backend.set("revive", "ToggleGrip", Value::Int(2));
        backend.set("revive", "TriggerAsGrip", Value::Bool(true));
        backend.set("revive", "InputScript", Value::Str("Default.lua".into()));

        assert_eq!(f32::fetch(&backend, "revive", "ThumbDeadzone", 260), Ok(0.25));
        assert_eq!(i32::fetch(&backend, "revive", "ToggleGrip", 260), Ok(2));
        assert_eq!(bool::fetch(&backend, "revive", "TriggerAsGrip", 260), Ok(true));
        assert_eq!(
            String::fetch(&backend, "revive", "InputScript", 260),
            Ok("Default.lua".to_string())
        );
    }

    #[test]
    fn test_fetch_wrong_type() {
        let backend = MemoryBackend::new();
        backend.set("revive", "ThumbDeadzone", Value::Str("0.3".into()));
        assert_eq!(
            f32::fetch(&backend, "revive", "ThumbDeadzone", 260),
            Err(LookupError::WrongType)
        );
    }

    #[test]
    fn test_fetch_through_arc_and_ref() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("revive", "ToggleDelay", Value::Float(0.75));

        assert_eq!(backend.get_float("revive", "ToggleDelay"), Ok(0.75));
        let by_ref = &*backend;
        assert_eq!(f32::fetch(&by_ref, "revive", "ToggleDelay", 0), Ok(0.75));
    }

    #[test]
    fn test_string_fetch_enforces_bound() {
        let backend = MemoryBackend::new();
        backend.set("revive", "InputScript", Value::Str("abcdefgh".into()));
        assert_eq!(
            String::fetch(&backend, "revive", "InputScript", 4),
            Ok("abcd".to_string())
        );
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let mut value = "ééé".to_string(); // 2 bytes each
        truncate_to_boundary(&mut value, 3);
        assert_eq!(value, "é");

        let mut short = "abc".to_string();
        truncate_to_boundary(&mut short, 10);
        assert_eq!(short, "abc");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Str("a.lua".into()).to_string(), "\"a.lua\"");
    }
}
