//! Section resolution
//!
//! Every lookup first consults the "home" section of the running
//! process. For a recognised application that is its application key;
//! otherwise it is the global section.

use std::fmt;

use crate::options::SettingsOptions;

/// A named configuration scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Section(String);

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The global section named by `options`
    pub fn global(options: &SettingsOptions) -> Self {
        Self(options.global_section.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Application key of an application-scoped section
    ///
    /// Returns the part after `prefix`, or `None` if this section does not
    /// start with it.
    pub fn app_suffix(&self, prefix: &str) -> Option<&str> {
        self.0.strip_prefix(prefix)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Section {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Why the application identity could not be determined
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("no application registered for process {pid}")]
    NoApplication { pid: u32 },

    #[error("application key is {len} bytes, limit is {max}")]
    KeyTooLong { len: usize, max: usize },

    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

/// Host service mapping a process to its application key
pub trait ApplicationIdentity {
    fn application_key(&self, process_id: u32) -> Result<String, IdentityError>;
}

impl<F> ApplicationIdentity for F
where
    F: Fn(u32) -> Result<String, IdentityError>,
{
    fn application_key(&self, process_id: u32) -> Result<String, IdentityError> {
        self(process_id)
    }
}

/// Resolve the home section for the current process
pub fn resolve_section<I>(identity: &I, options: &SettingsOptions) -> Section
where
    I: ApplicationIdentity + ?Sized,
{
    resolve_section_for(identity, std::process::id(), options)
}

/// Resolve the home section for `process_id`
///
/// Any identity failure degrades to the global section.
pub fn resolve_section_for<I>(identity: &I, process_id: u32, options: &SettingsOptions) -> Section
where
    I: ApplicationIdentity + ?Sized,
{
    let key = identity.application_key(process_id).and_then(|key| {
        if key.is_empty() {
            Err(IdentityError::NoApplication { pid: process_id })
        } else if key.len() > options.max_section_len {
            Err(IdentityError::KeyTooLong {
                len: key.len(),
                max: options.max_section_len,
            })
        } else {
            Ok(key)
        }
    });

    match key {
        Ok(key) => {
            tracing::debug!(section = %key, "Using application section");
            Section::new(key)
        }
        Err(e) => {
            tracing::info!(
                "Application identity unavailable ({}), using global section {:?}",
                e,
                options.global_section
            );
            Section::global(options)
        }
    }
}
