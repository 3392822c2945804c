//! Input script location
//!
//! Scripts live in a fixed folder under the user's documents. A script
//! named after the running application's key takes precedence over the
//! configured script name.

use std::path::{Component, Path, PathBuf};

use crate::backend::ConfigBackend;
use crate::getter::LayeredGetter;
use crate::options::SettingsOptions;
use crate::tunables::INPUT_SCRIPT;

/// Known-folder lookup
pub trait KnownFolders {
    /// The user's documents folder, if the platform has one
    fn documents_dir(&self) -> Option<PathBuf>;
}

/// File existence probe
pub trait FileProbe {
    /// True only for existing regular files
    fn is_file(&self, path: &Path) -> bool;
}

/// Platform-backed folders and filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFolders;

impl KnownFolders for SystemFolders {
    fn documents_dir(&self) -> Option<PathBuf> {
        revive_utils::documents_dir()
    }
}

impl FileProbe for SystemFolders {
    fn is_file(&self, path: &Path) -> bool {
        revive_utils::is_file(path)
    }
}

/// Resolves the path of the input script for the active section
pub struct ScriptPathResolver<'a, B, F> {
    getter: &'a LayeredGetter<B>,
    folders: &'a F,
    options: &'a SettingsOptions,
}

impl<'a, B, F> ScriptPathResolver<'a, B, F>
where
    B: ConfigBackend,
    F: KnownFolders + FileProbe,
{
    pub fn new(getter: &'a LayeredGetter<B>, folders: &'a F, options: &'a SettingsOptions) -> Self {
        Self {
            getter,
            folders,
            options,
        }
    }

    /// Resolve the script path
    ///
    /// Without a documents folder the configured script name is returned
    /// as a relative path. The final candidate is not checked for
    /// existence.
    pub fn resolve(&self) -> PathBuf {
        let script = INPUT_SCRIPT.read(self.getter);

        let Some(documents) = self.folders.documents_dir() else {
            tracing::info!("Documents folder unavailable, using relative script path {:?}", script);
            return PathBuf::from(script);
        };
        let script_dir = documents.join(&self.options.script_subdir);

        if let Some(app_key) = self
            .getter
            .section()
            .app_suffix(&self.options.app_section_prefix)
        {
            let candidate = file_under(&script_dir, app_key);
            if self.folders.is_file(&candidate) {
                tracing::debug!("Using application script {:?}", candidate);
                return candidate;
            }
        }

        file_under(&script_dir, &script)
    }
}

/// Append `name` below `dir`, keeping only its plain components
///
/// Roots, drive prefixes and `..` are dropped, so the result never leaves
/// `dir`.
fn file_under(dir: &Path, name: &str) -> PathBuf {
    let mut path = dir.to_path_buf();
    for component in Path::new(name).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
    path
}
