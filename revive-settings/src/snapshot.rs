//! Input settings snapshots
//!
//! Each reload reads every tunable, assembles one immutable
//! [`InputSettings`] record and publishes it. Readers take the current
//! record without locking and keep using it for as long as they hold it;
//! records are never mutated and the history retains every one of them.

use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use glam::Vec3;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::backend::ConfigBackend;
use crate::getter::LayeredGetter;
use crate::offsets::{build_offsets, EulerAngles, HandOffsets};
use crate::options::SettingsOptions;
use crate::script::{FileProbe, KnownFolders, ScriptPathResolver, SystemFolders};
use crate::section::{resolve_section, ApplicationIdentity, Section};
use crate::tunables::{self, EffectiveValue};

/// How the grip button behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GripMode {
    /// Grip is held while the button is held
    #[default]
    Normal,
    /// Each press toggles the grip
    Toggle,
    /// Short presses toggle, long presses hold
    Hybrid,
}

impl GripMode {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(GripMode::Normal),
            1 => Some(GripMode::Toggle),
            2 => Some(GripMode::Hybrid),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            GripMode::Normal => 0,
            GripMode::Toggle => 1,
            GripMode::Hybrid => 2,
        }
    }
}

/// Derived input settings published by one reload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    pub thumb_deadzone: f32,
    pub grip_mode: GripMode,
    pub trigger_as_grip: bool,
    pub toggle_delay: f32,
    pub touch_offsets: HandOffsets,
}

impl InputSettings {
    /// Read every tunable through `getter` and derive the hand offsets
    pub fn read<B: ConfigBackend>(getter: &LayeredGetter<B>) -> Self {
        let raw_grip = tunables::TOGGLE_GRIP.read(getter);
        let grip_mode = GripMode::from_raw(raw_grip).unwrap_or_else(|| {
            tracing::warn!("Unknown grip mode {}, using {:?}", raw_grip, GripMode::Normal);
            GripMode::Normal
        });

        let angles = EulerAngles {
            pitch: tunables::TOUCH_PITCH.read(getter),
            yaw: tunables::TOUCH_YAW.read(getter),
            roll: tunables::TOUCH_ROLL.read(getter),
        };
        let offset = Vec3::new(
            tunables::TOUCH_X.read(getter),
            tunables::TOUCH_Y.read(getter),
            tunables::TOUCH_Z.read(getter),
        );

        Self {
            thumb_deadzone: tunables::THUMB_DEADZONE.read(getter),
            grip_mode,
            trigger_as_grip: tunables::TRIGGER_AS_GRIP.read(getter),
            toggle_delay: tunables::TOGGLE_DELAY.read(getter),
            touch_offsets: build_offsets(angles, offset),
        }
    }
}

/// Owns the settings history and publishes the current snapshot
///
/// `current()` is a lock-free atomic load. `reload()` serializes on a
/// writer lock that readers never take.
pub struct SettingsManager<B, F = SystemFolders> {
    getter: LayeredGetter<B>,
    folders: F,
    options: SettingsOptions,
    /// Every published snapshot, in reload order (append-only)
    history: Mutex<Vec<Arc<InputSettings>>>,
    current: ArcSwap<InputSettings>,
}

impl<B: ConfigBackend> SettingsManager<B, SystemFolders> {
    /// Create a manager for the current process with default options
    pub fn new<I>(backend: B, identity: &I) -> Self
    where
        I: ApplicationIdentity + ?Sized,
    {
        let options = SettingsOptions::default();
        let section = resolve_section(identity, &options);
        Self::with_section(backend, section, SystemFolders, options)
    }
}

impl<B, F> SettingsManager<B, F>
where
    B: ConfigBackend,
    F: KnownFolders + FileProbe,
{
    /// Create a manager, resolving the section through `identity`
    pub fn with_options<I>(backend: B, identity: &I, folders: F, options: SettingsOptions) -> Self
    where
        I: ApplicationIdentity + ?Sized,
    {
        let section = resolve_section(identity, &options);
        Self::with_section(backend, section, folders, options)
    }

    /// Create a manager for an already resolved section
    ///
    /// Performs the initial load, so `current()` is valid immediately.
    pub fn with_section(backend: B, section: Section, folders: F, options: SettingsOptions) -> Self {
        let getter = LayeredGetter::new(backend, section, &options);
        let first = Arc::new(InputSettings::read(&getter));
        tracing::info!(section = %getter.section(), "Loaded input settings");

        Self {
            getter,
            folders,
            options,
            history: Mutex::new(vec![Arc::clone(&first)]),
            current: ArcSwap::new(first),
        }
    }

    /// Re-read all tunables and publish a new snapshot
    pub fn reload(&self) {
        let mut history = self.history.lock();

        let settings = Arc::new(InputSettings::read(&self.getter));
        tracing::info!(
            section = %self.getter.section(),
            generation = history.len() + 1,
            "Input settings reloaded"
        );
        tracing::debug!(
            thumb_deadzone = settings.thumb_deadzone,
            grip_mode = ?settings.grip_mode,
            trigger_as_grip = settings.trigger_as_grip,
            toggle_delay = settings.toggle_delay,
            "Published input settings"
        );

        history.push(Arc::clone(&settings));
        self.current.store(settings);
    }

    /// The most recently published snapshot
    pub fn current(&self) -> Arc<InputSettings> {
        self.current.load_full()
    }

    /// Number of snapshots published so far (at least 1)
    pub fn generation(&self) -> usize {
        self.history.lock().len()
    }

    /// The snapshot published by reload number `index` (0 is the initial load)
    pub fn snapshot(&self, index: usize) -> Option<Arc<InputSettings>> {
        self.history.lock().get(index).cloned()
    }

    /// All snapshots in publication order
    pub fn history(&self) -> Vec<Arc<InputSettings>> {
        self.history.lock().clone()
    }

    /// The active section
    pub fn section(&self) -> &Section {
        self.getter.section()
    }

    pub fn getter(&self) -> &LayeredGetter<B> {
        &self.getter
    }

    pub fn options(&self) -> &SettingsOptions {
        &self.options
    }

    /// Every tunable as it would resolve right now
    pub fn effective_values(&self) -> Vec<EffectiveValue> {
        tunables::effective_values(&self.getter)
    }

    /// Path of the input script for the active section
    pub fn resolve_script_path(&self) -> PathBuf {
        ScriptPathResolver::new(&self.getter, &self.folders, &self.options).resolve()
    }
}
