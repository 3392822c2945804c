//! revive-settings: layered, hot-reloadable input settings
//!
//! Settings are read from a host-provided key-value store, first from the
//! running application's section and then from the global section. Each
//! reload derives an immutable [`InputSettings`] snapshot, including the
//! per-hand controller offset transforms, and publishes it atomically so
//! per-frame readers never lock.
//!
//! | Module     | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `backend`  | Settings store interface and value types         |
//! | `section`  | Application/global section resolution            |
//! | `getter`   | Two-tier lookup with fallback to defaults        |
//! | `tunables` | Registry of recognised keys and their defaults   |
//! | `offsets`  | Per-hand controller offsets with mirroring       |
//! | `snapshot` | Snapshot history and lock-free publication       |
//! | `script`   | Input script path resolution                     |
//! | `options`  | Resolver constants, overridable from TOML        |

pub mod backend;
pub mod getter;
pub mod offsets;
pub mod options;
pub mod script;
pub mod section;
pub mod snapshot;
pub mod tunables;

pub use backend::{ConfigBackend, LookupError, SettingValue, Value};
pub use getter::{LayeredGetter, Origin, Resolved};
pub use glam::Vec3;
pub use offsets::{build_offsets, EulerAngles, HandOffsets, HandSide, Matrix34};
pub use options::{SettingsOptions, DEFAULT_OPTIONS_TOML};
pub use script::{FileProbe, KnownFolders, ScriptPathResolver, SystemFolders};
pub use section::{resolve_section, resolve_section_for, ApplicationIdentity, IdentityError, Section};
pub use snapshot::{GripMode, InputSettings, SettingsManager};
pub use tunables::{effective_values, EffectiveValue, Tunable, TunableEntry, REGISTRY};
