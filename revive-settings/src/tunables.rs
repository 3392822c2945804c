//! Recognised tunables
//!
//! Every setting the runtime reads, with its store key, value type and
//! default. Angles are in degrees, offsets in meters.

use crate::backend::{ConfigBackend, SettingValue, Value};
use crate::getter::{LayeredGetter, Origin};

/// A named, typed, defaulted setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunable<T> {
    pub key: &'static str,
    pub default: T,
}

/// Default values that can be turned into a queryable setting type
pub trait TunableDefault: Copy {
    type Value: SettingValue;

    fn to_value(self) -> Self::Value;
}

impl TunableDefault for f32 {
    type Value = f32;

    fn to_value(self) -> f32 {
        self
    }
}

impl TunableDefault for i32 {
    type Value = i32;

    fn to_value(self) -> i32 {
        self
    }
}

impl TunableDefault for bool {
    type Value = bool;

    fn to_value(self) -> bool {
        self
    }
}

impl TunableDefault for &'static str {
    type Value = String;

    fn to_value(self) -> String {
        self.to_owned()
    }
}

impl<T: TunableDefault> Tunable<T> {
    /// Resolve this tunable through the layered getter
    pub fn read<B: ConfigBackend>(&self, getter: &LayeredGetter<B>) -> T::Value {
        getter.get(self.key, self.default.to_value())
    }
}

pub const THUMB_DEADZONE: Tunable<f32> = Tunable {
    key: "ThumbDeadzone",
    default: 0.3,
};

/// Raw [`GripMode`](crate::GripMode) discriminant
pub const TOGGLE_GRIP: Tunable<i32> = Tunable {
    key: "ToggleGrip",
    default: 0,
};

pub const TRIGGER_AS_GRIP: Tunable<bool> = Tunable {
    key: "TriggerAsGrip",
    default: false,
};

/// Seconds a grip must be held before toggle mode releases it
pub const TOGGLE_DELAY: Tunable<f32> = Tunable {
    key: "ToggleDelay",
    default: 0.5,
};

pub const TOUCH_PITCH: Tunable<f32> = Tunable {
    key: "TouchPitch",
    default: -28.0,
};

pub const TOUCH_YAW: Tunable<f32> = Tunable {
    key: "TouchYaw",
    default: 0.0,
};

pub const TOUCH_ROLL: Tunable<f32> = Tunable {
    key: "TouchRoll",
    default: -14.0,
};

pub const TOUCH_X: Tunable<f32> = Tunable {
    key: "TouchX",
    default: 0.016,
};

pub const TOUCH_Y: Tunable<f32> = Tunable {
    key: "TouchY",
    default: -0.036,
};

pub const TOUCH_Z: Tunable<f32> = Tunable {
    key: "TouchZ",
    default: 0.016,
};

/// File name of the input-mapping script
pub const INPUT_SCRIPT: Tunable<&'static str> = Tunable {
    key: "InputScript",
    default: "SteamVR.lua",
};

/// Default of a registry entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Str(&'static str),
}

/// One row of the tunable registry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunableEntry {
    pub key: &'static str,
    pub default: DefaultValue,
}

/// Every recognised tunable
pub const REGISTRY: &[TunableEntry] = &[
    TunableEntry {
        key: THUMB_DEADZONE.key,
        default: DefaultValue::Float(THUMB_DEADZONE.default),
    },
    TunableEntry {
        key: TOGGLE_GRIP.key,
        default: DefaultValue::Int(TOGGLE_GRIP.default),
    },
    TunableEntry {
        key: TRIGGER_AS_GRIP.key,
        default: DefaultValue::Bool(TRIGGER_AS_GRIP.default),
    },
    TunableEntry {
        key: TOGGLE_DELAY.key,
        default: DefaultValue::Float(TOGGLE_DELAY.default),
    },
    TunableEntry {
        key: TOUCH_PITCH.key,
        default: DefaultValue::Float(TOUCH_PITCH.default),
    },
    TunableEntry {
        key: TOUCH_YAW.key,
        default: DefaultValue::Float(TOUCH_YAW.default),
    },
    TunableEntry {
        key: TOUCH_ROLL.key,
        default: DefaultValue::Float(TOUCH_ROLL.default),
    },
    TunableEntry {
        key: TOUCH_X.key,
        default: DefaultValue::Float(TOUCH_X.default),
    },
    TunableEntry {
        key: TOUCH_Y.key,
        default: DefaultValue::Float(TOUCH_Y.default),
    },
    TunableEntry {
        key: TOUCH_Z.key,
        default: DefaultValue::Float(TOUCH_Z.default),
    },
    TunableEntry {
        key: INPUT_SCRIPT.key,
        default: DefaultValue::Str(INPUT_SCRIPT.default),
    },
];

/// A registry entry as currently resolved
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveValue {
    pub key: &'static str,
    pub value: Value,
    pub origin: Origin,
}

/// Resolve every registry entry, reporting where each value came from
pub fn effective_values<B: ConfigBackend>(getter: &LayeredGetter<B>) -> Vec<EffectiveValue> {
    REGISTRY
        .iter()
        .map(|entry| {
            let (value, origin) = match entry.default {
                DefaultValue::Float(d) => {
                    let r = getter.lookup(entry.key, d);
                    (Value::Float(r.value), r.origin)
                }
                DefaultValue::Int(d) => {
                    let r = getter.lookup(entry.key, d);
                    (Value::Int(r.value), r.origin)
                }
                DefaultValue::Bool(d) => {
                    let r = getter.lookup(entry.key, d);
                    (Value::Bool(r.value), r.origin)
                }
                DefaultValue::Str(d) => {
                    let r = getter.lookup(entry.key, d.to_owned());
                    (Value::Str(r.value), r.origin)
                }
            };
            EffectiveValue {
                key: entry.key,
                value,
                origin,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::backend::memory::MemoryBackend;
    use crate::options::SettingsOptions;
    use crate::section::Section;

    fn getter(backend: &MemoryBackend) -> LayeredGetter<&MemoryBackend> {
        LayeredGetter::new(
            backend,
            Section::new("revive.app.test"),
            &SettingsOptions::default(),
        )
    }

    #[test]
    fn test_registry_keys_unique() {
        let keys: HashSet<_> = REGISTRY.iter().map(|e| e.key).collect();
        assert_eq!(keys.len(), REGISTRY.len());
    }

    #[test]
    fn test_tunable_read_uses_default() {
        let backend = MemoryBackend::new();
        let getter = getter(&backend);
        assert_eq!(THUMB_DEADZONE.read(&getter), 0.3);
        assert_eq!(INPUT_SCRIPT.read(&getter), "SteamVR.lua");
    }

    #[test]
    fn test_tunable_read_uses_store() {
        let backend = MemoryBackend::new();
        backend.set("revive", "InputScript", Value::Str("Custom.lua".into()));
        assert_eq!(INPUT_SCRIPT.read(&getter(&backend)), "Custom.lua");
    }

    #[test]
    fn test_effective_values_cover_registry() {
        let backend = MemoryBackend::new();
        backend.set("revive.app.test", "TouchYaw", Value::Float(5.0));
        backend.set("revive", "TriggerAsGrip", Value::Bool(true));

        let values = effective_values(&getter(&backend));
        assert_eq!(values.len(), REGISTRY.len());

        let yaw = values.iter().find(|v| v.key == "TouchYaw").unwrap();
        assert_eq!(yaw.value, Value::Float(5.0));
        assert_eq!(yaw.origin, Origin::Application);

        let trigger = values.iter().find(|v| v.key == "TriggerAsGrip").unwrap();
        assert_eq!(trigger.value, Value::Bool(true));
        assert_eq!(trigger.origin, Origin::Global);

        let script = values.iter().find(|v| v.key == "InputScript").unwrap();
        assert_eq!(script.value, Value::Str("SteamVR.lua".into()));
        assert_eq!(script.origin, Origin::Default);
    }
}
