//! In-memory collaborators for testing.

use crate::error::SettingsError;
use crate::masks::MaskConfig;
use crate::store::{SettingKey, SettingsStore, TrafficStats};
use std::collections::HashMap;
use std::sync::Mutex;

/// A settings store kept in memory.
///
/// This allows testing the controller without a real settings backend.
///
/// # Example
///
/// ```
/// use trafficmeter_core::{MemoryStore, SettingKey, SettingsStore};
///
/// let store = MemoryStore::new();
/// store.put_int(SettingKey::Autohide, 1).unwrap();
/// assert_eq!(store.get_int(SettingKey::Autohide).unwrap(), Some(1));
/// assert_eq!(store.writes(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<SettingKey, i32>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial values.
    pub fn with_values(values: impl IntoIterator<Item = (SettingKey, i32)>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            writes: Mutex::new(0),
        }
    }

    /// Number of writes since creation.
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    /// Current value of `key`, without going through the trait.
    pub fn value(&self, key: SettingKey) -> Option<i32> {
        self.values.lock().unwrap().get(&key).copied()
    }
}

impl SettingsStore for MemoryStore {
    fn get_int(&self, key: SettingKey) -> Result<Option<i32>, SettingsError> {
        Ok(self.value(key))
    }

    fn put_int(&self, key: SettingKey, value: i32) -> Result<(), SettingsError> {
        self.values.lock().unwrap().insert(key, value);
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}

/// Traffic counters that are either always present or always missing.
#[derive(Debug, Clone, Copy)]
pub struct MockTrafficStats {
    /// Whether the counters report values.
    pub supported: bool,
}

impl MockTrafficStats {
    /// Counters that report zero bytes.
    pub fn supported() -> Self {
        Self { supported: true }
    }

    /// Counters the host cannot provide.
    pub fn unsupported() -> Self {
        Self { supported: false }
    }
}

impl TrafficStats for MockTrafficStats {
    fn total_tx_bytes(&self) -> Option<u64> {
        self.supported.then_some(0)
    }

    fn total_rx_bytes(&self) -> Option<u64> {
        self.supported.then_some(0)
    }
}

/// The stock mask resources.
pub fn standard_resources() -> HashMap<&'static str, i32> {
    HashMap::from([
        (MaskConfig::UP, 0x1),
        (MaskConfig::DOWN, 0x2),
        (MaskConfig::UNIT, 0x4),
        (MaskConfig::METER, 0x8),
        (MaskConfig::TEXT, 0x10),
        (MaskConfig::PERIOD, 0xFFFF_0000_u32.cast_signed()),
    ])
}
