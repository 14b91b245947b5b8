//! Settings codec and controller for a network traffic status indicator.
//!
//! The indicator's display mode, monitored direction, unit and refresh period
//! are persisted together in one 32-bit integer. This crate owns the layout of
//! that integer ([`PackedState`], with bit positions supplied by
//! [`MaskConfig`]) and binds it, together with the color and autohide settings,
//! to a settings screen ([`TrafficSettingsController`]).
//!
//! The settings store and the traffic counters are collaborators behind the
//! [`SettingsStore`] and [`TrafficStats`] traits.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trafficmeter_core::{
//!     ControlAvailability, MaskConfig, MemoryStore, MockTrafficStats, ScreenChoices,
//!     SettingChange, SettingKey, TrafficSettingsController, standard_resources,
//! };
//!
//! fn main() -> Result<(), trafficmeter_core::SettingsError> {
//!     // Masks are read once from the resource table
//!     let masks = MaskConfig::load(&standard_resources())?;
//!
//!     let store = Arc::new(MemoryStore::new());
//!     let mut controller = TrafficSettingsController::new(
//!         store.clone(),
//!         masks,
//!         ScreenChoices::standard(&masks),
//!         &MockTrafficStats::supported(),
//!     )?;
//!
//!     // Switch from the meter to text
//!     controller.apply(SettingChange::DisplayMode(masks.text.to_string()))?;
//!     assert_eq!(controller.view().availability, ControlAvailability::all_enabled());
//!     assert!(store.value(SettingKey::State).is_some());
//!
//!     controller.reset_color()?;
//!     assert_eq!(controller.view().color_summary, "#ffffffff");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! Use [`MemoryStore`] and [`MockTrafficStats`] in place of a real settings
//! backend and host counters.

#![warn(missing_docs)]

mod availability;
mod choices;
mod color;
mod controller;
mod error;
mod masks;
mod mock;
mod state;
mod store;

// Re-export public API
pub use availability::ControlAvailability;
pub use choices::{ChoiceList, IndexFallbacks, ListSelection, ScreenChoices};
pub use color::Argb;
pub use controller::{
    DEFAULT_AUTOHIDE_THRESHOLD, ScreenView, SettingChange, TrafficSettingsController,
};
pub use error::SettingsError;
pub use masks::{MaskConfig, ResourceLookup};
pub use mock::{MemoryStore, MockTrafficStats, standard_resources};
pub use state::{DEFAULT_PERIOD_MS, PackedState, get_bit, set_bit};
pub use store::{ByteTotals, ProcNetDev, SettingKey, SettingsStore, TrafficStats};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn controller_for(
        resources: &HashMap<&'static str, i32>,
        store: Arc<MemoryStore>,
    ) -> TrafficSettingsController {
        let masks = MaskConfig::load(resources).unwrap();
        TrafficSettingsController::new(
            store,
            masks,
            ScreenChoices::standard(&masks),
            &MockTrafficStats::supported(),
        )
        .unwrap()
    }

    #[test]
    fn test_state_survives_restart() {
        let store = Arc::new(MemoryStore::new());

        let mut first = controller_for(&standard_resources(), store.clone());
        first
            .apply(SettingChange::DisplayMode("24".into()))
            .unwrap();
        first.apply(SettingChange::MonitorMode("1".into())).unwrap();
        first.apply(SettingChange::Period("3000".into())).unwrap();
        first.apply(SettingChange::Unit("1".into())).unwrap();
        first
            .apply(SettingChange::Color("#ff33b5e5".parse().unwrap()))
            .unwrap();

        let second = controller_for(&standard_resources(), store);
        let view = second.view();
        assert_eq!(view.display.summary, "Meter and text");
        assert_eq!(view.monitor.summary, "Upload");
        assert_eq!(view.period.summary, "3 s");
        assert_eq!(view.unit.summary, "Kilobytes");
        assert_eq!(view.color_summary, "#ff33b5e5");
        assert_eq!(second.packed_state(), first.packed_state());
    }

    #[test]
    fn test_injected_masks_change_layout() {
        let resources = HashMap::from([
            (MaskConfig::METER, 1),
            (MaskConfig::TEXT, 2),
            (MaskConfig::UP, 4),
            (MaskConfig::DOWN, 8),
            (MaskConfig::UNIT, 16),
            (MaskConfig::PERIOD, -65536),
        ]);
        let store = Arc::new(MemoryStore::new());
        let mut controller = controller_for(&resources, store.clone());

        assert_eq!(controller.view().display.index, 1);
        assert_eq!(
            controller.packed_state().map(PackedState::bits),
            Some((2000 << 16) | 1 | 8)
        );

        controller
            .apply(SettingChange::MonitorMode("12".into()))
            .unwrap();
        assert_eq!(
            store.value(SettingKey::State).map(i32::cast_unsigned),
            Some((2000 << 16) | 1 | 4 | 8)
        );
    }

    #[test]
    fn test_invalid_masks_fail_before_controller() {
        let mut resources = standard_resources();
        resources.insert(MaskConfig::TEXT, 0x8);
        assert!(matches!(
            MaskConfig::load(&resources),
            Err(SettingsError::OverlappingMasks { .. })
        ));
    }
}
