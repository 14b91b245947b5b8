//! Traffic indicator settings controller.

use crate::availability::ControlAvailability;
use crate::choices::{ChoiceList, IndexFallbacks, ListSelection, ScreenChoices};
use crate::color::Argb;
use crate::error::SettingsError;
use crate::masks::MaskConfig;
use crate::state::PackedState;
use crate::store::{SettingKey, SettingsStore, TrafficStats};

use log::{debug, info};
use std::sync::Arc;

/// Threshold used when none has been stored.
pub const DEFAULT_AUTOHIDE_THRESHOLD: i32 = 10;

/// A user edit of one setting, carrying the new candidate value.
///
/// List settings carry the string-encoded list value, as a list widget
/// reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    /// Display mode list value (raw `METER | TEXT` bits).
    DisplayMode(String),
    /// Picked color.
    Color(Argb),
    /// Monitor mode list value (raw `UP | DOWN` bits).
    MonitorMode(String),
    /// Refresh period list value in milliseconds.
    Period(String),
    /// Unit list value, `"0"` or `"1"`.
    Unit(String),
    /// Autohide toggle.
    Autohide(bool),
    /// Autohide threshold slider.
    AutohideThreshold(i32),
}

/// What the settings screen should currently show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenView {
    /// Display mode list.
    pub display: ListSelection,
    /// Monitor mode list.
    pub monitor: ListSelection,
    /// Refresh period list.
    pub period: ListSelection,
    /// Unit list.
    pub unit: ListSelection,
    /// Current color.
    pub color: Argb,
    /// Color summary, `#aarrggbb`.
    pub color_summary: String,
    /// Autohide toggle.
    pub autohide: bool,
    /// Autohide threshold slider.
    pub autohide_threshold: i32,
    /// Which controls are enabled.
    pub availability: ControlAvailability,
    /// Whether the host reports traffic. When false the list widgets keep
    /// their defaults and packed changes are refused.
    pub traffic_supported: bool,
}

/// Binds the settings screen to the persisted settings.
///
/// Every accepted change is written to the store immediately. The packed
/// state is updated by read-modify-write of only the bits the change owns.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use trafficmeter_core::{
///     MaskConfig, MemoryStore, MockTrafficStats, ScreenChoices, SettingChange,
///     TrafficSettingsController, standard_resources,
/// };
///
/// let masks = MaskConfig::load(&standard_resources())?;
/// let mut controller = TrafficSettingsController::new(
///     Arc::new(MemoryStore::new()),
///     masks,
///     ScreenChoices::standard(&masks),
///     &MockTrafficStats::supported(),
/// )?;
/// assert_eq!(controller.view().display.summary, "Meter");
///
/// controller.apply(SettingChange::Period("500".into()))?;
/// assert_eq!(controller.view().period.summary, "0.5 s");
/// # Ok::<(), trafficmeter_core::SettingsError>(())
/// ```
pub struct TrafficSettingsController {
    store: Arc<dyn SettingsStore>,
    masks: MaskConfig,
    choices: ScreenChoices,
    fallbacks: IndexFallbacks,
    state: Option<PackedState>,
    view: ScreenView,
}

impl TrafficSettingsController {
    /// Create a controller with the default fallback indices.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Store`] if the store cannot be read.
    pub fn new(
        store: Arc<dyn SettingsStore>,
        masks: MaskConfig,
        choices: ScreenChoices,
        stats: &dyn TrafficStats,
    ) -> Result<Self, SettingsError> {
        Self::with_fallbacks(store, masks, choices, IndexFallbacks::default(), stats)
    }

    /// Create a controller with custom fallback indices.
    ///
    /// The color and autohide settings are always read. The packed state is
    /// only read when `stats` reports traffic support.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Store`] if the store cannot be read.
    pub fn with_fallbacks(
        store: Arc<dyn SettingsStore>,
        masks: MaskConfig,
        choices: ScreenChoices,
        fallbacks: IndexFallbacks,
        stats: &dyn TrafficStats,
    ) -> Result<Self, SettingsError> {
        let color = Argb::from_stored(store.get_int_or(SettingKey::Color, Argb::DEFAULT.to_stored())?);
        let autohide = store.get_int_or(SettingKey::Autohide, 0)? == 1;
        let autohide_threshold =
            store.get_int_or(SettingKey::AutohideThreshold, DEFAULT_AUTOHIDE_THRESHOLD)?;

        let supported = stats.is_supported();
        let stored_state = if supported {
            let initial = PackedState::initial(&masks);
            Some(PackedState::from_stored(
                store.get_int_or(SettingKey::State, initial.to_stored())?,
            ))
        } else {
            None
        };

        let mut controller = Self {
            store,
            masks,
            choices,
            fallbacks,
            state: None,
            view: ScreenView {
                color,
                color_summary: color.summary(),
                autohide,
                autohide_threshold,
                ..Default::default()
            },
        };

        match stored_state {
            Some(state) => controller.load_state(state),
            None => info!("traffic statistics unsupported, packed settings left at defaults"),
        }

        Ok(controller)
    }

    fn load_state(&mut self, state: PackedState) {
        debug!("loaded packed state {:#010x}", state.bits());

        let masks = &self.masks;
        let choices = &self.choices;
        let display_index = state.display_mode_index(masks, &choices.display);

        self.view.availability = ControlAvailability::for_display_index(display_index);
        self.view.display =
            ListSelection::resolve(&choices.display, display_index, self.fallbacks.display);
        self.view.monitor = ListSelection::resolve(
            &choices.monitor,
            state.monitor_mode_index(masks, &choices.monitor),
            self.fallbacks.monitor,
        );
        self.view.period = ListSelection::resolve(
            &choices.period,
            state.period_index(masks, &choices.period),
            self.fallbacks.period,
        );
        self.view.unit =
            ListSelection::resolve(&choices.unit, Some(state.unit_index(masks)), 0);
        self.view.traffic_supported = true;
        self.state = Some(state);
    }

    /// What the screen should show.
    pub fn view(&self) -> &ScreenView {
        &self.view
    }

    /// The current packed state, `None` when traffic is unsupported.
    pub fn packed_state(&self) -> Option<PackedState> {
        self.state
    }

    /// The configured masks.
    pub fn masks(&self) -> &MaskConfig {
        &self.masks
    }

    /// The lists offered on the screen.
    pub fn choices(&self) -> &ScreenChoices {
        &self.choices
    }

    /// Apply one user edit.
    ///
    /// Returns `Ok(true)` when the change was accepted and persisted, and
    /// `Ok(false)` for packed settings while traffic is unsupported.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::UnknownChoice`] if a list value is not offered by its list
    /// - [`SettingsError::InvalidNumber`] if a list value is not numeric
    /// - [`SettingsError::Store`] if the write fails
    pub fn apply(&mut self, change: SettingChange) -> Result<bool, SettingsError> {
        match change {
            SettingChange::DisplayMode(value) => {
                let Some(state) = self.packed("display") else {
                    return Ok(false);
                };
                let index = self.choices.display.require(&value)?;
                let raw = parse_number(&self.choices.display, &value)?;

                self.persist_state(state.with_display_mode(&self.masks, raw))?;
                self.view.display = ListSelection::resolve(&self.choices.display, Some(index), 0);
                self.view.availability = ControlAvailability::for_display_index(Some(index));
            }
            SettingChange::MonitorMode(value) => {
                let Some(state) = self.packed("monitor") else {
                    return Ok(false);
                };
                let index = self.choices.monitor.require(&value)?;
                let raw = parse_number(&self.choices.monitor, &value)?;

                self.persist_state(state.with_monitor_mode(&self.masks, raw))?;
                self.view.monitor = ListSelection::resolve(&self.choices.monitor, Some(index), 0);
            }
            SettingChange::Period(value) => {
                let Some(state) = self.packed("period") else {
                    return Ok(false);
                };
                let index = self.choices.period.require(&value)?;
                let period_ms = parse_number(&self.choices.period, &value)?;

                self.persist_state(state.with_period(&self.masks, period_ms))?;
                self.view.period = ListSelection::resolve(&self.choices.period, Some(index), 0);
            }
            SettingChange::Unit(value) => {
                let Some(state) = self.packed("unit") else {
                    return Ok(false);
                };
                let index = self.choices.unit.require(&value)?;

                self.persist_state(state.with_unit(&self.masks, value == "1"))?;
                self.view.unit = ListSelection::resolve(&self.choices.unit, Some(index), 0);
            }
            SettingChange::Color(color) => {
                self.store.put_int(SettingKey::Color, color.to_stored())?;
                self.view.color = color;
                self.view.color_summary = color.summary();
                debug!("color set to {}", color);
            }
            SettingChange::Autohide(enabled) => {
                self.store
                    .put_int(SettingKey::Autohide, i32::from(enabled))?;
                self.view.autohide = enabled;
                debug!("autohide set to {}", enabled);
            }
            SettingChange::AutohideThreshold(threshold) => {
                self.store
                    .put_int(SettingKey::AutohideThreshold, threshold)?;
                self.view.autohide_threshold = threshold;
                debug!("autohide threshold set to {}", threshold);
            }
        }

        Ok(true)
    }

    /// Restore the default color (opaque white).
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Store`] if the write fails.
    pub fn reset_color(&mut self) -> Result<(), SettingsError> {
        info!("resetting color to {}", Argb::DEFAULT);
        self.apply(SettingChange::Color(Argb::DEFAULT))?;
        Ok(())
    }

    fn packed(&self, list: &str) -> Option<PackedState> {
        if self.state.is_none() {
            debug!("ignoring {} change, traffic statistics unsupported", list);
        }
        self.state
    }

    fn persist_state(&mut self, state: PackedState) -> Result<(), SettingsError> {
        self.store.put_int(SettingKey::State, state.to_stored())?;
        debug!("persisted packed state {:#010x}", state.bits());
        self.state = Some(state);
        Ok(())
    }
}

fn parse_number(list: &ChoiceList, value: &str) -> Result<u32, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidNumber {
        list: list.name(),
        value: value.to_owned(),
    })
}
