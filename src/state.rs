//! Packed state codec.
//!
//! The display mode, monitor mode, unit and refresh period share one 32-bit
//! value. Each field owns the bits of its mask in [`MaskConfig`]; the period
//! owns the high 16 bits and is stored shifted left by 16.

use crate::choices::ChoiceList;
use crate::masks::MaskConfig;

/// Refresh period written when no state has been stored yet.
pub const DEFAULT_PERIOD_MS: u32 = 2000;

const PERIOD_SHIFT: u32 = 16;

/// Set `mask` in `value` when `state` is true, clear it otherwise.
pub fn set_bit(value: u32, mask: u32, state: bool) -> u32 {
    if state { value | mask } else { value & !mask }
}

/// Whether every bit of `mask` is set in `value`.
///
/// For a multi-bit mask this is not the same as `value & mask != 0`.
pub fn get_bit(value: u32, mask: u32) -> bool {
    value & mask == mask
}

/// The packed traffic indicator state, as persisted.
///
/// All operations are pure and return a new value.
///
/// # Example
///
/// ```
/// use trafficmeter_core::{MaskConfig, PackedState};
///
/// let masks = MaskConfig::new(0x8, 0x10, 0x1, 0x2, 0x4, 0xFFFF_0000).unwrap();
/// let state = PackedState::initial(&masks);
/// assert_eq!(state.period(&masks), 2000);
/// assert_eq!(state.bits(), (2000 << 16) | 0x8 | 0x2);
///
/// let state = state.with_period(&masks, 500);
/// assert_eq!(state.period(&masks), 500);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackedState(u32);

impl PackedState {
    /// Wrap a raw packed value.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw packed value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reinterpret a value read from an integer settings slot.
    pub const fn from_stored(stored: i32) -> Self {
        Self(stored.cast_unsigned())
    }

    /// The value to write into an integer settings slot.
    pub const fn to_stored(self) -> i32 {
        self.0.cast_signed()
    }

    /// Meter display, incoming traffic, two second refresh.
    pub fn initial(masks: &MaskConfig) -> Self {
        Self::default()
            .set_bit(masks.meter, true)
            .set_bit(masks.down, true)
            .with_period(masks, DEFAULT_PERIOD_MS)
    }

    /// See [`set_bit`].
    #[must_use]
    pub fn set_bit(self, mask: u32, state: bool) -> Self {
        Self(set_bit(self.0, mask, state))
    }

    /// See [`get_bit`].
    pub fn get_bit(self, mask: u32) -> bool {
        get_bit(self.0, mask)
    }

    /// Replace the refresh period.
    ///
    /// The period bits are cleared and then `period_ms << 16` is added. Periods
    /// above `u16::MAX` are not range checked; the excess is shifted out of
    /// the word.
    #[must_use]
    pub fn with_period(self, masks: &MaskConfig, period_ms: u32) -> Self {
        let cleared = set_bit(self.0, masks.period, false);
        Self(cleared.wrapping_add(period_ms << PERIOD_SHIFT))
    }

    /// The refresh period in milliseconds.
    pub fn period(self, masks: &MaskConfig) -> u32 {
        (self.0 & masks.period) >> PERIOD_SHIFT
    }

    /// Raw display mode value (`METER | TEXT` bits).
    pub fn display_mode(self, masks: &MaskConfig) -> u32 {
        self.0 & masks.display_mask()
    }

    /// Raw monitor mode value (`UP | DOWN` bits).
    pub fn monitor_mode(self, masks: &MaskConfig) -> u32 {
        self.0 & masks.monitor_mask()
    }

    /// Copy the meter and text flags of `raw` into this state.
    #[must_use]
    pub fn with_display_mode(self, masks: &MaskConfig, raw: u32) -> Self {
        self.set_bit(masks.meter, get_bit(raw, masks.meter))
            .set_bit(masks.text, get_bit(raw, masks.text))
    }

    /// Copy the upload and download flags of `raw` into this state.
    #[must_use]
    pub fn with_monitor_mode(self, masks: &MaskConfig, raw: u32) -> Self {
        self.set_bit(masks.up, get_bit(raw, masks.up))
            .set_bit(masks.down, get_bit(raw, masks.down))
    }

    /// Set or clear the unit flag.
    #[must_use]
    pub fn with_unit(self, masks: &MaskConfig, second_unit: bool) -> Self {
        self.set_bit(masks.unit, second_unit)
    }

    /// Position of the display mode in `list`, if offered.
    pub fn display_mode_index(self, masks: &MaskConfig, list: &ChoiceList) -> Option<usize> {
        list.find_index_of_value(&self.display_mode(masks).to_string())
    }

    /// Position of the monitor mode in `list`, if offered.
    pub fn monitor_mode_index(self, masks: &MaskConfig, list: &ChoiceList) -> Option<usize> {
        list.find_index_of_value(&self.monitor_mode(masks).to_string())
    }

    /// Position of the refresh period in `list`, if offered.
    pub fn period_index(self, masks: &MaskConfig, list: &ChoiceList) -> Option<usize> {
        list.find_index_of_value(&self.period(masks).to_string())
    }

    /// `1` when the unit flag is set, `0` otherwise.
    pub fn unit_index(self, masks: &MaskConfig) -> usize {
        usize::from(self.get_bit(masks.unit))
    }
}
