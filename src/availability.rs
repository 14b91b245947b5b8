//! Which controls are usable for a given display mode.

/// Enabled state of each control that depends on the display mode.
///
/// # Example
///
/// ```
/// use trafficmeter_core::ControlAvailability;
///
/// let meter = ControlAvailability::for_display_index(Some(1));
/// assert!(meter.monitor && meter.period);
/// assert!(!meter.color && !meter.unit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAvailability {
    /// Monitor mode list.
    pub monitor: bool,
    /// Color picker.
    pub color: bool,
    /// Refresh period list.
    pub period: bool,
    /// Unit list.
    pub unit: bool,
    /// Autohide toggle.
    pub autohide: bool,
    /// Autohide threshold slider.
    pub autohide_threshold: bool,
}

impl ControlAvailability {
    /// Every control enabled.
    pub const fn all_enabled() -> Self {
        Self::uniform(true)
    }

    /// Every control disabled.
    pub const fn all_disabled() -> Self {
        Self::uniform(false)
    }

    const fn uniform(enabled: bool) -> Self {
        Self {
            monitor: enabled,
            color: enabled,
            period: enabled,
            unit: enabled,
            autohide: enabled,
            autohide_threshold: enabled,
        }
    }

    /// Availability for the display list position `index`.
    ///
    /// `None` (no matching display mode) and `0` (off) disable everything.
    /// `1` is the meter, which has no color, unit or autohide. Anything else
    /// shows text and enables everything.
    pub const fn for_display_index(index: Option<usize>) -> Self {
        match index {
            None | Some(0) => Self::all_disabled(),
            Some(1) => Self {
                monitor: true,
                period: true,
                color: false,
                unit: false,
                autohide: false,
                autohide_threshold: false,
            },
            Some(_) => Self::all_enabled(),
        }
    }
}

impl Default for ControlAvailability {
    fn default() -> Self {
        Self::all_enabled()
    }
}
