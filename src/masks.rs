//! Bit mask configuration for the packed state.

use crate::error::SettingsError;
use std::collections::HashMap;

/// Bits available to the single-bit flags.
const LOW_HALF: u32 = 0x0000_FFFF;
/// Bits available to the refresh period.
const HIGH_HALF: u32 = 0xFFFF_0000;

/// Source of named integer resources, read once at startup.
pub trait ResourceLookup {
    /// Look up an integer resource by name.
    fn integer(&self, name: &str) -> Option<i32>;
}

impl ResourceLookup for HashMap<String, i32> {
    fn integer(&self, name: &str) -> Option<i32> {
        self.get(name).copied()
    }
}

impl ResourceLookup for HashMap<&'static str, i32> {
    fn integer(&self, name: &str) -> Option<i32> {
        self.get(name).copied()
    }
}

/// The masks locating each logical field inside the packed state.
///
/// Masks are configuration rather than constants of the codec. They are
/// validated on construction: every mask is nonzero, no two masks share a bit,
/// the period is exactly the high 16 bits and the flags sit in the low 16 bits.
///
/// # Example
///
/// ```
/// use trafficmeter_core::MaskConfig;
///
/// let masks = MaskConfig::new(0x8, 0x10, 0x1, 0x2, 0x4, 0xFFFF_0000).unwrap();
/// assert_eq!(masks.display_mask(), 0x18);
/// assert!(MaskConfig::new(0x1, 0x1, 0x2, 0x4, 0x8, 0xFFFF_0000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskConfig {
    /// Meter display flag.
    pub meter: u32,
    /// Text display flag.
    pub text: u32,
    /// Upload monitoring flag.
    pub up: u32,
    /// Download monitoring flag.
    pub down: u32,
    /// Unit flag.
    pub unit: u32,
    /// Refresh period range.
    pub period: u32,
}

impl MaskConfig {
    /// Resource name of the meter mask.
    pub const METER: &'static str = "maskMeter";
    /// Resource name of the text mask.
    pub const TEXT: &'static str = "maskText";
    /// Resource name of the upload mask.
    pub const UP: &'static str = "maskUp";
    /// Resource name of the download mask.
    pub const DOWN: &'static str = "maskDown";
    /// Resource name of the unit mask.
    pub const UNIT: &'static str = "maskUnit";
    /// Resource name of the period mask.
    pub const PERIOD: &'static str = "maskPeriod";

    /// Create a validated mask configuration.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::ZeroMask`] if any mask is zero
    /// - [`SettingsError::MisalignedMask`] if a flag is outside the low half of the
    ///   word, or the period is not exactly the high half
    /// - [`SettingsError::OverlappingMasks`] if two masks share a bit
    pub fn new(
        meter: u32,
        text: u32,
        up: u32,
        down: u32,
        unit: u32,
        period: u32,
    ) -> Result<Self, SettingsError> {
        let masks = Self {
            meter,
            text,
            up,
            down,
            unit,
            period,
        };
        masks.validate()?;
        Ok(masks)
    }

    /// Load the six masks from a resource table.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingResource`] naming the first absent
    /// resource, or any validation error from [`MaskConfig::new`].
    pub fn load(resources: &dyn ResourceLookup) -> Result<Self, SettingsError> {
        let read = |name: &'static str| {
            resources
                .integer(name)
                .map(i32::cast_unsigned)
                .ok_or(SettingsError::MissingResource(name))
        };

        let masks = Self::new(
            read(Self::METER)?,
            read(Self::TEXT)?,
            read(Self::UP)?,
            read(Self::DOWN)?,
            read(Self::UNIT)?,
            read(Self::PERIOD)?,
        )?;
        log::debug!("loaded masks: {:?}", masks);
        Ok(masks)
    }

    /// Bits forming the display mode value.
    pub fn display_mask(&self) -> u32 {
        self.meter | self.text
    }

    /// Bits forming the monitor mode value.
    pub fn monitor_mask(&self) -> u32 {
        self.up | self.down
    }

    fn named(&self) -> [(&'static str, u32); 6] {
        [
            (Self::METER, self.meter),
            (Self::TEXT, self.text),
            (Self::UP, self.up),
            (Self::DOWN, self.down),
            (Self::UNIT, self.unit),
            (Self::PERIOD, self.period),
        ]
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let named = self.named();

        for (name, mask) in named {
            if mask == 0 {
                return Err(SettingsError::ZeroMask(name));
            }
            // The period is cleared and rewritten as a whole 16-bit field.
            let (expected, fits) = if name == Self::PERIOD {
                (HIGH_HALF, mask == HIGH_HALF)
            } else {
                (LOW_HALF, mask & !LOW_HALF == 0)
            };
            if !fits {
                return Err(SettingsError::MisalignedMask {
                    name,
                    mask,
                    expected,
                });
            }
        }

        for (i, &(first, a)) in named.iter().enumerate() {
            for &(second, b) in &named[i + 1..] {
                let shared = a & b;
                if shared != 0 {
                    return Err(SettingsError::OverlappingMasks {
                        first,
                        second,
                        shared,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::standard_resources;

    #[test]
    fn test_load_standard_resources() {
        let masks = MaskConfig::load(&standard_resources()).unwrap();
        assert_eq!(masks.up, 0x1);
        assert_eq!(masks.down, 0x2);
        assert_eq!(masks.unit, 0x4);
        assert_eq!(masks.meter, 0x8);
        assert_eq!(masks.text, 0x10);
        assert_eq!(masks.period, 0xFFFF_0000);
        assert_eq!(masks.monitor_mask(), 0x3);
    }

    #[test]
    fn test_load_reports_missing_resource() {
        let mut resources = standard_resources();
        resources.remove(MaskConfig::UNIT);

        let err = MaskConfig::load(&resources).unwrap_err();
        assert!(matches!(err, SettingsError::MissingResource("maskUnit")));
    }

    #[test]
    fn test_negative_resource_is_bit_cast() {
        let mut resources = standard_resources();
        resources.insert(MaskConfig::PERIOD, -65536);

        let masks = MaskConfig::load(&resources).unwrap();
        assert_eq!(masks.period, 0xFFFF_0000);
    }

    #[test]
    fn test_rejects_zero_mask() {
        let err = MaskConfig::new(0x8, 0, 0x1, 0x2, 0x4, 0xFFFF_0000).unwrap_err();
        assert!(matches!(err, SettingsError::ZeroMask("maskText")));
    }

    #[test]
    fn test_rejects_overlap() {
        let err = MaskConfig::new(0x8, 0x10, 0x1, 0x2, 0x2, 0xFFFF_0000).unwrap_err();
        match err {
            SettingsError::OverlappingMasks {
                first,
                second,
                shared,
            } => {
                assert_eq!(first, "maskDown");
                assert_eq!(second, "maskUnit");
                assert_eq!(shared, 0x2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_misaligned_period() {
        let err = MaskConfig::new(0x8, 0x10, 0x1, 0x2, 0x4, 0x00FF_FF00).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::MisalignedMask {
                name: "maskPeriod",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_flag_in_high_half() {
        let err = MaskConfig::new(0x1_0000, 0x10, 0x1, 0x2, 0x4, 0xFFFF_0000).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::MisalignedMask {
                name: "maskMeter",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_partial_period() {
        for period in [0xFFFE_0000, 0x7FFF_0000, 0x00FF_0000] {
            let err = MaskConfig::new(0x8, 0x10, 0x1, 0x2, 0x4, period).unwrap_err();
            assert!(matches!(
                err,
                SettingsError::MisalignedMask {
                    name: "maskPeriod",
                    expected: 0xFFFF_0000,
                    ..
                }
            ));
        }
    }
}
