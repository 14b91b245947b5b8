//! Error types for the traffic indicator settings.

/// Errors that can occur while loading or changing traffic indicator settings.
///
/// A decoded value with no matching list entry is not an error: the controller
/// falls back to a configured index instead.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A mask resource was not present in the resource table.
    #[error("Missing integer resource '{0}'")]
    MissingResource(&'static str),

    /// A mask was configured as zero.
    #[error("Mask '{0}' must not be zero")]
    ZeroMask(&'static str),

    /// Two masks share at least one bit.
    #[error("Masks '{first}' and '{second}' overlap (shared bits {shared:#010x})")]
    OverlappingMasks {
        /// Name of the first mask.
        first: &'static str,
        /// Name of the second mask.
        second: &'static str,
        /// Bits present in both masks.
        shared: u32,
    },

    /// A mask does not fit the bits reserved for it.
    #[error("Mask '{name}' ({mask:#010x}) does not fit the reserved bits {expected:#010x}")]
    MisalignedMask {
        /// Name of the mask.
        name: &'static str,
        /// The configured mask.
        mask: u32,
        /// The bits reserved for the mask.
        expected: u32,
    },

    /// A choice list was built with a different number of entries and values.
    #[error("Choice list '{list}' has {entries} entries but {values} values")]
    MismatchedChoices {
        /// Name of the list.
        list: &'static str,
        /// Number of human-readable entries.
        entries: usize,
        /// Number of stored values.
        values: usize,
    },

    /// A list value that is not offered by the list.
    #[error("Value '{value}' is not a choice of the {list} list")]
    UnknownChoice {
        /// Name of the list.
        list: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A list value that does not parse as a number.
    #[error("Value '{value}' for {list} is not a number")]
    InvalidNumber {
        /// Name of the list.
        list: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A color string that is not `#rrggbb` or `#aarrggbb`.
    #[error("Invalid color '{0}' (expected #rrggbb or #aarrggbb)")]
    InvalidColor(String),

    /// The backing settings store failed.
    #[error("Settings store error: {0}")]
    Store(String),

    /// An I/O error occurred (e.g., reading traffic counters).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
