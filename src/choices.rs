//! List choices bound to the packed state.

use crate::error::SettingsError;
use crate::masks::MaskConfig;

/// An ordered list of choices, each a human-readable entry paired with the
/// string-encoded value that gets persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceList {
    name: &'static str,
    entries: Vec<String>,
    values: Vec<String>,
}

impl ChoiceList {
    /// Create a list from parallel entry and value slices.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MismatchedChoices`] if the slices differ in length.
    pub fn new<E, V>(name: &'static str, entries: &[E], values: &[V]) -> Result<Self, SettingsError>
    where
        E: AsRef<str>,
        V: AsRef<str>,
    {
        if entries.len() != values.len() {
            return Err(SettingsError::MismatchedChoices {
                list: name,
                entries: entries.len(),
                values: values.len(),
            });
        }

        Ok(Self {
            name,
            entries: entries.iter().map(|e| e.as_ref().to_owned()).collect(),
            values: values.iter().map(|v| v.as_ref().to_owned()).collect(),
        })
    }

    /// The list name, used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Position of `value` in the list.
    pub fn find_index_of_value(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Human-readable entry at `index`.
    pub fn entry(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Stored value at `index`.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Number of choices.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the list offers no choices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(entry, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Index of `value`, or [`SettingsError::UnknownChoice`].
    pub(crate) fn require(&self, value: &str) -> Result<usize, SettingsError> {
        self.find_index_of_value(value)
            .ok_or_else(|| SettingsError::UnknownChoice {
                list: self.name,
                value: value.to_owned(),
            })
    }
}

/// Index selected when a decoded value is not offered by its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexFallbacks {
    /// Display mode fallback.
    pub display: usize,
    /// Monitor mode fallback.
    pub monitor: usize,
    /// Refresh period fallback.
    pub period: usize,
}

impl Default for IndexFallbacks {
    fn default() -> Self {
        Self {
            display: 0,
            monitor: 1,
            period: 3,
        }
    }
}

/// The four lists shown on the settings screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenChoices {
    /// Display mode list; values are raw `METER | TEXT` bits.
    pub display: ChoiceList,
    /// Monitor mode list; values are raw `UP | DOWN` bits.
    pub monitor: ChoiceList,
    /// Refresh period list; values are milliseconds.
    pub period: ChoiceList,
    /// Unit list; values are `"0"` and `"1"`.
    pub unit: ChoiceList,
}

impl ScreenChoices {
    /// Stock lists derived from the configured masks.
    pub fn standard(masks: &MaskConfig) -> Self {
        let display = [
            "0".to_owned(),
            masks.meter.to_string(),
            masks.text.to_string(),
            masks.display_mask().to_string(),
        ];
        let monitor = [
            masks.up.to_string(),
            masks.down.to_string(),
            masks.monitor_mask().to_string(),
        ];

        Self {
            display: ChoiceList {
                name: "display",
                entries: owned(&["Off", "Meter", "Text", "Meter and text"]),
                values: display.into(),
            },
            monitor: ChoiceList {
                name: "monitor",
                entries: owned(&["Upload", "Download", "Upload and download"]),
                values: monitor.into(),
            },
            period: ChoiceList {
                name: "period",
                entries: owned(&["0.5 s", "1 s", "1.5 s", "2 s", "3 s", "5 s"]),
                values: owned(&["500", "1000", "1500", "2000", "3000", "5000"]),
            },
            unit: ChoiceList {
                name: "unit",
                entries: owned(&["Kilobits", "Kilobytes"]),
                values: owned(&["0", "1"]),
            },
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// A list widget's selected position and the summary text it shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSelection {
    /// Selected index.
    pub index: usize,
    /// Entry shown as the summary.
    pub summary: String,
}

impl ListSelection {
    /// Select `index` in `list`, or `fallback` when `index` is `None`.
    pub fn resolve(list: &ChoiceList, index: Option<usize>, fallback: usize) -> Self {
        let index = index.unwrap_or_else(|| {
            log::warn!(
                "{} value not in list, falling back to index {}",
                list.name,
                fallback
            );
            fallback
        });
        Self {
            index,
            summary: list.entry(index).unwrap_or_default().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masks() -> MaskConfig {
        MaskConfig::new(0x8, 0x10, 0x1, 0x2, 0x4, 0xFFFF_0000).unwrap()
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = ChoiceList::new("unit", &["Kilobits"], &["0", "1"]).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::MismatchedChoices {
                list: "unit",
                entries: 1,
                values: 2
            }
        ));
    }

    #[test]
    fn test_find_index_of_value() {
        let list = ChoiceList::new("period", &["1 s", "2 s"], &["1000", "2000"]).unwrap();
        assert_eq!(list.find_index_of_value("2000"), Some(1));
        assert_eq!(list.find_index_of_value("3000"), None);
        assert_eq!(list.entry(1), Some("2 s"));
        assert_eq!(list.value(0), Some("1000"));
        assert_eq!(list.entry(2), None);
    }

    #[test]
    fn test_standard_lists_match_fallbacks() {
        let masks = masks();
        let choices = ScreenChoices::standard(&masks);
        let fallbacks = IndexFallbacks::default();

        assert_eq!(choices.display.value(fallbacks.display), Some("0"));
        assert_eq!(choices.monitor.value(fallbacks.monitor), Some("2"));
        assert_eq!(choices.period.value(fallbacks.period), Some("2000"));
        assert_eq!(choices.display.find_index_of_value("24"), Some(3));
        assert_eq!(choices.unit.len(), 2);
    }

    #[test]
    fn test_resolve_applies_fallback() {
        let list = ChoiceList::new("monitor", &["Up", "Down"], &["1", "2"]).unwrap();

        let selected = ListSelection::resolve(&list, Some(0), 1);
        assert_eq!(selected.index, 0);
        assert_eq!(selected.summary, "Up");

        let selected = ListSelection::resolve(&list, None, 1);
        assert_eq!(selected.index, 1);
        assert_eq!(selected.summary, "Down");
    }

    #[test]
    fn test_require_unknown_value() {
        let list = ChoiceList::new("unit", &["Kilobits", "Kilobytes"], &["0", "1"]).unwrap();
        assert_eq!(list.require("1").unwrap(), 1);
        assert!(matches!(
            list.require("2"),
            Err(SettingsError::UnknownChoice { list: "unit", .. })
        ));
    }
}
