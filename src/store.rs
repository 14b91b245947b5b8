//! Collaborators: the persisted settings store and the traffic counters.

use crate::error::SettingsError;
use std::fs;
use std::path::PathBuf;

/// Persisted integer settings owned by the traffic indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// The packed state.
    State,
    /// ARGB color.
    Color,
    /// Autohide flag, stored as 0 or 1.
    Autohide,
    /// Autohide threshold.
    AutohideThreshold,
}

impl SettingKey {
    /// Every key, in declaration order.
    pub const ALL: [SettingKey; 4] = [
        SettingKey::State,
        SettingKey::Color,
        SettingKey::Autohide,
        SettingKey::AutohideThreshold,
    ];

    /// Name of the key in the settings store.
    pub const fn as_str(self) -> &'static str {
        match self {
            SettingKey::State => "network_traffic_vector_state",
            SettingKey::Color => "network_traffic_vector_color",
            SettingKey::Autohide => "network_traffic_vector_autohide",
            SettingKey::AutohideThreshold => "network_traffic_vector_autohide_threshold",
        }
    }
}

/// A key-value store of named integers.
///
/// Single-key reads and writes are assumed atomic.
pub trait SettingsStore: Send + Sync {
    /// Read a value; `None` when nothing has been stored.
    fn get_int(&self, key: SettingKey) -> Result<Option<i32>, SettingsError>;

    /// Write a value.
    fn put_int(&self, key: SettingKey, value: i32) -> Result<(), SettingsError>;

    /// Read a value, or `default` when nothing has been stored.
    fn get_int_or(&self, key: SettingKey, default: i32) -> Result<i32, SettingsError> {
        Ok(self.get_int(key)?.unwrap_or(default))
    }
}

/// Host traffic counters, used only to detect whether the host can report traffic.
pub trait TrafficStats {
    /// Total transmitted bytes, or `None` if unsupported.
    fn total_tx_bytes(&self) -> Option<u64>;

    /// Total received bytes, or `None` if unsupported.
    fn total_rx_bytes(&self) -> Option<u64>;

    /// Whether both counters are available.
    fn is_supported(&self) -> bool {
        self.total_tx_bytes().is_some() && self.total_rx_bytes().is_some()
    }
}

/// Traffic counters read from `/proc/net/dev`, loopback excluded.
#[derive(Debug, Clone)]
pub struct ProcNetDev {
    path: PathBuf,
}

/// Byte totals across all interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteTotals {
    /// Received bytes.
    pub rx: u64,
    /// Transmitted bytes.
    pub tx: u64,
}

impl ProcNetDev {
    /// Read the system table.
    pub fn new() -> Self {
        Self::with_path("/proc/net/dev")
    }

    /// Read a table in `/proc/net/dev` format from another location.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sum the receive and transmit byte columns.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the table cannot be read.
    pub fn totals(&self) -> Result<ByteTotals, SettingsError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(parse_net_dev(&content))
    }

    fn read_totals(&self) -> Option<ByteTotals> {
        match self.totals() {
            Ok(totals) => Some(totals),
            Err(e) => {
                log::debug!("traffic counters unavailable: {}", e);
                None
            }
        }
    }
}

impl Default for ProcNetDev {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficStats for ProcNetDev {
    fn total_tx_bytes(&self) -> Option<u64> {
        self.read_totals().map(|t| t.tx)
    }

    fn total_rx_bytes(&self) -> Option<u64> {
        self.read_totals().map(|t| t.rx)
    }

    // Both counters come from the same table, so one read answers for both.
    fn is_supported(&self) -> bool {
        self.read_totals().is_some()
    }
}

// Lines look like "  eth0: 1234 10 0 0 0 0 0 0 5678 20 0 0 0 0 0 0".
// Receive bytes are the first column, transmit bytes the ninth.
fn parse_net_dev(content: &str) -> ByteTotals {
    let mut totals = ByteTotals::default();

    for line in content.lines() {
        let Some((iface, counters)) = line.split_once(':') else {
            continue;
        };
        if iface.trim() == "lo" {
            continue;
        }
        let columns: Vec<u64> = counters
            .split_whitespace()
            .filter_map(|c| c.parse().ok())
            .collect();
        if columns.len() < 9 {
            continue;
        }
        totals.rx = totals.rx.saturating_add(columns[0]);
        totals.tx = totals.tx.saturating_add(columns[8]);
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo:  999999     100    0    0    0     0          0         0   999999     100    0    0    0     0       0          0
  eth0: 1000 10 0 0 0 0 0 0 2000 20 0 0 0 0 0 0
 wlan0:300 3 0 0 0 0 0 0 400 4 0 0 0 0 0 0
";

    #[test]
    fn test_key_names() {
        assert_eq!(SettingKey::State.as_str(), "network_traffic_vector_state");
        assert_eq!(
            SettingKey::AutohideThreshold.as_str(),
            "network_traffic_vector_autohide_threshold"
        );
    }

    #[test]
    fn test_parse_net_dev_sums_interfaces() {
        let totals = parse_net_dev(SAMPLE);
        assert_eq!(totals, ByteTotals { rx: 1300, tx: 2400 });
    }

    #[test]
    fn test_proc_net_dev_from_file() {
        let path = std::env::temp_dir().join(format!("trafficmeter-netdev-{}", std::process::id()));
        fs::write(&path, SAMPLE).unwrap();

        let stats = ProcNetDev::with_path(&path);
        assert!(stats.is_supported());
        assert_eq!(stats.total_rx_bytes(), Some(1300));
        assert_eq!(stats.total_tx_bytes(), Some(2400));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_table_is_unsupported() {
        let stats = ProcNetDev::with_path("/nonexistent/trafficmeter/net/dev");
        assert!(!stats.is_supported());
        assert!(matches!(stats.totals(), Err(SettingsError::Io(_))));
    }

    #[test]
    fn test_counters_agree_on_table_state() {
        let missing = ProcNetDev::with_path("/nonexistent/trafficmeter/net/dev");
        assert_eq!(missing.total_tx_bytes(), None);
        assert_eq!(missing.total_rx_bytes(), None);

        // A readable table with no interfaces is supported and counts nothing.
        let path = std::env::temp_dir().join(format!("trafficmeter-netdev-empty-{}", std::process::id()));
        fs::write(&path, SAMPLE.lines().take(2).collect::<Vec<_>>().join("\n")).unwrap();

        let stats = ProcNetDev::with_path(&path);
        assert!(stats.is_supported());
        assert_eq!(stats.total_rx_bytes(), Some(0));
        assert_eq!(stats.total_tx_bytes(), Some(0));

        fs::remove_file(&path).unwrap();
    }
}
