// Posture snapshot domain model
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Point-in-time aggregate of the four posture counts, as served upstream.
///
/// Every field is optional on the wire. A missing field is only distinct
/// from zero until it goes through [`DashboardMetrics::derive`]. Fields are
/// decoded one by one, so a value of the wrong type only loses itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[serde(default, deserialize_with = "lenient_count")]
    pub device_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub open_ports_count: Option<i64>,
    #[serde(default, rename = "criticalCVECount", deserialize_with = "lenient_count")]
    pub critical_cve_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub security_items_count: Option<i64>,
}

/// Any JSON number becomes a count (floats truncate, out-of-range values
/// saturate). Numeric strings are parsed; anything else reads as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn count_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Fully defaulted metrics. Always carries all four counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub device_count: i64,
    pub open_ports_count: i64,
    #[serde(rename = "criticalCVECount")]
    pub critical_cve_count: i64,
    pub security_items_count: i64,
}

const DEFAULT_DEVICE_COUNT: i64 = 0;
const DEFAULT_OPEN_PORTS_COUNT: i64 = 0;
const DEFAULT_CRITICAL_CVE_COUNT: i64 = 0;
const DEFAULT_SECURITY_ITEMS_COUNT: i64 = 0;

impl DashboardMetrics {
    /// Map a possibly absent, possibly partial snapshot onto metrics.
    ///
    /// Each field falls back to its default independently. Present values
    /// are taken as-is, negative ones included.
    pub fn derive(snapshot: Option<&DashboardSnapshot>) -> Self {
        let Some(snapshot) = snapshot else {
            return Self {
                device_count: DEFAULT_DEVICE_COUNT,
                open_ports_count: DEFAULT_OPEN_PORTS_COUNT,
                critical_cve_count: DEFAULT_CRITICAL_CVE_COUNT,
                security_items_count: DEFAULT_SECURITY_ITEMS_COUNT,
            };
        };

        Self {
            device_count: snapshot.device_count.unwrap_or(DEFAULT_DEVICE_COUNT),
            open_ports_count: snapshot.open_ports_count.unwrap_or(DEFAULT_OPEN_PORTS_COUNT),
            critical_cve_count: snapshot
                .critical_cve_count
                .unwrap_or(DEFAULT_CRITICAL_CVE_COUNT),
            security_items_count: snapshot
                .security_items_count
                .unwrap_or(DEFAULT_SECURITY_ITEMS_COUNT),
        }
    }
}
