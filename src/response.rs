use crate::datapoint::DataPoint;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// API responses consist of a UTF-8-encoded, JSON-formatted object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The requested latitude.
    pub latitude: f64,
    /// The requested longitude.
    pub longitude: f64,
    /// The IANA timezone name for the requested location. This is used for text summaries and for
    /// determining when hourly and daily data block objects begin.
    pub timezone: String,
    /// A data point containing the current weather conditions at the requested location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currently: Option<DataPoint>,
    /// A data block containing the weather conditions minute-by-minute for the next hour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutely: Option<DataBlock>,
    /// A data block containing the weather conditions hour-by-hour for the next two days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly: Option<DataBlock>,
    /// A data block containing the weather conditions day-by-day for the next week.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<DataBlock>,
    /// An alerts array, which, if present, contains any severe weather alerts pertinent to the
    /// requested location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<Alert>>,
    /// A flags object containing miscellaneous metadata about the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags>,
}

impl Response {
    /// The data blocks present in this response, paired with their wire names, from finest to
    /// coarsest granularity.
    pub fn blocks(&self) -> impl Iterator<Item = (&'static str, &DataBlock)> {
        [
            ("minutely", self.minutely.as_ref()),
            ("hourly", self.hourly.as_ref()),
            ("daily", self.daily.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, block)| block.map(|b| (name, b)))
    }
}

/// A data block object represents the various weather phenomena occurring over a period of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBlock {
    /// An array of data points, ordered by time, which together describe the weather conditions at
    /// the requested location over time.
    pub data: Vec<DataPoint>,
    /// A human-readable summary of this data block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// A machine-readable text summary of this data block. (May take on the same values as the icon
    /// property of data points.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl DataBlock {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.data.iter()
    }
}

impl<'a> IntoIterator for &'a DataBlock {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Object representing the severe weather warnings issued for the requested location by a
/// governmental authority.
///
/// Unlike data points, `time` and `expires` are kept as the raw UNIX integers from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// A detailed description of the alert, usually the product text.
    pub description: String,
    /// The UNIX time at which the alert will expire, which may be undefined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    /// The names of the regions covered by this weather alert.
    pub regions: Vec<String>,
    /// The severity of the weather alert: "advisory", "watch" or "warning".
    pub severity: String,
    /// The UNIX time at which the alert was issued.
    pub time: i64,
    /// A brief description of the alert.
    pub title: String,
    /// An HTTP(S) URI that one may refer to for detailed information about the alert.
    pub uri: String,
}

impl Alert {
    /// The time at which the alert was issued, if representable.
    pub fn issued_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.time).ok()
    }

    /// The time at which the alert will expire.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.expires
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
    }
}

/// The flags object contains various metadata information related to the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    /// The presence of this property indicates that the Dark Sky data source supports the given
    /// location, but a temporary error (such as a radar station being down for maintenance) has
    /// made the data unavailable.
    #[serde(rename = "darkSkyUnavailable", skip_serializing_if = "Option::is_none")]
    pub dark_sky_unavailable: Option<bool>,
    /// The IDs of each data source utilized in servicing this request.
    pub sources: Vec<String>,
    /// The units which were used for the data in this request.
    pub units: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn test_alert_times_stay_raw() {
        let raw = json!({
            "time": 1000,
            "expires": 2000,
            "description": "d",
            "regions": [],
            "severity": "s",
            "title": "t",
            "uri": "u",
        });
        let alert: Alert = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(alert.time, 1000);
        assert_eq!(alert.expires, Some(2000));
        assert_eq!(alert.issued_at(), Some(datetime!(1970-01-01 0:16:40 UTC)));
        assert_eq!(alert.expires_at(), Some(datetime!(1970-01-01 0:33:20 UTC)));
        assert_eq!(serde_json::to_value(&alert).unwrap(), raw);
    }

    #[test]
    fn test_alert_without_expires() {
        let raw = json!({
            "time": 1514930000,
            "description": "Dense fog",
            "regions": ["Marin"],
            "severity": "advisory",
            "title": "Dense Fog Advisory",
            "uri": "https://alerts.weather.gov/",
        });
        let alert: Alert = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(alert.expires, None);
        assert_eq!(alert.expires_at(), None);

        let encoded = serde_json::to_value(&alert).unwrap();
        assert_eq!(encoded.get("expires"), None);
        assert_eq!(encoded, raw);
        assert_eq!(serde_json::from_value::<Alert>(encoded).unwrap(), alert);
    }

    #[test]
    fn test_flags_unavailable() {
        let raw = json!({ "darkSkyUnavailable": true, "sources": [], "units": "si" });
        let flags: Flags = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(flags.dark_sky_unavailable, Some(true));
        assert_eq!(serde_json::to_value(&flags).unwrap(), raw);
    }

    #[test]
    fn test_live_api_unavailable_key_is_unknown() {
        let flags: Flags = serde_json::from_value(json!({
            "darksky-unavailable": true,
            "darkSkyUnavailable": false,
            "sources": ["isd"],
            "units": "us",
        }))
        .unwrap();
        assert_eq!(flags.dark_sky_unavailable, Some(false));

        let flags: Flags = serde_json::from_value(json!({
            "darksky-unavailable": true,
            "sources": ["isd"],
            "units": "us",
        }))
        .unwrap();
        assert_eq!(flags.dark_sky_unavailable, None);
        assert_eq!(
            serde_json::to_value(&flags).unwrap(),
            json!({ "sources": ["isd"], "units": "us" })
        );
    }

    #[test]
    fn test_blocks_skips_absent() {
        let block = DataBlock {
            data: vec![DataPoint::new(OffsetDateTime::UNIX_EPOCH)],
            summary: None,
            icon: None,
        };
        let response = Response {
            latitude: 42.5,
            longitude: -71.2,
            timezone: "America/New_York".to_string(),
            currently: None,
            minutely: None,
            hourly: Some(block.clone()),
            daily: Some(DataBlock {
                data: vec![],
                summary: Some("Quiet week".to_string()),
                icon: None,
            }),
            alerts: None,
            flags: None,
        };

        let names: Vec<(&str, usize)> = response.blocks().map(|(n, b)| (n, b.len())).collect();
        assert_eq!(names, vec![("hourly", 1), ("daily", 0)]);
        assert_eq!(response.hourly.as_ref().unwrap().iter().count(), 1);
    }
}
