use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A data point object contains various properties, each representing the average (unless otherwise
/// specified) of a particular weather phenomenon occurring during a period of time: an instant in
/// the case of currently, a minute for minutely, an hour for hourly, and a day for daily.
///
/// Every field whose wire name ends in `Time` travels as UNIX epoch seconds and is held here as an
/// `OffsetDateTime`. All other fields pass through untouched. Absent fields stay `None` and are
/// left out again on encode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    /// The time at which this data point begins. minutely data point are always aligned to the top
    /// of the minute, hourly data point objects to the top of the hour, and daily data point objects
    /// to midnight of the day, all according to the local time zone.
    #[serde(with = "time::serde::timestamp")]
    pub time: OffsetDateTime,
    /// The apparent temperature (heat index or wind chill).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature: Option<f64>,
    /// The daytime high apparent temperature. (only on daily)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature_high: Option<f64>,
    /// The time at which the daytime high apparent temperature occurs. (only on daily)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub apparent_temperature_high_time: Option<OffsetDateTime>,
    /// The overnight low apparent temperature. (only on daily)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature_low: Option<f64>,
    /// The time at which the overnight low apparent temperature occurs. (only on daily)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub apparent_temperature_low_time: Option<OffsetDateTime>,
    /// The percentage of sky occluded by clouds, between 0 and 1, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<f64>,
    /// The dew point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dew_point: Option<f64>,
    /// The relative humidity, between 0 and 1, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// A machine-readable text summary of this data point, suitable for selecting an icon for
    /// display. (Consumers should have a sensible default, as new values may appear.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// The fractional part of the lunation number during the given day. (only on daily)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_phase: Option<f64>,
    /// The approximate direction of the nearest storm in degrees, with true north at 0° and
    /// progressing clockwise. (only on currently)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_storm_bearing: Option<i64>,
    /// The approximate distance to the nearest storm. (only on currently)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_storm_distance: Option<i64>,
    /// The columnar density of total atmospheric ozone in Dobson units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ozone: Option<f64>,
    /// The amount of snowfall accumulation expected to occur. (only on hourly and daily)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_accumulation: Option<f64>,
    /// The intensity of precipitation occurring at the given time, conditional on probability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_intensity: Option<f64>,
    /// The maximum value of precipIntensity during a given day. (only on daily)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_intensity_max: Option<f64>,
    /// The time at which precipIntensityMax occurs during a given day. (only on daily)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub precip_intensity_max_time: Option<OffsetDateTime>,
    /// The probability of precipitation occurring, between 0 and 1, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_probability: Option<f64>,
    /// The type of precipitation occurring: rain, snow, or sleet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_type: Option<String>,
    /// The sea-level air pressure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// A human-readable text summary of this data point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// The time of when the sun will rise during a given day. (only on daily)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub sunrise_time: Option<OffsetDateTime>,
    /// The time of when the sun will set during a given day. (only on daily)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub sunset_time: Option<OffsetDateTime>,
    /// The air temperature. (not on daily)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// The daytime high temperature. (only on daily)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_high: Option<f64>,
    /// The time representing when the daytime high temperature occurs. (only on daily)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub temperature_high_time: Option<OffsetDateTime>,
    /// The overnight low temperature. (only on daily)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_low: Option<f64>,
    /// The time representing when the overnight low temperature occurs. (only on daily)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub temperature_low_time: Option<OffsetDateTime>,
    /// The UV index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<i64>,
    /// The time of when the maximum uvIndex occurs during a given day. (only on daily)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub uv_index_time: Option<OffsetDateTime>,
    /// The average visibility, capped at 10 miles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    /// The direction that the wind is coming from in degrees, with true north at 0° and
    /// progressing clockwise. (If windSpeed is zero, then this value will not be defined.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_bearing: Option<i64>,
    /// The wind gust speed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    /// The time at which the maximum wind gust speed occurs during the day.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub wind_gust_time: Option<OffsetDateTime>,
    /// The wind speed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

impl DataPoint {
    /// A data point at the given time with every optional property absent.
    pub fn new(time: OffsetDateTime) -> DataPoint {
        DataPoint {
            time,
            apparent_temperature: None,
            apparent_temperature_high: None,
            apparent_temperature_high_time: None,
            apparent_temperature_low: None,
            apparent_temperature_low_time: None,
            cloud_cover: None,
            dew_point: None,
            humidity: None,
            icon: None,
            moon_phase: None,
            nearest_storm_bearing: None,
            nearest_storm_distance: None,
            ozone: None,
            precip_accumulation: None,
            precip_intensity: None,
            precip_intensity_max: None,
            precip_intensity_max_time: None,
            precip_probability: None,
            precip_type: None,
            pressure: None,
            summary: None,
            sunrise_time: None,
            sunset_time: None,
            temperature: None,
            temperature_high: None,
            temperature_high_time: None,
            temperature_low: None,
            temperature_low_time: None,
            uv_index: None,
            uv_index_time: None,
            visibility: None,
            wind_bearing: None,
            wind_gust: None,
            wind_gust_time: None,
            wind_speed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn test_time_fields_use_epoch_seconds() {
        let raw = json!({
            "time": 1514937600,
            "apparentTemperatureHighTime": 1514980800,
            "apparentTemperatureLowTime": 1515024000,
            "precipIntensityMaxTime": 1514966400,
            "sunriseTime": 1514959200,
            "sunsetTime": 1514994000,
            "temperatureHighTime": 1514980801,
            "temperatureLowTime": 1515024001,
            "uvIndexTime": 1514977200,
            "windGustTime": 1514970000,
        });
        let dp: DataPoint = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(dp.time, datetime!(2018-01-03 0:00 UTC));
        assert_eq!(dp.apparent_temperature_high_time, Some(datetime!(2018-01-03 12:00 UTC)));
        assert_eq!(dp.apparent_temperature_low_time, Some(datetime!(2018-01-04 0:00 UTC)));
        assert_eq!(dp.precip_intensity_max_time, Some(datetime!(2018-01-03 8:00 UTC)));
        assert_eq!(dp.sunrise_time, Some(datetime!(2018-01-03 6:00 UTC)));
        assert_eq!(dp.sunset_time, Some(datetime!(2018-01-03 15:40 UTC)));
        assert_eq!(dp.temperature_high_time, Some(datetime!(2018-01-03 12:00:01 UTC)));
        assert_eq!(dp.temperature_low_time, Some(datetime!(2018-01-04 0:00:01 UTC)));
        assert_eq!(dp.uv_index_time, Some(datetime!(2018-01-03 11:00 UTC)));
        assert_eq!(dp.wind_gust_time, Some(datetime!(2018-01-03 9:00 UTC)));

        assert_eq!(serde_json::to_value(&dp).unwrap(), raw);
    }

    #[test]
    fn test_plain_fields_pass_through() {
        let raw = json!({
            "time": 0,
            "summary": "Drizzle",
            "icon": "rain",
            "precipType": "rain",
            "precipIntensity": 0.0123,
            "temperature": 41.5,
            "uvIndex": 3,
            "windBearing": 270,
            "nearestStormDistance": 12,
        });
        let dp: DataPoint = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(dp.summary.as_deref(), Some("Drizzle"));
        assert_eq!(dp.precip_intensity, Some(0.0123));
        assert_eq!(dp.temperature, Some(41.5));
        assert_eq!(dp.uv_index, Some(3));
        assert_eq!(dp.wind_bearing, Some(270));
        assert_eq!(dp.nearest_storm_distance, Some(12));
        assert_eq!(dp.sunrise_time, None);

        assert_eq!(serde_json::to_value(&dp).unwrap(), raw);
    }

    #[test]
    fn test_new_has_only_time() {
        let dp = DataPoint::new(OffsetDateTime::UNIX_EPOCH);
        assert_eq!(serde_json::to_value(&dp).unwrap(), json!({ "time": 0 }));
    }

    #[test]
    fn test_fully_populated_round_trip() {
        let raw = json!({
            "time": 1514880000,
            "apparentTemperature": 50.1,
            "apparentTemperatureHigh": 59.36,
            "apparentTemperatureHighTime": 1514930400,
            "apparentTemperatureLow": 48.62,
            "apparentTemperatureLowTime": 1514991600,
            "cloudCover": 0.3,
            "dewPoint": 44.04,
            "humidity": 0.77,
            "icon": "partly-cloudy-day",
            "moonPhase": 0.55,
            "nearestStormBearing": 327,
            "nearestStormDistance": 23,
            "ozone": 282.73,
            "precipAccumulation": 0.4,
            "precipIntensity": 0.0001,
            "precipIntensityMax": 0.0009,
            "precipIntensityMaxTime": 1514908800,
            "precipProbability": 0.02,
            "precipType": "rain",
            "pressure": 1020.74,
            "summary": "Partly cloudy in the afternoon.",
            "sunriseTime": 1514907137,
            "sunsetTime": 1514941864,
            "temperature": 52.5,
            "temperatureHigh": 59.36,
            "temperatureHighTime": 1514930400,
            "temperatureLow": 49.28,
            "temperatureLowTime": 1514991600,
            "uvIndex": 3,
            "uvIndexTime": 1514923200,
            "visibility": 9.5,
            "windBearing": 251,
            "windGust": 9.51,
            "windGustTime": 1514930400,
            "windSpeed": 2.51,
        });
        assert_eq!(raw.as_object().unwrap().len(), 36);

        let dp: DataPoint = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(dp.sunset_time, Some(datetime!(2018-01-03 1:11:04 UTC)));
        assert_eq!(dp.nearest_storm_bearing, Some(327));

        let encoded = serde_json::to_value(&dp).unwrap();
        assert_eq!(encoded, raw);
        assert_eq!(serde_json::from_value::<DataPoint>(encoded).unwrap(), dp);
    }

    #[test]
    fn test_sub_second_part_dropped_on_encode() {
        let dp = DataPoint::new(datetime!(2018-01-03 0:00:00.999 UTC));
        assert_eq!(serde_json::to_value(&dp).unwrap(), json!({ "time": 1514937600 }));
    }

    #[test]
    fn test_integer_accepted_for_float_field() {
        let dp: DataPoint = serde_json::from_value(json!({ "time": 0, "pressure": 1013 })).unwrap();
        assert_eq!(dp.pressure, Some(1013.0));
    }
}
