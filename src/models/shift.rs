//! Shift definitions and their weekday configuration.
//!
//! Workday sets and per-weekday end-time overrides arrive from plant databases as
//! loosely formatted JSON (numeric, English or Spanish day keys). They are resolved
//! into typed values once, at load time, and fall back to a documented default
//! instead of failing.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use super::hours::hours_from_seconds;

const SECONDS_PER_DAY: i64 = 86_400;

/// Resolves a weekday from a numeric, English or Spanish alias.
///
/// Numeric keys count from Sunday (`0`) to Saturday (`6`). Accents, case,
/// surrounding whitespace and a trailing period are ignored.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::parse_weekday;
/// use chrono::Weekday;
///
/// assert_eq!(parse_weekday("1"), Some(Weekday::Mon));
/// assert_eq!(parse_weekday("Miércoles"), Some(Weekday::Wed));
/// assert_eq!(parse_weekday("sáb."), Some(Weekday::Sat));
/// assert_eq!(parse_weekday("someday"), None);
/// ```
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    let key: String = raw
        .trim()
        .trim_end_matches('.')
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .collect();

    let day = match key.as_str() {
        "0" | "sunday" | "sun" | "domingo" | "dom" => Weekday::Sun,
        "1" | "monday" | "mon" | "lunes" | "lun" => Weekday::Mon,
        "2" | "tuesday" | "tue" | "tues" | "martes" | "mar" => Weekday::Tue,
        "3" | "wednesday" | "wed" | "miercoles" | "mie" | "mier" => Weekday::Wed,
        "4" | "thursday" | "thu" | "thurs" | "jueves" | "jue" => Weekday::Thu,
        "5" | "friday" | "fri" | "viernes" | "vie" => Weekday::Fri,
        "6" | "saturday" | "sat" | "sabado" | "sab" => Weekday::Sat,
        _ => return None,
    };
    Some(day)
}

fn fold_accent(c: char) -> char {
    match c {
        'á' => 'a',
        'é' => 'e',
        'í' => 'i',
        'ó' => 'o',
        'ú' => 'u',
        other => other,
    }
}

fn day_index(day: Weekday) -> usize {
    day.num_days_from_sunday() as usize
}

fn weekday_from_value(value: &Value) -> Option<Weekday> {
    match value {
        Value::Number(n) => n.as_u64().filter(|n| *n <= 6).and_then(|n| parse_weekday(&n.to_string())),
        Value::String(s) => parse_weekday(s),
        _ => None,
    }
}

/// Parses a clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

fn format_clock_time(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

/// Serde adapter for `HH:MM` clock times.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid time '{}', expected HH:MM", raw)))
    }
}

/// The set of weekdays on which a shift is scheduled.
///
/// Serialized as a sorted list of day numbers (Sunday = 0). Deserialization is
/// lenient: a list of numbers or day names, or a JSON-encoded string holding such a
/// list, is accepted; anything else becomes Monday to Friday.
///
/// # Example
///
/// ```
/// use attendance_engine::models::WorkdaySet;
/// use chrono::Weekday;
///
/// let workdays = WorkdaySet::from_json_lenient("[1, 2, 3, 4, 5, 6]");
/// assert!(workdays.contains(Weekday::Sat));
/// assert!(!workdays.contains(Weekday::Sun));
///
/// let broken = WorkdaySet::from_json_lenient("{not json");
/// assert_eq!(broken, WorkdaySet::MONDAY_TO_FRIDAY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "Vec<u8>")]
pub struct WorkdaySet(u8);

impl WorkdaySet {
    /// Monday through Friday, the fallback for malformed configuration.
    pub const MONDAY_TO_FRIDAY: WorkdaySet = WorkdaySet(0b0011_1110);

    /// Every day of the week.
    pub const EVERY_DAY: WorkdaySet = WorkdaySet(0b0111_1111);

    /// Builds a set from the given weekdays.
    pub fn from_days<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        Self(days.into_iter().fold(0, |bits, day| bits | (1 << day_index(day))))
    }

    /// Returns true if the shift is scheduled on `day`.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day_index(day)) != 0
    }

    /// Returns true if no day is scheduled.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the scheduled days, Sunday first.
    pub fn days(&self) -> Vec<Weekday> {
        (0..7u8)
            .filter(|bit| self.0 & (1 << bit) != 0)
            .filter_map(|bit| parse_weekday(&bit.to_string()))
            .collect()
    }

    /// Parses a JSON-encoded workday list, falling back to Monday to Friday.
    pub fn from_json_lenient(raw: &str) -> Self {
        Self::from(Value::String(raw.to_string()))
    }

    fn parse_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => {
                let days = items
                    .iter()
                    .map(weekday_from_value)
                    .collect::<Option<Vec<_>>>()?;
                let set = Self::from_days(days);
                (!set.is_empty()).then_some(set)
            }
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(inner @ Value::Array(_)) => Self::parse_value(&inner),
                _ => {
                    let days = raw
                        .split(',')
                        .map(parse_weekday)
                        .collect::<Option<Vec<_>>>()?;
                    let set = Self::from_days(days);
                    (!set.is_empty()).then_some(set)
                }
            },
            _ => None,
        }
    }
}

impl Default for WorkdaySet {
    fn default() -> Self {
        Self::MONDAY_TO_FRIDAY
    }
}

impl From<Value> for WorkdaySet {
    fn from(value: Value) -> Self {
        Self::parse_value(&value).unwrap_or_else(|| {
            warn!(workdays = %value, "Malformed workday configuration, using Monday to Friday");
            Self::MONDAY_TO_FRIDAY
        })
    }
}

impl From<WorkdaySet> for Vec<u8> {
    fn from(set: WorkdaySet) -> Self {
        (0..7u8).filter(|bit| set.0 & (1 << bit) != 0).collect()
    }
}

/// Per-weekday end times that replace a shift's nominal end on specific days.
///
/// Keys are resolved through [`parse_weekday`] when loaded. Entries with an unknown
/// day or an unparsable time are dropped; a malformed blob yields no overrides.
///
/// # Example
///
/// ```
/// use attendance_engine::models::WeekdayOverrides;
/// use chrono::{NaiveTime, Weekday};
///
/// let overrides = WeekdayOverrides::from_json_lenient(r#"{"viernes": "14:00", "sab": "12:30"}"#);
/// assert_eq!(overrides.end_time(Weekday::Fri), NaiveTime::from_hms_opt(14, 0, 0));
/// assert_eq!(overrides.end_time(Weekday::Sat), NaiveTime::from_hms_opt(12, 30, 0));
/// assert_eq!(overrides.end_time(Weekday::Mon), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "BTreeMap<String, String>")]
pub struct WeekdayOverrides {
    end_times: [Option<NaiveTime>; 7],
}

impl WeekdayOverrides {
    /// Returns a copy with `end_time` set for `day`.
    pub fn with_end_time(mut self, day: Weekday, end_time: NaiveTime) -> Self {
        self.end_times[day_index(day)] = Some(end_time);
        self
    }

    /// Returns the override for `day`, if any.
    pub fn end_time(&self, day: Weekday) -> Option<NaiveTime> {
        self.end_times[day_index(day)]
    }

    /// Returns true when no day is overridden.
    pub fn is_empty(&self) -> bool {
        self.end_times.iter().all(Option::is_none)
    }

    /// Parses a JSON-encoded override map, dropping anything unparsable.
    pub fn from_json_lenient(raw: &str) -> Self {
        Self::from(Value::String(raw.to_string()))
    }
}

impl From<Value> for WeekdayOverrides {
    fn from(value: Value) -> Self {
        let mut overrides = Self::default();
        match value {
            Value::Null => {}
            Value::Object(entries) => {
                for (key, raw_time) in entries {
                    let day = parse_weekday(&key);
                    let time = raw_time.as_str().and_then(parse_clock_time);
                    match (day, time) {
                        (Some(day), Some(time)) => overrides.end_times[day_index(day)] = Some(time),
                        _ => warn!(key = %key, value = %raw_time, "Ignoring unparsable weekday override"),
                    }
                }
            }
            Value::String(raw) if raw.trim().is_empty() => {}
            Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(inner @ Value::Object(_)) => overrides = Self::from(inner),
                _ => warn!(overrides = %raw, "Malformed weekday override configuration, ignoring"),
            },
            other => warn!(overrides = %other, "Malformed weekday override configuration, ignoring"),
        }
        overrides
    }
}

impl From<WeekdayOverrides> for BTreeMap<String, String> {
    fn from(overrides: WeekdayOverrides) -> Self {
        overrides
            .end_times
            .iter()
            .enumerate()
            .filter_map(|(index, time)| time.map(|t| (index.to_string(), format_clock_time(t))))
            .collect()
    }
}

/// A named shift schedule.
///
/// A shift whose start hour is greater than its end hour runs overnight.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ShiftDefinition;
/// use chrono::NaiveTime;
///
/// let night = ShiftDefinition::new(
///     "Nocturno",
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
/// );
/// assert!(night.is_overnight());
/// assert_eq!(night.night_boundary_hour(), Some(14));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// Display name of the shift (e.g. "Oficina", "Nocturno").
    pub name: String,
    /// Scheduled start time.
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    /// Nominal scheduled end time.
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    /// Grace period after the start time before an arrival counts as late.
    #[serde(default)]
    pub tolerance_minutes: u32,
    /// Days on which the shift is scheduled.
    #[serde(default)]
    pub workdays: WorkdaySet,
    /// End times that differ from `end_time` on particular weekdays.
    #[serde(default, skip_serializing_if = "WeekdayOverrides::is_empty")]
    pub end_time_overrides: WeekdayOverrides,
}

impl ShiftDefinition {
    /// Creates a Monday to Friday shift with no tolerance and no overrides.
    pub fn new(name: impl Into<String>, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            name: name.into(),
            start_time,
            end_time,
            tolerance_minutes: 0,
            workdays: WorkdaySet::MONDAY_TO_FRIDAY,
            end_time_overrides: WeekdayOverrides::default(),
        }
    }

    /// Sets the lateness tolerance.
    pub fn with_tolerance(mut self, minutes: u32) -> Self {
        self.tolerance_minutes = minutes;
        self
    }

    /// Sets the scheduled workdays.
    pub fn with_workdays(mut self, workdays: WorkdaySet) -> Self {
        self.workdays = workdays;
        self
    }

    /// Overrides the end time on one weekday.
    pub fn with_end_time_override(mut self, day: Weekday, end_time: NaiveTime) -> Self {
        self.end_time_overrides = self.end_time_overrides.with_end_time(day, end_time);
        self
    }

    /// Returns true if the shift crosses midnight.
    pub fn is_overnight(&self) -> bool {
        self.start_time.hour() > self.end_time.hour()
    }

    /// Returns the hour separating the previous night's scans from today's.
    ///
    /// This is the midpoint of the off-duty window, `floor((start + end) / 2)`.
    /// Day shifts have no boundary.
    pub fn night_boundary_hour(&self) -> Option<u32> {
        self.is_overnight()
            .then(|| (self.start_time.hour() + self.end_time.hour()) / 2)
    }

    /// Returns true if the shift is scheduled on `date`.
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        self.workdays.contains(date.weekday())
    }

    /// Returns the end time in effect on `date`, honoring weekday overrides.
    pub fn end_time_on(&self, date: NaiveDate) -> NaiveTime {
        self.end_time_overrides
            .end_time(date.weekday())
            .unwrap_or(self.end_time)
    }

    /// Returns the scheduled start instant for the workday `date`.
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start_time)
    }

    /// Returns the scheduled end instant for the workday `date`.
    ///
    /// The end rolls to the next calendar day when it falls before the start hour.
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        let end_time = self.end_time_on(date);
        let end = date.and_time(end_time);
        if self.start_time.hour() > end_time.hour() {
            end + TimeDelta::days(1)
        } else {
            end
        }
    }

    /// Returns the scheduled length of the shift on `date`, in hours.
    pub fn scheduled_hours_on(&self, date: NaiveDate) -> Decimal {
        let mut seconds = (self.end_on(date) - self.start_on(date)).num_seconds();
        if seconds <= 0 {
            seconds += SECONDS_PER_DAY;
        }
        hours_from_seconds(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn day_shift() -> ShiftDefinition {
        ShiftDefinition::new("General", time(8, 0), time(17, 0)).with_tolerance(10)
    }

    fn night_shift() -> ShiftDefinition {
        ShiftDefinition::new("Nocturno", time(22, 0), time(6, 0))
    }

    #[test]
    fn test_parse_weekday_aliases() {
        for alias in ["0", "sunday", "Sun", "domingo", "DOM"] {
            assert_eq!(parse_weekday(alias), Some(Weekday::Sun), "alias {}", alias);
        }
        for alias in ["3", "Wednesday", "wed", "miércoles", "miercoles", "mié", "mie."] {
            assert_eq!(parse_weekday(alias), Some(Weekday::Wed), "alias {}", alias);
        }
        for alias in ["6", "saturday", "sábado", "sabado", "sáb", "sab"] {
            assert_eq!(parse_weekday(alias), Some(Weekday::Sat), "alias {}", alias);
        }
        assert_eq!(parse_weekday("7"), None);
        assert_eq!(parse_weekday(""), None);
    }

    #[test]
    fn test_workdays_from_json_list() {
        let set = WorkdaySet::from_json_lenient("[1,2,3,4,5]");
        assert_eq!(set, WorkdaySet::MONDAY_TO_FRIDAY);
    }

    #[test]
    fn test_workdays_from_day_names() {
        let set = WorkdaySet::from_json_lenient(r#"["lunes", "miércoles", "sat"]"#);
        assert_eq!(set.days(), vec![Weekday::Mon, Weekday::Wed, Weekday::Sat]);
    }

    #[test]
    fn test_workdays_from_comma_separated_string() {
        let set = WorkdaySet::from_json_lenient("1,2,3,4,5,6");
        assert!(set.contains(Weekday::Sat));
        assert!(!set.contains(Weekday::Sun));
    }

    #[test]
    fn test_malformed_workdays_fall_back_to_monday_to_friday() {
        assert_eq!(WorkdaySet::from_json_lenient("{oops"), WorkdaySet::MONDAY_TO_FRIDAY);
        assert_eq!(WorkdaySet::from_json_lenient("[]"), WorkdaySet::MONDAY_TO_FRIDAY);
        assert_eq!(WorkdaySet::from_json_lenient("[1, 9]"), WorkdaySet::MONDAY_TO_FRIDAY);
        assert_eq!(WorkdaySet::from(Value::Bool(true)), WorkdaySet::MONDAY_TO_FRIDAY);
    }

    #[test]
    fn test_workdays_serialize_as_sorted_numbers() {
        let set = WorkdaySet::from_days([Weekday::Sat, Weekday::Mon, Weekday::Sun]);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[0,1,6]");
    }

    #[test]
    fn test_overrides_resolve_locale_keys() {
        let overrides =
            WeekdayOverrides::from_json_lenient(r#"{"5": "15:00", "Saturday": "12:00", "lun": "16:30"}"#);
        assert_eq!(overrides.end_time(Weekday::Fri), Some(time(15, 0)));
        assert_eq!(overrides.end_time(Weekday::Sat), Some(time(12, 0)));
        assert_eq!(overrides.end_time(Weekday::Mon), Some(time(16, 30)));
        assert_eq!(overrides.end_time(Weekday::Tue), None);
    }

    #[test]
    fn test_overrides_drop_bad_entries() {
        let overrides =
            WeekdayOverrides::from_json_lenient(r#"{"someday": "15:00", "vie": "late", "jue": "13:00"}"#);
        assert_eq!(overrides.end_time(Weekday::Fri), None);
        assert_eq!(overrides.end_time(Weekday::Thu), Some(time(13, 0)));
    }

    #[test]
    fn test_malformed_overrides_are_empty() {
        assert!(WeekdayOverrides::from_json_lenient("not json").is_empty());
        assert!(WeekdayOverrides::from_json_lenient("[1,2]").is_empty());
        assert!(WeekdayOverrides::from_json_lenient("").is_empty());
    }

    #[test]
    fn test_day_shift_is_not_overnight() {
        let shift = day_shift();
        assert!(!shift.is_overnight());
        assert_eq!(shift.night_boundary_hour(), None);
    }

    #[test]
    fn test_night_boundary_is_midpoint_of_off_duty_window() {
        assert_eq!(night_shift().night_boundary_hour(), Some(14));
        let late_night = ShiftDefinition::new("Madrugada", time(23, 0), time(7, 0));
        assert_eq!(late_night.night_boundary_hour(), Some(15));
        let evening = ShiftDefinition::new("Tarde", time(19, 0), time(4, 0));
        assert_eq!(evening.night_boundary_hour(), Some(11));
    }

    #[test]
    fn test_end_on_rolls_overnight_shift() {
        let date = make_date("2025-03-03");
        assert_eq!(
            night_shift().end_on(date),
            make_date("2025-03-04").and_time(time(6, 0))
        );
        assert_eq!(day_shift().end_on(date), date.and_time(time(17, 0)));
    }

    #[test]
    fn test_end_time_override_applies_only_on_its_weekday() {
        let shift = day_shift().with_end_time_override(Weekday::Fri, time(14, 0));
        let friday = make_date("2025-03-07");
        let thursday = make_date("2025-03-06");
        assert_eq!(shift.end_time_on(friday), time(14, 0));
        assert_eq!(shift.end_time_on(thursday), time(17, 0));
        assert_eq!(shift.scheduled_hours_on(friday), Decimal::from(6));
        assert_eq!(shift.scheduled_hours_on(thursday), Decimal::from(9));
    }

    #[test]
    fn test_scheduled_hours_overnight() {
        assert_eq!(night_shift().scheduled_hours_on(make_date("2025-03-03")), Decimal::from(8));
    }

    #[test]
    fn test_is_workday_uses_workday_set() {
        let shift = day_shift();
        assert!(shift.is_workday(make_date("2025-03-03"))); // Monday
        assert!(!shift.is_workday(make_date("2025-03-08"))); // Saturday
    }

    #[test]
    fn test_shift_deserialization_accepts_encoded_configuration() {
        let json = r#"{
            "name": "Chofer",
            "start_time": "07:00",
            "end_time": "16:00",
            "tolerance_minutes": 5,
            "workdays": "[1,2,3,4,5,6]",
            "end_time_overrides": "{\"sábado\": \"12:00\"}"
        }"#;

        let shift: ShiftDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(shift.start_time, time(7, 0));
        assert!(shift.workdays.contains(Weekday::Sat));
        assert_eq!(shift.end_time_overrides.end_time(Weekday::Sat), Some(time(12, 0)));
    }

    #[test]
    fn test_shift_deserialization_defaults() {
        let json = r#"{"name": "General", "start_time": "08:00:00", "end_time": "17:00"}"#;
        let shift: ShiftDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(shift.tolerance_minutes, 0);
        assert_eq!(shift.workdays, WorkdaySet::MONDAY_TO_FRIDAY);
        assert!(shift.end_time_overrides.is_empty());
    }

    #[test]
    fn test_shift_rejects_bad_start_time() {
        let json = r#"{"name": "General", "start_time": "8am", "end_time": "17:00"}"#;
        assert!(serde_json::from_str::<ShiftDefinition>(json).is_err());
    }

    #[test]
    fn test_shift_serialization() {
        let shift = day_shift().with_end_time_override(Weekday::Fri, time(14, 0));
        let json = serde_json::to_value(&shift).unwrap();
        assert_eq!(json["start_time"], "08:00");
        assert_eq!(json["workdays"], serde_json::json!([1, 2, 3, 4, 5]));
        assert_eq!(json["end_time_overrides"]["5"], "14:00");

        let deserialized: ShiftDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(shift, deserialized);
    }
}
