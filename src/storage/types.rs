//! Core data types for the replog record store
//!
//! This module defines the fundamental types used throughout the storage layer:
//! - `ExerciseRecord`: A single logged workout event
//! - `ExerciseKind`: Classification of the exercise identifier
//! - `IndexedRecord`: A record annotated with its current position
//! - `RecordTimestamp`: Parsed form of a record's `datetime` string

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key carrying the positional index in update/delete payloads and listings.
/// Never persisted into a record.
pub const INDEX_FIELD: &str = "index";

/// Recognized field names
pub const EXERCISE_FIELD: &str = "exercise";
pub const REPS_FIELD: &str = "reps";
pub const DURATION_FIELD: &str = "duration";
pub const DATETIME_FIELD: &str = "datetime";

/// One logged workout event
///
/// Stored as the JSON object the client sent, so any payload is accepted and
/// every value (including numbers such as `60` vs `60.0`) round-trips
/// through read/update/export unchanged. The recognized fields are read
/// through lenient accessors that fall back to defaults instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExerciseRecord {
    fields: Map<String, Value>,
}

impl ExerciseRecord {
    /// Create a record for the given exercise
    pub fn new(exercise: impl Into<String>) -> Self {
        Self::default().field(EXERCISE_FIELD, exercise.into())
    }

    /// Builder method: set repetitions
    pub fn reps(self, reps: u64) -> Self {
        self.field(REPS_FIELD, reps)
    }

    /// Builder method: set explicit duration (seconds), integer or fractional
    pub fn duration(self, seconds: impl Into<Value>) -> Self {
        self.field(DURATION_FIELD, seconds)
    }

    /// Builder method: set timestamp string
    pub fn datetime(self, datetime: impl Into<String>) -> Self {
        self.field(DATETIME_FIELD, datetime.into())
    }

    /// Builder method: set any field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Raw value of a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Remove a field, returning its raw value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// All fields in insertion order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Exercise identifier, empty when absent or not a string
    pub fn exercise_name(&self) -> &str {
        self.get(EXERCISE_FIELD).and_then(Value::as_str).unwrap_or("")
    }

    /// Repetitions, zero when absent or unusable.
    ///
    /// Fractional counts are truncated and numeric strings are accepted.
    pub fn reps_or_zero(&self) -> u64 {
        self.get(REPS_FIELD).and_then(count_value).unwrap_or(0)
    }

    /// Explicitly recorded duration in seconds.
    ///
    /// Zero, negative or non-numeric values count as "not recorded".
    pub fn recorded_duration(&self) -> Option<f64> {
        self.get(DURATION_FIELD)
            .and_then(number_value)
            .filter(|d| *d > 0.0)
    }

    /// Raw `datetime` string
    pub fn datetime_str(&self) -> Option<&str> {
        self.get(DATETIME_FIELD).and_then(Value::as_str)
    }

    pub fn kind(&self) -> ExerciseKind {
        ExerciseKind::of(self.exercise_name())
    }

    /// Parse `datetime` and convert it into `tz`.
    ///
    /// Offset-naive timestamps are taken as UTC. Returns `None` when the
    /// field is missing or unparseable.
    pub fn normalized_datetime(&self, tz: &FixedOffset) -> Option<DateTime<FixedOffset>> {
        RecordTimestamp::parse(self.datetime_str()?).map(|ts| ts.normalize(tz))
    }

    /// Overwrite fields from `patch`, skipping nulls and the `index` key.
    /// Fields not named in `patch` are left as they are.
    pub fn merge(&mut self, patch: &Map<String, Value>) {
        for (key, value) in patch {
            if key == INDEX_FIELD || value.is_null() {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// Finite number from a JSON number or numeric string
fn number_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Non-negative whole count; fractions truncate, huge values saturate
fn count_value(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    number_value(value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.trunc() as u64)
}

/// Exercise classification used by the calorie and duration estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseKind {
    PushUp,
    Squat,
    Other,
}

impl ExerciseKind {
    /// Identifiers treated as push-ups (canonical first)
    pub const PUSH_UP_NAMES: &'static [&'static str] = &["push-up", "푸시업"];
    /// Identifiers treated as squats (canonical first)
    pub const SQUAT_NAMES: &'static [&'static str] = &["squat", "스쿼트"];

    /// Classify an exercise identifier
    pub fn of(name: &str) -> Self {
        if Self::PUSH_UP_NAMES.contains(&name) {
            ExerciseKind::PushUp
        } else if Self::SQUAT_NAMES.contains(&name) {
            ExerciseKind::Squat
        } else {
            ExerciseKind::Other
        }
    }

    /// Push-ups and squats get rep-based calorie/duration estimates
    pub fn is_rep_based(&self) -> bool {
        !matches!(self, ExerciseKind::Other)
    }
}

/// A record annotated with its current positional index
#[derive(Debug, Clone, Serialize)]
pub struct IndexedRecord {
    #[serde(flatten)]
    pub record: ExerciseRecord,
    pub index: usize,
}

impl IndexedRecord {
    pub fn new(index: usize, mut record: ExerciseRecord) -> Self {
        // the annotation wins over any stray stored key
        record.remove(INDEX_FIELD);
        Self { record, index }
    }
}

/// A parsed `datetime` value, before timezone normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTimestamp {
    /// Carried an explicit UTC offset
    Aware(DateTime<FixedOffset>),
    /// No offset; interpreted as UTC
    Naive(NaiveDateTime),
}

const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

impl RecordTimestamp {
    /// Parse an extended ISO-8601 timestamp.
    ///
    /// Accepts `T` or space separators, optional seconds and fractions, a
    /// trailing `Z` or `±HH:MM`/`±HHMM` offset, and bare dates (midnight).
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(RecordTimestamp::Aware(dt));
        }

        let zulu = s
            .strip_suffix('Z')
            .or_else(|| s.strip_suffix('z'))
            .map(|head| format!("{}+00:00", head));
        let aware_input = zulu.as_deref().unwrap_or(s);
        for fmt in AWARE_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(aware_input, fmt) {
                return Some(RecordTimestamp::Aware(dt));
            }
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(RecordTimestamp::Naive(dt));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(RecordTimestamp::Naive)
    }

    /// Convert into the service timezone
    pub fn normalize(self, tz: &FixedOffset) -> DateTime<FixedOffset> {
        match self {
            RecordTimestamp::Aware(dt) => dt.with_timezone(tz),
            RecordTimestamp::Naive(naive) => Utc.from_utc_datetime(&naive).with_timezone(tz),
        }
    }
}
