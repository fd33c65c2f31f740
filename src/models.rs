use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::Deserialize;
use serde_json::Value;

/// Numeric course identifier. Numbers and numeric strings from the endpoint
/// both end up here, so `3`, `"3"` and `3.0` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseId(pub i64);

impl CourseId {
    fn from_value(value: &Value) -> Option<Self> {
        numeric(value).and_then(Self::from_number)
    }

    fn from_number(n: f64) -> Option<Self> {
        // i64::MAX is not representable as f64; the bound is exclusive.
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Some(CourseId(n as i64))
        } else {
            None
        }
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CourseId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .and_then(Self::from_number)
            .ok_or_else(|| anyhow!("`{}` is not a course id", s.trim()))
    }
}

// A course as served by the endpoint, after normalisation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCourse")]
pub struct CourseRecord {
    /// `None` when the endpoint sent no usable identifier. Such a record is
    /// still listed but can never be selected.
    pub id: Option<CourseId>,
    pub name: String,
    pub credit: f64,
    pub required: bool,
}

impl CourseRecord {
    pub fn new(id: i64, name: &str, credit: f64, required: bool) -> Self {
        CourseRecord {
            id: Some(CourseId(id)),
            name: name.to_string(),
            credit: credit_or_zero(Some(credit)),
            required,
        }
    }

    pub fn kind(&self) -> &'static str {
        if self.required {
            "Compulsory"
        } else {
            "Elective"
        }
    }
}

// Wire shape: `{ courseId: number|string, courseName: string, credit: number|string, required: boolean }`
#[derive(Debug, Deserialize)]
struct RawCourse {
    #[serde(rename = "courseId", default)]
    course_id: Value,
    #[serde(rename = "courseName", default)]
    course_name: Value,
    #[serde(default)]
    credit: Value,
    #[serde(default)]
    required: Value,
}

impl From<RawCourse> for CourseRecord {
    fn from(raw: RawCourse) -> Self {
        let name = match raw.course_name {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        CourseRecord {
            id: CourseId::from_value(&raw.course_id),
            name,
            credit: credit_or_zero(numeric(&raw.credit)),
            required: raw.required.as_bool().unwrap_or(false),
        }
    }
}

// Credits without a finite numeric value count as zero.
fn credit_or_zero(credit: Option<f64>) -> f64 {
    credit.filter(|credit| credit.is_finite()).unwrap_or(0.0)
}

// Reads a JSON number or numeric string. Anything else, including NaN and
// infinities, has no numeric value.
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
