use regex::Regex;
use std::sync::LazyLock;

use super::types::{DevInfo, DevState};

static OVERALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""pullrequest"\s*:\s*\{\s*"overall"\s*:\s*\{([^{}]*)\}"#).unwrap()
});

static COUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""count"\s*:\s*(\d+)"#).unwrap());

static STATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""state"\s*:\s*"(\w+)""#).unwrap());

static OPEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""open"\s*:\s*(true|false)"#).unwrap());

static SHORT_FORM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pullrequest=\{([^{}]*)\}").unwrap());

static SHORT_STATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bstate=(\w+)").unwrap());

static SHORT_COUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bstateCount=(\d+)").unwrap());

/// Parse the tracker's development-status blob.
///
/// Two shapes are understood:
///
///   {pullrequest={dataType=pullrequest, state=MERGED, stateCount=1}, json={...}}
///   ..."pullrequest":{"overall":{"count":1,"state":"MERGED","open":false,...}}...
///
/// The JSON summary wins when both are present. Anything else yields
/// `DevInfo::default()`.
pub fn parse_dev_status(blob: &str) -> DevInfo {
    let blob = blob.trim();
    if blob.is_empty() {
        return DevInfo::default();
    }

    if let Some(overall) = OVERALL_PATTERN.captures(blob).and_then(|c| c.get(1)) {
        let overall = overall.as_str();
        return DevInfo {
            pr_count: capture_u32(&COUNT_PATTERN, overall),
            state: STATE_PATTERN
                .captures(overall)
                .and_then(|c| c.get(1))
                .map(|m| DevState::from_token(m.as_str())),
            open: OPEN_PATTERN
                .captures(overall)
                .and_then(|c| c.get(1))
                .is_some_and(|m| m.as_str() == "true"),
        };
    }

    if let Some(short) = SHORT_FORM_PATTERN.captures(blob).and_then(|c| c.get(1)) {
        let short = short.as_str();
        let state = SHORT_STATE_PATTERN
            .captures(short)
            .and_then(|c| c.get(1))
            .map(|m| DevState::from_token(m.as_str()));
        return DevInfo {
            pr_count: capture_u32(&SHORT_COUNT_PATTERN, short),
            open: state == Some(DevState::Open),
            state,
        };
    }

    DevInfo::default()
}

/// Parse a development field that may be a string or an embedded object.
pub fn parse_dev_value(value: Option<&serde_json::Value>) -> DevInfo {
    match value {
        Some(serde_json::Value::String(s)) => parse_dev_status(s),
        Some(v @ serde_json::Value::Object(_)) => parse_dev_status(&v.to_string()),
        _ => DevInfo::default(),
    }
}

fn capture_u32(pattern: &Regex, haystack: &str) -> u32 {
    pattern
        .captures(haystack)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
