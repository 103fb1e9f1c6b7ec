//! Normalization of raw AI analysis output into a flat lookup map

use serde_json::{Map, Value};

use crate::value::{accept, lookup};

// Embedded JSON is sometimes encoded twice; unwrap at most this many layers.
const MAX_EMBED_DEPTH: usize = 2;

/// Short alias -> nested source paths, first displayable source wins
const FLATTEN: &[(&str, &[&str])] = &[
    ("institutionName", &["institutionDetails.name", "institutionDetails.institutionName", "providerDetails.name"]),
    ("cricosProviderCode", &["institutionDetails.cricosCode", "institutionDetails.cricosProviderCode", "providerDetails.cricosCode"]),
    ("institutionAddress", &["institutionDetails.address"]),
    ("country", &["institutionDetails.country"]),
    ("courseName", &["courseDetails.name", "courseDetails.courseName", "programDetails.name"]),
    ("courseLevel", &["courseDetails.level", "courseDetails.courseLevel", "programDetails.level"]),
    ("courseCode", &["courseDetails.cricosCode", "courseDetails.courseCode"]),
    ("startDate", &["courseDetails.duration.startDate", "courseDetails.startDate", "programDetails.startDate"]),
    ("endDate", &["courseDetails.duration.endDate", "courseDetails.endDate", "programDetails.endDate"]),
    ("durationWeeks", &["courseDetails.duration.totalWeeks", "courseDetails.duration.weeks"]),
    ("studyMode", &["courseDetails.studyMode", "courseDetails.mode"]),
    ("tuitionFee", &["financialDetails.costBreakdown.tuitionFee", "financialDetails.tuitionFee"]),
    ("perYearCost", &["financialDetails.costBreakdown.perYear", "financialDetails.costBreakdown.annualCost"]),
    ("totalCost", &["financialDetails.costBreakdown.total", "financialDetails.costBreakdown.totalCost", "financialDetails.totalCost"]),
    ("initialPayment", &["financialDetails.initialPrepaidAmount", "financialDetails.costBreakdown.initialPayment"]),
    ("scholarship", &["financialDetails.scholarship", "financialDetails.scholarshipDetails"]),
    ("paymentTerms", &["financialDetails.paymentTerms", "financialDetails.paymentSchedule"]),
    ("oshcProvider", &["healthInsurance.provider", "healthInsurance.oshcProvider"]),
    ("oshcCoverage", &["healthInsurance.coverageType", "healthInsurance.coverage"]),
    ("oshcStartDate", &["healthInsurance.startDate"]),
    ("oshcEndDate", &["healthInsurance.endDate"]),
    ("englishTest", &["languageRequirements.testType", "languageRequirements.test"]),
    ("englishScore", &["languageRequirements.minimumScore", "languageRequirements.overallScore"]),
    ("studentName", &["studentDetails.name", "studentDetails.fullName", "applicantDetails.name"]),
    ("studentId", &["studentDetails.studentId", "studentDetails.id"]),
    ("dateOfBirth", &["studentDetails.dateOfBirth", "applicantDetails.dateOfBirth"]),
    ("nationality", &["studentDetails.nationality", "applicantDetails.nationality"]),
    ("visaSubclass", &["visaDetails.subclass", "visaDetails.visaType"]),
    ("decisionDate", &["visaDetails.decisionDate", "decisionDetails.date"]),
    ("rejectionReasons", &["decisionDetails.reasons", "refusalDetails.reasons"]),
];

/// Build the lookup map for a record's raw analysis.
///
/// Objects are copied; strings are parsed as embedded JSON (code fences
/// allowed). Anything unusable yields an empty map, never an error. Known
/// nested values are then copied up to their short aliases, but a key the
/// analysis already carries with a usable value is left alone. Placeholders
/// such as `"N/A"` count as missing on both sides.
pub fn normalize(raw: Option<&Value>) -> Map<String, Value> {
    let mut map = match raw {
        None | Some(Value::Null) => return Map::new(),
        Some(Value::Object(obj)) => obj.clone(),
        Some(Value::String(text)) => match parse_embedded(text, MAX_EMBED_DEPTH) {
            Some(obj) => obj,
            None => return Map::new(),
        },
        Some(other) => {
            tracing::debug!(kind = json_kind(other), "analysis is not an object");
            return Map::new();
        }
    };
    flatten_known(&mut map);
    map
}

fn parse_embedded(text: &str, depth: usize) -> Option<Map<String, Value>> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        tracing::debug!("embedded analysis is empty");
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(obj)) => Some(obj),
        Ok(Value::String(inner)) if depth > 1 => parse_embedded(&inner, depth - 1),
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "embedded analysis is not a JSON object");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "embedded analysis is not valid JSON");
            None
        }
    }
}

// Accepts ```json ... ``` (multi- or single-line) as well as bare JSON.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        // ```json {...}``` on one line
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
    };
    body.trim_end().trim_end_matches("```").trim()
}

fn flatten_known(map: &mut Map<String, Value>) {
    for (alias, sources) in FLATTEN {
        if map.get(*alias).and_then(accept).is_some() {
            continue;
        }
        let current: &Map<String, Value> = map;
        let found = sources
            .iter()
            .filter_map(|path| lookup(current, path))
            .find(|value| accept(value).is_some())
            .cloned();
        if let Some(value) = found {
            map.insert(alias.to_string(), value);
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
