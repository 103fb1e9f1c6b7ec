//! Regex extraction of well-known facts from an analysis summary

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::NOT_SPECIFIED;

/// Value reported when a scholarship is mentioned without any detail
pub const SCHOLARSHIP_AWARDED: &str = "Scholarship awarded";

/// Facts the extractor knows how to find in prose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    InstitutionName,
    ProgramName,
    ProgramLevel,
    StartDate,
    EndDate,
    StudentName,
    Scholarship,
    PaymentTerms,
}

impl TextField {
    pub const ALL: [TextField; 8] = [
        TextField::InstitutionName,
        TextField::ProgramName,
        TextField::ProgramLevel,
        TextField::StartDate,
        TextField::EndDate,
        TextField::StudentName,
        TextField::Scholarship,
        TextField::PaymentTerms,
    ];

    /// Canonical field key
    pub fn key(&self) -> &'static str {
        match self {
            TextField::InstitutionName => "institutionName",
            TextField::ProgramName => "programName",
            TextField::ProgramLevel => "programLevel",
            TextField::StartDate => "startDate",
            TextField::EndDate => "endDate",
            TextField::StudentName => "studentName",
            TextField::Scholarship => "scholarship",
            TextField::PaymentTerms => "paymentTerms",
        }
    }

    /// Map a field key (as used in field catalogs) to an extractable fact
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "institutionName" | "institution" | "university" => Some(TextField::InstitutionName),
            "programName" | "courseName" | "program" | "course" => Some(TextField::ProgramName),
            "programLevel" | "courseLevel" | "level" => Some(TextField::ProgramLevel),
            "startDate" | "courseStartDate" => Some(TextField::StartDate),
            "endDate" | "courseEndDate" => Some(TextField::EndDate),
            "studentName" | "applicantName" | "name" => Some(TextField::StudentName),
            "scholarship" | "scholarshipDetails" => Some(TextField::Scholarship),
            "paymentTerms" | "paymentSchedule" => Some(TextField::PaymentTerms),
            _ => None,
        }
    }
}

// Numeric, ISO and written-month date forms.
const DATE: &str = r"(?:\d{4}-\d{2}-\d{2}|\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|\d{1,2}(?:st|nd|rd|th)?\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+\d{4}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4})";

// Ends a labelled value: sentence stop, newline, separator or end of text.
const STOP: &str = r"(?:\.(?:\s|$)|[\n;]|$)";

static PATTERNS: OnceLock<HashMap<TextField, Vec<Regex>>> = OnceLock::new();

fn patterns(field: TextField) -> &'static [Regex] {
    let table = PATTERNS.get_or_init(build_patterns);
    table.get(&field).map(Vec::as_slice).unwrap_or(&[])
}

fn build_patterns() -> HashMap<TextField, Vec<Regex>> {
    let sources: Vec<(TextField, Vec<String>)> = vec![
        (
            TextField::InstitutionName,
            vec![
                format!(r"(?i)\b(?:institution|provider|university|college)(?:\s+name)?\s*:\s*([^\n,;]+?){STOP}"),
                r"\b((?:[A-Z][\w&'\-]*\s+)*(?:University|College|Institute|Academy|Polytechnic|School)(?:\s+of\s+[A-Z][\w&'\-]*(?:\s+[A-Z][\w&'\-]*)*)?)".to_string(),
            ],
        ),
        (
            TextField::ProgramName,
            vec![
                format!(r"(?i)\b(?:course|program(?:me)?)(?:\s+(?:name|title))?\s*:\s*([^\n;]+?){STOP}"),
                r"\b((?:Bachelor|Master|Doctor|Graduate\s+Certificate|Graduate\s+Diploma|Advanced\s+Diploma|Associate\s+Degree|Diploma|Certificate\s+[IV]+)(?:'s)?\s+(?:of|in)\s+[A-Z][\w&'\-]*(?:\s+(?:(?:and|of|in|&)\s+)?[A-Z][\w&'\-]*)*(?:\s+\([^)\n]*\))?)".to_string(),
            ],
        ),
        (
            TextField::ProgramLevel,
            vec![
                format!(r"(?i)\b(?:course|program(?:me)?|qualification|study)\s+level\s*:\s*([^\n,;]+?){STOP}"),
                r"(?i)\b(bachelor|master|doctor(?:ate)?|ph\.?d|graduate\s+diploma|graduate\s+certificate|advanced\s+diploma|diploma|certificate\s+[iv]+|foundation|elicos)\b".to_string(),
                r"(?i)\b(postgraduate|undergraduate)\b".to_string(),
            ],
        ),
        (
            TextField::StartDate,
            vec![format!(
                r"(?i)\b(?:course\s+)?(?:start(?:s|ing|ed)?|commenc(?:e|es|ing|ement|ed))(?:\s+date)?(?:\s+(?:on|from|of|is))?\s*:?\s*({DATE})"
            )],
        ),
        (
            TextField::EndDate,
            vec![
                format!(
                    r"(?i)\b(?:course\s+)?(?:end(?:s|ing)?|finish(?:es|ing)?|complet(?:e|es|ion|ing)|conclud(?:e|es|ing))(?:\s+date)?(?:\s+(?:on|by|of|is))?\s*:?\s*({DATE})"
                ),
                format!(r"(?i)\bfrom\s+{DATE}\s+(?:to|until|till|through|-)\s+({DATE})"),
            ],
        ),
        (
            TextField::StudentName,
            vec![
                format!(r"(?i)\b(?:student|applicant)(?:'s)?\s+name\s*:\s*([^\n,;]+?){STOP}"),
                r"(?i)student\s+([A-Z][a-zA-Z\s]+)\s+has".to_string(),
                r"(?i:dear|issued\s+to)\s+(?:(?i:mr|ms|mrs|miss|dr)\.?\s+)?([A-Z][a-zA-Z'\-]+(?:\s+[A-Z][a-zA-Z'\-]+)*)".to_string(),
            ],
        ),
        (
            TextField::Scholarship,
            vec![
                format!(r"(?i)\bscholarship(?:\s+(?:amount|details|value))?\s*:\s*([^\n;]+?){STOP}"),
                r"(?i)((?:\d{1,3}(?:\.\d+)?\s?%|\d+\s+per\s*cent)\s+(?:tuition\s+)?(?:fee\s+)?(?:scholarship|waiver|discount|reduction))".to_string(),
                r"(?i)\b(?:awarded|granted|offered|received)\s+(?:(?:an?|the)\s+)?(?:[\w'\-]+\s+){0,3}?scholarship".to_string(),
                r"(?i)\bscholarship\s+(?:of|worth)\s+((?:[A-Z]{3}\s?|[A-Z]{0,2}\$|[€£₹])?\s?[\d,]+(?:\.\d+)?%?)".to_string(),
            ],
        ),
        (
            TextField::PaymentTerms,
            vec![
                format!(r"(?i)\bpayment\s+(?:terms|schedule|plan|conditions)\s*(?::|are|is)?\s*([^\n]+?){STOP}"),
                r"(?i)\b((?:payable|paid|due)\s+(?:in\s+full|annually|per\s+(?:semester|term|year|trimester)|in\s+(?:two|three|four|\d+)\s+instal?ments|in\s+instal?ments|upfront|quarterly|monthly|before\s+[^\n.]+)[^\n.]*)".to_string(),
            ],
        ),
    ];

    sources
        .into_iter()
        .map(|(field, list)| {
            let compiled = list.iter().map(|p| Regex::new(p).unwrap()).collect();
            (field, compiled)
        })
        .collect()
}

/// Extract a field from summary prose, falling back to [`NOT_SPECIFIED`]
pub fn extract(summary: &str, field_key: &str) -> String {
    try_extract(summary, field_key).unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// Extract a field from summary prose; `None` for unknown keys or no match
pub fn try_extract(summary: &str, field_key: &str) -> Option<String> {
    let field = TextField::from_key(field_key)?;
    for re in patterns(field) {
        let Some(caps) = re.captures(summary) else {
            continue;
        };
        match caps.get(1) {
            Some(m) => {
                let value = clean(m.as_str());
                if !value.is_empty() {
                    tracing::trace!(field_key, pattern = re.as_str(), "summary match");
                    return Some(value);
                }
            }
            None if field == TextField::Scholarship => {
                return Some(SCHOLARSHIP_AWARDED.to_string());
            }
            None => {}
        }
    }
    None
}

fn clean(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['.', ',', ';', ':'])
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
