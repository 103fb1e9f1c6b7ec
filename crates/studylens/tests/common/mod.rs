#![allow(dead_code)]

use serde_json::json;
use studylens_core::AnalysisRecord;

pub const AWARD_SUMMARY: &str = "Student John Doe has been awarded a scholarship of $5,000 at Example University for a Master of Science starting on 01/09/2025.";

pub fn summary_only_record() -> AnalysisRecord {
    AnalysisRecord::from_summary(AWARD_SUMMARY)
}

pub fn structured_coe() -> AnalysisRecord {
    serde_json::from_value(json!({
        "id": 101,
        "filename": "coe_monash.pdf",
        "documentType": "coe",
        "createdAt": "2025-02-01T08:15:00Z",
        "analysis": {
            "institutionDetails": {"name": "Monash University", "cricosCode": "00008C"},
            "courseDetails": {
                "name": "Master of Information Technology",
                "level": "Masters (Coursework)",
                "duration": {"startDate": "2025-02-24", "endDate": "2026-11-27", "totalWeeks": 92}
            },
            "financialDetails": {
                "costBreakdown": {"tuitionFee": "AUD 51,000 per year", "total": "AUD 102,000"},
                "paymentTerms": "Payable per semester"
            },
            "healthInsurance": {"provider": "Medibank", "coverageType": "Single"},
            "studentDetails": {"name": "Aarav Patel", "studentId": "33445566"}
        },
        "summary": "Confirmation of enrolment for a 92 week program with 15% scholarship."
    }))
    .unwrap()
}

pub fn malformed_record() -> AnalysisRecord {
    serde_json::from_value(json!({
        "id": 102,
        "documentType": "offer_letter",
        "analysis": "{\"institutionDetails\": {\"name\": \"Broken",
        "summary": "Offer from Example University starting on 14 July 2025."
    }))
    .unwrap()
}
