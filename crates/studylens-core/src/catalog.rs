//! Built-in field catalogs, one schema per known document type

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{DocumentType, FieldSpec};

/// A group of fields shown together (one dashboard tab)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl Section {
    fn new(title: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            title: title.to_string(),
            fields,
        }
    }
}

/// Ordered sections of fields to resolve for a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub sections: Vec<Section>,
}

impl Catalog {
    /// Built-in catalog for a document type
    pub fn for_document(document_type: &DocumentType) -> Self {
        let sections = match document_type {
            DocumentType::Coe => coe_sections(),
            DocumentType::OfferLetter => offer_letter_sections(),
            DocumentType::VisaRejection => visa_rejection_sections(),
            DocumentType::Other(_) => generic_sections(),
        };
        Self { sections }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn all_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.all_fields().find(|f| f.key == key)
    }

    /// Total number of fields across sections
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// User catalogs keyed by document tag, falling back to the built-ins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogSet {
    overrides: BTreeMap<String, Catalog>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{ "<document tag>": { "sections": [...] }, ... }`
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let raw: BTreeMap<String, Catalog> = serde_json::from_str(text)?;
        let mut set = Self::new();
        for (tag, catalog) in raw {
            set.insert(&DocumentType::from_tag(&tag), catalog);
        }
        Ok(set)
    }

    /// Every built-in catalog, keyed by canonical tag
    pub fn builtin() -> Self {
        let mut set = Self::new();
        for doc in [
            DocumentType::Coe,
            DocumentType::OfferLetter,
            DocumentType::VisaRejection,
        ] {
            set.insert(&doc, Catalog::for_document(&doc));
        }
        set
    }

    pub fn insert(&mut self, document_type: &DocumentType, catalog: Catalog) {
        self.overrides
            .insert(document_type.as_tag().to_string(), catalog);
    }

    pub fn catalog_for(&self, document_type: &DocumentType) -> Catalog {
        self.overrides
            .get(document_type.as_tag())
            .cloned()
            .unwrap_or_else(|| Catalog::for_document(document_type))
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

fn institution_name() -> FieldSpec {
    FieldSpec::new(
        "institutionName",
        "Institution",
        &["institutionDetails.name", "provider.name", "institution.name", "providerName"],
    )
}

fn course_name() -> FieldSpec {
    FieldSpec::new(
        "courseName",
        "Course",
        &["courseDetails.name", "course.name", "programName", "program.name"],
    )
}

fn course_level() -> FieldSpec {
    FieldSpec::new(
        "courseLevel",
        "Course Level",
        &["courseDetails.level", "course.level", "programLevel", "qualificationLevel"],
    )
}

fn start_date() -> FieldSpec {
    FieldSpec::new(
        "startDate",
        "Start Date",
        &["courseDetails.duration.startDate", "course.startDate", "dates.start", "commencementDate"],
    )
}

fn end_date() -> FieldSpec {
    FieldSpec::new(
        "endDate",
        "End Date",
        &["courseDetails.duration.endDate", "course.endDate", "dates.end", "completionDate"],
    )
}

fn duration_weeks() -> FieldSpec {
    FieldSpec::new(
        "durationWeeks",
        "Duration (weeks)",
        &["courseDetails.duration.totalWeeks", "course.durationWeeks", "duration"],
    )
}

fn student_name() -> FieldSpec {
    FieldSpec::new(
        "studentName",
        "Student Name",
        &["studentDetails.name", "student.name", "applicantName", "fullName"],
    )
}

fn tuition_fee() -> FieldSpec {
    FieldSpec::new(
        "tuitionFee",
        "Tuition Fee",
        &["financialDetails.costBreakdown.tuitionFee", "fees.tuition", "tuition"],
    )
}

fn scholarship() -> FieldSpec {
    FieldSpec::new(
        "scholarship",
        "Scholarship",
        &["financialDetails.scholarship.name", "financialDetails.scholarship", "scholarshipDetails"],
    )
}

fn payment_terms() -> FieldSpec {
    FieldSpec::new(
        "paymentTerms",
        "Payment Terms",
        &["financialDetails.paymentTerms", "fees.paymentTerms", "paymentSchedule"],
    )
}

fn coe_sections() -> Vec<Section> {
    vec![
        Section::new(
            "Institution & Course",
            vec![
                institution_name(),
                FieldSpec::new(
                    "cricosProviderCode",
                    "CRICOS Provider Code",
                    &["institutionDetails.cricosCode", "provider.cricosCode"],
                ),
                course_name(),
                course_level(),
                FieldSpec::new(
                    "courseCode",
                    "CRICOS Course Code",
                    &["courseDetails.cricosCode", "course.cricosCode"],
                ),
                start_date(),
                end_date(),
                duration_weeks(),
            ],
        ),
        Section::new(
            "Financial",
            vec![
                tuition_fee(),
                FieldSpec::new(
                    "perYearCost",
                    "Cost per Year",
                    &["financialDetails.costBreakdown.perYear", "fees.perYear"],
                ),
                FieldSpec::new(
                    "totalCost",
                    "Total Course Cost",
                    &["financialDetails.costBreakdown.total", "fees.total", "totalTuitionFee"],
                ),
                FieldSpec::new(
                    "initialPayment",
                    "Initial Prepaid Fees",
                    &["financialDetails.initialPrepaidAmount", "fees.initialPayment"],
                ),
                scholarship(),
                payment_terms(),
            ],
        ),
        Section::new(
            "Health Cover",
            vec![
                FieldSpec::new("oshcProvider", "OSHC Provider", &["healthInsurance.provider", "oshc.provider"]),
                FieldSpec::new("oshcCoverage", "Cover Type", &["healthInsurance.coverageType", "oshc.coverType"]),
                FieldSpec::new("oshcStartDate", "Cover Start", &["healthInsurance.startDate", "oshc.startDate"]),
                FieldSpec::new("oshcEndDate", "Cover End", &["healthInsurance.endDate", "oshc.endDate"]),
            ],
        ),
        Section::new(
            "Student",
            vec![
                student_name(),
                FieldSpec::new("studentId", "Student ID", &["studentDetails.studentId", "student.id"]),
                FieldSpec::new("dateOfBirth", "Date of Birth", &["studentDetails.dateOfBirth", "student.dob"]),
                FieldSpec::new("nationality", "Nationality", &["studentDetails.nationality", "student.nationality"]),
            ],
        ),
    ]
}

fn offer_letter_sections() -> Vec<Section> {
    vec![
        Section::new(
            "Offer",
            vec![
                institution_name(),
                student_name(),
                FieldSpec::new("studentId", "Student ID", &["studentDetails.studentId", "offerDetails.studentId"]),
                FieldSpec::new("offerType", "Offer Type", &["offerDetails.type", "offerType"]),
                FieldSpec::new("offerDate", "Offer Date", &["offerDetails.date", "offerDetails.issueDate", "issueDate"]),
                FieldSpec::new(
                    "acceptanceDeadline",
                    "Acceptance Deadline",
                    &["offerDetails.acceptanceDeadline", "offerDetails.deadline", "deadline"],
                ),
            ],
        ),
        Section::new(
            "Course",
            vec![
                course_name(),
                course_level(),
                start_date(),
                end_date(),
                duration_weeks(),
                FieldSpec::new("studyMode", "Study Mode", &["courseDetails.studyMode", "course.mode"]),
            ],
        ),
        Section::new(
            "Fees & Scholarship",
            vec![
                tuition_fee(),
                FieldSpec::new(
                    "perYearCost",
                    "Cost per Year",
                    &["financialDetails.costBreakdown.perYear", "fees.perYear"],
                ),
                FieldSpec::new(
                    "totalCost",
                    "Total Course Cost",
                    &["financialDetails.costBreakdown.total", "fees.total"],
                ),
                FieldSpec::new(
                    "initialPayment",
                    "Deposit",
                    &["financialDetails.initialPrepaidAmount", "financialDetails.deposit", "deposit"],
                ),
                scholarship(),
                payment_terms(),
            ],
        ),
        Section::new(
            "Conditions",
            vec![
                FieldSpec::new("conditions", "Offer Conditions", &["offerDetails.conditions", "conditionsOfOffer"]),
                FieldSpec::new("englishTest", "English Test", &["languageRequirements.testType", "englishRequirement.test"]),
                FieldSpec::new(
                    "englishScore",
                    "Minimum English Score",
                    &["languageRequirements.minimumScore", "englishRequirement.score"],
                ),
            ],
        ),
    ]
}

fn visa_rejection_sections() -> Vec<Section> {
    vec![
        Section::new(
            "Application",
            vec![
                FieldSpec::new(
                    "studentName",
                    "Applicant",
                    &["applicantDetails.name", "studentDetails.name", "applicant.name", "applicantName"],
                ),
                FieldSpec::new("dateOfBirth", "Date of Birth", &["applicantDetails.dateOfBirth", "applicant.dob"]),
                FieldSpec::new("nationality", "Nationality", &["applicantDetails.nationality", "applicant.nationality"]),
                FieldSpec::new("visaSubclass", "Visa Subclass", &["visaDetails.subclass", "visaDetails.visaType", "visaType"]),
                FieldSpec::new(
                    "applicationDate",
                    "Application Date",
                    &["visaDetails.applicationDate", "applicationDetails.date", "lodgementDate"],
                ),
                FieldSpec::new("institutionName", "Intended Institution", &["studyPlan.institution", "institutionDetails.name"]),
                FieldSpec::new("courseName", "Intended Course", &["studyPlan.course", "courseDetails.name"]),
            ],
        ),
        Section::new(
            "Decision",
            vec![
                FieldSpec::new("decisionDate", "Decision Date", &["visaDetails.decisionDate", "decisionDetails.date"]),
                FieldSpec::new(
                    "rejectionReasons",
                    "Reasons for Refusal",
                    &["decisionDetails.reasons", "refusalReasons", "reasons"],
                ),
                FieldSpec::new(
                    "criteriaNotMet",
                    "Criteria Not Met",
                    &["decisionDetails.criteria", "decisionDetails.legislation", "legislation"],
                ),
                FieldSpec::new(
                    "genuineStudentConcerns",
                    "Genuine Student Assessment",
                    &["assessment.genuineStudent", "gteConcerns", "gsConcerns"],
                ),
                FieldSpec::new(
                    "financialConcerns",
                    "Financial Capacity Concerns",
                    &["assessment.financialCapacity", "financialConcerns"],
                ),
            ],
        ),
        Section::new(
            "Next Steps",
            vec![
                FieldSpec::new("reviewRights", "Review Rights", &["nextSteps.reviewRights", "appealRights"]),
                FieldSpec::new(
                    "reviewDeadline",
                    "Review Deadline",
                    &["nextSteps.reviewDeadline", "appealDeadline"],
                ),
                FieldSpec::new(
                    "recommendations",
                    "Recommendations",
                    &["nextSteps.recommendations", "improvementSuggestions", "suggestions"],
                ),
            ],
        ),
    ]
}

fn generic_sections() -> Vec<Section> {
    vec![Section::new(
        "Overview",
        vec![
            institution_name(),
            course_name(),
            course_level(),
            start_date(),
            end_date(),
            student_name(),
            tuition_fee(),
            scholarship(),
            payment_terms(),
        ],
    )]
}
