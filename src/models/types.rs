//! Type definitions for the CreditWise prediction service
//! All core data structures for applicant inputs and verdicts

use serde::{Deserialize, Serialize};

use crate::models::config;
use crate::models::errors::{AppError, AppResult};

/// Education level selector
/// The model binarizes this: Graduate = 1.0, anything else = 0.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    Graduate,
    #[serde(rename = "Not Graduate")]
    NotGraduate,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Graduate => "Graduate",
            EducationLevel::NotGraduate => "Not Graduate",
        }
    }
}

/// Employment status selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Salaried,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    Unemployed,
    Contract,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Salaried => "Salaried",
            EmploymentStatus::SelfEmployed => "Self-employed",
            EmploymentStatus::Unemployed => "Unemployed",
            EmploymentStatus::Contract => "Contract",
        }
    }
}

/// Loan purpose selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanPurpose {
    Home,
    Education,
    Car,
    Personal,
    Business,
}

impl LoanPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanPurpose::Home => "Home",
            LoanPurpose::Education => "Education",
            LoanPurpose::Car => "Car",
            LoanPurpose::Personal => "Personal",
            LoanPurpose::Business => "Business",
        }
    }
}

/// Property area selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyArea {
    Urban,
    Semiurban,
    Rural,
}

impl PropertyArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyArea::Urban => "Urban",
            PropertyArea::Semiurban => "Semiurban",
            PropertyArea::Rural => "Rural",
        }
    }
}

/// Gender selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Marital status (not exposed in the form; supplied by defaults)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Married,
    Single,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Married => "Married",
            MaritalStatus::Single => "Single",
        }
    }
}

/// Employer category (not exposed in the form; supplied by defaults)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployerCategory {
    Private,
    Public,
}

impl EmployerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployerCategory::Private => "Private",
            EmployerCategory::Public => "Public",
        }
    }
}

/// Raw user-supplied inputs for a single prediction.
/// Created per form submission, discarded after one prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInputs {
    pub applicant_income: f64,
    pub loan_amount: f64,
    pub loan_term: f64,
    pub credit_score: f64,
    pub dti_ratio: f64,
    pub education_level: EducationLevel,
    pub employment_status: EmploymentStatus,
    pub loan_purpose: LoanPurpose,
    pub property_area: PropertyArea,
    pub gender: Gender,
}

impl RawInputs {
    /// Validate numeric fields against the ranges the form enforces.
    /// The API cannot trust the browser widgets, so the same bounds are
    /// checked server-side.
    pub fn validate(&self) -> AppResult<()> {
        if !self.applicant_income.is_finite() || self.applicant_income < config::MIN_APPLICANT_INCOME
        {
            return Err(AppError::bad_request(format!(
                "applicant_income must be >= {}",
                config::MIN_APPLICANT_INCOME
            )));
        }
        if !self.loan_amount.is_finite() || self.loan_amount < config::MIN_LOAN_AMOUNT {
            return Err(AppError::bad_request(format!(
                "loan_amount must be >= {}",
                config::MIN_LOAN_AMOUNT
            )));
        }
        if !self.loan_term.is_finite()
            || self.loan_term < config::MIN_LOAN_TERM_MONTHS
            || self.loan_term > config::MAX_LOAN_TERM_MONTHS
            || self.loan_term % config::LOAN_TERM_STEP_MONTHS != 0.0
        {
            return Err(AppError::bad_request(format!(
                "loan_term must be {}-{} months in steps of {}",
                config::MIN_LOAN_TERM_MONTHS,
                config::MAX_LOAN_TERM_MONTHS,
                config::LOAN_TERM_STEP_MONTHS
            )));
        }
        if !self.credit_score.is_finite()
            || self.credit_score < config::MIN_CREDIT_SCORE
            || self.credit_score > config::MAX_CREDIT_SCORE
        {
            return Err(AppError::bad_request(format!(
                "credit_score must be {}-{}",
                config::MIN_CREDIT_SCORE,
                config::MAX_CREDIT_SCORE
            )));
        }
        if !self.dti_ratio.is_finite()
            || self.dti_ratio < config::MIN_DTI_RATIO
            || self.dti_ratio > config::MAX_DTI_RATIO
        {
            return Err(AppError::bad_request(format!(
                "dti_ratio must be {:.2}-{:.2}",
                config::MIN_DTI_RATIO,
                config::MAX_DTI_RATIO
            )));
        }
        Ok(())
    }
}

/// Binary approval verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    LikelyApproved,
    LikelyRejected,
}

impl Verdict {
    /// Verdict from the classifier's binary label
    pub fn from_label(approved: bool) -> Self {
        if approved {
            Verdict::LikelyApproved
        } else {
            Verdict::LikelyRejected
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LikelyApproved => "Likely Approved",
            Verdict::LikelyRejected => "Likely Rejected",
        }
    }

    /// Get color code for UI
    pub fn color_code(&self) -> &'static str {
        match self {
            Verdict::LikelyApproved => "#1f7a4d", // Green
            Verdict::LikelyRejected => "#9b2c2c", // Red
        }
    }
}
