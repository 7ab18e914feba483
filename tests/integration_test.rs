//! Integration tests for the CreditWise prediction pipeline
//!
//! Exercises the library surface end-to-end over the shipped artifact
//! exports in `artifacts/`.

use std::path::Path;

use creditwise::{
    build_feature_row, Artifacts, EducationLevel, EmploymentStatus, FeatureDefaults, Gender,
    LoanPurpose, Predictor, PropertyArea, RawInputs, Verdict,
};

fn baseline_inputs() -> RawInputs {
    RawInputs {
        applicant_income: 10548.0,
        loan_amount: 21210.5,
        loan_term: 48.0,
        credit_score: 678.0,
        dti_ratio: 0.34,
        education_level: EducationLevel::Graduate,
        employment_status: EmploymentStatus::Salaried,
        loan_purpose: LoanPurpose::Home,
        property_area: PropertyArea::Urban,
        gender: Gender::Male,
    }
}

fn shipped_artifacts() -> Artifacts {
    Artifacts::load(Path::new("artifacts")).expect("shipped artifacts must load")
}

#[test]
fn test_shipped_artifacts_agree_on_dimensions() {
    let artifacts = shipped_artifacts();
    let n = artifacts.schema.len();
    assert!(n > 0);
    assert_eq!(artifacts.model.n_features(), n);
    assert_eq!(artifacts.scaler.n_features(), n);
}

#[test]
fn test_feature_row_aligns_to_shipped_schema() {
    let artifacts = shipped_artifacts();
    let row = build_feature_row(
        &baseline_inputs(),
        &FeatureDefaults::default(),
        &artifacts.schema,
    );

    assert_eq!(row.len(), artifacts.schema.len());

    let at = |name: &str| row.values()[artifacts.schema.position(name).expect(name)];
    assert!((at("Applicant_Income") - 10548.0).abs() < 1e-9);
    assert!((at("Loan_Amount") - 21210.5).abs() < 1e-9);
    assert_eq!(at("Education_Level"), 1.0);
    assert_eq!(at("Employment_Status_Salaried"), 1.0);
    assert_eq!(at("Loan_Purpose_Home"), 1.0);
    assert_eq!(at("Property_Area_Urban"), 1.0);
    assert_eq!(at("Gender_Male"), 1.0);
    assert!((at("DTI_Ratio_sq") - 0.1156).abs() < 1e-12);
    assert!((at("Credit_Score_sq") - 459_684.0).abs() < 1e-9);
    assert!((at("Applicant_Income_Log") - 10548.0f64.ln_1p()).abs() < 1e-9);
}

#[test]
fn test_end_to_end_prediction() {
    let artifacts = shipped_artifacts();
    let predictor = Predictor::new(&artifacts);

    let prediction = predictor.predict(&baseline_inputs()).unwrap();
    assert!(prediction.probability > 0.0 && prediction.probability < 1.0);
    assert_eq!(prediction.approved, prediction.probability >= 0.5);
    let expected = if prediction.approved {
        Verdict::LikelyApproved
    } else {
        Verdict::LikelyRejected
    };
    assert_eq!(prediction.verdict, expected);

    // Every one-hot candidate of the baseline inputs exists in the
    // shipped schema, so nothing is reported as unmatched.
    assert!(prediction.unmatched_categories.is_empty());
}

#[test]
fn test_reference_categories_are_reported_unmatched() {
    let artifacts = shipped_artifacts();
    let predictor = Predictor::new(&artifacts);

    // Contract / Personal / Rural / Female are the dropped reference
    // categories of the shipped schema: no column carries them.
    let mut inputs = baseline_inputs();
    inputs.employment_status = EmploymentStatus::Contract;
    inputs.loan_purpose = LoanPurpose::Personal;
    inputs.property_area = PropertyArea::Rural;
    inputs.gender = Gender::Female;

    let prediction = predictor.predict(&inputs).unwrap();
    let unmatched = &prediction.unmatched_categories;
    assert!(unmatched.contains(&"Employment_Status_Contract".to_string()));
    assert!(unmatched.contains(&"Loan_Purpose_Personal".to_string()));
    assert!(unmatched.contains(&"Property_Area_Rural".to_string()));
    assert!(unmatched.contains(&"Gender_Female".to_string()));
}

#[test]
fn test_probability_moves_with_credit_quality() {
    // The shipped model rewards credit score and penalizes DTI, so a
    // strong applicant must not score below a weak one.
    let artifacts = shipped_artifacts();
    let predictor = Predictor::new(&artifacts);

    let mut strong = baseline_inputs();
    strong.credit_score = 860.0;
    strong.dti_ratio = 0.05;

    let mut weak = baseline_inputs();
    weak.credit_score = 320.0;
    weak.dti_ratio = 1.1;

    let p_strong = predictor.predict(&strong).unwrap().probability;
    let p_weak = predictor.predict(&weak).unwrap().probability;
    assert!(
        p_strong > p_weak,
        "strong applicant scored {:.4}, weak scored {:.4}",
        p_strong,
        p_weak
    );
}

#[test]
fn test_out_of_range_inputs_are_rejected_before_prediction() {
    let mut inputs = baseline_inputs();
    inputs.credit_score = 9999.0;

    let err = inputs.validate().unwrap_err();
    assert_eq!(err.code_str(), "API_BAD_REQUEST");

    let mut inputs = baseline_inputs();
    inputs.loan_amount = 10.0;
    assert!(inputs.validate().is_err());
}

#[test]
fn test_raw_inputs_deserialize_from_form_payload() {
    // The exact JSON the form page posts
    let payload = r#"{
        "applicant_income": 10548.0,
        "loan_amount": 21210.5,
        "loan_term": 48,
        "credit_score": 678,
        "dti_ratio": 0.34,
        "education_level": "Graduate",
        "employment_status": "Self-employed",
        "loan_purpose": "Home",
        "property_area": "Urban",
        "gender": "Male"
    }"#;

    let inputs: RawInputs = serde_json::from_str(payload).unwrap();
    assert_eq!(inputs.employment_status, EmploymentStatus::SelfEmployed);
    assert!(inputs.validate().is_ok());
}
