use serde::{Deserialize, Serialize};

use super::categories::{City, CompanySize, EducationLevel, JobTitle};
use super::FormError;

/// Job attributes sent to the prediction service.
///
/// Serializes to exactly the wire body `POST /api/predict` expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub years_experience: f64,
    pub education_level: EducationLevel,
    pub job_title: JobTitle,
    pub city: City,
    pub company_size: CompanySize,
    pub skills_python: i64,
    pub skills_java: i64,
    pub skills_aws: i64,
    pub skills_sql: i64,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            years_experience: 3.0,
            education_level: EducationLevel::Bachelor,
            job_title: JobTitle::DataScientist,
            city: City::Bengaluru,
            company_size: CompanySize::Medium,
            skills_python: 1,
            skills_java: 0,
            skills_aws: 1,
            skills_sql: 1,
        }
    }
}

/// Skill flag fields, in form order.
pub const SKILL_FIELDS: &[&str] = &["skills_python", "skills_java", "skills_aws", "skills_sql"];

/// Every editable field, in form order.
pub const FORM_FIELDS: &[&str] = &[
    "years_experience",
    "education_level",
    "job_title",
    "city",
    "company_size",
    "skills_python",
    "skills_java",
    "skills_aws",
    "skills_sql",
];

/// A single user edit: a field name and what was entered into it.
///
/// JSON callers may send numbers or booleans; they are turned back into the
/// text a form input would have produced.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldEdit {
    pub field: String,
    pub value: serde_json::Value,
}

impl FieldEdit {
    pub fn raw(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl PredictionRequest {
    /// Applies one raw edit in place.
    ///
    /// Skill flags never fail: whatever was typed is coerced to an integer.
    /// The other fields reject text they cannot represent and keep their
    /// previous value.
    pub fn apply_edit(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field {
            "years_experience" => {
                self.years_experience = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| FormError::NotNumeric {
                        field: "years_experience",
                        value: raw.to_string(),
                    })?;
            }
            "education_level" => self.education_level = raw.parse()?,
            "job_title" => self.job_title = raw.parse()?,
            "city" => self.city = raw.parse()?,
            "company_size" => self.company_size = raw.parse()?,
            "skills_python" => self.skills_python = coerce_skill_flag(raw),
            "skills_java" => self.skills_java = coerce_skill_flag(raw),
            "skills_aws" => self.skills_aws = coerce_skill_flag(raw),
            "skills_sql" => self.skills_sql = coerce_skill_flag(raw),
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    pub fn skill(&self, field: &str) -> Option<i64> {
        match field {
            "skills_python" => Some(self.skills_python),
            "skills_java" => Some(self.skills_java),
            "skills_aws" => Some(self.skills_aws),
            "skills_sql" => Some(self.skills_sql),
            _ => None,
        }
    }
}

/// Coerces typed text to an integer flag.
///
/// Empty or non-numeric text becomes 0; fractional input truncates toward zero.
/// The value is not clamped to {0, 1}; range checks belong to the service.
pub fn coerce_skill_flag(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return v;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_matches_initial_form() {
        let req = PredictionRequest::default();
        assert_eq!(req.years_experience, 3.0);
        assert_eq!(req.education_level, EducationLevel::Bachelor);
        assert_eq!(req.job_title, JobTitle::DataScientist);
        assert_eq!(req.city, City::Bengaluru);
        assert_eq!(req.company_size, CompanySize::Medium);
        assert_eq!(
            (req.skills_python, req.skills_java, req.skills_aws, req.skills_sql),
            (1, 0, 1, 1)
        );
    }

    #[test]
    fn test_serializes_wire_body() {
        let body = serde_json::to_value(PredictionRequest::default()).unwrap();
        assert_eq!(
            body,
            json!({
                "years_experience": 3.0,
                "education_level": "Bachelor",
                "job_title": "Data Scientist",
                "city": "Bengaluru",
                "company_size": "Medium",
                "skills_python": 1,
                "skills_java": 0,
                "skills_aws": 1,
                "skills_sql": 1
            })
        );
    }

    #[test]
    fn test_skill_flags_serialize_as_integers() {
        let mut req = PredictionRequest::default();
        req.apply_edit("skills_java", "1.0").unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert!(body["skills_java"].is_i64());
        assert_eq!(body["skills_java"], json!(1));
    }

    #[test]
    fn test_coerce_skill_flag() {
        assert_eq!(coerce_skill_flag("1"), 1);
        assert_eq!(coerce_skill_flag(" 0 "), 0);
        assert_eq!(coerce_skill_flag("0.9"), 0);
        assert_eq!(coerce_skill_flag("1.7"), 1);
        assert_eq!(coerce_skill_flag(""), 0);
        assert_eq!(coerce_skill_flag("yes"), 0);
        assert_eq!(coerce_skill_flag("NaN"), 0);
        assert_eq!(coerce_skill_flag("2"), 2);
        assert_eq!(coerce_skill_flag("-1"), -1);
    }

    #[test]
    fn test_apply_edit_updates_fields() {
        let mut req = PredictionRequest::default();
        req.apply_edit("years_experience", "7.5").unwrap();
        req.apply_edit("city", "Pune").unwrap();
        req.apply_edit("job_title", "Software Developer").unwrap();
        req.apply_edit("skills_sql", "0").unwrap();
        assert_eq!(req.years_experience, 7.5);
        assert_eq!(req.city, City::Pune);
        assert_eq!(req.job_title, JobTitle::SoftwareDeveloper);
        assert_eq!(req.skills_sql, 0);
    }

    #[test]
    fn test_apply_edit_does_not_bound_years() {
        let mut req = PredictionRequest::default();
        req.apply_edit("years_experience", "75").unwrap();
        assert_eq!(req.years_experience, 75.0);
    }

    #[test]
    fn test_apply_edit_rejects_non_numeric_years_and_keeps_value() {
        let mut req = PredictionRequest::default();
        let err = req.apply_edit("years_experience", "ten").unwrap_err();
        assert!(matches!(err, FormError::NotNumeric { .. }));
        assert_eq!(req.years_experience, 3.0);
    }

    #[test]
    fn test_apply_edit_rejects_category_outside_set() {
        let mut req = PredictionRequest::default();
        assert!(req.apply_edit("company_size", "Huge").is_err());
        assert_eq!(req.company_size, CompanySize::Medium);
    }

    #[test]
    fn test_apply_edit_rejects_unknown_field() {
        let mut req = PredictionRequest::default();
        let err = req.apply_edit("salary", "1").unwrap_err();
        assert!(matches!(err, FormError::UnknownField(f) if f == "salary"));
    }

    #[test]
    fn test_field_edit_raw_from_json_values() {
        let edit: FieldEdit = serde_json::from_value(json!({"field": "skills_aws", "value": 0})).unwrap();
        assert_eq!(edit.raw(), "0");
        let edit: FieldEdit = serde_json::from_value(json!({"field": "skills_aws", "value": true})).unwrap();
        assert_eq!(edit.raw(), "1");
        let edit: FieldEdit = serde_json::from_value(json!({"field": "city", "value": "Chennai"})).unwrap();
        assert_eq!(edit.raw(), "Chennai");
        let edit: FieldEdit = serde_json::from_value(json!({"field": "years_experience", "value": 4.5})).unwrap();
        assert_eq!(edit.raw(), "4.5");
    }

    #[test]
    fn test_skill_lookup() {
        let req = PredictionRequest::default();
        let flags: Vec<i64> = SKILL_FIELDS.iter().filter_map(|f| req.skill(f)).collect();
        assert_eq!(flags, vec![1, 0, 1, 1]);
        assert_eq!(req.skill("city"), None);
    }
}
