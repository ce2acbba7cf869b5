use std::collections::BTreeMap;

use serde::Serialize;

use super::ProfileError;

pub const AGE_MIN: u32 = 18;
pub const AGE_MAX: u32 = 100;
pub const LIQUIDITY_MIN: f64 = 0.0;
pub const LIQUIDITY_MAX: f64 = 100.0;
pub const DEPENDENTS_MAX: u32 = 10;
pub const EXPERIENCE_MAX: u32 = 40;

/// Financial situation collected in the first questionnaire step.
///
/// Instances are built from wizard values that already passed field
/// validation; the constructor re-checks bounds so the invariants hold no
/// matter where the value map came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicProfile {
    pub age: u32,
    pub income: f64,
    pub capital: f64,
    pub expenses: f64,
    pub emi: f64,
    pub liquidity: f64,
    pub dependents: u32,
    pub experience: u32,
}

impl BasicProfile {
    pub fn from_values(values: &BTreeMap<String, String>) -> Result<Self, ProfileError> {
        let age = parse_u32(values, "age")?;
        if !(AGE_MIN..=AGE_MAX).contains(&age) {
            return Err(ProfileError::invalid(
                "age",
                format!("must be between {} and {}", AGE_MIN, AGE_MAX),
            ));
        }

        let income = parse_non_negative(values, "income")?;
        let capital = parse_non_negative(values, "capital")?;
        let expenses = parse_non_negative(values, "expenses")?;
        let emi = parse_non_negative(values, "emi")?;

        let liquidity = parse_f64(values, "liquidity")?;
        if !(LIQUIDITY_MIN..=LIQUIDITY_MAX).contains(&liquidity) {
            return Err(ProfileError::invalid(
                "liquidity",
                format!("must be between {} and {}", LIQUIDITY_MIN, LIQUIDITY_MAX),
            ));
        }

        let dependents = parse_u32(values, "dependents")?;
        if dependents > DEPENDENTS_MAX {
            return Err(ProfileError::invalid(
                "dependents",
                format!("cannot exceed {}", DEPENDENTS_MAX),
            ));
        }

        let experience = parse_u32(values, "experience")?;
        if experience > EXPERIENCE_MAX {
            return Err(ProfileError::invalid(
                "experience",
                format!("cannot exceed {}", EXPERIENCE_MAX),
            ));
        }

        Ok(Self {
            age,
            income,
            capital,
            expenses,
            emi,
            liquidity,
            dependents,
            experience,
        })
    }
}

fn raw<'a>(
    values: &'a BTreeMap<String, String>,
    field: &'static str,
) -> Result<&'a str, ProfileError> {
    values
        .get(field)
        .map(|value| value.as_str())
        .ok_or(ProfileError::Missing(field))
}

fn parse_u32(values: &BTreeMap<String, String>, field: &'static str) -> Result<u32, ProfileError> {
    raw(values, field)?
        .trim()
        .parse::<u32>()
        .map_err(|_| ProfileError::invalid(field, "expected a whole number"))
}

fn parse_f64(values: &BTreeMap<String, String>, field: &'static str) -> Result<f64, ProfileError> {
    raw(values, field)?
        .trim()
        .parse::<f64>()
        .map_err(|_| ProfileError::invalid(field, "expected a numeric value"))
}

fn parse_non_negative(
    values: &BTreeMap<String, String>,
    field: &'static str,
) -> Result<f64, ProfileError> {
    let value = parse_f64(values, field)?;
    if value < 0.0 {
        Err(ProfileError::invalid(field, "must be zero or positive"))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_values() -> BTreeMap<String, String> {
        let pairs = [
            ("age", "45"),
            ("income", "240000"),
            ("capital", "100000"),
            ("expenses", "100000"),
            ("emi", "80000"),
            ("liquidity", "0"),
            ("dependents", "4"),
            ("experience", "0"),
        ];
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn builds_from_complete_values() {
        let profile = BasicProfile::from_values(&valid_values()).unwrap();
        assert_eq!(profile.age, 45);
        assert_eq!(profile.income, 240_000.0);
        assert_eq!(profile.dependents, 4);
    }

    #[test]
    fn missing_field_is_reported() {
        let mut values = valid_values();
        values.remove("income");
        assert_eq!(
            BasicProfile::from_values(&values),
            Err(ProfileError::Missing("income"))
        );
    }

    #[test]
    fn age_bounds_are_enforced() {
        for (raw, ok) in [("17", false), ("18", true), ("100", true), ("101", false)] {
            let mut values = valid_values();
            values.insert("age".into(), raw.into());
            assert_eq!(BasicProfile::from_values(&values).is_ok(), ok, "age {raw}");
        }
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut values = valid_values();
        values.insert("emi".into(), "-1".into());
        assert!(matches!(
            BasicProfile::from_values(&values),
            Err(ProfileError::Invalid { field: "emi", .. })
        ));
    }

    #[test]
    fn dependents_and_experience_caps() {
        let mut values = valid_values();
        values.insert("dependents".into(), "11".into());
        assert!(BasicProfile::from_values(&values).is_err());

        let mut values = valid_values();
        values.insert("experience".into(), "41".into());
        assert!(BasicProfile::from_values(&values).is_err());

        let mut values = valid_values();
        values.insert("experience".into(), "40".into());
        assert!(BasicProfile::from_values(&values).is_ok());
    }
}
