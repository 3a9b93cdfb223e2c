//! Registration wizard domain types.
//!
//! The wizard collects one field per turn, in fixed order, and submits the
//! accumulated draft as a single backend call on the final step. No step can
//! be skipped or revisited.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShambaError};

/// One step of the registration wizard, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegStep {
    Name,
    Phone,
    Age,
    Gender,
    IdDocument,
    Crop,
    LandSize,
}

impl RegStep {
    /// The first step of the wizard.
    pub fn first() -> Self {
        Self::Name
    }

    /// The step that follows this one, or `None` after the final step.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Name => Some(Self::Phone),
            Self::Phone => Some(Self::Age),
            Self::Age => Some(Self::Gender),
            Self::Gender => Some(Self::IdDocument),
            Self::IdDocument => Some(Self::Crop),
            Self::Crop => Some(Self::LandSize),
            Self::LandSize => None,
        }
    }

    /// The prompt shown to the user when this step becomes current.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Name => "To register, enter your **Full Name**.",
            Self::Phone => "Enter your **Phone Number** (e.g., +27 72 XXX XXXXX).",
            Self::Age => "Enter your **Age** (e.g., 35).",
            Self::Gender => "What is your **Gender**?",
            Self::IdDocument => "Enter your **ID Document** number.",
            Self::Crop => "Which **Crop** will you grow? (e.g., Maize).",
            Self::LandSize => "What's your **Land Size** in hectares (e.g., 2.5)?",
        }
    }
}

/// Partially collected registration form.
///
/// Fields fill in left-to-right as the wizard advances; a draft is only ever
/// submitted once every field is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub id_document: Option<String>,
    pub crop: Option<String>,
    pub land_size: Option<f64>,
}

/// The registration payload submitted to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub phone: String,
    pub age: u32,
    pub gender: String,
    pub id_document: String,
    pub crop: String,
    pub land_size: f64,
}

impl RegistrationDraft {
    /// Records the answer for one wizard step.
    ///
    /// Free-text fields are stored as given. Numeric fields (age, land size)
    /// must parse; a parse failure leaves the draft untouched so the caller
    /// can re-prompt the same step.
    pub fn record(&mut self, step: RegStep, answer: &str) -> Result<()> {
        let answer = answer.trim();
        match step {
            RegStep::Name => self.name = Some(answer.to_string()),
            RegStep::Phone => self.phone = Some(answer.to_string()),
            RegStep::Age => {
                let age = answer.parse::<u32>().map_err(|_| {
                    ShambaError::invalid_input("Please enter a whole number for **Age**.")
                })?;
                self.age = Some(age);
            }
            RegStep::Gender => self.gender = Some(answer.to_string()),
            RegStep::IdDocument => self.id_document = Some(answer.to_string()),
            RegStep::Crop => self.crop = Some(answer.to_string()),
            RegStep::LandSize => {
                let land_size = answer.parse::<f64>().map_err(|_| {
                    ShambaError::invalid_input("Please enter a number for **Land Size**.")
                })?;
                self.land_size = Some(land_size);
            }
        }
        Ok(())
    }

    /// Assembles the submission payload once every step has been answered.
    ///
    /// # Errors
    ///
    /// Returns an internal error if any field is still missing; the wizard
    /// only finalizes after the last step, so this indicates a controller bug.
    pub fn finalize(self) -> Result<RegistrationRequest> {
        let missing = || ShambaError::internal("registration draft finalized before completion");
        Ok(RegistrationRequest {
            name: self.name.ok_or_else(missing)?,
            phone: self.phone.ok_or_else(missing)?,
            age: self.age.ok_or_else(missing)?,
            gender: self.gender.ok_or_else(missing)?,
            id_document: self.id_document.ok_or_else(missing)?,
            crop: self.crop.ok_or_else(missing)?,
            land_size: self.land_size.ok_or_else(missing)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_advance_in_fixed_order() {
        let order = [
            RegStep::Name,
            RegStep::Phone,
            RegStep::Age,
            RegStep::Gender,
            RegStep::IdDocument,
            RegStep::Crop,
            RegStep::LandSize,
        ];
        let mut step = Some(RegStep::first());
        for expected in order {
            assert_eq!(step, Some(expected));
            step = step.unwrap().next();
        }
        assert_eq!(step, None);
    }

    #[test]
    fn test_record_parses_numeric_fields() {
        let mut draft = RegistrationDraft::default();
        draft.record(RegStep::Age, "34").unwrap();
        draft.record(RegStep::LandSize, "2.5").unwrap();
        assert_eq!(draft.age, Some(34));
        assert_eq!(draft.land_size, Some(2.5));
    }

    #[test]
    fn test_record_rejects_malformed_numbers_and_keeps_draft() {
        let mut draft = RegistrationDraft::default();
        let err = draft.record(RegStep::Age, "thirty-four").unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(draft.age, None);

        assert!(draft.record(RegStep::LandSize, "lots").is_err());
        assert_eq!(draft.land_size, None);
    }

    #[test]
    fn test_finalize_requires_every_field() {
        let mut draft = RegistrationDraft::default();
        draft.record(RegStep::Name, "Jane Doe").unwrap();
        assert!(draft.clone().finalize().is_err());

        draft.record(RegStep::Phone, "+255700000000").unwrap();
        draft.record(RegStep::Age, "34").unwrap();
        draft.record(RegStep::Gender, "Female").unwrap();
        draft.record(RegStep::IdDocument, "ID123").unwrap();
        draft.record(RegStep::Crop, "Maize").unwrap();
        draft.record(RegStep::LandSize, "2.5").unwrap();

        let request = draft.finalize().unwrap();
        assert_eq!(request.name, "Jane Doe");
        assert_eq!(request.age, 34);
        assert_eq!(request.land_size, 2.5);
    }

    #[test]
    fn test_request_wire_field_names() {
        let request = RegistrationRequest {
            name: "Jane Doe".to_string(),
            phone: "+255700000000".to_string(),
            age: 34,
            gender: "Female".to_string(),
            id_document: "ID123".to_string(),
            crop: "Maize".to_string(),
            land_size: 2.5,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["id_document"], "ID123");
        assert_eq!(json["land_size"], 2.5);
    }
}
