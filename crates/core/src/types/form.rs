//! Add-pet form input and its validation rules.
//!
//! The form holds raw text exactly as typed. [`PetForm::validate`] checks
//! every field and reports one message per failing field, so a front end can
//! show all problems at once. Parsing into numeric types happens separately
//! (see [`PetForm::parse_age`] and [`PetForm::parse_price`]) because the
//! submission workflow parses at commit time.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::price::Price;

/// Minimum length of the name and breed fields, in characters.
pub const MIN_TEXT_LENGTH: usize = 2;

/// Maximum length of the name and breed fields, in characters.
pub const MAX_TEXT_LENGTH: usize = 50;

/// Oldest accepted age, in years.
pub const MAX_AGE: u8 = 30;

/// A field of the add-pet form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    PetName,
    Breed,
    Age,
    Price,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [Self; 4] = [Self::PetName, Self::Breed, Self::Age, Self::Price];

    /// The JSON key used for this field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::PetName => "petName",
            Self::Breed => "breed",
            Self::Age => "age",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PetName => "Pet name",
            Self::Breed => "Breed",
            Self::Age => "Age",
            Self::Price => "Price",
        })
    }
}

/// Why a single form field was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PetFormError {
    #[error("{field} is required")]
    Required { field: FormField },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: FormField, min: usize },

    #[error("{field} must be less than {max} characters")]
    TooLong { field: FormField, max: usize },

    #[error("{field} must be a number")]
    NotANumber { field: FormField },

    #[error("{field} must be a whole number")]
    NotWhole { field: FormField },

    #[error("{field} must be a positive number")]
    NotPositive { field: FormField },

    #[error("{field} must be at least {min}")]
    BelowMinimum { field: FormField, min: &'static str },

    #[error("{field} must be less than {max}")]
    AboveMaximum { field: FormField, max: &'static str },
}

impl PetFormError {
    /// The field this error belongs to.
    #[must_use]
    pub const fn field(&self) -> FormField {
        match self {
            Self::Required { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::NotANumber { field }
            | Self::NotWhole { field }
            | Self::NotPositive { field }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. } => *field,
        }
    }
}

/// Every field error found in one validation pass.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<PetFormError>);

fn join_messages(errors: &[PetFormError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// The error reported for `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: FormField) -> Option<&PetFormError> {
        self.0.iter().find(|e| e.field() == field)
    }

    /// Iterate over the errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = &PetFormError> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw add-pet form values, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetForm {
    pub pet_name: String,
    pub breed: String,
    pub age: String,
    pub price: String,
}

impl PetForm {
    /// Build a form from the four raw field values.
    #[must_use]
    pub fn new(
        pet_name: impl Into<String>,
        breed: impl Into<String>,
        age: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            pet_name: pet_name.into(),
            breed: breed.into(),
            age: age.into(),
            price: price.into(),
        }
    }

    /// Clear every field back to its initial empty value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check all fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` holding the first failing rule of each
    /// invalid field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors: Vec<PetFormError> = [
            validate_text(FormField::PetName, &self.pet_name).err(),
            validate_text(FormField::Breed, &self.breed).err(),
            self.parse_age().err(),
            self.parse_price().err(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Parse and range-check the age field.
    ///
    /// # Errors
    ///
    /// Returns the first rule the age violates.
    pub fn parse_age(&self) -> Result<u8, PetFormError> {
        const FIELD: FormField = FormField::Age;

        let raw = required(FIELD, &self.age)?;
        let value: Decimal = raw.parse().map_err(|_| PetFormError::NotANumber { field: FIELD })?;

        if value <= Decimal::ZERO {
            return Err(PetFormError::NotPositive { field: FIELD });
        }
        if !value.fract().is_zero() {
            return Err(PetFormError::NotWhole { field: FIELD });
        }
        if value > Decimal::from(MAX_AGE) {
            return Err(PetFormError::AboveMaximum {
                field: FIELD,
                max: "30 years",
            });
        }

        value
            .to_u8()
            .ok_or(PetFormError::NotANumber { field: FIELD })
    }

    /// Parse and range-check the price field.
    ///
    /// # Errors
    ///
    /// Returns the first rule the price violates.
    pub fn parse_price(&self) -> Result<Price, PetFormError> {
        const FIELD: FormField = FormField::Price;

        let raw = required(FIELD, &self.price)?;
        let price: Price = raw
            .parse()
            .map_err(|_| PetFormError::NotANumber { field: FIELD })?;

        if price.amount() <= Decimal::ZERO {
            return Err(PetFormError::NotPositive { field: FIELD });
        }
        if price.amount() < Price::MIN {
            return Err(PetFormError::BelowMinimum { field: FIELD, min: "1" });
        }
        if price.amount() > Price::MAX {
            return Err(PetFormError::AboveMaximum {
                field: FIELD,
                max: "1,000,000",
            });
        }

        Ok(price)
    }
}

fn required(field: FormField, raw: &str) -> Result<&str, PetFormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(PetFormError::Required { field })
    } else {
        Ok(trimmed)
    }
}

fn validate_text(field: FormField, raw: &str) -> Result<(), PetFormError> {
    let len = required(field, raw)?.chars().count();
    if len < MIN_TEXT_LENGTH {
        return Err(PetFormError::TooShort {
            field,
            min: MIN_TEXT_LENGTH,
        });
    }
    if len > MAX_TEXT_LENGTH {
        return Err(PetFormError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(())
}
