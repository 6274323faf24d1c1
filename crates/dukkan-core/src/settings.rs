//! # Settings
//!
//! Business details printed on every document, plus theme and language.
//! Stored as one JSON record.
//!
//! Records written by older versions may lack fields; each missing field
//! loads with its neutral default (a missing `tax` is 0, not NaN).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::TaxRate;
use crate::validation::{validate_tax_percent, ValidationResult};
use crate::DEFAULT_TAX_PERCENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    /// Text direction for rendered documents.
    pub fn dir(&self) -> &'static str {
        match self {
            Language::Ar => "rtl",
            Language::En => "ltr",
        }
    }
}

/// Shop identity printed on invoices and statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct BusinessInfo {
    pub name: String,
    /// Image URL or data URI.
    pub logo: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Tax percentage, 0..=100.
    pub tax: f64,
}

impl Default for BusinessInfo {
    /// Neutral values used when a stored record lacks a field.
    fn default() -> Self {
        BusinessInfo {
            name: String::new(),
            logo: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            tax: 0.0,
        }
    }
}

impl BusinessInfo {
    /// What a fresh install shows until the owner fills in the form.
    pub fn placeholder() -> Self {
        BusinessInfo {
            name: "اسم المتجر".to_string(),
            logo: String::new(),
            address: "عنوان المتجر".to_string(),
            phone: "رقم الهاتف".to_string(),
            email: "البريد الإلكتروني".to_string(),
            tax: DEFAULT_TAX_PERCENT,
        }
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_percentage(self.tax)
    }
}

/// Partial update of [`BusinessInfo`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BusinessInfoPatch {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax: Option<f64>,
}

impl BusinessInfoPatch {
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(tax) = self.tax {
            validate_tax_percent(tax)?;
        }
        Ok(())
    }

    /// Merges into `info`.
    pub fn apply(self, info: &mut BusinessInfo) -> ValidationResult<()> {
        self.validate()?;
        if let Some(v) = self.name {
            info.name = v;
        }
        if let Some(v) = self.logo {
            info.logo = v;
        }
        if let Some(v) = self.address {
            info.address = v;
        }
        if let Some(v) = self.phone {
            info.phone = v;
        }
        if let Some(v) = self.email {
            info.email = v;
        }
        if let Some(v) = self.tax {
            info.tax = v;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.logo.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.tax.is_none()
    }
}

/// The settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub business_info: BusinessInfo,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            theme: Theme::Light,
            language: Language::Ar,
            business_info: BusinessInfo::placeholder(),
        }
    }
}
