//! Checkout form and its validation.

use serde::{Deserialize, Serialize};

/// A problem with one checkout form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Customer, shipping and card details collected at checkout.
///
/// Every field is required. The card is never charged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub card_number: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
}

impl CheckoutForm {
    /// Field names paired with their current values, in form order.
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        [
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("zip_code", self.zip_code.as_str()),
            ("card_number", self.card_number.as_str()),
            ("expiry_date", self.expiry_date.as_str()),
            ("cvv", self.cvv.as_str()),
        ]
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Collect every problem with the form. Empty means submittable.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors: Vec<FieldError> = self
            .fields()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| FieldError::new(field, "is required"))
            .collect();

        let missing = |field: &str| errors.iter().any(|e| e.field == field);
        let mut invalid = Vec::new();

        if !missing("email") && !is_valid_email(&self.email) {
            invalid.push(FieldError::new("email", "must be a valid email address"));
        }
        if !missing("card_number") {
            let digits = self.card_digits();
            if !(12..=19).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
                invalid.push(FieldError::new("card_number", "must be 12-19 digits"));
            }
        }
        if !missing("expiry_date") && !is_valid_expiry(self.expiry_date.trim()) {
            invalid.push(FieldError::new("expiry_date", "must be MM/YY"));
        }
        if !missing("cvv") {
            let cvv = self.cvv.trim();
            if !(3..=4).contains(&cvv.len()) || !cvv.bytes().all(|b| b.is_ascii_digit()) {
                invalid.push(FieldError::new("cvv", "must be 3 or 4 digits"));
            }
        }

        errors.extend(invalid);
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Card number with spaces and dashes removed.
    pub fn card_digits(&self) -> String {
        self.card_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect()
    }

    /// Card number showing only the last four digits.
    pub fn masked_card(&self) -> String {
        let digits = self.card_digits();
        let last4: String = digits
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("**** **** **** {last4}")
    }
}

fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

fn is_valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    let digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(month) || !digits(year) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}
