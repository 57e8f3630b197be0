//! Field-level validation for form input.
//!
//! Every validator is a pure function returning pass/fail plus a
//! human-readable message. Form code collects failures into a
//! [`FieldErrors`] map keyed by field name; submission proceeds only when
//! the map is empty. Validation errors never reach the network.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Outcome of a single field check.
pub type FieldResult = Result<(), String>;

/// Mapping from field name to validation message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a field check under `field`.
    pub fn check(&mut self, field: &str, result: FieldResult) {
        if let Err(msg) = result {
            self.errors.insert(field.to_string(), msg);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {msg}")?;
            first = false;
        }
        Ok(())
    }
}

/// Required text: fails when the string is empty after trimming.
pub fn required_text(label: &str, value: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err(format!("{label} cannot be empty"));
    }
    Ok(())
}

/// Email shape: `local@domain.tld`. A non-empty run without whitespace or
/// `@`, an `@`, another such run, a dot, another such run.
pub fn email(value: &str) -> FieldResult {
    fn run(s: &str) -> bool {
        !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '@')
    }

    let ok = value
        .split_once('@')
        .and_then(|(local, domain)| Some((local, domain.rsplit_once('.')?)))
        .is_some_and(|(local, (host, tld))| run(local) && run(host) && run(tld));

    if ok { Ok(()) } else { Err("invalid email format".to_string()) }
}

/// Phone: national number must be all digits; the concatenation of country
/// prefix and national number must have total length in [9, 15].
pub fn phone(prefix: &str, number: &str) -> FieldResult {
    if number.trim().is_empty() {
        return Err("phone number cannot be empty".to_string());
    }
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err("phone number must contain digits only".to_string());
    }
    let total = prefix.chars().count() + number.chars().count();
    if !(9..=15).contains(&total) {
        return Err("phone number has invalid length".to_string());
    }
    Ok(())
}

/// Rejects calendar dates strictly later than `today`.
///
/// `today` is passed in explicitly so callers (and tests) control the clock.
pub fn date_not_future(date: NaiveDate, today: NaiveDate) -> FieldResult {
    if date > today {
        return Err("date cannot be in the future".to_string());
    }
    Ok(())
}
