use core::str::FromStr;

use serde::{Deserialize, Serialize};

use nadzor_core::{BodyId, DomainError, FieldErrors, validate};

/// Jurisdiction region of an inspection body.
///
/// Closed set: unrecognized wire values are rejected at the serde boundary
/// rather than passed through silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "FBIH")]
    Fbih,
    #[serde(rename = "RS")]
    Rs,
    #[serde(rename = "DISTRIKT_BRCKO")]
    DistriktBrcko,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 3] =
        [Jurisdiction::Fbih, Jurisdiction::Rs, Jurisdiction::DistriktBrcko];

    /// Name used on the wire (path segments and query values).
    pub fn wire_name(&self) -> &'static str {
        match self {
            Jurisdiction::Fbih => "FBIH",
            Jurisdiction::Rs => "RS",
            Jurisdiction::DistriktBrcko => "DISTRIKT_BRCKO",
        }
    }

    /// Human-readable label for tables and reports.
    pub fn display_label(&self) -> &'static str {
        match self {
            Jurisdiction::Fbih => "Federacija Bosne i Hercegovine",
            Jurisdiction::Rs => "Republika Srpska",
            Jurisdiction::DistriktBrcko => "Brčko Distrikt BiH",
        }
    }
}

impl FromStr for Jurisdiction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|j| j.wire_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("unknown jurisdiction: {s}")))
    }
}

impl core::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Competency classification of an inspection body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competency {
    #[serde(rename = "TRZISNA_INSPEKCIJA")]
    TrzisnaInspekcija,
    #[serde(rename = "ZDRAVSTVENO_SANITARNA_INSPEKCIJA")]
    ZdravstvenoSanitarnaInspekcija,
}

impl Competency {
    pub const ALL: [Competency; 2] = [
        Competency::TrzisnaInspekcija,
        Competency::ZdravstvenoSanitarnaInspekcija,
    ];

    /// Name used on the wire (path segments and query values).
    pub fn wire_name(&self) -> &'static str {
        match self {
            Competency::TrzisnaInspekcija => "TRZISNA_INSPEKCIJA",
            Competency::ZdravstvenoSanitarnaInspekcija => "ZDRAVSTVENO_SANITARNA_INSPEKCIJA",
        }
    }

    /// Human-readable label for tables and reports.
    pub fn display_label(&self) -> &'static str {
        match self {
            Competency::TrzisnaInspekcija => "Tržišna inspekcija",
            Competency::ZdravstvenoSanitarnaInspekcija => "Zdravstveno-sanitarna inspekcija",
        }
    }
}

impl FromStr for Competency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.wire_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("unknown competency: {s}")))
    }
}

impl core::fmt::Display for Competency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Contact person embedded in an inspection body.
///
/// Phone is stored as a single string: country prefix concatenated with the
/// national digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPerson {
    #[serde(rename = "ime")]
    pub first_name: String,
    #[serde(rename = "prezime")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "brojTelefona")]
    pub phone: String,
}

impl ContactPerson {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Inspection body record as exchanged with the backend.
///
/// Invariant: every body has exactly one contact person. The id is assigned
/// by the backend and absent on drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<BodyId>,
    #[serde(rename = "nazivInspekcijskogTijela")]
    pub name: String,
    #[serde(rename = "inspektorat")]
    pub jurisdiction: Jurisdiction,
    #[serde(rename = "nadleznosti")]
    pub competency: Competency,
    #[serde(rename = "kontaktOsoba")]
    pub contact: ContactPerson,
}

/// Form input for creating or editing an inspection body.
///
/// The phone number arrives as a country prefix plus national digits; the
/// two are concatenated into the stored phone string only after validation.
#[derive(Debug, Clone, Default)]
pub struct BodyDraft {
    pub id: Option<BodyId>,
    pub name: String,
    pub jurisdiction: Option<Jurisdiction>,
    pub competency: Option<Competency>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_prefix: String,
    pub phone_number: String,
}

impl BodyDraft {
    /// Run all field checks; on success produce the wire record.
    pub fn validate(&self) -> Result<InspectionBody, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check("name", validate::required_text("name", &self.name));
        if self.jurisdiction.is_none() {
            errors.check("jurisdiction", Err("jurisdiction is required".to_string()));
        }
        if self.competency.is_none() {
            errors.check("competency", Err("competency is required".to_string()));
        }
        errors.check(
            "first_name",
            validate::required_text("first name", &self.first_name),
        );
        errors.check(
            "last_name",
            validate::required_text("last name", &self.last_name),
        );
        errors.check("email", validate::required_text("email", &self.email));
        if errors.get("email").is_none() {
            errors.check("email", validate::email(&self.email));
        }
        errors.check("phone", validate::phone(&self.phone_prefix, &self.phone_number));

        match (self.jurisdiction, self.competency) {
            (Some(jurisdiction), Some(competency)) if errors.is_empty() => Ok(InspectionBody {
                id: self.id,
                name: self.name.trim().to_string(),
                jurisdiction,
                competency,
                contact: ContactPerson {
                    first_name: self.first_name.trim().to_string(),
                    last_name: self.last_name.trim().to_string(),
                    email: self.email.trim().to_string(),
                    phone: format!("{}{}", self.phone_prefix, self.phone_number),
                },
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> BodyDraft {
        BodyDraft {
            id: None,
            name: "Kantonalna tržišna inspekcija".to_string(),
            jurisdiction: Some(Jurisdiction::Fbih),
            competency: Some(Competency::TrzisnaInspekcija),
            first_name: "Amira".to_string(),
            last_name: "Hodžić".to_string(),
            email: "amira.hodzic@example.com".to_string(),
            phone_prefix: "+387".to_string(),
            phone_number: "61123456".to_string(),
        }
    }

    #[test]
    fn valid_draft_builds_body_with_concatenated_phone() {
        let body = valid_draft().validate().unwrap();
        assert_eq!(body.contact.phone, "+38761123456");
        assert_eq!(body.contact.full_name(), "Amira Hodžić");
        assert!(body.id.is_none());
    }

    #[test]
    fn draft_collects_all_field_errors() {
        let draft = BodyDraft {
            name: "  ".to_string(),
            email: "not-an-email".to_string(),
            phone_prefix: "+387".to_string(),
            phone_number: "6112".to_string(),
            ..BodyDraft::default()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("jurisdiction").is_some());
        assert!(errors.get("competency").is_some());
        assert!(errors.get("first_name").is_some());
        assert!(errors.get("last_name").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("phone").is_some());
    }

    #[test]
    fn serializes_with_backend_field_names() {
        let body = valid_draft().validate().unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["nazivInspekcijskogTijela"], "Kantonalna tržišna inspekcija");
        assert_eq!(json["inspektorat"], "FBIH");
        assert_eq!(json["nadleznosti"], "TRZISNA_INSPEKCIJA");
        assert_eq!(json["kontaktOsoba"]["ime"], "Amira");
        assert_eq!(json["kontaktOsoba"]["brojTelefona"], "+38761123456");
    }

    #[test]
    fn rejects_unknown_jurisdiction_at_the_boundary() {
        let json = r#"{
            "id": 1,
            "nazivInspekcijskogTijela": "X",
            "inspektorat": "EU",
            "nadleznosti": "TRZISNA_INSPEKCIJA",
            "kontaktOsoba": {"ime": "A", "prezime": "B", "email": "a@b.co", "brojTelefona": "+38761123456"}
        }"#;
        assert!(serde_json::from_str::<InspectionBody>(json).is_err());
    }

    #[test]
    fn display_labels_cover_all_variants() {
        for j in Jurisdiction::ALL {
            assert!(!j.display_label().is_empty());
            assert_eq!(j.wire_name().parse::<Jurisdiction>().unwrap(), j);
        }
        for c in Competency::ALL {
            assert!(!c.display_label().is_empty());
            assert_eq!(c.wire_name().parse::<Competency>().unwrap(), c);
        }
    }
}
