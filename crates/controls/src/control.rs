use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use nadzor_bodies::InspectionBody;
use nadzor_core::{ControlId, FieldErrors, validate};
use nadzor_products::Product;

/// Inspection control record as exchanged with the backend.
///
/// Links exactly one inspection body and one product; the safety verdict is
/// a plain boolean, the result narrative free text. No soft-delete or
/// versioning: records are created, edited, listed and deleted by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionControl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ControlId>,
    #[serde(rename = "datumInspekcijskeKontrole")]
    pub date: NaiveDate,
    #[serde(rename = "nadleznoInspekcijskoTijelo")]
    pub body: InspectionBody,
    #[serde(rename = "kontrolisaniProizvod")]
    pub product: Product,
    #[serde(rename = "rezultatiKontrole")]
    pub narrative: String,
    #[serde(rename = "proizvodSiguran")]
    pub product_safe: bool,
}

/// Form input for creating or editing an inspection control.
///
/// The body and product are records the user picked from loaded lists, so
/// they are carried whole rather than as bare ids.
#[derive(Debug, Clone, Default)]
pub struct ControlDraft {
    pub id: Option<ControlId>,
    pub date: Option<NaiveDate>,
    pub body: Option<InspectionBody>,
    pub product: Option<Product>,
    pub narrative: String,
    pub product_safe: bool,
}

impl ControlDraft {
    /// Run all field checks against the supplied `today`; on success produce
    /// the wire record. The clock is passed in so submission time is explicit.
    pub fn validate(&self, today: NaiveDate) -> Result<InspectionControl, FieldErrors> {
        let mut errors = FieldErrors::new();

        match self.date {
            None => errors.check("date", Err("inspection date is required".to_string())),
            Some(date) => errors.check("date", validate::date_not_future(date, today)),
        }
        if self.body.is_none() {
            errors.check("body", Err("inspection body is required".to_string()));
        }
        if self.product.is_none() {
            errors.check("product", Err("product is required".to_string()));
        }
        errors.check(
            "narrative",
            validate::required_text("result narrative", &self.narrative),
        );

        match (self.date, &self.body, &self.product) {
            (Some(date), Some(body), Some(product)) if errors.is_empty() => {
                Ok(InspectionControl {
                    id: self.id,
                    date,
                    body: body.clone(),
                    product: product.clone(),
                    narrative: self.narrative.trim().to_string(),
                    product_safe: self.product_safe,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use nadzor_bodies::{BodyDraft, Competency, Jurisdiction};
    use nadzor_core::BodyId;
    use nadzor_products::ProductDraft;

    fn sample_body() -> InspectionBody {
        let mut body = BodyDraft {
            name: "Republička tržišna inspekcija".to_string(),
            jurisdiction: Some(Jurisdiction::Rs),
            competency: Some(Competency::TrzisnaInspekcija),
            first_name: "Marko".to_string(),
            last_name: "Kovač".to_string(),
            email: "marko.kovac@example.com".to_string(),
            phone_prefix: "+387".to_string(),
            phone_number: "65123456".to_string(),
            ..BodyDraft::default()
        }
        .validate()
        .unwrap();
        body.id = Some(BodyId::new(3));
        body
    }

    fn sample_product() -> Product {
        ProductDraft {
            name: "Mlijeko 1l".to_string(),
            manufacturer: "Mljekara".to_string(),
            country: "BOSNA_I_HERCEGOVINA".to_string(),
            ..ProductDraft::default()
        }
        .validate()
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn valid_draft_builds_control() {
        let draft = ControlDraft {
            date: NaiveDate::from_ymd_opt(2024, 1, 10),
            body: Some(sample_body()),
            product: Some(sample_product()),
            narrative: "Proizvod ispravan.".to_string(),
            product_safe: true,
            ..ControlDraft::default()
        };
        let control = draft.validate(today()).unwrap();
        assert!(control.product_safe);
        assert_eq!(control.body.id, Some(BodyId::new(3)));
    }

    #[test]
    fn future_date_is_rejected() {
        let draft = ControlDraft {
            date: today().checked_add_days(Days::new(1)),
            body: Some(sample_body()),
            product: Some(sample_product()),
            narrative: "x".to_string(),
            ..ControlDraft::default()
        };
        let errors = draft.validate(today()).unwrap_err();
        assert!(errors.get("date").unwrap().contains("future"));
    }

    #[test]
    fn todays_date_passes() {
        let draft = ControlDraft {
            date: Some(today()),
            body: Some(sample_body()),
            product: Some(sample_product()),
            narrative: "x".to_string(),
            ..ControlDraft::default()
        };
        assert!(draft.validate(today()).is_ok());
    }

    #[test]
    fn empty_draft_reports_every_field() {
        let errors = ControlDraft::default().validate(today()).unwrap_err();
        for field in ["date", "body", "product", "narrative"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn round_trips_backend_field_names() {
        let draft = ControlDraft {
            date: NaiveDate::from_ymd_opt(2024, 1, 10),
            body: Some(sample_body()),
            product: Some(sample_product()),
            narrative: "Uzorak neispravan.".to_string(),
            product_safe: false,
            ..ControlDraft::default()
        };
        let control = draft.validate(today()).unwrap();
        let json = serde_json::to_value(&control).unwrap();
        assert_eq!(json["datumInspekcijskeKontrole"], "2024-01-10");
        assert_eq!(json["proizvodSiguran"], false);
        assert_eq!(
            json["nadleznoInspekcijskoTijelo"]["nazivInspekcijskogTijela"],
            "Republička tržišna inspekcija"
        );
        assert_eq!(json["kontrolisaniProizvod"]["nazivProizvoda"], "Mlijeko 1l");
    }
}
