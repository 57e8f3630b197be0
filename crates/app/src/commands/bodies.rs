//! Inspection body commands.

use anyhow::bail;
use nadzor_bodies::{BodyDraft, Competency, Jurisdiction};
use nadzor_client::BodySearch;
use nadzor_core::{BodyId, FieldErrors, validate};

use crate::context::AppContext;
use crate::render;

use super::user_error;

pub async fn list(ctx: &AppContext, search: BodySearch, sorted: bool) -> anyhow::Result<()> {
    let client = ctx.client()?;
    // The CLI rejects --sorted combined with search flags, so the two
    // listings never compete.
    let bodies = if sorted {
        client.bodies_sorted().await
    } else {
        client.search_bodies(&search).await
    }
    .map_err(|e| user_error(e, "list inspection bodies"))?;

    if bodies.is_empty() {
        println!("No inspection bodies found.");
        return Ok(());
    }
    render::bodies_table(&bodies);
    Ok(())
}

pub async fn create(ctx: &AppContext, draft: BodyDraft) -> anyhow::Result<()> {
    let body = match draft.validate() {
        Ok(body) => body,
        Err(errors) => bail!("invalid input: {errors}"),
    };
    let created = ctx
        .client()?
        .create_body(&body)
        .await
        .map_err(|e| user_error(e, "create the inspection body"))?;
    println!(
        "Created inspection body {} ({}).",
        created.name,
        created.id.map(|id| id.to_string()).unwrap_or_default()
    );
    Ok(())
}

/// Partial edit: unset fields keep the stored value.
#[derive(Debug, Default)]
pub struct BodyUpdate {
    pub name: Option<String>,
    pub jurisdiction: Option<Jurisdiction>,
    pub competency: Option<Competency>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_prefix: Option<String>,
    pub phone_number: Option<String>,
}

pub async fn update(ctx: &AppContext, id: BodyId, update: BodyUpdate) -> anyhow::Result<()> {
    // Only changed fields are re-validated; the stored phone string cannot
    // be split back into prefix and digits, so it changes only as a pair.
    let mut errors = FieldErrors::new();
    if let Some(name) = &update.name {
        errors.check("name", validate::required_text("name", name));
    }
    if let Some(first) = &update.first_name {
        errors.check("first_name", validate::required_text("first name", first));
    }
    if let Some(last) = &update.last_name {
        errors.check("last_name", validate::required_text("last name", last));
    }
    if let Some(email) = &update.email {
        errors.check("email", validate::email(email));
    }
    if let (Some(prefix), Some(number)) = (&update.phone_prefix, &update.phone_number) {
        errors.check("phone", validate::phone(prefix, number));
    }
    if !errors.is_empty() {
        bail!("invalid input: {errors}");
    }

    let client = ctx.client()?;
    let mut body = client
        .body(id)
        .await
        .map_err(|e| user_error(e, "load the inspection body"))?;

    if let Some(name) = update.name {
        body.name = name.trim().to_string();
    }
    if let Some(jurisdiction) = update.jurisdiction {
        body.jurisdiction = jurisdiction;
    }
    if let Some(competency) = update.competency {
        body.competency = competency;
    }
    if let Some(first) = update.first_name {
        body.contact.first_name = first.trim().to_string();
    }
    if let Some(last) = update.last_name {
        body.contact.last_name = last.trim().to_string();
    }
    if let Some(email) = update.email {
        body.contact.email = email.trim().to_string();
    }
    if let (Some(prefix), Some(number)) = (update.phone_prefix, update.phone_number) {
        body.contact.phone = format!("{prefix}{number}");
    }

    let updated = client
        .update_body(id, &body)
        .await
        .map_err(|e| user_error(e, "update the inspection body"))?;
    println!("Updated inspection body {} ({id}).", updated.name);
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: BodyId) -> anyhow::Result<()> {
    ctx.client()?
        .delete_body(id)
        .await
        .map_err(|e| user_error(e, "delete the inspection body"))?;
    println!("Deleted inspection body {id}.");
    Ok(())
}
