//! Inspection control commands.

use anyhow::bail;
use chrono::{Local, NaiveDate};
use nadzor_client::ControlFilter;
use nadzor_controls::ControlDraft;
use nadzor_core::{BodyId, ControlId, ProductId};

use crate::context::AppContext;
use crate::render;

use super::user_error;

pub async fn list(ctx: &AppContext, filter: ControlFilter) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let controls = if filter.is_empty() {
        client.controls().await
    } else {
        client.filter_controls(&filter).await
    }
    .map_err(|e| user_error(e, "list inspection controls"))?;

    if controls.is_empty() {
        println!("No inspection controls found.");
        return Ok(());
    }
    render::controls_table(&controls);
    Ok(())
}

pub async fn create(
    ctx: &AppContext,
    date: NaiveDate,
    body_id: BodyId,
    product_id: ProductId,
    narrative: String,
    safe: bool,
) -> anyhow::Result<()> {
    let client = ctx.client()?;

    // The record embeds the body and product whole, so resolve both first.
    let body = client
        .body(body_id)
        .await
        .map_err(|e| user_error(e, "load the inspection body"))?;
    let product = client
        .product(product_id)
        .await
        .map_err(|e| user_error(e, "load the product"))?;

    let draft = ControlDraft {
        id: None,
        date: Some(date),
        body: Some(body),
        product: Some(product),
        narrative,
        product_safe: safe,
    };
    let control = match draft.validate(Local::now().date_naive()) {
        Ok(control) => control,
        Err(errors) => bail!("invalid input: {errors}"),
    };

    let created = client
        .create_control(&control)
        .await
        .map_err(|e| user_error(e, "record the inspection control"))?;
    println!(
        "Recorded control {} of {} by {} ({}).",
        created.id.map(|id| id.to_string()).unwrap_or_default(),
        created.product.name,
        created.body.name,
        render::verdict_label(created.product_safe),
    );
    Ok(())
}

/// Partial edit: unset fields keep the stored value.
#[derive(Debug, Default)]
pub struct ControlUpdate {
    pub date: Option<NaiveDate>,
    pub body_id: Option<BodyId>,
    pub product_id: Option<ProductId>,
    pub narrative: Option<String>,
    pub safe: Option<bool>,
}

pub async fn update(ctx: &AppContext, id: ControlId, update: ControlUpdate) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let mut current = client
        .control(id)
        .await
        .map_err(|e| user_error(e, "load the inspection control"))?;

    if let Some(body_id) = update.body_id {
        current.body = client
            .body(body_id)
            .await
            .map_err(|e| user_error(e, "load the inspection body"))?;
    }
    if let Some(product_id) = update.product_id {
        current.product = client
            .product(product_id)
            .await
            .map_err(|e| user_error(e, "load the product"))?;
    }

    let draft = ControlDraft {
        id: Some(id),
        date: Some(update.date.unwrap_or(current.date)),
        body: Some(current.body),
        product: Some(current.product),
        narrative: update.narrative.unwrap_or(current.narrative),
        product_safe: update.safe.unwrap_or(current.product_safe),
    };
    let control = match draft.validate(Local::now().date_naive()) {
        Ok(control) => control,
        Err(errors) => bail!("invalid input: {errors}"),
    };

    client
        .update_control(id, &control)
        .await
        .map_err(|e| user_error(e, "update the inspection control"))?;
    println!("Updated inspection control {id}.");
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: ControlId) -> anyhow::Result<()> {
    ctx.client()?
        .delete_control(id)
        .await
        .map_err(|e| user_error(e, "delete the inspection control"))?;
    println!("Deleted inspection control {id}.");
    Ok(())
}
