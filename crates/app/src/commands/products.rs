//! Product commands.

use anyhow::bail;
use nadzor_core::ProductId;
use nadzor_products::ProductDraft;

use crate::context::AppContext;
use crate::render;

use super::user_error;

pub async fn list(ctx: &AppContext, name: Option<&str>) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let products = match name {
        Some(fragment) => client.search_products(fragment).await,
        None => client.products().await,
    }
    .map_err(|e| user_error(e, "list products"))?;

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }
    render::products_table(&products);
    Ok(())
}

pub async fn create(ctx: &AppContext, draft: ProductDraft) -> anyhow::Result<()> {
    let product = match draft.validate() {
        Ok(product) => product,
        Err(errors) => bail!("invalid input: {errors}"),
    };
    let created = ctx
        .client()?
        .create_product(&product)
        .await
        .map_err(|e| user_error(e, "create the product"))?;
    match &created.serial_number {
        Some(serial) => println!("Created product {} (serial {serial}).", created.name),
        None => println!("Created product {}.", created.name),
    }
    Ok(())
}

/// Partial edit: unset fields keep the stored value.
#[derive(Debug, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
}

pub async fn update(ctx: &AppContext, id: ProductId, update: ProductUpdate) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let current = client
        .product(id)
        .await
        .map_err(|e| user_error(e, "load the product"))?;

    let draft = ProductDraft {
        id: Some(id),
        name: update.name.unwrap_or(current.name),
        manufacturer: update.manufacturer.unwrap_or(current.manufacturer),
        country: update
            .country
            .unwrap_or_else(|| current.country.to_string()),
        description: update
            .description
            .or(current.description)
            .unwrap_or_default(),
    };
    let product = match draft.validate() {
        Ok(product) => product,
        Err(errors) => bail!("invalid input: {errors}"),
    };

    let updated = client
        .update_product(id, &product)
        .await
        .map_err(|e| user_error(e, "update the product"))?;
    println!("Updated product {} ({id}).", updated.name);
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: ProductId) -> anyhow::Result<()> {
    ctx.client()?
        .delete_product(id)
        .await
        .map_err(|e| user_error(e, "delete the product"))?;
    println!("Deleted product {id}.");
    Ok(())
}

pub async fn countries(ctx: &AppContext) -> anyhow::Result<()> {
    let countries = ctx
        .client()?
        .countries()
        .await
        .map_err(|e| user_error(e, "fetch the country list"))?;
    for country in countries {
        println!("{country}");
    }
    Ok(())
}
