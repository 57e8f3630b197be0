//! Safety report over filtered inspection controls.

use anyhow::bail;
use chrono::Local;
use nadzor_client::ControlFilter;
use nadzor_core::ControlId;
use nadzor_report::{ReportPage, body_display_name};

use crate::context::AppContext;
use crate::render;

use super::user_error;

pub async fn generate(
    ctx: &AppContext,
    filter: ControlFilter,
    detail: Option<ControlId>,
) -> anyhow::Result<()> {
    let client = ctx.client()?;

    // Resolve the header name before the fetch so a bad --body-id still
    // renders as N/A rather than failing the report.
    let bodies = match filter.body_id {
        Some(_) => client
            .bodies()
            .await
            .map_err(|e| user_error(e, "load inspection bodies"))?,
        None => Vec::new(),
    };
    let body_name = body_display_name(filter.body_id, &bodies);

    let mut page = ReportPage::new();
    let ticket = page.submit(filter);
    let submitted = *page.filter();
    match client.filter_controls(&submitted).await {
        Ok(controls) => {
            page.complete(ticket, controls);
        }
        Err(e) => {
            page.fail(ticket);
            return Err(user_error(e, "generate the report"));
        }
    }

    if let Some(id) = detail {
        let Some(control) = page.open_detail(id) else {
            bail!("control {id} is not part of this report");
        };
        render::control_detail(control);
        return Ok(());
    }

    let stats = page.stats().unwrap_or_default();
    println!("Inspection report");
    println!("  Body:      {body_name}");
    println!("  Generated: {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!(
        "  Controls:  {} total, {} safe, {} unsafe",
        stats.total, stats.safe, stats.unsafe_count
    );
    println!();

    match page.state() {
        nadzor_report::ReportState::Generated { controls, .. } if !controls.is_empty() => {
            render::controls_table(controls);
        }
        _ => println!("No inspection controls matched the filter."),
    }
    Ok(())
}
