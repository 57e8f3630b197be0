//! Table and plain-text rendering for command output.

use tabled::{
    builder::Builder,
    settings::{Color, Style, object::Rows},
};

use nadzor_bodies::InspectionBody;
use nadzor_controls::InspectionControl;
use nadzor_products::Product;

fn print_table(builder: Builder) {
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    println!("{table}");
}

fn id_cell<T: core::fmt::Display>(id: Option<T>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

pub fn bodies_table(bodies: &[InspectionBody]) {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Jurisdiction", "Competency", "Contact", "Email", "Phone"]);
    for body in bodies {
        builder.push_record([
            id_cell(body.id),
            body.name.clone(),
            body.jurisdiction.display_label().to_string(),
            body.competency.display_label().to_string(),
            body.contact.full_name(),
            body.contact.email.clone(),
            body.contact.phone.clone(),
        ]);
    }
    print_table(builder);
}

pub fn products_table(products: &[Product]) {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Manufacturer", "Country", "Serial number"]);
    for product in products {
        builder.push_record([
            id_cell(product.id),
            product.name.clone(),
            product.manufacturer.clone(),
            product.country.to_string(),
            product.serial_number.clone().unwrap_or_default(),
        ]);
    }
    print_table(builder);
}

pub fn controls_table(controls: &[InspectionControl]) {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Date", "Body", "Product", "Verdict"]);
    for control in controls {
        builder.push_record([
            id_cell(control.id),
            control.date.to_string(),
            control.body.name.clone(),
            control.product.name.clone(),
            verdict_label(control.product_safe).to_string(),
        ]);
    }
    print_table(builder);
}

pub fn verdict_label(safe: bool) -> &'static str {
    if safe { "safe" } else { "unsafe" }
}

/// Printable single-record view, one field per line.
pub fn control_detail(control: &InspectionControl) {
    println!("Inspection control {}", id_cell(control.id));
    println!("  Date:         {}", control.date);
    println!("  Body:         {}", control.body.name);
    println!("  Jurisdiction: {}", control.body.jurisdiction.display_label());
    println!("  Competency:   {}", control.body.competency.display_label());
    println!("  Product:      {}", control.product.name);
    println!("  Manufacturer: {}", control.product.manufacturer);
    println!("  Country:      {}", control.product.country);
    if let Some(serial) = &control.product.serial_number {
        println!("  Serial:       {serial}");
    }
    println!("  Verdict:      {}", verdict_label(control.product_safe));
    println!("  Findings:     {}", control.narrative);
}
