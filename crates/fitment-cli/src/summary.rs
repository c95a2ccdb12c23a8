use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use fitment_map::ModelMappingTable;
use fitment_model::{ValidationResult, ValidationStatus, ValidationSummary};

use crate::commands::BatchOutcome;

pub fn print_results(text: &str, results: &[ValidationResult]) {
    println!("Application: {text}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Year"),
        header_cell("Make"),
        header_cell("Model"),
        header_cell("Position"),
        header_cell("Vehicle ID"),
        header_cell("Position IDs"),
        header_cell("Status"),
        header_cell("Message"),
    ]);
    apply_results_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Center);

    for (index, result) in results.iter().enumerate() {
        let row = match &result.fitment {
            Some(fitment) => vec![
                dim_cell(index + 1),
                Cell::new(fitment.vehicle.year),
                Cell::new(&fitment.vehicle.make),
                Cell::new(&fitment.vehicle.model),
                Cell::new(fitment.position.to_string()),
                fitment
                    .vcdb_vehicle_id
                    .map_or_else(|| dim_cell("-"), Cell::new),
                position_ids_cell(fitment.pcdb_position_ids.as_deref()),
                status_cell(result.status),
                message_cell(result),
            ],
            None => vec![
                dim_cell(index + 1),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                status_cell(result.status),
                message_cell(result),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
    print_status_line(&ValidationSummary::from_results(results));
}

pub fn print_batch(outcome: &BatchOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Application"),
        header_cell("Fitments"),
        header_cell("Valid"),
        header_cell("Warnings"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for (text, results) in &outcome.results {
        let summary = ValidationSummary::from_results(results);
        table.add_row(vec![
            Cell::new(text),
            Cell::new(results.len()),
            count_cell(summary.valid, Color::Green),
            count_cell(summary.warnings, Color::Yellow),
            count_cell(summary.errors, Color::Red),
        ]);
    }
    let total = outcome.summary;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total.total()).add_attribute(Attribute::Bold),
        count_cell(total.valid, Color::Green).add_attribute(Attribute::Bold),
        count_cell(total.warnings, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total.errors, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_failures(&outcome.results);
    if let Some(saved) = &outcome.saved {
        println!(
            "Saved {} fitment(s) for {} to {}",
            saved.records,
            saved.product_id,
            saved.output_dir.display()
        );
    }
}

pub fn print_mappings(table_data: &ModelMappingTable) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pattern"),
        header_cell("Target"),
        header_cell("Resolves to"),
    ]);
    apply_summary_table_style(&mut table);
    for entry in table_data.entries() {
        for target in &entry.targets {
            let resolved = match target.resolve() {
                Some(model) => Cell::new(format!("{} {}", model.make, model.model)),
                None => Cell::new("unresolvable").fg(Color::Red),
            };
            table.add_row(vec![
                Cell::new(&entry.pattern)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(target.to_legacy()),
                resolved,
            ]);
        }
    }
    println!("{table}");
    println!("{} pattern(s)", table_data.len());
}

/// Lists every ERROR message in the batch, one per line.
fn print_failures(results: &BTreeMap<String, Vec<ValidationResult>>) {
    let failures: Vec<&ValidationResult> = results
        .values()
        .flatten()
        .filter(|result| result.is_error())
        .collect();
    if failures.is_empty() {
        return;
    }
    eprintln!("Errors:");
    for failure in failures {
        let subject = failure
            .fitment
            .as_ref()
            .map_or_else(|| failure.original_text.clone(), |f| f.vehicle.full_name());
        eprintln!("- {subject}: {}", failure.message);
    }
}

fn print_status_line(summary: &ValidationSummary) {
    println!(
        "{} fitment(s): {} valid, {} warning(s), {} error(s)",
        summary.total(),
        summary.valid,
        summary.warnings,
        summary.errors
    );
}

fn message_cell(result: &ValidationResult) -> Cell {
    let mut message = result.message.clone();
    if !result.suggestions.is_empty() {
        message = format!("{message} (try: {})", result.suggestions.join(", "));
    }
    match result.status {
        ValidationStatus::Valid => dim_cell(message),
        ValidationStatus::Warning => Cell::new(message).fg(Color::Yellow),
        ValidationStatus::Error => Cell::new(message).fg(Color::Red),
    }
}

fn position_ids_cell(ids: Option<&[u32]>) -> Cell {
    match ids {
        Some([]) => dim_cell("any"),
        Some(ids) => Cell::new(
            ids.iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        None => dim_cell("-"),
    }
}

fn status_cell(status: ValidationStatus) -> Cell {
    match status {
        ValidationStatus::Valid => Cell::new("VALID").fg(Color::Green),
        ValidationStatus::Warning => Cell::new("WARN").fg(Color::Yellow),
        ValidationStatus::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_results_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(180);
    if table.column_count() >= 9 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(3)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
