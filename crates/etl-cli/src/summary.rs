use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use etl_cli::pipeline::{BatchSummary, FileSummary};

pub fn print_summary(summary: &BatchSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Schema"),
        header_cell("Bronze"),
        header_cell("Rejected"),
        header_cell("Silver"),
        header_cell("Gold"),
        header_cell("Unmatched"),
        header_cell("Problem cols"),
        header_cell("Problem rows"),
        header_cell("Reports"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=9 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut totals = FileSummary::default();
    for file in &summary.files {
        totals.bronze_rows += file.bronze_rows;
        totals.rejected_rows += file.rejected_rows;
        totals.silver_rows += file.silver_rows;
        totals.gold_rows += file.gold_rows;
        totals.unmatched_keys += file.unmatched_keys;
        table.add_row(vec![
            Cell::new(&file.file_id).fg(Color::Cyan),
            match file.record_kind {
                Some(kind) => Cell::new(kind),
                None => dim_cell("-"),
            },
            Cell::new(file.bronze_rows),
            count_cell(file.rejected_rows, Color::Red),
            Cell::new(file.silver_rows),
            Cell::new(file.gold_rows),
            count_cell(file.unmatched_keys, Color::Yellow),
            count_cell(file.problem_columns, Color::Yellow),
            count_cell(file.problem_rows, Color::Yellow),
            Cell::new(file.reports.paths().count()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(totals.bronze_rows).add_attribute(Attribute::Bold),
        count_cell(totals.rejected_rows, Color::Red).add_attribute(Attribute::Bold),
        Cell::new(totals.silver_rows).add_attribute(Attribute::Bold),
        Cell::new(totals.gold_rows).add_attribute(Attribute::Bold),
        count_cell(totals.unmatched_keys, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    for file in &summary.files {
        for path in file.reports.paths() {
            println!("Report: {}", path.display());
        }
    }
    if summary.has_failures() {
        eprintln!("Failed files:");
        for failure in &summary.failures {
            eprintln!("- {}: {}", failure.source.display(), failure.error);
        }
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
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
