use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use plink_access::{CrudAction, PermissionSet};
use plink_match::{MatchField, ScoreComponent};
use plink_model::{ConfidenceLevel, IdentityRecord, MatchResult};

use plink_cli::types::{PermissionsOutcome, RankOutcome, ScoreOutcome};

pub fn print_score(outcome: &ScoreOutcome) {
    let result = &outcome.explanation.result;
    match &outcome.source {
        Some(source) => println!("Source: {}", source.display_name()),
        None => println!("Source: (none selected)"),
    }
    println!("Candidate: {}", outcome.candidate.display_name());
    println!("Match: {}", result.badge());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Source"),
        header_cell("Candidate"),
        header_cell("Similarity"),
        header_cell("Points"),
        header_cell("Matched"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for component in &outcome.explanation.components {
        let source_value = outcome
            .source
            .as_ref()
            .map(|source| field_value(source, component.field))
            .unwrap_or("-");
        table.add_row(vec![
            Cell::new(component.field),
            Cell::new(source_value),
            Cell::new(field_value(&outcome.candidate, component.field)),
            similarity_cell(component),
            Cell::new(format!("{:.1} / {}", component.contribution, component.weight)),
            matched_cell(field_matched(result, component.field)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(result.score).add_attribute(Attribute::Bold),
        level_cell(result.level),
    ]);
    println!("{table}");
}

pub fn print_ranking(outcome: &RankOutcome) {
    println!(
        "Candidates: {} shown of {}",
        outcome.rows.len(),
        outcome.total
    );
    if outcome.rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Sex"),
        header_cell("Birth date"),
        header_cell("Score"),
        header_cell("Confidence"),
        header_cell("Matched fields"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    align_column(&mut table, 6, CellAlignment::Right);
    for row in &outcome.rows {
        table.add_row(vec![
            dim_cell(row.index + 1),
            Cell::new(row.candidate.display_name()),
            Cell::new(&row.candidate.sex),
            Cell::new(&row.candidate.birth_date),
            Cell::new(row.result.score).add_attribute(Attribute::Bold),
            level_cell(row.result.level),
            Cell::new(format!("{}/5", row.result.fields.matched_count())),
        ]);
    }
    println!("{table}");
}

pub fn print_permissions(outcome: &PermissionsOutcome) {
    match outcome {
        PermissionsOutcome::Check {
            module,
            action,
            allowed,
        } => {
            let verdict = if *allowed { "allowed" } else { "denied" };
            println!("{action} on {module}: {verdict}");
        }
        PermissionsOutcome::Matrix(permissions) => print_permission_matrix(permissions),
    }
}

fn print_permission_matrix(permissions: &PermissionSet) {
    if permissions.is_empty() {
        println!("No permissions granted.");
        return;
    }
    let mut table = Table::new();
    let mut header = vec![header_cell("Module"), header_cell("Description")];
    header.extend(CrudAction::ALL.iter().map(|action| header_cell(action.as_str())));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 2..2 + CrudAction::ALL.len() {
        align_column(&mut table, index, CellAlignment::Center);
    }
    for module in permissions.modules() {
        let flags = permissions.flags(module);
        let mut row = vec![
            Cell::new(module).fg(Color::Blue),
            Cell::new(permissions.description(module).unwrap_or("-")),
        ];
        row.extend(CrudAction::ALL.iter().map(|&action| matched_cell(flags.allows(action))));
        table.add_row(row);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn field_value(record: &IdentityRecord, field: MatchField) -> &str {
    match field {
        MatchField::FirstName => &record.first_name,
        MatchField::LastName => &record.last_name,
        MatchField::MiddleName => record.middle_name_or_empty(),
        MatchField::Sex => &record.sex,
        MatchField::BirthDate => &record.birth_date,
    }
}

fn field_matched(result: &MatchResult, field: MatchField) -> bool {
    let fields = &result.fields;
    match field {
        MatchField::FirstName => fields.first_name.matched,
        MatchField::LastName => fields.last_name.matched,
        MatchField::MiddleName => fields.middle_name.matched,
        MatchField::Sex => fields.sex.matched,
        MatchField::BirthDate => fields.birth_date.matched,
    }
}

fn similarity_cell(component: &ScoreComponent) -> Cell {
    match component.field {
        MatchField::Sex | MatchField::BirthDate => dim_cell("exact"),
        _ => Cell::new(format!("{:.0}%", component.value * 100.0)),
    }
}

fn matched_cell(matched: bool) -> Cell {
    if matched {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn level_cell(level: ConfidenceLevel) -> Cell {
    let color = match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    };
    Cell::new(level.label())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
