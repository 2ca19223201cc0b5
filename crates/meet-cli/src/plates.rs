use meet::models::{WeightUnit, convert, format_amount};
use meet::services::PlateKind;
use meet::{PlateLayout, PlateLoadError, PlateLoadSolver};

/// Text shown next to a typed weight: the same figure in the other unit.
pub fn alternate_unit_label(weight: f64, unit: WeightUnit) -> String {
    let other = unit.other();
    format!("{:.2} {}", convert(weight, unit, other), other.as_str().to_lowercase())
}

pub fn describe(
    solver: &PlateLoadSolver,
    weight: f64,
    unit: WeightUnit,
) -> Result<String, PlateLoadError> {
    let layout = solver.solve(weight, unit)?;
    Ok(describe_layout(&layout, weight, unit))
}

pub fn describe_layout(layout: &PlateLayout, weight: f64, unit: WeightUnit) -> String {
    let set_unit = layout.unit.as_str();
    let mut lines = vec![
        format!(
            "{} {} ({})",
            format_amount(weight),
            unit.as_str(),
            alternate_unit_label(weight, unit)
        ),
        format!(
            "Bar: {} {}, per side: {} {}",
            format_amount(layout.bar_weight),
            set_unit,
            format_amount(layout.per_side),
            set_unit
        ),
    ];

    if layout.counts.is_empty() {
        lines.push("  (empty bar)".to_string());
    }
    lines.extend(layout.counts.iter().map(|count| {
        format!(
            "  {} x {} {}",
            count.count,
            format_amount(count.weight),
            set_unit
        )
    }));

    let drawn: Vec<String> = layout
        .plates
        .iter()
        .map(|p| match p.kind {
            PlateKind::Plate => format!("[{}]", format_amount(p.weight)),
            PlateKind::Collar => "|".to_string(),
            PlateKind::Sleeve => "=".to_string(),
        })
        .collect();
    lines.push(format!("Sleeve: {}", drawn.join(" ")));
    lines.push(format!(
        "Sleeve loaded: {}% of {}%",
        format_amount(layout.sleeve_percent),
        format_amount(PlateLoadSolver::sleeve_capacity())
    ));

    if layout.is_sleeve_full() {
        lines.push(format!(
            "Too many plates - Bar Full ({} not drawn)",
            layout.rejected
        ));
    }

    lines.join("\n")
}
