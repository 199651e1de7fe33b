use auvra_core::{bloating_label, tint_for, SliderValue};
use serde::Serialize;

#[derive(Serialize)]
struct LabelRow {
    value: u8,
    label: &'static str,
    tint: &'static str,
    hex: &'static str,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<LabelRow> = SliderValue::all()
        .map(|value| {
            let tint = tint_for(value);
            LabelRow {
                value: value.get(),
                label: bloating_label(value).as_str(),
                tint: tint.as_str(),
                hex: tint.hex(),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:<6} {:<10} {:<10} HEX", "VALUE", "LABEL", "TINT");
    for row in &rows {
        println!("{:<6} {:<10} {:<10} {}", row.value, row.label, row.tint, row.hex);
    }
    Ok(())
}
