use comfy_table::{ContentArrangement, Table};

use megs_mechanics::ManeuverTable;

pub fn run() -> Result<(), String> {
    let maneuvers = ManeuverTable::bundled().map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Maneuver", "OV shifts", "RV shifts"]);
    for (key, shifts) in maneuvers.iter() {
        table.add_row(vec![
            key.to_string(),
            format!("{:+}", shifts.ov_shifts),
            format!("{:+}", shifts.rv_shifts),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} maneuvers", maneuvers.len());

    Ok(())
}
