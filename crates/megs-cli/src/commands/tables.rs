use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use megs_mechanics::tables::RESULT_COLUMNS;

pub fn run(path: Option<&Path>, result: bool) -> Result<(), String> {
    let tables = super::load_tables(path)?;
    let bands = tables.ranges().bands();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if result {
        println!("  {}", "Result Table".bold());
        let mut header = vec!["EV \\ RV".to_string()];
        header.extend((0..RESULT_COLUMNS).map(|c| c.to_string()));
        table.set_header(header);
        for (band, row) in bands.iter().zip(tables.result_table()) {
            let mut cells = vec![band.to_string()];
            cells.extend(row.iter().map(|&raps| {
                if raps == 0 {
                    "N".to_string()
                } else {
                    raps.to_string()
                }
            }));
            table.add_row(cells);
        }
    } else {
        println!("  {}", "Action Table".bold());
        let mut header = vec!["AV \\ OV".to_string()];
        header.extend(bands.iter().map(|b| b.to_string()));
        table.set_header(header);
        for (band, row) in bands.iter().zip(tables.action_table()) {
            let mut cells = vec![band.to_string()];
            cells.extend(row.iter().map(i32::to_string));
            table.add_row(cells);
        }
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {}",
        format!("Values above {} extrapolate in steps of 5.", bands.last().map_or(0, |b| b.max()))
            .dimmed()
    );

    Ok(())
}
