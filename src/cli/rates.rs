use super::ui;
use crate::core::{BASE_CURRENCY, RateRecord, RateStore};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

pub fn rates_table(records: &[RateRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate ({BASE_CURRENCY})")),
        ui::header_cell("Updated (UTC)"),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.id).set_alignment(CellAlignment::Right),
            Cell::new(&record.currency_code),
            Cell::new(format!("{:.4}", record.rate)).set_alignment(CellAlignment::Right),
            Cell::new(record.updated_at.format("%Y-%m-%d %H:%M:%S")),
        ]);
    }
    table.to_string()
}

pub async fn run(store: &dyn RateStore) -> Result<()> {
    let records = store.list_rates().await?;
    if records.is_empty() {
        println!("No saved rates. Run `rubcalc refresh` to download them.");
        return Ok(());
    }

    println!("{}", rates_table(&records));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_rates_table_contents() {
        let updated_at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let records = vec![RateRecord {
            id: 1,
            currency_code: "USD".to_string(),
            rate: 89.0123,
            updated_at,
        }];

        let output = rates_table(&records);

        assert!(output.contains("USD"));
        assert!(output.contains("89.0123"));
        assert!(output.contains("2024-06-01 08:30:00"));
    }
}
