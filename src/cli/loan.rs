use super::ui;
use crate::core::BASE_CURRENCY;
use crate::core::loan::{AmortizationRow, Loan, LoanSummary};
use anyhow::{Result, bail};
use comfy_table::Cell;
use tracing::info;

/// Longest schedule printed as a table (100 years of monthly payments).
const MAX_SCHEDULE_MONTHS: u32 = 1200;

impl LoanSummary {
    pub fn display_as_table(&self, currency: &str) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Item"),
            ui::header_cell(&format!("Amount ({currency})")),
        ]);
        table.add_row(vec![
            Cell::new("Monthly payment"),
            ui::total_cell(self.monthly_payment),
        ]);
        table.add_row(vec![
            Cell::new("Total of all payments"),
            ui::amount_cell(self.total_payment),
        ]);
        table.add_row(vec![
            Cell::new("Accrued interest"),
            ui::amount_cell(self.total_interest),
        ]);
        table.to_string()
    }
}

fn schedule_table(rows: impl IntoIterator<Item = AmortizationRow>, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell(&format!("Payment ({currency})")),
        ui::header_cell("Principal"),
        ui::header_cell("Interest"),
        ui::header_cell("Balance"),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.month),
            ui::amount_cell(row.payment),
            ui::amount_cell(row.principal_part),
            ui::amount_cell(row.interest_part),
            ui::amount_cell(row.remaining_balance),
        ]);
    }
    table.to_string()
}

pub fn run(principal: f64, months: u32, annual_rate: f64, show_schedule: bool) -> Result<()> {
    let loan = Loan::new(principal, months, annual_rate)?;
    if show_schedule && months > MAX_SCHEDULE_MONTHS {
        bail!("Schedule is limited to {MAX_SCHEDULE_MONTHS} months, got {months}");
    }
    let summary = loan.summary();

    println!(
        "{}\n",
        ui::style_text(
            &format!(
                "Loan of {principal:.2} {BASE_CURRENCY} over {months} months at {annual_rate}%"
            ),
            ui::StyleType::Title
        )
    );
    println!("{}", summary.display_as_table(BASE_CURRENCY));

    if show_schedule {
        println!("\n{}", schedule_table(loan.schedule(), BASE_CURRENCY));
    }

    info!(
        monthly_payment = summary.monthly_payment,
        "Monthly payment calculated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loan::calculate;

    #[test]
    fn test_summary_table_shows_rounded_figures() {
        let summary = calculate(10000.0, 12, 12.0).unwrap();

        let output = summary.display_as_table("RUB");

        assert!(output.contains("Monthly payment"));
        assert!(output.contains("888.49"));
        assert!(output.contains("10661.85"));
        assert!(output.contains("661.85"));
        assert!(output.contains("Amount (RUB)"));
    }

    #[test]
    fn test_schedule_table_lists_every_month() {
        let loan = Loan::new(1200.0, 3, 12.0).unwrap();

        let output = schedule_table(loan.schedule(), "RUB");

        assert!(output.contains("Month"));
        assert!(output.contains("0.00"));
        assert_eq!(output.matches("408.03").count(), 3, "{output}");
    }

    #[test]
    fn test_run_refuses_oversized_schedule() {
        let err = run(1000.0, u32::MAX, 12.0, true).unwrap_err();
        assert!(err.to_string().contains("limited to 1200 months"));

        // Without the schedule the summary alone is fine.
        assert!(run(1000.0, u32::MAX, 12.0, false).is_ok());
    }

    #[test]
    fn test_run_rejects_invalid_input() {
        let err = run(0.0, 12, 12.0, false).unwrap_err();
        assert!(err.to_string().contains("principal"));
    }
}
