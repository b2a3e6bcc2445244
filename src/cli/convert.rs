use super::ui;
use crate::core::{BASE_CURRENCY, RateStore};
use crate::core::convert::{Conversion, ConversionWorkflow};
use anyhow::Result;
use tracing::info;

impl Conversion {
    pub fn display_result(&self) -> String {
        format!(
            "Conversion result: {} {}",
            ui::style_text(&format!("{:.2}", self.amount), ui::StyleType::TotalValue),
            self.code
        )
    }

    pub fn log_message(&self) -> String {
        format!(
            "Converted {} {BASE_CURRENCY} to {} at rate {:.4}",
            self.source_amount, self.code, self.rate
        )
    }
}

pub async fn run(
    store: &dyn RateStore,
    amount: f64,
    currency_code: &str,
) -> Result<()> {
    let conversion = ConversionWorkflow::new(store)
        .convert(amount, currency_code)
        .await?;

    println!("{}", conversion.display_result());
    println!(
        "{}",
        ui::style_text(&conversion.log_message(), ui::StyleType::Subtle)
    );
    info!(
        currency_code,
        rate = conversion.rate,
        "Converted amount"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_messages() {
        let conversion = Conversion {
            amount: 7500.0,
            code: "USD".to_string(),
            rate: 75.0,
            source_amount: 100.0,
        };

        assert!(conversion.display_result().contains("7500.00"));
        assert!(conversion.display_result().ends_with(" USD"));
        assert_eq!(
            conversion.log_message(),
            "Converted 100 RUB to USD at rate 75.0000"
        );
    }
}
