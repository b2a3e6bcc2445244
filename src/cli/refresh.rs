use super::{rates, ui};
use crate::core::refresh::RefreshWorkflow;
use crate::core::{RateSource, RateStore};
use anyhow::{Context, Result};

pub async fn run(source: &dyn RateSource, store: &dyn RateStore) -> Result<Vec<String>> {
    let pb = ui::new_progress_bar(0, true);
    pb.set_message("Saving rates...");

    let result = RefreshWorkflow::new(source, store)
        .refresh_with_progress(&|saved, total| {
            pb.set_length(total as u64);
            pb.set_position(saved as u64);
        })
        .await;
    pb.finish_and_clear();
    let codes = result.context("Failed to update exchange rates")?;

    println!(
        "{}",
        ui::style_text(
            &format!("Exchange rates updated ({} currencies)", codes.len()),
            ui::StyleType::Title
        )
    );

    if !codes.is_empty() {
        let saved = store.list_rates().await?;
        let refreshed: Vec<_> = codes
            .iter()
            .filter_map(|code| saved.iter().find(|r| &r.currency_code == code).cloned())
            .collect();
        println!("{}", rates::rates_table(&refreshed));
    }

    Ok(codes)
}
