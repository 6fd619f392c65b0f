//! Basic example demonstrating the openFDA 510(k) client.
//!
//! Run with:
//! ```
//! cargo run --example basic
//! ```

use openfda_510k::{ClearanceQuery, DeviceClearance, FdaClient, List};

#[tokio::main]
async fn main() -> openfda_510k::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating openFDA client...");
    let client = FdaClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Fetch the first page of infusion pump clearances
    println!("\n--- Listing Clearances (first page) ---");
    let query = ClearanceQuery::new("FRN")?;
    let page = DeviceClearance::list_page(&client, &query, 0, 10).await?;
    println!(
        "Found {} clearances (total: {:?})",
        page.len(),
        page.total
    );

    for record in &page {
        println!("  - {} ({})", record.device_name, record.k_number);
    }

    // Collect up to 25 matching records across pages
    println!("\n--- Collecting up to 25 records ---");
    let records = DeviceClearance::list_all(&client, &query, 10, Some(25)).await?;
    println!("Collected {} records", records.len());

    if let Some(first) = records.first() {
        println!("\n--- First Record ---");
        println!("  K number:     {}", first.k_number);
        println!("  Device:       {}", first.device_name);
        println!("  Manufacturer: {}", first.manufacturer);
        let indications = first.indications_for_use.chars().take(72).collect::<String>();
        println!("  Indications:  {}", indications);
    }

    println!("\nDone!");
    Ok(())
}
