use std::env;

use chrono::Utc;
use dotenv::dotenv;
use env_logger::Env;

use nimbusfs::catalog::FileCatalog;
use nimbusfs::constants::STORAGE_LIMIT_BYTES;
use nimbusfs::model::{FilterState, TypeFilter};
use nimbusfs::setup::ensure_storage_bucket;
use nimbusfs::stats::summarize;
use nimbusfs::store::{IdentityApi, SupabaseClient};
use nimbusfs::utils::format_file_size;
use nimbusfs::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    let client = SupabaseClient::new(&config);

    let email = env::var("NIMBUS_EMAIL").expect("NIMBUS_EMAIL");
    let password = env::var("NIMBUS_PASSWORD").expect("NIMBUS_PASSWORD");
    let session = client.sign_in(&email, &password).await?;
    log::info!("## Signed in as {}", session.user.email);

    ensure_storage_bucket(&client).await?;

    let mut catalog = FileCatalog::new(&client);
    catalog.load(&session).await?;

    let args: Vec<String> = env::args().collect();
    let search_term = args.get(1).cloned().unwrap_or_default();
    let type_filter = args
        .get(2)
        .and_then(|s| TypeFilter::parse(s))
        .unwrap_or_default();
    catalog.apply_filter(FilterState { search_term, type_filter });

    println!(
        "Showing {} of {} files from cloud storage\n",
        catalog.visible().len(),
        catalog.files().len()
    );
    for file in catalog.visible() {
        println!(
            "{:<44} {:>10}  {:<8} {}",
            file.display_name(),
            format_file_size(file.size),
            file.category().label(),
            file.updated_at.format("%b %e, %Y %H:%M")
        );
    }

    let usage = summarize(catalog.files(), Utc::now());
    println!(
        "\n{} files, {} used of {} ({:.1}%)",
        usage.total_files,
        format_file_size(usage.total_size),
        format_file_size(STORAGE_LIMIT_BYTES),
        usage.usage_percentage()
    );
    println!("{} files uploaded this week", usage.recent_uploads);
    for (category, entry) in &usage.by_category {
        println!(
            "  {:<10} {:>4} files {:>10}",
            category.label(),
            entry.count,
            format_file_size(entry.total_size)
        );
    }

    client.sign_out().await?;
    Ok(())
}
