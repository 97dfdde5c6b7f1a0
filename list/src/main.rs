//! Shopping list demo binary
//!
//! Opens the list from the configured data directory, walks through a short
//! shopping session and prints the rendered list after each step.

use shopping_list::{Filter, ListConfig, ListEnvironment, ListStore, Renderer, TextRenderer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn show(list: &ListStore, step: &str) {
    println!(">>> {step}");
    println!("{}", TextRenderer.render(&list.snapshot().await));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopping_list=info,shopping_list_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ListConfig::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Opening shopping list"
    );

    let list = ListStore::open(ListEnvironment::from_config(&config)).await;
    show(&list, "Loaded").await;

    // Live view: log every change as it is reduced
    let mut changes = list.subscribe();
    let watcher = tokio::spawn(async move {
        while let Ok(action) = changes.recv().await {
            tracing::debug!(action = action.name(), "List changed");
        }
    });

    list.add_item("Milk").await;
    list.add_item("Eggs").await;
    show(&list, "Added Milk and Eggs").await;

    let milk = list
        .items()
        .await
        .into_iter()
        .find(|item| item.text == "Milk")
        .map(|item| item.id);
    if let Some(id) = &milk {
        list.toggle_item(id).await;
    }
    show(&list, "Picked up Milk").await;

    list.set_filter(Filter::Completed).await;
    show(&list, "Showing completed").await;

    list.clear_completed().await;
    list.set_filter(Filter::All).await;
    show(&list, "Cleared completed").await;

    list.close(config.flush_timeout).await?;
    watcher.abort();

    println!("Saved to {}", config.data_dir.display());
    Ok(())
}
