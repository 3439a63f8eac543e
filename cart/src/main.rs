//! Cart demo binary
//!
//! Mounts a cart from environment configuration, replays a short browsing
//! session and prints what the badge and checkout views would show.

use tourcart::consumers;
use tourcart::{CartAction, CartConfig, CartProvider, ItemId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CartConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Tour Cart ===\n");

    let cart = CartProvider::from_config(&config).await?;

    let restored = cart.state().await;
    if !restored.is_empty() {
        println!("Restored {} units from snapshot", restored.item_count());
    }

    let session = [
        CartAction::add("t1", "Heritage Walk", 900.0, Some("/img/heritage.jpg".into())),
        CartAction::add("t1", "Heritage Walk", 900.0, Some("/img/heritage.jpg".into())),
        CartAction::add("t2", "Food Trail", 600.0, None),
        CartAction::update_quantity("t1", 5),
    ];

    for action in session {
        println!(">>> {}", action.kind());
        cart.dispatch(action).await?;
        println!("    badge: {}", cart.badge().await.label());
    }

    let state = cart.state().await;
    if let Some(action) = consumers::decrement(&state, &ItemId::from("t2")) {
        println!(">>> {} (decrement on last unit)", action.kind());
        cart.dispatch(action).await?;
    }

    let summary = cart.summary().await;
    println!("\nCheckout:");
    for line in &summary.lines {
        println!(
            "  {:<16} {:>3} x {:>8.2} = {:>10.2}",
            line.name, line.quantity, line.unit_price, line.subtotal
        );
    }
    println!("  {:<16} {:>3}              {:>10.2}", "TOTAL", summary.item_count, summary.total);

    if let Some(path) = &config.snapshot_path {
        println!("\nSnapshot kept at {}", path.display());
    } else {
        cart.dispatch(CartAction::clear()).await?;
        println!("\nCart cleared (no snapshot path configured)");
    }

    cart.unmount().await?;
    Ok(())
}
