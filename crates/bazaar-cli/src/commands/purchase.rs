use anyhow::{Result, bail};

use bazaar_core::workspace::{Actor, ActorId};

use crate::app::App;

pub enum Selection {
    Product(String),
    /// `option` is 1-based.
    BundleOption { bundle: String, option: usize },
}

/// Opens a transaction channel in the in-process workspace.
pub async fn buy(app: &App, buyer_name: &str, buyer_id: u64, selection: Selection) -> Result<()> {
    let item = match selection {
        Selection::Product(id) => app.catalog.product_item(&id).await?,
        Selection::BundleOption { bundle, option } => {
            let Some(index) = option.checked_sub(1) else {
                bail!("Option positions start at 1");
            };
            app.catalog.bundle_selection(&bundle, index).await?
        }
    };

    let buyer = Actor::new(ActorId(buyer_id), buyer_name);
    let cart = app
        .provisioner
        .provision(&buyer, app.caller.workspace.id, &item)
        .await?;
    let payment = app.provisioner.payment_info(&item).await;

    println!("Opened {} for '{}' (purchase #{})", cart.channel.name, item.title, cart.sequence);
    println!("Price: {}", payment.price);
    println!("{}", payment.text);
    Ok(())
}
