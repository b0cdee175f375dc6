use anyhow::Result;

use bazaar_core::workspace::ContainerId;

use crate::app::App;

pub async fn status(app: &App) -> Result<()> {
    let overview = app.catalog.setup_overview(&app.caller).await?;

    match overview.container {
        Some(id) => println!("Container:    {}", id),
        None => println!("Container:    not configured"),
    }
    println!(
        "Payment info: {}",
        if overview.payment_configured {
            "configured"
        } else {
            "not configured"
        }
    );
    println!("Products:     {}", overview.products);
    println!("Bundles:      {}", overview.bundles);
    Ok(())
}

pub async fn list_containers(app: &App) -> Result<()> {
    let containers = app.settings.available_containers(&app.caller).await?;
    if containers.is_empty() {
        println!("No containers. Add [[workspace.containers]] entries to bazaar.toml.");
        return Ok(());
    }
    let current = app.settings.snapshot().await.container_id;
    for container in containers {
        let marker = if Some(container.id) == current { "*" } else { " " };
        println!("{} {:>20}  {}", marker, container.id, container.name);
    }
    Ok(())
}

pub async fn set_container(app: &App, id: u64) -> Result<()> {
    let container = app
        .settings
        .configure_container(&app.caller, ContainerId(id))
        .await?;
    println!("Transaction channels will be created under '{}'", container.name);
    Ok(())
}

pub async fn show_payment(app: &App) -> Result<()> {
    println!("{}", app.settings.payment_info().await);
    Ok(())
}

pub async fn set_payment(app: &App, text: &str) -> Result<()> {
    app.settings
        .configure_payment_info(&app.caller, text)
        .await?;
    println!("Payment info updated");
    Ok(())
}
