use anyhow::{Context, Result, bail};
use clap::Args;

use bazaar_core::catalog::{ImageDisplay, OptionFields, PanelFields, ProductFields};

use crate::app::App;

#[derive(Args)]
pub struct ProductArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Price as text, e.g. "19.90"
    #[arg(long)]
    price: String,
    #[arg(long)]
    image_url: Option<String>,
    /// Show the image below the text instead of above it
    #[arg(long)]
    below_text: bool,
}

impl From<ProductArgs> for ProductFields {
    fn from(args: ProductArgs) -> Self {
        ProductFields {
            title: args.title,
            description: args.description,
            price: args.price,
            image_url: args.image_url,
            image_display: image_display(args.below_text),
        }
    }
}

#[derive(Args)]
pub struct PanelArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Panel icon (defaults to 📦)
    #[arg(long)]
    icon: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    /// Show the image below the text instead of above it
    #[arg(long)]
    below_text: bool,
}

impl From<PanelArgs> for PanelFields {
    fn from(args: PanelArgs) -> Self {
        PanelFields {
            title: args.title,
            description: args.description,
            icon: args.icon,
            image_url: args.image_url,
            image_display: image_display(args.below_text),
        }
    }
}

fn image_display(below_text: bool) -> ImageDisplay {
    if below_text {
        ImageDisplay::BelowText
    } else {
        ImageDisplay::AboveText
    }
}

/// Parses `name|price[|description[|emoji]]`.
pub fn parse_option(raw: &str) -> Result<OptionFields> {
    let parts: Vec<&str> = raw.split('|').map(str::trim).collect();
    let (name, price) = match parts.as_slice() {
        [name, price, ..] if !name.is_empty() && !price.is_empty() => (*name, *price),
        _ => bail!("Option '{}' must look like \"name|price[|description[|emoji]]\"", raw),
    };
    if parts.len() > 4 {
        bail!("Option '{}' has more than four fields", raw);
    }

    let mut option = OptionFields::new(name, price);
    option.description = parts.get(2).filter(|d| !d.is_empty()).map(|d| d.to_string());
    option.emoji = parts.get(3).filter(|e| !e.is_empty()).map(|e| e.to_string());
    Ok(option)
}

pub async fn create_product(app: &App, args: ProductArgs) -> Result<()> {
    let product = app.catalog.create_product(&app.caller, args.into()).await?;
    println!("Created product {} '{}'", product.id, product.title);
    Ok(())
}

pub async fn edit_product(app: &App, id: &str, args: ProductArgs) -> Result<()> {
    let product = app
        .catalog
        .edit_product(&app.caller, id, args.into())
        .await?;
    println!("Updated product {} '{}'", product.id, product.title);
    Ok(())
}

pub async fn list_products(app: &App) -> Result<()> {
    let products = app.catalog.list_products(&app.caller).await?;
    if products.is_empty() {
        println!("No products");
    }
    for product in products {
        println!("{}  {}  ({})", product.id, product.title, product.price);
    }
    Ok(())
}

/// Drives the authoring dialogue in one go: draft, options, finalize.
pub async fn create_bundle(app: &App, panel: PanelArgs, options: &[String]) -> Result<()> {
    let options = options
        .iter()
        .map(|raw| parse_option(raw))
        .collect::<Result<Vec<_>>>()?;

    let key = app.builder.start_draft(&app.caller, panel.into()).await?;
    for option in options {
        app.builder.add_option(&app.caller, &key, option).await?;
    }
    let bundle_id = app
        .builder
        .finalize(&app.caller, &key)
        .await
        .context("Failed to finalize bundle")?;

    println!("Created bundle {}", bundle_id);
    Ok(())
}

pub async fn edit_bundle(app: &App, id: &str, panel: PanelArgs) -> Result<()> {
    let bundle = app.builder.edit_bundle(&app.caller, id, panel.into()).await?;
    println!("Updated bundle {} '{}'", bundle.id, bundle.title);
    Ok(())
}

pub async fn list_bundles(app: &App) -> Result<()> {
    let bundles = app.catalog.list_bundles(&app.caller).await?;
    if bundles.is_empty() {
        println!("No bundles");
    }
    for bundle in bundles {
        println!("{}  {} {}", bundle.id, bundle.icon, bundle.title);
        for (position, option) in bundle.selectable_options().iter().enumerate() {
            println!(
                "    {}. {} {} ({})",
                position + 1,
                option.emoji,
                option.name,
                option.price
            );
        }
    }
    Ok(())
}
