use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use bazaar_infrastructure::RuntimeSettings;

mod app;
mod commands;

use app::App;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(about = "Bazaar - storefront operator tool for a chat workspace", long_about = None)]
struct Cli {
    /// Runtime settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overriding the settings file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the setup overview
    Status,
    /// Container that transaction channels are created under
    Container {
        #[command(subcommand)]
        action: ContainerAction,
    },
    /// Payment instructions shown to buyers
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },
    /// Single products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Dropdown bundles
    Bundle {
        #[command(subcommand)]
        action: BundleAction,
    },
    /// Open a transaction channel for a purchase
    Buy(BuyArgs),
}

#[derive(Subcommand)]
enum ContainerAction {
    /// List containers of the workspace
    List,
    /// Set the container by id
    Set { id: u64 },
}

#[derive(Subcommand)]
enum PaymentAction {
    Show,
    /// Replace the payment text (at most 500 characters)
    Set { text: String },
}

#[derive(Subcommand)]
enum ProductAction {
    Create(commands::catalog::ProductArgs),
    Edit {
        id: String,
        #[command(flatten)]
        product: commands::catalog::ProductArgs,
    },
    List,
}

#[derive(Subcommand)]
enum BundleAction {
    /// Create a bundle from a panel and one or more options
    Create {
        #[command(flatten)]
        panel: commands::catalog::PanelArgs,
        /// Option as "name|price[|description[|emoji]]", repeatable
        #[arg(long = "option", required = true)]
        options: Vec<String>,
    },
    /// Replace the panel fields of a bundle
    Edit {
        id: String,
        #[command(flatten)]
        panel: commands::catalog::PanelArgs,
    },
    List,
}

#[derive(Args)]
struct BuyArgs {
    /// Display name of the buyer
    #[arg(long)]
    buyer: String,
    /// Member id of the buyer
    #[arg(long, default_value_t = 1000)]
    buyer_id: u64,
    #[arg(long, conflicts_with = "bundle", required_unless_present = "bundle")]
    product: Option<String>,
    #[arg(long, requires = "option")]
    bundle: Option<String>,
    /// 1-based position of the bundle option
    #[arg(long)]
    option: Option<usize>,
}

fn init_tracing(settings: &RuntimeSettings) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_filter)
            .with_context(|| format!("Invalid log_filter '{}'", settings.log_filter))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings =
        RuntimeSettings::load(cli.config.as_deref()).context("Failed to load runtime settings")?;
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = Some(data_dir);
    }
    init_tracing(&settings)?;

    let app = App::init(settings).await?;

    match cli.command {
        Commands::Status => commands::config::status(&app).await?,
        Commands::Container { action } => match action {
            ContainerAction::List => commands::config::list_containers(&app).await?,
            ContainerAction::Set { id } => commands::config::set_container(&app, id).await?,
        },
        Commands::Payment { action } => match action {
            PaymentAction::Show => commands::config::show_payment(&app).await?,
            PaymentAction::Set { text } => commands::config::set_payment(&app, &text).await?,
        },
        Commands::Product { action } => match action {
            ProductAction::Create(product) => {
                commands::catalog::create_product(&app, product).await?
            }
            ProductAction::Edit { id, product } => {
                commands::catalog::edit_product(&app, &id, product).await?
            }
            ProductAction::List => commands::catalog::list_products(&app).await?,
        },
        Commands::Bundle { action } => match action {
            BundleAction::Create { panel, options } => {
                commands::catalog::create_bundle(&app, panel, &options).await?
            }
            BundleAction::Edit { id, panel } => {
                commands::catalog::edit_bundle(&app, &id, panel).await?
            }
            BundleAction::List => commands::catalog::list_bundles(&app).await?,
        },
        Commands::Buy(args) => {
            let selection = match (args.product, args.bundle, args.option) {
                (Some(product), _, _) => commands::purchase::Selection::Product(product),
                (None, Some(bundle), Some(option)) => {
                    commands::purchase::Selection::BundleOption { bundle, option }
                }
                _ => anyhow::bail!("Either --product or --bundle with --option is required"),
            };
            commands::purchase::buy(&app, &args.buyer, args.buyer_id, selection).await?
        }
    }

    Ok(())
}
