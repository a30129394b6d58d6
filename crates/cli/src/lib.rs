pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use storefront_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat, LoggingConfig};
use storefront_core::domain::cart::{AddToCart, ModelCode};
use storefront_core::domain::contact::RfqContactInfo;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront cart and RFQ operator CLI",
    long_about = "Drive the persisted shopping cart and compose WhatsApp request-for-quotation messages.",
    after_help = "Examples:\n  storefront cart add --model DS-2CD --name \"Dome Camera\" --price 1850\n  storefront cart show\n  storefront rfq --mobile 9876543210 --name Asha --city Indore"
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    #[arg(long, global = true, help = "Path to storefront.toml")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Directory holding the cart slot")]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Storage key of the cart slot")]
    cart_key: Option<String>,
    #[arg(long, global = true, help = "Log level (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[arg(long, global = true, help = "WhatsApp business number, digits only")]
    business_handle: Option<String>,
    #[arg(long, global = true, help = "Empty the cart and redirect after an RFQ")]
    clear_cart_after_submit: bool,
}

impl GlobalArgs {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            overrides: ConfigOverrides {
                data_dir: self.data_dir.clone(),
                cart_key: self.cart_key.clone(),
                log_level: self.log_level.clone(),
                business_handle: self.business_handle.clone(),
                clear_cart_after_submit: self.clear_cart_after_submit.then_some(true),
            },
            ..LoadOptions::default()
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand, about = "Inspect and mutate the persisted cart")]
    Cart(CartCommand),
    #[command(about = "Validate contact details and compose the WhatsApp RFQ link")]
    Rfq(RfqArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

/// Missing required fields are accepted here so validation reports them in form order.
#[derive(Debug, Args)]
struct RfqArgs {
    #[arg(long = "mobile", default_value = "")]
    mobile_number: String,
    #[arg(long = "name", default_value = "")]
    customer_name: String,
    #[arg(long = "city", default_value = "")]
    city_name: String,
    #[arg(long = "shipping")]
    shipping_method: Option<String>,
    #[arg(long = "pincode")]
    delivery_pincode: Option<String>,
}

impl From<RfqArgs> for RfqContactInfo {
    fn from(args: RfqArgs) -> Self {
        Self {
            mobile_number: args.mobile_number,
            customer_name: args.customer_name,
            city_name: args.city_name,
            shipping_method: args.shipping_method,
            delivery_pincode: args.delivery_pincode,
        }
    }
}

#[derive(Debug, Subcommand)]
enum CartCommand {
    #[command(about = "Add one unit of a product")]
    Add {
        #[arg(long)]
        model: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Option<u64>,
        #[arg(long)]
        image: Option<String>,
    },
    #[command(about = "Remove a product line")]
    Remove {
        #[arg(long)]
        model: String,
    },
    #[command(about = "Set a line's quantity; zero or less removes it")]
    Update {
        #[arg(long)]
        model: String,
        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
    },
    #[command(about = "Render the cart listing and badge state")]
    Show {
        #[arg(long, default_value = "", help = "Path of the page rendering the badge")]
        page: String,
    },
    #[command(about = "Print subtotal, item count and total")]
    Totals,
    #[command(about = "Empty the cart")]
    Clear,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.global.load_options();

    // A broken config is reported by the command itself; logging falls back to defaults.
    let logging = AppConfig::load(options.clone())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    init_logging(&logging);

    let result = match cli.command {
        Command::Cart(command) => run_cart(&options, command),
        Command::Rfq(args) => commands::rfq::run(&options, args.into()),
        Command::Config => commands::config::run(&options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn run_cart(options: &LoadOptions, command: CartCommand) -> commands::CommandResult {
    match command {
        CartCommand::Add { model, name, price, image } => commands::cart::add(
            options,
            AddToCart { name, model: ModelCode(model), price, image },
        ),
        CartCommand::Remove { model } => commands::cart::remove(options, &ModelCode(model)),
        CartCommand::Update { model, quantity } => {
            commands::cart::update(options, &ModelCode(model), quantity)
        }
        CartCommand::Show { page } => commands::cart::show(options, &page),
        CartCommand::Totals => commands::cart::totals(options),
        CartCommand::Clear => commands::cart::clear(options),
    }
}

/// Logs go to stderr so stdout carries only the JSON command outcome.
fn init_logging(logging: &LoggingConfig) {
    use tracing::Level;

    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let _ = match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
