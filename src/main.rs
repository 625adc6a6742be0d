use std::io::{self, BufRead, Write};
use std::net::TcpListener;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use shop_console::config::{ClientConfig, ServerConfig};
use shop_console::console::{Console, NoticeKind};
use shop_console::forms::{OrderForm, ProductForm, UserForm};
use shop_console::{build_server, new_catalog, ApiClient};

#[derive(Parser)]
#[command(name = "shop_console")]
#[command(about = "Manage users, products and orders through the shop REST API")]
struct Cli {
    /// Base URL of the API; overrides API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Run the in-memory reference backend on HOST:PORT.
    Serve,
}

#[derive(Subcommand)]
enum UserAction {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        id: i64,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    List,
    Create {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        quantity: String,
    },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    match cli.command {
        Command::Serve => serve().await,
        Command::Users { action } => users(&mut console(cli.api_url)?, action).await,
        Command::Products { action } => products(&mut console(cli.api_url)?, action).await,
        Command::Orders { action } => orders(&mut console(cli.api_url)?, action).await,
    }
}

/// A console talking to `--api-url`, or to `API_URL` when the flag is absent.
fn console(api_url: Option<String>) -> anyhow::Result<Console> {
    let config = match api_url {
        Some(url) => ClientConfig::new(url)?,
        None => ClientConfig::from_env()?,
    };
    Ok(Console::new(ApiClient::from_config(&config)))
}

async fn serve() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(new_catalog(), listener)?.await?;
    Ok(())
}

async fn users(console: &mut Console, action: UserAction) -> anyhow::Result<()> {
    match action {
        UserAction::List => {
            console.refresh_users().await;
            report(console)?;
            if console.users().is_empty() {
                println!("No users found");
            }
            for user in console.users() {
                println!("#{}  {}  <{}>", user.id, user.name, user.email);
            }
            Ok(())
        }
        UserAction::Create { name, email } => {
            console.submit_user(&UserForm { name, email }).await;
            report(console)
        }
        UserAction::Delete { id, yes } => {
            if !yes && !confirm("user")? {
                return Ok(());
            }
            console.remove_user(id).await;
            report(console)
        }
    }
}

async fn products(console: &mut Console, action: ProductAction) -> anyhow::Result<()> {
    match action {
        ProductAction::List => {
            console.refresh_products().await;
            report(console)?;
            if console.products().is_empty() {
                println!("No products found");
            }
            for product in console.products() {
                println!(
                    "#{}  {}  ${}  {}",
                    product.id,
                    product.name,
                    product.price,
                    product
                        .description
                        .as_deref()
                        .filter(|d| !d.is_empty())
                        .unwrap_or("N/A")
                );
            }
            Ok(())
        }
        ProductAction::Create {
            name,
            price,
            description,
        } => {
            let form = ProductForm {
                name,
                price,
                description,
            };
            console.submit_product(&form).await;
            report(console)
        }
        ProductAction::Delete { id, yes } => {
            if !yes && !confirm("product")? {
                return Ok(());
            }
            console.remove_product(id).await;
            report(console)
        }
    }
}

async fn orders(console: &mut Console, action: OrderAction) -> anyhow::Result<()> {
    match action {
        OrderAction::List => {
            console.refresh_orders().await;
            report(console)?;
            if console.orders().is_empty() {
                println!("No orders found");
            }
            for order in console.orders() {
                println!(
                    "Order #{}  user={}  product={}  qty={}  total=${}  created={}",
                    order.id,
                    order.user_id,
                    order.product_id,
                    order.quantity,
                    order.total_price,
                    order.created_at.to_rfc3339()
                );
            }
            Ok(())
        }
        OrderAction::Create {
            user_id,
            product_id,
            quantity,
        } => {
            let form = OrderForm {
                user_id,
                product_id,
                quantity,
            };
            console.submit_order(&form).await;
            report(console)
        }
    }
}

/// Print the console's notice; an error notice becomes the process error.
fn report(console: &Console) -> anyhow::Result<()> {
    match console.notice() {
        Some(notice) if notice.kind == NoticeKind::Error => bail!("{}", notice.text),
        Some(notice) => {
            println!("{}", notice.text);
            Ok(())
        }
        None => Ok(()),
    }
}

fn confirm(noun: &str) -> anyhow::Result<bool> {
    print!("Are you sure you want to delete this {}? [y/N] ", noun);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
