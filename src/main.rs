//! stockroom - inventory tracking for small shops
//!
//! Every invocation starts the actors against the data directory, runs one
//! command and shuts down again, so state lives entirely in the JSON files.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use resource_actor::ActorClient;
use stockroom::config::{Config, DEFAULT_DATA_DIR, DEFAULT_LOG_LEVEL};
use stockroom::highlight::RowColor;
use stockroom::i18n::{unit_key, Language, Translator};
use stockroom::lifecycle::{setup_tracing, InventorySystem};
use stockroom::model::{AccountCreate, AccountUpdate, Product, ProductId, SettingsUpdate, Unit};
use tracing::{debug, info};

/// stockroom - inventory tracking for small shops
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the JSON data files
    #[arg(long, env = "STOCKROOM_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, env = "STOCKROOM_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Language for this run only (en, hi); defaults to the saved language
    #[arg(long)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Account ===
    /// Register a shop and log in
    Signup {
        #[arg(long)]
        owner_name: String,
        #[arg(long)]
        shop_name: String,
        #[arg(long)]
        shop_address: String,
        #[arg(long)]
        shop_category: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log in with e-mail and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Recover access: without --code, request a code; with it, verify and log in
    Recover {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: Option<String>,
    },

    /// Edit the logged-in account's profile or password
    Profile {
        #[arg(long)]
        owner_name: Option<String>,
        #[arg(long)]
        shop_name: Option<String>,
        #[arg(long)]
        shop_address: Option<String>,
        #[arg(long)]
        shop_category: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    // === Inventory ===
    /// Add a product with quantity 0
    Add {
        /// Product name
        name: String,
    },

    /// List products with their alerts
    #[command(alias = "ls")]
    List {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add one unit
    Inc {
        /// Product id or unique prefix
        id: String,
    },

    /// Remove one unit (never below zero)
    Dec {
        /// Product id or unique prefix
        id: String,
    },

    /// Set the quantity directly
    SetQty {
        /// Product id or unique prefix
        id: String,
        /// New quantity; negative values are stored as 0
        #[arg(allow_negative_numbers = true)]
        qty: f64,
    },

    /// Change the unit (pcs, kg, liter, meter, box)
    Unit {
        /// Product id or unique prefix
        id: String,
        unit: Unit,
    },

    /// Rename a product
    Rename {
        /// Product id or unique prefix
        id: String,
        name: String,
    },

    /// Set the expiry date (YYYY-MM-DD or RFC 3339), or `none` to clear it
    Expiry {
        /// Product id or unique prefix
        id: String,
        date: String,
        /// Days before expiry to start alerting
        #[arg(long)]
        alert_days: Option<u32>,
    },

    /// Delete a product
    Delete {
        /// Product id or unique prefix
        id: String,
    },

    // === Preferences ===
    /// Show or change the alert thresholds
    Settings {
        /// Percentage drop that counts as low stock (0-100, 0 disables)
        #[arg(long)]
        low_stock_percent: Option<u8>,
        /// Days without change before a product is stale (0 disables)
        #[arg(long)]
        no_change_days: Option<u32>,
    },

    /// Save the display language (en, hi)
    Lang { language: Language },
}

impl Commands {
    /// Account and language commands work without a session.
    fn needs_login(&self) -> bool {
        !matches!(
            self,
            Commands::Signup { .. }
                | Commands::Login { .. }
                | Commands::Logout
                | Commands::Whoami
                | Commands::Recover { .. }
                | Commands::Lang { .. }
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config {
        log_level: cli.log_level.clone(),
        ..Config::new(&cli.data_dir)
    };
    setup_tracing(config.log_directive());
    info!(data_dir = %config.data_dir.display(), "Starting");

    let system = InventorySystem::start(&config)
        .with_context(|| format!("failed to open {}", config.data_dir.display()))?;
    let t = match cli.lang {
        Some(language) => Translator::new(language),
        None => system.translator()?,
    };
    debug!(language = t.language().code(), "Translator ready");

    let result = run(cli.command, &system, &t).await;
    system.shutdown().await?;
    result
}

async fn run(command: Commands, system: &InventorySystem, t: &Translator) -> Result<()> {
    if command.needs_login() && system.auth.current_user()?.is_none() {
        bail!("{}", t.t("notLoggedIn"));
    }

    let products = &system.product_client;
    match command {
        Commands::Signup {
            owner_name,
            shop_name,
            shop_address,
            shop_category,
            email,
            password,
        } => {
            let account = system
                .auth
                .signup(AccountCreate {
                    owner_name,
                    shop_name,
                    shop_address,
                    shop_category,
                    email,
                    password,
                })
                .await?;
            println!("{}: {} ({})", t.t("loggedInAs"), account.email, account.shop_name);
        }
        Commands::Login { email, password } => {
            let account = system.auth.login(&email, &password).await.map_err(|e| {
                debug!(error = %e, "Login failed");
                anyhow!("{}", t.t("invalidCredentials"))
            })?;
            println!("{}: {} ({})", t.t("loggedInAs"), account.email, account.shop_name);
        }
        Commands::Logout => {
            system.auth.logout()?;
            println!("{}", t.t("loggedOut"));
        }
        Commands::Whoami => match system.auth.current_user()? {
            Some(account) => {
                println!("{}: {}", t.t("ownerName"), account.owner_name);
                println!("{}: {}", t.t("shopName"), account.shop_name);
                println!("{}: {}", t.t("shopAddress"), account.shop_address);
                println!("{}: {}", t.t("shopCategory"), account.shop_category);
                println!("{}: {}", t.t("emailId"), account.email);
            }
            None => println!("{}", t.t("notLoggedIn")),
        },
        Commands::Recover { email, code } => match code {
            None => {
                system.auth.request_recovery(&email).await?;
                println!("{}. {}", t.t("codeSent"), t.t("codeHint"));
            }
            Some(code) => {
                let account = system
                    .auth
                    .complete_recovery(&email, &code)
                    .await
                    .map_err(|e| anyhow!("{}: {}", t.t("invalidCode"), e))?;
                println!("{}: {}", t.t("loggedInAs"), account.email);
            }
        },
        Commands::Profile {
            owner_name,
            shop_name,
            shop_address,
            shop_category,
            password,
        } => {
            let account = system
                .auth
                .update_profile(AccountUpdate {
                    owner_name,
                    shop_name,
                    shop_address,
                    shop_category,
                    password,
                })
                .await?;
            println!("{}", t.t("saved"));
            println!("{}: {}", t.t("ownerName"), account.owner_name);
            println!("{}: {}", t.t("shopName"), account.shop_name);
        }
        Commands::Add { name } => {
            let id = products.add_product(name).await?;
            println!("{}: {}", t.t("productAdded"), id);
        }
        Commands::List { search } => {
            let settings = system.settings.current();
            let now = system.clock.now();
            let rows = products.list_with_alerts(&settings, now).await?;
            let query = search.unwrap_or_default();
            let rows: Vec<_> = rows
                .into_iter()
                .filter(|(product, _)| product.matches(&query))
                .collect();

            if rows.is_empty() {
                println!("{}. {}", t.t("noProducts"), t.t("noProductsDesc"));
            }
            for (product, tag) in rows {
                let alert = tag.map(|tag| t.t(tag.label_key())).unwrap_or("-");
                println!(
                    "{:<8}  {:<24}  {:>8} -> {:<8} {:<10} {:<10}  {:<16} {}",
                    short_id(product.id),
                    product.name,
                    product.previous_qty,
                    product.current_qty,
                    t.t(unit_key(product.unit)),
                    product
                        .expiry_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    alert,
                    RowColor::for_tag(tag).hex(),
                );
            }
        }
        Commands::Inc { id } => {
            let change = products.increment(resolve(system, &id).await?).await?;
            print_change(t, change.previous_qty, change.current_qty);
        }
        Commands::Dec { id } => {
            let change = products.decrement(resolve(system, &id).await?).await?;
            print_change(t, change.previous_qty, change.current_qty);
        }
        Commands::SetQty { id, qty } => {
            let change = products.set_quantity(resolve(system, &id).await?, qty).await?;
            print_change(t, change.previous_qty, change.current_qty);
        }
        Commands::Unit { id, unit } => {
            let product = products.set_unit(resolve(system, &id).await?, unit).await?;
            println!("{}: {}", t.t("unit"), t.t(unit_key(product.unit)));
        }
        Commands::Rename { id, name } => {
            let product = products.rename(resolve(system, &id).await?, name).await?;
            println!("{}: {}", t.t("productName"), product.name);
        }
        Commands::Expiry {
            id,
            date,
            alert_days,
        } => {
            let id = resolve(system, &id).await?;
            let expiry = parse_expiry(&date)?;
            products.set_expiry(id, expiry).await?;
            if let Some(days) = alert_days {
                products.set_expiry_alert_days(id, days).await?;
            }
            match expiry {
                Some(date) => println!("{}: {}", t.t("expiryDate"), date.format("%Y-%m-%d")),
                None => println!("{}", t.t("clearExpiry")),
            }
        }
        Commands::Delete { id } => {
            let id = resolve(system, &id).await?;
            products.delete(id).await?;
            println!("{}: {}", t.t("deleteProduct"), id);
        }
        Commands::Settings {
            low_stock_percent,
            no_change_days,
        } => {
            let update = SettingsUpdate {
                low_stock_percent,
                no_change_days,
            };
            let settings = if update.is_empty() {
                system.settings.current()
            } else {
                let settings = system.settings.update(update)?;
                println!("{}", t.t("saved"));
                settings
            };
            println!("{}: {}", t.t("lowStockPercent"), settings.low_stock_percent);
            println!("{}: {}", t.t("noChangeDays"), settings.no_change_days);
        }
        Commands::Lang { language } => {
            language.save(&system.store)?;
            let t = Translator::new(language);
            let name = match language {
                Language::En => t.t("english"),
                Language::Hi => t.t("hindi"),
            };
            println!("{}: {}", t.t("language"), name);
        }
    }
    Ok(())
}

fn print_change(t: &Translator, previous: f64, current: f64) {
    println!(
        "{}: {}  {}: {}",
        t.t("previousQty"),
        previous,
        t.t("currentQty"),
        current
    );
}

fn short_id(id: ProductId) -> String {
    id.to_string().chars().take(8).collect()
}

/// Finds the one product whose id starts with `prefix`.
async fn resolve(system: &InventorySystem, prefix: &str) -> Result<ProductId> {
    let all: Vec<Product> = system.product_client.list().await?;
    let ids: Vec<ProductId> = all.iter().map(|p| p.id).collect();
    match_prefix(&ids, prefix)
}

fn match_prefix(ids: &[ProductId], prefix: &str) -> Result<ProductId> {
    let prefix = prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        bail!("product id must not be empty");
    }
    let matches: Vec<ProductId> = ids
        .iter()
        .copied()
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no product matches '{prefix}'"),
        _ => bail!("'{prefix}' matches {} products, use a longer prefix", matches.len()),
    }
}

/// `none` clears; otherwise RFC 3339 or a plain date at midnight UTC.
fn parse_expiry(input: &str) -> Result<Option<DateTime<Utc>>> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{input}', expected YYYY-MM-DD or RFC 3339"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid date '{input}'"))?;
    Ok(Some(midnight.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn test_parse_expiry_formats() {
        assert_eq!(parse_expiry("none").unwrap(), None);
        assert_eq!(
            parse_expiry("2025-12-31").unwrap(),
            Some(Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_expiry("2025-12-31T18:30:00+05:30").unwrap(),
            Some(Utc.with_ymd_and_hms(2025, 12, 31, 13, 0, 0).unwrap())
        );
        assert!(parse_expiry("31/12/2025").is_err());
    }

    #[test]
    fn test_match_prefix() {
        let a = ProductId(Uuid::parse_str("aaaa1111-0000-4000-8000-000000000000").unwrap());
        let b = ProductId(Uuid::parse_str("aaaa2222-0000-4000-8000-000000000000").unwrap());
        let ids = [a, b];

        assert_eq!(match_prefix(&ids, "AAAA1").unwrap(), a);
        assert!(match_prefix(&ids, "aaaa").is_err());
        assert!(match_prefix(&ids, "ffff").is_err());
        assert!(match_prefix(&ids, "").is_err());
    }

    #[test]
    fn test_cli_parses_negative_quantity_and_global_flags() {
        let cli = Cli::try_parse_from([
            "stockroom",
            "--data-dir",
            "/tmp/shop",
            "--lang",
            "hi",
            "set-qty",
            "abcd",
            "-3",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(cli.lang, Some(Language::Hi));
        assert!(matches!(cli.command, Commands::SetQty { qty, .. } if qty == -3.0));
        assert!(cli.command.needs_login());
    }

    #[test]
    fn test_profile_command_requires_login() {
        let cli = Cli::try_parse_from(["stockroom", "profile", "--shop-name", "Asha Stores"])
            .unwrap();
        assert!(cli.command.needs_login());
        assert!(matches!(
            cli.command,
            Commands::Profile { ref shop_name, ref password, .. }
                if shop_name.as_deref() == Some("Asha Stores") && password.is_none()
        ));
    }
}
