//! `nadzor` — terminal client for the market-inspection backend.
//!
//! Manages the signed-in session and the three resource collections
//! (inspection bodies, products, inspection controls), and renders the
//! safety report.

mod commands;
mod context;
mod render;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use nadzor_core::{BodyId, ControlId, ProductId};

use crate::context::AppContext;

/// Market-inspection tracking client.
#[derive(Parser, Debug)]
#[command(name = "nadzor", about = "Market-inspection tracking client", version)]
struct Cli {
    /// Backend base URL.
    #[arg(
        long = "server",
        global = true,
        env = "NADZOR_SERVER",
        default_value = "http://localhost:8080"
    )]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a backend account.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Password (omit to be prompted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        username: String,
        /// Password (omit to be prompted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the persisted session.
    Logout,

    /// Inspection bodies.
    Bodies {
        #[command(subcommand)]
        action: BodiesAction,
    },

    /// Products.
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },

    /// Inspection controls.
    Controls {
        #[command(subcommand)]
        action: ControlsAction,
    },

    /// Generate the safety report over filtered controls.
    Report {
        #[command(flatten)]
        filter: ControlFilterArgs,
        /// Print the single-record view of one control from the report.
        #[arg(long)]
        detail: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
enum BodiesAction {
    /// List bodies. Search flags are mutually ranked: name wins over
    /// contact names, then email, phone, jurisdiction and competency.
    List {
        /// Substring of the body name.
        #[arg(long)]
        name: Option<String>,
        /// Contact first name (used together with --last-name).
        #[arg(long = "first-name")]
        first_name: Option<String>,
        /// Contact last name (used together with --first-name).
        #[arg(long = "last-name")]
        last_name: Option<String>,
        /// Contact email, exact.
        #[arg(long)]
        email: Option<String>,
        /// Contact phone, exact.
        #[arg(long)]
        phone: Option<String>,
        /// Jurisdiction (FBIH, RS, DISTRIKT_BRCKO).
        #[arg(long)]
        jurisdiction: Option<String>,
        /// Competency (TRZISNA_INSPEKCIJA, ZDRAVSTVENO_SANITARNA_INSPEKCIJA).
        #[arg(long)]
        competency: Option<String>,
        /// Server-side sort by name instead of insertion order. Cannot be
        /// combined with the search flags.
        #[arg(
            long,
            conflicts_with_all = [
                "name",
                "first_name",
                "last_name",
                "email",
                "phone",
                "jurisdiction",
                "competency",
            ]
        )]
        sorted: bool,
    },
    /// Create a body.
    Create {
        #[arg(long)]
        name: String,
        /// Jurisdiction (FBIH, RS, DISTRIKT_BRCKO).
        #[arg(long)]
        jurisdiction: String,
        /// Competency (TRZISNA_INSPEKCIJA, ZDRAVSTVENO_SANITARNA_INSPEKCIJA).
        #[arg(long)]
        competency: String,
        #[arg(long = "first-name")]
        first_name: String,
        #[arg(long = "last-name")]
        last_name: String,
        #[arg(long)]
        email: String,
        /// Country calling prefix, e.g. +387.
        #[arg(long = "phone-prefix")]
        phone_prefix: String,
        /// National phone digits.
        #[arg(long = "phone-number")]
        phone_number: String,
    },
    /// Edit a body. Omitted flags keep their current value.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// Jurisdiction (FBIH, RS, DISTRIKT_BRCKO).
        #[arg(long)]
        jurisdiction: Option<String>,
        /// Competency (TRZISNA_INSPEKCIJA, ZDRAVSTVENO_SANITARNA_INSPEKCIJA).
        #[arg(long)]
        competency: Option<String>,
        #[arg(long = "first-name")]
        first_name: Option<String>,
        #[arg(long = "last-name")]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Country calling prefix, set together with --phone-number.
        #[arg(long = "phone-prefix", requires = "phone_number")]
        phone_prefix: Option<String>,
        /// National phone digits, set together with --phone-prefix.
        #[arg(long = "phone-number", requires = "phone_prefix")]
        phone_number: Option<String>,
    },
    /// Delete a body by id.
    Delete {
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ProductsAction {
    /// List products, optionally by name fragment.
    List {
        #[arg(long)]
        name: Option<String>,
    },
    /// Create a product. The serial number is assigned by the backend.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        manufacturer: String,
        /// Country of origin, one of `nadzor products countries`.
        #[arg(long)]
        country: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a product. Omitted flags keep their current value.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        manufacturer: Option<String>,
        /// Country of origin, one of `nadzor products countries`.
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a product by id.
    Delete {
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// List the countries of origin the backend accepts.
    Countries,
}

#[derive(Subcommand, Debug)]
enum ControlsAction {
    /// List controls, optionally filtered.
    List {
        #[command(flatten)]
        filter: ControlFilterArgs,
    },
    /// Record a control. Body and product are referenced by id.
    Create {
        /// Inspection date (YYYY-MM-DD, not in the future).
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "body-id")]
        body_id: i64,
        #[arg(long = "product-id")]
        product_id: i64,
        /// Result narrative.
        #[arg(long)]
        narrative: String,
        /// Safety verdict (true or false).
        #[arg(long, action = clap::ArgAction::Set)]
        safe: bool,
    },
    /// Edit a control. Omitted flags keep their current value.
    Update {
        id: i64,
        /// Inspection date (YYYY-MM-DD, not in the future).
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long = "body-id")]
        body_id: Option<i64>,
        #[arg(long = "product-id")]
        product_id: Option<i64>,
        /// Result narrative.
        #[arg(long)]
        narrative: Option<String>,
        /// Safety verdict.
        #[arg(long)]
        safe: Option<bool>,
    },
    /// Delete a control by id.
    Delete {
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

/// Combined AND filter over controls; absent flags are not sent.
#[derive(Args, Debug, Clone)]
struct ControlFilterArgs {
    #[arg(long = "body-id")]
    body_id: Option<i64>,
    /// Start of the date range (YYYY-MM-DD).
    #[arg(long)]
    start: Option<NaiveDate>,
    /// End of the date range (YYYY-MM-DD).
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Safety verdict (true or false).
    #[arg(long)]
    safe: Option<bool>,
}

impl ControlFilterArgs {
    fn into_filter(self) -> nadzor_client::ControlFilter {
        nadzor_client::ControlFilter {
            body_id: self.body_id.map(BodyId::new),
            start_date: self.start,
            end_date: self.end,
            safe: self.safe,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nadzor_observability::init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.server)?;

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => {
            let password = read_password(password)?;
            commands::auth::register(&ctx, &username, &email, &password).await
        }

        Commands::Login { username, password } => {
            let password = read_password(password)?;
            commands::auth::login(&ctx, &username, &password).await
        }

        Commands::Logout => commands::auth::logout(&ctx),

        Commands::Bodies { action } => match action {
            BodiesAction::List {
                name,
                first_name,
                last_name,
                email,
                phone,
                jurisdiction,
                competency,
                sorted,
            } => {
                let search = nadzor_client::BodySearch {
                    name,
                    contact_first_name: first_name,
                    contact_last_name: last_name,
                    contact_email: email,
                    contact_phone: phone,
                    jurisdiction: parse_opt(jurisdiction)?,
                    competency: parse_opt(competency)?,
                };
                commands::bodies::list(&ctx, search, sorted).await
            }
            BodiesAction::Create {
                name,
                jurisdiction,
                competency,
                first_name,
                last_name,
                email,
                phone_prefix,
                phone_number,
            } => {
                let draft = nadzor_bodies::BodyDraft {
                    id: None,
                    name,
                    jurisdiction: Some(jurisdiction.parse()?),
                    competency: Some(competency.parse()?),
                    first_name,
                    last_name,
                    email,
                    phone_prefix,
                    phone_number,
                };
                commands::bodies::create(&ctx, draft).await
            }
            BodiesAction::Update {
                id,
                name,
                jurisdiction,
                competency,
                first_name,
                last_name,
                email,
                phone_prefix,
                phone_number,
            } => {
                let update = commands::bodies::BodyUpdate {
                    name,
                    jurisdiction: parse_opt(jurisdiction)?,
                    competency: parse_opt(competency)?,
                    first_name,
                    last_name,
                    email,
                    phone_prefix,
                    phone_number,
                };
                commands::bodies::update(&ctx, BodyId::new(id), update).await
            }
            BodiesAction::Delete { id, yes } => {
                if !yes && !confirm(&format!("Delete inspection body {id}?"))? {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::bodies::delete(&ctx, BodyId::new(id)).await
            }
        },

        Commands::Products { action } => match action {
            ProductsAction::List { name } => commands::products::list(&ctx, name.as_deref()).await,
            ProductsAction::Create {
                name,
                manufacturer,
                country,
                description,
            } => {
                let draft = nadzor_products::ProductDraft {
                    id: None,
                    name,
                    manufacturer,
                    country,
                    description,
                };
                commands::products::create(&ctx, draft).await
            }
            ProductsAction::Update {
                id,
                name,
                manufacturer,
                country,
                description,
            } => {
                let update = commands::products::ProductUpdate {
                    name,
                    manufacturer,
                    country,
                    description,
                };
                commands::products::update(&ctx, ProductId::new(id), update).await
            }
            ProductsAction::Delete { id, yes } => {
                if !yes && !confirm(&format!("Delete product {id}?"))? {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::products::delete(&ctx, ProductId::new(id)).await
            }
            ProductsAction::Countries => commands::products::countries(&ctx).await,
        },

        Commands::Controls { action } => match action {
            ControlsAction::List { filter } => {
                commands::controls::list(&ctx, filter.into_filter()).await
            }
            ControlsAction::Create {
                date,
                body_id,
                product_id,
                narrative,
                safe,
            } => {
                commands::controls::create(
                    &ctx,
                    date,
                    BodyId::new(body_id),
                    ProductId::new(product_id),
                    narrative,
                    safe,
                )
                .await
            }
            ControlsAction::Update {
                id,
                date,
                body_id,
                product_id,
                narrative,
                safe,
            } => {
                let update = commands::controls::ControlUpdate {
                    date,
                    body_id: body_id.map(BodyId::new),
                    product_id: product_id.map(ProductId::new),
                    narrative,
                    safe,
                };
                commands::controls::update(&ctx, ControlId::new(id), update).await
            }
            ControlsAction::Delete { id, yes } => {
                if !yes && !confirm(&format!("Delete inspection control {id}?"))? {
                    println!("Cancelled.");
                    return Ok(());
                }
                commands::controls::delete(&ctx, ControlId::new(id)).await
            }
        },

        Commands::Report { filter, detail } => {
            commands::report::generate(&ctx, filter.into_filter(), detail.map(ControlId::new)).await
        }
    }
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    eprint!("{question} [y/N]: ");
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn read_password(flag: Option<String>) -> anyhow::Result<String> {
    match flag {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

fn parse_opt<T>(value: Option<String>) -> anyhow::Result<Option<T>>
where
    T: core::str::FromStr,
    T::Err: Into<anyhow::Error>,
{
    value
        .map(|v| v.parse::<T>().map_err(Into::into))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sorted_listing_rejects_search_flags() {
        let result = Cli::try_parse_from([
            "nadzor", "bodies", "list", "--sorted", "--name", "inspekcija",
        ]);
        assert!(result.is_err());

        let result =
            Cli::try_parse_from(["nadzor", "bodies", "list", "--sorted", "--jurisdiction", "RS"]);
        assert!(result.is_err());

        assert!(Cli::try_parse_from(["nadzor", "bodies", "list", "--sorted"]).is_ok());
    }
}
