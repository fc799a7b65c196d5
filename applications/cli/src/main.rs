//! Helpernote - operator CLI for the job-matching back office

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use helpernote_client::{ClientError, FileTokenStore, HelpernoteClient};
use helpernote_core::currency::format_currency;
use helpernote_core::fee::format_fee_calculation;
use helpernote_core::phone::{format_phone_number, is_valid_phone_number};
use helpernote_core::{
    route_access, CoreError, CustomerQuery, CustomerSearch, CustomerType, JobPostingQuery,
    JobSeekingQuery, MatchingQuery, MatchingStatus, PostingStatus, SettlementStatus,
};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod output;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "helpernote")]
#[command(about = "Helpernote back-office CLI", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./helpernote.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and save the session
    Login {
        /// Username
        username: String,
        /// Password
        #[arg(short, long, env = "HELPERNOTE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Customers (employers and job seekers)
    #[command(subcommand)]
    Customers(CustomerCommands),
    /// Job postings (employer side)
    #[command(subcommand)]
    Postings(PostingCommands),
    /// Job seekings (worker side)
    #[command(subcommand)]
    Seekings(SeekingCommands),
    /// Matchings between postings and seekings
    #[command(subcommand)]
    Matchings(MatchingCommands),
    /// Fee settlements
    #[command(subcommand)]
    Settlements(SettlementCommands),
    /// Customer tags
    #[command(subcommand)]
    Tags(TagCommands),
    /// Calculate a fee: round(amount × rate / 100)
    Fee {
        /// Amount in won
        amount: Decimal,
        /// Rate in percent
        rate: Decimal,
    },
    /// Format and validate a Korean phone number
    Phone {
        input: String,
    },
    /// Show how a dashboard path is gated
    Route {
        path: String,
        /// Decide as a signed-in visitor
        #[arg(long)]
        authenticated: bool,
    },
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// List customers
    List {
        #[arg(long, value_enum)]
        customer_type: Option<CustomerTypeArg>,
        /// Only customers with all of these tag ids
        #[arg(long, value_delimiter = ',')]
        tags: Vec<i64>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Search customers by name or phone
    Search {
        query: String,
        #[command(flatten)]
        paging: Paging,
    },
    /// Show one customer
    Show { id: i64 },
}

#[derive(Subcommand)]
enum PostingCommands {
    /// List job postings
    List {
        #[arg(long, value_enum)]
        status: Option<PostingStatusArg>,
        #[arg(long, value_enum)]
        settlement: Option<SettlementStatusArg>,
        /// Favorites only
        #[arg(long)]
        favorites: bool,
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Subcommand)]
enum SeekingCommands {
    /// List job seekings
    List {
        #[arg(long, value_enum)]
        status: Option<PostingStatusArg>,
        #[arg(long, value_enum)]
        settlement: Option<SettlementStatusArg>,
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Subcommand)]
enum MatchingCommands {
    /// List matchings
    List {
        #[arg(long, value_enum)]
        status: Option<MatchingStatusArg>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Show one matching with its fees
    Show { id: i64 },
}

#[derive(Subcommand)]
enum SettlementCommands {
    /// List settlement items, newest first
    List {
        #[arg(long, value_enum)]
        status: Option<SettlementStatusArg>,
    },
    /// Totals of settled and unsettled fees
    Summary,
}

#[derive(Subcommand)]
enum TagCommands {
    /// List tags
    List,
}

#[derive(Args)]
struct Paging {
    #[arg(long)]
    limit: Option<i64>,
    #[arg(long)]
    offset: Option<i64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CustomerTypeArg {
    Employer,
    Employee,
    Both,
}

impl From<CustomerTypeArg> for CustomerType {
    fn from(arg: CustomerTypeArg) -> Self {
        match arg {
            CustomerTypeArg::Employer => Self::Employer,
            CustomerTypeArg::Employee => Self::Employee,
            CustomerTypeArg::Both => Self::Both,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PostingStatusArg {
    Published,
    InProgress,
    Closed,
    Cancelled,
}

impl From<PostingStatusArg> for PostingStatus {
    fn from(arg: PostingStatusArg) -> Self {
        match arg {
            PostingStatusArg::Published => Self::Published,
            PostingStatusArg::InProgress => Self::InProgress,
            PostingStatusArg::Closed => Self::Closed,
            PostingStatusArg::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SettlementStatusArg {
    Unsettled,
    Settled,
}

impl From<SettlementStatusArg> for SettlementStatus {
    fn from(arg: SettlementStatusArg) -> Self {
        match arg {
            SettlementStatusArg::Unsettled => Self::Unsettled,
            SettlementStatusArg::Settled => Self::Settled,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MatchingStatusArg {
    InProgress,
    Completed,
    Cancelled,
}

impl From<MatchingStatusArg> for MatchingStatus {
    fn from(arg: MatchingStatusArg) -> Self {
        match arg {
            MatchingStatusArg::InProgress => Self::InProgress,
            MatchingStatusArg::Completed => Self::Completed,
            MatchingStatusArg::Cancelled => Self::Cancelled,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpernote=info,helpernote_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Offline commands need neither config nor a server.
    match &cli.command {
        Commands::Fee { amount, rate } => {
            println!("{}", format_fee_calculation(*amount, *rate)?);
            return Ok(());
        }
        Commands::Phone { input } => {
            let formatted = format_phone_number(input);
            let verdict = if is_valid_phone_number(input) {
                "유효"
            } else {
                "유효하지 않음"
            };
            println!("{} ({})", formatted, verdict);
            return Ok(());
        }
        Commands::Route {
            path,
            authenticated,
        } => {
            println!("{}", describe_route(path, *authenticated));
            return Ok(());
        }
        _ => {}
    }

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;
    debug!(url = %config.server.url, "Configuration loaded");

    let store = Arc::new(FileTokenStore::new(config.session.file.clone()));
    let client = HelpernoteClient::with_store(config.client_config(), store).await?;

    match cli.command {
        Commands::Login { username, password } => {
            let user = client.login(&username, &password).await?;
            println!("{}(으)로 로그인했습니다.", user.username);
        }
        Commands::Logout => {
            client.logout().await;
            println!("로그아웃했습니다.");
        }
        Commands::Whoami => {
            let user = client.me().await?;
            println!("{} (#{})", user.username, user.id);
        }
        Commands::Customers(command) => customers(&client, command).await?,
        Commands::Postings(PostingCommands::List {
            status,
            settlement,
            favorites,
            paging,
        }) => {
            let query = JobPostingQuery {
                status: status.map(Into::into),
                settlement_status: settlement.map(Into::into),
                is_favorite: favorites.then_some(true),
                limit: paging.limit,
                offset: paging.offset,
            };
            let page = client.job_postings().list(&query).await?;
            for posting in &page.items {
                println!("{}", output::job_posting_line(posting)?);
            }
            println!("총 {}건", page.total);
        }
        Commands::Seekings(SeekingCommands::List {
            status,
            settlement,
            paging,
        }) => {
            let query = JobSeekingQuery {
                status: status.map(Into::into),
                settlement_status: settlement.map(Into::into),
                preferred_location: None,
                limit: paging.limit,
                offset: paging.offset,
            };
            let page = client.job_seekings().list(&query).await?;
            for posting in &page.items {
                println!("{}", output::job_seeking_line(posting)?);
            }
            println!("총 {}건", page.total);
        }
        Commands::Matchings(MatchingCommands::List { status, paging }) => {
            let query = MatchingQuery {
                status: status.map(Into::into),
                limit: paging.limit,
                offset: paging.offset,
            };
            let page = client.matchings().list(&query).await?;
            for matching in &page.items {
                println!("{}", output::matching_line(matching)?);
            }
            println!("총 {}건", page.total);
        }
        Commands::Matchings(MatchingCommands::Show { id }) => {
            let matching = client.matchings().get(id).await?;
            println!("{}", output::matching_detail(&matching)?);
        }
        Commands::Settlements(SettlementCommands::List { status }) => {
            let items = client.settlements().list(status.map(Into::into)).await?;
            for item in &items {
                println!("{}", output::settlement_line(item));
            }
            let total: Decimal = items.iter().map(|i| i.effective_amount()).sum();
            println!("총 {}건  {}", items.len(), format_currency(total));
        }
        Commands::Settlements(SettlementCommands::Summary) => {
            let summary = client.settlements().summary().await?;
            println!("{}", output::settlement_summary(&summary));
        }
        Commands::Tags(TagCommands::List) => {
            let page = client.tags().list().await?;
            for tag in &page.items {
                println!("{}", output::tag_line(tag));
            }
        }
        Commands::Fee { .. } | Commands::Phone { .. } | Commands::Route { .. } => {}
    }

    Ok(())
}

async fn customers(client: &HelpernoteClient, command: CustomerCommands) -> Result<()> {
    let page = match command {
        CustomerCommands::List {
            customer_type,
            tags,
            paging,
        } => {
            let query = CustomerQuery {
                customer_type: customer_type.map(Into::into),
                tag_ids: tags,
                limit: paging.limit,
                offset: paging.offset,
            };
            client.customers().list(&query).await?
        }
        CustomerCommands::Search { query, paging } => {
            let search = CustomerSearch {
                q: query,
                limit: paging.limit,
                offset: paging.offset,
            };
            client.customers().search(&search).await?
        }
        CustomerCommands::Show { id } => {
            let customers = client.customers();
            let (customer, tags) = tokio::try_join!(customers.get(id), customers.tags(id))?;
            println!("{}", output::customer_detail(&customer, &tags.items));
            return Ok(());
        }
    };

    for customer in &page.items {
        println!("{}", output::customer_line(customer));
    }
    println!("총 {}명", page.total);
    Ok(())
}

fn describe_route(path: &str, authenticated: bool) -> String {
    match route_access(path, authenticated).location() {
        Some(location) => format!("redirect -> {}", location),
        None => "allow".to_string(),
    }
}

/// Print the Korean user-facing message for API errors.
fn report(error: &anyhow::Error) {
    if let Some(client_error) = error.downcast_ref::<ClientError>() {
        eprintln!("{}: {}", client_error.title(), client_error.user_message());
        debug!(error = %client_error, "Command failed");
    } else if let Some(core_error) = error.downcast_ref::<CoreError>() {
        eprintln!("{}", core_error);
    } else {
        eprintln!("Error: {:#}", error);
    }
}
