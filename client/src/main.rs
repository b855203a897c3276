//! Client entry-point: parses the command line, wires the adapters, restores
//! the stored session, and dispatches one operation against the platform.

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use client::config::ClientSettings;
use client::domain::accounts::AccountService;
use client::domain::portfolio::PortfolioService;
use client::domain::ports::PlatformGateway;
use client::domain::requests::ServiceRequest;
use client::domain::session::{LoginCredentials, RegistrationForm, Session};
use client::domain::submission::SubmissionPipeline;
use client::inbound::cli::{
    ApplyArgs, Cli, Command, ConsoleSessionWatch, ConsoleSubmissionListener, RequestKindArg,
    StdinAmountPrompt,
};
use client::outbound::http::HttpPlatformGateway;
use client::outbound::session_file::FileSessionStore;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

type Store = FileSessionStore;
type Watch = ConsoleSessionWatch;
type Gateway = HttpPlatformGateway<Store, Watch>;
type Accounts = AccountService<Store, Gateway, Watch>;
type Portfolio = PortfolioService<Store, Gateway>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<()> {
    let settings = ClientSettings::load_from_iter([OsString::from("spv")])
        .wrap_err("failed to load configuration")?;

    let store = Arc::new(FileSessionStore::open(&settings.session_file())?);
    let watch = Arc::new(ConsoleSessionWatch);
    let gateway = Arc::new(
        HttpPlatformGateway::with_watch(
            settings.api_url().wrap_err("invalid API base URL")?,
            settings.timeout(),
            Arc::clone(&store),
            Arc::clone(&watch),
        )
        .wrap_err("failed to build the HTTP client")?,
    );
    let accounts = AccountService::new(Arc::clone(&store), Arc::clone(&gateway), watch);
    let portfolio = PortfolioService::new(Arc::clone(&store), Arc::clone(&gateway));

    let session = accounts.restore();

    match cli.command {
        Command::Login { email, password } => login(&accounts, &email, &password).await,
        Command::Register {
            full_name,
            email,
            password,
            phone,
        } => register(&accounts, &full_name, &email, &password, phone.as_deref()).await,
        Command::Logout => {
            accounts.logout()?;
            println!("Signed out.");
            Ok(())
        }
        Command::Status => {
            show_status(&store, session.as_ref());
            Ok(())
        }
        Command::Apply(args) => apply(&gateway, &args).await,
        Command::Dashboard => show_dashboard(&portfolio).await,
        Command::Investments => {
            let rows = portfolio.investments().await?;
            render_rows(&rows, "No investments yet.")
        }
        Command::Applications => {
            let rows = portfolio.applications().await?;
            render_rows(&rows, "No applications yet.")
        }
        Command::Request { kind, description } => {
            file_request(&gateway, session.as_ref(), kind, &description).await
        }
    }
}

async fn login(accounts: &Accounts, email: &str, password: &str) -> Result<()> {
    let credentials = LoginCredentials::try_from_parts(email, password)?;
    accounts.login(&credentials).await?;
    Ok(())
}

async fn register(
    accounts: &Accounts,
    full_name: &str,
    email: &str,
    password: &str,
    phone: Option<&str>,
) -> Result<()> {
    let form = RegistrationForm::try_from_parts(full_name, email, password, phone)?;
    if accounts.register(&form).await?.is_none() {
        println!("Account created. Sign in with `spv login`.");
    }
    Ok(())
}

fn show_status(store: &Store, session: Option<&Session>) {
    if session.is_none() {
        println!("Not signed in.");
    }
    println!("Session file: {}", store.path().display());
}

async fn apply(gateway: &Arc<Gateway>, args: &ApplyArgs) -> Result<()> {
    let pipeline = SubmissionPipeline::new(
        Arc::clone(gateway),
        Arc::new(StdinAmountPrompt::new(args.amount)),
        Arc::new(ConsoleSubmissionListener),
    );
    let record = pipeline.submit(&args.to_draft()).await?;
    println!("{}", serde_json::to_string_pretty(record.fields())?);
    Ok(())
}

async fn show_dashboard(portfolio: &Portfolio) -> Result<()> {
    let view = portfolio.bootstrap().await?;
    println!("Total invested:     {}", view.summary.total_invested);
    println!("Current value:      {}", view.summary.current_value);
    println!("Total returns:      {}", view.summary.total_returns);
    println!("Active investments: {}", view.summary.active_investments);
    if !view.investments.is_empty() {
        println!();
        render_rows(&view.investments, "")?;
    }
    Ok(())
}

fn render_rows<T: Serialize>(rows: &[T], empty_message: &str) -> Result<()> {
    if rows.is_empty() {
        if !empty_message.is_empty() {
            println!("{empty_message}");
        }
        return Ok(());
    }
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}

async fn file_request(
    gateway: &Gateway,
    session: Option<&Session>,
    kind: RequestKindArg,
    description: &str,
) -> Result<()> {
    if session.is_none() {
        println!("Please login to access this feature");
        return Ok(());
    }

    let request = ServiceRequest::new(kind.into(), description)?;
    gateway.submit_service_request(&request).await?;
    println!("Request submitted successfully");
    Ok(())
}
