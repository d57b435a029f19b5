use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use recipebook::api::{Endpoints, ReqwestTransport};
use recipebook::app::{App, AppDeps};
use recipebook::config::{Config, SecureString};
use recipebook::logging::init_tracing;
use recipebook::model::{Ingredient, Record};
use recipebook::navigation::LogNavigator;
use recipebook::storage::FileStorage;
use recipebook::store::Action;

#[derive(Parser)]
#[command(name = "recipebook")]
#[command(version)]
#[command(about = "Recipe book client: session and recipe sync")]
struct Cli {
    /// Path to the config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup(Credentials),
    /// Log in with an existing account
    Login(Credentials),
    /// Show the persisted session
    Status,
    /// Download and list the stored recipes
    Fetch,
    /// Add a recipe and upload the whole list
    Save {
        /// Recipe name
        #[arg(long)]
        name: String,

        /// Recipe description
        #[arg(long, default_value = "")]
        description: String,

        /// Image URL
        #[arg(long, default_value = "")]
        image: String,

        /// Ingredient as NAME=AMOUNT (repeatable)
        #[arg(long = "ingredient", value_name = "NAME=AMOUNT", value_parser = parse_ingredient)]
        ingredients: Vec<Ingredient>,
    },
    /// End the session and forget the persisted credential
    Logout,
}

#[derive(clap::Args)]
struct Credentials {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long)]
    password: String,
}

fn parse_ingredient(raw: &str) -> Result<Ingredient, String> {
    let (name, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got '{}'", raw))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid amount '{}': {}", amount, e))?;
    Ok(Ingredient {
        name: name.trim().to_string(),
        amount,
    })
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }?;
    config.validate()?;
    Ok(config)
}

fn build_deps(config: &Config) -> Result<AppDeps> {
    let api_key = config
        .backend
        .resolve_api_key()
        .ok_or_else(|| anyhow!("no API key configured"))?;
    let transport = ReqwestTransport::new(&config.http).context("failed to build HTTP client")?;
    let storage = FileStorage::new(config.storage.resolve_path());
    tracing::debug!(path = %storage.path().display(), "Using storage file");

    Ok(AppDeps {
        transport: Arc::new(transport),
        storage: Arc::new(storage),
        navigator: Arc::new(LogNavigator),
        endpoints: Endpoints::from_config(&config.backend, &api_key),
    })
}

async fn authenticate(app: &App, action: Action) -> Result<()> {
    let outcome = app
        .dispatch_and_wait(action, |action| {
            matches!(
                action,
                Action::AuthenticateSuccess { .. } | Action::AuthenticateFail(_)
            )
        })
        .await;

    match outcome {
        Some(Action::AuthenticateSuccess { credential, .. }) => {
            println!(
                "Logged in as {} (session valid until {})",
                credential.email,
                credential.expires_at.to_rfc3339()
            );
            Ok(())
        }
        Some(Action::AuthenticateFail(message)) => bail!(message),
        _ => bail!("authentication did not complete"),
    }
}

async fn require_session(app: &App) -> Result<()> {
    if app.restore_session().await.is_none() {
        bail!("not logged in");
    }
    Ok(())
}

async fn fetch(app: &App) -> Result<Vec<Record>> {
    let outcome = app
        .dispatch_and_wait(Action::FetchRecords, |action| {
            matches!(action, Action::SetRecords(_) | Action::RecordsSyncFail(_))
        })
        .await;

    match outcome {
        Some(Action::SetRecords(records)) => Ok(records),
        Some(Action::RecordsSyncFail(message)) => bail!(message),
        _ => bail!("fetch did not complete"),
    }
}

fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No recipes stored.");
        return;
    }
    for (index, record) in records.iter().enumerate() {
        println!("{}. {}", index + 1, record.name);
        if !record.description.is_empty() {
            println!("   {}", record.description);
        }
        for ingredient in &record.ingredients {
            println!("   - {} x{}", ingredient.name, ingredient.amount);
        }
    }
}

async fn run(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Signup(credentials) => {
            authenticate(
                app,
                Action::SignUpStart {
                    email: credentials.email,
                    password: SecureString::new(credentials.password),
                },
            )
            .await
        }
        Commands::Login(credentials) => {
            authenticate(
                app,
                Action::LoginStart {
                    email: credentials.email,
                    password: SecureString::new(credentials.password),
                },
            )
            .await
        }
        Commands::Status => {
            match app.restore_session().await {
                Some(credential) => println!(
                    "Logged in as {} (session valid until {})",
                    credential.email,
                    credential.expires_at.to_rfc3339()
                ),
                None => println!("Not logged in."),
            }
            Ok(())
        }
        Commands::Fetch => {
            require_session(app).await?;
            let records = fetch(app).await?;
            print_records(&records);
            Ok(())
        }
        Commands::Save {
            name,
            description,
            image,
            ingredients,
        } => {
            require_session(app).await?;
            fetch(app).await?;

            let mut record = Record::new(name, description);
            record.image_path = image;
            record.ingredients = ingredients;
            app.store().dispatch(Action::AddRecord(record));
            app.store().dispatch(Action::StoreRecords);
            Ok(())
        }
        Commands::Logout => {
            app.store().dispatch(Action::Logout);
            println!("Logged out.");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let app = App::start(build_deps(&config)?);
    let store = app.store().clone();
    let is_save = matches!(cli.command, Commands::Save { .. });

    let result = tokio::select! {
        result = run(&app, cli.command) => result,
        _ = tokio::signal::ctrl_c() => Err(anyhow!("interrupted")),
    };

    // Lets a pending save or logout finish before the process exits.
    app.shutdown().await;
    result?;

    if is_save {
        if let Some(message) = &store.get_state().records.sync_error {
            bail!(message.clone());
        }
        println!("Saved.");
    }
    Ok(())
}
