//! Developer tasks for the OrangeHRM suite
//!
//! ```text
//! cargo xtask save-session            # log in and write the storage state
//! cargo xtask resolve '["button", {"name": "Save"}]'
//! cargo xtask tables --page login     # print compiled selectors
//! cargo xtask config                  # print the effective configuration
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use orangehrm_e2e::locator::{self, LocatorDescriptor, LocatorTable};
use orangehrm_e2e::pages::tables;
use orangehrm_e2e::{ScenarioFactory, SuiteConfig};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Developer tasks for the OrangeHRM end-to-end suite")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with the configured credentials and save the session snapshot
    SaveSession {
        /// Project whose browser performs the login
        #[arg(long, default_value = "setup")]
        project: String,
    },

    /// Compile a JSON locator descriptor and print its selector
    Resolve {
        /// Descriptor, e.g. '"#id"', '["button", {"name": "Save"}]' or '{"placeholder": "Username"}'
        descriptor: String,
    },

    /// Print the compiled selectors of the page locator tables
    Tables {
        /// Only this page
        #[arg(long, value_enum)]
        page: Option<PageName>,
    },

    /// Print the configuration resolved from the environment
    Config,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PageName {
    Base,
    Login,
    ChangePassword,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::SaveSession { project } => save_session(&project).await,
        Commands::Resolve { descriptor } => resolve(&descriptor),
        Commands::Tables { page } => print_tables(page),
        Commands::Config => {
            let config = SuiteConfig::from_env()?;
            println!("{config:#?}");
            Ok(())
        }
    }
}

async fn save_session(project: &str) -> anyhow::Result<()> {
    let factory = ScenarioFactory::from_env()?;
    let scenario = factory
        .launch(project)
        .await
        .with_context(|| format!("launching project '{project}'"))?;

    let result = scenario.login_page()?.setup_session().await;
    scenario.close().await?;

    let snapshot = result?;
    println!(
        "Saved {} cookie(s) to {}",
        snapshot.state().cookies.len(),
        factory.config().storage_state_path().display()
    );
    Ok(())
}

fn resolve(descriptor: &str) -> anyhow::Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(descriptor).context("descriptor is not valid JSON")?;
    let descriptor = LocatorDescriptor::try_from(value)?;
    println!("{}", locator::compile(&descriptor));
    Ok(())
}

fn print_tables(only: Option<PageName>) -> anyhow::Result<()> {
    let pages = [
        (PageName::Base, tables::base_page()?),
        (PageName::Login, tables::login_page()?),
        (PageName::ChangePassword, tables::change_password_page()?),
    ];

    for (name, table) in pages {
        if only.is_some_and(|wanted| wanted != name) {
            continue;
        }
        print_table(&table);
    }
    Ok(())
}

fn print_table(table: &LocatorTable) {
    println!("{} ({} elements)", table.page(), table.len());
    let width = table.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, descriptor) in table.iter() {
        println!("  {name:<width$}  {}", locator::compile(descriptor));
    }
    println!();
}
