use anyhow::Result;
use clap::{Parser, Subcommand};

use dinar_wallet::cli::{
    handle_card_command, handle_config_command, handle_wallet_command, CardCommands,
    WalletCommands,
};
use dinar_wallet::config::{paths::WalletPaths, settings::Settings};
use dinar_wallet::services::LogNotifier;
use dinar_wallet::storage::JsonStore;

#[derive(Parser)]
#[command(
    name = "wallet",
    version,
    about = "Terminal client for a Dinar digital wallet",
    long_about = "Dinar Wallet keeps a multi-currency wallet in the terminal: \
                  recharge through BaridiMob, withdraw to a bank account, send \
                  instant transfers and manage the wallet card."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    #[command(flatten)]
    Wallet(WalletCommands),

    /// Card management commands
    #[command(subcommand)]
    Card(CardCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths, settings and logging
    let paths = WalletPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    dinar_wallet::logging::init(&paths)?;

    let store = JsonStore::open(paths.clone())?;
    let notifier = LogNotifier;

    match cli.command {
        Some(Commands::Tui) => {
            dinar_wallet::tui::run_tui(&store, &notifier, &settings)?;
        }
        Some(Commands::Wallet(cmd)) => {
            handle_wallet_command(&store, &notifier, &settings, cmd)?;
        }
        Some(Commands::Card(cmd)) => {
            handle_card_command(&store, &notifier, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            handle_config_command(&paths, &settings)?;
        }
        None => {
            println!("Dinar Wallet");
            println!();
            println!("Run 'wallet --help' for usage information.");
            println!("Run 'wallet tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
