//! Premium Clarity CLI - session store migration and validation checks.
//!
//! # Usage
//!
//! ```bash
//! # Create the session table in the SQLite store
//! clarity-cli migrate
//!
//! # Validate payment details the way the payment step does
//! clarity-cli check payment --card "4111 1111 1111 1111" --expiry 1228 --cvv 123 --name "Jane Doe"
//!
//! # Validate a personal profile
//! clarity-cli check profile --name "Jane Doe" --age 31 --email jane@example.com
//!
//! # Which step does a visitor resume at, given the completed steps?
//! clarity-cli resume 1,2
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "clarity-cli")]
#[command(author, version, about = "Premium Clarity CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the session table (requires `CLARITY_DATABASE_URL`)
    Migrate,
    /// Run the step validation on the given values
    Check {
        #[command(subcommand)]
        target: CheckTarget,
    },
    /// Print the step a visitor resumes at
    Resume {
        /// Completed step numbers, comma separated (e.g. `1,2`)
        #[arg(default_value = "")]
        completed: String,
    },
}

#[derive(Subcommand)]
enum CheckTarget {
    /// Validate payment information
    Payment {
        /// Card number, spaces allowed
        #[arg(long, default_value = "")]
        card: String,

        /// Expiry date (`MMYY` or `MM/YY`)
        #[arg(long, default_value = "")]
        expiry: String,

        /// Security code
        #[arg(long, default_value = "")]
        cvv: String,

        /// Cardholder name
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Validate a personal profile
    Profile {
        /// Full name
        #[arg(long, default_value = "")]
        name: String,

        /// Age
        #[arg(long, default_value = "")]
        age: String,

        /// Email address
        #[arg(long, default_value = "")]
        email: String,

        /// Location
        #[arg(long)]
        location: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::sessions().await?,
        Commands::Check { target } => match target {
            CheckTarget::Payment {
                card,
                expiry,
                cvv,
                name,
            } => commands::check::payment(&card, &expiry, &cvv, &name)?,
            CheckTarget::Profile {
                name,
                age,
                email,
                location,
            } => commands::check::profile(name, age, email, location)?,
        },
        Commands::Resume { completed } => commands::resume::print(&completed)?,
    }
    Ok(())
}
