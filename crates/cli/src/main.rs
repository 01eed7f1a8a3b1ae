//! Peony CLI - Ops tools against the order store.
//!
//! # Usage
//!
//! ```bash
//! # List the most recent orders
//! peony orders list
//!
//! # List only unpaid pending orders
//! peony orders list --status pending --payment pending
//!
//! # Set one status field on an order
//! peony orders set-status order-abc123 delivery out_for_delivery
//!
//! # Tail the change feed
//! peony orders watch
//! ```
//!
//! # Commands
//!
//! - `orders list` - List recent orders, optionally filtered
//! - `orders set-status` - Patch one status field on an order
//! - `orders watch` - Tail the order change feed

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "peony")]
#[command(author, version, about = "Peony CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List recent orders, newest first
    List {
        /// Filter by order status (e.g. `pending`, `shipped`)
        #[arg(long)]
        status: Option<String>,

        /// Filter by payment status (`pending`, `received`)
        #[arg(long)]
        payment: Option<String>,

        /// Filter by delivery status (e.g. `out_for_delivery`)
        #[arg(long)]
        delivery: Option<String>,
    },
    /// Set one status field on an order
    SetStatus {
        /// Order document id
        order_id: String,

        /// Status dimension (`order`, `payment`, `delivery`)
        field: String,

        /// New vocabulary value
        value: String,
    },
    /// Tail the order change feed until interrupted
    Watch,
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
        Commands::Orders { action } => match action {
            OrdersAction::List {
                status,
                payment,
                delivery,
            } => {
                commands::orders::list(status.as_deref(), payment.as_deref(), delivery.as_deref())
                    .await?;
            }
            OrdersAction::SetStatus {
                order_id,
                field,
                value,
            } => {
                commands::orders::set_status(&order_id, &field, &value).await?;
            }
            OrdersAction::Watch => commands::orders::watch().await?,
        },
    }
    Ok(())
}
