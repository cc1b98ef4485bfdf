//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use expensio_shared::types::Currency;

/// Expensio command-line interface.
#[derive(Parser, Debug)]
#[command(name = "expensio", version, about = "Split shared expenses fairly")]
pub struct Cli {
    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split one expense and suggest the next split.
    Split {
        /// JSON expense request.
        request: PathBuf,
    },

    /// Net balances across several expenses.
    Summary {
        /// JSON file with an `expenses` array.
        request: PathBuf,
    },

    /// Convert an amount with a table of exchange rates.
    Convert {
        /// Amount in major units, e.g. "12.50".
        #[arg(long)]
        amount: String,

        /// Source currency code.
        #[arg(long)]
        from: Currency,

        /// Target currency code.
        #[arg(long)]
        to: Currency,

        /// Date whose rate applies (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// JSON file with a `rates` array.
        #[arg(long)]
        rates: PathBuf,
    },

    /// Report on an expense plan.
    Plan {
        /// JSON plan request.
        request: PathBuf,

        /// Date used for the plan status; defaults to today.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}
