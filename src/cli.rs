use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "slotbook")]
#[command(about = "Publish and book interview slots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in (or sign up) and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Create the account instead of signing in
        #[arg(long)]
        signup: bool,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List available and booked slots
    Slots {
        /// Slot owner; defaults to the signed-in user
        #[arg(long)]
        user: Option<String>,
    },
    /// Show the start times the picker offers for a day (UTC)
    Picker {
        /// Day as YYYY-MM-DD
        date: chrono::NaiveDate,
    },
    /// Create a batch of slots for the signed-in user
    Publish {
        /// Interview length in minutes (min 15, 15-minute steps)
        #[arg(long, default_value_t = slotbook_core::time::DEFAULT_DURATION_MINUTES)]
        duration: u32,
        /// Start times, e.g. 2030-01-01T10:00:00Z
        #[arg(required = true)]
        times: Vec<String>,
    },
    /// Book one available slot as a candidate
    Book {
        /// Slot owner
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        email: String,
        /// Start time of the slot to book
        #[arg(long)]
        at: String,
    },
}
