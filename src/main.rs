mod cli;
mod render;

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use dotenv::dotenv;
use slotbook_client::{
    HttpSlotApi,
    config::ClientConfig,
    flows::{BookerFlow, PublisherFlow},
    session_store::SessionStore,
};
use slotbook_core::{
    models::{
        session::{Credentials, Session, UserId},
        slot::SlotTime,
    },
    time::{parse_timestamp, picker_times},
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ClientConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let store = SessionStore::new(config.session_file.clone());
    info!(api = %config.api_base_url, "slotbook starting");

    match cli.command {
        Command::Login {
            email,
            password,
            signup,
        } => {
            let api = HttpSlotApi::from_config(&config);
            let credentials = Credentials { email, password };
            let session = if signup {
                api.sign_up(credentials).await
            } else {
                api.sign_in(credentials).await
            }?;
            store.save(&session).await?;
            println!("Signed in as {}", session.user_id);
        }

        Command::Logout => {
            store.clear().await?;
            println!("Signed out");
        }

        Command::Whoami => match store.load().await? {
            Some(session) => println!("{}", session.user_id),
            None => println!("Not signed in"),
        },

        Command::Slots { user } => {
            let user_id = resolve_user(user, &store).await?;
            let mut flow = BookerFlow::new(HttpSlotApi::from_config(&config), user_id);
            flow.load().await?;
            render::print_slots(flow.state().available_slots(), flow.state().booked_slots());
        }

        Command::Picker { date } => {
            for time in picker_times(date, Utc::now()) {
                println!("{}", SlotTime::from(time));
            }
        }

        Command::Publish { duration, times } => {
            let session = require_session(&store).await?;
            let api = HttpSlotApi::from_config(&config).with_session(&session);
            let mut flow = PublisherFlow::new(api, session);

            let applied = flow.set_duration(duration);
            if applied != duration {
                println!("Duration adjusted to {} minutes", applied);
            }

            let now = Utc::now();
            for raw in &times {
                let staged = parse_timestamp(raw)
                    .and_then(|time| flow.select_time(time, now))
                    .and_then(|()| flow.confirm_time());
                if let Err(error) = staged {
                    eprintln!("❌ {}: {}", raw, error);
                }
            }

            let result = flow.submit().await;
            render::print_notice(flow.state().notice());
            result?;
        }

        Command::Book { user, email, at } => {
            let user_id = resolve_user(user, &store).await?;
            let wanted = SlotTime::parse(&at)?;

            let mut flow = BookerFlow::new(HttpSlotApi::from_config(&config), user_id);
            flow.load().await?;
            flow.select(&wanted)?;

            let result = flow.submit(&email).await;
            render::print_notice(flow.state().notice());
            if result.is_err() {
                render::print_slots(flow.state().available_slots(), flow.state().booked_slots());
            }
            result?;
        }
    }

    Ok(())
}

async fn require_session(store: &SessionStore) -> Result<Session> {
    store
        .load()
        .await?
        .ok_or_else(|| eyre!("Not signed in. Run `slotbook login` first."))
}

/// An explicit `--user` wins; otherwise fall back to the signed-in user.
async fn resolve_user(explicit: Option<String>, store: &SessionStore) -> Result<Option<UserId>> {
    if let Some(raw) = explicit {
        return Ok(UserId::new(raw));
    }
    Ok(store.load().await?.map(|session| session.user_id))
}
