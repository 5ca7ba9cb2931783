use serde_json::Value;
use thiserror::Error;

/// Failures caught before any request is sent.
///
/// The `Display` text of every variant is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("User ID not found in URL. Cannot fetch slots.")]
    MissingUserId,

    #[error("Please select an available time slot.")]
    NoSlotSelected,

    #[error("Please enter your email address.")]
    BlankEmail,

    #[error("Please enter a valid email address.")]
    MalformedEmail,

    #[error("This time slot has already been added.")]
    DuplicateTime,

    #[error("Please add at least one time slot.")]
    EmptyBatch,

    #[error("Please pick a date and time first.")]
    NothingStaged,

    #[error("Slots can only be created in the future.")]
    PastTime,

    #[error("Invalid date format: {0}")]
    InvalidTimestamp(String),

    #[error("That slot is no longer available.")]
    SlotNotAvailable,

    #[error("No pending slot at position {0}.")]
    IndexOutOfRange(usize),

    #[error("A request is already in progress.")]
    RequestInFlight,

    #[error("Slots have not been loaded yet.")]
    NotReady,

    #[error("You are not signed in.")]
    MissingSession,
}

/// How a rejected booking is recognised as a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictSignal {
    /// Only HTTP 409 counts.
    StatusOnly,
    /// HTTP 409, or a server message mentioning "taken".
    #[default]
    StatusOrHint,
}

impl ConflictSignal {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "status" | "status-only" => Some(Self::StatusOnly),
            "status-or-hint" | "hint" => Some(Self::StatusOrHint),
            _ => None,
        }
    }
}

const CONFLICT_STATUS: u16 = 409;
const CONFLICT_HINT: &str = "taken";

/// Every error a flow can observe, normalized into one tagged value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unable to reach the server. Please check your connection and try again.")]
    Network(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl ClientError {
    /// Map a non-success response into a `ClientError`.
    ///
    /// The message comes from `detail`, then `message`, then `fallback`.
    /// Only text the server actually sent is checked for the conflict hint.
    pub fn from_response(
        status: u16,
        body: &str,
        fallback: &str,
        signal: ConflictSignal,
    ) -> Self {
        let server_message = extract_message(body);

        let hinted = signal == ConflictSignal::StatusOrHint
            && server_message
                .as_deref()
                .is_some_and(|m| m.to_ascii_lowercase().contains(CONFLICT_HINT));

        let message = server_message.unwrap_or_else(|| fallback.to_string());

        if status == CONFLICT_STATUS || hinted {
            ClientError::Conflict { message }
        } else {
            ClientError::Server { status, message }
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict { .. })
    }
}

/// Pull the human-readable message out of an error body.
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    ["detail", "message"]
        .iter()
        .filter_map(|field| value.get(field))
        .find_map(render_detail)
}

fn render_detail(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // FastAPI-style validation errors: [{"msg": "..."}, ...]
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
