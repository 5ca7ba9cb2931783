use slotbook_core::{
    booker::{BookerAction, BookerState},
    errors::{ClientError, ClientResult, ValidationError},
    models::{booking::BookingConfirmation, session::UserId, slot::SlotTime},
};
use tracing::{info, warn};

use crate::api::SlotApi;

/// Book-slot flow for one HR user's slot set.
pub struct BookerFlow<A> {
    api: A,
    user_id: Option<UserId>,
    state: BookerState,
}

impl<A: SlotApi> BookerFlow<A> {
    /// `user_id` comes from the route and may be absent.
    pub fn new(api: A, user_id: Option<UserId>) -> Self {
        Self {
            api,
            user_id,
            state: BookerState::new(),
        }
    }

    pub fn state(&self) -> &BookerState {
        &self.state
    }

    fn require_user(&self) -> Result<UserId, ValidationError> {
        self.user_id.clone().ok_or(ValidationError::MissingUserId)
    }

    /// Initial read. A missing user id fails without touching the network.
    pub async fn load(&mut self) -> ClientResult<()> {
        let user_id = match self.require_user() {
            Ok(user_id) => user_id,
            Err(error) => {
                let error = ClientError::from(error);
                self.state.reduce(BookerAction::LoadFailed(error.clone()));
                return Err(error);
            }
        };

        match self.api.list_slots(user_id.clone()).await {
            Ok(slots) => {
                info!(%user_id, count = slots.len(), "slots loaded");
                self.state.reduce(BookerAction::SlotsLoaded(slots));
                Ok(())
            }
            Err(error) => {
                warn!(%user_id, "failed to load slots: {}", error);
                self.state.reduce(BookerAction::LoadFailed(error.clone()));
                Err(error)
            }
        }
    }

    pub fn select(&mut self, time: &SlotTime) -> Result<(), ValidationError> {
        self.state.select_slot(time)
    }

    /// Book the selected slot for `email`.
    ///
    /// On a conflict the slot set is read again and replaces local state.
    pub async fn submit(&mut self, email: &str) -> ClientResult<BookingConfirmation> {
        let user_id = match self.require_user() {
            Ok(user_id) => user_id,
            Err(error) => {
                self.state.reduce(BookerAction::Rejected(error.clone()));
                return Err(error.into());
            }
        };
        let request = self.state.begin_submit(email)?;
        let candidate_email = request.candidate_email.clone();

        match self.api.book_slot(user_id.clone(), request).await {
            Ok(confirmation) => {
                info!(%user_id, "slot booked");
                self.state.reduce(BookerAction::BookingConfirmed {
                    email: candidate_email,
                });
                Ok(confirmation)
            }
            Err(error) if error.is_conflict() => {
                warn!(%user_id, "booking conflicted, refreshing slots: {}", error);
                let refreshed = match self.api.list_slots(user_id.clone()).await {
                    Ok(slots) => Some(slots),
                    Err(refresh_error) => {
                        warn!(%user_id, "refresh after conflict failed: {}", refresh_error);
                        None
                    }
                };
                self.state.reduce(BookerAction::BookingConflicted {
                    refreshed,
                    message: error.to_string(),
                });
                Err(error)
            }
            Err(error) => {
                warn!(%user_id, "booking failed: {}", error);
                self.state.reduce(BookerAction::BookingFailed(error.clone()));
                Err(error)
            }
        }
    }
}
