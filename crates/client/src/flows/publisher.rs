use chrono::{DateTime, Utc};
use slotbook_core::{
    errors::{ClientResult, ValidationError},
    models::{booking::CreateSlotsResponse, session::Session},
    publisher::SlotPublisher,
};
use tracing::{info, warn};

use crate::api::SlotApi;

/// Create-slots flow for the signed-in HR user.
pub struct PublisherFlow<A> {
    api: A,
    session: Session,
    state: SlotPublisher,
}

impl<A: SlotApi> PublisherFlow<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            state: SlotPublisher::new(),
        }
    }

    pub fn state(&self) -> &SlotPublisher {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn select_time(
        &mut self,
        candidate: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        self.state.select_time(candidate, now)
    }

    pub fn confirm_time(&mut self) -> Result<(), ValidationError> {
        self.state.confirm_time()
    }

    pub fn remove_time(&mut self, index: usize) -> Result<DateTime<Utc>, ValidationError> {
        self.state.remove_time(index)
    }

    pub fn set_duration(&mut self, minutes: u32) -> u32 {
        self.state.set_duration(minutes)
    }

    /// Send the pending batch. An empty batch never reaches the API.
    pub async fn submit(&mut self) -> ClientResult<CreateSlotsResponse> {
        let request = self.state.prepare_submit()?;
        let count = request.start_times.len();

        match self
            .api
            .create_slots(self.session.user_id.clone(), request)
            .await
        {
            Ok(response) => {
                info!(user_id = %self.session.user_id, count, "slots created");
                self.state.submit_succeeded(response.clone());
                Ok(response)
            }
            Err(error) => {
                warn!(user_id = %self.session.user_id, "slot creation failed: {}", error);
                self.state.submit_failed(&error);
                Err(error)
            }
        }
    }
}
