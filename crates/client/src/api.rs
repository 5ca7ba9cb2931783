use async_trait::async_trait;
use slotbook_core::{
    errors::ClientResult,
    models::{
        booking::{BookSlotRequest, BookingConfirmation, CreateSlotsRequest, CreateSlotsResponse},
        session::UserId,
        slot::Slot,
    },
};

/// The three slot endpoints the flows depend on.
///
/// Every failure comes back already normalized into a `ClientError`.
#[async_trait]
pub trait SlotApi: Send + Sync {
    /// `GET /users/{userId}/available-slots/`
    async fn list_slots(&self, user_id: UserId) -> ClientResult<Vec<Slot>>;

    /// `POST /users/{userId}/create-slots/`
    async fn create_slots(
        &self,
        user_id: UserId,
        request: CreateSlotsRequest,
    ) -> ClientResult<CreateSlotsResponse>;

    /// `POST /users/{userId}/book-slot/`
    async fn book_slot(
        &self,
        user_id: UserId,
        request: BookSlotRequest,
    ) -> ClientResult<BookingConfirmation>;
}
