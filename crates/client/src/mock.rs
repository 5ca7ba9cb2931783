use async_trait::async_trait;
use mockall::mock;
use slotbook_core::{
    errors::ClientResult,
    models::{
        booking::{BookSlotRequest, BookingConfirmation, CreateSlotsRequest, CreateSlotsResponse},
        session::UserId,
        slot::Slot,
    },
};

use crate::api::SlotApi;

// Mock API for testing the flows
mock! {
    pub SlotApi {}

    #[async_trait]
    impl SlotApi for SlotApi {
        async fn list_slots(&self, user_id: UserId) -> ClientResult<Vec<Slot>>;

        async fn create_slots(
            &self,
            user_id: UserId,
            request: CreateSlotsRequest,
        ) -> ClientResult<CreateSlotsResponse>;

        async fn book_slot(
            &self,
            user_id: UserId,
            request: BookSlotRequest,
        ) -> ClientResult<BookingConfirmation>;
    }
}
