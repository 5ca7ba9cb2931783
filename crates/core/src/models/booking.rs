use serde::{Deserialize, Serialize};

use super::slot::Slot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSlotsRequest {
    pub start_times: Vec<String>,
    pub duration: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSlotsResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSlotRequest {
    pub candidate_email: String,
    pub selected_start_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub meet_link: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
}
