//! Batch builder behind the create-slots view.
//!
//! An HR user stages a time from the picker, confirms it into a sorted,
//! duplicate-free pending list, picks a shared duration and submits the
//! whole list in one request.

use chrono::{DateTime, Utc};

use crate::errors::{ClientError, ValidationError};
use crate::models::booking::{CreateSlotsRequest, CreateSlotsResponse};
use crate::models::notice::Notice;
use crate::time::{DEFAULT_DURATION_MINUTES, is_selectable, normalize_duration, to_canonical_iso};

const CREATED_FALLBACK: &str = "Slots created successfully!";

#[derive(Debug, Clone)]
pub struct SlotPublisher {
    staged: Option<DateTime<Utc>>,
    pending: Vec<DateTime<Utc>>,
    duration: u32,
    submitting: bool,
    notice: Option<Notice>,
}

impl Default for SlotPublisher {
    fn default() -> Self {
        Self {
            staged: None,
            pending: Vec::new(),
            duration: DEFAULT_DURATION_MINUTES,
            submitting: false,
            notice: None,
        }
    }
}

impl SlotPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self) -> Option<DateTime<Utc>> {
        self.staged
    }

    pub fn pending(&self) -> &[DateTime<Utc>] {
        &self.pending
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Stage a time from the picker. Times not strictly after `now` are refused.
    pub fn select_time(
        &mut self,
        candidate: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if !is_selectable(candidate, now) {
            return self.reject(ValidationError::PastTime);
        }
        self.staged = Some(candidate);
        Ok(())
    }

    /// Move the staged time into the pending list, keeping it sorted.
    pub fn confirm_time(&mut self) -> Result<(), ValidationError> {
        let Some(time) = self.staged else {
            return self.reject(ValidationError::NothingStaged);
        };

        match self.pending.binary_search(&time) {
            Ok(_) => self.reject(ValidationError::DuplicateTime),
            Err(position) => {
                self.pending.insert(position, time);
                self.staged = None;
                self.notice = None;
                Ok(())
            }
        }
    }

    pub fn remove_time(&mut self, index: usize) -> Result<DateTime<Utc>, ValidationError> {
        if index >= self.pending.len() {
            return self.reject(ValidationError::IndexOutOfRange(index));
        }
        Ok(self.pending.remove(index))
    }

    /// Returns the duration actually stored after clamping and stepping.
    pub fn set_duration(&mut self, minutes: u32) -> u32 {
        self.duration = normalize_duration(minutes);
        self.duration
    }

    /// Build the batch request and mark the publisher as in flight.
    pub fn prepare_submit(&mut self) -> Result<CreateSlotsRequest, ValidationError> {
        if self.submitting {
            return self.reject(ValidationError::RequestInFlight);
        }
        if self.pending.is_empty() {
            return self.reject(ValidationError::EmptyBatch);
        }

        self.submitting = true;
        self.notice = None;

        Ok(CreateSlotsRequest {
            start_times: self.pending.iter().copied().map(to_canonical_iso).collect(),
            duration: self.duration,
        })
    }

    pub fn submit_succeeded(&mut self, response: CreateSlotsResponse) {
        self.submitting = false;
        self.pending.clear();
        let text = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| CREATED_FALLBACK.to_string());
        self.notice = Some(Notice::success(text));
    }

    /// The pending list is left as it was so the user can retry.
    pub fn submit_failed(&mut self, error: &ClientError) {
        self.submitting = false;
        self.notice = Some(Notice::from(error));
    }

    fn reject<T>(&mut self, error: ValidationError) -> Result<T, ValidationError> {
        self.notice = Some(Notice::from(&error));
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    fn add(publisher: &mut SlotPublisher, time: DateTime<Utc>) -> Result<(), ValidationError> {
        publisher.select_time(time, now())?;
        publisher.confirm_time()
    }

    #[test]
    fn confirm_keeps_pending_sorted() {
        let mut publisher = SlotPublisher::new();
        for hour in [14, 9, 11, 10] {
            add(&mut publisher, at(hour)).unwrap();
        }
        assert_eq!(publisher.pending(), &[at(9), at(10), at(11), at(14)]);
        assert_eq!(publisher.staged(), None);
    }

    #[test]
    fn duplicate_is_rejected_with_message() {
        let mut publisher = SlotPublisher::new();
        add(&mut publisher, at(10)).unwrap();

        let result = add(&mut publisher, at(10));

        assert_eq!(result, Err(ValidationError::DuplicateTime));
        assert_eq!(publisher.pending().len(), 1);
        assert_eq!(
            publisher.notice().map(|n| n.text.as_str()),
            Some("This time slot has already been added.")
        );
    }

    #[test]
    fn past_time_cannot_be_staged() {
        let mut publisher = SlotPublisher::new();
        let result = publisher.select_time(now() - Duration::minutes(15), now());
        assert_eq!(result, Err(ValidationError::PastTime));
        assert_eq!(publisher.staged(), None);
    }

    #[test]
    fn confirm_without_stage_is_rejected() {
        let mut publisher = SlotPublisher::new();
        assert_eq!(publisher.confirm_time(), Err(ValidationError::NothingStaged));
    }

    #[test]
    fn remove_by_index() {
        let mut publisher = SlotPublisher::new();
        add(&mut publisher, at(9)).unwrap();
        add(&mut publisher, at(10)).unwrap();

        assert_eq!(publisher.remove_time(0), Ok(at(9)));
        assert_eq!(publisher.pending(), &[at(10)]);
        assert_eq!(
            publisher.remove_time(5),
            Err(ValidationError::IndexOutOfRange(5))
        );
    }

    #[test]
    fn empty_batch_is_refused() {
        let mut publisher = SlotPublisher::new();
        assert_eq!(publisher.prepare_submit(), Err(ValidationError::EmptyBatch));
        assert!(!publisher.is_submitting());
        assert_eq!(
            publisher.notice().map(|n| n.text.as_str()),
            Some("Please add at least one time slot.")
        );
    }

    #[test]
    fn request_carries_canonical_times_and_duration() {
        let mut publisher = SlotPublisher::new();
        add(&mut publisher, at(11)).unwrap();
        add(&mut publisher, at(10)).unwrap();
        publisher.set_duration(50);

        let request = publisher.prepare_submit().unwrap();

        assert_eq!(
            request,
            CreateSlotsRequest {
                start_times: vec![
                    "2024-01-01T10:00:00.000Z".to_string(),
                    "2024-01-01T11:00:00.000Z".to_string(),
                ],
                duration: 45,
            }
        );
        assert!(publisher.is_submitting());
        assert_eq!(
            publisher.prepare_submit(),
            Err(ValidationError::RequestInFlight)
        );
    }

    #[test]
    fn success_clears_pending_and_echoes_server() {
        let mut publisher = SlotPublisher::new();
        add(&mut publisher, at(10)).unwrap();
        publisher.prepare_submit().unwrap();

        publisher.submit_succeeded(CreateSlotsResponse {
            message: Some("Slots created!".into()),
            slots: vec![],
        });

        assert!(publisher.pending().is_empty());
        assert_eq!(publisher.notice(), Some(&Notice::success("Slots created!")));
    }

    #[test]
    fn success_without_message_uses_default() {
        let mut publisher = SlotPublisher::new();
        add(&mut publisher, at(10)).unwrap();
        publisher.prepare_submit().unwrap();
        publisher.submit_succeeded(CreateSlotsResponse::default());
        assert_eq!(
            publisher.notice(),
            Some(&Notice::success("Slots created successfully!"))
        );
    }

    #[test]
    fn failure_keeps_pending_for_retry() {
        let mut publisher = SlotPublisher::new();
        add(&mut publisher, at(10)).unwrap();
        publisher.prepare_submit().unwrap();

        publisher.submit_failed(&ClientError::Server {
            status: 400,
            message: "Invalid date format: x".into(),
        });

        assert_eq!(publisher.pending(), &[at(10)]);
        assert!(!publisher.is_submitting());
        assert_eq!(
            publisher.notice(),
            Some(&Notice::error("Invalid date format: x"))
        );
    }
}
