//! State behind the book-slot view.
//!
//! All changes to the slot lists go through [`BookerState::reduce`]. Two
//! actions can change the lists after a booking attempt:
//! `BookingConfirmed` moves the booked slot across locally, and
//! `BookingConflicted` replaces both lists with a fresh read.

use crate::errors::{ClientError, ValidationError};
use crate::models::booking::BookSlotRequest;
use crate::models::notice::Notice;
use crate::models::slot::{Slot, SlotTime};
use crate::time::is_plausible_email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookerPhase {
    Loading,
    /// The initial read failed. Holds the message to show.
    Failed(String),
    Ready,
    Submitting,
}

#[derive(Debug, Clone)]
pub enum BookerAction {
    SlotsLoaded(Vec<Slot>),
    LoadFailed(ClientError),
    SlotSelected(SlotTime),
    SubmitStarted(SlotTime),
    BookingConfirmed { email: String },
    /// `refreshed` is `None` when the follow-up read failed too.
    BookingConflicted {
        refreshed: Option<Vec<Slot>>,
        message: String,
    },
    BookingFailed(ClientError),
    /// A precondition failed before anything was sent.
    Rejected(ValidationError),
}

#[derive(Debug, Clone)]
pub struct BookerState {
    phase: BookerPhase,
    available: Vec<Slot>,
    booked: Vec<Slot>,
    selected: Option<SlotTime>,
    in_flight: Option<SlotTime>,
    notice: Option<Notice>,
}

impl Default for BookerState {
    fn default() -> Self {
        Self {
            phase: BookerPhase::Loading,
            available: Vec::new(),
            booked: Vec::new(),
            selected: None,
            in_flight: None,
            notice: None,
        }
    }
}

/// Split a slot set into `(available, booked)`, both ascending by start time.
pub fn partition(slots: Vec<Slot>) -> (Vec<Slot>, Vec<Slot>) {
    let (mut available, mut booked): (Vec<Slot>, Vec<Slot>) =
        slots.into_iter().partition(|slot| slot.available);
    sort_by_start(&mut available);
    sort_by_start(&mut booked);
    (available, booked)
}

fn sort_by_start(slots: &mut [Slot]) {
    slots.sort_by(|a, b| a.start_time.cmp(&b.start_time));
}

pub fn confirmation_text(email: &str) -> String {
    format!(
        "Interview booked successfully! A confirmation and Google Meet link has been sent to {}.",
        email
    )
}

impl BookerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &BookerPhase {
        &self.phase
    }

    pub fn available_slots(&self) -> &[Slot] {
        &self.available
    }

    pub fn booked_slots(&self) -> &[Slot] {
        &self.booked
    }

    pub fn selected(&self) -> Option<&SlotTime> {
        self.selected.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == BookerPhase::Submitting
    }

    /// Mirrors the disabled state of the submit control.
    pub fn can_submit(&self, email: &str) -> bool {
        self.phase == BookerPhase::Ready && self.selected.is_some() && !email.trim().is_empty()
    }

    fn is_available(&self, time: &SlotTime) -> bool {
        self.available.iter().any(|slot| &slot.start_time == time)
    }

    /// Select one of the currently available slots.
    ///
    /// Allowed while a booking is in flight; only the pointer moves.
    pub fn select_slot(&mut self, time: &SlotTime) -> Result<(), ValidationError> {
        if !matches!(self.phase, BookerPhase::Ready | BookerPhase::Submitting) {
            return Err(ValidationError::NotReady);
        }
        if !self.is_available(time) {
            let error = ValidationError::SlotNotAvailable;
            self.reduce(BookerAction::Rejected(error.clone()));
            return Err(error);
        }
        self.reduce(BookerAction::SlotSelected(time.clone()));
        Ok(())
    }

    /// Validate the form and enter `Submitting`.
    pub fn begin_submit(&mut self, email: &str) -> Result<BookSlotRequest, ValidationError> {
        let outcome = self.validate_submit(email);
        match outcome {
            Ok((time, request)) => {
                self.reduce(BookerAction::SubmitStarted(time));
                Ok(request)
            }
            Err(error) => {
                self.reduce(BookerAction::Rejected(error.clone()));
                Err(error)
            }
        }
    }

    fn validate_submit(&self, email: &str) -> Result<(SlotTime, BookSlotRequest), ValidationError> {
        match self.phase {
            BookerPhase::Ready => {}
            BookerPhase::Submitting => return Err(ValidationError::RequestInFlight),
            BookerPhase::Loading | BookerPhase::Failed(_) => return Err(ValidationError::NotReady),
        }

        let time = self
            .selected
            .clone()
            .ok_or(ValidationError::NoSlotSelected)?;

        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::BlankEmail);
        }
        if !is_plausible_email(email) {
            return Err(ValidationError::MalformedEmail);
        }

        let request = BookSlotRequest {
            candidate_email: email.to_string(),
            selected_start_time: time.as_str().to_string(),
        };
        Ok((time, request))
    }

    pub fn reduce(&mut self, action: BookerAction) {
        match action {
            BookerAction::SlotsLoaded(slots) => {
                self.replace_slots(slots);
                self.phase = BookerPhase::Ready;
                self.notice = None;
            }
            BookerAction::LoadFailed(error) => {
                self.phase = BookerPhase::Failed(error.to_string());
            }
            BookerAction::SlotSelected(time) => {
                if self.is_available(&time) {
                    self.selected = Some(time);
                }
            }
            BookerAction::SubmitStarted(time) => {
                self.in_flight = Some(time);
                self.phase = BookerPhase::Submitting;
                self.notice = None;
            }
            BookerAction::BookingConfirmed { email } => {
                if let Some(time) = self.in_flight.take() {
                    self.move_to_booked(&time);
                }
                self.selected = None;
                self.phase = BookerPhase::Ready;
                self.notice = Some(Notice::success(confirmation_text(&email)));
            }
            BookerAction::BookingConflicted { refreshed, message } => {
                let time = self.in_flight.take();
                match refreshed {
                    Some(slots) => self.replace_slots(slots),
                    None => {
                        if let Some(time) = &time {
                            self.move_to_booked(time);
                        }
                        self.drop_stale_selection();
                    }
                }
                self.phase = BookerPhase::Ready;
                self.notice = Some(Notice::error(message));
            }
            BookerAction::BookingFailed(error) => {
                self.in_flight = None;
                self.phase = BookerPhase::Ready;
                self.notice = Some(Notice::from(&error));
            }
            BookerAction::Rejected(error) => {
                self.notice = Some(Notice::from(&error));
            }
        }
    }

    fn replace_slots(&mut self, slots: Vec<Slot>) {
        let (available, booked) = partition(slots);
        self.available = available;
        self.booked = booked;
        self.drop_stale_selection();
    }

    fn drop_stale_selection(&mut self) {
        if let Some(time) = &self.selected {
            if !self.is_available(time) {
                self.selected = None;
            }
        }
    }

    fn move_to_booked(&mut self, time: &SlotTime) {
        let Some(position) = self.available.iter().position(|s| &s.start_time == time) else {
            return;
        };
        let slot = self.available.remove(position).into_booked();
        if !self.booked.iter().any(|s| s.start_time == slot.start_time) {
            self.booked.push(slot);
            sort_by_start(&mut self.booked);
        }
    }
}
