//! Listing/organize/schedule flow state and the availability rules derived
//! from it.

use client_core::DirectorySession;

use crate::backend_bridge::commands::ListingTicket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestrationState {
    Idle,
    DirectorySelected,
    Listing,
    Ready,
    Empty,
    ListError,
    Organizing,
    SchedulePending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingPhase {
    #[default]
    Idle,
    Listing,
    Ready,
    Empty,
    ListError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionAvailability {
    pub can_refresh: bool,
    pub can_organize: bool,
    pub can_schedule: bool,
}

#[derive(Debug, Default)]
pub struct FlowState {
    phase: ListingPhase,
    /// Outcome of the last listing that completed; unchanged while a newer
    /// one is in flight.
    last_completed: ListingPhase,
    pending_listing: Option<ListingTicket>,
    next_request_id: u64,
    organizing: Option<String>,
    schedule_pending: bool,
}

impl FlowState {
    /// Issues a fresh ticket; any ticket handed out earlier becomes stale.
    pub fn begin_listing(&mut self, directory: String) -> ListingTicket {
        self.next_request_id += 1;
        let ticket = ListingTicket {
            request_id: self.next_request_id,
            directory,
        };
        self.pending_listing = Some(ticket.clone());
        self.phase = ListingPhase::Listing;
        ticket
    }

    /// Claims the outstanding listing if `ticket` is the latest one issued.
    pub fn accept_listing(&mut self, ticket: &ListingTicket) -> bool {
        if self.pending_listing.as_ref() != Some(ticket) {
            return false;
        }
        self.pending_listing = None;
        true
    }

    pub fn finish_listing(&mut self, phase: ListingPhase) {
        self.phase = phase;
        self.last_completed = phase;
    }

    pub fn begin_organize(&mut self, directory: String) {
        self.organizing = Some(directory);
    }

    pub fn finish_organize(&mut self) -> Option<String> {
        self.organizing.take()
    }

    pub fn organizing(&self) -> Option<&str> {
        self.organizing.as_deref()
    }

    pub fn begin_schedule(&mut self) {
        self.schedule_pending = true;
    }

    pub fn finish_schedule(&mut self) {
        self.schedule_pending = false;
    }

    pub fn schedule_pending(&self) -> bool {
        self.schedule_pending
    }

    pub fn state(&self, session: &DirectorySession) -> OrchestrationState {
        if self.organizing.is_some() {
            return OrchestrationState::Organizing;
        }
        if self.schedule_pending {
            return OrchestrationState::SchedulePending;
        }
        if session.refresh_required() {
            return OrchestrationState::DirectorySelected;
        }
        match self.phase {
            ListingPhase::Idle if session.selected_directory().is_some() => {
                OrchestrationState::DirectorySelected
            }
            ListingPhase::Idle => OrchestrationState::Idle,
            ListingPhase::Listing => OrchestrationState::Listing,
            ListingPhase::Ready => OrchestrationState::Ready,
            ListingPhase::Empty => OrchestrationState::Empty,
            ListingPhase::ListError => OrchestrationState::ListError,
        }
    }

    /// Organize and schedule follow the last completed listing of the
    /// selected directory. A new selection clears the file list, so they stay
    /// off until that directory's first listing lands.
    pub fn availability(&self, session: &DirectorySession) -> ActionAvailability {
        let selected = session.selected_directory().is_some();
        let listed = selected
            && self.last_completed == ListingPhase::Ready
            && !session.refresh_required()
            && session.file_count() > 0;

        ActionAvailability {
            can_refresh: selected,
            can_organize: listed && self.organizing.is_none(),
            can_schedule: listed && self.organizing.is_none() && !self.schedule_pending,
        }
    }
}
