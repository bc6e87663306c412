//! Transient status lines, one per named slot.

use std::collections::HashMap;

use shared::domain::LogSeverity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusSlot {
    General,
    FileList,
    Organize,
    Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: LogSeverity,
}

#[derive(Debug, Default)]
pub struct StatusChannel {
    slots: HashMap<StatusSlot, StatusMessage>,
}

impl StatusChannel {
    pub fn show(&mut self, slot: StatusSlot, text: impl Into<String>, severity: LogSeverity) {
        self.slots.insert(
            slot,
            StatusMessage {
                text: text.into(),
                severity,
            },
        );
    }

    pub fn clear(&mut self, slot: StatusSlot) {
        self.slots.remove(&slot);
    }

    pub fn get(&self, slot: StatusSlot) -> Option<&StatusMessage> {
        self.slots.get(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showing_replaces_previous_message() {
        let mut status = StatusChannel::default();
        status.show(StatusSlot::FileList, "Fetching files...", LogSeverity::Info);
        status.show(StatusSlot::FileList, "No supported files found.", LogSeverity::Info);

        assert_eq!(
            status.get(StatusSlot::FileList).map(|m| m.text.as_str()),
            Some("No supported files found.")
        );
        assert_eq!(status.get(StatusSlot::Organize), None);
    }

    #[test]
    fn clearing_one_slot_leaves_others() {
        let mut status = StatusChannel::default();
        status.show(StatusSlot::Organize, "working", LogSeverity::Info);
        status.show(StatusSlot::Schedule, "saved", LogSeverity::Success);
        status.clear(StatusSlot::Organize);

        assert!(status.get(StatusSlot::Organize).is_none());
        assert!(status.get(StatusSlot::Schedule).is_some());
    }
}
