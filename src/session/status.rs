//! Status channel aggregation
//!
//! Three independent named channels collect the most recent status text from
//! distinct subsystems. Channels never influence each other and carry no
//! cross-channel ordering guarantee; within a channel, pushes are applied in
//! emission order. Wiring from event kinds to channels is a data-driven
//! table in the coordinator, iterated once at setup.

use rustc_hash::FxHashMap;

/// The named status channels shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusChannel {
    Processor,
    Syscall,
    SystemIo,
}

impl StatusChannel {
    pub const ALL: [StatusChannel; 3] = [
        StatusChannel::Processor,
        StatusChannel::Syscall,
        StatusChannel::SystemIo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusChannel::Processor => "proc",
            StatusChannel::Syscall => "syscall",
            StatusChannel::SystemIo => "io",
        }
    }
}

/// Most-recent-text store for the status channels.
#[derive(Default)]
pub struct StatusAggregator {
    channels: FxHashMap<StatusChannel, String>,
}

impl StatusAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the displayed text for one channel.
    pub fn set_text(&mut self, channel: StatusChannel, text: impl Into<String>) {
        self.channels.insert(channel, text.into());
    }

    /// Empty one channel.
    pub fn clear(&mut self, channel: StatusChannel) {
        self.channels.remove(&channel);
    }

    /// Current text for a channel; empty when cleared or never set.
    pub fn text(&self, channel: StatusChannel) -> &str {
        self.channels.get(&channel).map_or("", String::as_str)
    }
}
