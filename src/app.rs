use crate::chain::Acquisition;
use crate::source::{ApodRecord, SourceKind};
use crate::widget;

/// What the display area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    /// The chain is still running.
    Loading,
    /// A source produced today's record.
    Loaded {
        record: ApodRecord,
        source: SourceKind,
    },
    /// Every source failed; only the placeholder is shown.
    Unavailable,
}

pub struct App {
    pub panel: Panel,
    /// Vertical scroll offset of the explanation, in lines.
    pub scroll: u16,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Status bar message.
    pub status: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            panel: Panel::Loading,
            scroll: 0,
            quit: false,
            status: "Loading…".into(),
        }
    }

    /// Move to the terminal state described by `acquisition`.
    ///
    /// Only the first call has an effect; returns whether it was applied.
    pub fn apply(&mut self, acquisition: Acquisition) -> bool {
        if self.panel != Panel::Loading {
            return false;
        }
        widget::report(&acquisition);
        match acquisition {
            Acquisition::Success { record, source } => {
                self.status = format!("via {source}");
                self.panel = Panel::Loaded { record, source };
            }
            Acquisition::Exhausted { .. } => {
                self.status = "No source available".into();
                self.panel = Panel::Unavailable;
            }
        }
        true
    }

    // -- navigation ----------------------------------------------------------

    pub fn scroll_down(&mut self) {
        if matches!(self.panel, Panel::Loaded { .. }) {
            self.scroll = self.scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_top(&mut self) {
        self.scroll = 0;
    }
}
