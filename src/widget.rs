//! Turns a chain outcome into what the display area shows.
//!
//! An exhausted chain paints the static placeholder; its cause goes to the
//! log only, never into the output.

use tracing::warn;

use crate::chain::Acquisition;
use crate::render;

/// Log why the chain was exhausted.  No-op on success.
pub fn report(acquisition: &Acquisition) {
    if let Acquisition::Exhausted { cause } = acquisition {
        match cause {
            Some(e) => warn!(error = %e, "APOD unavailable: every source failed"),
            None => warn!("APOD unavailable: no sources configured"),
        }
    }
}

/// Markup for the target area.
pub fn paint(acquisition: &Acquisition) -> String {
    report(acquisition);
    match acquisition {
        Acquisition::Success { record, .. } => render::render(record),
        Acquisition::Exhausted { .. } => render::placeholder(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AcquireError;
    use crate::source::{ApodRecord, SourceKind};

    #[test]
    fn success_paints_record() {
        let acquisition = Acquisition::Success {
            record: ApodRecord {
                title: Some("Moon".into()),
                ..Default::default()
            },
            source: SourceKind::LocalProxy,
        };
        assert_eq!(paint(&acquisition), "<h4>Moon</h4>");
    }

    #[test]
    fn exhausted_paints_placeholder_without_error_text() {
        let acquisition = Acquisition::Exhausted {
            cause: Some(AcquireError::rejected(403, "API_KEY_INVALID for key abc123")),
        };
        let html = paint(&acquisition);

        assert_eq!(html, render::placeholder());
        assert!(!html.contains("403"));
        assert!(!html.contains("abc123"));
    }

    #[test]
    fn exhausted_without_cause_paints_placeholder() {
        let html = paint(&Acquisition::Exhausted { cause: None });
        assert!(html.contains(render::UNAVAILABLE_MESSAGE));
    }
}
