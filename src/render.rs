// Plain-text rendering of a user's activity feed.

use std::io::{self, Write};

use serde_json::Value;

use crate::github::ActivityEvent;

pub const INVALID_RESPONSE_MESSAGE: &str = "Failed to fetch activity or invalid response format.";

/// Writes activity summaries, optionally restricted to one event type.
pub struct ActivityRenderer<'a> {
    username: &'a str,
    filter_type: Option<&'a str>,
}

impl<'a> ActivityRenderer<'a> {
    pub fn new(username: &'a str, filter_type: Option<&'a str>) -> Self {
        Self {
            username,
            filter_type,
        }
    }

    /// Whether an event passes the type filter. Exact, case-sensitive match.
    pub fn matches(&self, event: &ActivityEvent) -> bool {
        match self.filter_type {
            Some(filter) => event.type_name == filter,
            None => true,
        }
    }

    /// Render a feed. Anything other than a JSON array gets one diagnostic on `err`.
    /// Returns the number of event lines written.
    pub fn render(
        &self,
        feed: &Value,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<usize> {
        let Some(events) = feed.as_array() else {
            writeln!(err, "{}", INVALID_RESPONSE_MESSAGE)?;
            return Ok(0);
        };
        self.render_events(events, out)
    }

    /// Render a known list of raw events with the header line.
    pub fn render_events(&self, events: &[Value], out: &mut impl Write) -> io::Result<usize> {
        writeln!(out, "Recent activity for {}:", self.username)?;
        writeln!(out)?;

        let mut written = 0;
        for event in events.iter().map(ActivityEvent::from_value) {
            if !self.matches(&event) {
                continue;
            }
            if let Some(line) = event.summary() {
                writeln!(out, "{}", line)?;
                written += 1;
            }
        }

        out.flush()?;
        Ok(written)
    }
}
