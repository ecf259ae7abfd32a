//! Event rendering for the terminal

use casket_events::{AppEvent, AuditEvent, CleanupEvent, EventMessage, GeneralEvent};
use casket_types::pluralize;
use console::{Style, Term};

use crate::logging::log_event_with_tracing;

/// Turns events into terminal output and log records
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    /// Stdout carries the JSON document; nothing else is printed
    json_mode: bool,
    term: Term,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool, json_mode: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            json_mode,
            term: Term::stderr(),
        }
    }

    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);

        if self.json_mode {
            return;
        }

        if let Some(line) = self.render(&message.event) {
            let _ = self.term.write_line(&line);
        }
    }

    /// Text for an event, if it is shown at the current verbosity
    fn render(&self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::General(GeneralEvent::DebugLog { message }) if self.debug_enabled => {
                Some(format!("{} {message}", self.paint(Style::new().magenta(), "==>")))
            }
            AppEvent::General(GeneralEvent::Warning { message }) => Some(format!(
                "{} {message}",
                self.paint(Style::new().yellow().bold(), "Warning:")
            )),

            AppEvent::Audit(AuditEvent::ChangesDiscovered { casks, .. }) => Some(format!(
                "{} {}",
                self.paint(Style::new().blue().bold(), "==>"),
                self.paint(
                    Style::new().bold(),
                    &format!("{}: {}", pluralize(casks.len(), "modified cask"), casks.join(" "))
                )
            )),
            AppEvent::Audit(AuditEvent::CaskAuditStarted {
                token,
                download,
                check_token_conflicts,
            }) if self.debug_enabled => Some(format!(
                "{} Auditing {token} (download: {download}, token conflicts: {check_token_conflicts})",
                self.paint(Style::new().magenta(), "==>")
            )),
            AppEvent::Audit(AuditEvent::AuditorOutput { stdout, stderr, .. }) => {
                let text = [stdout.as_str(), stderr.as_str()]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");
                (!text.is_empty()).then_some(text)
            }
            AppEvent::Audit(AuditEvent::CaskAuditCompleted { token, passed: false }) => Some(
                format!("{} {token}", self.paint(Style::new().red(), "audit failed:")),
            ),

            AppEvent::Cleanup(CleanupEvent::Starting { path }) => Some(format!(
                "{} Removing cached downloads in {}",
                self.paint(Style::new().blue().bold(), "==>"),
                path.display()
            )),
            AppEvent::Cleanup(CleanupEvent::Completed { entries_removed, .. })
                if self.debug_enabled =>
            {
                Some(format!("Removed {}", pluralize(*entries_removed, "cached download")))
            }
            AppEvent::Cleanup(CleanupEvent::Failed { path, failure }) => Some(format!(
                "{} could not clean {}: {}",
                self.paint(Style::new().yellow().bold(), "Warning:"),
                path.display(),
                failure.message
            )),

            _ => None,
        }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style
            .force_styling(self.colors_enabled)
            .apply_to(text)
            .to_string()
    }
}
