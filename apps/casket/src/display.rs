//! Output rendering for the final result

use casket_ops::report_to_json;
use casket_types::RunReport;
use console::{Style, Term};
use std::io;

use crate::error::CliError;

/// Renders the run report or the terminating error
pub struct OutputRenderer {
    json_output: bool,
    colors_enabled: bool,
    term: Term,
}

impl OutputRenderer {
    pub fn new(json_output: bool, colors_enabled: bool) -> Self {
        Self {
            json_output,
            colors_enabled,
            term: Term::stdout(),
        }
    }

    /// Render a successful run: the report in JSON mode, nothing otherwise
    pub fn render_report(&self, report: &RunReport) -> Result<(), CliError> {
        if self.json_output {
            let json = report_to_json(report)?;
            self.term.write_line(&json)?;
        }
        Ok(())
    }

    /// Render a fatal error: JSON object on stdout in JSON mode, `Error: ...` on stderr otherwise
    pub fn render_error(&self, error: &CliError) -> io::Result<()> {
        if self.json_output {
            let value = serde_json::json!({
                "error": {
                    "message": error.message(),
                    "code": error.code(),
                    "hint": error.hint(),
                }
            });
            return self.term.write_line(&value.to_string());
        }

        let prefix = self.style(Style::new().red().bold()).apply_to("Error:");
        Term::stderr().write_line(&format!("{prefix} {error}"))
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.colors_enabled)
    }
}
