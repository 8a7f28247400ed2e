use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::duration::format_expiration;
use super::metadata::Metadata;
use super::{or_default, DOMAIN_DATE_LAYOUT, PLACEHOLDER};
use crate::plugin::CHECK_OUTPUT_EOL;

impl Metadata {
    /// One-line summary of the check result, used as the plugin's service
    /// output.
    pub fn one_line_summary(&self, now: DateTime<Utc>) -> String {
        let state = self.service_state(now);
        let remaining = format_expiration(self.expiration_date(), now);

        if self.is_expired(now) {
            format!(
                "{}: {:?} domain registration EXPIRED {}{}",
                state.label(),
                self.name(),
                remaining,
                CHECK_OUTPUT_EOL
            )
        } else {
            format!(
                "{}: {:?} domain registration has {}{}",
                state.label(),
                self.name(),
                remaining,
                CHECK_OUTPUT_EOL
            )
        }
    }

    /// Multi-line overview of the WHOIS details, used as the plugin's long
    /// service output.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let eol = CHECK_OUTPUT_EOL;

        let status = if self.status().is_empty() {
            PLACEHOLDER.to_string()
        } else {
            self.status().join(", ")
        };

        let _ = write!(out, "WHOIS metadata for {:?} domain:{eol}{eol}", self.name());
        let _ = write!(out, "* Status: [{}]{eol}", status);
        let _ = write!(
            out,
            "* Creation Date: {}{eol}",
            self.creation_date().format(DOMAIN_DATE_LAYOUT)
        );
        let _ = write!(
            out,
            "* Updated Date: {}{eol}",
            self.updated_date().format(DOMAIN_DATE_LAYOUT)
        );
        let _ = write!(
            out,
            "* Expiration Date: {}{eol}",
            self.expiration_date().format(DOMAIN_DATE_LAYOUT)
        );
        let _ = write!(
            out,
            "* Registrar Name: {}{eol}",
            or_default(self.registrar_name(), PLACEHOLDER)
        );
        let _ = write!(
            out,
            "* Registrant Name: {}{eol}",
            or_default(self.registrant_name(), PLACEHOLDER)
        );
        let _ = write!(
            out,
            "* Registrant Email: {}{eol}",
            or_default(self.registrant_email(), PLACEHOLDER)
        );

        out
    }
}
