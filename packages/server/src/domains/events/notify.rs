//! Declined-event notification: draft an email per declined event with
//! the decision model, then deliver each one.
//!
//! The model is asked for three lines per event: recipient, subject,
//! HTML body, with a blank line between events. The block parser is
//! tolerant in the same spirit as the triage parser: incomplete blocks
//! are dropped, and a malformed response simply means no mail goes out.
//! Delivery failures are counted and logged, never fatal to moderation.

use serde::Serialize;
use tracing::warn;

use crate::common::EventsError;
use crate::domains::events::models::Event;
use crate::domains::events::moderation;
use crate::kernel::ServerDeps;

/// One drafted email, parsed from the model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftedEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Summary of one notification run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotifyReport {
    pub sent: usize,
    pub failed: usize,
}

/// Build the email-drafting prompt over the declined events.
pub fn build_email_prompt(declined: &[Event]) -> String {
    let events_text = declined
        .iter()
        .map(|e| e.summary())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are writing on behalf of TSS Calendar to people whose submitted \
         school events were declined. For each event below, explain why it \
         was declined and what adjustments would get it approved. Never \
         mention AI; the sender is always TSS Calendar. For each event \
         respond with exactly three lines: first the respondent's email \
         address and nothing else, then the subject line, then the full \
         email body as a single line of HTML styled with #ffe21f and \
         #252122 (the school colors). Leave one blank line between events \
         and include nothing else.\n\nDeclined events:\n{}",
        events_text,
    )
}

/// Parse the model response into drafted emails. Blocks are groups of
/// consecutive non-empty lines; a block needs at least three lines
/// (recipient, subject, body) or it is dropped.
pub fn parse_email_blocks(response: &str) -> Vec<DraftedEmail> {
    let mut emails = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in response.lines().chain(std::iter::once("")) {
        let line = line.trim();
        if line.is_empty() {
            if let Some(email) = block_to_email(&block) {
                emails.push(email);
            }
            block.clear();
        } else {
            block.push(line);
        }
    }

    emails
}

fn block_to_email(block: &[&str]) -> Option<DraftedEmail> {
    if block.len() < 3 {
        return None;
    }
    let to = block[0];
    let subject = block[1];
    // Tolerate the body spilling over extra lines.
    let html = block[2..].join("\n");
    if to.is_empty() || subject.is_empty() || html.is_empty() {
        return None;
    }
    Some(DraftedEmail {
        to: to.to_string(),
        subject: subject.to_string(),
        html,
    })
}

/// Draft and send one email per declined event.
pub async fn notify_declined(deps: &ServerDeps) -> Result<NotifyReport, EventsError> {
    let declined = moderation::list_by_status(deps.store.as_ref(), "declined").await?;
    if declined.is_empty() {
        return Ok(NotifyReport::default());
    }

    let prompt = build_email_prompt(&declined);
    let response = deps.model.complete(&prompt).await?;
    let emails = parse_email_blocks(&response);

    let mut report = NotifyReport::default();
    for email in &emails {
        match deps.notifier.send(&email.to, &email.subject, &email.html).await {
            Ok(()) => report.sent += 1,
            Err(e) => {
                warn!(to = %email.to, error = %e, "Declined-event email not delivered");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_blocks_of_three_lines() {
        let response = "a@example.org\nAbout your event\n<html>sorry</html>\n\n\
                        b@example.org\nAbout your other event\n<html>also sorry</html>\n";
        let emails = parse_email_blocks(response);
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].to, "a@example.org");
        assert_eq!(emails[1].subject, "About your other event");
    }

    #[test]
    fn drops_incomplete_blocks() {
        let response = "a@example.org\nSubject only\n\nb@example.org\nSubject\n<html>ok</html>";
        let emails = parse_email_blocks(response);
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, "b@example.org");
    }

    #[test]
    fn joins_spilled_body_lines() {
        let response = "a@example.org\nSubject\n<html>\nline two\n</html>";
        let emails = parse_email_blocks(response);
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].html, "<html>\nline two\n</html>");
    }

    #[test]
    fn empty_or_chatty_response_yields_no_emails() {
        assert!(parse_email_blocks("").is_empty());
        assert!(parse_email_blocks("Sure! Here you go.\n\nThanks!").is_empty());
    }
}
