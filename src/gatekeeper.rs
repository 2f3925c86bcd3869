// Submit-time gatekeeping for the contact form.
//
// Checks run in a fixed order and the first failure wins:
// rate limit, fill-time heuristic, field validation, spam keywords.

use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::GateConfig;
use crate::metrics::{SUBMISSIONS_ALLOWED, SUBMISSIONS_REJECTED, SUBMISSIONS_TOTAL};
use crate::models::SubmissionAttempt;
use crate::rate_limit::RateWindow;
use crate::spam::SpamFilter;
use crate::validation::{FieldError, FieldRules};

// Why a submission was turned away.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "reason", content = "errors", rename_all = "snake_case")]
pub enum RejectReason {
    RateLimited,
    TooFast,
    ValidationFailed(Vec<FieldError>),
    SpamDetected,
}

impl RejectReason {
    // Label used for the rejection metric.
    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::RateLimited => "rate_limited",
            RejectReason::TooFast => "too_fast",
            RejectReason::ValidationFailed(_) => "validation_failed",
            RejectReason::SpamDetected => "spam_detected",
        }
    }

    // Lines shown to the visitor, one per problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            RejectReason::ValidationFailed(errors) => errors.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::RateLimited => f.write_str("Too many submissions. Please wait 1 minute."),
            RejectReason::TooFast => f.write_str("Please take a moment to fill out the form."),
            RejectReason::ValidationFailed(errors) => {
                let lines: Vec<String> = errors.iter().map(ToString::to_string).collect();
                f.write_str(&lines.join("\n"))
            }
            RejectReason::SpamDetected => {
                f.write_str("Message contains spam keywords. Please try again.")
            }
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "outcome", content = "rejection", rename_all = "snake_case")]
pub enum Outcome {
    Allowed,
    Rejected(RejectReason),
}

impl Outcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Outcome::Allowed)
    }
}

// The fixed rules a submission is judged against.
#[derive(Debug, Clone)]
pub struct Policy {
    pub min_fill_time: Duration,
    pub fields: FieldRules,
    pub spam: SpamFilter,
}

impl From<&GateConfig> for Policy {
    fn from(config: &GateConfig) -> Self {
        Self {
            min_fill_time: config.min_fill_time,
            fields: FieldRules::from(config),
            spam: SpamFilter::new(&config.spam_words),
        }
    }
}

// Run the ordered checks over explicit state.
//
// Only the rate check touches `rate_window`, and it records the attempt
// before the later checks run: a submission rejected as too fast, invalid
// or spam still uses up a slot.
pub fn evaluate(
    attempt: &SubmissionAttempt,
    rate_window: &mut RateWindow,
    form_loaded_at: Instant,
    policy: &Policy,
) -> Outcome {
    let now = attempt.timestamp;

    if !rate_window.try_record(now) {
        return Outcome::Rejected(RejectReason::RateLimited);
    }

    if now.saturating_duration_since(form_loaded_at) < policy.min_fill_time {
        return Outcome::Rejected(RejectReason::TooFast);
    }

    let errors = policy.fields.validate(&attempt.fields);
    if !errors.is_empty() {
        return Outcome::Rejected(RejectReason::ValidationFailed(errors));
    }

    if policy.spam.is_spam(&attempt.fields.message) {
        return Outcome::Rejected(RejectReason::SpamDetected);
    }

    Outcome::Allowed
}

// Gatekeeper for one page session. Owns the rate window and the
// instant the form became interactive.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    policy: Policy,
    rate_window: RateWindow,
    form_loaded_at: Instant,
}

impl Gatekeeper {
    pub fn new(config: &GateConfig, form_loaded_at: Instant) -> Self {
        Self {
            policy: Policy::from(config),
            rate_window: RateWindow::new(config.rate_limit, config.rate_window),
            form_loaded_at,
        }
    }

    pub fn rate_window(&self) -> &RateWindow {
        &self.rate_window
    }

    pub fn evaluate(&mut self, attempt: &SubmissionAttempt) -> Outcome {
        SUBMISSIONS_TOTAL.inc();

        let outcome = evaluate(attempt, &mut self.rate_window, self.form_loaded_at, &self.policy);
        let id = attempt.fingerprint();

        match &outcome {
            Outcome::Allowed => {
                SUBMISSIONS_ALLOWED.inc();
                info!(submission = %id, "submission allowed");
            }
            Outcome::Rejected(reason) => {
                SUBMISSIONS_REJECTED.with_label_values(&[reason.label()]).inc();
                if let RejectReason::RateLimited = reason {
                    let retry_after = self.rate_window.retry_after(attempt.timestamp);
                    warn!(submission = %id, reason = reason.label(), ?retry_after, "submission rejected");
                } else {
                    warn!(submission = %id, reason = reason.label(), "submission rejected");
                }
            }
        }

        outcome
    }
}
