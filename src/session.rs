// One page session: the gatekeeper plus the display work around it.
//
// The host (a browser shim, or the stdin/stdout binary) feeds events in
// and receives [`DisplayUpdate`]s back. Deferred work runs on tokio timers.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};
use tracing::{debug, warn};

use crate::clock;
use crate::config::{GateConfig, GreetingPolicy};
use crate::feedback::FieldFeedback;
use crate::gatekeeper::{Gatekeeper, Outcome};
use crate::metrics::HANDOFF_FAILURES;
use crate::models::{Field, FormFields, SubmissionAttempt};
use crate::nav;
use crate::transport::TransportError;
use crate::validation::FieldRules;

// Instruction to the display layer.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "update", rename_all = "snake_case")]
pub enum DisplayUpdate {
    Clock { text: String },
    Greeting { text: String },
    NavActive { href: String },
    Field(FieldFeedback),
    Alert { messages: Vec<String> },
    SuccessShown,
    SuccessHidden,
    FormReset,
}

// Event delivered by the hosting page.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    Load {
        #[serde(default)]
        path: String,
        #[serde(default)]
        links: Vec<String>,
    },
    Field {
        field: Field,
        #[serde(default)]
        value: String,
    },
    Submit {
        #[serde(flatten)]
        fields: FormFields,
    },
}

// The page environment a session renders into.
pub trait Host: Send + Sync + 'static {
    fn render(&self, update: DisplayUpdate);

    // Let the page-level submission go ahead.
    fn hand_off(&self, fields: FormFields) -> impl Future<Output = Result<(), TransportError>> + Send;
}

pub struct PageSession<H: Host> {
    host: Arc<H>,
    gatekeeper: Gatekeeper,
    rules: FieldRules,
    greeting: GreetingPolicy,
    success_visible_for: Duration,
    handoff_delay: Duration,
    pending: Vec<JoinHandle<()>>, // success/hand-off timers not yet known to be done
}

impl<H: Host> PageSession<H> {
    // Start a session; `loaded_at` is when the form became interactive.
    pub fn new(config: &GateConfig, host: Arc<H>, loaded_at: Instant) -> Self {
        Self {
            host,
            gatekeeper: Gatekeeper::new(config, loaded_at),
            rules: FieldRules::from(config),
            greeting: config.greeting,
            success_visible_for: config.success_visible_for,
            handoff_delay: config.handoff_delay,
            pending: Vec::new(),
        }
    }

    pub fn gatekeeper(&self) -> &Gatekeeper {
        &self.gatekeeper
    }

    pub fn dispatch(&mut self, event: HostEvent, now: Instant) -> Option<Outcome> {
        match event {
            HostEvent::Load { path, links } => {
                self.on_load(&path, &links);
                None
            }
            HostEvent::Field { field, value } => {
                self.on_field_change(field, &value);
                None
            }
            HostEvent::Submit { fields } => Some(self.on_submit(fields, now)),
        }
    }

    pub fn on_load(&self, path: &str, links: &[String]) {
        for href in nav::active_links(links, path) {
            self.host.render(DisplayUpdate::NavActive { href: href.to_string() });
        }
        render_clock(self.host.as_ref(), self.greeting);
    }

    pub fn on_field_change(&self, field: Field, value: &str) {
        let feedback = FieldFeedback::for_value(&self.rules, field, value);
        debug!(field = %field, state = ?feedback.state, "field feedback");
        self.host.render(DisplayUpdate::Field(feedback));
    }

    pub fn on_submit(&mut self, fields: FormFields, now: Instant) -> Outcome {
        let attempt = SubmissionAttempt::new(fields, now);
        let outcome = self.gatekeeper.evaluate(&attempt);

        match &outcome {
            Outcome::Rejected(reason) => {
                self.host.render(DisplayUpdate::Alert { messages: reason.messages() });
            }
            Outcome::Allowed => {
                self.host.render(DisplayUpdate::SuccessShown);
                self.host.render(DisplayUpdate::FormReset);
                self.schedule_hide_success();
                self.schedule_hand_off(attempt.fields);
            }
        }

        outcome
    }

    // Wait for outstanding success/hand-off timers. Returns at once when none are pending.
    pub async fn settle(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                warn!(error = %e, "display timer task failed");
            }
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        self.pending.retain(|h| !h.is_finished());
        self.pending.push(handle);
    }

    // A later success may be hidden early by an earlier timer
    fn schedule_hide_success(&mut self) {
        let host = Arc::clone(&self.host);
        let delay = self.success_visible_for;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            host.render(DisplayUpdate::SuccessHidden);
        });
        self.track(handle);
    }

    fn schedule_hand_off(&mut self, fields: FormFields) {
        let host = Arc::clone(&self.host);
        let delay = self.handoff_delay;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            if let Err(e) = host.hand_off(fields).await {
                HANDOFF_FAILURES.inc();
                warn!(error = %e, "hand-off to page failed");
            }
        });
        self.track(handle);
    }
}

fn render_clock<H: Host>(host: &H, policy: GreetingPolicy) {
    let (clock_text, greeting_text) = clock::render(chrono::Local::now().time(), policy);
    host.render(DisplayUpdate::Clock { text: clock_text });
    host.render(DisplayUpdate::Greeting { text: greeting_text });
}

// Refresh clock and greeting every `period`, forever.
pub async fn run_clock<H: Host>(host: Arc<H>, policy: GreetingPolicy, period: Duration) {
    let mut ticker = interval(period);
    debug!(?period, "clock started");

    loop {
        ticker.tick().await;
        render_clock(host.as_ref(), policy);
    }
}
