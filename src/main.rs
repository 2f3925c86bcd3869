use clap::Parser;
use contact_gate::config::{Args, GateConfig};
use contact_gate::models::FormFields;
use contact_gate::session::{DisplayUpdate, Host, HostEvent, PageSession, run_clock};
use contact_gate::transport::{HttpForwarder, TransportError};
use contact_gate::metrics;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// Page host on stdio - events in as JSON lines, display updates out as JSON lines
struct StdioHost {
    forwarder: Option<HttpForwarder>,
}

impl Host for StdioHost {
    fn render(&self, update: DisplayUpdate) {
        match serde_json::to_string(&update) {
            Ok(line) => {
                let mut out = std::io::stdout().lock();
                if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
                    warn!(error = %e, "failed to write display update");
                }
            }
            Err(e) => warn!(error = %e, "failed to encode display update"),
        }
    }

    async fn hand_off(&self, fields: FormFields) -> Result<(), TransportError> {
        match &self.forwarder {
            Some(forwarder) => forwarder.forward(&fields).await,
            None => {
                info!("no action url configured, submission dropped after hand-off");
                Ok(())
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logs go to stderr, stdout is for display updates
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = GateConfig::from(&args);

    let host = Arc::new(StdioHost {
        forwarder: args.action_url.as_deref().map(HttpForwarder::new),
    });
    let mut session = PageSession::new(&config, Arc::clone(&host), Instant::now());

    info!(
        rate_limit = config.rate_limit,
        rate_window = ?config.rate_window,
        min_fill_time = ?config.min_fill_time,
        greeting = ?config.greeting,
        spam_words = config.spam_words.len(),
        "page session started"
    );
    if let Some(url) = &args.action_url {
        info!(%url, "forwarding allowed submissions");
    }

    let clock = tokio::spawn(run_clock(Arc::clone(&host), config.greeting, config.clock_interval));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<HostEvent>(&line) {
            Ok(event) => {
                session.dispatch(event, Instant::now());
            }
            Err(e) => warn!(error = %e, "ignoring malformed event"),
        }
    }

    clock.abort();
    session.settle().await;

    if args.dump_metrics {
        eprintln!("{}", metrics::render()?);
    }

    Ok(())
}
