use clap::{Parser, ValueEnum};
use std::time::Duration;

// Words that mark a message as spam unless overridden on the command line
pub const DEFAULT_SPAM_WORDS: &[&str] = &[
    "free money",
    "buy now",
    "click here",
    "subscribe",
    "promo",
    "viagra",
    "casino",
    "lottery",
    "guaranteed",
    "million dollars",
];

// How the greeting text is picked from the hour of day
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreetingPolicy {
    // Morning / Afternoon / Evening
    #[default]
    ThreeTier,
    // Morning / Afternoon / Evening / Night
    FourTier,
}

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "contact-gate")]
#[command(about = "Contact form gatekeeper and page clock for a static site")]
pub struct Args {
    // Max submissions allowed per window
    #[arg(long, default_value_t = 3)]
    pub rate_limit: usize,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Minimum time between page load and submit, in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub min_fill_ms: u64,

    // Greeting boundaries to use
    #[arg(long, value_enum, default_value_t = GreetingPolicy::ThreeTier)]
    pub greeting: GreetingPolicy,

    // Spam denylist (comma-separated), replaces the built-in list
    // Example: "casino,lottery,free money"
    #[arg(long)]
    pub spam_words: Option<String>,

    // Where allowed submissions are posted; logged only when absent
    #[arg(long)]
    pub action_url: Option<String>,

    // Clock refresh interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub clock_interval_ms: u64,

    // Print prometheus metrics to stderr on exit
    #[arg(long, default_value_t = false)]
    pub dump_metrics: bool,
}

// Everything the gatekeeper and page session need to know
#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    pub rate_limit: usize,
    pub rate_window: Duration,
    pub min_fill_time: Duration,
    pub name_min_chars: usize,
    pub message_min_chars: usize,
    pub message_max_chars: usize,
    pub spam_words: Vec<String>,
    pub greeting: GreetingPolicy,
    pub clock_interval: Duration,
    pub success_visible_for: Duration,
    pub handoff_delay: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            rate_limit: 3,
            rate_window: Duration::from_secs(60),
            min_fill_time: Duration::from_millis(2000),
            name_min_chars: 2,
            message_min_chars: 10,
            message_max_chars: 500,
            spam_words: DEFAULT_SPAM_WORDS.iter().map(|w| w.to_string()).collect(),
            greeting: GreetingPolicy::default(),
            clock_interval: Duration::from_secs(1),
            success_visible_for: Duration::from_millis(5000),
            handoff_delay: Duration::from_millis(1000),
        }
    }
}

impl From<&Args> for GateConfig {
    fn from(args: &Args) -> Self {
        let spam_words = match &args.spam_words {
            Some(list) => parse_word_list(list),
            None => GateConfig::default().spam_words,
        };

        Self {
            rate_limit: args.rate_limit,
            rate_window: Duration::from_secs(args.rate_window),
            min_fill_time: Duration::from_millis(args.min_fill_ms),
            spam_words,
            greeting: args.greeting,
            clock_interval: Duration::from_millis(args.clock_interval_ms),
            ..GateConfig::default()
        }
    }
}

// "casino, lottery,,free money" -> ["casino", "lottery", "free money"]
fn parse_word_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim()) // remove spaces
        .filter(|s| !s.is_empty()) // remove empty entries
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let args = Args::parse_from(["contact-gate"]);
        assert_eq!(GateConfig::from(&args), GateConfig::default());
    }

    #[test]
    fn spam_words_override_replaces_default_list() {
        let args = Args::parse_from(["contact-gate", "--spam-words", " casino, ,free money "]);
        let config = GateConfig::from(&args);
        assert_eq!(config.spam_words, vec!["casino", "free money"]);
    }

    #[test]
    fn greeting_policy_parses_from_kebab_case() {
        let args = Args::parse_from(["contact-gate", "--greeting", "four-tier"]);
        assert_eq!(GateConfig::from(&args).greeting, GreetingPolicy::FourTier);
    }
}
