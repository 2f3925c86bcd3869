use chrono::{NaiveTime, Timelike};

use crate::config::GreetingPolicy;

// Clock text, e.g. "9:05 AM" / "12:00 PM"
pub fn clock_text<T: Timelike>(time: &T) -> String {
    let (is_pm, hour12) = time.hour12();
    let suffix = if is_pm { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour12, time.minute(), suffix)
}

pub fn greeting(hour: u32, policy: GreetingPolicy) -> &'static str {
    match policy {
        GreetingPolicy::ThreeTier => match hour {
            0..=11 => "Good Morning",
            12..=16 => "Good Afternoon",
            _ => "Good Evening",
        },
        GreetingPolicy::FourTier => match hour {
            5..=11 => "Good Morning",
            12..=16 => "Good Afternoon",
            17..=20 => "Good Evening",
            _ => "Good Night",
        },
    }
}

// Greeting as placed ahead of the visitor name on the page
pub fn greeting_text<T: Timelike>(time: &T, policy: GreetingPolicy) -> String {
    format!("{}, ", greeting(time.hour(), policy))
}

// Both display strings for one instant
pub fn render(time: NaiveTime, policy: GreetingPolicy) -> (String, String) {
    (clock_text(&time), greeting_text(&time, policy))
}
