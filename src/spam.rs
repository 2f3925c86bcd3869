// Keyword denylist - case-insensitive substring match
#[derive(Debug, Clone)]
pub struct SpamFilter {
    words: Vec<String>, // stored lowercased
}

impl SpamFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    // First denylisted word found in the text, if any
    pub fn find_match(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.words
            .iter()
            .find(|w| haystack.contains(w.as_str()))
            .map(String::as_str)
    }

    pub fn is_spam(&self, text: &str) -> bool {
        self.find_match(text).is_some()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
