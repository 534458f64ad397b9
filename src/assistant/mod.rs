// Conversational assistant stub. Replies are canned and independent of
// the input; there is no language understanding here.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const ASSISTANT_NAME: &str = "RehabBot";

/// Fixed delay before a reply lands in the transcript
pub const REPLY_DELAY: Duration = Duration::from_secs(1);

pub const RESPONSES: [&str; 5] = [
    "Great job on today's session! Your form is really improving.",
    "Remember to listen to your body - rest if you feel any pain.",
    "You're making excellent progress toward your goals!",
    "Try to focus on the quality of movement rather than speed.",
    "Don't forget to stay hydrated during your exercises.",
];

pub const INSIGHTS: [&str; 3] = [
    "Your morning sessions tend to have better form accuracy.",
    "You've improved your range of motion by 15% this month!",
    "Consistency is your strength - keep building on that streak!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAuthor {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub author: ChatAuthor,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(author: ChatAuthor, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Transcript plus a canned-reply picker
#[derive(Debug)]
pub struct Assistant {
    transcript: Vec<ChatMessage>,
    rng: StdRng,
}

impl Assistant {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            transcript: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn insights(&self) -> &'static [&'static str] {
        &INSIGHTS
    }

    /// Append the user's message and pick the reply that should land
    /// after `REPLY_DELAY`. Delivery timing belongs to the caller.
    pub fn record_user(&mut self, text: impl Into<String>) -> String {
        self.transcript
            .push(ChatMessage::new(ChatAuthor::User, text));
        RESPONSES[self.rng.gen_range(0..RESPONSES.len())].to_string()
    }

    /// Deliver a previously composed reply into the transcript
    pub fn record_reply(&mut self, text: impl Into<String>) {
        self.transcript
            .push(ChatMessage::new(ChatAuthor::Assistant, text));
    }

    /// Full exchange with the fixed reply delay, for the chat REPL
    pub async fn exchange(&mut self, text: impl Into<String>) -> String {
        let reply = self.record_user(text);
        tokio::time::sleep(REPLY_DELAY).await;
        self.record_reply(reply.clone());
        reply
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_is_from_pool_and_input_independent() {
        let mut a = Assistant::seeded(9);
        let mut b = Assistant::seeded(9);

        let reply_a = a.record_user("my knee hurts");
        let reply_b = b.record_user("what is the weather");

        assert!(RESPONSES.contains(&reply_a.as_str()));
        // Same seed, different input: same reply
        assert_eq!(reply_a, reply_b);
    }

    #[test]
    fn test_transcript_ordering() {
        let mut assistant = Assistant::seeded(1);
        let reply = assistant.record_user("hello");
        assistant.record_reply(reply);

        let transcript = assistant.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].author, ChatAuthor::User);
        assert_eq!(transcript[0].text, "hello");
        assert_eq!(transcript[1].author, ChatAuthor::Assistant);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exchange_delivers_after_delay() {
        let mut assistant = Assistant::seeded(1);
        let reply = assistant.exchange("hi").await;
        assert_eq!(assistant.transcript().len(), 2);
        assert_eq!(assistant.transcript()[1].text, reply);
    }
}
