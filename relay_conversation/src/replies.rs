//! Canned replies and completion prompts.

use relay_core::ChatOptions;

pub const HELLO_REPLY: &str = "Hello! 👋 How can I help you today?";
pub const HI_REPLY: &str = "Hi there! 😊 What can I do for you?";
pub const HELP_REPLY: &str = "I can help you with:\n\
• General questions\n\
• Information about our services\n\
• \"summarize\" - a recap of our conversation\n\
• \"history\" - how many messages I remember\n\
• \"clear\" - forget our conversation\n\n\
Just type your message and I'll do my best to assist!";
pub const BYE_REPLY: &str = "Goodbye! 👋 Have a great day!";
pub const THANKS_REPLY: &str = "You're welcome! 😊 Is there anything else I can help you with?";
pub const JOKE_REPLY: &str =
    "Why don't scientists trust atoms? Because they make up everything! 😄";
pub const WEATHER_REPLY: &str = "I wish I could check the weather for you! 🌤️ Try checking your weather app or asking a voice assistant.";
pub const DEFAULT_REPLY: &str =
    "I'm a simple chatbot. Try saying \"hello\", \"help\", or ask me a question!";

pub const HISTORY_CLEARED: &str = "🗑️ Your conversation history has been cleared.";
pub const NO_HISTORY: &str = "📭 You don't have any conversation history yet.";

pub const SUMMARY_NO_HISTORY: &str =
    "📝 There's no conversation to summarize yet. Start chatting with me first!";
pub const SUMMARY_UNAVAILABLE: &str =
    "Sorry, conversation summaries aren't available right now.";
pub const SUMMARY_FAILED: &str =
    "Sorry, I couldn't generate a summary right now. Please try again later.";
pub const SUMMARY_HEADER: &str = "📋 *Conversation Summary*";

pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful WhatsApp chatbot. \
Answer in a friendly, conversational tone and keep every response under 300 characters.";

pub const SUMMARY_SYSTEM_PROMPT: &str =
    "You summarize chat conversations accurately and concisely.";

/// Sampling for free-form replies.
pub const REPLY_OPTIONS: ChatOptions = ChatOptions {
    max_tokens: 150,
    temperature: 0.7,
};

/// Sampling for summaries; cooler than replies.
pub const SUMMARY_OPTIONS: ChatOptions = ChatOptions {
    max_tokens: 200,
    temperature: 0.3,
};

#[must_use]
pub fn history_count(count: usize) -> String {
    format!(
        "📚 I remember {count} messages from our conversation. \
Send \"summarize\" for a recap or \"clear\" to delete them."
    )
}

#[must_use]
pub fn summary_prompt(transcript: &str) -> String {
    format!(
        "Summarize the following WhatsApp conversation between a user and a chatbot \
in a few short bullet points. Mention the main topics and any open questions.\n\n\
Conversation:\n{transcript}"
    )
}

#[must_use]
pub fn with_summary_header(summary: &str) -> String {
    format!("{SUMMARY_HEADER}\n\n{summary}")
}

/// Current local time, formatted like `3:04:05 PM`.
#[must_use]
pub fn current_time() -> String {
    format!(
        "The current time is {}",
        chrono::Local::now().format("%-I:%M:%S %p")
    )
}
