//! Scripted study assistant.
//!
//! Replies come from a fixed table checked in order; the first rule with a
//! keyword contained in the lowercased query wins.

use chrono::{DateTime, Utc};

use crate::domain::{AppState, ChatMessage, Sender};

struct Rule {
  keywords: &'static [&'static str],
  response: &'static str,
}

pub const GREETING_RESPONSE: &str = "Hello! How can I help you with your studies today?";
pub const MATH_RESPONSE: &str =
  "I can help you with mathematics! What specific topic are you studying? Algebra, calculus, geometry?";
pub const SCIENCE_RESPONSE: &str = "Science is fascinating! Are you studying physics, chemistry, or biology? I can explain concepts and provide examples.";
pub const ENGLISH_RESPONSE: &str = "For English literature, I can help with analysis, themes, character studies, and writing techniques. What do you need help with?";
pub const HELP_RESPONSE: &str = "I'm here to help with your learning! You can ask me about course material, study tips, or specific questions about your subjects.";
pub const EXAM_RESPONSE: &str = "I can help you prepare for exams by explaining concepts and providing study tips. However, I won't provide direct answers during live exams for academic integrity.";
pub const FALLBACK_RESPONSE: &str = "That's an interesting question! I can help you understand this topic better. Could you provide more details about what you're studying?";

/// Greeting > subjects > help > exam integrity
static RULES: &[Rule] = &[
  Rule {
    keywords: &["hello", "hi"],
    response: GREETING_RESPONSE,
  },
  Rule {
    keywords: &["math"],
    response: MATH_RESPONSE,
  },
  Rule {
    keywords: &["science"],
    response: SCIENCE_RESPONSE,
  },
  Rule {
    keywords: &["english", "literature"],
    response: ENGLISH_RESPONSE,
  },
  Rule {
    keywords: &["help"],
    response: HELP_RESPONSE,
  },
  Rule {
    keywords: &["exam", "test"],
    response: EXAM_RESPONSE,
  },
];

/// Canned reply for a query. Matching is plain substring search, so "hi"
/// also fires inside longer words.
pub fn respond(query: &str) -> &'static str {
  let query = query.to_lowercase();
  RULES
    .iter()
    .find(|rule| rule.keywords.iter().any(|k| query.contains(k)))
    .map(|rule| rule.response)
    .unwrap_or(FALLBACK_RESPONSE)
}

/// Append the user query and the reply to the transcript.
/// Blank queries are ignored and return `None`.
pub fn send_query(state: &mut AppState, query: &str, now: DateTime<Utc>) -> Option<&'static str> {
  let query = query.trim();
  if query.is_empty() {
    return None;
  }

  let reply = respond(query);
  state
    .ai_chat_history
    .push(ChatMessage::new(Sender::User, query, now));
  state
    .ai_chat_history
    .push(ChatMessage::new(Sender::Bot, reply, now));
  Some(reply)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_respond_priority() {
    assert_eq!(respond("Hello there"), GREETING_RESPONSE);
    assert_eq!(respond("tell me about math"), MATH_RESPONSE);
    assert_eq!(respond("SCIENCE homework"), SCIENCE_RESPONSE);
    assert_eq!(respond("classic literature"), ENGLISH_RESPONSE);
    assert_eq!(respond("can you help"), HELP_RESPONSE);
    assert_eq!(respond("upcoming exam"), EXAM_RESPONSE);
    assert_eq!(respond("xyzzy"), FALLBACK_RESPONSE);
  }

  #[test]
  fn test_earlier_rules_win() {
    // Both greeting and math match; greeting comes first
    assert_eq!(respond("hello, math please"), GREETING_RESPONSE);
    // "help" beats "test"
    assert_eq!(respond("help me test"), HELP_RESPONSE);
  }

  #[test]
  fn test_send_query_appends_two_messages() {
    let now = Utc::now();
    let mut state = AppState::seed(now);
    let start = state.ai_chat_history.len();

    for query in ["Hello there", "tell me about math", "xyzzy"] {
      let before = state.ai_chat_history.len();
      send_query(&mut state, query, now).unwrap();
      assert_eq!(state.ai_chat_history.len(), before + 2);
    }

    let tail = &state.ai_chat_history[start..start + 2];
    assert_eq!(tail[0].sender, Sender::User);
    assert_eq!(tail[0].message, "Hello there");
    assert_eq!(tail[1].sender, Sender::Bot);
    assert_eq!(tail[1].message, GREETING_RESPONSE);
  }

  #[test]
  fn test_blank_query_is_ignored() {
    let now = Utc::now();
    let mut state = AppState::seed(now);
    assert_eq!(send_query(&mut state, "   ", now), None);
    assert_eq!(state.ai_chat_history.len(), 1);
  }
}
