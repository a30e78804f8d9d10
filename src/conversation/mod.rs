//! Conversational small-talk responder.
//!
//! Runs before classification: if the question is a greeting, a pleasantry,
//! or a capability/gratitude phrase, the assistant answers locally from the
//! template lists and the pipeline never touches the network.

mod templates;

use chrono::{Local, Timelike};
use rand::seq::IndexedRandom;

use templates::{
    AFTERNOON, EVENING, GRATITUDE, GREETING, HOW_ARE_YOU, MORNING, SIMPLE_GREETINGS,
    WHAT_CAN_YOU_DO,
};

/// Result of conversational matching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationalMatch {
    pub is_conversational: bool,
    pub response: Option<String>,
}

impl ConversationalMatch {
    fn hit(response: &str) -> Self {
        Self {
            is_conversational: true,
            response: Some(response.to_string()),
        }
    }

    fn miss() -> Self {
        Self::default()
    }
}

/// Check whether a question is small talk and, if so, produce a canned
/// response. Uses the local wall-clock hour for time-of-day greetings.
pub fn check_conversational(question: &str) -> ConversationalMatch {
    check_with_hour(question, Local::now().hour())
}

/// Hour-parameterized matcher (`hour` in 0..24). Order matters: simple
/// greetings, time-of-day phrases, well-being, capability, gratitude, then
/// compound greetings inside short questions.
pub fn check_with_hour(question: &str, hour: u32) -> ConversationalMatch {
    let normalized = normalize(question);
    if normalized.is_empty() {
        return ConversationalMatch::miss();
    }

    for greeting in SIMPLE_GREETINGS {
        if normalized == *greeting
            || normalized.starts_with(&format!("{greeting} "))
            || normalized.ends_with(&format!(" {greeting}"))
        {
            return ConversationalMatch::hit(pick(GREETING));
        }
    }

    if ["good morning", "good afternoon", "good evening"]
        .iter()
        .any(|phrase| normalized.contains(phrase))
    {
        // Respond for the actual time of day, whatever the user wrote.
        let candidates = if hour < 12 {
            MORNING
        } else if hour < 17 {
            AFTERNOON
        } else {
            EVENING
        };
        return ConversationalMatch::hit(pick(candidates));
    }

    if ["how are you", "how r u", "hows it going", "how is it going"]
        .iter()
        .any(|phrase| normalized.contains(phrase))
    {
        return ConversationalMatch::hit(pick(HOW_ARE_YOU));
    }

    if ["what can you do", "what do you do", "how can you help"]
        .iter()
        .any(|phrase| normalized.contains(phrase))
    {
        return ConversationalMatch::hit(pick(WHAT_CAN_YOU_DO));
    }

    if ["thank", "thanks", "thx", "appreciate"]
        .iter()
        .any(|phrase| normalized.contains(phrase))
    {
        return ConversationalMatch::hit(pick(GRATITUDE));
    }

    // "hello there assistant" style: a greeting word inside a short question.
    let words: Vec<&str> = normalized.split(' ').collect();
    if words.len() <= 4 && words.iter().any(|word| SIMPLE_GREETINGS.contains(word)) {
        return ConversationalMatch::hit(pick(GREETING));
    }

    ConversationalMatch::miss()
}

/// Lowercase, strip `.,!?`, and collapse runs of whitespace to single spaces.
fn normalize(question: &str) -> String {
    question
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn pick(candidates: &[&'static str]) -> &'static str {
    candidates
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_greetings_match_exact_prefix_and_suffix() {
        for question in ["hi", "Hey!", "hello there", "well hello"] {
            let result = check_with_hour(question, 10);
            assert!(result.is_conversational, "{question:?}");
            assert!(GREETING.contains(&result.response.unwrap().as_str()));
        }
    }

    #[test]
    fn time_of_day_follows_the_clock_not_the_phrase() {
        let morning = check_with_hour("good evening", 9);
        assert!(MORNING.contains(&morning.response.unwrap().as_str()));

        let afternoon = check_with_hour("good morning", 14);
        assert!(AFTERNOON.contains(&afternoon.response.unwrap().as_str()));

        let evening = check_with_hour("good morning", 21);
        assert!(EVENING.contains(&evening.response.unwrap().as_str()));
    }

    #[test]
    fn well_being_and_capability_and_gratitude() {
        let result = check_with_hour("How are you today?", 10);
        assert!(HOW_ARE_YOU.contains(&result.response.unwrap().as_str()));

        let result = check_with_hour("what can you do for me", 10);
        assert!(WHAT_CAN_YOU_DO.contains(&result.response.unwrap().as_str()));

        let result = check_with_hour("thanks a lot!", 10);
        assert!(GRATITUDE.contains(&result.response.unwrap().as_str()));
    }

    #[test]
    fn compound_greeting_only_in_short_questions() {
        assert!(check_with_hour("oh hello dear assistant", 10).is_conversational);
        assert!(
            !check_with_hour("rename the hello module before we release it next sprint", 10)
                .is_conversational
        );
    }

    #[test]
    fn product_questions_are_not_conversational() {
        for question in ["", "Tell me about ARCAD-Skipper", "What products do you offer?"] {
            let result = check_with_hour(question, 10);
            assert!(!result.is_conversational, "{question:?}");
            assert_eq!(result.response, None);
        }
    }
}
