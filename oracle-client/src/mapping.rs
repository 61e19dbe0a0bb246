//! Request body construction for both routes.

use oracle_types::{ChatMessage, ConsultRequest};
use serde_json::{json, Value};

use crate::persona::{model_for, system_prompt};

/// Body for the relay function: history plus the mode flag. The relay adds
/// the persona and picks the model itself.
pub(crate) fn to_relay_request(request: &ConsultRequest) -> Value {
    json!({
        "messages": request.messages,
        "isDeepWisdom": request.mode.is_deep_wisdom(),
    })
}

/// OpenAI-compatible streaming body for a gateway: persona first, then the
/// history.
pub(crate) fn to_gateway_request(request: &ConsultRequest, model: Option<&str>) -> Value {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    messages.push(ChatMessage::system(system_prompt(request.mode)));
    messages.extend(request.messages.iter().cloned());

    json!({
        "model": model.unwrap_or_else(|| model_for(request.mode)),
        "messages": messages,
        "stream": true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{DEEP_WISDOM_MODEL, STANDARD_MODEL, SYSTEM_PROMPT};
    use oracle_types::Mode;

    fn request(mode: Mode) -> ConsultRequest {
        ConsultRequest {
            messages: vec![
                ChatMessage::user("What is ojas?"),
                ChatMessage::assistant("Ojas is vital essence."),
                ChatMessage::user("How do I build it?"),
            ],
            mode,
        }
    }

    #[test]
    fn relay_body_carries_history_and_flag() {
        let body = to_relay_request(&request(Mode::DeepWisdom));
        assert_eq!(body["isDeepWisdom"], true);
        assert_eq!(body["messages"].as_array().unwrap().len(), 3);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][2]["content"], "How do I build it?");
        assert!(body.get("model").is_none());
    }

    #[test]
    fn gateway_body_prepends_persona() {
        let body = to_gateway_request(&request(Mode::Standard), None);
        assert_eq!(body["model"], STANDARD_MODEL);
        assert_eq!(body["stream"], true);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
        assert_eq!(messages[1]["content"], "What is ojas?");
    }

    #[test]
    fn gateway_model_follows_mode_unless_overridden() {
        let deep = to_gateway_request(&request(Mode::DeepWisdom), None);
        assert_eq!(deep["model"], DEEP_WISDOM_MODEL);
        let pinned = to_gateway_request(&request(Mode::DeepWisdom), Some("local/llama"));
        assert_eq!(pinned["model"], "local/llama");
    }
}
