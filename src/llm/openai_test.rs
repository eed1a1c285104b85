use super::*;

#[test]
fn parse_assistant_content() {
    let json = serde_json::json!({
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "{\"items\":[]}" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let content = parse_chat_completions_content(&json).unwrap();
    assert_eq!(content, "{\"items\":[]}");
}

#[test]
fn parse_missing_choices() {
    let json = serde_json::json!({ "model": "llama-3.3-70b-versatile", "choices": [] }).to_string();
    assert!(matches!(parse_chat_completions_content(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_empty_content() {
    let json = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": null } }]
    })
    .to_string();
    assert!(matches!(parse_chat_completions_content(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_non_json_body() {
    assert!(matches!(parse_chat_completions_content("<html>"), Err(LlmError::ApiParse(_))));
}

#[test]
fn default_model_and_base_url() {
    let client = OpenAiClient::new("key".into(), None, None).unwrap();
    assert_eq!(client.model(), DEFAULT_MODEL);
    assert_eq!(client.base_url, DEFAULT_BASE_URL);
}

#[test]
fn base_url_trailing_slash_trimmed() {
    let client = OpenAiClient::new("key".into(), Some("mixtral"), Some("http://localhost:8080/v1/")).unwrap();
    assert_eq!(client.model(), "mixtral");
    assert_eq!(client.base_url, "http://localhost:8080/v1");
}
