//! Tests for the scripted Mock provider.

use duet_llm::{Generate, Input, Message, Mock};
use futures_util::StreamExt;

async fn drain(mock: &Mock, input: Input) -> Vec<Result<String, anyhow::Error>> {
    mock.generate("any", input).collect().await
}

#[tokio::test]
async fn replays_fragments_in_order() {
    let mock = Mock::new().turn(["Hi", " there"]);
    let results = drain(&mock, Input::Completion("hello".into())).await;

    let fragments: Vec<_> = results.into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(fragments, ["Hi", " there"]);
}

#[tokio::test]
async fn failing_turn_yields_fragments_then_error() {
    let mock = Mock::new().failing_turn(["partial"], "boom");
    let mut results = drain(&mock, Input::Completion("hello".into())).await;

    assert_eq!(results.len(), 2);
    let err = results.pop().unwrap().unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert_eq!(results.pop().unwrap().unwrap(), "partial");
}

#[tokio::test]
async fn exhausted_script_fails() {
    let mock = Mock::new();
    let results = drain(&mock, Input::Completion("hello".into())).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
}

#[tokio::test]
async fn records_inputs_across_clones() {
    let mock = Mock::new().turn(["a"]).turn(["b"]);
    let clone = mock.clone();

    let _ = drain(&mock, Input::Chat(vec![Message::user("first")])).await;
    let _ = drain(&clone, Input::Completion("second".into())).await;

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], Input::Chat(vec![Message::user("first")]));
    assert_eq!(calls[1], Input::Completion("second".into()));
}
