//! Agent memory and input-construction tests.

use duet_dialogue::{Agent, Convention, MEMORY_LIMIT};
use llm::{Input, Message, Mock};
use futures_util::StreamExt;

fn chat_agent(mock: &Mock) -> Agent<Mock> {
    Agent::new("Agent1", "llama3", mock.clone()).system_prompt("Be brief.")
}

fn completion_agent(mock: &Mock) -> Agent<Mock> {
    chat_agent(mock).convention(Convention::Completion)
}

/// Drain a respond stream, returning the fragments and the final error
/// if any.
async fn drain(agent: &mut Agent<Mock>, incoming: &str) -> (Vec<String>, Option<anyhow::Error>) {
    let mut fragments = Vec::new();
    let mut error = None;
    let mut stream = std::pin::pin!(agent.respond(incoming.to_owned(), true));
    while let Some(result) = stream.next().await {
        match result {
            Ok(fragment) => fragments.push(fragment),
            Err(e) => {
                error = Some(e);
                break;
            }
        }
    }
    (fragments, error)
}

#[tokio::test]
async fn respond_streams_fragments_and_records_turn() {
    let mock = Mock::new().turn(["Hel", "lo"]);
    let mut agent = chat_agent(&mock);

    let (fragments, error) = drain(&mut agent, "hi").await;
    assert!(error.is_none());
    assert_eq!(fragments, ["Hel", "lo"]);

    // One user message and the concatenated assistant response.
    assert_eq!(
        agent.memory().messages(),
        [Message::user("hi"), Message::assistant("Hello")]
    );
}

#[tokio::test]
async fn memory_grows_by_two_and_caps_at_limit() {
    let mut mock = Mock::new();
    for i in 0..8 {
        mock = mock.turn([format!("reply {i}")]);
    }
    let mut agent = chat_agent(&mock);

    for i in 0..8 {
        let (_, error) = drain(&mut agent, &format!("msg {i}")).await;
        assert!(error.is_none());
        assert_eq!(agent.memory().len(), MEMORY_LIMIT.min(2 * (i + 1)));
    }
}

#[tokio::test]
async fn failed_respond_leaves_memory_unchanged() {
    let mock = Mock::new()
        .turn(["ok"])
        .failing_turn(["partial"], "upstream gone");
    let mut agent = chat_agent(&mock);

    let (_, error) = drain(&mut agent, "first").await;
    assert!(error.is_none());
    let before = agent.memory().clone();

    let (fragments, error) = drain(&mut agent, "second").await;
    assert_eq!(fragments, ["partial"]);
    assert!(error.is_some());
    assert_eq!(agent.memory(), &before);
}

#[tokio::test]
async fn chat_input_is_system_then_memory_then_user() {
    let mock = Mock::new().turn(["one"]).turn(["two"]);
    let mut agent = chat_agent(&mock);

    let _ = drain(&mut agent, "first").await;
    let _ = drain(&mut agent, "second").await;

    let calls = mock.calls();
    assert_eq!(
        calls[1],
        Input::Chat(vec![
            Message::system("Be brief."),
            Message::user("first"),
            Message::assistant("one"),
            Message::user("second"),
        ])
    );
}

#[tokio::test]
async fn completion_input_renders_flat_prompt() {
    let mock = Mock::new().turn(["one"]).turn(["two"]);
    let mut agent = completion_agent(&mock);

    let _ = drain(&mut agent, "first").await;
    let _ = drain(&mut agent, "second").await;

    let calls = mock.calls();
    assert_eq!(calls[0], Input::Completion("Be brief.\nHuman: first\nAI:".into()));
    assert_eq!(
        calls[1],
        Input::Completion(
            "Be brief.\nuser: first\nassistant: one\nHuman: second\nAI:".into()
        )
    );
}

#[tokio::test]
async fn completion_input_can_omit_system_prompt() {
    let mock = Mock::new().turn(["one"]);
    let mut agent = completion_agent(&mock);

    let mut stream = std::pin::pin!(agent.respond("first".to_owned(), false));
    while stream.next().await.is_some() {}

    assert_eq!(
        mock.calls()[0],
        Input::Completion("Human: first\nAI:".into())
    );
}
