#![cfg(feature = "remote")]

use std::{collections::HashMap, time::Instant};

use async_trait::async_trait;
use parallel_highlight::{
    CollaboratorError, MatchCandidate, MatchOutcome, MatchRequest, SemanticMatcher, Selection,
    Session, Side, Span, Stage, Workbench, parse_match_response,
};
use pretty_assertions::assert_eq;

/// Replies with canned JSON keyed by the selected text, the way a chat model
/// would answer.
#[derive(Debug)]
struct CannedMatcher {
    replies: HashMap<&'static str, &'static str>,
}

#[async_trait]
impl SemanticMatcher for CannedMatcher {
    async fn find_similar(&self, request: &MatchRequest) -> Result<MatchCandidate, CollaboratorError> {
        let reply = self
            .replies
            .get(request.selected_text.as_str())
            .ok_or(CollaboratorError::EmptyResponse)?;

        parse_match_response(reply)
    }
}

async fn workbench() -> Workbench<CannedMatcher> {
    let matcher = CannedMatcher {
        replies: HashMap::from([
            (
                "old carpenter",
                "```json\n{\"similar_text\": \"老木匠\", \"start\": 0, \"end\": 3, \"explanation\": \"subject\"}\n```",
            ),
            (
                "sat down",
                "{\"similar_text\": \"坐下了 然后 他 睡着了 很久\", \"explanation\": \"too long\"}",
            ),
            ("tired", "not json at all"),
        ]),
    };

    let workbench = Workbench::new(Session::default(), matcher);
    workbench
        .with_session(|session| {
            session.set_text(Side::Left, "The old carpenter sat down. He was tired.");
            session.set_text(Side::Right, "老木匠 坐下了 然后 他 睡着了");
        })
        .await;

    workbench
}

async fn resolve(workbench: &Workbench<CannedMatcher>, start: usize, end: usize) -> MatchOutcome {
    match workbench.select_range(Side::Left, start, end).await {
        Ok(Selection::Pending(task)) => task.await.unwrap(),
        other => panic!("Expected a pending request, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fenced_reply_is_highlighted() {
    let workbench = workbench().await;

    let outcome = resolve(&workbench, 4, 17).await;

    let MatchOutcome::Highlighted {
        side,
        highlight,
        stage,
    } = outcome
    else {
        panic!("Expected a highlight, got {outcome:?}");
    };
    assert_eq!(side, Side::Right);
    assert_eq!(highlight.span(), Span::new(0, 3));
    assert_eq!(stage, Stage::Exact);
}

#[tokio::test]
async fn test_long_reply_is_refined_before_locating() {
    let workbench = workbench().await;

    let outcome = resolve(&workbench, 18, 26).await;

    assert!(matches!(
        outcome,
        MatchOutcome::Highlighted { highlight, .. } if highlight.span() == Span::new(4, 10)
    ));
}

#[tokio::test]
async fn test_unparseable_reply_shows_notification() {
    let workbench = workbench().await;

    let outcome = resolve(&workbench, 35, 40).await;

    assert!(matches!(outcome, MatchOutcome::NotFound(_)));
    workbench
        .with_session(|session| {
            assert!(session.notification(Instant::now()).is_some());
            assert_eq!(session.highlights(Side::Left).len(), 1);
            assert!(session.highlights(Side::Right).is_empty());
        })
        .await;
}

#[test]
fn test_workbench_debug_hides_api_key() {
    let matcher = parallel_highlight::ChatCompletionMatcher::with_api_key(
        parallel_highlight::MatcherConfig::default(),
        "sk-very-secret",
    )
    .unwrap();
    let workbench = Workbench::new(Session::default(), matcher);

    assert!(!format!("{workbench:?}").contains("sk-very-secret"));
}
