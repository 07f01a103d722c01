use std::time::Instant;

use parallel_highlight::{
    Brush, CollaboratorError, MatchCandidate, SelectionOutcome, Session, Side, render, runs,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;

/// A pair of parallel texts, a series of selections with canned semantic
/// matcher replies, and the colored runs expected afterwards.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    name: String,
    left: String,
    right: String,
    steps: Vec<Step>,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    side: String,
    /// UTF-16 code units
    start: usize,
    end: usize,
    #[serde(default)]
    brush: Option<String>,
    /// The snippet the matcher suggests, a failed request if missing
    #[serde(default)]
    reply: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Expected {
    #[serde(default)]
    left: Vec<ColoredRun>,
    #[serde(default)]
    right: Vec<ColoredRun>,
    #[serde(default)]
    notification: bool,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ColoredRun {
    text: String,
    color: String,
}

impl Scenario {
    pub fn name(&self) -> &str { &self.name }

    pub fn run(&self) -> Session {
        let mut session = Session::default();
        session.set_text(Side::Left, self.left.as_str());
        session.set_text(Side::Right, self.right.as_str());
        let now = Instant::now();

        for step in &self.steps {
            if let Some(brush) = &step.brush {
                session.set_brush(
                    brush
                        .parse::<Brush>()
                        .unwrap_or_else(|error| panic!("{}: {error}", self.name)),
                );
            }

            let side = step
                .side
                .parse::<Side>()
                .unwrap_or_else(|error| panic!("{}: {error}", self.name));
            let outcome = session
                .select_range(side, step.start, step.end)
                .unwrap_or_else(|error| panic!("{}: {error}", self.name));

            if let SelectionOutcome::Highlighted(request) = outcome {
                let reply = step
                    .reply
                    .as_ref()
                    .map(|snippet| MatchCandidate::new(snippet.as_str(), ""))
                    .ok_or(CollaboratorError::EmptyResponse);
                session.resolve(&request, reply, now);
            }
        }

        session
    }

    pub fn assert_eq(&self, session: &Session) {
        assert_eq!(
            colored_runs(session, Side::Left),
            self.expected.left,
            "{}: left document",
            self.name
        );
        assert_eq!(
            colored_runs(session, Side::Right),
            self.expected.right,
            "{}: right document",
            self.name
        );
        assert_eq!(
            session.notification(Instant::now()).is_some(),
            self.expected.notification,
            "{}: notification",
            self.name
        );
    }
}

fn colored_runs(session: &Session, side: Side) -> Vec<ColoredRun> {
    let text = session.text(side);

    runs(text, &render(text, session.highlights(side).highlights()))
        .into_iter()
        .filter_map(|run| {
            run.color.map(|color| ColoredRun {
                text: run.text.to_owned(),
                color: color.name().to_owned(),
            })
        })
        .collect()
}
