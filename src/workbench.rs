use std::{sync::Arc, time::Instant};

use log::debug;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    addressing::AddressingError,
    matcher::SemanticMatcher,
    session::{MatchOutcome, SelectionOutcome, Session},
    types::highlight::Highlight,
    utils::side::Side,
};

/// What became of a selection made through the [`Workbench`].
#[derive(Debug)]
pub enum Selection {
    Ignored,
    Cleared(Vec<Highlight>),
    /// The selection is highlighted and the semantic matcher has been asked
    /// about it. Await the handle for the result or abort it to drop the
    /// request.
    Pending(JoinHandle<MatchOutcome>),
}

/// Drives a [`Session`] against a [`SemanticMatcher`]: every selection gets
/// its own task, so several requests can be in flight at once and their
/// answers are applied in the order they complete.
#[derive(Debug)]
pub struct Workbench<M> {
    session: Arc<Mutex<Session>>,
    matcher: Arc<M>,
}

impl<M> Clone for Workbench<M> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            matcher: Arc::clone(&self.matcher),
        }
    }
}

impl<M: SemanticMatcher + 'static> Workbench<M> {
    #[must_use]
    pub fn new(session: Session, matcher: M) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            matcher: Arc::new(matcher),
        }
    }

    /// Run `f` with exclusive access to the session.
    pub async fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.session.lock().await;
        f(&mut session)
    }

    /// Select a range given in UTF-16 code units. Must be called from within
    /// a tokio runtime.
    ///
    /// # Errors
    ///
    /// If either end of the selection isn't a code-unit boundary of the text.
    pub async fn select_range(
        &self,
        side: Side,
        code_unit_start: usize,
        code_unit_end: usize,
    ) -> Result<Selection, AddressingError> {
        let outcome = self
            .with_session(|session| session.select_range(side, code_unit_start, code_unit_end))
            .await?;

        let request = match outcome {
            SelectionOutcome::Ignored => return Ok(Selection::Ignored),
            SelectionOutcome::Cleared(removed) => return Ok(Selection::Cleared(removed)),
            SelectionOutcome::Highlighted(request) => request,
        };

        let session = Arc::clone(&self.session);
        let matcher = Arc::clone(&self.matcher);

        let task = tokio::spawn(async move {
            debug!("Requesting a match for highlight {}", request.highlight_id);
            let response = matcher.find_similar(&request).await;

            session
                .lock()
                .await
                .resolve(&request, response, Instant::now())
        });

        Ok(Selection::Pending(task))
    }
}
