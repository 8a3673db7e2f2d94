use std::{
    panic,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, info, info_span};

use crate::{Evaluator, GameState, Instruments, SearchError};

use super::{AdversaryPolicy, SearchAgent, SearchReturn};

type Completed<A> = Result<(usize, SearchReturn<A>), SearchError>;

impl<E, P> SearchAgent<E, P>
where
    E: Clone + Send + 'static,
    P: AdversaryPolicy + Clone + Send + 'static,
{
    /// This will do an iterative deepening search until we reach the time limit [with some
    /// padding, see [super::SearchOptions::time_padding]]. Iterative deepening means it will first
    /// search one round deep, then two rounds, and so on up to the configured depth, keeping the
    /// deepest search that finished.
    ///
    /// The search runs in a separate thread so that we can return in time even if a long search
    /// is in progress. When we return from the calling thread we also send a signal to the
    /// worker thread telling it to stop, so as not to waste CPU cycles. A search that gets
    /// stopped part way through is thrown away, only complete searches are ever returned.
    ///
    /// Once a completed search never hit the depth horizon, every path ended the game, so
    /// searching deeper can't change the answer and we stop early.
    ///
    /// Returns the depth that was reached along with the search result. A panic on the worker
    /// thread, like a game rejecting an agent index, is resumed on the calling thread.
    pub fn deepened_until_timelimit<S>(
        &self,
        state: &S,
        budget: Duration,
    ) -> Result<(usize, SearchReturn<S::Action>), SearchError>
    where
        S: GameState + Clone + Send + 'static,
        S::Action: Send + 'static,
        E: Evaluator<S>,
    {
        let span = info_span!(
            "deepened_search",
            strategy = P::NAME,
            max_depth = self.depth,
            depth = tracing::field::Empty,
            chosen_value = tracing::field::Empty,
        );
        let _guard = span.enter();

        if self.depth == 0 {
            return Ok((0, self.search(state)?));
        }

        let started_at = Instant::now();
        let max_duration = budget.saturating_sub(self.options.time_padding);

        let (to_main_thread, from_worker_thread) = mpsc::channel::<Completed<S::Action>>();
        let (suspend_worker, worker_halt_reciever) = mpsc::channel::<()>();

        let worker = self.clone();
        let root = state.clone();
        let worker_thread = thread::spawn(move || {
            for depth in 1..=worker.depth {
                let result = worker.search_to_depth(
                    &root,
                    depth,
                    &Instruments {},
                    Some(&worker_halt_reciever),
                );

                let result = match result {
                    Ok(result) => result,
                    Err(SearchError::Aborted) => return,
                    Err(e) => {
                        let _ = to_main_thread.send(Err(e));
                        return;
                    }
                };

                let finished = !result.reached_horizon();
                if to_main_thread.send(Ok((depth, result))).is_err() || finished {
                    return;
                }
            }
        });

        let mut current = None;

        let worker_hung_up = loop {
            let remaining = max_duration.saturating_sub(started_at.elapsed());
            if remaining.is_zero() {
                break false;
            }

            match from_worker_thread.recv_timeout(remaining) {
                Ok(Ok((depth, result))) => {
                    debug!(depth, value = result.value(), "completed search depth");

                    let finished = !result.reached_horizon() || depth >= self.depth;
                    current = Some((depth, result));

                    if finished {
                        break false;
                    }
                }
                Ok(Err(e)) => return Err(e),
                Err(RecvTimeoutError::Timeout) => break false,
                Err(RecvTimeoutError::Disconnected) => break true,
            }
        };

        // The worker only hangs up without sending a final result when it panicked
        if worker_hung_up {
            if let Err(payload) = worker_thread.join() {
                panic::resume_unwind(payload);
            }
        }

        // We can't kill the thread so we use this to help the worker know when to stop
        let _ = suspend_worker.send(());

        match current {
            Some((depth, result)) => {
                info!(depth, "finished deepened search");
                span.record("depth", depth);
                span.record("chosen_value", result.value());

                Ok((depth, result))
            }
            None => Err(SearchError::NoCompletedSearch),
        }
    }
}
