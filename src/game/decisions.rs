//! Questions waiting for a player.
//!
//! Anything that needs a choice posts a decision with a resume
//! continuation and returns. The decision-maker (a human front end, an AI,
//! a test) reads [`Game::pending_decision`] and answers with
//! [`Game::decide`], which runs the continuation. Decisions are answered in
//! the order they were posted.

use std::fmt;

use tracing::{debug, warn};

use crate::core::{EngineError, PlayerId, Result};

use super::Game;

type Resume = Box<dyn FnOnce(&mut Game, usize)>;

/// A question posted to one player.
pub struct PendingDecision {
    player: PlayerId,
    prompt: String,
    options: Vec<String>,
    resume: Resume,
}

impl PendingDecision {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

impl fmt::Debug for PendingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDecision")
            .field("player", &self.player)
            .field("prompt", &self.prompt)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Ask `player` to pick one of `options`; `resume` gets the index.
    ///
    /// With fewer than two options there is nothing to ask and `resume`
    /// runs immediately with index 0.
    pub fn request_decision(
        &mut self,
        player: PlayerId,
        prompt: impl Into<String>,
        options: Vec<String>,
        resume: impl FnOnce(&mut Game, usize) + 'static,
    ) {
        let prompt = prompt.into();
        if options.len() < 2 {
            debug!(%player, %prompt, "decision has a single option, answered");
            resume(self, 0);
            return;
        }
        debug!(%player, %prompt, options = options.len(), "decision posted");
        self.decisions.push_back(PendingDecision {
            player,
            prompt,
            options,
            resume: Box::new(resume),
        });
    }

    /// The oldest unanswered decision.
    #[must_use]
    pub fn pending_decision(&self) -> Option<&PendingDecision> {
        self.decisions.front()
    }

    /// Number of unanswered decisions.
    #[must_use]
    pub fn pending_decision_count(&self) -> usize {
        self.decisions.len()
    }

    /// Answer the oldest decision.
    ///
    /// A wrong player or out-of-range choice leaves the decision pending.
    pub fn decide(&mut self, player: PlayerId, choice: usize) -> Result<()> {
        let Some(decision) = self.decisions.front() else {
            return Err(EngineError::NoPendingDecision);
        };
        if decision.player != player {
            warn!(expected = %decision.player, actual = %player, "decision answered by wrong player");
            return Err(EngineError::WrongPlayer {
                expected: decision.player,
                actual: player,
            });
        }
        if choice >= decision.options.len() {
            return Err(EngineError::InvalidChoice {
                choice,
                options: decision.options.len(),
            });
        }

        let Some(decision) = self.decisions.pop_front() else {
            return Err(EngineError::NoPendingDecision);
        };
        debug!(%player, prompt = %decision.prompt, choice = %decision.options[choice], "decision answered");
        (decision.resume)(self, choice);
        Ok(())
    }
}
