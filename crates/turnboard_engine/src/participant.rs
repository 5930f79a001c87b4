//! Players seated at a game.

use crate::rules::Rules;
use crate::seat::PlayerKind;
use crate::strategy::Strategy;

/// How a seat produces its moves.
#[derive(Debug)]
pub enum Controller<R: Rules> {
    /// Moves are read from the console.
    Human,
    /// Moves are chosen by a strategy.
    Computer(Box<dyn Strategy<R>>),
}

/// A named player and its controller.
#[derive(Debug)]
pub struct Participant<R: Rules> {
    name: String,
    controller: Controller<R>,
}

impl<R: Rules> Participant<R> {
    /// A console-driven player.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
        }
    }

    /// A strategy-driven player.
    pub fn computer(name: impl Into<String>, strategy: Box<dyn Strategy<R>>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Computer(strategy),
        }
    }

    /// Player name; also the identity stored in move history.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human or computer.
    pub fn kind(&self) -> PlayerKind {
        match self.controller {
            Controller::Human => PlayerKind::Human,
            Controller::Computer(_) => PlayerKind::Computer,
        }
    }

    /// Returns true for computer players.
    pub fn is_computer(&self) -> bool {
        self.kind() == PlayerKind::Computer
    }

    pub(crate) fn controller_mut(&mut self) -> &mut Controller<R> {
        &mut self.controller
    }
}
