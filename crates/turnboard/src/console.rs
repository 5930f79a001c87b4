//! Line-based terminal console.

use crate::variant::help_text;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, warn};
use turnboard_engine::{Console, GameEvent, Placement, TurnAction, TurnView};

/// Console reading answers line by line from `input` and printing to
/// `output`. End of input quits the game.
#[derive(Debug)]
pub struct TerminalConsole<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> TerminalConsole<I, O> {
    /// Creates a console over the given streams.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Gives back the streams.
    pub fn into_inner(self) -> (I, O) {
        (self.input, self.output)
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = self.output.write_fmt(args).and_then(|()| self.output.flush()) {
            warn!(error = %err, "Console write failed");
        }
    }

    /// Prints `prompt` and reads one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.say(format_args!("{}", prompt));
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                debug!("End of input");
                None
            }
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                warn!(error = %err, "Console read failed");
                None
            }
        }
    }

    fn menu<T>(&mut self, title: &str, options: &[(char, String)]) -> Option<T>
    where
        T: FromStr,
    {
        loop {
            self.say(format_args!("{}\n", title));
            for (key, label) in options {
                self.say(format_args!("  [{}] {}\n", key, label));
            }
            let answer = self.ask("> ")?.to_lowercase();
            match T::from_str(&answer) {
                Ok(choice) => return Some(choice),
                Err(_) => self.say(format_args!("Please choose one of the listed keys.\n")),
            }
        }
    }
}

impl<I: BufRead, O: Write> Console for TerminalConsole<I, O> {
    fn render(&mut self, view: &TurnView) {
        self.say(format_args!("\n{}\n", view.board));
        self.say(format_args!("{} ({}) to move", view.player, view.seat));
        match &view.hint {
            Some(hint) => self.say(format_args!(" | {}\n", hint)),
            None => self.say(format_args!("\n")),
        }
    }

    fn choose_action(&mut self, view: &TurnView) -> TurnAction {
        let options: Vec<(char, String)> = TurnAction::iter()
            .map(|action| (action.key(), action.to_string()))
            .collect();
        let title = format!("{}, choose an action:", view.player);
        self.menu(&title, &options).unwrap_or(TurnAction::Quit)
    }

    fn read_move(&mut self, view: &TurnView) -> Option<String> {
        let prompt = format!("Move {} (empty line to go back): ", view.syntax);
        self.ask(&prompt).filter(|line| !line.is_empty())
    }

    fn confirm_placement(&mut self, view: &TurnView) -> Placement {
        self.say(format_args!("\n{}\n", view.board));
        let options: Vec<(char, String)> = Placement::iter()
            .map(|placement| (placement.key(), placement.to_string()))
            .collect();
        self.menu("Keep this move?", &options).unwrap_or(Placement::Redo)
    }

    fn read_count(&mut self, prompt: &str, max: usize) -> Option<usize> {
        if max == 0 {
            return None;
        }
        loop {
            let answer = self.ask(&format!("{} (0-{}): ", prompt, max))?;
            if answer.is_empty() {
                return None;
            }
            match answer.parse::<usize>() {
                Ok(count) if count <= max => return Some(count),
                _ => self.say(format_args!("Enter a number from 0 to {}.\n", max)),
            }
        }
    }

    fn event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::InvalidMove { reason } => {
                self.say(format_args!("Invalid move: {}\n", reason))
            }
            GameEvent::MoveMade {
                player,
                mv,
                computer: true,
            } => self.say(format_args!("{} plays {}\n", player, mv)),
            GameEvent::MoveMade { .. } => {}
            GameEvent::Undone { player, count } => {
                self.say(format_args!("Undid {} move(s) for {}\n", count, player))
            }
            GameEvent::Redone { player, count } => {
                self.say(format_args!("Redid {} move(s) for {}\n", count, player))
            }
            GameEvent::NothingToUndo => self.say(format_args!("You have no moves to undo.\n")),
            GameEvent::Saved { location } => self.say(format_args!("Game saved to {}\n", location)),
            GameEvent::SaveFailed { reason } => {
                self.say(format_args!("Save failed: {}\n", reason))
            }
            GameEvent::Help { mode } => self.say(format_args!("\n{}\n", help_text(*mode))),
            GameEvent::GameOver {
                winner: Some(winner),
            } => self.say(format_args!("Game over: {} wins!\n", winner)),
            GameEvent::GameOver { winner: None } => {
                self.say(format_args!("Game over: it's a draw.\n"))
            }
        }
    }
}
