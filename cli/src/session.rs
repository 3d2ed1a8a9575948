use std::io::{BufRead, Write};

use anyhow::Context;
use minesweep_core::{ActionKind, GameError, GameState, GameStatus};

use crate::input::{InputError, Tokens};

const COORDS_PROMPT: &str = "Enter row and column (e.g. 1 2): ";
const ACTION_PROMPT: &str = "Enter action (R - reveal, F - flag, M - mark): ";

/// How a session finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Won,
    Lost,
    /// Input ran out before the game was decided.
    Abandoned,
}

/// Read-print loop driving one game.
pub struct Session<R, W> {
    game: GameState,
    input: Tokens<R>,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: GameState, reader: R, output: W) -> Self {
        Self {
            game,
            input: Tokens::new(reader),
            output,
        }
    }

    pub fn run(mut self) -> anyhow::Result<Ending> {
        loop {
            write!(self.output, "{}", self.game).context("failed to print board")?;

            match self.turn() {
                Ok(GameStatus::InProgress) => {}
                Ok(GameStatus::Won) => {
                    self.finish("Congratulations! You win!")?;
                    return Ok(Ending::Won);
                }
                Ok(GameStatus::Lost) => {
                    self.finish("Game Over!")?;
                    return Ok(Ending::Lost);
                }
                Err(InputError::InvalidNumber(token)) => {
                    log::debug!("Rejected coordinate token {:?}", token);
                    writeln!(self.output, "Invalid input, expected two numbers!")?;
                    self.input.discard_line();
                }
                Err(InputError::Closed) => {
                    log::info!("Input closed before the game ended");
                    writeln!(self.output)?;
                    writeln!(self.output, "Input closed, game abandoned.")?;
                    return Ok(Ending::Abandoned);
                }
                Err(InputError::Io(err)) => {
                    return Err(err).context("failed to read player input");
                }
            }
        }
    }

    /// Reads one action, applies it and runs the win check.
    fn turn(&mut self) -> Result<GameStatus, InputError> {
        self.prompt(COORDS_PROMPT)?;
        let row = self.input.next_coord()?;
        let col = self.input.next_coord()?;

        self.prompt(ACTION_PROMPT)?;
        let symbol = self.input.next_char()?;

        let result = ActionKind::try_from(symbol).and_then(|kind| {
            log::debug!("Applying {:?} at ({}, {})", kind, row, col);
            self.game.apply_at(kind, (row, col))
        });

        Ok(match result {
            Ok(status) => status,
            Err(GameError::InvalidAction(symbol)) => {
                log::debug!("Unknown action {:?}", symbol);
                writeln!(self.output, "Invalid action!")?;
                self.game.evaluate()
            }
            Err(err) => {
                writeln!(self.output, "{}!", err)?;
                self.game.evaluate()
            }
        })
    }

    fn prompt(&mut self, text: &str) -> Result<(), InputError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn finish(&mut self, message: &str) -> anyhow::Result<()> {
        write!(self.output, "{}", self.game)?;
        writeln!(self.output, "{}", message)?;
        self.output.flush().context("failed to flush output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweep_core::{Coord2, MineLayout};

    fn play(mines: &[Coord2], input: &str) -> (Ending, String) {
        let layout = MineLayout::from_mine_coords((3, 3), mines).unwrap();
        let mut output = Vec::new();
        let ending = Session::new(GameState::new(layout), input.as_bytes(), &mut output)
            .run()
            .unwrap();
        (ending, String::from_utf8(output).unwrap())
    }

    #[test]
    fn flagging_the_only_mine_wins() {
        let (ending, output) = play(&[(0, 0)], "0 0 F\n");

        assert_eq!(ending, Ending::Won);
        assert!(output.starts_with("  0 1 2 \n0 - - - \n"));
        assert!(output.contains(COORDS_PROMPT));
        assert!(output.contains(ACTION_PROMPT));
        assert!(output.ends_with("0 F - - \n1 - - - \n2 - - - \nCongratulations! You win!\n"));
    }

    #[test]
    fn revealing_a_mine_loses() {
        let (ending, output) = play(&[(0, 0)], "0 0 R\n2 2 R\n");

        assert_eq!(ending, Ending::Lost);
        assert!(output.ends_with("0 X - - \n1 - - - \n2 - - - \nGame Over!\n"));
    }

    #[test]
    fn flood_reveal_wins() {
        let (ending, output) = play(&[(0, 0)], "2 2 R\n");

        assert_eq!(ending, Ending::Won);
        assert!(output.ends_with("0 - 1   \n1 1 1   \n2       \nCongratulations! You win!\n"));
    }

    #[test]
    fn invalid_action_keeps_playing() {
        let (ending, output) = play(&[(0, 0), (2, 2)], "1 1 Z\n1 1 r\n0 0 F\n2 2 Flag\n");

        assert_eq!(ending, Ending::Won);
        assert_eq!(output.matches("Invalid action!").count(), 2);
    }

    #[test]
    fn malformed_number_reprompts() {
        let (ending, output) = play(&[(0, 0)], "a b c\n1 x R\n0 0 F\n");

        assert_eq!(ending, Ending::Won);
        assert_eq!(
            output
                .matches("Invalid input, expected two numbers!")
                .count(),
            2
        );
    }

    #[test]
    fn off_board_reveal_is_silent() {
        let (ending, output) = play(&[(0, 0)], "-1 0 R\n0 300 R\n1 1 R\n");

        assert_eq!(ending, Ending::Abandoned);
        assert!(!output.contains("Invalid"));
        assert!(output.contains("1 - 1 - \n"));
    }

    #[test]
    fn off_board_toggle_is_reported() {
        let (ending, output) = play(&[(0, 0)], "-1 0 F\n0 300 M\n0 0 F\n");

        assert_eq!(ending, Ending::Won);
        assert_eq!(output.matches("Invalid coordinates!").count(), 2);
        assert!(!output.contains("Invalid input"));
    }

    #[test]
    fn out_of_range_toggle_is_reported() {
        let (ending, output) = play(&[(0, 0)], "5 5 F\n7 1 R\n");

        assert_eq!(ending, Ending::Abandoned);
        assert_eq!(output.matches("Invalid coordinates!").count(), 1);
        assert!(output.ends_with("Input closed, game abandoned.\n"));
    }

    #[test]
    fn tokens_may_span_lines() {
        let (ending, _) = play(&[(1, 1)], "1\n1\nF\n");

        assert_eq!(ending, Ending::Won);
    }

    #[test]
    fn end_of_input_abandons_game() {
        let (ending, output) = play(&[(0, 0)], "1 1 M\n2");

        assert_eq!(ending, Ending::Abandoned);
        assert!(output.contains("1 - ? - \n"));
    }
}
