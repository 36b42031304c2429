use thiserror::Error;

use crate::{
    dao::models::GameEntity,
    state::board::{Board, BoardDecodeError, CELL_COUNT, Mark, Outcome},
};

/// Reasons a move is refused by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// `0` tried to open an empty board.
    #[error("0 can't start the game")]
    ZeroCannotStart,
    /// The same side tried to play twice in a row.
    #[error("last move was yours, you can't make the move again")]
    NotYourTurn,
    /// The target cell already holds a mark.
    #[error("position {0} is already taken")]
    Occupied(usize),
    /// The target cell is off the board.
    #[error("position {0} is outside the board")]
    OutOfBounds(usize),
}

/// In-memory view of one match, decoded from its persisted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Identifier assigned by the store.
    pub id: i32,
    /// True when `x` made the latest move.
    pub last_move_was_x: bool,
    /// Current cells.
    pub board: Board,
}

impl Game {
    /// Validate and record a move of `mark` on `position`.
    ///
    /// Checks run in a fixed order: the opening move, turn order, then the cell itself.
    pub fn apply_move(&mut self, mark: Mark, position: usize) -> Result<(), MoveError> {
        if self.board.is_empty() && mark == Mark::Zero {
            return Err(MoveError::ZeroCannotStart);
        }

        let repeated = match mark {
            Mark::X => self.last_move_was_x,
            Mark::Zero => !self.last_move_was_x,
        };
        if repeated {
            return Err(MoveError::NotYourTurn);
        }

        if position >= CELL_COUNT {
            return Err(MoveError::OutOfBounds(position));
        }
        if self.board.is_occupied(position) {
            return Err(MoveError::Occupied(position));
        }

        self.board.place(position, mark);
        self.last_move_was_x = mark == Mark::X;
        Ok(())
    }

    /// Evaluate the current board.
    pub fn outcome(&self) -> Outcome {
        self.board.evaluate()
    }
}

impl TryFrom<GameEntity> for Game {
    type Error = BoardDecodeError;

    fn try_from(entity: GameEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            last_move_was_x: entity.last_move_was_x,
            board: Board::from_info(&entity.info)?,
        })
    }
}

impl From<Game> for GameEntity {
    fn from(game: Game) -> Self {
        Self {
            id: game.id,
            last_move_was_x: game.last_move_was_x,
            info: game.board.to_info(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game() -> Game {
        Game {
            id: 1,
            last_move_was_x: false,
            board: Board::empty(),
        }
    }

    #[test]
    fn zero_cannot_open_the_game() {
        let mut game = new_game();
        assert_eq!(
            game.apply_move(Mark::Zero, 4),
            Err(MoveError::ZeroCannotStart)
        );
        assert!(game.board.is_empty());
    }

    #[test]
    fn sides_alternate() {
        let mut game = new_game();
        game.apply_move(Mark::X, 0).unwrap();
        assert!(game.last_move_was_x);
        assert_eq!(game.apply_move(Mark::X, 1), Err(MoveError::NotYourTurn));

        game.apply_move(Mark::Zero, 1).unwrap();
        assert!(!game.last_move_was_x);
        assert_eq!(game.apply_move(Mark::Zero, 2), Err(MoveError::NotYourTurn));
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let mut game = new_game();
        game.apply_move(Mark::X, 4).unwrap();
        assert_eq!(game.apply_move(Mark::Zero, 4), Err(MoveError::Occupied(4)));
        assert_eq!(game.board.get(4), Some(Mark::X));
    }

    #[test]
    fn position_off_the_board_is_rejected() {
        let mut game = new_game();
        assert_eq!(game.apply_move(Mark::X, 9), Err(MoveError::OutOfBounds(9)));
    }

    #[test]
    fn winning_sequence_finishes_the_game() {
        let mut game = new_game();
        for (mark, position) in [
            (Mark::X, 0),
            (Mark::Zero, 3),
            (Mark::X, 1),
            (Mark::Zero, 4),
            (Mark::X, 2),
        ] {
            game.apply_move(mark, position).unwrap();
        }
        assert_eq!(
            game.outcome(),
            Outcome::Finished {
                winner: Some(Mark::X)
            }
        );
    }

    #[test]
    fn entity_conversion_keeps_turn_and_cells() {
        let mut game = new_game();
        game.apply_move(Mark::X, 6).unwrap();

        let entity: GameEntity = game.clone().into();
        assert_eq!(entity.info["6"], "x");
        assert!(entity.last_move_was_x);
        assert_eq!(Game::try_from(entity), Ok(game));
    }
}
