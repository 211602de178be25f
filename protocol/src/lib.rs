//! Messages peers exchange to play the same game together.
//!
//! Delivery is best effort: messages may arrive late or more than once, and whichever
//! snapshot is applied last wins.

use clearmine_core::{
    ActionOutcome, Board, GameError, GameState, Minesweeper, MouseButton, Position,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncMessage {
    Action {
        button: MouseButton,
        position: Position,
    },
    Reset,
    Snapshot {
        board: Board,
        flags_left: isize,
        state: GameState,
    },
}

impl SyncMessage {
    pub fn snapshot<R: RngCore>(game: &Minesweeper<R>) -> Self {
        let view = game.board();
        Self::Snapshot {
            board: view.board.clone(),
            flags_left: view.flags_left,
            state: game.state(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed sync message: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, ProtocolError>;

pub fn encode(message: &SyncMessage) -> Result<String> {
    Ok(serde_json::to_string(message)?)
}

pub fn decode(text: &str) -> Result<SyncMessage> {
    Ok(serde_json::from_str(text)?)
}

/// Replays a message received from a peer on the local game.
///
/// Snapshots replace the local board and state outright, their `flags_left` is recomputed
/// from the flags on the board. A snapshot whose board does not check out is refused and the
/// local game is left as it was.
pub fn apply<R: RngCore>(
    game: &mut Minesweeper<R>,
    message: &SyncMessage,
) -> Result<ActionOutcome> {
    log::debug!("Applying sync message: {:?}", MessageKind::from(message));

    Ok(match message {
        SyncMessage::Action { button, position } => game.handle_action(*button, *position)?,
        SyncMessage::Reset => {
            game.reset();
            ActionOutcome::Applied
        }
        SyncMessage::Snapshot { board, state, .. } => {
            game.restore(board.clone(), *state)?;
            ActionOutcome::Applied
        }
    })
}

/// Message type without its payload, for logging.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MessageKind {
    Action,
    Reset,
    Snapshot,
}

impl From<&SyncMessage> for MessageKind {
    fn from(message: &SyncMessage) -> Self {
        match message {
            SyncMessage::Action { .. } => Self::Action,
            SyncMessage::Reset => Self::Reset,
            SyncMessage::Snapshot { .. } => Self::Snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearmine_core::BoardConfig;

    fn game(seed: u64) -> Minesweeper {
        Minesweeper::new(BoardConfig::beginner(), seed).unwrap()
    }

    #[test]
    fn action_wire_format() {
        let message = SyncMessage::Action {
            button: MouseButton::Secondary,
            position: Position::new(1, 2),
        };

        let text = encode(&message).unwrap();

        assert_eq!(
            text,
            r#"{"type":"action","button":"Secondary","position":{"row":1,"col":2}}"#
        );
        assert_eq!(decode(&text).unwrap(), message);
    }

    #[test]
    fn peers_with_same_seed_stay_in_sync() {
        let mut local = game(8);
        let mut remote = game(8);
        let clicks = [
            (MouseButton::Primary, Position::new(4, 4)),
            (MouseButton::Secondary, Position::new(0, 0)),
            (MouseButton::Primary, Position::new(8, 8)),
        ];

        for (button, position) in clicks {
            local.handle_action(button, position).unwrap();
            let wire = encode(&SyncMessage::Action { button, position }).unwrap();
            apply(&mut remote, &decode(&wire).unwrap()).unwrap();
        }

        assert_eq!(remote.board().board, local.board().board);
        assert_eq!(remote.state(), local.state());
        assert_eq!(remote.flags_left(), local.flags_left());
    }

    #[test]
    fn snapshot_overrides_diverged_board() {
        let mut local = game(1);
        let mut remote = game(2);
        local
            .handle_action(MouseButton::Primary, Position::new(4, 4))
            .unwrap();
        remote
            .handle_action(MouseButton::Primary, Position::new(4, 4))
            .unwrap();

        let wire = encode(&SyncMessage::snapshot(&local)).unwrap();
        let outcome = apply(&mut remote, &decode(&wire).unwrap()).unwrap();

        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(remote.board().board, local.board().board);
        assert_eq!(remote.state(), local.state());
    }

    #[test]
    fn reset_message_restarts_game() {
        let mut game = game(3);
        game.handle_action(MouseButton::Primary, Position::new(4, 4))
            .unwrap();

        apply(&mut game, &SyncMessage::Reset).unwrap();

        assert!(game.state().is_first_move);
        assert_eq!(game.board().board.revealed_count(), 0);
    }

    #[test]
    fn garbage_is_reported() {
        assert!(matches!(
            decode(r#"{"type":"teleport"}"#),
            Err(ProtocolError::Json(_))
        ));
    }

    #[test]
    fn snapshot_of_other_size_is_refused() {
        let small = Minesweeper::new(BoardConfig::new(4, 4, 3), 0).unwrap();
        let mut game = game(0);

        let result = apply(&mut game, &SyncMessage::snapshot(&small));

        assert!(matches!(
            result,
            Err(ProtocolError::Game(GameError::InvalidBoardShape))
        ));
    }

    #[test]
    fn tampered_snapshot_is_refused() {
        let mut local = game(6);
        let mut remote = game(6);
        for game in [&mut local, &mut remote] {
            game.handle_action(MouseButton::Primary, Position::new(4, 4))
                .unwrap();
        }

        let mut value = serde_json::to_value(SyncMessage::snapshot(&local)).unwrap();
        *value
            .pointer_mut("/board/cells/data/40/surroundings/0")
            .unwrap() = serde_json::json!({ "row": 200, "col": 3 });
        let message: SyncMessage = serde_json::from_value(value).unwrap();

        assert!(matches!(
            apply(&mut remote, &message),
            Err(ProtocolError::Game(GameError::InvalidBoardShape))
        ));
        assert_eq!(remote.board().board, local.board().board);
        let chord = remote.handle_action(MouseButton::Tertiary, Position::new(4, 4));
        assert!(chord.is_ok());
    }
}
