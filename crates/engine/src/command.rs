use blockfit_core::{DailySeed, EngineError, RandomSource, Round, RoundEvents, ShapeId};
use blockfit_types::RoundCommand;
use tracing::debug;

/// Result of a command the round accepted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    pub events: RoundEvents,
    /// The command was valid but had nothing to do (undo or revive unavailable).
    pub ignored: bool,
}

impl CommandOutcome {
    fn applied(events: RoundEvents) -> Self {
        Self {
            events,
            ignored: false,
        }
    }

    fn ignored() -> Self {
        Self {
            events: Vec::new(),
            ignored: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    InvalidPlacement,
    UnknownShape,
    RoundOver,
    OutOfBounds,
    InvalidDailySeed,
}

impl CommandError {
    pub fn code(self) -> &'static str {
        match self {
            CommandError::InvalidPlacement => "invalid_place",
            CommandError::UnknownShape => "unknown_shape",
            CommandError::RoundOver => "round_over",
            CommandError::OutOfBounds => "out_of_bounds",
            CommandError::InvalidDailySeed => "invalid_daily_seed",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CommandError::InvalidPlacement => "shape does not fit at the requested position",
            CommandError::UnknownShape => "no shape with that id in the current batch",
            CommandError::RoundOver => "round is not accepting moves",
            CommandError::OutOfBounds => "position is outside the grid",
            CommandError::InvalidDailySeed => "day of year must be between 1 and 366",
        }
    }
}

impl From<EngineError> for CommandError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::OutOfBounds { .. } => CommandError::OutOfBounds,
            EngineError::InvalidPlacement { .. } => CommandError::InvalidPlacement,
            EngineError::UnknownShape(_) => CommandError::UnknownShape,
            EngineError::RoundOver => CommandError::RoundOver,
            EngineError::InvalidDailySeed { .. } => CommandError::InvalidDailySeed,
        }
    }
}

/// Apply one command to `round`
///
/// On error the round is left unchanged. Skip outside of play is an error
/// (like place); undo and revive report `ignored` instead.
pub fn apply_command<R: RandomSource>(
    round: &mut Round<R>,
    command: RoundCommand,
) -> Result<CommandOutcome, CommandError> {
    debug!(op = command.as_str(), "applying command");
    match command {
        RoundCommand::StartLevel { level } => Ok(CommandOutcome::applied(round.start_level(level))),
        RoundCommand::StartDaily { year, day_of_year } => {
            let seed = DailySeed::new(year, day_of_year)?;
            Ok(CommandOutcome::applied(round.start_daily(seed)))
        }
        RoundCommand::Place { shape_id, x, y } => {
            let events = round.place(ShapeId(shape_id), x, y)?;
            Ok(CommandOutcome::applied(events))
        }
        RoundCommand::Undo => Ok(round
            .undo()
            .map(CommandOutcome::applied)
            .unwrap_or_else(CommandOutcome::ignored)),
        RoundCommand::Skip => round
            .skip()
            .map(CommandOutcome::applied)
            .ok_or(CommandError::RoundOver),
        RoundCommand::Revive => Ok(round
            .revive_once()
            .map(CommandOutcome::applied)
            .unwrap_or_else(CommandOutcome::ignored)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfit_core::{Grid, RoundEvent, RoundPhase};
    use blockfit_types::ShapeKind;

    fn round_with(rows: &[&str], kinds: &[ShapeKind]) -> Round {
        let mut round = Round::new(1);
        round.start_custom(Grid::from_rows(rows), kinds);
        round
    }

    #[test]
    fn start_level_is_applied() {
        let mut round = Round::new(1);
        let out = apply_command(&mut round, RoundCommand::StartLevel { level: 3 }).unwrap();
        assert!(!out.ignored);
        assert!(matches!(out.events[0], RoundEvent::RoundStarted { .. }));
        assert_eq!(round.target(), Some(2500));
    }

    #[test]
    fn start_daily_rejects_bad_day() {
        let mut round = Round::new(1);
        let err = apply_command(
            &mut round,
            RoundCommand::StartDaily {
                year: 2026,
                day_of_year: 0,
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), "invalid_daily_seed");
        assert_eq!(round.phase(), RoundPhase::Idle);
    }

    #[test]
    fn place_rejected_when_blocked() {
        let mut round = round_with(&["#......."], &[ShapeKind::Dot]);
        let id = round.shapes()[0].id.0;
        let err =
            apply_command(&mut round, RoundCommand::Place { shape_id: id, x: 0, y: 0 }).unwrap_err();
        assert_eq!(err, CommandError::InvalidPlacement);
        assert_eq!(err.code(), "invalid_place");
    }

    #[test]
    fn place_rejected_for_unknown_shape() {
        let mut round = round_with(&[], &[ShapeKind::Dot]);
        let err = apply_command(
            &mut round,
            RoundCommand::Place {
                shape_id: 77,
                x: 0,
                y: 0,
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), "unknown_shape");
    }

    #[test]
    fn place_rejected_before_start() {
        let mut round = Round::new(1);
        let err = apply_command(&mut round, RoundCommand::Place { shape_id: 0, x: 0, y: 0 })
            .unwrap_err();
        assert_eq!(err, CommandError::RoundOver);
    }

    #[test]
    fn undo_without_history_is_ignored() {
        let mut round = round_with(&[], &[ShapeKind::Dot]);
        let out = apply_command(&mut round, RoundCommand::Undo).unwrap();
        assert!(out.ignored);
        assert!(out.events.is_empty());
    }

    #[test]
    fn revive_only_after_game_over() {
        let mut round = round_with(&["x.x.x.x."; 8], &[ShapeKind::Dot, ShapeKind::Square3]);
        assert!(apply_command(&mut round, RoundCommand::Revive).unwrap().ignored);

        let dot = round.shapes()[0].id.0;
        apply_command(&mut round, RoundCommand::Place { shape_id: dot, x: 1, y: 0 }).unwrap();
        assert_eq!(round.phase(), RoundPhase::GameOver);

        assert!(!apply_command(&mut round, RoundCommand::Revive).unwrap().ignored);
        assert_eq!(round.phase(), RoundPhase::AwaitingPlacement);
        assert!(apply_command(&mut round, RoundCommand::Revive).unwrap().ignored);
    }

    #[test]
    fn skip_before_start_is_round_over() {
        let mut round = Round::new(1);
        assert_eq!(
            apply_command(&mut round, RoundCommand::Skip),
            Err(CommandError::RoundOver)
        );
    }

    #[test]
    fn engine_errors_map_to_codes() {
        let err: CommandError = EngineError::OutOfBounds { x: 9, y: 0 }.into();
        assert_eq!(err.code(), "out_of_bounds");
        assert!(!err.message().is_empty());
    }
}
