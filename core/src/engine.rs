use alloc::boxed::Box;
use serde::{Deserialize, Serialize};

use crate::events::Subscribers;
use crate::*;

/// Valid transitions:
/// - Ready -> Running (first reveal)
/// - Running -> Won
/// - Running -> Lost
///
/// Any state goes back to Ready on a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Ready,
    Running,
    Won,
    Lost,
}

impl Lifecycle {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::Ready
    }
}

/// The game store: settings, the current board, lifecycle and clock.
///
/// All mutation goes through the command methods, each of which runs to completion before returning and reports
/// what happened both through its outcome and through the subscribed listeners.
#[derive(Debug)]
pub struct Engine<S = RandomSampler> {
    settings: Settings,
    current_preset: Preset,
    board: Board,
    lifecycle: Lifecycle,
    has_moved: bool,
    timer: Timer,
    sampler: S,
    subscribers: Subscribers,
}

impl Engine<RandomSampler> {
    pub fn new(seed: u64) -> Result<Self> {
        Self::with_sampler(RandomSampler::new(seed))
    }
}

impl<S: MineSampler> Engine<S> {
    /// Engine on the default settings, starting on the custom preset.
    pub fn with_sampler(sampler: S) -> Result<Self> {
        Self::with_settings(Settings::default(), Preset::default(), sampler)
    }

    pub fn with_settings(settings: Settings, preset: Preset, mut sampler: S) -> Result<Self> {
        for (_, setting) in settings.iter() {
            setting.validate()?;
        }
        let board = Board::generate(settings.get(preset), &mut sampler)?;
        Ok(Self::from_parts(settings, preset, board, sampler))
    }

    /// Engine whose first board has mines at exactly `mine_coords`, sized after `preset`.
    ///
    /// The mine count comes from the layout, not from the preset. Later games are generated normally.
    pub fn from_layout(preset: Preset, mine_coords: &[Coord2], sampler: S) -> Result<Self> {
        let settings = Settings::default();
        let board = Board::from_mines(settings.get(preset).size(), mine_coords)?;
        Ok(Self::from_parts(settings, preset, board, sampler))
    }

    /// The "404" welcome board: the first move is already spent and the clock is frozen at 404.
    pub fn splash(sampler: S) -> Result<Self> {
        let mut engine = Self::from_layout(Preset::Custom, &SPLASH_MINES, sampler)?;
        engine.has_moved = true;
        engine.lifecycle = Lifecycle::Running;
        engine.timer = Timer::frozen_at(SPLASH_ELAPSED_SECS);
        Ok(engine)
    }

    fn from_parts(settings: Settings, current_preset: Preset, board: Board, sampler: S) -> Self {
        Self {
            settings,
            current_preset,
            board,
            lifecycle: Lifecycle::Ready,
            has_moved: false,
            timer: Timer::new(),
            sampler,
            subscribers: Subscribers::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        self.board.cell(coords)
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        Ok(self.board.cell(coords)?.view())
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    /// Mines minus flags, negative when over-flagged.
    pub fn mines_remaining(&self) -> i32 {
        i32::from(self.board.mine_count()) - i32::from(self.board.flagged_count())
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn timer_token(&self) -> Option<TimerToken> {
        self.timer.token()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_finished(&self) -> bool {
        self.lifecycle.is_finished()
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn current_preset(&self) -> Preset {
        self.current_preset
    }

    pub fn current_setting(&self) -> Setting {
        self.settings.get(self.current_preset)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Left click: reveal a cell, running first-move safety and the win/loss checks.
    pub fn handle_cell_click(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.lifecycle.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }
        let cell = &self.board[coords];
        if cell.is_flagged() || cell.is_revealed() {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.has_moved {
            self.first_move(coords);
        }

        let revealed = self.board.reveal(coords)?;
        if !revealed.is_empty() {
            self.emit(GameEvent::CellsRevealed(revealed));
        }

        if self.board[coords].is_mine() {
            log::debug!("Mine hit at {:?}", coords);
            self.board.mark_triggered(coords);
            let mines = self.board.reveal_all_mines();
            if !mines.is_empty() {
                self.emit(GameEvent::CellsRevealed(mines));
            }
            self.finish(Lifecycle::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        if self.board.is_cleared() {
            self.finish(Lifecycle::Won);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Right click: toggle the flag of a hidden cell while the game is not over.
    pub fn flag_cell(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.lifecycle.is_finished() || !self.board[coords].toggle_flag() {
            return Ok(MarkOutcome::NoChange);
        }

        let flagged = self.board[coords].is_flagged();
        log::trace!("Flag at {:?} set to {}", coords, flagged);
        self.emit(GameEvent::FlagToggled { coords, flagged });
        Ok(MarkOutcome::Changed)
    }

    /// Replaces the board with a fresh one from the current preset and resets the clock.
    pub fn start_new_game(&mut self) -> Result<()> {
        let setting = self.current_setting();
        let board = Board::generate(setting, &mut self.sampler)?;

        self.stop_timer();
        self.timer.reset();
        self.board = board;
        self.has_moved = false;
        self.set_lifecycle(Lifecycle::Ready);

        log::debug!("New {} game", self.current_preset);
        self.emit(GameEvent::NewGame {
            preset: self.current_preset,
            size: setting.size(),
            mines: setting.mines,
        });
        Ok(())
    }

    /// Switches preset and starts over, the previous preset stays current on error.
    pub fn change_setting(&mut self, preset: Preset) -> Result<()> {
        let previous = core::mem::replace(&mut self.current_preset, preset);
        if let Err(err) = self.start_new_game() {
            self.current_preset = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Stores new custom dimensions, the running game is left alone.
    pub fn edit_custom_settings(&mut self, rows: Coord, columns: Coord, mines: CellCount) -> Result<()> {
        let setting = Setting::new(rows, columns, mines)?;
        self.settings.set_custom(setting)?;
        self.emit(GameEvent::SettingsChanged(Preset::Custom));
        Ok(())
    }

    /// One second passed for the ticker identified by `token`.
    pub fn tick(&mut self, token: TimerToken) -> bool {
        if !self.timer.tick(token) {
            return false;
        }
        self.emit(GameEvent::Ticked(self.timer.elapsed_secs()));
        true
    }

    fn first_move(&mut self, coords: Coord2) {
        if self.board[coords].is_mine() {
            self.board.set_mine(coords, false);
            match self.board.place_random_mine(coords, &mut self.sampler) {
                Some(moved_to) => {
                    log::debug!("First move on a mine, moved it from {:?} to {:?}", coords, moved_to);
                    self.board.refresh_adjacency_around(coords);
                    self.board.refresh_adjacency_around(moved_to);
                }
                None => {
                    log::warn!("First move on a mine with nowhere to move it, mine removed");
                    self.board.refresh_adjacency_around(coords);
                }
            }
        }

        let token = self.timer.start();
        self.emit(GameEvent::TimerStarted(token));
        self.has_moved = true;
        self.set_lifecycle(Lifecycle::Running);
    }

    fn finish(&mut self, lifecycle: Lifecycle) {
        self.stop_timer();
        self.set_lifecycle(lifecycle);
    }

    fn stop_timer(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
            self.emit(GameEvent::TimerStopped);
        }
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        if self.lifecycle != lifecycle {
            self.lifecycle = lifecycle;
            self.emit(GameEvent::LifecycleChanged(lifecycle));
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.subscribers.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn engine(preset: Preset, mines: &[Coord2]) -> Engine<ScriptedSampler> {
        Engine::from_layout(preset, mines, ScriptedSampler::new([], 0)).unwrap()
    }

    /// Walls off the top-left corner so a flood fill never clears the board.
    const CORNER_WALL: [Coord2; 3] = [(0, 1), (1, 0), (1, 1)];

    fn recorder(engine: &mut Engine<ScriptedSampler>) -> Rc<RefCell<Vec<GameEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn first_click_starts_game_and_timer() {
        let mut engine = engine(Preset::Beginner, &CORNER_WALL);
        assert_eq!(engine.lifecycle(), Lifecycle::Ready);

        assert_eq!(engine.handle_cell_click((4, 4)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(engine.lifecycle(), Lifecycle::Running);
        assert!(engine.has_moved());
        assert!(engine.timer_token().is_some());
    }

    #[test]
    fn clicking_a_flagged_cell_does_nothing() {
        let mut engine = engine(Preset::Beginner, &[(0, 0)]);
        engine.flag_cell((3, 3)).unwrap();

        assert_eq!(engine.handle_cell_click((3, 3)).unwrap(), RevealOutcome::NoChange);
        assert!(!engine.cell((3, 3)).unwrap().is_revealed());
        assert_eq!(engine.lifecycle(), Lifecycle::Ready);
        assert!(!engine.has_moved());
    }

    #[test]
    fn relocated_mine_keeps_counts_consistent() {
        let mut engine = Engine::from_layout(
            Preset::Beginner,
            &[(0, 0)],
            ScriptedSampler::new([(8, 8)], 0),
        )
        .unwrap();

        engine.handle_cell_click((0, 0)).unwrap();

        assert!(!engine.cell((0, 0)).unwrap().is_mine());
        assert!(engine.cell((8, 8)).unwrap().is_mine());
        assert_eq!(engine.cell((1, 1)).unwrap().adjacent_mines(), 0);
        assert_eq!(engine.cell((7, 7)).unwrap().adjacent_mines(), 1);
        assert_eq!(engine.total_mines(), 1);
    }

    #[test]
    fn losing_reveals_all_mines_and_marks_trigger() {
        let mut engine = engine(Preset::Beginner, &CORNER_WALL);
        engine.handle_cell_click((5, 5)).unwrap();
        engine.flag_cell((1, 1)).unwrap();

        assert_eq!(engine.handle_cell_click((0, 1)).unwrap(), RevealOutcome::HitMine);

        assert_eq!(engine.lifecycle(), Lifecycle::Lost);
        assert_eq!(engine.cell_view((0, 1)).unwrap(), CellView::TriggeredMine);
        assert_eq!(engine.cell_view((1, 0)).unwrap(), CellView::Mine);
        assert_eq!(engine.cell_view((1, 1)).unwrap(), CellView::Mine);
        assert_eq!(engine.cell_view((0, 0)).unwrap(), CellView::Hidden);
        assert_eq!(engine.timer_token(), None);
    }

    #[test]
    fn actions_after_game_end_are_ignored() {
        let mut engine = engine(Preset::Beginner, &CORNER_WALL);
        engine.handle_cell_click((4, 4)).unwrap();
        engine.handle_cell_click((1, 1)).unwrap();
        assert!(engine.is_finished());

        assert_eq!(engine.flag_cell((0, 0)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(engine.handle_cell_click((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert!(!engine.cell((0, 0)).unwrap().is_flagged());
        assert!(!engine.cell((0, 0)).unwrap().is_revealed());
    }

    #[test]
    fn flags_drive_mines_remaining_negative() {
        let mut engine = engine(Preset::Beginner, &[(0, 0)]);
        engine.flag_cell((1, 1)).unwrap();
        engine.flag_cell((2, 2)).unwrap();

        assert_eq!(engine.mines_remaining(), -1);
        engine.flag_cell((2, 2)).unwrap();
        assert_eq!(engine.mines_remaining(), 0);
        assert_eq!(engine.total_mines(), 1);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut engine = engine(Preset::Beginner, &[(0, 0)]);
        engine.handle_cell_click((1, 1)).unwrap();

        assert_eq!(engine.flag_cell((1, 1)).unwrap(), MarkOutcome::NoChange);
    }

    #[test]
    fn out_of_bounds_commands_are_errors() {
        let mut engine = engine(Preset::Beginner, &[(0, 0)]);

        assert_eq!(engine.handle_cell_click((9, 0)), Err(GameError::InvalidCoords));
        assert_eq!(engine.flag_cell((0, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn edit_custom_settings_does_not_restart() {
        let mut engine = engine(Preset::Custom, &CORNER_WALL);
        engine.handle_cell_click((5, 5)).unwrap();

        engine.edit_custom_settings(5, 6, 7).unwrap();

        assert_eq!(engine.lifecycle(), Lifecycle::Running);
        assert_eq!(engine.size(), (12, 16));
        assert_eq!(engine.settings().custom(), Setting::new_unchecked(5, 6, 7));

        engine.start_new_game().unwrap();
        assert_eq!(engine.size(), (5, 6));
        assert_eq!(engine.total_mines(), 7);
    }

    #[test]
    fn edit_custom_settings_rejects_unsatisfiable_boards() {
        let mut engine = engine(Preset::Custom, &[(0, 0)]);

        let err = engine.edit_custom_settings(2, 2, 4).unwrap_err();
        assert!(err.is_invalid_settings());
        assert_eq!(engine.edit_custom_settings(0, 2, 1), Err(GameError::EmptyBoard));
        assert_eq!(engine.settings().custom(), Setting::default_custom());
    }

    #[test]
    fn change_setting_regenerates_board() {
        let mut engine = Engine::new(5).unwrap();
        assert_eq!(engine.current_preset(), Preset::Custom);

        engine.change_setting(Preset::Advanced).unwrap();

        assert_eq!(engine.current_preset(), Preset::Advanced);
        assert_eq!(engine.size(), (16, 30));
        assert_eq!(engine.total_mines(), 99);
        assert_eq!(engine.lifecycle(), Lifecycle::Ready);
    }

    #[test]
    fn stored_settings_are_validated_on_construction() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "beginner": { "rows": 9, "columns": 9, "mines": 10 },
            "intermediate": { "rows": 16, "columns": 16, "mines": 40 },
            "advanced": { "rows": 16, "columns": 30, "mines": 99 },
            "custom": { "rows": 2, "columns": 2, "mines": 4 },
        }))
        .unwrap();

        let result = Engine::with_settings(settings, Preset::Beginner, RandomSampler::new(0));

        assert_eq!(result.err(), Some(GameError::TooManyMines { mines: 4, cells: 4 }));
        assert!(Engine::new(0).is_ok());
    }

    #[test]
    fn events_follow_a_losing_game() {
        let mut engine = engine(Preset::Beginner, &[(0, 0)]);
        let events = recorder(&mut engine);

        engine.handle_cell_click((0, 1)).unwrap();
        let token = engine.timer_token().unwrap();
        engine.tick(token);
        engine.handle_cell_click((0, 0)).unwrap();

        assert_eq!(
            *events.borrow(),
            [
                GameEvent::TimerStarted(token),
                GameEvent::LifecycleChanged(Lifecycle::Running),
                GameEvent::CellsRevealed([(0, 1)].into()),
                GameEvent::Ticked(1),
                GameEvent::CellsRevealed([(0, 0)].into()),
                GameEvent::TimerStopped,
                GameEvent::LifecycleChanged(Lifecycle::Lost),
            ]
        );
    }

    #[test]
    fn splash_board_is_mid_game() {
        let engine = Engine::splash(ScriptedSampler::new([], 0)).unwrap();

        assert_eq!(engine.lifecycle(), Lifecycle::Running);
        assert!(engine.has_moved());
        assert_eq!(engine.elapsed_secs(), 404);
        assert_eq!(engine.timer_token(), None);
        assert_eq!(engine.total_mines(), 50);
        assert_eq!(engine.size(), (12, 16));
    }
}
