use crate::battle::ai::{Behavior, ScoringAI};
use crate::battle::calculators::{DamageCalculator, StandardDamageCalculator};
use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::phases::{determine_action_order, phase_for_action, Phase, PhaseKind, PhaseQueue};
use crate::battle::resolution::{resolve_move, ResolvedMove};
use crate::battle::state::{BattleEvent, BattleState, EventBus, GameState, TurnRng};
use crate::combatant::{PlayerAction, PlayerType};
use crate::config::BattleConfig;
use crate::errors::{ActionError, BattleResult, BattleStateError};
use schema::{BattlerIndex, Move};
use strum::IntoEnumIterator;

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Executed(PhaseKind),
    /// Command selection is pending and a human side has not chosen yet.
    AwaitingCommands,
    BattleOver,
}

/// Where a multi-phase run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The named phase is next and has not run yet.
    Paused(PhaseKind),
    AwaitingCommands,
    BattleOver,
}

/// Drives a battle through the phase pipeline.
///
/// Phases run one at a time from a FIFO queue. Callers can stop just before
/// any phase kind to inspect or adjust state, then resume.
pub struct BattleRunner {
    state: BattleState,
    phases: PhaseQueue,
    bus: EventBus,
    rng: TurnRng,
    calculator: Box<dyn DamageCalculator>,
    ai: ScoringAI,
    last_resolution: Option<ResolvedMove>,
}

impl BattleRunner {
    pub fn new(state: BattleState, rng: TurnRng) -> Self {
        let mut phases = PhaseQueue::new();
        phases.push_back(Phase::TurnInit);
        Self {
            state,
            phases,
            bus: EventBus::new(),
            rng,
            calculator: Box::new(StandardDamageCalculator),
            ai: ScoringAI::new(),
            last_resolution: None,
        }
    }

    pub fn from_config(state: BattleState, config: &BattleConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => TurnRng::from_seed(seed),
            None => TurnRng::new_random(),
        };
        Self::new(state, rng)
    }

    pub fn with_calculator(mut self, calculator: Box<dyn DamageCalculator>) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Direct state access for scenario setup between phases.
    pub fn state_mut(&mut self) -> &mut BattleState {
        &mut self.state
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        self.bus.take_events()
    }

    /// The most recent move resolution, including the states it visited.
    pub fn last_resolution(&self) -> Option<&ResolvedMove> {
        self.last_resolution.as_ref()
    }

    /// Kind of the next phase to run, if any.
    pub fn current_phase(&self) -> Option<PhaseKind> {
        self.phases.peek().map(Phase::kind)
    }

    pub fn pending_phases(&self) -> Vec<PhaseKind> {
        self.phases.kinds()
    }

    /// Queue a move for this turn by name. The move must be in the moveset.
    pub fn select_move(&mut self, battler: BattlerIndex, move_used: Move) -> BattleResult<()> {
        let move_index = self
            .state
            .combatant(battler)
            .moveset
            .iter()
            .position(|known| *known == move_used)
            .ok_or(ActionError::MoveNotKnown(move_used))?;
        self.submit_action(battler, PlayerAction::UseMove { move_index })
    }

    pub fn forfeit(&mut self, battler: BattlerIndex) -> BattleResult<()> {
        self.submit_action(battler, PlayerAction::Forfeit)
    }

    pub fn submit_action(&mut self, battler: BattlerIndex, action: PlayerAction) -> BattleResult<()> {
        if self.state.is_battle_over() {
            return Err(BattleStateError::BattleOver.into());
        }
        if self.state.queued_action(battler).is_some() {
            return Err(ActionError::AlreadySubmitted(battler).into());
        }
        if let PlayerAction::UseMove { move_index } = action {
            if move_index >= self.state.combatant(battler).moveset.len() {
                return Err(ActionError::InvalidMoveIndex(move_index).into());
            }
        }

        tracing::debug!(%battler, ?action, "action submitted");
        self.state.action_queue[battler.to_index()] = Some(action);
        Ok(())
    }

    /// Run until the first command selection of the battle is pending.
    pub fn start(&mut self) -> BattleResult<RunStatus> {
        self.run_until(PhaseKind::CommandSelection)
    }

    /// Run exactly one phase. Stack boosts from tags added since the last
    /// phase are scheduled ahead of everything else first.
    pub fn step(&mut self) -> BattleResult<StepOutcome> {
        self.schedule_stack_boosts();
        let Some(phase) = self.phases.peek().copied() else {
            if self.state.is_battle_over() {
                return Ok(StepOutcome::BattleOver);
            }
            return Err(BattleStateError::InconsistentState(
                "phase queue drained before the battle ended".to_string(),
            )
            .into());
        };

        if phase == Phase::CommandSelection {
            self.fill_npc_actions();
            if !self.commands_ready() {
                return Ok(StepOutcome::AwaitingCommands);
            }
        }

        self.phases.pop_front();
        tracing::debug!(phase = %phase.kind(), turn = self.state.turn_number, "running phase");
        if let Err(err) = self.execute_phase(phase) {
            tracing::error!(phase = %phase.kind(), %err, "phase aborted");
            return Err(err);
        }
        Ok(StepOutcome::Executed(phase.kind()))
    }

    /// Run phases until `kind` is next, the battle ends, or a human
    /// command is needed. Returns immediately if `kind` is already next.
    pub fn run_until(&mut self, kind: PhaseKind) -> BattleResult<RunStatus> {
        loop {
            self.schedule_stack_boosts();
            if self.current_phase() == Some(kind) {
                return Ok(RunStatus::Paused(kind));
            }
            match self.step()? {
                StepOutcome::Executed(_) => continue,
                StepOutcome::AwaitingCommands => return Ok(RunStatus::AwaitingCommands),
                StepOutcome::BattleOver => return Ok(RunStatus::BattleOver),
            }
        }
    }

    /// Run the rest of the current turn, stopping before the next one opens.
    pub fn run_turn(&mut self) -> BattleResult<RunStatus> {
        self.schedule_stack_boosts();
        if self.current_phase() == Some(PhaseKind::TurnInit) {
            match self.step()? {
                StepOutcome::Executed(_) => {}
                StepOutcome::AwaitingCommands => return Ok(RunStatus::AwaitingCommands),
                StepOutcome::BattleOver => return Ok(RunStatus::BattleOver),
            }
        }
        self.run_until(PhaseKind::TurnInit)
    }

    /// Run turns until someone wins or `max_turns` is reached.
    ///
    /// Every side must be NPC-controlled or have its command pre-queued.
    pub fn run_to_completion(&mut self, max_turns: u32) -> BattleResult<Option<BattlerIndex>> {
        while self.state.turn_number <= max_turns {
            match self.run_turn()? {
                RunStatus::BattleOver => return Ok(self.state.winner()),
                RunStatus::AwaitingCommands => {
                    return Err(ActionError::InvalidAction(
                        "a human-controlled side has no queued command".to_string(),
                    )
                    .into())
                }
                RunStatus::Paused(_) => {}
            }
        }
        tracing::warn!(max_turns, "battle stopped at the turn limit");
        Ok(None)
    }

    fn commands_ready(&self) -> bool {
        self.state.action_queue.iter().all(Option::is_some)
    }

    fn fill_npc_actions(&mut self) {
        for battler in BattlerIndex::iter() {
            let combatant = self.state.combatant(battler);
            if combatant.player_type == PlayerType::Npc && self.state.queued_action(battler).is_none() {
                let action = self.ai.decide_action(battler, &self.state, &mut self.rng);
                tracing::debug!(%battler, ?action, "npc chose action");
                self.state.action_queue[battler.to_index()] = Some(action);
            }
        }
    }

    fn schedule_stack_boosts(&mut self) {
        if self.state.is_battle_over() {
            return;
        }
        let mut boosts = Vec::new();
        for target in BattlerIndex::iter() {
            for tag in self.state.combatant_mut(target).take_pending_boosts() {
                boosts.push(Phase::StatStageChange { target, tag });
            }
        }
        // Front insertion reverses, so walk backwards to keep battler order
        for phase in boosts.into_iter().rev() {
            self.phases.push_front(phase);
        }
    }

    fn end_battle(&mut self, winner: BattlerIndex) {
        self.phases.clear();
        for battler in BattlerIndex::iter() {
            self.state.combatant_mut(battler).take_pending_boosts();
        }
        self.phases.push_back(Phase::BattleEnd { winner });
    }

    fn execute_phase(&mut self, phase: Phase) -> BattleResult<()> {
        match phase {
            Phase::TurnInit => {
                execute_command_batch(
                    vec![
                        BattleCommand::SetGameState(GameState::WaitingForActions),
                        BattleCommand::EmitEvent(BattleEvent::TurnStarted {
                            turn_number: self.state.turn_number,
                        }),
                    ],
                    &mut self.state,
                    &mut self.bus,
                )?;
                self.phases.push_back(Phase::CommandSelection);
            }
            Phase::CommandSelection => {
                execute_command_batch(
                    vec![BattleCommand::SetGameState(GameState::TurnInProgress)],
                    &mut self.state,
                    &mut self.bus,
                )?;
                self.phases.push_back(Phase::TurnStart);
            }
            Phase::TurnStart => {
                let actions: Vec<(BattlerIndex, PlayerAction)> = BattlerIndex::iter()
                    .filter_map(|battler| {
                        self.state
                            .queued_action(battler)
                            .map(|action| (battler, action.clone()))
                    })
                    .collect();

                for (battler, action) in determine_action_order(&self.state, &actions)? {
                    let phase = phase_for_action(&self.state, battler, &action)?;
                    self.phases.push_back(phase);
                }
                self.phases.push_back(Phase::TurnEnd);

                execute_command_batch(
                    vec![BattleCommand::ClearActionQueue],
                    &mut self.state,
                    &mut self.bus,
                )?;
            }
            Phase::Move { user, move_used } => {
                if self.state.combatant(user).is_fainted() {
                    tracing::debug!(%user, %move_used, "skipping move of fainted combatant");
                    return Ok(());
                }

                let resolved = resolve_move(
                    user,
                    move_used,
                    &mut self.state,
                    &mut self.bus,
                    &mut self.rng,
                    self.calculator.as_mut(),
                )?;
                self.last_resolution = Some(resolved);

                let target = user.opponent();
                if self.state.combatant(target).is_fainted() {
                    self.end_battle(user);
                } else if self.state.combatant(user).is_fainted() {
                    self.end_battle(target);
                }
            }
            Phase::StatStageChange { target, tag } => {
                execute_command_batch(
                    vec![BattleCommand::ApplyStackBoost { target, tag }],
                    &mut self.state,
                    &mut self.bus,
                )?;
            }
            Phase::Forfeit { battler } => {
                execute_command_batch(
                    vec![BattleCommand::EmitEvent(BattleEvent::PlayerForfeited { battler })],
                    &mut self.state,
                    &mut self.bus,
                )?;
                self.end_battle(battler.opponent());
            }
            Phase::TurnEnd => {
                let mut commands: Vec<BattleCommand> = BattlerIndex::iter()
                    .map(|target| BattleCommand::ClearTurnEndTags { target })
                    .collect();
                commands.push(BattleCommand::EmitEvent(BattleEvent::TurnEnded {
                    turn_number: self.state.turn_number,
                }));
                commands.push(BattleCommand::IncrementTurnNumber);
                execute_command_batch(commands, &mut self.state, &mut self.bus)?;
                self.phases.push_back(Phase::TurnInit);
            }
            Phase::BattleEnd { winner } => {
                execute_command_batch(
                    vec![
                        BattleCommand::SetGameState(GameState::win_for(winner)),
                        BattleCommand::EmitEvent(BattleEvent::BattleEnded { winner }),
                    ],
                    &mut self.state,
                    &mut self.bus,
                )?;
                tracing::info!(%winner, turn = self.state.turn_number, "battle ended");
            }
        }
        Ok(())
    }
}
