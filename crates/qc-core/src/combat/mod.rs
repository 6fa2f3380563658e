//! Turn-based battles between one character and one enemy.
//!
//! A battle runs `NotStarted -> InProgress` and ends in `Won`, `Lost`, or
//! `Escaped`. Each round is a player turn, an end check, an enemy turn, and
//! another end check. Basic attacks always deal at least 1 damage, so a
//! battle driven by attacks always terminates.
//!
//! The battle owns its enemy but only borrows the character for each turn,
//! so callers can keep a battle alive across several inputs. Rewards are
//! reported in the outcome, never applied here.

pub mod action;

pub use action::{
    ActionEffect, Actor, BattleEvent, PlayerAction, attempt_escape, calculate_damage,
    resolve_ability,
};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::enemy::Enemy;
use crate::error::{QcError, QcResult};
use crate::progression::Rewards;

/// Lifecycle state of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleState {
    /// Created but not yet started.
    NotStarted,
    /// Rounds are being fought.
    InProgress,
    /// The enemy was defeated.
    Won,
    /// The character was defeated.
    Lost,
    /// The character ran away.
    Escaped,
}

impl BattleState {
    /// Returns true for the terminal states.
    pub fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Escaped)
    }
}

/// How a finished battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The enemy fell; the caller should grant these rewards.
    Victory(Rewards),
    /// The character fell.
    Defeat,
    /// The character escaped. No rewards.
    Escaped,
}

/// Chooses the player's action each round.
pub trait Tactician {
    /// Pick the next action.
    fn choose(&mut self, battle: &Battle, character: &Character) -> PlayerAction;
}

impl<F> Tactician for F
where
    F: FnMut(&Battle, &Character) -> PlayerAction,
{
    fn choose(&mut self, battle: &Battle, character: &Character) -> PlayerAction {
        self(battle, character)
    }
}

/// A battle against one enemy.
#[derive(Debug, Clone)]
pub struct Battle {
    enemy: Enemy,
    state: BattleState,
    round: u32,
    log: Vec<BattleEvent>,
}

impl Battle {
    /// Create a battle that has not started yet.
    pub fn new(enemy: Enemy) -> Self {
        Self {
            enemy,
            state: BattleState::NotStarted,
            round: 0,
            log: Vec::new(),
        }
    }

    /// Begin the first round.
    ///
    /// A dead character cannot fight: this fails with
    /// [`QcError::CharacterDead`] and the battle stays unstarted. Starting a
    /// battle twice fails with [`QcError::CombatNotActive`].
    pub fn start(&mut self, character: &Character) -> QcResult<()> {
        if self.state != BattleState::NotStarted {
            return Err(QcError::CombatNotActive);
        }
        if character.is_dead() {
            return Err(QcError::CharacterDead);
        }
        self.state = BattleState::InProgress;
        self.round = 1;
        Ok(())
    }

    /// The enemy being fought.
    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Current state.
    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Current round (1-based; 0 before the battle starts).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Every event so far, oldest first.
    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    /// The outcome, once the battle is over.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state {
            BattleState::Won => Some(BattleOutcome::Victory(self.enemy.rewards())),
            BattleState::Lost => Some(BattleOutcome::Defeat),
            BattleState::Escaped => Some(BattleOutcome::Escaped),
            BattleState::NotStarted | BattleState::InProgress => None,
        }
    }

    fn ensure_active(&self) -> QcResult<()> {
        if self.state == BattleState::InProgress {
            Ok(())
        } else {
            Err(QcError::CombatNotActive)
        }
    }

    fn record(&mut self, actor: Actor, effect: ActionEffect, description: String) -> ActionEffect {
        self.log.push(BattleEvent {
            round: self.round,
            actor,
            effect,
            description,
        });
        effect
    }

    /// Resolve the player's action.
    pub fn player_turn<R>(
        &mut self,
        character: &mut Character,
        action: PlayerAction,
        rng: &mut R,
    ) -> QcResult<ActionEffect>
    where
        R: Rng + ?Sized,
    {
        self.ensure_active()?;
        let (effect, description) = match action {
            PlayerAction::Attack => {
                let damage = calculate_damage(&character.stats, &self.enemy.stats);
                let dealt = self.enemy.stats.take_damage(damage);
                (
                    ActionEffect::Damage(dealt),
                    format!("{} attacks {} for {dealt} damage.", character.name, self.enemy.name),
                )
            }
            PlayerAction::Ability => {
                let class = character.class;
                let effect =
                    resolve_ability(class, &mut character.stats, &mut self.enemy.stats, rng);
                let ability = class.ability_name();
                let description = match effect {
                    ActionEffect::Damage(n) => {
                        format!("{ability} hits {} for {n} damage!", self.enemy.name)
                    }
                    ActionEffect::Heal(n) => format!("{ability} restores {n} health."),
                    _ => format!("{ability} misses!"),
                };
                (effect, description)
            }
            PlayerAction::Flee => {
                if attempt_escape(rng) {
                    self.state = BattleState::Escaped;
                    (ActionEffect::Escaped, format!("{} escaped!", character.name))
                } else {
                    (
                        ActionEffect::EscapeFailed,
                        format!("{} failed to escape.", character.name),
                    )
                }
            }
        };
        Ok(self.record(Actor::Player, effect, description))
    }

    /// The enemy's basic attack.
    pub fn enemy_turn(&mut self, character: &mut Character) -> QcResult<ActionEffect> {
        self.ensure_active()?;
        let damage = calculate_damage(&self.enemy.stats, &character.stats);
        let dealt = character.stats.take_damage(damage);
        let description = format!(
            "{} attacks {} for {dealt} damage.",
            self.enemy.name, character.name
        );
        Ok(self.record(Actor::Enemy, ActionEffect::Damage(dealt), description))
    }

    /// Move to a terminal state if either side has fallen, and report the
    /// outcome if the battle is over. The enemy is checked first.
    pub fn check_end(&mut self, character: &Character) -> Option<BattleOutcome> {
        if self.state == BattleState::InProgress {
            if !self.enemy.stats.is_alive() {
                self.state = BattleState::Won;
            } else if character.is_dead() {
                self.state = BattleState::Lost;
            }
        }
        self.outcome()
    }

    /// Fight one full round: player turn, end check, enemy turn, end check.
    /// The round counter advances only when the battle continues.
    pub fn fight_round<R>(
        &mut self,
        character: &mut Character,
        action: PlayerAction,
        rng: &mut R,
    ) -> QcResult<Option<BattleOutcome>>
    where
        R: Rng + ?Sized,
    {
        self.player_turn(character, action, rng)?;
        if let Some(outcome) = self.check_end(character) {
            return Ok(Some(outcome));
        }
        self.enemy_turn(character)?;
        if let Some(outcome) = self.check_end(character) {
            return Ok(Some(outcome));
        }
        self.round += 1;
        Ok(None)
    }

    /// Start the battle if needed, then fight rounds until it ends.
    ///
    /// The tactician must eventually pick actions that make progress; a
    /// Cleric that only heals against a weak enemy would never finish.
    pub fn run<T, R>(
        &mut self,
        character: &mut Character,
        tactician: &mut T,
        rng: &mut R,
    ) -> QcResult<BattleOutcome>
    where
        T: Tactician + ?Sized,
        R: Rng + ?Sized,
    {
        if self.state == BattleState::NotStarted {
            self.start(character)?;
        }
        loop {
            self.ensure_active()?;
            let action = tactician.choose(self, character);
            if let Some(outcome) = self.fight_round(character, action, rng)? {
                return Ok(outcome);
            }
        }
    }
}

/// Fight a complete battle against `enemy`.
pub fn start_battle<T, R>(
    character: &mut Character,
    enemy: Enemy,
    tactician: &mut T,
    rng: &mut R,
) -> QcResult<BattleOutcome>
where
    T: Tactician + ?Sized,
    R: Rng + ?Sized,
{
    Battle::new(enemy).run(character, tactician, rng)
}
