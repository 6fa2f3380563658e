//! Game session management.
//!
//! `GameSession` replaces ambient global state with one explicit object:
//! every command reads and mutates the character it owns, using the quest
//! and item datasets loaded at startup.

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use qc_core::inventory::{self, EquipSlot};
use qc_core::quest::{self, QuestDef};
use qc_core::{
    Battle, BattleOutcome, Character, Enemy, ItemCatalog, ItemKind, PlayerAction, QcError,
    QuestBook, gain_experience, settle_levels,
};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};

/// Commands accepted while a battle is in progress.
const BATTLE_COMMANDS: &[&str] = &[
    "attack", "ability", "special", "run", "flee", "status", "help", "quit", "q",
];

/// An interactive game session for one character.
pub struct GameSession {
    character: Character,
    quests: QuestBook,
    items: ItemCatalog,
    battle: Option<Battle>,
    rng: StdRng,
    config: SessionConfig,
}

impl GameSession {
    /// Create a session from already loaded records.
    pub fn new(
        character: Character,
        quests: QuestBook,
        items: ItemCatalog,
        config: SessionConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            character,
            quests,
            items,
            battle: None,
            rng,
            config,
        }
    }

    /// Load a saved character and the datasets named by `config`.
    pub fn load(name: &str, config: SessionConfig) -> SessionResult<Self> {
        let quests = qc_data::load_quests(&config.quests_path())?;
        let items = qc_data::load_items(&config.items_path())?;
        let character = qc_data::load_character(&config.save_dir(), name)?;
        info!(character = %character.name, level = character.level, "session loaded");
        Ok(Self::new(character, quests, items, config))
    }

    /// The character being played.
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// The quest dataset.
    pub fn quests(&self) -> &QuestBook {
        &self.quests
    }

    /// The item dataset.
    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// The battle in progress, if any.
    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Write the character's save file.
    pub fn save(&self) -> SessionResult<PathBuf> {
        let path = qc_data::save_character(&self.config.save_dir(), &self.character)?;
        info!(character = %self.character.name, path = %path.display(), "saved");
        Ok(path)
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        let result = self.dispatch(&cmd, rest);
        if let Err(e) = &result {
            warn!(command = %cmd, error = %e, "command failed");
        }
        result
    }

    fn dispatch(&mut self, cmd: &str, rest: &str) -> SessionResult<String> {
        if self.battle.is_some() && !BATTLE_COMMANDS.contains(&cmd) {
            return Err(SessionError::BattleInProgress);
        }

        match cmd {
            "status" => Ok(self.do_status()),
            "quests" => self.do_quest_list(rest),
            "quest" => self.do_quest(rest),
            "progress" => Ok(self.do_progress()),
            "inventory" | "inv" => Ok(self.do_inventory()),
            "use" => self.do_use(rest),
            "equip" => self.do_equip(rest),
            "unequip" => self.do_unequip(rest),
            "drop" => self.do_drop(rest),
            "shop" => Ok(self.do_shop()),
            "buy" => self.do_buy(rest),
            "sell" => self.do_sell(rest),
            "explore" => {
                let enemy = Enemy::for_level(self.character.level);
                self.do_battle_start(enemy)
            }
            "fight" => {
                if rest.is_empty() {
                    return Err(usage("fight <goblin|orc|dragon>"));
                }
                let enemy = Enemy::spawn(rest)?;
                self.do_battle_start(enemy)
            }
            "attack" | "ability" | "special" | "run" | "flee" => {
                let action = cmd
                    .parse::<PlayerAction>()
                    .map_err(SessionError::InvalidChoice)?;
                self.do_battle_round(action)
            }
            "revive" => self.do_revive(),
            "save" => {
                let path = self.save()?;
                Ok(format!("Game saved to {}.", path.display()))
            }
            "help" => Ok(help_text().to_string()),
            "quit" | "q" => Ok("Farewell, adventurer!".to_string()),
            _ => Err(SessionError::UnknownCommand(cmd.to_string())),
        }
    }

    /// Save if autosave is on.
    fn changed(&self) -> SessionResult<()> {
        if self.config.autosave {
            self.save()?;
        }
        Ok(())
    }

    fn do_status(&self) -> String {
        let c = &self.character;
        let mut out = format!(
            "{} the {} (level {})\n{}\nXP: {}/{} | Gold: {}",
            c.name,
            c.class,
            c.level,
            c.stats,
            c.experience,
            qc_core::progression::xp_to_next_level(c.level),
            c.gold,
        );
        if c.is_dead() {
            out.push_str(&format!(
                "\nYou are dead. Type 'revive' ({} gold).",
                self.config.revive_cost
            ));
        }
        if let Some(battle) = &self.battle {
            out.push_str(&format!(
                "\nIn battle with {} ({}), round {}",
                battle.enemy().name,
                battle.enemy().stats,
                battle.round()
            ));
        }
        out
    }

    fn do_quest_list(&self, filter: &str) -> SessionResult<String> {
        let (title, quests) = match filter.to_lowercase().as_str() {
            "" | "available" => ("Available quests", self.quests.available_quests(&self.character)),
            "active" => ("Active quests", self.quests.active_quests(&self.character)),
            "completed" | "done" => (
                "Completed quests",
                self.quests.completed_quests(&self.character),
            ),
            other => {
                return Err(SessionError::InvalidChoice(format!(
                    "unknown quest filter '{other}', use: available, active, completed"
                )));
            }
        };
        if quests.is_empty() {
            return Ok(format!("{title}: none."));
        }
        let mut out = format!("{title} ({}):\n", quests.len());
        for q in quests {
            out.push_str(&format!("  {}\n", quest_line(q)));
        }
        Ok(out.trim_end().to_string())
    }

    fn do_quest(&mut self, rest: &str) -> SessionResult<String> {
        let parts: Vec<&str> = rest.splitn(2, ' ').collect();
        let sub = parts[0].to_lowercase();
        let id = parts.get(1).map(|s| s.trim()).unwrap_or("");
        if id.is_empty() {
            return Err(usage("quest info|accept|complete|abandon|chain <quest id>"));
        }

        match sub.as_str() {
            "info" => self.do_quest_info(id),
            "accept" => {
                self.quests.accept(&mut self.character, id)?;
                debug!(quest = id, "quest accepted");
                self.changed()?;
                Ok(format!("Quest accepted: {}", self.quest_title(id)))
            }
            "complete" => self.do_quest_complete(id),
            "abandon" => {
                quest::abandon(&mut self.character, id)?;
                debug!(quest = id, "quest abandoned");
                self.changed()?;
                Ok(format!("Quest abandoned: {}", self.quest_title(id)))
            }
            "chain" => {
                let chain = self.quests.prerequisite_chain(id)?;
                let names: Vec<&str> = chain.iter().map(|q| q.as_str()).collect();
                Ok(names.join(" -> "))
            }
            _ => Err(usage("quest info|accept|complete|abandon|chain <quest id>")),
        }
    }

    fn quest_title(&self, id: &str) -> String {
        self.quests
            .get(id)
            .map_or_else(|| id.to_string(), |q| q.title.clone())
    }

    fn do_quest_info(&self, id: &str) -> SessionResult<String> {
        let q = self
            .quests
            .get(id)
            .ok_or_else(|| QcError::QuestNotFound(id.into()))?;
        let state = match self.quests.check_accept(&self.character, id) {
            Ok(_) => "available".to_string(),
            Err(QcError::QuestAlreadyCompleted(_)) => "completed".to_string(),
            Err(QcError::QuestAlreadyActive(_)) => "active".to_string(),
            Err(e) => format!("locked ({e})"),
        };
        let prerequisite = q
            .prerequisite
            .as_ref()
            .map_or("none", |p| p.as_str());
        Ok(format!(
            "=== {} ===\n{}\nRequired level: {}\nPrerequisite: {}\n\
             Rewards: {} XP, {} gold\nStatus: {}",
            q.title,
            q.description,
            q.required_level,
            prerequisite,
            q.reward_xp,
            q.reward_gold,
            state
        ))
    }

    fn do_quest_complete(&mut self, id: &str) -> SessionResult<String> {
        let rewards = self.quests.complete(&mut self.character, id)?;
        info!(quest = id, xp = rewards.xp, gold = rewards.gold, "quest completed");
        let mut out = format!(
            "Quest complete: {}! Earned {rewards}.",
            self.quest_title(id)
        );
        if self.character.is_alive() {
            let gained = settle_levels(&mut self.character)?;
            if gained > 0 {
                out.push_str(&self.level_up_message());
            }
        }
        self.changed()?;
        Ok(out)
    }

    fn level_up_message(&self) -> String {
        info!(character = %self.character.name, level = self.character.level, "level up");
        format!(
            "\nLevel up! You are now level {}. {}",
            self.character.level, self.character.stats
        )
    }

    fn do_progress(&self) -> String {
        let c = &self.character;
        let total = self.quests.total_rewards_earned(c);
        format!(
            "Active quests: {}\nCompleted quests: {}/{}\nCompletion: {:.2}%\n\
             Total rewards earned: {total}",
            c.quests.active().len(),
            c.quests.completed().len(),
            self.quests.len(),
            self.quests.completion_percentage(c),
        )
    }

    fn item_name(&self, id: &str) -> String {
        self.items
            .get(id)
            .map_or_else(|| id.to_string(), |i| i.name.clone())
    }

    fn do_inventory(&self) -> String {
        let inv = &self.character.inventory;
        let mut out = format!(
            "Inventory ({}/{}) | Gold: {}\n",
            inv.len(),
            inv.capacity(),
            self.character.gold
        );
        let mut seen = Vec::new();
        for id in inv.items() {
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            out.push_str(&format!(
                "  {} x{} [{}]\n",
                self.item_name(id),
                inv.count(id),
                id
            ));
        }
        if inv.is_empty() {
            out.push_str("  (empty)\n");
        }
        for slot in [EquipSlot::Weapon, EquipSlot::Armor] {
            let label = match slot {
                EquipSlot::Weapon => "Weapon",
                EquipSlot::Armor => "Armor",
            };
            let worn = self
                .character
                .equipment
                .get(slot)
                .map_or_else(|| "none".to_string(), |id| self.item_name(id));
            out.push_str(&format!("{label}: {worn}\n"));
        }
        out.trim_end().to_string()
    }

    fn do_use(&mut self, id: &str) -> SessionResult<String> {
        if id.is_empty() {
            return Err(usage("use <item id>"));
        }
        let effect = inventory::use_item(&mut self.character, &self.items, id)?;
        self.changed()?;
        Ok(format!("Used {} ({effect}).", self.item_name(id)))
    }

    fn do_equip(&mut self, id: &str) -> SessionResult<String> {
        if id.is_empty() {
            return Err(usage("equip <item id>"));
        }
        let item = self
            .items
            .get(id)
            .ok_or_else(|| QcError::ItemNotFound(id.into()))?;
        let previous = match item.kind {
            ItemKind::Weapon => inventory::equip_weapon(&mut self.character, &self.items, id)?,
            ItemKind::Armor => inventory::equip_armor(&mut self.character, &self.items, id)?,
            ItemKind::Consumable => {
                return Err(SessionError::InvalidChoice(format!(
                    "{} is a consumable; try 'use {id}'",
                    item.name
                )));
            }
        };
        self.changed()?;
        let mut out = format!("Equipped {}.", self.item_name(id));
        if let Some(old) = previous {
            out.push_str(&format!(" {} returned to inventory.", self.item_name(&old)));
        }
        Ok(out)
    }

    fn do_unequip(&mut self, slot: &str) -> SessionResult<String> {
        let slot: EquipSlot = slot
            .parse()
            .map_err(|_| usage("unequip <weapon|armor>"))?;
        match inventory::unequip(&mut self.character, &self.items, slot)? {
            Some(id) => {
                self.changed()?;
                Ok(format!("Unequipped {}.", self.item_name(&id)))
            }
            None => Ok("Nothing equipped there.".to_string()),
        }
    }

    fn do_drop(&mut self, id: &str) -> SessionResult<String> {
        if id.is_empty() {
            return Err(usage("drop <item id>"));
        }
        self.character.inventory.remove(id)?;
        self.changed()?;
        Ok(format!("Dropped {}.", self.item_name(id)))
    }

    fn do_shop(&self) -> String {
        let mut out = format!("Shop (you have {} gold):\n", self.character.gold);
        for item in &self.items {
            out.push_str(&format!(
                "  {:<16} {:>4} gold (sells for {}) [{}] {}\n",
                item.name,
                item.cost,
                inventory::sell_price(item),
                item.id,
                item.effect
            ));
        }
        out.trim_end().to_string()
    }

    fn do_buy(&mut self, id: &str) -> SessionResult<String> {
        if id.is_empty() {
            return Err(usage("buy <item id>"));
        }
        inventory::purchase(&mut self.character, &self.items, id)?;
        self.changed()?;
        Ok(format!(
            "Bought {}. Gold left: {}.",
            self.item_name(id),
            self.character.gold
        ))
    }

    fn do_sell(&mut self, id: &str) -> SessionResult<String> {
        if id.is_empty() {
            return Err(usage("sell <item id>"));
        }
        let price = inventory::sell(&mut self.character, &self.items, id)?;
        self.changed()?;
        Ok(format!("Sold {} for {price} gold.", self.item_name(id)))
    }

    fn do_battle_start(&mut self, enemy: Enemy) -> SessionResult<String> {
        let mut battle = Battle::new(enemy);
        battle.start(&self.character)?;
        let enemy = battle.enemy();
        let out = format!(
            "A {} appears! ({})\nYour move: attack, ability ({}), or run.",
            enemy.name,
            enemy.stats,
            self.character.class.ability_name()
        );
        debug!(enemy = %enemy.name, "battle started");
        self.battle = Some(battle);
        Ok(out)
    }

    fn do_battle_round(&mut self, action: PlayerAction) -> SessionResult<String> {
        let battle = self.battle.as_mut().ok_or(SessionError::NoBattle)?;
        let logged = battle.log().len();
        let outcome = battle.fight_round(&mut self.character, action, &mut self.rng)?;
        debug!(round = battle.round(), %action, "battle round");

        let mut lines: Vec<String> = battle.log()[logged..]
            .iter()
            .map(|e| e.description.clone())
            .collect();
        let enemy_name = battle.enemy().name.clone();
        let enemy_stats = battle.enemy().stats;

        match outcome {
            None => {
                lines.push(format!(
                    "You: HP {}/{} | {enemy_name}: HP {}/{}",
                    self.character.stats.health(),
                    self.character.stats.max_health(),
                    enemy_stats.health(),
                    enemy_stats.max_health()
                ));
            }
            Some(outcome) => {
                self.battle = None;
                info!(enemy = %enemy_name, ?outcome, "battle over");
                lines.push(self.finish_battle(&enemy_name, outcome)?);
                self.changed()?;
            }
        }
        Ok(lines.join("\n"))
    }

    fn finish_battle(&mut self, enemy: &str, outcome: BattleOutcome) -> SessionResult<String> {
        match outcome {
            BattleOutcome::Victory(rewards) => {
                let leveled = gain_experience(&mut self.character, rewards.xp)?;
                self.character.add_gold(i64::from(rewards.gold))?;
                let mut out = format!("Victory! You defeated the {enemy} and earned {rewards}.");
                if leveled {
                    out.push_str(&self.level_up_message());
                }
                Ok(out)
            }
            BattleOutcome::Defeat => Ok(format!(
                "You were defeated by the {enemy}. Type 'revive' ({} gold).",
                self.config.revive_cost
            )),
            BattleOutcome::Escaped => Ok(format!("You escaped from the {enemy}.")),
        }
    }

    fn do_revive(&mut self) -> SessionResult<String> {
        if self.character.is_alive() {
            return Err(SessionError::InvalidChoice("you are not dead".to_string()));
        }
        let cost = self.config.revive_cost;
        self.character.add_gold(-i64::from(cost))?;
        self.character.revive();
        info!(character = %self.character.name, cost, "revived");
        self.changed()?;
        Ok(format!(
            "You are revived with {} health. Gold left: {}.",
            self.character.stats.health(),
            self.character.gold
        ))
    }
}

fn usage(text: &str) -> SessionError {
    SessionError::InvalidChoice(format!("usage: {text}"))
}

fn quest_line(q: &QuestDef) -> String {
    format!(
        "{} [{}] (level {}) - {} XP, {} gold",
        q.title, q.id, q.required_level, q.reward_xp, q.reward_gold
    )
}

fn help_text() -> &'static str {
    "\
Character:
  status                        Show your character
  progress                      Quest statistics
  save                          Save the game
  revive                        Come back from the dead (costs gold)

Quests:
  quests [available|active|completed]
  quest info <id>               Quest details
  quest accept <id>             Start a quest
  quest complete <id>           Finish an active quest
  quest abandon <id>            Drop an active quest
  quest chain <id>              Show its prerequisite chain

Items:
  inventory                     Show items and equipment
  use <item>                    Use a consumable
  equip <item>                  Equip a weapon or armor
  unequip <weapon|armor>        Take equipment off
  drop <item>                   Throw an item away
  shop                          List the shop's stock
  buy <item> / sell <item>      Trade with the shop

Battle:
  explore                       Meet an enemy for your level
  fight <goblin|orc|dragon>     Pick a fight
  attack | ability | run        Your move during battle

  quit                          Leave the game"
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_core::CharacterClass;
    use qc_data::defaults::{DEFAULT_ITEMS, DEFAULT_QUESTS};
    use qc_data::{load_character, parse_items, parse_quests};

    fn session_for(class: CharacterClass) -> GameSession {
        GameSession::new(
            Character::new("Hero", class),
            parse_quests(DEFAULT_QUESTS).value,
            parse_items(DEFAULT_ITEMS).value,
            SessionConfig::default().with_seed(42).with_autosave(false),
        )
    }

    fn test_session() -> GameSession {
        session_for(CharacterClass::Warrior)
    }

    #[test]
    fn empty_input() {
        let mut s = test_session();
        assert_eq!(s.process("   ").unwrap(), "");
    }

    #[test]
    fn unknown_command() {
        let mut s = test_session();
        assert!(matches!(
            s.process("dance"),
            Err(SessionError::UnknownCommand(c)) if c == "dance"
        ));
    }

    #[test]
    fn status_shows_sheet() {
        let mut s = test_session();
        let out = s.process("STATUS").unwrap();
        assert!(out.contains("Hero the Warrior (level 1)"));
        assert!(out.contains("HP 120/120 | STR 15 | MAG 5"));
        assert!(out.contains("XP: 0/100 | Gold: 100"));
    }

    #[test]
    fn quest_flow_levels_up_on_completion() {
        let mut s = test_session();
        let out = s.process("quests").unwrap();
        assert!(out.contains("First Steps [first_steps]"));
        assert!(!out.contains("goblin_hunter"));

        s.process("quest accept first_steps").unwrap();
        assert!(s.process("quests active").unwrap().contains("First Steps"));
        s.process("quest complete first_steps").unwrap();
        assert_eq!(s.character().experience, 25);
        assert_eq!(s.character().gold, 110);

        let err = s.process("quest accept goblin_hunter").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Core(QcError::InsufficientLevel { required: 2, .. })
        ));

        s.character.experience = 100;
        s.character.level = 2;
        s.process("quest accept goblin_hunter").unwrap();
        let out = s.process("quest complete goblin_hunter").unwrap();
        assert!(out.contains("Earned 150 XP, 50 gold"));
        // 100 + 150 = 250 at level 2: one level gained, 50 left over.
        assert!(out.contains("Level up! You are now level 3."));
        assert_eq!(s.character().level, 3);
        assert_eq!(s.character().experience, 50);
    }

    #[test]
    fn quest_errors_and_chain() {
        let mut s = test_session();
        assert!(matches!(
            s.process("quest accept"),
            Err(SessionError::InvalidChoice(_))
        ));
        assert!(matches!(
            s.process("quest complete first_steps"),
            Err(SessionError::Core(QcError::QuestNotActive(_)))
        ));
        assert_eq!(
            s.process("quest chain dragon_slayer").unwrap(),
            "first_steps -> goblin_hunter -> dragon_slayer"
        );
        s.process("quest accept first_steps").unwrap();
        assert!(matches!(
            s.process("quest accept first_steps"),
            Err(SessionError::Core(QcError::QuestAlreadyActive(_)))
        ));
        s.process("quest abandon first_steps").unwrap();
        assert!(s.character().quests.active().is_empty());
    }

    #[test]
    fn quest_info_states() {
        let mut s = test_session();
        let info = s.process("quest info goblin_hunter").unwrap();
        assert!(info.contains("=== Goblin Hunter ==="));
        assert!(info.contains("Prerequisite: first_steps"));
        assert!(info.contains("Status: locked"));
        s.process("quest accept first_steps").unwrap();
        assert!(s.process("quest info first_steps").unwrap().contains("Status: active"));
    }

    #[test]
    fn progress_report() {
        let mut s = test_session();
        s.process("quest accept first_steps").unwrap();
        s.process("quest complete first_steps").unwrap();
        let out = s.process("progress").unwrap();
        assert!(out.contains("Completed quests: 1/3"));
        assert!(out.contains("Completion: 33.33%"));
        assert!(out.contains("Total rewards earned: 25 XP, 10 gold"));
    }

    #[test]
    fn shop_buy_equip_sell() {
        let mut s = test_session();
        assert!(s.process("shop").unwrap().contains("Iron Sword"));
        s.process("buy iron_sword").unwrap();
        assert_eq!(s.character().gold, 0);
        assert!(matches!(
            s.process("buy health_potion"),
            Err(SessionError::Core(QcError::InsufficientGold { .. }))
        ));

        let out = s.process("equip iron_sword").unwrap();
        assert_eq!(out, "Equipped Iron Sword.");
        assert_eq!(s.character().stats.strength, 20);
        assert!(s.process("inventory").unwrap().contains("Weapon: Iron Sword"));

        s.process("unequip weapon").unwrap();
        assert_eq!(s.character().stats.strength, 15);
        assert_eq!(s.process("sell iron_sword").unwrap(), "Sold Iron Sword for 50 gold.");
        assert_eq!(s.character().gold, 50);
    }

    #[test]
    fn use_and_drop_items() {
        let mut s = test_session();
        s.process("buy health_potion").unwrap();
        s.process("buy health_potion").unwrap();
        s.character.stats.take_damage(50);
        s.process("use health_potion").unwrap();
        assert_eq!(s.character().stats.health(), 90);
        assert!(matches!(
            s.process("equip health_potion"),
            Err(SessionError::InvalidChoice(_))
        ));
        s.process("drop health_potion").unwrap();
        assert!(s.character().inventory.is_empty());
        assert!(s.process("inventory").unwrap().contains("(empty)"));
    }

    #[test]
    fn battle_victory_grants_rewards() {
        let mut s = test_session();
        let out = s.process("explore").unwrap();
        assert!(out.contains("A Goblin appears!"));
        assert!(s.battle().is_some());
        assert!(matches!(
            s.process("shop"),
            Err(SessionError::BattleInProgress)
        ));
        assert!(s.process("status").unwrap().contains("In battle with Goblin"));

        for _ in 0..3 {
            let out = s.process("attack").unwrap();
            assert!(out.contains("Hero attacks Goblin for 13 damage."));
        }
        let out = s.process("attack").unwrap();
        assert!(out.contains("Victory! You defeated the Goblin and earned 25 XP, 10 gold."));
        assert!(s.battle().is_none());
        assert_eq!(s.character().experience, 25);
        assert_eq!(s.character().gold, 110);
        assert_eq!(s.character().stats.health(), 105);
    }

    #[test]
    fn battle_commands_need_battle() {
        let mut s = test_session();
        assert!(matches!(s.process("attack"), Err(SessionError::NoBattle)));
        assert!(matches!(
            s.process("fight lich"),
            Err(SessionError::Core(QcError::InvalidTarget(_)))
        ));
    }

    #[test]
    fn defeat_and_revive() {
        let mut s = session_for(CharacterClass::Mage);
        s.process("fight dragon").unwrap();
        let last = loop {
            let out = s.process("attack").unwrap();
            if s.battle().is_none() {
                break out;
            }
        };
        assert!(last.contains("You were defeated by the Dragon"));
        assert!(s.character().is_dead());
        assert!(matches!(
            s.process("explore"),
            Err(SessionError::Core(QcError::CharacterDead))
        ));

        s.process("revive").unwrap();
        assert_eq!(s.character().stats.health(), 40);
        assert_eq!(s.character().gold, 50);
        assert!(matches!(s.process("revive"), Err(SessionError::InvalidChoice(_))));
    }

    #[test]
    fn revive_needs_gold() {
        let mut s = test_session();
        s.character.stats.take_damage(u32::MAX);
        s.character.gold = 10;
        assert!(matches!(
            s.process("revive"),
            Err(SessionError::Core(QcError::InsufficientGold { .. }))
        ));
        assert!(s.character().is_dead());
    }

    #[test]
    fn run_eventually_ends_battle() {
        let mut s = session_for(CharacterClass::Rogue);
        s.process("fight goblin").unwrap();
        let mut rounds = 0;
        while s.battle().is_some() && rounds < 50 {
            s.process("run").unwrap();
            rounds += 1;
        }
        assert!(s.battle().is_none());
        assert!(s.character().is_alive());
        assert_eq!(s.character().experience, 0);
    }

    #[test]
    fn autosave_writes_after_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig::default()
            .with_seed(1)
            .with_data_dir(dir.path());
        let mut s = GameSession::new(
            Character::new("Hero", CharacterClass::Cleric),
            parse_quests(DEFAULT_QUESTS).value,
            parse_items(DEFAULT_ITEMS).value,
            config,
        );
        s.process("quest accept first_steps").unwrap();
        let saved = load_character(&dir.path().join("save_games"), "Hero").unwrap();
        assert_eq!(saved.quests.active(), ["first_steps"]);

        let out = s.process("save").unwrap();
        assert!(out.starts_with("Game saved to"));
    }

    #[test]
    fn load_reads_data_and_save() {
        let dir = tempfile::tempdir().unwrap();
        qc_data::create_default_data_files(dir.path()).unwrap();
        let config = SessionConfig::default().with_data_dir(dir.path());
        assert!(matches!(
            GameSession::load("Nobody", config.clone()),
            Err(SessionError::Data(qc_data::DataError::CharacterNotFound(_)))
        ));

        qc_data::save_character(&config.save_dir(), &Character::new("Aria", CharacterClass::Rogue))
            .unwrap();
        let s = GameSession::load("Aria", config).unwrap();
        assert_eq!(s.character().name, "Aria");
        assert_eq!(s.quests().len(), 3);
        assert_eq!(s.items().len(), 3);
        assert!(s.config().autosave);
    }

    #[test]
    fn help_lists_commands() {
        let mut s = test_session();
        let help = s.process("help").unwrap();
        assert!(help.contains("quest accept <id>"));
        assert!(help.contains("attack | ability | run"));
        assert_eq!(s.process("quit").unwrap(), "Farewell, adventurer!");
    }
}
