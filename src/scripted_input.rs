use serde::Deserialize;
use std::{fs, path::Path};
use tilecraft_world::{Intent, TickInput, TilePos};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Move {
    Left,
    Right,
    Stop,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    ticks: u64,
    /// Held for every tick of the step.
    #[serde(default, rename = "move")]
    movement: Option<Move>,
    /// Held for every tick of the step.
    #[serde(default)]
    jump: bool,
    #[serde(default)]
    select_slot: Option<usize>,
    #[serde(default)]
    toggle_inventory: bool,
    /// Cell under the pointer with primary held for the whole step.
    #[serde(default)]
    mine: Option<[i32; 2]>,
    #[serde(default)]
    place: Option<[i32; 2]>,
}

/// Replays a JSON script of held inputs as per-tick [`TickInput`]s.
///
/// Slot selection, inventory toggles, and placement fire on a step's first
/// tick only. Mining becomes a start intent on the press edge (or when the
/// mined cell changes) and a stop intent on release.
pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    tick_in_step: u64,
    mining: Option<TilePos>,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        if let Some(pos) = file.steps.iter().position(|step| step.ticks == 0) {
            anyhow::bail!("scripted input step {pos} has zero ticks");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            tick_in_step: 0,
            mining: None,
        })
    }

    /// Ticks covered by the whole script.
    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|step| step.ticks).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Input for the next tick. Past the end of the script every input is
    /// released.
    pub fn advance(&mut self) -> TickInput {
        let Some(step) = self.steps.get(self.index) else {
            return self.release();
        };
        let first_tick = self.tick_in_step == 0;
        let mut input = TickInput::default();

        match step.movement {
            Some(Move::Left) => input.intents.push(Intent::MoveLeft),
            Some(Move::Right) => input.intents.push(Intent::MoveRight),
            Some(Move::Stop) => input.intents.push(Intent::StopHorizontal),
            None => {}
        }
        if step.jump {
            input.intents.push(Intent::Jump);
        }
        if first_tick {
            if let Some(slot) = step.select_slot {
                input.intents.push(Intent::SelectSlot { slot });
            }
            if step.toggle_inventory {
                input.intents.push(Intent::ToggleInventoryView);
            }
            if let Some([col, row]) = step.place {
                let target = TilePos::new(col, row);
                input.pointer = Some(target);
                input.intents.push(Intent::PlaceBlock { target });
            }
        }

        match step.mine.map(|[col, row]| TilePos::new(col, row)) {
            Some(target) => {
                if self.mining != Some(target) {
                    input.intents.push(Intent::StartMining { target });
                }
                self.mining = Some(target);
                input.pointer = Some(target);
                input.primary_held = true;
            }
            None => {
                if self.mining.take().is_some() {
                    input.intents.push(Intent::StopMining);
                }
            }
        }

        self.tick_in_step += 1;
        if self.tick_in_step >= step.ticks {
            self.index += 1;
            self.tick_in_step = 0;
        }
        input
    }

    fn release(&mut self) -> TickInput {
        let mut input = TickInput::default();
        if self.mining.take().is_some() {
            input.intents.push(Intent::StopMining);
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_zero_length_scripts() {
        assert!(ScriptedInputPlayer::from_json(r#"{"steps": []}"#).is_err());
        assert!(ScriptedInputPlayer::from_json(r#"{"steps": [{"ticks": 0}]}"#).is_err());
        assert!(ScriptedInputPlayer::from_json(r#"{"steps": [{"ticks": 2, "move": "up"}]}"#).is_err());
    }

    #[test]
    fn held_and_one_shot_inputs() {
        let mut player = ScriptedInputPlayer::from_json(
            r#"{"steps": [
                {"ticks": 2, "move": "right", "jump": true, "select_slot": 3, "toggle_inventory": true},
                {"ticks": 1, "place": [4, 5]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(player.total_ticks(), 3);

        let first = player.advance();
        assert_eq!(
            first.intents,
            vec![
                Intent::MoveRight,
                Intent::Jump,
                Intent::SelectSlot { slot: 3 },
                Intent::ToggleInventoryView,
            ]
        );
        let second = player.advance();
        assert_eq!(second.intents, vec![Intent::MoveRight, Intent::Jump]);

        let third = player.advance();
        let target = TilePos::new(4, 5);
        assert_eq!(third.intents, vec![Intent::PlaceBlock { target }]);
        assert_eq!(third.pointer, Some(target));
        assert!(player.is_finished());
        assert_eq!(player.advance(), TickInput::default());
    }

    #[test]
    fn mining_edges_become_start_and_stop() {
        let mut player = ScriptedInputPlayer::from_json(
            r#"{"steps": [
                {"ticks": 2, "mine": [1, 1]},
                {"ticks": 1, "mine": [2, 1]},
                {"ticks": 1}
            ]}"#,
        )
        .unwrap();

        let a = TilePos::new(1, 1);
        let b = TilePos::new(2, 1);
        let press = player.advance();
        assert_eq!(press.intents, vec![Intent::StartMining { target: a }]);
        assert!(press.primary_held);
        assert_eq!(press.pointer, Some(a));

        let hold = player.advance();
        assert!(hold.intents.is_empty());
        assert!(hold.primary_held);

        let retarget = player.advance();
        assert_eq!(retarget.intents, vec![Intent::StartMining { target: b }]);

        let release = player.advance();
        assert_eq!(release.intents, vec![Intent::StopMining]);
        assert!(!release.primary_held);
    }
}
