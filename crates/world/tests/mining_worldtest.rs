//! End-to-end mining and placement scenarios driven through `Simulation::step`.

use glam::IVec2;
use tilecraft_core::Rgb;
use tilecraft_physics::Aabb;
use tilecraft_world::{
    AbortReason, Intent, Player, SimEvent, SimSettings, Simulation, TickInput, TilePos, WorldGrid,
};

const TARGET: TilePos = TilePos::new(2, 2);

/// A world holding one `block` at [`TARGET`] and a player (far away) holding
/// `held` in slot 0.
fn scenario(block: &str, held: Option<&str>) -> Simulation {
    let mut world = WorldGrid::default();
    let nowhere = Aabb::new(IVec2::new(-10_000, -10_000), IVec2::ONE);
    assert!(world.place(TARGET, block, &nowhere));
    let mut player = Player::new(IVec2::new(5_000, 0), IVec2::new(25, 57), 10, Rgb(255, 0, 0));
    if let Some(item) = held {
        assert!(player.collect_item(item, 1));
    }
    Simulation::new(world, player, SimSettings::default())
}

fn press(target: TilePos) -> TickInput {
    TickInput {
        intents: vec![Intent::StartMining { target }],
        pointer: Some(target),
        primary_held: true,
    }
}

fn hold(target: TilePos) -> TickInput {
    TickInput {
        pointer: Some(target),
        primary_held: true,
        ..TickInput::default()
    }
}

fn mined(events: &[SimEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, SimEvent::BlockMined { .. }))
}

/// Hold primary on [`TARGET`] for up to `limit` ticks; returns the tick count
/// at which the block broke.
fn ticks_to_break(sim: &mut Simulation, limit: u32) -> Option<u32> {
    if mined(&sim.step(&press(TARGET))) {
        return Some(1);
    }
    for n in 2..=limit {
        if mined(&sim.step(&hold(TARGET))) {
            return Some(n);
        }
    }
    None
}

#[test]
fn wooden_pickaxe_mines_stone_in_225_ticks() {
    let mut sim = scenario("stone", Some("wooden_pickaxe"));
    sim.step(&press(TARGET));
    for _ in 0..223 {
        assert!(!mined(&sim.step(&hold(TARGET))));
    }
    assert!(sim.world().get(TARGET).is_some());
    assert!(sim.mining_progress() < 7.5);

    let events = sim.step(&hold(TARGET));
    assert!(events.contains(&SimEvent::BlockMined {
        target: TARGET,
        block: "stone".into(),
        credited: true,
    }));
    assert!(sim.world().get(TARGET).is_none());
    assert_eq!(sim.player().inventory.count("stone"), 1);
    assert_eq!(sim.player().inventory.count("wooden_pickaxe"), 1);
}

#[test]
fn bare_hand_never_breaks_stone() {
    let mut sim = scenario("stone", None);
    assert_eq!(ticks_to_break(&mut sim, 2_000), None);
    assert!(sim.world().get(TARGET).is_some());
    assert!(sim.player().mining.is_active());
    assert_eq!(sim.mining_progress(), 0.0);
}

#[test]
fn under_tier_pickaxe_stalls_on_iron() {
    let mut sim = scenario("iron_ore", Some("wooden_pickaxe"));
    assert_eq!(ticks_to_break(&mut sim, 2_000), None);
    assert!(sim.world().get(TARGET).is_some());
}

#[test]
fn higher_tier_pickaxe_gets_full_speed_on_lower_tier_block() {
    // coal_ore: hardness 10, tier 1; stone_pickaxe: tier 2, x4.
    let mut sim = scenario("coal_ore", Some("stone_pickaxe"));
    assert_eq!(ticks_to_break(&mut sim, 1_000), Some(150));
}

#[test]
fn wrong_tool_on_hand_breakable_block_is_slow() {
    // dirt: hardness 1, shovel preferred; a pickaxe mines at a quarter speed.
    let mut sim = scenario("dirt", Some("wooden_pickaxe"));
    assert_eq!(ticks_to_break(&mut sim, 1_000), Some(240));
}

#[test]
fn placeable_item_in_hand_mines_like_bare_hand() {
    let mut sim = scenario("dirt", Some("stone"));
    assert_eq!(ticks_to_break(&mut sim, 1_000), Some(60));
}

#[test]
fn moving_the_pointer_aborts_the_session() {
    let mut sim = scenario("dirt", None);
    sim.step(&press(TARGET));
    let events = sim.step(&hold(TilePos::new(9, 9)));
    assert_eq!(
        events,
        vec![SimEvent::MiningAborted {
            target: TARGET,
            reason: AbortReason::PointerMoved,
        }]
    );
    assert!(!sim.player().mining.is_active());

    // Coming back starts from zero.
    assert_eq!(ticks_to_break(&mut sim, 1_000), Some(60));
}

#[test]
fn target_removed_mid_session_aborts() {
    let mut sim = scenario("dirt", None);
    sim.step(&press(TARGET));
    sim.world_mut().remove(TARGET);
    let events = sim.step(&hold(TARGET));
    assert_eq!(
        events,
        vec![SimEvent::MiningAborted {
            target: TARGET,
            reason: AbortReason::TargetVanished,
        }]
    );
}

#[test]
fn full_inventory_still_removes_mined_block() {
    let mut sim = scenario("leaves", None);
    for (i, item) in [
        "dirt", "stone", "grass", "coal_ore", "iron_ore", "wood_log", "a", "b", "c", "d",
    ]
    .iter()
    .enumerate()
    {
        assert!(sim.player_mut().collect_item(item, 1), "slot {i}");
    }
    // Selected slot 0 holds dirt, which mines like a hand: leaves need 30 ticks.
    let mut events = sim.step(&press(TARGET));
    for _ in 1..30 {
        events = sim.step(&hold(TARGET));
    }
    assert!(events.contains(&SimEvent::BlockMined {
        target: TARGET,
        block: "leaves".into(),
        credited: false,
    }));
    assert!(sim.world().get(TARGET).is_none());
    assert_eq!(sim.player().inventory.count("leaves"), 0);
}

#[test]
fn placing_into_the_players_box_fails() {
    let mut world = WorldGrid::default();
    let nowhere = Aabb::new(IVec2::new(-10_000, -10_000), IVec2::ONE);
    for col in 0..4 {
        assert!(world.place(TilePos::new(col, 5), "stone", &nowhere));
    }
    // Standing on row 5: occupies y 103..160, x 40..65 (cols 1..2, rows 3..4).
    let mut player = Player::new(IVec2::new(40, 103), IVec2::new(25, 57), 10, Rgb(255, 0, 0));
    player.collect_item("stone", 3);
    let mut sim = Simulation::new(world, player, SimSettings::default());

    let blocked = TilePos::new(1, 4);
    let events = sim.step(&TickInput {
        intents: vec![Intent::PlaceBlock { target: blocked }],
        ..TickInput::default()
    });
    assert!(events.is_empty() || !matches!(events[0], SimEvent::BlockPlaced { .. }));
    assert!(sim.world().get(blocked).is_none());
    assert_eq!(sim.player().inventory.count("stone"), 3);

    let free = TilePos::new(3, 4);
    let events = sim.step(&TickInput {
        intents: vec![Intent::PlaceBlock { target: free }],
        ..TickInput::default()
    });
    assert_eq!(
        events[0],
        SimEvent::BlockPlaced {
            target: free,
            block: "stone".into(),
        }
    );
    assert_eq!(sim.player().inventory.count("stone"), 2);
}

#[test]
fn placed_block_blocks_walking() {
    let mut world = WorldGrid::default();
    let nowhere = Aabb::new(IVec2::new(-10_000, -10_000), IVec2::ONE);
    for col in 0..8 {
        assert!(world.place(TilePos::new(col, 5), "stone", &nowhere));
    }
    let mut player = Player::new(IVec2::new(40, 103), IVec2::new(25, 57), 10, Rgb(255, 0, 0));
    player.collect_item("dirt", 1);
    let mut sim = Simulation::new(world, player, SimSettings::default());

    sim.step(&TickInput {
        intents: vec![Intent::PlaceBlock {
            target: TilePos::new(3, 4),
        }],
        ..TickInput::default()
    });
    for _ in 0..10 {
        sim.step(&TickInput {
            intents: vec![Intent::MoveRight],
            ..TickInput::default()
        });
    }
    // Wall at x = 96; player is 25 px wide.
    assert_eq!(sim.player().rect().min.x, 71);
    assert!(sim.player().body.grounded);
}
