use cavern_core::{
    Behavior, Entity, EntityId, EntityTemplate, GameEngine, Map, Position, Tick, TileGrid,
    TurnAction, TurnError, TurnRecord,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn arena() -> (Map, EntityId, EntityId, EntityId) {
    let grid = TileGrid::from_rows(&[
        "#######", //
        "#.....#", //
        "#.....#", //
        "#######",
    ]);
    let player = Entity::from_template(&EntityTemplate::player()).at(Position::new(1, 1));
    let mut map = Map::with_spawn(grid, player).unwrap();
    let player = map.player().unwrap().id();

    let bat = EntityTemplate::new("bat", 'B')
        .with_speed(200)
        .with_behavior(Behavior::Wanderer);
    let fungus = EntityTemplate::new("fungus", 'F').with_speed(50);
    let bat = map
        .add_entity(Entity::from_template(&bat).at(Position::new(5, 2)))
        .unwrap();
    let fungus = map
        .add_entity(Entity::from_template(&fungus).at(Position::new(3, 2)))
        .unwrap();

    (map, player, bat, fungus)
}

fn actors(records: &[TurnRecord]) -> Vec<EntityId> {
    records.iter().map(|record| record.entity).collect()
}

#[test]
fn turns_follow_speed_order_across_unlocks() {
    let (mut map, player, bat, fungus) = arena();
    let mut rng = StdRng::seed_from_u64(9);
    let mut engine = GameEngine::new(&mut map, &mut rng);

    // Delays: bat 3600, player 7200, fungus 14400.
    let first = engine.start().unwrap();
    assert_eq!(actors(&first), vec![bat, player]);
    assert_eq!(first.last().map(|r| r.clock), Some(Tick(7200)));

    let second = engine.unlock().unwrap();
    assert_eq!(actors(&second), vec![bat, bat, fungus, player]);
    assert_eq!(second.last().map(|r| r.clock), Some(Tick(14400)));
    assert_eq!(second[2].action, TurnAction::Waited);
}

#[test]
fn nothing_runs_while_locked() {
    let (mut map, _, bat, _) = arena();
    let mut rng = StdRng::seed_from_u64(9);
    GameEngine::new(&mut map, &mut rng).start().unwrap();

    let clock = map.scheduler().clock();
    let bat_position = map.entity(bat).unwrap().position();
    let upcoming = map.scheduler().upcoming(4);

    // Player input happens here; the map is freely inspectable and nothing
    // advances until the next unlock.
    assert!(map.scheduler().is_locked());
    assert_eq!(map.scheduler().clock(), clock);
    assert_eq!(map.entity(bat).unwrap().position(), bat_position);
    assert_eq!(map.scheduler().upcoming(4), upcoming);

    let resumed = GameEngine::new(&mut map, &mut rng).unlock().unwrap();
    assert_eq!(actors(&resumed), upcoming);
}

#[test]
fn unlock_is_accepted_each_time_dispatch_locks_again() {
    let (mut map, _, _, _) = arena();
    let mut rng = StdRng::seed_from_u64(1);
    let mut engine = GameEngine::new(&mut map, &mut rng);

    engine.start().unwrap();
    engine.unlock().unwrap();
    // Dispatch locked again on the player, so a second unlock is legal.
    assert!(engine.unlock().is_ok());
    assert_eq!(engine.start(), Err(TurnError::AlreadyStarted));
}

#[test]
fn removing_the_player_stops_dispatch() {
    let (mut map, player, _, _) = arena();
    let mut rng = StdRng::seed_from_u64(1);
    GameEngine::new(&mut map, &mut rng).start().unwrap();

    map.remove_entity(player).unwrap();

    assert_eq!(
        GameEngine::new(&mut map, &mut rng).unlock(),
        Err(TurnError::NoHumanActor)
    );
}

#[test]
fn wanderers_stay_on_floor_and_never_overlap() {
    let (mut map, _, _, _) = arena();
    let mut rng = StdRng::seed_from_u64(77);
    let mut engine = GameEngine::new(&mut map, &mut rng);
    engine.start().unwrap();
    for _ in 0..50 {
        engine.unlock().unwrap();
    }

    let positions: Vec<Position> = map.entities().iter().map(Entity::position).collect();
    for (index, position) in positions.iter().enumerate() {
        assert!(map.tile(*position).is_walkable(), "{position}");
        assert!(!positions[index + 1..].contains(position), "{position}");
    }
}
