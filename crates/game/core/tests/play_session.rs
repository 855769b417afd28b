use cavern_core::{
    Behavior, CellBuffer, Dimensions, EntityCatalog, EntityTemplate, GameConfig, InputEvent, Key,
    PlayScreen, ScreenContext, ScreenController, ScreenKind, Tile, compute_origin, terrain,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn small_config(seed: u64) -> GameConfig {
    GameConfig {
        map_width: 80,
        map_height: 50,
        screen_width: 30,
        screen_height: 12,
        creature_count: 8,
        ..GameConfig::default()
    }
    .with_seed(seed)
}

fn catalog() -> EntityCatalog {
    let mut catalog = EntityCatalog::default();
    catalog.creatures.define(
        "bat",
        EntityTemplate::new("bat", 'B')
            .with_speed(200)
            .with_behavior(Behavior::Wanderer),
    );
    catalog
        .creatures
        .define("fungus", EntityTemplate::new("fungus", 'F').with_speed(50));
    catalog
}

#[test]
fn generated_terrain_is_only_floor_and_wall() {
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(2024);

    let grid = terrain::generate(200, 120, &config.terrain, &mut rng);

    assert_eq!(grid.dimensions(), Dimensions::new(200, 120));
    assert!(grid.iter().all(|(_, tile)| tile != Tile::Null));
    assert!(grid.iter().any(|(_, tile)| tile == Tile::Floor));
}

#[test]
fn same_seed_builds_the_same_world() {
    let config = small_config(5);
    let a = PlayScreen::new(&config, &catalog(), 42).unwrap();
    let b = PlayScreen::new(&config, &catalog(), 42).unwrap();

    assert_eq!(a.map().grid(), b.map().grid());
    assert_eq!(a.map().entities(), b.map().entities());
}

#[test]
fn player_movement_is_gated_by_terrain() {
    let config = small_config(5);
    let mut screen = PlayScreen::new(&config, &catalog(), 7).unwrap();
    screen.start().unwrap();

    for (dx, dy) in [(1, 0), (0, 1), (-1, 0), (0, -1)].into_iter().cycle().take(40) {
        let before = screen.focus();
        let target = before.offset(dx, dy);
        let free =
            screen.map().tile(target).is_walkable() && screen.map().entity_at(target).is_none();

        let moved = screen.move_player(dx, dy).is_moved();

        assert_eq!(moved, free);
        assert_eq!(screen.focus(), if moved { target } else { before });
        screen.unlock().unwrap();
    }
}

#[test]
fn render_matches_the_viewport_window() {
    let config = small_config(5);
    let mut screen = PlayScreen::new(&config, &catalog(), 3).unwrap();
    screen.start().unwrap();
    let mut buffer = CellBuffer::new(config.screen_dimensions());

    screen.render(&mut buffer);

    let focus = screen.focus();
    let origin = compute_origin(focus.x, focus.y, 80, 50, 30, 12);
    assert_eq!(screen.viewport().origin(), origin);

    let (px, py) = screen.viewport().to_screen(focus).unwrap();
    assert_eq!(buffer.glyph(px, py).map(|g| g.ch), Some('@'));

    for entity in screen.map().entities() {
        let visible = screen.viewport().contains(entity.position());
        let drawn = screen
            .viewport()
            .to_screen(entity.position())
            .and_then(|(x, y)| buffer.glyph(x, y))
            .map(|g| g.ch);
        assert_eq!(drawn.is_some(), visible);
    }
}

#[test]
fn full_session_from_start_to_lose() {
    let mut controller =
        ScreenController::new(ScreenContext::new(small_config(99), catalog())).unwrap();

    let keys = [
        Key::Enter,
        Key::Right,
        Key::Down,
        Key::Char('z'),
        Key::Left,
        Key::Up,
        Key::Escape,
    ];
    let kinds: Vec<ScreenKind> = keys
        .into_iter()
        .map(|key| controller.handle_input(InputEvent::KeyDown(key)).unwrap())
        .collect();

    assert_eq!(kinds[0], ScreenKind::Play);
    assert!(kinds[1..6].iter().all(|kind| *kind == ScreenKind::Play));
    assert_eq!(kinds[6], ScreenKind::Lose);
    assert!(controller.screen().as_play().is_none());
}
