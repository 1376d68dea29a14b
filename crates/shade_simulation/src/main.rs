//! Headless симуляция SHADE
//!
//! Враг бродит по полу, игрок стоит за стеной, потом выходит из-за неё.
//! Печатает переходы Roaming ⇄ Chasing.

use bevy::prelude::*;
use shade_simulation::{
    create_headless_app, spawn_enemy, spawn_player, BehaviorChanged, EnemyProfile, NavMesh, NavRect,
    RoamChaseController, SightBlocker, SimulationPlugin,
};

fn main() {
    let seed = 42;
    println!("Starting SHADE headless simulation (seed: {})", seed);

    let profile = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match EnemyProfile::from_json_str(&json) {
                Ok(profile) => profile,
                Err(err) => {
                    eprintln!("Invalid enemy profile {}: {}", path, err);
                    std::process::exit(1);
                }
            },
            Err(err) => {
                eprintln!("Cannot read {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => EnemyProfile::default(),
    };

    let mut app = create_headless_app(seed);
    app.insert_resource(NavMesh::default().with_area(NavRect::square(Vec2::ZERO, 30.0, 0.0)))
        .add_plugins(SimulationPlugin::default());

    let (enemy, player) = {
        let mut commands = app.world_mut().commands();

        let enemy = spawn_enemy(&mut commands, &profile, Transform::from_xyz(0.0, 0.0, 0.0));
        let player = spawn_player(&mut commands, Vec3::new(0.0, 0.0, -8.0));
        commands.spawn((
            Name::new("Wall"),
            Transform::from_xyz(0.0, 1.5, -4.0),
            SightBlocker::cuboid(Vec3::new(3.0, 1.5, 0.2)),
        ));
        (enemy, player)
    };
    app.world_mut().flush();

    for tick in 0..1200 {
        // Через 5 секунд игрок выходит из-за стены
        if tick == 300 {
            if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
                transform.translation = Vec3::new(6.0, 0.0, -6.0);
            }
        }

        app.update();

        let changes: Vec<BehaviorChanged> = app
            .world_mut()
            .resource_mut::<Events<BehaviorChanged>>()
            .drain()
            .collect();
        for change in changes {
            println!("Tick {}: {:?} {:?} → {:?}", tick, change.entity, change.from, change.to);
        }

        if tick % 120 == 0 {
            if let Some(controller) = app.world().get::<RoamChaseController>(enemy) {
                println!("Tick {}: enemy state {:?}", tick, controller.state());
            }
        }
    }

    println!("Simulation complete!");
}
