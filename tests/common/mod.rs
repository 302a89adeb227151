// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

bitpacker::message! {
    #[version = "1.0.0"]
    pub struct Vec3 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }
}

bitpacker::message! {
    #[version = "1.0.0"]
    pub struct Item {
        pub id: i32,
        pub name: String,
        pub value: i32,
        pub weight: f32,
        pub rarity: String,
    }
}

bitpacker::message! {
    #[version = "1.0.0"]
    pub struct Character {
        pub name: String,
        pub level: i32,
        pub hp: i32,
        pub mp: i32,
        pub is_alive: bool,
        pub position: Vec3,
        pub skills: Vec<i32>,
        pub inventory: Vec<Item>,
    }
}

bitpacker::message! {
    #[version = "1.0.0"]
    pub struct Guild {
        pub name: String,
        pub description: String,
        pub members: Vec<Character>,
    }
}

bitpacker::message! {
    #[version = "1.0.0"]
    pub struct WorldState {
        pub world_id: i32,
        pub seed: String,
        pub guilds: Vec<Guild>,
        pub loot_table: Vec<Item>,
    }
}

/// Get the path to a test fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The game schema as `.buff` text.
pub fn game_schema_text() -> String {
    std::fs::read_to_string(fixture_path("game.buff")).expect("read game.buff")
}

fn item(id: i32, name: &str, value: i32, weight: f32, rarity: &str) -> Item {
    Item {
        id,
        name: name.to_string(),
        value,
        weight,
        rarity: rarity.to_string(),
    }
}

/// The world shared by every language target's conformance test.
pub fn cross_lang_world() -> WorldState {
    let hero = Character {
        name: "TestHero".to_string(),
        level: 99,
        hp: 1000,
        mp: 500,
        is_alive: true,
        position: Vec3 {
            x: 10.0,
            y: -20.0,
            z: 30.0,
        },
        skills: vec![1, 2, 3, 100],
        inventory: vec![item(1, "Excalibur", 9999, 15.0, "Legendary")],
    };

    WorldState {
        world_id: 42,
        seed: "cross_lang_test".to_string(),
        guilds: vec![Guild {
            name: "TestGuild".to_string(),
            description: "A test guild for cross-language".to_string(),
            members: vec![hero],
        }],
        loot_table: vec![item(2, "HealthPotion", 50, 1.0, "Common")],
    }
}

/// A larger world with several guilds, for size and growth checks.
pub fn crowded_world(guilds: usize, members: usize) -> WorldState {
    let mut world = WorldState {
        world_id: 7,
        seed: "crowded".to_string(),
        ..Default::default()
    };
    for g in 0..guilds {
        let mut guild = Guild {
            name: format!("Guild{g}"),
            description: "generated".to_string(),
            members: Vec::with_capacity(members),
        };
        for m in 0..members {
            let n = (g * members + m) as i32;
            guild.members.push(Character {
                name: format!("Member{n}"),
                level: n % 100,
                hp: n * 10,
                mp: -n,
                is_alive: n % 2 == 0,
                position: Vec3 {
                    x: n as f32 * 0.5,
                    y: -(n as f32),
                    z: 1.25,
                },
                skills: (0..(n % 5)).collect(),
                inventory: vec![item(n, "Dagger", 10, 2.5, "Common")],
            });
        }
        world.guilds.push(guild);
    }
    world
}
