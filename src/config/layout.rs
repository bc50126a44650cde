//! # Static Scene Layout
//!
//! The fork-shaped path template, its macro vocabulary and the scripted
//! content attached to each landmark. Everything here is fixed at build time.

use crate::game::TileId;

/// Tile drawn wherever the map has nothing else (grass).
pub const BACKGROUND_TILE: TileId = 58;

/// Centre-of-path tile; marks the spawn cell and the building anchors.
pub const SPAWN_TILE: TileId = 14;

/// Tile images are looked up as `tiles/tile{1..=TILE_COUNT}.png`.
pub const TILE_COUNT: TileId = 58;

/// Compact description of the scene. Numeric tokens are tile identifiers,
/// upper-case tokens are expanded through [`TEMPLATE_MACROS`].
pub const BASE_TEMPLATE: &[&str] = &[
    "58 PATH 58 PATH 58 PATH 58",
    "58 PATH 58 PATH 58 PATH 58",
    "58 PATH 58 PATH 58 PATH 58",
    "58 TWENRIGHT 20 TWENONELEFT 20 TWENONELEFTTWO 58",
    "58 23 2 2 2 LEFT_PATH 2 2 2 24",
    "58 58 58 58 58 PATH 58 58 58",
    "58 58 58 58 58 DOWNPATH 58 58 58",
];

/// Placeholder tokens and the tile runs they stand for.
pub const TEMPLATE_MACROS: &[(&str, &[TileId])] = &[
    ("PATH", &[12, 14, 10]),
    ("LEFT_PATH", &[3, 14, 1]),
    ("TWENRIGHT", &[12, 14, 19]),
    ("TWENONELEFT", &[21, 14, 19]),
    ("TWENONELEFTTWO", &[21, 14, 10]),
    ("DOWNPATH", &[23, 2, 22]),
];

/// Idle spritesheet, one row per direction.
pub const IDLE_SHEET: &str = "Unarmed_Idle_without_shadow.png";

/// Run spritesheet, one row per direction.
pub const RUN_SHEET: &str = "Unarmed_Run_without_shadow.png";

/// A building, the NPC standing in front of it and what the NPC says.
#[derive(Debug, Clone, Copy)]
pub struct Landmark {
    /// Name shared by the building, its NPC and the dialogue target
    pub name: &'static str,
    /// Building image file
    pub building_file: &'static str,
    /// NPC image file
    pub npc_file: &'static str,
    /// Building visual size in tiles (width, height)
    pub size_in_tiles: (f32, f32),
    /// Scripted dialogue, one entry per interact press
    pub lines: &'static [&'static str],
}

/// Landmarks in enumeration order. Placement is left to right along the top
/// of the fork and this order also breaks proximity ties.
pub static LANDMARKS: [Landmark; 3] = [
    Landmark {
        name: "cathedral",
        building_file: "cathedral.png",
        npc_file: "priest.png",
        size_in_tiles: (1.5, 1.7),
        lines: &[
            "Bonjour ! Je suis chrétien.",
            "Chaque matin, je viens prier.",
            "J'aime chanter à la chorale.",
            "Ensuite, l'après-midi, je vais au marché et je joue aux jeux vidéos",
        ],
    },
    Landmark {
        name: "mosque",
        building_file: "mosque.png",
        npc_file: "muslim.png",
        size_in_tiles: (1.7, 1.7),
        lines: &[
            "Salam ! Je suis musulman.",
            "Je viens ici cinq fois par jour.",
            "Après la prière, je partage le thé.",
            "Ensuite, l'après-midi, je joue aux jeux vidéos et je vais à la piscine.",
        ],
    },
    Landmark {
        name: "synagogue",
        building_file: "synagogue.png",
        npc_file: "rabbi.png",
        size_in_tiles: (1.6, 1.8),
        lines: &[
            "Shalom ! Je suis juif.",
            "J'étudie la Torah ici chaque matin.",
            "Le samedi, je célèbre le Shabbat.",
            "Ensuite, l'après-midi, je vais à la piscine et je vais au marché.",
        ],
    },
];

/// Summary shown once every NPC has been talked to.
pub const JOURNAL_TEXT: &[&str] = &[
    "Après avoir parlé aux trois fidèles des différentes religions canoniques,",
    "Tu réalises que, malgré leurs différences, ils partagent les même passions et les même passe-temps.",
    "Respect, paix et compréhension - voilà ton véritable chemin.",
];
