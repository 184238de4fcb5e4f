//! Seeded team generator.
//!
//! Builds a full nine-man team with abilities drawn uniformly from 40 to 69,
//! the range a freshly recruited player starts in. The same name and seed
//! always produce the same team.

use koshien_core::roster::{
    Abilities, Condition, PitchingAbilities, PlayerId, Position, RosterSnapshot, TeamSnapshot,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lowest generated ability.
pub const ABILITY_FLOOR: u8 = 40;
/// Highest generated ability.
pub const ABILITY_CEILING: u8 = 69;

const SURNAMES: [&str; 24] = [
    "Sato", "Suzuki", "Takahashi", "Tanaka", "Ito", "Watanabe", "Yamamoto", "Nakamura",
    "Kobayashi", "Kato", "Yoshida", "Yamada", "Sasaki", "Yamaguchi", "Matsumoto", "Inoue",
    "Kimura", "Hayashi", "Shimizu", "Yamazaki", "Mori", "Abe", "Ikeda", "Hashimoto",
];

const GIVEN_NAMES: [&str; 16] = [
    "Haruto", "Sota", "Yuto", "Ren", "Riku", "Kaito", "Daiki", "Shota", "Kenta", "Takumi",
    "Yuma", "Sho", "Ryo", "Hayato", "Kota", "Daichi",
];

fn ability(rng: &mut ChaCha8Rng) -> u8 {
    rng.gen_range(ABILITY_FLOOR..=ABILITY_CEILING)
}

fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Generate a valid team for `name` from `seed`.
///
/// Player ids are `{slug}-{n}` where the slug is the lower-cased team name.
/// The batting order is shuffled, so the pitcher does not always bat first.
#[must_use]
pub fn generate_team(name: &str, seed: u64) -> TeamSnapshot {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let prefix = slug(name);

    let players: Vec<RosterSnapshot> = Position::ALL
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            let surname = SURNAMES[rng.gen_range(0..SURNAMES.len())];
            let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
            let abilities = Abilities {
                batting: ability(&mut rng),
                power: ability(&mut rng),
                running: ability(&mut rng),
                throwing: ability(&mut rng),
                fielding: ability(&mut rng),
            };
            let pitching = (position == Position::Pitcher).then(|| PitchingAbilities {
                pitching: ability(&mut rng),
                control: ability(&mut rng),
                stamina: ability(&mut rng),
            });
            RosterSnapshot {
                id: PlayerId::new(format!("{prefix}-{}", i + 1)),
                name: format!("{given} {surname}"),
                position,
                abilities,
                pitching,
                condition: Condition::default(),
            }
        })
        .collect();

    let mut batting_order: Vec<PlayerId> = players.iter().map(|p| p.id.clone()).collect();
    batting_order.shuffle(&mut rng);

    tracing::debug!(team = name, seed, "Generated team");

    TeamSnapshot {
        name: name.to_string(),
        starting_pitcher: players[0].id.clone(),
        players,
        batting_order,
    }
}
