// src/services/assembler.rs

//! Record assembler.

use crate::models::{CharacterRecord, ResolvedCharacter, ResolvedReferences};

/// Merge a character's scalars with its resolved references into one row.
pub fn assemble(
    record: CharacterRecord,
    references: ResolvedReferences,
    id: i32,
) -> ResolvedCharacter {
    ResolvedCharacter {
        id,
        birth_year: record.birth_year,
        eye_color: record.eye_color,
        films: references.films,
        gender: record.gender,
        hair_color: record.hair_color,
        height: record.height,
        homeworld: references.homeworld,
        mass: record.mass,
        name: record.name,
        skin_color: record.skin_color,
        species: references.species,
        starships: references.starships,
        vehicles: references.vehicles,
    }
}
