//! Infinite Fusion helpers.
use crate::state::{CombatantRecord, StatsTable};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FusionParts {
    pub head: String,
    pub body: String,
}

/// Head and body species of a fused combatant, if it is one.
pub fn fusion_part_names(record: &CombatantRecord) -> Option<FusionParts> {
    let body = record.fusion_body.clone()?;
    Some(FusionParts {
        head: record.species_forme.clone(),
        body,
    })
}

/// Fused base stats: the body dominates atk/def/spe, the head hp/spa/spd.
pub fn fuse_base_stats(head: &StatsTable, body: &StatsTable) -> StatsTable {
    // floor(2a/3 + b/3), computed on the integer sum
    let fuse = |primary: u16, secondary: u16| -> u16 {
        let fused = (2 * u32::from(primary) + u32::from(secondary)) / 3;
        u16::try_from(fused).unwrap_or(u16::MAX)
    };

    StatsTable {
        hp: fuse(head.hp, body.hp),
        atk: fuse(body.atk, head.atk),
        def: fuse(body.def, head.def),
        spa: fuse(head.spa, body.spa),
        spd: fuse(head.spd, body.spd),
        spe: fuse(body.spe, head.spe),
    }
}
