use crate::dex::is_toggled;
use crate::env::{Format, MoveOracle};
use crate::feed::{DetailsInfo, PrivateView, PublicView};
use crate::reconcile::IdentityKey;
use crate::state::{BoostTable, CombatantRecord, MAX_MOVES, SideId, Status};
use crate::util::normalize_ident;

/// Read-only inputs shared by every merge of one roster pass.
#[derive(Clone, Copy)]
pub struct MergeContext<'a> {
    pub side: SideId,
    pub slot: usize,
    pub format: &'a Format,
    pub moves: &'a dyn MoveOracle,
}

/// Folds a fresh observation into the previously known record.
///
/// Precedence is private view, then public view, then `previous`. An
/// attribute absent from both views keeps its previous value. `key` is only
/// used when there is no previous record; an existing record keeps its key.
pub fn merge_combatant(
    previous: Option<&CombatantRecord>,
    key: IdentityKey,
    public: &PublicView,
    private: Option<&PrivateView>,
    ctx: &MergeContext<'_>,
) -> CombatantRecord {
    let mut record = match previous {
        Some(previous) => previous.clone(),
        None => CombatantRecord::from_public(public, key, ctx.slot, ctx.side),
    };

    merge_identity(&mut record, public, private);
    merge_condition(&mut record, public, private);
    merge_equipment(&mut record, public, private, ctx);

    for name in &public.revealed_moves {
        record.move_state.reveal(name);
    }

    if let Some(volatiles) = &public.volatiles {
        record.volatiles = volatiles.clone();
    }

    if let Some(boosts) = &public.boosts {
        record.boosts = BoostTable::from_sparse(boosts);
        let observed = record.boosts;
        record
            .dirty_boosts
            .retain(|&stat, &mut stage| observed.get(stat) != stage);
    }

    record.ability_toggled = record
        .ability
        .as_deref()
        .is_some_and(|ability| is_toggled(ability, &record.volatiles));

    record
}

fn merge_identity(record: &mut CombatantRecord, public: &PublicView, private: Option<&PrivateView>) {
    if !public.ident.is_empty() {
        record.ident = normalize_ident(&public.ident);
    }
    overwrite(
        &mut record.searchid,
        private
            .and_then(|p| p.searchid.clone())
            .or_else(|| public.searchid.clone()),
    );
    if let Some(name) = private
        .and_then(|p| p.name.clone())
        .or_else(|| public.name.clone())
    {
        record.name = name;
    }

    let details = private
        .and_then(|p| p.details.clone())
        .or_else(|| public.details.clone());
    let info = details
        .as_deref()
        .map(DetailsInfo::parse)
        .unwrap_or_default();
    overwrite(&mut record.details, details);

    if let Some(species) = private
        .map(|p| p.species_forme.clone())
        .filter(|species| !species.is_empty())
        .or_else(|| public.species_forme.clone())
        .or(info.species)
    {
        record.species_forme = species;
    }

    if let Some(level) = private
        .and_then(|p| p.level)
        .or(public.level)
        .or(info.level)
    {
        record.level = level;
    }
    if let Some(gender) = private
        .and_then(|p| p.gender)
        .or(public.gender)
        .or(info.gender)
    {
        record.gender = gender;
    }
    if let Some(shiny) = private
        .and_then(|p| p.shiny)
        .or(public.shiny)
        .or(info.shiny.then_some(true))
    {
        record.shiny = shiny;
    }
    overwrite(&mut record.fusion_body, info.fusion_body);
}

fn merge_condition(record: &mut CombatantRecord, public: &PublicView, private: Option<&PrivateView>) {
    if let Some(hp) = private.and_then(|p| p.hp).or(public.hp) {
        record.hp = hp;
    }
    if let Some(max_hp) = private.and_then(|p| p.max_hp).or(public.max_hp) {
        record.max_hp = max_hp;
    }
    match private.and_then(|p| p.status).or(public.status) {
        Some(Status::Healthy) => record.status = None,
        Some(status) => record.status = Some(status),
        None => {}
    }
    if let Some(fainted) = private.and_then(|p| p.fainted).or(public.fainted) {
        record.fainted = fainted;
    }
    overwrite(
        &mut record.tera_type,
        private
            .and_then(|p| p.tera_type.clone())
            .or_else(|| public.tera_type.clone()),
    );
    if let Some(stats) = private.and_then(|p| p.stats) {
        record.stats = Some(stats);
    }
}

fn merge_equipment(
    record: &mut CombatantRecord,
    public: &PublicView,
    private: Option<&PrivateView>,
    ctx: &MergeContext<'_>,
) {
    if ctx.format.has_abilities() {
        overwrite(
            &mut record.ability,
            private
                .and_then(|p| p.ability.clone())
                .or_else(|| public.ability.clone()),
        );
        overwrite(
            &mut record.base_ability,
            private
                .and_then(|p| p.base_ability.clone())
                .or_else(|| public.base_ability.clone()),
        );
    }

    if ctx.format.has_items() {
        overwrite(
            &mut record.item,
            private
                .and_then(|p| p.item.clone())
                .or_else(|| public.item.clone()),
        );
        overwrite(&mut record.prev_item, public.prev_item.clone());
    }

    if let Some(private) = private.filter(|p| !p.moves.is_empty()) {
        record.moves = private
            .moves
            .iter()
            .take(MAX_MOVES)
            .map(|id| ctx.moves.display_name(id))
            .collect();
    }
}

fn overwrite<T>(slot: &mut Option<T>, observed: Option<T>) {
    if observed.is_some() {
        *slot = observed;
    }
}
