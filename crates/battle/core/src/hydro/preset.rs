use core::str::FromStr;

use crate::dex::Nature;
use crate::env::{Format, LATEST_GENERATION};
use crate::hydro::CodecError;
use crate::state::{Alt, CombatantRecord, Gender, StatsTable};

/// Delimiter between `opcode~value` pairs.
pub const DEFAULT_DELIMITER: char = ',';

const ARRAY_DELIMITER: char = '/';
const USAGE_DELIMITER: char = '@';
const PAIR_SEPARATOR: char = '~';

/// Preset attribute opcodes, in emission order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Opcode {
    /// Calc id
    Cid,
    /// Source
    Src,
    /// Preset name
    Nom,
    /// Player name
    Pln,
    /// Format
    Fmt,
    /// Nickname
    Nkn,
    /// Usage
    Usg,
    /// Species forme
    Fme,
    Lvl,
    Gdr,
    /// Hidden Power type
    Hpt,
    /// Tera types
    Trt,
    Shy,
    /// Happiness
    Hpy,
    /// Dynamax level
    Dml,
    /// Gigantamax
    Gmx,
    Abl,
    Itm,
    Mov,
    Ntr,
    Ivs,
    Evs,
    /// Poke Ball
    Pkb,
}

/// One saved roster configuration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterPreset {
    pub calc_id: String,
    pub source: Option<String>,
    pub name: Option<String>,
    pub player_name: Option<String>,
    pub format: Option<Format>,
    pub nickname: Option<String>,
    pub usage: Option<f64>,
    pub species_forme: String,
    pub level: Option<u8>,
    pub gender: Option<Gender>,
    pub hidden_power_type: Option<String>,
    pub tera_types: Vec<Alt>,
    pub shiny: Option<bool>,
    pub happiness: Option<u8>,
    pub dynamax_level: Option<u8>,
    pub gigantamax: Option<bool>,
    pub alt_abilities: Vec<Alt>,
    pub alt_items: Vec<Alt>,
    pub alt_moves: Vec<Alt>,
    pub nature: Option<Nature>,
    pub ivs: Option<StatsTable>,
    pub evs: Option<StatsTable>,
    pub pokeball: Option<String>,

    pub ability: Option<String>,
    pub item: Option<String>,
    pub moves: Vec<String>,
}

impl RosterPreset {
    /// Generation of the preset's format, or the latest one.
    pub fn generation(&self) -> u8 {
        self.format
            .as_ref()
            .map_or(LATEST_GENERATION, Format::generation)
    }

    /// Seeds `record`'s candidate slots from this preset.
    ///
    /// Definite ability, item and moves on the record are left untouched;
    /// only the alt lists are replaced.
    pub fn apply_to(&self, record: &mut CombatantRecord) {
        let abilities = alts_or(&self.alt_abilities, self.ability.iter());
        if !abilities.is_empty() {
            record.alt_abilities = abilities;
        }
        let items = alts_or(&self.alt_items, self.item.iter());
        if !items.is_empty() {
            record.alt_items = items;
        }
        let moves = alts_or(&self.alt_moves, self.moves.iter());
        if !moves.is_empty() {
            record.alt_moves = moves;
        }
        if record.tera_type.is_none() && self.tera_types.len() == 1 {
            record.tera_type = Some(self.tera_types[0].value.clone());
        }
    }
}

/// Serializes `preset`, or `None` without a calc id or species forme.
pub fn dehydrate_preset(preset: &RosterPreset, delimiter: char) -> Option<String> {
    if preset.calc_id.is_empty() || preset.species_forme.is_empty() {
        return None;
    }

    let mut pairs: Vec<String> = Vec::new();
    let mut push = |opcode: Opcode, value: String| {
        if !value.is_empty() {
            pairs.push(format!("{opcode}{PAIR_SEPARATOR}{value}"));
        }
    };

    push(Opcode::Cid, preset.calc_id.clone());
    push(Opcode::Src, preset.source.clone().unwrap_or_default());
    push(Opcode::Nom, preset.name.clone().unwrap_or_default());
    push(Opcode::Pln, preset.player_name.clone().unwrap_or_default());
    push(Opcode::Fmt, optional(preset.format.as_ref()));
    push(Opcode::Nkn, preset.nickname.clone().unwrap_or_default());
    push(Opcode::Usg, optional(preset.usage));
    push(Opcode::Fme, preset.species_forme.clone());
    push(Opcode::Lvl, optional(preset.level));
    push(Opcode::Gdr, optional(preset.gender));
    push(Opcode::Hpt, preset.hidden_power_type.clone().unwrap_or_default());
    push(Opcode::Trt, join_alts(&preset.tera_types));
    push(Opcode::Shy, preset.shiny.map(flag).unwrap_or_default());
    push(Opcode::Hpy, optional(preset.happiness));
    push(Opcode::Dml, optional(preset.dynamax_level));
    push(Opcode::Gmx, preset.gigantamax.map(flag).unwrap_or_default());
    push(
        Opcode::Abl,
        join_alts(&alts_or(&preset.alt_abilities, preset.ability.iter())),
    );
    push(
        Opcode::Itm,
        join_alts(&alts_or(&preset.alt_items, preset.item.iter())),
    );
    push(
        Opcode::Mov,
        join_alts(&alts_or(&preset.alt_moves, preset.moves.iter())),
    );
    push(Opcode::Ntr, optional(preset.nature));
    push(Opcode::Ivs, preset.ivs.map(join_stats).unwrap_or_default());
    push(Opcode::Evs, preset.evs.map(join_stats).unwrap_or_default());
    push(Opcode::Pkb, preset.pokeball.clone().unwrap_or_default());

    Some(pairs.join(&delimiter.to_string()))
}

/// Rebuilds a preset from its dehydrated form.
///
/// Unknown opcodes are skipped so older readers accept newer payloads.
pub fn hydrate_preset(input: &str, delimiter: char) -> Result<RosterPreset, CodecError> {
    let mut preset = RosterPreset::default();

    for pair in input.split(delimiter).filter(|pair| !pair.is_empty()) {
        let (opcode, value) = pair
            .split_once(PAIR_SEPARATOR)
            .ok_or_else(|| CodecError::MalformedPair(pair.to_string()))?;
        let Ok(opcode) = opcode.parse::<Opcode>() else {
            continue;
        };
        let text = || Some(value.to_string());

        match opcode {
            Opcode::Cid => preset.calc_id = value.to_string(),
            Opcode::Src => preset.source = text(),
            Opcode::Nom => preset.name = text(),
            Opcode::Pln => preset.player_name = text(),
            Opcode::Fmt => preset.format = Some(Format::new(value)),
            Opcode::Nkn => preset.nickname = text(),
            Opcode::Usg => preset.usage = Some(parse(opcode, value)?),
            Opcode::Fme => preset.species_forme = value.to_string(),
            Opcode::Lvl => preset.level = Some(parse(opcode, value)?),
            Opcode::Gdr => preset.gender = Some(parse(opcode, value)?),
            Opcode::Hpt => preset.hidden_power_type = text(),
            Opcode::Trt => preset.tera_types = split_alts(opcode, value)?,
            Opcode::Shy => preset.shiny = Some(parse_flag(opcode, value)?),
            Opcode::Hpy => preset.happiness = Some(parse(opcode, value)?),
            Opcode::Dml => preset.dynamax_level = Some(parse(opcode, value)?),
            Opcode::Gmx => preset.gigantamax = Some(parse_flag(opcode, value)?),
            Opcode::Abl => preset.alt_abilities = split_alts(opcode, value)?,
            Opcode::Itm => preset.alt_items = split_alts(opcode, value)?,
            Opcode::Mov => preset.alt_moves = split_alts(opcode, value)?,
            Opcode::Ntr => preset.nature = Some(parse(opcode, value)?),
            Opcode::Ivs => preset.ivs = Some(split_stats(opcode, value)?),
            Opcode::Evs => preset.evs = Some(split_stats(opcode, value)?),
            Opcode::Pkb => preset.pokeball = text(),
        }
    }

    if preset.calc_id.is_empty() {
        return Err(CodecError::MissingField(Opcode::Cid.into()));
    }
    if preset.species_forme.is_empty() {
        return Err(CodecError::MissingField(Opcode::Fme.into()));
    }

    preset.ability = preset.alt_abilities.first().map(|alt| alt.value.clone());
    preset.item = preset.alt_items.first().map(|alt| alt.value.clone());
    preset.moves = preset
        .alt_moves
        .iter()
        .take(4)
        .map(|alt| alt.value.clone())
        .collect();

    Ok(preset)
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn flag(value: bool) -> String {
    let flag = if value { "y" } else { "n" };
    flag.to_string()
}

fn alts_or<'a>(alts: &[Alt], fallback: impl Iterator<Item = &'a String>) -> Vec<Alt> {
    if alts.is_empty() {
        fallback.map(Alt::new).collect()
    } else {
        alts.to_vec()
    }
}

fn join_alts(alts: &[Alt]) -> String {
    alts.iter()
        .map(|alt| match alt.usage {
            Some(usage) => format!("{}{USAGE_DELIMITER}{usage}", alt.value),
            None => alt.value.clone(),
        })
        .collect::<Vec<_>>()
        .join(&ARRAY_DELIMITER.to_string())
}

fn join_stats(stats: StatsTable) -> String {
    stats
        .to_array()
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(&ARRAY_DELIMITER.to_string())
}

fn invalid(opcode: Opcode, value: &str) -> CodecError {
    CodecError::InvalidValue {
        opcode: opcode.into(),
        value: value.to_string(),
    }
}

fn parse<T: FromStr>(opcode: Opcode, value: &str) -> Result<T, CodecError> {
    value.parse().map_err(|_| invalid(opcode, value))
}

fn parse_flag(opcode: Opcode, value: &str) -> Result<bool, CodecError> {
    match value {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(invalid(opcode, value)),
    }
}

fn split_alts(opcode: Opcode, value: &str) -> Result<Vec<Alt>, CodecError> {
    value
        .split(ARRAY_DELIMITER)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.rsplit_once(USAGE_DELIMITER) {
            Some((name, usage)) => Ok(Alt::weighted(name, parse(opcode, usage)?)),
            None => Ok(Alt::new(entry)),
        })
        .collect()
}

fn split_stats(opcode: Opcode, value: &str) -> Result<StatsTable, CodecError> {
    let values = value
        .split(ARRAY_DELIMITER)
        .map(|stat| parse::<u16>(opcode, stat))
        .collect::<Result<Vec<_>, _>>()?;
    let values: [u16; 6] = values.try_into().map_err(|_| invalid(opcode, value))?;
    Ok(StatsTable::from_array(values))
}
