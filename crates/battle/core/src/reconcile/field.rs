use crate::feed::{BattleFeed, FeedSide};
use crate::state::{
    FieldState, GameType, PseudoWeather, SideConditions, SideField, SideId, Terrain, Weather,
};

/// Builds the next field from the feed.
///
/// Returns `None` when the feed's game type is missing or unrecognized; the
/// caller must then discard the whole sync. A side absent from the feed, or
/// reported under the wrong side id, keeps its prior hazards.
pub fn reconcile_field(
    prior: &FieldState,
    feed: &BattleFeed,
    attacker_index: Option<usize>,
    defender_index: Option<usize>,
) -> Option<FieldState> {
    let game_type: GameType = feed.game_type.as_deref()?.parse().ok()?;

    let mut terrain = None;
    let mut pseudo_weather = PseudoWeather::empty();
    for name in &feed.pseudo_weather {
        match Terrain::from_feed(name) {
            Some(found) => terrain = Some(found),
            None => pseudo_weather |= PseudoWeather::from_feed(name),
        }
    }

    Some(FieldState {
        game_type,
        weather: feed.weather.as_deref().and_then(Weather::from_feed),
        terrain,
        pseudo_weather,
        attacker_side: side_field(reported_side(feed, SideId::P1), prior.attacker_side),
        defender_side: side_field(reported_side(feed, SideId::P2), prior.defender_side),
        attacker_index,
        defender_index,
    })
}

/// A slot whose `side_id` disagrees with its position is treated as absent.
fn reported_side(feed: &BattleFeed, side: SideId) -> Option<&FeedSide> {
    feed.side(side).filter(|reported| reported.side_id == side)
}

fn side_field(side: Option<&FeedSide>, prior: SideField) -> SideField {
    let Some(side) = side else {
        return prior;
    };

    let mut field = SideField::default();
    for (name, &layers) in &side.side_conditions {
        let condition = SideConditions::from_feed(name);
        if condition.is_empty() || layers == 0 {
            continue;
        }
        field.conditions |= condition;
        if condition == SideConditions::SPIKES {
            field.spikes = layers.min(3);
        } else if condition == SideConditions::TOXIC_SPIKES {
            field.toxic_spikes = layers.min(2);
        }
    }
    field
}
