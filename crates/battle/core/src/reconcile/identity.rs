use sha2::{Digest, Sha256};

use crate::dex::base_species;
use crate::feed::{PrivateView, PublicView};
use crate::state::{CombatantRecord, Gender, SideId};
use crate::util::ident_name;

/// Deterministic identifier of one combatant across repeated partial reveals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Wraps an already-derived key (e.g. one read back from storage).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifying attributes extracted from any observation shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentitySource<'a> {
    pub species_forme: &'a str,
    pub name: &'a str,
    pub level: u8,
    pub gender: Gender,
    pub shiny: bool,
    pub side: Option<SideId>,
}

/// Anything carrying enough attributes to derive an [`IdentityKey`].
pub trait Identifiable {
    fn identity_source(&self) -> IdentitySource<'_>;
}

impl Identifiable for PublicView {
    fn identity_source(&self) -> IdentitySource<'_> {
        let details = self.details_info();
        IdentitySource {
            species_forme: self
                .species_forme
                .as_deref()
                .or_else(|| self.details.as_deref().and_then(|d| d.split(',').next()))
                .unwrap_or_default()
                .trim(),
            name: self
                .name
                .as_deref()
                .unwrap_or_else(|| ident_name(&self.ident)),
            level: self.level.or(details.level).unwrap_or(100),
            gender: self.gender.or(details.gender).unwrap_or_default(),
            shiny: self.shiny.unwrap_or(details.shiny),
            side: self.side,
        }
    }
}

impl Identifiable for PrivateView {
    fn identity_source(&self) -> IdentitySource<'_> {
        let details = self.details_info();
        IdentitySource {
            species_forme: &self.species_forme,
            name: self
                .name
                .as_deref()
                .unwrap_or_else(|| ident_name(&self.ident)),
            level: self.level.or(details.level).unwrap_or(100),
            gender: self.gender.or(details.gender).unwrap_or_default(),
            shiny: self.shiny.unwrap_or(details.shiny),
            side: SideId::from_ident(&self.ident),
        }
    }
}

impl Identifiable for CombatantRecord {
    fn identity_source(&self) -> IdentitySource<'_> {
        IdentitySource {
            species_forme: &self.species_forme,
            name: &self.name,
            level: self.level,
            gender: self.gender,
            shiny: self.shiny,
            side: Some(self.side),
        }
    }
}

/// Derives the identity key of `candidate` at roster position `slot`.
///
/// `side` is substituted when the candidate carries no side reference of its
/// own. Battle-only formes hash as their base species so that mega evolution
/// or terastallization does not mint a new identity.
pub fn identify<C>(candidate: &C, slot: usize, side: SideId) -> IdentityKey
where
    C: Identifiable + ?Sized,
{
    let source = candidate.identity_source();
    let side = source.side.unwrap_or(side);

    let mut hasher = Sha256::new();
    for part in [
        side.as_ref(),
        &slot.to_string(),
        source.name,
        base_species(source.species_forme),
        &source.level.to_string(),
        source.gender.as_ref(),
        if source.shiny { "shiny" } else { "" },
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0x1f]);
    }

    let digest = hasher.finalize();
    IdentityKey(hex::encode(&digest[..16]))
}
