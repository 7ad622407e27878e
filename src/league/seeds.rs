//! Regular-season seeding.

use crate::cli::types::RosterId;
use crate::league::models::Roster;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;


/// Season-scoped rank, 1 = best regular-season record.
pub type Seed = u8;

/// Total mapping from roster to seed for one season.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeedMap {
    seeds: BTreeMap<RosterId, Seed>,
}

impl SeedMap {
    pub fn get(&self, roster_id: RosterId) -> Option<Seed> {
        self.seeds.get(&roster_id).copied()
    }

    pub fn roster_for(&self, seed: Seed) -> Option<RosterId> {
        self.seeds
            .iter()
            .find_map(|(roster, s)| (*s == seed).then_some(*roster))
    }

    /// True when the roster has a seed inside `range`.
    pub fn in_range(&self, roster_id: RosterId, range: &RangeInclusive<Seed>) -> bool {
        self.get(roster_id).is_some_and(|seed| range.contains(&seed))
    }

    /// Rosters ordered by seed.
    pub fn ranked(&self) -> Vec<(Seed, RosterId)> {
        let mut ranked: Vec<_> = self.seeds.iter().map(|(r, s)| (*s, *r)).collect();
        ranked.sort();
        ranked
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

impl FromIterator<(RosterId, Seed)> for SeedMap {
    fn from_iter<I: IntoIterator<Item = (RosterId, Seed)>>(iter: I) -> Self {
        Self {
            seeds: iter.into_iter().collect(),
        }
    }
}

/// Rank rosters by wins, then points-for, both descending.
///
/// The sort is stable: rosters tied on both keep their input order. Every
/// roster gets a seed, including those outside the playoff field, since the
/// consolation tiers are assigned from the same ranking.
pub fn assign_seeds(rosters: &[Roster]) -> SeedMap {
    let mut order: Vec<&Roster> = rosters.iter().collect();
    order.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.points_for.total_cmp(&a.points_for))
    });

    order
        .into_iter()
        .enumerate()
        .map(|(idx, roster)| {
            let seed = Seed::try_from(idx + 1).unwrap_or(Seed::MAX);
            (roster.roster_id, seed)
        })
        .collect()
}
