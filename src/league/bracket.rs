//! Championship bracket reconstruction.
//!
//! The source delivers a bracket as a flat list of [`BracketRecord`]s with
//! round numbers but no explicit tree. [`resolve_bracket`] rebuilds the tree
//! once per season:
//!
//! - Round 1 is laid out in canonical seed order (1v8, 4v5, 2v7, 3v6 for an
//!   eight team field). A canonical pairing without a matching record stays
//!   in the result as [`BracketSlot::Unresolved`].
//! - Every later round only admits a record when all of its participants won
//!   their game in the previous round, so eliminated teams can never leak
//!   forward through stray or duplicated records.
//!
//! The resulting [`Bracket`] is a plain value; rendering and reporting code
//! reads it and never re-derives round membership on its own.

use crate::cli::types::RosterId;
use crate::error::{LeagueError, Result};
use crate::league::models::BracketRecord;
use crate::league::seeds::{Seed, SeedMap};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use tracing::debug;


/// Seed layout of a single-elimination bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketLayout {
    first_seed: Seed,
    size: usize,
}

impl BracketLayout {
    /// Layout for the championship bracket, seeds `1..=field_size`.
    pub fn championship(field_size: usize) -> Result<Self> {
        Self::new(1, field_size)
    }

    /// Layout for a consolation tier covering `range`.
    pub fn tier(range: &RangeInclusive<Seed>) -> Result<Self> {
        let size = range
            .end()
            .checked_sub(*range.start())
            .map(|span| usize::from(span) + 1)
            .unwrap_or(0);
        Self::new(*range.start(), size)
    }

    fn new(first_seed: Seed, size: usize) -> Result<Self> {
        match size {
            4 | 8 if first_seed >= 1 => Ok(Self { first_seed, size }),
            _ => Err(LeagueError::UnsupportedBracket { field_size: size }),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn seeds(&self) -> RangeInclusive<Seed> {
        self.first_seed..=self.last_seed()
    }

    fn last_seed(&self) -> Seed {
        self.first_seed.saturating_add((self.size - 1) as Seed)
    }

    /// Number of rounds until a single game remains.
    pub fn rounds(&self) -> u8 {
        self.size.trailing_zeros() as u8
    }

    /// Canonical first-round pairings, lower seed first. Adjacent pairs feed
    /// the same next-round game.
    pub fn round_one_pairs(&self) -> Vec<(Seed, Seed)> {
        let base: &[(Seed, Seed)] = match self.size {
            8 => &[(1, 8), (4, 5), (2, 7), (3, 6)],
            _ => &[(1, 4), (2, 3)],
        };
        let offset = self.first_seed - 1;
        base.iter()
            .map(|(a, b)| (a.saturating_add(offset), b.saturating_add(offset)))
            .collect()
    }

    /// Display name for a round of this layout.
    pub fn round_name(&self, round: u8) -> String {
        let rounds = self.rounds();
        if round == rounds {
            "Championship".to_string()
        } else if round.checked_add(1) == Some(rounds) {
            "Semifinals".to_string()
        } else {
            format!("Round {}", round)
        }
    }
}

/// One matchup slot in a reconstructed bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketNode {
    pub round: u8,
    pub matchup_id: Option<u32>,
    pub team1: Option<RosterId>,
    pub team2: Option<RosterId>,
    pub team1_seed: Option<Seed>,
    pub team2_seed: Option<Seed>,
    /// `None` until the game has been played (and always for a bye).
    pub winner: Option<RosterId>,
}

impl BracketNode {
    /// Build a node from a raw record, putting the lower seed in `team1`.
    ///
    /// Returns `None` for records without any participant. A recorded winner
    /// that is not one of the two participants is discarded.
    pub fn from_record(record: &BracketRecord, seeds: &SeedMap) -> Option<Self> {
        let (mut team1, mut team2) = match (record.team1, record.team2) {
            (None, None) => return None,
            (None, Some(only)) => (Some(only), None),
            other => other,
        };

        if let (Some(a), Some(b)) = (team1, team2) {
            let swap = match (seeds.get(a), seeds.get(b)) {
                (Some(sa), Some(sb)) => sb < sa,
                (None, Some(_)) => true,
                _ => false,
            };
            if swap {
                std::mem::swap(&mut team1, &mut team2);
            }
        }

        let winner = match (team1, team2) {
            (Some(a), Some(b)) => match (record.winner, record.loser) {
                (Some(w), _) if w == a || w == b => Some(w),
                (None, Some(l)) if l == a => Some(b),
                (None, Some(l)) if l == b => Some(a),
                _ => None,
            },
            _ => None,
        };

        Some(Self {
            round: record.round,
            matchup_id: record.matchup_id,
            team1_seed: team1.and_then(|r| seeds.get(r)),
            team2_seed: team2.and_then(|r| seeds.get(r)),
            team1,
            team2,
            winner,
        })
    }

    pub fn participants(&self) -> impl Iterator<Item = RosterId> {
        self.team1.into_iter().chain(self.team2)
    }

    pub fn involves(&self, roster_id: RosterId) -> bool {
        self.team1 == Some(roster_id) || self.team2 == Some(roster_id)
    }

    pub fn is_bye(&self) -> bool {
        self.team1.is_none() || self.team2.is_none()
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn loser(&self) -> Option<RosterId> {
        let winner = self.winner?;
        self.participants().find(|r| *r != winner)
    }
}

/// A slot in a bracket round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BracketSlot {
    /// A canonical pairing with no matching record (not played or missing data).
    Unresolved { round: u8, seeds: (Seed, Seed) },
    /// A record was found for this slot.
    Matchup(BracketNode),
}

impl BracketSlot {
    pub fn node(&self) -> Option<&BracketNode> {
        match self {
            BracketSlot::Matchup(node) => Some(node),
            BracketSlot::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.node().is_some()
    }

    pub fn round(&self) -> u8 {
        match self {
            BracketSlot::Matchup(node) => node.round,
            BracketSlot::Unresolved { round, .. } => *round,
        }
    }
}

/// Overall state of a bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStatus {
    /// No bracket records at all.
    NotStarted,
    /// Some games recorded, no champion yet.
    InProgress,
    /// The final game has a winner.
    Complete,
}

/// Immutable, round-ordered bracket for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bracket {
    layout: BracketLayout,
    rounds: BTreeMap<u8, Vec<BracketSlot>>,
}

impl Bracket {
    pub fn layout(&self) -> &BracketLayout {
        &self.layout
    }

    /// Slots of a round; empty when the round has no qualifying records.
    pub fn round(&self, round: u8) -> &[BracketSlot] {
        self.rounds.get(&round).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rounds(&self) -> impl Iterator<Item = (u8, &[BracketSlot])> {
        self.rounds.iter().map(|(r, slots)| (*r, slots.as_slice()))
    }

    /// Every played or pending node, round by round.
    pub fn nodes(&self) -> impl Iterator<Item = &BracketNode> {
        self.rounds.values().flatten().filter_map(BracketSlot::node)
    }

    /// The single game of the final round, once it exists.
    pub fn championship_game(&self) -> Option<&BracketNode> {
        match self.round(self.layout.rounds()) {
            [BracketSlot::Matchup(node)] if !node.is_bye() => Some(node),
            _ => None,
        }
    }

    pub fn champion(&self) -> Option<RosterId> {
        self.championship_game()?.winner
    }

    pub fn runner_up(&self) -> Option<RosterId> {
        self.championship_game()?.loser()
    }

    pub fn status(&self) -> BracketStatus {
        if self.champion().is_some() {
            BracketStatus::Complete
        } else if self.nodes().next().is_some() {
            BracketStatus::InProgress
        } else {
            BracketStatus::NotStarted
        }
    }

    /// Round in which a roster lost, if it has been eliminated.
    pub fn eliminated_round(&self, roster_id: RosterId) -> Option<u8> {
        self.nodes()
            .find(|node| node.loser() == Some(roster_id))
            .map(|node| node.round)
    }

    /// Every roster that appears in a resolved node.
    pub fn participants(&self) -> BTreeSet<RosterId> {
        self.nodes().flat_map(BracketNode::participants).collect()
    }

    pub fn round_name(&self, round: u8) -> String {
        self.layout.round_name(round)
    }
}

/// Resolve the first round against the canonical pairings of `layout`.
///
/// With `keep_unpaired`, records that match no canonical pairing are appended
/// after the canonical slots as long as neither participant has been placed
/// yet; otherwise they are dropped.
pub(crate) fn resolve_round_one(
    records: &[&BracketRecord],
    seeds: &SeedMap,
    layout: &BracketLayout,
    keep_unpaired: bool,
) -> Vec<BracketSlot> {
    let mut used: BTreeSet<usize> = BTreeSet::new();
    let mut slots = Vec::new();

    for (low, high) in layout.round_one_pairs() {
        let found = records.iter().enumerate().find(|(idx, record)| {
            if used.contains(idx) {
                return false;
            }
            let s1 = record.team1.and_then(|r| seeds.get(r));
            let s2 = record.team2.and_then(|r| seeds.get(r));
            matches!((s1, s2), (Some(a), Some(b)) if (a, b) == (low, high) || (b, a) == (low, high))
        });

        match found.and_then(|(idx, record)| {
            BracketNode::from_record(record, seeds).map(|node| (idx, node))
        }) {
            Some((idx, node)) => {
                used.insert(idx);
                slots.push(BracketSlot::Matchup(node));
            }
            None => slots.push(BracketSlot::Unresolved {
                round: 1,
                seeds: (low, high),
            }),
        }
    }

    let mut placed: BTreeSet<RosterId> = slots
        .iter()
        .filter_map(BracketSlot::node)
        .flat_map(BracketNode::participants)
        .collect();

    for (idx, record) in records.iter().enumerate() {
        if used.contains(&idx) {
            continue;
        }
        let clashes = record.participants().any(|r| placed.contains(&r));
        match BracketNode::from_record(record, seeds) {
            Some(node) if keep_unpaired && !clashes && !node.is_bye() => {
                placed.extend(node.participants());
                slots.push(BracketSlot::Matchup(node));
            }
            _ => debug!(
                matchup_id = ?record.matchup_id,
                team1 = ?record.team1,
                team2 = ?record.team2,
                "dropping non-canonical round 1 record"
            ),
        }
    }

    slots
}

/// Resolve a later round: keep only records whose participants all won in the
/// previous round, and never place a roster twice in the same round.
pub(crate) fn resolve_later_round(
    round: u8,
    records: &[&BracketRecord],
    seeds: &SeedMap,
    previous_winners: &BTreeSet<RosterId>,
) -> Vec<BracketSlot> {
    let mut seen: BTreeSet<RosterId> = BTreeSet::new();
    let mut slots = Vec::new();

    for record in records {
        let Some(node) = BracketNode::from_record(record, seeds) else {
            debug!(round, "dropping bracket record without participants");
            continue;
        };
        if !node.participants().all(|r| previous_winners.contains(&r)) {
            debug!(
                round,
                team1 = ?node.team1,
                team2 = ?node.team2,
                "dropping record with a participant that did not advance"
            );
            continue;
        }
        if node.participants().any(|r| seen.contains(&r)) {
            debug!(round, team1 = ?node.team1, team2 = ?node.team2, "dropping duplicate record");
            continue;
        }
        seen.extend(node.participants());
        slots.push(BracketSlot::Matchup(node));
    }

    slots
}

/// Winners of every decided game among `slots`.
pub(crate) fn winners_of(slots: &[BracketSlot]) -> BTreeSet<RosterId> {
    slots
        .iter()
        .filter_map(BracketSlot::node)
        .filter_map(|node| node.winner)
        .collect()
}

/// Losers of every decided game among `slots`.
pub(crate) fn losers_of(slots: &[BracketSlot]) -> BTreeSet<RosterId> {
    slots
        .iter()
        .filter_map(BracketSlot::node)
        .filter_map(BracketNode::loser)
        .collect()
}

/// Group records by round number, dropping round 0.
pub(crate) fn group_by_round<'a, I>(records: I) -> BTreeMap<u8, Vec<&'a BracketRecord>>
where
    I: IntoIterator<Item = &'a BracketRecord>,
{
    let mut by_round: BTreeMap<u8, Vec<&BracketRecord>> = BTreeMap::new();
    for record in records {
        if record.round == 0 {
            debug!(matchup_id = ?record.matchup_id, "dropping bracket record without a round");
            continue;
        }
        by_round.entry(record.round).or_default().push(record);
    }
    by_round
}

/// Round 1 always carries every canonical pairing, resolved or not.
fn resolve_grouped(
    mut by_round: BTreeMap<u8, Vec<&BracketRecord>>,
    seeds: &SeedMap,
    layout: BracketLayout,
    keep_unpaired: bool,
) -> Bracket {
    let mut rounds: BTreeMap<u8, Vec<BracketSlot>> = BTreeMap::new();
    let mut winners_by_round: BTreeMap<u8, BTreeSet<RosterId>> = BTreeMap::new();
    let empty = BTreeSet::new();

    let round_one = by_round.remove(&1).unwrap_or_default();
    let slots = resolve_round_one(&round_one, seeds, &layout, keep_unpaired);
    winners_by_round.insert(1, winners_of(&slots));
    rounds.insert(1, slots);

    for (round, records) in by_round {
        let previous = winners_by_round.get(&(round - 1)).unwrap_or(&empty);
        let slots = resolve_later_round(round, &records, seeds, previous);
        winners_by_round.insert(round, winners_of(&slots));
        rounds.insert(round, slots);
    }

    Bracket { layout, rounds }
}

/// Rebuild a single-elimination bracket from flat records.
///
/// Records that do not fit the bracket shape are dropped (and logged at
/// debug level); resolution proceeds with whatever remains.
pub fn resolve_bracket(records: &[BracketRecord], seeds: &SeedMap, layout: BracketLayout) -> Bracket {
    resolve_grouped(group_by_round(records), seeds, layout, false)
}

/// Rebuild a bracket whose first round may contain non-canonical pairings.
pub(crate) fn resolve_tier_bracket(
    records: &[&BracketRecord],
    seeds: &SeedMap,
    layout: BracketLayout,
) -> Bracket {
    resolve_grouped(group_by_round(records.iter().copied()), seeds, layout, true)
}

/// Resolve the championship bracket for a playoff field of `field_size`.
///
/// Records tagged with a placement other than first (3rd and 5th place
/// games) are off the title path and are left out.
pub fn resolve_championship(
    records: &[BracketRecord],
    seeds: &SeedMap,
    field_size: usize,
) -> Result<Bracket> {
    let layout = BracketLayout::championship(field_size)?;
    let title_path = records.iter().filter(|record| match record.placement {
        Some(place) if place != 1 => {
            debug!(
                round = record.round,
                place, "placement game is outside the title path"
            );
            false
        }
        _ => true,
    });
    Ok(resolve_grouped(group_by_round(title_path), seeds, layout, false))
}
