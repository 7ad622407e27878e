//! Consolation bracket partitioning.
//!
//! The consolation feed mixes two independent mini-brackets. They are told
//! apart purely by seed:
//!
//! - the lower tier ("toilet bowl", seeds 9-12 by default) whose round 2 is
//!   split into a tier championship and a last-place game, and
//! - the middle tier (seeds 5-8 by default), resolved like a small
//!   championship bracket with placement-game names.
//!
//! A record only belongs to a tier when both participants are seeded inside
//! it; anything straddling two tiers is ignored.

use crate::cli::types::RosterId;
use crate::error::Result;
use crate::league::bracket::{
    group_by_round, losers_of, resolve_round_one, resolve_tier_bracket, winners_of, Bracket,
    BracketLayout, BracketNode, BracketSlot, BracketStatus,
};
use crate::league::models::BracketRecord;
use crate::league::seeds::{Seed, SeedMap};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use tracing::debug;


/// Records whose two participants are both seeded inside `range`.
pub fn partition_tier<'a>(
    records: &'a [BracketRecord],
    seeds: &SeedMap,
    range: &RangeInclusive<Seed>,
) -> Vec<&'a BracketRecord> {
    records
        .iter()
        .filter(|record| {
            let (Some(t1), Some(t2)) = (record.team1, record.team2) else {
                return false;
            };
            let inside = seeds.in_range(t1, range) && seeds.in_range(t2, range);
            if !inside && (seeds.in_range(t1, range) || seeds.in_range(t2, range)) {
                debug!(
                    round = record.round,
                    team1 = %t1,
                    team2 = %t2,
                    "ignoring consolation record spanning two tiers"
                );
            }
            inside
        })
        .collect()
}

/// The bottom-seed bracket that produces the last-place finisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowerTier {
    pub seeds: (Seed, Seed),
    pub round_one: Vec<BracketSlot>,
    /// Round 2 game between the two round 1 winners.
    pub championship: Option<BracketNode>,
    /// Round 2 game between the two round 1 losers.
    pub last_place_game: Option<BracketNode>,
}

impl LowerTier {
    pub fn champion(&self) -> Option<RosterId> {
        self.championship.as_ref()?.winner
    }

    /// Loser of the last-place game.
    pub fn last_place(&self) -> Option<RosterId> {
        self.last_place_game.as_ref()?.loser()
    }

    pub fn status(&self) -> BracketStatus {
        if self.champion().is_some() && self.last_place().is_some() {
            BracketStatus::Complete
        } else if self.round_one.iter().any(BracketSlot::is_resolved) {
            BracketStatus::InProgress
        } else {
            BracketStatus::NotStarted
        }
    }

    /// Rosters that played at least one tier game.
    pub fn participants(&self) -> Vec<RosterId> {
        let mut rosters: Vec<RosterId> = self
            .round_one
            .iter()
            .filter_map(BracketSlot::node)
            .flat_map(BracketNode::participants)
            .collect();
        rosters.sort();
        rosters.dedup();
        rosters
    }

    /// Every tier game that was played, round 1 first.
    pub fn games(&self) -> impl Iterator<Item = &BracketNode> {
        self.round_one
            .iter()
            .filter_map(BracketSlot::node)
            .chain(self.championship.iter())
            .chain(self.last_place_game.iter())
    }

    /// Display rows: (round name, slots).
    pub fn display_rounds(&self) -> Vec<(&'static str, Vec<BracketSlot>)> {
        let mut rows = vec![("Round 1", self.round_one.clone())];
        if let Some(game) = &self.championship {
            rows.push(("Toilet Bowl Championship", vec![BracketSlot::Matchup(game.clone())]));
        }
        if let Some(game) = &self.last_place_game {
            rows.push(("Last Place Game", vec![BracketSlot::Matchup(game.clone())]));
        }
        rows
    }
}

/// Resolve the lower tier from the consolation feed.
pub fn resolve_lower_tier(
    records: &[BracketRecord],
    seeds: &SeedMap,
    range: &RangeInclusive<Seed>,
) -> Result<LowerTier> {
    let layout = BracketLayout::tier(range)?;
    let tier_records = partition_tier(records, seeds, range);
    let by_round = group_by_round(tier_records);

    let round_one = by_round
        .get(&1)
        .map(|records| resolve_round_one(records, seeds, &layout, true))
        .unwrap_or_else(|| resolve_round_one(&[], seeds, &layout, true));

    let round1_winners = winners_of(&round_one);
    let round1_losers = losers_of(&round_one);

    let mut championship = None;
    let mut last_place_game = None;

    for record in by_round.get(&2).into_iter().flatten() {
        let Some(node) = BracketNode::from_record(record, seeds) else {
            continue;
        };
        let all_in = |set: &BTreeSet<RosterId>| {
            !node.is_bye() && node.participants().all(|r| set.contains(&r))
        };
        let between_winners = all_in(&round1_winners);
        let between_losers = all_in(&round1_losers);

        if between_winners && championship.is_none() {
            championship = Some(node);
        } else if between_losers && last_place_game.is_none() {
            last_place_game = Some(node);
        } else {
            debug!(
                team1 = ?node.team1,
                team2 = ?node.team2,
                "dropping lower tier round 2 record that mixes winners and losers"
            );
        }
    }

    for round in by_round.keys().filter(|r| **r > 2) {
        debug!(round, "ignoring lower tier records beyond round 2");
    }

    Ok(LowerTier {
        seeds: (*range.start(), *range.end()),
        round_one,
        championship,
        last_place_game,
    })
}

/// The mid-table placement bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiddleTier {
    pub bracket: Bracket,
}

impl MiddleTier {
    /// Name of a tier round by what it decides. Only winners advance, so the
    /// final round is the game for the tier's best place (5th for seeds
    /// 5-8); earlier rounds are numbered.
    pub fn placement_label(&self, round: u8) -> String {
        let first = *self.bracket.layout().seeds().start();
        if round == self.bracket.layout().rounds() {
            format!("{} Place Game", ordinal(u16::from(first)))
        } else {
            format!("Round {}", round)
        }
    }

    /// Winner of the final game of the tier.
    pub fn winner(&self) -> Option<RosterId> {
        self.bracket.champion()
    }

    pub fn status(&self) -> BracketStatus {
        self.bracket.status()
    }
}

/// Resolve the middle tier from the consolation feed.
pub fn resolve_middle_tier(
    records: &[BracketRecord],
    seeds: &SeedMap,
    range: &RangeInclusive<Seed>,
) -> Result<MiddleTier> {
    let layout = BracketLayout::tier(range)?;
    let tier_records = partition_tier(records, seeds, range);
    Ok(MiddleTier {
        bracket: resolve_tier_bracket(&tier_records, seeds, layout),
    })
}

/// Both consolation tiers of a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consolation {
    pub lower: LowerTier,
    pub middle: MiddleTier,
}

/// Split the consolation feed into its two tiers and resolve each.
pub fn partition_consolation(
    records: &[BracketRecord],
    seeds: &SeedMap,
    middle: &RangeInclusive<Seed>,
    lower: &RangeInclusive<Seed>,
) -> Result<Consolation> {
    Ok(Consolation {
        lower: resolve_lower_tier(records, seeds, lower)?,
        middle: resolve_middle_tier(records, seeds, middle)?,
    })
}

fn ordinal(n: u16) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
