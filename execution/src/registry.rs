//! Canonical bet definitions.
//!
//! The registry is built once and shared read-only by every table. Resolution
//! reads ratios, totals and legs from here rather than hard-coding them.

use crapstable_types::craps::{
    is_point_number, BetCategory, BetDefinition, Payout, Side, SplitLeg, Working, COMMISSION_BPS,
    POINT_NUMBERS, WAYS,
};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Fire bet pay table ("to 1") by unique points made: 4 -> 24, 5 -> 249, 6 -> 999.
pub const FIRE_PAYTABLE: [(u32, u32); 3] = [(4, 24), (5, 249), (6, 999)];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate bet type: {0}")]
    Duplicate(&'static str),
}

/// True odds on a point number for the right side (2:1, 3:2, 6:5): the ways
/// to roll a 7 against the ways to roll the number, in lowest terms.
pub fn true_odds(number: u8) -> Option<Payout> {
    if !is_point_number(number) {
        return None;
    }
    let sevens = u32::from(WAYS[7]);
    let ways = u32::from(WAYS[usize::from(number)]);
    let divisor = gcd(sevens, ways);
    Some(Payout::new(sevens / divisor, ways / divisor))
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// True odds for a bettor on the given side of `number`.
pub fn true_odds_for(side: Side, number: u8) -> Option<Payout> {
    let odds = true_odds(number)?;
    Some(match side {
        Side::Right => odds,
        Side::Wrong => odds.inverse(),
    })
}

/// Fire bet multiplier for a count of unique points made (0 if it loses).
pub fn fire_payout(points_made: u32) -> u32 {
    FIRE_PAYTABLE
        .iter()
        .find(|(points, _)| *points == points_made)
        .map(|(_, payout)| *payout)
        .unwrap_or(0)
}

/// Immutable lookup table of every bet type the table accepts.
#[derive(Clone, Debug)]
pub struct BetRegistry {
    definitions: Vec<BetDefinition>,
    index: HashMap<&'static str, usize>,
}

impl Default for BetRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl BetRegistry {
    /// The standard layout.
    pub fn standard() -> Self {
        let definitions = standard_definitions();
        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (def.id, i))
            .collect();
        Self { definitions, index }
    }

    /// Build a registry from custom definitions, rejecting duplicate ids.
    pub fn from_definitions(definitions: Vec<BetDefinition>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if index.insert(def.id, i).is_some() {
                return Err(RegistryError::Duplicate(def.id));
            }
        }
        Ok(Self { definitions, index })
    }

    pub fn get(&self, bet_type: &str) -> Option<&BetDefinition> {
        self.index.get(bet_type).map(|i| &self.definitions[*i])
    }

    pub fn contains(&self, bet_type: &str) -> bool {
        self.index.contains_key(bet_type)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BetDefinition> {
        self.definitions.iter()
    }

    /// Every bet type id, in layout order.
    pub fn all_bet_types(&self) -> Vec<&'static str> {
        self.definitions.iter().map(|def| def.id).collect()
    }

    pub fn bets_by_category(&self) -> BTreeMap<BetCategory, Vec<&BetDefinition>> {
        let mut grouped: BTreeMap<BetCategory, Vec<&BetDefinition>> = BTreeMap::new();
        for def in &self.definitions {
            grouped.entry(def.category).or_default().push(def);
        }
        grouped
    }

    pub fn one_roll_bets(&self) -> Vec<&BetDefinition> {
        self.definitions
            .iter()
            .filter(|def| def.is_one_roll())
            .collect()
    }

    /// Definitions sorted from lowest to highest house edge (ties keep layout order).
    pub fn bets_by_house_edge(&self) -> Vec<&BetDefinition> {
        let mut sorted: Vec<&BetDefinition> = self.definitions.iter().collect();
        sorted.sort_by(|a, b| a.house_edge.total_cmp(&b.house_edge));
        sorted
    }

    /// Right-side true odds on a point number.
    pub fn true_odds(&self, number: u8) -> Option<Payout> {
        true_odds(number)
    }
}

const BASE: BetDefinition = BetDefinition {
    id: "",
    name: "",
    category: BetCategory::Proposition,
    side: Side::Right,
    payout: Payout::EVEN,
    working: Working::OneRoll,
    number: None,
    winning_totals: &[],
    legs: &[],
    dice: None,
    base: None,
    requires_point: false,
    requires_come_out: false,
    commission_bps: 0,
    house_edge: 0.0,
    description: "",
};

const HORN_LEGS: &[SplitLeg] = &[
    SplitLeg { totals: &[2], payout: Payout::new(30, 1), weight: 1 },
    SplitLeg { totals: &[3], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[11], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[12], payout: Payout::new(30, 1), weight: 1 },
];

const HORN_HIGH_2_LEGS: &[SplitLeg] = &[
    SplitLeg { totals: &[2], payout: Payout::new(30, 1), weight: 2 },
    SplitLeg { totals: &[3], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[11], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[12], payout: Payout::new(30, 1), weight: 1 },
];

const HORN_HIGH_3_LEGS: &[SplitLeg] = &[
    SplitLeg { totals: &[2], payout: Payout::new(30, 1), weight: 1 },
    SplitLeg { totals: &[3], payout: Payout::new(15, 1), weight: 2 },
    SplitLeg { totals: &[11], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[12], payout: Payout::new(30, 1), weight: 1 },
];

const HORN_HIGH_11_LEGS: &[SplitLeg] = &[
    SplitLeg { totals: &[2], payout: Payout::new(30, 1), weight: 1 },
    SplitLeg { totals: &[3], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[11], payout: Payout::new(15, 1), weight: 2 },
    SplitLeg { totals: &[12], payout: Payout::new(30, 1), weight: 1 },
];

const HORN_HIGH_12_LEGS: &[SplitLeg] = &[
    SplitLeg { totals: &[2], payout: Payout::new(30, 1), weight: 1 },
    SplitLeg { totals: &[3], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[11], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[12], payout: Payout::new(30, 1), weight: 2 },
];

// Horn plus any seven; the seven leg only breaks even
const WORLD_LEGS: &[SplitLeg] = &[
    SplitLeg { totals: &[2], payout: Payout::new(30, 1), weight: 1 },
    SplitLeg { totals: &[3], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[11], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[12], payout: Payout::new(30, 1), weight: 1 },
    SplitLeg { totals: &[7], payout: Payout::new(4, 1), weight: 1 },
];

const C_AND_E_LEGS: &[SplitLeg] = &[
    SplitLeg { totals: &[2, 3, 12], payout: Payout::new(7, 1), weight: 1 },
    SplitLeg { totals: &[11], payout: Payout::new(15, 1), weight: 1 },
];

const THREE_WAY_CRAPS_LEGS: &[SplitLeg] = &[
    SplitLeg { totals: &[2], payout: Payout::new(30, 1), weight: 1 },
    SplitLeg { totals: &[3], payout: Payout::new(15, 1), weight: 1 },
    SplitLeg { totals: &[12], payout: Payout::new(30, 1), weight: 1 },
];

const HIGH_LOW_LEGS: &[SplitLeg] = &[
    SplitLeg { totals: &[2], payout: Payout::new(30, 1), weight: 1 },
    SplitLeg { totals: &[12], payout: Payout::new(30, 1), weight: 1 },
];

static HOPS: [(u8, u8, &str, &str); 21] = [
    (1, 1, "HOP_1_1", "Hop 1-1"),
    (1, 2, "HOP_1_2", "Hop 1-2"),
    (1, 3, "HOP_1_3", "Hop 1-3"),
    (1, 4, "HOP_1_4", "Hop 1-4"),
    (1, 5, "HOP_1_5", "Hop 1-5"),
    (1, 6, "HOP_1_6", "Hop 1-6"),
    (2, 2, "HOP_2_2", "Hop 2-2"),
    (2, 3, "HOP_2_3", "Hop 2-3"),
    (2, 4, "HOP_2_4", "Hop 2-4"),
    (2, 5, "HOP_2_5", "Hop 2-5"),
    (2, 6, "HOP_2_6", "Hop 2-6"),
    (3, 3, "HOP_3_3", "Hop 3-3"),
    (3, 4, "HOP_3_4", "Hop 3-4"),
    (3, 5, "HOP_3_5", "Hop 3-5"),
    (3, 6, "HOP_3_6", "Hop 3-6"),
    (4, 4, "HOP_4_4", "Hop 4-4"),
    (4, 5, "HOP_4_5", "Hop 4-5"),
    (4, 6, "HOP_4_6", "Hop 4-6"),
    (5, 5, "HOP_5_5", "Hop 5-5"),
    (5, 6, "HOP_5_6", "Hop 5-6"),
    (6, 6, "HOP_6_6", "Hop 6-6"),
];

/// Per-number data for the box bets, indexed like [POINT_NUMBERS].
struct BoxNumber {
    place: (&'static str, &'static str, Payout, f64),
    buy: (&'static str, &'static str, f64),
    lay: (&'static str, &'static str, f64),
    place_to_lose: (&'static str, &'static str, Payout, f64),
}

static BOX_NUMBERS: [BoxNumber; 6] = [
    BoxNumber {
        place: ("PLACE_4", "Place 4", Payout::new(9, 5), 6.67),
        buy: ("BUY_4", "Buy 4", 3.33),
        lay: ("LAY_4", "Lay 4", 1.67),
        place_to_lose: ("PLACE_TO_LOSE_4", "Place to Lose 4", Payout::new(5, 11), 3.03),
    },
    BoxNumber {
        place: ("PLACE_5", "Place 5", Payout::new(7, 5), 4.00),
        buy: ("BUY_5", "Buy 5", 3.00),
        lay: ("LAY_5", "Lay 5", 2.00),
        place_to_lose: ("PLACE_TO_LOSE_5", "Place to Lose 5", Payout::new(5, 8), 2.50),
    },
    BoxNumber {
        place: ("PLACE_6", "Place 6", Payout::new(7, 6), 1.52),
        buy: ("BUY_6", "Buy 6", 2.73),
        lay: ("LAY_6", "Lay 6", 2.27),
        place_to_lose: ("PLACE_TO_LOSE_6", "Place to Lose 6", Payout::new(4, 5), 1.82),
    },
    BoxNumber {
        place: ("PLACE_8", "Place 8", Payout::new(7, 6), 1.52),
        buy: ("BUY_8", "Buy 8", 2.73),
        lay: ("LAY_8", "Lay 8", 2.27),
        place_to_lose: ("PLACE_TO_LOSE_8", "Place to Lose 8", Payout::new(4, 5), 1.82),
    },
    BoxNumber {
        place: ("PLACE_9", "Place 9", Payout::new(7, 5), 4.00),
        buy: ("BUY_9", "Buy 9", 3.00),
        lay: ("LAY_9", "Lay 9", 2.00),
        place_to_lose: ("PLACE_TO_LOSE_9", "Place to Lose 9", Payout::new(5, 8), 2.50),
    },
    BoxNumber {
        place: ("PLACE_10", "Place 10", Payout::new(9, 5), 6.67),
        buy: ("BUY_10", "Buy 10", 3.33),
        lay: ("LAY_10", "Lay 10", 1.67),
        place_to_lose: ("PLACE_TO_LOSE_10", "Place to Lose 10", Payout::new(5, 11), 3.03),
    },
];

fn line_bets() -> Vec<BetDefinition> {
    vec![
        BetDefinition {
            id: "PASS_LINE",
            name: "Pass Line",
            category: BetCategory::Line,
            working: Working::Always,
            requires_come_out: true,
            house_edge: 1.41,
            description: "Wins on 7 or 11 on the come-out, loses on 2, 3 or 12, then wins if the point repeats before a 7.",
            ..BASE
        },
        BetDefinition {
            id: "DONT_PASS",
            name: "Don't Pass",
            category: BetCategory::Line,
            side: Side::Wrong,
            working: Working::Always,
            requires_come_out: true,
            house_edge: 1.36,
            description: "Wins on 2 or 3 on the come-out (12 pushes), loses on 7 or 11, then wins if a 7 comes before the point.",
            ..BASE
        },
        BetDefinition {
            id: "COME",
            name: "Come",
            category: BetCategory::Come,
            working: Working::Always,
            requires_point: true,
            house_edge: 1.41,
            description: "A pass line bet made after the point; travels to the next point number rolled.",
            ..BASE
        },
        BetDefinition {
            id: "DONT_COME",
            name: "Don't Come",
            category: BetCategory::Come,
            side: Side::Wrong,
            working: Working::Always,
            requires_point: true,
            house_edge: 1.36,
            description: "A don't pass bet made after the point; travels to the next point number rolled.",
            ..BASE
        },
    ]
}

fn odds_bets() -> Vec<BetDefinition> {
    let odds = |id: &'static str,
                name: &'static str,
                side: Side,
                base: &'static str,
                description: &'static str| BetDefinition {
        id,
        name,
        category: BetCategory::Odds,
        side,
        payout: Payout::VARIABLE,
        working: Working::Always,
        base: Some(base),
        requires_point: true,
        house_edge: 0.0,
        description,
        ..BASE
    };
    vec![
        odds("PASS_ODDS", "Pass Odds", Side::Right, "PASS_LINE", "True odds behind the pass line."),
        odds(
            "DONT_PASS_ODDS",
            "Don't Pass Odds",
            Side::Wrong,
            "DONT_PASS",
            "True odds laid behind the don't pass.",
        ),
        odds("COME_ODDS", "Come Odds", Side::Right, "COME", "True odds behind a come point; off on the come-out."),
        odds(
            "DONT_COME_ODDS",
            "Don't Come Odds",
            Side::Wrong,
            "DONT_COME",
            "True odds laid behind a don't come point.",
        ),
    ]
}

fn box_bets() -> Vec<BetDefinition> {
    let mut definitions = Vec::with_capacity(BOX_NUMBERS.len() * 4);
    for (number, row) in POINT_NUMBERS.iter().copied().zip(BOX_NUMBERS.iter()) {
        let (id, name, payout, house_edge) = row.place;
        definitions.push(BetDefinition {
            id,
            name,
            category: BetCategory::Place,
            payout,
            working: Working::Conditional,
            number: Some(number),
            house_edge,
            description: "Wins when the number rolls before a 7; stays up after a win.",
            ..BASE
        });
    }
    for (number, row) in POINT_NUMBERS.iter().copied().zip(BOX_NUMBERS.iter()) {
        let (id, name, house_edge) = row.buy;
        definitions.push(BetDefinition {
            id,
            name,
            category: BetCategory::Buy,
            payout: true_odds(number).unwrap_or(Payout::EVEN),
            working: Working::Conditional,
            number: Some(number),
            commission_bps: COMMISSION_BPS,
            house_edge,
            description: "Pays true odds when the number rolls before a 7, less a 5% commission.",
            ..BASE
        });
    }
    for (number, row) in POINT_NUMBERS.iter().copied().zip(BOX_NUMBERS.iter()) {
        let (id, name, house_edge) = row.lay;
        definitions.push(BetDefinition {
            id,
            name,
            category: BetCategory::Lay,
            side: Side::Wrong,
            payout: true_odds_for(Side::Wrong, number).unwrap_or(Payout::EVEN),
            working: Working::Conditional,
            number: Some(number),
            commission_bps: COMMISSION_BPS,
            house_edge,
            description: "Pays true odds when a 7 rolls before the number, less a 5% commission.",
            ..BASE
        });
    }
    for (number, row) in POINT_NUMBERS.iter().copied().zip(BOX_NUMBERS.iter()) {
        let (id, name, payout, house_edge) = row.place_to_lose;
        definitions.push(BetDefinition {
            id,
            name,
            category: BetCategory::PlaceToLose,
            side: Side::Wrong,
            payout,
            working: Working::Conditional,
            number: Some(number),
            house_edge,
            description: "Wins when a 7 rolls before the number; no commission.",
            ..BASE
        });
    }
    definitions
}

fn hard_ways() -> Vec<BetDefinition> {
    let hard = |id: &'static str, name: &'static str, number: u8, payout: Payout, house_edge: f64| {
        BetDefinition {
            id,
            name,
            category: BetCategory::HardWay,
            payout,
            working: Working::Conditional,
            number: Some(number),
            house_edge,
            description: "Wins on the number rolled as a pair; loses on the easy way or a 7.",
            ..BASE
        }
    };
    vec![
        hard("HARD_4", "Hard 4", 4, Payout::new(7, 1), 11.11),
        hard("HARD_6", "Hard 6", 6, Payout::new(9, 1), 9.09),
        hard("HARD_8", "Hard 8", 8, Payout::new(9, 1), 9.09),
        hard("HARD_10", "Hard 10", 10, Payout::new(7, 1), 11.11),
    ]
}

fn one_roll_bets() -> Vec<BetDefinition> {
    let prop = |id: &'static str,
                name: &'static str,
                winning_totals: &'static [u8],
                payout: Payout,
                house_edge: f64,
                description: &'static str| BetDefinition {
        id,
        name,
        payout,
        winning_totals,
        house_edge,
        description,
        ..BASE
    };
    vec![
        BetDefinition {
            id: "FIELD",
            name: "Field",
            category: BetCategory::Field,
            winning_totals: &[2, 3, 4, 9, 10, 11, 12],
            house_edge: 2.78,
            description: "One roll: 3, 4, 9, 10, 11 pay even money; 2 pays double; 12 pays double or triple.",
            ..BASE
        },
        prop("ANY_SEVEN", "Any Seven", &[7], Payout::new(4, 1), 16.67, "One roll: any 7."),
        prop("ANY_CRAPS", "Any Craps", &[2, 3, 12], Payout::new(7, 1), 11.11, "One roll: 2, 3 or 12."),
        prop("ELEVEN", "Eleven", &[11], Payout::new(15, 1), 11.11, "One roll: 11."),
        prop("ACE_DEUCE", "Ace-Deuce", &[3], Payout::new(15, 1), 11.11, "One roll: 3."),
        prop("ACES", "Aces", &[2], Payout::new(30, 1), 13.89, "One roll: 2."),
        prop("BOXCARS", "Boxcars", &[12], Payout::new(30, 1), 13.89, "One roll: 12."),
    ]
}

fn split_bets() -> Vec<BetDefinition> {
    let split = |id: &'static str,
                 name: &'static str,
                 category: BetCategory,
                 legs: &'static [SplitLeg],
                 house_edge: f64,
                 description: &'static str| BetDefinition {
        id,
        name,
        category,
        payout: Payout::VARIABLE,
        legs,
        house_edge,
        description,
        ..BASE
    };
    vec![
        split(
            "HORN",
            "Horn",
            BetCategory::Horn,
            HORN_LEGS,
            12.5,
            "One roll: stake split evenly across 2, 3, 11 and 12.",
        ),
        split(
            "HORN_HIGH_2",
            "Horn High Aces",
            BetCategory::Horn,
            HORN_HIGH_2_LEGS,
            12.22,
            "One roll: horn with a double unit on 2.",
        ),
        split(
            "HORN_HIGH_3",
            "Horn High Ace-Deuce",
            BetCategory::Horn,
            HORN_HIGH_3_LEGS,
            12.22,
            "One roll: horn with a double unit on 3.",
        ),
        split(
            "HORN_HIGH_11",
            "Horn High Yo",
            BetCategory::Horn,
            HORN_HIGH_11_LEGS,
            12.22,
            "One roll: horn with a double unit on 11.",
        ),
        split(
            "HORN_HIGH_12",
            "Horn High Boxcars",
            BetCategory::Horn,
            HORN_HIGH_12_LEGS,
            12.22,
            "One roll: horn with a double unit on 12.",
        ),
        split(
            "WORLD",
            "World",
            BetCategory::Horn,
            WORLD_LEGS,
            13.33,
            "One roll: horn plus any seven; a 7 pushes.",
        ),
        split(
            "C_AND_E",
            "Craps & Eleven",
            BetCategory::Combination,
            C_AND_E_LEGS,
            11.11,
            "One roll: half on any craps, half on 11.",
        ),
        split(
            "THREE_WAY_CRAPS",
            "Three-Way Craps",
            BetCategory::Combination,
            THREE_WAY_CRAPS_LEGS,
            12.96,
            "One roll: stake split across 2, 3 and 12.",
        ),
        split(
            "HIGH_LOW",
            "High-Low",
            BetCategory::Combination,
            HIGH_LOW_LEGS,
            13.89,
            "One roll: half on 2, half on 12.",
        ),
    ]
}

fn hop_bets() -> Vec<BetDefinition> {
    HOPS.iter()
        .map(|&(a, b, id, name)| {
            let pair = a == b;
            BetDefinition {
                id,
                name,
                category: BetCategory::Hop,
                payout: if pair {
                    Payout::new(30, 1)
                } else {
                    Payout::new(15, 1)
                },
                dice: Some((a, b)),
                house_edge: if pair { 13.89 } else { 11.11 },
                description: "One roll: the exact dice combination, in either order.",
                ..BASE
            }
        })
        .collect()
}

fn big_bets() -> Vec<BetDefinition> {
    let big = |id: &'static str, name: &'static str, number: u8| BetDefinition {
        id,
        name,
        category: BetCategory::Big,
        working: Working::Always,
        number: Some(number),
        house_edge: 9.09,
        description: "Even money when the number rolls before a 7.",
        ..BASE
    };
    vec![big("BIG_6", "Big 6", 6), big("BIG_8", "Big 8", 8)]
}

fn bonus_bets() -> Vec<BetDefinition> {
    let bonus = |id: &'static str,
                 name: &'static str,
                 payout: Payout,
                 winning_totals: &'static [u8],
                 house_edge: f64,
                 description: &'static str| BetDefinition {
        id,
        name,
        category: BetCategory::Bonus,
        payout,
        working: Working::Always,
        winning_totals,
        house_edge,
        description,
        ..BASE
    };
    vec![
        bonus(
            "FIRE",
            "Fire Bet",
            Payout::VARIABLE,
            &[],
            20.83,
            "Pays 24, 249 or 999 to 1 at the seven-out when the shooter made 4, 5 or 6 different points.",
        ),
        bonus(
            "ALL_SMALL",
            "All Small",
            Payout::new(34, 1),
            &[2, 3, 4, 5, 6],
            7.76,
            "Wins once 2, 3, 4, 5 and 6 all roll before the seven-out.",
        ),
        bonus(
            "ALL_TALL",
            "All Tall",
            Payout::new(34, 1),
            &[8, 9, 10, 11, 12],
            7.76,
            "Wins once 8, 9, 10, 11 and 12 all roll before the seven-out.",
        ),
        bonus(
            "MAKE_EM_ALL",
            "Make 'Em All",
            Payout::new(175, 1),
            &[2, 3, 4, 5, 6, 8, 9, 10, 11, 12],
            7.46,
            "Wins once every total except 7 rolls before the seven-out.",
        ),
    ]
}

fn standard_definitions() -> Vec<BetDefinition> {
    let mut definitions = Vec::with_capacity(80);
    definitions.extend(line_bets());
    definitions.extend(odds_bets());
    definitions.extend(box_bets());
    definitions.extend(hard_ways());
    definitions.extend(one_roll_bets());
    definitions.extend(split_bets());
    definitions.extend(hop_bets());
    definitions.extend(big_bets());
    definitions.extend(bonus_bets());
    definitions
}
