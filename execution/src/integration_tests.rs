//! Multi-roll scenarios played through [Table].

use crate::{
    mocks::{create_table_with_player, init_logging},
    DiceSource, SeededDice, SettlementKind, Table, TableError, Transition,
};
use crapstable_types::craps::{GameState, Money, Point, TableConfig};

fn dollars(amount: i64) -> Money {
    Money::from_int(amount)
}

fn bankroll(table: &Table) -> Money {
    table.player("p1").unwrap().bankroll
}

fn bet_types(table: &Table) -> Vec<String> {
    table
        .player("p1")
        .unwrap()
        .bets
        .iter()
        .map(|bet| bet.bet_type.clone())
        .collect()
}

#[test]
fn test_pass_line_natural() {
    init_logging();
    let mut table = create_table_with_player(1000, &[(3, 4)]);
    table.place_bet("p1", "PASS_LINE", dollars(25), &[]).unwrap();
    assert_eq!(bankroll(&table), dollars(975));

    let (roll, messages) = table.execute_game_turn();
    assert_eq!(roll.total, 7);
    assert_eq!(messages, vec!["p1: PASS_LINE wins $25.00 ($50.00 returned)"]);
    assert_eq!(bankroll(&table), dollars(1025));
    assert_eq!(table.state(), GameState::ComeOut);
    assert!(bet_types(&table).is_empty());
}

#[test]
fn test_dont_pass_bars_twelve() {
    let mut table = create_table_with_player(1000, &[(6, 6)]);
    table.place_bet("p1", "DONT_PASS", dollars(10), &[]).unwrap();
    table.place_bet("p1", "PASS_LINE", dollars(10), &[]).unwrap();

    let turn = table.execute_turn();
    assert_eq!(turn.transition, Transition::Craps);
    let kinds: Vec<_> = turn.settlements.iter().map(|s| s.kind.clone()).collect();
    assert_eq!(kinds, vec![SettlementKind::Pushed, SettlementKind::Lost]);
    assert_eq!(bankroll(&table), dollars(990));
}

#[test]
fn test_place_six_stays_up() {
    let mut table = create_table_with_player(1000, &[(2, 2), (3, 3), (4, 4)]);
    table.execute_turn();
    table.place_bet("p1", "PLACE_6", dollars(24), &[]).unwrap();

    let (_, messages) = table.execute_game_turn();
    assert_eq!(messages, vec!["p1: PLACE_6 wins $28.00 (bet stays up)"]);
    assert_eq!(bankroll(&table), dollars(1004));
    assert_eq!(bet_types(&table), vec!["PLACE_6"]);

    let (_, messages) = table.execute_game_turn();
    assert!(messages.is_empty());
    assert_eq!(table.player("p1").unwrap().equity(), dollars(1028));
}

#[test]
fn test_buy_and_lay_commission() {
    let mut table = create_table_with_player(1000, &[(2, 2), (4, 4), (3, 4)]);
    table.execute_turn();
    table.place_bet("p1", "BUY_8", dollars(25), &[]).unwrap();
    table.place_bet("p1", "LAY_4", dollars(20), &[]).unwrap();
    assert_eq!(bankroll(&table), dollars(955));

    let (_, messages) = table.execute_game_turn();
    assert_eq!(
        messages,
        vec!["p1: BUY_8 wins $28.50 after $1.50 commission (bet stays up)"]
    );
    assert_eq!(bankroll(&table), Money::from_cents(98_350));

    // Seven-out: the buy loses, the lay wins and then comes down with the puck
    let turn = table.execute_turn();
    assert_eq!(turn.transition, Transition::SevenOut);
    let lay: Vec<_> = turn
        .settlements
        .iter()
        .filter(|s| s.bet_type == "LAY_4")
        .map(|s| (s.kind.clone(), s.credited))
        .collect();
    assert_eq!(
        lay,
        vec![
            (
                SettlementKind::Won {
                    net: Money::from_cents(950),
                    commission: Money::from_cents(50),
                    stays_up: true,
                },
                Money::from_cents(950),
            ),
            (SettlementKind::TakenDown, dollars(20)),
        ]
    );
    assert_eq!(bankroll(&table), Money::from_cents(101_300));
    assert!(bet_types(&table).is_empty());
}

#[test]
fn test_point_lifecycle_and_come_bets() {
    let mut table = create_table_with_player(1000, &[(2, 3), (4, 4), (2, 6), (1, 4)]);
    assert!(table.place_bet("p1", "COME", dollars(10), &[]).is_err());
    table.place_bet("p1", "PASS_LINE", dollars(10), &[]).unwrap();

    assert_eq!(table.execute_turn().transition, Transition::PointEstablished(5));
    assert_eq!(table.point(), Point::Five);
    table.place_bet("p1", "COME", dollars(10), &[]).unwrap();

    let (_, messages) = table.execute_game_turn();
    assert_eq!(messages, vec!["p1: COME moves to 8"]);

    // Come bet on 8 wins; the line waits on the 5
    let (_, messages) = table.execute_game_turn();
    assert_eq!(messages, vec!["p1: COME wins $10.00 ($20.00 returned)"]);

    let turn = table.execute_turn();
    assert_eq!(turn.transition, Transition::PointMade(5));
    assert_eq!(table.state(), GameState::ComeOut);
    assert_eq!(bankroll(&table), dollars(1020));
}

#[test]
fn test_odds_pay_true_odds() {
    let mut table = create_table_with_player(1000, &[(2, 2), (1, 3)]);
    table.place_bet("p1", "PASS_LINE", dollars(10), &[]).unwrap();
    table.execute_turn();
    table.place_bet("p1", "PASS_ODDS", dollars(30), &[]).unwrap();

    let (_, messages) = table.execute_game_turn();
    assert_eq!(
        messages,
        vec![
            "p1: PASS_LINE wins $10.00 ($20.00 returned)",
            "p1: PASS_ODDS wins $60.00 ($90.00 returned)",
        ]
    );
    assert_eq!(bankroll(&table), dollars(1070));
}

#[test]
fn test_odds_turned_off_do_not_outlive_the_point() {
    let mut table = create_table_with_player(1000, &[(3, 3), (3, 3), (2, 2), (3, 3)]);
    table.place_bet("p1", "PASS_LINE", dollars(10), &[]).unwrap();
    table.execute_turn();
    table.place_bet("p1", "PASS_ODDS", dollars(10), &[]).unwrap();
    table.turn_bet("p1", "PASS_ODDS", false).unwrap();

    let (_, messages) = table.execute_game_turn();
    assert_eq!(
        messages,
        vec![
            "p1: PASS_LINE wins $10.00 ($20.00 returned)",
            "p1: PASS_ODDS pushes, $10.00 returned",
        ]
    );
    assert!(bet_types(&table).is_empty());
    assert!(matches!(
        table.turn_bet("p1", "PASS_ODDS", true),
        Err(TableError::BetNotFound { .. })
    ));

    // A new point on 4, then a 6: nothing is left to pay
    assert_eq!(table.execute_turn().transition, Transition::PointEstablished(4));
    let (_, messages) = table.execute_game_turn();
    assert!(messages.is_empty());
    assert_eq!(bankroll(&table), dollars(1010));
}

#[test]
fn test_come_odds_off_on_come_out() {
    let mut table = create_table_with_player(1000, &[(2, 2), (3, 3), (1, 3), (3, 4)]);
    table.execute_turn();
    table.place_bet("p1", "COME", dollars(10), &[]).unwrap();
    table.execute_turn();
    table.place_bet("p1", "COME_ODDS", dollars(20), &[]).unwrap();
    assert_eq!(table.execute_turn().transition, Transition::PointMade(4));

    let (_, messages) = table.execute_game_turn();
    assert_eq!(
        messages,
        vec![
            "p1: COME loses $10.00",
            "p1: COME_ODDS pushes, $20.00 returned",
        ]
    );
    assert_eq!(bankroll(&table), dollars(990));
}

#[test]
fn test_one_roll_bets_always_leave() {
    let mut table = create_table_with_player(1000, &[(2, 4)]);
    for bet_type in ["FIELD", "ANY_SEVEN", "HORN", "HOP_2_4", "C_AND_E"] {
        table.place_bet("p1", bet_type, dollars(8), &[]).unwrap();
    }
    let turn = table.execute_turn();
    assert_eq!(turn.settlements.len(), 5);
    assert!(bet_types(&table).is_empty());
    // Only the hop hits: $8 at 15:1
    assert_eq!(bankroll(&table), dollars(1000 - 40 + 128));
}

#[test]
fn test_seven_out_takes_down_box_bets() {
    let mut table = create_table_with_player(1000, &[(2, 2), (3, 4)]);
    table.place_bet("p1", "PASS_LINE", dollars(10), &[]).unwrap();
    table.execute_turn();
    table.place_bet("p1", "PLACE_6", dollars(12), &[]).unwrap();
    table.place_bet("p1", "HARD_8", dollars(5), &[]).unwrap();
    table.turn_bet("p1", "HARD_8", false).unwrap();

    let (_, messages) = table.execute_game_turn();
    assert_eq!(
        messages,
        vec![
            "p1: PASS_LINE loses $10.00",
            "p1: PLACE_6 loses $12.00",
            "p1: HARD_8 taken down on the seven-out, $5.00 returned",
        ]
    );
    assert_eq!(bankroll(&table), dollars(978));
    assert!(bet_types(&table).is_empty());
}

#[test]
fn test_fire_bet_pays_at_seven_out() {
    let rolls = [
        (2, 2),
        (1, 3),
        (2, 3),
        (4, 1),
        (3, 3),
        (5, 1),
        (4, 4),
        (6, 2),
        (3, 4),
        (2, 2),
        (3, 4),
    ];
    let mut table = create_table_with_player(1000, &rolls);
    table.place_bet("p1", "FIRE", dollars(5), &[]).unwrap();
    table.place_bet("p1", "ALL_SMALL", dollars(5), &[]).unwrap();

    for _ in 0..rolls.len() - 1 {
        table.execute_turn();
    }
    assert_eq!(table.made_points().count_ones(), 4);
    assert_eq!(bet_types(&table), vec!["FIRE", "ALL_SMALL"]);

    let (_, messages) = table.execute_game_turn();
    assert_eq!(
        messages,
        vec![
            "p1: FIRE wins $120.00 ($125.00 returned)",
            "p1: ALL_SMALL loses $5.00",
        ]
    );
    assert_eq!(bankroll(&table), dollars(1115));
    assert_eq!(table.made_points(), 0);
}

#[test]
fn test_all_small_completes() {
    let mut table = create_table_with_player(1000, &[(1, 1), (1, 2), (2, 2), (2, 3), (3, 3)]);
    table.place_bet("p1", "ALL_SMALL", dollars(10), &[]).unwrap();
    for _ in 0..4 {
        table.execute_turn();
    }
    assert_eq!(table.player("p1").unwrap().bets[0].progress, 0b11_1100);

    let (_, messages) = table.execute_game_turn();
    assert_eq!(messages, vec!["p1: ALL_SMALL wins $340.00 ($350.00 returned)"]);
    assert_eq!(bankroll(&table), dollars(1340));
}

#[test]
fn test_seeded_dice_replay() {
    let mut first = SeededDice::new(b"table-7", 3);
    let mut second = SeededDice::new(b"table-7", 3);
    for _ in 0..50 {
        assert_eq!(first.roll().total, second.roll().total);
    }
}

#[test]
fn test_money_is_conserved() {
    init_logging();
    let mut table =
        Table::with_dice(TableConfig::default(), SeededDice::from_u64(42)).unwrap();
    for id in ["p1", "p2", "p3"] {
        table.add_player(id, id, dollars(2000)).unwrap();
    }

    for _ in 0..500 {
        for id in ["p1", "p2", "p3"] {
            let _ = table.place_bet(id, "FIELD", dollars(5), &[]);
            let player = table.player(id).unwrap();
            let has = |bet_type: &str| player.bets_of(bet_type).next().is_some();
            let (has_pass, has_place, has_hard) =
                (has("PASS_LINE"), has("PLACE_8"), has("HARD_6"));
            match table.state() {
                GameState::ComeOut if !has_pass => {
                    let _ = table.place_bet(id, "PASS_LINE", dollars(10), &[]);
                }
                GameState::Point => {
                    let _ = table.place_bet(id, "COME", dollars(5), &[]);
                    let _ = table.place_bet(id, "PASS_ODDS", dollars(10), &[]);
                }
                _ => {}
            }
            if !has_place {
                let _ = table.place_bet(id, "PLACE_8", dollars(12), &[]);
            }
            if !has_hard {
                let _ = table.place_bet(id, "HARD_6", dollars(5), &[]);
            }
        }

        let before: Money = table.players().map(|p| p.bankroll).sum();
        let felt_before: Money = table.players().map(|p| p.on_table()).sum();
        let turn = table.execute_turn();
        let after: Money = table.players().map(|p| p.bankroll).sum();
        let felt_after: Money = table.players().map(|p| p.on_table()).sum();

        let credited: Money = turn.settlements.iter().map(|s| s.credited).sum();
        assert_eq!(after - before, credited);
        assert!(felt_after <= felt_before);
        assert!(turn.settlements.iter().all(|s| !s.is_error()));

        for player in table.players() {
            assert!(!player.bankroll.is_negative());
            for bet in &player.bets {
                let def = table.bet_definition(&bet.bet_type).unwrap();
                assert!(!def.is_one_roll(), "{} survived a roll", bet.bet_type);
                if turn.transition == Transition::SevenOut {
                    assert!(!def.category.purged_on_seven_out());
                }
            }
        }
        assert_eq!(table.state() == GameState::Point, table.point().is_on());
    }
}
