use combat_core::{BattleOutcome, Roster, Side, Timestamp};

pub fn print_summary(
    encounter: &str,
    seed: u64,
    ended_at: Timestamp,
    outcome: Option<BattleOutcome>,
    roster: &Roster,
) {
    let verdict = match outcome {
        Some(outcome) => outcome.to_string(),
        None => "stalemate".to_string(),
    };
    println!("{encounter} (seed {seed}): {verdict} after {ended_at}");

    for side in [Side::Player, Side::Enemy] {
        println!("\n{side}:");
        for c in roster.side(side) {
            let state = match c.down_state {
                Some(down) => down.to_string(),
                None => format!("{}/{} hp", c.hp, c.max_hp),
            };
            println!("  {:<16} {:<14} kills: {}", c.name, state, c.kills);
        }
    }
}
