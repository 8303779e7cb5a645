use delve_core::{BattleState, BattleTurn, Coord, Player};
use tracing::debug;

/// Run an auto-battle on an enemy cell to completion.
///
/// A fresh battle starts when the player has none, the previous one is
/// finished, or it was bound to a different cell. Both sides swing for one
/// damage, player first, until one side drops. Starting from full HP the
/// player always wins with one hit point to spare. Victory marks the cell
/// as permanently cleared for this player.
pub fn resolve_battle(player: &mut Player, enemy_cell: Coord) -> BattleState {
    let mut battle = match player.battle.take() {
        Some(b) if !b.finished && b.enemy_cell == enemy_cell => b,
        _ => BattleState::new(enemy_cell),
    };

    while !battle.finished {
        match battle.turn {
            BattleTurn::Player => {
                battle.enemy_hp -= 1;
                battle.log.push("Player hits the enemy! -1 HP".to_string());
                if battle.enemy_hp <= 0 {
                    battle.finished = true;
                    battle.victory = Some(true);
                    battle.log.push("Victory! The enemy is defeated.".to_string());
                }
                battle.turn = BattleTurn::Enemy;
            }
            BattleTurn::Enemy => {
                battle.player_hp -= 1;
                battle.log.push("Enemy hits the player! -1 HP".to_string());
                if battle.player_hp <= 0 {
                    battle.finished = true;
                    battle.victory = Some(false);
                    battle.log.push("Defeat! The player has fallen.".to_string());
                }
                battle.turn = BattleTurn::Player;
            }
        }
    }

    if battle.victory == Some(true) {
        player.cleared_enemy_cells.insert(enemy_cell);
    }
    debug!(
        player = %player.id,
        cell = %enemy_cell,
        victory = ?battle.victory,
        "battle resolved"
    );

    player.battle = Some(battle.clone());
    battle
}
