use chrono::Utc;
use delve_core::tile::DOOR_OPEN;
use delve_core::{Cell, Coord, Direction, EventKind, Player, TileGrid, TileKind};
use rand::rngs::StdRng;
use tracing::debug;

use crate::dice;
use crate::events::EventResolver;
use crate::visibility;

/// Radius of the map window returned with a successful move. Wider than
/// the visibility disc so the client can render fog around the lit area.
pub const MAP_VIEW_RADIUS: i32 = 10;

/// Outcome of a roll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollResult {
    /// First die; 0 when the turn was skipped.
    pub die1: u32,
    /// Second die; 0 when the turn was skipped.
    pub die2: u32,
    /// Granted step budget; 0 when the turn was skipped.
    pub total: u32,
    /// Steps remaining, equal to `total` right after the roll.
    pub steps_left: u32,
}

/// Outcome of a move request. Rejections are values, not errors.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Whether the step was committed.
    pub success: bool,
    /// What happened, for the player.
    pub message: String,
    /// The player's position after the request.
    pub new_position: Coord,
    /// Steps remaining in the turn.
    pub steps_left: u32,
    /// Whether a cell event fired on this step.
    pub event_triggered: bool,
    /// The event's description, when one fired.
    pub event_message: Option<String>,
    /// The completed battle, when the step landed on a live enemy.
    pub battle: Option<delve_core::BattleState>,
    /// Map window around the new position.
    pub visible_cells: Vec<Cell>,
}

impl MoveResult {
    fn rejected(player: &Player, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            new_position: player.position,
            steps_left: player.steps_left(),
            event_triggered: false,
            event_message: None,
            battle: None,
            visible_cells: Vec::new(),
        }
    }
}

/// Start a turn for the player.
///
/// A pending skip consumes the turn: no dice are thrown, the roll comes
/// back all zeros, and the processed-event marks survive. A real roll
/// throws 2d6 plus the accumulated bonus (floored at 1), resets the bonus,
/// and clears the player's processed marks for the new turn.
pub fn roll_turn(player: &mut Player, rng: &mut StdRng, resolver: &mut EventResolver) -> RollResult {
    if player.turns_to_skip > 0 {
        player.consume_skip();
        debug!(player = %player.id, remaining = player.turns_to_skip, "turn skipped");
        return RollResult {
            die1: 0,
            die2: 0,
            total: 0,
            steps_left: 0,
        };
    }

    let roll = dice::roll_dice(rng, player.bonus_steps);
    player.bonus_steps = 0;
    player.begin_turn(roll.total, roll.die1, roll.die2);
    resolver.reset_for_player(&player.id);
    debug!(player = %player.id, total = roll.total, "turn rolled");

    RollResult {
        die1: roll.die1,
        die2: roll.die2,
        total: roll.total,
        steps_left: roll.total,
    }
}

/// Attempt one cardinal step.
///
/// Rejections leave the player untouched. An accepted step commits the
/// position, auto-opens adjacent doors, refreshes visibility, and then
/// either triggers combat (landing on a live enemy, regardless of budget)
/// or, when the budget is spent, ends the turn by dispatching the event on
/// the final cell and zeroing the roll.
pub fn attempt_move(
    player: &mut Player,
    grid: &mut TileGrid,
    resolver: &mut EventResolver,
    direction: Direction,
) -> MoveResult {
    if player.turns_to_skip > 0 {
        return MoveResult::rejected(player, "You must skip this turn.");
    }
    if player.current_roll == 0 {
        return MoveResult::rejected(player, "Roll the dice first.");
    }
    if player.steps_left() == 0 {
        return MoveResult::rejected(player, "No steps left this turn.");
    }

    let target = player.position.step(direction);
    let cell = grid.get_cell(target);
    if !cell.is_passable() {
        return MoveResult::rejected(player, "That way is blocked.");
    }
    if player.has_visited_this_turn(target) {
        return MoveResult::rejected(player, "Already crossed that cell this turn.");
    }

    player.record_step(target);
    open_adjacent_doors(grid, target);
    visibility::refresh_visibility(player, grid);

    let landed = grid.get_cell(target);
    let mut event_triggered = false;
    let mut event_message = None;
    let mut battle = None;

    if landed.event == EventKind::Enemy
        && !player.has_cleared(target)
        && !resolver.is_processed(&player.id, target)
    {
        // Combat fires the moment the enemy cell is entered, even with
        // budget to spare; the turn stays open afterwards. The cell is not
        // recorded as discovered: only turn-end dispatch does that, and a
        // cleared enemy is scrubbed from every later view anyway.
        let outcome = resolver.process(player, &landed);
        event_triggered = true;
        event_message = Some(outcome.message);
        battle = outcome.battle;
    } else if player.steps_left() == 0 {
        let outcome = resolver.process(player, &landed);
        if landed.event != EventKind::Empty {
            player.discovered_cells.insert(target, landed.event);
        }
        if outcome.applied {
            event_triggered = true;
            event_message = Some(outcome.message);
            battle = outcome.battle;
        }
        player.reset_turn();
        debug!(player = %player.id, position = %target, "turn ended");
    }

    MoveResult {
        success: true,
        message: format!("Moved to {target}."),
        new_position: target,
        steps_left: player.steps_left(),
        event_triggered,
        event_message,
        battle,
        visible_cells: map_window(player, grid),
    }
}

/// End the turn early. Zeroes the roll and step state; the final cell's
/// event is not dispatched (only exhausting the budget does that).
pub fn end_turn(player: &mut Player) {
    player.reset_turn();
    debug!(player = %player.id, "turn ended early");
}

/// Open every closed door on or cardinally adjacent to `position`.
/// Irreversible; already-open doors are left alone.
fn open_adjacent_doors(grid: &mut TileGrid, position: Coord) {
    for coord in std::iter::once(position).chain(position.neighbors()) {
        let mut cell = grid.get_cell(coord);
        if cell.tile_kind() == TileKind::DoorClosed {
            cell.tile_id = DOOR_OPEN.to_string();
            cell.last_updated = Utc::now();
            grid.update_cell(cell);
        }
    }
}

/// The map window around the player, with enemy cells this player already
/// cleared scrubbed back to empty so they do not re-render as threats.
fn map_window(player: &Player, grid: &mut TileGrid) -> Vec<Cell> {
    grid.get_cells_in_radius(player.position, MAP_VIEW_RADIUS)
        .into_iter()
        .map(|mut cell| {
            if cell.event == EventKind::Enemy && player.has_cleared(cell.coord()) {
                cell.event = EventKind::Empty;
                cell.event_value = None;
            }
            cell
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::tile::DOOR_CLOSED;
    use delve_core::{ChunkKey, ChunkRecord, InMemoryChunkSource, PlayerId};
    use rand::SeedableRng;

    /// A grid of all-floor cells covering `0..size` on both axes.
    fn floor_grid(size: i32) -> TileGrid {
        let cells: Vec<Cell> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Cell::new(Coord::new(x, y), "floor_0")))
            .collect();
        let mut chunks: std::collections::HashMap<ChunkKey, ChunkRecord> = Default::default();
        for cell in cells {
            chunks
                .entry(ChunkKey::containing(cell.coord(), 10))
                .or_insert_with(|| ChunkRecord { cells: Vec::new() })
                .cells
                .push(cell);
        }
        let source: InMemoryChunkSource = chunks.into_iter().collect();
        TileGrid::new(10, Box::new(source))
    }

    fn put_cell(grid: &mut TileGrid, cell: Cell) {
        grid.update_cell(cell);
    }

    fn player_at(coord: Coord) -> Player {
        Player::new(PlayerId::from("p1"), "Lae'zel", coord)
    }

    fn event_cell(coord: Coord, kind: EventKind, value: u32) -> Cell {
        let mut cell = Cell::new(coord, "floor_0");
        cell.event = kind;
        cell.event_value = Some(value);
        cell
    }

    #[test]
    fn five_step_walk_ends_the_turn_at_the_budget() {
        let mut grid = floor_grid(20);
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(5, 2, 3);

        for step in 1..=5 {
            let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
            assert!(result.success, "step {step} rejected: {}", result.message);
            assert_eq!(result.new_position, Coord::new(step, 0));
        }

        assert_eq!(p.position, Coord::new(5, 0));
        assert_eq!(p.steps_taken, 0, "turn should have auto-ended");
        assert_eq!(p.current_roll, 0);

        let extra = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        assert!(!extra.success);
        assert_eq!(extra.message, "Roll the dice first.");
    }

    #[test]
    fn move_without_a_roll_is_rejected() {
        let mut grid = floor_grid(10);
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        assert!(!result.success);
        assert_eq!(p.position, Coord::new(0, 0));
    }

    #[test]
    fn move_into_a_wall_is_rejected_without_state_change() {
        let mut grid = floor_grid(10);
        put_cell(&mut grid, Cell::new(Coord::new(1, 0), "wall_single_0"));
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(5, 2, 3);

        let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        assert!(!result.success);
        assert_eq!(result.steps_left, 5);
        assert_eq!(p.steps_taken, 0);
    }

    #[test]
    fn off_grid_cells_are_impassable() {
        let mut grid = floor_grid(10);
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(5, 2, 3);
        let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Left);
        assert!(!result.success);
    }

    #[test]
    fn revisit_within_a_turn_is_rejected() {
        let mut grid = floor_grid(10);
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(6, 3, 3);

        assert!(attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right).success);
        assert!(attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right).success);
        // (1,0) is already in this turn's path.
        let back = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Left);
        assert!(!back.success);
        assert_eq!(back.message, "Already crossed that cell this turn.");
        assert_eq!(p.position, Coord::new(2, 0));
    }

    #[test]
    fn skip_pending_blocks_movement() {
        let mut grid = floor_grid(10);
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(5, 2, 3);
        p.turns_to_skip = 1;
        let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        assert!(!result.success);
        assert_eq!(result.message, "You must skip this turn.");
    }

    #[test]
    fn doors_open_on_approach_and_stay_open() {
        let mut grid = floor_grid(10);
        put_cell(&mut grid, Cell::new(Coord::new(2, 0), DOOR_CLOSED));
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(6, 3, 3);

        // Stepping to (1,0) is adjacent to the door at (2,0).
        assert!(attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right).success);
        assert_eq!(grid.get_cell(Coord::new(2, 0)).tile_id, DOOR_OPEN);
        // Walking through keeps it open.
        assert!(attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right).success);
        assert_eq!(grid.get_cell(Coord::new(2, 0)).tile_id, DOOR_OPEN);
    }

    #[test]
    fn bonus_on_the_final_cell_feeds_the_next_roll() {
        let mut grid = floor_grid(10);
        put_cell(&mut grid, event_cell(Coord::new(1, 0), EventKind::BonusSteps, 2));
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(1, 1, 0);

        let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        assert!(result.success);
        assert!(result.event_triggered);
        assert_eq!(p.bonus_steps, 2);
        assert_eq!(p.discovered_cells[&Coord::new(1, 0)], EventKind::BonusSteps);

        let mut rng = StdRng::seed_from_u64(11);
        let expected = dice::roll_dice(&mut StdRng::seed_from_u64(11), 2);
        let roll = roll_turn(&mut p, &mut rng, &mut resolver);
        assert_eq!(roll.total, expected.die1 + expected.die2 + 2);
        assert_eq!(p.bonus_steps, 0);
    }

    #[test]
    fn mid_turn_cells_do_not_fire_events() {
        let mut grid = floor_grid(10);
        put_cell(&mut grid, event_cell(Coord::new(1, 0), EventKind::BonusSteps, 2));
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(3, 1, 2);

        let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        assert!(result.success);
        assert!(!result.event_triggered);
        assert_eq!(p.bonus_steps, 0);
    }

    #[test]
    fn enemy_entry_triggers_combat_with_budget_to_spare() {
        let mut grid = floor_grid(10);
        put_cell(&mut grid, event_cell(Coord::new(1, 0), EventKind::Enemy, 1));
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(6, 3, 3);

        let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        assert!(result.success);
        assert!(result.event_triggered);
        let battle = result.battle.unwrap();
        assert_eq!(battle.victory, Some(true));
        assert_eq!(battle.enemy_hp, 0);
        assert_eq!(battle.player_hp, 1);
        // The turn stays open after combat.
        assert_eq!(p.steps_left(), 5);
        assert!(p.has_cleared(Coord::new(1, 0)));
        // Discovery is a turn-end mechanism; combat entry leaves it alone.
        assert!(!p.discovered_cells.contains_key(&Coord::new(1, 0)));
    }

    #[test]
    fn cleared_enemy_cell_is_quiet_on_return() {
        let mut grid = floor_grid(10);
        put_cell(&mut grid, event_cell(Coord::new(1, 0), EventKind::Enemy, 1));
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(6, 3, 3);
        attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        p.battle = None;

        // Next turn: walk onto the same cell again.
        p.begin_turn(6, 3, 3);
        resolver.reset_for_player(&p.id);
        let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        assert!(result.success);
        assert!(!result.event_triggered);
        assert!(result.battle.is_none());
    }

    #[test]
    fn cleared_enemies_are_scrubbed_from_the_map_window() {
        let mut grid = floor_grid(10);
        put_cell(&mut grid, event_cell(Coord::new(1, 0), EventKind::Enemy, 1));
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(6, 3, 3);

        let result = attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);
        let shown = result
            .visible_cells
            .iter()
            .find(|c| c.coord() == Coord::new(1, 0))
            .unwrap();
        assert_eq!(shown.event, EventKind::Empty);
        assert_eq!(shown.event_value, None);
    }

    #[test]
    fn skip_roll_returns_zeros_and_keeps_processed_marks() {
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        resolver.process(&mut p, &event_cell(Coord::new(0, 0), EventKind::BonusSteps, 1));
        assert!(resolver.is_processed(&p.id, Coord::new(0, 0)));

        p.turns_to_skip = 1;
        let mut rng = StdRng::seed_from_u64(1);
        let roll = roll_turn(&mut p, &mut rng, &mut resolver);
        assert_eq!(roll.total, 0);
        assert_eq!(p.turns_to_skip, 0);
        assert!(resolver.is_processed(&p.id, Coord::new(0, 0)));

        // The following real roll clears them.
        let roll = roll_turn(&mut p, &mut rng, &mut resolver);
        assert!(roll.total >= 2);
        assert!(!resolver.is_processed(&p.id, Coord::new(0, 0)));
    }

    #[test]
    fn end_turn_zeroes_the_roll_without_dispatch() {
        let mut grid = floor_grid(10);
        put_cell(&mut grid, event_cell(Coord::new(1, 0), EventKind::BonusSteps, 2));
        let mut resolver = EventResolver::new();
        let mut p = player_at(Coord::new(0, 0));
        p.begin_turn(6, 3, 3);
        attempt_move(&mut p, &mut grid, &mut resolver, Direction::Right);

        end_turn(&mut p);
        assert_eq!(p.current_roll, 0);
        assert_eq!(p.bonus_steps, 0, "ending early must not dispatch the cell");
        assert_eq!(p.path_taken, vec![Coord::new(1, 0)]);
    }
}
