use delve_core::{Coord, Player, TileGrid};

/// Radius of the per-player visibility disc.
pub const VISIBLE_RADIUS: i32 = 3;

/// The enlarged Manhattan disc around `center`:
/// all offsets with `|dx| + |dy| <= radius * 1.5`, computed in integers.
pub fn visible_disc(center: Coord, radius: i32) -> Vec<Coord> {
    let mut disc = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if 2 * (dx.abs() + dy.abs()) <= 3 * radius {
                disc.push(center.offset(dx, dy));
            }
        }
    }
    disc
}

/// Recompute what the player can see from where they stand.
///
/// `visible_cells` is replaced wholesale; `explored_cells` only ever grows.
/// Touched chunks are forced into the grid cache so later reads are
/// consistent snapshots of what the player was shown.
pub fn refresh_visibility(player: &mut Player, grid: &mut TileGrid) {
    let disc = visible_disc(player.position, VISIBLE_RADIUS);
    for &coord in &disc {
        grid.ensure_loaded(coord);
    }
    player.visible_cells = disc.iter().copied().collect();
    player.explored_cells.extend(disc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{InMemoryChunkSource, PlayerId};

    fn empty_grid() -> TileGrid {
        TileGrid::new(10, Box::new(InMemoryChunkSource::new()))
    }

    #[test]
    fn disc_shape_at_radius_three() {
        let disc = visible_disc(Coord::new(0, 0), VISIBLE_RADIUS);
        assert!(disc.contains(&Coord::new(0, 0)));
        assert!(disc.contains(&Coord::new(3, 1)));
        assert!(disc.contains(&Coord::new(0, -4)));
        assert!(!disc.iter().any(|c| c.x.abs() + c.y.abs() > 4));
    }

    #[test]
    fn visible_cells_are_replaced_on_refresh() {
        let mut grid = empty_grid();
        let mut player = Player::new(PlayerId::from("p1"), "Shadowheart", Coord::new(0, 0));
        refresh_visibility(&mut player, &mut grid);
        assert!(player.visible_cells.contains(&Coord::new(3, 0)));

        player.position = Coord::new(20, 20);
        refresh_visibility(&mut player, &mut grid);
        assert!(!player.visible_cells.contains(&Coord::new(3, 0)));
        assert!(player.visible_cells.contains(&Coord::new(20, 23)));
    }

    #[test]
    fn explored_cells_are_monotonic() {
        let mut grid = empty_grid();
        let mut player = Player::new(PlayerId::from("p1"), "Shadowheart", Coord::new(0, 0));
        refresh_visibility(&mut player, &mut grid);
        let first: Vec<Coord> = player.explored_cells.iter().copied().collect();

        player.position = Coord::new(20, 20);
        refresh_visibility(&mut player, &mut grid);
        for coord in first {
            assert!(player.explored_cells.contains(&coord));
        }
    }
}
