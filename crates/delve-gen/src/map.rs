use delve_core::Coord;

/// Structural role of a cell while the pipeline is still running,
/// before tile identifiers are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    /// Unclaimed space.
    Void,
    /// Room wall, tagged with the owning room when there is one.
    Wall(Option<u32>),
    /// Room floor, tagged with the owning room.
    Floor(Option<u32>),
    /// Corridor carved through void.
    Corridor,
    /// Room wall crossed by a corridor, pending door validation.
    DoorCandidate(Option<u32>),
    /// A validated door.
    Door,
}

impl Structure {
    /// Whether this structure blocks a door gap (wall, void, or another
    /// candidate count as solid for the validation rule).
    pub fn is_solid_for_door(self) -> bool {
        matches!(
            self,
            Self::Wall(_) | Self::Void | Self::DoorCandidate(_)
        )
    }
}

/// The square working map the generation passes mutate in place.
#[derive(Debug)]
pub struct MapGrid {
    size: i32,
    cells: Vec<Structure>,
}

impl MapGrid {
    /// A map of `size`² cells, all void.
    pub fn new(size: i32) -> Self {
        Self {
            size,
            cells: vec![Structure::Void; (size * size) as usize],
        }
    }

    /// Side length of the map.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Whether the coordinate lies on the map.
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.size && c.y >= 0 && c.y < self.size
    }

    /// The structure at `c`; out-of-bounds reads as void.
    pub fn get(&self, c: Coord) -> Structure {
        if self.in_bounds(c) {
            self.cells[(c.y * self.size + c.x) as usize]
        } else {
            Structure::Void
        }
    }

    /// Write the structure at `c`. Out-of-bounds writes are dropped.
    pub fn set(&mut self, c: Coord, s: Structure) {
        if self.in_bounds(c) {
            self.cells[(c.y * self.size + c.x) as usize] = s;
        }
    }

    /// Iterate every coordinate on the map, row by row.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Coord::new(x, y)))
    }
}
