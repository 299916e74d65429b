//! Zone classification for grid coordinates.
//!
//! Zones aren't stored anywhere: membership is a pure function of the
//! coordinate. Rows below the boundary form the staging zone, restricted to
//! a narrow band around the centre column. Rows at or above the boundary
//! form the building zone and span the full width.

use crate::config::GeneratorConfig;
use crate::grid::Coord;

/// Which set of generation rules applies to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Staging,
    Building,
    Outside,
}

/// Zone geometry of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneLayout {
    pub width: usize,
    pub height: usize,
    pub boundary_row: usize,
    /// Inclusive staging band column range.
    pub band_min: i32,
    pub band_max: i32,
    pub place_exit: bool,
}

impl ZoneLayout {
    pub fn new(
        width: usize,
        height: usize,
        boundary_row: usize,
        staging_half_width: usize,
        place_exit: bool,
    ) -> Self {
        let centre = (width.saturating_sub(1) / 2) as i32;
        let half = i32::try_from(staging_half_width).unwrap_or(i32::MAX);
        Self {
            width,
            height,
            boundary_row,
            band_min: centre.saturating_sub(half).max(0),
            band_max: centre.saturating_add(half).min(width as i32 - 1),
            place_exit,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            config.width,
            config.height,
            config.zone_boundary_row,
            config.staging_half_width,
            config.place_exit,
        )
    }

    pub fn centre_column(&self) -> i32 {
        (self.width.saturating_sub(1) / 2) as i32
    }

    pub fn zone_of(&self, c: Coord) -> Zone {
        if c.x < 0 || c.y < 0 || c.x as usize >= self.width || c.y as usize >= self.height {
            return Zone::Outside;
        }
        if (c.y as usize) >= self.boundary_row {
            Zone::Building
        } else if c.x >= self.band_min && c.x <= self.band_max {
            Zone::Staging
        } else {
            Zone::Outside
        }
    }

    pub fn is_valid(&self, c: Coord) -> bool {
        self.zone_of(c) != Zone::Outside
    }

    pub fn is_building(&self, c: Coord) -> bool {
        self.zone_of(c) == Zone::Building
    }

    /// The fixed start cell: centre column, outermost staging row.
    pub fn start(&self) -> Coord {
        Coord::new(self.centre_column(), 0)
    }

    /// Topmost staging row, whose north edge meets the building.
    pub fn staging_top_row(&self) -> i32 {
        self.boundary_row as i32 - 1
    }

    /// Building cell reached from the staging connector. Never an objective.
    pub fn entrance(&self) -> Coord {
        Coord::new(self.centre_column(), self.boundary_row as i32)
    }

    /// Top of the centre column, when exit placement is on.
    pub fn exit(&self) -> Option<Coord> {
        self.place_exit
            .then(|| Coord::new(self.centre_column(), self.height as i32 - 1))
    }

    /// Building-zone coordinates, row-major.
    pub fn building_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.boundary_row..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Coord::new(x as i32, y as i32))
        })
    }

    pub fn building_cell_count(&self) -> usize {
        self.width * self.height.saturating_sub(self.boundary_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_layout() -> ZoneLayout {
        ZoneLayout::from_config(&GeneratorConfig::default())
    }

    #[test]
    fn oversized_band_clamps_to_grid() {
        let z = ZoneLayout::new(7, 10, 3, usize::MAX, false);
        assert_eq!((z.band_min, z.band_max), (0, 6));
        let z = ZoneLayout::new(7, 10, 3, 1 << 31, false);
        assert_eq!((z.band_min, z.band_max), (0, 6));
        assert_eq!(z.zone_of(z.start()), Zone::Staging);
    }

    #[test]
    fn staging_band_is_centred() {
        let z = default_layout();
        assert_eq!((z.band_min, z.band_max), (2, 4));
        assert_eq!(z.zone_of(Coord::new(2, 0)), Zone::Staging);
        assert_eq!(z.zone_of(Coord::new(4, 2)), Zone::Staging);
        assert_eq!(z.zone_of(Coord::new(1, 0)), Zone::Outside);
        assert_eq!(z.zone_of(Coord::new(5, 2)), Zone::Outside);
    }

    #[test]
    fn building_spans_full_width() {
        let z = default_layout();
        for x in 0..7 {
            assert_eq!(z.zone_of(Coord::new(x, 3)), Zone::Building);
            assert_eq!(z.zone_of(Coord::new(x, 9)), Zone::Building);
        }
        assert_eq!(z.zone_of(Coord::new(0, 10)), Zone::Outside);
        assert_eq!(z.zone_of(Coord::new(7, 5)), Zone::Outside);
        assert_eq!(z.zone_of(Coord::new(-1, 5)), Zone::Outside);
    }

    #[test]
    fn fixed_landmarks() {
        let z = default_layout();
        assert_eq!(z.start(), Coord::new(3, 0));
        assert_eq!(z.entrance(), Coord::new(3, 3));
        assert_eq!(z.staging_top_row(), 2);
        assert_eq!(z.exit(), None);

        let with_exit = ZoneLayout::new(7, 10, 3, 1, true);
        assert_eq!(with_exit.exit(), Some(Coord::new(3, 9)));
    }

    #[test]
    fn band_clamps_to_grid() {
        let z = ZoneLayout::new(1, 3, 2, 3, false);
        assert_eq!((z.band_min, z.band_max), (0, 0));
        assert_eq!(z.start(), Coord::new(0, 0));
        assert_eq!(z.entrance(), Coord::new(0, 2));
    }

    #[test]
    fn building_cells_row_major() {
        let z = ZoneLayout::new(3, 4, 2, 1, false);
        let cells: Vec<_> = z.building_cells().collect();
        assert_eq!(cells.len(), z.building_cell_count());
        assert_eq!(cells[0], Coord::new(0, 2));
        assert_eq!(cells[3], Coord::new(0, 3));
        assert!(cells.iter().all(|&c| z.is_building(c)));
    }
}
