use thiserror::Error;

use crate::vector::Vec2;

/// Cell outside the playable rectangle (a space in the map text)
pub const VOID: u8 = u8::MAX;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("{grid} grid has no rows")]
    Empty { grid: &'static str },
    #[error("{grid} grid row {row} is {found} cells wide, expected {expected}")]
    Jagged {
        grid: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{grid} grid is {found_w}x{found_h}, walls grid is {expected_w}x{expected_h}")]
    DimensionMismatch {
        grid: &'static str,
        expected_w: usize,
        expected_h: usize,
        found_w: usize,
        found_h: usize,
    },
    #[error("{grid} grid has invalid cell {ch:?} at row {row}, column {col}")]
    InvalidCell {
        grid: &'static str,
        row: usize,
        col: usize,
        ch: char,
    },
    #[error("walls grid is open at border cell row {row}, column {col}")]
    OpenBorder { row: usize, col: usize },
    #[error("map file is missing the [{0}] section")]
    MissingSection(&'static str),
    #[error("map file has more than one [{0}] section")]
    DuplicateSection(&'static str),
    #[error("map file line {line}: unknown section header {header:?}")]
    UnknownSection { line: usize, header: String },
    #[error("map file line {line}: row appears before any section header")]
    RowOutsideSection { line: usize },
}

/// One layer of tiles, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Parses equal-length rows of ASCII digits, spaces become [`VOID`]
    pub fn from_rows<S: AsRef<str>>(grid: &'static str, rows: &[S]) -> Result<Grid, MapError> {
        let width = match rows.first() {
            Some(row) => row.as_ref().chars().count(),
            None => return Err(MapError::Empty { grid }),
        };
        if width == 0 {
            return Err(MapError::Empty { grid });
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Jagged {
                    grid,
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '0'..='9' => ch as u8 - b'0',
                    ' ' => VOID,
                    _ => return Err(MapError::InvalidCell { grid, row, col, ch }),
                };
                cells.push(cell);
            }
        }

        Ok(Grid {
            width,
            height: rows.len(),
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile under `p`, truncating to (column, row).
    /// `p` must lie inside the grid; the walls border keeps every ray and move in bounds.
    #[inline]
    pub fn tile_at(&self, p: Vec2) -> u8 {
        let x = p.x as usize;
        let y = p.y as usize;
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// True when the tile under `p` is open space (id 0)
    #[inline]
    pub fn is_open(&self, p: Vec2) -> bool {
        p.x >= 0.0
            && p.y >= 0.0
            && self.cell(p.x as usize, p.y as usize) == Some(0)
    }

    fn check_border(&self) -> Result<(), MapError> {
        for row in 0..self.height {
            for col in 0..self.width {
                let on_border =
                    row == 0 || col == 0 || row == self.height - 1 || col == self.width - 1;
                if on_border && self.cells[row * self.width + col] == 0 {
                    return Err(MapError::OpenBorder { row, col });
                }
            }
        }
        Ok(())
    }
}

/// The level: three grids with identical dimensions. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub ceiling: Grid,
    pub walls: Grid,
    pub floor: Grid,
}

impl Map {
    pub fn new(ceiling: Grid, walls: Grid, floor: Grid) -> Result<Map, MapError> {
        walls.check_border()?;
        for (name, grid) in [("ceiling", &ceiling), ("floor", &floor)] {
            if grid.width != walls.width || grid.height != walls.height {
                return Err(MapError::DimensionMismatch {
                    grid: name,
                    expected_w: walls.width,
                    expected_h: walls.height,
                    found_w: grid.width,
                    found_h: grid.height,
                });
            }
        }
        Ok(Map {
            ceiling,
            walls,
            floor,
        })
    }

    pub fn from_rows<S: AsRef<str>>(ceiling: &[S], walls: &[S], floor: &[S]) -> Result<Map, MapError> {
        Map::new(
            Grid::from_rows("ceiling", ceiling)?,
            Grid::from_rows("walls", walls)?,
            Grid::from_rows("floor", floor)?,
        )
    }

    /// Parses a map file with `[ceiling]`, `[walls]` and `[floor]` sections.
    /// Empty lines and `#` comments are skipped. Inside a section a line of spaces
    /// is a row of void cells; outside one it is ignored.
    pub fn parse(text: &str) -> Result<Map, MapError> {
        const SECTIONS: [&str; 3] = ["ceiling", "walls", "floor"];
        let mut sections: [Option<Vec<&str>>; 3] = [None, None, None];
        let mut current: Option<usize> = None;

        for (i, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if current.is_none() && line.trim().is_empty() {
                continue;
            }
            if let Some(header) = line.trim().strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
                let idx = SECTIONS
                    .iter()
                    .position(|s| *s == header)
                    .ok_or_else(|| MapError::UnknownSection {
                        line: i + 1,
                        header: header.to_string(),
                    })?;
                if sections[idx].is_some() {
                    return Err(MapError::DuplicateSection(SECTIONS[idx]));
                }
                sections[idx] = Some(Vec::new());
                current = Some(idx);
                continue;
            }
            match current.and_then(|idx| sections[idx].as_mut()) {
                Some(rows) => rows.push(line),
                None => return Err(MapError::RowOutsideSection { line: i + 1 }),
            }
        }

        let [ceiling, walls, floor] = sections;
        let ceiling = ceiling.ok_or(MapError::MissingSection("ceiling"))?;
        let walls = walls.ok_or(MapError::MissingSection("walls"))?;
        let floor = floor.ok_or(MapError::MissingSection("floor"))?;
        Map::from_rows(&ceiling[..], &walls[..], &floor[..])
    }

    /// The built-in 45x7 level
    pub fn builtin() -> Result<Map, MapError> {
        const CEILING: [&str; 7] = [
            "111111111111111111111111111111111111111111111",
            "122223223232232111111111111111222232232322321",
            "122222221111232111111111111111222222211112321",
            "122221221232323232323232323232222212212323231",
            "122222221111232111111111111111222222211112321",
            "122223223232232111111111111111222232232322321",
            "111111111111111111111111111111111111111111111",
        ];
        const WALLS: [&str; 7] = [
            "111111111111111111111111111111111111111111111",
            "100000000000000111111111111111000000000000001",
            "103330001111000111111111111111033300011110001",
            "103000000000000000000000000000030000030000001",
            "103330001111000111111111111111033300011110001",
            "100000000000000111111111111111000000000000001",
            "111111111111111111111111111111111111111111111",
        ];
        const FLOOR: [&str; 7] = [
            "111111111111111111111111111111111111111111111",
            "122223223232232111111111111111222232232322321",
            "122222221111232111111111111111222222211112321",
            "122222221232323323232323232323222222212323231",
            "122222221111232111111111111111222222211112321",
            "122223223232232111111111111111222232232322321",
            "111111111111111111111111111111111111111111111",
        ];
        Map::from_rows(&CEILING, &WALLS, &FLOOR)
    }
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0RGB, alpha at 0
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Flat color per tile id
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub colors: [u32; 10],
    pub void: u32,
}

impl Palette {
    #[inline]
    pub fn color(&self, tile: u8) -> u32 {
        match self.colors.get(tile as usize) {
            Some(&c) => c,
            None => self.void,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                pack_rgb(0, 0, 0),
                pack_rgb(0xAA, 0, 0),
                pack_rgb(0, 0xAA, 0),
                pack_rgb(0, 0, 0xAA),
                pack_rgb(0xAA, 0xAA, 0),
                pack_rgb(0, 0xAA, 0xAA),
                pack_rgb(0xAA, 0, 0xAA),
                pack_rgb(0xAA, 0xAA, 0xAA),
                pack_rgb(0x55, 0x55, 0x55),
                pack_rgb(0xAA, 0x55, 0),
            ],
            void: pack_rgb(0, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLS: [&str; 4] = ["1111", "1001", "1021", "1111"];
    const TILES: [&str; 4] = ["2222", "2332", "2332", "2222"];

    #[test]
    fn builtin_map_is_valid() {
        let map = Map::builtin().unwrap();
        assert_eq!(map.walls.width(), 45);
        assert_eq!(map.walls.height(), 7);
        assert_eq!(map.walls.tile_at(Vec2::new(3.5, 3.5)), 0);
        assert_eq!(map.walls.tile_at(Vec2::new(2.5, 3.5)), 3);
    }

    #[test]
    fn tile_at_truncates() {
        let map = Map::from_rows(&TILES, &WALLS, &TILES).unwrap();
        assert_eq!(map.walls.tile_at(Vec2::new(2.99, 2.01)), 2);
        assert_eq!(map.walls.tile_at(Vec2::new(1.0, 1.0)), 0);
        assert_eq!(map.ceiling.tile_at(Vec2::new(1.5, 2.5)), 3);
    }

    #[test]
    fn jagged_rows_are_rejected() {
        let err = Grid::from_rows("walls", &["111", "11", "111"]).unwrap_err();
        assert_eq!(
            err,
            MapError::Jagged {
                grid: "walls",
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn open_border_is_rejected() {
        let err = Map::from_rows(&TILES, &["1111", "0001", "1001", "1111"], &TILES).unwrap_err();
        assert_eq!(err, MapError::OpenBorder { row: 1, col: 0 });
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let err = Map::from_rows(&["222", "222", "222", "222"], &WALLS, &TILES).unwrap_err();
        assert!(matches!(err, MapError::DimensionMismatch { grid: "ceiling", .. }));
    }

    #[test]
    fn invalid_cell_is_rejected() {
        let err = Grid::from_rows("floor", &["12x"]).unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidCell {
                grid: "floor",
                row: 0,
                col: 2,
                ch: 'x'
            }
        );
    }

    #[test]
    fn spaces_are_void_and_solid() {
        let walls = ["  111 ", " 10011", "110001", "111111"];
        let tiles = ["  222 ", " 22222", "222222", "222222"];
        let map = Map::from_rows(&tiles, &walls, &tiles).unwrap();
        assert_eq!(map.walls.tile_at(Vec2::new(0.5, 0.5)), VOID);
        assert!(!map.walls.is_open(Vec2::new(0.5, 0.5)));
        assert!(map.walls.is_open(Vec2::new(2.5, 1.5)));
    }

    #[test]
    fn parse_reads_sections_in_any_order() {
        let text = "# test level\n[walls]\n1111\n1001\n1021\n1111\n\n[floor]\n2222\n2332\n2332\n2222\n[ceiling]\n2222\n2332\n2332\n2222\n";
        let map = Map::parse(text).unwrap();
        assert_eq!(map, Map::from_rows(&TILES, &WALLS, &TILES).unwrap());
    }

    #[test]
    fn parse_keeps_rows_of_void() {
        let walls = ["1111", "1001", "1111", "    ", "1111", "1001", "1111"];
        let tiles = ["2222", "2222", "2222", "    ", "2222", "2222", "2222"];
        let mut text = String::from("  \n");
        for (name, rows) in [("ceiling", &tiles), ("walls", &walls), ("floor", &tiles)] {
            text.push_str(&format!("[{name}]\n"));
            for row in rows.iter() {
                text.push_str(row);
                text.push('\n');
            }
        }
        let map = Map::parse(&text).unwrap();
        assert_eq!(map.walls.height(), 7);
        assert_eq!(map.walls.cell(0, 3), Some(VOID));
        assert_eq!(map.walls.tile_at(Vec2::new(1.5, 5.5)), 0);
        assert_eq!(map, Map::from_rows(&tiles, &walls, &tiles).unwrap());
    }

    #[test]
    fn parse_void_row_in_one_grid_is_a_mismatch() {
        let text = "[ceiling]\n111\n111\n[walls]\n111\n   \n111\n[floor]\n111\n111\n";
        assert!(matches!(
            Map::parse(text).unwrap_err(),
            MapError::DimensionMismatch { grid: "ceiling", expected_h: 3, found_h: 2, .. }
        ));
    }

    #[test]
    fn parse_reports_missing_and_duplicate_sections() {
        assert_eq!(
            Map::parse("[walls]\n111\n[floor]\n111\n").unwrap_err(),
            MapError::MissingSection("ceiling")
        );
        assert_eq!(
            Map::parse("[walls]\n111\n[walls]\n111\n").unwrap_err(),
            MapError::DuplicateSection("walls")
        );
        assert_eq!(
            Map::parse("111\n").unwrap_err(),
            MapError::RowOutsideSection { line: 1 }
        );
    }

    #[test]
    fn palette_matches_flat_materials() {
        let palette = Palette::default();
        assert_eq!(palette.color(1), 0x00AA0000);
        assert_eq!(palette.color(2), 0x0000AA00);
        assert_eq!(palette.color(3), 0x000000AA);
        assert_eq!(palette.color(VOID), palette.void);
    }
}
