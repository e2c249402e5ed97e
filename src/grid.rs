//! Dense and sparse 2D maps parsed from character grids.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{error::PuzzleError, parsing, point::Point};

/// A rectangular grid of single-byte cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Parses a rectangular block of lines. Ragged rows are rejected.
    pub fn parse(input: &str) -> Result<Self, PuzzleError> {
        Self::from_lines(&parsing::lines(input)?)
    }

    pub fn from_lines(lines: &[&str]) -> Result<Self, PuzzleError> {
        let width = lines.first().map_or(0, |line| line.len());
        if width == 0 {
            return Err(PuzzleError::EmptyInput);
        }
        let mut cells = Vec::with_capacity(width * lines.len());
        for (index, line) in lines.iter().enumerate() {
            if line.len() != width {
                return Err(PuzzleError::malformed(
                    index,
                    format!("row has {} cells, expected {width}", line.len()),
                ));
            }
            cells.extend_from_slice(line.as_bytes());
        }
        Ok(Self {
            cells,
            width,
            height: lines.len(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Point) -> bool {
        (0..self.width as i64).contains(&pos.x) && (0..self.height as i64).contains(&pos.y)
    }

    #[inline]
    pub fn get(&self, pos: Point) -> Option<u8> {
        self.index(pos).map(|i| self.cells[i])
    }

    #[inline]
    pub fn set(&mut self, pos: Point, cell: u8) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as i64)
            .flat_map(move |y| (0..self.width as i64).map(move |x| Point::new(x, y)))
    }

    /// The first position holding `cell`.
    pub fn find(&self, cell: u8) -> Option<Point> {
        memchr::memchr(cell, &self.cells).map(|i| self.point(i))
    }

    /// Numeric value of a `0`..=`9` cell.
    pub fn digit(&self, pos: Point) -> Option<u32> {
        self.get(pos)
            .filter(u8::is_ascii_digit)
            .map(|c| u32::from(c - b'0'))
    }

    fn index(&self, pos: Point) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    fn point(&self, index: usize) -> Point {
        Point::new((index % self.width) as i64, (index / self.width) as i64)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            writeln!(f, "{}", String::from_utf8_lossy(self.row(y)))?;
        }
        Ok(())
    }
}

/// A sparse map from position to converted cell, for every cell `convert` accepts.
pub fn parse_sparse<T, F>(input: &str, mut convert: F) -> Result<FxHashMap<Point, T>, PuzzleError>
where
    F: FnMut(u8, Point) -> Result<Option<T>, PuzzleError>,
{
    let mut map = FxHashMap::default();
    for (y, line) in parsing::lines(input)?.into_iter().enumerate() {
        for (x, cell) in line.bytes().enumerate() {
            let at = Point::new(x as i64, y as i64);
            if let Some(value) = convert(cell, at)? {
                map.insert(at, value);
            }
        }
    }
    Ok(map)
}
