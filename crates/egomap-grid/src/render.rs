//! Text dumps of the map for serial consoles and log files.
//!
//! Rows are comma separated and terminated by a literal `0`, so every line
//! has `E + 2` fields and spreadsheet tools import the dump without a
//! ragged last column.

use std::fmt;

use egomap_core::TickId;

use crate::snapshot::MapSnapshot;

/// `Display` adapter printing the map with the robot in the middle.
///
/// # Examples
///
/// ```
/// use egomap_core::TickId;
/// use egomap_grid::{DynamicMap, GridExtent};
///
/// let map = DynamicMap::new(GridExtent::new(2).unwrap(), 10.0).unwrap();
/// let text = map.snapshot().centered_at(TickId(3)).to_string();
/// assert_eq!(text, "MAP-Centered: , 3, \n0,0,0,0\n0,0,0,0\n0,0,0,0\n");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CenteredView<'a> {
    snapshot: MapSnapshot<'a>,
    tick: Option<TickId>,
}

impl<'a> CenteredView<'a> {
    pub(crate) fn new(snapshot: MapSnapshot<'a>, tick: Option<TickId>) -> Self {
        Self { snapshot, tick }
    }
}

impl fmt::Display for CenteredView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tick) = self.tick {
            writeln!(f, "MAP-Centered: , {tick}, ")?;
        }
        for row in self.snapshot.logical_rows() {
            for cell in row {
                write!(f, "{cell},")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}

/// `Display` adapter printing the buffer in storage order.
#[derive(Clone, Copy, Debug)]
pub struct RawView<'a> {
    snapshot: MapSnapshot<'a>,
    tick: Option<TickId>,
}

impl<'a> RawView<'a> {
    pub(crate) fn new(snapshot: MapSnapshot<'a>, tick: Option<TickId>) -> Self {
        Self { snapshot, tick }
    }
}

impl fmt::Display for RawView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tick) = self.tick {
            writeln!(f, "MAP-Memory: , {tick}, ")?;
        }
        let side = self.snapshot.extent().side() as usize;
        for row in self.snapshot.cells().chunks_exact(side) {
            for cell in row {
                write!(f, "{cell},")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{translate, DynamicMap, FootprintMask, GridExtent};
    use egomap_core::{PixelShift, TickId};

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn centered_view_puts_robot_in_the_middle() {
        let mut m = DynamicMap::new(GridExtent::new(4).unwrap(), 10.0).unwrap();
        translate(&mut m, PixelShift::new(2, 2)).unwrap();
        FootprintMask::for_diameter(0).unwrap().apply(&mut m).unwrap();

        let text = m.snapshot().centered_at(TickId(12)).to_string();
        let l = lines(&text);
        assert_eq!(l[0], "MAP-Centered: , 12, ");
        assert_eq!(l.len(), 6);
        assert_eq!(l[3], "0,0,-10,0,0,0");
        assert_eq!(l[1], "0,0,0,0,0,0");
    }

    #[test]
    fn raw_view_prints_storage_order() {
        let mut m = DynamicMap::new(GridExtent::new(4).unwrap(), 10.0).unwrap();
        translate(&mut m, PixelShift::new(2, 2)).unwrap();
        FootprintMask::for_diameter(0).unwrap().apply(&mut m).unwrap();

        // centre moved from (2, 2) to storage (4, 4)
        let text = m.snapshot().raw_at(TickId(12)).to_string();
        let l = lines(&text);
        assert_eq!(l[0], "MAP-Memory: , 12, ");
        assert_eq!(l[5], "0,0,0,0,-10,0");
        assert_eq!(l[3], "0,0,0,0,0,0");
    }

    #[test]
    fn headerless_views_have_one_line_per_row() {
        let m = DynamicMap::new(GridExtent::new(6).unwrap(), 10.0).unwrap();
        let snap = m.snapshot();
        for text in [snap.centered().to_string(), snap.raw().to_string()] {
            let l = lines(&text);
            assert_eq!(l.len(), 7);
            assert!(l.iter().all(|row| row.split(',').count() == 8));
        }
    }
}
