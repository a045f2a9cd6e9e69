use std::num::NonZeroUsize;

/// The machine's memory: a fixed number of byte cells, all starting
/// at zero, addressed by a single data pointer.
///
/// Both kinds of arithmetic wrap: pointer movement is modulo the tape
/// size (the tape is toroidal) and cell increments are modulo 256.
/// Neither can fail, which keeps every program total.
#[derive(Debug)]
pub struct Tape {
    cells: Vec<u8>,
    pointer: usize,
}

impl Tape {
    /// A fresh all-zero tape with the pointer at `origin`, wrapped
    /// into range for origins past the end.
    pub fn new(size: NonZeroUsize, origin: usize) -> Self {
        let size = size.get();
        Tape {
            cells: vec![0; size],
            pointer: origin % size,
        }
    }

    pub fn move_right(&mut self) {
        self.pointer = if self.pointer + 1 == self.cells.len() {
            0
        } else {
            self.pointer + 1
        };
    }

    pub fn move_left(&mut self) {
        self.pointer = if self.pointer == 0 {
            self.cells.len() - 1
        } else {
            self.pointer - 1
        };
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_sub(1);
    }

    /// Value under the data pointer.
    pub fn current(&self) -> u8 {
        self.cells[self.pointer]
    }

    pub fn set_current(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tape(size: usize) -> Tape {
        Tape::new(NonZeroUsize::new(size).unwrap(), 0)
    }

    #[test]
    fn starts_zeroed_at_the_origin() {
        let t = Tape::new(NonZeroUsize::new(8).unwrap(), 3);
        assert_eq!(t.pointer(), 3);
        assert!(t.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn origin_past_the_end_wraps_into_range() {
        let t = Tape::new(NonZeroUsize::new(8).unwrap(), 11);
        assert_eq!(t.pointer(), 3);
    }

    #[test]
    fn pointer_wraps_right_at_the_last_cell() {
        let mut t = tape(4);
        for _ in 0..3 {
            t.move_right();
        }
        assert_eq!(t.pointer(), 3);
        t.move_right();
        assert_eq!(t.pointer(), 0);
    }

    #[test]
    fn pointer_wraps_left_at_cell_zero() {
        let mut t = tape(4);
        t.move_left();
        assert_eq!(t.pointer(), 3);
    }

    #[test]
    fn single_cell_tape_wraps_to_itself() {
        let mut t = tape(1);
        t.move_right();
        assert_eq!(t.pointer(), 0);
        t.move_left();
        assert_eq!(t.pointer(), 0);
    }

    #[test]
    fn cell_arithmetic_wraps_modulo_256() {
        let mut t = tape(1);
        t.decrement();
        assert_eq!(t.current(), 255);
        t.increment();
        assert_eq!(t.current(), 0);
        for _ in 0..=255 {
            t.increment();
        }
        assert_eq!(t.current(), 0);
    }
}
