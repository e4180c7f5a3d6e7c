//! Bounded, thread-safe solution table.
//!
//! The external full-enumeration collaborator may run several search
//! threads; a single lock around the append-and-bounds-check keeps the
//! table consistent under concurrent appends.

use std::sync::Mutex;

use crate::search::AnalysisError;

/// Sentinel for a mine in a solution row. Greater than every revealed
/// value, so mines sort to the tail of any value-sorted run.
pub const MINE: u8 = 0xFF;

#[derive(Debug, Default)]
struct TableInner {
    rows: Vec<Box<[u8]>>,
    too_many: bool,
}

/// Collects enumerated global solutions, one byte per square (`MINE` or
/// 0-8). Collection is capped: once `max_solutions` rows are held, further
/// rows are discarded and the table is flagged as overflowing rather than
/// growing unboundedly.
#[derive(Debug)]
pub struct SolutionTable {
    width: usize,
    max_solutions: usize,
    inner: Mutex<TableInner>,
}

impl SolutionTable {
    pub fn new(width: usize, max_solutions: usize) -> Self {
        Self {
            width,
            max_solutions,
            inner: Mutex::new(TableInner::default()),
        }
    }

    /// Appends one solution. A wrong-length row is a collaborator contract
    /// violation and is rejected; overflowing the cap is not an error, it
    /// just flags the table.
    pub fn add_solution(&self, solution: Vec<u8>) -> Result<(), AnalysisError> {
        if solution.len() != self.width {
            return Err(AnalysisError::SolutionLength {
                expected: self.width,
                got: solution.len(),
            });
        }
        let mut inner = self.lock();
        if inner.rows.len() >= self.max_solutions {
            inner.too_many = true;
            return Ok(());
        }
        inner.rows.push(solution.into_boxed_slice());
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }

    /// True once solutions had to be discarded; exact analysis is then
    /// unavailable and callers should fall back to approximate methods.
    pub fn too_many(&self) -> bool {
        self.lock().too_many
    }

    pub(crate) fn into_rows(self) -> (Vec<Box<[u8]>>, bool) {
        let inner = self
            .inner
            .into_inner()
            .expect("solution table lock poisoned");
        (inner.rows, inner.too_many)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TableInner> {
        self.inner.lock().expect("solution table lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_length() {
        let table = SolutionTable::new(3, 10);
        let err = table.add_solution(vec![0, 1]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::SolutionLength {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn test_caps_collection() {
        let table = SolutionTable::new(1, 2);
        table.add_solution(vec![0]).unwrap();
        table.add_solution(vec![1]).unwrap();
        assert!(!table.too_many());

        // the cap flips the flag instead of growing the table
        table.add_solution(vec![2]).unwrap();
        assert!(table.too_many());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_concurrent_appends() {
        use std::sync::Arc;

        let table = Arc::new(SolutionTable::new(1, 64));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    for i in 0..32 {
                        table.add_solution(vec![(t * 32 + i) as u8]).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(table.len(), 64);
        assert!(table.too_many());
    }
}
