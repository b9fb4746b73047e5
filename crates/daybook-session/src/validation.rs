use std::collections::HashSet;

use daybook_model::{is_valid_decimal_input, SalesSlot};

/// Sales cells whose current text does not look like a decimal number.
///
/// Advisory only: flagged text is still stored and totals treat it as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFlags {
    flagged: HashSet<(usize, SalesSlot)>,
}

impl InputFlags {
    /// Re-check one cell after an edit. Returns whether the text is valid.
    pub fn check(&mut self, row: usize, slot: SalesSlot, raw: &str) -> bool {
        let valid = is_valid_decimal_input(raw);
        if valid {
            self.flagged.remove(&(row, slot));
        } else {
            self.flagged.insert((row, slot));
        }
        valid
    }

    pub fn contains(&self, row: usize, slot: SalesSlot) -> bool {
        self.flagged.contains(&(row, slot))
    }

    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }

    pub fn clear(&mut self) {
        self.flagged.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_text_is_flagged_until_a_valid_edit() {
        let mut flags = InputFlags::default();
        assert!(!flags.check(2, SalesSlot::Belal, "12a"));
        assert!(flags.contains(2, SalesSlot::Belal));
        assert!(!flags.contains(2, SalesSlot::Bilal));

        assert!(flags.check(2, SalesSlot::Belal, "-3."));
        assert!(flags.is_empty());
    }

    #[test]
    fn partial_numbers_are_not_flagged() {
        let mut flags = InputFlags::default();
        for raw in ["", "-", ".", "3.", "-0.5", "10"] {
            assert!(flags.check(0, SalesSlot::Cash, raw), "{raw:?}");
        }
        for raw in ["abc", "1e3", "1.2.3", " 5", "--1", "১২"] {
            assert!(!flags.check(0, SalesSlot::Cash, raw), "{raw:?}");
        }
    }
}
