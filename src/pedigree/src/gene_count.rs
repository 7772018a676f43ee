use std::{fmt::{self, Formatter, Display}, str::FromStr, result::Result};

/// Number of copies of the trait-determining allele carried by an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    /// Every possible gene count, in table order.
    pub const ALL: [Self; 3] = [Self::Zero, Self::One, Self::Two];

    /// Position of this gene count within probability tables and accumulator buckets.
    #[must_use]
    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One  => 1,
            Self::Two  => 2,
        }
    }

    /// Raw number of allele copies.
    #[must_use]
    pub const fn copies(self) -> u8 {
        self.index() as u8
    }
}

impl FromStr for GeneCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Zero),
            "1" => Ok(Self::One),
            "2" => Ok(Self::Two),
            other => Err(format!("Invalid gene count '{other}'")),
        }
    }
}

impl Display for GeneCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.copies())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_are_table_positions() {
        for (i, count) in GeneCount::ALL.iter().enumerate() {
            assert_eq!(count.index(), i);
        }
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", GeneCount::Zero), "0");
        assert_eq!(format!("{}", GeneCount::One),  "1");
        assert_eq!(format!("{}", GeneCount::Two),  "2");
    }

    #[test]
    fn from_str() {
        assert_eq!(GeneCount::from_str("0"), Ok(GeneCount::Zero));
        assert_eq!(GeneCount::from_str(" 2 "), Ok(GeneCount::Two));
        assert!(GeneCount::from_str("3").is_err());
    }
}
