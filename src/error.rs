/// Reasons a fingerprint could not be placed.
///
/// None of these leave the filter unusable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A bucket had no empty slot
    BucketFull,

    /// Both candidate buckets were full and the relocation walk ran out of kicks
    EvictionBudgetExhausted,

    /// `insert_unique` found the item already present
    AlreadyPresent,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CuckooFilterError: {self:?}")
    }
}

impl std::error::Error for Error {}

/// Cuckoo filter result
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::EvictionBudgetExhausted.to_string(),
            "CuckooFilterError: EvictionBudgetExhausted",
        );
    }
}
