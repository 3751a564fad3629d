/// Size caps applied while tokenizing and evaluating.
///
/// `None` means unbounded. Exceeding a cap is always reported as an error; nothing is
/// truncated or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    pub max_literal_len: Option<usize>,
    pub max_identifier_len: Option<usize>,
    pub max_tokens: Option<usize>,
    pub max_arguments: Option<usize>,
}

impl Limits {
    pub const LEGACY_LITERAL_LEN: usize = 15;
    pub const LEGACY_IDENTIFIER_LEN: usize = 31;
    pub const LEGACY_TOKENS: usize = 65536;
    pub const LEGACY_ARGUMENTS: usize = 16;

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// The fixed buffer sizes of the classic command-line calculator, as hard errors.
    pub fn legacy() -> Self {
        Self {
            max_literal_len: Some(Self::LEGACY_LITERAL_LEN),
            max_identifier_len: Some(Self::LEGACY_IDENTIFIER_LEN),
            max_tokens: Some(Self::LEGACY_TOKENS),
            max_arguments: Some(Self::LEGACY_ARGUMENTS),
        }
    }

    pub fn with_max_literal_len(mut self, limit: usize) -> Self {
        self.max_literal_len = Some(limit);
        self
    }

    pub fn with_max_identifier_len(mut self, limit: usize) -> Self {
        self.max_identifier_len = Some(limit);
        self
    }

    pub fn with_max_tokens(mut self, limit: usize) -> Self {
        self.max_tokens = Some(limit);
        self
    }

    pub fn with_max_arguments(mut self, limit: usize) -> Self {
        self.max_arguments = Some(limit);
        self
    }
}

/// Returns the limit if `len` exceeds it.
pub(crate) fn exceeded(limit: Option<usize>, len: usize) -> Option<usize> {
    limit.filter(|max| len > *max)
}
