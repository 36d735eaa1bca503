use std::fmt;

/// A position in source text. Lines and columns are 1-based; a
/// `Location` of 0:0 means "unknown" (e.g., for nodes built by hand).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl Location {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Get line `line_no` (1-based) from `text`, without its line ending.
pub fn get_line(text: &str, line_no: usize) -> Option<&str> {
    if line_no == 0 {
        return None;
    }
    text.lines().nth(line_no - 1)
}
