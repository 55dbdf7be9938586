/// One row of the top-N list handed to the log writer and the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    pub term: String,
    pub frequency: u32,
}

impl TermEntry {
    pub fn new(term: impl Into<String>, frequency: u32) -> Self {
        Self { term: term.into(), frequency }
    }
}
