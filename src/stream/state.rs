/// Read state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ReadState {
    /// at a frame boundary
    ReadHead,
    /// in the middle of a frame
    ReadFrame,
    /// closed at a frame boundary
    Eof,
}

impl ReadState {
    #[inline]
    pub const fn new() -> Self { ReadState::ReadHead }
}
