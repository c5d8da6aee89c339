pub mod content;
pub mod landing;

/// Which content panel is visible. `Main` is the true initial state; both
/// states reach both states (including themselves) on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Main,
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Exit,
}
