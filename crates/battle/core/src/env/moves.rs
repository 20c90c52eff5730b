/// Full move catalog keyed by move id.
pub trait MoveOracle: Send + Sync {
    /// Display name for a move id (`"thunderbolt"` -> `"Thunderbolt"`).
    fn move_name(&self, id: &str) -> Option<String>;

    /// Every move id in the catalog.
    fn move_ids(&self) -> Vec<String>;

    /// Resolves an id to its display name, falling back to the id itself.
    fn display_name(&self, id: &str) -> String {
        self.move_name(id).unwrap_or_else(|| id.to_string())
    }
}
