pub mod books;
pub mod users;

/// Length in characters, the unit `VARCHAR(n)` limits are counted in.
pub fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}
