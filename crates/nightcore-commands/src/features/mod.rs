//! Feature areas. Each feature groups its cogs by category.

pub mod meta;
