// Specialty registry: the fixed set of output categories and their keywords.

pub mod registry;
