// src/combinatorics/mod.rs

pub mod lagrange;
pub mod sequences;
pub mod table;

pub use table::CombinatoricsTable;
