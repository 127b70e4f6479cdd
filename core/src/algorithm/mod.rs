//! Graph algorithm framework
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod traits;
pub mod traversal;
pub mod graph;

pub use self::traits::*;
pub use self::traversal::Direction;
pub use self::graph::*;
