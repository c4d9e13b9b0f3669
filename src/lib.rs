/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod algo;
pub mod source;
pub mod utils;

/// Module exposing all traits in a single level.
pub mod traits {
    use super::*;
    pub use algo::traits::*;
    pub use source::NeighborSource;
}

/// Use `use level_crawler::prelude::*;` to import common utilities, modules
/// and all traits.
pub mod prelude {
    use super::*;
    pub use algo::traverse::{traverse, Mode, DEFAULT_NUM_WORKERS};
    pub use algo::visits::breadth_first;
    pub use algo::visits::Levels;
    pub use source::http::{HttpSource, HttpSourceConfig};
    pub use source::{LookupError, MapSource};
    pub use traits::*;
}

/// Builds a [`rayon::ThreadPool`].
///
/// With no arguments the pool uses rayon's default number of threads;
/// with one argument it uses exactly that number of threads, zero again
/// meaning rayon's default.
///
/// The pool size is also the number of workers of a
/// [parallel visit](crate::algo::visits::breadth_first::ParQueue).
#[macro_export]
macro_rules! threads {
    () => {
        $crate::utils::Threads::Default.build()
    };
    ($num_threads:expr) => {
        $crate::utils::Threads::from($num_threads).build()
    };
}
