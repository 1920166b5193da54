//! Ladder - a sorted multiset built on a probabilistic skip list.
//!
//! The list keeps a fixed number of doubly linked levels. Level 0 holds every
//! value in comparator order; each level above holds a coin-flip subset of the
//! one below and is used to skip ahead during search.
//!
//! # Quick Start
//!
//! ```
//! use ladder::OrdSkipList;
//!
//! let mut list = OrdSkipList::ordered(4).unwrap();
//! for value in [5, 3, 8, 3] {
//!     list.add(value);
//! }
//!
//! assert_eq!(list.size(), 4);
//! assert!(list.find(&3));
//! assert_eq!(list.get_all(), vec![3, 3, 5, 8]);
//!
//! assert_eq!(list.erase(&3), 2);
//! assert_eq!(list.erase_less_than_or_equal_to(&6), vec![5]);
//! assert_eq!(list.get_all(), vec![8]);
//! ```
//!
//! The list is not synchronized. Share it across threads behind a lock.

pub mod config;
pub mod error;
mod node;
pub mod skip_list;

pub use config::{Config, DEFAULT_LEVELS, MAX_LEVELS};
pub use error::{Error, Result};
pub use skip_list::{OrdSkipList, SkipList};
