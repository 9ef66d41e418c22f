//! Selection data model for interactive test-job browsers.
//!
//! `jobpick` holds the rendering-free half of a test-job selection UI: the
//! job/category data model, the selection tree, and the flag-propagation
//! algorithm that keeps ancestor and descendant inclusion states consistent
//! while the user toggles nodes. A frontend (see `jobpick-tui`) renders the
//! tree and feeds toggles back in.
//!
//! # Architecture
//!
//! ```text
//! JobSource ──build──▶ SelectionTree ◀──toggles── UI frontend
//!                           │
//!                           └──selected_jobs()──▶ BTreeSet<job id>
//! ```
//!
//! The tree is an arena of tagged nodes (`Root | Category | Job`); parents
//! are stored as plain node ids, so there are no ownership cycles and no
//! toolkit base classes. Child lists materialize lazily, and lazily created
//! children inherit their parent's current flag, so every job has a
//! well-defined inclusion state whether or not it was ever rendered.
//!
//! # Quick start
//!
//! ```
//! use jobpick::{Category, JobDescriptor, SelectionTree, StaticJobSource};
//!
//! let source = StaticJobSource::new(
//!     vec![Category::new("audio", "Audio tests")],
//!     vec![JobDescriptor::new("audio/playback", "Playback works", "audio")],
//! );
//! let mut tree = SelectionTree::build(&source).unwrap();
//!
//! // Everything starts included.
//! assert_eq!(tree.selected_jobs().len(), 1);
//! ```

pub mod job;
pub mod tree;

pub use job::{BuildError, Category, JobDescriptor, JobSource, StaticJobSource};
pub use tree::{NodeId, NodeKind, SelectionTree};
