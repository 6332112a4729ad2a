//! Build-time synthesis of metric factory classes from annotated
//! declarations.
//!
//! The host toolchain hands this crate a snapshot of type declarations (see
//! [`corpus`]); containers carrying the `MetricFactory` marker become
//! complete factory source units that construct every declared metric
//! against one shared meter, tagged with the marker's namespace and account.
//!
//! Discovery and synthesis are pure functions over the snapshot: no I/O, no
//! state between invocations, and independent containers never affect each
//! other's output. A host that wants per-container parallelism can call
//! [`discover_container`] and [`synthesize`] itself; [`generate`] is the
//! single-pass composition.

pub mod corpus;
pub mod discovery;
pub mod error;
pub mod marker;
pub mod synthesis;

pub use corpus::{MarkerArgument, MarkerUse, MethodDeclaration, TypeDeclaration};
pub use discovery::{discover, discover_container, FactoryModel, MetricModel};
pub use error::GeneratorError;
pub use marker::MetricKind;
pub use synthesis::{synthesize, EmittedUnit};

/// Run the whole pipeline over one declaration snapshot.
///
/// Containers that fail discovery are skipped with a warning; the rest are
/// synthesized in corpus order.
pub fn generate(corpus: &[TypeDeclaration]) -> Vec<EmittedUnit> {
    discovery::discover(corpus)
        .iter()
        .map(synthesis::synthesize)
        .collect()
}
