//! Ecosystem generators
//!
//! One `EcosystemGenerator` per supported build ecosystem. Each knows its
//! fingerprint files, the tools it needs and the command producing a
//! CycloneDX JSON SBOM at `<output>/<project>-bom.json`.

mod binary;
mod dotnet;
mod go;
mod jvm;
mod node;
mod php;
mod python;
mod ruby;
mod rust;
mod support;

pub use binary::{BinaryGenerator, STANDALONE_BINARIES};
pub use dotnet::DotnetGenerator;
pub use go::GoGenerator;
pub use jvm::{GradleGenerator, MavenGenerator};
pub use node::{NpmGenerator, PnpmGenerator, YarnGenerator};
pub use php::PhpGenerator;
pub use python::{CondaGenerator, PipenvGenerator, PoetryGenerator, PythonGenerator, UvGenerator};
pub use ruby::RubyGenerator;
pub use rust::RustGenerator;
