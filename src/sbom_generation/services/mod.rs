mod branch_grouper;
mod file_classifier;
mod module_resolver;

pub use branch_grouper::BranchGrouper;
pub use file_classifier::FileClassifier;
pub use module_resolver::{ModuleResolver, ModuleTree};
