use crate::sbom_generation::domain::FilePattern;
use crate::sbom_generation::services::FileClassifier;
use std::path::{Path, PathBuf};

/// Infrastructure evidence categories and their file patterns, in
/// precedence order
const CATEGORIES: &[(&str, &[&str])] = &[
    ("Terraform", &["*.tf", "*.tfvars"]),
    (
        "CloudFormation",
        &[
            "*.template",
            "cloudformation.yml",
            "cloudformation.yaml",
            "cloudformation.json",
        ],
    ),
    ("Ansible", &["ansible.cfg", "playbook.yml", "playbook.yaml"]),
    (
        "Kubernetes",
        &["kustomization.yaml", "kustomization.yml", "Chart.yaml"],
    ),
    (
        "Docker",
        &[
            "Dockerfile",
            "docker-compose.yml",
            "docker-compose.yaml",
            "compose.yaml",
        ],
    ),
    ("Pulumi", &["Pulumi.yaml"]),
    ("YAML/JSON Config", &["*.yaml", "*.yml", "*.json"]),
];

/// Dependency caches whose bundled config files say nothing about the project
const IGNORED_DIRECTORIES: &[&str] = &[
    "node_modules",
    "bower_components",
    "vendor",
    ".terraform",
    ".venv",
    "venv",
    "site-packages",
    ".m2",
    ".gradle",
];

/// Files of one evidence category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceGroup {
    pub category: &'static str,
    pub files: Vec<PathBuf>,
}

/// Infrastructure evidence vocabulary
///
/// Consulted only when no ecosystem matched. Each file is attributed to the
/// first category that matches it, so the catch-all config category never
/// repeats a file already claimed by a specific one.
pub struct EvidenceVocabulary;

impl EvidenceVocabulary {
    pub fn category_names() -> Vec<&'static str> {
        CATEGORIES.iter().map(|(name, _)| *name).collect()
    }

    /// Groups walked files by evidence category; empty categories are omitted
    ///
    /// Files inside dependency caches are ignored.
    pub fn classify(root: &Path, files: &[PathBuf]) -> Vec<EvidenceGroup> {
        let compiled: Vec<(&'static str, Vec<FilePattern>)> = CATEGORIES
            .iter()
            .map(|(name, patterns)| {
                (
                    *name,
                    patterns
                        .iter()
                        .filter_map(|p| FilePattern::new(p).ok())
                        .collect(),
                )
            })
            .collect();

        let mut groups: Vec<EvidenceGroup> = compiled
            .iter()
            .map(|(name, _)| EvidenceGroup {
                category: name,
                files: Vec::new(),
            })
            .collect();

        for file in files {
            if FileClassifier::is_within_excluded(root, file, IGNORED_DIRECTORIES) {
                continue;
            }
            if let Some(index) = compiled
                .iter()
                .position(|(_, patterns)| FileClassifier::matches_any(file, patterns))
            {
                groups[index].files.push(file.clone());
            }
        }

        groups.retain(|g| !g.files.is_empty());
        for group in &mut groups {
            group.files.sort();
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_first_category_wins() {
        let root = Path::new("/infra");
        let files = vec![
            root.join("main.tf"),
            root.join("k8s/kustomization.yaml"),
            root.join("values.yaml"),
            root.join("Dockerfile"),
            root.join("README.md"),
        ];

        let groups = EvidenceVocabulary::classify(root, &files);
        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec!["Terraform", "Kubernetes", "Docker", "YAML/JSON Config"]
        );
        assert_eq!(groups[3].files, vec![root.join("values.yaml")]);
    }

    #[test]
    fn test_classify_ignores_dependency_caches() {
        let root = Path::new("/infra");
        let files = vec![
            root.join("node_modules/pkg/package.json"),
            root.join(".terraform/modules/modules.json"),
        ];
        assert!(EvidenceVocabulary::classify(root, &files).is_empty());
    }

    #[test]
    fn test_classify_keeps_environment_directories() {
        let root = Path::new("/infra");
        let files = vec![root.join("env/prod/main.tf")];
        let groups = EvidenceVocabulary::classify(root, &files);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "Terraform");
    }

    #[test]
    fn test_category_names() {
        assert_eq!(EvidenceVocabulary::category_names().len(), 7);
    }
}
