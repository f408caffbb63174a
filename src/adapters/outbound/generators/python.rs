use super::support::{
    cyclonedx_py_tool, output_file, project_root, quote, read_manifest, syft_scan_command,
    syft_tool, toml_string,
};
use crate::ports::outbound::{directory_name, EcosystemGenerator};
use crate::sbom_generation::domain::{AdditionalArgs, GenerationStrategy, ToolRequirement};
use regex::Regex;
use std::path::{Path, PathBuf};

/// CycloneDX spec version requested from cyclonedx-py
const SPEC_VERSION: &str = "1.6";

/// `[project].name`, then `[tool.poetry].name`, of a pyproject.toml
fn pyproject_name(pyproject: &Path) -> Option<String> {
    toml_string(pyproject, &["project", "name"])
        .or_else(|| toml_string(pyproject, &["tool", "poetry", "name"]))
}

/// Name from the project's pyproject.toml, else the directory name
fn sibling_pyproject_name(build_file: &Path) -> Option<String> {
    pyproject_name(&project_root(build_file).join("pyproject.toml"))
        .or_else(|| directory_name(build_file))
}

/// Pipenv lock files
pub struct PipenvGenerator;

impl EcosystemGenerator for PipenvGenerator {
    fn name(&self) -> &'static str {
        "Pipenv"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["Pipfile.lock"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        PYTHON_EXCLUDED
    }

    fn version_check_command(&self) -> &'static str {
        "pipenv --version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![
            ToolRequirement::new("pipenv", "pipenv --version")
                .with_install_command("python -m pip install pipenv"),
            cyclonedx_py_tool(),
        ]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let command = args.append_to(&format!(
            "cyclonedx-py pipenv --dev --sv {} --of JSON -o {}",
            SPEC_VERSION,
            quote(&output_file(output_dir, project_name))
        ));
        format!("{} {}", command, quote(project_root(build_file)))
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        sibling_pyproject_name(build_file)
    }
}

/// Poetry lock files
pub struct PoetryGenerator;

/// Dependency group names declared under `[tool.poetry.group]`
fn poetry_groups(pyproject: &Path) -> Vec<String> {
    let Some(content) = read_manifest(pyproject) else {
        return Vec::new();
    };
    let Ok(table) = toml::from_str::<toml::Table>(&content) else {
        return Vec::new();
    };
    table
        .get("tool")
        .and_then(|t| t.get("poetry"))
        .and_then(|p| p.get("group"))
        .and_then(|g| g.as_table())
        .map(|groups| {
            groups
                .keys()
                .filter(|name| {
                    !name.is_empty()
                        && name
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
                })
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

impl EcosystemGenerator for PoetryGenerator {
    fn name(&self) -> &'static str {
        "Poetry"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["poetry.lock"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        PYTHON_EXCLUDED
    }

    fn version_check_command(&self) -> &'static str {
        "poetry --version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![
            ToolRequirement::new("poetry", "poetry --version")
                .with_install_command("python -m pip install poetry"),
            cyclonedx_py_tool(),
        ]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let root = project_root(build_file);
        let mut command = format!(
            "cyclonedx-py poetry --all-extras --sv {} --of JSON -o {}",
            SPEC_VERSION,
            quote(&output_file(output_dir, project_name))
        );
        for group in poetry_groups(&root.join("pyproject.toml")) {
            command.push_str(&format!(" --with {}", group));
        }
        format!("{} {}", args.append_to(&command), quote(root))
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        sibling_pyproject_name(build_file)
    }
}

/// uv lock files
pub struct UvGenerator;

impl EcosystemGenerator for UvGenerator {
    fn name(&self) -> &'static str {
        "uv"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["uv.lock"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        PYTHON_EXCLUDED
    }

    fn version_check_command(&self) -> &'static str {
        "uv --version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![
            ToolRequirement::new("uv", "uv --version")
                .with_install_command("python -m pip install uv"),
            cyclonedx_py_tool(),
        ]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let mut command = format!(
            "uv run cyclonedx-py environment --sv {} --of JSON -o {}",
            SPEC_VERSION,
            quote(&output_file(output_dir, project_name))
        );
        let pyproject = project_root(build_file).join("pyproject.toml");
        if pyproject.is_file() {
            command.push_str(&format!(" --pyproject {}", quote(&pyproject)));
        }
        args.append_to(&command)
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        sibling_pyproject_name(build_file)
    }
}

/// Conda environments, scanned with Syft
pub struct CondaGenerator;

impl EcosystemGenerator for CondaGenerator {
    fn name(&self) -> &'static str {
        "Conda"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["environment.yml", "environment.yaml", "conda.yml", "conda.yaml"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        PYTHON_EXCLUDED
    }

    fn strategy(&self) -> GenerationStrategy {
        GenerationStrategy::FilesystemScan
    }

    fn version_check_command(&self) -> &'static str {
        "syft version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![syft_tool()]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        syft_scan_command(
            project_root(build_file),
            &output_file(output_dir, project_name),
            args,
        )
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        read_manifest(build_file)
            .and_then(|content| serde_yaml_ng::from_str::<serde_yaml_ng::Value>(&content).ok())
            .and_then(|value| value.get("name").and_then(|n| n.as_str()).map(String::from))
            .filter(|name| !name.trim().is_empty())
            .or_else(|| directory_name(build_file))
    }
}

/// Plain Python projects: setup.py, pyproject.toml or requirements files
pub struct PythonGenerator;

const PYTHON_EXCLUDED: &[&str] = &["venv", ".venv", "env", "site-packages", "__pycache__", ".tox"];

/// `name='...'` passed to `setup()`
fn setup_py_name(content: &str) -> Option<String> {
    let re = Regex::new(r#"name\s*=\s*["']([^"']+)["']"#).ok()?;
    re.captures(content).map(|c| c[1].trim().to_string())
}

fn is_requirements_file(build_file: &Path) -> bool {
    build_file
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("requirements") && n.ends_with(".txt"))
}

/// Virtual environment next to the build file
fn local_virtualenv(root: &Path) -> Option<PathBuf> {
    [".venv", "venv"]
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_dir())
}

impl EcosystemGenerator for PythonGenerator {
    fn name(&self) -> &'static str {
        "Python"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["setup.py", "pyproject.toml", "requirements.txt"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        PYTHON_EXCLUDED
    }

    fn version_check_command(&self) -> &'static str {
        "python --version"
    }

    fn required_tools(&self, build_file: &Path) -> Vec<ToolRequirement> {
        if is_requirements_file(build_file) {
            vec![cyclonedx_py_tool()]
        } else {
            vec![
                ToolRequirement::new("python", "python --version"),
                cyclonedx_py_tool(),
            ]
        }
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let root = project_root(build_file);
        let output = quote(&output_file(output_dir, project_name));
        let command = if let Some(venv) = local_virtualenv(root) {
            format!(
                "cyclonedx-py environment --sv {} --of JSON -o {} {}",
                SPEC_VERSION,
                output,
                quote(&venv)
            )
        } else if is_requirements_file(build_file) {
            format!(
                "cyclonedx-py requirements --sv {} --of JSON -o {} {}",
                SPEC_VERSION,
                output,
                quote(build_file)
            )
        } else {
            let mut command = format!(
                "cyclonedx-py environment --sv {} --of JSON -o {}",
                SPEC_VERSION, output
            );
            let pyproject = root.join("pyproject.toml");
            if pyproject.is_file() {
                command.push_str(&format!(" --pyproject {}", quote(&pyproject)));
            }
            command
        };
        args.append_to(&command)
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        let root = project_root(build_file);
        read_manifest(&root.join("setup.py"))
            .and_then(|content| setup_py_name(&content))
            .or_else(|| pyproject_name(&root.join("pyproject.toml")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_poetry_groups_become_with_flags() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("pyproject.toml"),
            r#"
[tool.poetry]
name = "ledger"

[tool.poetry.group.dev.dependencies]
pytest = "*"

[tool.poetry.group.docs.dependencies]
mkdocs = "*"

[tool.poetry.group."bad;name".dependencies]
x = "*"
"#,
        )
        .unwrap();
        let lock = temp_dir.path().join("poetry.lock");
        fs::write(&lock, "").unwrap();

        let command =
            PoetryGenerator.generate_command("ledger", Path::new("/out"), &lock, &AdditionalArgs::empty());
        assert!(command.contains("--with dev"));
        assert!(command.contains("--with docs"));
        assert!(!command.contains("bad;name"));
        assert_eq!(PoetryGenerator.project_name(&lock), "ledger");
    }

    #[test]
    fn test_pipenv_requires_both_tools() {
        let tools = PipenvGenerator.required_tools(Path::new("/p/Pipfile.lock"));
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["pipenv", "cyclonedx-py"]);
    }

    #[test]
    fn test_uv_passes_pyproject() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("pyproject.toml"),
            "[project]\nname = \"api\"\n",
        )
        .unwrap();
        let lock = temp_dir.path().join("uv.lock");
        fs::write(&lock, "").unwrap();

        let command = UvGenerator.generate_command("api", Path::new("/out"), &lock, &AdditionalArgs::empty());
        assert!(command.starts_with("uv run cyclonedx-py environment"));
        assert!(command.contains("--pyproject"));
        assert_eq!(UvGenerator.project_name(&lock), "api");
    }

    #[test]
    fn test_conda_name_from_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let env = temp_dir.path().join("environment.yml");
        fs::write(&env, "name: data-science\ndependencies:\n  - numpy\n").unwrap();

        assert_eq!(CondaGenerator.project_name(&env), "data-science");
        assert_eq!(CondaGenerator.strategy(), GenerationStrategy::FilesystemScan);
    }

    #[test]
    fn test_python_requirements_only_needs_cyclonedx_py() {
        let temp_dir = TempDir::new().unwrap();
        let requirements = temp_dir.path().join("requirements.txt");
        fs::write(&requirements, "requests==2.32.0\n").unwrap();

        let tools = PythonGenerator.required_tools(&requirements);
        assert_eq!(tools.len(), 1);
        let command = PythonGenerator.generate_command(
            "svc",
            Path::new("/out"),
            &requirements,
            &AdditionalArgs::empty(),
        );
        assert!(command.starts_with("cyclonedx-py requirements"));
    }

    #[test]
    fn test_bare_requirements_falls_back_to_placeholder() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("my-service");
        fs::create_dir(&root).unwrap();
        let requirements = root.join("requirements.txt");
        fs::write(&requirements, "flask\n").unwrap();

        assert_eq!(PythonGenerator.project_name(&requirements), "python-project");
    }

    #[test]
    fn test_python_prefers_local_virtualenv() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".venv")).unwrap();
        let setup = temp_dir.path().join("setup.py");
        fs::write(&setup, "from setuptools import setup\nsetup(name='legacy-tool')\n").unwrap();

        let command =
            PythonGenerator.generate_command("legacy-tool", Path::new("/out"), &setup, &AdditionalArgs::empty());
        assert!(command.contains(".venv"));
        assert_eq!(PythonGenerator.project_name(&setup), "legacy-tool");
        assert_eq!(PythonGenerator.required_tools(&setup).len(), 2);
    }
}
