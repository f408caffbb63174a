use super::support::{move_command, output_file, project_root, quote, read_manifest};
use crate::ports::outbound::{directory_name, EcosystemGenerator};
use crate::sbom_generation::domain::{AdditionalArgs, ToolRequirement};
use regex::Regex;
use std::path::{Path, PathBuf};

/// CycloneDX Maven plugin coordinates
const CYCLONEDX_MAVEN_PLUGIN: &str = "org.cyclonedx:cyclonedx-maven-plugin:2.9.1";

fn java_tool() -> ToolRequirement {
    ToolRequirement::new("java", "java -version")
}

/// Wrapper script in the project root, if the project ships one
fn wrapper(root: &Path, unix_name: &str, windows_name: &str) -> Option<PathBuf> {
    let name = if cfg!(windows) { windows_name } else { unix_name };
    let path = root.join(name);
    path.is_file().then_some(path)
}

/// Maven, via the CycloneDX Maven plugin
///
/// `makeAggregateBom` covers every module of a reactor build, so a
/// multi-module project needs a single invocation on its root POM.
pub struct MavenGenerator;

impl EcosystemGenerator for MavenGenerator {
    fn name(&self) -> &'static str {
        "Maven"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["pom.xml"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["target", ".mvn", ".m2"]
    }

    fn version_check_command(&self) -> &'static str {
        "mvn -v"
    }

    fn required_tools(&self, build_file: &Path) -> Vec<ToolRequirement> {
        if wrapper(project_root(build_file), "mvnw", "mvnw.cmd").is_some() {
            vec![java_tool()]
        } else {
            vec![ToolRequirement::new("mvn", "mvn -v")]
        }
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let mvn = wrapper(project_root(build_file), "mvnw", "mvnw.cmd")
            .map(|w| quote(&w))
            .unwrap_or_else(|| "mvn".to_string());
        args.append_to(&format!(
            "{} -B -q {}:makeAggregateBom -DoutputFormat=json -DoutputName={}-bom -DoutputDirectory={} -f {}",
            mvn,
            CYCLONEDX_MAVEN_PLUGIN,
            project_name,
            quote(output_dir),
            quote(build_file)
        ))
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        let content = read_manifest(build_file)?;
        let document = roxmltree::Document::parse(&content).ok()?;
        document
            .root_element()
            .children()
            .find(|node| node.is_element() && node.tag_name().name() == "artifactId")
            .and_then(|node| node.text())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .or_else(|| directory_name(build_file))
    }

    fn classify_error(&self, stderr: &str, _exit_code: i32) -> Option<String> {
        if stderr.contains("Could not resolve dependencies") {
            return Some(
                "Maven could not resolve dependencies - check repository access and declared versions"
                    .to_string(),
            );
        }
        None
    }
}

/// Gradle, via the project's `cyclonedxBom` task
pub struct GradleGenerator;

/// `rootProject.name = "..."` from a settings script
fn root_project_name(content: &str) -> Option<String> {
    let re = Regex::new(r#"rootProject\.name\s*=\s*["']([^"']+)["']"#).ok()?;
    re.captures(content).map(|c| c[1].trim().to_string())
}

impl EcosystemGenerator for GradleGenerator {
    fn name(&self) -> &'static str {
        "Gradle"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &[
            "build.gradle",
            "build.gradle.kts",
            "settings.gradle",
            "settings.gradle.kts",
        ]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["build", ".gradle"]
    }

    fn version_check_command(&self) -> &'static str {
        "gradle --version"
    }

    fn required_tools(&self, build_file: &Path) -> Vec<ToolRequirement> {
        if wrapper(project_root(build_file), "gradlew", "gradlew.bat").is_some() {
            vec![java_tool()]
        } else {
            vec![ToolRequirement::new("gradle", "gradle --version")]
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
        let gradle = wrapper(root, "gradlew", "gradlew.bat")
            .map(|w| quote(&w))
            .unwrap_or_else(|| "gradle".to_string());
        let task = args.append_to(&format!("{} -q -p {} cyclonedxBom", gradle, quote(root)));
        let report = root.join("build").join("reports").join("bom.json");
        format!(
            "{} && {}",
            task,
            move_command(&report, &output_file(output_dir, project_name))
        )
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        let root = project_root(build_file);
        ["settings.gradle", "settings.gradle.kts"]
            .iter()
            .filter_map(|name| read_manifest(&root.join(name)))
            .find_map(|content| root_project_name(&content))
            .or_else(|| directory_name(build_file))
    }
}
