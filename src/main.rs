use anyhow::Context;
use env_sbom::adapters::outbound::console::StderrProgressReporter;
use env_sbom::adapters::outbound::filesystem::{FileSystemReader, FileSystemWriter, WalkDirScanner};
use env_sbom::adapters::outbound::formatters::CycloneDxFormatter;
use env_sbom::adapters::outbound::process::ShellCommandRunner;
use env_sbom::application::dto::OrchestrationRequest;
use env_sbom::application::factories::GeneratorRegistry;
use env_sbom::application::use_cases::GenerateSbomsUseCase;
use env_sbom::cli::Args;
use env_sbom::config::{discover_config, load_config_from_path, ConfigFile, CONFIG_FILENAME};
use env_sbom::logging;
use env_sbom::shared::error::{ExitCode, SbomError};
use env_sbom::shared::Result;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    // clap exits with 2 on invalid arguments and 0 for --help/--version
    let args = Args::parse_args();
    logging::init(args.verbose);

    let exit_code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            exit_code_for(&e)
        }
    };

    process::exit(exit_code.as_i32());
}

async fn run(args: Args) -> Result<ExitCode> {
    validate_project_path(&args.root_dir)?;

    let config = match args.config.as_deref() {
        Some(path) => {
            let config = load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            config
        }
        None => match discover_config(&args.root_dir)? {
            Some(config) => {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    args.root_dir.join(CONFIG_FILENAME).display()
                );
                config
            }
            None => ConfigFile::default(),
        },
    };

    let request = build_request(&args, config)?;
    tracing::info!(
        root = %request.root_dir.display(),
        output = %request.output_dir.display(),
        dry_run = request.dry_run,
        "Starting run"
    );

    // Create adapters (Dependency Injection)
    let use_case = GenerateSbomsUseCase::new(
        GeneratorRegistry::with_defaults(),
        WalkDirScanner::new(),
        ShellCommandRunner::new(),
        FileSystemWriter::new(),
        FileSystemReader::new(),
        StderrProgressReporter::new(),
        Box::new(CycloneDxFormatter::new()),
    );

    let response = use_case.execute(request).await?;
    Ok(response.exit_code())
}

/// Combines CLI arguments with config file values
///
/// CLI values win over config values; boolean flags are OR-ed and skipped
/// ecosystems are unioned. Paths are made absolute against the current
/// directory so every instance sees the same locations whatever its
/// working directory is.
fn build_request(args: &Args, config: ConfigFile) -> Result<OrchestrationRequest> {
    let output_dir = args
        .output
        .clone()
        .or(config.output_dir)
        .unwrap_or_else(Args::default_output_dir);

    let mut skip = args.skip.clone();
    skip.extend(config.skip_ecosystems.unwrap_or_default());

    let working_dir = args.working_dir.as_deref().map(absolute).transpose()?;

    let request = OrchestrationRequest::builder()
        .root_dir(absolute(&args.root_dir)?)
        .output_dir(absolute(&output_dir)?)
        .working_dir_override(working_dir)
        .dry_run(args.dry_run)
        .merge(args.merge || config.merge.unwrap_or(false))
        .json(args.json || config.json.unwrap_or(false))
        .sbom_only(args.sbom_only)
        .allow_tool_install(args.allow_tool_install || config.allow_tool_install.unwrap_or(false))
        .additional_args(args.additional_args.clone().or(config.additional_args))
        .skip_ecosystems(skip)
        .build()?;
    Ok(request)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve path: {}", path.display()))
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .downcast_ref::<SbomError>()
        .map(SbomError::exit_code)
        .unwrap_or(ExitCode::ApplicationError)
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| SbomError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("env-sbom").chain(extra.iter().copied())).unwrap()
    }

    #[test]
    fn test_validate_project_path_valid_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_project_path(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_validate_project_path_nonexistent() {
        let err = validate_project_path(Path::new("/nonexistent/path/that/does/not/exist"))
            .unwrap_err();
        assert!(err.to_string().contains("Directory does not exist"));
        assert_eq!(exit_code_for(&err), ExitCode::ApplicationError);
    }

    #[test]
    fn test_validate_project_path_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");
        fs::write(&file_path, "test content").unwrap();

        let err = validate_project_path(&file_path).unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_project_path_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real");
        let link = temp_dir.path().join("link");
        fs::create_dir(&real).unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let err = validate_project_path(&link).unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
    }

    #[test]
    fn test_cli_values_take_precedence() {
        let config = ConfigFile {
            output_dir: Some(PathBuf::from("from-config")),
            additional_args: Some("-Pconfig".to_string()),
            ..ConfigFile::default()
        };

        let request = build_request(&args(&["-o", "from-cli", "-a", "-Pcli"]), config).unwrap();

        assert!(request.output_dir.ends_with("from-cli"));
        assert!(request.output_dir.is_absolute());
        assert_eq!(request.additional_args.tokens(), &["-Pcli".to_string()]);
    }

    #[test]
    fn test_config_fills_gaps() {
        let config = ConfigFile {
            output_dir: Some(PathBuf::from("from-config")),
            merge: Some(true),
            json: Some(true),
            allow_tool_install: Some(true),
            skip_ecosystems: Some(vec!["Gradle".to_string(), "Maven".to_string()]),
            ..ConfigFile::default()
        };

        let request = build_request(&args(&["--skip", "Maven"]), config).unwrap();

        assert!(request.output_dir.ends_with("from-config"));
        assert!(request.merge);
        assert!(request.json);
        assert!(request.allow_tool_install);
        assert_eq!(request.skip_ecosystems, vec!["Gradle", "Maven"]);
    }

    #[test]
    fn test_config_cannot_switch_off_cli_flags() {
        let config = ConfigFile {
            merge: Some(false),
            ..ConfigFile::default()
        };

        let request = build_request(&args(&["-m"]), config).unwrap();
        assert!(request.merge);
    }

    #[test]
    fn test_rejected_additional_args_exit_with_invalid_arguments() {
        let err = build_request(&args(&["-a", "-DskipTests; rm -rf /"]), ConfigFile::default())
            .unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::InvalidArguments);
    }

    #[test]
    fn test_working_dir_override_is_absolute() {
        let request = build_request(&args(&["-r", "work"]), ConfigFile::default()).unwrap();
        let working_dir = request.working_dir_override.unwrap();
        assert!(working_dir.is_absolute());
        assert!(working_dir.ends_with("work"));
    }
}
