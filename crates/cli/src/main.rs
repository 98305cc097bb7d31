use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use archivotron_core::{presets, AttributeMap, PathTemplate, TemplateConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "archivotron")]
#[command(about = "Build file-system paths from named attributes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the template comes from. Exactly one source must be given.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TemplateSource {
    /// Template document (YAML, or JSON when the extension is `.json`)
    #[arg(long)]
    template: Option<PathBuf>,
    /// Built-in naming convention
    #[arg(long, value_enum)]
    preset: Option<Preset>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Bids,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a path from attributes
    Render {
        #[command(flatten)]
        source: TemplateSource,
        /// Attribute as key=value (repeatable)
        #[arg(long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, String)>,
    },
    /// Show a template's attributes, layout and rules
    Describe {
        #[command(flatten)]
        source: TemplateSource,
    },
}

fn parse_attribute(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {input:?}"))?;
    Ok((key.to_owned(), value.to_owned()))
}

fn load_template(source: &TemplateSource) -> anyhow::Result<PathTemplate> {
    match (&source.template, source.preset) {
        (Some(path), _) => load_template_file(path),
        (None, Some(Preset::Bids)) => Ok(presets::bids()?),
        (None, None) => anyhow::bail!("either --template or --preset is required"),
    }
}

fn load_template_file(path: &Path) -> anyhow::Result<PathTemplate> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;

    let config = if path.extension().is_some_and(|ext| ext == "json") {
        TemplateConfig::from_json_str(&contents)?
    } else {
        TemplateConfig::from_yaml_str(&contents)?
    };

    tracing::debug!(path = %path.display(), "loaded template document");
    Ok(config.build()?)
}

fn describe(template: &PathTemplate) -> String {
    let mut out = String::from("attributes:\n");
    for spec in template.registry().iter() {
        let flag = if spec.required { "required" } else { "optional" };
        let _ = writeln!(out, "  {} ({flag})", spec.name);
    }

    let layout: Vec<String> = template.segments().iter().map(ToString::to_string).collect();
    let _ = writeln!(out, "layout: {}", layout.join(" "));

    if !template.rules().is_empty() {
        out.push_str("rules:\n");
    }
    for rule in template.rules() {
        let values: Vec<&str> = rule.trigger_values.iter().map(String::as_str).collect();
        let allowed: Vec<&str> = rule.allowed_keys.iter().map(|k| k.as_str()).collect();
        let _ = writeln!(
            out,
            "  {} in [{}] allows [{}]",
            rule.trigger_key,
            values.join(", "),
            allowed.join(", ")
        );
    }
    out
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("archivotron=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render { source, attributes }) => {
            let template = load_template(&source)?;
            let attributes: AttributeMap = attributes.into_iter().collect();
            println!("{}", template.render(&attributes)?);
        }
        Some(Commands::Describe { source }) => {
            let template = load_template(&source)?;
            print!("{}", describe(&template));
        }
        None => {
            println!("Use 'archivotron --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute_splits_on_first_equals() {
        assert_eq!(
            parse_attribute("sub=01").unwrap(),
            ("sub".to_string(), "01".to_string())
        );
        assert_eq!(
            parse_attribute("acq=a=b").unwrap(),
            ("acq".to_string(), "a=b".to_string())
        );
        assert!(parse_attribute("sub").is_err());
    }

    #[test]
    fn test_cli_parses_render_with_preset() {
        let cli = Cli::try_parse_from([
            "archivotron",
            "render",
            "--preset",
            "bids",
            "--attr",
            "sub=01",
            "--attr",
            "modality=anat",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Render { source, attributes }) => {
                assert_eq!(source.preset, Some(Preset::Bids));
                assert!(source.template.is_none());
                assert_eq!(attributes.len(), 2);
            }
            _ => panic!("Expected render command"),
        }
    }

    #[test]
    fn test_cli_requires_exactly_one_source() {
        assert!(Cli::try_parse_from(["archivotron", "describe"]).is_err());
        assert!(Cli::try_parse_from([
            "archivotron",
            "describe",
            "--preset",
            "bids",
            "--template",
            "t.yaml",
        ])
        .is_err());
    }

    #[test]
    fn test_cli_rejects_malformed_attribute() {
        assert!(Cli::try_parse_from([
            "archivotron",
            "render",
            "--preset",
            "bids",
            "--attr",
            "sub",
        ])
        .is_err());
    }

    #[test]
    fn test_load_yaml_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.yaml");
        std::fs::write(
            &path,
            "options:\n  root: \"\"\n  file_separator: \"/\"\nsegments:\n  - component: sub\n  - filesep: true\n  - component: suffix\n    value_only: true\n",
        )
        .unwrap();

        let template = load_template_file(&path).unwrap();
        let attributes = AttributeMap::from([
            ("sub".to_string(), "01".to_string()),
            ("suffix".to_string(), "T1w".to_string()),
        ]);
        assert_eq!(template.render(&attributes).unwrap(), "sub-01/T1w");
    }

    #[test]
    fn test_load_json_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.json");
        std::fs::write(
            &path,
            r#"{"options": {"root": "", "kv_separator": ""}, "segments": [{"component": "pb"}, {"component": "r"}]}"#,
        )
        .unwrap();

        let template = load_template_file(&path).unwrap();
        let attributes = AttributeMap::from([
            ("pb".to_string(), "01".to_string()),
            ("r".to_string(), "02".to_string()),
        ]);
        assert_eq!(template.render(&attributes).unwrap(), "pb01_r02");
    }

    #[test]
    fn test_load_missing_template_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_template_file(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read template"));
    }

    #[test]
    fn test_describe_bids_preset() {
        let template = load_template(&TemplateSource {
            template: None,
            preset: Some(Preset::Bids),
        })
        .unwrap();

        let text = describe(&template);
        assert!(text.starts_with("attributes:\n  sub (required)\n  modality (required)\n"));
        assert!(text.contains("  ses (optional)\n"));
        assert!(text.contains("layout: sub-<sub> \"/\" ses-<ses>"));
        assert!(text.contains("  modality in [anat] allows ["));
    }
}
