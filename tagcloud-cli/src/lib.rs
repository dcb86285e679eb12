use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{ArgGroup, Parser, ValueEnum};
use tagcloud::color::{Hue, Luminosity, NamedHue};
use tagcloud::{
    CloudConfig, CloudProps, ConfigError, FixedPalette, RandomSeed, Tag, TagCloud,
};
use tracing::info;

pub mod html;
pub mod notes;

pub const DEFAULT_MIN_SIZE: u32 = 12;
pub const DEFAULT_MAX_SIZE: u32 = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "tagcloud",
    author,
    version,
    about = "Render weighted tags or note hashtags as a tag cloud",
    long_about = None
)]
#[command(group(ArgGroup::new("input").required(true).args(["tags", "notes"])))]
pub struct Cli {
    /// JSON file holding an array of tags
    #[arg(long, value_name = "TAGS_FILE")]
    pub tags: Option<PathBuf>,

    /// Directory of Markdown notes whose #hashtags are counted
    #[arg(long, value_name = "NOTES_DIR")]
    pub notes: Option<PathBuf>,

    /// Destination file for the rendered cloud
    #[arg(long, value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Cloud config file (defaults to $TAGCLOUD_CONFIG or the user config dir)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub min_size: Option<u32>,

    #[arg(long)]
    pub max_size: Option<u32>,

    /// Seed for a reproducible order and palette
    #[arg(long)]
    pub seed: Option<String>,

    /// Keep the input order
    #[arg(long)]
    pub no_shuffle: bool,

    /// Leave tags without a pinned colour uncoloured
    #[arg(long)]
    pub no_color: bool,

    /// Named hue (red, blue, monochrome, ...) or degrees in [0, 360]
    #[arg(long, value_parser = parse_hue)]
    pub hue: Option<Hue>,

    /// bright, light, dark or random
    #[arg(long, value_parser = parse_luminosity)]
    pub luminosity: Option<Luminosity>,

    /// Pick colours from the fixed OKLCH palette
    #[arg(long)]
    pub palette: bool,

    /// Element wrapping the tags (div, section, ul, ...)
    #[arg(long, value_name = "ELEMENT")]
    pub container: Option<String>,
}

fn parse_hue(value: &str) -> Result<Hue, String> {
    if let Ok(degrees) = value.parse::<f64>() {
        if (0.0..=360.0).contains(&degrees) {
            return Ok(Hue::Degrees(degrees));
        }
        return Err(format!("hue {degrees} is outside [0, 360]"));
    }

    let named = match value.to_ascii_lowercase().as_str() {
        "monochrome" => NamedHue::Monochrome,
        "red" => NamedHue::Red,
        "orange" => NamedHue::Orange,
        "yellow" => NamedHue::Yellow,
        "green" => NamedHue::Green,
        "blue" => NamedHue::Blue,
        "purple" => NamedHue::Purple,
        "pink" => NamedHue::Pink,
        other => return Err(format!("unknown hue '{other}'")),
    };
    Ok(Hue::Named(named))
}

fn parse_luminosity(value: &str) -> Result<Luminosity, String> {
    match value.to_ascii_lowercase().as_str() {
        "bright" => Ok(Luminosity::Bright),
        "light" => Ok(Luminosity::Light),
        "dark" => Ok(Luminosity::Dark),
        "random" => Ok(Luminosity::Random),
        other => Err(format!("unknown luminosity '{other}'")),
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let tags = load_tags(&cli)?;
    let config = resolve_config(&cli)?;

    let mut cloud = if cli.palette {
        TagCloud::with_color_generator(FixedPalette)
    } else {
        TagCloud::new()
    };
    let view = cloud
        .render(&CloudProps::new(tags, config))
        .context("failed to render tag cloud")?;

    let rendered = match cli.format {
        OutputFormat::Html => html::render_view(&view),
        OutputFormat::Json => serde_json::to_string_pretty(&view)?,
    };

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "failed to create output parent directory '{}'",
                    parent.display()
                )
            })?;
        }
    }

    fs::write(&cli.output, rendered)
        .with_context(|| format!("failed to write cloud to '{}'", cli.output.display()))?;

    info!(
        target: "tagcloud::cli",
        output = %cli.output.display(),
        format = ?cli.format,
        tags = view.children.len(),
        "tag cloud written"
    );

    Ok(())
}

fn load_tags(cli: &Cli) -> Result<Vec<Tag>> {
    match (&cli.tags, &cli.notes) {
        (Some(path), _) => read_tags_file(path),
        (None, Some(dir)) => {
            ensure_directory(dir)
                .with_context(|| format!("notes directory '{}' is invalid", dir.display()))?;
            notes::collect_tags(dir)
        }
        (None, None) => Err(anyhow!("either --tags or --notes is required")),
    }
}

fn read_tags_file(path: &Path) -> Result<Vec<Tag>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tags file '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse tags file '{}'", path.display()))
}

/// Config file (explicit, then default location), then flag overrides.
fn resolve_config(cli: &Cli) -> Result<CloudConfig> {
    let from_file = match &cli.config {
        Some(path) => Some(
            CloudConfig::load_from_path(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?,
        ),
        None => match CloudConfig::load() {
            Ok(config) => config,
            Err(ConfigError::MissingConfigDir) => None,
            Err(err) => return Err(err).context("failed to load default config"),
        },
    };

    let mut config =
        from_file.unwrap_or_else(|| CloudConfig::new(DEFAULT_MIN_SIZE, DEFAULT_MAX_SIZE));

    if let Some(min_size) = cli.min_size {
        config.min_size = min_size;
    }
    if let Some(max_size) = cli.max_size {
        config.max_size = max_size;
    }
    if let Some(seed) = &cli.seed {
        config.random_seed = Some(RandomSeed::from(seed.as_str()));
    }
    if cli.no_shuffle {
        config.shuffle = false;
    }
    if cli.no_color {
        config.disable_random_color = true;
    }
    if let Some(hue) = cli.hue {
        config.color_options.hue = Some(hue);
    }
    if let Some(luminosity) = cli.luminosity {
        config.color_options.luminosity = Some(luminosity);
    }
    if let Some(container) = &cli.container {
        config.container = container.clone();
    }

    config.validate().context("invalid cloud configuration")?;
    Ok(config)
}

fn ensure_directory(path: &Path) -> Result<&Path> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to read metadata for '{}'", path.display()))?;

    if !metadata.is_dir() {
        anyhow::bail!("'{}' is not a directory", path.display());
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use assert_fs::prelude::*;
    use clap::CommandFactory;
    use serde_json::Value;

    const DEFAULTS_JSON: &str = r#"{"min_size": 12, "max_size": 35}"#;

    /// A run writing to `output` whose config is a file inside `temp`, so the
    /// user's own config never leaks into the assertions.
    fn cli_for(temp: &assert_fs::TempDir, output: &str) -> Cli {
        let config = temp.child("defaults.json");
        config.write_str(DEFAULTS_JSON).expect("write default config");
        Cli {
            tags: None,
            notes: None,
            output: temp.child(output).path().to_path_buf(),
            format: OutputFormat::Html,
            config: Some(config.path().to_path_buf()),
            min_size: None,
            max_size: None,
            seed: None,
            no_shuffle: false,
            no_color: false,
            hue: None,
            luminosity: None,
            palette: false,
            container: None,
        }
    }

    const TAGS_JSON: &str = r#"[
        {"value": "JavaScript", "count": 38},
        {"value": "React", "count": 30},
        {"value": "Nodejs", "count": 28, "color": "green"},
        {"value": "MongoDB", "count": 18}
    ]"#;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_requires_an_input() {
        let result = Cli::try_parse_from(["tagcloud", "--output", "out.html"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_hue_and_luminosity() {
        let cli = Cli::try_parse_from([
            "tagcloud", "--tags", "t.json", "--output", "o.html", "--hue", "Blue",
            "--luminosity", "dark",
        ])
        .expect("parse args");
        assert_eq!(cli.hue, Some(Hue::Named(NamedHue::Blue)));
        assert_eq!(cli.luminosity, Some(Luminosity::Dark));

        let numeric = Cli::try_parse_from([
            "tagcloud", "--tags", "t.json", "--output", "o.html", "--hue", "200",
        ])
        .expect("parse numeric hue");
        assert_eq!(numeric.hue, Some(Hue::Degrees(200.0)));

        assert!(parse_hue("teal").is_err());
        assert!(parse_hue("400").is_err());
    }

    #[test]
    fn run_errors_when_tags_file_missing() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let mut cli = cli_for(&temp, "cloud.html");
        cli.tags = Some(temp.child("missing.json").path().to_path_buf());

        assert!(run(cli).is_err(), "expected missing file error");
    }

    #[test]
    fn run_errors_when_notes_is_not_a_directory() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let file = temp.child("note.md");
        file.write_str("#rust").expect("write note");
        let mut cli = cli_for(&temp, "cloud.html");
        cli.notes = Some(file.path().to_path_buf());

        assert!(run(cli).is_err(), "expected not-a-directory error");
    }

    #[test]
    fn run_renders_tags_file_to_html() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let tags = temp.child("tags.json");
        tags.write_str(TAGS_JSON).expect("write tags");
        let output = temp.child("out/cloud.html");

        let mut cli = cli_for(&temp, "out/cloud.html");
        cli.tags = Some(tags.path().to_path_buf());
        cli.seed = Some("html".to_string());

        run(cli).expect("run cli");

        let html = fs::read_to_string(output.path()).expect("read output");
        assert!(html.starts_with("<div class=\"tag-cloud\">"));
        assert_eq!(html.matches("<span").count(), 4);
        assert!(html.contains("color: green"));
        assert!(html.contains("font-size: 35px"));
        assert!(html.contains("font-size: 12px"));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let tags = temp.child("tags.json");
        tags.write_str(TAGS_JSON).expect("write tags");

        let render = |name: &str| {
            let output = temp.child(name);
            let mut cli = cli_for(&temp, name);
            cli.tags = Some(tags.path().to_path_buf());
            cli.seed = Some("stable".to_string());
            run(cli).expect("run cli");
            fs::read_to_string(output.path()).expect("read output")
        };

        assert_eq!(render("first.html"), render("second.html"));
    }

    #[test]
    fn run_renders_notes_to_json_with_config_file() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let notes = temp.child("notes");
        notes.create_dir_all().expect("create notes");
        notes
            .child("monday.md")
            .write_str("#rust #rust #cli")
            .expect("write note");
        notes
            .child("tuesday.md")
            .write_str("#rust #design")
            .expect("write note");

        let config = temp.child("config.json");
        config
            .write_str(
                r#"{"min_size": 10, "max_size": 20, "shuffle": false,
                    "disable_random_color": true, "attributes": {"id": "notes"}}"#,
            )
            .expect("write config");

        let output = temp.child("cloud.json");
        let mut cli = cli_for(&temp, "cloud.json");
        cli.notes = Some(notes.path().to_path_buf());
        cli.config = Some(config.path().to_path_buf());
        cli.format = OutputFormat::Json;
        cli.max_size = Some(30);

        run(cli).expect("run cli");

        let view: Value =
            serde_json::from_str(&fs::read_to_string(output.path()).expect("read output"))
                .expect("parse output");
        assert_eq!(view["attributes"]["id"], "notes");
        let children = view["children"].as_array().expect("children");
        let texts: Vec<&str> = children
            .iter()
            .map(|child| child["text"].as_str().expect("text"))
            .collect();
        assert_eq!(texts, vec!["rust", "cli", "design"]);
        assert_eq!(children[0]["style"]["font-size"], "30px");
        assert_eq!(children[1]["style"]["font-size"], "10px");
        assert!(children.iter().all(|child| child["style"].get("color").is_none()));
    }

    #[test]
    fn run_rejects_inverted_size_flags() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let tags = temp.child("tags.json");
        tags.write_str(TAGS_JSON).expect("write tags");

        let mut cli = cli_for(&temp, "cloud.html");
        cli.tags = Some(tags.path().to_path_buf());
        cli.config = Some(temp.child("absent.json").path().to_path_buf());

        assert!(run(cli.clone()).is_err(), "explicit config file must exist");

        cli.config = Some(temp.child("defaults.json").path().to_path_buf());
        cli.min_size = Some(40);
        cli.max_size = Some(20);
        let error = run(cli).expect_err("inverted sizes");
        assert!(error.to_string().contains("invalid cloud configuration"));
    }

    #[test]
    fn container_flag_changes_wrapping_element() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let tags = temp.child("tags.json");
        tags.write_str(TAGS_JSON).expect("write tags");

        let mut cli = cli_for(&temp, "cloud.html");
        cli.tags = Some(tags.path().to_path_buf());
        cli.container = Some("section".to_string());
        run(cli.clone()).expect("run cli");

        let html = fs::read_to_string(temp.child("cloud.html").path()).expect("read output");
        assert!(html.starts_with("<section class=\"tag-cloud\">"));
        assert!(html.ends_with("</section>\n"));

        cli.container = Some("div onclick".to_string());
        let error = run(cli).expect_err("invalid container");
        assert!(error.to_string().contains("invalid cloud configuration"));
    }

    #[test]
    fn explicit_config_wins_over_config_env() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let tags = temp.child("tags.json");
        tags.write_str(TAGS_JSON).expect("write tags");
        let env_config = temp.child("env.json");
        env_config
            .write_str(r#"{"min_size": 20, "max_size": 40, "shuffle": false}"#)
            .expect("write env config");

        let mut cli = cli_for(&temp, "cloud.html");
        cli.tags = Some(tags.path().to_path_buf());

        // SAFETY: no other test in this crate reads the variable; every run
        // here passes an explicit config.
        unsafe { std::env::set_var(tagcloud::config::CONFIG_PATH_ENV, env_config.path()) };
        let result = run(cli);
        // SAFETY: as above.
        unsafe { std::env::remove_var(tagcloud::config::CONFIG_PATH_ENV) };
        result.expect("run cli");

        let html = fs::read_to_string(temp.child("cloud.html").path()).expect("read output");
        assert!(html.contains("font-size: 35px"));
        assert!(html.contains("font-size: 12px"));
        assert!(!html.contains("font-size: 40px"));
    }
}
