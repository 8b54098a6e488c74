use profile_editor::app::App;
use profile_editor::avatar::FileSelection;
use profile_editor::config::Config;
use profile_editor::error::EditorError;
use profile_editor::store::JsonProfileStore;
use profile_editor::tags;
use profile_editor::{Field, ProfileForm};

use clap::Parser;
use entrait::Impl;
use std::io::Write;
use std::path::PathBuf;

/// Edit the stored profile, then submit or cancel like the profile form does.
#[derive(clap::Parser)]
struct Cli {
    #[clap(flatten)]
    config: Config,

    /// Set a text field, e.g. `--set title=Developer`
    #[clap(long = "set", value_name = "FIELD=VALUE")]
    assignments: Vec<Assignment>,

    /// Add a skill
    #[clap(long = "skill")]
    skills: Vec<String>,

    /// Remove a skill
    #[clap(long = "drop-skill")]
    dropped_skills: Vec<String>,

    /// Image file to use as the avatar
    #[clap(long)]
    avatar: Option<PathBuf>,

    /// Go back to the placeholder avatar
    #[clap(long, conflicts_with = "avatar")]
    remove_avatar: bool,

    /// Leave without saving
    #[clap(long)]
    cancel: bool,

    /// List vocabulary skills starting with PREFIX that the profile lacks, then exit
    #[clap(long, value_name = "PREFIX")]
    suggest: Option<String>,
}

#[derive(Debug)]
struct Assignment(Field, String);

impl std::str::FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=VALUE, got `{s}`"))?;

        Ok(Self(field.parse()?, value.to_string()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    run(Cli::parse(), &mut std::io::stdout()).await
}

/// Apply the command line to the stored profile, writing visited routes or suggestions to `out`.
async fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let store = JsonProfileStore::new(&cli.config.profile_path);
    let current = store.load().await?;
    let app = App::new(store);

    let mut form = ProfileForm::new(Impl::new(app.clone()), current)
        .with_max_avatar_bytes(cli.config.avatar_max_bytes);

    if let Some(prefix) = &cli.suggest {
        for tag in tags::suggest(prefix, form.draft()) {
            writeln!(out, "{tag}")?;
        }
        return Ok(());
    }

    for Assignment(field, value) in cli.assignments {
        form.set(field, value)?;
    }
    for skill in &cli.skills {
        form.add_skill(skill)?;
    }
    for skill in &cli.dropped_skills {
        form.remove_skill(skill)?;
    }

    if let Some(path) = cli.avatar {
        form.open_avatar_picker();
        if let Err(e) = form.select_avatar(Some(FileSelection::new(path))).await {
            eprintln!("avatar not changed: {e}");
        }
    }
    if cli.remove_avatar {
        form.remove_avatar()?;
    }

    if cli.cancel {
        form.cancel();
    } else {
        match form.submit().await {
            Ok(()) => {}
            Err(EditorError::Invalid(errors)) => {
                for (field, message) in errors.iter() {
                    eprintln!("{field}: {message}");
                }
                anyhow::bail!("profile not saved");
            }
            Err(e) => return Err(e.into()),
        }
    }

    for route in app.visited_routes() {
        writeln!(out, "{route}")?;
    }

    Ok(())
}
