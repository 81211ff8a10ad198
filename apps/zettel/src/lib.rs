pub mod render;
pub mod shell;

use std::{
	io::{self, Write},
	path::PathBuf,
	sync::Arc,
};

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use zettel_cli::LinkSpec;
use zettel_client::HttpNoteService;
use zettel_domain::Category;
use zettel_workbench::{AddOutcome, SearchPhase, Settings, SharedService, Workbench};

#[derive(Debug, Parser)]
#[command(
	version = zettel_cli::VERSION,
	rename_all = "kebab",
	styles = zettel_cli::styles(),
)]
pub struct Args {
	/// Without a config file the service URL comes from ZETTEL_API_BASE_URL.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// List staged notes.
	Staged,
	/// Stage a new note.
	Create {
		#[arg(long)]
		title: String,
		#[arg(long, default_value = "")]
		body: String,
		#[arg(long, default_value = "fleeting")]
		category: Category,
		/// Source of a literature note; ignored for other categories.
		#[arg(long)]
		reference: Option<String>,
	},
	/// Commit a staged note, optionally linking it to committed notes.
	Commit {
		id: String,
		/// TYPE is a relationship type id or label.
		#[arg(long = "link", value_name = "TARGET=TYPE")]
		links: Vec<LinkSpec>,
	},
	/// Search committed notes.
	List {
		#[arg(long, short = 'q', default_value = "")]
		query: String,
	},
	/// Show a committed note with its links and backlinks.
	Show { id: String },
	TogglePermanent { id: String },
	RelationshipTypes,
	/// Interactive session over stdin.
	Shell,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = match &args.config {
		Some(path) => zettel_config::load(path)?,
		None => zettel_config::from_env()?,
	};
	init_tracing(&config)?;
	let service: SharedService = Arc::new(HttpNoteService::new(&config.service)?);
	tracing::debug!(api_base = %config.service.api_base, "Note service configured.");
	let mut workbench = Workbench::new(service, Settings::from(&config.workbench));

	match args.command {
		Command::Shell => {
			let input = BufReader::new(tokio::io::stdin());

			shell::run(&mut workbench, input, &mut io::stdout(), &mut io::stderr()).await
		},
		command => execute(&mut workbench, command, &mut io::stdout(), &mut io::stderr()).await,
	}
}

/// Runs one non-interactive command against `workbench`. Notices that do not fail the command
/// go to `notices`.
pub async fn execute<W, E>(
	workbench: &mut Workbench,
	command: Command,
	out: &mut W,
	notices: &mut E,
) -> color_eyre::Result<()>
where
	W: Write,
	E: Write,
{
	match command {
		Command::Staged => {
			workbench.mount().await?;

			render::notes(out, workbench.staging().staged())?;
		},
		Command::Create { title, body, category, reference } => {
			let staging = workbench.staging_mut();
			let form = staging.form_mut();

			form.title = title;
			form.body = body;
			form.category = category;
			form.reference = reference.unwrap_or_default();

			let note = staging.create_note().await?;

			writeln!(out, "Staged {} ({}).", note.id, note.title)?;
		},
		Command::Commit { id, links } => {
			let service = workbench.service().clone();

			workbench.mount().await?;

			let staging = workbench.staging_mut();

			staging.select(&id).await?;

			for spec in &links {
				staging.editor_mut().select_relationship_type(&spec.relationship)?;

				let target = service.get_note(&spec.target).await?;

				if staging.add_link(&target)? == AddOutcome::Duplicate {
					writeln!(notices, "Skipping {}; it is already linked.", spec.target)?;
				}
			}

			let receipt = workbench.commit_staged().await?;

			render::receipt(out, &receipt)?;
		},
		Command::List { query } => {
			let notes = workbench.notes_mut();

			notes.set_search_term(query);

			let snapshot = notes.settle().await;

			if snapshot.phase == SearchPhase::Failed {
				return Err(eyre::eyre!(
					"Failed to search notes: {}",
					snapshot.error.unwrap_or_default()
				));
			}

			render::notes(out, &snapshot.results)?;
		},
		Command::Show { id } => {
			workbench.select_committed(&id).await?;

			render::detail(out, workbench.detail())?;
		},
		Command::TogglePermanent { id } => {
			workbench.select_committed(&id).await?;

			let permanent = workbench.toggle_permanence().await?;

			render::permanence(out, &id, permanent)?;
		},
		Command::RelationshipTypes => {
			let types = workbench.service().relationship_types().await?;

			render::relationship_types(out, &types, None)?;
		},
		Command::Shell => return Err(eyre::eyre!("The shell reads from stdin; run it directly.")),
	}

	Ok(())
}

fn init_tracing(config: &zettel_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
	Ok(())
}
