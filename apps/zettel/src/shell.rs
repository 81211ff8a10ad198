//! Line-oriented front-end over a [`Workbench`].
//!
//! Every failure is reported on the notice stream and the session carries on.

use std::io::Write;

use color_eyre::eyre;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use zettel_domain::Category;
use zettel_workbench::{AddOutcome, EditorState, SearchPhase, Workbench};

use crate::render;

const HELP: &str = "\
Drafting:
  title <text>         set the title of the next note
  body <text>          set its body
  category <name>      fleeting, literature or deduction
  reference <text>     source of a literature note
  form                 show the draft
  create               stage the draft
Staging:
  staged               re-fetch and list staged notes
  select <id>          pick a staged note to link (discards drafted links)
  deselect             abandon the selection
  types                list relationship types
  type <id|label>      relationship type for new links
  search <text>        find committed notes to link
  link <id>            draft a link to a committed note
  unlink <id>          drop a drafted link
  links                show drafted links
  commit               commit the selected note with its links
Committed notes:
  list [text]          search committed notes
  show <id>            show a note with its links and backlinks
  permanent            toggle permanence of the shown note
  close                clear the shown note
  help | quit";

enum Flow {
	Continue,
	Quit,
}

struct Shell<'a, W, E> {
	workbench: &'a mut Workbench,
	out: &'a mut W,
	notices: &'a mut E,
}
impl<W, E> Shell<'_, W, E>
where
	W: Write,
	E: Write,
{
	async fn dispatch(&mut self, verb: &str, arg: &str) -> color_eyre::Result<Flow> {
		match verb {
			"help" => writeln!(self.out, "{HELP}")?,
			"quit" | "exit" => return Ok(Flow::Quit),
			"title" => self.workbench.staging_mut().form_mut().title = arg.to_string(),
			"body" => self.workbench.staging_mut().form_mut().body = arg.to_string(),
			"category" => {
				self.workbench.staging_mut().form_mut().category = arg.parse::<Category>()?;
			},
			"reference" => self.workbench.staging_mut().form_mut().reference = arg.to_string(),
			"form" => render::form(self.out, self.workbench.staging().form())?,
			"create" => {
				let note = self.workbench.staging_mut().create_note().await?;

				writeln!(self.out, "Staged {} ({}).", note.id, note.title)?;
			},
			"staged" => {
				let staged = self.workbench.staging_mut().refresh_staged().await?;

				render::notes(self.out, staged)?;
			},
			"select" => {
				let note = self.workbench.staging_mut().select(required(arg, "an id")?).await?;

				writeln!(self.out, "Selected {} ({}).", note.id, note.title)?;
			},
			"deselect" => self.workbench.staging_mut().deselect()?,
			"types" => {
				let editor = self.workbench.staging_mut().editor_mut();

				editor.mount().await?;

				let selected = editor.selected_relationship_type().map(|rt| rt.id.as_str());

				render::relationship_types(self.out, editor.catalog().types(), selected)?;
			},
			"type" => {
				let editor = self.workbench.staging_mut().editor_mut();

				editor.mount().await?;

				let rt = editor.select_relationship_type(required(arg, "a type")?)?;

				writeln!(self.out, "New links will use \"{}\".", rt.label)?;
			},
			"search" => self.search(arg).await?,
			"link" => self.link(required(arg, "an id")?).await?,
			"unlink" => {
				if !self.workbench.staging_mut().remove_link(required(arg, "an id")?)? {
					writeln!(self.notices, "No drafted link to {arg}.")?;
				}
			},
			"links" => render::suggested_links(self.out, self.workbench.staging().suggested_links())?,
			"commit" => {
				let receipt = self.workbench.commit_staged().await?;

				render::receipt(self.out, &receipt)?;
			},
			"list" => {
				let notes = self.workbench.notes_mut();

				notes.set_search_term(arg);

				let snapshot = notes.settle().await;

				if snapshot.phase == SearchPhase::Failed {
					writeln!(self.notices, "Failed to search notes.")?;
				}

				render::notes(self.out, &snapshot.results)?;
			},
			"show" => {
				self.workbench.select_committed(required(arg, "an id")?).await?;

				render::detail(self.out, self.workbench.detail())?;
			},
			"permanent" => {
				let permanent = self.workbench.toggle_permanence().await?;
				let note_id = self.workbench.selected_committed().unwrap_or_default().to_string();

				render::permanence(self.out, &note_id, permanent)?;
			},
			"close" => self.workbench.clear_selection(),
			_ => writeln!(self.notices, "Unknown command `{verb}`; try `help`.")?,
		}

		Ok(Flow::Continue)
	}

	async fn search(&mut self, term: &str) -> color_eyre::Result<()> {
		let editor = self.workbench.staging_mut().editor_mut();

		editor.set_search_term(term);
		editor.settle().await;

		match editor.state() {
			EditorState::ResultsShown => render::notes(self.out, &editor.results())?,
			EditorState::Idle | EditorState::Searching => writeln!(self.out, "No matches.")?,
		}

		Ok(())
	}

	async fn link(&mut self, target_id: &str) -> color_eyre::Result<()> {
		let found = self
			.workbench
			.staging()
			.editor()
			.results()
			.into_iter()
			.find(|note| note.id == target_id);
		let target = match found {
			Some(note) => note,
			None => self.workbench.service().get_note(target_id).await?,
		};

		match self.workbench.staging_mut().add_link(&target)? {
			AddOutcome::Added => writeln!(self.out, "Linked {} ({}).", target.id, target.title)?,
			AddOutcome::Duplicate => writeln!(self.notices, "{} is already linked.", target.id)?,
		}

		Ok(())
	}
}

/// Runs the session until `quit` or end of input.
pub async fn run<R, W, E>(
	workbench: &mut Workbench,
	input: R,
	out: &mut W,
	notices: &mut E,
) -> color_eyre::Result<()>
where
	R: AsyncBufRead + Unpin,
	W: Write,
	E: Write,
{
	if let Err(err) = workbench.mount().await {
		writeln!(notices, "{err}")?;
	}

	writeln!(out, "Type `help` for commands.")?;

	let mut shell = Shell { workbench, out, notices };
	let mut lines = input.lines();

	loop {
		write!(shell.out, "zettel> ")?;
		shell.out.flush()?;

		let Some(line) = lines.next_line().await? else {
			break;
		};
		let line = line.trim();

		if line.is_empty() {
			continue;
		}

		let (verb, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

		match shell.dispatch(verb, arg.trim()).await {
			Ok(Flow::Continue) => {},
			Ok(Flow::Quit) => break,
			Err(err) => writeln!(shell.notices, "{err}")?,
		}

		if shell.workbench.sync() {
			writeln!(shell.out, "Committed notes changed; selection cleared.")?;
		}
	}

	writeln!(shell.out)?;

	Ok(())
}

fn required<'a>(arg: &'a str, what: &str) -> eyre::Result<&'a str> {
	if arg.is_empty() {
		return Err(eyre::eyre!("Expected {what}."));
	}

	Ok(arg)
}
