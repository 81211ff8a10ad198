//! Plain-text output for notes and workflow results.

use std::io::{self, Write};

use zettel_domain::{Note, RelationshipType};
use zettel_workbench::{CommitReceipt, DetailView, NoteDetail, NoteForm, SuggestedLinks};

pub fn note(out: &mut impl Write, note: &Note) -> io::Result<()> {
	let marker = if note.is_permanent { "*" } else { " " };

	writeln!(out, "{marker} {}  [{}]  {}", note.id, note.category, note.title)
}

pub fn notes(out: &mut impl Write, notes: &[Note]) -> io::Result<()> {
	if notes.is_empty() {
		return writeln!(out, "No notes.");
	}

	for item in notes {
		note(out, item)?;
	}

	Ok(())
}

pub fn detail(out: &mut impl Write, detail: &NoteDetail) -> io::Result<()> {
	let note = match detail.view() {
		DetailView::Empty => return writeln!(out, "No note selected."),
		DetailView::Error(message) => return writeln!(out, "{message}"),
		DetailView::Note(note) => note,
	};

	writeln!(out, "{}", note.title)?;
	writeln!(out, "  id:        {}", note.id)?;
	writeln!(out, "  category:  {}", note.category)?;
	writeln!(out, "  status:    {}", note.status)?;
	writeln!(out, "  permanent: {}", if note.is_permanent { "yes" } else { "no" })?;

	if let Some(reference) = &note.reference {
		writeln!(out, "  reference: {reference}")?;
	}
	if !note.body.is_empty() {
		writeln!(out)?;

		for line in note.body.lines() {
			writeln!(out, "  {line}")?;
		}
	}

	let outgoing = detail.outgoing();
	let incoming = detail.incoming();

	if !outgoing.is_empty() {
		writeln!(out, "Links:")?;

		for link in &outgoing {
			writeln!(out, "  -> {} {}", link.relationship_label, link.note_id)?;
		}
	}
	if !incoming.is_empty() {
		writeln!(out, "Backlinks:")?;

		for link in &incoming {
			let title = link.note_title.as_deref().unwrap_or(&link.note_id);

			writeln!(out, "  <- {} {} ({})", link.relationship_label, title, link.note_id)?;
		}
	}

	Ok(())
}

/// Lists the catalog, marking `selected` when given.
pub fn relationship_types(
	out: &mut impl Write,
	types: &[RelationshipType],
	selected: Option<&str>,
) -> io::Result<()> {
	if types.is_empty() {
		return writeln!(out, "No relationship types.");
	}

	for rt in types {
		let marker = if selected == Some(rt.id.as_str()) { ">" } else { " " };
		let color = rt.color.as_deref().unwrap_or("-");
		let default = if rt.is_default { "  (default)" } else { "" };

		writeln!(out, "{marker} {}  {}  {color}{default}", rt.id, rt.label)?;
	}

	Ok(())
}

pub fn suggested_links(out: &mut impl Write, links: &SuggestedLinks) -> io::Result<()> {
	if links.is_empty() {
		return writeln!(out, "No links drafted.");
	}

	for link in links.iter() {
		writeln!(
			out,
			"  {} {} ({})",
			link.relationship_type_label, link.target_note_title, link.target_note_id
		)?;
	}

	Ok(())
}

pub fn form(out: &mut impl Write, form: &NoteForm) -> io::Result<()> {
	writeln!(out, "  title:     {}", form.title)?;
	writeln!(out, "  body:      {}", form.body)?;
	writeln!(out, "  category:  {}", form.category)?;

	if form.category.takes_reference() {
		writeln!(out, "  reference: {}", form.reference)?;
	}

	Ok(())
}

pub fn receipt(out: &mut impl Write, receipt: &CommitReceipt) -> io::Result<()> {
	let message = receipt.message.as_deref().unwrap_or("Note committed.");

	writeln!(out, "{message} ({}, {} link(s)).", receipt.note_id, receipt.links.len())
}

pub fn permanence(out: &mut impl Write, note_id: &str, permanent: bool) -> io::Result<()> {
	if permanent {
		writeln!(out, "{note_id} is now permanent.")
	} else {
		writeln!(out, "{note_id} is no longer permanent.")
	}
}
