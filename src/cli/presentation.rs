//! CLI presentation: text and json formatters for session results.

use crate::session::SessionSnapshot;
use crate::types::{Answer, GraphArtifact};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::json;

pub fn format_documents_text(documents: &[String], selection: &[String]) -> String {
    if documents.is_empty() {
        return "No documents uploaded.\n\nUse 'scicopilot upload <PATH>' to add one.".to_string();
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Document", "Selected"]);
    for (i, doc) in documents.iter().enumerate() {
        let marker = if selection.contains(doc) { "yes" } else { "" };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(doc),
            Cell::new(marker),
        ]);
    }
    format!("{}\nTotal: {} document(s)", table, documents.len())
}

pub fn format_documents_json(documents: &[String], selection: &[String]) -> String {
    let out = json!({
        "files": documents,
        "selected": selection,
        "total": documents.len(),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_artifact_text(artifact: &GraphArtifact) -> String {
    let mut output = String::new();
    if !artifact.phrase_groups.is_empty() {
        output.push_str("Important Phrases:\n");
        for (i, group) in artifact.phrase_groups.iter().enumerate() {
            output.push_str(&format!("  {:>2}. {}\n", i + 1, group.join(", ")));
        }
    }
    if !artifact.questions.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("Generated Questions:\n");
        for question in &artifact.questions {
            output.push_str(&format!("  - {}\n", question));
        }
    }
    if output.is_empty() {
        output.push_str("Graph created; the service returned no phrases or questions.\n");
    }
    output
}

pub fn format_artifact_json(artifact: &GraphArtifact) -> String {
    serde_json::to_string_pretty(artifact).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_answer(answer: &Answer) -> String {
    format!("Response: {}", answer)
}

pub fn format_status_text(snapshot: &SessionSnapshot) -> String {
    let namespace = if snapshot.namespace.is_empty() {
        "(none)"
    } else {
        snapshot.namespace.as_str()
    };
    let mut output = format!("Service:   {}\nNamespace: {}\n", snapshot.origin, namespace);
    output.push_str(&format!("Documents: {}\n", snapshot.documents.len()));
    output.push_str(&format!(
        "Selected:  {}/{}",
        snapshot.selection.len(),
        crate::selection::MAX_SELECTION
    ));
    if !snapshot.selection.is_empty() {
        output.push_str(&format!(" ({})", snapshot.selection.join(", ")));
    }
    output.push('\n');
    match &snapshot.artifact {
        Some(artifact) => output.push_str(&format!(
            "Graph:     {} phrase group(s), {} question(s)\n",
            artifact.phrase_groups.len(),
            artifact.questions.len()
        )),
        None => output.push_str("Graph:     (not built)\n"),
    }
    if let Some(answer) = &snapshot.answer {
        output.push_str(&format!("Answer:    {}\n", answer));
    }
    output
}
