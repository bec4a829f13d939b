use outline_core::{
    AppState, AppViewModel, HeadingLevel, Notice, ServerHealth, TaskRowView, TaskStatus,
};
use outline_engine::ExportSummary;

/// Prints task rows as they change state, keeping quiet otherwise. The view
/// model is the single source of truth; this only diffs against what was
/// already printed.
pub struct StatusPrinter {
    last_tasks: Vec<TaskRowView>,
    last_server: ServerHealth,
}

impl StatusPrinter {
    pub fn new() -> Self {
        Self {
            last_tasks: Vec::new(),
            last_server: ServerHealth::Checking,
        }
    }

    pub fn render(&mut self, state: &mut AppState) {
        if !state.consume_dirty() {
            return;
        }
        let view = state.view();

        if view.server != self.last_server {
            match view.server {
                ServerHealth::Online => println!("Extraction service is online."),
                ServerHealth::Offline => {
                    println!("Extraction service is offline (is the backend running?).")
                }
                ServerHealth::Checking => {}
            }
            self.last_server = view.server;
        }

        for row in &view.tasks {
            let changed = self
                .last_tasks
                .iter()
                .find(|prev| prev.id == row.id)
                .map(|prev| prev != row)
                .unwrap_or(true);
            if changed {
                println!("{}", format_task_row(row));
            }
        }
        self.last_tasks = view.tasks;
    }
}

pub fn render_selection(view: &AppViewModel) {
    if view.selected.is_empty() {
        return;
    }
    println!("{} files selected:", view.selected.len());
    for file in &view.selected {
        println!("  {} ({})", file.name, format_size(file.size_bytes));
    }
}

pub fn render_notice(notice: &Notice) {
    match notice {
        Notice::EmptySelection => {
            println!("No files selected. Pass one or more PDF files to process.");
        }
        Notice::ExtractionFailed { file, message } => {
            println!("Processing failed for {file}: {message}");
        }
        Notice::BatchFinished { completed, total } => {
            println!("Processing complete: {completed} of {total} files succeeded.");
        }
    }
}

pub fn render_outlines(view: &AppViewModel) {
    if view.results.is_empty() {
        return;
    }
    println!("\nExtracted outlines");
    for document in &view.results {
        println!(
            "\n{} ({}, {} headings)",
            document.title,
            document.file_name,
            document.entries.len()
        );
        if document.entries.is_empty() {
            println!("  no headings detected in this document");
            continue;
        }
        for entry in &document.entries {
            println!(
                "  {}{} {} (page {})",
                level_indent(&entry.level),
                entry.level.as_tag(),
                entry.text,
                entry.page
            );
        }
    }
}

pub fn render_export_summary(summary: &ExportSummary) {
    for path in &summary.files {
        println!("Wrote {}", path.display());
    }
    if let Some(path) = &summary.combined_path {
        println!("Wrote {}", path.display());
    }
}

fn format_task_row(row: &TaskRowView) -> String {
    let badge = status_badge(row.status);
    match row.status {
        TaskStatus::Failed => {
            let message = row.error.as_deref().unwrap_or("unknown failure");
            format!("  [{badge}] {}: {message}", row.name)
        }
        TaskStatus::Processing => match row.progress {
            Some(percent) => format!("  [{badge} {percent}%] {}", row.name),
            None => format!("  [{badge}] {}", row.name),
        },
        _ => format!("  [{badge}] {}", row.name),
    }
}

fn status_badge(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::Processing => "processing",
        TaskStatus::Completed => "done",
        TaskStatus::Failed => "failed",
    }
}

fn level_indent(level: &HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "",
        HeadingLevel::H2 => "  ",
        HeadingLevel::H3 => "    ",
        HeadingLevel::Other(_) => "",
    }
}

fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}
