//! Listing document: converted files grouped by project

use std::fmt::Write as _;

/// Heading at the top of every rendered listing
pub const LISTING_TITLE: &str = "Audio Library";

/// Files found in one project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListing {
    pub name: String,
    pub files: Vec<String>,
}

impl ProjectListing {
    pub fn new(name: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }
}

/// Human-readable index of the library.
///
/// Projects are ordered by name and files by filename, whatever order the
/// scan produced them in, so equal filesystem state renders equal output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingDocument {
    projects: Vec<ProjectListing>,
}

impl ListingDocument {
    pub fn new(mut projects: Vec<ProjectListing>) -> Self {
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        for project in &mut projects {
            project.files.sort();
        }
        Self { projects }
    }

    pub fn projects(&self) -> &[ProjectListing] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Total number of listed files across projects
    pub fn file_count(&self) -> usize {
        self.projects.iter().map(|p| p.files.len()).sum()
    }

    /// Render as Markdown with one `##` heading per project and relative links
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}", LISTING_TITLE);

        if self.projects.is_empty() {
            let _ = writeln!(out, "\n_No projects yet._");
            return out;
        }

        for project in &self.projects {
            let _ = writeln!(out, "\n## {}\n", project.name);
            if project.files.is_empty() {
                let _ = writeln!(out, "_No files yet._");
                continue;
            }
            for file in &project.files {
                let _ = writeln!(
                    out,
                    "- [{}]({}/{})",
                    file,
                    encode_link(&project.name),
                    encode_link(file)
                );
            }
        }

        out
    }
}

/// Percent-encode the few characters that break Markdown link targets
fn encode_link(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for ch in segment.chars() {
        match ch {
            ' ' => out.push_str("%20"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            _ => out.push(ch),
        }
    }
    out
}
