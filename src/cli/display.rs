//! Terminal output formatting
//!
//! Table views for credentials, notes, and archive listings, plus the
//! advisory and strength reports. Secrets are always masked here; the only
//! place a secret is printed in cleartext is the `show` command after an
//! explicit confirmation.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::archive::ArchiveEntry;
use crate::models::entry::{CredentialEntry, NoteEntry};
use crate::services::advisory::AdvisoryReport;
use crate::services::strength::StrengthReport;

/// Fixed-width mask; does not leak the secret's length.
const MASK: &str = "********";

#[derive(Tabled)]
struct CredentialRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Secret")]
    secret: &'static str,
}

/// Format credentials as a table, with 1-based display numbers.
pub fn credential_table<'a>(
    entries: impl IntoIterator<Item = (usize, &'a CredentialEntry)>,
) -> String {
    let rows: Vec<CredentialRow> = entries
        .into_iter()
        .map(|(number, entry)| CredentialRow {
            number,
            name: entry.name.clone(),
            username: entry.username.clone(),
            secret: MASK,
        })
        .collect();

    if rows.is_empty() {
        return "No credentials stored.".to_string();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Single credential, masked unless `reveal` is set.
pub fn credential_detail(number: usize, entry: &CredentialEntry, reveal: bool) -> String {
    let secret = if reveal { entry.secret.as_str() } else { MASK };
    format!(
        "#{} {} ({})\n  Username: {}\n  Secret:   {}",
        number, entry.name, entry.id, entry.username, secret
    )
}

#[derive(Tabled)]
struct NoteRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
}

/// Format notes as a table; bodies stay hidden until `note get`.
pub fn note_table(notes: &[NoteEntry]) -> String {
    let rows: Vec<NoteRow> = notes
        .iter()
        .enumerate()
        .map(|(index, note)| NoteRow {
            number: index + 1,
            name: note.name.clone(),
            created: note.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    if rows.is_empty() {
        return "No notes stored.".to_string();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct ArchiveRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Origin")]
    origin: String,
}

/// Format the archive manifest as a table.
pub fn archive_table(entries: &[ArchiveEntry]) -> String {
    let rows: Vec<ArchiveRow> = entries
        .iter()
        .map(|entry| ArchiveRow {
            name: entry.name.clone(),
            origin: entry.origin.clone(),
        })
        .collect();

    if rows.is_empty() {
        return "Archive is empty.".to_string();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render the advisory findings.
pub fn advisory_report(report: &AdvisoryReport) -> String {
    if report.is_clean() {
        return "All clear: no weak, leaked, or reused secrets found.".to_string();
    }

    let mut output = String::new();
    for (finding, tier) in &report.weak {
        output.push_str(&format!("[{}] #{} {}\n", tier, finding.number, finding.name));
    }
    for (finding, count) in &report.leaked {
        output.push_str(&format!(
            "[LEAKED] #{} {}: seen {} times in known breaches\n",
            finding.number, finding.name, count
        ));
    }
    for finding in &report.unavailable {
        output.push_str(&format!(
            "[UNKNOWN] #{} {}: breach lookup unavailable\n",
            finding.number, finding.name
        ));
    }
    for group in &report.duplicate_groups {
        let members: Vec<String> = group
            .iter()
            .map(|finding| format!("#{} {}", finding.number, finding.name))
            .collect();
        output.push_str(&format!("[REUSED] same secret: {}\n", members.join(", ")));
    }
    output.trim_end().to_string()
}

/// Render a strength report.
pub fn strength_report(report: &StrengthReport) -> String {
    let mut output = format!(
        "[{}] crack time (offline, slow hash): {}",
        report.tier, report.crack_time
    );
    if let Some(warning) = &report.warning {
        output.push_str(&format!("\nWarning: {}", warning));
    }
    for suggestion in &report.suggestions {
        output.push_str(&format!("\nSuggestion: {}", suggestion));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::advisory::Finding;
    use crate::services::strength::StrengthTier;

    #[test]
    fn test_credential_table_masks_secrets() {
        let entry = CredentialEntry::new("mail", "me@example.com", "hunter2");
        let table = credential_table([(1, &entry)]);
        assert!(table.contains("mail"));
        assert!(table.contains(MASK));
        assert!(!table.contains("hunter2"));
    }

    #[test]
    fn test_credential_detail_reveal() {
        let entry = CredentialEntry::new("mail", "me", "hunter2");
        assert!(!credential_detail(1, &entry, false).contains("hunter2"));
        assert!(credential_detail(1, &entry, true).contains("hunter2"));
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(credential_table([]), "No credentials stored.");
        assert_eq!(note_table(&[]), "No notes stored.");
        assert_eq!(archive_table(&[]), "Archive is empty.");
    }

    #[test]
    fn test_advisory_report_sections() {
        let report = AdvisoryReport {
            weak: vec![(
                Finding {
                    number: 1,
                    name: "mail".to_string(),
                },
                StrengthTier::Weak,
            )],
            leaked: vec![(
                Finding {
                    number: 2,
                    name: "forum".to_string(),
                },
                17,
            )],
            unavailable: vec![],
            duplicate_groups: vec![],
        };
        let rendered = advisory_report(&report);
        assert!(rendered.contains("[WEAK] #1 mail"));
        assert!(rendered.contains("seen 17 times"));
    }

    #[test]
    fn test_advisory_clean() {
        assert!(advisory_report(&AdvisoryReport::default()).contains("All clear"));
    }
}
