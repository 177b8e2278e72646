//! Interactive session loop
//!
//! Opens a session on the selected database and dispatches line commands
//! until `exit` or EOF. Recoverable errors (bad IDs, bad arguments, failed
//! lookups) are printed and the loop continues; corruption and decryption
//! failures abort the session.

use std::path::Path;

use crate::archive;
use crate::cli::{display, prompts};
use crate::config::registry::Registry;
use crate::error::{LockboxError, LockboxResult};
use crate::models::alias::Alias;
use crate::models::entry::{CredentialEntry, NoteEntry};
use crate::services::advisory::AdvisoryReport;
use crate::services::exposure::HibpChecker;
use crate::services::generator::{generate, GeneratorConfig};
use crate::services::strength::score_strength;
use crate::session::Session;
use crate::storage::Storage;

const UNLOCK_ATTEMPTS: usize = 3;

/// Open a session on the selected database and run the command loop.
pub fn run_session(storage: &Storage, registry: &Registry) -> LockboxResult<()> {
    let name = registry.require_selected()?;
    let envelope = storage.load(name)?;

    if envelope.settings.hint.enabled && !envelope.settings.hint.text.is_empty() {
        println!("Hint: {}", envelope.settings.hint.text);
    }

    let mut session = None;
    for _ in 0..UNLOCK_ATTEMPTS {
        let passphrase = prompts::prompt_passphrase("Passphrase: ")?;
        let answer = if envelope.settings.two_factor.enabled {
            let question = &envelope.settings.two_factor.question;
            Some(prompts::prompt_passphrase(&format!("{}: ", question))?)
        } else {
            None
        };

        match Session::unlock(storage.clone(), name, &passphrase, answer.as_deref()) {
            Ok(unlocked) => {
                session = Some(unlocked);
                break;
            }
            Err(err @ LockboxError::AuthenticationFailed { .. }) => eprintln!("{}", err),
            Err(err) => return Err(err),
        }
    }
    let Some(mut session) = session else {
        return Err(LockboxError::AuthenticationFailed {
            two_factor: envelope.settings.two_factor.enabled,
        });
    };

    println!("Logged in.");
    loop {
        let Some(line) = prompts::prompt_line(&format!("{}> ", session.name()))? else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        let tokens = match expand_line(&session, &line) {
            Ok(tokens) => tokens,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };
        if tokens.is_empty() {
            continue;
        }

        match dispatch(&mut session, &tokens) {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) if err.is_recoverable() => eprintln!("{}", err),
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

/// Tokenize a line, expanding a leading alias if one matches.
fn expand_line(session: &Session, line: &str) -> LockboxResult<Vec<String>> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(Vec::new());
    };
    let rest: Vec<&str> = words.collect();

    match session.find_alias(first) {
        Some(alias) => alias.expand(&rest),
        None => {
            let mut tokens = vec![first.to_string()];
            tokens.extend(rest.into_iter().map(str::to_string));
            Ok(tokens)
        }
    }
}

/// Run one command; returns true when the session should end.
fn dispatch(session: &mut Session, tokens: &[String]) -> LockboxResult<bool> {
    match tokens[0].as_str() {
        "exit" | "quit" => return Ok(true),
        "help" => print_help(),
        "list" => {
            let entries = session.credentials().iter().enumerate();
            println!(
                "{}",
                display::credential_table(entries.map(|(i, e)| (i + 1, e)))
            );
        }
        "new" => cmd_new(session)?,
        "get" => {
            let number = parse_number(tokens.get(1))?;
            let entry = session.get_credential(number)?;
            println!("{}", display::credential_detail(number, entry, false));
        }
        "show" => cmd_show(session, tokens)?,
        "edit" => cmd_edit(session, tokens)?,
        "delete" => cmd_delete(session, tokens)?,
        "search" => cmd_search(session, tokens)?,
        "note" | "notes" => cmd_note(session, tokens)?,
        "secure" => {
            println!("Checking secrets against known breaches...");
            let report = AdvisoryReport::scan(session.credentials(), &HibpChecker::new());
            println!("{}", display::advisory_report(&report));
        }
        "make" => {
            let config = GeneratorConfig::from(&session.envelope().settings.generator);
            let secret = generate(config);
            println!("{}", secret);
            println!("{}", display::strength_report(&score_strength(&secret)));
        }
        "strength" => {
            let secret = prompts::prompt_passphrase("Secret: ")?;
            println!("{}", display::strength_report(&score_strength(&secret)));
        }
        "set" => cmd_set(session, tokens)?,
        "change" => cmd_change(session)?,
        "archive" => cmd_archive(session, tokens)?,
        _ => println!("Invalid command. Type 'help' for the command list."),
    }
    Ok(false)
}

fn cmd_new(session: &mut Session) -> LockboxResult<()> {
    let name = prompts::prompt_field("Name: ")?;
    if name.is_empty() {
        return Err(LockboxError::Config("Name cannot be empty".into()));
    }
    let username = prompts::prompt_field("Username: ")?;

    let mut secret = prompts::prompt_passphrase("Secret (leave empty to generate): ")?;
    if secret.is_empty() {
        let config = GeneratorConfig::from(&session.envelope().settings.generator);
        secret = generate(config);
        println!("Generated a {} secret.", score_strength(&secret).tier);
    }

    let number = session.add_credential(CredentialEntry::new(name, username, secret))?;
    println!("Added entry #{}.", number);
    Ok(())
}

fn cmd_show(session: &Session, tokens: &[String]) -> LockboxResult<()> {
    let number = parse_number(tokens.get(1))?;
    let entry = session.get_credential(number)?;
    if prompts::confirm("This will print the secret in cleartext. Proceed?")? {
        println!("{}", entry.secret);
    } else {
        println!("Command aborted.");
    }
    Ok(())
}

fn cmd_edit(session: &mut Session, tokens: &[String]) -> LockboxResult<()> {
    let number = parse_number(tokens.get(1))?;
    // Bounds check before prompting
    session.get_credential(number)?;

    let name = prompts::prompt_field("Name (leave empty to keep): ")?;
    let username = prompts::prompt_field("Username (leave empty to keep): ")?;
    let secret = prompts::prompt_passphrase("Secret (leave empty to keep): ")?;

    session.edit_credential(
        number,
        (!name.is_empty()).then_some(name),
        (!username.is_empty()).then_some(username),
        (!secret.is_empty()).then_some(secret),
    )?;
    println!("Updated entry #{}.", number);
    Ok(())
}

fn cmd_delete(session: &mut Session, tokens: &[String]) -> LockboxResult<()> {
    let number = parse_number(tokens.get(1))?;
    let detail = display::credential_detail(number, session.get_credential(number)?, false);
    println!("{}", detail);

    if prompts::confirm("Delete this entry?")? {
        session.delete_credential(number)?;
        println!("Entry deleted. Later entries shift down by one.");
    } else {
        println!("Delete aborted.");
    }
    Ok(())
}

fn cmd_search(session: &Session, tokens: &[String]) -> LockboxResult<()> {
    let query = tokens[1..].join(" ");
    if query.is_empty() {
        return Err(LockboxError::Config("Usage: search <query>".into()));
    }
    let hits = session.search_credentials(&query);
    println!("{}", display::credential_table(hits));
    Ok(())
}

fn cmd_note(session: &mut Session, tokens: &[String]) -> LockboxResult<()> {
    match tokens.get(1).map(String::as_str) {
        Some("new") => {
            let name = prompts::prompt_field("Note name: ")?;
            if name.is_empty() {
                return Err(LockboxError::Config("Name cannot be empty".into()));
            }
            let body = prompts::prompt_field("Body: ")?;
            let number = session.add_note(NoteEntry::new(name, body))?;
            println!("Added note #{}.", number);
        }
        Some("list") => println!("{}", display::note_table(session.notes())),
        Some("get") => {
            let number = parse_number(tokens.get(2))?;
            let note = session.get_note(number)?;
            println!(
                "#{} {} ({})\n{}",
                number,
                note.name,
                note.created_at.format("%Y-%m-%d %H:%M"),
                note.body
            );
        }
        Some("delete") => {
            let number = parse_number(tokens.get(2))?;
            let note = session.get_note(number)?;
            println!("#{} {}", number, note.name);
            if prompts::confirm("Delete this note?")? {
                session.delete_note(number)?;
                println!("Note deleted.");
            } else {
                println!("Delete aborted.");
            }
        }
        _ => return Err(LockboxError::Config("Usage: note new|list|get|delete".into())),
    }
    Ok(())
}

fn cmd_set(session: &mut Session, tokens: &[String]) -> LockboxResult<()> {
    match tokens.get(1).map(String::as_str) {
        Some("tfa") => match parse_on_off(tokens.get(2))? {
            true => {
                if session.two_factor_enabled() {
                    println!("Two-factor is already enabled.");
                    return Ok(());
                }
                let question = prompts::prompt_field("Security question: ")?;
                if question.is_empty() {
                    return Err(LockboxError::Config("Question cannot be empty".into()));
                }
                let answer = prompts::prompt_passphrase("Answer: ")?;
                let again = prompts::prompt_passphrase("Confirm answer: ")?;
                if answer != again {
                    return Err(LockboxError::Config("Answers do not match".into()));
                }
                session.enable_two_factor(&question, &answer)?;
                println!("Two-factor enabled. You will be asked on every unlock.");
            }
            false => {
                session.disable_two_factor()?;
                println!("Two-factor disabled.");
            }
        },
        Some("hint") => match parse_on_off(tokens.get(2))? {
            true => {
                let text = if tokens.len() > 3 {
                    tokens[3..].join(" ")
                } else {
                    prompts::prompt_field("Hint text: ")?
                };
                session.set_hint(true, &text)?;
                println!("Hint enabled.");
            }
            false => {
                session.set_hint(false, "")?;
                println!("Hint disabled.");
            }
        },
        Some("alias") => match tokens.get(2).map(String::as_str) {
            Some("rm") => {
                let name = tokens
                    .get(3)
                    .ok_or_else(|| LockboxError::Config("Usage: set alias rm <name>".into()))?;
                session.remove_alias(name)?;
                println!("Removed alias '{}'.", name);
            }
            Some(name) if tokens.len() > 3 => {
                let body: Vec<&str> = tokens[3..].iter().map(String::as_str).collect();
                let alias = Alias::parse(name, &body);
                session.set_alias(alias)?;
                println!("Defined alias '{}'.", name);
            }
            _ => {
                return Err(LockboxError::Config(
                    "Usage: set alias <name> <command...> | set alias rm <name>".into(),
                ))
            }
        },
        Some("wordy") => match tokens.get(2).map(String::as_str) {
            Some("gate") => {
                let gate = parse_on_off(tokens.get(3))?;
                let wordy = session.envelope().settings.generator.wordy;
                session.set_generator(wordy, gate)?;
                println!("Wordy strength gate {}.", if gate { "on" } else { "off" });
            }
            _ => {
                let wordy = parse_on_off(tokens.get(2))?;
                let gate = session.envelope().settings.generator.wordy_strength_gate;
                session.set_generator(wordy, gate)?;
                println!("Wordy generation {}.", if wordy { "on" } else { "off" });
            }
        },
        _ => return Err(LockboxError::Config("Usage: set tfa|hint|alias|wordy".into())),
    }
    Ok(())
}

fn cmd_change(session: &mut Session) -> LockboxResult<()> {
    let current = prompts::prompt_passphrase("Current passphrase: ")?;
    if !session.envelope().checksum.verify(&current)? {
        return Err(LockboxError::AuthenticationFailed {
            two_factor: false,
        });
    }
    let new_passphrase = prompts::prompt_new_passphrase()?;
    session.change_master(&new_passphrase)?;
    println!("Master passphrase changed; all records re-encrypted.");
    Ok(())
}

fn cmd_archive(session: &Session, tokens: &[String]) -> LockboxResult<()> {
    match tokens.get(1).map(String::as_str) {
        Some("file") => {
            let path = tokens
                .get(2)
                .ok_or_else(|| LockboxError::Config("Usage: archive file <path>".into()))?;
            let name = archive::archive_file(session, Path::new(path))?;
            println!("Archived '{}'.", name);
        }
        Some("dir") => {
            let path = tokens
                .get(2)
                .ok_or_else(|| LockboxError::Config("Usage: archive dir <path>".into()))?;
            let names = archive::archive_dir(session, Path::new(path))?;
            println!("Archived {} files.", names.len());
        }
        Some("unarc") => {
            let name = tokens
                .get(2)
                .ok_or_else(|| LockboxError::Config("Usage: archive unarc <name>".into()))?;
            let restored = archive::unarchive(session, name)?;
            for path in restored {
                println!("Restored {}", path.display());
            }
        }
        Some("list") => println!("{}", display::archive_table(&archive::list(session)?)),
        _ => {
            return Err(LockboxError::Config(
                "Usage: archive file|dir|unarc|list".into(),
            ))
        }
    }
    Ok(())
}

fn parse_number(token: Option<&String>) -> LockboxResult<usize> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| LockboxError::Config("Expected a numeric ID".into()))
}

fn parse_on_off(token: Option<&String>) -> LockboxResult<bool> {
    match token.map(String::as_str) {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(LockboxError::Config("Expected 'on' or 'off'".into())),
    }
}

fn print_help() {
    println!("Credentials:");
    println!("  new                add a credential (empty secret generates one)");
    println!("  list               list credentials, secrets masked");
    println!("  get <id>           show one credential, secret masked");
    println!("  show <id>          reveal a secret after confirmation");
    println!("  edit <id>          edit a credential, empty fields keep");
    println!("  delete <id>        delete a credential after confirmation");
    println!("  search <query>     search names and usernames");
    println!("Notes:");
    println!("  note new|list|get <id>|delete <id>");
    println!("Security:");
    println!("  secure             weak/leaked/reused audit of all secrets");
    println!("  make               generate a secret and score it");
    println!("  strength           score a secret you type in");
    println!("  change             rotate the master passphrase");
    println!("Settings:");
    println!("  set tfa on|off     second factor (question + answer)");
    println!("  set hint on|off    passphrase hint shown before unlock");
    println!("  set alias <name> <command...>   define an alias ($0, $1 params)");
    println!("  set alias rm <name>");
    println!("  set wordy on|off   word-based generation");
    println!("  set wordy gate on|off");
    println!("Archive:");
    println!("  archive file <path> | dir <path> | unarc <name> | list");
    println!("Other:");
    println!("  help, exit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LockboxPaths;
    use tempfile::TempDir;

    fn open_session() -> (TempDir, Session) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LockboxPaths::with_base_dir(temp_dir.path().to_path_buf());
        let session = Session::create(Storage::new(paths), "db", "passphrase").unwrap();
        (temp_dir, session)
    }

    #[test]
    fn test_expand_line_without_alias() {
        let (_tmp, session) = open_session();
        let tokens = expand_line(&session, "get 3").unwrap();
        assert_eq!(tokens, vec!["get", "3"]);
    }

    #[test]
    fn test_expand_line_with_alias() {
        let (_tmp, mut session) = open_session();
        session.set_alias(Alias::parse("g", &["get", "$0"])).unwrap();

        let tokens = expand_line(&session, "g 3").unwrap();
        assert_eq!(tokens, vec!["get", "3"]);
    }

    #[test]
    fn test_expand_line_alias_missing_args() {
        let (_tmp, mut session) = open_session();
        session.set_alias(Alias::parse("g", &["get", "$0"])).unwrap();

        let err = expand_line(&session, "g").unwrap_err();
        assert!(matches!(err, LockboxError::UnexpectedArgumentCount { .. }));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some(&"7".to_string())).unwrap(), 7);
        assert!(parse_number(Some(&"x".to_string())).is_err());
        assert!(parse_number(None).is_err());
    }

    #[test]
    fn test_parse_on_off() {
        assert!(parse_on_off(Some(&"on".to_string())).unwrap());
        assert!(!parse_on_off(Some(&"off".to_string())).unwrap());
        assert!(parse_on_off(Some(&"maybe".to_string())).is_err());
    }
}
