//! Interactive prompt helpers
//!
//! All terminal input goes through here: visible lines, hidden secrets via
//! rpassword, and yes/no confirmations.

use std::io::{self, Write};

use crate::error::{LockboxError, LockboxResult};

/// Print a prompt and read one trimmed line. `None` means EOF.
pub fn prompt_line(prompt: &str) -> LockboxResult<Option<String>> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| LockboxError::Io(format!("Failed to flush prompt: {}", e)))?;

    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .map_err(|e| LockboxError::Io(format!("Failed to read input: {}", e)))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Read a line, treating EOF as empty.
pub fn prompt_field(prompt: &str) -> LockboxResult<String> {
    Ok(prompt_line(prompt)?.unwrap_or_default())
}

/// Prompt for a secret with hidden input.
pub fn prompt_passphrase(prompt: &str) -> LockboxResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| LockboxError::Io(format!("Failed to read passphrase: {}", e)))
}

/// Prompt for a new passphrase with confirmation.
pub fn prompt_new_passphrase() -> LockboxResult<String> {
    loop {
        let first = prompt_passphrase("Enter new passphrase: ")?;

        if first.len() < 8 {
            println!("Passphrase must be at least 8 characters. Please try again.");
            continue;
        }

        let second = prompt_passphrase("Confirm passphrase: ")?;

        if first != second {
            println!("Passphrases do not match. Please try again.");
            continue;
        }

        return Ok(first);
    }
}

/// Ask for explicit confirmation; only a literal "yes" confirms.
pub fn confirm(prompt: &str) -> LockboxResult<bool> {
    let answer = prompt_field(&format!("{} (yes): ", prompt))?;
    Ok(answer == "yes")
}
