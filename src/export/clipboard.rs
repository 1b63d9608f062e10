//! クリップボード書き込み
//!
//! OS標準のコマンドにテキストを標準入力で渡す。
//! - macOS: pbcopy
//! - Windows: clip（cmd経由）
//! - その他: wl-copy / xclip / xsel の順に試す

use crate::error::{ItemizerError, Result};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl ClipboardCommand {
    const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

/// このOSで試すコマンド（優先順）
pub fn candidate_commands() -> Vec<ClipboardCommand> {
    if cfg!(target_os = "macos") {
        vec![ClipboardCommand::new("pbcopy", &[])]
    } else if cfg!(windows) {
        vec![ClipboardCommand::new("cmd", &["/c", "clip"])]
    } else {
        let mut commands = Vec::new();
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            commands.push(ClipboardCommand::new("wl-copy", &[]));
        }
        commands.push(ClipboardCommand::new("xclip", &["-selection", "clipboard"]));
        commands.push(ClipboardCommand::new("xsel", &["--clipboard", "--input"]));
        commands
    }
}

/// テキストをクリップボードに書き込み、使ったコマンド名を返す
pub fn copy_text(text: &str) -> Result<&'static str> {
    copy_with(&candidate_commands(), text)
}

/// 候補を順に試す（見つからないコマンドは飛ばす）
pub fn copy_with(commands: &[ClipboardCommand], text: &str) -> Result<&'static str> {
    let mut last_error = String::from("クリップボードコマンドが見つかりません");

    for command in commands {
        match pipe_to(command, text) {
            Ok(()) => {
                tracing::debug!(program = command.program, "clipboard written");
                return Ok(command.program);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(program = command.program, "clipboard command not installed");
            }
            Err(e) => {
                tracing::warn!(program = command.program, error = %e, "clipboard command failed");
                last_error = format!("{}: {}", command.program, e);
            }
        }
    }

    Err(ItemizerError::Clipboard(last_error))
}

fn pipe_to(command: &ClipboardCommand, text: &str) -> std::io::Result<()> {
    let mut child = Command::new(command.program)
        .args(command.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()?;

    // 閉じたパイプは終了コードで判定する
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(text.as_bytes()) {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e),
            _ => {}
        }
    }

    let output = child.wait_with_output()?;
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(std::io::Error::other(format!(
            "exit code {:?}: {}",
            output.status.code(),
            stderr.trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_commands_not_empty() {
        assert!(!candidate_commands().is_empty());
    }

    #[test]
    fn test_missing_commands_are_skipped() {
        let commands = [ClipboardCommand::new("receipt-itemizer-no-such-command", &[])];
        let result = copy_with(&commands, "text");
        assert!(matches!(result, Err(ItemizerError::Clipboard(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_first_working_command_wins() {
        let commands = [
            ClipboardCommand::new("receipt-itemizer-no-such-command", &[]),
            ClipboardCommand::new("cat", &[]),
        ];
        assert_eq!(copy_with(&commands, "Vendor: Store A\n").unwrap(), "cat");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_reports_error() {
        let commands = [ClipboardCommand::new("false", &[])];
        let result = copy_with(&commands, "text");
        assert!(matches!(result, Err(ItemizerError::Clipboard(msg)) if msg.contains("false")));
    }
}
