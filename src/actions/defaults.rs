//! Built-in command table per platform

use super::{Action, CommandLine};

/// Default command for an action on the current platform
pub fn default_command(action: Action) -> CommandLine {
    if cfg!(windows) {
        windows_command(action)
    } else if cfg!(target_os = "macos") {
        macos_command(action)
    } else {
        unix_command(action)
    }
}

/// Windows has no media key CLI; `SendKeys` with the virtual key code
/// (VK_MEDIA_PLAY_PAUSE = 179, ...) is the closest equivalent.
fn windows_command(action: Action) -> CommandLine {
    let send_key = |code: u8| {
        CommandLine::new(
            "powershell",
            [
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                format!(
                    "(New-Object -ComObject WScript.Shell).SendKeys([char]{})",
                    code
                ),
            ],
        )
    };

    match action {
        Action::PlayPause => send_key(179),
        Action::Previous => send_key(177),
        Action::Next => send_key(176),
        Action::VolumeUp => send_key(175),
        Action::VolumeDown => send_key(174),
        Action::Shutdown => CommandLine::new("shutdown", ["/s", "/t", "0"]),
        Action::Reboot => CommandLine::new("shutdown", ["/r", "/t", "0"]),
    }
}

fn macos_command(action: Action) -> CommandLine {
    let script = |s: &str| CommandLine::new("osascript", ["-e", s]);

    match action {
        Action::PlayPause => script("tell application \"Music\" to playpause"),
        Action::Previous => script("tell application \"Music\" to previous track"),
        Action::Next => script("tell application \"Music\" to next track"),
        Action::VolumeUp => script(
            "set volume output volume ((output volume of (get volume settings)) + 6)",
        ),
        Action::VolumeDown => script(
            "set volume output volume ((output volume of (get volume settings)) - 6)",
        ),
        Action::Shutdown => CommandLine::new("shutdown", ["-h", "now"]),
        Action::Reboot => CommandLine::new("shutdown", ["-r", "now"]),
    }
}

fn unix_command(action: Action) -> CommandLine {
    match action {
        Action::PlayPause => CommandLine::new("playerctl", ["play-pause"]),
        Action::Previous => CommandLine::new("playerctl", ["previous"]),
        Action::Next => CommandLine::new("playerctl", ["next"]),
        Action::VolumeUp => {
            CommandLine::new("pactl", ["set-sink-volume", "@DEFAULT_SINK@", "+5%"])
        }
        Action::VolumeDown => {
            CommandLine::new("pactl", ["set-sink-volume", "@DEFAULT_SINK@", "-5%"])
        }
        Action::Shutdown => CommandLine::new("systemctl", ["poweroff"]),
        Action::Reboot => CommandLine::new("systemctl", ["reboot"]),
    }
}
