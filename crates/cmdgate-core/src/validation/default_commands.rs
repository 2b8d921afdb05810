//! Stock command category lists.
//!
//! Conservative defaults most deployments start from. These are plain
//! named constants: `classify` only ever sees the lists the caller
//! passes in a [`CommandRegistry`](super::CommandRegistry), so callers
//! can use them as-is, extend them, or ignore them entirely.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Commands that observe state without modifying it.
pub static DEFAULT_READ_COMMANDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "ls", "pwd", "cat", "less", "head", "tail", "grep", "find", "which", "du", "df", "file",
        "uname", "hostname", "uptime", "date", "whoami", "id", "env", "history", "man", "info",
        "help", "sort",
    ]
    .into_iter()
    .collect()
});

/// Commands that create, modify, or delete files.
pub static DEFAULT_WRITE_COMMANDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "cp", "mv", "rm", "mkdir", "rmdir", "touch", "chmod", "chown", "ln", "echo", "printf",
        "export", "tar", "gzip", "zip", "unzip",
    ]
    .into_iter()
    .collect()
});

/// Commands that touch processes, networking, or the wider system.
pub static DEFAULT_SYSTEM_COMMANDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "ps", "top", "htop", "who", "netstat", "ifconfig", "ping", "ssh", "scp", "curl", "wget",
    ]
    .into_iter()
    .collect()
});

/// Commands that are never allowed to run.
pub static DEFAULT_BLOCKED_COMMANDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // Privilege escalation and shells
        "sudo", "su", "bash", "sh", "zsh", "ksh", "csh", "fish", "screen", "tmux",
        // Raw network access
        "nc", "telnet", "nmap",
        // Disk and system administration
        "dd", "mkfs", "mount", "umount", "shutdown", "reboot",
        // Account management
        "passwd", "chpasswd", "useradd", "userdel", "groupadd", "groupdel",
        // In-shell evaluation
        "eval", "exec", "source", ".",
    ]
    .into_iter()
    .collect()
});

/// Regex patterns whose match anywhere in a raw command rejects it
/// outright, in the order they are scanned.
pub const DEFAULT_DANGEROUS_PATTERNS: &[&str] = &[
    r"rm\s+-rf\s+/",
    r">\s+/dev/(sd|hd|nvme|xvd)",
    r">\s+/dev/null",
    r">\s+/etc/",
    r">\s+/boot/",
    r">\s+/bin/",
    r">\s+/sbin/",
    r">\s+/usr/bin/",
    r">\s+/usr/sbin/",
    r">\s+/usr/local/bin/",
    "2>&1",
    r"\$\(",
    r"\$\{\w+\}",
    "`",
];
