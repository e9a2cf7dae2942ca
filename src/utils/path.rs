use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Lexically clean a root path: drop `.` segments and redundant separators,
/// resolve `..` against preceding normal segments. Never touches the
/// filesystem. An empty result becomes `.`.
pub fn normalize_root(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }

    let mut result = PathBuf::new();
    for component in parts {
        result.push(component.as_os_str());
    }
    result
}

/// Key a walked path by its location under `root`, always `/`-separated.
/// Returns `None` for the root itself or for paths outside it.
///
/// Distinct names always produce distinct keys; see [`key_component`].
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(key_component(name)),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Render one file name as key text without losing information.
///
/// Valid UTF-8 is kept as is, except that `\` becomes `\\`. Each byte that is
/// not part of valid UTF-8 becomes `\xNN`.
#[cfg(unix)]
pub fn key_component(name: &OsStr) -> String {
    use std::os::unix::ffi::OsStrExt;

    let mut key = String::with_capacity(name.len());
    let mut rest = name.as_bytes();

    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                push_escaped(&mut key, valid);
                break;
            }
            Err(err) => {
                let (valid, invalid) = rest.split_at(err.valid_up_to());
                // the prefix was just validated
                push_escaped(&mut key, std::str::from_utf8(valid).unwrap_or_default());

                let bad_len = err.error_len().unwrap_or(invalid.len());
                for byte in &invalid[..bad_len] {
                    key.push_str(&format!("\\x{:02x}", byte));
                }
                rest = &invalid[bad_len..];
            }
        }
    }

    key
}

/// Render one file name as key text without losing information.
///
/// Unpaired UTF-16 surrogates become `\u{XXXX}` and `\` becomes `\\`.
#[cfg(windows)]
pub fn key_component(name: &OsStr) -> String {
    use std::os::windows::ffi::OsStrExt;

    let mut key = String::with_capacity(name.len());
    for unit in char::decode_utf16(name.encode_wide()) {
        match unit {
            Ok('\\') => key.push_str("\\\\"),
            Ok(c) => key.push(c),
            Err(err) => key.push_str(&format!("\\u{{{:04x}}}", err.unpaired_surrogate())),
        }
    }
    key
}

#[cfg(not(any(unix, windows)))]
pub fn key_component(name: &OsStr) -> String {
    name.to_string_lossy().replace('\\', "\\\\")
}

#[cfg(unix)]
fn push_escaped(key: &mut String, text: &str) {
    for c in text.chars() {
        if c == '\\' {
            key.push_str("\\\\");
        } else {
            key.push(c);
        }
    }
}
