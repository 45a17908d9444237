//! Relative module specifier resolution.
//!
//! Only relative specifiers (`./x`, `../x`) are resolved; package imports
//! such as `"zod"` never name a file of the program. Paths are handled
//! lexically with `/` separators, so the same rules apply to on-disk and
//! in-memory programs.

/// Whether `specifier` is relative to the importing file.
#[must_use]
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Normalize a path lexically: unify separators, drop `.` segments and
/// collapse `..` against preceding segments.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let is_absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !is_absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    if is_absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

fn parent_dir(file_name: &str) -> &str {
    match file_name.rfind('/') {
        Some(0) => "/",
        Some(index) => &file_name[..index],
        None => "",
    }
}

/// File names a relative `specifier` imported from `from_file` may refer
/// to, in lookup order. Empty for non-relative specifiers.
#[must_use]
pub fn module_candidates(from_file: &str, specifier: &str) -> Vec<String> {
    if !is_relative_specifier(specifier) {
        return Vec::new();
    }
    let from_file = from_file.replace('\\', "/");
    let dir = parent_dir(&from_file);
    let base = if dir.is_empty() {
        normalize_path(specifier)
    } else {
        normalize_path(&format!("{dir}/{specifier}"))
    };

    let mut candidates = Vec::new();
    if base.ends_with(".ts") || base.ends_with(".tsx") {
        candidates.push(base.clone());
    }
    // ESM-style imports name the emitted `.js` file.
    for (js, ts) in [(".js", ".ts"), (".jsx", ".tsx"), (".mjs", ".mts"), (".cjs", ".cts")] {
        if let Some(stem) = base.strip_suffix(js) {
            candidates.push(format!("{stem}{ts}"));
            if js == ".js" {
                candidates.push(format!("{stem}.tsx"));
                candidates.push(format!("{stem}.d.ts"));
            }
        }
    }
    for extension in [".ts", ".tsx", ".d.ts"] {
        candidates.push(format!("{base}{extension}"));
    }
    for index in ["index.ts", "index.tsx", "index.d.ts"] {
        candidates.push(format!("{base}/{index}"));
    }
    candidates
}
