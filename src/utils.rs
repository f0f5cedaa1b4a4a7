use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

/// Joins a root-relative prefix and an entry name with a forward slash.
pub fn join_relative(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{}/{}", prefix, name)
    }
}

pub fn normalize_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    match normalized.strip_prefix("./") {
        Some(stripped) => stripped.to_owned(),
        None => normalized,
    }
}

static LANGUAGE_TAGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Programming languages
        ("rs", "rust"),
        ("py", "python"),
        ("pyi", "python"),
        ("js", "javascript"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("jsx", "jsx"),
        ("ts", "typescript"),
        ("tsx", "tsx"),
        ("java", "java"),
        ("c", "c"),
        ("h", "c"),
        ("cpp", "cpp"),
        ("cc", "cpp"),
        ("cxx", "cpp"),
        ("hpp", "cpp"),
        ("cs", "csharp"),
        ("fs", "fsharp"),
        ("go", "go"),
        ("rb", "ruby"),
        ("php", "php"),
        ("swift", "swift"),
        ("kt", "kotlin"),
        ("kts", "kotlin"),
        ("r", "r"),
        ("scala", "scala"),
        ("lua", "lua"),
        ("dart", "dart"),
        ("vue", "vue"),
        ("svelte", "svelte"),
        // Web
        ("html", "html"),
        ("htm", "html"),
        ("xml", "xml"),
        ("css", "css"),
        ("scss", "scss"),
        ("sass", "sass"),
        ("less", "less"),
        // Scripting and configuration
        ("sh", "bash"),
        ("bash", "bash"),
        ("zsh", "zsh"),
        ("ps1", "powershell"),
        ("bat", "bat"),
        ("toml", "toml"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("json", "json"),
        ("ini", "ini"),
        ("dockerfile", "dockerfile"),
        // Documents and data
        ("md", "markdown"),
        ("csv", "csv"),
        ("sql", "sql"),
        ("tex", "latex"),
        ("graphql", "graphql"),
    ])
});

/// Fence tag for a file, derived from its extension. Unknown extensions give
/// an empty tag.
pub fn language_tag(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .and_then(|e| LANGUAGE_TAGS.get(e.as_str()).copied())
        .unwrap_or("")
}

/// One document block: blank line, path header, then the fenced content.
pub fn format_block(relative_path: &str, language: &str, content: &str) -> String {
    format!(
        "\n--- file: {} ---\n```{}\n{}\n```\n",
        relative_path, language, content
    )
}
