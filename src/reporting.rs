use crate::trie::{SizeNode, SizeTrie};
use tracing::info;

/// Logs the byte size of every included file as a directory tree.
pub fn print_size_report(block_sizes: &[(String, usize)]) {
    let mut trie = SizeTrie::new();
    for (path, bytes) in block_sizes {
        trie.insert(path, *bytes);
    }

    info!("Overall ({})", format_size(trie.root().total_bytes()));
    for line in render_tree(trie.root(), "") {
        info!("{}", line);
    }
}

/// One line per entry beneath `node`, recursing into directories.
pub fn render_tree(node: &SizeNode, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let count = node.children.len();

    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "┗━━" } else { "┣━━" };

        if child.children.is_empty() {
            lines.push(format!(
                "{}{} {} ({})",
                prefix,
                connector,
                name,
                format_size(child.bytes.unwrap_or(0))
            ));
        } else {
            lines.push(format!(
                "{}{}📂 {} ({})",
                prefix,
                connector,
                name,
                format_size(child.total_bytes())
            ));
            let child_prefix = format!("{}{}    ", prefix, if is_last { " " } else { "┃" });
            lines.extend(render_tree(child, &child_prefix));
        }
    }
    lines
}

pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
