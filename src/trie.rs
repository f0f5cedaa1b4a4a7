use std::collections::BTreeMap;
use tracing::trace;

/// A node in the size tree: a directory when it has children, a file when it
/// carries its own byte count.
#[derive(Default, Debug)]
pub struct SizeNode {
    pub children: BTreeMap<String, SizeNode>,
    pub bytes: Option<usize>,
}

impl SizeNode {
    /// Bytes held by this node and everything beneath it.
    pub fn total_bytes(&self) -> usize {
        self.bytes.unwrap_or(0)
            + self
                .children
                .values()
                .map(SizeNode::total_bytes)
                .sum::<usize>()
    }
}

/// Per-path byte counts arranged by `/`-separated components.
#[derive(Default, Debug)]
pub struct SizeTrie {
    root: SizeNode,
}

impl SizeTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, relative_path: &str, bytes: usize) {
        trace!("Inserting {} ({} bytes)", relative_path, bytes);
        let node = relative_path
            .split('/')
            .filter(|c| !c.is_empty())
            .fold(&mut self.root, |node, component| {
                node.children.entry(component.to_owned()).or_default()
            });
        node.bytes = Some(bytes);
    }

    pub fn root(&self) -> &SizeNode {
        &self.root
    }
}
