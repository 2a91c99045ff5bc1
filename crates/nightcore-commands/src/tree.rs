//! Read-only summary of the slash command tree, for startup logging.

use serde::Serialize;
use std::slice;
use tracing::info;

/// A node of the command tree: an invocable command or a group of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandNode {
    /// Invocable command.
    Leaf {
        /// Command name.
        name: String,
        /// Cog the command belongs to, if any.
        binding: Option<String>,
    },
    /// Container of commands and nested groups.
    Group {
        /// Group name.
        name: String,
        /// Children in registration order.
        children: Vec<CommandNode>,
    },
}

impl CommandNode {
    /// Creates a leaf.
    pub fn leaf(name: impl Into<String>, binding: Option<&str>) -> Self {
        Self::Leaf {
            name: name.into(),
            binding: binding.map(str::to_string),
        }
    }

    /// Creates a group.
    pub fn group(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Group {
            name: name.into(),
            children,
        }
    }

    /// Node name without its parents.
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf { name, .. } | Self::Group { name, .. } => name,
        }
    }

    /// Converts a poise command; commands with subcommands become groups.
    pub fn from_command<U, E>(command: &poise::Command<U, E>) -> Self {
        if command.subcommands.is_empty() {
            Self::Leaf {
                name: command.name.to_string(),
                binding: command.category.as_ref().map(ToString::to_string),
            }
        } else {
            Self::Group {
                name: command.name.to_string(),
                children: command.subcommands.iter().map(Self::from_command).collect(),
            }
        }
    }

    /// Converts the application commands among `commands`, skipping
    /// prefix-only ones.
    pub fn from_commands<U, E>(commands: &[poise::Command<U, E>]) -> Vec<Self> {
        commands
            .iter()
            .filter(|command| {
                command.slash_action.is_some()
                    || command.context_menu_action.is_some()
                    || !command.subcommands.is_empty()
            })
            .map(Self::from_command)
            .collect()
    }
}

/// Depth-first walk over a group's descendants.
///
/// Yields `(qualified name, node)`; a subgroup is yielded before its children.
pub struct GroupWalk<'a> {
    stack: Vec<(String, slice::Iter<'a, CommandNode>)>,
}

/// Walks `children`, prefixing every qualified name with `prefix`.
pub fn walk_group<'a>(children: &'a [CommandNode], prefix: &str) -> GroupWalk<'a> {
    GroupWalk {
        stack: vec![(prefix.to_string(), children.iter())],
    }
}

impl<'a> Iterator for GroupWalk<'a> {
    type Item = (String, &'a CommandNode);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (prefix, iter) = self.stack.last_mut()?;
            match iter.next() {
                Some(node) => {
                    let qualified = format!("{prefix}{}", node.name());
                    if let CommandNode::Group { children, .. } = node {
                        self.stack.push((format!("{qualified} "), children.iter()));
                    }
                    return Some((qualified, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Summary of the whole command tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSummary {
    /// Number of top-level entries.
    pub top_level_total: usize,
    /// One entry per top-level command or group.
    pub top_level: Vec<TopLevelEntry>,
    /// Leaves at every depth.
    pub leaf_overall: usize,
}

/// A top-level command or group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TopLevelEntry {
    /// Top-level command.
    Leaf {
        /// Command name.
        name: String,
        /// Same as the name for top-level commands.
        qualified: String,
    },
    /// Top-level group.
    Group {
        /// Group name.
        name: String,
        /// Number of direct children.
        children_total: usize,
        /// Leaves anywhere below the group.
        leaf_total: usize,
        /// Every descendant, depth-first.
        children: Vec<ChildEntry>,
    },
}

/// A descendant of a top-level group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChildEntry {
    /// Nested group.
    Group {
        /// Space-joined path, e.g. `config logging`.
        qualified: String,
        /// Number of direct children.
        children_count: usize,
    },
    /// Nested command.
    Leaf {
        /// Space-joined path, e.g. `config logging setup`.
        qualified: String,
        /// Cog the command belongs to, if any.
        binding: Option<String>,
    },
}

/// Builds the summary for the given top-level nodes.
pub fn summarize_tree(roots: &[CommandNode]) -> TreeSummary {
    let mut top_level = Vec::with_capacity(roots.len());
    let mut leaf_overall = 0;

    for top in roots {
        match top {
            CommandNode::Leaf { name, .. } => {
                top_level.push(TopLevelEntry::Leaf {
                    name: name.clone(),
                    qualified: name.clone(),
                });
                leaf_overall += 1;
            }
            CommandNode::Group { name, children } => {
                let mut entries = Vec::new();
                let mut leaf_count = 0;

                for (qualified, node) in walk_group(children, &format!("{name} ")) {
                    let qualified = qualified.trim().to_string();
                    match node {
                        CommandNode::Group { children, .. } => entries.push(ChildEntry::Group {
                            qualified,
                            children_count: children.len(),
                        }),
                        CommandNode::Leaf { binding, .. } => {
                            entries.push(ChildEntry::Leaf {
                                qualified,
                                binding: binding.clone(),
                            });
                            leaf_count += 1;
                        }
                    }
                }

                leaf_overall += leaf_count;
                top_level.push(TopLevelEntry::Group {
                    name: name.clone(),
                    children_total: children.len(),
                    leaf_total: leaf_count,
                    children: entries,
                });
            }
        }
    }

    TreeSummary {
        top_level_total: roots.len(),
        top_level,
        leaf_overall,
    }
}

/// Logs `summary` one line per entry.
pub fn log_tree_summary(summary: &TreeSummary) {
    info!(
        "Slash tree summary: top_level_total={} leaf_overall={}",
        summary.top_level_total, summary.leaf_overall
    );

    for entry in &summary.top_level {
        match entry {
            TopLevelEntry::Leaf { name, .. } => info!("  /{} (leaf)", name),
            TopLevelEntry::Group {
                name,
                children_total,
                leaf_total,
                children,
            } => {
                info!(
                    "  /{} (group) children={} leaf={}",
                    name, children_total, leaf_total
                );
                for child in children {
                    match child {
                        ChildEntry::Group {
                            qualified,
                            children_count,
                        } => info!(
                            "     - {} (subgroup, children={})",
                            qualified, children_count
                        ),
                        ChildEntry::Leaf { qualified, binding } => info!(
                            "     - {} (command, binding={})",
                            qualified,
                            binding.as_deref().unwrap_or("None")
                        ),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_yields_group_before_children() {
        let children = vec![
            CommandNode::group(
                "logging",
                vec![CommandNode::leaf("setup", None), CommandNode::leaf("off", None)],
            ),
            CommandNode::leaf("view", None),
        ];

        let names: Vec<String> = walk_group(&children, "config ")
            .map(|(qualified, _)| qualified)
            .collect();
        assert_eq!(
            names,
            vec![
                "config logging",
                "config logging setup",
                "config logging off",
                "config view"
            ]
        );
    }

    #[test]
    fn test_walk_empty_group() {
        assert_eq!(walk_group(&[], "empty ").count(), 0);
    }

    #[test]
    fn test_node_name() {
        assert_eq!(CommandNode::leaf("ping", Some("Ping")).name(), "ping");
        assert_eq!(CommandNode::group("config", vec![]).name(), "config");
    }
}
