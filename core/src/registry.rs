use serde::{Deserialize, Serialize};

use crate::Command;

/// Group that collects commands registered before any group marker.
pub const DEFAULT_GROUP: &str = "Ungrouped";

/// A named category of commands, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Label from the group marker.
    pub name: String,
    /// Commands in declaration order.
    pub commands: Vec<Command>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    /// Finds a command by exact identifier.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Finds a command by exact identifier for mutation.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.commands.iter_mut().find(|c| c.name == name)
    }

    /// Identifiers of all commands, in order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Ordered mapping from group name to the commands declared under it.
///
/// Groups keep the order in which they were first seen. Revisiting a group
/// keeps appending to its existing command list.
///
/// # Examples
///
/// ```
/// use slashdoc_core::{Command, CommandRegistry};
///
/// let mut registry = CommandRegistry::new();
/// registry.ensure_group("Math");
/// registry.push_command("Math", Command::new("add"));
/// registry.ensure_group("Text");
/// registry.ensure_group("Math");
/// registry.push_command("Math", Command::new("sub"));
///
/// assert_eq!(registry.group_names(), vec!["Math", "Text"]);
/// assert_eq!(registry.group("Math").unwrap().command_names(), vec!["add", "sub"]);
/// assert_eq!(registry.command_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandRegistry {
    groups: Vec<Group>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the group with this name, creating it at the end if missing.
    pub fn ensure_group(&mut self, name: &str) -> &mut Group {
        let idx = match self.groups.iter().position(|g| g.name == name) {
            Some(idx) => idx,
            None => {
                self.groups.push(Group::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx]
    }

    /// Appends a command to a group (created if missing) and returns it.
    pub fn push_command(&mut self, group: &str, command: Command) -> &mut Command {
        let commands = &mut self.ensure_group(group).commands;
        commands.push(command);
        let last = commands.len() - 1;
        &mut commands[last]
    }

    /// Looks up a group by name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Looks up a group by name for mutation.
    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// All groups, in first-seen order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Names of all groups, in first-seen order.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Total number of commands across all groups.
    pub fn command_count(&self) -> usize {
        self.groups.iter().map(|g| g.commands.len()).sum()
    }

    /// Returns `true` when no group has been registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
