//! Toolbar action identifiers
//!
//! The editor toolbar dispatches a closed set of actions. Formatting actions
//! ([`MarkdownAction`]) go through the transform engine; undo and redo bypass
//! it and go straight to the history ([`ToolbarAction`]).
//!
//! Each action has a short string identifier (`"bold"`, `"h1"`, `"ol"`, ...)
//! used by hosts that dispatch by name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An identifier outside the closed action set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown action: {0}")]
pub struct UnknownAction(pub String);

/// How an action reshapes the buffer, with the literals it inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Delimiters around the selection
    Wrap {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// A prefix at the start of the line holding the selection start
    LinePrefix(&'static str),
    /// A marker on each line of the selection
    PerLine(LineMarker),
    /// A fixed template inserted at the selection
    Insert(Template),
}

/// Marker placed on each selected line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMarker {
    /// `- `, blank lines skipped
    Bullet,
    /// `N. ` numbered by position in the selection, blank lines skipped
    Numbered,
    /// `> ` on every line, blank ones included
    Quote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    HorizontalRule,
    Link,
    Image,
}

/// A markdown formatting action handled by the transform engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MarkdownAction {
    Bold,
    Italic,
    Strikethrough,
    InlineCode,
    Heading1,
    Heading2,
    Heading3,
    UnorderedList,
    OrderedList,
    Blockquote,
    HorizontalRule,
    Link,
    Image,
}

impl MarkdownAction {
    /// Every formatting action, in toolbar order.
    pub const ALL: [MarkdownAction; 13] = [
        MarkdownAction::Bold,
        MarkdownAction::Italic,
        MarkdownAction::Strikethrough,
        MarkdownAction::InlineCode,
        MarkdownAction::Heading1,
        MarkdownAction::Heading2,
        MarkdownAction::Heading3,
        MarkdownAction::UnorderedList,
        MarkdownAction::OrderedList,
        MarkdownAction::Blockquote,
        MarkdownAction::HorizontalRule,
        MarkdownAction::Link,
        MarkdownAction::Image,
    ];

    /// The string identifier of this action.
    pub fn id(&self) -> &'static str {
        match self {
            MarkdownAction::Bold => "bold",
            MarkdownAction::Italic => "italic",
            MarkdownAction::Strikethrough => "strike",
            MarkdownAction::InlineCode => "code",
            MarkdownAction::Heading1 => "h1",
            MarkdownAction::Heading2 => "h2",
            MarkdownAction::Heading3 => "h3",
            MarkdownAction::UnorderedList => "ul",
            MarkdownAction::OrderedList => "ol",
            MarkdownAction::Blockquote => "quote",
            MarkdownAction::HorizontalRule => "hr",
            MarkdownAction::Link => "link",
            MarkdownAction::Image => "image",
        }
    }

    /// The family this action belongs to.
    pub fn kind(&self) -> ActionKind {
        match self {
            MarkdownAction::Bold => ActionKind::Wrap {
                prefix: "**",
                suffix: "**",
            },
            MarkdownAction::Italic => ActionKind::Wrap {
                prefix: "_",
                suffix: "_",
            },
            MarkdownAction::Strikethrough => ActionKind::Wrap {
                prefix: "~~",
                suffix: "~~",
            },
            MarkdownAction::InlineCode => ActionKind::Wrap {
                prefix: "`",
                suffix: "`",
            },
            MarkdownAction::Heading1 => ActionKind::LinePrefix("# "),
            MarkdownAction::Heading2 => ActionKind::LinePrefix("## "),
            MarkdownAction::Heading3 => ActionKind::LinePrefix("### "),
            MarkdownAction::UnorderedList => ActionKind::PerLine(LineMarker::Bullet),
            MarkdownAction::OrderedList => ActionKind::PerLine(LineMarker::Numbered),
            MarkdownAction::Blockquote => ActionKind::PerLine(LineMarker::Quote),
            MarkdownAction::HorizontalRule => ActionKind::Insert(Template::HorizontalRule),
            MarkdownAction::Link => ActionKind::Insert(Template::Link),
            MarkdownAction::Image => ActionKind::Insert(Template::Image),
        }
    }
}

impl fmt::Display for MarkdownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MarkdownAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkdownAction::ALL
            .into_iter()
            .find(|action| action.id() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

impl TryFrom<String> for MarkdownAction {
    type Error = UnknownAction;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MarkdownAction> for String {
    fn from(action: MarkdownAction) -> Self {
        action.id().to_string()
    }
}

/// Anything the toolbar can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    /// Route through the transform engine
    Format(MarkdownAction),
    /// Restore the previous snapshot
    Undo,
    /// Re-apply the last undone snapshot
    Redo,
}

impl ToolbarAction {
    pub fn id(&self) -> &'static str {
        match self {
            ToolbarAction::Format(action) => action.id(),
            ToolbarAction::Undo => "undo",
            ToolbarAction::Redo => "redo",
        }
    }
}

impl From<MarkdownAction> for ToolbarAction {
    fn from(action: MarkdownAction) -> Self {
        ToolbarAction::Format(action)
    }
}

impl fmt::Display for ToolbarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolbarAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(ToolbarAction::Undo),
            "redo" => Ok(ToolbarAction::Redo),
            other => other.parse::<MarkdownAction>().map(ToolbarAction::Format),
        }
    }
}
