//! Core type definitions shared by the diagram plugins
//!
//! Node shapes, edge kinds, flow direction and the node/edge records stored
//! in the per-diagram state.

use std::fmt;

/// Node shapes recognised by the statement parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum NodeShape {
    /// Rectangle: `A[label]`
    #[default]
    Rectangle,
    /// Rounded rectangle: `A(label)`
    RoundedRect,
    /// Circle: `A((label))`
    Circle,
    /// Diamond (decision): `A{label}`
    Diamond,
    /// Start/end pseudo state: `[*]`
    Terminal,
}

impl NodeShape {
    /// Wrap a label in the shape's delimiters
    pub fn decorate(&self, label: &str) -> String {
        match self {
            NodeShape::Rectangle => format!("[{label}]"),
            NodeShape::RoundedRect => format!("({label})"),
            NodeShape::Circle => format!("(({label}))"),
            NodeShape::Diamond => format!("{{{label}}}"),
            NodeShape::Terminal => "(*)".to_string(),
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeShape::Rectangle => write!(f, "rectangle"),
            NodeShape::RoundedRect => write!(f, "rounded"),
            NodeShape::Circle => write!(f, "circle"),
            NodeShape::Diamond => write!(f, "diamond"),
            NodeShape::Terminal => write!(f, "terminal"),
        }
    }
}

/// Edge kinds recognised by the statement parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EdgeType {
    /// Solid arrow: `-->`
    #[default]
    Arrow,
    /// Solid line: `---`
    Line,
    /// Dotted arrow: `-.->`
    DottedArrow,
    /// Thick arrow: `==>`
    ThickArrow,
}

impl EdgeType {
    /// Returns true if this edge type has an arrowhead
    pub fn has_arrow(&self) -> bool {
        !matches!(self, EdgeType::Line)
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeType::Arrow => write!(f, "-->"),
            EdgeType::Line => write!(f, "---"),
            EdgeType::DottedArrow => write!(f, "-.->"),
            EdgeType::ThickArrow => write!(f, "==>"),
        }
    }
}

/// Flow direction of a diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Top to bottom (TD or TB)
    #[default]
    TopDown,
    /// Left to right (LR)
    LeftRight,
    /// Right to left (RL)
    RightLeft,
    /// Bottom to top (BT)
    BottomUp,
}

impl Direction {
    /// Parse a mermaid direction keyword (TD, TB, LR, RL, BT)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TD" | "TB" => Some(Direction::TopDown),
            "LR" => Some(Direction::LeftRight),
            "RL" => Some(Direction::RightLeft),
            "BT" => Some(Direction::BottomUp),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => write!(f, "TD"),
            Direction::LeftRight => write!(f, "LR"),
            Direction::RightLeft => write!(f, "RL"),
            Direction::BottomUp => write!(f, "BT"),
        }
    }
}

/// A node with its display metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
}

impl NodeData {
    /// Create a rectangle node
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_shape(id, label, NodeShape::Rectangle)
    }

    pub fn with_shape(id: impl Into<String>, label: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shape,
        }
    }
}

/// An edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    pub from: String,
    pub to: String,
    pub edge_type: EdgeType,
    pub label: Option<String>,
}

impl EdgeData {
    /// Create an unlabeled arrow
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            edge_type: EdgeType::Arrow,
            label: None,
        }
    }

    /// Set the edge type
    pub fn typed(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = edge_type;
        self
    }

    /// Attach a label; empty labels are dropped
    pub fn labeled(mut self, label: Option<String>) -> Self {
        self.label = label.filter(|l| !l.is_empty());
        self
    }
}
