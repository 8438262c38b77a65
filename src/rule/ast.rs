//! Abstract Syntax Tree for rule expressions

use std::fmt;

/// AST node for rule expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// AND / OR over two sub-trees. A child is `None` only when the rule
    /// string had a dangling or doubled keyword.
    Operator {
        op: LogicalOp,
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
    },
    /// Unparsed leaf condition like "age > 30"
    Operand { condition: String },
}

/// Logical operators joining two sub-trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    pub fn operand(condition: impl Into<String>) -> Self {
        Node::Operand {
            condition: condition.into(),
        }
    }

    /// Operator node with both children present
    pub fn operator(op: LogicalOp, left: Node, right: Node) -> Self {
        Node::Operator {
            op,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Node::Operand { .. })
    }

    /// Operator of this node, if it is one
    pub fn op(&self) -> Option<LogicalOp> {
        match self {
            Node::Operator { op, .. } => Some(*op),
            Node::Operand { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Operator { left, .. } => left.as_deref(),
            Node::Operand { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Operator { right, .. } => right.as_deref(),
            Node::Operand { .. } => None,
        }
    }

    /// True when no operator in the tree is missing a child
    pub fn is_complete(&self) -> bool {
        match self {
            Node::Operand { .. } => true,
            Node::Operator { left, right, .. } => match (left, right) {
                (Some(l), Some(r)) => l.is_complete() && r.is_complete(),
                _ => false,
            },
        }
    }

    /// Leaf conditions in left-to-right order
    pub fn conditions(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_conditions(&mut out);
        out
    }

    fn collect_conditions<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Operand { condition } => out.push(condition),
            Node::Operator { left, right, .. } => {
                if let Some(l) = left {
                    l.collect_conditions(out);
                }
                if let Some(r) = right {
                    r.collect_conditions(out);
                }
            }
        }
    }
}

// Iterative: `combine` builds left chains deep enough to overflow a recursive drop.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = Vec::new();
        if let Node::Operator { left, right, .. } = self {
            pending.extend(left.take());
            pending.extend(right.take());
        }
        while let Some(mut node) = pending.pop() {
            if let Node::Operator { left, right, .. } = &mut *node {
                pending.extend(left.take());
                pending.extend(right.take());
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Operand { condition } => f.write_str(condition),
            Node::Operator { op, left, right } => {
                f.write_str("(")?;
                match left {
                    Some(l) => write!(f, "{}", l)?,
                    None => f.write_str("?")?,
                }
                write!(f, " {} ", op)?;
                match right {
                    Some(r) => write!(f, "{}", r)?,
                    None => f.write_str("?")?,
                }
                f.write_str(")")
            }
        }
    }
}
